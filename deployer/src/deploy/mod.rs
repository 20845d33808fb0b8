//! Deployment module

pub mod adapter;
pub mod archive;
pub mod credentials;
pub mod netlify;
pub mod poller;
pub mod railway;
pub mod render;
pub mod service;
pub mod vercel;
