//! Shipyard deployer library
//!
//! A single facade for shipping static sites to Vercel, Netlify, Railway and
//! Render. See [`deploy::service::DeployService`].

pub mod deploy;
pub mod errors;
pub mod filesys;
pub mod http;
pub mod logs;
pub mod models;
pub mod storage;
pub mod utils;
