//! API models

pub mod netlify;
pub mod railway;
pub mod render;
pub mod vercel;
