//! Provider API wire models
//!
//! Request and response shapes for the hosting APIs the deployer talks to.
//! Every response type is lenient: fields the deployer does not need are
//! ignored and optional fields default to `None`.

pub mod models;

pub use models::{netlify, railway, render, vercel};
