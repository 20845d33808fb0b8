//! HTTP transport

pub mod client;
