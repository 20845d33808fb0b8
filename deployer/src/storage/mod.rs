//! Settings storage

pub mod settings;
