//! Integration tests for the deployment facade

mod support;

mod test_netlify;
mod test_railway_render;
mod test_vercel;
