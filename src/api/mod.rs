//! HTTP surface: route handlers and the middleware wrapped around them.

pub mod middleware;
pub mod services;
