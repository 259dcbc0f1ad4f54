//! redlink - a Redis-backed URL shortener
//!
//! Short ids are supplied by the caller and map to long URLs stored in a
//! key-value backend, two keys per link:
//!
//! - `link:<id>:url` holds the target URL
//! - `link:<id>:views` holds the view counter, incremented on every redirect
//!
//! # Architecture
//! - `storage`: key-value backends (Redis, in-memory) and the link store
//! - `api`: HTTP handlers and middleware
//! - `config`: configuration file, environment and command-line flags
//! - `runtime`: server startup
//! - `system`: logging bootstrap

pub mod api;
pub mod config;
pub mod errors;
pub mod runtime;
pub mod storage;
pub mod system;
