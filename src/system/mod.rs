//! System-level modules
//!
//! Logging bootstrap lives here; process lifecycle is in `runtime`.

pub mod logging;

pub use logging::init_logging;
