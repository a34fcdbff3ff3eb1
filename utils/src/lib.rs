//! Shared utilities for Tessera.

pub mod logging;

pub use logging::{init_logging, LogFormat};
