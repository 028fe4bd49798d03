//! Common types and utilities for the client-quota protocol crates

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

pub mod error;
pub mod logging;

/// Re-export commonly used items
pub use error::{Error, Result};
