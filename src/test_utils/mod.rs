//! Shared helpers for unit tests.
mod loopback;

pub use loopback::*;
