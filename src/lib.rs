//! Client-side state synchronization for Uptime Kuma.
//!
//! The server pushes its state over socket.io as a stream of events. This
//! crate decodes each event, folds it into a thread-safe [`State`] mirror,
//! and lets callers wait until a given event has been observed. On top of
//! that, [`action`] provides the request/acknowledgement operations
//! (login, tags, monitors, settings) that keep the mirror consistent with
//! what the server confirmed.
//!
//! The socket.io transport itself plugs in through [`Connection`].

pub mod action;
mod client;
pub mod config;
mod constants;
mod errors;
mod handler;
mod state;
mod transport;
pub mod utils;
mod validation;

pub use client::*;
pub use config::*;
pub use constants::*;
pub use errors::*;
pub use handler::*;
pub use state::*;
pub use transport::*;
pub use validation::*;

//-----------------------------------------------------------
// Test utils

#[cfg(test)]
pub(crate) mod test_utils;
