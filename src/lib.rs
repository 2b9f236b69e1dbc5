//! minircd - a minimal single-threaded IRC daemon.
//!
//! One readiness-driven event loop owns every socket; there are no
//! worker threads and no async runtime. All server state lives in a
//! [`state::Registry`] confined to the loop, and command handlers run to
//! completion between polls.
//!
//! The library target exists so integration tests can spawn the server
//! in-process; the binary in `main.rs` is a thin wrapper.

#![deny(clippy::all)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod network;
pub mod state;

pub use config::ServerConfig;
pub use network::Server;
