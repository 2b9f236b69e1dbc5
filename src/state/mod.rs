//! Server state: clients, channels, and the registry that owns both.

mod channel;
mod client;
mod registry;

pub use channel::{Channel, Topic};
pub use client::Client;
pub use registry::Registry;
