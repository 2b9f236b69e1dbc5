//! Integration test common infrastructure.
//!
//! Provides a test server spawned in-process and a line-oriented test
//! client for asserting on IRC message flows.

pub mod client;
pub mod server;

#[allow(unused_imports)]
pub use client::TestClient;
#[allow(unused_imports)]
pub use server::TestServer;

/// Password every test server is started with.
pub const PASSWORD: &str = "secret";
/// Host token every test server uses.
pub const SERVER_NAME: &str = "ft_irc";
