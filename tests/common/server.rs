//! Test server management.
//!
//! Spawns a minircd reactor on an ephemeral port on a background
//! thread. The thread parks in `poll` and is dropped with the process
//! when the test binary exits.

use std::net::SocketAddr;
use std::thread;

use minircd::{Server, ServerConfig};

/// A test server instance.
pub struct TestServer {
    addr: SocketAddr,
}

impl TestServer {
    /// Spawn a new test server with the shared test password.
    pub fn spawn() -> Self {
        let config = ServerConfig {
            port: 0,
            password: super::PASSWORD.to_string(),
            server_name: super::SERVER_NAME.to_string(),
        };
        let mut server = Server::bind(config).expect("failed to bind test server");
        let addr = server.local_addr().expect("failed to read bound address");
        thread::spawn(move || {
            let _ = server.run();
        });
        Self { addr }
    }

    /// Address clients should connect to.
    pub fn address(&self) -> String {
        self.addr.to_string()
    }
}
