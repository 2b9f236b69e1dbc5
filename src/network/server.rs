//! The event loop.
//!
//! A single `mio::Poll` watches the listener, the signal source, and
//! every client socket. The loop blocks until something is readable,
//! services it, and goes back to sleep; all state mutation happens
//! between polls on this one thread.

use std::io::{self, Read};
use std::net::SocketAddr;

use mio::net::TcpListener;
use mio::{Events, Interest, Poll, Token};
use signal_hook::consts::{SIGINT, SIGTERM};
use signal_hook_mio::v1_0::Signals;
use tracing::{debug, error, info, warn};

use crate::config::ServerConfig;
use crate::error::SetupError;
use crate::handlers::{self, Outcome};
use crate::state::{Client, Registry};

const LISTENER: Token = Token(0);
const SIGNALS: Token = Token(1);
/// First token handed to an accepted connection.
const FIRST_CLIENT: usize = 2;

const POLL_CAPACITY: usize = 128;
/// Bytes pulled off a socket per read call.
const RECV_CHUNK: usize = 1024;

/// The IRC server: listener, poll, and all connection state.
pub struct Server {
    config: ServerConfig,
    poll: Poll,
    listener: TcpListener,
    signals: Signals,
    registry: Registry,
    next_token: usize,
    shutdown_requested: bool,
}

impl Server {
    /// Bind the listening socket and the signal source.
    pub fn bind(config: ServerConfig) -> Result<Self, SetupError> {
        let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
        let mut listener = TcpListener::bind(addr)?;
        let poll = Poll::new()?;
        poll.registry()
            .register(&mut listener, LISTENER, Interest::READABLE)?;
        let mut signals = Signals::new([SIGINT, SIGTERM])?;
        poll.registry()
            .register(&mut signals, SIGNALS, Interest::READABLE)?;
        Ok(Self {
            config,
            poll,
            listener,
            signals,
            registry: Registry::new(),
            next_token: FIRST_CLIENT,
            shutdown_requested: false,
        })
    }

    /// The bound address (resolves the actual port when bound to 0).
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Run the event loop until a shutdown signal arrives.
    pub fn run(&mut self) -> io::Result<()> {
        let mut events = Events::with_capacity(POLL_CAPACITY);
        info!(addr = %self.local_addr()?, "listening");

        while !self.shutdown_requested {
            if let Err(err) = self.poll.poll(&mut events, None) {
                if err.kind() == io::ErrorKind::Interrupted {
                    continue;
                }
                error!(error = %err, "poll failed");
                return Err(err);
            }
            for event in events.iter() {
                match event.token() {
                    LISTENER => self.accept_ready(),
                    SIGNALS => self.signal_ready(),
                    token => self.read_ready(token),
                }
            }
        }

        self.shutdown();
        Ok(())
    }

    /// Accept every pending connection (readiness is edge-style, so we
    /// drain until the listener reports `WouldBlock`).
    fn accept_ready(&mut self) {
        loop {
            match self.listener.accept() {
                Ok((mut stream, addr)) => {
                    let token = Token(self.next_token);
                    self.next_token += 1;
                    if let Err(err) =
                        self.poll
                            .registry()
                            .register(&mut stream, token, Interest::READABLE)
                    {
                        warn!(peer = %addr, error = %err, "failed to register connection");
                        continue;
                    }
                    info!(token = token.0, peer = %addr, "client connected");
                    self.registry
                        .insert_client(Client::new(stream, token, addr.ip().to_string()));
                }
                Err(err) if err.kind() == io::ErrorKind::WouldBlock => break,
                Err(err) => {
                    warn!(error = %err, "accept failed");
                    break;
                }
            }
        }
    }

    fn signal_ready(&mut self) {
        for signal in self.signals.pending() {
            info!(signal, "shutdown signal received");
            self.shutdown_requested = true;
        }
    }

    /// Pull everything the socket has, then dispatch complete lines.
    fn read_ready(&mut self, token: Token) {
        let mut chunk = [0u8; RECV_CHUNK];
        loop {
            // The client may already be gone if an earlier event in this
            // batch disconnected it.
            let Some(client) = self.registry.client_mut(token) else {
                return;
            };
            match client.stream.read(&mut chunk) {
                Ok(0) => {
                    self.disconnect(token, "peer closed connection");
                    return;
                }
                Ok(n) => {
                    if let Err(err) = client.recv.append(&chunk[..n]) {
                        warn!(token = token.0, error = %err, "disconnecting flooding client");
                        self.disconnect(token, "receive buffer overflow");
                        return;
                    }
                }
                Err(err) if err.kind() == io::ErrorKind::WouldBlock => break,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => {
                    debug!(token = token.0, error = %err, "read error");
                    self.disconnect(token, "read error");
                    return;
                }
            }
        }
        self.drain_lines(token);
    }

    /// Dispatch every complete line buffered for a client, in order.
    fn drain_lines(&mut self, token: Token) {
        loop {
            let line = match self.registry.client_mut(token) {
                Some(client) => client.recv.take_line(),
                None => return,
            };
            let Some(line) = line else { break };
            if line.is_empty() {
                continue;
            }
            let outcome = handlers::dispatch(&mut self.registry, &self.config, token, &line);
            if let Outcome::Disconnect(_) = outcome {
                self.disconnect(token, "quit");
                return;
            }
        }
    }

    /// Remove a client: registry detach purges its channel memberships
    /// and collects any channel left empty; the socket closes on drop.
    fn disconnect(&mut self, token: Token, reason: &str) {
        if let Some(mut client) = self.registry.detach_client(token) {
            let _ = self.poll.registry().deregister(&mut client.stream);
            info!(token = token.0, nick = %client.nick, reason, "client disconnected");
        }
    }

    fn shutdown(&mut self) {
        info!(
            clients = self.registry.client_count(),
            "shutting down, closing all connections"
        );
        for mut client in self.registry.drain_clients() {
            let _ = self.poll.registry().deregister(&mut client.stream);
        }
    }
}
