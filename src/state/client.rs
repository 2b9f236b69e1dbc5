//! Per-connection client state.

use mio::net::TcpStream;
use mio::Token;
use std::collections::HashSet;
use std::io::Write;
use tracing::debug;

use minirc_proto::RecvBuffer;

/// One connected client.
///
/// Owns its socket and receive buffer. Channel membership is recorded as
/// a set of channel names; the [`super::Registry`] resolves them, and its
/// join/part/detach operations keep this set in sync with the channels'
/// member lists.
#[derive(Debug)]
pub struct Client {
    /// The connection, non-blocking, registered with the reactor poll.
    pub stream: TcpStream,
    /// Poll token; doubles as the client's stable identity.
    pub token: Token,
    /// Peer address in numeric form, assigned at accept.
    pub hostname: String,
    /// Nickname; empty until NICK succeeds. Unique across clients.
    pub nick: String,
    /// Username from USER; empty until set.
    pub user: String,
    /// Real name from USER.
    pub realname: String,
    /// PASS matched the server password.
    pub authenticated: bool,
    /// Nick and user both set after authentication. Set once; the 001
    /// welcome is emitted exactly on the false-to-true transition.
    pub registered: bool,
    /// Accumulates raw bytes until complete lines can be taken.
    pub recv: RecvBuffer,
    /// Names of channels this client is a member of (backrefs only).
    pub channels: HashSet<String>,
}

impl Client {
    pub fn new(stream: TcpStream, token: Token, hostname: String) -> Self {
        Self {
            stream,
            token,
            hostname,
            nick: String::new(),
            user: String::new(),
            realname: String::new(),
            authenticated: false,
            registered: false,
            recv: RecvBuffer::new(),
            channels: HashSet::new(),
        }
    }

    /// Source prefix for messages originated by this client, always
    /// against the server host token.
    pub fn prefix(&self, server: &str) -> String {
        format!("{}!{}@{}", self.nick, self.user, server)
    }

    /// Write one line to the peer, best-effort.
    ///
    /// The terminator is appended here. Failures are logged and swallowed;
    /// a dead peer is detected by the next read.
    pub fn send_line(&mut self, line: &str) {
        let mut framed = Vec::with_capacity(line.len() + 2);
        framed.extend_from_slice(line.as_bytes());
        framed.extend_from_slice(b"\r\n");
        if let Err(err) = self.stream.write_all(&framed) {
            debug!(token = self.token.0, error = %err, "write failed, dropping outbound line");
        }
    }

    /// Mark registration complete if nick and user are both set.
    ///
    /// Returns true exactly once, on the transition.
    pub fn try_complete_registration(&mut self) -> bool {
        if !self.registered && self.authenticated && !self.nick.is_empty() && !self.user.is_empty()
        {
            self.registered = true;
            return true;
        }
        false
    }
}
