//! Process-wide ownership of clients and channels.
//!
//! The registry is the only owner of `Client` and `Channel` values.
//! Everything else refers to them by stable identifier — the poll token
//! for clients, the name for channels — and resolves through here, so
//! there are no cross-references to dangle when either side goes away.

use mio::Token;
use std::collections::HashMap;
use tracing::debug;

use super::{Channel, Client};

/// Owner of all connected clients and live channels.
#[derive(Debug, Default)]
pub struct Registry {
    clients: HashMap<Token, Client>,
    channels: HashMap<String, Channel>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    // --- clients ---

    pub fn insert_client(&mut self, client: Client) {
        self.clients.insert(client.token, client);
    }

    pub fn client(&self, token: Token) -> Option<&Client> {
        self.clients.get(&token)
    }

    pub fn client_mut(&mut self, token: Token) -> Option<&mut Client> {
        self.clients.get_mut(&token)
    }

    /// Nickname lookup, case-sensitive, by linear scan.
    pub fn token_by_nick(&self, nick: &str) -> Option<Token> {
        self.clients
            .values()
            .find(|c| !c.nick.is_empty() && c.nick == nick)
            .map(|c| c.token)
    }

    /// Current nickname of a client, empty if unset or unknown.
    pub fn nick_of(&self, token: Token) -> String {
        self.client(token).map(|c| c.nick.clone()).unwrap_or_default()
    }

    pub fn client_count(&self) -> usize {
        self.clients.len()
    }

    /// Remove a client entirely: purge it from every channel it is in
    /// (destroying channels left empty) and return the owned `Client`
    /// so the caller can deregister and close the socket.
    pub fn detach_client(&mut self, token: Token) -> Option<Client> {
        let client = self.clients.remove(&token)?;
        for name in &client.channels {
            let now_empty = match self.channels.get_mut(name) {
                Some(chan) => {
                    chan.remove_member(token);
                    chan.is_empty()
                }
                None => false,
            };
            if now_empty {
                self.channels.remove(name);
                debug!(channel = %name, "destroyed empty channel");
            }
        }
        Some(client)
    }

    /// Drain every client for server teardown.
    pub fn drain_clients(&mut self) -> Vec<Client> {
        self.channels.clear();
        self.clients.drain().map(|(_, c)| c).collect()
    }

    // --- channels ---

    pub fn channel(&self, name: &str) -> Option<&Channel> {
        self.channels.get(name)
    }

    pub fn channel_mut(&mut self, name: &str) -> Option<&mut Channel> {
        self.channels.get_mut(name)
    }

    pub fn has_channel(&self, name: &str) -> bool {
        self.channels.contains_key(name)
    }

    /// Create a channel if absent and return it.
    pub fn create_channel(&mut self, name: &str) -> &mut Channel {
        self.channels
            .entry(name.to_string())
            .or_insert_with(|| Channel::new(name))
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    // --- membership (kept in sync on both sides here) ---

    /// Add a client to a channel's roster and record the backref.
    pub fn join(&mut self, token: Token, channel_name: &str) {
        if let Some(chan) = self.channels.get_mut(channel_name) {
            chan.add_member(token);
        }
        if let Some(client) = self.clients.get_mut(&token) {
            client.channels.insert(channel_name.to_string());
        }
    }

    /// Remove a client from a channel, destroying it if left empty.
    pub fn part(&mut self, token: Token, channel_name: &str) {
        let now_empty = match self.channels.get_mut(channel_name) {
            Some(chan) => {
                chan.remove_member(token);
                chan.is_empty()
            }
            None => false,
        };
        if now_empty {
            self.channels.remove(channel_name);
            debug!(channel = %channel_name, "destroyed empty channel");
        }
        if let Some(client) = self.clients.get_mut(&token) {
            client.channels.remove(channel_name);
        }
    }

    // --- delivery ---

    /// Best-effort single-client write.
    pub fn send_to(&mut self, token: Token, line: &str) {
        if let Some(client) = self.clients.get_mut(&token) {
            client.send_line(line);
        }
    }

    /// Write `line` to every member of a channel except `exclude`; then,
    /// if `exclude` is itself a member, write to it as well. The second
    /// leg gives PRIVMSG its sender echo (the sender sees its own
    /// message, delivered last).
    pub fn broadcast(&mut self, channel_name: &str, line: &str, exclude: Option<Token>) {
        let members: Vec<Token> = match self.channels.get(channel_name) {
            Some(chan) => chan.members().to_vec(),
            None => return,
        };
        for member in &members {
            if Some(*member) != exclude {
                self.send_to(*member, line);
            }
        }
        if let Some(excluded) = exclude {
            if members.contains(&excluded) {
                self.send_to(excluded, line);
            }
        }
    }
}
