//! IRC command handlers and dispatch.
//!
//! Each line read off a connection is parsed and routed here. Handlers
//! mutate the registry and write replies directly; they run to
//! completion inside the event loop, so they take `&mut Registry`
//! without any locking.

mod channel;
mod connection;
mod messaging;
mod mode;

use mio::Token;
use tracing::debug;

use crate::config::ServerConfig;
use crate::error::{HandlerError, HandlerResult};
use crate::state::Registry;
use minirc_proto::Message;

/// What the event loop should do with the connection after a line.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Keep reading.
    Continue,
    /// Tear the connection down (QUIT); carries the quit reason.
    Disconnect(Option<String>),
}

/// Handler context for one dispatched command.
pub struct Context<'a> {
    pub registry: &'a mut Registry,
    pub config: &'a ServerConfig,
    /// The client the command came from.
    pub token: Token,
}

impl Context<'_> {
    /// The server host token.
    pub fn server(&self) -> &str {
        &self.config.server_name
    }

    /// The issuing client's current nickname (empty before NICK).
    pub fn nick(&self) -> String {
        self.registry.nick_of(self.token)
    }

    /// Write one reply line to the issuing client.
    pub fn reply(&mut self, line: &str) {
        self.registry.send_to(self.token, line);
    }
}

/// Facts about one channel as seen by one client, extracted in a single
/// registry lookup so handlers don't hold channel borrows across writes.
pub(crate) struct ChannelFacts {
    pub exists: bool,
    pub is_member: bool,
    pub is_operator: bool,
}

pub(crate) fn channel_facts(ctx: &Context, name: &str, token: Token) -> ChannelFacts {
    match ctx.registry.channel(name) {
        Some(chan) => ChannelFacts {
            exists: true,
            is_member: chan.has_member(token),
            is_operator: chan.is_operator(token),
        },
        None => ChannelFacts {
            exists: false,
            is_member: false,
            is_operator: false,
        },
    }
}

/// The issuing client's (nick, user, hostname) triple.
pub(crate) fn identity(ctx: &Context) -> (String, String, String) {
    match ctx.registry.client(ctx.token) {
        Some(client) => (
            client.nick.clone(),
            client.user.clone(),
            client.hostname.clone(),
        ),
        None => (String::new(), String::new(), String::new()),
    }
}

/// Parse and execute one protocol line for a client.
///
/// Empty lines are ignored. Handler errors with a client-visible numeric
/// are written back here; QUIT surfaces as [`Outcome::Disconnect`].
pub fn dispatch(
    registry: &mut Registry,
    config: &ServerConfig,
    token: Token,
    line: &str,
) -> Outcome {
    let Some(msg) = Message::parse(line) else {
        return Outcome::Continue;
    };
    debug!(token = token.0, command = %msg.command, params = ?msg.params, "dispatching");

    let mut ctx = Context {
        registry,
        config,
        token,
    };
    match route(&mut ctx, &msg) {
        Ok(()) => Outcome::Continue,
        Err(HandlerError::Quit(reason)) => Outcome::Disconnect(reason),
        Err(err) => {
            let nick = ctx.nick();
            if let Some(reply) = err.to_reply(ctx.server(), &nick) {
                ctx.reply(&reply);
            }
            Outcome::Continue
        }
    }
}

fn route(ctx: &mut Context, msg: &Message) -> HandlerResult {
    let params = &msg.params;
    match msg.command.as_str() {
        // Registration commands carry their own gates.
        "PASS" => connection::pass(ctx, params),
        "NICK" => connection::nick(ctx, params),
        "USER" => connection::user(ctx, params),
        "QUIT" => connection::quit(ctx, params),

        // Everything else requires a fully registered client.
        "JOIN" | "PART" | "NAMES" | "TOPIC" | "INVITE" | "KICK" | "PRIVMSG" | "MODE" => {
            let registered = ctx
                .registry
                .client(ctx.token)
                .map(|c| c.registered)
                .unwrap_or(false);
            if !registered {
                return Err(HandlerError::NotRegistered);
            }
            match msg.command.as_str() {
                "JOIN" => channel::join(ctx, params),
                "PART" => channel::part(ctx, params),
                "NAMES" => channel::names(ctx, params),
                "TOPIC" => channel::topic(ctx, params),
                "INVITE" => channel::invite(ctx, params),
                "KICK" => channel::kick(ctx, params),
                "PRIVMSG" => messaging::privmsg(ctx, params),
                _ => mode::mode(ctx, params),
            }
        }

        other => Err(HandlerError::UnknownCommand(other.to_string())),
    }
}
