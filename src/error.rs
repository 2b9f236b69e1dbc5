//! Unified error handling for minircd.
//!
//! [`HandlerError`] covers per-command failures; each variant that has a
//! client-visible numeric maps to it through [`HandlerError::to_reply`].
//! [`SetupError`] covers startup faults that exit the process.

use minirc_proto::response;
use std::io;
use thiserror::Error;

/// Errors that can occur during command handling.
///
/// These never tear down the connection except [`HandlerError::Quit`],
/// which carries no reply and signals the reactor to disconnect.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HandlerError {
    #[error("not enough parameters for {0}")]
    NeedMoreParams(String),

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("not registered")]
    NotRegistered,

    #[error("already registered")]
    AlreadyRegistred,

    #[error("may not reregister")]
    MayNotReregister,

    #[error("password incorrect")]
    PasswdMismatch,

    #[error("no nickname given")]
    NoNicknameGiven,

    #[error("erroneous nickname: {0}")]
    ErroneusNickname(String),

    #[error("nickname in use: {0}")]
    NicknameInUse(String),

    #[error("no such nick: {0}")]
    NoSuchNick(String),

    /// Same numeric as [`HandlerError::NoSuchNick`], but the reply text
    /// omits the `/channel` suffix; sent where the argument can only
    /// name a user (INVITE and MODE membership targets).
    #[error("no such user: {0}")]
    NoSuchUser(String),

    #[error("no such channel: {0}")]
    NoSuchChannel(String),

    #[error("cannot send to channel {0}")]
    CannotSendToChan(String),

    #[error("not on channel {0}")]
    NotOnChannel(String),

    #[error("{nick} is not on channel {channel}")]
    UserNotInChannel { nick: String, channel: String },

    #[error("channel operator privileges needed on {0}")]
    ChanOpPrivsNeeded(String),

    #[error("banned from {0}")]
    BannedFromChan(String),

    #[error("{0} is invite only")]
    InviteOnlyChan(String),

    #[error("bad key for {0}")]
    BadChannelKey(String),

    #[error("{0} is full")]
    ChannelIsFull(String),

    /// Client asked to disconnect (error carries the quit reason).
    #[error("client quit: {0:?}")]
    Quit(Option<String>),
}

impl HandlerError {
    /// Render the numeric reply for this error, if it has one.
    ///
    /// `nick` is the recipient's current nickname (empty before one is
    /// set). [`HandlerError::Quit`] yields `None`.
    pub fn to_reply(&self, server: &str, nick: &str) -> Option<String> {
        let line = match self {
            Self::NeedMoreParams(cmd) => response::err_needmoreparams(server, nick, cmd),
            Self::UnknownCommand(cmd) => response::err_unknowncommand(server, nick, cmd),
            Self::NotRegistered => response::err_notregistered(server, nick),
            Self::AlreadyRegistred => response::err_alreadyregistred(server, nick),
            Self::MayNotReregister => response::err_maynotreregister(server, nick),
            Self::PasswdMismatch => response::err_passwdmismatch(server, nick),
            Self::NoNicknameGiven => response::err_nonicknamegiven(server, nick),
            Self::ErroneusNickname(bad) => response::err_erroneusnickname(server, nick, bad),
            Self::NicknameInUse(taken) => response::err_nicknameinuse(server, nick, taken),
            Self::NoSuchNick(target) => response::err_nosuchnick(server, nick, target),
            Self::NoSuchUser(target) => response::err_nosuchnick_user(server, nick, target),
            Self::NoSuchChannel(chan) => response::err_nosuchchannel(server, nick, chan),
            Self::CannotSendToChan(chan) => response::err_cannotsendtochan(server, nick, chan),
            Self::NotOnChannel(chan) => response::err_notonchannel(server, nick, chan),
            Self::UserNotInChannel { nick: target, channel } => {
                response::err_usernotinchannel(server, nick, target, channel)
            }
            Self::ChanOpPrivsNeeded(chan) => response::err_chanoprivsneeded(server, nick, chan),
            Self::BannedFromChan(chan) => response::err_bannedfromchan(server, nick, chan),
            Self::InviteOnlyChan(chan) => response::err_inviteonlychan(server, nick, chan),
            Self::BadChannelKey(chan) => response::err_badchannelkey(server, nick, chan),
            Self::ChannelIsFull(chan) => response::err_channelisfull(server, nick, chan),
            Self::Quit(_) => return None,
        };
        Some(line)
    }
}

/// Result type for command handlers.
pub type HandlerResult = Result<(), HandlerError>;

/// Startup faults: bad invocation or socket setup failure.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("usage: minircd <port> <password>")]
    Usage,

    #[error("invalid port: {0} (expected 1-65535)")]
    InvalidPort(String),

    #[error("password must not be empty")]
    EmptyPassword,

    #[error("socket setup failed: {0}")]
    Io(#[from] io::Error),
}
