//! # minirc-proto
//!
//! Wire-protocol primitives for a minimal IRC server:
//!
//! - Line framing over a raw TCP byte stream ([`RecvBuffer`])
//! - Message parsing and serialization ([`Message`])
//! - Numeric replies ([`Response`] and the constructors in [`response`])
//! - Nickname and channel-name validation ([`nick`], [`chan`])
//!
//! The crate is transport-agnostic: it never touches a socket. Bytes go in,
//! lines and formatted reply strings come out.

#![deny(clippy::all)]

pub mod chan;
pub mod line;
pub mod message;
pub mod nick;
pub mod response;

pub use line::{Overflow, RecvBuffer};
pub use message::Message;
pub use response::Response;
