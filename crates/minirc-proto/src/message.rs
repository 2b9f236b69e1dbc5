//! IRC message parsing and serialization.
//!
//! A client line is a command name followed by parameters. The final
//! parameter may be introduced by `" :"` (space then colon), in which case
//! it runs to the end of the line and may contain spaces — the *trailing*
//! parameter. Everything before it is split on runs of ASCII whitespace.

use std::fmt;

/// A parsed client command or an outgoing server-originated message.
///
/// `command` is always upper-cased on parse so dispatch can match it
/// directly. `trailing` records whether the last parameter was (or must
/// be) written in `" :"` form; parsing captures it so that a reserialized
/// message reproduces the trailing parameter byte-for-byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Source prefix, without the leading `:` (e.g. `nick!user@host`).
    /// Never produced by parsing; set on outgoing messages only.
    pub prefix: Option<String>,
    /// Upper-cased command name.
    pub command: String,
    /// Parameters in order, trailing parameter last.
    pub params: Vec<String>,
    /// Whether the last parameter is written as a trailing parameter.
    pub trailing: bool,
}

impl Message {
    /// Build an outgoing message with plain parameters.
    pub fn new(command: &str, params: Vec<String>) -> Self {
        Self {
            prefix: None,
            command: command.to_string(),
            params,
            trailing: false,
        }
    }

    /// Append a trailing parameter (always serialized in `" :"` form).
    pub fn with_trailing(mut self, trailing: &str) -> Self {
        self.params.push(trailing.to_string());
        self.trailing = true;
        self
    }

    /// Attach a `nick!user@host` source prefix.
    pub fn with_user_prefix(mut self, nick: &str, user: &str, host: &str) -> Self {
        self.prefix = Some(format!("{nick}!{user}@{host}"));
        self
    }

    /// Parse one protocol line into a message.
    ///
    /// Returns `None` for an empty line (or one that reduces to nothing
    /// after terminator stripping); the caller ignores those. The command
    /// name is upper-cased. An empty trailing parameter (`" :"` at end of
    /// line) is dropped.
    pub fn parse(line: &str) -> Option<Self> {
        // Strip residual terminator bytes defensively; framing normally
        // removes them before we get here.
        let cleaned: String = line.chars().filter(|c| *c != '\r' && *c != '\n').collect();
        if cleaned.is_empty() {
            return None;
        }

        let mut tokens: Vec<String>;
        let mut trailing = false;
        if let Some(pos) = cleaned.find(" :") {
            tokens = cleaned[..pos]
                .split_ascii_whitespace()
                .map(str::to_string)
                .collect();
            let rest = &cleaned[pos + 2..];
            if !rest.is_empty() {
                tokens.push(rest.to_string());
                trailing = true;
            }
        } else {
            tokens = cleaned
                .split_ascii_whitespace()
                .map(str::to_string)
                .collect();
        }

        if tokens.is_empty() {
            return None;
        }
        let command = tokens.remove(0).to_ascii_uppercase();
        Some(Self {
            prefix: None,
            command,
            params: tokens,
            trailing,
        })
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(prefix) = &self.prefix {
            write!(f, ":{prefix} ")?;
        }
        write!(f, "{}", self.command)?;
        let last = self.params.len().saturating_sub(1);
        for (i, param) in self.params.iter().enumerate() {
            let needs_colon = i == last
                && (self.trailing
                    || param.is_empty()
                    || param.starts_with(':')
                    || param.contains(' '));
            if needs_colon {
                write!(f, " :{param}")?;
            } else {
                write!(f, " {param}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_is_upper_cased() {
        let msg = Message::parse("privmsg #x :hi").unwrap();
        assert_eq!(msg.command, "PRIVMSG");
    }

    #[test]
    fn splits_on_whitespace_runs() {
        let msg = Message::parse("MODE   #x    +o   alice").unwrap();
        assert_eq!(msg.params, ["#x", "+o", "alice"]);
    }

    #[test]
    fn trailing_keeps_spaces_verbatim() {
        let msg = Message::parse("USER a 0 * :Alice  A ").unwrap();
        assert_eq!(msg.command, "USER");
        assert_eq!(msg.params, ["a", "0", "*", "Alice  A "]);
    }

    #[test]
    fn trailing_may_contain_colons() {
        let msg = Message::parse("PRIVMSG #x ::-) see :you").unwrap();
        assert_eq!(msg.params, ["#x", ":-) see :you"]);
    }

    #[test]
    fn empty_trailing_is_dropped() {
        let msg = Message::parse("PRIVMSG #x :").unwrap();
        assert_eq!(msg.params, ["#x"]);
    }

    #[test]
    fn empty_line_parses_to_none() {
        assert_eq!(Message::parse(""), None);
        assert_eq!(Message::parse("\r\n"), None);
        assert_eq!(Message::parse("   "), None);
    }

    #[test]
    fn residual_terminators_are_stripped() {
        let msg = Message::parse("QUIT :bye\r\n").unwrap();
        assert_eq!(msg.command, "QUIT");
        assert_eq!(msg.params, ["bye"]);
    }

    // Parse → serialize preserves a trailing parameter byte-for-byte.
    #[test]
    fn trailing_round_trip() {
        for line in [
            "PRIVMSG #x :hello  world ",
            "TOPIC #x :a : b : c",
            "KICK #x bob :no reason at all",
        ] {
            let msg = Message::parse(line).unwrap();
            assert_eq!(msg.to_string(), line);
        }
    }

    #[test]
    fn serialize_with_user_prefix() {
        let msg = Message::new("JOIN", vec!["#x".into()]).with_user_prefix("alice", "a", "ft_irc");
        assert_eq!(msg.to_string(), ":alice!a@ft_irc JOIN #x");
    }

    #[test]
    fn forced_trailing_without_spaces() {
        let msg = Message::new("PRIVMSG", vec!["#x".into()]).with_trailing("hi");
        assert_eq!(msg.to_string(), "PRIVMSG #x :hi");
    }
}
