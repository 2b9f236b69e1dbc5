//! Server configuration.
//!
//! Everything the handlers and the reactor need to know about the
//! process environment is carried in [`ServerConfig`] and threaded
//! through constructors; there is no global mutable state.

use crate::error::SetupError;

/// Host token used as the source of all server-originated messages.
pub const DEFAULT_SERVER_NAME: &str = "ft_irc";

/// Immutable runtime configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// TCP port to listen on. Port 0 binds an ephemeral port (used by
    /// the test harness).
    pub port: u16,
    /// Connection password checked by PASS.
    pub password: String,
    /// Server host token (`ft_irc` unless overridden).
    pub server_name: String,
}

impl ServerConfig {
    /// Build a config from `<port> <password>` positional arguments.
    pub fn from_args<I>(mut args: I) -> Result<Self, SetupError>
    where
        I: Iterator<Item = String>,
    {
        let (port, password) = match (args.next(), args.next(), args.next()) {
            (Some(port), Some(password), None) => (port, password),
            _ => return Err(SetupError::Usage),
        };
        let port: u16 = port
            .parse()
            .map_err(|_| SetupError::InvalidPort(port.clone()))?;
        if port == 0 {
            return Err(SetupError::InvalidPort(port.to_string()));
        }
        if password.is_empty() {
            return Err(SetupError::EmptyPassword);
        }
        Ok(Self {
            port,
            password,
            server_name: DEFAULT_SERVER_NAME.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn parses_port_and_password() {
        let config = ServerConfig::from_args(args(&["6667", "secret"])).unwrap();
        assert_eq!(config.port, 6667);
        assert_eq!(config.password, "secret");
        assert_eq!(config.server_name, DEFAULT_SERVER_NAME);
    }

    #[test]
    fn rejects_wrong_arity() {
        assert!(matches!(
            ServerConfig::from_args(args(&["6667"])),
            Err(SetupError::Usage)
        ));
        assert!(matches!(
            ServerConfig::from_args(args(&["6667", "secret", "extra"])),
            Err(SetupError::Usage)
        ));
    }

    #[test]
    fn rejects_bad_ports() {
        assert!(matches!(
            ServerConfig::from_args(args(&["0", "secret"])),
            Err(SetupError::InvalidPort(_))
        ));
        assert!(matches!(
            ServerConfig::from_args(args(&["65536", "secret"])),
            Err(SetupError::InvalidPort(_))
        ));
        assert!(matches!(
            ServerConfig::from_args(args(&["irc", "secret"])),
            Err(SetupError::InvalidPort(_))
        ));
    }

    #[test]
    fn rejects_empty_password() {
        assert!(matches!(
            ServerConfig::from_args(args(&["6667", ""])),
            Err(SetupError::EmptyPassword)
        ));
    }
}
