//! IRC numeric replies.
//!
//! Numeric replies have the form `:<server> NNN <target> <text>` where
//! `NNN` is the three-digit code (zero-padded) and `<target>` is the
//! recipient's nickname, or `*` before one is set. The constructors here
//! carry the canonical reply texts so handler code never assembles them
//! by hand.

#![allow(non_camel_case_types)]

/// Numeric reply codes emitted by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum Response {
    /// 001 - Welcome to the network
    RPL_WELCOME = 1,
    /// 331 - No topic is set
    RPL_NOTOPIC = 331,
    /// 332 - Channel topic
    RPL_TOPIC = 332,
    /// 341 - Invite confirmation to the inviter
    RPL_INVITING = 341,
    /// 353 - NAMES list
    RPL_NAMREPLY = 353,
    /// 366 - End of NAMES list
    RPL_ENDOFNAMES = 366,
    /// 401 - No such nick/channel
    ERR_NOSUCHNICK = 401,
    /// 403 - No such channel
    ERR_NOSUCHCHANNEL = 403,
    /// 404 - Cannot send to channel
    ERR_CANNOTSENDTOCHAN = 404,
    /// 421 - Unknown command
    ERR_UNKNOWNCOMMAND = 421,
    /// 431 - No nickname given
    ERR_NONICKNAMEGIVEN = 431,
    /// 432 - Erroneous nickname
    ERR_ERRONEUSNICKNAME = 432,
    /// 433 - Nickname is already in use
    ERR_NICKNAMEINUSE = 433,
    /// 441 - They aren't on that channel
    ERR_USERNOTINCHANNEL = 441,
    /// 442 - You're not on that channel
    ERR_NOTONCHANNEL = 442,
    /// 451 - You have not registered
    ERR_NOTREGISTERED = 451,
    /// 461 - Not enough parameters
    ERR_NEEDMOREPARAMS = 461,
    /// 462 - Already registered
    ERR_ALREADYREGISTRED = 462,
    /// 464 - Password incorrect
    ERR_PASSWDMISMATCH = 464,
    /// 471 - Channel is full (+l)
    ERR_CHANNELISFULL = 471,
    /// 472 - Unknown mode character
    ERR_UNKNOWNMODE = 472,
    /// 473 - Invite-only channel (+i)
    ERR_INVITEONLYCHAN = 473,
    /// 474 - Banned from channel (+b)
    ERR_BANNEDFROMCHAN = 474,
    /// 475 - Bad channel key (+k)
    ERR_BADCHANNELKEY = 475,
    /// 482 - Channel operator privileges needed
    ERR_CHANOPRIVSNEEDED = 482,
}

impl Response {
    /// The numeric code as a u16.
    #[inline]
    pub fn code(&self) -> u16 {
        *self as u16
    }
}

/// Format a numeric reply line (without terminator).
///
/// `target` is the recipient's nickname; pass an empty string before one
/// is set and `*` is substituted.
pub fn numeric(server: &str, response: Response, target: &str, tail: &str) -> String {
    let target = if target.is_empty() { "*" } else { target };
    format!(":{server} {:03} {target} {tail}", response.code())
}

/// 001 `:Welcome to the Internet Relay Network <nick>!<user>@<server>`
pub fn rpl_welcome(server: &str, nick: &str, user: &str) -> String {
    numeric(
        server,
        Response::RPL_WELCOME,
        nick,
        &format!(":Welcome to the Internet Relay Network {nick}!{user}@{server}"),
    )
}

/// 331 `<channel> :No topic is set`
pub fn rpl_notopic(server: &str, nick: &str, channel: &str) -> String {
    numeric(
        server,
        Response::RPL_NOTOPIC,
        nick,
        &format!("{channel} :No topic is set"),
    )
}

/// 332 `<channel> :<topic>`
pub fn rpl_topic(server: &str, nick: &str, channel: &str, topic: &str) -> String {
    numeric(
        server,
        Response::RPL_TOPIC,
        nick,
        &format!("{channel} :{topic}"),
    )
}

/// 341 `<target> <channel>`
pub fn rpl_inviting(server: &str, nick: &str, target: &str, channel: &str) -> String {
    numeric(
        server,
        Response::RPL_INVITING,
        nick,
        &format!("{target} {channel}"),
    )
}

/// 353 `= <channel> :<names>`
pub fn rpl_namreply(server: &str, nick: &str, channel: &str, names: &str) -> String {
    numeric(
        server,
        Response::RPL_NAMREPLY,
        nick,
        &format!("= {channel} :{names}"),
    )
}

/// 366 `<channel> :End of NAMES list`
pub fn rpl_endofnames(server: &str, nick: &str, channel: &str) -> String {
    numeric(
        server,
        Response::RPL_ENDOFNAMES,
        nick,
        &format!("{channel} :End of NAMES list"),
    )
}

/// 401 `<target> :No such nick/channel`
pub fn err_nosuchnick(server: &str, nick: &str, target: &str) -> String {
    numeric(
        server,
        Response::ERR_NOSUCHNICK,
        nick,
        &format!("{target} :No such nick/channel"),
    )
}

/// 401 `<target> :No such nick` — the variant without the `/channel`
/// suffix, sent where the argument can only name a user (INVITE and
/// MODE membership targets).
pub fn err_nosuchnick_user(server: &str, nick: &str, target: &str) -> String {
    numeric(
        server,
        Response::ERR_NOSUCHNICK,
        nick,
        &format!("{target} :No such nick"),
    )
}

/// 403 `<channel> :No such channel`
pub fn err_nosuchchannel(server: &str, nick: &str, channel: &str) -> String {
    numeric(
        server,
        Response::ERR_NOSUCHCHANNEL,
        nick,
        &format!("{channel} :No such channel"),
    )
}

/// 404 `<channel> :Cannot send to channel`
pub fn err_cannotsendtochan(server: &str, nick: &str, channel: &str) -> String {
    numeric(
        server,
        Response::ERR_CANNOTSENDTOCHAN,
        nick,
        &format!("{channel} :Cannot send to channel"),
    )
}

/// 421 `<command> :Unknown command`
pub fn err_unknowncommand(server: &str, nick: &str, command: &str) -> String {
    numeric(
        server,
        Response::ERR_UNKNOWNCOMMAND,
        nick,
        &format!("{command} :Unknown command"),
    )
}

/// 431 `:No nickname given`
pub fn err_nonicknamegiven(server: &str, nick: &str) -> String {
    numeric(
        server,
        Response::ERR_NONICKNAMEGIVEN,
        nick,
        ":No nickname given",
    )
}

/// 432 `<bad-nick> :Erroneous nickname`
pub fn err_erroneusnickname(server: &str, nick: &str, bad_nick: &str) -> String {
    numeric(
        server,
        Response::ERR_ERRONEUSNICKNAME,
        nick,
        &format!("{bad_nick} :Erroneous nickname"),
    )
}

/// 433 `<taken-nick> :Nickname is already in use`
pub fn err_nicknameinuse(server: &str, nick: &str, taken: &str) -> String {
    numeric(
        server,
        Response::ERR_NICKNAMEINUSE,
        nick,
        &format!("{taken} :Nickname is already in use"),
    )
}

/// 441 `<target> <channel> :They aren't on that channel`
pub fn err_usernotinchannel(server: &str, nick: &str, target: &str, channel: &str) -> String {
    numeric(
        server,
        Response::ERR_USERNOTINCHANNEL,
        nick,
        &format!("{target} {channel} :They aren't on that channel"),
    )
}

/// 442 `<channel> :You're not on that channel`
pub fn err_notonchannel(server: &str, nick: &str, channel: &str) -> String {
    numeric(
        server,
        Response::ERR_NOTONCHANNEL,
        nick,
        &format!("{channel} :You're not on that channel"),
    )
}

/// 451 `:You have not registered`
pub fn err_notregistered(server: &str, nick: &str) -> String {
    numeric(
        server,
        Response::ERR_NOTREGISTERED,
        nick,
        ":You have not registered",
    )
}

/// 461 `<command> :Not enough parameters`
pub fn err_needmoreparams(server: &str, nick: &str, command: &str) -> String {
    numeric(
        server,
        Response::ERR_NEEDMOREPARAMS,
        nick,
        &format!("{command} :Not enough parameters"),
    )
}

/// 462 `:You are already registered`
pub fn err_alreadyregistred(server: &str, nick: &str) -> String {
    numeric(
        server,
        Response::ERR_ALREADYREGISTRED,
        nick,
        ":You are already registered",
    )
}

/// 462 `:You may not reregister`
pub fn err_maynotreregister(server: &str, nick: &str) -> String {
    numeric(
        server,
        Response::ERR_ALREADYREGISTRED,
        nick,
        ":You may not reregister",
    )
}

/// 464 `:Password incorrect`
pub fn err_passwdmismatch(server: &str, nick: &str) -> String {
    numeric(
        server,
        Response::ERR_PASSWDMISMATCH,
        nick,
        ":Password incorrect",
    )
}

/// 471 `<channel> :Cannot join channel (+l) - channel is full`
pub fn err_channelisfull(server: &str, nick: &str, channel: &str) -> String {
    numeric(
        server,
        Response::ERR_CHANNELISFULL,
        nick,
        &format!("{channel} :Cannot join channel (+l) - channel is full"),
    )
}

/// 472 `<char> :is unknown mode char to me`
pub fn err_unknownmode(server: &str, nick: &str, mode: char) -> String {
    numeric(
        server,
        Response::ERR_UNKNOWNMODE,
        nick,
        &format!("{mode} :is unknown mode char to me"),
    )
}

/// 473 `<channel> :Cannot join channel (+i) - invite only`
pub fn err_inviteonlychan(server: &str, nick: &str, channel: &str) -> String {
    numeric(
        server,
        Response::ERR_INVITEONLYCHAN,
        nick,
        &format!("{channel} :Cannot join channel (+i) - invite only"),
    )
}

/// 474 `<channel> :Cannot join channel (+b) - you are banned`
pub fn err_bannedfromchan(server: &str, nick: &str, channel: &str) -> String {
    numeric(
        server,
        Response::ERR_BANNEDFROMCHAN,
        nick,
        &format!("{channel} :Cannot join channel (+b) - you are banned"),
    )
}

/// 475 `<channel> :Cannot join channel (+k) - wrong channel key`
pub fn err_badchannelkey(server: &str, nick: &str, channel: &str) -> String {
    numeric(
        server,
        Response::ERR_BADCHANNELKEY,
        nick,
        &format!("{channel} :Cannot join channel (+k) - wrong channel key"),
    )
}

/// 482 `<channel> :You're not channel operator`
pub fn err_chanoprivsneeded(server: &str, nick: &str, channel: &str) -> String {
    numeric(
        server,
        Response::ERR_CHANOPRIVSNEEDED,
        nick,
        &format!("{channel} :You're not channel operator"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_zero_padded() {
        let line = rpl_welcome("ft_irc", "alice", "a");
        assert!(line.starts_with(":ft_irc 001 alice :Welcome"));
    }

    #[test]
    fn unset_nick_targets_star() {
        assert_eq!(
            err_passwdmismatch("ft_irc", ""),
            ":ft_irc 464 * :Password incorrect"
        );
        assert_eq!(
            err_notregistered("ft_irc", ""),
            ":ft_irc 451 * :You have not registered"
        );
    }

    #[test]
    fn welcome_text_names_the_full_mask() {
        assert_eq!(
            rpl_welcome("ft_irc", "alice", "a"),
            ":ft_irc 001 alice :Welcome to the Internet Relay Network alice!a@ft_irc"
        );
    }

    #[test]
    fn names_reply_shape() {
        assert_eq!(
            rpl_namreply("ft_irc", "alice", "#x", "@alice"),
            ":ft_irc 353 alice = #x :@alice"
        );
        assert_eq!(
            rpl_endofnames("ft_irc", "alice", "#x"),
            ":ft_irc 366 alice #x :End of NAMES list"
        );
    }

    #[test]
    fn nosuchnick_texts_differ_by_context() {
        assert_eq!(
            err_nosuchnick("ft_irc", "alice", "ghost"),
            ":ft_irc 401 alice ghost :No such nick/channel"
        );
        assert_eq!(
            err_nosuchnick_user("ft_irc", "alice", "ghost"),
            ":ft_irc 401 alice ghost :No such nick"
        );
    }

    #[test]
    fn inviting_reply_shape() {
        assert_eq!(
            rpl_inviting("ft_irc", "alice", "carol", "#x"),
            ":ft_irc 341 alice carol #x"
        );
    }
}
