//! PRIVMSG delivery to channels and nicks.

use tracing::debug;

use super::{identity, Context};
use crate::error::{HandlerError, HandlerResult};
use minirc_proto::Message;

/// PRIVMSG <target> :<text>
///
/// A target starting with `#` or `&` is a channel; the sender must be a
/// member and receives its own message back through the broadcast echo.
/// Any other target is a nickname and is delivered directly.
pub fn privmsg(ctx: &mut Context, params: &[String]) -> HandlerResult {
    let Some(target) = params.first() else {
        return Err(HandlerError::NeedMoreParams("PRIVMSG".into()));
    };
    let Some(text) = params.get(1) else {
        // No text given: dropped without a reply.
        debug!(token = ctx.token.0, target = %target, "PRIVMSG without text ignored");
        return Ok(());
    };

    let (nick, user, _) = identity(ctx);
    let line = Message::new("PRIVMSG", vec![target.clone()])
        .with_trailing(text)
        .with_user_prefix(&nick, &user, ctx.server())
        .to_string();

    if target.starts_with('#') || target.starts_with('&') {
        let is_member = match ctx.registry.channel(target) {
            Some(chan) => chan.has_member(ctx.token),
            None => return Err(HandlerError::NoSuchChannel(target.clone())),
        };
        if !is_member {
            return Err(HandlerError::CannotSendToChan(target.clone()));
        }
        ctx.registry.broadcast(target, &line, Some(ctx.token));
    } else {
        let Some(dest) = ctx.registry.token_by_nick(target) else {
            return Err(HandlerError::NoSuchNick(target.clone()));
        };
        ctx.registry.send_to(dest, &line);
    }
    Ok(())
}
