//! MODE command: channel mode changes.
//!
//! The mode string is scanned left to right with a single argument
//! cursor. `+` and `-` set the direction for subsequent letters.
//! Supported letters: `t` (topic-restricted), `i` (invite-only), `k`
//! (key), `l` (user limit), `o` (operator), `v` (voice), `b` (ban mask).

use tracing::info;

use super::{channel_facts, identity, Context};
use crate::error::{HandlerError, HandlerResult};
use crate::state::Channel;
use minirc_proto::{response, Message};

fn with_channel<R>(ctx: &mut Context, name: &str, f: impl FnOnce(&mut Channel) -> R) -> Option<R> {
    ctx.registry.channel_mut(name).map(f)
}

/// Broadcast one applied change as `:nick!user@server MODE <chan> ±x [arg]`.
fn broadcast_change(
    ctx: &mut Context,
    name: &str,
    nick: &str,
    user: &str,
    adding: bool,
    letter: char,
    arg: Option<&str>,
) {
    let sign = if adding { '+' } else { '-' };
    let mut params = vec![name.to_string(), format!("{sign}{letter}")];
    if let Some(arg) = arg {
        params.push(arg.to_string());
    }
    let line = Message::new("MODE", params)
        .with_user_prefix(nick, user, ctx.server())
        .to_string();
    ctx.registry.broadcast(name, &line, None);
}

/// MODE <channel> <modestring> [<arg>...]
pub fn mode(ctx: &mut Context, params: &[String]) -> HandlerResult {
    if params.len() < 2 {
        return Err(HandlerError::NeedMoreParams("MODE".into()));
    }
    let name = &params[0];
    let modestring = &params[1];

    let facts = channel_facts(ctx, name, ctx.token);
    if !facts.exists {
        return Err(HandlerError::NoSuchChannel(name.clone()));
    }
    if !facts.is_member {
        return Err(HandlerError::NotOnChannel(name.clone()));
    }
    if !facts.is_operator {
        return Err(HandlerError::ChanOpPrivsNeeded(name.clone()));
    }

    let (nick, user, _) = identity(ctx);
    let mut adding = true;
    let mut args = params[2..].iter();

    for letter in modestring.chars() {
        match letter {
            '+' => adding = true,
            '-' => adding = false,

            't' => {
                with_channel(ctx, name, |c| c.topic_restricted = adding);
                broadcast_change(ctx, name, &nick, &user, adding, 't', None);
            }
            'i' => {
                with_channel(ctx, name, |c| c.invite_only = adding);
                broadcast_change(ctx, name, &nick, &user, adding, 'i', None);
            }

            'k' => {
                if adding {
                    let Some(key) = args.next() else {
                        return Err(HandlerError::NeedMoreParams("MODE".into()));
                    };
                    with_channel(ctx, name, |c| c.set_key(key));
                    broadcast_change(ctx, name, &nick, &user, true, 'k', Some(key));
                } else {
                    with_channel(ctx, name, |c| c.clear_key());
                    broadcast_change(ctx, name, &nick, &user, false, 'k', None);
                }
            }

            'l' => {
                if adding {
                    let Some(arg) = args.next() else {
                        return Err(HandlerError::NeedMoreParams("MODE".into()));
                    };
                    // A malformed count clears the limit rather than erroring.
                    let limit = arg.parse().unwrap_or(0);
                    with_channel(ctx, name, |c| c.user_limit = limit);
                    broadcast_change(ctx, name, &nick, &user, true, 'l', Some(arg));
                } else {
                    with_channel(ctx, name, |c| c.user_limit = 0);
                    broadcast_change(ctx, name, &nick, &user, false, 'l', None);
                }
            }

            'o' | 'v' => {
                let Some(target_nick) = args.next() else {
                    return Err(HandlerError::NeedMoreParams("MODE".into()));
                };
                let Some(target) = ctx.registry.token_by_nick(target_nick) else {
                    return Err(HandlerError::NoSuchUser(target_nick.clone()));
                };
                let present = ctx
                    .registry
                    .channel(name)
                    .map(|c| c.has_member(target))
                    .unwrap_or(false);
                if !present {
                    return Err(HandlerError::UserNotInChannel {
                        nick: target_nick.clone(),
                        channel: name.clone(),
                    });
                }
                let changed = with_channel(ctx, name, |c| match (letter, adding) {
                    ('o', true) if !c.is_operator(target) => {
                        c.add_operator(target);
                        true
                    }
                    ('o', false) if c.is_operator(target) => {
                        c.remove_operator(target);
                        true
                    }
                    ('v', true) if !c.is_voiced(target) => {
                        c.add_voice(target);
                        true
                    }
                    ('v', false) if c.is_voiced(target) => {
                        c.remove_voice(target);
                        true
                    }
                    _ => false,
                })
                .unwrap_or(false);
                if changed {
                    broadcast_change(ctx, name, &nick, &user, adding, letter, Some(target_nick));
                    info!(nick = %nick, target = %target_nick, channel = %name,
                          mode = %format!("{}{}", if adding { '+' } else { '-' }, letter),
                          "privilege change");
                }
            }

            'b' => {
                let Some(mask) = args.next() else {
                    return Err(HandlerError::NeedMoreParams("MODE".into()));
                };
                with_channel(ctx, name, |c| {
                    if adding {
                        c.add_ban(mask);
                    } else {
                        c.remove_ban(mask);
                    }
                });
                broadcast_change(ctx, name, &nick, &user, adding, 'b', Some(mask));
            }

            unknown => {
                let reply = response::err_unknownmode(ctx.server(), &nick, unknown);
                ctx.reply(&reply);
            }
        }
    }
    Ok(())
}
