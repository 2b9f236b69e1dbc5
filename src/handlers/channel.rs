//! Channel membership commands: JOIN, PART, NAMES, TOPIC, INVITE, KICK.

use chrono::Utc;
use tracing::{debug, info};

use super::{channel_facts, identity, Context};
use crate::error::{HandlerError, HandlerResult};
use crate::state::Topic;
use minirc_proto::{chan::is_valid_channel_name, response, Message};

/// Send the 353/366 NAMES burst for a channel to the issuing client.
/// Operators are listed with an `@` prefix, members in join order.
fn send_names(ctx: &mut Context, channel_name: &str) {
    let nick = ctx.nick();
    let names = match ctx.registry.channel(channel_name) {
        Some(chan) => chan
            .members()
            .iter()
            .map(|t| {
                let member = ctx.registry.nick_of(*t);
                if chan.is_operator(*t) {
                    format!("@{member}")
                } else {
                    member
                }
            })
            .collect::<Vec<_>>()
            .join(" "),
        None => return,
    };
    let namreply = response::rpl_namreply(ctx.server(), &nick, channel_name, &names);
    let endofnames = response::rpl_endofnames(ctx.server(), &nick, channel_name);
    ctx.reply(&namreply);
    ctx.reply(&endofnames);
}

/// JOIN <channel> [<key>]
pub fn join(ctx: &mut Context, params: &[String]) -> HandlerResult {
    let Some(name) = params.first() else {
        return Err(HandlerError::NeedMoreParams("JOIN".into()));
    };
    let supplied_key = params.get(1).map(String::as_str).unwrap_or("");
    if !is_valid_channel_name(name) {
        return Err(HandlerError::NoSuchChannel(name.clone()));
    }

    let (nick, user, host) = identity(ctx);

    if let Some(chan) = ctx.registry.channel(name) {
        if chan.matches_ban(&nick, &host) {
            return Err(HandlerError::BannedFromChan(name.clone()));
        }
        if chan.invite_only && !chan.is_invited(ctx.token) {
            return Err(HandlerError::InviteOnlyChan(name.clone()));
        }
        if chan.has_key() && supplied_key != chan.key() {
            return Err(HandlerError::BadChannelKey(name.clone()));
        }
        if chan.user_limit > 0 && chan.member_count() >= chan.user_limit {
            return Err(HandlerError::ChannelIsFull(name.clone()));
        }
        if chan.has_member(ctx.token) {
            debug!(nick = %nick, channel = %name, "already a member, ignoring JOIN");
            return Ok(());
        }
        ctx.registry.join(ctx.token, name);
        if let Some(chan) = ctx.registry.channel_mut(name) {
            // A pending invite is spent by the join.
            chan.revoke_invite(ctx.token);
        }
    } else {
        info!(nick = %nick, channel = %name, "creating channel");
        let chan = ctx.registry.create_channel(name);
        if !supplied_key.is_empty() {
            chan.set_key(supplied_key);
        }
        ctx.registry.join(ctx.token, name);
        if let Some(chan) = ctx.registry.channel_mut(name) {
            // First joiner is the channel's sole initial operator.
            chan.add_operator(ctx.token);
        }
    }

    let line = Message::new("JOIN", vec![name.clone()])
        .with_user_prefix(&nick, &user, ctx.server())
        .to_string();
    ctx.registry.broadcast(name, &line, None);
    info!(nick = %nick, channel = %name, "joined");

    send_names(ctx, name);
    let topic_reply = ctx
        .registry
        .channel(name)
        .and_then(|c| c.topic.as_ref())
        .map(|t| response::rpl_topic(ctx.server(), &nick, name, &t.text));
    if let Some(reply) = topic_reply {
        ctx.reply(&reply);
    }
    Ok(())
}

/// PART <channel> [:<message>]
pub fn part(ctx: &mut Context, params: &[String]) -> HandlerResult {
    let Some(name) = params.first() else {
        return Err(HandlerError::NeedMoreParams("PART".into()));
    };
    let facts = channel_facts(ctx, name, ctx.token);
    if !facts.exists {
        return Err(HandlerError::NoSuchChannel(name.clone()));
    }
    if !facts.is_member {
        return Err(HandlerError::NotOnChannel(name.clone()));
    }

    let (nick, user, _) = identity(ctx);
    let mut msg = Message::new("PART", vec![name.clone()]);
    if let Some(reason) = params.get(1) {
        msg = msg.with_trailing(reason);
    }
    let line = msg.with_user_prefix(&nick, &user, ctx.server()).to_string();
    ctx.registry.broadcast(name, &line, None);
    ctx.registry.part(ctx.token, name);
    info!(nick = %nick, channel = %name, "parted");
    Ok(())
}

/// NAMES <channel>
pub fn names(ctx: &mut Context, params: &[String]) -> HandlerResult {
    let Some(name) = params.first() else {
        return Err(HandlerError::NeedMoreParams("NAMES".into()));
    };
    if !ctx.registry.has_channel(name) {
        return Err(HandlerError::NoSuchChannel(name.clone()));
    }
    send_names(ctx, name);
    Ok(())
}

/// TOPIC <channel> [:<topic>] — query with one argument, set with two.
pub fn topic(ctx: &mut Context, params: &[String]) -> HandlerResult {
    let Some(name) = params.first() else {
        return Err(HandlerError::NeedMoreParams("TOPIC".into()));
    };
    let (facts, current) = match ctx.registry.channel(name) {
        Some(chan) => (
            channel_facts(ctx, name, ctx.token),
            chan.topic.as_ref().map(|t| t.text.clone()),
        ),
        None => return Err(HandlerError::NoSuchChannel(name.clone())),
    };
    if !facts.is_member {
        return Err(HandlerError::NotOnChannel(name.clone()));
    }

    let nick = ctx.nick();
    let Some(text) = params.get(1) else {
        let reply = match current {
            Some(text) => response::rpl_topic(ctx.server(), &nick, name, &text),
            None => response::rpl_notopic(ctx.server(), &nick, name),
        };
        ctx.reply(&reply);
        return Ok(());
    };

    let restricted = ctx
        .registry
        .channel(name)
        .map(|c| c.topic_restricted)
        .unwrap_or(false);
    if restricted && !facts.is_operator {
        return Err(HandlerError::ChanOpPrivsNeeded(name.clone()));
    }

    let (_, user, _) = identity(ctx);
    if let Some(chan) = ctx.registry.channel_mut(name) {
        chan.topic = Some(Topic {
            text: text.clone(),
            set_by: nick.clone(),
            set_at: Utc::now().timestamp(),
        });
    }
    let line = Message::new("TOPIC", vec![name.clone()])
        .with_trailing(text)
        .with_user_prefix(&nick, &user, ctx.server())
        .to_string();
    ctx.registry.broadcast(name, &line, None);
    info!(nick = %nick, channel = %name, "topic changed");
    Ok(())
}

/// INVITE <nickname> <channel>
pub fn invite(ctx: &mut Context, params: &[String]) -> HandlerResult {
    if params.len() < 2 {
        return Err(HandlerError::NeedMoreParams("INVITE".into()));
    }
    let target_nick = &params[0];
    let name = &params[1];

    let Some(target) = ctx.registry.token_by_nick(target_nick) else {
        return Err(HandlerError::NoSuchUser(target_nick.clone()));
    };
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

    if let Some(chan) = ctx.registry.channel_mut(name) {
        chan.invite(target);
    }
    let (nick, user, _) = identity(ctx);
    let line = Message::new("INVITE", vec![target_nick.clone(), name.clone()])
        .with_user_prefix(&nick, &user, ctx.server())
        .to_string();
    ctx.registry.send_to(target, &line);
    let confirmation = response::rpl_inviting(ctx.server(), &nick, target_nick, name);
    ctx.reply(&confirmation);
    info!(nick = %nick, target = %target_nick, channel = %name, "invited");
    Ok(())
}

/// KICK <channel> <nickname> [:<reason>]
pub fn kick(ctx: &mut Context, params: &[String]) -> HandlerResult {
    if params.len() < 2 {
        return Err(HandlerError::NeedMoreParams("KICK".into()));
    }
    let name = &params[0];
    let target_nick = &params[1];

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
    let Some(target) = ctx.registry.token_by_nick(target_nick) else {
        return Err(HandlerError::NoSuchNick(target_nick.clone()));
    };
    let target_present = ctx
        .registry
        .channel(name)
        .map(|c| c.has_member(target))
        .unwrap_or(false);
    if !target_present {
        return Err(HandlerError::UserNotInChannel {
            nick: target_nick.clone(),
            channel: name.clone(),
        });
    }

    let (nick, user, _) = identity(ctx);
    let reason = params.get(2).cloned().unwrap_or_else(|| nick.clone());
    let line = Message::new("KICK", vec![name.clone(), target_nick.clone()])
        .with_trailing(&reason)
        .with_user_prefix(&nick, &user, ctx.server())
        .to_string();
    // The victim hears the kick too, then leaves the roster.
    ctx.registry.broadcast(name, &line, None);
    ctx.registry.part(target, name);
    info!(nick = %nick, target = %target_nick, channel = %name, "kicked");
    Ok(())
}
