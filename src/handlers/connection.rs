//! Connection and registration commands: PASS, NICK, USER, QUIT.

use tracing::{debug, info};

use super::Context;
use crate::error::{HandlerError, HandlerResult};
use minirc_proto::{nick::is_valid_nick, response, Message};

/// PASS <password> — authenticate against the server password.
pub fn pass(ctx: &mut Context, params: &[String]) -> HandlerResult {
    let Some(client) = ctx.registry.client(ctx.token) else {
        return Ok(());
    };
    if client.authenticated {
        return Err(HandlerError::AlreadyRegistred);
    }
    let Some(password) = params.first() else {
        return Err(HandlerError::NeedMoreParams("PASS".into()));
    };
    if *password != ctx.config.password {
        debug!(token = ctx.token.0, "password rejected");
        return Err(HandlerError::PasswdMismatch);
    }
    if let Some(client) = ctx.registry.client_mut(ctx.token) {
        client.authenticated = true;
    }
    debug!(token = ctx.token.0, "password accepted");
    Ok(())
}

/// NICK <nickname> — set or change the nickname.
pub fn nick(ctx: &mut Context, params: &[String]) -> HandlerResult {
    let authenticated = ctx
        .registry
        .client(ctx.token)
        .map(|c| c.authenticated)
        .unwrap_or(false);
    if !authenticated {
        return Err(HandlerError::NotRegistered);
    }
    let Some(nickname) = params.first() else {
        return Err(HandlerError::NoNicknameGiven);
    };
    if !is_valid_nick(nickname) {
        return Err(HandlerError::ErroneusNickname(nickname.clone()));
    }
    if ctx.registry.token_by_nick(nickname).is_some() {
        return Err(HandlerError::NicknameInUse(nickname.clone()));
    }

    let server = ctx.config.server_name.clone();
    let Some(client) = ctx.registry.client_mut(ctx.token) else {
        return Ok(());
    };
    client.nick = nickname.clone();
    info!(token = ctx.token.0, nick = %nickname, "nickname set");
    if client.try_complete_registration() {
        let welcome = response::rpl_welcome(&server, &client.nick, &client.user);
        client.send_line(&welcome);
        info!(nick = %client.nick, "client registered");
    }
    Ok(())
}

/// USER <user> <mode> <unused> <realname> — set user identity.
pub fn user(ctx: &mut Context, params: &[String]) -> HandlerResult {
    let server = ctx.config.server_name.clone();
    let Some(client) = ctx.registry.client_mut(ctx.token) else {
        return Ok(());
    };
    if !client.authenticated {
        return Err(HandlerError::NotRegistered);
    }
    if client.registered {
        return Err(HandlerError::MayNotReregister);
    }
    if params.len() < 4 {
        return Err(HandlerError::NeedMoreParams("USER".into()));
    }
    // The mode and unused fields are accepted and ignored.
    client.user = params[0].clone();
    client.realname = params[3].clone();
    debug!(token = ctx.token.0, user = %client.user, "user identity set");
    if client.try_complete_registration() {
        let welcome = response::rpl_welcome(&server, &client.nick, &client.user);
        client.send_line(&welcome);
        info!(nick = %client.nick, "client registered");
    }
    Ok(())
}

/// QUIT [:<reason>] — announce to every joined channel, then disconnect.
pub fn quit(ctx: &mut Context, params: &[String]) -> HandlerResult {
    let reason = params
        .first()
        .cloned()
        .unwrap_or_else(|| "Client Quit".to_string());

    let Some(client) = ctx.registry.client(ctx.token) else {
        return Err(HandlerError::Quit(None));
    };
    let channels: Vec<String> = client.channels.iter().cloned().collect();
    let line = Message::new("QUIT", Vec::new())
        .with_trailing(&reason)
        .with_user_prefix(&client.nick, &client.user, ctx.server())
        .to_string();
    info!(token = ctx.token.0, nick = %client.nick, reason = %reason, "client quit");

    for name in channels {
        ctx.registry.broadcast(&name, &line, None);
    }
    // The event loop removes the client; membership purge and empty
    // channel collection happen there via detach.
    Err(HandlerError::Quit(Some(reason)))
}
