//! Integration tests for PRIVMSG delivery.

mod common;

use common::{TestClient, TestServer};

#[test]
fn channel_message_reaches_members_and_echoes_to_sender() {
    let server = TestServer::spawn();
    let mut alice = TestClient::connect(&server.address()).unwrap();
    alice.register("alice").unwrap();
    alice.join("#x").unwrap();
    let mut bob = TestClient::connect(&server.address()).unwrap();
    bob.register("bob").unwrap();
    bob.join("#x").unwrap();
    alice.recv_containing("JOIN #x").unwrap();

    alice.send_raw("PRIVMSG #x :hello there").unwrap();
    assert_eq!(
        bob.recv().unwrap(),
        ":alice!alice@ft_irc PRIVMSG #x :hello there"
    );
    // The sender hears its own message back.
    assert_eq!(
        alice.recv().unwrap(),
        ":alice!alice@ft_irc PRIVMSG #x :hello there"
    );
}

#[test]
fn direct_message_reaches_only_the_target() {
    let server = TestServer::spawn();
    let mut alice = TestClient::connect(&server.address()).unwrap();
    alice.register("alice").unwrap();
    let mut bob = TestClient::connect(&server.address()).unwrap();
    bob.register("bob").unwrap();

    alice.send_raw("PRIVMSG bob :psst").unwrap();
    assert_eq!(bob.recv().unwrap(), ":alice!alice@ft_irc PRIVMSG bob :psst");

    // No echo for direct messages: alice's next line is the probe reply.
    alice.send_raw("NOSUCH").unwrap();
    assert_eq!(
        alice.recv().unwrap(),
        ":ft_irc 421 alice NOSUCH :Unknown command"
    );
}

#[test]
fn message_text_is_preserved_verbatim() {
    let server = TestServer::spawn();
    let mut alice = TestClient::connect(&server.address()).unwrap();
    alice.register("alice").unwrap();
    let mut bob = TestClient::connect(&server.address()).unwrap();
    bob.register("bob").unwrap();

    alice
        .send_raw("PRIVMSG bob :spaces  and : colons :)  ")
        .unwrap();
    assert_eq!(
        bob.recv().unwrap(),
        ":alice!alice@ft_irc PRIVMSG bob :spaces  and : colons :)  "
    );
}

#[test]
fn delivery_errors() {
    let server = TestServer::spawn();
    let mut alice = TestClient::connect(&server.address()).unwrap();
    alice.register("alice").unwrap();

    alice.send_raw("PRIVMSG ghost :anyone?").unwrap();
    assert_eq!(
        alice.recv().unwrap(),
        ":ft_irc 401 alice ghost :No such nick/channel"
    );

    alice.send_raw("PRIVMSG #nowhere :anyone?").unwrap();
    assert_eq!(
        alice.recv().unwrap(),
        ":ft_irc 403 alice #nowhere :No such channel"
    );

    let mut bob = TestClient::connect(&server.address()).unwrap();
    bob.register("bob").unwrap();
    bob.join("#x").unwrap();
    alice.send_raw("PRIVMSG #x :not a member").unwrap();
    assert_eq!(
        alice.recv().unwrap(),
        ":ft_irc 404 alice #x :Cannot send to channel"
    );
}

#[test]
fn privmsg_without_text_is_silently_dropped() {
    let server = TestServer::spawn();
    let mut alice = TestClient::connect(&server.address()).unwrap();
    alice.register("alice").unwrap();

    alice.send_raw("PRIVMSG ghost").unwrap();
    alice.send_raw("NOSUCH").unwrap();
    assert_eq!(
        alice.recv().unwrap(),
        ":ft_irc 421 alice NOSUCH :Unknown command"
    );
}
