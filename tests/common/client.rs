//! Test IRC client.
//!
//! A blocking client that sends raw command lines and reads server
//! replies line by line, with a read timeout so a missing reply fails
//! the test instead of hanging it.

#![allow(dead_code)]

use std::io::{BufRead, BufReader, Write};
use std::net::TcpStream;
use std::time::Duration;

/// A test IRC client.
pub struct TestClient {
    stream: TcpStream,
    reader: BufReader<TcpStream>,
}

impl TestClient {
    /// Connect to a test server.
    pub fn connect(address: &str) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(address)?;
        stream.set_read_timeout(Some(Duration::from_secs(5)))?;
        stream.set_nodelay(true)?;
        let reader = BufReader::new(stream.try_clone()?);
        Ok(Self { stream, reader })
    }

    /// Send a raw IRC line; the terminator is appended if missing.
    pub fn send_raw(&mut self, line: &str) -> anyhow::Result<()> {
        self.stream.write_all(line.as_bytes())?;
        if !line.ends_with("\r\n") {
            self.stream.write_all(b"\r\n")?;
        }
        Ok(())
    }

    /// Send raw bytes without any framing help.
    pub fn send_bytes(&mut self, bytes: &[u8]) -> anyhow::Result<()> {
        self.stream.write_all(bytes)?;
        Ok(())
    }

    /// Receive a single line from the server, terminator stripped.
    pub fn recv(&mut self) -> anyhow::Result<String> {
        let mut line = String::new();
        let n = self.reader.read_line(&mut line)?;
        if n == 0 {
            anyhow::bail!("connection closed by server");
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Receive lines until the predicate matches; returns all of them,
    /// the matching line last.
    pub fn recv_until<F>(&mut self, mut predicate: F) -> anyhow::Result<Vec<String>>
    where
        F: FnMut(&str) -> bool,
    {
        let mut lines = Vec::new();
        loop {
            let line = self.recv()?;
            let done = predicate(&line);
            lines.push(line);
            if done {
                return Ok(lines);
            }
        }
    }

    /// Receive until a line containing `needle` arrives and return it.
    pub fn recv_containing(&mut self, needle: &str) -> anyhow::Result<String> {
        let mut lines = self.recv_until(|l| l.contains(needle))?;
        Ok(lines.pop().expect("recv_until returns at least one line"))
    }

    /// Authenticate and register, using the nick as the username, and
    /// wait for the 001 welcome.
    pub fn register(&mut self, nick: &str) -> anyhow::Result<()> {
        self.send_raw(&format!("PASS {}", super::PASSWORD))?;
        self.send_raw(&format!("NICK {nick}"))?;
        self.send_raw(&format!("USER {nick} 0 * :Test User {nick}"))?;
        self.recv_containing(" 001 ")?;
        Ok(())
    }

    /// Join a channel and drain the burst through 366. A channel with a
    /// topic sends 332 after the NAMES burst; that line is left for the
    /// caller.
    pub fn join(&mut self, channel: &str) -> anyhow::Result<()> {
        self.send_raw(&format!("JOIN {channel}"))?;
        self.recv_containing(" 366 ")?;
        Ok(())
    }
}
