//! Channel state: roster, privileges, modes, topic.

use mio::Token;

/// Channel topic with metadata.
#[derive(Debug, Clone)]
pub struct Topic {
    pub text: String,
    pub set_by: String,
    pub set_at: i64,
}

/// One channel.
///
/// Member, operator, voiced, and invited lists are insertion-ordered
/// with set-like uniqueness on insert; lookups are linear, which is fine
/// at IRC fan-in scale. The registry owns every `Channel`; clients refer
/// to it by name only.
#[derive(Debug)]
pub struct Channel {
    pub name: String,
    pub topic: Option<Topic>,
    key: String,
    members: Vec<Token>,
    operators: Vec<Token>,
    voiced: Vec<Token>,
    invited: Vec<Token>,
    bans: Vec<String>,
    pub invite_only: bool,
    pub topic_restricted: bool,
    /// 0 means unlimited.
    pub user_limit: usize,
}

fn insert_unique(list: &mut Vec<Token>, token: Token) {
    if !list.contains(&token) {
        list.push(token);
    }
}

fn remove(list: &mut Vec<Token>, token: Token) {
    list.retain(|t| *t != token);
}

impl Channel {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            topic: None,
            key: String::new(),
            members: Vec::new(),
            operators: Vec::new(),
            voiced: Vec::new(),
            invited: Vec::new(),
            bans: Vec::new(),
            invite_only: false,
            topic_restricted: false,
            user_limit: 0,
        }
    }

    // --- roster ---

    pub fn add_member(&mut self, token: Token) {
        insert_unique(&mut self.members, token);
    }

    /// Remove a member, along with any operator, voice, or invite status.
    pub fn remove_member(&mut self, token: Token) {
        remove(&mut self.members, token);
        remove(&mut self.operators, token);
        remove(&mut self.voiced, token);
        remove(&mut self.invited, token);
    }

    pub fn has_member(&self, token: Token) -> bool {
        self.members.contains(&token)
    }

    pub fn members(&self) -> &[Token] {
        &self.members
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    // --- operators / voice ---

    pub fn add_operator(&mut self, token: Token) {
        insert_unique(&mut self.operators, token);
    }

    pub fn remove_operator(&mut self, token: Token) {
        remove(&mut self.operators, token);
    }

    pub fn is_operator(&self, token: Token) -> bool {
        self.operators.contains(&token)
    }

    pub fn add_voice(&mut self, token: Token) {
        insert_unique(&mut self.voiced, token);
    }

    pub fn remove_voice(&mut self, token: Token) {
        remove(&mut self.voiced, token);
    }

    pub fn is_voiced(&self, token: Token) -> bool {
        self.voiced.contains(&token)
    }

    // --- invites ---

    pub fn invite(&mut self, token: Token) {
        insert_unique(&mut self.invited, token);
    }

    /// Consume a pending invite (a successful join spends it).
    pub fn revoke_invite(&mut self, token: Token) {
        remove(&mut self.invited, token);
    }

    pub fn is_invited(&self, token: Token) -> bool {
        self.invited.contains(&token)
    }

    // --- key ---

    pub fn has_key(&self) -> bool {
        !self.key.is_empty()
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn set_key(&mut self, key: &str) {
        self.key = key.to_string();
    }

    pub fn clear_key(&mut self) {
        self.key.clear();
    }

    // --- bans ---

    pub fn add_ban(&mut self, mask: &str) {
        if !self.bans.iter().any(|m| m == mask) {
            self.bans.push(mask.to_string());
        }
    }

    pub fn remove_ban(&mut self, mask: &str) {
        self.bans.retain(|m| m != mask);
    }

    /// Whether a client identified by `nick` and `host` matches the ban
    /// list. Three candidate masks are synthesized and compared exactly
    /// against every entry; no wildcard expansion beyond these.
    pub fn matches_ban(&self, nick: &str, host: &str) -> bool {
        let full = format!("{nick}!*@{host}");
        let by_nick = format!("{nick}!*@*");
        let by_host = format!("*!*@{host}");
        self.bans
            .iter()
            .any(|mask| *mask == full || *mask == by_nick || *mask == by_host)
    }
}
