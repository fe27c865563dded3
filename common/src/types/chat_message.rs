use chrono::{DateTime, Local};
use std::fmt;

/// Identity of a chat entry. Also the correlation id of an assistant request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageId(pub u64);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
}

/// A source link attached to an assistant answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Citation {
    pub title: String,
    pub uri: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub id: MessageId,
    pub role: ChatRole,
    pub content: String,
    pub timestamp: DateTime<Local>,
    /// Set while the assistant reply for this entry is outstanding.
    pub is_loading: bool,
    pub citations: Vec<Citation>,
}

impl ChatMessage {
    pub fn user(id: MessageId, content: impl Into<String>) -> Self {
        Self::new(id, ChatRole::User, content.into(), false)
    }

    pub fn assistant(id: MessageId, content: impl Into<String>) -> Self {
        Self::new(id, ChatRole::Assistant, content.into(), false)
    }

    pub fn placeholder(id: MessageId) -> Self {
        Self::new(id, ChatRole::Assistant, String::new(), true)
    }

    fn new(id: MessageId, role: ChatRole, content: String, is_loading: bool) -> Self {
        Self {
            id,
            role,
            content,
            timestamp: Local::now(),
            is_loading,
            citations: Vec::new(),
        }
    }
}
