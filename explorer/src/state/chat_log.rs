use common::constants::APOLOGY_MESSAGE;
use common::errors::{ChatError, GatewayError};
use common::types::assistant::AssistantReply;
use common::types::chat_message::{ChatMessage, MessageId};

/// A submitted question waiting for the assistant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReply {
    /// Id of the loading placeholder the answer must land in.
    pub placeholder_id: MessageId,
    pub prompt: String,
}

/// Append-only conversation. Insertion order is the only ordering.
#[derive(Debug, Default)]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
    next_id: u64,
}

impl ChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_greeting(text: &str) -> Self {
        let mut log = Self::new();
        let id = log.allocate_id();
        log.append(ChatMessage::assistant(id, text));
        log
    }

    pub fn allocate_id(&mut self) -> MessageId {
        let id = MessageId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        id
    }

    pub fn append(&mut self, message: ChatMessage) {
        // ids handed out later must not collide with one chosen by the caller
        self.next_id = self.next_id.max(message.id.0.saturating_add(1));
        self.messages.push(message);
    }

    /// Appends the user's message and a loading placeholder for the answer.
    pub fn submit(&mut self, text: &str) -> Result<PendingReply, ChatError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ChatError::EmptyInput);
        }

        let user_id = self.allocate_id();
        self.append(ChatMessage::user(user_id, text));
        let placeholder_id = self.allocate_id();
        self.append(ChatMessage::placeholder(placeholder_id));

        Ok(PendingReply {
            placeholder_id,
            prompt: text.to_string(),
        })
    }

    /// Fills the placeholder `id` in place. A failed request gets the
    /// apology text. Returns `false` when there is no such loading entry,
    /// in which case the outcome is dropped.
    pub fn resolve(
        &mut self,
        id: MessageId,
        outcome: Result<AssistantReply, GatewayError>,
    ) -> bool {
        let Some(message) = self
            .messages
            .iter_mut()
            .find(|m| m.id == id && m.is_loading)
        else {
            return false;
        };

        match outcome {
            Ok(reply) => {
                message.content = reply.text;
                message.citations = reply.citations;
            }
            Err(_) => {
                message.content = APOLOGY_MESSAGE.to_string();
                message.citations.clear();
            }
        }
        message.is_loading = false;
        true
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn get(&self, id: MessageId) -> Option<&ChatMessage> {
        self.messages.iter().find(|m| m.id == id)
    }

    pub fn pending(&self) -> usize {
        self.messages.iter().filter(|m| m.is_loading).count()
    }
}
