use crate::types::chat_message::Citation;
use crate::types::lat_lng::LatLng;

/// Everything the assistant gets to see for one question.
#[derive(Debug, Clone, PartialEq)]
pub struct AssistantQuery {
    pub prompt: String,
    pub location: LatLng,
    /// Known shop names and addresses, one per line.
    pub context: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantReply {
    pub text: String,
    pub citations: Vec<Citation>,
}

impl AssistantReply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            citations: Vec::new(),
        }
    }
}
