#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use serde::{Deserialize, Serialize};

/// State for the chat room view: the append-only message buffer.
///
/// Messages are appended in arrival order and never mutated or removed.
/// The buffer is retained across a disconnect and only dropped when the
/// view unmounts.
#[derive(Clone, Debug, Default)]
pub struct ChatState {
    pub messages: Vec<ChatMessage>,
}

/// A single chat event delivered on the public topic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: String,
    /// Empty for JOIN events, which carry no content on the wire.
    #[serde(default)]
    pub content: String,
    #[serde(rename = "type")]
    pub kind: MessageKind,
}

/// Wire-tagged kind of a chat event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MessageKind {
    Join,
    Chat,
}
