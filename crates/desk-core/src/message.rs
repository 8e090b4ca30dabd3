//! Conversation messages

use serde::{Deserialize, Serialize};
use std::fmt;

/// Author of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Message typed by the user
    User,
    /// Message produced by a pipeline stage
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => f.write_str("user"),
            Self::Assistant => f.write_str("assistant"),
        }
    }
}

/// A message in the conversation
///
/// Serializes as `{"role": "user", "text": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", content = "text", rename_all = "lowercase")]
pub enum Message {
    /// User message
    User(String),
    /// Assistant message
    Assistant(String),
}

impl Message {
    /// Create a user message with text
    pub fn user(text: impl Into<String>) -> Self {
        Self::User(text.into())
    }

    /// Create an assistant message with text
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::Assistant(text.into())
    }

    /// Message role
    pub fn role(&self) -> Role {
        match self {
            Self::User(_) => Role::User,
            Self::Assistant(_) => Role::Assistant,
        }
    }

    /// Message text
    pub fn text(&self) -> &str {
        match self {
            Self::User(text) | Self::Assistant(text) => text,
        }
    }

    pub fn is_user(&self) -> bool {
        matches!(self, Self::User(_))
    }

    pub fn is_assistant(&self) -> bool {
        matches!(self, Self::Assistant(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let msg = Message::user("Analyze AAPL");
        assert_eq!(msg.role(), Role::User);
        assert_eq!(msg.text(), "Analyze AAPL");
        assert!(msg.is_user());

        let msg = Message::assistant("Done");
        assert_eq!(msg.role(), Role::Assistant);
        assert!(msg.is_assistant());
    }

    #[test]
    fn test_wire_shape() {
        let json = serde_json::to_value(Message::user("hi")).unwrap();
        assert_eq!(json, serde_json::json!({"role": "user", "text": "hi"}));

        let msg: Message =
            serde_json::from_value(serde_json::json!({"role": "assistant", "text": "ok"}))
                .unwrap();
        assert_eq!(msg, Message::assistant("ok"));
    }

    #[test]
    fn test_unknown_role_rejected() {
        let result: Result<Message, _> =
            serde_json::from_value(serde_json::json!({"role": "system", "text": "x"}));
        assert!(result.is_err());
    }
}
