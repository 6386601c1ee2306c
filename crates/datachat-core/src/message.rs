//! Conversation messages
//!
//! UI-agnostic types shared by the conversation controller and the renderer.

use crate::payload::{Envelope, Payload};

/// Shown in place of a reply whenever the backend cannot be reached or answers garbage.
pub const FAILURE_TEXT: &str = "Error: Failed to fetch response. Ensure backend is running.";

/// Who sent a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Bot,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "You",
            Role::Bot => "Bot",
        }
    }
}

/// One conversational turn. Never modified after it is appended to the log.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    User {
        content: String,
    },
    Bot {
        explanation: Option<String>,
        payload: Payload,
    },
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Message::User {
            content: content.into(),
        }
    }

    pub fn bot(envelope: Envelope) -> Self {
        Message::Bot {
            explanation: envelope.explanation,
            payload: envelope.payload,
        }
    }

    /// The reply recorded when a request fails.
    pub fn failure() -> Self {
        Message::Bot {
            explanation: None,
            payload: Payload::text(FAILURE_TEXT),
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Message::User { .. } => Role::User,
            Message::Bot { .. } => Role::Bot,
        }
    }

    pub fn is_bot(&self) -> bool {
        self.role() == Role::Bot
    }

    pub fn payload(&self) -> Option<&Payload> {
        match self {
            Message::User { .. } => None,
            Message::Bot { payload, .. } => Some(payload),
        }
    }
}
