use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Role::System => "System",
            Role::User => "User",
            Role::Assistant => "Assistant",
        };
        f.write_str(label)
    }
}

/// One message as sent to the chat backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, name: None, content: content.into() }
    }

    pub fn user(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self { role: Role::User, name: Some(name.into()), content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, name: None, content: content.into() }
    }
}

/// One entry of the conversation transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub speaker: String,
    pub role: Role,
    pub content: String,
}
