//! Chat history between the user and the assistant

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::services::Assistant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub text: String,
    pub at: DateTime<Utc>,
}

impl Message {
    fn new(role: Role, text: String) -> Self {
        Self { role, text, at: Utc::now() }
    }
}

/// Ordered chat log, seeded with the assistant's greeting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    messages: Vec<Message>,
    /// Ask before taking actions instead of auto-acting on low-risk steps
    pub ask_before_act: bool,
}

impl Conversation {
    pub fn new(user_name: &str) -> Self {
        let greeting = format!(
            "Hi {} — I’m your agentic assistant. Use any words, formats, or languages that work for you — I’ll adapt.",
            user_name
        );
        Self {
            messages: vec![Message::new(Role::Assistant, greeting)],
            ask_before_act: true,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Record a prompt and the assistant's reply.
    ///
    /// Blank input is ignored and returns `None`.
    pub fn send(&mut self, assistant: &Assistant, input: &str) -> Option<&Message> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }

        let reply = assistant.reply(trimmed, self.ask_before_act);
        self.messages.push(Message::new(Role::User, trimmed.to_string()));
        self.messages.push(Message::new(Role::Assistant, reply));
        self.messages.last()
    }
}
