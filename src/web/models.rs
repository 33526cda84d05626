use serde::{Deserialize, Serialize};

/// Inbound chat request. `chat_history` is the prior conversation as
/// ordered (question, answer) pairs, oldest first.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub question: String,
    pub chat_history: Vec<(String, String)>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "assistant")]
    Assistant,
    #[serde(rename = "system")]
    System,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl ChatRequest {
    /// Flattens the request into the upstream message list: the system
    /// prompt, then each history pair as a user/assistant exchange, then
    /// the current question.
    pub fn to_messages(&self, system_prompt: &str) -> Vec<Message> {
        let mut messages = Vec::with_capacity(2 + 2 * self.chat_history.len());

        messages.push(Message {
            role: Role::System,
            content: system_prompt.to_string(),
        });

        for (question, answer) in &self.chat_history {
            messages.push(Message {
                role: Role::User,
                content: question.clone(),
            });
            messages.push(Message {
                role: Role::Assistant,
                content: answer.clone(),
            });
        }

        messages.push(Message {
            role: Role::User,
            content: self.question.clone(),
        });

        messages
    }
}
