#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;

use serde_derive::Serialize;
use serde_json::Value;

use super::Message;
use super::Role;

/// A completed exchange, in the shape the chat API expects for history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChatHistoryEntry {
    pub human: String,
    pub ai: String,
}

impl ChatHistoryEntry {
    /// Pairs every user message with the assistant message directly after it.
    /// Questions that never got an answer are left out.
    pub fn from_transcript(messages: &[Message]) -> Vec<ChatHistoryEntry> {
        return messages
            .windows(2)
            .filter_map(|pair| {
                if pair[0].role == Role::User && pair[1].role == Role::Assistant {
                    return Some(ChatHistoryEntry {
                        human: pair[0].content.to_string(),
                        ai: pair[1].content.to_string(),
                    });
                }
                return None;
            })
            .collect();
    }
}

/// Body posted to `{api_base_url}/api/chat`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChatRequest {
    #[serde(skip)]
    pub generation: u64,
    pub question: String,
    pub chat_history: Vec<ChatHistoryEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub llm: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChatOutcome {
    Succeeded(String),
    Failed(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatResponse {
    pub generation: u64,
    pub outcome: ChatOutcome,
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => return false,
        Value::Bool(b) => return *b,
        Value::Number(n) => return n.as_f64().map(|e| return e != 0.0).unwrap_or(true),
        Value::String(s) => return !s.is_empty(),
        Value::Array(_) | Value::Object(_) => return true,
    }
}

fn display_text(value: &Value) -> String {
    if let Value::String(s) = value {
        return s.to_string();
    }

    return value.to_string();
}

/// Picks the text to show for a decoded reply: `response`, then `message`,
/// then the whole body. Empty, null, false and zero fields are skipped.
pub fn reply_text(body: &Value) -> String {
    for field in ["response", "message"] {
        if let Some(value) = body.get(field) {
            if is_truthy(value) {
                return display_text(value);
            }
        }
    }

    return display_text(body);
}
