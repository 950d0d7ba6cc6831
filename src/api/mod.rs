//! Wire payloads for the inference endpoint.

use serde::Serialize;

use crate::core::message::{Message, Role};

/// Body of the per-turn `POST`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TurnRequest {
    pub input_prompt: String,
    pub history: Vec<HistoryEntry>,
    pub user_story: String,
    pub user: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HistoryEntry {
    pub role: Role,
    pub parts: Vec<HistoryPart>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HistoryPart {
    pub text: String,
}

impl From<&Message> for HistoryEntry {
    fn from(message: &Message) -> Self {
        Self {
            role: message.role,
            parts: vec![HistoryPart {
                text: message.text.clone(),
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_serializes_with_camel_case_keys() {
        let request = TurnRequest {
            input_prompt: "Hello".into(),
            history: vec![HistoryEntry::from(&Message::user(1, "Hi!"))],
            user_story: "Name: Emma".into(),
            user: "Emma".into(),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "inputPrompt": "Hello",
                "history": [{"role": "user", "parts": [{"text": "Hi!"}]}],
                "userStory": "Name: Emma",
                "user": "Emma"
            })
        );
    }

    #[test]
    fn history_entry_keeps_role_and_text() {
        let entry = HistoryEntry::from(&Message::model(7, "line one\n \u{a0}line two"));
        assert_eq!(entry.role, Role::Model);
        assert_eq!(entry.parts.len(), 1);
        assert_eq!(entry.parts[0].text, "line one\n \u{a0}line two");
    }
}
