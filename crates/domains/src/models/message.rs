use serde::{Deserialize, Serialize};

/// One chat message. Append-only: there is no patch type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Assigned by the store, strictly increasing. Used as the recency proxy.
    pub id: i64,
    pub conversation_id: String,
    pub conversation_label: Option<String>,
    pub sender: Option<String>,
    pub sender_name: Option<String>,
    pub text: String,
    /// Client supplied ISO-8601 string, not validated.
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMessage {
    pub conversation_id: String,
    #[serde(default)]
    pub conversation_label: Option<String>,
    #[serde(default)]
    pub sender: Option<String>,
    #[serde(default)]
    pub sender_name: Option<String>,
    pub text: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl Message {
    pub fn from_draft(id: i64, d: NewMessage) -> Self {
        Self {
            id,
            conversation_id: d.conversation_id,
            conversation_label: d.conversation_label,
            sender: d.sender,
            sender_name: d.sender_name,
            text: d.text,
            timestamp: d.timestamp,
        }
    }
}

/// Derived per-conversation view; recomputed on every query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationSummary {
    pub conversation_id: String,
    pub conversation_label: Option<String>,
    pub last_message: String,
    pub last_timestamp: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_message_requires_conversation_and_text() {
        assert!(serde_json::from_value::<NewMessage>(json!({ "text": "hi" })).is_err());
        assert!(serde_json::from_value::<NewMessage>(json!({ "conversationId": "a" })).is_err());

        let m: NewMessage = serde_json::from_value(json!({
            "conversationId": "owner-3",
            "text": "hi",
            "senderName": "Ana",
        }))
        .unwrap();
        assert_eq!(m.sender_name.as_deref(), Some("Ana"));
        assert_eq!(m.timestamp, None);
    }

    #[test]
    fn summary_uses_camel_case_keys() {
        let s = ConversationSummary {
            conversation_id: "c1".into(),
            conversation_label: None,
            last_message: "yo".into(),
            last_timestamp: Some("2025-01-01T00:00:00Z".into()),
        };
        let v = serde_json::to_value(s).unwrap();
        assert_eq!(v["conversationId"], "c1");
        assert_eq!(v["lastMessage"], "yo");
        assert!(v["conversationLabel"].is_null());
    }
}
