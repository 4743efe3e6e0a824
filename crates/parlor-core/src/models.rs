use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A single message inside a conversation. Messages are append-only and never
/// move between conversations; deletion only flips the `deleted` flag.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: Uuid,
    pub conversation_id: Uuid,
    pub sender: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub deleted: bool,
    pub comment: Option<String>,
    pub commented_at: Option<DateTime<Utc>>,
    pub forwarded_from: Option<Uuid>,
}

impl Message {
    pub fn new(conversation_id: Uuid, sender: &str, text: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            conversation_id,
            sender: sender.to_string(),
            text: text.to_string(),
            created_at: Utc::now(),
            deleted: false,
            comment: None,
            commented_at: None,
            forwarded_from: None,
        }
    }
}

/// A one-to-one or group conversation. Participants are display names with
/// set semantics; the message list preserves insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversation {
    pub id: Uuid,
    pub participants: Vec<String>,
    pub messages: Vec<Message>,
    pub is_group: bool,
    /// Display name, meaningful only for groups.
    pub name: Option<String>,
}

impl Conversation {
    pub fn is_participant(&self, name: &str) -> bool {
        self.participants.iter().any(|p| p == name)
    }
}
