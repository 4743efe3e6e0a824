use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::index::MessageIndex;
use crate::models::{Conversation, Message};

/// Owns every conversation record and its message list. The message and
/// membership indexes are derived views; all writes that must stay in sync
/// with them go through [`crate::Store`], never through this type directly.
#[derive(Debug, Default)]
pub struct ConversationStore {
    by_id: HashMap<Uuid, Conversation>,
}

impl ConversationStore {
    pub fn create(&mut self, owner: &str, is_group: bool) -> Uuid {
        let id = Uuid::new_v4();
        self.by_id.insert(
            id,
            Conversation {
                id,
                participants: vec![owner.to_string()],
                messages: Vec::new(),
                is_group,
                name: None,
            },
        );
        id
    }

    pub fn get(&self, id: Uuid) -> Result<&Conversation> {
        self.by_id.get(&id).ok_or(Error::NotFound)
    }

    fn get_mut(&mut self, id: Uuid) -> Result<&mut Conversation> {
        self.by_id.get_mut(&id).ok_or(Error::NotFound)
    }

    /// Append a message and register it in the message index in one step, so
    /// the index never lags the conversation's message list.
    pub fn append_message(&mut self, index: &mut MessageIndex, message: Message) -> Result<()> {
        let conversation = self.get_mut(message.conversation_id)?;
        index.insert(message.id, message.conversation_id);
        conversation.messages.push(message);
        Ok(())
    }

    pub fn find_message(&self, conversation_id: Uuid, message_id: Uuid) -> Result<&Message> {
        self.get(conversation_id)?
            .messages
            .iter()
            .find(|m| m.id == message_id)
            .ok_or(Error::NotFound)
    }

    fn find_message_mut(&mut self, conversation_id: Uuid, message_id: Uuid) -> Result<&mut Message> {
        self.get_mut(conversation_id)?
            .messages
            .iter_mut()
            .find(|m| m.id == message_id)
            .ok_or(Error::NotFound)
    }

    pub fn mark_deleted(&mut self, conversation_id: Uuid, message_id: Uuid) -> Result<()> {
        self.find_message_mut(conversation_id, message_id)?.deleted = true;
        Ok(())
    }

    /// Set or clear a message's comment. Soft-deleted messages are immutable
    /// with respect to comments.
    pub fn set_comment(
        &mut self,
        conversation_id: Uuid,
        message_id: Uuid,
        comment: Option<&str>,
    ) -> Result<()> {
        let message = self.find_message_mut(conversation_id, message_id)?;
        if message.deleted {
            return Err(Error::Conflict("message is deleted"));
        }
        match comment {
            Some(text) => {
                message.comment = Some(text.to_string());
                message.commented_at = Some(Utc::now());
            }
            None => {
                message.comment = None;
                message.commented_at = None;
            }
        }
        Ok(())
    }

    /// Returns whether membership actually changed, so the caller knows
    /// whether the membership index needs the matching update.
    pub fn add_participant(&mut self, conversation_id: Uuid, name: &str) -> Result<bool> {
        let conversation = self.get_mut(conversation_id)?;
        if conversation.is_participant(name) {
            return Ok(false);
        }
        conversation.participants.push(name.to_string());
        Ok(true)
    }

    pub fn remove_participant(&mut self, conversation_id: Uuid, name: &str) -> Result<bool> {
        let conversation = self.get_mut(conversation_id)?;
        match conversation.participants.iter().position(|p| p == name) {
            Some(pos) => {
                conversation.participants.remove(pos);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn set_name(&mut self, conversation_id: Uuid, name: &str) -> Result<()> {
        self.get_mut(conversation_id)?.name = Some(name.to_string());
        Ok(())
    }

    /// Re-key a display name across every participant list. Part of the user
    /// rename transaction; keeps participant lists consistent with the
    /// membership index.
    pub fn rename_participant(&mut self, old: &str, new: &str) {
        for conversation in self.by_id.values_mut() {
            for participant in &mut conversation.participants {
                if participant == old {
                    *participant = new.to_string();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_registers_in_index() {
        let mut store = ConversationStore::default();
        let mut index = MessageIndex::default();
        let cid = store.create("alice", false);

        let message = Message::new(cid, "alice", "hi");
        let mid = message.id;
        store.append_message(&mut index, message).unwrap();

        assert_eq!(index.lookup(mid), Some(cid));
        assert_eq!(store.find_message(cid, mid).unwrap().text, "hi");
    }

    #[test]
    fn comment_on_deleted_message_conflicts() {
        let mut store = ConversationStore::default();
        let mut index = MessageIndex::default();
        let cid = store.create("alice", false);
        let message = Message::new(cid, "alice", "hi");
        let mid = message.id;
        store.append_message(&mut index, message).unwrap();

        store.mark_deleted(cid, mid).unwrap();
        assert_eq!(
            store.set_comment(cid, mid, Some("late")),
            Err(Error::Conflict("message is deleted"))
        );
    }

    #[test]
    fn participants_keep_set_semantics() {
        let mut store = ConversationStore::default();
        let cid = store.create("alice", true);

        assert!(store.add_participant(cid, "bob").unwrap());
        assert!(!store.add_participant(cid, "bob").unwrap());
        assert_eq!(store.get(cid).unwrap().participants, vec!["alice", "bob"]);

        assert!(store.remove_participant(cid, "bob").unwrap());
        assert!(!store.remove_participant(cid, "bob").unwrap());
    }
}
