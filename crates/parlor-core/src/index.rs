use std::collections::HashMap;

use uuid::Uuid;

/// Global lookup from message id to the conversation that owns it. Entries
/// are created atomically with the message and never updated; messages are
/// never purged, so there is no removal path.
#[derive(Debug, Default)]
pub struct MessageIndex {
    owners: HashMap<Uuid, Uuid>,
}

impl MessageIndex {
    pub fn insert(&mut self, message_id: Uuid, conversation_id: Uuid) {
        self.owners.insert(message_id, conversation_id);
    }

    pub fn lookup(&self, message_id: Uuid) -> Option<Uuid> {
        self.owners.get(&message_id).copied()
    }
}

/// Per-user reverse index from display name to the conversations the user
/// belongs to, in creation/addition order. Kept in lockstep with the
/// conversation participant lists.
#[derive(Debug, Default)]
pub struct MembershipIndex {
    by_user: HashMap<String, Vec<Uuid>>,
}

impl MembershipIndex {
    pub fn list_for(&self, name: &str) -> Vec<Uuid> {
        self.by_user.get(name).cloned().unwrap_or_default()
    }

    pub fn add(&mut self, name: &str, conversation_id: Uuid) {
        self.by_user
            .entry(name.to_string())
            .or_default()
            .push(conversation_id);
    }

    /// Remove the first matching entry. Duplicates never arise given the
    /// participant-list set semantics.
    pub fn remove(&mut self, name: &str, conversation_id: Uuid) {
        if let Some(ids) = self.by_user.get_mut(name)
            && let Some(pos) = ids.iter().position(|id| *id == conversation_id)
        {
            ids.remove(pos);
        }
    }

    /// Move a user's whole entry during a rename.
    pub fn rekey(&mut self, old: &str, new: &str) {
        if let Some(ids) = self.by_user.remove(old) {
            self.by_user.insert(new.to_string(), ids);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership_preserves_addition_order() {
        let mut index = MembershipIndex::default();
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        index.add("alice", a);
        index.add("alice", b);
        index.add("alice", c);
        index.remove("alice", b);
        assert_eq!(index.list_for("alice"), vec![a, c]);
    }

    #[test]
    fn rekey_moves_the_whole_entry() {
        let mut index = MembershipIndex::default();
        let cid = Uuid::new_v4();
        index.add("alice", cid);
        index.rekey("alice", "alicia");
        assert!(index.list_for("alice").is_empty());
        assert_eq!(index.list_for("alicia"), vec![cid]);
    }
}
