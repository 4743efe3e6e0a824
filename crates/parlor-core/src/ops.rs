//! The operation layer: every entry point the transport adapter may call.
//!
//! Each operation takes an already-authenticated display name plus request
//! parameters, runs under the store's single lock, and enforces the access
//! rules:
//!
//! - read-path operations (get, comment, uncomment, forward, group
//!   management) report a conversation the caller cannot see as `NotFound`,
//!   so non-participants cannot probe for existence;
//! - write-path operations against an explicitly named resource (send to an
//!   existing conversation, delete a message) report `Forbidden` instead,
//!   since the caller already holds the id.

use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::{Conversation, Message};
use crate::{State, Store};

impl State {
    /// Resolve a message id to its owning conversation via the global index.
    fn resolve_message(&self, message_id: Uuid) -> Result<Uuid> {
        let conversation_id = self.messages.lookup(message_id).ok_or(Error::NotFound)?;
        if self.conversations.get(conversation_id).is_err() {
            // The index is supposed to be updated in lockstep with the
            // conversation store; reaching this branch means it diverged.
            warn!(%message_id, %conversation_id, "message index points at a missing conversation");
            return Err(Error::NotFound);
        }
        Ok(conversation_id)
    }

    /// Read-path lookup: a conversation the caller does not participate in
    /// is indistinguishable from one that does not exist.
    fn visible_conversation(&self, name: &str, conversation_id: Uuid) -> Result<&Conversation> {
        let conversation = self.conversations.get(conversation_id)?;
        if !conversation.is_participant(name) {
            return Err(Error::NotFound);
        }
        Ok(conversation)
    }

    /// Same as `visible_conversation` but additionally requires the group
    /// flag; non-group conversations are invisible to group operations.
    fn visible_group(&self, name: &str, group_id: Uuid) -> Result<&Conversation> {
        let conversation = self.conversations.get(group_id)?;
        if !conversation.is_group {
            return Err(Error::NotFound);
        }
        if !conversation.is_participant(name) {
            return Err(Error::NotFound);
        }
        Ok(conversation)
    }
}

impl Store {
    // -- Identity --

    /// Create-or-reuse login: returns the user's stable identifier, which
    /// doubles as the bearer token for subsequent requests.
    pub fn login(&self, name: &str) -> Result<Uuid> {
        self.with_state(|state| {
            let known = state.identity.is_known(name);
            let identifier = state.identity.login(name)?;
            if !known {
                debug!(%name, %identifier, "registered new user");
            }
            Ok(identifier)
        })
    }

    /// Resolve a bearer token to the display name currently bound to it.
    pub fn authenticate(&self, token: &str) -> Result<String> {
        self.with_state(|state| state.identity.authenticate(token))
    }

    /// Rename the authenticated user. Re-keys the identity mapping, token
    /// bindings, membership index, and conversation participant lists in one
    /// transaction, so no reader ever sees a mix of old and new names.
    pub fn rename_user(&self, name: &str, new_name: &str) -> Result<()> {
        self.with_state(|state| {
            if state.identity.rename(name, new_name)? {
                state.membership.rekey(name, new_name);
                state.conversations.rename_participant(name, new_name);
                debug!(old = %name, new = %new_name, "renamed user");
            }
            Ok(())
        })
    }

    // -- Conversations --

    /// Conversation ids the user belongs to, in creation/addition order.
    /// A user with no conversations gets an empty list, never an error.
    pub fn list_conversations(&self, name: &str) -> Result<Vec<Uuid>> {
        self.with_state(|state| Ok(state.membership.list_for(name)))
    }

    /// Full conversation snapshot, soft-deleted messages included (each
    /// carries its `deleted` flag so the adapter may redact the text).
    pub fn get_conversation(&self, name: &str, conversation_id: Uuid) -> Result<Conversation> {
        self.with_state(|state| Ok(state.visible_conversation(name, conversation_id)?.clone()))
    }

    /// Send a message. With no conversation id a fresh conversation is
    /// created with the sender as sole participant; with one, the sender
    /// must already participate in it.
    pub fn send_message(
        &self,
        name: &str,
        conversation_id: Option<Uuid>,
        text: &str,
        is_group: bool,
    ) -> Result<(Uuid, Uuid)> {
        if text.is_empty() {
            return Err(Error::InvalidInput("text must not be empty"));
        }

        self.with_state(|state| {
            let conversation_id = match conversation_id {
                Some(id) => {
                    let conversation = state.conversations.get(id)?;
                    if !conversation.is_participant(name) {
                        return Err(Error::Forbidden);
                    }
                    id
                }
                None => {
                    let id = state.conversations.create(name, is_group);
                    state.membership.add(name, id);
                    debug!(conversation_id = %id, owner = %name, is_group, "created conversation");
                    id
                }
            };

            let message = Message::new(conversation_id, name, text);
            let message_id = message.id;
            state
                .conversations
                .append_message(&mut state.messages, message)?;

            Ok((conversation_id, message_id))
        })
    }

    /// Soft-delete a message in a conversation the caller participates in.
    /// Deleting an already-deleted message succeeds silently; the flag is
    /// simply already set.
    pub fn delete_message(&self, name: &str, message_id: Uuid) -> Result<()> {
        self.with_state(|state| {
            let conversation_id = state.resolve_message(message_id)?;
            let conversation = state.conversations.get(conversation_id)?;
            if !conversation.is_participant(name) {
                return Err(Error::Forbidden);
            }
            state.conversations.mark_deleted(conversation_id, message_id)
        })
    }

    /// Attach a comment to a message. Soft-deleted messages reject comments.
    pub fn comment_message(&self, name: &str, message_id: Uuid, comment: &str) -> Result<()> {
        self.with_state(|state| {
            let conversation_id = state.resolve_message(message_id)?;
            state.visible_conversation(name, conversation_id)?;
            let message = state.conversations.find_message(conversation_id, message_id)?;
            if message.deleted {
                return Err(Error::Conflict("message is deleted"));
            }
            if comment.is_empty() {
                return Err(Error::InvalidInput("comment must not be empty"));
            }
            state
                .conversations
                .set_comment(conversation_id, message_id, Some(comment))
        })
    }

    /// Clear a message's comment and comment timestamp.
    pub fn uncomment_message(&self, name: &str, message_id: Uuid) -> Result<()> {
        self.with_state(|state| {
            let conversation_id = state.resolve_message(message_id)?;
            state.visible_conversation(name, conversation_id)?;
            state.conversations.find_message(conversation_id, message_id)?;
            state
                .conversations
                .set_comment(conversation_id, message_id, None)
        })
    }

    /// Forward a message into another conversation the caller participates
    /// in. The copy is a brand-new message attributed to the forwarder and
    /// carrying a reference to the source; the source is never mutated.
    pub fn forward_message(
        &self,
        name: &str,
        source_message_id: Uuid,
        target_conversation_id: Uuid,
    ) -> Result<(Uuid, Uuid)> {
        self.with_state(|state| {
            let source_conversation_id = state.resolve_message(source_message_id)?;
            state.visible_conversation(name, source_conversation_id)?;
            let source = state
                .conversations
                .find_message(source_conversation_id, source_message_id)?;
            if source.deleted {
                return Err(Error::Conflict("message is deleted"));
            }
            let text = source.text.clone();

            state.visible_conversation(name, target_conversation_id)?;

            let mut message = Message::new(target_conversation_id, name, &text);
            message.forwarded_from = Some(source_message_id);
            let message_id = message.id;
            state
                .conversations
                .append_message(&mut state.messages, message)?;

            Ok((target_conversation_id, message_id))
        })
    }

    // -- Groups --

    /// Add a known user to a group. Adding an existing member is a no-op
    /// that still succeeds.
    pub fn add_to_group(&self, name: &str, group_id: Uuid, member: &str) -> Result<()> {
        self.with_state(|state| {
            state.visible_group(name, group_id)?;
            if member.is_empty() {
                return Err(Error::InvalidInput("memberId must not be empty"));
            }
            if !state.identity.is_known(member) {
                return Err(Error::NotFound);
            }
            if state.conversations.add_participant(group_id, member)? {
                state.membership.add(member, group_id);
                debug!(%group_id, %member, "added group member");
            }
            Ok(())
        })
    }

    /// Remove the caller from a group and from their own membership index.
    pub fn leave_group(&self, name: &str, group_id: Uuid) -> Result<()> {
        self.with_state(|state| {
            state.visible_group(name, group_id)?;
            state.conversations.remove_participant(group_id, name)?;
            state.membership.remove(name, group_id);
            debug!(%group_id, member = %name, "member left group");
            Ok(())
        })
    }

    /// Overwrite a group's display name.
    pub fn set_group_name(&self, name: &str, group_id: Uuid, new_name: &str) -> Result<()> {
        self.with_state(|state| {
            state.visible_group(name, group_id)?;
            if new_name.is_empty() {
                return Err(Error::InvalidInput("name must not be empty"));
            }
            state.conversations.set_name(group_id, new_name)
        })
    }
}
