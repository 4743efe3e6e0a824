//! In-memory state for the parlor messaging backend.
//!
//! All four stores (identity, conversations, message index, membership
//! index) live behind one coarse lock so every operation in [`ops`] runs as
//! a single atomic unit. Operations validate first and mutate last; a failed
//! operation leaves no partial writes behind.

pub mod conversations;
pub mod error;
pub mod identity;
pub mod index;
pub mod models;
pub mod ops;

use std::sync::Mutex;

use crate::conversations::ConversationStore;
use crate::identity::IdentityStore;
use crate::index::{MembershipIndex, MessageIndex};

pub use crate::error::{Error, Result};
pub use crate::models::{Conversation, Message};

#[derive(Debug, Default)]
pub(crate) struct State {
    pub(crate) identity: IdentityStore,
    pub(crate) conversations: ConversationStore,
    pub(crate) messages: MessageIndex,
    pub(crate) membership: MembershipIndex,
}

/// The single process-wide authority over all messaging state. Cheap to
/// share behind an `Arc`; every public operation takes `&self` and locks
/// internally.
#[derive(Debug, Default)]
pub struct Store {
    inner: Mutex<State>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_state<T>(&self, f: impl FnOnce(&mut State) -> Result<T>) -> Result<T> {
        let mut state = self
            .inner
            .lock()
            .map_err(|e| Error::Internal(format!("store lock poisoned: {e}")))?;
        f(&mut state)
    }
}
