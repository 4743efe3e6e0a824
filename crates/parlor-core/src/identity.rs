use std::collections::HashMap;

use uuid::Uuid;

use crate::error::{Error, Result};

/// Maps display names to stable user identifiers and bearer tokens to the
/// display name currently authenticated with them. The token issued at login
/// is the user's identifier rendered as a string, so re-logging in re-binds
/// the same token rather than minting a second credential.
#[derive(Debug, Default)]
pub struct IdentityStore {
    users: HashMap<String, Uuid>,
    tokens: HashMap<String, String>,
}

impl IdentityStore {
    /// Create the user on first sight, otherwise reuse the existing
    /// identifier. Either way the token binding is refreshed.
    pub fn login(&mut self, name: &str) -> Result<Uuid> {
        if name.is_empty() {
            return Err(Error::InvalidInput("name must not be empty"));
        }

        let identifier = match self.users.get(name) {
            Some(id) => *id,
            None => {
                let id = Uuid::new_v4();
                self.users.insert(name.to_string(), id);
                id
            }
        };
        self.tokens.insert(identifier.to_string(), name.to_string());

        Ok(identifier)
    }

    pub fn authenticate(&self, token: &str) -> Result<String> {
        self.tokens
            .get(token)
            .cloned()
            .ok_or(Error::Unauthorized)
    }

    pub fn is_known(&self, name: &str) -> bool {
        self.users.contains_key(name)
    }

    /// Re-key the identity mapping and every token bound to `old` over to
    /// `new`. Returns false when the rename is a no-op (`new == old`).
    /// The caller is responsible for re-keying the membership index and
    /// participant lists in the same logical transaction.
    pub fn rename(&mut self, old: &str, new: &str) -> Result<bool> {
        if new.is_empty() {
            return Err(Error::InvalidInput("name must not be empty"));
        }
        if new == old {
            return Ok(false);
        }
        if self.users.contains_key(new) {
            return Err(Error::Conflict("name already taken"));
        }

        let identifier = self
            .users
            .remove(old)
            .ok_or_else(|| Error::Internal(format!("no identity entry for '{old}'")))?;
        self.users.insert(new.to_string(), identifier);

        for bound in self.tokens.values_mut() {
            if bound == old {
                *bound = new.to_string();
            }
        }

        Ok(true)
    }
}
