//! Session token service backed by a restricted store.
//!
//! Tokens are never logged or displayed in full.

use std::sync::Arc;

use anyhow::Result;

use super::KeyValueStore;

pub const TOKEN_KEY: &str = "auth_token";
pub const USER_ID_KEY: &str = "user_id";
pub const USERNAME_KEY: &str = "username";

/// Who is signed in, as far as local storage knows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserInfo {
    pub user_id: Option<String>,
    pub username: Option<String>,
}

/// Owns the session token and user info.
#[derive(Clone)]
pub struct AuthStorage {
    store: Arc<dyn KeyValueStore>,
}

impl AuthStorage {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// # Errors
    /// Returns an error if the store cannot be written.
    pub fn save_token(&self, token: &str) -> Result<()> {
        tracing::debug!(token = %mask_token(token), "saving session token");
        self.store.set(TOKEN_KEY, token)
    }

    /// # Errors
    /// Returns an error if the store cannot be read.
    pub fn token(&self) -> Result<Option<String>> {
        Ok(self
            .store
            .get(TOKEN_KEY)?
            .filter(|token| !token.trim().is_empty()))
    }

    /// # Errors
    /// Returns an error if the store cannot be written.
    pub fn save_user_info(&self, user_id: &str, username: &str) -> Result<()> {
        self.store.set(USER_ID_KEY, user_id)?;
        self.store.set(USERNAME_KEY, username)
    }

    /// # Errors
    /// Returns an error if the store cannot be read.
    pub fn user_info(&self) -> Result<UserInfo> {
        Ok(UserInfo {
            user_id: self.store.get(USER_ID_KEY)?,
            username: self.store.get(USERNAME_KEY)?,
        })
    }

    /// Removes the token and user info. Returns whether a token was present.
    ///
    /// # Errors
    /// Returns an error if the store cannot be written.
    pub fn clear(&self) -> Result<bool> {
        let had_token = self.store.remove(TOKEN_KEY)?;
        self.store.remove(USER_ID_KEY)?;
        self.store.remove(USERNAME_KEY)?;
        Ok(had_token)
    }
}

/// Masks a token for display, keeping a short prefix and suffix.
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 12 {
        return "*".repeat(chars.len());
    }
    let prefix: String = chars[..6].iter().collect();
    let suffix: String = chars[chars.len() - 4..].iter().collect();
    format!("{prefix}...{suffix}")
}
