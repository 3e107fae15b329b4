//! Shared client state: posture, API client, and the two local stores.

use std::sync::Arc;

use anyhow::Result;

use crate::api::{ApiClient, ApiError, Identity};
use crate::config::{Config, paths};
use crate::outcome::{ActionError, ActionResult, Failure};
use crate::posture::Posture;
use crate::storage::auth::USER_ID_KEY;
use crate::storage::{AuthStorage, FileStore, KeyValueStore, Protection};

/// Everything a handler needs to act on behalf of the current user.
#[derive(Clone)]
pub struct AppContext {
    posture: Posture,
    api: ApiClient,
    auth: AuthStorage,
    local: Arc<dyn KeyValueStore>,
    viewed_user_id: Option<String>,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("posture", &self.posture)
            .field("viewed_user_id", &self.viewed_user_id)
            .finish_non_exhaustive()
    }
}

impl AppContext {
    /// Builds a context from explicit parts.
    ///
    /// `secure` backs the token service; `local` is the unrestricted store
    /// for preferences (and, in the vulnerable posture, everything else).
    pub fn new(
        posture: Posture,
        api: ApiClient,
        secure: Arc<dyn KeyValueStore>,
        local: Arc<dyn KeyValueStore>,
    ) -> Self {
        Self {
            posture,
            api,
            auth: AuthStorage::new(secure),
            local,
            viewed_user_id: None,
        }
    }

    /// Builds a context backed by the files under PLANIT_HOME.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &Config, api_url: &str, posture: Posture) -> Result<Self> {
        let api = ApiClient::new(api_url, config.request_timeout())?;
        let secure = FileStore::new(paths::secure_store_path(), Protection::Restricted);
        let local = FileStore::new(paths::local_store_path(), Protection::Plain);
        Ok(Self::new(posture, api, Arc::new(secure), Arc::new(local)))
    }

    pub fn posture(&self) -> Posture {
        self.posture
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn auth(&self) -> &AuthStorage {
        &self.auth
    }

    pub fn local(&self) -> &dyn KeyValueStore {
        self.local.as_ref()
    }

    /// Acts on behalf of `user_id` instead of the stored one.
    ///
    /// Only the vulnerable posture sends a client-chosen id; the secure
    /// posture takes the user from the session token.
    ///
    /// # Errors
    /// `Unavailable` in the secure posture.
    pub fn view_as(mut self, user_id: i64) -> ActionResult<Self> {
        if self.posture.uses_bearer_token() {
            return Err(ActionError::Unavailable(
                "The secure posture takes the user from the session token; a user id cannot be chosen",
            ));
        }
        tracing::debug!(user_id, "overriding stored user id");
        self.viewed_user_id = Some(user_id.to_string());
        Ok(self)
    }

    /// The user id chosen with [`AppContext::view_as`], if any.
    pub fn viewed_user_id(&self) -> Option<&str> {
        self.viewed_user_id.as_deref()
    }

    /// Resolves who requests are made for.
    ///
    /// # Errors
    /// `NotLoggedIn` when nothing is stored; `Storage` on read failures.
    pub fn identity(&self) -> ActionResult<Identity> {
        let identity = if self.posture.uses_bearer_token() {
            self.auth.token()?.map(Identity::Bearer)
        } else if let Some(user_id) = &self.viewed_user_id {
            Some(Identity::UserId(user_id.clone()))
        } else {
            self.local
                .get(USER_ID_KEY)?
                .filter(|id| !id.trim().is_empty())
                .map(Identity::UserId)
        };
        identity.ok_or(ActionError::NotLoggedIn)
    }

    /// Drops the local session. Returns whether one was present.
    ///
    /// # Errors
    /// Returns an error if a store cannot be written.
    pub fn clear_session(&self) -> Result<bool> {
        if self.posture.uses_bearer_token() {
            self.auth.clear()
        } else {
            self.local.remove(USER_ID_KEY)
        }
    }

    /// Maps an API failure on a task/event endpoint to an [`ActionError`].
    ///
    /// A 401 clears the local session first.
    pub(crate) fn api_failure(
        &self,
        failure: Failure,
        default_message: &str,
        err: ApiError,
    ) -> ActionError {
        if err.is_unauthorized() {
            tracing::warn!(code = failure.code(), "server rejected session; clearing it");
            if let Err(clear_err) = self.clear_session() {
                return ActionError::Storage(clear_err);
            }
            return ActionError::SessionExpired;
        }

        tracing::debug!(code = failure.code(), error = %err, "request failed");
        if failure == Failure::Search && self.posture.exposes_server_errors() {
            ActionError::failed_verbose(failure, default_message, err)
        } else {
            ActionError::failed(failure, default_message, err)
        }
    }
}
