//! User-facing results of handler actions.
//!
//! Handlers never print; they return an [`ActionError`] that the front-end
//! turns into an alert and, for expired sessions, a trip back to login.

use std::fmt;

use crate::api::ApiError;
use crate::validation::ValidationError;

/// Title + message pair shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}

/// Which operation a generic failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    Fetch,
    Search,
    Add,
    Update,
    Delete,
    Login,
    Register,
}

impl Failure {
    pub fn code(self) -> &'static str {
        match self {
            Failure::Fetch => "FETCH_FAILED",
            Failure::Search => "SEARCH_FAILED",
            Failure::Add => "ADD_FAILED",
            Failure::Update => "UPDATE_FAILED",
            Failure::Delete => "DELETE_FAILED",
            Failure::Login => "LOGIN_FAILED",
            Failure::Register => "REGISTER_FAILED",
        }
    }

    fn alert_title(self) -> &'static str {
        match self {
            Failure::Login => "Login Failed",
            _ => "Error",
        }
    }
}

#[derive(Debug)]
pub enum ActionError {
    /// Input rejected before any request was made.
    Validation(ValidationError),
    /// The server answered 401; local session state has been cleared.
    SessionExpired,
    /// No stored session or user id to act on behalf of.
    NotLoggedIn,
    /// The item is not in the current list.
    NotFound(String),
    /// The feature does not exist in the current posture.
    Unavailable(&'static str),
    /// Request failed for any other reason.
    Failed {
        failure: Failure,
        title: &'static str,
        message: String,
        source: Option<ApiError>,
    },
    /// Local storage could not be read or written.
    Storage(anyhow::Error),
}

impl ActionError {
    /// Builds a generic failure, preferring the server's `error` string.
    pub fn failed(failure: Failure, default_message: &str, err: ApiError) -> Self {
        let message = err
            .server_error
            .clone()
            .unwrap_or_else(|| default_message.to_string());
        ActionError::Failed {
            failure,
            title: failure.alert_title(),
            message,
            source: Some(err),
        }
    }

    /// Builds a failure whose message is the raw response body.
    pub fn failed_verbose(failure: Failure, default_message: &str, err: ApiError) -> Self {
        let message = err
            .body
            .clone()
            .unwrap_or_else(|| default_message.to_string());
        ActionError::Failed {
            failure,
            title: "Server Error",
            message,
            source: Some(err),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ActionError::Validation(_) => "VALIDATION_ERROR",
            ActionError::SessionExpired => "UNAUTHORIZED",
            ActionError::NotLoggedIn => "NO_USER_ID",
            ActionError::NotFound(_) => "NOT_FOUND",
            ActionError::Unavailable(_) => "NOT_AVAILABLE",
            ActionError::Failed { failure, .. } => failure.code(),
            ActionError::Storage(_) => "STORAGE_ERROR",
        }
    }

    pub fn alert(&self) -> Alert {
        match self {
            ActionError::Validation(err) => Alert::new("Validation Error", err.to_string()),
            ActionError::SessionExpired => Alert::new("Session Expired", "Please login again"),
            ActionError::NotLoggedIn => Alert::new("Error", "Please login first"),
            ActionError::NotFound(message) => Alert::new("Error", message.clone()),
            ActionError::Unavailable(message) => Alert::new("Not Available", *message),
            ActionError::Failed { title, message, .. } => Alert::new(*title, message.clone()),
            ActionError::Storage(err) => Alert::new("Error", format!("{err:#}")),
        }
    }

    /// Whether the front-end must send the user back to login.
    pub fn requires_login(&self) -> bool {
        matches!(self, ActionError::SessionExpired | ActionError::NotLoggedIn)
    }
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.alert())
    }
}

impl std::error::Error for ActionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ActionError::Validation(err) => Some(err),
            ActionError::Failed {
                source: Some(err), ..
            } => Some(err),
            ActionError::Storage(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<ValidationError> for ActionError {
    fn from(err: ValidationError) -> Self {
        ActionError::Validation(err)
    }
}

impl From<anyhow::Error> for ActionError {
    fn from(err: anyhow::Error) -> Self {
        ActionError::Storage(err)
    }
}

pub type ActionResult<T> = std::result::Result<T, ActionError>;
