//! Login, registration, logout, and remembered credentials.

use crate::api::types::Credentials;
use crate::context::AppContext;
use crate::outcome::{ActionError, ActionResult, Failure};
use crate::posture::Posture;
use crate::storage::UserInfo;
use crate::storage::auth::{USER_ID_KEY, USERNAME_KEY};
use crate::validation::{validate_login, validate_registration};

pub const REMEMBER_ME_KEY: &str = "rememberMe";
pub const PASSWORD_KEY: &str = "password";

const LOGIN_FAILED: &str = "Login failed. Please try again.";
const LOGIN_FAILED_UNKNOWN: &str = "Unknown error";
const REGISTER_FAILED: &str = "Registration failed. Please try again.";

/// The signed-in user after a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: i64,
    pub username: String,
}

/// Login form values restored from local storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RememberedLogin {
    pub remember_me: bool,
    pub username: String,
    /// Only ever populated in the vulnerable posture.
    pub password: Option<String>,
}

/// Signs in and persists the session for the current posture.
///
/// # Errors
/// Validation failures make no request. Server and network failures map to
/// `LOGIN_FAILED`. A 401 here means bad credentials: any stored session is
/// still dropped, but the user sees the login failure, not an expiry.
pub async fn login(
    ctx: &AppContext,
    username: &str,
    password: &str,
    remember: bool,
) -> ActionResult<Session> {
    validate_login(username, password)?;

    let posture = ctx.posture();
    let username = if posture.trims_credentials() {
        username.trim()
    } else {
        username
    };

    let response = match ctx.api().login(&Credentials { username, password }).await {
        Ok(response) => response,
        Err(err) => {
            if err.is_unauthorized() {
                tracing::warn!("login rejected; clearing stored session");
                ctx.clear_session()?;
            }
            let fallback = match posture {
                Posture::Secure => LOGIN_FAILED,
                Posture::Vulnerable => LOGIN_FAILED_UNKNOWN,
            };
            return Err(ActionError::failed(Failure::Login, fallback, err));
        }
    };

    let user_id = response.user_id.to_string();
    let display_name = response
        .username
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| username.to_string());

    match posture {
        Posture::Secure => {
            let Some(token) = response.token.filter(|token| !token.trim().is_empty()) else {
                tracing::warn!("login response carried no session token");
                return Err(ActionError::Failed {
                    failure: Failure::Login,
                    title: "Login Failed",
                    message: "Server did not return a session token".to_string(),
                    source: None,
                });
            };
            ctx.auth().save_token(&token)?;
            ctx.auth().save_user_info(&user_id, &display_name)?;

            let local = ctx.local();
            local.remove(PASSWORD_KEY)?;
            if remember {
                local.set(REMEMBER_ME_KEY, "true")?;
                local.set(USERNAME_KEY, username)?;
            } else {
                local.remove(REMEMBER_ME_KEY)?;
                local.remove(USERNAME_KEY)?;
            }
        }
        Posture::Vulnerable => {
            let local = ctx.local();
            if remember {
                local.set(USERNAME_KEY, username)?;
                local.set(PASSWORD_KEY, password)?;
            } else {
                local.remove(USERNAME_KEY)?;
                local.remove(PASSWORD_KEY)?;
            }
            local.set(USER_ID_KEY, &user_id)?;
        }
    }

    tracing::info!(%posture, user_id = response.user_id, "logged in");
    Ok(Session {
        user_id: response.user_id,
        username: display_name,
    })
}

/// Creates an account. Does not sign in.
///
/// # Errors
/// Validation failures make no request; anything else is `REGISTER_FAILED`.
pub async fn register(
    ctx: &AppContext,
    username: &str,
    password: &str,
    confirmation: &str,
) -> ActionResult<()> {
    validate_registration(username, password, confirmation)?;

    let username = if ctx.posture().trims_credentials() {
        username.trim()
    } else {
        username
    };

    ctx.api()
        .register(&Credentials { username, password })
        .await
        .map_err(|err| ActionError::failed(Failure::Register, REGISTER_FAILED, err))?;

    tracing::info!(username, "registered");
    Ok(())
}

/// Drops the local session. Remembered login data is kept.
///
/// Returns whether a session was present.
///
/// # Errors
/// Returns `Storage` if a store cannot be written.
pub fn logout(ctx: &AppContext) -> ActionResult<bool> {
    let had_session = ctx.clear_session()?;
    tracing::info!(had_session, "logged out");
    Ok(had_session)
}

/// Reads back what the login form should be pre-filled with.
///
/// # Errors
/// Returns `Storage` if the local store cannot be read.
pub fn check_stored_credentials(ctx: &AppContext) -> ActionResult<RememberedLogin> {
    let local = ctx.local();
    let remembered = match ctx.posture() {
        Posture::Secure => {
            if local.get(REMEMBER_ME_KEY)?.as_deref() == Some("true") {
                RememberedLogin {
                    remember_me: true,
                    username: local.get(USERNAME_KEY)?.unwrap_or_default(),
                    password: None,
                }
            } else {
                RememberedLogin::default()
            }
        }
        Posture::Vulnerable => match (local.get(USERNAME_KEY)?, local.get(PASSWORD_KEY)?) {
            (Some(username), Some(password)) => RememberedLogin {
                remember_me: true,
                username,
                password: Some(password),
            },
            _ => RememberedLogin::default(),
        },
    };
    Ok(remembered)
}

/// Who local storage says is signed in.
///
/// # Errors
/// Returns `Storage` if a store cannot be read.
pub fn load_user_info(ctx: &AppContext) -> ActionResult<UserInfo> {
    match ctx.posture() {
        Posture::Secure => Ok(ctx.auth().user_info()?),
        Posture::Vulnerable => {
            let local = ctx.local();
            Ok(UserInfo {
                user_id: local.get(USER_ID_KEY)?,
                username: local.get(USERNAME_KEY)?,
            })
        }
    }
}
