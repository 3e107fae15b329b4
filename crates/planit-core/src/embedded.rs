//! Admin key compiled into the vulnerable build.
//!
//! Anything shipped inside the binary can be read by whoever has the
//! binary; the vulnerable posture shows this by handing the key out.

use crate::context::AppContext;
use crate::outcome::{ActionError, ActionResult};

/// Hardcoded credential. Not accepted by any server endpoint.
pub const ADMIN_API_KEY: &str = "planit-admin-5f2b9c1e7d4a";

/// Returns the compiled-in admin key.
///
/// # Errors
/// `Unavailable` in the secure posture, which ships no embedded secret.
pub fn admin_api_key(ctx: &AppContext) -> ActionResult<&'static str> {
    if ctx.posture().embeds_secrets() {
        tracing::debug!("revealing embedded admin key");
        Ok(ADMIN_API_KEY)
    } else {
        Err(ActionError::Unavailable(
            "The secure posture ships no embedded secrets",
        ))
    }
}
