//! Security posture of the client.
//!
//! The same client runs either as the hardened build or as the deliberately
//! vulnerable teaching build. Every behavior that differs between the two
//! asks the posture instead of branching on ad-hoc flags.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Posture {
    /// Bearer tokens in restricted storage, parameterized search, no stored passwords.
    #[default]
    Secure,
    /// Plaintext credentials, client-supplied `user_id`, raw search strings.
    Vulnerable,
}

impl Posture {
    /// Returns all postures for iteration (e.g., in help output).
    pub fn all() -> &'static [Posture] {
        &[Posture::Secure, Posture::Vulnerable]
    }

    /// Returns the short display name for this posture.
    pub fn display_name(&self) -> &'static str {
        match self {
            Posture::Secure => "secure",
            Posture::Vulnerable => "vulnerable",
        }
    }

    /// Whether "remember me" also persists the password.
    pub fn remembers_password(&self) -> bool {
        matches!(self, Posture::Vulnerable)
    }

    /// Whether identity travels as a bearer token rather than a raw `user_id`.
    pub fn uses_bearer_token(&self) -> bool {
        matches!(self, Posture::Secure)
    }

    /// Whether search queries are trimmed and percent-encoded.
    pub fn encodes_search_query(&self) -> bool {
        matches!(self, Posture::Secure)
    }

    /// Whether raw server error bodies are shown to the user.
    pub fn exposes_server_errors(&self) -> bool {
        matches!(self, Posture::Vulnerable)
    }

    /// Whether the build carries a hardcoded admin key.
    pub fn embeds_secrets(&self) -> bool {
        matches!(self, Posture::Vulnerable)
    }

    /// Whether credentials and event fields are trimmed before sending.
    pub fn trims_credentials(&self) -> bool {
        matches!(self, Posture::Secure)
    }
}

impl fmt::Display for Posture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Posture {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "secure" | "fixed" => Ok(Posture::Secure),
            "vulnerable" | "insecure" => Ok(Posture::Vulnerable),
            other => anyhow::bail!("Unknown posture '{other}' (expected 'secure' or 'vulnerable')"),
        }
    }
}
