//! Credentials presented by the API client.

use crate::utils::config::PLACEHOLDER_TOKEN;

/// API token. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    token: String,
}

impl Credentials {
    /// `None` for an empty or whitespace-only token
    pub fn from_token(token: &str) -> Option<Self> {
        let token = token.trim();
        if token.is_empty() {
            None
        } else {
            Some(Self {
                token: token.to_string(),
            })
        }
    }

    /// Credentials used while replaying; redaction makes their value irrelevant
    pub fn placeholder() -> Self {
        Self {
            token: PLACEHOLDER_TOKEN.to_string(),
        }
    }

    /// Value for the `Authorization` header
    pub fn authorization(&self) -> String {
        format!("token {}", self.token)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials").field("token", &"***").finish()
    }
}
