// Credential types and the token shape check.
//
// The actual login call lives on `SureClient` (endpoints/login is part
// of the request loop because of the single-flight refresh guard).

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Email/password pair for the vendor account.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: SecretString) -> Self {
        Self {
            email: email.into(),
            password,
        }
    }
}

/// How a client authenticates against the API.
///
/// A bare token works until it expires; credentials allow the client to
/// (re-)login on demand. With both, the token is used first and
/// refreshed through the credentials when the API rejects it.
#[derive(Debug, Clone)]
pub enum ClientAuth {
    /// Use an existing bearer token as-is. No refresh possible.
    Token(String),
    /// Login with credentials on first use.
    Credentials(Credentials),
    /// Start from an existing token, refresh via credentials on 401.
    TokenWithCredentials {
        token: String,
        credentials: Credentials,
    },
}

impl ClientAuth {
    pub(crate) fn into_parts(self) -> (Option<String>, Option<Credentials>) {
        match self {
            Self::Token(token) => (Some(token), None),
            Self::Credentials(credentials) => (None, Some(credentials)),
            Self::TokenWithCredentials { token, credentials } => {
                (Some(token), Some(credentials))
            }
        }
    }
}

/// Check the shape of an API token: printable ASCII in the length band
/// the vendor issues. Used by the credential discovery chain to skip
/// obviously-corrupt tokens; a token passed explicitly is used as-is.
pub fn token_seems_valid(token: &str) -> bool {
    token.len() > 320
        && token.len() < 448
        && token
            .chars()
            .all(|c| c.is_ascii() && !c.is_ascii_control())
}

// ── Wire types ───────────────────────────────────────────────────────

/// Form payload for `POST /api/auth/login`.
#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email_address: &'a str,
    pub password: &'a str,
    pub device_id: &'a str,
}

/// `data` payload of a successful login response.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenData {
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_shape_accepts_vendor_length() {
        let token = "a".repeat(360);
        assert!(token_seems_valid(&token));
    }

    #[test]
    fn token_shape_rejects_short_and_long() {
        assert!(!token_seems_valid("short"));
        assert!(!token_seems_valid(&"a".repeat(500)));
    }

    #[test]
    fn token_shape_rejects_control_chars() {
        let mut token = "a".repeat(360);
        token.push('\n');
        assert!(!token_seems_valid(&token));
    }
}
