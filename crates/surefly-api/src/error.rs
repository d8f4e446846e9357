use thiserror::Error;

/// Top-level error type for the `surefly-api` crate.
///
/// Covers every failure mode of the cloud API surface: credential
/// exchange, transport, vendor error responses, and payload decoding.
/// `surefly-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Login failed (wrong credentials, account locked, etc.)
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// Token rejected after the single re-authentication attempt,
    /// or no credentials were available to refresh it.
    #[error("Authorization failed: {message}")]
    Authorization { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request timed out, including all retry attempts.
    #[error("Request timed out after {attempts} attempt(s)")]
    Timeout { attempts: u32 },

    // ── API ─────────────────────────────────────────────────────────
    /// Non-2xx response from the vendor API, with whatever body it sent.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this error indicates the bearer token has
    /// expired and re-authentication might resolve it.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::Authorization { .. })
    }

    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Timeout { .. } => true,
            _ => false,
        }
    }
}
