//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable
//! help text.

use miette::Diagnostic;
use thiserror::Error;

use surefly_core::CoreError;

/// Exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not reach the Sure Petcare API")]
    #[diagnostic(
        code(surefly::connection_failed),
        help("Check your network connection. Reason: {reason}")
    )]
    ConnectionFailed { reason: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(surefly::timeout),
        help("Increase the timeout with --timeout or try again later.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────

    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(surefly::auth_failed),
        help(
            "Verify your email and password, or fetch a fresh token with:\n\
             surefly token --save"
        )
    )]
    AuthFailed { message: String },

    #[error("No token or credentials configured")]
    #[diagnostic(
        code(surefly::no_credentials),
        help(
            "Pass --token / --email / --password, set SUREFLY_TOKEN, or\n\
             create a profile with: surefly config init"
        )
    )]
    NoCredentials,

    // ── Resources ────────────────────────────────────────────────────

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(surefly::not_found),
        help("Run: surefly {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── API ──────────────────────────────────────────────────────────

    #[error("API error: {message}")]
    #[diagnostic(code(surefly::api_error))]
    ApiError { message: String },

    #[error("The API returned an unexpected response: {message}")]
    #[diagnostic(
        code(surefly::malformed_response),
        help("The vendor may have changed the API; try updating surefly.")
    )]
    MalformedResponse { message: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(surefly::validation))]
    Validation { field: String, reason: String },

    // ── Operations ───────────────────────────────────────────────────

    #[error("{message}")]
    #[diagnostic(
        code(surefly::operation_failed),
        help("The device may be offline or busy; check it and retry.")
    )]
    OperationFailed { message: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(surefly::profile_not_found),
        help("Create one with: surefly config init")
    )]
    ProfileNotFound { name: String },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(surefly::config))]
    Config { message: String },

    // ── Interactive ──────────────────────────────────────────────────

    #[error("'{action}' requires confirmation")]
    #[diagnostic(
        code(surefly::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    ConfirmationRequired { action: String },

    // ── IO / Serialization ───────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(surefly::json))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::AuthFailed { .. } | Self::NoCredentials => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::ConfirmationRequired { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::AuthenticationFailed { message }
            | CoreError::AuthorizationFailed { message } => CliError::AuthFailed { message },

            CoreError::ConnectionFailed { reason } => CliError::ConnectionFailed { reason },

            CoreError::Timeout => CliError::Timeout,

            CoreError::NotFound {
                entity_type,
                identifier,
            } => CliError::NotFound {
                list_command: format!("{entity_type}s list"),
                resource_type: entity_type,
                identifier,
            },

            CoreError::MalformedResponse { message } => CliError::MalformedResponse { message },

            CoreError::ValidationFailed { message } => CliError::Validation {
                field: "input".into(),
                reason: message,
            },

            CoreError::OperationFailed { message } => CliError::OperationFailed { message },

            CoreError::Api { message, status } => CliError::ApiError {
                message: match status {
                    Some(status) => format!("{message} (HTTP {status})"),
                    None => message,
                },
            },

            CoreError::Config { message } => CliError::Config { message },

            CoreError::Internal(message) => CliError::ApiError { message },
        }
    }
}

impl From<surefly_config::ConfigError> for CliError {
    fn from(err: surefly_config::ConfigError) -> Self {
        match err {
            surefly_config::ConfigError::NoCredentials { .. } => CliError::NoCredentials,
            other => CliError::Config {
                message: other.to_string(),
            },
        }
    }
}
