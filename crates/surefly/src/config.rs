//! CLI configuration — thin wrapper around `surefly_config` shared types.
//!
//! Re-exports the shared types and adds CLI-specific resolution that
//! respects `GlobalOpts` flag overrides (--token, --email, ...).

use std::time::Duration;

use secrecy::SecretString;

use surefly_core::{AccountConfig, AuthCredentials};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use surefly_config::{
    Config, Profile, config_path, load_config_or_default, save_config, save_token, token_path,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Build an `AccountConfig` from the config file, profile, and CLI
/// flag overrides. Flags (which clap also fills from env vars) take
/// priority over the profile's discovery chain.
pub fn build_account_config(global: &GlobalOpts) -> Result<AccountConfig, CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);

    // An explicitly requested profile must exist; the implicit default
    // may be absent (flags/env alone can be enough).
    let fallback = Profile::default();
    let profile = match cfg.profiles.get(&profile_name) {
        Some(profile) => profile,
        None if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound { name: profile_name });
        }
        None => &fallback,
    };

    // 1. Token (flag/env > profile discovery chain)
    let token = global
        .token
        .clone()
        .or_else(|| surefly_config::resolve_token(profile, &profile_name));

    // 2. Credentials (flags/env > profile discovery chain)
    let credentials = match (&global.email, &global.password) {
        (Some(email), Some(password)) => {
            Some((email.clone(), SecretString::from(password.clone())))
        }
        _ => surefly_config::resolve_credentials(profile, &profile_name),
    };

    let auth = match (token, credentials) {
        (Some(token), Some((email, password))) => AuthCredentials::TokenWithCredentials {
            token: SecretString::from(token),
            email,
            password,
        },
        (Some(token), None) => AuthCredentials::Token(SecretString::from(token)),
        (None, Some((email, password))) => AuthCredentials::Credentials { email, password },
        (None, None) => return Err(CliError::NoCredentials),
    };

    let mut account_config = AccountConfig::new(auth);
    account_config.timeout = Duration::from_secs(global.timeout);

    // 3. API root override (hidden flag > profile)
    let api_url = global.api_url.clone().or_else(|| profile.api_url.clone());
    if let Some(api_url) = api_url {
        let url: url::Url = api_url.parse().map_err(|_| CliError::Validation {
            field: "api-url".into(),
            reason: format!("invalid URL: {api_url}"),
        })?;
        account_config.api_url = Some(url);
    }

    Ok(account_config)
}

/// Like [`build_account_config`], but requires email + password to be
/// resolvable -- the `token` command cannot run on a bare token.
pub fn build_credential_config(global: &GlobalOpts) -> Result<AccountConfig, CliError> {
    let config = build_account_config(global)?;
    if matches!(config.auth, AuthCredentials::Token(_)) {
        return Err(CliError::Validation {
            field: "credentials".into(),
            reason: "the token command needs --email and --password".into(),
        });
    }
    Ok(config)
}
