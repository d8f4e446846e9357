//! Shared configuration for the surefly CLI.
//!
//! TOML profiles, credential resolution (env + keyring + token file +
//! plaintext), and translation to `surefly_core::AccountConfig`. The
//! CLI adds flag-aware wrappers on top.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use surefly_api::token_seems_valid;
use surefly_core::{AccountConfig, AuthCredentials};

/// Environment variable holding a bearer token.
pub const TOKEN_ENV: &str = "SUREFLY_TOKEN";
/// Environment variables holding account credentials.
pub const EMAIL_ENV: &str = "SUREFLY_EMAIL";
pub const PASSWORD_ENV: &str = "SUREFLY_PASSWORD";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no credentials configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named account profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_timeout() -> u64 {
    45
}

/// A named account profile.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Profile {
    /// Account email for credential login.
    pub email: Option<String>,

    /// Account password (plaintext — prefer keyring or env var).
    pub password: Option<String>,

    /// Bearer token (plaintext — prefer the token file or env var).
    pub token: Option<String>,

    /// API root override (tests, self-hosted mirrors).
    pub api_url: Option<String>,

    /// Override timeout in seconds.
    pub timeout: Option<u64>,
}

// ── Paths ───────────────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Resolve the token file path (written by `surefly token`).
pub fn token_path() -> PathBuf {
    config_dir().join("token")
}

fn config_dir() -> PathBuf {
    ProjectDirs::from("com", "surefly", "surefly").map_or_else(dirs_fallback, |dirs| {
        dirs.config_dir().to_path_buf()
    })
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("surefly");
    p
}

// ── Config loading / saving ─────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(config_path()))
        .merge(Env::prefixed("SUREFLY_CONFIG_").split("_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(())
}

// ── Token file ──────────────────────────────────────────────────────

/// Read the saved token, if it exists and still looks like a token.
pub fn load_saved_token() -> Option<String> {
    load_saved_token_from(&token_path())
}

fn load_saved_token_from(path: &PathBuf) -> Option<String> {
    let token = std::fs::read_to_string(path).ok()?;
    let token = token.trim().to_owned();
    token_seems_valid(&token).then_some(token)
}

/// Persist a token to the token file, keeping the previous one as
/// `token.old` so a still-valid session can be recovered.
pub fn save_token(token: &str) -> Result<PathBuf, ConfigError> {
    save_token_to(&token_path(), token)
}

fn save_token_to(path: &PathBuf, token: &str) -> Result<PathBuf, ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    if let Ok(previous) = std::fs::read_to_string(path) {
        if previous != token {
            std::fs::write(path.with_extension("old"), previous)?;
        }
    }
    std::fs::write(path, token)?;
    Ok(path.clone())
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve a bearer token from the discovery chain (no CLI flag step):
/// env var, keyring, token file, plaintext profile. Tokens from the
/// chain are shape-checked; corrupt ones are skipped.
pub fn resolve_token(profile: &Profile, profile_name: &str) -> Option<String> {
    // 1. Environment
    if let Ok(token) = std::env::var(TOKEN_ENV) {
        if token_seems_valid(&token) {
            return Some(token);
        }
    }

    // 2. System keyring
    if let Ok(entry) = keyring::Entry::new("surefly", &format!("{profile_name}/token")) {
        if let Ok(token) = entry.get_password() {
            if token_seems_valid(&token) {
                return Some(token);
            }
        }
    }

    // 3. Token file
    if let Some(token) = load_saved_token() {
        return Some(token);
    }

    // 4. Plaintext in config
    profile.token.clone()
}

/// Resolve email + password without CLI flags: env, keyring, plaintext.
pub fn resolve_credentials(
    profile: &Profile,
    profile_name: &str,
) -> Option<(String, SecretString)> {
    let email = profile
        .email
        .clone()
        .or_else(|| std::env::var(EMAIL_ENV).ok())?;

    // 1. Env var
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        return Some((email, SecretString::from(pw)));
    }

    // 2. Keyring
    if let Ok(entry) = keyring::Entry::new("surefly", &format!("{profile_name}/password")) {
        if let Ok(pw) = entry.get_password() {
            return Some((email, SecretString::from(pw)));
        }
    }

    // 3. Plaintext in config
    profile
        .password
        .as_ref()
        .map(|pw| (email, SecretString::from(pw.clone())))
}

/// Resolve `AuthCredentials` from the full discovery chain.
///
/// A token alone works until it expires; credentials alone login on
/// first use; with both, the token is tried first and refreshed through
/// the credentials on 401.
pub fn resolve_auth(profile: &Profile, profile_name: &str) -> Result<AuthCredentials, ConfigError> {
    let token = resolve_token(profile, profile_name);
    let credentials = resolve_credentials(profile, profile_name);

    match (token, credentials) {
        (Some(token), Some((email, password))) => Ok(AuthCredentials::TokenWithCredentials {
            token: SecretString::from(token),
            email,
            password,
        }),
        (Some(token), None) => Ok(AuthCredentials::Token(SecretString::from(token))),
        (None, Some((email, password))) => Ok(AuthCredentials::Credentials { email, password }),
        (None, None) => Err(ConfigError::NoCredentials {
            profile: profile_name.into(),
        }),
    }
}

/// Build an `AccountConfig` from a profile — no CLI flag overrides.
pub fn profile_to_account_config(
    profile: &Profile,
    profile_name: &str,
) -> Result<AccountConfig, ConfigError> {
    let auth = resolve_auth(profile, profile_name)?;
    let mut config = AccountConfig::new(auth);

    if let Some(ref api_url) = profile.api_url {
        let url: url::Url = api_url.parse().map_err(|_| ConfigError::Validation {
            field: "api_url".into(),
            reason: format!("invalid URL: {api_url}"),
        })?;
        config.api_url = Some(url);
    }

    if let Some(timeout) = profile.timeout {
        config.timeout = Duration::from_secs(timeout);
    }

    Ok(config)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn save_token_backs_up_the_previous_one() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token");

        save_token_to(&path, &"a".repeat(360)).unwrap();
        save_token_to(&path, &"b".repeat(360)).unwrap();

        let current = std::fs::read_to_string(&path).unwrap();
        let backup = std::fs::read_to_string(path.with_extension("old")).unwrap();
        assert_eq!(current, "b".repeat(360));
        assert_eq!(backup, "a".repeat(360));
    }

    #[test]
    fn saved_token_is_shape_checked_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token");

        std::fs::write(&path, "corrupt").unwrap();
        assert!(load_saved_token_from(&path).is_none());

        std::fs::write(&path, format!("{}\n", "a".repeat(360))).unwrap();
        assert_eq!(load_saved_token_from(&path), Some("a".repeat(360)));
    }

    #[test]
    fn profile_overrides_map_into_account_config() {
        let profile = Profile {
            token: Some("plaintext-token".into()),
            api_url: Some("https://mirror.example.com/api".into()),
            timeout: Some(10),
            ..Profile::default()
        };

        // Plaintext token is the last resort but still resolves.
        let config = profile_to_account_config(&profile, "test").unwrap();
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert!(config.api_url.is_some());
    }
}
