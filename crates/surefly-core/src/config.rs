// ── Account configuration ──

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use url::Url;

use surefly_api::transport::{RetryPolicy, TransportConfig};
use surefly_api::{ClientAuth, Credentials};

/// Credentials for the vendor account.
#[derive(Debug, Clone)]
pub enum AuthCredentials {
    /// Use an existing bearer token as-is.
    Token(SecretString),
    /// Login with email/password on first use.
    Credentials {
        email: String,
        password: SecretString,
    },
    /// Start from a token, refresh via credentials when it expires.
    TokenWithCredentials {
        token: SecretString,
        email: String,
        password: SecretString,
    },
}

/// Configuration for an [`Account`](crate::Account).
#[derive(Debug, Clone)]
pub struct AccountConfig {
    pub auth: AuthCredentials,
    /// API root override; `None` uses the production endpoint.
    pub api_url: Option<Url>,
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl AccountConfig {
    pub fn new(auth: AuthCredentials) -> Self {
        Self {
            auth,
            api_url: None,
            timeout: Duration::from_secs(45),
            retry: RetryPolicy::default(),
        }
    }

    pub(crate) fn transport(&self) -> TransportConfig {
        let mut transport = TransportConfig {
            timeout: self.timeout,
            retry: self.retry,
            ..TransportConfig::default()
        };
        if let Some(ref url) = self.api_url {
            transport.api_url = url.clone();
        }
        transport
    }

    pub(crate) fn client_auth(&self) -> ClientAuth {
        match &self.auth {
            AuthCredentials::Token(token) => {
                ClientAuth::Token(token.expose_secret().to_owned())
            }
            AuthCredentials::Credentials { email, password } => {
                ClientAuth::Credentials(Credentials::new(email.clone(), password.clone()))
            }
            AuthCredentials::TokenWithCredentials {
                token,
                email,
                password,
            } => ClientAuth::TokenWithCredentials {
                token: token.expose_secret().to_owned(),
                credentials: Credentials::new(email.clone(), password.clone()),
            },
        }
    }
}
