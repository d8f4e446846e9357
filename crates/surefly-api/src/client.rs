// Cloud API HTTP client
//
// Wraps `reqwest::Client` with vendor-specific URL construction, the
// `{ data: ... }` envelope, bounded transient retry, and the token
// lifecycle (cache + single-flight refresh). All endpoint modules
// (pets, devices, etc.) are implemented as inherent methods via
// separate files to keep this module focused on transport mechanics.

use reqwest::{Method, StatusCode, header::AUTHORIZATION};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, warn};
use url::Url;
use uuid::Uuid;

use crate::auth::{ClientAuth, Credentials, LoginRequest, TokenData};
use crate::error::Error;
use crate::models::Envelope;
use crate::transport::{RetryPolicy, TransportConfig};

/// Raw HTTP client for the Sure Petcare cloud API.
///
/// Handles the `{ data: ... }` envelope, bearer-token attachment, and
/// the auth lifecycle: the token is cached in memory for the client's
/// lifetime and refreshed at most once per request on a 401. Concurrent
/// 401s share a single refresh (single-flight guard). All methods
/// return unwrapped `data` payloads -- the envelope is stripped before
/// the caller sees it.
pub struct SureClient {
    http: reqwest::Client,
    api_url: Url,
    retry: RetryPolicy,
    /// Random per-client device id, sent with every request and with login.
    device_id: String,
    credentials: Option<Credentials>,
    token: RwLock<Option<String>>,
    /// Serializes token refresh so concurrent 401s trigger one login.
    refresh_guard: Mutex<()>,
}

impl SureClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// Credentials, when present, must be non-empty; a supplied token is
    /// accepted as-is and only validated by the API on first use.
    pub fn new(auth: ClientAuth, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::with_client(http, transport.api_url.clone(), transport.retry, auth)
    }

    /// Create a client with a pre-built `reqwest::Client`.
    ///
    /// Use this when you need full control over the HTTP client, e.g.
    /// in tests against a local mock server.
    pub fn with_client(
        http: reqwest::Client,
        api_url: Url,
        retry: RetryPolicy,
        auth: ClientAuth,
    ) -> Result<Self, Error> {
        let (token, credentials) = auth.into_parts();

        if let Some(ref credentials) = credentials {
            if credentials.email.is_empty() || credentials.password.expose_secret().is_empty() {
                return Err(Error::Authentication {
                    message: "email and password must be non-empty".into(),
                });
            }
        }

        Ok(Self {
            http,
            api_url,
            retry,
            device_id: Uuid::new_v4().to_string(),
            credentials,
            token: RwLock::new(token),
            refresh_guard: Mutex::new(()),
        })
    }

    /// The API root URL.
    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    /// The random device id this client identifies itself with.
    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// The currently cached bearer token, if any.
    pub async fn cached_token(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Build a full URL for an API path, e.g. `endpoint("me/start")`.
    pub(crate) fn endpoint(&self, path: &str) -> Url {
        let full = format!("{}/{}", self.api_url.as_str().trim_end_matches('/'), path);
        Url::parse(&full).expect("invalid endpoint URL")
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and unwrap the `data` envelope.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        self.request_data(Method::GET, url, None).await
    }

    /// Send a POST request with JSON body and unwrap the `data` envelope.
    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        url: Url,
        body: serde_json::Value,
    ) -> Result<T, Error> {
        self.request_data(Method::POST, url, Some(body)).await
    }

    /// Send a PUT request with JSON body and unwrap the `data` envelope.
    pub(crate) async fn put<T: DeserializeOwned>(
        &self,
        url: Url,
        body: serde_json::Value,
    ) -> Result<T, Error> {
        self.request_data(Method::PUT, url, Some(body)).await
    }

    /// Send a PUT request, discarding any response payload.
    pub(crate) async fn put_no_content(&self, url: Url) -> Result<(), Error> {
        let _ = self.dispatch(&Method::PUT, &url, None).await?;
        Ok(())
    }

    /// Send a DELETE request. The API answers `204 No Content`.
    pub(crate) async fn delete_no_content(&self, url: Url) -> Result<(), Error> {
        let _ = self.dispatch(&Method::DELETE, &url, None).await?;
        Ok(())
    }

    async fn request_data<T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        body: Option<serde_json::Value>,
    ) -> Result<T, Error> {
        let resp = self.dispatch(&method, &url, body.as_ref()).await?;
        let body = resp.text().await.map_err(Error::Transport)?;

        let envelope: Envelope<T> =
            serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body,
            })?;

        Ok(envelope.data)
    }

    /// Send the request, returning a response with a success status.
    ///
    /// Handles the auth lifecycle: acquires a token first (logging in if
    /// necessary), and on a 401 refreshes the token through the
    /// credentials exactly once before giving up with
    /// [`Error::Authorization`].
    async fn dispatch(
        &self,
        method: &Method,
        url: &Url,
        body: Option<&serde_json::Value>,
    ) -> Result<reqwest::Response, Error> {
        let mut refreshed = false;

        loop {
            let token = self.ensure_token().await?;
            let resp = self.send_with_retry(method, url, body, &token).await?;
            let status = resp.status();

            if status == StatusCode::UNAUTHORIZED {
                if !refreshed && self.credentials.is_some() {
                    debug!(%url, "token rejected, attempting one re-authentication");
                    self.refresh_token(Some(&token)).await?;
                    refreshed = true;
                    continue;
                }
                return Err(Error::Authorization {
                    message: "bearer token rejected by the API".into(),
                });
            }

            if !status.is_success() {
                let message = resp.text().await.unwrap_or_default();
                let message = if message.is_empty() {
                    status
                        .canonical_reason()
                        .unwrap_or("unexpected status")
                        .to_owned()
                } else {
                    message
                };
                return Err(Error::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            debug!(%method, path = url.path(), %status, "request completed");
            return Ok(resp);
        }
    }

    /// Send one HTTP request, retrying transient network failures a
    /// bounded number of times with doubling backoff. HTTP error
    /// statuses are never retried here.
    async fn send_with_retry(
        &self,
        method: &Method,
        url: &Url,
        body: Option<&serde_json::Value>,
        token: &str,
    ) -> Result<reqwest::Response, Error> {
        let mut delay = self.retry.initial_backoff;
        let mut attempt: u32 = 0;

        loop {
            let mut req = self
                .http
                .request(method.clone(), url.clone())
                .header(AUTHORIZATION, format!("Bearer {token}"))
                .header("X-Device-Id", &self.device_id);
            if let Some(body) = body {
                req = req.json(body);
            }

            match req.send().await {
                Ok(resp) => return Ok(resp),
                Err(e) if attempt < self.retry.max_retries && (e.is_timeout() || e.is_connect()) => {
                    attempt += 1;
                    warn!(%url, error = %e, attempt, "transient failure, retrying");
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
                Err(e) if e.is_timeout() => return Err(Error::Timeout { attempts: attempt + 1 }),
                Err(e) => return Err(Error::Transport(e)),
            }
        }
    }

    // ── Token lifecycle ──────────────────────────────────────────────

    /// Return the cached token, logging in first if there is none yet.
    async fn ensure_token(&self) -> Result<String, Error> {
        if let Some(token) = self.token.read().await.clone() {
            return Ok(token);
        }
        self.refresh_token(None).await
    }

    /// Replace the cached token via a credential login, single-flight.
    ///
    /// `stale` is the token the caller saw fail. A waiter that acquires
    /// the guard after another task already refreshed finds a different
    /// cached token and reuses it instead of logging in again.
    async fn refresh_token(&self, stale: Option<&str>) -> Result<String, Error> {
        let _guard = self.refresh_guard.lock().await;

        {
            let current = self.token.read().await;
            if let Some(current) = current.as_deref() {
                if stale != Some(current) {
                    return Ok(current.to_owned());
                }
            }
        }

        let Some(credentials) = self.credentials.as_ref() else {
            return Err(match stale {
                None => Error::Authentication {
                    message: "no token or credentials configured".into(),
                },
                Some(_) => Error::Authorization {
                    message: "token expired and no credentials available to refresh it".into(),
                },
            });
        };

        let token = self.login(credentials).await?;
        *self.token.write().await = Some(token.clone());
        Ok(token)
    }

    /// Force a fresh credential login, replacing any cached token.
    ///
    /// Used by `surefly token`; normal requests go through the cache.
    pub async fn request_token(&self) -> Result<String, Error> {
        let _guard = self.refresh_guard.lock().await;

        let Some(credentials) = self.credentials.as_ref() else {
            return Err(Error::Authentication {
                message: "credentials required to request a token".into(),
            });
        };

        let token = self.login(credentials).await?;
        *self.token.write().await = Some(token.clone());
        Ok(token)
    }

    /// Exchange credentials for a bearer token.
    ///
    /// `POST /api/auth/login` with `email_address`, `password`, and the
    /// client's device id as a form payload.
    async fn login(&self, credentials: &Credentials) -> Result<String, Error> {
        let url = self.endpoint("auth/login");
        debug!(email = %credentials.email, "logging in");

        let payload = LoginRequest {
            email_address: &credentials.email,
            password: credentials.password.expose_secret(),
            device_id: &self.device_id,
        };

        let resp = self
            .http
            .post(url)
            .header("X-Device-Id", &self.device_id)
            .form(&payload)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();

        if status == StatusCode::UNAUTHORIZED {
            return Err(Error::Authentication {
                message: "invalid email or password".into(),
            });
        }

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                message: format!("login failed: {body}"),
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;
        let envelope: Envelope<TokenData> =
            serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body,
            })?;

        debug!("login successful");
        Ok(envelope.data.token)
    }
}
