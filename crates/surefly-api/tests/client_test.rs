#![allow(clippy::unwrap_used)]
// Integration tests for `SureClient` using wiremock.

use std::time::Duration;

use secrecy::SecretString;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use surefly_api::transport::RetryPolicy;
use surefly_api::{ClientAuth, Credentials, Error, SureClient};

// ── Helpers ─────────────────────────────────────────────────────────

fn credentials() -> Credentials {
    Credentials::new("cat@example.com", SecretString::from("hunter2".to_owned()))
}

fn quick_retry() -> RetryPolicy {
    RetryPolicy {
        max_retries: 2,
        initial_backoff: Duration::from_millis(10),
    }
}

async fn client_with(server: &MockServer, auth: ClientAuth) -> SureClient {
    let api_url = Url::parse(&format!("{}/api", server.uri())).unwrap();
    SureClient::with_client(reqwest::Client::new(), api_url, quick_retry(), auth).unwrap()
}

fn login_response(token: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "data": { "token": token } }))
}

// ── Authentication ──────────────────────────────────────────────────

#[tokio::test]
async fn login_exchanges_credentials_for_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_string_contains("email_address=cat%40example.com"))
        .respond_with(login_response("fresh-token"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_with(&server, ClientAuth::Credentials(credentials())).await;
    let token = client.request_token().await.unwrap();

    assert_eq!(token, "fresh-token");
    assert_eq!(client.cached_token().await.as_deref(), Some("fresh-token"));
}

#[tokio::test]
async fn login_failure_surfaces_authentication_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": { "email_address": ["invalid"] }
        })))
        .mount(&server)
        .await;

    let client = client_with(&server, ClientAuth::Credentials(credentials())).await;
    let result = client.request_token().await;

    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication error, got: {result:?}"
    );
}

#[test]
fn empty_credentials_are_rejected() {
    let creds = Credentials::new("", SecretString::from("pw".to_owned()));
    let result = SureClient::with_client(
        reqwest::Client::new(),
        Url::parse("https://example.com/api").unwrap(),
        RetryPolicy::default(),
        ClientAuth::Credentials(creds),
    );
    assert!(matches!(result, Err(Error::Authentication { .. })));
}

// ── Token caching ───────────────────────────────────────────────────

#[tokio::test]
async fn token_is_cached_across_calls() {
    let server = MockServer::start().await;

    // The auth endpoint must be hit exactly once for two data calls.
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(login_response("cached-token"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/household"))
        .and(header("Authorization", "Bearer cached-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_with(&server, ClientAuth::Credentials(credentials())).await;
    client.list_households().await.unwrap();
    client.list_households().await.unwrap();
}

// ── Re-auth on 401 ──────────────────────────────────────────────────

#[tokio::test]
async fn expired_token_triggers_exactly_one_reauth() {
    let server = MockServer::start().await;

    // First data call is rejected once, then succeeds with the new token.
    Mock::given(method("GET"))
        .and(path("/api/household"))
        .and(header("Authorization", "Bearer stale-token"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(login_response("fresh-token"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/household"))
        .and(header("Authorization", "Bearer fresh-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "id": 1, "name": "Home" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let auth = ClientAuth::TokenWithCredentials {
        token: "stale-token".into(),
        credentials: credentials(),
    };
    let client = client_with(&server, auth).await;

    let households = client.list_households().await.unwrap();
    assert_eq!(households.len(), 1);
    assert_eq!(households[0].name.as_deref(), Some("Home"));
}

#[tokio::test]
async fn concurrent_401s_share_a_single_reauth() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/household"))
        .and(header("Authorization", "Bearer stale-token"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    // Single-flight: two simultaneous 401s must produce one login.
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(login_response("fresh-token"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/household"))
        .and(header("Authorization", "Bearer fresh-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .mount(&server)
        .await;

    let auth = ClientAuth::TokenWithCredentials {
        token: "stale-token".into(),
        credentials: credentials(),
    };
    let client = client_with(&server, auth).await;

    let (a, b) = tokio::join!(client.list_households(), client.list_households());
    a.unwrap();
    b.unwrap();
}

#[tokio::test]
async fn expired_token_without_credentials_is_authorization_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/household"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = client_with(&server, ClientAuth::Token("stale-token".into())).await;
    let result = client.list_households().await;

    assert!(
        matches!(result, Err(Error::Authorization { .. })),
        "expected Authorization error, got: {result:?}"
    );
}

// ── Lock control ────────────────────────────────────────────────────

#[tokio::test]
async fn set_lock_mode_echoes_applied_state() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/device/42/control"))
        .and(body_string_contains("\"locking\":3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "locking": 3 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_with(&server, ClientAuth::Token("valid-token".into())).await;
    let control = client.set_lock_mode(42, 3).await.unwrap();

    assert_eq!(control.locking, Some(3));
}

// ── Error mapping ───────────────────────────────────────────────────

#[tokio::test]
async fn non_2xx_maps_to_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/device"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .mount(&server)
        .await;

    let client = client_with(&server, ClientAuth::Token("valid-token".into())).await;
    let result = client.list_devices().await;

    match result {
        Err(Error::Api { status, ref message }) => {
            assert_eq!(status, 403);
            assert!(message.contains("forbidden"));
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_maps_to_deserialization_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/household"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = client_with(&server, ClientAuth::Token("valid-token".into())).await;
    let result = client.list_households().await;

    match result {
        Err(Error::Deserialization { ref body, .. }) => assert_eq!(body, "not json"),
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}

// ── Transient retry ─────────────────────────────────────────────────

#[tokio::test]
async fn timeout_is_retried_then_succeeds() {
    let server = MockServer::start().await;

    // First attempt stalls past the client timeout; the retry hits the
    // instant mock mounted after it.
    Mock::given(method("GET"))
        .and(path("/api/household"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(500))
                .set_body_json(json!({ "data": [] })),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/household"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let api_url = Url::parse(&format!("{}/api", server.uri())).unwrap();
    let http = reqwest::Client::builder()
        .timeout(Duration::from_millis(100))
        .build()
        .unwrap();
    let client = SureClient::with_client(
        http,
        api_url,
        quick_retry(),
        ClientAuth::Token("valid-token".into()),
    )
    .unwrap();

    client.list_households().await.unwrap();
}

// ── Pagination ──────────────────────────────────────────────────────

#[tokio::test]
async fn household_timeline_paginates() {
    let server = MockServer::start().await;

    let full_page: Vec<_> = (0..25)
        .map(|i| json!({ "id": i, "type": 0, "household_id": 9 }))
        .collect();

    Mock::given(method("GET"))
        .and(path("/api/timeline/household/9"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": full_page })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/timeline/household/9"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "id": 25, "type": 0, "household_id": 9 }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_with(&server, ClientAuth::Token("valid-token".into())).await;
    let entries = client.household_timeline(9, 30).await.unwrap();

    assert_eq!(entries.len(), 26);
}
