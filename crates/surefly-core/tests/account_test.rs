#![allow(clippy::unwrap_used)]
// Integration tests for the `Account` facade using wiremock.

use serde_json::json;
use url::Url;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use surefly_api::transport::RetryPolicy;
use surefly_api::{ClientAuth, SureClient};
use surefly_core::{Account, CoreError, Entity, EntityId, Location};

// ── Helpers ─────────────────────────────────────────────────────────

fn account_with_token(server: &MockServer) -> Account {
    let api_url = Url::parse(&format!("{}/api", server.uri())).unwrap();
    let client = SureClient::with_client(
        reqwest::Client::new(),
        api_url,
        RetryPolicy::default(),
        ClientAuth::Token("valid-token".into()),
    )
    .unwrap();
    Account::with_client(client)
}

/// One household, one pet, one flap -- the canonical fixture.
fn me_start_fixture() -> serde_json::Value {
    json!({
        "data": {
            "households": [{ "id": 2, "name": "Home", "timezone_id": 340 }],
            "pets": [{
                "id": 7,
                "name": "Mia",
                "household_id": 2,
                "position": { "where": 1, "since": "2024-06-15T10:30:00+00:00" }
            }],
            "devices": [{
                "id": 42,
                "product_id": 6,
                "household_id": 2,
                "name": "Back Door",
                "status": { "online": true, "battery": 6.0, "locking": { "mode": 0 } }
            }]
        }
    })
}

// ── Entity merge ────────────────────────────────────────────────────

#[tokio::test]
async fn entities_merges_pets_and_devices_keyed_by_id() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/me/start"))
        .respond_with(ResponseTemplate::new(200).set_body_json(me_start_fixture()))
        .expect(1)
        .mount(&server)
        .await;

    let account = account_with_token(&server);
    let entities = account.entities().await.unwrap();

    assert_eq!(entities.len(), 2);

    let pet = entities
        .get(&EntityId(7))
        .and_then(Entity::as_pet)
        .expect("pet entity");
    assert_eq!(pet.name.as_deref(), Some("Mia"));
    assert!(pet.at_home());

    let flap = entities
        .get(&EntityId(42))
        .and_then(Entity::as_device)
        .expect("flap entity");
    assert!(flap.is_flap());
    assert_eq!(flap.household_id, Some(EntityId(2)));

    // The flap's household reference resolves to the household entity.
    Mock::given(method("GET"))
        .and(path("/api/household"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "id": 2, "name": "Home" }]
        })))
        .mount(&server)
        .await;

    let households = account.households().await.unwrap();
    let household = households
        .iter()
        .find(|h| Some(h.id) == flap.household_id)
        .expect("flap household");
    assert_eq!(household.name.as_deref(), Some("Home"));
}

// ── Lock control ────────────────────────────────────────────────────

#[tokio::test]
async fn lock_verifies_echoed_state() {
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

    let account = account_with_token(&server);
    account.lock(EntityId(42)).await.unwrap();
}

#[tokio::test]
async fn locking_an_already_locked_flap_is_a_noop_success() {
    let server = MockServer::start().await;

    // The vendor echoes the (unchanged) state; exactly one request.
    Mock::given(method("PUT"))
        .and(path("/api/device/42/control"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "locking": 3 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let account = account_with_token(&server);
    account.lock(EntityId(42)).await.unwrap();
}

#[tokio::test]
async fn unapplied_lock_state_is_operation_failed() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/device/42/control"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "locking": 0 }
        })))
        .mount(&server)
        .await;

    let account = account_with_token(&server);
    let result = account.lock(EntityId(42)).await;

    assert!(
        matches!(result, Err(CoreError::OperationFailed { .. })),
        "expected OperationFailed, got: {result:?}"
    );
}

// ── Pet position ────────────────────────────────────────────────────

#[tokio::test]
async fn set_position_verifies_echoed_state() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/pet/7/position"))
        .and(body_string_contains("\"where\":2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "where": 2, "since": "2024-06-15 10:30:58" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let account = account_with_token(&server);
    account
        .set_position(EntityId(7), Location::Outside)
        .await
        .unwrap();
}

#[tokio::test]
async fn set_position_rejects_unknown() {
    let server = MockServer::start().await;
    let account = account_with_token(&server);

    let result = account.set_position(EntityId(7), Location::Unknown).await;

    assert!(
        matches!(result, Err(CoreError::ValidationFailed { .. })),
        "expected ValidationFailed, got: {result:?}"
    );
}

// ── Lookups ─────────────────────────────────────────────────────────

#[tokio::test]
async fn missing_pet_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/pet"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .mount(&server)
        .await;

    let account = account_with_token(&server);
    let result = account.pet(EntityId(404)).await;

    match result {
        Err(CoreError::NotFound {
            ref entity_type, ..
        }) => assert_eq!(entity_type, "pet"),
        other => panic!("expected NotFound, got: {other:?}"),
    }
}

// ── Token caching through the facade ────────────────────────────────

#[tokio::test]
async fn consecutive_facade_calls_reuse_the_token() {
    let server = MockServer::start().await;

    // Two facade calls, at most one login.
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "token": "fresh-token" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/household"))
        .and(header("Authorization", "Bearer fresh-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(2)
        .mount(&server)
        .await;

    let api_url = Url::parse(&format!("{}/api", server.uri())).unwrap();
    let client = SureClient::with_client(
        reqwest::Client::new(),
        api_url,
        RetryPolicy::default(),
        ClientAuth::Credentials(surefly_api::Credentials::new(
            "cat@example.com",
            secrecy::SecretString::from("hunter2".to_owned()),
        )),
    )
    .unwrap();
    let account = Account::with_client(client);

    account.households().await.unwrap();
    account.households().await.unwrap();
}
