use reqwest::Method;
use reqwest::header::AUTHORIZATION;
use std::sync::Arc;

use eventman_client::api::ApiError;
use eventman_client::auth::{AuthBackendState, MockAuthBackend};
use eventman_client::models::{EmailVerification, LoginResponse, VerificationResponse};
use eventman_client::storage::{MemoryStorage, StorageState};
use eventman_client::{Client, ClientConfig};

// --- Fixtures ---

fn test_client() -> Client {
    let storage: StorageState = Arc::new(MemoryStorage::new());
    let backend: AuthBackendState = Arc::new(MockAuthBackend::succeeding(LoginResponse {
        id: 1,
        email: "admin@eventman.com".to_string(),
        name: "System Administrator".to_string(),
        roles: vec!["ROLE_ADMIN".to_string()],
        token: "bearer-me".to_string(),
    }));
    Client::with_collaborators(ClientConfig::default(), backend, storage)
}

// --- Request construction ---

#[tokio::test]
async fn unauthenticated_requests_carry_no_credential() {
    let client = test_client();
    let request = client
        .api
        .request(Method::GET, "/api/events")
        .build()
        .expect("request builds");

    assert!(request.headers().get(AUTHORIZATION).is_none());
    assert_eq!(request.url().path(), "/api/events");
}

#[tokio::test]
async fn authenticated_requests_attach_the_stored_bearer_token() {
    let client = test_client();
    client
        .session
        .login("admin@eventman.com", "password")
        .await
        .expect("login");

    let request = client
        .api
        .request(Method::POST, "/api/events")
        .build()
        .expect("request builds");

    let auth = request
        .headers()
        .get(AUTHORIZATION)
        .expect("credential attached")
        .to_str()
        .unwrap();
    assert_eq!(auth, "Bearer bearer-me");
}

#[tokio::test]
async fn logout_strips_the_credential_from_new_requests() {
    let client = test_client();
    client
        .session
        .login("admin@eventman.com", "password")
        .await
        .expect("login");
    client.session.logout();

    let request = client
        .api
        .request(Method::GET, "/api/payments")
        .build()
        .expect("request builds");

    // Sent unauthenticated; the backend, not this layer, rejects it.
    assert!(request.headers().get(AUTHORIZATION).is_none());
}

#[tokio::test]
async fn request_paths_resolve_against_the_configured_base() {
    let storage: StorageState = Arc::new(MemoryStorage::new());
    let backend: AuthBackendState = Arc::new(MockAuthBackend::rejecting("unused"));
    let config = ClientConfig {
        api_base_url: "http://eventman.internal:8080".to_string(),
        ..ClientConfig::default()
    };
    let client = Client::with_collaborators(config, backend, storage);

    let request = client
        .api
        .request(Method::GET, "/api/role-requests/pending")
        .build()
        .expect("request builds");

    assert_eq!(
        request.url().as_str(),
        "http://eventman.internal:8080/api/role-requests/pending"
    );
}

// --- Email verification ---

#[tokio::test]
async fn verification_endpoints_surface_transport_failures() {
    let storage: StorageState = Arc::new(MemoryStorage::new());
    let backend: AuthBackendState = Arc::new(MockAuthBackend::rejecting("unused"));
    let config = ClientConfig {
        // Nothing listens here; both calls must come back as Network errors.
        api_base_url: "http://127.0.0.1:9".to_string(),
        ..ClientConfig::default()
    };
    let client = Client::with_collaborators(config, backend, storage);

    let err = client
        .api
        .verify_email("john@example.com", "482913", "")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));

    let err = client
        .api
        .resend_verification("john@example.com")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
}

#[test]
fn verification_payload_matches_the_wire_contract() {
    let payload = EmailVerification {
        email: "john@example.com".to_string(),
        code: "482913".to_string(),
        reason: String::new(),
    };
    assert_eq!(
        serde_json::to_value(&payload).unwrap(),
        serde_json::json!({
            "email": "john@example.com",
            "code": "482913",
            "reason": "",
        })
    );
}

#[test]
fn verification_response_parses_with_and_without_a_token() {
    // Message-only confirmation: the user logs in normally afterwards.
    let plain: VerificationResponse =
        serde_json::from_str(r#"{"message":"Email verified successfully"}"#).unwrap();
    assert!(plain.token.is_none());
    assert!(plain.user.is_none());

    // Token-bearing confirmation: the account comes back logged in.
    let logged_in: VerificationResponse = serde_json::from_str(
        r#"{
            "token": "fresh-token",
            "user": {"id": 7, "email": "john@example.com", "name": "John Smith",
                     "roles": ["ROLE_ATTENDEE"]}
        }"#,
    )
    .unwrap();
    assert_eq!(logged_in.token.as_deref(), Some("fresh-token"));
    let user = logged_in.user.expect("user returned with token");
    assert_eq!(user.id, 7);
    assert_eq!(user.roles, vec!["ROLE_ATTENDEE".to_string()]);
}

// --- Client assembly ---

#[tokio::test]
async fn client_restores_a_persisted_session_on_construction() {
    let storage: StorageState = Arc::new(MemoryStorage::new());
    let backend: AuthBackendState = Arc::new(MockAuthBackend::succeeding(LoginResponse {
        id: 7,
        email: "john@example.com".to_string(),
        name: "John Smith".to_string(),
        roles: vec!["ATTENDEE".to_string()],
        token: "john-token".to_string(),
    }));

    // First app run: log in, which persists the session.
    let first = Client::with_collaborators(
        ClientConfig::default(),
        backend.clone(),
        storage.clone(),
    );
    first
        .session
        .login("john@example.com", "password")
        .await
        .expect("login");

    // Second run over the same storage comes up already authenticated.
    let second = Client::with_collaborators(ClientConfig::default(), backend, storage);
    assert!(second.session.is_authenticated());
    assert_eq!(
        second.session.current_session().unwrap().email,
        "john@example.com"
    );

    let request = second
        .api
        .request(Method::GET, "/api/tickets")
        .build()
        .expect("request builds");
    assert!(request.headers().get(AUTHORIZATION).is_some());
}
