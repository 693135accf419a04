use std::collections::HashMap;
use std::sync::Arc;

use eventman_client::auth::{AuthBackendState, MockAuthBackend, SessionStore};
use eventman_client::models::{LoginResponse, Role};
use eventman_client::permissions::PermissionQuery;
use eventman_client::storage::{MemoryStorage, StorageState};

// --- Fixtures ---

async fn authenticated_store(roles: &[&str]) -> SessionStore {
    let storage: StorageState = Arc::new(MemoryStorage::new());
    let backend: AuthBackendState = Arc::new(MockAuthBackend::succeeding(LoginResponse {
        id: 1,
        email: "user@eventman.com".to_string(),
        name: "Guarded User".to_string(),
        roles: roles.iter().map(|r| r.to_string()).collect(),
        token: "token-1".to_string(),
    }));
    let store = SessionStore::new(backend, storage);
    store
        .login("user@eventman.com", "password")
        .await
        .expect("login");
    store
}

fn unauthenticated_store() -> SessionStore {
    let storage: StorageState = Arc::new(MemoryStorage::new());
    let backend: AuthBackendState = Arc::new(MockAuthBackend::rejecting("unused"));
    SessionStore::new(backend, storage)
}

// --- Guarded render ---

#[tokio::test]
async fn render_yields_content_when_authorized() {
    let store = authenticated_store(&["ROLE_ORGANIZER"]).await;
    let guard = store.guard();

    let shown = guard.render(
        &PermissionQuery::any(&[Role::Organizer]),
        "create event",
        "not available",
    );
    assert_eq!(shown, "create event");
}

#[tokio::test]
async fn render_yields_fallback_when_denied() {
    let store = authenticated_store(&["ATTENDEE"]).await;
    let guard = store.guard();

    let shown = guard.render(
        &PermissionQuery::any(&[Role::Admin, Role::Organizer]),
        "create event",
        "not available",
    );
    assert_eq!(shown, "not available");
}

#[tokio::test]
async fn render_or_default_stands_in_for_nothing() {
    let store = unauthenticated_store();
    let guard = store.guard();

    let shown: Vec<&str> = guard.render_or_default(
        &PermissionQuery::any(&[Role::Admin]),
        vec!["approve", "reject"],
    );
    assert!(shown.is_empty());
}

#[tokio::test]
async fn public_query_renders_for_everyone() {
    let store = unauthenticated_store();
    let guard = store.guard();
    let shown = guard.render(&PermissionQuery::public(), "welcome", "hidden");
    assert_eq!(shown, "welcome");
}

// --- Guarded actions ---

#[tokio::test]
async fn denied_action_is_absent_not_disabled() {
    let store = authenticated_store(&["ATTENDEE"]).await;
    let guard = store.guard();

    let refund = guard.action(&PermissionQuery::any(&[Role::Admin]), || "refund issued");
    assert!(refund.is_none());

    let purchase = guard.action(&PermissionQuery::any(&[Role::Attendee]), || {
        "ticket purchased"
    });
    let purchase = purchase.expect("attendee action available");
    assert_eq!(purchase(), "ticket purchased");
}

#[tokio::test]
async fn guard_reflects_logout_immediately() {
    let store = authenticated_store(&["ROLE_ADMIN"]).await;
    let guard = store.guard();
    let query = PermissionQuery::any(&[Role::Admin]);

    assert!(guard.authorized(&query));
    store.logout();
    // Same guard, same query: fails closed after the synchronous logout.
    assert!(!guard.authorized(&query));
    assert!(guard.action(&query, "approve").is_none());
}

// --- Role-based content ---

#[tokio::test]
async fn content_for_role_applies_display_fallback() {
    let store = authenticated_store(&["ROLE_ADMIN"]).await;
    let guard = store.guard();

    let mut content = HashMap::new();
    content.insert(Role::Organizer, "organizer dashboard");
    let fallback = "generic dashboard";

    // No admin variant authored; the admin sees the organizer one.
    assert_eq!(
        *guard.content_for_role(&content, &fallback),
        "organizer dashboard"
    );
}

#[tokio::test]
async fn content_for_role_without_session_yields_fallback() {
    let store = unauthenticated_store();
    let guard = store.guard();

    let mut content = HashMap::new();
    content.insert(Role::Attendee, "attendee dashboard");
    let fallback = "sign in first";

    assert_eq!(*guard.content_for_role(&content, &fallback), "sign in first");
}
