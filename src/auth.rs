use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::models::{BackendMessage, LoginRequest, LoginResponse, Role, Session};
use crate::storage::{StorageState, TOKEN_KEY, USER_KEY};

/// AuthError
///
/// The failure taxonomy of the `login` boundary. Both classes are recovered
/// locally into a `Result` — they never panic across the public surface — and
/// each carries the human-readable message shown to the user.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The request never completed (connection refused, timeout, bad body).
    #[error("{0}")]
    Network(String),
    /// The backend responded with a rejection.
    #[error("{0}")]
    InvalidCredentials(String),
    /// The session changed (logout or a newer login) while this login was in
    /// flight; its result was discarded rather than resurrecting stale state.
    #[error("login superseded by a newer session change")]
    Superseded,
}

// 1. AuthBackend Contract

/// AuthBackend
///
/// Abstract contract for the external authentication collaborator. The real
/// implementation speaks HTTP to the EventMan backend; tests swap in
/// `MockAuthBackend` to exercise the SessionStore without a network.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, AuthError>;
}

/// AuthBackendState
///
/// The concrete type used to share the auth backend across the client.
pub type AuthBackendState = Arc<dyn AuthBackend>;

// 2. The Real Implementation (HTTP)

/// HttpAuthBackend
///
/// Posts credentials to `POST /api/auth/login` and maps the outcome onto the
/// `AuthError` taxonomy: transport failure becomes `Network` with the generic
/// "backend unreachable" message; a non-2xx response becomes
/// `InvalidCredentials` carrying the backend-provided `message` when one is
/// present.
pub struct HttpAuthBackend {
    http: reqwest::Client,
    base_url: String,
}

impl HttpAuthBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl AuthBackend for HttpAuthBackend {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, AuthError> {
        let url = format!("{}/api/auth/login", self.base_url);
        let payload = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let response = self.http.post(&url).json(&payload).send().await.map_err(|e| {
            tracing::warn!("login request failed: {:?}", e);
            AuthError::Network(
                "Login failed. Please check if the backend server is running.".to_string(),
            )
        })?;

        if response.status().is_success() {
            response.json::<LoginResponse>().await.map_err(|e| {
                tracing::warn!("login response malformed: {:?}", e);
                AuthError::Network("Login failed: unexpected response from server.".to_string())
            })
        } else {
            let message = response
                .json::<BackendMessage>()
                .await
                .map(|m| m.message)
                .unwrap_or_else(|_| "Invalid credentials".to_string());
            Err(AuthError::InvalidCredentials(message))
        }
    }
}

// 3. The Mock Implementation (For Unit Tests)

/// MockAuthBackend
///
/// Scripted responses for SessionStore tests. An optional resolution delay
/// lets tests race two logins deterministically.
pub struct MockAuthBackend {
    pub response: Result<LoginResponse, String>,
    pub delay_ms: u64,
}

impl MockAuthBackend {
    pub fn succeeding(response: LoginResponse) -> Self {
        Self {
            response: Ok(response),
            delay_ms: 0,
        }
    }

    pub fn rejecting(message: &str) -> Self {
        Self {
            response: Err(message.to_string()),
            delay_ms: 0,
        }
    }

    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }
}

#[async_trait]
impl AuthBackend for MockAuthBackend {
    async fn login(&self, _email: &str, _password: &str) -> Result<LoginResponse, AuthError> {
        if self.delay_ms > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(self.delay_ms)).await;
        }
        match &self.response {
            Ok(resp) => Ok(resp.clone()),
            Err(msg) => Err(AuthError::InvalidCredentials(msg.clone())),
        }
    }
}

// --- Role Normalization (backend-adapter boundary) ---

/// normalize_roles
///
/// Strips the fixed `ROLE_` decoration some backends put on role names and
/// parses the remainder. Unrecognized roles are dropped (with a warning), not
/// treated as errors — a session whose roles all fail to parse simply ends up
/// with an empty role set and fails every non-empty permission query.
///
/// This is an external-system quirk, so it lives here at the adapter boundary
/// rather than in the permission evaluator.
pub fn normalize_roles(raw: &[String]) -> Vec<Role> {
    raw.iter()
        .filter_map(|name| {
            let bare = name.strip_prefix("ROLE_").unwrap_or(name);
            let role = Role::from_name(bare);
            if role.is_none() {
                tracing::warn!("dropping unrecognized role {:?}", name);
            }
            role
        })
        .collect()
}

// --- Session Store ---

/// Interior state of the SessionStore: the single mutable session cell plus a
/// generation counter used to invalidate in-flight logins.
struct SessionCell {
    session: Option<Session>,
    epoch: u64,
}

/// SessionStore
///
/// Holds and persists the authenticated identity. Explicitly constructed and
/// passed by reference to consumers — there is no ambient global. The two
/// mutators (`login`, `logout`) update the persisted entries before the
/// in-memory cell is considered settled, so a permission check issued
/// immediately after either returns sees the new state.
///
/// **Generation guard**: every session *change* (a login starting, a logout)
/// bumps the epoch. A login commits only if the epoch still matches the value
/// it drew when it started, which gives call-order precedence: a `logout`
/// issued while a login is in flight wins, and of two rapid logins the
/// later-issued one wins regardless of which response arrives first.
pub struct SessionStore {
    backend: AuthBackendState,
    storage: StorageState,
    cell: Mutex<SessionCell>,
}

impl SessionStore {
    pub fn new(backend: AuthBackendState, storage: StorageState) -> Self {
        Self {
            backend,
            storage,
            cell: Mutex::new(SessionCell {
                session: None,
                epoch: 0,
            }),
        }
    }

    /// login
    ///
    /// Sends credentials to the auth backend; on success constructs a Session
    /// (normalizing role decoration), persists both storage entries, and
    /// installs it in the cell. On failure the store is left untouched and the
    /// error carries the message to display.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        // Claim a fresh epoch before suspending on the network.
        let my_epoch = {
            let mut cell = self.cell.lock().expect("session lock poisoned");
            cell.epoch += 1;
            cell.epoch
        };

        let response = self.backend.login(email, password).await?;

        let session = Session {
            user_id: response.id,
            email: response.email,
            display_name: response.name,
            roles: normalize_roles(&response.roles),
            auth_token: response.token,
        };

        let mut cell = self.cell.lock().expect("session lock poisoned");
        if cell.epoch != my_epoch {
            // A logout or newer login happened while we were in flight.
            tracing::warn!("discarding stale login completion for {}", session.email);
            return Err(AuthError::Superseded);
        }

        self.persist(&session);
        cell.session = Some(session.clone());
        Ok(session)
    }

    /// logout
    ///
    /// Clears the persisted entries and the in-memory cell synchronously, and
    /// invalidates any login still in flight. Idempotent.
    pub fn logout(&self) {
        let mut cell = self.cell.lock().expect("session lock poisoned");
        self.storage.remove(USER_KEY);
        self.storage.remove(TOKEN_KEY);
        cell.session = None;
        cell.epoch += 1;
    }

    /// restore
    ///
    /// Attempts to load a previously persisted session at startup. Never
    /// errors: an absent, half-present, or malformed pair of entries yields
    /// the unauthenticated state (and clears the leftovers).
    pub fn restore(&self) {
        let user_blob = self.storage.get(USER_KEY);
        let token = self.storage.get(TOKEN_KEY);

        let restored = match (user_blob, token) {
            (Some(blob), Some(_token)) => match serde_json::from_str::<Session>(&blob) {
                Ok(session) => Some(session),
                Err(e) => {
                    tracing::warn!("discarding malformed persisted session: {:?}", e);
                    None
                }
            },
            (None, None) => None,
            // Only one of the two entries survived — inconsistent, treat as none.
            _ => {
                tracing::warn!("discarding inconsistent persisted session entries");
                None
            }
        };

        if restored.is_none() {
            self.storage.remove(USER_KEY);
            self.storage.remove(TOKEN_KEY);
        }

        let mut cell = self.cell.lock().expect("session lock poisoned");
        cell.session = restored;
    }

    /// update_profile
    ///
    /// Applies display-name/email edits to the held session and re-persists
    /// it. Roles and token are never mutated client-side — they change only
    /// through a fresh login. Returns false when unauthenticated.
    pub fn update_profile(&self, display_name: Option<&str>, email: Option<&str>) -> bool {
        let mut cell = self.cell.lock().expect("session lock poisoned");
        let Some(session) = cell.session.as_mut() else {
            return false;
        };
        if let Some(name) = display_name {
            session.display_name = name.to_string();
        }
        if let Some(email) = email {
            session.email = email.to_string();
        }
        let session = session.clone();
        self.persist(&session);
        true
    }

    pub fn is_authenticated(&self) -> bool {
        self.cell
            .lock()
            .expect("session lock poisoned")
            .session
            .is_some()
    }

    /// Snapshot of the current session, if any.
    pub fn current_session(&self) -> Option<Session> {
        self.cell
            .lock()
            .expect("session lock poisoned")
            .session
            .clone()
    }

    /// Bare token for the REST client. Absent means requests go out
    /// unauthenticated (the backend, not this layer, rejects them).
    pub fn token(&self) -> Option<String> {
        self.cell
            .lock()
            .expect("session lock poisoned")
            .session
            .as_ref()
            .map(|s| s.auth_token.clone())
    }

    /// Writes both storage entries. Failures inside the storage layer are
    /// logged there; the in-memory state proceeds regardless, matching local
    /// storage semantics.
    fn persist(&self, session: &Session) {
        match serde_json::to_string(session) {
            Ok(blob) => {
                self.storage.set(USER_KEY, &blob);
                self.storage.set(TOKEN_KEY, &session.auth_token);
            }
            Err(e) => tracing::error!("session serialization failed: {:?}", e),
        }
    }
}
