//! eventman-client — the client-side SDK for the EventMan REST backend.
//!
//! Everything the event-management front end needs below the presentation
//! layer: an injectable session store with local persistence, a pure
//! role-based permission evaluator, guarded render/action combinators, and a
//! typed REST client that attaches the session's bearer credential.

use std::sync::Arc;

// --- Module Structure ---

// Core client services and components.
pub mod api;
pub mod auth;
pub mod config;
pub mod guard;
pub mod models;
pub mod permissions;
pub mod storage;

// --- Public Re-exports ---

// Makes core types easily accessible to the embedding application.
pub use api::{ApiClient, ApiError, ReportFormat};
pub use auth::{AuthBackendState, AuthError, HttpAuthBackend, MockAuthBackend, SessionStore};
pub use config::{ClientConfig, Env};
pub use guard::Guard;
pub use models::{Role, Session};
pub use permissions::PermissionQuery;
pub use storage::{FileStorage, MemoryStorage, StorageState};

/// Client
///
/// The unified client state: configuration, the shared SessionStore, and the
/// REST client bound to it. Constructed explicitly at application start and
/// passed by reference to consumers — the session is never ambient global
/// state.
#[derive(Clone)]
pub struct Client {
    /// The loaded, immutable configuration.
    pub config: ClientConfig,
    /// Session lifecycle and permission source of truth.
    pub session: Arc<SessionStore>,
    /// Typed REST access, authenticated from `session`.
    pub api: ApiClient,
}

impl Client {
    /// new
    ///
    /// Assembles the client with the real collaborators (HTTP auth backend,
    /// file-backed storage) and restores any previously persisted session, so
    /// a restarted app comes up already authenticated.
    pub fn new(config: ClientConfig) -> Self {
        let storage: StorageState = Arc::new(FileStorage::new(config.storage_dir.clone()));
        let backend: AuthBackendState = Arc::new(HttpAuthBackend::new(config.api_base_url.clone()));
        Self::with_collaborators(config, backend, storage)
    }

    /// with_collaborators
    ///
    /// Assembly with injectable seams. Tests (and embedders with their own
    /// persistence) supply the auth backend and storage implementations.
    pub fn with_collaborators(
        config: ClientConfig,
        backend: AuthBackendState,
        storage: StorageState,
    ) -> Self {
        let session = Arc::new(SessionStore::new(backend, storage));
        session.restore();
        let api = ApiClient::new(&config, session.clone());
        Self {
            config,
            session,
            api,
        }
    }
}
