use std::env;
use std::path::PathBuf;

/// ClientConfig
///
/// Holds the client's entire configuration state. This struct is designed to be
/// immutable once loaded, ensuring consistency across all components that hold a
/// copy of it (SessionStore, ApiClient).
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL of the EventMan REST backend (no trailing slash).
    pub api_base_url: String,
    /// Directory where the persisted session entries are written.
    pub storage_dir: PathBuf,
    /// Runtime environment marker. Controls fail-fast behavior on load.
    pub env: Env,
}

/// Env
///
/// Defines the runtime context, used to switch between permissive local defaults
/// and the strict, fully-explicit configuration required in production.
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

impl Default for ClientConfig {
    /// default
    ///
    /// Provides a safe, non-panicking ClientConfig instance primarily used for
    /// test setup. This allows instantiating the configuration without setting
    /// environment variables.
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080".to_string(),
            storage_dir: env::temp_dir().join("eventman-client-test"),
            env: Env::Local,
        }
    }
}

impl ClientConfig {
    /// load
    ///
    /// The canonical function for initializing the client configuration at startup.
    /// It reads all parameters from environment variables (after loading any `.env`
    /// file) and implements the **fail-fast** principle.
    ///
    /// # Panics
    /// Panics if a critical environment variable required for the current runtime
    /// environment (especially Production) is not found. This prevents the client
    /// from starting against an unknown backend.
    pub fn load() -> Self {
        dotenv::dotenv().ok();

        let env_str = env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());
        let env = match env_str.as_str() {
            "production" => Env::Production,
            _ => Env::Local,
        };

        match env {
            Env::Local => Self {
                env: Env::Local,
                // Mirrors the Next.js front end's NEXT_PUBLIC_API_URL fallback.
                api_base_url: env::var("API_BASE_URL")
                    .unwrap_or_else(|_| "http://localhost:8080".to_string()),
                storage_dir: env::var("EVENTMAN_STORAGE_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| env::temp_dir().join("eventman-client")),
            },
            Env::Production => Self {
                env: Env::Production,
                // Production demands an explicit backend address and storage location.
                api_base_url: env::var("API_BASE_URL")
                    .expect("FATAL: API_BASE_URL required in production"),
                storage_dir: env::var("EVENTMAN_STORAGE_DIR")
                    .map(PathBuf::from)
                    .expect("FATAL: EVENTMAN_STORAGE_DIR required in production"),
            },
        }
    }
}
