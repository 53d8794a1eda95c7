use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub identity: IdentityConfig,
    pub store: StoreConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
}

/// Settings for the external identity service (Firebase Auth REST surface).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityConfig {
    pub project_id: String,
    pub web_api_key: String,
    /// When set, requests go to the local Auth emulator instead of production.
    pub emulator_host: Option<String>,
}

/// Settings for the external document store (Firestore REST surface).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub project_id: String,
    /// When set, requests go to the local Firestore emulator.
    pub emulator_host: Option<String>,
    /// OAuth access token for the production REST API; not needed against the
    /// emulator.
    pub access_token: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        Self {
            environment,
            server: ServerConfig { port: 5001 },
            identity: IdentityConfig {
                project_id: String::new(),
                web_api_key: String::new(),
                emulator_host: None,
            },
            store: StoreConfig {
                project_id: String::new(),
                emulator_host: None,
                access_token: None,
            },
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("FOCUSFLOW_PORT").or_else(|_| env::var("PORT")) {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }

        if let Ok(v) = env::var("FIREBASE_PROJECT_ID") {
            self.identity.project_id = v.clone();
            self.store.project_id = v;
        }
        if let Ok(v) = env::var("FIREBASE_WEB_API_KEY") {
            self.identity.web_api_key = v;
        }
        if let Ok(v) = env::var("FIREBASE_AUTH_EMULATOR_HOST") {
            self.identity.emulator_host = Some(v);
        }
        if let Ok(v) = env::var("FIRESTORE_EMULATOR_HOST") {
            self.store.emulator_host = Some(v);
        }
        if let Ok(v) = env::var("GCP_ACCESS_TOKEN") {
            self.store.access_token = Some(v);
        }

        self
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
