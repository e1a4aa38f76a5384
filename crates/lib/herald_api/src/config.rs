//! API server configuration.

use std::fmt;

use herald_core::auth::bootstrap::SeedAdmin;
use herald_core::auth::jwt::resolve_jwt_secret;

/// Configuration for the API server.
#[derive(Clone)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:8000").
    pub bind_addr: String,
    /// SQLite connection URL.
    pub database_url: String,
    /// Token signing secret.
    pub jwt_secret: String,
    /// Service access key guarding user administration. `None` rejects every call.
    pub access_key: Option<String>,
    /// Bootstrap administrator credentials.
    pub seed_admin: SeedAdmin,
}

impl ApiConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable                        | Default                           |
    /// |---------------------------------|-----------------------------------|
    /// | `HOST` / `PORT`                 | `127.0.0.1` / `8000`              |
    /// | `DATABASE_URL`                  | `sqlite://data/data.db?mode=rwc`  |
    /// | `JWT_SECRET_KEY` / `JWT_SECRET` | generated & persisted to file     |
    /// | `API_SECURITY_KEY`              | unset                             |
    /// | `ADMIN_LOGIN` / `ADMIN_PASSWORD`| `admin` / `admin`                 |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into());
        let port = std::env::var("PORT").unwrap_or_else(|_| "8000".into());
        Self {
            bind_addr: format!("{host}:{port}"),
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://data/data.db?mode=rwc".into()),
            jwt_secret: resolve_jwt_secret(),
            access_key: std::env::var("API_SECURITY_KEY")
                .ok()
                .filter(|k| !k.is_empty()),
            seed_admin: SeedAdmin::from_env(),
        }
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("bind_addr", &self.bind_addr)
            .field("database_url", &self.database_url)
            .field("jwt_secret", &"<redacted>")
            .field("access_key", &self.access_key.as_ref().map(|_| "<redacted>"))
            .field("seed_admin", &self.seed_admin)
            .finish()
    }
}
