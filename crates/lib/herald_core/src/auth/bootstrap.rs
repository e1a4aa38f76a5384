//! Seed administrator bootstrap.
//!
//! Runs once per process start and is safe to re-run: the seed admin is only
//! inserted when its login is absent. A failed insert is logged and the
//! process carries on without a seed admin.

use std::fmt;

use tracing::{debug, error, info};

use super::AuthError;
use super::password::hash_password;
use super::queries::CredentialStore;
use super::secret::generate_secret_key;

/// Default seed administrator login and password.
pub const DEFAULT_SEED_LOGIN: &str = "admin";
pub const DEFAULT_SEED_PASSWORD: &str = "admin";

/// Credentials for the bootstrap administrator.
#[derive(Clone)]
pub struct SeedAdmin {
    pub login: String,
    pub password: String,
}

impl SeedAdmin {
    /// Reads `ADMIN_LOGIN` / `ADMIN_PASSWORD`, falling back to the defaults.
    pub fn from_env() -> Self {
        Self {
            login: std::env::var("ADMIN_LOGIN").unwrap_or_else(|_| DEFAULT_SEED_LOGIN.into()),
            password: std::env::var("ADMIN_PASSWORD")
                .unwrap_or_else(|_| DEFAULT_SEED_PASSWORD.into()),
        }
    }
}

impl Default for SeedAdmin {
    fn default() -> Self {
        Self {
            login: DEFAULT_SEED_LOGIN.into(),
            password: DEFAULT_SEED_PASSWORD.into(),
        }
    }
}

impl fmt::Debug for SeedAdmin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeedAdmin")
            .field("login", &self.login)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Outcome of a bootstrap pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapState {
    Unseeded,
    Seeded,
}

/// Ensure the seed administrator exists.
pub async fn ensure_seed_admin(store: &CredentialStore, seed: &SeedAdmin) -> BootstrapState {
    match seed_admin(store, seed).await {
        Ok(state) => state,
        Err(e) => {
            error!(login = %seed.login, "failed to bootstrap seed administrator: {e}");
            BootstrapState::Unseeded
        }
    }
}

async fn seed_admin(store: &CredentialStore, seed: &SeedAdmin) -> Result<BootstrapState, AuthError> {
    debug!(login = %seed.login, "searching for seed administrator");
    if store.find_by_login(&seed.login).await?.is_some() {
        info!(login = %seed.login, "seed administrator already exists");
        return Ok(BootstrapState::Seeded);
    }
    insert_seed(store, seed).await
}

async fn insert_seed(store: &CredentialStore, seed: &SeedAdmin) -> Result<BootstrapState, AuthError> {
    let password_hash = hash_password(&seed.password).await?;
    let secret_key = generate_secret_key();

    match store.create(&seed.login, &password_hash, &secret_key).await {
        Ok(()) => {
            info!(login = %seed.login, "seed administrator created");
            Ok(BootstrapState::Seeded)
        }
        // Another bootstrap pass won the race.
        Err(AuthError::Conflict(_)) => Ok(BootstrapState::Seeded),
        Err(e) => Err(e),
    }
}
