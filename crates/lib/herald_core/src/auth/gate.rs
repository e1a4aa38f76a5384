//! Authorization gate: is this identity still a valid administrator?

use tracing::{debug, warn};

use super::AuthError;
use super::queries::CredentialStore;
use super::secret::SECRET_KEY_LEN;
use crate::models::auth::Identity;

/// Cross-checks a decoded identity's secret key against the credential store.
#[derive(Clone, Debug)]
pub struct AuthorizationGate {
    store: CredentialStore,
}

impl AuthorizationGate {
    pub fn new(store: CredentialStore) -> Self {
        Self { store }
    }

    /// Check the identity's claims against the store.
    ///
    /// The anonymous placeholder claims are self-consistent and pass here;
    /// they still never satisfy [`Self::require_admin`], which also demands
    /// the `admin` type.
    pub async fn authorize(&self, identity: &Identity) -> Result<(), AuthError> {
        if identity.has_anonymous_claims() {
            return Ok(());
        }

        let claims = &identity.claims;
        if claims.secret_key.len() != SECRET_KEY_LEN {
            warn!(login = %claims.login, "secret key has wrong length");
            return Err(AuthError::InvalidKey);
        }
        if !self
            .store
            .secret_matches(&claims.login, &claims.secret_key)
            .await?
        {
            warn!(login = %claims.login, "secret key is not valid");
            return Err(AuthError::InvalidKey);
        }
        Ok(())
    }

    /// Composite rule for privileged operations: `type == admin` and a passing
    /// [`Self::authorize`].
    pub async fn require_admin(&self, identity: &Identity) -> Result<(), AuthError> {
        if !identity.is_admin() {
            debug!(kind = identity.kind.as_str(), "identity is not an administrator");
            return Err(AuthError::Unauthorized(
                "Not authorized or not an administrator".into(),
            ));
        }
        self.authorize(identity).await
    }

    /// Whether the identity currently passes [`Self::require_admin`].
    pub async fn is_valid(&self, identity: &Identity) -> Result<bool, AuthError> {
        match self.require_admin(identity).await {
            Ok(()) => Ok(true),
            Err(AuthError::Unauthorized(_) | AuthError::InvalidKey) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
