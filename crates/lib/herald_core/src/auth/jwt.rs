//! Token signing and verification.
//!
//! Tokens are HS256 JWS strings whose payload is an [`Identity`]. No `exp`
//! claim is issued or required: validity beyond the signature is decided by
//! the authorization gate.

use std::path::{Path, PathBuf};

use chrono::Local;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::distr::Alphanumeric;
use rand::{Rng, rng};
use tracing::{info, warn};

use super::AuthError;
use crate::models::auth::{Claims, Identity, IdentityType};

/// Signing algorithm for every token.
const ALGORITHM: Algorithm = Algorithm::HS256;

/// Format of the informational `date` claim.
const ISSUED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Encodes and verifies tokens under one process-wide signing secret.
///
/// Built once at startup and shared by handle.
#[derive(Clone)]
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(ALGORITHM);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Sign an admin token for `claims`, stamped with the current local time.
    pub fn issue(&self, claims: &Claims) -> Result<String, AuthError> {
        let identity = Identity {
            kind: IdentityType::Admin,
            issued_at: Local::now().format(ISSUED_AT_FORMAT).to_string(),
            claims: claims.clone(),
        };
        encode(&Header::new(ALGORITHM), &identity, &self.encoding)
            .map_err(|e| AuthError::Internal(format!("jwt encode: {e}")))
    }

    /// Verify a token's signature and structure, returning its identity.
    pub fn decode(&self, token: &str) -> Result<Identity, AuthError> {
        decode::<Identity>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }
}

/// Resolve the signing secret: env var `JWT_SECRET_KEY` → `JWT_SECRET` → persisted file.
pub fn resolve_jwt_secret() -> String {
    for var in ["JWT_SECRET_KEY", "JWT_SECRET"] {
        if let Ok(secret) = std::env::var(var)
            && !secret.is_empty()
        {
            return secret;
        }
    }
    load_or_create_secret(&jwt_secret_path())
}

/// Read a persisted secret from `path`, generating and writing one if absent.
pub fn load_or_create_secret(path: &Path) -> String {
    if let Ok(existing) = std::fs::read_to_string(path) {
        let trimmed = existing.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }
    let secret: String = rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect();
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    match std::fs::write(path, &secret) {
        Ok(()) => info!(path = %path.display(), "generated new JWT secret"),
        Err(e) => warn!(path = %path.display(), "could not persist JWT secret: {e}"),
    }
    secret
}

/// Path to the persisted JWT secret file.
fn jwt_secret_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("herald")
        .join("jwt-secret")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims() -> Claims {
        Claims {
            login: "admin".into(),
            secret_key: "1234567890123456".into(),
        }
    }

    #[test]
    fn issued_token_round_trips() {
        let codec = TokenCodec::new(b"test-secret");
        let token = codec.issue(&claims()).unwrap();

        let identity = codec.decode(&token).unwrap();
        assert_eq!(identity.claims, claims());
        assert_eq!(identity.kind, IdentityType::Admin);
        assert!(!identity.issued_at.is_empty());
    }

    #[test]
    fn token_has_no_expiry_claim() {
        let codec = TokenCodec::new(b"test-secret");
        let token = codec.issue(&claims()).unwrap();

        let mut insecure = Validation::new(ALGORITHM);
        insecure.insecure_disable_signature_validation();
        insecure.validate_exp = false;
        insecure.required_spec_claims.clear();
        let payload = decode::<serde_json::Value>(&token, &DecodingKey::from_secret(b""), &insecure)
            .unwrap()
            .claims;

        assert!(payload.get("exp").is_none());
        assert_eq!(payload["type"], "admin");
        assert_eq!(payload["data"]["login"], "admin");
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = TokenCodec::new(b"one").issue(&claims()).unwrap();
        let err = TokenCodec::new(b"two").decode(&token).unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken(_)));
    }

    #[test]
    fn malformed_token_is_rejected() {
        let codec = TokenCodec::new(b"test-secret");
        for token in ["", "garbage", "a.b.c"] {
            assert!(matches!(
                codec.decode(token),
                Err(AuthError::InvalidToken(_))
            ));
        }
    }

    #[test]
    fn other_algorithms_are_rejected() {
        let codec = TokenCodec::new(b"test-secret");
        let identity = Identity {
            kind: IdentityType::Admin,
            issued_at: "now".into(),
            claims: claims(),
        };
        let token = encode(
            &Header::new(Algorithm::HS512),
            &identity,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(codec.decode(&token).is_err());
    }

    #[test]
    fn secret_file_is_created_then_reused() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("herald").join("jwt-secret");

        let first = load_or_create_secret(&path);
        assert_eq!(first.len(), 64);
        assert!(path.exists());

        let second = load_or_create_secret(&path);
        assert_eq!(first, second);
    }
}
