//! Bearer credential extraction.
//!
//! A request without a usable `Authorization: Bearer <token>` header is not
//! an error: it gets the fixed anonymous identity, which can never pass an
//! admin check. A bearer token that is present but fails verification is an
//! error and aborts the request.

use super::AuthError;
use super::jwt::TokenCodec;
use crate::models::auth::Identity;

/// Resolve the identity for an `Authorization` header value.
pub fn extract(header: Option<&str>, codec: &TokenCodec) -> Result<Identity, AuthError> {
    match bearer_token(header) {
        Some(token) => codec.decode(token),
        None => Ok(Identity::anonymous()),
    }
}

/// The credentials of a `Bearer` authorization header, if any.
fn bearer_token(header: Option<&str>) -> Option<&str> {
    let (scheme, credentials) = header?.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let credentials = credentials.trim();
    (!credentials.is_empty()).then_some(credentials)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::{Claims, IdentityType};

    fn codec() -> TokenCodec {
        TokenCodec::new(b"bearer-secret")
    }

    #[test]
    fn missing_header_is_anonymous() {
        let identity = extract(None, &codec()).unwrap();
        assert_eq!(identity, Identity::anonymous());
    }

    #[test]
    fn non_bearer_schemes_are_anonymous() {
        for header in ["Basic dXNlcjpwYXNz", "Bearer", "Bearer   ", "token"] {
            let identity = extract(Some(header), &codec()).unwrap();
            assert_eq!(identity.kind, IdentityType::AnonOwo, "header {header:?}");
        }
    }

    #[test]
    fn valid_bearer_is_decoded() {
        let codec = codec();
        let claims = Claims {
            login: "admin".into(),
            secret_key: "1234567890123456".into(),
        };
        let token = codec.issue(&claims).unwrap();

        for header in [format!("Bearer {token}"), format!("bearer {token}")] {
            let identity = extract(Some(&header), &codec).unwrap();
            assert!(identity.is_admin());
            assert_eq!(identity.claims, claims);
        }
    }

    #[test]
    fn invalid_bearer_fails() {
        let err = extract(Some("Bearer not.a.token"), &codec()).unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken(_)));
    }
}
