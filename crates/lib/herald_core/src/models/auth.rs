//! Authentication domain models.
//!
//! `Identity` doubles as the signed token payload, so its serde names are the
//! wire names: `{"type", "date", "data": {"login", "secret_key"}}`.

use serde::{Deserialize, Serialize};

/// Login carried by the anonymous placeholder identity.
pub const ANONYMOUS_LOGIN: &str = "AnonOwO";

/// Secret carried by the anonymous placeholder identity.
pub const ANONYMOUS_SECRET: &str = "uwu";

/// Issue date carried by the anonymous placeholder identity.
pub const ANONYMOUS_DATE: &str = "owo";

/// Administrator row as stored in the `admins` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminRecord {
    pub login: String,
    pub password_hash: String,
    pub secret_key: String,
}

/// What a token says about its subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub login: String,
    pub secret_key: String,
}

impl From<&AdminRecord> for Claims {
    fn from(record: &AdminRecord) -> Self {
        Self {
            login: record.login.clone(),
            secret_key: record.secret_key.clone(),
        }
    }
}

/// Principal category. Unrecognised categories decode as `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityType {
    Admin,
    AnonOwo,
    #[serde(other)]
    Unknown,
}

impl IdentityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdentityType::Admin => "admin",
            IdentityType::AnonOwo => "anon_owo",
            IdentityType::Unknown => "unknown",
        }
    }
}

/// The principal attached to a single request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    #[serde(rename = "type")]
    pub kind: IdentityType,
    /// Informational issue timestamp; never used for expiry.
    #[serde(rename = "date")]
    pub issued_at: String,
    #[serde(rename = "data")]
    pub claims: Claims,
}

impl Identity {
    /// The fixed identity used when a request carries no bearer credential.
    pub fn anonymous() -> Self {
        Self {
            kind: IdentityType::AnonOwo,
            issued_at: ANONYMOUS_DATE.to_string(),
            claims: Claims {
                login: ANONYMOUS_LOGIN.to_string(),
                secret_key: ANONYMOUS_SECRET.to_string(),
            },
        }
    }

    pub fn is_admin(&self) -> bool {
        self.kind == IdentityType::Admin
    }

    /// True when the claims are exactly the anonymous placeholder pair.
    pub fn has_anonymous_claims(&self) -> bool {
        self.claims.login == ANONYMOUS_LOGIN && self.claims.secret_key == ANONYMOUS_SECRET
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_uses_wire_names() {
        let identity = Identity {
            kind: IdentityType::Admin,
            issued_at: "2026-01-01 00:00:00.000000".into(),
            claims: Claims {
                login: "admin".into(),
                secret_key: "0123456789012345".into(),
            },
        };

        let json = serde_json::to_value(&identity).unwrap();
        assert_eq!(json["type"], "admin");
        assert_eq!(json["date"], "2026-01-01 00:00:00.000000");
        assert_eq!(json["data"]["login"], "admin");
        assert_eq!(json["data"]["secret_key"], "0123456789012345");
    }

    #[test]
    fn unknown_identity_type_is_tolerated() {
        let json = r#"{"type":"moderator","date":"x","data":{"login":"a","secret_key":"b"}}"#;
        let identity: Identity = serde_json::from_str(json).unwrap();
        assert_eq!(identity.kind, IdentityType::Unknown);
        assert!(!identity.is_admin());
    }

    #[test]
    fn anonymous_identity_is_not_admin() {
        let anon = Identity::anonymous();
        assert_eq!(anon.kind, IdentityType::AnonOwo);
        assert_eq!(anon.kind.as_str(), "anon_owo");
        assert!(anon.has_anonymous_claims());
        assert!(!anon.is_admin());
    }
}
