use axum::http::HeaderValue;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Deserializer};
use std::collections::HashSet;
use thiserror::Error;
use uuid::Uuid;

use crate::services::auth::bearer::{self, BearerError};
use crate::services::auth::identity::{Authentication, Identity};

/// Signing algorithms accepted for access tokens (shared-secret HMAC only).
const HMAC_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

// Errors returned by access-token verification + claim resolution.
#[derive(Debug, Error)]
pub enum AccessJwtError {
    #[error("malformed authorization header: {0}")]
    Header(#[from] BearerError),
    #[error("unexpected signing method: {0:?}")]
    UnexpectedAlgorithm(Algorithm),
    #[error("jwt verification failed: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("missing 'sub' claim")]
    MissingSubject,
    #[error("invalid 'sub' (expected UUID)")]
    InvalidSubject,
}

/// Access token (JWT) claims.
///
/// NOTE:
/// - `exp` / `nbf` are checked by jsonwebtoken when present and are not kept here.
/// - `scopes` is lenient: non-string entries are dropped, a non-array value reads as empty.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessTokenClaims {
    #[serde(default)]
    pub sub: Option<String>,

    #[serde(default, deserialize_with = "lenient_scopes")]
    pub scopes: Vec<String>,
}

fn lenient_scopes<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let serde_json::Value::Array(items) = serde_json::Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };

    let total = items.len();
    let scopes: Vec<String> = items
        .into_iter()
        .filter_map(|item| match item {
            serde_json::Value::String(s) => Some(s),
            _ => None,
        })
        .collect();

    if scopes.len() != total {
        tracing::debug!(
            dropped = total - scopes.len(),
            "ignored non-string entries in 'scopes' claim"
        );
    }

    Ok(scopes)
}

/// HMAC access-token verifier.
///
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct AuthService {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("AuthService")
            .field("validation", &self.validation)
            .finish()
    }
}

impl AuthService {
    pub fn new(secret: &str, leeway_seconds: u64) -> Self {
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = HMAC_ALGORITHMS.to_vec();
        // Tokens from the identity service carry only `sub` / `scopes`; nothing registered is mandatory.
        validation.required_spec_claims = HashSet::new();
        validation.validate_aud = false;
        validation.validate_nbf = true;
        validation.leeway = leeway_seconds;

        Self {
            decoding_key,
            validation,
        }
    }

    /// Verify the signature and decode the claims.
    ///
    /// The declared `alg` must be in the HMAC family; anything else is rejected
    /// before the signature is looked at.
    pub fn verify(&self, token: &str) -> Result<AccessTokenClaims, AccessJwtError> {
        let header = jsonwebtoken::decode_header(token)?;
        if !HMAC_ALGORITHMS.contains(&header.alg) {
            return Err(AccessJwtError::UnexpectedAlgorithm(header.alg));
        }

        let data =
            jsonwebtoken::decode::<AccessTokenClaims>(token, &self.decoding_key, &self.validation)?;

        Ok(data.claims)
    }

    /// Turn verified claims into an `Identity`.
    pub fn resolve_identity(claims: AccessTokenClaims) -> Result<Identity, AccessJwtError> {
        let sub = claims.sub.ok_or(AccessJwtError::MissingSubject)?;
        let subject = Uuid::parse_str(&sub).map_err(|_| AccessJwtError::InvalidSubject)?;

        Ok(Identity::new(subject, claims.scopes))
    }

    /// Verify + resolve in one step.
    pub fn verify_identity(&self, token: &str) -> Result<Identity, AccessJwtError> {
        let claims = self.verify(token)?;
        Self::resolve_identity(claims)
    }

    /// Run the whole pipeline for a raw `Authorization` header.
    ///
    /// Never fails: every problem collapses into `Authentication::Invalid`.
    pub fn authenticate(&self, header: Option<&HeaderValue>) -> Authentication {
        let result = bearer::extract_bearer(header)
            .map_err(AccessJwtError::from)
            .and_then(|token| token.map(|t| self.verify_identity(t)).transpose());

        match result {
            Ok(None) => Authentication::Absent,
            Ok(Some(identity)) => {
                tracing::debug!(
                    subject = %identity.subject(),
                    scopes = identity.scopes().len(),
                    "access token verified"
                );
                Authentication::Authenticated(identity)
            }
            Err(err) => {
                tracing::warn!(error = %err, "access token verification failed");
                Authentication::Invalid
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header};
    use serde_json::json;

    const SECRET: &str = "test_secret";

    fn sign(secret: &str, alg: Algorithm, claims: &serde_json::Value) -> String {
        jsonwebtoken::encode(
            &Header::new(alg),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn service() -> AuthService {
        AuthService::new(SECRET, 0)
    }

    #[test]
    fn resolves_subject_and_scopes() {
        let subject = Uuid::new_v4();
        let token = sign(
            SECRET,
            Algorithm::HS256,
            &json!({"sub": subject.to_string(), "scopes": ["read", "write"]}),
        );

        let identity = service().verify_identity(&token).unwrap();
        assert_eq!(identity.subject(), subject);
        assert_eq!(identity.scopes(), ["read", "write"]);
    }

    #[test]
    fn accepts_every_hmac_variant() {
        let subject = Uuid::new_v4().to_string();
        for alg in HMAC_ALGORITHMS {
            let token = sign(SECRET, alg, &json!({"sub": subject}));
            assert!(service().verify_identity(&token).is_ok(), "{alg:?}");
        }
    }

    #[test]
    fn missing_scopes_claim_is_empty() {
        let token = sign(SECRET, Algorithm::HS256, &json!({"sub": Uuid::new_v4()}));
        let identity = service().verify_identity(&token).unwrap();
        assert!(identity.scopes().is_empty());
    }

    #[test]
    fn non_string_scope_entries_are_dropped() {
        let token = sign(
            SECRET,
            Algorithm::HS256,
            &json!({"sub": Uuid::new_v4(), "scopes": ["read", 42, null, {"x": 1}, "write"]}),
        );
        let identity = service().verify_identity(&token).unwrap();
        assert_eq!(identity.scopes(), ["read", "write"]);
    }

    #[test]
    fn non_array_scopes_claim_reads_as_empty() {
        let token = sign(
            SECRET,
            Algorithm::HS256,
            &json!({"sub": Uuid::new_v4(), "scopes": "read write"}),
        );
        let identity = service().verify_identity(&token).unwrap();
        assert!(identity.scopes().is_empty());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = sign(
            "wrong_secret",
            Algorithm::HS256,
            &json!({"sub": Uuid::new_v4(), "scopes": ["read"]}),
        );
        assert!(matches!(
            service().verify_identity(&token),
            Err(AccessJwtError::Jwt(_))
        ));
    }

    #[test]
    fn subject_must_be_present_and_a_uuid() {
        let token = sign(SECRET, Algorithm::HS256, &json!({"scopes": ["read"]}));
        assert!(matches!(
            service().verify_identity(&token),
            Err(AccessJwtError::MissingSubject)
        ));

        let token = sign(SECRET, Algorithm::HS256, &json!({"sub": "not-a-uuid"}));
        assert!(matches!(
            service().verify_identity(&token),
            Err(AccessJwtError::InvalidSubject)
        ));
    }

    #[test]
    fn expired_token_is_rejected() {
        let token = sign(
            SECRET,
            Algorithm::HS256,
            &json!({"sub": Uuid::new_v4(), "exp": 1_000_000}),
        );
        assert!(matches!(
            service().verify_identity(&token),
            Err(AccessJwtError::Jwt(_))
        ));
    }

    #[test]
    fn garbage_token_is_an_error_not_a_panic() {
        for token in ["", ".", "..", "a.b.c", "not a jwt", "eyJ.eyJ.sig"] {
            assert!(service().verify(token).is_err(), "token: {token:?}");
        }
    }

    #[test]
    fn authenticate_maps_every_failure_to_invalid() {
        let svc = service();
        assert_eq!(svc.authenticate(None), Authentication::Absent);

        let header = HeaderValue::from_static("Basic xyz");
        assert_eq!(svc.authenticate(Some(&header)), Authentication::Invalid);

        let header = HeaderValue::from_static("Bearer not.a.jwt");
        assert_eq!(svc.authenticate(Some(&header)), Authentication::Invalid);
    }

    #[test]
    fn debug_output_hides_the_key() {
        let rendered = format!("{:?}", service());
        assert!(!rendered.contains(SECRET));
    }
}
