use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use std::{error::Error as StdError, fmt};

use crate::api::v1::extractors::Identity;

// Errors returned by access-token verification + strict claim validation.
#[derive(Debug)]
pub enum AccessJwtError {
    Jwt(jsonwebtoken::errors::Error),
    MissingOrInvalidAud,
    EmptyClaim(&'static str),
}

impl fmt::Display for AccessJwtError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Jwt(e) => write!(f, "jwt verification failed: {}", e),
            Self::MissingOrInvalidAud => write!(f, "missing or invalid 'aud' claim"),
            Self::EmptyClaim(name) => write!(f, "empty '{}' claim", name),
        }
    }
}

impl StdError for AccessJwtError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Jwt(e) => Some(e),
            _ => None,
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AccessJwtError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        Self::Jwt(e)
    }
}

fn aud_is_present_and_valid(aud: &serde_json::Value) -> bool {
    match aud {
        serde_json::Value::String(s) => !s.trim().is_empty(),
        serde_json::Value::Array(arr) => arr.iter().any(|v| match v {
            serde_json::Value::String(s) => !s.trim().is_empty(),
            _ => false,
        }),
        // Missing claim ends up as Null due to #[serde(default)]
        _ => false,
    }
}

/// Access token (JWT) claims.
///
/// NOTE:
/// - `sub` is the identity provider's uid (opaque string, not necessarily a UUID).
/// - `role` is a single custom claim; users without an assigned role simply omit it.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessTokenClaims {
    pub iss: String,
    // Keep as Value to accept both string and array. Validation handles audience checks.
    #[serde(default)]
    pub aud: serde_json::Value,

    pub sub: String,
    pub exp: u64,

    #[serde(default)]
    pub role: Option<String>,
}

/// EdDSA (Ed25519) access-token verifier.
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
    pub fn new(
        access_public_key_pem: &str,
        issuer: &str,
        audience: &str,
        leeway_seconds: u64,
    ) -> Result<Self, String> {
        let decoding_key = DecodingKey::from_ed_pem(access_public_key_pem.as_bytes())
            .map_err(|e| format!("invalid ed25519 public key pem: {}", e))?;

        let mut validation = Validation::new(Algorithm::EdDSA);
        validation.set_issuer(&[issuer]);
        validation.set_audience(&[audience]);
        validation.leeway = leeway_seconds;
        validation.validate_nbf = true;

        Ok(Self {
            decoding_key,
            validation,
        })
    }

    // Verify and decode a JWT access token.
    pub fn verify(&self, token: &str) -> Result<AccessTokenClaims, jsonwebtoken::errors::Error> {
        let data =
            jsonwebtoken::decode::<AccessTokenClaims>(token, &self.decoding_key, &self.validation)?;

        Ok(data.claims)
    }

    /// Verify + strict claim validation.
    ///
    /// `jsonwebtoken::Validation` already checks signature, `exp`, `nbf`, `iss` and `aud`.
    /// This method additionally rejects empty `iss` / `sub`, `exp == 0` and a blank `aud`.
    /// An empty `sub` would otherwise be able to match an empty `{id}` path segment.
    pub fn verify_strict(&self, token: &str) -> Result<AccessTokenClaims, AccessJwtError> {
        let claims = self.verify(token)?;

        if claims.iss.trim().is_empty() {
            return Err(AccessJwtError::EmptyClaim("iss"));
        }
        if claims.sub.trim().is_empty() {
            return Err(AccessJwtError::EmptyClaim("sub"));
        }
        if claims.exp == 0 {
            return Err(AccessJwtError::EmptyClaim("exp"));
        }
        if !aud_is_present_and_valid(&claims.aud) {
            return Err(AccessJwtError::MissingOrInvalidAud);
        }

        Ok(claims)
    }

    /// Verify + strict validation, then convert the claims into the request identity.
    ///
    /// This is the entry-point for the access middleware.
    pub fn verify_identity(&self, token: &str) -> Result<Identity, AccessJwtError> {
        let claims = self.verify_strict(token)?;

        Ok(Identity::new(claims.sub, claims.role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{TEST_AUDIENCE, TEST_ISSUER, TestClaims, sign, test_auth_service};

    #[test]
    fn verifies_sub_and_role() {
        let auth = test_auth_service();
        let token = sign(&TestClaims::new("u1").role("student"));

        let identity = auth.verify_identity(&token).unwrap();
        assert_eq!(identity.user_id.as_deref(), Some("u1"));
        assert_eq!(identity.role.as_deref(), Some("student"));
    }

    #[test]
    fn role_claim_is_optional() {
        let auth = test_auth_service();
        let token = sign(&TestClaims::new("u1"));

        let identity = auth.verify_identity(&token).unwrap();
        assert_eq!(identity.role, None);
    }

    #[test]
    fn rejects_empty_sub() {
        let auth = test_auth_service();
        let token = sign(&TestClaims::new(""));

        let err = auth.verify_identity(&token).unwrap_err();
        assert!(matches!(err, AccessJwtError::EmptyClaim("sub")));
    }

    #[test]
    fn rejects_wrong_audience() {
        let auth = test_auth_service();
        let mut claims = TestClaims::new("u1");
        claims.aud = "someone-else".into();

        let err = auth.verify_identity(&sign(&claims)).unwrap_err();
        assert!(matches!(err, AccessJwtError::Jwt(_)));
    }

    #[test]
    fn rejects_expired_token() {
        let auth = test_auth_service();
        let mut claims = TestClaims::new("u1");
        claims.exp = 1_000;

        assert!(auth.verify_identity(&sign(&claims)).is_err());
    }

    #[test]
    fn rejects_token_not_yet_valid() {
        let auth = test_auth_service();
        let mut claims = TestClaims::new("u1");
        claims.nbf = Some((chrono::Utc::now().timestamp() + 600) as u64);

        let err = auth.verify_identity(&sign(&claims)).unwrap_err();
        assert!(matches!(err, AccessJwtError::Jwt(_)));
    }

    #[test]
    fn accepts_token_past_nbf() {
        let auth = test_auth_service();
        let mut claims = TestClaims::new("u1");
        claims.nbf = Some((chrono::Utc::now().timestamp() - 60) as u64);

        assert!(auth.verify_identity(&sign(&claims)).is_ok());
    }

    #[test]
    fn rejects_garbage() {
        let auth = test_auth_service();
        assert!(auth.verify_identity("not-a-jwt").is_err());
    }

    #[test]
    fn rejects_invalid_public_key() {
        let err = AuthService::new("not a pem", TEST_ISSUER, TEST_AUDIENCE, 0).unwrap_err();
        assert!(err.contains("invalid ed25519 public key pem"));
    }
}
