//! Token encoding/decoding (HS256).

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::claims::{AccessClaims, TokenValidationError, validate_claims};

/// Signature verification + claims validation behind one seam.
///
/// The HTTP middleware holds this as a trait object so tests can substitute
/// their own validator if they ever need to.
pub trait TokenValidator: Send + Sync {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<AccessClaims, TokenValidationError>;
}

/// HS256 validator over a shared secret.
pub struct Hs256TokenValidator {
    decoding_key: DecodingKey,
}

impl Hs256TokenValidator {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_ref()),
        }
    }
}

impl TokenValidator for Hs256TokenValidator {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<AccessClaims, TokenValidationError> {
        // Temporal checks are done by `validate_claims` against our own
        // timestamp claims, not jsonwebtoken's `exp` handling.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let data = jsonwebtoken::decode::<AccessClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| TokenValidationError::Malformed(e.to_string()))?;

        validate_claims(&data.claims, now)?;
        Ok(data.claims)
    }
}

/// Mint an HS256 token for the given claims.
///
/// Used by dev tooling and the black-box API tests; production deployments
/// are expected to receive tokens from an external identity provider.
pub fn mint_hs256(secret: impl AsRef<[u8]>, claims: &AccessClaims) -> Result<String, TokenValidationError> {
    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
    .map_err(|e| TokenValidationError::Malformed(e.to_string()))
}
