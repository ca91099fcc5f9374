//! Session token signing and verification (HS256).

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use crate::{JwtClaims, Principal, TokenValidationError, validate_claims};

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token could not be decoded: {0}")]
    Decode(#[source] jsonwebtoken::errors::Error),

    #[error("token could not be signed: {0}")]
    Encode(#[source] jsonwebtoken::errors::Error),

    #[error(transparent)]
    Claims(#[from] TokenValidationError),
}

/// A freshly signed token and the instant it stops being accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Verifies a presented bearer token and returns its claims.
///
/// `now` is explicit so expiry checks are deterministic under test.
pub trait JwtValidator: Send + Sync {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, TokenError>;
}

/// Mints session tokens at login.
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, principal: &Principal, now: DateTime<Utc>) -> Result<IssuedToken, TokenError>;
}

/// HS256 codec keyed by one process-wide secret.
///
/// Read-only after construction; share it behind an `Arc`.
pub struct Hs256JwtCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl Hs256JwtCodec {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Time-window checks run in `validate_claims` against the caller's clock.
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl core::fmt::Debug for Hs256JwtCodec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Hs256JwtCodec")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl JwtValidator for Hs256JwtCodec {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, TokenError> {
        let data = jsonwebtoken::decode::<JwtClaims>(token, &self.decoding, &self.validation)
            .map_err(TokenError::Decode)?;
        validate_claims(&data.claims, now)?;
        Ok(data.claims)
    }
}

impl TokenIssuer for Hs256JwtCodec {
    fn issue(&self, principal: &Principal, now: DateTime<Utc>) -> Result<IssuedToken, TokenError> {
        let claims = JwtClaims::for_principal(principal, now, self.ttl);
        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(TokenError::Encode)?;
        Ok(IssuedToken {
            token,
            expires_at: now + self.ttl,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Role;
    use artisanhome_core::UserId;

    fn principal(role: Role) -> Principal {
        Principal {
            user_id: UserId::new(),
            email: "admin@x.com".to_string(),
            role,
        }
    }

    #[test]
    fn issued_token_validates_to_same_claims() {
        let codec = Hs256JwtCodec::new(b"secret", Duration::hours(1));
        let now = Utc::now();
        let p = principal(Role::Admin);

        let issued = codec.issue(&p, now).unwrap();
        let claims = codec.validate(&issued.token, now).unwrap();

        assert_eq!(Principal::from(claims), p);
        assert_eq!(issued.expires_at, now + Duration::hours(1));
    }

    #[test]
    fn other_secret_is_rejected() {
        let signer = Hs256JwtCodec::new(b"secret", Duration::hours(1));
        let verifier = Hs256JwtCodec::new(b"another", Duration::hours(1));
        let now = Utc::now();

        let issued = signer.issue(&principal(Role::User), now).unwrap();
        assert!(matches!(verifier.validate(&issued.token, now), Err(TokenError::Decode(_))));
    }

    #[test]
    fn expired_token_is_rejected_even_with_valid_signature() {
        let codec = Hs256JwtCodec::new(b"secret", Duration::minutes(5));
        let issued_at = Utc::now() - Duration::hours(1);

        let issued = codec.issue(&principal(Role::Admin), issued_at).unwrap();
        assert!(matches!(
            codec.validate(&issued.token, Utc::now()),
            Err(TokenError::Claims(TokenValidationError::Expired))
        ));
    }

    #[test]
    fn garbage_is_rejected() {
        let codec = Hs256JwtCodec::new(b"secret", Duration::hours(1));
        assert!(codec.validate("not.a.jwt", Utc::now()).is_err());
    }
}
