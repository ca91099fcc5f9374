use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use artisanhome_core::UserId;

use crate::{Principal, Role};

/// Session token payload.
///
/// Timestamps are unix seconds (`iat`/`exp`) so tokens stay readable by any
/// standard JWT tooling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject / user identifier.
    pub sub: UserId,

    pub email: String,

    pub role: Role,

    /// Issued-at (unix seconds).
    pub iat: i64,

    /// Expiry (unix seconds).
    pub exp: i64,
}

impl JwtClaims {
    /// Claims for `principal`, valid from `now` for `ttl`.
    pub fn for_principal(principal: &Principal, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            sub: principal.user_id,
            email: principal.email.clone(),
            role: principal.role,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    #[error("token has expired")]
    Expired,

    #[error("invalid token time window (exp <= iat)")]
    InvalidTimeWindow,
}

/// Deterministically validate the time window of decoded claims.
///
/// Signature verification happens before this, in the token codec. Only the
/// expiry is checked against `now`; `iat` may be ahead of the local clock when
/// another instance minted the token.
pub fn validate_claims(claims: &JwtClaims, now: DateTime<Utc>) -> Result<(), TokenValidationError> {
    let now = now.timestamp();
    if claims.exp <= claims.iat {
        return Err(TokenValidationError::InvalidTimeWindow);
    }
    if now >= claims.exp {
        return Err(TokenValidationError::Expired);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(iat: i64, exp: i64) -> JwtClaims {
        JwtClaims {
            sub: UserId::new(),
            email: "admin@x.com".to_string(),
            role: Role::Admin,
            iat,
            exp,
        }
    }

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    #[test]
    fn valid_inside_window() {
        assert_eq!(validate_claims(&claims(100, 200), at(150)), Ok(()));
    }

    #[test]
    fn expired_at_and_after_exp() {
        assert_eq!(validate_claims(&claims(100, 200), at(200)), Err(TokenValidationError::Expired));
        assert_eq!(validate_claims(&claims(100, 200), at(500)), Err(TokenValidationError::Expired));
    }

    #[test]
    fn issued_slightly_in_the_future_is_accepted() {
        assert_eq!(validate_claims(&claims(100, 200), at(95)), Ok(()));
    }

    #[test]
    fn inverted_window() {
        assert_eq!(
            validate_claims(&claims(200, 200), at(200)),
            Err(TokenValidationError::InvalidTimeWindow)
        );
    }

    #[test]
    fn for_principal_sets_window_from_ttl() {
        let principal = Principal {
            user_id: UserId::new(),
            email: "a@b.c".to_string(),
            role: Role::User,
        };
        let c = JwtClaims::for_principal(&principal, at(1_000), Duration::hours(1));
        assert_eq!(c.iat, 1_000);
        assert_eq!(c.exp, 4_600);
        assert_eq!(c.expires_at(), Some(at(4_600)));
        assert_eq!(Principal::from(c), principal);
    }
}
