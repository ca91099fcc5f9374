//! Request guard: bearer authentication followed by role gating.
//!
//! Transport-agnostic; the HTTP layer hands in the raw `Authorization` header
//! and maps [`AuthError`] to 401/403.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::{JwtValidator, Principal, Role};

/// Guard failure. Terminal for the request.
///
/// Every credential problem (missing, malformed, expired, bad signature)
/// collapses into `Unauthenticated`; the reason is only logged.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    #[error("unauthenticated")]
    Unauthenticated,

    #[error("forbidden: requires role '{0}'")]
    Forbidden(Role),
}

/// Proof that a request carried a valid session token.
///
/// Only [`Guard::authenticate`] constructs this, so a role check can never run
/// against a request that skipped authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authenticated {
    principal: Principal,
}

impl Authenticated {
    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    pub fn into_principal(self) -> Principal {
        self.principal
    }

    /// Fail with `Forbidden` unless the principal holds exactly `role`.
    pub fn require_role(&self, role: Role) -> Result<&Principal, AuthError> {
        if self.principal.role == role {
            Ok(&self.principal)
        } else {
            Err(AuthError::Forbidden(role))
        }
    }
}

/// Stateless token guard: no session table, only signature and expiry.
#[derive(Clone)]
pub struct Guard {
    validator: Arc<dyn JwtValidator>,
}

impl Guard {
    pub fn new(validator: Arc<dyn JwtValidator>) -> Self {
        Self { validator }
    }

    /// Resolve the principal from an `Authorization` header value.
    pub fn authenticate(
        &self,
        authorization: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Authenticated, AuthError> {
        let Some(token) = extract_bearer(authorization) else {
            tracing::debug!("rejecting request: missing bearer token");
            return Err(AuthError::Unauthenticated);
        };

        let claims = self.validator.validate(token, now).map_err(|e| {
            tracing::debug!(error = %e, "rejecting request: invalid token");
            AuthError::Unauthenticated
        })?;

        Ok(Authenticated {
            principal: claims.into(),
        })
    }

    /// `authenticate` then `require_role`, in that order.
    pub fn authorize(
        &self,
        authorization: Option<&str>,
        role: Role,
        now: DateTime<Utc>,
    ) -> Result<Authenticated, AuthError> {
        let session = self.authenticate(authorization, now)?;
        if let Err(e) = session.require_role(role) {
            tracing::debug!(
                user = %session.principal().user_id,
                have = %session.principal().role,
                need = %role,
                "rejecting request: insufficient role"
            );
            return Err(e);
        }
        Ok(session)
    }
}

impl core::fmt::Debug for Guard {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Guard").finish_non_exhaustive()
    }
}

/// Pull the token out of `Bearer <token>`; `None` for anything else.
pub fn extract_bearer(header: Option<&str>) -> Option<&str> {
    let token = header?.strip_prefix("Bearer ")?.trim();
    if token.is_empty() { None } else { Some(token) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Hs256JwtCodec, JwtClaims, TokenIssuer};
    use artisanhome_core::UserId;
    use chrono::Duration;
    use jsonwebtoken::{EncodingKey, Header};

    const SECRET: &[u8] = b"guard-secret";

    fn codec() -> Arc<Hs256JwtCodec> {
        Arc::new(Hs256JwtCodec::new(SECRET, Duration::hours(1)))
    }

    fn bearer(codec: &Hs256JwtCodec, role: Role, issued_at: DateTime<Utc>) -> (Principal, String) {
        let principal = Principal {
            user_id: UserId::new(),
            email: "admin@x.com".to_string(),
            role,
        };
        let issued = codec.issue(&principal, issued_at).unwrap();
        (principal, format!("Bearer {}", issued.token))
    }

    #[test]
    fn valid_token_yields_matching_principal() {
        let codec = codec();
        let guard = Guard::new(codec.clone());
        let now = Utc::now();
        let (principal, header) = bearer(&codec, Role::Admin, now);

        let session = guard.authenticate(Some(&header), now).unwrap();
        assert_eq!(session.principal(), &principal);
    }

    #[test]
    fn token_from_a_clock_ahead_instance_is_accepted() {
        let codec = codec();
        let guard = Guard::new(codec.clone());
        let now = Utc::now();
        let (principal, header) = bearer(&codec, Role::Admin, now + Duration::seconds(5));

        let session = guard.authenticate(Some(&header), now).unwrap();
        assert_eq!(session.principal(), &principal);
    }

    #[test]
    fn missing_or_non_bearer_header_is_unauthenticated() {
        let guard = Guard::new(codec());
        let now = Utc::now();
        assert_eq!(guard.authenticate(None, now), Err(AuthError::Unauthenticated));
        assert_eq!(guard.authenticate(Some("Basic abc"), now), Err(AuthError::Unauthenticated));
        assert_eq!(guard.authenticate(Some("Bearer   "), now), Err(AuthError::Unauthenticated));
    }

    #[test]
    fn expired_and_forged_tokens_collapse_to_unauthenticated() {
        let codec = codec();
        let guard = Guard::new(codec.clone());
        let now = Utc::now();

        let (_, expired) = bearer(&codec, Role::Admin, now - Duration::hours(2));
        assert_eq!(guard.authenticate(Some(&expired), now), Err(AuthError::Unauthenticated));

        let forger = Hs256JwtCodec::new(b"not-the-secret", Duration::hours(1));
        let (_, forged) = bearer(&forger, Role::Admin, now);
        assert_eq!(guard.authenticate(Some(&forged), now), Err(AuthError::Unauthenticated));

        assert_eq!(
            guard.authenticate(Some("Bearer abc.def.ghi"), now),
            Err(AuthError::Unauthenticated)
        );
    }

    #[test]
    fn unknown_role_claim_is_unauthenticated() {
        let guard = Guard::new(codec());
        let now = Utc::now().timestamp();
        let token = jsonwebtoken::encode(
            &Header::default(),
            &serde_json::json!({
                "sub": UserId::new(),
                "email": "x@x.com",
                "role": "owner",
                "iat": now,
                "exp": now + 60,
            }),
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        assert_eq!(
            guard.authenticate(Some(&format!("Bearer {token}")), Utc::now()),
            Err(AuthError::Unauthenticated)
        );
    }

    #[test]
    fn require_role_forbids_other_roles() {
        let codec = codec();
        let guard = Guard::new(codec.clone());
        let now = Utc::now();

        let (_, user) = bearer(&codec, Role::User, now);
        assert_eq!(
            guard.authorize(Some(&user), Role::Admin, now),
            Err(AuthError::Forbidden(Role::Admin))
        );

        let (admin, header) = bearer(&codec, Role::Admin, now);
        let session = guard.authorize(Some(&header), Role::Admin, now).unwrap();
        assert_eq!(session.require_role(Role::Admin), Ok(&admin));
        assert_eq!(session.require_role(Role::User), Err(AuthError::Forbidden(Role::User)));
    }

    #[test]
    fn unauthenticated_wins_over_forbidden() {
        let guard = Guard::new(codec());
        assert_eq!(
            guard.authorize(None, Role::Admin, Utc::now()),
            Err(AuthError::Unauthenticated)
        );
    }

    #[test]
    fn claims_decode_exactly() {
        let codec = codec();
        let now = Utc::now();
        let (principal, header) = bearer(&codec, Role::User, now);
        let token = extract_bearer(Some(&header)).unwrap();

        let claims: JwtClaims = crate::JwtValidator::validate(codec.as_ref(), token, now).unwrap();
        assert_eq!(claims.sub, principal.user_id);
        assert_eq!(claims.email, principal.email);
        assert_eq!(claims.role, Role::User);
        assert_eq!(claims.iat, now.timestamp());
    }
}
