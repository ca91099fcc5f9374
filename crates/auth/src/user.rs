//! Back-office user accounts and credential login.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use artisanhome_core::{DomainError, DomainResult, UserId};

use crate::{AuthError, PasswordError, Principal, Role, TokenError, TokenIssuer, verify_password};

/// Stored account. The password hash never leaves the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: UserId,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl UserAccount {
    pub fn new(
        email: impl Into<String>,
        name: impl Into<String>,
        password_hash: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id: UserId::new(),
            email: normalize_email(&email.into()),
            name: name.into(),
            password_hash: password_hash.into(),
            role,
            created_at: Utc::now(),
        }
    }

    pub fn principal(&self) -> Principal {
        Principal {
            user_id: self.id,
            email: self.email.clone(),
            role: self.role,
        }
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            email: self.email.clone(),
            name: self.name.clone(),
            role: self.role,
        }
    }
}

/// Public view of an account (login response, `me`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub role: Role,
}

/// Account lookup used by login and `me`.
pub trait UserDirectory: Send + Sync {
    fn find_by_email(&self, email: &str) -> Option<UserAccount>;
    fn find_by_id(&self, id: &UserId) -> Option<UserAccount>;
}

/// In-memory directory for dev/tests (seeded with the admin account at startup).
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    users: RwLock<HashMap<UserId, UserAccount>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an account; emails are unique (case-insensitive).
    pub fn insert(&self, account: UserAccount) -> DomainResult<()> {
        let mut users = self
            .users
            .write()
            .map_err(|_| DomainError::validation("user directory unavailable"))?;

        if users.values().any(|u| u.email == account.email) {
            return Err(DomainError::validation(format!(
                "email '{}' already registered",
                account.email
            )));
        }

        users.insert(account.id, account);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.users.read().map(|u| u.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl UserDirectory for InMemoryUserDirectory {
    fn find_by_email(&self, email: &str) -> Option<UserAccount> {
        let email = normalize_email(email);
        let users = self.users.read().ok()?;
        users.values().find(|u| u.email == email).cloned()
    }

    fn find_by_id(&self, id: &UserId) -> Option<UserAccount> {
        let users = self.users.read().ok()?;
        users.get(id).cloned()
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Result of a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginSession {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: UserProfile,
}

#[derive(Debug, Error)]
pub enum LoginError {
    /// Unknown email or wrong password (indistinguishable to the caller).
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

/// Check credentials and mint a session token.
pub fn login(
    directory: &dyn UserDirectory,
    issuer: &dyn TokenIssuer,
    email: &str,
    password: &str,
    now: DateTime<Utc>,
) -> Result<LoginSession, LoginError> {
    let Some(account) = directory.find_by_email(email) else {
        tracing::info!(email, "login rejected: unknown email");
        return Err(AuthError::Unauthenticated.into());
    };

    if !verify_password(password, &account.password_hash)? {
        tracing::info!(user = %account.id, "login rejected: wrong password");
        return Err(AuthError::Unauthenticated.into());
    }

    let issued = issuer.issue(&account.principal(), now)?;
    tracing::info!(user = %account.id, role = %account.role, "login succeeded");

    Ok(LoginSession {
        token: issued.token,
        expires_at: issued.expires_at,
        user: account.profile(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Hs256JwtCodec, JwtValidator, hash_password_with_cost};
    use chrono::Duration;

    fn directory_with_admin() -> (InMemoryUserDirectory, UserAccount) {
        let dir = InMemoryUserDirectory::new();
        let hash = hash_password_with_cost("correct", 4).unwrap();
        let admin = UserAccount::new("admin@x.com", "Admin User", hash, Role::Admin);
        dir.insert(admin.clone()).unwrap();
        (dir, admin)
    }

    #[test]
    fn login_with_correct_password_issues_admin_token() {
        let (dir, admin) = directory_with_admin();
        let codec = Hs256JwtCodec::new(b"secret", Duration::days(7));
        let now = Utc::now();

        let session = login(&dir, &codec, "admin@x.com", "correct", now).unwrap();
        assert_eq!(session.user, admin.profile());
        assert_eq!(session.expires_at, now + Duration::days(7));

        let claims = codec.validate(&session.token, now).unwrap();
        assert_eq!(claims.role, Role::Admin);
        assert_eq!(claims.sub, admin.id);
        assert_eq!(claims.email, "admin@x.com");
    }

    #[test]
    fn wrong_password_is_unauthenticated() {
        let (dir, _) = directory_with_admin();
        let codec = Hs256JwtCodec::new(b"secret", Duration::days(7));

        let err = login(&dir, &codec, "admin@x.com", "incorrect", Utc::now()).unwrap_err();
        assert!(matches!(err, LoginError::Auth(AuthError::Unauthenticated)));
    }

    #[test]
    fn unknown_email_is_unauthenticated() {
        let (dir, _) = directory_with_admin();
        let codec = Hs256JwtCodec::new(b"secret", Duration::days(7));

        let err = login(&dir, &codec, "nobody@x.com", "correct", Utc::now()).unwrap_err();
        assert!(matches!(err, LoginError::Auth(AuthError::Unauthenticated)));
    }

    #[test]
    fn email_lookup_ignores_case_and_padding() {
        let (dir, admin) = directory_with_admin();
        assert_eq!(dir.find_by_email("  ADMIN@x.com ").map(|u| u.id), Some(admin.id));
        assert_eq!(dir.find_by_id(&admin.id).map(|u| u.email), Some(admin.email));
    }

    #[test]
    fn duplicate_email_is_rejected() {
        let (dir, _) = directory_with_admin();
        let dup = UserAccount::new("Admin@X.com", "Other", "hash", Role::User);
        assert!(dir.insert(dup).is_err());
        assert_eq!(dir.len(), 1);
    }

    #[test]
    fn profile_serialization_omits_hash() {
        let (_, admin) = directory_with_admin();
        let json = serde_json::to_value(&admin).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["role"], "admin");
    }
}
