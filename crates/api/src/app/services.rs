use std::sync::Arc;

use anyhow::Context;

use artisanhome_auth::{
    Guard, Hs256JwtCodec, InMemoryUserDirectory, Role, UserAccount, UserDirectory, hash_password,
};
use artisanhome_store::Store;

use crate::config::AppConfig;

/// Shared state behind every handler.
#[derive(Clone)]
pub struct AppServices {
    pub store: Arc<Store>,
    pub users: Arc<dyn UserDirectory>,
    pub tokens: Arc<Hs256JwtCodec>,
    pub guard: Guard,
}

impl AppServices {
    pub fn new(store: Arc<Store>, users: Arc<dyn UserDirectory>, tokens: Arc<Hs256JwtCodec>) -> Self {
        let guard = Guard::new(tokens.clone());
        Self {
            store,
            users,
            tokens,
            guard,
        }
    }

    /// Wire the demo store, the seeded admin account, and the token codec.
    pub fn bootstrap(config: &AppConfig) -> anyhow::Result<Self> {
        let hash = hash_password(&config.admin.password).context("hashing admin password")?;
        let users = InMemoryUserDirectory::new();
        users
            .insert(UserAccount::new(
                config.admin.email.as_str(),
                config.admin.name.as_str(),
                hash,
                Role::Admin,
            ))
            .context("seeding admin account")?;
        tracing::info!(email = %config.admin.email, "seeded admin account");

        let ttl = config.auth.token_ttl().context("token lifetime")?;
        let tokens = Arc::new(Hs256JwtCodec::new(config.auth.jwt_secret.as_bytes(), ttl));

        Ok(Self::new(Arc::new(Store::init()), Arc::new(users), tokens))
    }
}

impl core::fmt::Debug for AppServices {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AppServices")
            .field("store", &self.store)
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}
