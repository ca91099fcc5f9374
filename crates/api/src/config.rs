//! Layered configuration: defaults, then `artisanhome.toml`, then environment.
//!
//! Environment keys use the `ARTISANHOME__` prefix and `__` as the section
//! separator (`ARTISANHOME__AUTH__JWT_SECRET`). The bare `JWT_SECRET` and
//! `PORT` variables are honoured as well.

use config::{Config, ConfigBuilder, ConfigError, Environment, File, builder::DefaultState};
use serde::Deserialize;

use artisanhome_observability::LogFormat;

/// Secret used when none is configured. Never acceptable outside development.
pub const DEV_JWT_SECRET: &str = "dev-secret";

/// Longest accepted session lifetime (ten years).
pub const MAX_TOKEN_TTL_HOURS: i64 = 24 * 366 * 10;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub admin: AdminConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
}

impl AuthConfig {
    pub fn uses_dev_secret(&self) -> bool {
        self.jwt_secret == DEV_JWT_SECRET
    }

    /// Session lifetime; fails for non-positive or out-of-range hours.
    pub fn token_ttl(&self) -> Result<chrono::Duration, ConfigError> {
        let hours = self.token_ttl_hours;
        if !(1..=MAX_TOKEN_TTL_HOURS).contains(&hours) {
            return Err(ConfigError::Message(format!(
                "auth.token_ttl_hours must be between 1 and {MAX_TOKEN_TTL_HOURS}, got {hours}"
            )));
        }
        chrono::Duration::try_hours(hours)
            .ok_or_else(|| ConfigError::Message(format!("auth.token_ttl_hours {hours} overflows")))
    }
}

/// Account seeded into the user directory at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    pub format: LogFormat,
}

impl AppConfig {
    /// Load from file and environment on top of the defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let builder = defaults()?
            .add_source(File::with_name("artisanhome").required(false))
            .add_source(
                Environment::with_prefix("ARTISANHOME")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("auth.jwt_secret", std::env::var("JWT_SECRET").ok())?
            .set_override_option("server.port", std::env::var("PORT").ok())?;
        finish(builder)
    }

    /// Built-in defaults only (tests, local tooling).
    pub fn defaults() -> Result<Self, ConfigError> {
        finish(defaults()?)
    }
}

fn finish(builder: ConfigBuilder<DefaultState>) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = builder.build()?.try_deserialize()?;
    config.auth.token_ttl()?;
    Ok(config)
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5000_i64)?
        .set_default("auth.jwt_secret", DEV_JWT_SECRET)?
        .set_default("auth.token_ttl_hours", 24_i64 * 7)?
        .set_default("admin.email", "admin@artisanhome.in")?
        .set_default("admin.password", "admin123")?
        .set_default("admin.name", "Admin User")?
        .set_default("log.format", "json")
}
