use serde::Deserialize;
use tracing::warn;

/// Built-in development signing secret. Tokens signed with it are forgeable;
/// `from_env` warns loudly whenever it is in effect.
pub const DEV_JWT_SECRET: &str = "kinoteka-dev-secret";

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub ttl_hours: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let secret = match std::env::var("JWT_SECRET") {
            Ok(s) if !s.is_empty() => s,
            _ => {
                warn!(
                    "JWT_SECRET is not set; falling back to the built-in development secret. \
                     Session tokens are forgeable until JWT_SECRET is configured"
                );
                DEV_JWT_SECRET.into()
            }
        };
        let jwt = JwtConfig {
            secret,
            ttl_hours: std::env::var("JWT_TTL_HOURS")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(24),
        };
        Ok(Self { database_url, jwt })
    }
}
