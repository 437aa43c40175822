//! JWT settings loaded through `core_config::FromEnv`.

use core_config::{ConfigError, FromEnv, env_parse, env_required};

pub const MIN_SECRET_LEN: usize = 32;

/// Signing secret and token lifetimes.
///
/// - `JWT_SECRET` (required, at least 32 characters)
/// - `JWT_ACCESS_TTL_SECS` (default 300)
/// - `JWT_REFRESH_TTL_SECS` (default 86400)
#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub access_ttl_secs: i64,
    pub refresh_ttl_secs: i64,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>) -> Result<Self, ConfigError> {
        let secret = secret.into();
        check_secret(&secret)?;
        Ok(Self {
            secret,
            access_ttl_secs: 300,
            refresh_ttl_secs: 86_400,
        })
    }

    pub fn with_ttls(mut self, access_ttl_secs: i64, refresh_ttl_secs: i64) -> Self {
        self.access_ttl_secs = access_ttl_secs;
        self.refresh_ttl_secs = refresh_ttl_secs;
        self
    }
}

fn check_secret(secret: &str) -> Result<(), ConfigError> {
    if secret.len() < MIN_SECRET_LEN {
        return Err(ConfigError::Invalid {
            key: "JWT_SECRET".to_string(),
            reason: format!(
                "must be at least {MIN_SECRET_LEN} characters (got {}). Generate one with: openssl rand -base64 32",
                secret.len()
            ),
        });
    }
    Ok(())
}

impl FromEnv for JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let secret = env_required("JWT_SECRET")?;
        check_secret(&secret)?;

        let access_ttl_secs: i64 = env_parse("JWT_ACCESS_TTL_SECS", "300")?;
        let refresh_ttl_secs: i64 = env_parse("JWT_REFRESH_TTL_SECS", "86400")?;
        if access_ttl_secs <= 0 || refresh_ttl_secs <= 0 {
            return Err(ConfigError::Invalid {
                key: "JWT_ACCESS_TTL_SECS".to_string(),
                reason: "token lifetimes must be positive".to_string(),
            });
        }

        Ok(Self {
            secret,
            access_ttl_secs,
            refresh_ttl_secs,
        })
    }
}
