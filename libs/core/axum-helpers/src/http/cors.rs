use axum::http::{HeaderValue, Method, header};
use core_config::{ConfigError, FromEnv};
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Browser origins allowed to call the API.
///
/// `CORS_ALLOWED_ORIGIN` holds a comma-separated list. When unset, no CORS
/// headers are emitted and only same-origin or non-browser clients work.
#[derive(Clone, Debug, Default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<HeaderValue>,
}

impl FromEnv for CorsConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let Ok(raw) = std::env::var("CORS_ALLOWED_ORIGIN") else {
            return Ok(Self::default());
        };

        let allowed_origins = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(HeaderValue::from_str)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ConfigError::ParseError {
                key: "CORS_ALLOWED_ORIGIN".to_string(),
                details: e.to_string(),
            })?;

        Ok(Self { allowed_origins })
    }
}

/// `None` when no origins are configured
pub fn create_cors_layer(config: &CorsConfig) -> Option<CorsLayer> {
    if config.allowed_origins.is_empty() {
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(config.allowed_origins.clone()))
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
            .max_age(Duration::from_secs(3600)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_means_no_layer() {
        temp_env::with_var_unset("CORS_ALLOWED_ORIGIN", || {
            let config = CorsConfig::from_env().unwrap();
            assert!(config.allowed_origins.is_empty());
            assert!(create_cors_layer(&config).is_none());
        });
    }

    #[test]
    fn test_parses_list() {
        temp_env::with_var(
            "CORS_ALLOWED_ORIGIN",
            Some("http://localhost:3000, https://shop.example.com,"),
            || {
                let config = CorsConfig::from_env().unwrap();
                assert_eq!(config.allowed_origins.len(), 2);
                assert!(create_cors_layer(&config).is_some());
            },
        );
    }

    #[test]
    fn test_rejects_invalid_header_value() {
        temp_env::with_var("CORS_ALLOWED_ORIGIN", Some("http://bad\nhost"), || {
            assert!(CorsConfig::from_env().is_err());
        });
    }
}
