use super::config::JwtConfig;
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// Claims carried by both token kinds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,
    pub token_type: TokenType,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Authentication credentials were not provided.")]
    MissingCredentials,

    #[error("Given token not valid for any token type")]
    InvalidToken(#[source] jsonwebtoken::errors::Error),

    #[error("Token has wrong type")]
    WrongTokenType { expected: TokenType },

    #[error("Failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

/// HS256 signer and verifier for access and refresh tokens.
///
/// Cheap to clone; the keys are shared.
#[derive(Clone)]
pub struct JwtAuth {
    keys: Arc<Keys>,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl JwtAuth {
    pub fn new(config: &JwtConfig) -> Self {
        let secret = config.secret.as_bytes();
        tracing::info!(
            access_ttl_secs = config.access_ttl_secs,
            refresh_ttl_secs = config.refresh_ttl_secs,
            "JWT auth initialized"
        );
        Self {
            keys: Arc::new(Keys {
                encoding: EncodingKey::from_secret(secret),
                decoding: DecodingKey::from_secret(secret),
            }),
            access_ttl: Duration::seconds(config.access_ttl_secs),
            refresh_ttl: Duration::seconds(config.refresh_ttl_secs),
        }
    }

    pub fn issue_access_token(&self, subject: &str) -> Result<String, AuthError> {
        self.issue(subject, TokenType::Access, self.access_ttl)
    }

    pub fn issue_refresh_token(&self, subject: &str) -> Result<String, AuthError> {
        self.issue(subject, TokenType::Refresh, self.refresh_ttl)
    }

    pub fn issue_pair(&self, subject: &str) -> Result<TokenPair, AuthError> {
        Ok(TokenPair {
            access: self.issue_access_token(subject)?,
            refresh: self.issue_refresh_token(subject)?,
        })
    }

    /// Exchange a valid refresh token for a fresh access token
    pub fn refresh(&self, refresh_token: &str) -> Result<String, AuthError> {
        let claims = self.verify(refresh_token, TokenType::Refresh)?;
        tracing::debug!(sub = %claims.sub, "Issuing access token from refresh token");
        self.issue_access_token(&claims.sub)
    }

    /// Check signature, expiry and token type
    pub fn verify(&self, token: &str, expected: TokenType) -> Result<JwtClaims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub"]);

        let claims = decode::<JwtClaims>(token, &self.keys.decoding, &validation)
            .map_err(AuthError::InvalidToken)?
            .claims;

        if claims.token_type != expected {
            return Err(AuthError::WrongTokenType { expected });
        }
        Ok(claims)
    }

    fn issue(&self, subject: &str, token_type: TokenType, ttl: Duration) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = JwtClaims {
            sub: subject.to_string(),
            token_type,
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };
        self.sign(&claims)
    }

    pub(crate) fn sign(&self, claims: &JwtClaims) -> Result<String, AuthError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.keys.encoding)
            .map_err(AuthError::Signing)
    }
}
