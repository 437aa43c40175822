use super::jwt::{AuthError, JwtAuth, TokenType};
use crate::errors::AppError;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};

/// Token part of `Authorization: Bearer <token>`.
///
/// `None` when the header is absent or uses another scheme. A bare `Bearer`
/// yields an empty token, which then fails verification.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ').unwrap_or((value, ""));
    scheme
        .eq_ignore_ascii_case("bearer")
        .then(|| token.trim())
}

/// Rejects requests without a valid access token.
///
/// On success the verified [`JwtClaims`](super::JwtClaims) are inserted into
/// the request extensions.
///
/// ```ignore
/// let protected = Router::new()
///     .route("/products/", get(list_products))
///     .layer(axum::middleware::from_fn_with_state(auth, jwt_auth_middleware));
/// ```
pub async fn jwt_auth_middleware(
    State(auth): State<JwtAuth>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(token) = bearer_token(request.headers()) else {
        tracing::debug!("No bearer token on request");
        return Err(AppError::Unauthorized(AuthError::MissingCredentials.to_string()));
    };

    let claims = auth.verify(token, TokenType::Access).map_err(|e| {
        tracing::debug!(error = ?e, "JWT verification failed");
        AppError::Unauthorized("Given token not valid for any token type".to_string())
    })?;

    tracing::trace!(sub = %claims.sub, "Authenticated request");
    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
