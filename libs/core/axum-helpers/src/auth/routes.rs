//! Token refresh endpoint.

use super::jwt::JwtAuth;
use crate::errors::{AppError, ErrorResponse};
use crate::extractors::ValidatedJson;
use axum::{Json, Router, extract::State, routing::post};
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};
use validator::Validate;

#[derive(OpenApi)]
#[openapi(
    paths(refresh_token),
    components(schemas(RefreshRequest, AccessToken, ErrorResponse)),
    tags((name = "auth", description = "Bearer token exchange"))
)]
pub struct TokenApiDoc;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RefreshRequest {
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub refresh: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AccessToken {
    pub access: String,
}

/// `POST /token/refresh/`
pub fn token_router(auth: JwtAuth) -> Router {
    Router::new()
        .route("/token/refresh/", post(refresh_token))
        .with_state(auth)
}

/// Exchange a refresh token for a new access token
#[utoipa::path(
    post,
    path = "/token/refresh/",
    tag = "auth",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "New access token", body = AccessToken),
        (status = 400, description = "Missing refresh token"),
        (status = 401, description = "Refresh token invalid or expired", body = ErrorResponse)
    )
)]
async fn refresh_token(
    State(auth): State<JwtAuth>,
    ValidatedJson(body): ValidatedJson<RefreshRequest>,
) -> Result<Json<AccessToken>, AppError> {
    let access = auth.refresh(&body.refresh).map_err(|e| {
        tracing::debug!(error = ?e, "Refresh rejected");
        AppError::Unauthorized("Token is invalid or expired".to_string())
    })?;
    Ok(Json(AccessToken { access }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{JwtConfig, TokenType};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn auth() -> JwtAuth {
        JwtAuth::new(&JwtConfig::new("refresh-route-test-secret-32-characters").unwrap())
    }

    async fn post_refresh(auth: JwtAuth, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
        let response = token_router(auth)
            .oneshot(
                Request::post("/token/refresh/")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_refresh_returns_access_token() {
        let auth = auth();
        let pair = auth.issue_pair("alice").unwrap();

        let (status, body) =
            post_refresh(auth.clone(), serde_json::json!({"refresh": pair.refresh})).await;
        assert_eq!(status, StatusCode::OK);
        let access = body["access"].as_str().unwrap();
        assert_eq!(auth.verify(access, TokenType::Access).unwrap().sub, "alice");
    }

    #[tokio::test]
    async fn test_refresh_with_access_token_is_unauthorized() {
        let auth = auth();
        let access = auth.issue_access_token("alice").unwrap();

        let (status, body) = post_refresh(auth, serde_json::json!({"refresh": access})).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, serde_json::json!({"detail": "Token is invalid or expired"}));
    }

    #[tokio::test]
    async fn test_blank_refresh_is_field_error() {
        let (status, body) = post_refresh(auth(), serde_json::json!({"refresh": ""})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({"refresh": ["This field may not be blank."]}));
    }
}
