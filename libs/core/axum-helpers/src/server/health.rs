use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use core_config::AppInfo;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Connected,
    Disconnected,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReadyResponse {
    /// "ready" or "not ready"
    pub status: String,
    pub checks: BTreeMap<String, CheckStatus>,
}

/// A boxed dependency probe; `Err` carries a reason for the logs
pub type HealthCheckFuture<'a> = Pin<Box<dyn Future<Output = Result<(), String>> + Send + 'a>>;

/// Run every probe concurrently. 200 when all pass, 503 otherwise.
///
/// ```ignore
/// run_health_checks(vec![(
///     "database",
///     Box::pin(async { check_health(&db).await.map_err(|e| e.to_string()) }),
/// )])
/// .await
/// ```
pub async fn run_health_checks(
    checks: Vec<(&str, HealthCheckFuture<'_>)>,
) -> (StatusCode, Json<ReadyResponse>) {
    let (names, probes): (Vec<_>, Vec<_>) = checks.into_iter().unzip();
    let results = join_all(probes).await;

    let mut all_healthy = true;
    let checks = names
        .into_iter()
        .zip(results)
        .map(|(name, result)| {
            let status = match result {
                Ok(()) => CheckStatus::Connected,
                Err(reason) => {
                    tracing::error!(check = name, %reason, "Readiness check failed");
                    all_healthy = false;
                    CheckStatus::Disconnected
                }
            };
            (name.to_string(), status)
        })
        .collect();

    let response = ReadyResponse {
        status: if all_healthy { "ready" } else { "not ready" }.to_string(),
        checks,
    };
    let code = if all_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (code, Json(response))
}

/// Liveness: always 200 while the process serves requests
pub async fn health_handler(State(app): State<AppInfo>) -> Response {
    let response = HealthResponse {
        status: "healthy".to_string(),
        name: app.name.to_string(),
        version: app.version.to_string(),
    };
    (StatusCode::OK, Json(response)).into_response()
}

/// `GET /health`
pub fn health_router(app_info: AppInfo) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(app_info)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health_reports_app_info() {
        let info = AppInfo {
            name: "products_api",
            version: "0.1.0",
        };
        let response = health_router(info)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: HealthResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.status, "healthy");
        assert_eq!(body.name, "products_api");
    }

    #[tokio::test]
    async fn test_all_checks_pass() {
        let probe: HealthCheckFuture = Box::pin(async { Ok(()) });
        let (status, Json(body)) = run_health_checks(vec![("database", probe)]).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.status, "ready");
        assert_eq!(body.checks["database"], CheckStatus::Connected);
    }

    #[tokio::test]
    async fn test_one_failing_check_is_503() {
        let failing: HealthCheckFuture = Box::pin(async { Err("timeout".to_string()) });
        let passing: HealthCheckFuture = Box::pin(async { Ok(()) });
        let (status, Json(body)) =
            run_health_checks(vec![("database", failing), ("other", passing)]).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.status, "not ready");
        assert_eq!(body.checks["database"], CheckStatus::Disconnected);
        assert_eq!(body.checks["other"], CheckStatus::Connected);
    }
}
