use axum::http::StatusCode;
use axum::response::IntoResponse;

/// GET liveness check, returns 200 as long as the router is up
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "healthy")
}
