use axum::{
    http::{StatusCode, Uri},
    response::IntoResponse,
};
use tracing::debug;

use crate::axum_http::error_responses::AppError;

/// Unknown routes answer with the same `{code, message}` body as every other
/// failure.
pub async fn not_found(uri: Uri) -> AppError {
    debug!(path = %uri.path(), "router: no route matched");
    AppError::NotFound(format!("No route for {}", uri.path()))
}

pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_route_is_json_404() {
        let response = not_found(Uri::from_static("/api/v1/nope"))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
