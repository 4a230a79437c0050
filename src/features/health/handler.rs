use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponseDto {
    pub status: String,
    pub message: String,
}

/// Liveness check
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "health",
    responses(
        (status = 200, description = "Server is running", body = HealthResponseDto)
    )
)]
pub async fn health_check() -> Json<HealthResponseDto> {
    Json(HealthResponseDto {
        status: "OK".to_string(),
        message: "Server is running".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use crate::shared::test_helpers::{test_server, FixedAnalyzer};
    use serde_json::{json, Value};

    #[tokio::test]
    async fn test_health_check() {
        let (_ctx, server) = test_server(FixedAnalyzer::new(true)).await;

        let response = server.get("/api/health").await;
        response.assert_status_ok();
        assert_eq!(
            response.json::<Value>(),
            json!({ "status": "OK", "message": "Server is running" })
        );
    }
}
