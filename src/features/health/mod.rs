mod handler;

use axum::{routing::get, Router};

pub use handler::{__path_health_check, health_check, HealthResponseDto};

pub fn routes() -> Router {
    Router::new().route("/api/health", get(health_check))
}
