use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::core::middleware::auth_middleware;
use crate::features::auth::TokenService;
use crate::features::reports::handlers;
use crate::features::reports::services::ReportService;

/// Room for multipart boundaries and the text fields around the image
const MULTIPART_OVERHEAD: usize = 1024 * 1024;

/// Report routes. Only the calls that act on behalf of a user read the bearer token.
pub fn routes(service: Arc<ReportService>, tokens: Arc<TokenService>) -> Router {
    let body_limit = service.max_upload_size() + MULTIPART_OVERHEAD;
    let bearer = from_fn_with_state(tokens, auth_middleware);

    Router::new()
        .route(
            "/api/reports",
            post(handlers::create_report)
                .layer(DefaultBodyLimit::max(body_limit))
                .layer(bearer.clone())
                .get(handlers::list_reports),
        )
        .route("/api/reports/{id}", get(handlers::get_report))
        .route(
            "/api/reports/{id}/claim",
            post(handlers::claim_report).layer(bearer.clone()),
        )
        .route(
            "/api/reports/{id}/cleanup",
            post(handlers::submit_cleanup)
                .layer(DefaultBodyLimit::max(body_limit))
                .layer(bearer),
        )
        .route("/api/reports/{id}/cleanups", get(handlers::list_cleanups))
        .with_state(service)
}
