use crate::core::middleware::auth_middleware;
use crate::features::auth::handlers;
use crate::features::auth::TokenService;
use crate::features::users::UserService;
use axum::{middleware::from_fn_with_state, routing::get, Router};
use std::sync::Arc;

/// Routes that resolve the caller from the bearer token
pub fn routes(service: Arc<UserService>, tokens: Arc<TokenService>) -> Router {
    Router::new()
        .route("/api/auth/me", get(handlers::get_me))
        .route_layer(from_fn_with_state(tokens, auth_middleware))
        .with_state(service)
}
