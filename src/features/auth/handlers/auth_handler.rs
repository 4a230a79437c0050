use crate::core::error::Result;
use crate::features::auth::AuthenticatedUser;
use crate::features::users::dtos::UserResponseDto;
use crate::features::users::UserService;
use crate::shared::types::ErrorResponse;
use axum::{extract::State, Json};
use std::sync::Arc;

/// Get the user identified by the bearer token
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user retrieved successfully", body = UserResponseDto),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Token user no longer exists", body = ErrorResponse)
    ),
    tag = "auth",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_me(
    user: AuthenticatedUser,
    State(service): State<Arc<UserService>>,
) -> Result<Json<UserResponseDto>> {
    let profile = service.get_by_id(&user.user_id).await?;
    Ok(Json(profile))
}
