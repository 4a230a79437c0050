use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::users::dtos::{
    AuthResponseDto, LoginRequestDto, RegisterRequestDto, UserResponseDto,
};
use crate::features::users::services::UserService;
use crate::shared::types::ErrorResponse;
use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/users/register",
    request_body = RegisterRequestDto,
    responses(
        (status = 200, description = "User registered", body = AuthResponseDto),
        (status = 400, description = "Missing fields, malformed email or user already exists", body = ErrorResponse)
    ),
    tag = "users"
)]
pub async fn register(
    State(service): State<Arc<UserService>>,
    AppJson(dto): AppJson<RegisterRequestDto>,
) -> Result<Json<AuthResponseDto>> {
    let response = service.register(dto).await?;
    Ok(Json(response))
}

/// Login with email and password
#[utoipa::path(
    post,
    path = "/api/users/login",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Login successful", body = AuthResponseDto),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    ),
    tag = "users"
)]
pub async fn login(
    State(service): State<Arc<UserService>>,
    AppJson(dto): AppJson<LoginRequestDto>,
) -> Result<Json<AuthResponseDto>> {
    let response = service.login(dto).await?;
    Ok(Json(response))
}

/// Get a user's public profile
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = UserResponseDto),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tag = "users"
)]
pub async fn get_user(
    State(service): State<Arc<UserService>>,
    Path(id): Path<String>,
) -> Result<Json<UserResponseDto>> {
    let user = service.get_by_id(&id).await?;
    Ok(Json(user))
}
