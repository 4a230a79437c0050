use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::users::models::User;

/// Request DTO for user registration
///
/// Fields are optional so a missing field produces the same error as an
/// empty one.
#[derive(Debug, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterRequestDto {
    #[validate(length(max = 50, message = "Username must be at most 50 characters"))]
    pub username: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    pub password: Option<String>,
}

impl RegisterRequestDto {
    /// Returns `(username, email, password)` when all three are present and non-blank
    pub fn required_fields(&self) -> Option<(String, String, String)> {
        let present = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        Some((
            present(&self.username)?,
            present(&self.email)?,
            self.password.clone().filter(|p| !p.is_empty())?,
        ))
    }
}

/// Request DTO for user login
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct LoginRequestDto {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Public view of a user, without credentials
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponseDto {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub points: u32,
    pub reports_created: u32,
    pub cleanups_completed: u32,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponseDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            points: user.points,
            reports_created: user.reports_created,
            cleanups_completed: user.cleanups_completed,
            created_at: user.created_at,
        }
    }
}

/// Response DTO for register/login
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponseDto {
    pub user: UserResponseDto,
    /// HS256 bearer token
    pub token: String,
}
