use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::users::models::User;

/// One ranked user on the leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntryDto {
    pub id: Uuid,
    pub username: String,
    pub points: u32,
    pub reports_created: u32,
    pub cleanups_completed: u32,
}

impl From<&User> for LeaderboardEntryDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            points: user.points,
            reports_created: user.reports_created,
            cleanups_completed: user.cleanups_completed,
        }
    }
}
