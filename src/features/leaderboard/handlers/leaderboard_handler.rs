use axum::{extract::State, Json};
use std::sync::Arc;

use crate::core::error::Result;
use crate::features::leaderboard::dtos::LeaderboardEntryDto;
use crate::features::leaderboard::services::LeaderboardService;

/// Top users by points
#[utoipa::path(
    get,
    path = "/api/leaderboard",
    tag = "leaderboard",
    responses(
        (status = 200, description = "At most 100 users, highest points first", body = Vec<LeaderboardEntryDto>)
    )
)]
pub async fn get_leaderboard(
    State(service): State<Arc<LeaderboardService>>,
) -> Result<Json<Vec<LeaderboardEntryDto>>> {
    let entries = service.top().await?;
    Ok(Json(entries))
}
