use axum::{extract::State, Json};
use std::sync::Arc;

use crate::core::error::Result;
use crate::features::statistics::dtos::StatisticsDto;
use crate::features::statistics::services::StatisticsService;

/// Platform-wide statistics
#[utoipa::path(
    get,
    path = "/api/statistics",
    tag = "statistics",
    responses(
        (status = 200, description = "Totals, status breakdown and waste type distribution", body = StatisticsDto)
    )
)]
pub async fn get_statistics(
    State(service): State<Arc<StatisticsService>>,
) -> Result<Json<StatisticsDto>> {
    let stats = service.get().await?;
    Ok(Json(stats))
}
