use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

use crate::features::reports::models::ReportStatus;
use crate::modules::vision::WasteType;

/// Report counts for each lifecycle status, zeros included
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReportsByStatusDto {
    pub reported: u32,
    pub claimed: u32,
    pub cleaned: u32,
    pub verified: u32,
}

impl ReportsByStatusDto {
    pub fn increment(&mut self, status: ReportStatus) {
        match status {
            ReportStatus::Reported => self.reported += 1,
            ReportStatus::Claimed => self.claimed += 1,
            ReportStatus::Cleaned => self.cleaned += 1,
            ReportStatus::Verified => self.verified += 1,
        }
    }
}

/// Platform-wide totals
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsDto {
    pub total_reports: u32,
    /// Verified cleanups only
    pub total_cleanups: u32,
    pub total_users: u32,
    /// Sum of every user's points
    pub total_points_awarded: u64,
    pub reports_by_status: ReportsByStatusDto,
    /// Number of classification entries per waste type across all reports
    pub waste_type_distribution: BTreeMap<WasteType, u32>,
}
