use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::modules::vision::WasteClassification;

/// Lifecycle of a report
///
/// `reported -> claimed -> cleaned | verified`, and `cleaned -> cleaned | verified`
/// when a new cleanup photo is submitted after a failed verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Reported,
    Claimed,
    Cleaned,
    Verified,
}

impl ReportStatus {
    pub fn can_claim(self) -> bool {
        self == ReportStatus::Reported
    }

    pub fn accepts_cleanup(self) -> bool {
        matches!(self, ReportStatus::Claimed | ReportStatus::Cleaned)
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportStatus::Reported => write!(f, "reported"),
            ReportStatus::Claimed => write!(f, "claimed"),
            ReportStatus::Cleaned => write!(f, "cleaned"),
            ReportStatus::Verified => write!(f, "verified"),
        }
    }
}

/// Stored report as persisted in `reports.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: Uuid,
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    pub description: String,
    pub image_url: String,
    pub original_image_path: String,
    pub reporter_id: String,
    pub status: ReportStatus,
    pub waste_classifications: Vec<WasteClassification>,
    pub points_awarded: u32,
    pub created_at: DateTime<Utc>,
    pub claimed_by: Option<String>,
    #[serde(default)]
    pub cleanup_images: Vec<String>,
}

/// Data for creating a new report
#[derive(Debug)]
pub struct CreateReport {
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    pub description: String,
    pub image_url: String,
    pub original_image_path: String,
    pub reporter_id: String,
    pub waste_classifications: Vec<WasteClassification>,
    pub points_awarded: u32,
}

impl Report {
    pub fn new(data: CreateReport) -> Self {
        Self {
            id: Uuid::new_v4(),
            latitude: data.latitude,
            longitude: data.longitude,
            address: data.address,
            description: data.description,
            image_url: data.image_url,
            original_image_path: data.original_image_path,
            reporter_id: data.reporter_id,
            status: ReportStatus::Reported,
            waste_classifications: data.waste_classifications,
            points_awarded: data.points_awarded,
            created_at: Utc::now(),
            claimed_by: None,
            cleanup_images: Vec::new(),
        }
    }

    /// Whether the given user reported or claimed this report
    pub fn involves(&self, user_id: &str) -> bool {
        self.reporter_id == user_id || self.claimed_by.as_deref() == Some(user_id)
    }
}
