use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::features::reports::models::{Cleanup, Report, ReportStatus};
use crate::modules::vision::{CleanupVerification, WasteClassification};

/// Response DTO for report
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponseDto {
    pub id: Uuid,
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    pub description: String,
    /// Public URL of the report photo
    pub image_url: String,
    /// User id of the reporter, or `anonymous`
    pub reporter_id: String,
    pub status: ReportStatus,
    pub waste_classifications: Vec<WasteClassification>,
    pub points_awarded: u32,
    pub created_at: DateTime<Utc>,
    pub claimed_by: Option<String>,
    pub cleanup_images: Vec<String>,
}

impl From<Report> for ReportResponseDto {
    fn from(r: Report) -> Self {
        Self {
            id: r.id,
            latitude: r.latitude,
            longitude: r.longitude,
            address: r.address,
            description: r.description,
            image_url: r.image_url,
            reporter_id: r.reporter_id,
            status: r.status,
            waste_classifications: r.waste_classifications,
            points_awarded: r.points_awarded,
            created_at: r.created_at,
            claimed_by: r.claimed_by,
            cleanup_images: r.cleanup_images,
        }
    }
}

/// Response DTO for a cleanup submission
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CleanupResponseDto {
    pub id: Uuid,
    pub report_id: Uuid,
    pub user_id: Option<String>,
    pub cleanup_image_url: String,
    pub verification: CleanupVerification,
    pub submitted_at: DateTime<Utc>,
}

impl From<Cleanup> for CleanupResponseDto {
    fn from(c: Cleanup) -> Self {
        Self {
            id: c.id,
            report_id: c.report_id,
            user_id: c.user_id,
            cleanup_image_url: c.cleanup_image_url,
            verification: c.verification,
            submitted_at: c.submitted_at,
        }
    }
}

/// Result of `POST /api/reports/{id}/cleanup`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CleanupSubmissionResponseDto {
    pub cleanup: CleanupResponseDto,
    pub report: ReportResponseDto,
    pub message: String,
}

/// Request DTO for claiming a report
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClaimReportDto {
    pub user_id: Option<String>,
}

/// Query parameters for listing reports
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ReportListQuery {
    /// Only reports in this status (`reported`, `claimed`, `cleaned`, `verified`)
    pub status: Option<String>,
    /// Only reports this user reported or claimed
    pub user_id: Option<String>,
}

/// Multipart form of `POST /api/reports` (documentation only)
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
#[schema(rename_all = "camelCase")]
pub struct UploadReportDto {
    /// jpeg, jpg, png, gif or webp photo, at most 10 MB
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
    pub latitude: String,
    pub longitude: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub reporter_id: Option<String>,
}

/// Multipart form of `POST /api/reports/{id}/cleanup` (documentation only)
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
#[schema(rename_all = "camelCase")]
pub struct SubmitCleanupDto {
    /// Photo of the cleaned site
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
    pub user_id: Option<String>,
}

/// An image file read from a multipart body
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub data: Vec<u8>,
    pub file_name: String,
    pub content_type: String,
}

/// Fields of a new report as submitted by the client
#[derive(Debug, Default)]
pub struct NewReportInput {
    pub image: Option<ImageUpload>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub reporter_id: Option<String>,
}

/// Fields of a cleanup submission as submitted by the client
#[derive(Debug, Default)]
pub struct CleanupInput {
    pub image: Option<ImageUpload>,
    pub user_id: Option<String>,
}
