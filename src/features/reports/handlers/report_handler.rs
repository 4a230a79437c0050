use axum::{
    extract::{multipart::Field, Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::debug;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::AuthenticatedUser;
use crate::features::reports::dtos::{
    CleanupInput, CleanupResponseDto, CleanupSubmissionResponseDto, ClaimReportDto, ImageUpload,
    NewReportInput, ReportListQuery, ReportResponseDto, SubmitCleanupDto, UploadReportDto,
};
use crate::features::reports::services::ReportService;
use crate::shared::types::ErrorResponse;

/// Create a report
///
/// Accepts multipart/form-data with:
/// - `image`: photo of the site (required)
/// - `latitude`, `longitude`: coordinates (required)
/// - `description`, `address`, `reporterId`: optional
///
/// A bearer token, when present, takes precedence over `reporterId`.
#[utoipa::path(
    post,
    path = "/api/reports",
    tag = "reports",
    request_body(
        content = UploadReportDto,
        content_type = "multipart/form-data",
    ),
    responses(
        (status = 201, description = "Report created", body = ReportResponseDto),
        (status = 400, description = "Missing image or location, or invalid file", body = ErrorResponse),
        (status = 401, description = "Invalid bearer token", body = ErrorResponse)
    )
)]
pub async fn create_report(
    user: Option<AuthenticatedUser>,
    State(service): State<Arc<ReportService>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ReportResponseDto>)> {
    let mut input = NewReportInput::default();

    while let Some(field) = next_field(&mut multipart).await? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "image" => input.image = Some(read_image(field).await?),
            "latitude" => input.latitude = Some(read_text(field).await?),
            "longitude" => input.longitude = Some(read_text(field).await?),
            "description" => input.description = Some(read_text(field).await?),
            "address" => input.address = Some(read_text(field).await?),
            "reporterId" => input.reporter_id = Some(read_text(field).await?),
            _ => debug!("Ignoring unknown field: {}", field_name),
        }
    }

    if let Some(user) = user {
        input.reporter_id = Some(user.user_id);
    }

    let report = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(report)))
}

/// List reports, newest first
#[utoipa::path(
    get,
    path = "/api/reports",
    tag = "reports",
    params(ReportListQuery),
    responses(
        (status = 200, description = "Reports", body = Vec<ReportResponseDto>)
    )
)]
pub async fn list_reports(
    State(service): State<Arc<ReportService>>,
    Query(query): Query<ReportListQuery>,
) -> Result<Json<Vec<ReportResponseDto>>> {
    let reports = service.list(query).await?;
    Ok(Json(reports))
}

/// Get a report by ID
#[utoipa::path(
    get,
    path = "/api/reports/{id}",
    tag = "reports",
    params(
        ("id" = String, Path, description = "Report ID")
    ),
    responses(
        (status = 200, description = "Report found", body = ReportResponseDto),
        (status = 404, description = "Report not found", body = ErrorResponse)
    )
)]
pub async fn get_report(
    State(service): State<Arc<ReportService>>,
    Path(id): Path<String>,
) -> Result<Json<ReportResponseDto>> {
    let report = service.get(&id).await?;
    Ok(Json(report))
}

/// Claim a report for cleanup
#[utoipa::path(
    post,
    path = "/api/reports/{id}/claim",
    tag = "reports",
    params(
        ("id" = String, Path, description = "Report ID")
    ),
    request_body = ClaimReportDto,
    responses(
        (status = 200, description = "Report claimed", body = ReportResponseDto),
        (status = 400, description = "Report not claimable or userId missing", body = ErrorResponse),
        (status = 404, description = "Report not found", body = ErrorResponse)
    )
)]
pub async fn claim_report(
    user: Option<AuthenticatedUser>,
    State(service): State<Arc<ReportService>>,
    Path(id): Path<String>,
    body: Option<AppJson<ClaimReportDto>>,
) -> Result<Json<ReportResponseDto>> {
    let dto = body.map(|AppJson(dto)| dto).unwrap_or_default();
    let user_id = user.map(|u| u.user_id).or(dto.user_id);

    let report = service.claim(&id, user_id).await?;
    Ok(Json(report))
}

/// Submit a cleanup photo for verification
///
/// Accepts multipart/form-data with `image` (required) and `userId`.
#[utoipa::path(
    post,
    path = "/api/reports/{id}/cleanup",
    tag = "reports",
    params(
        ("id" = String, Path, description = "Report ID")
    ),
    request_body(
        content = SubmitCleanupDto,
        content_type = "multipart/form-data",
    ),
    responses(
        (status = 200, description = "Cleanup recorded", body = CleanupSubmissionResponseDto),
        (status = 400, description = "Missing image or report not in a cleanable state", body = ErrorResponse),
        (status = 404, description = "Report not found", body = ErrorResponse)
    )
)]
pub async fn submit_cleanup(
    user: Option<AuthenticatedUser>,
    State(service): State<Arc<ReportService>>,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<CleanupSubmissionResponseDto>> {
    let mut input = CleanupInput::default();

    while let Some(field) = next_field(&mut multipart).await? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "image" => input.image = Some(read_image(field).await?),
            "userId" => input.user_id = Some(read_text(field).await?),
            _ => debug!("Ignoring unknown field: {}", field_name),
        }
    }

    if let Some(user) = user {
        input.user_id = Some(user.user_id);
    }

    let result = service.submit_cleanup(&id, input).await?;
    Ok(Json(result))
}

/// List cleanup submissions for a report, newest first
#[utoipa::path(
    get,
    path = "/api/reports/{id}/cleanups",
    tag = "reports",
    params(
        ("id" = String, Path, description = "Report ID")
    ),
    responses(
        (status = 200, description = "Cleanups", body = Vec<CleanupResponseDto>),
        (status = 404, description = "Report not found", body = ErrorResponse)
    )
)]
pub async fn list_cleanups(
    State(service): State<Arc<ReportService>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<CleanupResponseDto>>> {
    let cleanups = service.list_cleanups(&id).await?;
    Ok(Json(cleanups))
}

async fn next_field(multipart: &mut Multipart) -> Result<Option<Field<'_>>> {
    multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })
}

async fn read_image(field: Field<'_>) -> Result<ImageUpload> {
    let content_type = field
        .content_type()
        .map(|s| s.to_string())
        .unwrap_or_else(|| "application/octet-stream".to_string());
    let file_name = field
        .file_name()
        .map(|s| s.to_string())
        .unwrap_or_else(|| "unnamed".to_string());

    let data = field.bytes().await.map_err(|e| {
        debug!("Failed to read file bytes: {}", e);
        AppError::BadRequest(format!("Failed to read file data: {}", e))
    })?;

    Ok(ImageUpload {
        data: data.to_vec(),
        file_name,
        content_type,
    })
}

async fn read_text(field: Field<'_>) -> Result<String> {
    let name = field.name().unwrap_or("").to_string();
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read {} field: {}", name, e)))
}
