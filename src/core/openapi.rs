use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth;
use crate::features::health;
use crate::features::leaderboard::{dtos as leaderboard_dtos, handlers as leaderboard_handlers};
use crate::features::reports::{
    dtos as reports_dtos, handlers as reports_handlers, models as reports_models,
};
use crate::features::statistics::{dtos as statistics_dtos, handlers as statistics_handlers};
use crate::features::users::{dtos as users_dtos, handlers as users_handlers};
use crate::modules::vision;
use crate::shared::types::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Users
        users_handlers::register,
        users_handlers::login,
        users_handlers::get_user,
        // Auth
        auth::handlers::get_me,
        // Reports
        reports_handlers::create_report,
        reports_handlers::list_reports,
        reports_handlers::get_report,
        reports_handlers::claim_report,
        reports_handlers::submit_cleanup,
        reports_handlers::list_cleanups,
        // Leaderboard
        leaderboard_handlers::get_leaderboard,
        // Statistics
        statistics_handlers::get_statistics,
    ),
    components(
        schemas(
            // Shared
            ErrorResponse,
            health::HealthResponseDto,
            // Users
            users_dtos::RegisterRequestDto,
            users_dtos::LoginRequestDto,
            users_dtos::UserResponseDto,
            users_dtos::AuthResponseDto,
            // Reports
            reports_models::ReportStatus,
            reports_dtos::ReportResponseDto,
            reports_dtos::CleanupResponseDto,
            reports_dtos::CleanupSubmissionResponseDto,
            reports_dtos::ClaimReportDto,
            reports_dtos::UploadReportDto,
            reports_dtos::SubmitCleanupDto,
            // Waste analysis
            vision::WasteType,
            vision::WasteClassification,
            vision::CleanupVerification,
            // Leaderboard
            leaderboard_dtos::LeaderboardEntryDto,
            // Statistics
            statistics_dtos::StatisticsDto,
            statistics_dtos::ReportsByStatusDto,
        )
    ),
    tags(
        (name = "health", description = "Liveness check"),
        (name = "users", description = "Registration, login and public profiles"),
        (name = "auth", description = "Bearer token introspection"),
        (name = "reports", description = "Trash reports, claims and cleanup verification"),
        (name = "leaderboard", description = "Users ranked by points"),
        (name = "statistics", description = "Platform-wide totals"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "TrashMap API",
        version = "0.1.0",
        description = "API documentation for TrashMap",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
