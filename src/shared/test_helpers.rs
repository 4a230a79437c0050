//! Fixtures shared by service and HTTP tests

use async_trait::async_trait;
use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

use crate::core::config::AuthTokenConfig;
use crate::core::error::Result;
use crate::features::auth::model::Claims;
use crate::features::auth::TokenService;
use crate::features::leaderboard::LeaderboardService;
use crate::features::reports::ReportService;
use crate::features::statistics::StatisticsService;
use crate::features::users::UserService;
use crate::modules::storage::{JsonStore, UploadStore};
use crate::modules::vision::{
    CleanupVerification, WasteAnalyzer, WasteClassification, WasteType,
};
use crate::AppServices;

/// Smallest valid PNG header, enough for the upload checks
pub const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

pub const TEST_MAX_UPLOAD_SIZE: usize = 1024 * 1024;

/// Analyzer returning canned results
pub struct FixedAnalyzer {
    pub classifications: Vec<WasteClassification>,
    pub verified: bool,
}

impl FixedAnalyzer {
    pub fn new(verified: bool) -> Self {
        Self {
            classifications: vec![
                WasteClassification {
                    waste_type: WasteType::Plastic,
                    confidence: 90,
                },
                WasteClassification {
                    waste_type: WasteType::Glass,
                    confidence: 40,
                },
            ],
            verified,
        }
    }
}

#[async_trait]
impl WasteAnalyzer for FixedAnalyzer {
    async fn classify_waste(&self, _image_path: &Path) -> Result<Vec<WasteClassification>> {
        Ok(self.classifications.clone())
    }

    async fn verify_cleanup(
        &self,
        _original_path: &Path,
        _cleanup_path: &Path,
    ) -> Result<CleanupVerification> {
        Ok(CleanupVerification {
            verified: self.verified,
            similarity: if self.verified { 90 } else { 65 },
            message: if self.verified {
                "Cleanup verified successfully!".to_string()
            } else {
                "Cleanup needs more work.".to_string()
            },
        })
    }
}

const TEST_TOKEN_SECRET: &str = "test-secret";

pub fn test_token_service() -> Arc<TokenService> {
    Arc::new(TokenService::new(&AuthTokenConfig {
        secret: TEST_TOKEN_SECRET.to_string(),
        expiry: Duration::from_secs(3600),
    }))
}

/// Correctly signed token for `user_id` that expired well past the validation leeway
pub fn expired_token(user_id: &str) -> String {
    let issued_at = chrono::Utc::now().timestamp() - 10_000;
    let claims = Claims {
        sub: user_id.to_string(),
        iat: issued_at,
        exp: issued_at + 5_000,
    };
    jsonwebtoken::encode(
        &jsonwebtoken::Header::new(jsonwebtoken::Algorithm::HS256),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(TEST_TOKEN_SECRET.as_bytes()),
    )
    .unwrap()
}

/// Services backed by a temporary data directory
pub struct TestContext {
    pub dir: TempDir,
    pub store: Arc<JsonStore>,
    pub services: AppServices,
}

pub async fn test_context(analyzer: impl WasteAnalyzer + 'static) -> TestContext {
    test_context_with(Arc::new(analyzer)).await
}

/// Like [`test_context`], for analyzers the test keeps a handle to
pub async fn test_context_with(analyzer: Arc<dyn WasteAnalyzer>) -> TestContext {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(JsonStore::open(dir.path().join("data")).await.unwrap());
    let uploads = Arc::new(UploadStore::new(dir.path().join("uploads")).await.unwrap());
    let tokens = test_token_service();

    let services = AppServices {
        users: Arc::new(UserService::new(Arc::clone(&store), Arc::clone(&tokens))),
        reports: Arc::new(ReportService::new(
            Arc::clone(&store),
            uploads,
            analyzer,
            TEST_MAX_UPLOAD_SIZE,
        )),
        leaderboard: Arc::new(LeaderboardService::new(Arc::clone(&store))),
        statistics: Arc::new(StatisticsService::new(Arc::clone(&store))),
        tokens,
    };

    TestContext {
        dir,
        store,
        services,
    }
}

/// Number of files currently in the uploads directory
pub fn upload_count(ctx: &TestContext) -> usize {
    std::fs::read_dir(ctx.dir.path().join("uploads"))
        .unwrap()
        .count()
}

/// HTTP server over the full API router
pub async fn test_server(analyzer: impl WasteAnalyzer + 'static) -> (TestContext, TestServer) {
    let ctx = test_context(analyzer).await;
    let uploads_dir = ctx.dir.path().join("uploads");
    let app = crate::api_router(&ctx.services, &uploads_dir);
    let server = TestServer::new(app).unwrap();
    (ctx, server)
}

pub fn png_part(file_name: &str) -> Part {
    Part::bytes(PNG_BYTES.to_vec())
        .file_name(file_name)
        .mime_type("image/png")
}

pub fn report_form() -> MultipartForm {
    MultipartForm::new()
        .add_part("image", png_part("trash.png"))
        .add_text("latitude", "-6.2")
        .add_text("longitude", "106.8")
}
