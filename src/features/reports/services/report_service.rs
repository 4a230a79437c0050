use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::reports::dtos::{
    CleanupInput, CleanupResponseDto, CleanupSubmissionResponseDto, ImageUpload, NewReportInput,
    ReportListQuery, ReportResponseDto,
};
use crate::features::reports::models::{Cleanup, CreateReport, Report, ReportStatus};
use crate::modules::storage::{JsonStore, StoredImage, UploadStore};
use crate::modules::vision::WasteAnalyzer;
use crate::shared::constants::{
    ANONYMOUS_REPORTER, CLEANUP_POINTS, DEFAULT_ADDRESS, REPORT_POINTS,
};
use crate::shared::validation::{is_allowed_image, parse_coordinate};

const VERIFIED_CLEANUP_MESSAGE: &str = "Cleanup verified! Points awarded.";

/// Service for the report lifecycle: create, claim, clean up, verify
pub struct ReportService {
    store: Arc<JsonStore>,
    uploads: Arc<UploadStore>,
    analyzer: Arc<dyn WasteAnalyzer>,
    max_upload_size: usize,
}

impl ReportService {
    pub fn new(
        store: Arc<JsonStore>,
        uploads: Arc<UploadStore>,
        analyzer: Arc<dyn WasteAnalyzer>,
        max_upload_size: usize,
    ) -> Self {
        Self {
            store,
            uploads,
            analyzer,
            max_upload_size,
        }
    }

    pub fn max_upload_size(&self) -> usize {
        self.max_upload_size
    }

    /// Create a report from an uploaded photo and credit a registered reporter
    pub async fn create(&self, input: NewReportInput) -> Result<ReportResponseDto> {
        if let Some(image) = &input.image {
            self.check_image(image)?;
        }
        let image = input
            .image
            .ok_or_else(|| AppError::BadRequest("Image is required".to_string()))?;

        let (latitude, longitude) = match (non_blank(input.latitude), non_blank(input.longitude))
        {
            (Some(lat), Some(lng)) => (lat, lng),
            _ => return Err(AppError::BadRequest("Location is required".to_string())),
        };
        let latitude = parse_coordinate(&latitude, 90.0)
            .ok_or_else(|| AppError::BadRequest("Invalid latitude".to_string()))?;
        let longitude = parse_coordinate(&longitude, 180.0)
            .ok_or_else(|| AppError::BadRequest("Invalid longitude".to_string()))?;

        let stored = self.uploads.save_image(&image.data, &image.file_name).await?;

        let classifications = match self.analyzer.classify_waste(&stored.path).await {
            Ok(classifications) => classifications,
            Err(e) => {
                self.uploads.discard(&stored).await;
                return Err(e);
            }
        };

        let report = Report::new(CreateReport {
            latitude,
            longitude,
            address: non_blank(input.address).unwrap_or_else(|| DEFAULT_ADDRESS.to_string()),
            description: input.description.unwrap_or_default(),
            image_url: stored.url.clone(),
            original_image_path: stored.path.to_string_lossy().into_owned(),
            reporter_id: non_blank(input.reporter_id)
                .unwrap_or_else(|| ANONYMOUS_REPORTER.to_string()),
            waste_classifications: classifications,
            points_awarded: REPORT_POINTS,
        });

        let result = self
            .store
            .write(move |db| {
                if report.reporter_id != ANONYMOUS_REPORTER {
                    match db.find_user_mut(&report.reporter_id) {
                        Some(user) => user.record_report(REPORT_POINTS),
                        None => tracing::debug!(
                            "Reporter {} is not a registered user, no points credited",
                            report.reporter_id
                        ),
                    }
                }
                db.reports.push(report.clone());
                Ok(report)
            })
            .await;

        let report = self.discard_on_error(result, &stored).await?;

        tracing::info!(
            "Report created: {} by {} at ({}, {})",
            report.id,
            report.reporter_id,
            report.latitude,
            report.longitude
        );

        Ok(report.into())
    }

    /// List reports newest first, optionally filtered by status and participant
    pub async fn list(&self, query: ReportListQuery) -> Result<Vec<ReportResponseDto>> {
        let status = non_blank(query.status);
        let user_id = non_blank(query.user_id);

        let mut reports: Vec<Report> = self
            .store
            .read(|db| {
                db.reports
                    .iter()
                    .filter(|r| {
                        status
                            .as_deref()
                            .map_or(true, |s| r.status.to_string() == s)
                    })
                    .filter(|r| user_id.as_deref().map_or(true, |u| r.involves(u)))
                    .cloned()
                    .collect()
            })
            .await;

        // Newest first; reports created in the same instant keep reverse insertion order
        reports.reverse();
        reports.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(reports.into_iter().map(ReportResponseDto::from).collect())
    }

    /// Get a single report
    pub async fn get(&self, id: &str) -> Result<ReportResponseDto> {
        self.find(id).await.map(ReportResponseDto::from)
    }

    /// Claim a reported site for cleanup
    pub async fn claim(&self, id: &str, user_id: Option<String>) -> Result<ReportResponseDto> {
        let report_id = parse_report_id(id)?;
        let user_id = non_blank(user_id);

        let report = self
            .store
            .write(move |db| {
                let report = db.find_report_mut(report_id).ok_or_else(report_not_found)?;

                if !report.status.can_claim() {
                    return Err(AppError::BadRequest(
                        "Report is not available for claiming".to_string(),
                    ));
                }
                let user_id = user_id
                    .ok_or_else(|| AppError::BadRequest("userId is required".to_string()))?;

                report.status = ReportStatus::Claimed;
                report.claimed_by = Some(user_id);
                Ok(report.clone())
            })
            .await?;

        tracing::info!(
            "Report {} claimed by {}",
            report.id,
            report.claimed_by.as_deref().unwrap_or("-")
        );

        Ok(report.into())
    }

    /// Submit a cleanup photo and verify it against the original report photo
    pub async fn submit_cleanup(
        &self,
        id: &str,
        input: CleanupInput,
    ) -> Result<CleanupSubmissionResponseDto> {
        let report = self.find(id).await?;

        if let Some(image) = &input.image {
            self.check_image(image)?;
        }
        let image = input
            .image
            .ok_or_else(|| AppError::BadRequest("Cleanup image is required".to_string()))?;
        check_accepts_cleanup(report.status)?;

        let user_id = non_blank(input.user_id);
        let stored = self.uploads.save_image(&image.data, &image.file_name).await?;

        let original_path = PathBuf::from(&report.original_image_path);
        let verification = match self
            .analyzer
            .verify_cleanup(&original_path, &stored.path)
            .await
        {
            Ok(verification) => verification,
            Err(e) => {
                self.uploads.discard(&stored).await;
                return Err(e);
            }
        };

        let cleanup = Cleanup::new(
            report.id,
            user_id,
            stored.url.clone(),
            stored.path.to_string_lossy().into_owned(),
            verification,
        );
        let report_id = report.id;

        let result = self
            .store
            .write(move |db| {
                let report = db.find_report_mut(report_id).ok_or_else(report_not_found)?;
                // Status may have moved while the analyzer was running
                check_accepts_cleanup(report.status)?;

                report.cleanup_images.push(cleanup.cleanup_image_url.clone());
                report.status = if cleanup.verification.verified {
                    ReportStatus::Verified
                } else {
                    ReportStatus::Cleaned
                };
                let report = report.clone();

                if cleanup.verification.verified {
                    if let Some(user) = cleanup
                        .user_id
                        .as_deref()
                        .and_then(|id| db.find_user_mut(id))
                    {
                        user.record_cleanup(CLEANUP_POINTS);
                    }
                }

                db.cleanups.push(cleanup.clone());
                Ok((cleanup, report))
            })
            .await;

        let (cleanup, report) = self.discard_on_error(result, &stored).await?;

        let message = if cleanup.verification.verified {
            VERIFIED_CLEANUP_MESSAGE.to_string()
        } else {
            cleanup.verification.message.clone()
        };

        tracing::info!(
            "Cleanup {} for report {}: status={}, similarity={}",
            cleanup.id,
            report.id,
            report.status,
            cleanup.verification.similarity
        );

        Ok(CleanupSubmissionResponseDto {
            cleanup: cleanup.into(),
            report: report.into(),
            message,
        })
    }

    /// Cleanup submissions of a report, newest first
    pub async fn list_cleanups(&self, id: &str) -> Result<Vec<CleanupResponseDto>> {
        let report_id = self.find(id).await?.id;

        let mut cleanups: Vec<Cleanup> = self
            .store
            .read(|db| {
                db.cleanups
                    .iter()
                    .filter(|c| c.report_id == report_id)
                    .cloned()
                    .collect()
            })
            .await;

        cleanups.reverse();
        cleanups.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));

        Ok(cleanups.into_iter().map(CleanupResponseDto::from).collect())
    }

    async fn find(&self, id: &str) -> Result<Report> {
        let report_id = parse_report_id(id)?;
        self.store
            .read(|db| db.find_report(report_id).cloned())
            .await
            .ok_or_else(report_not_found)
    }

    fn check_image(&self, image: &ImageUpload) -> Result<()> {
        if !is_allowed_image(&image.file_name, &image.content_type) {
            return Err(AppError::BadRequest(
                "Only image files are allowed!".to_string(),
            ));
        }

        if image.data.len() > self.max_upload_size {
            return Err(AppError::BadRequest(format!(
                "File too large. Maximum size is {} MB",
                self.max_upload_size / 1024 / 1024
            )));
        }

        Ok(())
    }

    async fn discard_on_error<T>(&self, result: Result<T>, stored: &StoredImage) -> Result<T> {
        if result.is_err() {
            self.uploads.discard(stored).await;
        }
        result
    }
}

fn report_not_found() -> AppError {
    AppError::NotFound("Report not found".to_string())
}

fn parse_report_id(id: &str) -> Result<Uuid> {
    Uuid::parse_str(id).map_err(|_| report_not_found())
}

fn check_accepts_cleanup(status: ReportStatus) -> Result<()> {
    match status {
        s if s.accepts_cleanup() => Ok(()),
        ReportStatus::Verified => Err(AppError::BadRequest(
            "Report has already been verified".to_string(),
        )),
        _ => Err(AppError::BadRequest(
            "Report must be claimed before cleanup".to_string(),
        )),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::vision::{CleanupVerification, WasteClassification};
    use crate::shared::test_helpers::{
        test_context, test_context_with, upload_count, FixedAnalyzer, TestContext, PNG_BYTES,
    };
    use async_trait::async_trait;
    use std::path::Path;
    use tokio::sync::Notify;
    use tokio_test::assert_ok;

    struct FailingAnalyzer;

    #[async_trait]
    impl WasteAnalyzer for FailingAnalyzer {
        async fn classify_waste(&self, _image_path: &Path) -> Result<Vec<WasteClassification>> {
            Err(AppError::Internal("vision backend down".to_string()))
        }

        async fn verify_cleanup(
            &self,
            _original_path: &Path,
            _cleanup_path: &Path,
        ) -> Result<CleanupVerification> {
            Err(AppError::Internal("vision backend down".to_string()))
        }
    }

    /// Holds `verify_cleanup` open until the test releases it
    struct PausedAnalyzer {
        inner: FixedAnalyzer,
        entered: Notify,
        release: Notify,
    }

    #[async_trait]
    impl WasteAnalyzer for PausedAnalyzer {
        async fn classify_waste(&self, image_path: &Path) -> Result<Vec<WasteClassification>> {
            self.inner.classify_waste(image_path).await
        }

        async fn verify_cleanup(
            &self,
            original_path: &Path,
            cleanup_path: &Path,
        ) -> Result<CleanupVerification> {
            self.entered.notify_one();
            self.release.notified().await;
            self.inner.verify_cleanup(original_path, cleanup_path).await
        }
    }

    fn png(name: &str) -> ImageUpload {
        ImageUpload {
            data: PNG_BYTES.to_vec(),
            file_name: name.to_string(),
            content_type: "image/png".to_string(),
        }
    }

    fn new_report(reporter_id: Option<&str>) -> NewReportInput {
        NewReportInput {
            image: Some(png("trash.png")),
            latitude: Some("-6.2".to_string()),
            longitude: Some("106.8".to_string()),
            description: None,
            address: None,
            reporter_id: reporter_id.map(str::to_string),
        }
    }

    async fn register(ctx: &TestContext, name: &str) -> String {
        let dto = crate::features::users::dtos::RegisterRequestDto {
            username: Some(name.to_string()),
            email: Some(format!("{}@example.com", name)),
            password: Some("pw".to_string()),
        };
        ctx.services
            .users
            .register(dto)
            .await
            .unwrap()
            .user
            .id
            .to_string()
    }

    async fn user_points(ctx: &TestContext, id: &str) -> (u32, u32, u32) {
        ctx.store
            .read(|db| {
                let u = db.find_user(id).unwrap();
                (u.points, u.reports_created, u.cleanups_completed)
            })
            .await
    }

    #[tokio::test]
    async fn test_create_anonymous_report_defaults() {
        let ctx = test_context(FixedAnalyzer::new(true)).await;

        let report = assert_ok!(ctx.services.reports.create(new_report(None)).await);

        assert_eq!(report.status, ReportStatus::Reported);
        assert_eq!(report.reporter_id, ANONYMOUS_REPORTER);
        assert_eq!(report.address, DEFAULT_ADDRESS);
        assert_eq!(report.description, "");
        assert_eq!(report.points_awarded, REPORT_POINTS);
        assert!(report.claimed_by.is_none());
        assert!(report.cleanup_images.is_empty());
        assert_eq!(report.waste_classifications.len(), 2);
        assert!(report.image_url.starts_with("/uploads/"));
    }

    #[tokio::test]
    async fn test_create_report_credits_registered_reporter() {
        let ctx = test_context(FixedAnalyzer::new(true)).await;
        let alice = register(&ctx, "alice").await;

        assert_ok!(ctx.services.reports.create(new_report(Some(&alice))).await);

        assert_eq!(user_points(&ctx, &alice).await, (10, 1, 0));
    }

    #[tokio::test]
    async fn test_create_report_validation_errors() {
        let ctx = test_context(FixedAnalyzer::new(true)).await;
        let reports = &ctx.services.reports;

        let mut input = new_report(None);
        input.image = None;
        let err = reports.create(input).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref m) if m == "Image is required"));

        let mut input = new_report(None);
        input.longitude = None;
        let err = reports.create(input).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref m) if m == "Location is required"));

        let mut input = new_report(None);
        input.latitude = Some("north".to_string());
        let err = reports.create(input).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref m) if m == "Invalid latitude"));

        let mut input = new_report(None);
        input.longitude = Some("181".to_string());
        let err = reports.create(input).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref m) if m == "Invalid longitude"));

        let mut input = new_report(None);
        input.image = Some(ImageUpload {
            data: b"hello".to_vec(),
            file_name: "notes.txt".to_string(),
            content_type: "text/plain".to_string(),
        });
        let err = reports.create(input).await.unwrap_err();
        assert!(
            matches!(err, AppError::BadRequest(ref m) if m == "Only image files are allowed!")
        );

        assert!(ctx.store.read(|db| db.reports.is_empty()).await);
    }

    #[tokio::test]
    async fn test_create_report_rejects_oversized_image() {
        let ctx = test_context(FixedAnalyzer::new(true)).await;
        let mut input = new_report(None);
        input.image = Some(ImageUpload {
            data: vec![0; ctx.services.reports.max_upload_size() + 1],
            file_name: "big.png".to_string(),
            content_type: "image/png".to_string(),
        });

        assert!(ctx.services.reports.create(input).await.is_err());
    }

    #[tokio::test]
    async fn test_list_filters_and_orders_newest_first() {
        let ctx = test_context(FixedAnalyzer::new(true)).await;
        let reports = &ctx.services.reports;

        let first = assert_ok!(reports.create(new_report(Some("alice"))).await);
        let second = assert_ok!(reports.create(new_report(None)).await);
        assert_ok!(reports.claim(&second.id.to_string(), Some("bob".to_string())).await);

        let all = assert_ok!(reports.list(ReportListQuery::default()).await);
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, second.id);
        assert_eq!(all[1].id, first.id);

        let claimed = assert_ok!(
            reports
                .list(ReportListQuery {
                    status: Some("claimed".to_string()),
                    user_id: None,
                })
                .await
        );
        assert_eq!(claimed.len(), 1);
        assert_eq!(claimed[0].id, second.id);

        let bobs = assert_ok!(
            reports
                .list(ReportListQuery {
                    status: None,
                    user_id: Some("bob".to_string()),
                })
                .await
        );
        assert_eq!(bobs.len(), 1);

        let alices = assert_ok!(
            reports
                .list(ReportListQuery {
                    status: None,
                    user_id: Some("alice".to_string()),
                })
                .await
        );
        assert_eq!(alices[0].id, first.id);
    }

    #[tokio::test]
    async fn test_get_unknown_report() {
        let ctx = test_context(FixedAnalyzer::new(true)).await;

        let err = ctx.services.reports.get("not-a-uuid").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref m) if m == "Report not found"));

        let err = ctx
            .services
            .reports
            .get(&Uuid::new_v4().to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_claim_rules() {
        let ctx = test_context(FixedAnalyzer::new(true)).await;
        let reports = &ctx.services.reports;
        let report = assert_ok!(reports.create(new_report(None)).await);
        let id = report.id.to_string();

        let err = reports.claim(&id, None).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref m) if m == "userId is required"));

        let claimed = assert_ok!(reports.claim(&id, Some("bob".to_string())).await);
        assert_eq!(claimed.status, ReportStatus::Claimed);
        assert_eq!(claimed.claimed_by.as_deref(), Some("bob"));

        let err = reports
            .claim(&id, Some("carol".to_string()))
            .await
            .unwrap_err();
        assert!(
            matches!(err, AppError::BadRequest(ref m) if m == "Report is not available for claiming")
        );
    }

    #[tokio::test]
    async fn test_verified_cleanup_awards_points() {
        let ctx = test_context(FixedAnalyzer::new(true)).await;
        let reports = &ctx.services.reports;
        let bob = register(&ctx, "bob").await;
        let report = assert_ok!(reports.create(new_report(None)).await);
        let id = report.id.to_string();
        assert_ok!(reports.claim(&id, Some(bob.clone())).await);

        let result = assert_ok!(
            reports
                .submit_cleanup(
                    &id,
                    CleanupInput {
                        image: Some(png("after.png")),
                        user_id: Some(bob.clone()),
                    },
                )
                .await
        );

        assert_eq!(result.message, VERIFIED_CLEANUP_MESSAGE);
        assert_eq!(result.report.status, ReportStatus::Verified);
        assert_eq!(result.report.cleanup_images.len(), 1);
        assert_eq!(result.cleanup.report_id, report.id);
        assert_eq!(user_points(&ctx, &bob).await, (50, 0, 1));

        let err = reports
            .submit_cleanup(
                &id,
                CleanupInput {
                    image: Some(png("again.png")),
                    user_id: Some(bob.clone()),
                },
            )
            .await
            .unwrap_err();
        assert!(
            matches!(err, AppError::BadRequest(ref m) if m == "Report has already been verified")
        );
    }

    #[tokio::test]
    async fn test_unverified_cleanup_marks_cleaned_and_allows_retry() {
        let ctx = test_context(FixedAnalyzer::new(false)).await;
        let reports = &ctx.services.reports;
        let bob = register(&ctx, "bob").await;
        let report = assert_ok!(reports.create(new_report(None)).await);
        let id = report.id.to_string();
        assert_ok!(reports.claim(&id, Some(bob.clone())).await);

        for attempt in 1..=2 {
            let result = assert_ok!(
                reports
                    .submit_cleanup(
                        &id,
                        CleanupInput {
                            image: Some(png("after.png")),
                            user_id: Some(bob.clone()),
                        },
                    )
                    .await
            );
            assert_eq!(result.report.status, ReportStatus::Cleaned);
            assert_eq!(result.report.cleanup_images.len(), attempt);
            assert_eq!(result.message, "Cleanup needs more work.");
        }

        assert_eq!(user_points(&ctx, &bob).await, (0, 0, 0));

        let cleanups = assert_ok!(reports.list_cleanups(&id).await);
        assert_eq!(cleanups.len(), 2);
        assert!(cleanups[0].submitted_at >= cleanups[1].submitted_at);
    }

    #[tokio::test]
    async fn test_cleanup_rules() {
        let ctx = test_context(FixedAnalyzer::new(true)).await;
        let reports = &ctx.services.reports;
        let report = assert_ok!(reports.create(new_report(None)).await);
        let id = report.id.to_string();

        let err = reports
            .submit_cleanup(&id, CleanupInput::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref m) if m == "Cleanup image is required"));

        let err = reports
            .submit_cleanup(
                &id,
                CleanupInput {
                    image: Some(png("after.png")),
                    user_id: None,
                },
            )
            .await
            .unwrap_err();
        assert!(
            matches!(err, AppError::BadRequest(ref m) if m == "Report must be claimed before cleanup")
        );

        let err = reports
            .submit_cleanup(&Uuid::new_v4().to_string(), CleanupInput::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        assert!(reports.list_cleanups("missing").await.is_err());
    }

    #[tokio::test]
    async fn test_concurrent_claims_only_one_wins() {
        let ctx = test_context(FixedAnalyzer::new(true)).await;
        let reports = &ctx.services.reports;
        let report = assert_ok!(reports.create(new_report(None)).await);
        let id = report.id.to_string();

        let (bob, carol) = tokio::join!(
            reports.claim(&id, Some("bob".to_string())),
            reports.claim(&id, Some("carol".to_string())),
        );

        assert!(bob.is_ok() ^ carol.is_ok());
        let winner = if bob.is_ok() { "bob" } else { "carol" };
        let claimed_by = ctx
            .store
            .read(|db| db.find_report(report.id).and_then(|r| r.claimed_by.clone()))
            .await;
        assert_eq!(claimed_by.as_deref(), Some(winner));
    }

    #[tokio::test]
    async fn test_cleanup_rejected_when_verified_during_analysis() {
        let analyzer = Arc::new(PausedAnalyzer {
            inner: FixedAnalyzer::new(true),
            entered: Notify::new(),
            release: Notify::new(),
        });
        let ctx = test_context_with(analyzer.clone()).await;
        let reports = &ctx.services.reports;
        let bob = register(&ctx, "bob").await;
        let report = assert_ok!(reports.create(new_report(None)).await);
        let id = report.id.to_string();
        assert_ok!(reports.claim(&id, Some(bob.clone())).await);
        let uploads_before = upload_count(&ctx);

        let (result, _) = tokio::join!(
            reports.submit_cleanup(
                &id,
                CleanupInput {
                    image: Some(png("after.png")),
                    user_id: Some(bob.clone()),
                },
            ),
            async {
                analyzer.entered.notified().await;
                ctx.store
                    .write(|db| {
                        if let Some(r) = db.find_report_mut(report.id) {
                            r.status = ReportStatus::Verified;
                        }
                        Ok(())
                    })
                    .await
                    .unwrap();
                analyzer.release.notify_one();
            }
        );

        let err = result.unwrap_err();
        assert!(
            matches!(err, AppError::BadRequest(ref m) if m == "Report has already been verified")
        );
        assert!(ctx.store.read(|db| db.cleanups.is_empty()).await);
        assert_eq!(user_points(&ctx, &bob).await, (0, 0, 0));
        assert_eq!(upload_count(&ctx), uploads_before);
    }

    #[tokio::test]
    async fn test_upload_discarded_when_analysis_fails() {
        let ctx = test_context(FailingAnalyzer).await;

        assert!(ctx.services.reports.create(new_report(None)).await.is_err());

        assert_eq!(upload_count(&ctx), 0);
        assert!(ctx.store.read(|db| db.reports.is_empty()).await);
    }

    #[tokio::test]
    async fn test_upload_discarded_when_snapshot_write_fails() {
        let ctx = test_context(FixedAnalyzer::new(true)).await;
        std::fs::create_dir(ctx.store.data_dir().join("reports.json.tmp")).unwrap();

        let err = ctx
            .services
            .reports
            .create(new_report(None))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Io(_)));
        assert_eq!(upload_count(&ctx), 0);
        assert!(ctx.store.read(|db| db.reports.is_empty()).await);
    }
}
