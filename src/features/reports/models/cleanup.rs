use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::modules::vision::CleanupVerification;

/// Stored cleanup submission as persisted in `cleanups.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cleanup {
    pub id: Uuid,
    pub report_id: Uuid,
    pub user_id: Option<String>,
    pub cleanup_image_url: String,
    pub cleanup_image_path: String,
    pub verification: CleanupVerification,
    pub submitted_at: DateTime<Utc>,
}

impl Cleanup {
    pub fn new(
        report_id: Uuid,
        user_id: Option<String>,
        cleanup_image_url: String,
        cleanup_image_path: String,
        verification: CleanupVerification,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            report_id,
            user_id,
            cleanup_image_url,
            cleanup_image_path,
            verification,
            submitted_at: Utc::now(),
        }
    }
}
