use async_trait::async_trait;
use rand::Rng;
use std::path::Path;

use super::{
    to_percentage, CleanupVerification, WasteAnalyzer, WasteClassification, WasteType,
    MAX_CLASSIFICATIONS,
};
use crate::core::error::Result;

/// Similarity above which a mock cleanup counts as verified
const VERIFIED_SIMILARITY_THRESHOLD: f64 = 70.0;

pub const VERIFIED_MESSAGE: &str = "Cleanup verified successfully!";
pub const NEEDS_WORK_MESSAGE: &str =
    "Cleanup needs more work. Please ensure the area matches the original report.";

/// Analyzer returning random results, ignoring the images
#[derive(Debug, Default, Clone, Copy)]
pub struct MockWasteAnalyzer;

impl MockWasteAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Score every known waste type 0-100 and keep the top three
    pub fn random_classifications<R: Rng>(rng: &mut R) -> Vec<WasteClassification> {
        let mut scored: Vec<(WasteType, f64)> = WasteType::KNOWN
            .iter()
            .map(|t| (*t, rng.gen_range(0.0..100.0)))
            .collect();

        scored.sort_by(|a, b| b.1.total_cmp(&a.1));

        scored
            .into_iter()
            .take(MAX_CLASSIFICATIONS)
            .map(|(waste_type, score)| WasteClassification {
                waste_type,
                confidence: to_percentage(score),
            })
            .collect()
    }

    /// Similarity uniform in `[60, 100)`, verified above 70
    pub fn random_verification<R: Rng>(rng: &mut R) -> CleanupVerification {
        let similarity: f64 = rng.gen_range(60.0..100.0);
        let verified = similarity > VERIFIED_SIMILARITY_THRESHOLD;

        CleanupVerification {
            verified,
            similarity: to_percentage(similarity),
            message: if verified {
                VERIFIED_MESSAGE.to_string()
            } else {
                NEEDS_WORK_MESSAGE.to_string()
            },
        }
    }
}

#[async_trait]
impl WasteAnalyzer for MockWasteAnalyzer {
    async fn classify_waste(&self, _image_path: &Path) -> Result<Vec<WasteClassification>> {
        Ok(Self::random_classifications(&mut rand::thread_rng()))
    }

    async fn verify_cleanup(
        &self,
        _original_path: &Path,
        _cleanup_path: &Path,
    ) -> Result<CleanupVerification> {
        Ok(Self::random_verification(&mut rand::thread_rng()))
    }
}
