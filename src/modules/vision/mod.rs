//! Vision analysis for trash photos
//!
//! Classifies the waste visible in a report photo and compares a report photo
//! with a cleanup photo. Two implementations are provided:
//! - [`MockWasteAnalyzer`]: randomized results, used when no API key is configured
//! - [`OpenAiWasteAnalyzer`]: OpenAI-compatible vision model, falls back to the mock on failure

mod mock_analyzer;
mod openai_analyzer;

pub use mock_analyzer::MockWasteAnalyzer;
pub use openai_analyzer::OpenAiWasteAnalyzer;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;
use utoipa::ToSchema;

use crate::core::error::Result;

/// Maximum number of classifications kept per photo
pub const MAX_CLASSIFICATIONS: usize = 3;

/// Kinds of waste the analyzer can report
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    ToSchema,
    JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum WasteType {
    Plastic,
    Metal,
    Wood,
    Paper,
    Glass,
    Organic,
    Mixed,
    #[serde(other)]
    Other,
}

impl WasteType {
    /// Types scored by the mock analyzer
    pub const KNOWN: [WasteType; 7] = [
        WasteType::Plastic,
        WasteType::Metal,
        WasteType::Wood,
        WasteType::Paper,
        WasteType::Glass,
        WasteType::Organic,
        WasteType::Mixed,
    ];
}

impl std::fmt::Display for WasteType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WasteType::Plastic => write!(f, "plastic"),
            WasteType::Metal => write!(f, "metal"),
            WasteType::Wood => write!(f, "wood"),
            WasteType::Paper => write!(f, "paper"),
            WasteType::Glass => write!(f, "glass"),
            WasteType::Organic => write!(f, "organic"),
            WasteType::Mixed => write!(f, "mixed"),
            WasteType::Other => write!(f, "other"),
        }
    }
}

/// One detected waste type with a confidence percentage (0-100)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct WasteClassification {
    #[serde(rename = "type")]
    pub waste_type: WasteType,
    pub confidence: u8,
}

/// Outcome of comparing a report photo with a cleanup photo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CleanupVerification {
    pub verified: bool,
    /// Similarity percentage (0-100)
    pub similarity: u8,
    pub message: String,
}

/// Analyzer used by the report lifecycle
#[async_trait]
pub trait WasteAnalyzer: Send + Sync {
    /// Classify the waste in a report photo, strongest first, at most [`MAX_CLASSIFICATIONS`]
    async fn classify_waste(&self, image_path: &Path) -> Result<Vec<WasteClassification>>;

    /// Decide whether `cleanup_path` shows the site of `original_path` cleaned up
    async fn verify_cleanup(
        &self,
        original_path: &Path,
        cleanup_path: &Path,
    ) -> Result<CleanupVerification>;
}

/// Clamp and round a raw confidence score into a percentage
pub(crate) fn to_percentage(score: f64) -> u8 {
    if score.is_nan() {
        return 0;
    }
    score.round().clamp(0.0, 100.0) as u8
}
