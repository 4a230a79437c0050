//! Vision analyzer backed by an OpenAI-compatible chat completions endpoint.
//!
//! Images are sent inline as base64 data URLs. Any transport, HTTP or parse
//! failure degrades to [`MockWasteAnalyzer`] so report creation never fails
//! because the model is unavailable.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::path::Path;

use super::{
    to_percentage, CleanupVerification, MockWasteAnalyzer, WasteAnalyzer, WasteClassification,
    WasteType, MAX_CLASSIFICATIONS,
};
use crate::core::config::VisionConfig;
use crate::core::error::{AppError, Result};
use crate::modules::storage::content_type_for_path;
use crate::shared::llm::{parse_with_fallback, LlmResponse};
use crate::shared::prompts::{render_classification_prompt, render_verification_prompt};

const CLASSIFY_MAX_TOKENS: u32 = 300;
const VERIFY_MAX_TOKENS: u32 = 200;
const DEFAULT_CONFIDENCE: f64 = 50.0;
const DEFAULT_VERIFICATION_MESSAGE: &str = "Verification completed";

fn default_true() -> bool {
    true
}

#[derive(Debug, Default, Deserialize, JsonSchema)]
struct RawClassification {
    #[serde(rename = "type", default)]
    waste_type: Option<WasteType>,
    #[serde(default)]
    confidence: Option<f64>,
}

/// Reply expected for the classification prompt
#[derive(Debug, Default, Deserialize, JsonSchema)]
struct ClassificationReply {
    #[serde(default)]
    classifications: Vec<RawClassification>,

    #[serde(default = "default_true")]
    #[schemars(skip)]
    is_llm_success: bool,

    #[serde(skip)]
    #[schemars(skip)]
    llm_error_message: Option<String>,
}

impl LlmResponse for ClassificationReply {
    fn mark_as_fallback(&mut self, error_message: String) {
        self.is_llm_success = false;
        self.llm_error_message = Some(error_message);
    }

    fn is_success(&self) -> bool {
        self.is_llm_success
    }
}

/// Models answer `true`, `"true"` or `"yes"` interchangeably
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(untagged)]
enum BoolLike {
    Bool(bool),
    Text(String),
}

impl BoolLike {
    fn as_bool(&self) -> bool {
        match self {
            BoolLike::Bool(b) => *b,
            BoolLike::Text(s) => s.eq_ignore_ascii_case("true") || s.eq_ignore_ascii_case("yes"),
        }
    }
}

/// Reply expected for the verification prompt
#[derive(Debug, Default, Deserialize, JsonSchema)]
struct VerificationReply {
    #[serde(default)]
    verified: Option<BoolLike>,
    #[serde(default)]
    similarity: Option<f64>,
    #[serde(default)]
    message: Option<String>,

    #[serde(default = "default_true")]
    #[schemars(skip)]
    is_llm_success: bool,

    #[serde(skip)]
    #[schemars(skip)]
    llm_error_message: Option<String>,
}

impl LlmResponse for VerificationReply {
    fn mark_as_fallback(&mut self, error_message: String) {
        self.is_llm_success = false;
        self.llm_error_message = Some(error_message);
    }

    fn is_success(&self) -> bool {
        self.is_llm_success
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<serde_json::Value>,
    max_tokens: u32,
}

/// Sort by confidence, keep the strongest three and fill in missing values
fn normalize_classifications(mut raw: Vec<RawClassification>) -> Vec<WasteClassification> {
    raw.sort_by(|a, b| {
        b.confidence
            .unwrap_or(0.0)
            .total_cmp(&a.confidence.unwrap_or(0.0))
    });

    raw.into_iter()
        .take(MAX_CLASSIFICATIONS)
        .map(|c| WasteClassification {
            waste_type: c.waste_type.unwrap_or(WasteType::Mixed),
            confidence: to_percentage(c.confidence.unwrap_or(DEFAULT_CONFIDENCE)),
        })
        .collect()
}

fn normalize_verification(reply: VerificationReply) -> CleanupVerification {
    CleanupVerification {
        verified: reply.verified.as_ref().is_some_and(BoolLike::as_bool),
        similarity: to_percentage(reply.similarity.unwrap_or(0.0)),
        message: reply
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_VERIFICATION_MESSAGE.to_string()),
    }
}

pub struct OpenAiWasteAnalyzer {
    api_key: String,
    base_url: String,
    model: String,
    http_client: reqwest::Client,
    fallback: MockWasteAnalyzer,
}

impl OpenAiWasteAnalyzer {
    pub fn new(config: &VisionConfig, api_key: String) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            api_key,
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            http_client,
            fallback: MockWasteAnalyzer::new(),
        })
    }

    async fn image_data_url(path: &Path) -> Result<String> {
        let bytes = tokio::fs::read(path).await?;
        Ok(format!(
            "data:{};base64,{}",
            content_type_for_path(path),
            BASE64.encode(bytes)
        ))
    }

    /// Send one user message (text + images) and return the reply text
    async fn complete(&self, prompt: String, images: Vec<String>, max_tokens: u32) -> Result<String> {
        let mut content = vec![json!({ "type": "text", "text": prompt })];
        content.extend(
            images
                .into_iter()
                .map(|url| json!({ "type": "image_url", "image_url": { "url": url } })),
        );

        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![json!({ "role": "user", "content": content })],
            max_tokens,
        };

        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Vision request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Vision API error: HTTP {} - {}", status, body);
            return Err(AppError::ExternalServiceError(format!(
                "Vision API returned HTTP {}",
                status
            )));
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            AppError::ExternalServiceError(format!("Failed to parse vision response: {}", e))
        })?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| AppError::ExternalServiceError("Vision reply was empty".to_string()))
    }

    async fn try_classify(&self, image_path: &Path) -> Result<Vec<WasteClassification>> {
        let waste_types: Vec<String> = WasteType::KNOWN.iter().map(|t| t.to_string()).collect();
        let prompt =
            render_classification_prompt(&waste_types, &ClassificationReply::json_schema_string())
                .map_err(|e| AppError::Internal(e.to_string()))?;

        let image = Self::image_data_url(image_path).await?;
        let text = self.complete(prompt, vec![image], CLASSIFY_MAX_TOKENS).await?;

        let reply: ClassificationReply = parse_with_fallback(&text);
        if !reply.is_success() {
            return Err(AppError::ExternalServiceError(
                reply
                    .llm_error_message
                    .unwrap_or_else(|| "Unreadable classification reply".to_string()),
            ));
        }

        Ok(normalize_classifications(reply.classifications))
    }

    async fn try_verify(&self, original_path: &Path, cleanup_path: &Path) -> Result<CleanupVerification> {
        let prompt = render_verification_prompt(&VerificationReply::json_schema_string())
            .map_err(|e| AppError::Internal(e.to_string()))?;

        let original = Self::image_data_url(original_path).await?;
        let cleanup = Self::image_data_url(cleanup_path).await?;
        let text = self
            .complete(prompt, vec![original, cleanup], VERIFY_MAX_TOKENS)
            .await?;

        let reply: VerificationReply = parse_with_fallback(&text);
        if !reply.is_success() {
            return Err(AppError::ExternalServiceError(
                reply
                    .llm_error_message
                    .unwrap_or_else(|| "Unreadable verification reply".to_string()),
            ));
        }

        Ok(normalize_verification(reply))
    }
}

#[async_trait]
impl WasteAnalyzer for OpenAiWasteAnalyzer {
    async fn classify_waste(&self, image_path: &Path) -> Result<Vec<WasteClassification>> {
        match self.try_classify(image_path).await {
            Ok(classifications) => Ok(classifications),
            Err(e) => {
                tracing::warn!("Waste classification failed, using mock result: {}", e);
                self.fallback.classify_waste(image_path).await
            }
        }
    }

    async fn verify_cleanup(
        &self,
        original_path: &Path,
        cleanup_path: &Path,
    ) -> Result<CleanupVerification> {
        match self.try_verify(original_path, cleanup_path).await {
            Ok(verification) => Ok(verification),
            Err(e) => {
                tracing::warn!("Cleanup verification failed, using mock result: {}", e);
                self.fallback
                    .verify_cleanup(original_path, cleanup_path)
                    .await
            }
        }
    }
}
