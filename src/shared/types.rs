use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body returned by every failed request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_shape() {
        let body = serde_json::to_value(ErrorResponse::new("Report not found")).unwrap();
        assert_eq!(body, serde_json::json!({ "error": "Report not found" }));
    }
}
