//! Wire types shared by every endpoint

use crate::state::AiModel;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Response envelope returned by every endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiResponse {
    /// Turn the envelope into the server message on success, or a
    /// `Rejected` error carrying the server message (or `fallback`).
    pub fn into_result(self, fallback: &str) -> Result<Option<String>, ApiError> {
        if self.success {
            Ok(self.message)
        } else {
            Err(ApiError::Rejected(
                self.message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| fallback.to_string()),
            ))
        }
    }
}

/// Errors from talking to the API
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned HTTP {0}")]
    Status(u16),
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
    /// The request task ended without a result
    #[error("request was cancelled")]
    Cancelled,
    /// The server answered with `success: false`
    #[error("{0}")]
    Rejected(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub identifier: String,
    pub password: String,
}

/// Exactly one of `email` / `phone` is set by the register form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub password: String,
}

/// Flattened survey record posted to `/api/submit_survey`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveySubmission {
    pub user: String,
    pub name: String,
    /// Serialized as `YYYY-MM-DD`
    pub birth_date: NaiveDate,
    pub education: String,
    pub city: String,
    pub gender: String,
    /// In selection order
    pub models: Vec<AiModel>,
    pub model_cons: BTreeMap<AiModel, String>,
    pub use_case: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_response_without_message() {
        let parsed: ApiResponse = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(parsed.success);
        assert!(parsed.message.is_none());
    }

    #[test]
    fn test_response_ignores_extra_fields() {
        let parsed: ApiResponse = serde_json::from_str(
            r#"{"success": true, "message": "Google sign-in success", "email": "a@b.c"}"#,
        )
        .unwrap();
        assert_eq!(parsed.message.as_deref(), Some("Google sign-in success"));
    }

    #[test]
    fn test_into_result_success_keeps_message() {
        let response = ApiResponse {
            success: true,
            message: Some("Survey saved.".to_string()),
        };
        assert_eq!(
            response.into_result("unused").unwrap().as_deref(),
            Some("Survey saved.")
        );
    }

    #[test]
    fn test_into_result_failure_uses_server_message() {
        let response = ApiResponse {
            success: false,
            message: Some("User not found".to_string()),
        };
        let err = response.into_result("Login failed").unwrap_err();
        assert_eq!(err.to_string(), "User not found");
    }

    #[test]
    fn test_into_result_failure_falls_back() {
        let response = ApiResponse {
            success: false,
            message: Some("  ".to_string()),
        };
        let err = response.into_result("Submission failed").unwrap_err();
        assert!(matches!(err, ApiError::Rejected(ref m) if m == "Submission failed"));
    }

    #[test]
    fn test_survey_submission_wire_shape() {
        let submission = SurveySubmission {
            user: "jane@example.com".to_string(),
            name: "Jane Doe".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1990, 4, 12).unwrap(),
            education: "MSc".to_string(),
            city: "Ankara".to_string(),
            gender: "Female".to_string(),
            models: vec![AiModel::Claude, AiModel::ChatGpt],
            model_cons: BTreeMap::from([
                (AiModel::ChatGpt, "Verbose".to_string()),
                (AiModel::Claude, "Cautious".to_string()),
            ]),
            use_case: "Summaries".to_string(),
        };

        let value = serde_json::to_value(&submission).unwrap();
        assert_eq!(
            value,
            json!({
                "user": "jane@example.com",
                "name": "Jane Doe",
                "birthDate": "1990-04-12",
                "education": "MSc",
                "city": "Ankara",
                "gender": "Female",
                "models": ["Claude", "ChatGPT"],
                "modelCons": {"ChatGPT": "Verbose", "Claude": "Cautious"},
                "useCase": "Summaries"
            })
        );
    }

    #[test]
    fn test_register_request_omits_unused_contact() {
        let request = RegisterRequest {
            email: None,
            phone: Some("5551234".to_string()),
            password: "pw".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"phone": "5551234", "password": "pw"})
        );
    }
}
