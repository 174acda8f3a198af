//! Trait abstraction for the API client to enable mocking in tests

use super::types::{ApiError, ApiResponse, LoginRequest, RegisterRequest, SurveySubmission};
use async_trait::async_trait;

/// Trait for survey API operations, enabling mocking in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApiClientTrait: Send + Sync {
    /// Log in with an email or phone identifier
    async fn login(&self, request: &LoginRequest) -> Result<ApiResponse, ApiError>;

    /// Create a new account
    async fn register(&self, request: &RegisterRequest) -> Result<ApiResponse, ApiError>;

    /// Post a completed survey
    async fn submit_survey(&self, submission: &SurveySubmission)
        -> Result<ApiResponse, ApiError>;
}
