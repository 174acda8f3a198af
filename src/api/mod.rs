//! HTTP client module for the survey API

mod client;
mod traits;
mod types;

pub use client::{ApiClient, DEFAULT_ADDRESS};
pub use traits::ApiClientTrait;
pub use types::{ApiError, ApiResponse, LoginRequest, RegisterRequest, SurveySubmission};

#[cfg(test)]
pub use traits::MockApiClientTrait;
