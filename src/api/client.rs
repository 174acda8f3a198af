//! HTTP client for communicating with the survey API
//!
//! Every endpoint accepts a JSON body and answers with the same
//! `{ success, message }` envelope, including on 4xx/5xx statuses.

use super::traits::ApiClientTrait;
use super::types::{ApiError, ApiResponse, LoginRequest, RegisterRequest, SurveySubmission};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Default API address
pub const DEFAULT_ADDRESS: &str = "http://127.0.0.1:5000";

const LOGIN_PATH: &str = "/api/login";
const REGISTER_PATH: &str = "/api/register";
const SUBMIT_SURVEY_PATH: &str = "/api/submit_survey";

/// Client for the survey API
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new client against `base_url`
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// POST a JSON body and decode the response envelope
    async fn post<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<ApiResponse, ApiError> {
        let url = self.endpoint(path);
        debug!("POST {}", url);

        let response = self.http.post(&url).json(body).send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        match serde_json::from_slice::<ApiResponse>(&bytes) {
            Ok(envelope) => {
                debug!("POST {} -> {} success={}", url, status, envelope.success);
                Ok(envelope)
            }
            Err(e) if status.is_success() => Err(ApiError::Decode(e)),
            Err(_) => {
                warn!("POST {} -> {} with undecodable body", url, status);
                Err(ApiError::Status(status.as_u16()))
            }
        }
    }
}

#[async_trait]
impl ApiClientTrait for ApiClient {
    async fn login(&self, request: &LoginRequest) -> Result<ApiResponse, ApiError> {
        self.post(LOGIN_PATH, request).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<ApiResponse, ApiError> {
        self.post(REGISTER_PATH, request).await
    }

    async fn submit_survey(
        &self,
        submission: &SurveySubmission,
    ) -> Result<ApiResponse, ApiError> {
        self.post(SUBMIT_SURVEY_PATH, submission).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(base, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_endpoint_joins_path() {
        let client = client("http://10.0.2.2:5000");
        assert_eq!(
            client.endpoint(SUBMIT_SURVEY_PATH),
            "http://10.0.2.2:5000/api/submit_survey"
        );
    }

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let client = client("http://localhost:5000/");
        assert_eq!(client.endpoint(LOGIN_PATH), "http://localhost:5000/api/login");
    }

    #[test]
    fn test_base_url_is_kept() {
        assert_eq!(client(DEFAULT_ADDRESS).base_url(), DEFAULT_ADDRESS);
    }

    #[test]
    fn test_unreachable_server_is_transport_error() {
        // Reserve a free port, then release it so nothing is listening there
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let client =
            ApiClient::new(format!("http://127.0.0.1:{port}"), Duration::from_millis(500))
                .unwrap();
        let request = LoginRequest {
            identifier: "a@b.c".to_string(),
            password: "pw".to_string(),
        };
        let result = tokio_test::block_on(client.login(&request));
        assert!(matches!(result, Err(ApiError::Transport(_))));
    }
}
