use std::time::Duration;

use reqwest::header::AUTHORIZATION;

use crate::config::ViewerConfig;
use crate::error::ApiError;

use super::endpoints::join_url;
use super::{ApiRequest, ApiResponse, Method, Transport};

/// Connect timeout for service requests (seconds).
const HTTP_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Overall timeout for service requests (seconds). Design generation is slow.
const HTTP_READ_TIMEOUT_SECS: u64 = 300;

/// Blocking `reqwest` transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpTransport {
    /// Creates a transport rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Transport` if the client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = reqwest::blocking::Client::builder()
            .connect_timeout(Duration::from_secs(HTTP_CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(HTTP_READ_TIMEOUT_SECS))
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Creates a transport rooted at `config.api_base_url`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Transport` if the client cannot be built.
    pub fn from_config(config: &ViewerConfig) -> Result<Self, ApiError> {
        Self::new(config.api_base_url.clone())
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let url = join_url(&self.base_url, &request.path);
        let mut builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self
                .client
                .post(&url)
                .header(reqwest::header::CONTENT_TYPE, "application/json"),
        };
        if let Some(token) = &request.bearer {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }
        let response = builder.send().map_err(|e| {
            if e.is_timeout() {
                ApiError::Transport(format!("timed out: {url}"))
            } else {
                ApiError::Transport(e.to_string())
            }
        })?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(ApiResponse { status, body })
    }
}
