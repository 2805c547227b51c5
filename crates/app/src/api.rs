//! HTTP client for the store back-office API.
//!
//! Shared by the order and customer services: one connection pool, one base
//! URL, one bearer token and a request timeout taken from [`ApiConfig`].

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Deserialize;
use thiserror::Error;

use crate::config::api::ApiConfig;

/// Errors that can occur while building the API client.
#[derive(Debug, Error)]
pub enum ApiClientError {
    /// The underlying HTTP client could not be built.
    #[error("failed to build http client: {0}")]
    Build(#[from] reqwest::Error),
}

/// HTTP client for the back-office API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    http: Client,
}

impl ApiClient {
    /// Create a new client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiClientError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            base_url: config.url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            http,
        })
    }

    /// Base URL requests are resolved against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request = self
            .http
            .request(method, format!("{}{path}", self.base_url));

        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Human-readable message for a failed response.
///
/// Prefers the `message` field of a JSON error payload, then the raw body,
/// then the status line.
pub(crate) fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(ErrorBody { message }) = serde_json::from_str::<ErrorBody>(body)
        && !message.trim().is_empty()
    {
        return message;
    }

    let body = body.trim();

    if body.is_empty() {
        format!("request failed with status {status}")
    } else {
        body.to_string()
    }
}
