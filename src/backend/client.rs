//! Registration gateway HTTP client
//!
//! This is the single transport used by all facades: a shared reqwest client
//! speaking JSON against the registration gateway, including error-envelope
//! parsing and timeout handling.

use std::time::Duration;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::BackendConfig;
use crate::utils::errors::{BackendError, BackendResult, QuizPalError, Result};

/// Error envelope returned by the gateway on non-2xx responses
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEnvelope {
    pub code: u32,
    pub reason: String,
    pub message: String,
}

/// Shared JSON-over-HTTP client for the registration gateway
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    /// Create a new BackendClient instance
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent("QuizPal-Bot/1.0")
            .build()
            .map_err(QuizPalError::Http)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// GET a JSON resource
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> BackendResult<T> {
        let response = self.execute(self.request(Method::GET, path)).await?;
        Self::decode(response).await
    }

    /// GET a JSON resource with query parameters
    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> BackendResult<T> {
        let response = self
            .execute(self.request(Method::GET, path).query(query))
            .await?;
        Self::decode(response).await
    }

    /// POST a JSON body and decode the JSON reply
    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> BackendResult<T> {
        let response = self
            .execute(self.request(Method::POST, path).json(body))
            .await?;
        Self::decode(response).await
    }

    /// POST a JSON body, ignoring the reply body
    pub async fn post_empty<B: Serialize>(&self, path: &str, body: &B) -> BackendResult<()> {
        self.execute(self.request(Method::POST, path).json(body))
            .await?;
        Ok(())
    }

    /// PATCH a JSON body and decode the JSON reply
    pub async fn patch<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> BackendResult<T> {
        let response = self
            .execute(self.request(Method::PATCH, path).json(body))
            .await?;
        Self::decode(response).await
    }

    /// DELETE a resource, ignoring the reply body
    pub async fn delete(&self, path: &str) -> BackendResult<()> {
        self.execute(self.request(Method::DELETE, path)).await?;
        Ok(())
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!(method = %method, url = %url, "Gateway request");
        self.client.request(method, url)
    }

    /// Send the request and translate transport and status failures
    async fn execute(&self, request: RequestBuilder) -> BackendResult<Response> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                BackendError::Timeout
            } else if e.is_connect() {
                BackendError::ServiceUnavailable
            } else {
                BackendError::RequestFailed(e.to_string())
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::SERVICE_UNAVAILABLE || status == StatusCode::BAD_GATEWAY {
            return Err(BackendError::ServiceUnavailable);
        }

        // Structured rejections carry the error envelope; anything else is
        // surfaced verbatim.
        let body = response.text().await.unwrap_or_default();
        match serde_json::from_str::<ErrorEnvelope>(&body) {
            Ok(envelope) => Err(BackendError::Rejected {
                reason: envelope.reason,
                message: envelope.message,
            }),
            Err(_) => Err(BackendError::RequestFailed(format!(
                "HTTP {}: {}",
                status, body
            ))),
        }
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> BackendResult<T> {
        response
            .json::<T>()
            .await
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))
    }
}
