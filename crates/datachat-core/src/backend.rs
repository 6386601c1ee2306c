//! Outbound query interface to the analytics backend

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::error::BackendError;
use crate::payload::Envelope;

/// Request body: the user's question and the conversation it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    pub message: String,
    pub session_id: String,
}

/// Anything that can turn a question into a response envelope.
#[async_trait]
pub trait QueryBackend: Send + Sync {
    async fn query(&self, request: &QueryRequest) -> Result<Envelope, BackendError>;
}

/// JSON-over-HTTP backend: `POST {url}` with a [`QueryRequest`] body.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    url: String,
}

impl HttpBackend {
    pub fn new(url: &str) -> Self {
        Self {
            client: Client::new(),
            url: url.to_string(),
        }
    }

    /// Like [`HttpBackend::new`], with a whole-request timeout enforced by the transport.
    pub fn with_timeout(url: &str, timeout: Duration) -> Result<Self, BackendError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.to_string(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl QueryBackend for HttpBackend {
    async fn query(&self, request: &QueryRequest) -> Result<Envelope, BackendError> {
        tracing::debug!(url = %self.url, "sending query");

        let response = self.client.post(&self.url).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let value: Value = response.json().await?;
        Envelope::from_value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_uses_camel_case() {
        let request = QueryRequest {
            message: "top cities".to_string(),
            session_id: "abc".to_string(),
        };
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body, serde_json::json!({"message": "top cities", "sessionId": "abc"}));
    }
}
