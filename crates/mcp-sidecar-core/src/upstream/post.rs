//! Posting adapter
//!
//! Delivers a status update to a configured webhook endpoint. Same
//! never-fail contract as the search adapter: faults and missing
//! configuration are reported inline as text.

use crate::error::{Error, Result};
use serde_json::json;
use std::time::Duration;
use tracing::{instrument, warn};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client delivering `createPost` statuses to an external collaborator
pub struct PostClient {
    http: reqwest::Client,
    endpoint: Option<String>,
    token: Option<String>,
}

impl PostClient {
    pub fn new(endpoint: Option<String>, token: Option<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            endpoint,
            token,
        })
    }

    /// Post a status and describe the outcome as text; never fails
    #[instrument(level = "debug", skip(self))]
    pub async fn create_post(&self, status: &str) -> String {
        match self.try_post(status).await {
            Ok(confirmation) => confirmation,
            Err(e) => {
                warn!(error = %e, "Post delivery failed");
                format!("Error creating post: {e}")
            }
        }
    }

    async fn try_post(&self, status: &str) -> Result<String> {
        let endpoint = self.endpoint.as_deref().ok_or_else(|| {
            Error::configuration("POST_ENDPOINT is not set; posting is disabled")
        })?;

        let mut request = self.http.post(endpoint).json(&json!({ "status": status }));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        request.send().await?.error_for_status()?;

        Ok(format!("Posted status: {status}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unconfigured_endpoint_is_reported_as_text() {
        let client = PostClient::new(None, None).unwrap();
        let text = client.create_post("hello world").await;
        assert!(text.starts_with("Error creating post:"));
        assert!(text.contains("POST_ENDPOINT"));
    }

    #[tokio::test]
    async fn delivery_fault_is_reported_as_text() {
        let client = PostClient::new(Some("http://127.0.0.1:9".to_string()), None).unwrap();
        let text = client.create_post("hello world").await;
        assert!(
            text.starts_with("Error creating post:"),
            "unexpected text: {text}"
        );
    }
}
