//! External search adapter
//!
//! Wraps the Tavily search API and normalizes its response into a single
//! text answer: the direct `answer` field when present, else the first
//! result's content, else a fixed fallback. Empty strings count as absent,
//! matching how the upstream fields are commonly populated.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Production API endpoint
pub const TAVILY_BASE_URL: &str = "https://api.tavily.com";

/// Bound on the upstream round trip; the API itself defines no timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const FALLBACK_TEXT: &str = "No information found for this query";

/// Client for the Tavily search service
pub struct TavilyClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl TavilyClient {
    /// Create a client against the production endpoint
    pub fn new(api_key: Option<String>) -> Result<Self> {
        Self::with_base_url(api_key, TAVILY_BASE_URL)
    }

    /// Create a client against an alternate endpoint (used in tests)
    pub fn with_base_url(api_key: Option<String>, base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            api_key,
        })
    }

    /// Search and normalize the response to a single text answer.
    ///
    /// Any fault from the upstream call is caught and described in the
    /// returned text; this method never fails.
    #[instrument(level = "debug", skip(self))]
    pub async fn search(&self, query: &str) -> String {
        match self.try_search(query).await {
            Ok(answer) => answer,
            Err(e) => {
                warn!(error = %e, "Search request failed");
                format!("Error fetching real-time data: {e}")
            }
        }
    }

    async fn try_search(&self, query: &str) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| Error::configuration("TAVILY_API_KEY is not set"))?;

        let url = format!("{}/search", self.base_url);
        let request = SearchRequest { api_key, query };

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;
        let parsed: SearchResponse = response.json().await?;

        debug!(
            has_answer = parsed.answer.is_some(),
            result_count = parsed.results.len(),
            "Search response received"
        );
        Ok(extract_answer(parsed))
    }
}

#[derive(Serialize)]
struct SearchRequest<'a> {
    api_key: &'a str,
    query: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    answer: Option<String>,
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    content: Option<String>,
}

fn extract_answer(response: SearchResponse) -> String {
    if let Some(answer) = response.answer.filter(|answer| !answer.is_empty()) {
        return answer;
    }
    response
        .results
        .into_iter()
        .next()
        .and_then(|result| result.content)
        .filter(|content| !content.is_empty())
        .unwrap_or_else(|| FALLBACK_TEXT.to_string())
}
