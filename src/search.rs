//! Search collaborator
//!
//! One GET against the DuckDuckGo instant answer API (no key required).
//! Callers that need to distinguish failure kinds use [`SearchClient::instant_answer`];
//! [`summary`](SearchCollaborator::summary) is the total, speech-ready contract.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

/// DuckDuckGo instant answer endpoint
const SEARCH_ENDPOINT: &str = "https://api.duckduckgo.com/";

/// Request timeout; no retries
const SEARCH_TIMEOUT: Duration = Duration::from_secs(8);

/// Tagged search failure kinds
#[derive(Debug, Error)]
pub enum SearchError {
    /// The request exceeded the timeout
    #[error("the search request timed out")]
    Timeout,

    /// The search service could not be reached
    #[error("the search service could not be reached")]
    Connect,

    /// The service answered with a non-success status
    #[error("the search service returned status {0}")]
    Status(u16),

    /// Anything else (body read, JSON shape)
    #[error("the search request failed: {0}")]
    Request(String),
}

impl From<reqwest::Error> for SearchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else if e.is_connect() {
            Self::Connect
        } else if let Some(status) = e.status() {
            Self::Status(status.as_u16())
        } else {
            Self::Request(e.to_string())
        }
    }
}

/// Instant answer API response (only the keys we consume)
#[derive(Debug, Deserialize)]
struct InstantAnswerResponse {
    #[serde(rename = "Answer", default)]
    answer: String,
    #[serde(rename = "AbstractText", default)]
    abstract_text: String,
    #[serde(rename = "RelatedTopics", default)]
    related_topics: Vec<RelatedTopic>,
}

#[derive(Debug, Deserialize)]
struct RelatedTopic {
    #[serde(rename = "Text", default)]
    text: String,
}

/// Pick the best single-sentence answer from a payload
///
/// Precedence: direct answer > abstract summary > first related topic text
fn best_answer(payload: InstantAnswerResponse) -> Option<String> {
    if !payload.answer.is_empty() {
        return Some(payload.answer);
    }
    if !payload.abstract_text.is_empty() {
        return Some(payload.abstract_text);
    }
    payload
        .related_topics
        .into_iter()
        .next()
        .map(|t| t.text)
        .filter(|t| !t.is_empty())
}

/// Best-effort single-answer web search, suitable for speaking aloud
#[async_trait]
pub trait SearchCollaborator: Send + Sync {
    /// Return a speech-ready answer for `query`; never fails
    async fn summary(&self, query: &str) -> String;
}

/// DuckDuckGo-backed search client
pub struct SearchClient {
    client: reqwest::Client,
}

impl SearchClient {
    /// Create a new search client
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built
    pub fn new() -> Result<Self, SearchError> {
        let client = reqwest::Client::builder()
            .timeout(SEARCH_TIMEOUT)
            .build()
            .map_err(|e| SearchError::Request(e.to_string()))?;
        Ok(Self { client })
    }

    /// Fetch the instant answer for `query`
    ///
    /// `Ok(None)` means the service answered but had nothing useful.
    ///
    /// # Errors
    ///
    /// Returns a tagged [`SearchError`] on network or protocol failure
    pub async fn instant_answer(&self, query: &str) -> Result<Option<String>, SearchError> {
        let response = self
            .client
            .get(SEARCH_ENDPOINT)
            .query(&[("q", query), ("format", "json"), ("no_html", "1")])
            .send()
            .await?
            .error_for_status()?;

        let payload: InstantAnswerResponse = response.json().await?;
        Ok(best_answer(payload))
    }
}

#[async_trait]
impl SearchCollaborator for SearchClient {
    async fn summary(&self, query: &str) -> String {
        if query.trim().is_empty() {
            return "No query provided.".to_string();
        }

        match self.instant_answer(query).await {
            Ok(Some(answer)) => answer,
            Ok(None) => "No results found for that query.".to_string(),
            Err(e) => {
                tracing::warn!(query, error = %e, "search failed");
                format!("Error contacting DuckDuckGo: {e}")
            }
        }
    }
}
