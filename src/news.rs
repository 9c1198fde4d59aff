//! News collaborator
//!
//! Fetches top headlines from NewsAPI. Failures are tagged [`NewsError`]
//! kinds whose display strings are the spoken diagnostics, so callers can
//! branch programmatically and still have something to say.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

/// NewsAPI top-headlines endpoint
const NEWS_ENDPOINT: &str = "https://newsapi.org/v2/top-headlines";

/// Request timeout; no retries
const NEWS_TIMEOUT: Duration = Duration::from_secs(10);

/// Maximum number of headlines fetched and spoken
const MAX_HEADLINES: usize = 5;

/// Tagged news failure kinds; display strings are speech-ready
#[derive(Debug, Error)]
pub enum NewsError {
    /// No API key configured (missing or placeholder)
    #[error("Please configure your NewsAPI key in the NEWS_API_KEY environment variable to use this feature.")]
    Unconfigured,

    /// The service answered OK but returned zero articles
    #[error("No news articles found.")]
    Empty,

    /// API-level error status with a message
    #[error("Error fetching news: {0}")]
    Api(String),

    /// The request exceeded the timeout
    #[error("News API request timed out. Please try again later.")]
    Timeout,

    /// The service could not be reached
    #[error("Unable to connect to News API. Please check your internet connection.")]
    Connect,

    /// HTTP error status
    #[error("HTTP Error: {0}. Please check your API key.")]
    Status(u16),

    /// Anything else (body read, JSON shape)
    #[error("Error fetching news: {0}")]
    Request(String),
}

impl From<reqwest::Error> for NewsError {
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

/// A ranked headline ready to be spoken
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Headline {
    /// 1-based rank
    pub rank: usize,
    /// Article title
    pub title: String,
    /// Source name
    pub source: String,
}

impl fmt::Display for Headline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Headline {}: {} from {}", self.rank, self.title, self.source)
    }
}

/// Headline request parameters
#[derive(Debug, Clone)]
pub struct HeadlineRequest {
    /// Country code (e.g. "in")
    pub country: String,
    /// Language code (e.g. "en")
    pub language: String,
    /// News category (e.g. "general")
    pub category: String,
}

impl Default for HeadlineRequest {
    fn default() -> Self {
        Self {
            country: "in".to_string(),
            language: "en".to_string(),
            category: "general".to_string(),
        }
    }
}

/// NewsAPI response (only the keys we consume)
#[derive(Debug, Deserialize)]
struct NewsResponse {
    #[serde(default)]
    status: String,
    message: Option<String>,
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
struct Article {
    title: Option<String>,
    source: Option<Source>,
}

#[derive(Debug, Deserialize)]
struct Source {
    name: Option<String>,
}

/// Turn a parsed payload into ranked headlines
fn headlines_from(payload: NewsResponse) -> Result<Vec<Headline>, NewsError> {
    if payload.status != "ok" {
        return Err(NewsError::Api(
            payload
                .message
                .unwrap_or_else(|| "Unknown error occurred".to_string()),
        ));
    }

    if payload.articles.is_empty() {
        return Err(NewsError::Empty);
    }

    Ok(payload
        .articles
        .into_iter()
        .take(MAX_HEADLINES)
        .enumerate()
        .map(|(i, article)| Headline {
            rank: i + 1,
            title: article
                .title
                .unwrap_or_else(|| "No title available".to_string()),
            source: article
                .source
                .and_then(|s| s.name)
                .unwrap_or_else(|| "Unknown source".to_string()),
        })
        .collect())
}

/// Top-headlines provider with tagged failures
#[async_trait]
pub trait NewsCollaborator: Send + Sync {
    /// Fetch up to five ranked headlines
    ///
    /// # Errors
    ///
    /// Returns a tagged [`NewsError`] on any failure, including "no articles"
    async fn top_headlines(&self, request: &HeadlineRequest) -> Result<Vec<Headline>, NewsError>;
}

/// NewsAPI-backed news client
pub struct NewsClient {
    client: reqwest::Client,
    api_key: Option<String>,
}

impl NewsClient {
    /// Create a news client; `api_key = None` means unconfigured
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built
    pub fn new(api_key: Option<String>) -> Result<Self, NewsError> {
        let client = reqwest::Client::builder()
            .timeout(NEWS_TIMEOUT)
            .build()
            .map_err(|e| NewsError::Request(e.to_string()))?;
        Ok(Self { client, api_key })
    }

    /// Total contract: one speech-ready string per headline, or a
    /// one-element list describing the failure. Never fails.
    pub async fn spoken_headlines(&self, request: &HeadlineRequest) -> Vec<String> {
        match self.top_headlines(request).await {
            Ok(headlines) => headlines.iter().map(ToString::to_string).collect(),
            Err(e) => vec![e.to_string()],
        }
    }
}

#[async_trait]
impl NewsCollaborator for NewsClient {
    async fn top_headlines(&self, request: &HeadlineRequest) -> Result<Vec<Headline>, NewsError> {
        // Unconfigured key short-circuits before any network call
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(NewsError::Unconfigured);
        };

        tracing::debug!(country = %request.country, category = %request.category, "fetching headlines");

        let response = self
            .client
            .get(NEWS_ENDPOINT)
            .query(&[
                ("country", request.country.as_str()),
                ("apiKey", api_key),
                ("pageSize", "5"),
                ("sortBy", "publishedAt"),
            ])
            .send()
            .await?
            .error_for_status()?;

        let payload: NewsResponse = response.json().await?;
        headlines_from(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headline_template() {
        let headline = Headline {
            rank: 3,
            title: "Markets rally".to_string(),
            source: "The Hindu".to_string(),
        };
        assert_eq!(headline.to_string(), "Headline 3: Markets rally from The Hindu");
    }

    #[test]
    fn test_payload_to_headlines() {
        let payload: NewsResponse = serde_json::from_str(
            r#"{"status": "ok", "articles": [
                {"title": "First", "source": {"name": "Alpha"}},
                {"title": null, "source": {"name": "Beta"}},
                {"title": "Third", "source": null}
            ]}"#,
        )
        .unwrap();

        let headlines = headlines_from(payload).unwrap();
        assert_eq!(headlines.len(), 3);
        assert_eq!(headlines[0].to_string(), "Headline 1: First from Alpha");
        assert_eq!(headlines[1].to_string(), "Headline 2: No title available from Beta");
        assert_eq!(headlines[2].to_string(), "Headline 3: Third from Unknown source");
    }

    #[test]
    fn test_at_most_five_headlines() {
        let articles: Vec<String> = (0..8)
            .map(|i| format!(r#"{{"title": "T{i}", "source": {{"name": "S"}}}}"#))
            .collect();
        let payload: NewsResponse = serde_json::from_str(&format!(
            r#"{{"status": "ok", "articles": [{}]}}"#,
            articles.join(",")
        ))
        .unwrap();

        let headlines = headlines_from(payload).unwrap();
        assert_eq!(headlines.len(), 5);
        assert_eq!(headlines[4].rank, 5);
    }

    #[test]
    fn test_api_error_status() {
        let payload: NewsResponse =
            serde_json::from_str(r#"{"status": "error", "message": "apiKeyInvalid"}"#).unwrap();
        let err = headlines_from(payload).unwrap_err();
        assert!(matches!(err, NewsError::Api(_)));
        assert_eq!(err.to_string(), "Error fetching news: apiKeyInvalid");
    }

    #[test]
    fn test_zero_articles() {
        let payload: NewsResponse =
            serde_json::from_str(r#"{"status": "ok", "articles": []}"#).unwrap();
        let err = headlines_from(payload).unwrap_err();
        assert!(matches!(err, NewsError::Empty));
        assert_eq!(err.to_string(), "No news articles found.");
    }

    #[test]
    fn test_unconfigured_key_skips_network() {
        let client = NewsClient::new(None).unwrap();
        let lines =
            tokio_test::block_on(client.spoken_headlines(&HeadlineRequest::default()));
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("NEWS_API_KEY"));
    }
}
