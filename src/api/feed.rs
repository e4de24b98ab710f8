//! Feed enumeration via the Pushshift submission search API.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use tokio::time::sleep;

use crate::api::client::RedditClient;
use crate::api::types::{SearchResponse, Submission};
use crate::error::{Error, Result};

/// Submission search endpoint.
const PUSHSHIFT_BASE: &str = "https://api.pushshift.io/reddit/search/submission/";

/// Submissions fetched per page.
const PAGE_SIZE: usize = 100;

/// Fields requested from the index; everything the resolver needs.
const FIELDS: &str = "id,url,media_metadata,crosspost_parent_list,permalink,created_utc";

/// Search window for one run.
#[derive(Debug, Clone, Default)]
pub struct SubmissionQuery {
    pub subreddit: String,
    /// Exclusive upper epoch bound.
    pub before: Option<i64>,
    /// Exclusive lower epoch bound.
    pub after: Option<i64>,
}

/// Where submissions come from. Abstracted so tests can feed a run without
/// the real search index.
#[async_trait]
pub trait SubmissionSource {
    /// Total number of matching submissions, for progress sizing.
    async fn count(&self, query: &SubmissionQuery) -> Result<u64>;

    /// All matching submissions, newest first.
    async fn search(&self, query: &SubmissionQuery) -> Result<Vec<Submission>>;
}

/// Pushshift-backed submission source.
pub struct PushshiftClient {
    client: RedditClient,
    base_url: String,
}

impl PushshiftClient {
    pub fn new(client: RedditClient) -> Self {
        Self {
            client,
            base_url: PUSHSHIFT_BASE.to_string(),
        }
    }

    /// Point the client at a different endpoint (test servers).
    pub fn with_base_url(client: RedditClient, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn page_url(
        &self,
        query: &SubmissionQuery,
        before: Option<i64>,
        size: usize,
        metadata: bool,
    ) -> String {
        let mut url = format!(
            "{}?subreddit={}&size={}&sort=desc&sort_type=created_utc&fields={}",
            self.base_url, query.subreddit, size, FIELDS
        );
        if let Some(before) = before {
            url.push_str(&format!("&before={}", before));
        }
        if let Some(after) = query.after {
            url.push_str(&format!("&after={}", after));
        }
        if metadata {
            url.push_str("&metadata=true");
        }
        url
    }

    async fn fetch_page(&self, url: &str) -> Result<SearchResponse> {
        let response = self.client.get(url).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Feed(format!(
                "submission search returned HTTP {}",
                status
            )));
        }

        let text = response.text().await?;
        serde_json::from_str(&text)
            .map_err(|e| Error::Feed(format!("malformed search response: {}", e)))
    }
}

#[async_trait]
impl SubmissionSource for PushshiftClient {
    async fn count(&self, query: &SubmissionQuery) -> Result<u64> {
        let url = self.page_url(query, query.before, 0, true);
        let page = self.fetch_page(&url).await?;

        page.metadata
            .and_then(|m| m.total_results)
            .ok_or_else(|| Error::Feed("search metadata is missing a total count".to_string()))
    }

    async fn search(&self, query: &SubmissionQuery) -> Result<Vec<Submission>> {
        let mut submissions = Vec::new();
        let mut cursor = query.before;

        loop {
            let url = self.page_url(query, cursor, PAGE_SIZE, false);
            let page = self.fetch_page(&url).await?;

            if page.data.is_empty() {
                break;
            }

            let page_len = page.data.len();
            cursor = page.data.last().and_then(|s| s.created_utc).map(|ts| ts as i64);
            submissions.extend(page.data);

            if page_len < PAGE_SIZE || cursor.is_none() {
                break;
            }

            // Politeness delay between pages.
            let delay_ms = rand::thread_rng().gen_range(300..700);
            sleep(Duration::from_millis(delay_ms)).await;
        }

        Ok(submissions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn search_base(server: &MockServer) -> String {
        format!("{}/reddit/search/submission/", server.uri())
    }

    #[tokio::test]
    async fn test_count_reads_metadata_total() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/reddit/search/submission/"))
            .and(query_param("metadata", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [],
                "metadata": {"total_results": 42}
            })))
            .mount(&server)
            .await;

        let source = PushshiftClient::with_base_url(RedditClient::new().unwrap(), search_base(&server));
        let query = SubmissionQuery {
            subreddit: "pics".to_string(),
            ..Default::default()
        };
        assert_eq!(source.count(&query).await.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_search_collects_single_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/reddit/search/submission/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [
                    {"id": "aaa", "url": "https://i.redd.it/aaa.jpg", "created_utc": 1000},
                    {"id": "bbb", "url": "https://i.redd.it/bbb.png", "created_utc": 900}
                ]
            })))
            .mount(&server)
            .await;

        let source = PushshiftClient::with_base_url(RedditClient::new().unwrap(), search_base(&server));
        let query = SubmissionQuery {
            subreddit: "pics".to_string(),
            ..Default::default()
        };
        let submissions = source.search(&query).await.unwrap();
        assert_eq!(submissions.len(), 2);
        assert_eq!(submissions[0].id, "aaa");
    }

    #[tokio::test]
    async fn test_search_surfaces_server_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let source = PushshiftClient::with_base_url(RedditClient::new().unwrap(), search_base(&server));
        let query = SubmissionQuery {
            subreddit: "pics".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            source.search(&query).await,
            Err(Error::Feed(_))
        ));
    }
}
