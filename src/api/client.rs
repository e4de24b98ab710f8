//! Shared HTTP client for media hosts and reddit endpoints.

use reqwest::{header, Client, Response};

use crate::error::Result;

/// Idle connections kept per host; the de facto download concurrency ceiling.
const MAX_POOL_CONNECTIONS: usize = 10;

/// HTTP client shared by every concurrent task in a run.
#[derive(Debug, Clone)]
pub struct RedditClient {
    client: Client,
}

impl RedditClient {
    /// Build the shared client.
    ///
    /// Some image hosts serve broken certificate chains, so verification is
    /// turned off. No total request timeout either: a big subreddit keeps a
    /// run alive for hours and a session-wide deadline would expire mid-batch.
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .danger_accept_invalid_certs(true)
            .pool_max_idle_per_host(MAX_POOL_CONNECTIONS)
            .build()?;

        Ok(Self { client })
    }

    /// Plain GET against a media host.
    pub async fn get(&self, url: &str) -> Result<Response> {
        tracing::debug!("GET {}", url);
        Ok(self.client.get(url).send().await?)
    }

    /// GET with the browser header set reddit.com expects on its `.json`
    /// endpoints; unadorned clients are served something else entirely.
    pub async fn get_with_browser_headers(&self, url: &str) -> Result<Response> {
        tracing::debug!("GET {} (browser headers)", url);
        Ok(self.client.get(url).headers(browser_headers()).send().await?)
    }
}

fn browser_headers() -> header::HeaderMap {
    let mut headers = header::HeaderMap::new();

    headers.insert(
        "sec-ch-ua",
        header::HeaderValue::from_static(
            r#""Chromium";v="94", "Google Chrome";v="94", ";Not A Brand";v="99""#,
        ),
    );
    headers.insert("sec-ch-ua-mobile", header::HeaderValue::from_static("?0"));
    headers.insert(
        "sec-ch-ua-platform",
        header::HeaderValue::from_static(r#""Windows""#),
    );
    headers.insert("dnt", header::HeaderValue::from_static("1"));
    headers.insert(
        "upgrade-insecure-requests",
        header::HeaderValue::from_static("1"),
    );
    headers.insert(
        header::USER_AGENT,
        header::HeaderValue::from_static(
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
             (KHTML, like Gecko) Chrome/94.0.4606.71 Safari/537.36",
        ),
    );
    headers.insert(
        header::ACCEPT,
        header::HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,\
             image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.9",
        ),
    );
    headers.insert("sec-fetch-site", header::HeaderValue::from_static("none"));
    headers.insert(
        "sec-fetch-mode",
        header::HeaderValue::from_static("navigate"),
    );
    headers.insert("sec-fetch-user", header::HeaderValue::from_static("?1"));
    headers.insert(
        "sec-fetch-dest",
        header::HeaderValue::from_static("document"),
    );
    headers.insert(
        header::ACCEPT_LANGUAGE,
        header::HeaderValue::from_static("en,es-ES;q=0.9,es;q=0.8"),
    );

    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_browser_headers_include_user_agent() {
        let headers = browser_headers();
        assert!(headers.contains_key(header::USER_AGENT));
        assert_eq!(headers.get("sec-fetch-mode").unwrap(), "navigate");
    }
}
