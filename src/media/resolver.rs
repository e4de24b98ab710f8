//! Submission classification and media URL resolution.

use std::time::Duration;

use regex::Regex;
use tokio::time::sleep;

use crate::api::types::{GalleryEntry, PostListing, RedditVideo, Submission};
use crate::api::RedditClient;
use crate::download::RetryPolicy;
use crate::error::Result;
use crate::media::item::{MediaKind, ResolvedItem};

/// Gallery collection URL prefix.
const GALLERY_PREFIX: &str = "https://www.reddit.com/gallery/";

/// Reddit-hosted video URL prefix.
const VIDEO_PREFIX: &str = "https://v.redd.it/";

/// Cooldown reddit asks for when it answers 429 on the `.json` endpoint.
const RATE_LIMIT_COOLDOWN: Duration = Duration::from_secs(300);

/// Classifies submissions and resolves them into fetchable media items.
pub struct MediaResolver {
    client: RedditClient,
    retry: RetryPolicy,
}

impl MediaResolver {
    pub fn new(client: &RedditClient) -> Self {
        Self {
            client: client.clone(),
            retry: RetryPolicy::network(),
        }
    }

    /// Resolve one submission into zero or more fetchable items.
    ///
    /// Classification is first match wins: direct file link, imgur `.gifv`
    /// page, gallery collection, reddit-hosted video, and finally external
    /// links, which are skipped without comment.
    pub async fn resolve(&self, submission: &Submission) -> Vec<ResolvedItem> {
        let Some(url) = submission.url.as_deref() else {
            return Vec::new();
        };

        if let Some(kind) = direct_kind(url) {
            return vec![ResolvedItem {
                id: submission.id.clone(),
                url: url.to_string(),
                kind,
            }];
        }

        if url.ends_with(".gifv") {
            return self.resolve_gifv(&submission.id, url).await.into_iter().collect();
        }

        if url.starts_with(GALLERY_PREFIX) {
            return resolve_gallery(submission);
        }

        if url.starts_with(VIDEO_PREFIX) {
            return self.resolve_video(submission).await.into_iter().collect();
        }

        // External link. Ignore it.
        Vec::new()
    }

    /// Imgur `.gifv` pages are really mp4s; fetch the page and pull the
    /// video URL out of its meta markup.
    async fn resolve_gifv(&self, id: &str, url: &str) -> Option<ResolvedItem> {
        let client = self.client.clone();
        let target = url.to_string();
        let body = self
            .retry
            .run(id, move || {
                let client = client.clone();
                let target = target.clone();
                async move { Ok(client.get(&target).await?.bytes().await?) }
            })
            .await?;

        let body = match String::from_utf8(body.to_vec()) {
            Ok(text) => text,
            Err(_) => {
                tracing::warn!("Wrong encoding format for {}. Skipped.", url);
                return None;
            }
        };

        extract_mp4_marker(&body).map(|mp4| ResolvedItem {
            id: id.to_string(),
            url: mp4,
            kind: MediaKind::Video,
        })
    }

    /// Resolve a reddit-hosted video through the fallback chain.
    async fn resolve_video(&self, submission: &Submission) -> Option<ResolvedItem> {
        let client = self.client.clone();
        let sub = submission.clone();
        let url = self
            .retry
            .run(&submission.id, move || {
                let client = client.clone();
                let sub = sub.clone();
                async move { fallback_video_url(&client, &sub).await }
            })
            .await??;

        Some(ResolvedItem {
            id: submission.id.clone(),
            url,
            kind: MediaKind::Video,
        })
    }
}

/// Kind for direct file links, by extension.
fn direct_kind(url: &str) -> Option<MediaKind> {
    let re = Regex::new(r"\.(jpg|gif|png)$").unwrap();
    let ext = re.captures(url)?.get(1)?.as_str();
    Some(match ext {
        "gif" => MediaKind::Gif,
        _ => MediaKind::Image,
    })
}

/// Find the embedded `content="...mp4"` marker in a gifv page body.
fn extract_mp4_marker(body: &str) -> Option<String> {
    let re = Regex::new(r#"content="([^"]+mp4)"#).unwrap();
    Some(re.captures(body)?.get(1)?.as_str().to_string())
}

/// Expand a gallery post into one image item per completed entry.
fn resolve_gallery(submission: &Submission) -> Vec<ResolvedItem> {
    // Removed posts lose their metadata entirely.
    let Some(metadata) = &submission.media_metadata else {
        return Vec::new();
    };

    let mut items = Vec::new();
    for value in metadata.values() {
        let Ok(entry) = serde_json::from_value::<GalleryEntry>(value.clone()) else {
            continue;
        };

        // Entries still processing carry no usable URL yet.
        if entry.status.as_deref() != Some("completed") {
            continue;
        }

        let Some(url) = entry.s.and_then(|s| s.u) else {
            continue;
        };

        // Reddit escapes the served URL; the literal `amp;` artifacts break it.
        let url = url.replace("amp;", "");

        items.push(ResolvedItem {
            id: format!("{}_{}", submission.id, items.len() + 1),
            url,
            kind: MediaKind::Image,
        });
    }

    items
}

/// Follow the video fallback chain for one reddit-hosted submission.
///
/// Crossposted submissions carry the video descriptor on their first parent.
/// Everything else goes through the permalink `.json` endpoint.
async fn fallback_video_url(
    client: &RedditClient,
    submission: &Submission,
) -> Result<Option<String>> {
    if let Some(first) = submission
        .crosspost_parent_list
        .as_ref()
        .and_then(|parents| parents.first())
    {
        let video = first.media.as_ref().and_then(|m| m.reddit_video.as_ref());
        return Ok(video.and_then(playable_url));
    }

    fetch_video_url_from_json(client, submission).await
}

/// Fetch the video descriptor from the permalink `.json` endpoint.
async fn fetch_video_url_from_json(
    client: &RedditClient,
    submission: &Submission,
) -> Result<Option<String>> {
    let Some(permalink) = submission.permalink.as_deref() else {
        return Ok(None);
    };
    let link = format!("https://www.reddit.com{}.json", permalink);

    loop {
        let response = client.get_with_browser_headers(&link).await?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            tracing::warn!("Too many requests. Sleeping 5 minutes and trying again...");
            sleep(RATE_LIMIT_COOLDOWN).await;
            continue;
        }

        let text = response.text().await?;
        let listings: Vec<PostListing> = match serde_json::from_str(&text) {
            Ok(listings) => listings,
            Err(err) => {
                tracing::warn!("Error downloading video {}: {}", submission.id, err);
                return Ok(None);
            }
        };

        return Ok(secure_media_url(&listings));
    }
}

/// Locate the secure-media video descriptor inside the listing payload.
///
/// An absent descriptor means the media was removed before it transcoded.
fn secure_media_url(listings: &[PostListing]) -> Option<String> {
    let media = listings
        .first()?
        .data
        .children
        .first()?
        .data
        .secure_media
        .as_ref()?;

    media.reddit_video.as_ref().and_then(playable_url)
}

/// Only completed videos are playable through their fallback URL.
fn playable_url(video: &RedditVideo) -> Option<String> {
    if video.transcoding_status.as_deref() != Some("completed") {
        return None;
    }
    video.fallback_url.clone()
}
