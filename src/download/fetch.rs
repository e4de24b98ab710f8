//! Single-item download logic.

use regex::Regex;

use crate::api::RedditClient;
use crate::download::merger::MediaMerger;
use crate::error::Result;
use crate::fs::StorageRouter;

/// Reddit-hosted video URL prefix; these need a companion audio fetch.
const VIDEO_PREFIX: &str = "https://v.redd.it";

/// What became of a single fetched item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fetched {
    /// Stored at its routed destination.
    Saved,
    /// The host reports the resource deleted; nothing stored.
    Gone,
}

/// Fetches one item's bytes and routes them to disk, merging in the
/// companion audio track for reddit-hosted video.
pub struct Downloader {
    client: RedditClient,
    router: StorageRouter,
    merger: MediaMerger,
}

impl Downloader {
    pub fn new(client: RedditClient, router: StorageRouter) -> Self {
        let merger = MediaMerger::new(router.clone());
        Self {
            client,
            router,
            merger,
        }
    }

    /// Download one item.
    pub async fn download(&self, name: &str, url: &str) -> Result<Fetched> {
        let response = self.client.get(url).await?;

        let status = response.status().as_u16();
        if status == 404 || status == 403 {
            // Image/Video has been deleted. Reddit answers 403 for its own
            // deleted hosted videos, so neither status is a mistake.
            return Ok(Fetched::Gone);
        }

        let content = response.bytes().await?;

        if url.starts_with(VIDEO_PREFIX) {
            let audio_url = audio_companion_url(url);
            let audio = self.client.get(&audio_url).await?.bytes().await?;
            self.merger.merge(name, &content, &audio).await?;
        } else {
            self.router.write(name, &content).await?;
        }

        Ok(Fetched::Saved)
    }
}

/// The DASH audio track lives at the video URL with the resolution marker
/// swapped out.
fn audio_companion_url(url: &str) -> String {
    let re = Regex::new(r"DASH_\d{3,4}").unwrap();
    re.replace(url, "DASH_audio").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audio_companion_url_swaps_resolution_marker() {
        assert_eq!(
            audio_companion_url("https://v.redd.it/abc/DASH_720.mp4?source=fallback"),
            "https://v.redd.it/abc/DASH_audio.mp4?source=fallback"
        );
        assert_eq!(
            audio_companion_url("https://v.redd.it/abc/DASH_1080.mp4"),
            "https://v.redd.it/abc/DASH_audio.mp4"
        );
    }

    #[test]
    fn test_audio_companion_url_leaves_other_urls_alone() {
        assert_eq!(
            audio_companion_url("https://v.redd.it/abc/video.mp4"),
            "https://v.redd.it/abc/video.mp4"
        );
    }
}
