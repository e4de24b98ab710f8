//! Concurrent fetch pipeline over resolved media items.

use futures::stream::{self, StreamExt};
use indicatif::ProgressBar;
use regex::Regex;
use tokio_util::sync::CancellationToken;

use crate::api::RedditClient;
use crate::download::fetch::{Downloader, Fetched};
use crate::download::retry::RetryPolicy;
use crate::fs::StorageRouter;
use crate::media::ResolvedItem;

/// Concurrent download ceiling, matching the shared connection pool size.
const MAX_CONCURRENT_DOWNLOADS: usize = 10;

/// Terminal state of one item after the batch completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// Fetched and stored.
    Saved,
    /// The host reports the resource deleted; expected, not an error.
    Gone,
    /// Abandoned after retries or on a fatal per-item error.
    Abandoned,
    /// The URL matched no known media shape.
    Unrecognized,
    /// Never started because the run was interrupted.
    Cancelled,
}

/// Per-item completion record. Every scheduled item produces exactly one.
#[derive(Debug, Clone)]
pub struct DownloadResult {
    pub id: String,
    pub outcome: DownloadOutcome,
    pub detail: Option<String>,
}

enum Planned {
    Task { id: String, name: String, url: String },
    Skip(DownloadResult),
}

/// Schedules one download task per item over the shared client.
pub struct FetchPipeline {
    downloader: Downloader,
    retry: RetryPolicy,
}

impl FetchPipeline {
    pub fn new(client: RedditClient, router: StorageRouter) -> Self {
        Self {
            downloader: Downloader::new(client, router),
            retry: RetryPolicy::network(),
        }
    }

    /// Download the whole batch, one task per item, bounded by the pool size.
    ///
    /// A failure in one task never cancels its siblings, and the batch is
    /// awaited to completion. Cancelling the token stops new items from
    /// starting; tasks already in flight finish (or fail) on their own.
    pub async fn run(
        &self,
        items: Vec<ResolvedItem>,
        cancel: CancellationToken,
        progress: Option<ProgressBar>,
    ) -> Vec<DownloadResult> {
        let planned: Vec<Planned> = items.into_iter().map(plan).collect();

        stream::iter(planned)
            .map(|planned| {
                let progress = progress.clone();
                let cancel = cancel.clone();
                async move {
                    let result = match planned {
                        Planned::Skip(result) => result,
                        Planned::Task { id, name, url } => {
                            self.download_one(&id, &name, &url, &cancel).await
                        }
                    };
                    if let Some(bar) = &progress {
                        bar.inc(1);
                    }
                    result
                }
            })
            .buffer_unordered(MAX_CONCURRENT_DOWNLOADS)
            .collect()
            .await
    }

    async fn download_one(
        &self,
        id: &str,
        name: &str,
        url: &str,
        cancel: &CancellationToken,
    ) -> DownloadResult {
        if cancel.is_cancelled() {
            return DownloadResult {
                id: id.to_string(),
                outcome: DownloadOutcome::Cancelled,
                detail: None,
            };
        }

        let downloader = &self.downloader;
        let outcome = match self.retry.run(id, move || downloader.download(name, url)).await {
            Some(Fetched::Saved) => DownloadOutcome::Saved,
            Some(Fetched::Gone) => DownloadOutcome::Gone,
            None => DownloadOutcome::Abandoned,
        };

        DownloadResult {
            id: id.to_string(),
            outcome,
            detail: None,
        }
    }
}

fn plan(item: ResolvedItem) -> Planned {
    match infer_file_name(&item.id, &item.url) {
        Some(name) => Planned::Task {
            id: item.id,
            name,
            url: item.url,
        },
        None => {
            tracing::warn!("Unrecognized link skipped: {}", item.url);
            Planned::Skip(DownloadResult {
                id: item.id,
                outcome: DownloadOutcome::Unrecognized,
                detail: Some(item.url),
            })
        }
    }
}

/// Derive the destination file name by appending the extension matched in
/// the URL. Some v.redd.it links carry no file extension at all, so those
/// default to mp4.
fn infer_file_name(id: &str, url: &str) -> Option<String> {
    let re = Regex::new(r"\.(jpe?g|gifv?|png|mp4)").unwrap();
    if let Some(captures) = re.captures(url) {
        return Some(format!("{}.{}", id, &captures[1]));
    }

    if url.contains("v.redd.it") {
        return Some(format!("{}.mp4", id));
    }

    None
}
