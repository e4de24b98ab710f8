//! Download module for the concurrent fetch pipeline.
//!
//! This module provides:
//! - Bounded retry policy with transient/fatal classification
//! - Concurrent fetch pipeline over resolved items
//! - Single-item downloading
//! - Audio/video merging through ffmpeg

pub mod fetch;
pub mod merger;
pub mod pipeline;
pub mod retry;

pub use fetch::{Downloader, Fetched};
pub use merger::MediaMerger;
pub use pipeline::{DownloadOutcome, DownloadResult, FetchPipeline};
pub use retry::{classify_network, ErrorClass, RetryPolicy};
