//! Subreddit Downloader - bulk media downloader for subreddit feeds
//!
//! This library enumerates posts from a subreddit, resolves each post's true
//! media location and downloads the results to local storage.
//!
//! # Features
//!
//! - Direct image/gif downloads (i.redd.it, imgur and friends)
//! - Imgur `.gifv` pages resolved to their real mp4
//! - Reddit galleries, one file per completed gallery entry
//! - Reddit-hosted video with separate DASH audio, muxed via ffmpeg
//! - Bounded-concurrency downloads with per-item retry
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use subreddit_downloader::{Config, RedditClient, StorageRouter};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load(Path::new("config.toml"))?;
//!     let client = RedditClient::new()?;
//!     let router = StorageRouter::new(
//!         &config.download_directory(),
//!         &config.subreddit.name,
//!     )?;
//!
//!     // ... resolve and download
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod fs;
pub mod media;
pub mod output;

// Re-exports for convenience
pub use api::{PushshiftClient, RedditClient, Submission, SubmissionQuery, SubmissionSource};
pub use config::Config;
pub use download::{DownloadOutcome, DownloadResult, Downloader, FetchPipeline, RetryPolicy};
pub use error::{Error, Result};
pub use fs::StorageRouter;
pub use media::{MediaKind, MediaResolver, ResolvedItem};
