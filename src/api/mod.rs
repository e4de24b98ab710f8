//! Reddit API module.
//!
//! This module provides:
//! - Shared HTTP client (media hosts + reddit `.json` endpoints)
//! - Feed enumeration through the submission search index
//! - Wire-format types

pub mod client;
pub mod feed;
pub mod types;

pub use client::RedditClient;
pub use feed::{PushshiftClient, SubmissionQuery, SubmissionSource};
pub use types::*;
