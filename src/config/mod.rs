//! Configuration module for the subreddit-downloader.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - CLI argument merging
//! - Configuration validation

pub mod loader;
pub mod validation;

pub use loader::{Config, DatesConfig, OptionsConfig, SubredditConfig};
pub use validation::{epoch_bounds, validate_config, validate_subreddit};
