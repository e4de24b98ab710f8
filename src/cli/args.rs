//! Command-line argument definitions using clap.

use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;

/// Subreddit media downloader CLI.
#[derive(Parser, Debug)]
#[command(
    name = "subreddit-downloader",
    version,
    about = "Download media posted to a subreddit",
    long_about = "A CLI tool to download the images, gifs and videos posted to a subreddit.\n\n\
                  Direct links, imgur .gifv pages, galleries and reddit-hosted video (with \
                  separate DASH audio) are all supported."
)]
pub struct Args {
    /// Subreddit to scan, without the r/ prefix.
    #[arg(short, long, env = "SUBREDDIT")]
    pub subreddit: Option<String>,

    /// Root directory downloads land under.
    #[arg(short = 'd', long = "directory")]
    pub download_folder: Option<PathBuf>,

    /// Only fetch posts from before this date (YYYY-MM-DD).
    #[arg(long)]
    pub before: Option<String>,

    /// Only fetch posts from after this date (YYYY-MM-DD).
    #[arg(long)]
    pub after: Option<String>,

    /// Path to configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Hide progress bars.
    #[arg(long, short)]
    pub quiet: bool,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(self, config: &mut Config) {
        if let Some(subreddit) = self.subreddit {
            config.subreddit.name = subreddit;
        }

        if let Some(dir) = self.download_folder {
            config.options.download_folder = dir;
        }

        if let Some(before) = self.before {
            config.dates.before = Some(before);
        }

        if let Some(after) = self.after {
            config.dates.after = Some(after);
        }

        if self.quiet {
            config.options.show_progress = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_overrides_config() {
        let mut config = Config::default();
        let args = Args::parse_from([
            "subreddit-downloader",
            "--subreddit",
            "pics",
            "--before",
            "2021-10-01",
            "--quiet",
        ]);

        args.merge_into_config(&mut config);
        assert_eq!(config.subreddit.name, "pics");
        assert_eq!(config.dates.before.as_deref(), Some("2021-10-01"));
        assert!(!config.options.show_progress);
    }

    #[test]
    fn test_merge_keeps_config_values_when_unset() {
        let mut config = Config::default();
        config.subreddit.name = "earthporn".to_string();

        let args = Args::parse_from(["subreddit-downloader"]);
        args.merge_into_config(&mut config);
        assert_eq!(config.subreddit.name, "earthporn");
    }
}
