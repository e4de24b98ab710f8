//! Subreddit Downloader - CLI entry point.

use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{fmt, EnvFilter};

use subreddit_downloader::{
    api::{PushshiftClient, RedditClient, SubmissionQuery, SubmissionSource},
    cli::Args,
    config::{epoch_bounds, validate_config, Config},
    download::FetchPipeline,
    error::{exit_codes, Error, Result},
    fs::StorageRouter,
    media::MediaResolver,
    output::{
        create_hidden_bar, create_item_bar, print_banner, print_error, print_info,
        print_run_stats, print_scrape_plan, print_warning, RunStats,
    },
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            match e {
                Error::Config(_)
                | Error::ConfigValidation { .. }
                | Error::MissingConfig(_)
                | Error::TomlParse(_) => ExitCode::from(exit_codes::CONFIG_ERROR as u8),
                Error::Feed(_) => ExitCode::from(exit_codes::FEED_ERROR as u8),
                Error::Download(_) | Error::FFmpeg(_) => {
                    ExitCode::from(exit_codes::DOWNLOAD_ERROR as u8)
                }
                _ => ExitCode::from(exit_codes::UNEXPECTED_ERROR as u8),
            }
        }
    }
}

async fn run() -> Result<()> {
    let started = Instant::now();

    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_env_filter(filter).with_target(false).init();

    print_banner();

    // Load configuration
    let config_path = args.config.clone();
    let mut config = if config_path.exists() {
        Config::load(&config_path)?
    } else {
        print_warning(&format!(
            "Configuration file not found: {}",
            config_path.display()
        ));
        print_info("Using default configuration with CLI arguments");
        Config::default()
    };

    // Merge CLI arguments into config and validate
    args.merge_into_config(&mut config);
    validate_config(&config)?;

    let (before, after) = epoch_bounds(&config.dates)?;
    print_scrape_plan(
        &config.subreddit.name,
        config.dates.before.as_deref(),
        config.dates.after.as_deref(),
        &config.download_directory().display().to_string(),
    );

    let client = RedditClient::new()?;

    // A bad download root must fail here, before anything is fetched.
    let router = StorageRouter::new(&config.download_directory(), &config.subreddit.name)?;

    let source = PushshiftClient::new(client.clone());
    let query = SubmissionQuery {
        subreddit: config.subreddit.name.trim_start_matches("r/").to_string(),
        before,
        after,
    };

    let total = source.count(&query).await?;
    if total == 0 {
        print_info("No media posts found. Quitting...");
        return Ok(());
    }
    print_info(&format!("Found {} posts", total));

    print_info("Searching posts...");
    let submissions = source.search(&query).await?;

    let resolve_bar = if config.options.show_progress {
        create_item_bar(submissions.len() as u64, "posts")
    } else {
        create_hidden_bar()
    };

    let resolver = MediaResolver::new(&client);
    let mut items = Vec::new();
    for submission in &submissions {
        items.extend(resolver.resolve(submission).await);
        resolve_bar.inc(1);
    }
    resolve_bar.finish_and_clear();

    print_info(&format!(
        "Resolved {} media items from {} posts",
        items.len(),
        submissions.len()
    ));

    // Stop scheduling new downloads on interrupt; in-flight tasks finish on
    // their own so no file is torn mid-write.
    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                print_warning("Interrupt received; letting in-flight downloads finish...");
                cancel.cancel();
            }
        });
    }

    print_info("Downloading posts...");
    let download_bar = if config.options.show_progress {
        create_item_bar(items.len() as u64, "items")
    } else {
        create_hidden_bar()
    };

    let pipeline = FetchPipeline::new(client, router);
    let results = pipeline
        .run(items, cancel.clone(), Some(download_bar.clone()))
        .await;
    download_bar.finish_and_clear();

    let stats = RunStats::from_results(&results);
    print_run_stats(&stats, started.elapsed());

    if cancel.is_cancelled() {
        print_info("Downloads cancelled. Goodbye!");
    }

    Ok(())
}
