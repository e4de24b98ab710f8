//! Console output utilities.

use console::style;

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("INFO").cyan().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", style("WARN").yellow().bold(), message);
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("ERROR").red().bold(), message);
}

/// Print the application banner.
pub fn print_banner() {
    let banner = r#"
╔═══════════════════════════════════════════════════════╗
║     Subreddit Downloader                              ║
║     Bulk media downloads for subreddit feeds          ║
╚═══════════════════════════════════════════════════════╝
"#;
    println!("{}", style(banner).cyan());
}

/// Print what this run is about to scrape.
pub fn print_scrape_plan(
    subreddit: &str,
    before: Option<&str>,
    after: Option<&str>,
    download_dir: &str,
) {
    let plan = match (before, after) {
        (Some(before), Some(after)) => format!(
            "Scraping media from r/{} before {} and after {}",
            subreddit, before, after
        ),
        (Some(before), None) => format!("Scraping media from r/{} before {}", subreddit, before),
        (None, Some(after)) => format!("Scraping media from r/{} after {}", subreddit, after),
        (None, None) => format!("Scraping all media from r/{}", subreddit),
    };

    println!();
    println!("{}", style(plan).bold());
    println!("  Directory: {}", download_dir);
    println!();
}
