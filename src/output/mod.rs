//! Output module for console output and progress.
//!
//! Provides:
//! - Colored console output
//! - Progress bars
//! - End-of-run statistics

pub mod console;
pub mod progress;
pub mod stats;

pub use console::{print_banner, print_error, print_info, print_scrape_plan, print_warning};
pub use progress::{create_hidden_bar, create_item_bar};
pub use stats::{print_run_stats, RunStats};
