//! End-of-run statistics reporting.

use std::time::Duration;

use console::style;

use crate::download::{DownloadOutcome, DownloadResult};

/// Aggregated outcome counts for one run.
#[derive(Debug, Default)]
pub struct RunStats {
    pub saved: u64,
    pub gone: u64,
    pub abandoned: u64,
    pub unrecognized: u64,
    pub cancelled: u64,
}

impl RunStats {
    /// Tally one result per scheduled item.
    pub fn from_results(results: &[DownloadResult]) -> Self {
        let mut stats = Self::default();
        for result in results {
            match result.outcome {
                DownloadOutcome::Saved => stats.saved += 1,
                DownloadOutcome::Gone => stats.gone += 1,
                DownloadOutcome::Abandoned => stats.abandoned += 1,
                DownloadOutcome::Unrecognized => stats.unrecognized += 1,
                DownloadOutcome::Cancelled => stats.cancelled += 1,
            }
        }
        stats
    }

    pub fn total(&self) -> u64 {
        self.saved + self.gone + self.abandoned + self.unrecognized + self.cancelled
    }
}

/// Print the run summary.
pub fn print_run_stats(stats: &RunStats, elapsed: Duration) {
    println!();
    println!("{}", style("═".repeat(50)).dim());
    println!("{}", style("Run statistics:").bold());
    println!("  Downloaded:   {}", style(stats.saved).green());
    if stats.gone > 0 {
        println!("  Deleted:      {} (already gone upstream)", stats.gone);
    }
    if stats.abandoned > 0 {
        println!("  Abandoned:    {}", style(stats.abandoned).red());
    }
    if stats.unrecognized > 0 {
        println!("  Unrecognized: {}", stats.unrecognized);
    }
    if stats.cancelled > 0 {
        println!("  Cancelled:    {}", style(stats.cancelled).yellow());
    }
    println!("  Total items:  {}", stats.total());
    println!("  Exec time: {:.2} minutes.", elapsed.as_secs_f64() / 60.0);
    println!("{}", style("═".repeat(50)).dim());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(outcome: DownloadOutcome) -> DownloadResult {
        DownloadResult {
            id: "x".to_string(),
            outcome,
            detail: None,
        }
    }

    #[test]
    fn test_from_results_counts_outcomes() {
        let results = vec![
            result(DownloadOutcome::Saved),
            result(DownloadOutcome::Saved),
            result(DownloadOutcome::Gone),
            result(DownloadOutcome::Abandoned),
        ];

        let stats = RunStats::from_results(&results);
        assert_eq!(stats.saved, 2);
        assert_eq!(stats.gone, 1);
        assert_eq!(stats.abandoned, 1);
        assert_eq!(stats.total(), 4);
    }
}
