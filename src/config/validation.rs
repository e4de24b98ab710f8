//! Configuration validation logic.

use chrono::NaiveDate;
use regex::Regex;

use crate::config::loader::{Config, DatesConfig};
use crate::error::{Error, Result};

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_subreddit(&config.subreddit.name)?;
    epoch_bounds(&config.dates)?;

    Ok(())
}

/// Validate the subreddit name.
pub fn validate_subreddit(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::MissingConfig(
            "subreddit name (set it in config.toml or pass --subreddit)".to_string(),
        ));
    }

    let clean_name = name.trim_start_matches("r/");

    // Subreddit pattern: 2-21 chars, alphanumeric and underscores.
    let name_pattern = Regex::new(r"^[A-Za-z0-9_]{2,21}$").unwrap();
    if !name_pattern.is_match(clean_name) {
        return Err(Error::ConfigValidation {
            field: "subreddit".to_string(),
            message: format!(
                "Subreddit '{}' contains invalid characters. Only alphanumeric and underscores allowed.",
                name
            ),
        });
    }

    Ok(())
}

/// Convert the configured date window to epoch bounds.
pub fn epoch_bounds(dates: &DatesConfig) -> Result<(Option<i64>, Option<i64>)> {
    let before = dates
        .before
        .as_deref()
        .map(|value| parse_date_bound("dates.before", value))
        .transpose()?;
    let after = dates
        .after
        .as_deref()
        .map(|value| parse_date_bound("dates.after", value))
        .transpose()?;

    Ok((before, after))
}

fn parse_date_bound(field: &str, value: &str) -> Result<i64> {
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        Error::ConfigValidation {
            field: field.to_string(),
            message: format!("Date '{}' is wrong. Please use YYYY-MM-DD", value),
        }
    })?;

    Ok(date.and_hms_opt(0, 0, 0).unwrap().and_utc().timestamp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_subreddit_names() {
        assert!(validate_subreddit("pics").is_ok());
        assert!(validate_subreddit("Earth_Porn2").is_ok());
        assert!(validate_subreddit("r/pics").is_ok());
    }

    #[test]
    fn test_invalid_subreddit_names() {
        assert!(validate_subreddit("").is_err());
        assert!(validate_subreddit("a").is_err());
        assert!(validate_subreddit("has spaces").is_err());
        assert!(validate_subreddit("way_too_long_for_a_subreddit_name").is_err());
    }

    #[test]
    fn test_epoch_bounds_parses_dates() {
        let dates = DatesConfig {
            before: Some("2021-10-01".to_string()),
            after: Some("2021-01-01".to_string()),
        };
        let (before, after) = epoch_bounds(&dates).unwrap();
        assert_eq!(before, Some(1633046400));
        assert_eq!(after, Some(1609459200));
    }

    #[test]
    fn test_epoch_bounds_accepts_open_window() {
        let (before, after) = epoch_bounds(&DatesConfig::default()).unwrap();
        assert!(before.is_none());
        assert!(after.is_none());
    }

    #[test]
    fn test_epoch_bounds_rejects_malformed_dates() {
        let dates = DatesConfig {
            before: Some("01-10-2021".to_string()),
            after: None,
        };
        assert!(matches!(
            epoch_bounds(&dates),
            Err(Error::ConfigValidation { .. })
        ));
    }
}
