//! Bounded retry policy for per-item network operations.

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;

use crate::error::{Error, Result};

/// How a failed operation should be handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Worth another attempt after the fixed delay.
    Transient,
    /// Abandon the item immediately.
    Fatal,
}

/// Classify reqwest connection and timeout failures as transient.
pub fn classify_network(error: &Error) -> ErrorClass {
    match error {
        Error::Http(err) if err.is_connect() || err.is_timeout() => ErrorClass::Transient,
        _ => ErrorClass::Fatal,
    }
}

/// Retries an operation tied to one item, with a fixed delay between
/// attempts. Once attempts run out, or on the first fatal error, the item is
/// abandoned: the failure is logged with the item identifier and `None` comes
/// back, so one bad item never takes its siblings down with it.
#[derive(Clone)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
    classify: fn(&Error) -> ErrorClass,
}

impl RetryPolicy {
    /// Policy applied to all network fetches: 5 attempts, 10 seconds apart.
    pub fn network() -> Self {
        Self::new(5, Duration::from_secs(10), classify_network)
    }

    pub fn new(max_attempts: u32, delay: Duration, classify: fn(&Error) -> ErrorClass) -> Self {
        Self {
            max_attempts,
            delay,
            classify,
        }
    }

    /// Run `op`, retrying per policy. Success at any attempt short-circuits.
    pub async fn run<T, F, Fut>(&self, item_id: &str, mut op: F) -> Option<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        for attempt in 1..=self.max_attempts {
            match op().await {
                Ok(value) => return Some(value),
                Err(error) => match (self.classify)(&error) {
                    ErrorClass::Transient => {
                        tracing::debug!("Error trying to connect: {}", error);

                        if attempt < self.max_attempts {
                            tracing::debug!(
                                "Try {}/{}. Retrying in {} seconds...",
                                attempt,
                                self.max_attempts,
                                self.delay.as_secs()
                            );
                            sleep(self.delay).await;
                        } else {
                            tracing::error!(
                                "Too many retries. Post will be skipped: {}",
                                item_id
                            );
                        }
                    }
                    ErrorClass::Fatal => {
                        tracing::error!("Error downloading post: {}", item_id);
                        tracing::error!("  {}", error);
                        return None;
                    }
                },
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn always_transient(_: &Error) -> ErrorClass {
        ErrorClass::Transient
    }

    fn always_fatal(_: &Error) -> ErrorClass {
        ErrorClass::Fatal
    }

    fn test_policy(classify: fn(&Error) -> ErrorClass) -> RetryPolicy {
        RetryPolicy::new(5, Duration::from_millis(1), classify)
    }

    #[tokio::test]
    async fn test_transient_failure_attempts_five_times_then_abandons() {
        let mut attempts = 0;
        let result: Option<()> = test_policy(always_transient)
            .run("post1", || {
                attempts += 1;
                std::future::ready(Err(Error::Download("connection reset".to_string())))
            })
            .await;

        assert!(result.is_none());
        assert_eq!(attempts, 5);
    }

    #[tokio::test]
    async fn test_fatal_failure_attempts_once() {
        let mut attempts = 0;
        let result: Option<()> = test_policy(always_fatal)
            .run("post2", || {
                attempts += 1;
                std::future::ready(Err(Error::Download("boom".to_string())))
            })
            .await;

        assert!(result.is_none());
        assert_eq!(attempts, 1);
    }

    #[tokio::test]
    async fn test_success_short_circuits_remaining_attempts() {
        let mut attempts = 0;
        let result = test_policy(always_transient)
            .run("post3", || {
                attempts += 1;
                let outcome = if attempts < 3 {
                    Err(Error::Download("timeout".to_string()))
                } else {
                    Ok(attempts)
                };
                std::future::ready(outcome)
            })
            .await;

        assert_eq!(result, Some(3));
        assert_eq!(attempts, 3);
    }

    #[test]
    fn test_classify_network_treats_non_http_errors_as_fatal() {
        assert_eq!(
            classify_network(&Error::Download("whatever".to_string())),
            ErrorClass::Fatal
        );
        assert_eq!(
            classify_network(&Error::Feed("bad payload".to_string())),
            ErrorClass::Fatal
        );
    }
}
