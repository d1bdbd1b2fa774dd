use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::time::Duration;
use tokio::time::sleep;
use tracing::warn;

/// Delay used for the final retries when no base delays are configured.
const FALLBACK_DELAY_MS: u64 = 1_000;

/// Backoff schedule: one attempt, then one retry per base delay, then
/// `final_retries` more at the last (longest) delay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    pub base_delays_ms: Vec<u64>,
    pub final_retries: usize,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            base_delays_ms: vec![250, 500, 1_000],
            final_retries: 1,
        }
    }
}

impl RetryPolicy {
    /// No retries at all.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            base_delays_ms: Vec::new(),
            final_retries: 0,
        }
    }

    #[must_use]
    pub fn attempts(&self) -> usize {
        1 + self.base_delays_ms.len() + self.final_retries
    }

    fn delays(&self) -> impl Iterator<Item = Duration> + '_ {
        let final_delay = self
            .base_delays_ms
            .last()
            .copied()
            .unwrap_or(FALLBACK_DELAY_MS);
        self.base_delays_ms
            .iter()
            .copied()
            .chain(std::iter::repeat_n(final_delay, self.final_retries))
            .map(Duration::from_millis)
    }
}

/// Retry an async operation with backoff.
///
/// Errors for which `should_retry` is false are returned immediately.
///
/// # Returns
/// The result of the operation if successful, or the last error if all retries fail
pub async fn retry_with_backoff<F, Fut, T, E>(
    mut operation: F,
    policy: &RetryPolicy,
    should_retry: impl Fn(&E) -> bool,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, E>>,
    E: Display,
{
    let total = policy.attempts();
    let mut delays = policy.delays();
    let mut attempt = 1;

    loop {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) => {
                if !should_retry(&e) {
                    return Err(e);
                }
                let Some(delay) = delays.next() else {
                    return Err(e);
                };
                warn!(
                    "Request failed (attempt {attempt}/{total}): {e}. Retrying after {}ms...",
                    delay.as_millis()
                );
                sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn quick() -> RetryPolicy {
        RetryPolicy {
            base_delays_ms: vec![1, 2],
            final_retries: 2,
        }
    }

    #[tokio::test]
    async fn retry_succeeds_on_first_attempt() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let result = retry_with_backoff(
            || {
                let attempts = attempts.clone();
                async move {
                    attempts.fetch_add(1, Ordering::SeqCst);
                    Ok::<(), String>(())
                }
            },
            &quick(),
            |_| true,
        )
        .await;
        assert!(result.is_ok());
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retry_succeeds_after_failures() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let result: std::result::Result<(), String> = retry_with_backoff(
            || {
                let attempts = attempts.clone();
                async move {
                    let count = attempts.fetch_add(1, Ordering::SeqCst) + 1;
                    if count < 3 {
                        Err(String::from("fail"))
                    } else {
                        Ok(())
                    }
                }
            },
            &quick(),
            |_| true,
        )
        .await;
        assert!(result.is_ok());
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn retry_fails_after_all_attempts() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let result: std::result::Result<(), String> = retry_with_backoff(
            || {
                let attempts = attempts.clone();
                async move {
                    attempts.fetch_add(1, Ordering::SeqCst);
                    Err(String::from("fail"))
                }
            },
            &quick(),
            |_| true,
        )
        .await;
        assert!(result.is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 5); // 1 + 2 base + 2 final
    }

    #[tokio::test]
    async fn permanent_errors_are_not_retried() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let result: std::result::Result<(), String> = retry_with_backoff(
            || {
                let attempts = attempts.clone();
                async move {
                    attempts.fetch_add(1, Ordering::SeqCst);
                    Err(String::from("not found"))
                }
            },
            &quick(),
            |e: &String| e != "not found",
        )
        .await;
        assert_eq!(result.unwrap_err(), "not found");
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn final_retries_reuse_the_longest_delay() {
        let delays: Vec<u64> = quick()
            .delays()
            .map(|d| u64::try_from(d.as_millis()).unwrap())
            .collect();
        assert_eq!(delays, vec![1, 2, 2, 2]);
        assert_eq!(RetryPolicy::none().attempts(), 1);
    }
}
