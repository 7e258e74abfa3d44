use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Backoff policy for startup connection attempts.
///
/// Only used while establishing connections; request-time database calls are
/// never retried.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Retries after the first attempt
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub backoff_multiplier: u32,
    /// Scale each delay into 50-100% of its nominal value
    pub use_jitter: bool,
}

impl RetryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    pub fn without_jitter(mut self) -> Self {
        self.use_jitter = false;
        self
    }

    fn next_delay(&self, current: Duration) -> Duration {
        current
            .saturating_mul(self.backoff_multiplier)
            .min(self.max_delay)
    }
}

impl Default for RetryConfig {
    /// 5 retries starting at 250ms, doubling up to 5s.
    fn default() -> Self {
        Self {
            max_retries: 5,
            initial_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(5),
            backoff_multiplier: 2,
            use_jitter: true,
        }
    }
}

/// Retry an async operation with exponential backoff.
///
/// ```ignore
/// let db = retry_with_backoff(|| database::postgres::connect(&url), RetryConfig::new()).await?;
/// ```
pub async fn retry_with_backoff<F, Fut, T, E>(mut operation: F, config: RetryConfig) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut attempt = 0;
    let mut delay = config.initial_delay;

    loop {
        match operation().await {
            Ok(result) => {
                if attempt > 0 {
                    debug!(retries = attempt, "Operation succeeded after retrying");
                }
                return Ok(result);
            }
            Err(e) => {
                attempt += 1;

                if attempt > config.max_retries {
                    warn!(attempts = attempt, error = %e, "Giving up after repeated failures");
                    return Err(e);
                }

                let wait = if config.use_jitter {
                    apply_jitter(delay)
                } else {
                    delay
                };

                warn!(
                    attempt,
                    max_retries = config.max_retries,
                    error = %e,
                    "Operation failed, retrying in {:?}",
                    wait
                );

                tokio::time::sleep(wait).await;
                delay = config.next_delay(delay);
            }
        }
    }
}

/// Retry with [`RetryConfig::default`]
pub async fn retry<F, Fut, T, E>(operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    retry_with_backoff(operation, RetryConfig::default()).await
}

fn apply_jitter(delay: Duration) -> Duration {
    use std::collections::hash_map::RandomState;
    use std::hash::BuildHasher;

    // 50..=99 percent
    let percent = 50 + (RandomState::new().hash_one(std::time::SystemTime::now()) % 50) as u32;
    delay * percent / 100
}
