//! Exponential backoff with jitter
//!
//! Used for registry fetches, which may fail transiently while the rest of
//! the context build is cheap to repeat.

use rand::Rng;
use std::future::Future;
use std::time::Duration;
use warpd_error::WarpError;

/// Backoff strategy configuration
#[derive(Debug, Clone, PartialEq)]
pub struct BackoffConfig {
    /// Delay before the first retry
    initial_delay: Duration,
    /// Maximum delay cap
    max_delay: Duration,
    /// Growth factor per retry
    multiplier: f64,
    /// Jitter factor (0.0 to 1.0)
    jitter: f64,
    /// Maximum number of attempts, including the first
    max_attempts: u32,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(5),
            multiplier: 2.0,
            jitter: 0.2,
            max_attempts: 3,
        }
    }
}

impl BackoffConfig {
    /// Create a new backoff config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set initial delay
    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Set maximum delay
    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Set growth factor per retry; values below 1.0 (or NaN) become 1.0
    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier.max(1.0);
        self
    }

    /// Set jitter factor, clamped to 0.0..=1.0
    pub fn with_jitter(mut self, jitter: f64) -> Self {
        self.jitter = jitter.clamp(0.0, 1.0);
        self
    }

    /// Set maximum attempts; zero is treated as one
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }
}

/// Iterator over retry delays
#[derive(Debug, Clone)]
pub struct ExponentialBackoff {
    config: BackoffConfig,
    attempt: u32,
    current_delay: Duration,
}

impl ExponentialBackoff {
    /// Create a new backoff instance
    pub fn new(config: BackoffConfig) -> Self {
        Self {
            current_delay: config.initial_delay,
            config,
            attempt: 0,
        }
    }

    /// Attempts made so far
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    /// Returns true while attempts remain
    pub fn can_retry(&self) -> bool {
        self.attempt < self.config.max_attempts
    }

    fn jittered(&self, base: Duration) -> Duration {
        if self.config.jitter <= 0.0 || base.is_zero() {
            return base;
        }
        let range = base.as_secs_f64() * self.config.jitter;
        let offset = rand::thread_rng().gen_range(-range..range);
        Duration::from_secs_f64((base.as_secs_f64() + offset).max(0.0))
    }
}

impl Iterator for ExponentialBackoff {
    type Item = Duration;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.can_retry() {
            return None;
        }
        let delay = self.jittered(self.current_delay).min(self.config.max_delay);
        self.attempt += 1;
        self.current_delay = Duration::from_secs_f64(
            (self.current_delay.as_secs_f64() * self.config.multiplier)
                .min(self.config.max_delay.as_secs_f64()),
        );
        Some(delay)
    }
}

/// All attempts failed
#[derive(Debug)]
pub struct BackoffError<E> {
    /// Number of attempts made
    pub attempts: u32,
    /// Error from the final attempt
    pub last_error: E,
}

impl<E: std::fmt::Display> std::fmt::Display for BackoffError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "All {} attempts exhausted: {}", self.attempts, self.last_error)
    }
}

impl<E: std::error::Error + 'static> std::error::Error for BackoffError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.last_error)
    }
}

impl From<BackoffError<WarpError>> for WarpError {
    fn from(err: BackoffError<WarpError>) -> Self {
        err.last_error
    }
}

/// Runs `f` until it succeeds or attempts run out, sleeping between tries
pub async fn with_backoff<F, Fut, T, E>(config: BackoffConfig, mut f: F) -> Result<T, BackoffError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut backoff = ExponentialBackoff::new(config);
    loop {
        // Consume the delay up front so `attempt` counts this try.
        let delay = backoff.next();
        match f().await {
            Ok(value) => return Ok(value),
            Err(e) if backoff.can_retry() => {
                tracing::debug!(attempt = backoff.attempt(), error = %e, "Attempt failed, retrying");
                if let Some(delay) = delay {
                    tokio::time::sleep(delay).await;
                }
            }
            Err(e) => {
                tracing::warn!(attempts = backoff.attempt(), error = %e, "Giving up after retries");
                return Err(BackoffError {
                    attempts: backoff.attempt(),
                    last_error: e,
                });
            }
        }
    }
}
