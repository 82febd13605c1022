//! # warpd Resilience
//!
//! Timeouts and retries for the network-facing steps of the transfer client.
//!
//! - **Exponential Backoff**: registry prefetch is retried with growing delays
//! - **Timeouts**: confirmation waits can be bounded
//!
//! ```rust
//! use warpd_resilience::{BackoffConfig, ExponentialBackoff};
//! use std::time::Duration;
//!
//! let config = BackoffConfig::new()
//!     .with_initial_delay(Duration::from_millis(100))
//!     .with_jitter(0.0)
//!     .with_max_attempts(3);
//!
//! let delays: Vec<_> = ExponentialBackoff::new(config).collect();
//! assert_eq!(delays.len(), 3);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod backoff;
pub mod timeout;

pub use backoff::{with_backoff, BackoffConfig, BackoffError, ExponentialBackoff};
pub use timeout::{with_optional_timeout, with_timeout, TimeoutError};
