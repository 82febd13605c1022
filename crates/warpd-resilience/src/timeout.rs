//! Bounded waits

use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use warpd_error::WarpError;

/// Operation did not finish in time
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Operation '{operation}' timed out after {duration:?}")]
pub struct TimeoutError {
    /// The operation that timed out
    pub operation: String,
    /// The timeout duration
    pub duration: Duration,
}

impl From<TimeoutError> for WarpError {
    fn from(err: TimeoutError) -> Self {
        WarpError::Timeout(err.to_string())
    }
}

/// Execute a future with a timeout
pub async fn with_timeout<T>(
    duration: Duration,
    operation: impl Into<String>,
    future: impl Future<Output = T>,
) -> Result<T, TimeoutError> {
    let operation = operation.into();
    tokio::time::timeout(duration, future)
        .await
        .map_err(|_| TimeoutError {
            operation,
            duration,
        })
}

/// Like [`with_timeout`], but waits forever when `duration` is `None`
pub async fn with_optional_timeout<T>(
    duration: Option<Duration>,
    operation: impl Into<String>,
    future: impl Future<Output = T>,
) -> Result<T, TimeoutError> {
    match duration {
        Some(duration) => with_timeout(duration, operation, future).await,
        None => Ok(future.await),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_with_timeout_success() {
        let result = with_timeout(Duration::from_secs(1), "confirm", async { 42 }).await;
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_with_timeout_expires() {
        let result = with_timeout(
            Duration::from_millis(10),
            "confirm",
            tokio::time::sleep(Duration::from_secs(5)),
        )
        .await;
        let err = result.unwrap_err();
        assert_eq!(err.operation, "confirm");
        assert!(matches!(WarpError::from(err), WarpError::Timeout(_)));
    }

    #[tokio::test]
    async fn test_optional_timeout_none_waits() {
        let result = with_optional_timeout(None, "confirm", async {
            tokio::time::sleep(Duration::from_millis(5)).await;
            "done"
        })
        .await;
        assert_eq!(result.unwrap(), "done");
    }
}
