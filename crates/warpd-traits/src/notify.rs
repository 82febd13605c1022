//! User-visible notifications

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    /// Operation succeeded
    Success,
    /// Degraded but continuing
    Warning,
    /// Operation failed
    Error,
}

impl fmt::Display for NoticeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoticeLevel::Success => write!(f, "success"),
            NoticeLevel::Warning => write!(f, "warning"),
            NoticeLevel::Error => write!(f, "error"),
        }
    }
}

/// A toast-style message for the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Severity
    pub level: NoticeLevel,
    /// Message text
    pub message: String,
    /// Transaction the notice links to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,
    /// Chain of that transaction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain: Option<String>,
}

impl Notice {
    /// Notice without a transaction link
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            tx_hash: None,
            chain: None,
        }
    }
}

/// Sink for user-visible notices
pub trait Notifier: Send + Sync {
    /// Shows a notice
    fn notify(&self, notice: Notice);

    /// Shows a success notice
    fn success(&self, message: &str) {
        self.notify(Notice::new(NoticeLevel::Success, message));
    }

    /// Shows a warning
    fn warn(&self, message: &str) {
        self.notify(Notice::new(NoticeLevel::Warning, message));
    }

    /// Shows an error
    fn error(&self, message: &str) {
        self.notify(Notice::new(NoticeLevel::Error, message));
    }

    /// Shows a success notice linking to a confirmed transaction
    fn tx_success(&self, message: &str, tx_hash: &str, chain: &str) {
        self.notify(Notice {
            level: NoticeLevel::Success,
            message: message.to_string(),
            tx_hash: Some(tx_hash.to_string()),
            chain: Some(chain.to_string()),
        });
    }
}

/// Notifier that forwards notices to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Success => tracing::info!(
                tx_hash = notice.tx_hash.as_deref(),
                chain = notice.chain.as_deref(),
                "{}",
                notice.message
            ),
            NoticeLevel::Warning => tracing::warn!("{}", notice.message),
            NoticeLevel::Error => tracing::error!("{}", notice.message),
        }
    }
}
