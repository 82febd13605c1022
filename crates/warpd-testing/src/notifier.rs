//! Notifier that records notices

use parking_lot::Mutex;
use warpd_traits::{Notice, NoticeLevel, Notifier};

/// Collects every notice for assertions
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    /// Empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// All notices, in order
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().clone()
    }

    /// Messages at `level`, in order
    pub fn messages(&self, level: NoticeLevel) -> Vec<String> {
        self.notices
            .lock()
            .iter()
            .filter(|n| n.level == level)
            .map(|n| n.message.clone())
            .collect()
    }

    /// Error messages, in order
    pub fn errors(&self) -> Vec<String> {
        self.messages(NoticeLevel::Error)
    }

    /// Warning messages, in order
    pub fn warnings(&self) -> Vec<String> {
        self.messages(NoticeLevel::Warning)
    }

    /// Success messages, in order
    pub fn successes(&self) -> Vec<String> {
        self.messages(NoticeLevel::Success)
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().push(notice);
    }
}
