//! Transient user-facing notices.
//!
//! An advisory queue of auto-dismissing messages, not an error channel of
//! record: entries are appended in call order, dismissed independently after
//! a fixed delay, and the oldest are dropped under pressure.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// How long a notice stays visible.
pub const DISMISS_AFTER: Duration = Duration::from_millis(4_500);

/// Bounded queue length; beyond this the oldest entries are dropped.
const MAX_NOTICES: usize = 100;

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Success,
    Danger,
}

/// A single queued notice.
#[derive(Debug, Clone)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    created: Instant,
}

impl Notice {
    /// Whether the display window has elapsed.
    pub fn is_expired(&self) -> bool {
        self.created.elapsed() >= DISMISS_AFTER
    }
}

/// Shared handle to the notice queue. Cloning shares the same queue.
#[derive(Clone, Default)]
pub struct Notifier {
    inner: Arc<RwLock<VecDeque<Notice>>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a notice. Never blocks other entries; silently drops the
    /// oldest entry once the queue is full.
    pub fn notify(&self, message: impl Into<String>, level: NoticeLevel) {
        let mut queue = self.inner.write();
        queue.push_back(Notice {
            level,
            message: message.into(),
            created: Instant::now(),
        });
        while queue.len() > MAX_NOTICES {
            queue.pop_front();
        }
    }

    /// Notices still within their display window, in call order.
    pub fn active(&self) -> Vec<Notice> {
        self.prune();
        self.inner.read().iter().cloned().collect()
    }

    /// Drop expired entries; returns how many were removed.
    pub fn prune(&self) -> usize {
        let mut queue = self.inner.write();
        let before = queue.len();
        // Entries are in insertion order, so expiry is monotone from the front.
        while queue.front().is_some_and(Notice::is_expired) {
            queue.pop_front();
        }
        before - queue.len()
    }

    /// Messages of all currently queued notices, expired or not.
    pub fn messages(&self) -> Vec<String> {
        self.inner.read().iter().map(|n| n.message.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    #[cfg(test)]
    fn age_all(&self, by: Duration) {
        let mut queue = self.inner.write();
        for notice in queue.iter_mut() {
            if let Some(created) = notice.created.checked_sub(by) {
                notice.created = created;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notices_keep_call_order() {
        let notifier = Notifier::new();
        notifier.notify("first", NoticeLevel::Info);
        notifier.notify("second", NoticeLevel::Danger);
        let active = notifier.active();
        assert_eq!(active.len(), 2);
        assert_eq!(active[0].message, "first");
        assert_eq!(active[1].message, "second");
        assert_eq!(active[1].level, NoticeLevel::Danger);
    }

    #[test]
    fn queue_is_bounded() {
        let notifier = Notifier::new();
        for i in 0..150 {
            notifier.notify(format!("notice {i}"), NoticeLevel::Info);
        }
        assert_eq!(notifier.len(), 100);
        assert_eq!(notifier.messages()[0], "notice 50");
    }

    #[test]
    fn expired_notices_are_pruned() {
        let notifier = Notifier::new();
        notifier.notify("old", NoticeLevel::Success);
        notifier.age_all(DISMISS_AFTER + Duration::from_millis(1));
        notifier.notify("fresh", NoticeLevel::Info);

        let active = notifier.active();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].message, "fresh");
    }
}
