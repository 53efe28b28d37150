use std::{
    collections::VecDeque,
    time::{Duration, Instant},
};

pub const NOTICE_TTL: Duration = Duration::from_secs(4);
const MAX_NOTICES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub raised_at: Instant,
}

/// Short-lived messages shown over the UI, newest last.
#[derive(Debug, Clone)]
pub struct Notices {
    items: VecDeque<Notice>,
    ttl: Duration,
}

impl Default for Notices {
    fn default() -> Self {
        Self::new(NOTICE_TTL)
    }
}

impl Notices {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            items: VecDeque::new(),
            ttl,
        }
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(NoticeLevel::Success, message.into(), Instant::now());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(NoticeLevel::Error, message.into(), Instant::now());
    }

    pub fn push(&mut self, level: NoticeLevel, message: String, raised_at: Instant) {
        self.items.push_back(Notice {
            level,
            message,
            raised_at,
        });
        while self.items.len() > MAX_NOTICES {
            self.items.pop_front();
        }
    }

    /// Drops notices older than the TTL.
    pub fn prune(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.items
            .retain(|notice| now.saturating_duration_since(notice.raised_at) < ttl);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.items.iter()
    }

    #[must_use]
    pub fn latest(&self) -> Option<&Notice> {
        self.items.back()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notices_expire_after_ttl() {
        let start = Instant::now();
        let mut notices = Notices::new(Duration::from_secs(4));
        notices.push(NoticeLevel::Error, "first".to_string(), start);
        notices.push(
            NoticeLevel::Success,
            "second".to_string(),
            start + Duration::from_secs(3),
        );

        notices.prune(start + Duration::from_secs(5));
        assert_eq!(notices.len(), 1);
        assert_eq!(notices.latest().map(|n| n.message.as_str()), Some("second"));

        notices.prune(start + Duration::from_secs(8));
        assert!(notices.is_empty());
    }

    #[test]
    fn oldest_notice_is_dropped_when_full() {
        let mut notices = Notices::default();
        for idx in 0..5 {
            notices.error(format!("n{idx}"));
        }
        let messages: Vec<&str> = notices.iter().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, ["n2", "n3", "n4"]);
    }
}
