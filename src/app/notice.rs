use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A transient user-facing message.
#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    shown_at: Instant,
}

/// Holds at most one live notice; a new one replaces the prior immediately.
/// `sweep` retires the current notice once its display time is up.
#[derive(Debug)]
pub struct NoticeBoard {
    current: Option<Notice>,
    ttl: Duration,
}

impl NoticeBoard {
    pub fn new(ttl: Duration) -> Self {
        Self { current: None, ttl }
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.show(NoticeKind::Success, text);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.show(NoticeKind::Error, text);
    }

    fn show(&mut self, kind: NoticeKind, text: impl Into<String>) {
        self.current = Some(Notice {
            kind,
            text: text.into(),
            shown_at: Instant::now(),
        });
    }

    /// Drops the current notice when it has been visible for the full TTL.
    pub fn sweep(&mut self, now: Instant) {
        if let Some(notice) = &self.current
            && now.duration_since(notice.shown_at) >= self.ttl
        {
            self.current = None;
        }
    }

    pub fn current(&self) -> Option<&Notice> {
        self.current.as_ref()
    }
}
