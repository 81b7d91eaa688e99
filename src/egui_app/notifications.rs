//! Transient notifications shown over the current screen.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// How long a short notification stays up
pub const SHORT: Duration = Duration::from_millis(2000);
/// How long a long notification stays up
pub const LONG: Duration = Duration::from_millis(3500);

const MAX_VISIBLE: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub id: u64,
    pub text: String,
    pub kind: ToastKind,
    shown_at: Instant,
    ttl: Duration,
}

impl Toast {
    pub fn is_expired(&self, now: Instant) -> bool {
        now.duration_since(self.shown_at) >= self.ttl
    }
}

#[derive(Debug, Default)]
pub struct Notifications {
    toasts: VecDeque<Toast>,
    next_id: u64,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.push(text.into(), ToastKind::Info, SHORT);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.push(text.into(), ToastKind::Error, LONG);
    }

    fn push(&mut self, text: String, kind: ToastKind, ttl: Duration) {
        self.next_id += 1;
        self.toasts.push_back(Toast {
            id: self.next_id,
            text,
            kind,
            shown_at: Instant::now(),
            ttl,
        });
        while self.toasts.len() > MAX_VISIBLE {
            self.toasts.pop_front();
        }
    }

    pub fn dismiss(&mut self, id: u64) {
        self.toasts.retain(|toast| toast.id != id);
    }

    /// Drop expired toasts
    pub fn prune(&mut self, now: Instant) {
        self.toasts.retain(|toast| !toast.is_expired(now));
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    /// Text of the most recent toast
    pub fn latest(&self) -> Option<&str> {
        self.toasts.back().map(|toast| toast.text.as_str())
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_latest() {
        let mut notes = Notifications::new();
        notes.info("Saved");
        notes.error("Load failed: offline");
        assert_eq!(notes.len(), 2);
        assert_eq!(notes.latest(), Some("Load failed: offline"));
    }

    #[test]
    fn test_prune_expired() {
        let mut notes = Notifications::new();
        notes.info("short");
        notes.error("long");
        notes.prune(Instant::now() + SHORT + Duration::from_millis(1));
        assert_eq!(notes.len(), 1);
        assert_eq!(notes.latest(), Some("long"));
        notes.prune(Instant::now() + LONG + Duration::from_millis(1));
        assert!(notes.is_empty());
    }

    #[test]
    fn test_dismiss() {
        let mut notes = Notifications::new();
        notes.info("a");
        let id = notes.iter().next().unwrap().id;
        notes.dismiss(id);
        assert!(notes.is_empty());
    }

    #[test]
    fn test_visible_cap() {
        let mut notes = Notifications::new();
        for i in 0..10 {
            notes.info(format!("n{i}"));
        }
        assert_eq!(notes.len(), MAX_VISIBLE);
        assert_eq!(notes.iter().next().unwrap().text, "n6");
    }
}
