//! Fixed-window counter primitives.

/// Time window for rate limiting.
///
/// Windows are fixed (tumbling): every request whose timestamp floor-divides
/// to the same index shares one counter, and counts never roll over into the
/// next window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeWindow {
    /// Per-minute rate limiting
    Minute,
    /// Per-hour rate limiting
    Hour,
}

impl TimeWindow {
    /// Get the duration of this time window in milliseconds.
    pub fn duration_ms(&self) -> u64 {
        match self {
            TimeWindow::Minute => 60_000,
            TimeWindow::Hour => 3_600_000,
        }
    }

    /// Index of the window containing `now_ms`.
    pub fn index(&self, now_ms: u64) -> u64 {
        now_ms / self.duration_ms()
    }

    /// The next window boundary at or after `now_ms`.
    ///
    /// When `now_ms` sits exactly on a boundary, that instant is returned.
    pub fn next_boundary(&self, now_ms: u64) -> u64 {
        now_ms.div_ceil(self.duration_ms()) * self.duration_ms()
    }
}

/// Usage observed for one (client, window) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterEntry {
    /// Admitted requests in this window
    pub count: u64,
    /// Wall-clock timestamp of the window's first observed request.
    ///
    /// Used only by the pruning pass; the admission boundary is the window
    /// index, not this timestamp.
    pub window_start: u64,
}

impl CounterEntry {
    /// A fresh entry with no admitted requests.
    pub fn new(now_ms: u64) -> Self {
        Self {
            count: 0,
            window_start: now_ms,
        }
    }

    /// Whether this entry's window has fully elapsed as of `now_ms`.
    pub fn is_stale(&self, window: TimeWindow, now_ms: u64) -> bool {
        self.window_start < now_ms.saturating_sub(window.duration_ms())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_window_duration() {
        assert_eq!(TimeWindow::Minute.duration_ms(), 60_000);
        assert_eq!(TimeWindow::Hour.duration_ms(), 3_600_000);
    }

    #[test]
    fn test_window_index() {
        assert_eq!(TimeWindow::Minute.index(0), 0);
        assert_eq!(TimeWindow::Minute.index(59_999), 0);
        assert_eq!(TimeWindow::Minute.index(60_000), 1);
        assert_eq!(TimeWindow::Hour.index(3_599_999), 0);
        assert_eq!(TimeWindow::Hour.index(3_600_000), 1);
    }

    #[test]
    fn test_next_boundary() {
        assert_eq!(TimeWindow::Minute.next_boundary(1), 60_000);
        assert_eq!(TimeWindow::Minute.next_boundary(60_000), 60_000);
        assert_eq!(TimeWindow::Minute.next_boundary(60_001), 120_000);
        assert_eq!(TimeWindow::Hour.next_boundary(1), 3_600_000);
        assert_eq!(TimeWindow::Hour.next_boundary(3_600_000), 3_600_000);
    }

    #[test]
    fn test_entry_staleness() {
        let entry = CounterEntry::new(1_000);

        assert!(!entry.is_stale(TimeWindow::Minute, 1_000));
        assert!(!entry.is_stale(TimeWindow::Minute, 61_000));
        assert!(entry.is_stale(TimeWindow::Minute, 61_001));
        assert!(!entry.is_stale(TimeWindow::Hour, 3_601_000));
        assert!(entry.is_stale(TimeWindow::Hour, 3_601_001));
    }
}
