//! Unread notification watcher
//!
//! Diff-and-alert only: no ordering or delivery guarantees, a fetch that
//! fails is logged and the next tick tries again.

use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountChange {
    /// First observation
    Initial(u64),
    Increased { from: u64, to: u64 },
    Decreased { from: u64, to: u64 },
    Unchanged(u64),
}

impl CountChange {
    /// Whether the vendor should be alerted
    pub fn should_alert(&self) -> bool {
        matches!(self, Self::Increased { .. })
    }
}

#[derive(Debug, Default)]
pub struct UnreadWatcher {
    last: Option<u64>,
}

impl UnreadWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<u64> {
        self.last
    }

    pub fn observe(&mut self, count: u64) -> CountChange {
        let change = match self.last {
            None => CountChange::Initial(count),
            Some(prev) if count > prev => CountChange::Increased {
                from: prev,
                to: count,
            },
            Some(prev) if count < prev => CountChange::Decreased {
                from: prev,
                to: count,
            },
            Some(prev) => CountChange::Unchanged(prev),
        };
        self.last = Some(count);
        change
    }
}

/// Poll `fetch` every `period`, reporting each change
///
/// Runs forever when `max_polls` is `None`.
pub async fn poll<F, Fut, E, C>(
    period: Duration,
    max_polls: Option<usize>,
    mut fetch: F,
    mut on_change: C,
) where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<u64, E>>,
    E: std::fmt::Display,
    C: FnMut(CountChange),
{
    let mut watcher = UnreadWatcher::new();
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    let mut polls = 0usize;

    loop {
        if max_polls.is_some_and(|max| polls >= max) {
            break;
        }
        interval.tick().await;
        polls += 1;

        match fetch().await {
            Ok(count) => {
                let change = watcher.observe(count);
                debug!(?change, "unread count polled");
                on_change(change);
            }
            Err(e) => warn!(error = %e, "failed to fetch unread count"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observe_sequence() {
        let mut w = UnreadWatcher::new();
        assert_eq!(w.observe(2), CountChange::Initial(2));
        assert_eq!(w.observe(2), CountChange::Unchanged(2));
        assert_eq!(w.observe(5), CountChange::Increased { from: 2, to: 5 });
        assert_eq!(w.observe(1), CountChange::Decreased { from: 5, to: 1 });
        assert_eq!(w.last(), Some(1));
    }

    #[test]
    fn test_only_increase_alerts() {
        assert!(CountChange::Increased { from: 0, to: 1 }.should_alert());
        assert!(!CountChange::Initial(3).should_alert());
        assert!(!CountChange::Decreased { from: 3, to: 1 }.should_alert());
    }

    #[tokio::test]
    async fn test_poll_skips_failures_and_alerts_on_increase() {
        let mut responses = vec![Ok(1u64), Err("timeout"), Ok(1), Ok(3)].into_iter();
        let mut changes = vec![];

        poll(
            Duration::from_millis(1),
            Some(4),
            || {
                let next = responses.next().unwrap_or(Ok(0));
                async move { next }
            },
            |c| changes.push(c),
        )
        .await;

        assert_eq!(
            changes,
            vec![
                CountChange::Initial(1),
                CountChange::Unchanged(1),
                CountChange::Increased { from: 1, to: 3 },
            ]
        );
    }
}
