//! Last-write-wins bookkeeping for repeated scans.
//!
//! A re-triggered scan does not cancel the one already in flight, so results
//! can arrive out of order. Each scan takes a [`ScanTicket`] when it starts;
//! a completion is recorded unless a newer scan has already recorded its own.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use guardify_core::ScoreResult;

/// Generation number of one scan. Later scans compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScanTicket(u64);

impl ScanTicket {
    #[must_use]
    pub fn generation(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct ScanSession {
    issued: AtomicU64,
    latest: Mutex<Option<(ScanTicket, ScoreResult)>>,
}

impl ScanSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a scan and returns its ticket.
    pub fn begin(&self) -> ScanTicket {
        ScanTicket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Records `result` for `ticket`.
    ///
    /// Returns `false` and drops the result when a newer scan has already
    /// completed.
    pub fn complete(&self, ticket: ScanTicket, result: ScoreResult) -> bool {
        let mut latest = self.latest.lock().unwrap_or_else(PoisonError::into_inner);
        if latest.as_ref().is_some_and(|(current, _)| *current > ticket) {
            tracing::debug!(
                stale = ticket.generation(),
                "discarding result from superseded scan"
            );
            return false;
        }
        *latest = Some((ticket, result));
        true
    }

    /// The most recent recorded result, if any scan has completed.
    #[must_use]
    pub fn latest(&self) -> Option<ScoreResult> {
        self.latest
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|(_, result)| result.clone())
    }
}

#[cfg(test)]
mod tests {
    use guardify_core::{Risk, ScoreSource};

    use super::*;

    fn result(score: u8) -> ScoreResult {
        ScoreResult {
            score,
            risk: Risk::from_score(score),
            flags: vec![],
            source: ScoreSource::Heuristic,
        }
    }

    #[test]
    fn empty_session_has_no_result() {
        assert!(ScanSession::new().latest().is_none());
    }

    #[test]
    fn tickets_increase() {
        let session = ScanSession::new();
        let first = session.begin();
        let second = session.begin();
        assert!(second > first);
        assert_eq!(first.generation(), 1);
        assert_eq!(second.generation(), 2);
    }

    #[test]
    fn in_order_completions_overwrite() {
        let session = ScanSession::new();
        let first = session.begin();
        assert!(session.complete(first, result(10)));
        let second = session.begin();
        assert!(session.complete(second, result(60)));
        assert_eq!(session.latest(), Some(result(60)));
    }

    #[test]
    fn stale_completion_is_discarded() {
        let session = ScanSession::new();
        let older = session.begin();
        let newer = session.begin();

        assert!(session.complete(newer, result(30)));
        assert!(!session.complete(older, result(90)));
        assert_eq!(session.latest(), Some(result(30)));
    }

    #[test]
    fn older_scan_shows_until_newer_finishes() {
        let session = ScanSession::new();
        let older = session.begin();
        let newer = session.begin();

        assert!(session.complete(older, result(90)));
        assert_eq!(session.latest(), Some(result(90)));
        assert!(session.complete(newer, result(30)));
        assert_eq!(session.latest(), Some(result(30)));
    }
}
