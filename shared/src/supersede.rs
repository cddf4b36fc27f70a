//! Latest-request-wins bookkeeping.
//!
//! Every request a view starts for one concern gets a [`CancelToken`].
//! Starting the next request cancels the previous token, and a response is
//! only applied while its token is still live. Each token has a process-wide
//! id so a transport can tie an abort handle to it.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_TOKEN: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone)]
pub struct CancelToken {
    id: u64,
    cancelled: Arc<AtomicBool>,
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

impl CancelToken {
    pub fn new() -> Self {
        Self {
            id: NEXT_TOKEN.fetch_add(1, Ordering::Relaxed),
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Hands `value` back only if this request is still the live one.
    pub fn settle<T>(&self, value: T) -> Option<T> {
        if self.is_cancelled() {
            tracing::debug!("discarding superseded response");
            None
        } else {
            Some(value)
        }
    }
}

/// At most one live token per concern.
#[derive(Debug, Default)]
pub struct LatestRequest {
    current: Option<CancelToken>,
}

impl LatestRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels whatever is in flight and returns the token for the new
    /// request, along with the token it replaced.
    pub fn begin(&mut self) -> (CancelToken, Option<CancelToken>) {
        let previous = self.cancel();
        let token = CancelToken::new();
        self.current = Some(token.clone());
        (token, previous)
    }

    /// Cancels the in-flight request, if any, and hands back its token.
    /// Used on unmount.
    pub fn cancel(&mut self) -> Option<CancelToken> {
        let token = self.current.take()?;
        token.cancel();
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_last_request_survives() {
        let mut latest = LatestRequest::new();
        let tokens: Vec<_> = (0..5).map(|_| latest.begin().0).collect();

        let applied: Vec<usize> = tokens
            .iter()
            .enumerate()
            .rev()
            .filter_map(|(i, t)| t.settle(i))
            .collect();

        assert_eq!(applied, vec![4]);
    }

    #[test]
    fn responses_arriving_out_of_order_are_dropped() {
        let mut latest = LatestRequest::new();
        let (slow, _) = latest.begin();
        let (fast, _) = latest.begin();

        let mut shown = None;
        if let Some(cars) = fast.settle("fresh") {
            shown = Some(cars);
        }
        if let Some(cars) = slow.settle("stale") {
            shown = Some(cars);
        }
        assert_eq!(shown, Some("fresh"));
    }

    #[test]
    fn cancel_on_unmount_drops_pending_response() {
        let mut latest = LatestRequest::new();
        let (token, _) = latest.begin();
        let cancelled = latest.cancel();
        assert!(token.is_cancelled());
        assert_eq!(token.settle(1), None);
        assert_eq!(cancelled.map(|t| t.id()), Some(token.id()));
        assert!(latest.cancel().is_none());
    }

    #[test]
    fn begin_reports_the_token_it_replaced() {
        let mut latest = LatestRequest::new();
        let (first, none) = latest.begin();
        assert!(none.is_none());

        let (second, replaced) = latest.begin();
        assert_eq!(replaced.map(|t| t.id()), Some(first.id()));
        assert_ne!(first.id(), second.id());
        assert!(!second.is_cancelled());
    }
}
