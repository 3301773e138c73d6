use std::cell::Cell;

/// Token handed out for each schedule request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

/// Issues monotonically increasing tokens so a response that resolves after
/// a newer request can be recognized and dropped.
#[derive(Debug, Default)]
pub struct RequestTracker {
    latest: Cell<u64>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> RequestToken {
        let next = self.latest.get() + 1;
        self.latest.set(next);
        RequestToken(next)
    }

    /// Make every outstanding token stale without starting a request
    pub fn invalidate(&self) {
        self.latest.set(self.latest.get() + 1);
    }

    pub fn is_latest(&self, token: RequestToken) -> bool {
        token.0 == self.latest.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_latest_token_is_current() {
        let tracker = RequestTracker::new();
        let first = tracker.issue();
        let second = tracker.issue();
        assert!(first < second);
        assert!(!tracker.is_latest(first));
        assert!(tracker.is_latest(second));

        tracker.invalidate();
        assert!(!tracker.is_latest(second));
    }
}
