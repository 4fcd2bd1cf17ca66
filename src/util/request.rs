//! Request tokens for discarding responses that arrive too late.

/// Identifies one outgoing request within a [`RequestTracker`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RequestToken(u64);

/// Tracks the single in-flight request a page cares about.
///
/// Starting a new request supersedes the previous one; `cancel` supersedes
/// without starting anything.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RequestTracker {
    issued: u64,
    current: Option<u64>,
}

impl RequestTracker {
    pub fn begin(&mut self) -> RequestToken {
        self.issued += 1;
        self.current = Some(self.issued);
        RequestToken(self.issued)
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        self.current == Some(token.0)
    }

    /// Clears the token if it is still current. Returns whether it was.
    pub fn finish(&mut self, token: RequestToken) -> bool {
        if self.is_current(token) {
            self.current = None;
            true
        } else {
            false
        }
    }

    pub fn cancel(&mut self) {
        self.current = None;
    }

    pub fn in_flight(&self) -> bool {
        self.current.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_request_supersedes_older() {
        let mut tracker = RequestTracker::default();
        let first = tracker.begin();
        let second = tracker.begin();

        assert!(!tracker.is_current(first));
        assert!(tracker.is_current(second));
        assert!(!tracker.finish(first));
        assert!(tracker.in_flight());
        assert!(tracker.finish(second));
        assert!(!tracker.in_flight());
    }

    #[test]
    fn cancel_invalidates_in_flight_token() {
        let mut tracker = RequestTracker::default();
        let token = tracker.begin();
        tracker.cancel();
        assert!(!tracker.is_current(token));
        assert!(!tracker.finish(token));
    }

    #[test]
    fn finished_token_is_no_longer_current() {
        let mut tracker = RequestTracker::default();
        let token = tracker.begin();
        assert!(tracker.finish(token));
        assert!(!tracker.is_current(token));
    }
}
