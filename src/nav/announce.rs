use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::schedule::Deferred;

/// Transient status messages for assistive technology.
///
/// Each message lives for a fixed time and is rendered in the footer
/// status line. Announcing never touches focus.
#[derive(Clone, Debug)]
pub struct Announcer {
    enabled: bool,
    lifetime: Duration,
    // Deferred removal: each entry is dropped once its deadline passes.
    live: VecDeque<Deferred<String>>,
}

impl Announcer {
    pub fn new(enabled: bool, lifetime: Duration) -> Self {
        Self {
            enabled,
            lifetime,
            live: VecDeque::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn announce(&mut self, message: impl Into<String>, now: Instant) {
        if !self.enabled {
            return;
        }
        self.live
            .push_back(Deferred::new(message.into(), self.lifetime, now));
    }

    pub fn prune(&mut self, now: Instant) {
        self.live.retain(|d| !d.is_due(now));
    }

    /// Most recent message still live.
    pub fn current(&self) -> Option<&str> {
        self.live.back().map(|d| d.value().as_str())
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn clear(&mut self) {
        self.live.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_expire_after_lifetime() {
        let start = Instant::now();
        let mut announcer = Announcer::new(true, Duration::from_secs(1));
        announcer.announce("Portfolio, option 1 of 7", start);
        announcer.announce("History, option 2 of 7", start + Duration::from_millis(400));
        assert_eq!(announcer.current(), Some("History, option 2 of 7"));
        assert_eq!(announcer.len(), 2);

        announcer.prune(start + Duration::from_millis(1000));
        assert_eq!(announcer.len(), 1);
        assert_eq!(announcer.current(), Some("History, option 2 of 7"));

        announcer.prune(start + Duration::from_millis(1400));
        assert!(announcer.is_empty());
        assert_eq!(announcer.current(), None);
    }

    #[test]
    fn disabled_announcer_stays_empty() {
        let mut announcer = Announcer::new(false, Duration::from_secs(1));
        announcer.announce("ignored", Instant::now());
        assert!(announcer.is_empty());
    }
}
