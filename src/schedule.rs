use std::time::{Duration, Instant};

/// A value that becomes available at a fixed instant.
///
/// Owners keep it in an `Option` and poll it on every tick. Dropping the
/// handle (screen teardown) cancels it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deferred<T> {
    due: Instant,
    value: T,
}

impl<T> Deferred<T> {
    pub fn new(value: T, delay: Duration, now: Instant) -> Self {
        Self {
            due: now + delay,
            value,
        }
    }

    pub fn due(&self) -> Instant {
        self.due
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.due
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

/// Takes the value out of `slot` if it is due, leaving `None` behind.
pub fn take_due<T>(slot: &mut Option<Deferred<T>>, now: Instant) -> Option<T> {
    if slot.as_ref().is_some_and(|d| d.is_due(now)) {
        slot.take().map(Deferred::into_value)
    } else {
        None
    }
}
