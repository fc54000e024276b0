//! Manually driven clock for deterministic timestamps.

use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;
use std::sync::{Arc, PoisonError, RwLock};

/// Clock that reports a settable instant.
///
/// Clones share the same instant, so a test can keep a handle while the
/// service under test owns another.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<RwLock<DateTime<Utc>>>,
}

impl ManualClock {
    /// Creates a clock frozen at `now`.
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(RwLock::new(now)),
        }
    }

    /// Moves the clock to `now`.
    pub fn set(&self, now: DateTime<Utc>) {
        let mut guard = self.now.write().unwrap_or_else(PoisonError::into_inner);
        *guard = now;
    }

    /// Moves the clock forward by `delta`.
    pub fn advance(&self, delta: TimeDelta) {
        let mut guard = self.now.write().unwrap_or_else(PoisonError::into_inner);
        *guard += delta;
    }

    fn current(&self) -> DateTime<Utc> {
        *self.now.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Clock for ManualClock {
    fn local(&self) -> DateTime<Local> {
        self.current().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.current()
    }
}

#[cfg(test)]
mod tests {
    use super::ManualClock;
    use chrono::{DateTime, TimeDelta, TimeZone, Utc};
    use mockable::Clock;
    use rstest::{fixture, rstest};
    use std::thread;

    #[fixture]
    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 5, 9, 0, 0)
            .single()
            .unwrap_or_default()
    }

    fn poisoned_clock(start: DateTime<Utc>) -> ManualClock {
        let clock = ManualClock::new(start);
        let holder = clock.clone();
        let outcome = thread::spawn(move || {
            let _guard = holder.now.write();
            panic!("clock holder failed");
        })
        .join();
        assert!(outcome.is_err());
        assert!(clock.now.is_poisoned());
        clock
    }

    #[rstest]
    fn advance_recovers_a_poisoned_clock(start: DateTime<Utc>) {
        let clock = poisoned_clock(start);

        clock.advance(TimeDelta::hours(2));

        assert_eq!(clock.utc(), start + TimeDelta::hours(2));
    }

    #[rstest]
    fn set_recovers_a_poisoned_clock(start: DateTime<Utc>) {
        let clock = poisoned_clock(start);
        let later = start + TimeDelta::days(3);

        clock.set(later);

        assert_eq!(clock.utc(), later);
    }
}
