use std::cell::Cell;

use chrono::{DateTime, FixedOffset, SubsecRound, TimeDelta, Utc};

/// Source of "now" for the tracker. Lets tests drive time by hand.
pub trait Clock {
    /// Current instant in the reference timezone, whole seconds.
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Wall clock pinned to a fixed UTC offset.
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.offset).trunc_subsecs(0)
    }
}

/// Clock that only moves when told to.
pub struct ManualClock {
    now: Cell<DateTime<FixedOffset>>,
}

impl ManualClock {
    pub fn new(start: DateTime<FixedOffset>) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    pub fn set(&self, now: DateTime<FixedOffset>) {
        self.now.set(now);
    }

    pub fn advance(&self, by: TimeDelta) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<FixedOffset> {
        (**self).now()
    }
}
