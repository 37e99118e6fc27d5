use jiff::Timestamp;
#[cfg(any(feature = "mock-time", test))]
use jiff::SignedDuration;
#[cfg(any(feature = "mock-time", test))]
use std::{cell::Cell, rc::Rc};

/// Clock used to stamp and age cached responses.
#[derive(Clone, Default)]
pub struct TimeSource {
    #[cfg(any(feature = "mock-time", test))]
    time: Option<Rc<Cell<Timestamp>>>,
}

impl TimeSource {
    /// A source that follows the system clock.
    pub fn new() -> Self {
        Self::default()
    }

    /// A source frozen at `initial_time` until moved with `advance` or `set`.
    #[cfg(any(feature = "mock-time", test))]
    pub fn mocked(initial_time: Timestamp) -> Self {
        Self {
            time: Some(Rc::new(Cell::new(initial_time))),
        }
    }

    pub fn now(&self) -> Timestamp {
        #[cfg(any(feature = "mock-time", test))]
        if let Some(time) = &self.time {
            return time.get();
        }
        Timestamp::now()
    }

    /// Has no effect on a system clock source.
    #[cfg(any(feature = "mock-time", test))]
    pub fn advance(&self, duration: SignedDuration) {
        if let Some(time) = &self.time {
            time.set(time.get() + duration);
        }
    }

    #[cfg(any(feature = "mock-time", test))]
    pub fn set(&self, now: Timestamp) {
        if let Some(time) = &self.time {
            time.set(now);
        }
    }
}
