//! Time source for server-assigned timestamps.

use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};

use crate::paper::Timestamp;

/// Supplies the current time to a paper store.
pub trait Clock: Send + Sync {
  fn now(&self) -> Timestamp;
}

/// Wall-clock time from the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> Timestamp { Timestamp::now() }
}

/// A clock that only moves when told to. Useful for deterministic tests.
#[derive(Debug)]
pub struct ManualClock {
  current: Mutex<DateTime<Utc>>,
}

impl ManualClock {
  pub fn new(start: DateTime<Utc>) -> Self {
    Self {
      current: Mutex::new(start),
    }
  }

  /// Move the clock to `at`. Going backwards is allowed.
  pub fn set(&self, at: DateTime<Utc>) {
    *self.current.lock().unwrap_or_else(|p| p.into_inner()) = at;
  }

  pub fn advance(&self, by: Duration) {
    let mut current = self.current.lock().unwrap_or_else(|p| p.into_inner());
    *current += by;
  }
}

impl Clock for ManualClock {
  fn now(&self) -> Timestamp {
    Timestamp::from(*self.current.lock().unwrap_or_else(|p| p.into_inner()))
  }
}
