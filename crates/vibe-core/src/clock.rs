//! Injectable time source.
//!
//! Feed computations compare against "now" (day buckets, flashbacks), so the
//! current instant is passed in rather than read ambiently. The trait exists
//! for the service boundary; tests pin time with [`FixedClock`].

use chrono::{DateTime, Utc};

/// A source of the current instant.
pub trait Clock: Send + Sync {
  fn now(&self) -> DateTime<Utc>;
}

/// The real wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> DateTime<Utc> { Utc::now() }
}

/// A clock frozen at a fixed instant — for deterministic tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
  fn now(&self) -> DateTime<Utc> { self.0 }
}
