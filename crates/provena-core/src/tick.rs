//! # Logical Clock
//!
//! The ledger does not read wall-clock time of its own accord. Every
//! `*_at` field and every expiry comparison uses a `Tick`: a value drawn
//! from a strictly increasing counter supplied by the hosting platform.
//!
//! The counter is injected through the [`Clock`] trait so that operations
//! stay deterministic: [`WallClock`] adapts the system clock for real
//! deployments, [`ManualClock`] gives tests and replay tooling full
//! control of time.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};

// ─── Tick ────────────────────────────────────────────────────────────

/// A single value of the monotonically increasing counter.
///
/// Ticks are opaque instants: the ledger only ever compares them and
/// stores them. Expiry checks are strict (`expires_at > now`), so equal
/// ticks never count as "still in the future".
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Tick(pub u64);

impl Tick {
    /// The origin of the counter.
    pub const ZERO: Tick = Tick(0);

    /// The raw counter value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for Tick {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ─── Clock Trait ─────────────────────────────────────────────────────

/// Source of the current counter value.
///
/// Implementations must be monotonic: successive calls never return a
/// smaller tick.
pub trait Clock {
    /// The current counter value.
    fn now(&self) -> Tick;
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> Tick {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Tick {
        (**self).now()
    }
}

// ─── Wall Clock ──────────────────────────────────────────────────────

/// Counter backed by the system clock, at seconds granularity.
///
/// Unix epoch seconds satisfy the monotonicity contract for any host
/// whose clock does not step backwards; deployments that cannot assume
/// that should inject their own [`Clock`].
#[derive(Debug, Clone, Copy, Default)]
pub struct WallClock;

impl Clock for WallClock {
    fn now(&self) -> Tick {
        let secs = Utc::now().timestamp();
        Tick(u64::try_from(secs).unwrap_or(0))
    }
}

// ─── Manual Clock ────────────────────────────────────────────────────

/// Hand-driven counter for deterministic tests and replay.
///
/// The tick only moves when [`ManualClock::advance`] or
/// [`ManualClock::set`] is called. Shared ownership through an `Arc`
/// lets a test advance time while a ledger holds the same clock.
#[derive(Debug, Default)]
pub struct ManualClock {
    tick: AtomicU64,
}

impl ManualClock {
    /// A clock starting at the given tick.
    pub fn starting_at(tick: Tick) -> Self {
        Self {
            tick: AtomicU64::new(tick.0),
        }
    }

    /// Move the counter forward by `ticks`.
    pub fn advance(&self, ticks: u64) {
        self.tick.fetch_add(ticks, Ordering::SeqCst);
    }

    /// Jump the counter to an absolute value.
    ///
    /// Callers are responsible for never moving the clock backwards.
    pub fn set(&self, tick: Tick) {
        self.tick.store(tick.0, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Tick {
        Tick(self.tick.load(Ordering::SeqCst))
    }
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_ordering_is_strict() {
        assert!(Tick(1) < Tick(2));
        assert!(Tick(2) > Tick(1));
        assert_eq!(Tick(2), Tick(2));
    }

    #[test]
    fn test_manual_clock_starts_where_told() {
        let clock = ManualClock::starting_at(Tick(100));
        assert_eq!(clock.now(), Tick(100));
    }

    #[test]
    fn test_manual_clock_advance() {
        let clock = ManualClock::default();
        assert_eq!(clock.now(), Tick::ZERO);
        clock.advance(5);
        assert_eq!(clock.now(), Tick(5));
        clock.advance(2);
        assert_eq!(clock.now(), Tick(7));
    }

    #[test]
    fn test_manual_clock_set() {
        let clock = ManualClock::default();
        clock.set(Tick(42));
        assert_eq!(clock.now(), Tick(42));
    }

    #[test]
    fn test_clock_through_arc() {
        let clock = Arc::new(ManualClock::default());
        let shared: Arc<ManualClock> = Arc::clone(&clock);
        clock.advance(3);
        assert_eq!(shared.now(), Tick(3));
    }

    #[test]
    fn test_wall_clock_is_nonzero() {
        assert!(WallClock.now() > Tick::ZERO);
    }

    #[test]
    fn test_tick_serde_roundtrip() {
        let tick = Tick(1234);
        let json = serde_json::to_string(&tick).unwrap();
        assert_eq!(json, "1234");
        let parsed: Tick = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, tick);
    }
}
