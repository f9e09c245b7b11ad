//! Simulated time.
//!
//! All durations in the engine are integral picoseconds. This keeps clock periods of
//! common DRAM frequencies (e.g. 1.25 ns at 800 MHz) exact and makes every timing
//! computation deterministic.

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub};

/// Picoseconds per nanosecond.
const PS_PER_NS: u64 = 1_000;

/// Picoseconds per microsecond; a clock of `f` MHz has a period of `1e6 / f` ps.
const PS_PER_US: f64 = 1_000_000.0;

/// A duration (or a point relative to some origin) in simulated time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SimTime(pub u64);

impl SimTime {
    /// Zero duration.
    pub const ZERO: Self = Self(0);

    /// Creates a time from picoseconds.
    #[inline]
    pub const fn from_ps(ps: u64) -> Self {
        Self(ps)
    }

    /// Creates a time from whole nanoseconds.
    #[inline]
    pub const fn from_ns(ns: u64) -> Self {
        Self(ns * PS_PER_NS)
    }

    /// Returns the clock period of a clock running at `mhz`, rounded to the nearest
    /// picosecond.
    ///
    /// # Returns
    ///
    /// `None` if the frequency is not a positive finite number or the period would
    /// round to zero.
    pub fn from_clock_mhz(mhz: f64) -> Option<Self> {
        if !mhz.is_finite() || mhz <= 0.0 {
            return None;
        }
        let ps = (PS_PER_US / mhz).round();
        if ps < 1.0 {
            return None;
        }
        Some(Self(ps as u64))
    }

    /// Returns the raw picosecond count.
    #[inline]
    pub const fn as_ps(self) -> u64 {
        self.0
    }

    /// Returns the time in (fractional) nanoseconds.
    #[inline]
    pub fn as_ns(self) -> f64 {
        self.0 as f64 / PS_PER_NS as f64
    }

    /// Returns `self` repeated `cycles` times, saturating at the largest representable
    /// time; used to turn a clock period into a cycle-count duration.
    #[inline]
    pub const fn cycles(self, cycles: u64) -> Self {
        Self(self.0.saturating_mul(cycles))
    }

    /// Like [`SimTime::cycles`], but `None` if the product exceeds the picosecond range.
    #[inline]
    pub const fn checked_cycles(self, cycles: u64) -> Option<Self> {
        match self.0.checked_mul(cycles) {
            Some(ps) => Some(Self(ps)),
            None => None,
        }
    }

    /// Addition that is `None` on overflow.
    #[inline]
    pub const fn checked_add(self, rhs: Self) -> Option<Self> {
        match self.0.checked_add(rhs.0) {
            Some(ps) => Some(Self(ps)),
            None => None,
        }
    }

    /// Subtraction clamped at zero.
    #[inline]
    pub const fn saturating_sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl Add for SimTime {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for SimTime {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for SimTime {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Mul<u64> for SimTime {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: u64) -> Self {
        self.cycles(rhs)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % PS_PER_NS == 0 {
            write!(f, "{} ns", self.0 / PS_PER_NS)
        } else {
            write!(f, "{:.3} ns", self.as_ns())
        }
    }
}

/// Half-open interval `[start, end)` of simulated time.
///
/// Data-strobe windows are expressed relative to command issue; shift them with
/// [`TimeInterval::offset_by`] to compare windows of commands issued at different times.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TimeInterval {
    /// First instant inside the interval.
    pub start: SimTime,
    /// First instant after the interval.
    pub end: SimTime,
}

impl TimeInterval {
    /// Creates the interval `[start, end)`.
    ///
    /// An `end` before `start` is clamped to an empty interval at `start`.
    pub fn new(start: SimTime, end: SimTime) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    /// Length of the interval.
    #[inline]
    pub fn duration(&self) -> SimTime {
        self.end - self.start
    }

    /// Returns true if the interval contains no instant.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns true if `time` lies inside `[start, end)`.
    #[inline]
    pub fn contains(&self, time: SimTime) -> bool {
        self.start <= time && time < self.end
    }

    /// Returns true if both intervals share at least one instant.
    ///
    /// Back-to-back intervals (`a.end == b.start`) do not intersect, so two bursts may
    /// use the data bus seamlessly.
    pub fn intersects(&self, other: &Self) -> bool {
        !self.is_empty() && !other.is_empty() && self.start < other.end && other.start < self.end
    }

    /// Returns the interval moved later by `offset`.
    pub fn offset_by(&self, offset: SimTime) -> Self {
        Self {
            start: self.start + offset,
            end: self.end + offset,
        }
    }
}

impl fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}
