//! Simulated Time Unit Tests.
//!
//! Verifies clock-period derivation and half-open interval semantics.

use memctl_core::common::{SimTime, TimeInterval};

fn ns(value: u64) -> SimTime {
    SimTime::from_ns(value)
}

// ══════════════════════════════════════════════════════════
// 1. SimTime
// ══════════════════════════════════════════════════════════

#[test]
fn clock_period_rounds_to_picoseconds() {
    assert_eq!(SimTime::from_clock_mhz(200.0), Some(SimTime::from_ps(5000)));
    assert_eq!(SimTime::from_clock_mhz(800.0), Some(SimTime::from_ps(1250)));
    assert_eq!(SimTime::from_clock_mhz(1000.0), Some(ns(1)));
}

#[test]
fn invalid_clock_has_no_period() {
    assert_eq!(SimTime::from_clock_mhz(0.0), None);
    assert_eq!(SimTime::from_clock_mhz(-100.0), None);
    assert_eq!(SimTime::from_clock_mhz(f64::NAN), None);
}

#[test]
fn cycles_scale_the_period() {
    assert_eq!(SimTime::from_ps(1250).cycles(11), SimTime::from_ps(13750));
    assert_eq!(ns(15) + ns(3), ns(18));
    assert_eq!(ns(3).saturating_sub(ns(5)), SimTime::ZERO);
}

#[test]
fn display_uses_nanoseconds() {
    assert_eq!(ns(15).to_string(), "15 ns");
    assert_eq!(SimTime::from_ps(1250).to_string(), "1.250 ns");
}

// ══════════════════════════════════════════════════════════
// 2. TimeInterval
// ══════════════════════════════════════════════════════════

#[test]
fn interval_is_half_open() {
    let interval = TimeInterval::new(ns(14), ns(18));
    assert!(interval.contains(ns(14)));
    assert!(interval.contains(ns(17)));
    assert!(!interval.contains(ns(18)));
    assert_eq!(interval.duration(), ns(4));
}

#[test]
fn adjacent_intervals_do_not_intersect() {
    let first = TimeInterval::new(ns(0), ns(4));
    let second = TimeInterval::new(ns(4), ns(8));
    assert!(!first.intersects(&second));
    assert!(first.intersects(&TimeInterval::new(ns(3), ns(5))));
}

#[test]
fn empty_interval_never_intersects() {
    let empty = TimeInterval::new(ns(5), ns(5));
    assert!(empty.is_empty());
    assert!(!empty.intersects(&TimeInterval::new(ns(0), ns(10))));
}

#[test]
fn offset_moves_both_ends() {
    let interval = TimeInterval::new(ns(14), ns(18)).offset_by(ns(100));
    assert_eq!(interval, TimeInterval::new(ns(114), ns(118)));
}
