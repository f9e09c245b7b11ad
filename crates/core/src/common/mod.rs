//! Common utilities and types used throughout the scheduling engine.
//!
//! This module provides the building blocks shared by the timing model and the
//! schedulers:
//! 1. **Simulated time:** Picosecond-resolution durations and half-open intervals.
//! 2. **Address fields:** Strong types for channel, rank, bank group, bank, row, and column.
//! 3. **Error handling:** Timing-model and scheduler error enums.

/// Decoded DRAM address fields.
pub mod addr;

/// Error types for the timing model and the schedulers.
pub mod error;

/// Simulated time and time intervals.
pub mod time;

pub use addr::{Bank, BankGroup, Channel, Column, DecodedAddress, Rank, Row};
pub use error::{MemSpecError, SchedulerError};
pub use time::{SimTime, TimeInterval};
