//! DRAM command scheduling engine.
//!
//! This crate implements the timing-relevant core of a DRAM memory controller:
//! 1. **Timing model:** Immutable per-technology memory specifications (`MemSpec`) that
//!    turn JEDEC-style cycle counts into command durations and data-bus windows.
//! 2. **Admission control:** Bounded request buffering per bank, per direction, or shared.
//! 3. **Scheduling:** Per-bank request queues with FR-FCFS (row-hit first) or plain FIFO
//!    selection.
//!
//! Time advancement, the bank protocol state machine, and payload allocation are owned by
//! the caller; this crate only answers *what* to service next and *how long* it takes.

/// Common types shared by every component (simulated time, address fields, errors).
pub mod common;
/// Controller and memory-specification configuration (JSON via serde).
pub mod config;
/// DRAM bus commands.
pub mod command;
/// Memory requests as seen by the scheduler.
pub mod request;
/// Read-only view of a bank's protocol state.
pub mod bank;
/// Memory technology timing models.
pub mod memspec;
/// Request schedulers and buffer admission control.
pub mod scheduler;

/// Bus command kinds a controller issues.
pub use crate::command::Command;
/// Root controller configuration; deserialize from the `mcconfig` JSON object.
pub use crate::config::ControllerConfig;
/// Timing model trait implemented by every supported technology.
pub use crate::memspec::MemSpec;
/// Request handle stored by the scheduler.
pub use crate::request::Request;
/// Scheduler trait; construct one with [`scheduler::build_scheduler`].
pub use crate::scheduler::Scheduler;
