//! Request schedulers.
//!
//! A scheduler buffers the requests of one channel and tells the controller which one a
//! bank should serve next. This module provides:
//! 1. **FrFcfsScheduler:** Row hits first, arrival order otherwise.
//! 2. **FifoScheduler:** Strict arrival order per bank.
//! 3. **Buffer admission control:** Bankwise, read/write, or shared request counters.
//!
//! Schedulers are single-threaded and synchronous; each channel owns its own instance.

/// Buffer admission control.
pub mod buffer;

/// Strict arrival-order scheduler.
pub mod fifo;

/// First-ready, first-come-first-served scheduler.
pub mod frfcfs;

/// Per-bank queues shared by both schedulers.
pub mod queue;

pub use buffer::{BufferClass, BufferCounter};
pub use fifo::FifoScheduler;
pub use frfcfs::FrFcfsScheduler;
pub use queue::BankQueues;

use std::fmt;

use tracing::info;

use crate::bank::BankMachine;
use crate::common::{Bank, Row, SchedulerError};
use crate::config::{ControllerConfig, SchedulerPolicy};
use crate::memspec::MemSpec;
use crate::request::Request;

/// Interface between a memory controller and its request scheduler.
///
/// Every [`store_request`](Scheduler::store_request) must be paired with exactly one
/// later [`remove_request`](Scheduler::remove_request) of the same request.
pub trait Scheduler: Send + fmt::Debug {
    /// Returns true if the buffer can take another request.
    ///
    /// Callers check this before accepting a request from the initiator.
    fn has_buffer_space(&self) -> bool;

    /// Returns true if the counter `request` would be charged to has room.
    fn has_space_for(&self, request: &Request) -> bool;

    /// Buffers `request` at the tail of its bank's queue.
    ///
    /// # Errors
    ///
    /// [`SchedulerError::BufferFull`] if admission control rejects the request,
    /// [`SchedulerError::AlreadyQueued`] for a duplicate id, or
    /// [`SchedulerError::BankOutOfRange`].
    fn store_request(&mut self, request: Request) -> Result<(), SchedulerError>;

    /// Removes a serviced request and frees its buffer slot.
    ///
    /// # Errors
    ///
    /// [`SchedulerError::NotQueued`] if the request is not buffered under its bank, or
    /// [`SchedulerError::BankOutOfRange`].
    fn remove_request(&mut self, request: &Request) -> Result<(), SchedulerError>;

    /// Request `bank` should serve next, or `None` if its queue is empty.
    fn next_request(&self, bank: &dyn BankMachine) -> Option<&Request>;

    /// Returns true if, besides the request being served, another queued request for
    /// `bank` targets `row`.
    fn has_further_row_hit(&self, bank: Bank, row: Row) -> bool;

    /// Returns true if `bank` holds at least two requests.
    fn has_further_request(&self, bank: Bank) -> bool;

    /// Occupancy of every admission counter.
    fn buffer_depth(&self) -> &[usize];
}

/// Builds the scheduler selected by `config` for one channel of `memspec`.
pub fn build_scheduler(config: &ControllerConfig, memspec: &dyn MemSpec) -> Box<dyn Scheduler> {
    let banks = memspec.number_of_banks();
    info!(
        scheduler = %config.scheduler,
        buffer = %config.scheduler_buffer,
        capacity = config.request_buffer_size,
        banks,
        "building scheduler"
    );

    match config.scheduler {
        SchedulerPolicy::Fifo => Box::new(FifoScheduler::new(
            banks,
            config.scheduler_buffer,
            config.request_buffer_size,
        )),
        SchedulerPolicy::FrFcfs => Box::new(FrFcfsScheduler::new(
            banks,
            config.scheduler_buffer,
            config.request_buffer_size,
        )),
    }
}
