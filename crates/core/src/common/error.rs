//! Error definitions for the timing model and the schedulers.
//!
//! Both enums describe local, synchronous contract violations. They are never retried:
//! the caller is expected to stop the simulation with the diagnostic, which always
//! names the bank, request, counter, or command involved.

use thiserror::Error;

use super::addr::Bank;
use crate::command::Command;
use crate::config::MemoryType;
use crate::request::RequestId;
use crate::scheduler::buffer::BufferClass;

/// Errors raised while building or querying a memory specification.
#[derive(Debug, Error)]
pub enum MemSpecError {
    /// The memspec document is not valid JSON or does not match the expected layout.
    #[error("failed to parse memspec: {0}")]
    Json(#[from] serde_json::Error),

    /// A timing parameter the technology requires is absent from `memtimingspec`.
    #[error("memtimingspec is missing `{0}`")]
    MissingTiming(String),

    /// A power parameter is absent from a non-empty `mempowerspec`.
    #[error("mempowerspec is missing `{0}`")]
    MissingPower(String),

    /// A parameter is present but violates a structural constraint.
    #[error("invalid memspec parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Parameter name as it appears in the JSON document.
        name: &'static str,
        /// Human-readable constraint that was violated.
        reason: String,
    },

    /// The technology is recognized but has no timing model in this crate.
    #[error("memory technology {0} is not supported")]
    UnsupportedTechnology(MemoryType),

    /// The technology does not define the requested quantity for this command.
    #[error("{technology} does not define {what} for command {command}")]
    UnsupportedCommand {
        /// Command that was queried.
        command: Command,
        /// Technology of the queried memspec.
        technology: MemoryType,
        /// Quantity that was requested ("an execution time" or "a data strobe interval").
        what: &'static str,
    },
}

/// Internal-consistency faults detected by a scheduler or its buffer counter.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SchedulerError {
    /// A request was stored although its buffer class is at capacity.
    #[error("request {id} rejected: {class} buffer holds {depth} of {capacity} requests")]
    BufferFull {
        /// Rejected request.
        id: RequestId,
        /// Counter that is full.
        class: BufferClass,
        /// Current occupancy of that counter.
        depth: usize,
        /// Configured capacity.
        capacity: usize,
    },

    /// A removal named a request that is not queued under its target bank.
    #[error("request {id} is not queued under bank {bank}")]
    NotQueued {
        /// Request passed to the removal.
        id: RequestId,
        /// Bank queue that was searched.
        bank: Bank,
    },

    /// A request with the same id is already queued.
    #[error("request {id} is already queued under bank {bank}")]
    AlreadyQueued {
        /// Duplicate request id.
        id: RequestId,
        /// Bank queue that holds it.
        bank: Bank,
    },

    /// A removal would drive a buffer counter below zero.
    #[error("{class} buffer counter underflow while removing request {id}")]
    CounterUnderflow {
        /// Request being removed.
        id: RequestId,
        /// Counter that is already empty.
        class: BufferClass,
    },

    /// The request targets a bank the channel does not have.
    #[error("request {id} targets bank {bank}, but the channel has {banks} banks")]
    BankOutOfRange {
        /// Offending request.
        id: RequestId,
        /// Requested bank.
        bank: Bank,
        /// Number of banks per channel.
        banks: usize,
    },
}
