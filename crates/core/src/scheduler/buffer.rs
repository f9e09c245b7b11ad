//! Buffer admission control.
//!
//! A [`BufferCounter`] bounds how many requests a scheduler may hold. The granularity is
//! chosen at configuration time:
//!
//! - **Bankwise:** one counter per bank, so a hot bank cannot starve the others.
//! - **ReadWrite:** one counter per direction, so writes cannot starve reads.
//! - **Shared:** one counter for the whole buffer.
//!
//! Every counter is bounded by the same configured capacity. Counters move only
//! through [`BufferCounter::store_request`] and [`BufferCounter::remove_request`], which
//! refuse to overflow or underflow instead of corrupting the occupancy.

use std::fmt;

use crate::common::{Bank, SchedulerError};
use crate::config::SchedulerBuffer;
use crate::request::{Direction, Request};

/// Slot in `depth` that counts reads under the read/write policy.
const READ_SLOT: usize = 0;
/// Slot in `depth` that counts writes under the read/write policy.
const WRITE_SLOT: usize = 1;

/// Identifies the counter a request is accounted against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BufferClass {
    /// Counter of one bank.
    Bank(Bank),
    /// Read counter.
    Read,
    /// Write counter.
    Write,
    /// The single shared counter.
    Shared,
}

impl fmt::Display for BufferClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bank(bank) => write!(f, "bank {bank}"),
            Self::Read => f.write_str("read"),
            Self::Write => f.write_str("write"),
            Self::Shared => f.write_str("shared"),
        }
    }
}

/// Occupancy counters of a request buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BufferCounter {
    /// One counter per bank.
    Bankwise {
        /// Capacity of each counter.
        capacity: usize,
        /// Requests held per bank.
        depth: Vec<usize>,
        /// Bank of the most recently stored request.
        last_bank: usize,
    },
    /// Separate read and write counters, in that order.
    ReadWrite {
        /// Capacity of each counter.
        capacity: usize,
        /// `[reads, writes]`.
        depth: Vec<usize>,
    },
    /// One counter for everything.
    Shared {
        /// Capacity of the counter.
        capacity: usize,
        /// `[requests]`.
        depth: Vec<usize>,
    },
}

impl BufferCounter {
    /// Creates empty counters for `policy`.
    ///
    /// # Arguments
    ///
    /// * `policy` - Counting granularity.
    /// * `capacity` - Bound of every counter.
    /// * `number_of_banks` - Banks per channel (only used by the bankwise policy).
    pub fn new(policy: SchedulerBuffer, capacity: usize, number_of_banks: usize) -> Self {
        match policy {
            SchedulerBuffer::Bankwise => Self::Bankwise {
                capacity,
                depth: vec![0; number_of_banks],
                last_bank: 0,
            },
            SchedulerBuffer::ReadWrite => Self::ReadWrite {
                capacity,
                depth: vec![0; 2],
            },
            SchedulerBuffer::Shared => Self::Shared {
                capacity,
                depth: vec![0; 1],
            },
        }
    }

    /// Counting granularity.
    pub const fn policy(&self) -> SchedulerBuffer {
        match self {
            Self::Bankwise { .. } => SchedulerBuffer::Bankwise,
            Self::ReadWrite { .. } => SchedulerBuffer::ReadWrite,
            Self::Shared { .. } => SchedulerBuffer::Shared,
        }
    }

    /// Bound of every counter.
    pub const fn capacity(&self) -> usize {
        match self {
            Self::Bankwise { capacity, .. }
            | Self::ReadWrite { capacity, .. }
            | Self::Shared { capacity, .. } => *capacity,
        }
    }

    /// Occupancy per counter: per bank, `[reads, writes]`, or `[requests]`.
    pub fn buffer_depth(&self) -> &[usize] {
        match self {
            Self::Bankwise { depth, .. } | Self::ReadWrite { depth, .. } | Self::Shared { depth, .. } => {
                depth
            }
        }
    }

    /// Returns true if the buffer can take another request without knowing its target.
    ///
    /// Bankwise: the bank that received the last request still has room. ReadWrite:
    /// both directions have room. Shared: the shared counter has room.
    pub fn has_buffer_space(&self) -> bool {
        match self {
            Self::Bankwise {
                capacity,
                depth,
                last_bank,
            } => depth.get(*last_bank).is_none_or(|&d| d < *capacity),
            Self::ReadWrite { capacity, depth } | Self::Shared { capacity, depth } => {
                depth.iter().all(|&d| d < *capacity)
            }
        }
    }

    /// Returns true if the counter `request` is accounted against has room.
    pub fn has_space_for(&self, request: &Request) -> bool {
        let capacity = self.capacity();
        self.slot(request)
            .and_then(|slot| self.buffer_depth().get(slot))
            .is_some_and(|&d| d < capacity)
    }

    /// Counter `request` is accounted against.
    pub const fn class_of(&self, request: &Request) -> BufferClass {
        match self {
            Self::Bankwise { .. } => BufferClass::Bank(request.bank()),
            Self::ReadWrite { .. } => match request.direction {
                Direction::Read => BufferClass::Read,
                Direction::Write => BufferClass::Write,
            },
            Self::Shared { .. } => BufferClass::Shared,
        }
    }

    /// Accounts a newly buffered request.
    ///
    /// # Errors
    ///
    /// [`SchedulerError::BufferFull`] if the request's counter is at capacity (state is
    /// left untouched); [`SchedulerError::BankOutOfRange`] if a bankwise counter does
    /// not exist for the request's bank.
    pub fn store_request(&mut self, request: &Request) -> Result<(), SchedulerError> {
        let class = self.class_of(request);
        let capacity = self.capacity();
        let slot = self.checked_slot(request)?;
        let depth = self.depth_mut(slot);
        if *depth >= capacity {
            return Err(SchedulerError::BufferFull {
                id: request.id,
                class,
                depth: *depth,
                capacity,
            });
        }
        *depth += 1;

        if let Self::Bankwise { last_bank, .. } = self {
            *last_bank = slot;
        }
        Ok(())
    }

    /// Releases the accounting of a buffered request.
    ///
    /// # Errors
    ///
    /// [`SchedulerError::CounterUnderflow`] if the request's counter is already zero;
    /// [`SchedulerError::BankOutOfRange`] if a bankwise counter does not exist for the
    /// request's bank.
    pub fn remove_request(&mut self, request: &Request) -> Result<(), SchedulerError> {
        let class = self.class_of(request);
        let slot = self.checked_slot(request)?;
        let depth = self.depth_mut(slot);
        if *depth == 0 {
            return Err(SchedulerError::CounterUnderflow { id: request.id, class });
        }
        *depth -= 1;
        Ok(())
    }

    fn slot(&self, request: &Request) -> Option<usize> {
        match self {
            Self::Bankwise { depth, .. } => {
                let bank = request.bank().index();
                (bank < depth.len()).then_some(bank)
            }
            Self::ReadWrite { .. } => Some(match request.direction {
                Direction::Read => READ_SLOT,
                Direction::Write => WRITE_SLOT,
            }),
            Self::Shared { .. } => Some(0),
        }
    }

    fn checked_slot(&self, request: &Request) -> Result<usize, SchedulerError> {
        self.slot(request).ok_or_else(|| SchedulerError::BankOutOfRange {
            id: request.id,
            bank: request.bank(),
            banks: self.buffer_depth().len(),
        })
    }

    fn depth_mut(&mut self, slot: usize) -> &mut usize {
        match self {
            Self::Bankwise { depth, .. } | Self::ReadWrite { depth, .. } | Self::Shared { depth, .. } => {
                &mut depth[slot]
            }
        }
    }
}
