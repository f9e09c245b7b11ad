//! Memory requests as seen by the scheduler.
//!
//! The payload (data, byte enables, response path) belongs to the initiator. The
//! scheduler only needs a small `Copy` handle: a unique id for removal, the decoded
//! target, and the transfer direction.

use std::fmt;

use crate::common::{Bank, DecodedAddress, Row};

/// Unique identity of an in-flight request.
///
/// Two requests with equal addresses are still different requests; queues compare ids,
/// never contents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Transfer direction of a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Data flows from DRAM to the initiator.
    Read,
    /// Data flows from the initiator to DRAM.
    Write,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => f.write_str("read"),
            Self::Write => f.write_str("write"),
        }
    }
}

/// Handle of a request buffered by a scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Request {
    /// Identity used for removal.
    pub id: RequestId,
    /// Decoded DRAM target.
    pub address: DecodedAddress,
    /// Read or write.
    pub direction: Direction,
}

impl Request {
    /// Creates a request handle.
    pub const fn new(id: RequestId, address: DecodedAddress, direction: Direction) -> Self {
        Self {
            id,
            address,
            direction,
        }
    }

    /// Target bank.
    #[inline]
    pub const fn bank(&self) -> Bank {
        self.address.bank
    }

    /// Target row.
    #[inline]
    pub const fn row(&self) -> Row {
        self.address.row
    }

    /// Returns true for reads.
    #[inline]
    pub const fn is_read(&self) -> bool {
        matches!(self.direction, Direction::Read)
    }

    /// Returns true for writes.
    #[inline]
    pub const fn is_write(&self) -> bool {
        matches!(self.direction, Direction::Write)
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.id, self.direction, self.address)
    }
}
