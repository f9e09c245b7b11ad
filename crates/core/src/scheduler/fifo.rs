//! Strict arrival-order scheduler.
//!
//! Each bank serves its oldest request regardless of the open row. Useful as a
//! baseline against FR-FCFS.

use super::{BankQueues, Scheduler};
use crate::bank::BankMachine;
use crate::common::{Bank, Row, SchedulerError};
use crate::config::SchedulerBuffer;
use crate::request::Request;

/// FIFO request scheduler for one channel.
#[derive(Debug, Clone)]
pub struct FifoScheduler {
    buffer: BankQueues,
}

impl FifoScheduler {
    /// Creates an empty scheduler.
    pub fn new(number_of_banks: usize, buffer_policy: SchedulerBuffer, request_buffer_size: usize) -> Self {
        Self {
            buffer: BankQueues::new(number_of_banks, buffer_policy, request_buffer_size),
        }
    }

    /// Buffered requests.
    pub const fn queues(&self) -> &BankQueues {
        &self.buffer
    }
}

impl Scheduler for FifoScheduler {
    fn has_buffer_space(&self) -> bool {
        self.buffer.buffer_counter().has_buffer_space()
    }

    fn has_space_for(&self, request: &Request) -> bool {
        self.buffer.buffer_counter().has_space_for(request)
    }

    fn store_request(&mut self, request: Request) -> Result<(), SchedulerError> {
        self.buffer.store(request)
    }

    fn remove_request(&mut self, request: &Request) -> Result<(), SchedulerError> {
        self.buffer.remove(request).map(|_| ())
    }

    fn next_request(&self, bank: &dyn BankMachine) -> Option<&Request> {
        self.buffer.queue(bank.bank())?.front()
    }

    /// Only the second-oldest request can follow the current one, so only it counts.
    fn has_further_row_hit(&self, bank: Bank, row: Row) -> bool {
        self.buffer
            .queue(bank)
            .and_then(|queue| queue.get(1))
            .is_some_and(|next| next.row() == row)
    }

    fn has_further_request(&self, bank: Bank) -> bool {
        self.buffer.queue(bank).is_some_and(|queue| queue.len() >= 2)
    }

    fn buffer_depth(&self) -> &[usize] {
        self.buffer.buffer_counter().buffer_depth()
    }
}
