//! First-Ready, First-Come-First-Served (FR-FCFS) scheduler.
//!
//! Requests that hit the open row of an activated bank are served before older
//! requests that would need a precharge and activate. Among row hits, and whenever no
//! row hit exists, the oldest request wins. Selection never reorders a queue.

use tracing::trace;

use super::{BankQueues, Scheduler};
use crate::bank::{BankMachine, BankState};
use crate::common::{Bank, Row, SchedulerError};
use crate::config::SchedulerBuffer;
use crate::request::Request;

/// FR-FCFS request scheduler for one channel.
#[derive(Debug, Clone)]
pub struct FrFcfsScheduler {
    buffer: BankQueues,
}

impl FrFcfsScheduler {
    /// Creates an empty scheduler.
    ///
    /// # Arguments
    ///
    /// * `number_of_banks` - Banks per channel; one queue each.
    /// * `buffer_policy` - Admission control granularity.
    /// * `request_buffer_size` - Capacity of each admission counter.
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

impl Scheduler for FrFcfsScheduler {
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
        let queue = self.buffer.queue(bank.bank())?;
        let oldest = queue.front()?;

        if bank.state() == BankState::Activated {
            if let Some(open_row) = bank.open_row() {
                if let Some(hit) = queue.iter().find(|request| request.row() == open_row) {
                    trace!(bank = %bank.bank(), row = %open_row, id = %hit.id, "row hit selected");
                    return Some(hit);
                }
            }
        }

        trace!(bank = %bank.bank(), id = %oldest.id, "oldest request selected");
        Some(oldest)
    }

    fn has_further_row_hit(&self, bank: Bank, row: Row) -> bool {
        self.buffer
            .queue(bank)
            .is_some_and(|queue| queue.iter().filter(|request| request.row() == row).nth(1).is_some())
    }

    fn has_further_request(&self, bank: Bank) -> bool {
        self.buffer.queue(bank).is_some_and(|queue| queue.len() >= 2)
    }

    fn buffer_depth(&self) -> &[usize] {
        self.buffer.buffer_counter().buffer_depth()
    }
}
