//! Per-bank request queues with admission accounting.
//!
//! Both schedulers buffer requests the same way and differ only in how they pick from a
//! bank's queue, so storage, removal, and the consistency checks live here.

use std::collections::VecDeque;

use tracing::{debug, warn};

use super::buffer::BufferCounter;
use crate::common::{Bank, SchedulerError};
use crate::config::SchedulerBuffer;
use crate::request::Request;

/// Arrival-ordered queues, one per bank, plus their admission counters.
#[derive(Debug, Clone)]
pub struct BankQueues {
    queues: Vec<VecDeque<Request>>,
    buffer_counter: BufferCounter,
}

impl BankQueues {
    /// Creates empty queues for `number_of_banks` banks.
    pub fn new(number_of_banks: usize, policy: SchedulerBuffer, capacity: usize) -> Self {
        Self {
            queues: vec![VecDeque::new(); number_of_banks],
            buffer_counter: BufferCounter::new(policy, capacity, number_of_banks),
        }
    }

    /// Admission counters.
    pub const fn buffer_counter(&self) -> &BufferCounter {
        &self.buffer_counter
    }

    /// Queue of `bank`, oldest request first; `None` for a bank the channel lacks.
    pub fn queue(&self, bank: Bank) -> Option<&VecDeque<Request>> {
        self.queues.get(bank.index())
    }

    /// Number of banks.
    pub fn number_of_banks(&self) -> usize {
        self.queues.len()
    }

    /// Total number of buffered requests.
    pub fn len(&self) -> usize {
        self.queues.iter().map(VecDeque::len).sum()
    }

    /// Returns true if no request is buffered.
    pub fn is_empty(&self) -> bool {
        self.queues.iter().all(VecDeque::is_empty)
    }

    /// Bank whose queue holds a request with `request`'s id, whatever bank `request`
    /// itself targets.
    fn bank_holding(&self, request: &Request) -> Option<Bank> {
        self.queues
            .iter()
            .position(|queue| queue.iter().any(|queued| queued.id == request.id))
            .map(|index| Bank::new(index as u32))
    }

    /// Appends `request` to the tail of its bank's queue and accounts it.
    ///
    /// # Errors
    ///
    /// [`SchedulerError::BankOutOfRange`], [`SchedulerError::AlreadyQueued`], or
    /// [`SchedulerError::BufferFull`]; the queues and counters are unchanged on error.
    pub fn store(&mut self, request: Request) -> Result<(), SchedulerError> {
        let bank = request.bank();
        let banks = self.queues.len();
        if bank.index() >= banks {
            return Err(SchedulerError::BankOutOfRange {
                id: request.id,
                bank,
                banks,
            });
        }

        if let Some(queued_under) = self.bank_holding(&request) {
            warn!(id = %request.id, %bank, %queued_under, "request stored twice");
            return Err(SchedulerError::AlreadyQueued {
                id: request.id,
                bank: queued_under,
            });
        }

        let queue = &mut self.queues[bank.index()];
        self.buffer_counter.store_request(&request)?;
        queue.push_back(request);
        debug!(
            id = %request.id,
            %bank,
            row = %request.row(),
            direction = %request.direction,
            queued = queue.len(),
            "request stored"
        );
        Ok(())
    }

    /// Removes the queued request with `request`'s id from its bank's queue and releases
    /// its accounting.
    ///
    /// # Errors
    ///
    /// [`SchedulerError::NotQueued`] if the bank's queue holds no request with that id,
    /// [`SchedulerError::BankOutOfRange`] for a bank the channel lacks, or
    /// [`SchedulerError::CounterUnderflow`]. The queues and counters are unchanged on
    /// error.
    pub fn remove(&mut self, request: &Request) -> Result<Request, SchedulerError> {
        let bank = request.bank();
        let banks = self.queues.len();
        let queue = self.queues.get_mut(bank.index()).ok_or(SchedulerError::BankOutOfRange {
            id: request.id,
            bank,
            banks,
        })?;

        let Some(position) = queue.iter().position(|queued| queued.id == request.id) else {
            warn!(id = %request.id, %bank, "removal of a request that is not queued");
            return Err(SchedulerError::NotQueued { id: request.id, bank });
        };

        // Release against the stored copy so the counter sees the classification it
        // was charged with.
        self.buffer_counter.remove_request(&queue[position])?;
        let removed = queue.remove(position).ok_or(SchedulerError::NotQueued { id: request.id, bank })?;
        debug!(id = %removed.id, %bank, queued = queue.len(), "request removed");
        Ok(removed)
    }
}
