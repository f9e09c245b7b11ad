//! Scheduler Property Tests.
//!
//! Random store/remove sequences against a simple reference model: per-bank arrival
//! order, counter accounting, and admission decisions must agree with it after every
//! step.

use std::collections::VecDeque;

use memctl_core::bank::BankStatus;
use memctl_core::common::{Bank, Row};
use memctl_core::config::SchedulerBuffer;
use memctl_core::request::{Direction, Request};
use memctl_core::scheduler::{FifoScheduler, FrFcfsScheduler, Scheduler};
use proptest::prelude::*;

use crate::common::fixtures::request;

const BANKS: usize = 4;
const CAPACITY: usize = 3;

#[derive(Clone, Debug)]
enum Op {
    Store { bank: u32, row: u32, write: bool },
    /// Removes the queued request at this position (modulo queue length) of a bank.
    Remove { bank: u32, position: usize },
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0..BANKS as u32, 0..4u32, any::<bool>()).prop_map(|(bank, row, write)| Op::Store { bank, row, write }),
        2 => (0..BANKS as u32, 0..8usize).prop_map(|(bank, position)| Op::Remove { bank, position }),
    ]
}

fn policy() -> impl Strategy<Value = SchedulerBuffer> {
    prop_oneof![
        Just(SchedulerBuffer::Bankwise),
        Just(SchedulerBuffer::ReadWrite),
        Just(SchedulerBuffer::Shared),
    ]
}

/// Expected counter values for `model` under `policy`.
fn expected_depth(model: &[VecDeque<Request>], policy: SchedulerBuffer) -> Vec<usize> {
    let all = || model.iter().flatten();
    match policy {
        SchedulerBuffer::Bankwise => model.iter().map(VecDeque::len).collect(),
        SchedulerBuffer::ReadWrite => vec![
            all().filter(|r| r.direction == Direction::Read).count(),
            all().filter(|r| r.direction == Direction::Write).count(),
        ],
        SchedulerBuffer::Shared => vec![all().count()],
    }
}

/// Replays `ops` against `scheduler` and the reference model.
fn check_against_model(
    scheduler: &mut dyn Scheduler,
    policy: SchedulerBuffer,
    ops: &[Op],
) -> Result<(), TestCaseError> {
    let mut model: Vec<VecDeque<Request>> = vec![VecDeque::new(); BANKS];
    let mut next_id = 0;

    for op in ops {
        match *op {
            Op::Store { bank, row, write } => {
                let direction = if write { Direction::Write } else { Direction::Read };
                let request = request(next_id, bank, row, direction);
                next_id += 1;

                let admitted = scheduler.has_space_for(&request);
                prop_assert_eq!(scheduler.store_request(request).is_ok(), admitted);
                if admitted {
                    model[bank as usize].push_back(request);
                }
            }
            Op::Remove { bank, position } => {
                let queue = &mut model[bank as usize];
                if queue.is_empty() {
                    continue;
                }
                let Some(victim) = queue.remove(position % queue.len()) else {
                    continue;
                };
                prop_assert!(scheduler.remove_request(&victim).is_ok());
            }
        }

        let depth = expected_depth(&model, policy);
        prop_assert_eq!(scheduler.buffer_depth(), depth.as_slice());
        prop_assert!(depth.iter().all(|&d| d <= CAPACITY));

        for (index, queue) in model.iter().enumerate() {
            let bank = Bank::new(index as u32);
            prop_assert_eq!(
                scheduler.next_request(&BankStatus::idle(bank)).copied(),
                queue.front().copied()
            );
            prop_assert_eq!(scheduler.has_further_request(bank), queue.len() >= 2);
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn frfcfs_matches_reference_model(policy in policy(), ops in prop::collection::vec(op(), 1..64)) {
        let mut scheduler = FrFcfsScheduler::new(BANKS, policy, CAPACITY);
        check_against_model(&mut scheduler, policy, &ops)?;
    }

    #[test]
    fn fifo_matches_reference_model(policy in policy(), ops in prop::collection::vec(op(), 1..64)) {
        let mut scheduler = FifoScheduler::new(BANKS, policy, CAPACITY);
        check_against_model(&mut scheduler, policy, &ops)?;
    }

    #[test]
    fn row_hit_is_the_oldest_request_for_the_open_row(rows in prop::collection::vec(0..4u32, 1..12), open in 0..4u32) {
        let mut scheduler = FrFcfsScheduler::new(1, SchedulerBuffer::Shared, 16);
        for (id, &row) in rows.iter().enumerate() {
            scheduler.store_request(request(id as u64, 0, row, Direction::Read)).unwrap();
        }

        let bank = BankStatus::activated(Bank::new(0), Row::new(open));
        let selected = scheduler.next_request(&bank).unwrap();
        let expected = rows.iter().position(|&row| row == open).unwrap_or(0);
        prop_assert_eq!(selected.id.0, expected as u64);

        let hits = rows.iter().filter(|&&row| row == open).count();
        prop_assert_eq!(scheduler.has_further_row_hit(Bank::new(0), Row::new(open)), hits >= 2);
    }

    #[test]
    fn store_then_remove_is_identity(policy in policy(), bank in 0..BANKS as u32, row in 0..16u32, write in any::<bool>()) {
        let mut scheduler = FrFcfsScheduler::new(BANKS, policy, CAPACITY);
        scheduler.store_request(request(0, 0, 1, Direction::Read)).unwrap();
        let before = scheduler.buffer_depth().to_vec();

        let direction = if write { Direction::Write } else { Direction::Read };
        let probe = request(1, bank, row, direction);
        scheduler.store_request(probe).unwrap();
        scheduler.remove_request(&probe).unwrap();

        prop_assert_eq!(scheduler.buffer_depth(), before.as_slice());
        prop_assert_eq!(scheduler.queues().len(), 1);
    }
}
