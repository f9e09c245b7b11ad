//! Buffer Admission Control Unit Tests.
//!
//! Verifies bankwise, read/write, and shared counting, the overflow and underflow
//! faults, and the difference between `has_buffer_space` and `has_space_for`.

use memctl_core::common::{Bank, SchedulerError};
use memctl_core::config::SchedulerBuffer;
use memctl_core::request::RequestId;
use memctl_core::scheduler::{BufferClass, BufferCounter};
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::fixtures::{read, write};

// ══════════════════════════════════════════════════════════
// 1. Construction
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(SchedulerBuffer::Bankwise, 4)]
#[case(SchedulerBuffer::ReadWrite, 2)]
#[case(SchedulerBuffer::Shared, 1)]
fn counters_start_empty(#[case] policy: SchedulerBuffer, #[case] counters: usize) {
    let counter = BufferCounter::new(policy, 8, 4);
    assert_eq!(counter.policy(), policy);
    assert_eq!(counter.capacity(), 8);
    assert_eq!(counter.buffer_depth(), vec![0; counters].as_slice());
    assert!(counter.has_buffer_space());
}

#[rstest]
#[case(SchedulerBuffer::Bankwise)]
#[case(SchedulerBuffer::ReadWrite)]
#[case(SchedulerBuffer::Shared)]
fn zero_capacity_admits_nothing(#[case] policy: SchedulerBuffer) {
    let mut counter = BufferCounter::new(policy, 0, 4);
    assert!(!counter.has_buffer_space());
    assert!(!counter.has_space_for(&read(1, 0, 0)));
    assert!(matches!(
        counter.store_request(&read(1, 0, 0)),
        Err(SchedulerError::BufferFull { capacity: 0, .. })
    ));
}

// ══════════════════════════════════════════════════════════
// 2. Bankwise
// ══════════════════════════════════════════════════════════

#[test]
fn bankwise_counts_per_bank() {
    let mut counter = BufferCounter::new(SchedulerBuffer::Bankwise, 2, 4);
    counter.store_request(&read(1, 1, 0)).unwrap();
    counter.store_request(&write(2, 1, 0)).unwrap();
    counter.store_request(&read(3, 3, 0)).unwrap();
    assert_eq!(counter.buffer_depth(), &[0, 2, 0, 1]);
}

#[test]
fn bankwise_full_bank_rejects_but_others_accept() {
    let mut counter = BufferCounter::new(SchedulerBuffer::Bankwise, 1, 4);
    counter.store_request(&read(1, 0, 0)).unwrap();

    let err = counter.store_request(&read(2, 0, 0)).unwrap_err();
    assert_eq!(
        err,
        SchedulerError::BufferFull {
            id: RequestId(2),
            class: BufferClass::Bank(Bank::new(0)),
            depth: 1,
            capacity: 1,
        }
    );
    assert_eq!(counter.buffer_depth(), &[1, 0, 0, 0]);
    assert!(counter.has_space_for(&read(3, 1, 0)));
    counter.store_request(&read(3, 1, 0)).unwrap();
}

#[test]
fn bankwise_space_tracks_most_recent_bank() {
    let mut counter = BufferCounter::new(SchedulerBuffer::Bankwise, 1, 2);
    counter.store_request(&read(1, 0, 0)).unwrap();
    assert!(!counter.has_buffer_space());

    counter.store_request(&read(2, 1, 0)).unwrap();
    assert!(!counter.has_buffer_space());

    // Draining bank 1 frees the bank that received the last store.
    counter.remove_request(&read(2, 1, 0)).unwrap();
    assert!(counter.has_buffer_space());
    assert!(!counter.has_space_for(&read(3, 0, 0)));
}

#[test]
fn bankwise_bank_outside_channel() {
    let mut counter = BufferCounter::new(SchedulerBuffer::Bankwise, 4, 4);
    assert!(!counter.has_space_for(&read(1, 4, 0)));
    assert_eq!(
        counter.store_request(&read(1, 4, 0)).unwrap_err(),
        SchedulerError::BankOutOfRange {
            id: RequestId(1),
            bank: Bank::new(4),
            banks: 4,
        }
    );
}

// ══════════════════════════════════════════════════════════
// 3. Read/write
// ══════════════════════════════════════════════════════════

#[test]
fn read_write_counts_per_direction() {
    let mut counter = BufferCounter::new(SchedulerBuffer::ReadWrite, 2, 4);
    counter.store_request(&read(1, 0, 0)).unwrap();
    counter.store_request(&write(2, 1, 0)).unwrap();
    counter.store_request(&write(3, 2, 0)).unwrap();
    assert_eq!(counter.buffer_depth(), &[1, 2]);

    // Writes are full, so the buffer as a whole reports no space...
    assert!(!counter.has_buffer_space());
    // ...while a read can still be admitted.
    assert!(counter.has_space_for(&read(4, 0, 0)));
    assert!(!counter.has_space_for(&write(4, 0, 0)));
    assert_eq!(
        counter.store_request(&write(4, 0, 0)).unwrap_err(),
        SchedulerError::BufferFull {
            id: RequestId(4),
            class: BufferClass::Write,
            depth: 2,
            capacity: 2,
        }
    );
}

#[test]
fn read_write_release() {
    let mut counter = BufferCounter::new(SchedulerBuffer::ReadWrite, 1, 4);
    counter.store_request(&read(1, 0, 0)).unwrap();
    counter.store_request(&write(2, 0, 0)).unwrap();
    counter.remove_request(&write(2, 0, 0)).unwrap();
    assert_eq!(counter.buffer_depth(), &[1, 0]);
    assert_eq!(
        counter.remove_request(&write(2, 0, 0)).unwrap_err(),
        SchedulerError::CounterUnderflow {
            id: RequestId(2),
            class: BufferClass::Write,
        }
    );
}

// ══════════════════════════════════════════════════════════
// 4. Shared
// ══════════════════════════════════════════════════════════

#[test]
fn shared_counts_everything_together() {
    let mut counter = BufferCounter::new(SchedulerBuffer::Shared, 3, 4);
    counter.store_request(&read(1, 0, 0)).unwrap();
    counter.store_request(&write(2, 1, 0)).unwrap();
    assert!(counter.has_buffer_space());
    counter.store_request(&read(3, 3, 0)).unwrap();
    assert_eq!(counter.buffer_depth(), &[3]);
    assert!(!counter.has_buffer_space());
    assert_eq!(counter.class_of(&write(9, 2, 0)), BufferClass::Shared);
}

#[test]
fn buffer_class_display() {
    assert_eq!(BufferClass::Bank(Bank::new(2)).to_string(), "bank 2");
    assert_eq!(BufferClass::Read.to_string(), "read");
    assert_eq!(BufferClass::Shared.to_string(), "shared");
}
