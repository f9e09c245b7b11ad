//! Read-only view of a bank's protocol state.
//!
//! The bank state machine itself (command legality, timing-constraint enforcement) is
//! owned by the controller. Schedulers query it through [`BankMachine`] and never
//! mutate it.

use std::fmt;

use crate::common::{Bank, Row};

/// Protocol state of one bank.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BankState {
    /// Precharged; no row open.
    #[default]
    Idle,
    /// Activate issued, tRCD not yet elapsed.
    Activating,
    /// A row is open and accepts column commands.
    Activated,
    /// Precharge issued, tRP not yet elapsed.
    Precharging,
    /// Refresh in progress.
    Refreshing,
    /// Bank (rank) is in self-refresh.
    SelfRefresh,
}

impl fmt::Display for BankState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Activating => "activating",
            Self::Activated => "activated",
            Self::Precharging => "precharging",
            Self::Refreshing => "refreshing",
            Self::SelfRefresh => "self-refresh",
        };
        f.write_str(name)
    }
}

/// Capability a scheduler uses to inspect a bank.
pub trait BankMachine {
    /// Bank this machine controls.
    fn bank(&self) -> Bank;

    /// Current protocol state.
    fn state(&self) -> BankState;

    /// Open row; only meaningful while [`BankState::Activated`].
    fn open_row(&self) -> Option<Row>;
}

/// Snapshot of a bank's state, handed to a scheduler by value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BankStatus {
    bank: Bank,
    state: BankState,
    open_row: Option<Row>,
}

impl BankStatus {
    /// A precharged bank.
    pub const fn idle(bank: Bank) -> Self {
        Self {
            bank,
            state: BankState::Idle,
            open_row: None,
        }
    }

    /// A bank with `row` open.
    pub const fn activated(bank: Bank, row: Row) -> Self {
        Self {
            bank,
            state: BankState::Activated,
            open_row: Some(row),
        }
    }

    /// A bank in any other state; no row is considered open.
    pub const fn with_state(bank: Bank, state: BankState) -> Self {
        Self {
            bank,
            state,
            open_row: None,
        }
    }
}

impl BankMachine for BankStatus {
    fn bank(&self) -> Bank {
        self.bank
    }

    fn state(&self) -> BankState {
        self.state
    }

    fn open_row(&self) -> Option<Row> {
        self.open_row
    }
}
