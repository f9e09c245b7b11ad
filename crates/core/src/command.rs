//! DRAM bus commands.
//!
//! The set covers every command a controller may place on the command bus across the
//! supported technologies. Technologies that do not implement a command (e.g. same-bank
//! refresh on DDR3) report it as unsupported from their timing model.

use std::fmt;

/// A command issued on the DRAM command bus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// No operation.
    Nop,
    /// Column read.
    Read,
    /// Column write.
    Write,
    /// Column read with auto-precharge.
    ReadAutoPrecharge,
    /// Column write with auto-precharge.
    WriteAutoPrecharge,
    /// Row activate.
    Activate,
    /// Precharge of one bank.
    Precharge,
    /// Precharge of the same bank in every bank group.
    PrechargeSameBank,
    /// Precharge of all banks of a rank.
    PrechargeAll,
    /// Per-bank refresh.
    RefreshBank,
    /// Same-bank refresh (one bank index in every bank group).
    RefreshSameBank,
    /// All-bank refresh.
    RefreshAll,
    /// Power-down entry with a row open.
    PowerDownEntryActive,
    /// Power-down entry with all banks precharged.
    PowerDownEntryPrecharged,
    /// Self-refresh entry.
    SelfRefreshEntry,
    /// Power-down exit from active power-down.
    PowerDownExitActive,
    /// Power-down exit from precharged power-down.
    PowerDownExitPrecharged,
    /// Self-refresh exit.
    SelfRefreshExit,
}

impl Command {
    /// Number of command kinds; the length of per-command tables.
    pub const COUNT: usize = 18;

    /// Every command kind, in table order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Nop,
        Self::Read,
        Self::Write,
        Self::ReadAutoPrecharge,
        Self::WriteAutoPrecharge,
        Self::Activate,
        Self::Precharge,
        Self::PrechargeSameBank,
        Self::PrechargeAll,
        Self::RefreshBank,
        Self::RefreshSameBank,
        Self::RefreshAll,
        Self::PowerDownEntryActive,
        Self::PowerDownEntryPrecharged,
        Self::SelfRefreshEntry,
        Self::PowerDownExitActive,
        Self::PowerDownExitPrecharged,
        Self::SelfRefreshExit,
    ];

    /// Position of this command in per-command tables.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// JEDEC-style mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Nop => "NOP",
            Self::Read => "RD",
            Self::Write => "WR",
            Self::ReadAutoPrecharge => "RDA",
            Self::WriteAutoPrecharge => "WRA",
            Self::Activate => "ACT",
            Self::Precharge => "PRE",
            Self::PrechargeSameBank => "PRESB",
            Self::PrechargeAll => "PREA",
            Self::RefreshBank => "REFB",
            Self::RefreshSameBank => "REFSB",
            Self::RefreshAll => "REFA",
            Self::PowerDownEntryActive => "PDEA",
            Self::PowerDownEntryPrecharged => "PDEP",
            Self::SelfRefreshEntry => "SREFEN",
            Self::PowerDownExitActive => "PDXA",
            Self::PowerDownExitPrecharged => "PDXP",
            Self::SelfRefreshExit => "SREFEX",
        }
    }

    /// Returns true for column reads (with or without auto-precharge).
    #[inline]
    pub const fn is_read(self) -> bool {
        matches!(self, Self::Read | Self::ReadAutoPrecharge)
    }

    /// Returns true for column writes (with or without auto-precharge).
    #[inline]
    pub const fn is_write(self) -> bool {
        matches!(self, Self::Write | Self::WriteAutoPrecharge)
    }

    /// Returns true for commands that move data on the data bus.
    #[inline]
    pub const fn is_cas(self) -> bool {
        self.is_read() || self.is_write()
    }

    /// Returns true for row commands (activate, precharge, refresh).
    #[inline]
    pub const fn is_ras(self) -> bool {
        matches!(
            self,
            Self::Activate
                | Self::Precharge
                | Self::PrechargeSameBank
                | Self::PrechargeAll
                | Self::RefreshBank
                | Self::RefreshSameBank
                | Self::RefreshAll
        )
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
