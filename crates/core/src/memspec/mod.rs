//! Memory technology timing models.
//!
//! A memspec is built once from a [`MemSpecDescriptor`] and shared read-only (behind an
//! `Arc`) by every channel of a simulation. It provides:
//! 1. **Organization:** Channel, rank, bank-group, bank, row, and column counts.
//! 2. **Command lengths:** Command-bus occupancy per command kind.
//! 3. **Execution times:** Time from issue until a command's protocol effect completes.
//! 4. **Data-strobe windows:** When a column command occupies the data bus.
//!
//! Every timing parameter is converted from clock cycles to [`SimTime`] during
//! construction and never recomputed.

/// DDR3 SDRAM.
pub mod ddr3;

/// Wide I/O SDR.
pub mod wideio;

pub use ddr3::MemSpecDdr3;
pub use wideio::MemSpecWideIo;

use std::fmt;
use std::sync::Arc;

use tracing::info;

use crate::command::Command;
use crate::common::{MemSpecError, SimTime, TimeInterval};
use crate::config::{MemSpecDescriptor, MemoryType, TimingSpec};
use crate::request::Request;

/// Organization and clocking shared by every technology.
#[derive(Debug, Clone, PartialEq)]
pub struct MemSpecCommon {
    /// Channels in the memory system.
    pub number_of_channels: u32,
    /// Ranks per channel.
    pub number_of_ranks: u32,
    /// Banks per rank.
    pub banks_per_rank: u32,
    /// Bank groups per rank.
    pub groups_per_rank: u32,
    /// Banks per bank group.
    pub banks_per_group: u32,
    /// Banks per channel (`banks_per_rank * number_of_ranks`).
    pub number_of_banks: u32,
    /// Bank groups per channel (`groups_per_rank * number_of_ranks`).
    pub number_of_bank_groups: u32,
    /// Devices operating in lockstep on the DIMM.
    pub number_of_devices_on_dimm: u32,
    /// Rows per bank.
    pub number_of_rows: u32,
    /// Columns per row.
    pub number_of_columns: u32,
    /// Transfers per burst.
    pub burst_length: u32,
    /// Transfers per clock cycle.
    pub data_rate: u32,
    /// Data width of one device in bits.
    pub bit_width: u32,
    /// Width of the channel data bus in bits (`bit_width * number_of_devices_on_dimm`).
    pub data_bus_width: u32,
    /// Bytes moved by one burst.
    pub bytes_per_burst: u32,

    /// Clock frequency in MHz.
    pub f_ck_mhz: f64,
    /// Clock period.
    pub t_ck: SimTime,

    /// Part identifier.
    pub memory_id: String,
    /// Technology family.
    pub memory_type: MemoryType,

    command_length_in_cycles: [u64; Command::COUNT],
    burst_duration: SimTime,
}

impl MemSpecCommon {
    /// Derives the organization and clocking from a descriptor.
    ///
    /// # Arguments
    ///
    /// * `descriptor` - Parsed memspec.
    /// * `groups_per_rank` - Bank groups per rank as the technology defines them.
    ///
    /// # Errors
    ///
    /// [`MemSpecError::InvalidParameter`] for zero counts, an invalid clock, or banks
    /// that do not divide evenly into bank groups.
    pub fn new(descriptor: &MemSpecDescriptor, groups_per_rank: u32) -> Result<Self, MemSpecError> {
        let arch = &descriptor.memarchitecturespec;

        for (name, value) in [
            ("nbrOfChannels", arch.channels),
            ("nbrOfRanks", arch.ranks),
            ("nbrOfBanks", arch.banks),
            ("nbrOfBankGroups", groups_per_rank),
            ("nbrOfRows", arch.rows),
            ("nbrOfColumns", arch.columns),
            ("burstLength", arch.burst_length),
            ("dataRate", arch.data_rate),
            ("width", arch.width),
            ("nbrOfDevicesOnDIMM", arch.devices_on_dimm),
        ] {
            if value == 0 {
                return Err(MemSpecError::InvalidParameter {
                    name,
                    reason: "must be greater than zero".to_owned(),
                });
            }
        }

        if arch.banks % groups_per_rank != 0 {
            return Err(MemSpecError::InvalidParameter {
                name: "nbrOfBankGroups",
                reason: format!(
                    "{} banks per rank cannot be split into {groups_per_rank} bank groups",
                    arch.banks
                ),
            });
        }

        let clk_mhz = descriptor.memtimingspec.clk_mhz;
        let t_ck = SimTime::from_clock_mhz(clk_mhz).ok_or_else(|| MemSpecError::InvalidParameter {
            name: "clkMhz",
            reason: format!("{clk_mhz} MHz does not yield a positive clock period"),
        })?;

        let data_bus_width = arch
            .width
            .checked_mul(arch.devices_on_dimm)
            .ok_or_else(|| too_large("nbrOfDevicesOnDIMM"))?;
        let bytes_per_burst = arch
            .burst_length
            .checked_mul(data_bus_width)
            .ok_or_else(|| too_large("burstLength"))?
            / 8;
        let number_of_banks = arch.banks.checked_mul(arch.ranks).ok_or_else(|| too_large("nbrOfRanks"))?;
        let burst_duration = t_ck
            .checked_cycles(u64::from(arch.burst_length))
            .ok_or_else(|| out_of_range("burstLength"))?;
        let burst_duration = SimTime::from_ps(burst_duration.as_ps() / u64::from(arch.data_rate));

        Ok(Self {
            number_of_channels: arch.channels,
            number_of_ranks: arch.ranks,
            banks_per_rank: arch.banks,
            groups_per_rank,
            banks_per_group: arch.banks / groups_per_rank,
            number_of_banks,
            number_of_bank_groups: groups_per_rank * arch.ranks,
            number_of_devices_on_dimm: arch.devices_on_dimm,
            number_of_rows: arch.rows,
            number_of_columns: arch.columns,
            burst_length: arch.burst_length,
            data_rate: arch.data_rate,
            bit_width: arch.width,
            data_bus_width,
            bytes_per_burst,
            f_ck_mhz: clk_mhz,
            t_ck,
            memory_id: descriptor.memory_id.clone(),
            memory_type: descriptor.memory_type,
            command_length_in_cycles: [1; Command::COUNT],
            burst_duration,
        })
    }

    /// Converts a named cycle count from the timing spec into a duration.
    ///
    /// # Errors
    ///
    /// [`MemSpecError::MissingTiming`] if the parameter is absent;
    /// [`MemSpecError::InvalidParameter`] if the duration exceeds the picosecond range.
    pub fn timing(&self, timing: &TimingSpec, name: &'static str) -> Result<SimTime, MemSpecError> {
        self.t_ck
            .checked_cycles(timing.cycles(name)?)
            .ok_or_else(|| out_of_range(name))
    }

    /// Sum of durations that a command table derives from several parameters.
    ///
    /// # Errors
    ///
    /// [`MemSpecError::InvalidParameter`] naming `name` if the sum exceeds the picosecond
    /// range.
    pub fn checked_sum(name: &'static str, parts: &[SimTime]) -> Result<SimTime, MemSpecError> {
        parts
            .iter()
            .try_fold(SimTime::ZERO, |sum, &part| sum.checked_add(part))
            .ok_or_else(|| out_of_range(name))
    }

    /// Overrides the command-bus occupancy of one command kind.
    ///
    /// Only meant for technology constructors; every command defaults to one cycle.
    pub fn set_command_length(&mut self, command: Command, cycles: u64) {
        self.command_length_in_cycles[command.index()] = cycles;
    }

    /// Command-bus occupancy of `command`.
    #[inline]
    pub fn command_length(&self, command: Command) -> SimTime {
        self.t_ck.cycles(self.command_length_in_cycles[command.index()])
    }

    /// Duration of one burst on the data bus (`tCK * burst_length / data_rate`).
    #[inline]
    pub fn burst_duration(&self) -> SimTime {
        self.burst_duration
    }

    /// Total simulated capacity in bytes, saturating at `u64::MAX`.
    pub fn total_memory_size_bytes(&self) -> u64 {
        [
            self.number_of_ranks,
            self.banks_per_rank,
            self.number_of_rows,
            self.number_of_columns,
            self.data_bus_width / 8,
        ]
        .into_iter()
        .fold(u64::from(self.number_of_channels), |size, factor| {
            size.saturating_mul(u64::from(factor))
        })
    }

    /// Error for a command the technology has no execution time for.
    pub fn no_execution_time(&self, command: Command) -> MemSpecError {
        MemSpecError::UnsupportedCommand {
            command,
            technology: self.memory_type,
            what: "an execution time",
        }
    }

    /// Error for a command that does not use the data bus on this technology.
    pub fn no_data_strobe(&self, command: Command) -> MemSpecError {
        MemSpecError::UnsupportedCommand {
            command,
            technology: self.memory_type,
            what: "a data strobe interval",
        }
    }
}

/// Error for a parameter whose derived value exceeds the representable range.
fn out_of_range(name: &'static str) -> MemSpecError {
    MemSpecError::InvalidParameter {
        name,
        reason: "overflows picosecond range".to_owned(),
    }
}

/// Error for an organization parameter whose derived count overflows.
fn too_large(name: &'static str) -> MemSpecError {
    MemSpecError::InvalidParameter {
        name,
        reason: "derived organization size overflows".to_owned(),
    }
}

/// Timing model of one memory technology.
///
/// Implementations are immutable after construction and `Send + Sync`, so one instance
/// serves every channel of a simulation.
pub trait MemSpec: Send + Sync + fmt::Debug {
    /// Organization and clocking.
    fn common(&self) -> &MemSpecCommon;

    /// Time from issuing `command` for `request` until its protocol effect completes
    /// (bank activated, precharged, refreshed, or last data beat transferred).
    ///
    /// # Errors
    ///
    /// [`MemSpecError::UnsupportedCommand`] if the technology has no fixed execution time
    /// for the command.
    fn execution_time(&self, command: Command, request: &Request) -> Result<SimTime, MemSpecError>;

    /// Window, relative to command issue, during which `command` occupies the data bus.
    ///
    /// # Errors
    ///
    /// [`MemSpecError::UnsupportedCommand`] for commands that do not transfer data.
    fn interval_on_data_strobe(&self, command: Command) -> Result<TimeInterval, MemSpecError>;

    /// Nominal interval between all-bank refreshes; `None` if unsupported.
    fn refresh_interval_all_bank(&self) -> Option<SimTime> {
        None
    }

    /// Nominal interval between per-bank refreshes; `None` if unsupported.
    fn refresh_interval_per_bank(&self) -> Option<SimTime> {
        None
    }

    /// Nominal interval between same-bank refreshes; `None` if unsupported.
    fn refresh_interval_same_bank(&self) -> Option<SimTime> {
        None
    }

    /// Returns true if row and column addresses travel on separate RAS and CAS buses.
    fn has_ras_and_cas_bus(&self) -> bool {
        false
    }

    /// Command-bus occupancy of `command`.
    fn command_length(&self, command: Command) -> SimTime {
        self.common().command_length(command)
    }

    /// Total simulated capacity in bytes.
    fn total_memory_size_bytes(&self) -> u64 {
        self.common().total_memory_size_bytes()
    }

    /// Technology family.
    fn memory_type(&self) -> MemoryType {
        self.common().memory_type
    }

    /// Clock period.
    fn t_ck(&self) -> SimTime {
        self.common().t_ck
    }

    /// Banks per channel; the number of scheduler queues.
    fn number_of_banks(&self) -> usize {
        self.common().number_of_banks as usize
    }
}

/// Builds the timing model for a descriptor's technology.
///
/// # Errors
///
/// [`MemSpecError::UnsupportedTechnology`] for families without a timing model, or any
/// error raised while converting the descriptor.
pub fn from_descriptor(descriptor: &MemSpecDescriptor) -> Result<Arc<dyn MemSpec>, MemSpecError> {
    let memspec: Arc<dyn MemSpec> = match descriptor.memory_type {
        MemoryType::Ddr3 => Arc::new(MemSpecDdr3::new(descriptor)?),
        MemoryType::WideIo => Arc::new(MemSpecWideIo::new(descriptor)?),
        other => return Err(MemSpecError::UnsupportedTechnology(other)),
    };

    let common = memspec.common();
    info!(
        memory_id = %common.memory_id,
        memory_type = %common.memory_type,
        t_ck = %common.t_ck,
        banks = common.number_of_banks,
        size_bytes = common.total_memory_size_bytes(),
        "memspec loaded"
    );
    Ok(memspec)
}

/// Parses a memspec JSON document and builds its timing model.
///
/// # Errors
///
/// See [`MemSpecDescriptor::from_json`] and [`from_descriptor`].
pub fn from_json(json: &str) -> Result<Arc<dyn MemSpec>, MemSpecError> {
    from_descriptor(&MemSpecDescriptor::from_json(json)?)
}
