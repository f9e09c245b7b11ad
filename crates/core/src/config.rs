//! Configuration system for the scheduling engine.
//!
//! This module defines the structures deserialized from simulation JSON. It provides:
//! 1. **Defaults:** Baseline controller settings (scheduler, buffer policy, buffer size).
//! 2. **Controller config:** The `mcconfig` object selecting scheduler and admission policy.
//! 3. **Memspec descriptor:** The raw `memspec` object (architecture, timing in clock
//!    cycles, power figures) from which a timing model is built.
//!
//! Configuration is read once at construction and injected into the components; nothing
//! in the engine consults global state.

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;

use crate::common::MemSpecError;

/// Default configuration constants.
mod defaults {
    /// Requests buffered per counter (per bank, per direction, or shared).
    pub const REQUEST_BUFFER_SIZE: usize = 8;

    /// Channels in a memspec that does not state them.
    pub const CHANNELS: u32 = 1;

    /// Bank groups per rank in a memspec that does not state them.
    pub const BANK_GROUPS: u32 = 1;

    /// Devices on the DIMM in a memspec that does not state them.
    pub const DEVICES_ON_DIMM: u32 = 1;

    /// Data rate (transfers per clock) in a memspec that does not state it.
    pub const DATA_RATE: u32 = 1;
}

/// Request scheduling policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum SchedulerPolicy {
    /// Strict arrival order per bank.
    Fifo,
    /// First-ready, first-come-first-served: row hits first, then arrival order.
    #[default]
    #[serde(alias = "FR-FCFS", alias = "FRFCFS")]
    FrFcfs,
}

impl fmt::Display for SchedulerPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fifo => f.write_str("FIFO"),
            Self::FrFcfs => f.write_str("FR-FCFS"),
        }
    }
}

/// Granularity at which the request buffer is bounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum SchedulerBuffer {
    /// One counter per bank.
    #[default]
    Bankwise,
    /// One counter for reads and one for writes.
    ReadWrite,
    /// A single counter for the whole buffer.
    Shared,
}

impl fmt::Display for SchedulerBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bankwise => f.write_str("bankwise"),
            Self::ReadWrite => f.write_str("read/write"),
            Self::Shared => f.write_str("shared"),
        }
    }
}

/// Memory controller configuration (`mcconfig`).
///
/// # Examples
///
/// ```
/// use memctl_core::config::{ControllerConfig, SchedulerBuffer, SchedulerPolicy};
///
/// let json = r#"{
///     "Scheduler": "FrFcfs",
///     "SchedulerBuffer": "ReadWrite",
///     "RequestBufferSize": 16
/// }"#;
///
/// let config: ControllerConfig = serde_json::from_str(json).unwrap();
/// assert_eq!(config.scheduler, SchedulerPolicy::FrFcfs);
/// assert_eq!(config.scheduler_buffer, SchedulerBuffer::ReadWrite);
/// assert_eq!(config.request_buffer_size, 16);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ControllerConfig {
    /// Scheduling policy
    #[serde(default)]
    pub scheduler: SchedulerPolicy,

    /// Admission control granularity
    #[serde(default)]
    pub scheduler_buffer: SchedulerBuffer,

    /// Capacity of each admission counter
    #[serde(default = "ControllerConfig::default_request_buffer_size")]
    pub request_buffer_size: usize,
}

impl ControllerConfig {
    /// Returns the default capacity of each admission counter.
    fn default_request_buffer_size() -> usize {
        defaults::REQUEST_BUFFER_SIZE
    }
}

impl Default for ControllerConfig {
    /// FR-FCFS with bankwise admission control and the default buffer size.
    fn default() -> Self {
        Self {
            scheduler: SchedulerPolicy::default(),
            scheduler_buffer: SchedulerBuffer::default(),
            request_buffer_size: defaults::REQUEST_BUFFER_SIZE,
        }
    }
}

/// DRAM technology families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum MemoryType {
    /// DDR3 SDRAM.
    #[serde(rename = "DDR3")]
    Ddr3,
    /// DDR4 SDRAM.
    #[serde(rename = "DDR4")]
    Ddr4,
    /// DDR5 SDRAM.
    #[serde(rename = "DDR5")]
    Ddr5,
    /// Low-power DDR4.
    #[serde(rename = "LPDDR4")]
    Lpddr4,
    /// Wide I/O single data rate (JESD229).
    #[serde(rename = "WIDEIO_SDR", alias = "WideIO")]
    WideIo,
    /// Wide I/O 2.
    #[serde(rename = "WIDEIO2", alias = "WideIO2")]
    WideIo2,
    /// GDDR5 graphics memory.
    #[serde(rename = "GDDR5")]
    Gddr5,
    /// GDDR5X graphics memory.
    #[serde(rename = "GDDR5X")]
    Gddr5x,
    /// GDDR6 graphics memory.
    #[serde(rename = "GDDR6")]
    Gddr6,
    /// High Bandwidth Memory 2.
    #[serde(rename = "HBM2")]
    Hbm2,
}

impl fmt::Display for MemoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ddr3 => "DDR3",
            Self::Ddr4 => "DDR4",
            Self::Ddr5 => "DDR5",
            Self::Lpddr4 => "LPDDR4",
            Self::WideIo => "WideIO",
            Self::WideIo2 => "WideIO2",
            Self::Gddr5 => "GDDR5",
            Self::Gddr5x => "GDDR5X",
            Self::Gddr6 => "GDDR6",
            Self::Hbm2 => "HBM2",
        };
        f.write_str(name)
    }
}

/// Organization of the memory (`memarchitecturespec`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ArchitectureSpec {
    /// Channels in the memory system
    #[serde(rename = "nbrOfChannels", default = "ArchitectureSpec::default_channels")]
    pub channels: u32,

    /// Ranks per channel
    #[serde(rename = "nbrOfRanks")]
    pub ranks: u32,

    /// Banks per rank
    #[serde(rename = "nbrOfBanks")]
    pub banks: u32,

    /// Bank groups per rank
    #[serde(rename = "nbrOfBankGroups", default = "ArchitectureSpec::default_bank_groups")]
    pub bank_groups: u32,

    /// Rows per bank
    #[serde(rename = "nbrOfRows")]
    pub rows: u32,

    /// Columns per row
    #[serde(rename = "nbrOfColumns")]
    pub columns: u32,

    /// Transfers per burst
    #[serde(rename = "burstLength")]
    pub burst_length: u32,

    /// Transfers per clock cycle (1 = SDR, 2 = DDR)
    #[serde(rename = "dataRate", default = "ArchitectureSpec::default_data_rate")]
    pub data_rate: u32,

    /// Data width of a single device in bits
    #[serde(rename = "width")]
    pub width: u32,

    /// Devices operating in lockstep on the DIMM
    #[serde(rename = "nbrOfDevicesOnDIMM", default = "ArchitectureSpec::default_devices")]
    pub devices_on_dimm: u32,
}

impl ArchitectureSpec {
    /// Returns the default channel count.
    fn default_channels() -> u32 {
        defaults::CHANNELS
    }

    /// Returns the default bank-group count per rank.
    fn default_bank_groups() -> u32 {
        defaults::BANK_GROUPS
    }

    /// Returns the default data rate.
    fn default_data_rate() -> u32 {
        defaults::DATA_RATE
    }

    /// Returns the default device count on the DIMM.
    fn default_devices() -> u32 {
        defaults::DEVICES_ON_DIMM
    }
}

/// Protocol timing (`memtimingspec`): the clock frequency plus named parameters in
/// clock cycles.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TimingSpec {
    /// Clock frequency in MHz
    #[serde(rename = "clkMhz")]
    pub clk_mhz: f64,

    /// Named timing parameters in clock cycles (e.g. `"RCD": 15`)
    #[serde(flatten)]
    pub cycles: BTreeMap<String, u64>,
}

impl TimingSpec {
    /// Looks up a timing parameter in clock cycles.
    ///
    /// # Errors
    ///
    /// [`MemSpecError::MissingTiming`] if the parameter is absent.
    pub fn cycles(&self, name: &str) -> Result<u64, MemSpecError> {
        self.cycles
            .get(name)
            .copied()
            .ok_or_else(|| MemSpecError::MissingTiming(name.to_owned()))
    }
}

/// A complete technology descriptor (`memspec`).
///
/// # Examples
///
/// ```
/// use memctl_core::config::{MemSpecDescriptor, MemoryType};
///
/// let json = r#"{
///     "memoryId": "JEDEC_256Mb_WIDEIO_SDR-200_128bit",
///     "memoryType": "WIDEIO_SDR",
///     "memarchitecturespec": {
///         "nbrOfChannels": 4, "nbrOfRanks": 1, "nbrOfBanks": 4,
///         "nbrOfRows": 4096, "nbrOfColumns": 128,
///         "burstLength": 4, "dataRate": 1, "width": 128
///     },
///     "memtimingspec": { "clkMhz": 200, "RCD": 3, "RP": 3 }
/// }"#;
///
/// let descriptor = MemSpecDescriptor::from_json(json).unwrap();
/// assert_eq!(descriptor.memory_type, MemoryType::WideIo);
/// assert_eq!(descriptor.memtimingspec.cycles("RCD").unwrap(), 3);
/// assert!(descriptor.memtimingspec.cycles("RFC").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MemSpecDescriptor {
    /// Free-form identifier of the part
    #[serde(rename = "memoryId", default)]
    pub memory_id: String,

    /// Technology family
    #[serde(rename = "memoryType")]
    pub memory_type: MemoryType,

    /// Organization
    pub memarchitecturespec: ArchitectureSpec,

    /// Protocol timing
    pub memtimingspec: TimingSpec,

    /// Currents and voltages, kept for downstream power estimation
    #[serde(default)]
    pub mempowerspec: BTreeMap<String, f64>,
}

impl MemSpecDescriptor {
    /// Parses a memspec JSON document.
    ///
    /// # Errors
    ///
    /// [`MemSpecError::Json`] if the document does not match the layout.
    pub fn from_json(json: &str) -> Result<Self, MemSpecError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Returns true if the descriptor carries power figures.
    pub fn has_power_spec(&self) -> bool {
        !self.mempowerspec.is_empty()
    }

    /// Looks up a power parameter.
    ///
    /// # Errors
    ///
    /// [`MemSpecError::MissingPower`] if the parameter is absent.
    pub fn power(&self, name: &str) -> Result<f64, MemSpecError> {
        self.mempowerspec
            .get(name)
            .copied()
            .ok_or_else(|| MemSpecError::MissingPower(name.to_owned()))
    }
}

/// A simulation configuration: one technology descriptor plus the controller settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SimulationConfig {
    /// Memory technology
    pub memspec: MemSpecDescriptor,

    /// Controller settings
    #[serde(default)]
    pub mcconfig: ControllerConfig,
}

impl SimulationConfig {
    /// Parses a simulation configuration JSON document.
    ///
    /// # Errors
    ///
    /// [`MemSpecError::Json`] if the document does not match the layout.
    pub fn from_json(json: &str) -> Result<Self, MemSpecError> {
        Ok(serde_json::from_str(json)?)
    }
}
