//! Wide I/O SDR (JESD229) timing model.
//!
//! Wide I/O is a single-data-rate mobile DRAM stacked on the SoC with a 128-bit channel.
//! Every rank forms a single bank group; only all-bank refresh exists.
//!
//! | Command   | Execution time      | Data strobe                  |
//! |-----------|---------------------|------------------------------|
//! | PRE, PREA | tRP                 | -                            |
//! | ACT       | tRCD                | -                            |
//! | RD, RDA   | tRL + tAC + burst   | [tRL + tAC, tRL + tAC + burst) |
//! | WR, WRA   | tWL + burst         | [tWL, tWL + burst)           |
//! | REFA      | tRFC                | -                            |

use super::{MemSpec, MemSpecCommon};
use crate::command::Command;
use crate::common::{MemSpecError, SimTime, TimeInterval};
use crate::config::MemSpecDescriptor;
use crate::request::Request;

/// Currents (mA) and voltages (V) of a Wide I/O device.
///
/// Suffix `2` denotes the second supply domain. Not used for timing; retained for power
/// estimation downstream.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq)]
pub struct WideIoPower {
    pub idd0: f64,
    pub idd2n: f64,
    pub idd3n: f64,
    pub idd4r: f64,
    pub idd4w: f64,
    pub idd5: f64,
    pub idd6: f64,
    pub vdd: f64,
    pub idd02: f64,
    pub idd2p0: f64,
    pub idd2p02: f64,
    pub idd2p1: f64,
    pub idd2p12: f64,
    pub idd2n2: f64,
    pub idd3p0: f64,
    pub idd3p02: f64,
    pub idd3p1: f64,
    pub idd3p12: f64,
    pub idd3n2: f64,
    pub idd4r2: f64,
    pub idd4w2: f64,
    pub idd52: f64,
    pub idd62: f64,
    pub vdd2: f64,
}

impl WideIoPower {
    fn new(descriptor: &MemSpecDescriptor) -> Result<Self, MemSpecError> {
        Ok(Self {
            idd0: descriptor.power("idd0")?,
            idd2n: descriptor.power("idd2n")?,
            idd3n: descriptor.power("idd3n")?,
            idd4r: descriptor.power("idd4r")?,
            idd4w: descriptor.power("idd4w")?,
            idd5: descriptor.power("idd5")?,
            idd6: descriptor.power("idd6")?,
            vdd: descriptor.power("vdd")?,
            idd02: descriptor.power("idd02")?,
            idd2p0: descriptor.power("idd2p0")?,
            idd2p02: descriptor.power("idd2p02")?,
            idd2p1: descriptor.power("idd2p1")?,
            idd2p12: descriptor.power("idd2p12")?,
            idd2n2: descriptor.power("idd2n2")?,
            idd3p0: descriptor.power("idd3p0")?,
            idd3p02: descriptor.power("idd3p02")?,
            idd3p1: descriptor.power("idd3p1")?,
            idd3p12: descriptor.power("idd3p12")?,
            idd3n2: descriptor.power("idd3n2")?,
            idd4r2: descriptor.power("idd4r2")?,
            idd4w2: descriptor.power("idd4w2")?,
            idd52: descriptor.power("idd52")?,
            idd62: descriptor.power("idd62")?,
            vdd2: descriptor.power("vdd2")?,
        })
    }
}

/// Wide I/O SDR timing model.
#[derive(Debug, Clone, PartialEq)]
pub struct MemSpecWideIo {
    common: MemSpecCommon,

    /// Minimum CKE pulse width.
    pub t_cke: SimTime,
    /// Minimum CKE low time in self-refresh.
    pub t_ckesr: SimTime,
    /// Activate to precharge.
    pub t_ras: SimTime,
    /// Activate to activate, same bank.
    pub t_rc: SimTime,
    /// Activate to column command.
    pub t_rcd: SimTime,
    /// Read latency.
    pub t_rl: SimTime,
    /// Write latency.
    pub t_wl: SimTime,
    /// Write recovery.
    pub t_wr: SimTime,
    /// Power-down exit.
    pub t_xp: SimTime,
    /// Self-refresh exit.
    pub t_xsr: SimTime,
    /// Average refresh interval.
    pub t_refi: SimTime,
    /// Refresh cycle time.
    pub t_rfc: SimTime,
    /// Precharge period.
    pub t_rp: SimTime,
    /// DQS output access time from CK.
    pub t_dqsck: SimTime,
    /// Data access time from CK.
    pub t_ac: SimTime,
    /// Read to read, column-to-column delay.
    pub t_ccd_r: SimTime,
    /// Write to write, column-to-column delay.
    pub t_ccd_w: SimTime,
    /// Activate to activate, different banks.
    pub t_rrd: SimTime,
    /// Four-activate window.
    pub t_taw: SimTime,
    /// Write to read turnaround.
    pub t_wtr: SimTime,
    /// Rank-to-rank switch.
    pub t_rtrs: SimTime,

    /// Power figures, when the descriptor carries a `mempowerspec`.
    pub power: Option<WideIoPower>,

    read_strobe: TimeInterval,
    write_strobe: TimeInterval,
}

impl MemSpecWideIo {
    /// Builds the model from a Wide I/O descriptor.
    ///
    /// # Errors
    ///
    /// [`MemSpecError::MissingTiming`] or [`MemSpecError::MissingPower`] for absent
    /// parameters; [`MemSpecError::InvalidParameter`] for an invalid organization.
    pub fn new(descriptor: &MemSpecDescriptor) -> Result<Self, MemSpecError> {
        let common = MemSpecCommon::new(descriptor, 1)?;
        let timing = &descriptor.memtimingspec;
        let power = if descriptor.has_power_spec() {
            Some(WideIoPower::new(descriptor)?)
        } else {
            None
        };

        let t_rl = common.timing(timing, "RL")?;
        let t_ac = common.timing(timing, "AC")?;
        let t_wl = common.timing(timing, "WL")?;
        let burst = common.burst_duration();
        let read_start = MemSpecCommon::checked_sum("RL", &[t_rl, t_ac])?;
        let read_strobe = TimeInterval::new(read_start, MemSpecCommon::checked_sum("RL", &[read_start, burst])?);
        let write_strobe = TimeInterval::new(t_wl, MemSpecCommon::checked_sum("WL", &[t_wl, burst])?);

        Ok(Self {
            t_cke: common.timing(timing, "CKE")?,
            t_ckesr: common.timing(timing, "CKESR")?,
            t_ras: common.timing(timing, "RAS")?,
            t_rc: common.timing(timing, "RC")?,
            t_rcd: common.timing(timing, "RCD")?,
            t_rl,
            t_wl,
            t_wr: common.timing(timing, "WR")?,
            t_xp: common.timing(timing, "XP")?,
            t_xsr: common.timing(timing, "XSR")?,
            t_refi: common.timing(timing, "REFI")?,
            t_rfc: common.timing(timing, "RFC")?,
            t_rp: common.timing(timing, "RP")?,
            t_dqsck: common.timing(timing, "DQSCK")?,
            t_ac,
            t_ccd_r: common.timing(timing, "CCD_R")?,
            t_ccd_w: common.timing(timing, "CCD_W")?,
            t_rrd: common.timing(timing, "RRD")?,
            t_taw: common.timing(timing, "TAW")?,
            t_wtr: common.timing(timing, "WTR")?,
            t_rtrs: common.timing(timing, "RTRS")?,
            power,
            read_strobe,
            write_strobe,
            common,
        })
    }
}

impl MemSpec for MemSpecWideIo {
    fn common(&self) -> &MemSpecCommon {
        &self.common
    }

    fn execution_time(&self, command: Command, _request: &Request) -> Result<SimTime, MemSpecError> {
        match command {
            Command::Precharge | Command::PrechargeAll => Ok(self.t_rp),
            Command::Activate => Ok(self.t_rcd),
            Command::Read | Command::ReadAutoPrecharge => Ok(self.read_strobe.end),
            Command::Write | Command::WriteAutoPrecharge => Ok(self.write_strobe.end),
            Command::RefreshAll => Ok(self.t_rfc),
            other => Err(self.common.no_execution_time(other)),
        }
    }

    fn interval_on_data_strobe(&self, command: Command) -> Result<TimeInterval, MemSpecError> {
        if command.is_read() {
            Ok(self.read_strobe)
        } else if command.is_write() {
            Ok(self.write_strobe)
        } else {
            Err(self.common.no_data_strobe(command))
        }
    }

    fn refresh_interval_all_bank(&self) -> Option<SimTime> {
        Some(self.t_refi)
    }
}
