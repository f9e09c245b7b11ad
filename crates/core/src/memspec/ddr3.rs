//! DDR3 SDRAM (JESD79-3) timing model.
//!
//! Double data rate, eight banks per rank without bank groups, all-bank refresh only.
//! Read latency `RL` is expected to already include the additive latency `AL`.

use super::{MemSpec, MemSpecCommon};
use crate::command::Command;
use crate::common::{MemSpecError, SimTime, TimeInterval};
use crate::config::MemSpecDescriptor;
use crate::request::Request;

/// Currents (mA) and supply voltage (V) of a DDR3 device, kept for power estimation.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq)]
pub struct Ddr3Power {
    pub idd0: f64,
    pub idd2n: f64,
    pub idd3n: f64,
    pub idd4r: f64,
    pub idd4w: f64,
    pub idd5: f64,
    pub idd6: f64,
    pub vdd: f64,
}

/// DDR3 timing model.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq)]
pub struct MemSpecDdr3 {
    common: MemSpecCommon,

    pub t_cke: SimTime,
    pub t_pd: SimTime,
    pub t_ckesr: SimTime,
    pub t_dqsck: SimTime,
    pub t_ras: SimTime,
    pub t_rc: SimTime,
    pub t_rcd: SimTime,
    pub t_rl: SimTime,
    pub t_rtp: SimTime,
    pub t_wl: SimTime,
    pub t_wr: SimTime,
    pub t_xp: SimTime,
    pub t_xs: SimTime,
    pub t_refi: SimTime,
    pub t_rfc: SimTime,
    pub t_rp: SimTime,
    pub t_dqss: SimTime,
    pub t_ccd: SimTime,
    pub t_faw: SimTime,
    pub t_rrd: SimTime,
    pub t_wtr: SimTime,
    pub t_xpdll: SimTime,
    pub t_xsdll: SimTime,
    pub t_al: SimTime,
    pub t_actpden: SimTime,
    pub t_prpden: SimTime,
    pub t_refpden: SimTime,
    pub t_rtrs: SimTime,

    /// Power figures, when the descriptor carries a `mempowerspec`.
    pub power: Option<Ddr3Power>,

    read_strobe: TimeInterval,
    write_strobe: TimeInterval,
}

impl MemSpecDdr3 {
    /// Builds the model from a DDR3 descriptor.
    ///
    /// # Errors
    ///
    /// [`MemSpecError::MissingTiming`] or [`MemSpecError::MissingPower`] for absent
    /// parameters; [`MemSpecError::InvalidParameter`] for an invalid organization.
    pub fn new(descriptor: &MemSpecDescriptor) -> Result<Self, MemSpecError> {
        let common = MemSpecCommon::new(descriptor, 1)?;
        let timing = &descriptor.memtimingspec;
        let power = if descriptor.has_power_spec() {
            Some(Ddr3Power {
                idd0: descriptor.power("idd0")?,
                idd2n: descriptor.power("idd2n")?,
                idd3n: descriptor.power("idd3n")?,
                idd4r: descriptor.power("idd4r")?,
                idd4w: descriptor.power("idd4w")?,
                idd5: descriptor.power("idd5")?,
                idd6: descriptor.power("idd6")?,
                vdd: descriptor.power("vdd")?,
            })
        } else {
            None
        };

        let t_rl = common.timing(timing, "RL")?;
        let t_wl = common.timing(timing, "WL")?;
        let burst = common.burst_duration();
        let read_strobe = TimeInterval::new(t_rl, MemSpecCommon::checked_sum("RL", &[t_rl, burst])?);
        let write_strobe = TimeInterval::new(t_wl, MemSpecCommon::checked_sum("WL", &[t_wl, burst])?);

        Ok(Self {
            t_cke: common.timing(timing, "CKE")?,
            t_pd: common.timing(timing, "PD")?,
            t_ckesr: common.timing(timing, "CKESR")?,
            t_dqsck: common.timing(timing, "DQSCK")?,
            t_ras: common.timing(timing, "RAS")?,
            t_rc: common.timing(timing, "RC")?,
            t_rcd: common.timing(timing, "RCD")?,
            t_rl,
            t_rtp: common.timing(timing, "RTP")?,
            t_wl,
            t_wr: common.timing(timing, "WR")?,
            t_xp: common.timing(timing, "XP")?,
            t_xs: common.timing(timing, "XS")?,
            t_refi: common.timing(timing, "REFI")?,
            t_rfc: common.timing(timing, "RFC")?,
            t_rp: common.timing(timing, "RP")?,
            t_dqss: common.timing(timing, "DQSS")?,
            t_ccd: common.timing(timing, "CCD")?,
            t_faw: common.timing(timing, "FAW")?,
            t_rrd: common.timing(timing, "RRD")?,
            t_wtr: common.timing(timing, "WTR")?,
            t_xpdll: common.timing(timing, "XPDLL")?,
            t_xsdll: common.timing(timing, "XSDLL")?,
            t_al: common.timing(timing, "AL")?,
            t_actpden: common.timing(timing, "ACTPDEN")?,
            t_prpden: common.timing(timing, "PRPDEN")?,
            t_refpden: common.timing(timing, "REFPDEN")?,
            t_rtrs: common.timing(timing, "RTRS")?,
            power,
            read_strobe,
            write_strobe,
            common,
        })
    }
}

impl MemSpec for MemSpecDdr3 {
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
