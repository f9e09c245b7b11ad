//! Configuration Parsing Unit Tests.
//!
//! Verifies `ControllerConfig` defaults and aliases, the memspec descriptor layout, and
//! the combined simulation configuration.

use memctl_core::common::MemSpecError;
use memctl_core::config::{
    ControllerConfig, MemSpecDescriptor, MemoryType, SchedulerBuffer, SchedulerPolicy, SimulationConfig,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::fixtures::{DDR3_JSON, NANOSECOND_WIDEIO_JSON, WIDEIO_JSON};

// ══════════════════════════════════════════════════════════
// 1. Controller config
// ══════════════════════════════════════════════════════════

#[test]
fn controller_config_defaults() {
    let config = ControllerConfig::default();
    assert_eq!(config.scheduler, SchedulerPolicy::FrFcfs);
    assert_eq!(config.scheduler_buffer, SchedulerBuffer::Bankwise);
    assert_eq!(config.request_buffer_size, 8);
}

#[test]
fn empty_controller_config_uses_defaults() {
    let config: ControllerConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, ControllerConfig::default());
}

#[rstest]
#[case("\"FrFcfs\"", SchedulerPolicy::FrFcfs)]
#[case("\"FR-FCFS\"", SchedulerPolicy::FrFcfs)]
#[case("\"FRFCFS\"", SchedulerPolicy::FrFcfs)]
#[case("\"Fifo\"", SchedulerPolicy::Fifo)]
fn scheduler_policy_names(#[case] json: &str, #[case] expected: SchedulerPolicy) {
    let policy: SchedulerPolicy = serde_json::from_str(json).unwrap();
    assert_eq!(policy, expected);
}

#[test]
fn unknown_buffer_policy_is_rejected() {
    let result: Result<ControllerConfig, _> = serde_json::from_str(r#"{"SchedulerBuffer": "PerRank"}"#);
    assert!(result.is_err());
}

#[test]
fn policy_display_names() {
    assert_eq!(SchedulerPolicy::FrFcfs.to_string(), "FR-FCFS");
    assert_eq!(SchedulerPolicy::Fifo.to_string(), "FIFO");
    assert_eq!(SchedulerBuffer::ReadWrite.to_string(), "read/write");
}

// ══════════════════════════════════════════════════════════
// 2. Memspec descriptor
// ══════════════════════════════════════════════════════════

#[test]
fn wideio_descriptor_fields() {
    let descriptor = MemSpecDescriptor::from_json(WIDEIO_JSON).unwrap();
    assert_eq!(descriptor.memory_id, "JEDEC_256Mb_WIDEIO_SDR-200_128bit");
    assert_eq!(descriptor.memory_type, MemoryType::WideIo);
    assert_eq!(descriptor.memarchitecturespec.channels, 4);
    assert_eq!(descriptor.memarchitecturespec.width, 128);
    assert_eq!(descriptor.memtimingspec.clk_mhz, 200.0);
    assert_eq!(descriptor.memtimingspec.cycles("REFI").unwrap(), 1560);
    assert!(descriptor.has_power_spec());
    assert_eq!(descriptor.power("vdd2").unwrap(), 1.2);
}

#[test]
fn architecture_defaults_apply() {
    let descriptor = MemSpecDescriptor::from_json(NANOSECOND_WIDEIO_JSON).unwrap();
    let arch = &descriptor.memarchitecturespec;
    assert_eq!(arch.channels, 1);
    assert_eq!(arch.bank_groups, 1);
    assert_eq!(arch.devices_on_dimm, 1);
    assert!(!descriptor.has_power_spec());
}

#[rstest]
#[case("WIDEIO_SDR", MemoryType::WideIo)]
#[case("WideIO", MemoryType::WideIo)]
#[case("DDR3", MemoryType::Ddr3)]
#[case("DDR4", MemoryType::Ddr4)]
#[case("HBM2", MemoryType::Hbm2)]
fn memory_type_names(#[case] name: &str, #[case] expected: MemoryType) {
    let parsed: MemoryType = serde_json::from_str(&format!("\"{name}\"")).unwrap();
    assert_eq!(parsed, expected);
}

#[test]
fn missing_timing_parameter_is_named() {
    let descriptor = MemSpecDescriptor::from_json(DDR3_JSON).unwrap();
    match descriptor.memtimingspec.cycles("tXYZ") {
        Err(MemSpecError::MissingTiming(name)) => assert_eq!(name, "tXYZ"),
        other => panic!("expected MissingTiming, got {other:?}"),
    }
}

#[test]
fn malformed_json_is_a_parse_error() {
    let result = MemSpecDescriptor::from_json("{ \"memoryType\": ");
    assert!(matches!(result, Err(MemSpecError::Json(_))));
}

// ══════════════════════════════════════════════════════════
// 3. Simulation config
// ══════════════════════════════════════════════════════════

#[test]
fn simulation_config_combines_memspec_and_controller() {
    let json = include_str!("../../../../configs/simulation/ddr3_fifo.json");
    let config = SimulationConfig::from_json(json).unwrap();
    assert_eq!(config.memspec.memory_type, MemoryType::Ddr3);
    assert_eq!(
        config.mcconfig,
        ControllerConfig {
            scheduler: SchedulerPolicy::Fifo,
            scheduler_buffer: SchedulerBuffer::ReadWrite,
            request_buffer_size: 16,
        }
    );
}

#[test]
fn simulation_config_without_mcconfig_uses_defaults() {
    let json = format!("{{ \"memspec\": {WIDEIO_JSON} }}");
    let config = SimulationConfig::from_json(&json).unwrap();
    assert_eq!(config.mcconfig, ControllerConfig::default());
}
