//! memctl command-line front end.
//!
//! This binary inspects the inputs of a memory controller simulation. It performs:
//! 1. **Memspec report:** Load a memory specification and print its organization along with
//!    the command length, execution time, and data-strobe window of every command.
//! 2. **Config check:** Validate a simulation configuration and build its scheduler.

use std::error::Error;
use std::{fs, process};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use memctl_core::command::Command;
use memctl_core::common::{Bank, Column, DecodedAddress, Row};
use memctl_core::config::SimulationConfig;
use memctl_core::memspec::{self, MemSpec};
use memctl_core::request::{Direction, Request, RequestId};
use memctl_core::scheduler::build_scheduler;

#[derive(Parser, Debug)]
#[command(
    name = "memctl",
    author,
    version,
    about = "DRAM command scheduling engine",
    long_about = "Inspect memory specifications and controller configurations.\n\nExamples:\n  memctl memspec configs/memspec/wideio.json\n  memctl config configs/simulation/wideio_frfcfs.json\n\nSet RUST_LOG=debug for construction details."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the organization and per-command timing of a memspec.
    Memspec {
        /// Memspec JSON file.
        path: String,
    },

    /// Validate a simulation configuration and build its scheduler.
    Config {
        /// Simulation configuration JSON file (`memspec` + `mcconfig`).
        path: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Memspec { path } => cmd_memspec(&path),
        Commands::Config { path } => cmd_config(&path),
    };

    if let Err(e) = result {
        eprintln!("[!] {e}");
        process::exit(1);
    }
}

/// Loads a memspec and prints its organization and command table.
fn cmd_memspec(path: &str) -> Result<(), Box<dyn Error>> {
    let json = fs::read_to_string(path).map_err(|e| format!("cannot read {path}: {e}"))?;
    let memspec = memspec::from_json(&json)?;
    print_organization(memspec.as_ref());
    println!();
    print_command_table(memspec.as_ref());
    Ok(())
}

/// Validates a simulation configuration and reports the scheduler it builds.
fn cmd_config(path: &str) -> Result<(), Box<dyn Error>> {
    let json = fs::read_to_string(path).map_err(|e| format!("cannot read {path}: {e}"))?;
    let config = SimulationConfig::from_json(&json)?;
    let memspec = memspec::from_descriptor(&config.memspec)?;
    let scheduler = build_scheduler(&config.mcconfig, memspec.as_ref());

    print_organization(memspec.as_ref());
    println!();
    println!("Controller");
    println!("  Scheduler:        {}", config.mcconfig.scheduler);
    println!("  Buffer:           {}", config.mcconfig.scheduler_buffer);
    println!("  Buffer size:      {}", config.mcconfig.request_buffer_size);
    println!("  Counters:         {}", scheduler.buffer_depth().len());
    println!(
        "  Accepts requests: {}",
        if scheduler.has_buffer_space() { "yes" } else { "no" }
    );
    Ok(())
}

fn print_organization(memspec: &dyn MemSpec) {
    let common = memspec.common();
    println!("{} ({})", common.memory_id, common.memory_type);
    println!("  Clock:            {} MHz (tCK {})", common.f_ck_mhz, common.t_ck);
    println!("  Channels:         {}", common.number_of_channels);
    println!("  Ranks:            {}", common.number_of_ranks);
    println!(
        "  Banks:            {} per rank, {} per channel",
        common.banks_per_rank, common.number_of_banks
    );
    println!("  Bank groups:      {} per rank", common.groups_per_rank);
    println!(
        "  Rows x columns:   {} x {}",
        common.number_of_rows, common.number_of_columns
    );
    println!(
        "  Burst:            BL{} x{} ({} bytes, {})",
        common.burst_length,
        common.data_bus_width,
        common.bytes_per_burst,
        common.burst_duration()
    );
    println!(
        "  Capacity:         {} MiB",
        memspec.total_memory_size_bytes() / (1024 * 1024)
    );
    match memspec.refresh_interval_all_bank() {
        Some(t_refi) => println!("  tREFI:            {t_refi}"),
        None => println!("  tREFI:            -"),
    }
}

fn print_command_table(memspec: &dyn MemSpec) {
    let probe = Request::new(
        RequestId(0),
        DecodedAddress::new(Bank::new(0), Row::new(0), Column::new(0)),
        Direction::Read,
    );

    println!("{:<8} {:>12} {:>14} {:>26}", "Command", "Length", "Execution", "Data strobe");
    for command in Command::ALL {
        let execution = memspec
            .execution_time(command, &probe)
            .map_or_else(|_| "-".to_owned(), |t| t.to_string());
        let strobe = memspec
            .interval_on_data_strobe(command)
            .map_or_else(|_| "-".to_owned(), |i| i.to_string());
        println!(
            "{:<8} {:>12} {:>14} {:>26}",
            command.mnemonic(),
            memspec.command_length(command).to_string(),
            execution,
            strobe
        );
    }
}
