// Bank Teller Simulator - Main Entry Point
//
// You can run it via Cargo:
//
// ```console
// $ cargo build --release
// $ ./target/release/bank-teller-sim customers.txt --tellers 2
// ```
//
// Or with a generated workload and a summary:
//
// ```console
// $ ./target/release/bank-teller-sim --generate 50 --seed 7 --tellers 3 --summary --verbose
// ```

use anyhow::{bail, Context};
use bank_teller_sim::report::write_report;
use bank_teller_sim::simulation::{Coordinator, LoggingConfig, SimulationStatistics};
use bank_teller_sim::types::config::CliArgs;
use bank_teller_sim::types::SimulationConfig;
use bank_teller_sim::workload::{load_customers, CustomerRecord, WorkloadGenerator};
use clap::Parser;
use std::io::{self, Write};
use std::process::ExitCode;
use std::time::Instant;
use tracing::{error, info};

fn main() -> ExitCode {
    // Parse CLI arguments first to check for special flags
    let args = CliArgs::parse();

    if args.print_config {
        return match SimulationConfig::default().print_json() {
            Ok(json) => {
                println!("{}", json);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Failed to serialize default configuration: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    let _logging = match LoggingConfig::from_cli_args(&args).init() {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: CliArgs) -> anyhow::Result<()> {
    info!("Starting Bank Teller Simulator");

    let dry_run = args.dry_run;
    let config =
        SimulationConfig::from_cli_args(args).context("Failed to load configuration")?;
    config.validate().context("Configuration validation failed")?;
    info!("Configuration loaded and validated successfully");

    if dry_run {
        eprintln!("Configuration validation successful!");
        eprintln!("Dry run mode - simulation will not be executed.");
        print_configuration_summary(&config);
        return Ok(());
    }

    let records = load_workload(&config)?;
    let coordinator = Coordinator::from_config(&config, &records)?;

    let wall_clock = Instant::now();
    let report = coordinator.run().context("Simulation failed")?;
    let elapsed = wall_clock.elapsed();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(&report, config.output_format, &mut out)?;
    out.flush().context("Failed to flush report")?;

    let mut stats = SimulationStatistics::from_report(&report);
    stats.set_simulation_duration(elapsed);
    info!("Bank Teller Simulator completed: {}", stats.generate_compact_summary());

    if config.summary {
        eprintln!();
        eprint!("{}", stats.generate_summary_report());
    }

    Ok(())
}

/// Read the customer file or generate a random workload
fn load_workload(config: &SimulationConfig) -> anyhow::Result<Vec<CustomerRecord>> {
    match (&config.input, config.generate) {
        (Some(path), _) => {
            load_customers(path).with_context(|| format!("Failed to load workload from {}", path))
        }
        (None, Some(count)) => Ok(WorkloadGenerator::from_seed(config.seed).generate(
            count,
            config.max_arrival,
            config.max_duration,
        )?),
        (None, None) => bail!("no workload: pass an input file or --generate"),
    }
}

fn print_configuration_summary(config: &SimulationConfig) {
    eprintln!("\nConfiguration Summary:");
    eprintln!("  Tellers: {}", config.teller_count);
    eprintln!("  Execution Mode: {}", config.execution_mode);
    eprintln!("  Output Format: {}", config.output_format);
    match config.max_ticks {
        Some(limit) => eprintln!("  Tick Limit: {}", limit),
        None => eprintln!("  Tick Limit: none"),
    }
    match (&config.input, config.generate) {
        (Some(path), _) => eprintln!("  Workload: {}", path),
        (None, Some(count)) => eprintln!(
            "  Workload: {} generated customers (arrivals 0..={}, durations 1..={}, seed {})",
            count,
            config.max_arrival,
            config.max_duration,
            config.seed.map_or_else(|| "random".to_string(), |seed| seed.to_string())
        ),
        (None, None) => eprintln!("  Workload: none"),
    }
    eprintln!("  Summary: {}", if config.summary { "enabled" } else { "disabled" });
}
