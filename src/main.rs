//! Stressmon CLI Entry Point
//!
//! Runs the built-in synthetic stress load under supervision, with
//! progress telemetry on standard output. Log output goes to standard
//! error, so the telemetry lines stay machine-readable.
//!
//! # Usage
//!
//! ```bash
//! # Run with defaults (10s at 10 units/sec, sampled every second)
//! stressmon
//!
//! # Load settings from a YAML file
//! stressmon run.yaml
//!
//! # Override on the command line
//! stressmon --duration 60 --rate 100
//!
//! # Slower sampling
//! stressmon --duration 60 --interval 5
//! ```

use std::env;
use std::process::ExitCode;

use log::{error, info};

use stressmon::config::HarnessConfig;
use stressmon::execution::Supervisor;
use stressmon::monitoring::shared_stdout;
use stressmon::workload::SyntheticLoad;
use stressmon::{APP_NAME, VERSION};

/// Command-line configuration parsed from arguments.
#[derive(Debug, Default)]
struct CliArgs {
    config_path: Option<String>,
    duration_secs: Option<u64>,
    units_per_sec: Option<u64>,
    sample_interval_secs: Option<u64>,
    verbose: bool,
}

/// Configures the logging system with appropriate formatting.
fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format(|buf, record| {
            use std::io::Write;

            match record.level() {
                log::Level::Warn | log::Level::Error => {
                    writeln!(buf, "[{}] {}", record.level(), record.args())
                }
                _ => writeln!(buf, "{}", record.args()),
            }
        })
        .init();
}

/// Prints the application banner with version information.
fn print_banner() {
    eprintln!();
    eprintln!("{} v{}", APP_NAME, VERSION);
    eprintln!("Stress Workload Harness");
    eprintln!();
}

/// Prints usage information.
fn print_usage() {
    println!("Usage: stressmon [OPTIONS] [CONFIG_FILE]");
    println!();
    println!("Arguments:");
    println!("  [CONFIG_FILE]       Optional path to a run config YAML file");
    println!();
    println!("Options:");
    println!("  --duration N        Run length in seconds");
    println!("  --rate N            Work units per second");
    println!("  --interval N        Seconds between progress samples");
    println!("  --verbose           Enable debug logging");
    println!("  --help              Show this help message");
    println!("  --version           Show version information");
    println!();
    println!("Examples:");
    println!("  stressmon");
    println!("  stressmon run.yaml");
    println!("  stressmon --duration 60 --rate 100 --interval 5");
}

/// Parses a numeric option value, consuming it from the argument list.
fn parse_number(args: &[String], i: usize, flag: &str) -> Result<u64, String> {
    let value = args
        .get(i)
        .ok_or_else(|| format!("{} requires a number argument", flag))?;
    value
        .parse()
        .map_err(|_| format!("Invalid {} value: {}", flag, value))
}

/// Parses command-line arguments into a CliArgs struct.
fn parse_arguments(args: &[String]) -> Result<CliArgs, String> {
    let mut cli = CliArgs::default();
    let mut positional_index = 0;
    let mut i = 1; // Skip program name

    while i < args.len() {
        let arg = &args[i];

        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            "--version" | "-V" => {
                println!("{} {}", APP_NAME, VERSION);
                std::process::exit(0);
            }
            "--verbose" | "-v" => {
                cli.verbose = true;
            }
            "--duration" => {
                i += 1;
                cli.duration_secs = Some(parse_number(args, i, "--duration")?);
            }
            "--rate" => {
                i += 1;
                cli.units_per_sec = Some(parse_number(args, i, "--rate")?);
            }
            "--interval" => {
                i += 1;
                cli.sample_interval_secs = Some(parse_number(args, i, "--interval")?);
            }
            arg if arg.starts_with('-') => {
                return Err(format!("Unknown option: {}", arg));
            }
            _ => {
                // Positional argument
                match positional_index {
                    0 => cli.config_path = Some(arg.clone()),
                    _ => return Err(format!("Unexpected argument: {}", arg)),
                }
                positional_index += 1;
            }
        }
        i += 1;
    }

    Ok(cli)
}

/// Builds the effective run config: file values (or defaults) with
/// command-line overrides applied on top.
fn resolve_config(cli: &CliArgs) -> Result<HarnessConfig, Box<dyn std::error::Error>> {
    let mut config = match &cli.config_path {
        Some(path) => {
            info!("Loading config: {}", path);
            HarnessConfig::load(path)?
        }
        None => HarnessConfig::default(),
    };

    if let Some(secs) = cli.duration_secs {
        config.duration_secs = secs;
    }
    if let Some(rate) = cli.units_per_sec {
        config.units_per_sec = rate;
    }
    if let Some(secs) = cli.sample_interval_secs {
        config.sample_interval_secs = secs;
    }

    config.validate()?;
    Ok(config)
}

/// Main application entry point.
fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    // Parse arguments
    let cli = parse_arguments(&args).map_err(|e| {
        eprintln!("Error: {}", e);
        eprintln!();
        print_usage();
        e
    })?;

    // Setup logging
    setup_logging(cli.verbose);

    // Print banner
    print_banner();

    let config = resolve_config(&cli)?;

    info!(
        "Run plan: {}s at {} units/sec, sampling every {}s",
        config.duration_secs, config.units_per_sec, config.sample_interval_secs
    );

    // Create and configure the run
    let supervisor = Supervisor::new(shared_stdout()).with_interval(config.sample_interval());
    let load = SyntheticLoad::new(config.duration()).with_rate(config.units_per_sec);

    // Execute the workload under monitoring
    supervisor.run(load).map_err(|e| {
        error!("Run failed: {}", e);
        e
    })?;

    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!();
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
