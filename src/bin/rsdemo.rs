//! Reed-Solomon demo binary
//!
//! `rsdemo example` shows one encode/corrupt/decode cycle; `rsdemo stress`
//! runs randomized decode trials and fails if a correctable codeword is missed.

use anyhow::{Context, Result};
use fieldrs::demo::{self, DemoConfig, StressConfig};

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();

    let matches = fieldrs::parse_args();

    match matches.subcommand() {
        Some(("example", sub_matches)) => handle_example(sub_matches),
        Some(("stress", sub_matches)) => handle_stress(sub_matches),
        Some((cmd, _)) => {
            eprintln!("Unknown command: {}", cmd);
            std::process::exit(1);
        }
        None => {
            eprintln!("Error: No command specified");
            eprintln!("\nUse 'rsdemo --help' for usage information");
            std::process::exit(1);
        }
    }
}

fn handle_example(matches: &clap::ArgMatches) -> Result<()> {
    let config = DemoConfig::from_args(matches);
    let mut rng = config.rng();

    let report = demo::show_example(&config, &mut rng).with_context(|| {
        format!(
            "Failed to run example with modulus {:#x}, generator {:#x}",
            config.modulus, config.generator
        )
    })?;
    println!("{}", report);
    Ok(())
}

fn handle_stress(matches: &clap::ArgMatches) -> Result<()> {
    let config = DemoConfig::from_args(matches);
    let stress_config = StressConfig::from_args(matches);

    let reports = demo::stress(&config, &stress_config).context("Stress run failed")?;

    for report in &reports {
        println!("{}", report);
    }

    let total = reports
        .iter()
        .fold(demo::TrialStats::default(), |mut acc, report| {
            acc.success += report.stats.success;
            acc.wrong += report.stats.wrong;
            acc.failure += report.stats.failure;
            acc
        });
    println!(
        "{} rounds, {} trials: success={} wrong={} failure={}",
        reports.len(),
        total.total(),
        total.success,
        total.wrong,
        total.failure
    );
    Ok(())
}
