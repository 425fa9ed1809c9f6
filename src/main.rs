//! APR Simulator CLI
//!
//! Applies `key=value` overrides to the default parameter set, runs the
//! model once, and prints the report.

use std::io;

use clap::Parser;

use bnpl_apr_sim::{model, report, SimulationParams};

/// Simulate LP APR and the annual revenue split for the BNPL protocol
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Parameter overrides of the form key=value, e.g. utilization_ratio=0.9
    overrides: Vec<String>,

    /// Emit the report as pretty-printed JSON instead of text
    #[arg(long)]
    json: bool,

    /// Reject out-of-range rates and distributions that do not sum to 1.0
    #[arg(long)]
    strict: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let mut params = SimulationParams::default();
    params.apply_overrides(&cli.overrides)?;

    if cli.strict {
        params.validate_strict()?;
    }

    let result = model::simulate(&params)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        let stdout = io::stdout();
        report::render(&mut stdout.lock(), &result)?;
    }

    Ok(())
}
