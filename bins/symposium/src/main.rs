mod cli;
mod reporter;

use anyhow::Context;
use clap::Parser;
use clap::error::ErrorKind;
use std::io::IsTerminal;
use std::process::ExitCode;
use std::time::Duration;
use symposium_config::{FileConfig, SimulationConfig};
use symposium_engine::Simulation;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::cli::Args;
use crate::reporter::{Reporter, summary_table};

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(1);
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(1)
        }
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let file = match &args.config {
        Some(path) => FileConfig::load(path.as_str())
            .with_context(|| format!("loading config file {path}"))?,
        None => FileConfig::default(),
    };
    init_tracing(&file.log_level);

    let mut builder = file
        .apply(SimulationConfig::builder(args.philosophers))
        .duration(Duration::from_secs(args.duration));
    if args.seed.is_some() {
        builder = builder.seed(args.seed);
    }
    let config = builder.build().context("invalid simulation parameters")?;

    let sim = Simulation::new(config);
    let summary = if args.quiet {
        sim.run()
    } else {
        let stdout = std::io::stdout();
        let color = stdout.is_terminal();
        let mut reporter = Reporter::new(stdout.lock(), color);
        let mut failed = false;
        sim.run_with(|snap| {
            if let Err(e) = reporter.render(snap) {
                if !failed {
                    warn!(error = %e, "status output failed");
                    failed = true;
                }
            }
        })
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", summary_table(&summary));
    }
    Ok(())
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
