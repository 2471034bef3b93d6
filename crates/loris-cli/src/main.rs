//! The `loris` binary: diagnosability analysis of partially-observed
//! discrete-event systems.

mod cli;
mod commands;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use commands::{parse_output_format, parse_stage};

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Diagnose {
            file,
            verdict_only,
            show_cycles,
            format,
        } => {
            let format = parse_output_format(&format);
            commands::diagnose::run_diagnose_command(&file, verdict_only, show_cycles, format)
        }
        Commands::Show { file, stage, dot } => {
            commands::show::run_show_command(&file, parse_stage(&stage), dot)
        }
    }
}
