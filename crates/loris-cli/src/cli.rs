//! CLI argument definitions: top-level `Cli` struct and `Commands` enum.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "loris")]
#[command(about = "Diagnosability analysis of partially-observed discrete-event systems")]
#[command(version)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Analyse a plant file and report the diagnosability verdict
    #[command(display_order = 10)]
    Diagnose {
        /// Path to the plant file
        file: PathBuf,

        /// Only compute the verdict, keeping at most one witness cycle
        #[arg(long)]
        verdict_only: bool,

        /// Print a DOT graph for each analysed cycle
        #[arg(long)]
        show_cycles: bool,

        /// Output format: text | json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Print an intermediate construction of the pipeline
    #[command(display_order = 20)]
    Show {
        /// Path to the plant file
        file: PathBuf,

        /// Stage to print: plant | recognizer | observer
        #[arg(long, default_value = "observer")]
        stage: String,

        /// Emit the observer as a DOT graph instead of tables
        #[arg(long)]
        dot: bool,
    },
}
