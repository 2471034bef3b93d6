// Command handler for: Diagnose

use miette::IntoDiagnostic;
use std::path::Path;

use loris_engine::cycles::ReportMode;
use loris_engine::pipeline::{run_file, PipelineOptions};
use loris_engine::visualization::{cycle_dot, render_report};

use super::OutputFormat;

pub(crate) fn run_diagnose_command(
    file: &Path,
    verdict_only: bool,
    show_cycles: bool,
    format: OutputFormat,
) -> miette::Result<()> {
    let options = PipelineOptions {
        report: if verdict_only {
            ReportMode::VerdictOnly
        } else {
            ReportMode::Full
        },
    };
    let report = run_file(file, &options)?;
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report).into_diagnostic()?);
        }
        OutputFormat::Text => {
            print!("{}", render_report(&report));
            if show_cycles {
                for cycle in &report.cycles {
                    print!("{}", cycle_dot(cycle));
                }
            }
        }
    }
    Ok(())
}
