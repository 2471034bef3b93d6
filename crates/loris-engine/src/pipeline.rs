use miette::Diagnostic;
use std::path::Path;
use thiserror::Error;
use tracing::info;

use loris_ir::automaton::{Automaton, ModelError};
use loris_ir::reader::{self, ParseError};
use loris_ir::recognizer::Recognizer;

use crate::cycles::{self, ReportMode};
use crate::observer::Observer;
use crate::result::{DiagnosisReport, StageSummary};
use crate::visualization::verdict_line;

/// A failure before the analysis proper: the pipeline never starts on
/// malformed input.
#[derive(Debug, Error, Diagnostic)]
pub enum PipelineError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    #[diagnostic(transparent)]
    Model(#[from] ModelError),
}

/// Options for the diagnosability pipeline.
#[derive(Debug, Clone, Default)]
pub struct PipelineOptions {
    pub report: ReportMode,
}

/// Read a plant file and analyse it.
pub fn run_file(
    path: impl AsRef<Path>,
    options: &PipelineOptions,
) -> Result<DiagnosisReport, PipelineError> {
    let path = path.as_ref();
    let plant = reader::read_file(path)?;
    Ok(run_plant(&plant, &path.display().to_string(), options))
}

/// Parse a plant description and analyse it.
pub fn run_source(
    source: &str,
    filename: &str,
    options: &PipelineOptions,
) -> Result<DiagnosisReport, PipelineError> {
    let plant = reader::parse_source(source, filename)?;
    Ok(run_plant(&plant, filename, options))
}

/// The analysis pipeline on an already-constructed plant:
/// recogniser product, observer subset construction, labelling, and
/// uncertain-cycle analysis. Each stage consumes the previous one's
/// immutable output.
pub fn run_plant(plant: &Automaton, filename: &str, options: &PipelineOptions) -> DiagnosisReport {
    let alphabet = plant.alphabet();
    info!(states = plant.num_states(), "building fault recogniser");
    let rec = Recognizer::build(plant);

    info!(compound_states = rec.num_states(), "building observer");
    let obs = Observer::build(&rec, alphabet);

    let uncertain = obs.uncertain_states().count();
    info!(
        macro_states = obs.num_macro_states(),
        uncertain, "analysing uncertain cycles"
    );
    let analysis = cycles::analyze(&obs, &rec, alphabet, options.report);

    let verdict = verdict_line(analysis.diagnosable, analysis.has_uncertain_cycle).to_string();
    info!(
        diagnosable = analysis.diagnosable,
        cycles = analysis.examined_cycles,
        "analysis finished"
    );
    DiagnosisReport {
        filename: filename.to_string(),
        diagnosable: analysis.diagnosable,
        verdict,
        summary: StageSummary {
            plant_states: plant.num_states(),
            observable_events: alphabet.observable_events().count(),
            unobservable_events: alphabet.unobservable_events().count(),
            fault_events: alphabet.fault_events().count(),
            recognizer_states: rec.num_states(),
            recognizer_transitions: rec.transitions().len(),
            observer_states: obs.num_macro_states(),
            observer_transitions: obs.transitions().len(),
            uncertain_states: uncertain,
        },
        examined_cycles: analysis.examined_cycles,
        cycles: analysis.cycles,
    }
}
