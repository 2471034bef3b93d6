use serde::Serialize;

use crate::labeling::DiagnosisLabel;

/// One α/β step of a refined cycle.
///
/// `alpha` is the one-step image under the event without unobservable
/// closure; `beta` is its closure. Both carry compound-state ids for
/// programmatic use and the rendered member list for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RefinementStep {
    pub event: String,
    pub alpha: Vec<usize>,
    pub alpha_display: String,
    pub alpha_label: DiagnosisLabel,
    pub beta: Vec<usize>,
    pub beta_display: String,
    pub beta_label: DiagnosisLabel,
}

/// The refinement report of one simple cycle of uncertain macro-states.
#[derive(Debug, Clone, Serialize)]
pub struct CycleReport {
    /// Macro-state ids in cycle order, starting at the smallest id.
    pub macro_states: Vec<usize>,
    /// Event word along the cycle, one symbol per edge.
    pub events: Vec<String>,
    /// Members of the entry macro-state.
    pub entry: Vec<usize>,
    pub entry_display: String,
    pub entry_label: DiagnosisLabel,
    /// The recorded α/β trace; may span several laps of the word when
    /// closure is not witnessed on the first lap.
    pub steps: Vec<RefinementStep>,
    /// Whether the refined expansion admits both a fault-free and a
    /// fault-bearing run, keeping the ambiguity alive forever.
    pub indeterminate: bool,
}

/// Sizes of the intermediate structures, for the report header.
#[derive(Debug, Clone, Serialize)]
pub struct StageSummary {
    pub plant_states: usize,
    pub observable_events: usize,
    pub unobservable_events: usize,
    pub fault_events: usize,
    pub recognizer_states: usize,
    pub recognizer_transitions: usize,
    pub observer_states: usize,
    pub observer_transitions: usize,
    pub uncertain_states: usize,
}

/// The complete outcome of a diagnosability analysis.
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosisReport {
    pub filename: String,
    pub diagnosable: bool,
    /// The exact verdict line of the display contract.
    pub verdict: String,
    pub summary: StageSummary,
    /// Number of uncertain cycles examined. In verdict-only mode the
    /// count stops at the first indeterminate cycle.
    pub examined_cycles: usize,
    /// Per-cycle refinement reports, in deterministic order. In
    /// verdict-only mode only an indeterminate witness is kept.
    pub cycles: Vec<CycleReport>,
}

impl DiagnosisReport {
    /// The indeterminate cycles among the reported ones.
    pub fn indeterminate_cycles(&self) -> impl Iterator<Item = &CycleReport> {
        self.cycles.iter().filter(|c| c.indeterminate)
    }
}
