//! Rendering of the display contracts: compound states as `(q,N)` /
//! `(q,F)`, transition tables with `State1 Event State2` columns,
//! macro-states as member lists followed by their diagnosis label, the
//! verdict lines, and DOT export of the observer.

use std::fmt::Write as _;

use loris_ir::alphabet::AlphabetTable;
use loris_ir::recognizer::{CompoundId, CompoundState, Recognizer};

use crate::labeling::DiagnosisLabel;
use crate::observer::{MacroId, Observer};
use crate::result::{CycleReport, DiagnosisReport};

pub const DIAGNOSABLE_LINE: &str = "The system G is DIAGNOSABLE.";
pub const NOT_DIAGNOSABLE_LINE: &str = "The system G is NOT DIAGNOSABLE.";
pub const NO_UNCERTAIN_CYCLE_LINE: &str = "No uncertain cycle found, G is DIAGNOSABLE";

/// The verdict line for a finished analysis.
pub fn verdict_line(diagnosable: bool, has_uncertain_cycle: bool) -> &'static str {
    if !diagnosable {
        NOT_DIAGNOSABLE_LINE
    } else if !has_uncertain_cycle {
        NO_UNCERTAIN_CYCLE_LINE
    } else {
        DIAGNOSABLE_LINE
    }
}

/// `(q,N)` or `(q,F)`, with the 1-based plant state number.
pub fn render_compound(state: CompoundState) -> String {
    format!("({},{})", state.plant + 1, state.monitor)
}

/// Comma-separated member renderings of a compound set.
pub fn render_members(rec: &Recognizer, members: &[CompoundId]) -> String {
    members
        .iter()
        .map(|&id| render_compound(rec.state(id)))
        .collect::<Vec<_>>()
        .join(",")
}

/// Member list followed by the diagnosis label.
pub fn render_macro_state(rec: &Recognizer, obs: &Observer, id: MacroId) -> String {
    format!("{} : {}", render_members(rec, obs.members(id)), obs.label(id))
}

/// The recogniser as two tables: states and transitions.
pub fn render_recognizer_table(rec: &Recognizer, alphabet: &AlphabetTable) -> String {
    let mut out = String::new();
    out.push_str("Recogniser states:\n");
    for (id, &state) in rec.states().iter().enumerate() {
        let _ = writeln!(out, "  {}: {}", id + 1, render_compound(state));
    }
    out.push_str("Recogniser transitions:\n");
    let rows: Vec<_> = rec
        .transitions()
        .iter()
        .map(|&(src, event, dst)| {
            (
                render_compound(rec.state(src)),
                alphabet.symbol(event).to_string(),
                render_compound(rec.state(dst)),
            )
        })
        .collect();
    out.push_str(&transition_table(&rows));
    out
}

/// The observer as two tables: macro-states and transitions.
pub fn render_observer_table(obs: &Observer, rec: &Recognizer, alphabet: &AlphabetTable) -> String {
    let mut out = String::new();
    out.push_str("Observer macro-states:\n");
    for id in 0..obs.num_macro_states() {
        let _ = writeln!(out, "  Y{}: {}", id, render_macro_state(rec, obs, id));
    }
    out.push_str("Observer transitions:\n");
    let rows: Vec<_> = obs
        .transitions()
        .iter()
        .map(|&(src, event, dst)| {
            (
                format!("Y{src}"),
                alphabet.symbol(event).to_string(),
                format!("Y{dst}"),
            )
        })
        .collect();
    out.push_str(&transition_table(&rows));
    out
}

fn transition_table(rows: &[(String, String, String)]) -> String {
    let column = |header: &str, pick: fn(&(String, String, String)) -> &String| {
        rows.iter()
            .map(|row| pick(row).len())
            .chain([header.len()])
            .max()
            .unwrap_or(0)
    };
    let w0 = column("State1", |r| &r.0);
    let w1 = column("Event", |r| &r.1);
    let mut out = String::new();
    let _ = writeln!(out, "  {:<w0$}  {:<w1$}  {}", "State1", "Event", "State2");
    for (src, event, dst) in rows {
        let _ = writeln!(out, "  {src:<w0$}  {event:<w1$}  {dst}");
    }
    out
}

/// One cycle's refinement report.
pub fn render_cycle_report(report: &CycleReport, index: usize) -> String {
    let mut out = String::new();
    let mut path = String::new();
    for (y, event) in report.macro_states.iter().zip(&report.events) {
        let _ = write!(path, "Y{y} -{event}-> ");
    }
    let _ = write!(path, "Y{}", report.macro_states[0]);
    let _ = writeln!(out, "Uncertain cycle {}: {}", index + 1, path);
    let _ = writeln!(out, "  S0 = {} : {}", report.entry_display, report.entry_label);
    for (i, step) in report.steps.iter().enumerate() {
        let _ = writeln!(
            out,
            "  step {} ({}): alpha = {} : {} ; beta = {} : {}",
            i + 1,
            step.event,
            step.alpha_display,
            step.alpha_label,
            step.beta_display,
            step.beta_label,
        );
    }
    let _ = writeln!(
        out,
        "  cycle is {}",
        if report.indeterminate {
            "INDETERMINATE"
        } else {
            "determinate"
        }
    );
    out
}

/// The full human-readable analysis report, ending in the verdict line.
pub fn render_report(report: &DiagnosisReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Diagnosability analysis of {}", report.filename);
    let s = &report.summary;
    let _ = writeln!(
        out,
        "  plant: {} states, {} observable / {} unobservable / {} fault events",
        s.plant_states, s.observable_events, s.unobservable_events, s.fault_events,
    );
    let _ = writeln!(
        out,
        "  recogniser: {} states, {} transitions",
        s.recognizer_states, s.recognizer_transitions,
    );
    let _ = writeln!(
        out,
        "  observer: {} macro-states ({} uncertain), {} transitions",
        s.observer_states, s.uncertain_states, s.observer_transitions,
    );
    out.push('\n');
    for (i, cycle) in report.cycles.iter().enumerate() {
        out.push_str(&render_cycle_report(cycle, i));
        out.push('\n');
    }
    out.push_str(&report.verdict);
    out.push('\n');
    out
}

/// DOT export of the observer, uncertain macro-states highlighted.
pub fn observer_dot(obs: &Observer, rec: &Recognizer, alphabet: &AlphabetTable) -> String {
    let mut out = String::from("digraph observer {\n  rankdir=LR;\n  node [shape=box];\n");
    for id in 0..obs.num_macro_states() {
        let color = match obs.label(id) {
            DiagnosisLabel::Uncertain => " color=orange",
            DiagnosisLabel::Faulty => " color=red",
            DiagnosisLabel::Normal => "",
        };
        let _ = writeln!(
            out,
            "  Y{id} [label=\"Y{id}: {}\\n{}\"{color}];",
            dot_escape(&render_members(rec, obs.members(id))),
            obs.label(id),
        );
    }
    for &(src, event, dst) in obs.transitions() {
        let _ = writeln!(
            out,
            "  Y{src} -> Y{dst} [label=\"{}\"];",
            dot_escape(alphabet.symbol(event)),
        );
    }
    out.push_str("}\n");
    out
}

/// DOT export of one refined cycle.
pub fn cycle_dot(report: &CycleReport) -> String {
    let color = if report.indeterminate { "red" } else { "darkgreen" };
    let mut out = String::from("digraph cycle {\n  rankdir=LR;\n  node [shape=box];\n");
    for y in &report.macro_states {
        let _ = writeln!(out, "  Y{y} [color={color}];");
    }
    let k = report.macro_states.len();
    for (i, event) in report.events.iter().enumerate() {
        let _ = writeln!(
            out,
            "  Y{} -> Y{} [label=\"{}\"];",
            report.macro_states[i],
            report.macro_states[(i + 1) % k],
            dot_escape(event),
        );
    }
    out.push_str("}\n");
    out
}

fn dot_escape(input: &str) -> String {
    input.replace('\\', "\\\\").replace('"', "\\\"")
}
