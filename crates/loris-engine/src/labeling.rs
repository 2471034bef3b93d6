use serde::Serialize;
use std::fmt;

use loris_ir::monitor::MonitorState;
use loris_ir::recognizer::{CompoundId, Recognizer};

/// Diagnosis label of a set of compound states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DiagnosisLabel {
    /// Every member is fault-free.
    #[serde(rename = "N")]
    Normal,
    /// Every member has seen a fault.
    #[serde(rename = "F")]
    Faulty,
    /// The set mixes fault-free and faulty members.
    #[serde(rename = "U")]
    Uncertain,
}

impl DiagnosisLabel {
    pub fn letter(self) -> char {
        match self {
            DiagnosisLabel::Normal => 'N',
            DiagnosisLabel::Faulty => 'F',
            DiagnosisLabel::Uncertain => 'U',
        }
    }

    pub fn is_uncertain(self) -> bool {
        self == DiagnosisLabel::Uncertain
    }
}

impl fmt::Display for DiagnosisLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Label a non-empty set of compound states. Depends only on the
/// monitor flags of the members, not on their order.
pub fn label_of(rec: &Recognizer, members: &[CompoundId]) -> DiagnosisLabel {
    assert!(!members.is_empty(), "diagnosis label of an empty macro-state");
    let mut any_normal = false;
    let mut any_faulty = false;
    for &id in members {
        match rec.state(id).monitor {
            MonitorState::Normal => any_normal = true,
            MonitorState::Faulty => any_faulty = true,
        }
    }
    match (any_normal, any_faulty) {
        (true, false) => DiagnosisLabel::Normal,
        (false, true) => DiagnosisLabel::Faulty,
        _ => DiagnosisLabel::Uncertain,
    }
}
