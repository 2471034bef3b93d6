use std::fmt;

use crate::alphabet::{AlphabetTable, EventId};

/// State of the fault monitor: has any fault event occurred yet?
///
/// The on-the-wire display codes are 1 for `Normal` and 2 for `Faulty`;
/// they appear only in rendered output, never in the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MonitorState {
    Normal,
    Faulty,
}

impl MonitorState {
    /// Display code of the monitor state (1 = N, 2 = F).
    pub fn code(self) -> u8 {
        match self {
            MonitorState::Normal => 1,
            MonitorState::Faulty => 2,
        }
    }

    pub fn letter(self) -> char {
        match self {
            MonitorState::Normal => 'N',
            MonitorState::Faulty => 'F',
        }
    }
}

impl fmt::Display for MonitorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// The two-state fault monitor `M`, total and deterministic over the
/// whole alphabet: `Normal` moves to `Faulty` on a fault event and
/// `Faulty` absorbs everything.
///
/// The monitor reacts to fault events regardless of their observation
/// class, so an observable fault still trips it.
#[derive(Debug, Clone)]
pub struct FaultMonitor {
    fault: Vec<bool>,
}

impl FaultMonitor {
    pub fn new(alphabet: &AlphabetTable) -> Self {
        Self {
            fault: alphabet.events().map(|e| alphabet.is_fault(e)).collect(),
        }
    }

    pub fn step(&self, m: MonitorState, event: EventId) -> MonitorState {
        match m {
            MonitorState::Faulty => MonitorState::Faulty,
            MonitorState::Normal if self.fault[event] => MonitorState::Faulty,
            MonitorState::Normal => MonitorState::Normal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::AlphabetTable;

    fn monitor() -> FaultMonitor {
        let table = AlphabetTable::build(
            vec!["a".into(), "f".into()],
            &["a".to_string()],
            &["f".to_string()],
            &["f".to_string()],
        )
        .unwrap();
        FaultMonitor::new(&table)
    }

    #[test]
    fn normal_stays_normal_on_non_fault() {
        let m = monitor();
        assert_eq!(m.step(MonitorState::Normal, 0), MonitorState::Normal);
    }

    #[test]
    fn normal_trips_on_fault() {
        let m = monitor();
        assert_eq!(m.step(MonitorState::Normal, 1), MonitorState::Faulty);
    }

    #[test]
    fn faulty_absorbs() {
        let m = monitor();
        assert_eq!(m.step(MonitorState::Faulty, 0), MonitorState::Faulty);
        assert_eq!(m.step(MonitorState::Faulty, 1), MonitorState::Faulty);
    }

    #[test]
    fn display_codes_are_one_and_two() {
        assert_eq!(MonitorState::Normal.code(), 1);
        assert_eq!(MonitorState::Faulty.code(), 2);
        assert_eq!(MonitorState::Normal.to_string(), "N");
        assert_eq!(MonitorState::Faulty.to_string(), "F");
    }
}
