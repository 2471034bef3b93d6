use indexmap::IndexMap;
use miette::Diagnostic;
use std::fmt;
use thiserror::Error;

use crate::alphabet::{AlphabetTable, EventId};

/// A unique identifier for a plant state. Dense `0..num_states()`;
/// the 1-based numbering of the input format exists only at the I/O
/// boundary.
pub type StateId = usize;

/// Malformed plant description detected at construction time.
#[derive(Debug, Error, Diagnostic)]
pub enum ModelError {
    #[error("state out of range: {state} (the plant has {bound} states)")]
    #[diagnostic(code(loris::model::state_out_of_range))]
    StateOutOfRange { state: usize, bound: usize },

    #[error("event not in alphabet: '{0}'")]
    #[diagnostic(code(loris::model::unknown_event))]
    UnknownEvent(String),

    #[error("empty initial-state set")]
    #[diagnostic(code(loris::model::empty_initial_set))]
    EmptyInitialSet,

    #[error("duplicate event classification for '{0}'")]
    #[diagnostic(code(loris::model::duplicate_classification))]
    DuplicateClassification(String),

    #[error("event '{0}' is neither observable nor unobservable")]
    #[diagnostic(code(loris::model::unclassified_event))]
    UnclassifiedEvent(String),
}

/// A single plant transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Transition {
    pub src: StateId,
    pub event: EventId,
    pub dst: StateId,
}

/// The plant under diagnosis: a non-deterministic finite automaton over
/// a partitioned alphabet.
///
/// Immutable after construction. Transitions are indexed twice, by
/// source state and by `(source, event)`, because both the recogniser
/// product and the observer closure need dense lookup.
#[derive(Debug, Clone)]
pub struct Automaton {
    num_states: usize,
    alphabet: AlphabetTable,
    transitions: Vec<Transition>,
    outgoing: Vec<Vec<usize>>,
    by_event: IndexMap<(StateId, EventId), Vec<StateId>>,
    initial: Vec<StateId>,
    marked: Vec<StateId>,
}

impl Automaton {
    pub fn num_states(&self) -> usize {
        self.num_states
    }

    pub fn alphabet(&self) -> &AlphabetTable {
        &self.alphabet
    }

    /// All transitions, sorted by `(src, event, dst)` and deduplicated.
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Outgoing transitions of a state.
    pub fn outgoing(&self, state: StateId) -> impl Iterator<Item = &Transition> {
        self.outgoing[state].iter().map(move |&i| &self.transitions[i])
    }

    /// Target states of `state` under `event`. Non-deterministic:
    /// possibly more than one, possibly none.
    pub fn targets(&self, state: StateId, event: EventId) -> &[StateId] {
        self.by_event
            .get(&(state, event))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The non-empty set of initial states, ascending.
    pub fn initial(&self) -> &[StateId] {
        &self.initial
    }

    /// Marked states. Preserved from the input, not consulted by the
    /// diagnosability analysis.
    pub fn marked(&self) -> &[StateId] {
        &self.marked
    }
}

impl fmt::Display for Automaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Plant automaton: {} states", self.num_states)?;
        let join = |ids: &mut dyn Iterator<Item = EventId>| {
            ids.map(|e| self.alphabet.symbol(e).to_string())
                .collect::<Vec<_>>()
                .join(" ")
        };
        writeln!(f, "  Observable:   {}", join(&mut self.alphabet.observable_events()))?;
        writeln!(f, "  Unobservable: {}", join(&mut self.alphabet.unobservable_events()))?;
        writeln!(f, "  Faults:       {}", join(&mut self.alphabet.fault_events()))?;
        writeln!(f, "  Transitions:")?;
        for t in &self.transitions {
            writeln!(
                f,
                "    {} {} {}",
                t.src + 1,
                self.alphabet.symbol(t.event),
                t.dst + 1
            )?;
        }
        let render_states = |ids: &[StateId]| {
            ids.iter()
                .map(|q| (q + 1).to_string())
                .collect::<Vec<_>>()
                .join(" ")
        };
        writeln!(f, "  Initial: {}", render_states(&self.initial))?;
        write!(f, "  Marked:  {}", render_states(&self.marked))
    }
}

/// Incremental construction of an [`Automaton`]. All range validation
/// happens in [`AutomatonBuilder::finish`].
#[derive(Debug)]
pub struct AutomatonBuilder {
    num_states: usize,
    alphabet: AlphabetTable,
    transitions: Vec<Transition>,
    initial: Vec<StateId>,
    marked: Vec<StateId>,
}

impl AutomatonBuilder {
    pub fn new(num_states: usize, alphabet: AlphabetTable) -> Self {
        Self {
            num_states,
            alphabet,
            transitions: Vec::new(),
            initial: Vec::new(),
            marked: Vec::new(),
        }
    }

    pub fn alphabet(&self) -> &AlphabetTable {
        &self.alphabet
    }

    pub fn transition(&mut self, src: StateId, event: EventId, dst: StateId) -> &mut Self {
        self.transitions.push(Transition { src, event, dst });
        self
    }

    pub fn initial(&mut self, states: impl IntoIterator<Item = StateId>) -> &mut Self {
        self.initial.extend(states);
        self
    }

    pub fn marked(&mut self, states: impl IntoIterator<Item = StateId>) -> &mut Self {
        self.marked.extend(states);
        self
    }

    pub fn finish(self) -> Result<Automaton, ModelError> {
        let Self {
            num_states,
            alphabet,
            mut transitions,
            mut initial,
            mut marked,
        } = self;

        let check_state = |state: StateId| {
            if state >= num_states {
                Err(ModelError::StateOutOfRange {
                    state: state + 1,
                    bound: num_states,
                })
            } else {
                Ok(())
            }
        };
        for t in &transitions {
            check_state(t.src)?;
            check_state(t.dst)?;
        }
        for &q in initial.iter().chain(marked.iter()) {
            check_state(q)?;
        }
        if initial.is_empty() {
            return Err(ModelError::EmptyInitialSet);
        }

        transitions.sort();
        transitions.dedup();
        initial.sort();
        initial.dedup();
        marked.sort();
        marked.dedup();

        let mut outgoing = vec![Vec::new(); num_states];
        let mut by_event: IndexMap<(StateId, EventId), Vec<StateId>> = IndexMap::new();
        for (i, t) in transitions.iter().enumerate() {
            outgoing[t.src].push(i);
            by_event.entry((t.src, t.event)).or_default().push(t.dst);
        }

        Ok(Automaton {
            num_states,
            alphabet,
            transitions,
            outgoing,
            by_event,
            initial,
            marked,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strs(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn small_alphabet() -> AlphabetTable {
        AlphabetTable::build(
            strs(&["a", "f"]),
            &strs(&["a"]),
            &strs(&["f"]),
            &strs(&["f"]),
        )
        .unwrap()
    }

    #[test]
    fn builds_and_indexes_transitions() {
        let mut b = AutomatonBuilder::new(2, small_alphabet());
        b.transition(0, 1, 1)
            .transition(0, 0, 0)
            .transition(1, 0, 1)
            .transition(0, 0, 0);
        b.initial([0]);
        let plant = b.finish().unwrap();

        assert_eq!(plant.transitions().len(), 3);
        assert_eq!(plant.targets(0, 0), &[0]);
        assert_eq!(plant.targets(0, 1), &[1]);
        assert_eq!(plant.targets(1, 1), &[] as &[StateId]);
        assert_eq!(plant.outgoing(0).count(), 2);
        assert_eq!(plant.initial(), &[0]);
    }

    #[test]
    fn rejects_out_of_range_state() {
        let mut b = AutomatonBuilder::new(2, small_alphabet());
        b.transition(0, 0, 2);
        b.initial([0]);
        let err = b.finish().unwrap_err();
        assert!(matches!(err, ModelError::StateOutOfRange { state: 3, bound: 2 }));
    }

    #[test]
    fn rejects_empty_initial_set() {
        let b = AutomatonBuilder::new(1, small_alphabet());
        assert!(matches!(b.finish().unwrap_err(), ModelError::EmptyInitialSet));
    }

    #[test]
    fn nondeterminism_is_preserved() {
        let mut b = AutomatonBuilder::new(3, small_alphabet());
        b.transition(0, 0, 1).transition(0, 0, 2);
        b.initial([0]);
        let plant = b.finish().unwrap();
        assert_eq!(plant.targets(0, 0), &[1, 2]);
    }
}
