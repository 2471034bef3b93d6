use indexmap::{IndexMap, IndexSet};
use std::collections::VecDeque;

use crate::alphabet::EventId;
use crate::automaton::{Automaton, StateId};
use crate::monitor::{FaultMonitor, MonitorState};

/// A unique identifier for a reachable compound state of the recogniser.
pub type CompoundId = usize;

/// A state of the recogniser `G ∥ M`: a plant state paired with the
/// monitor flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CompoundState {
    pub plant: StateId,
    pub monitor: MonitorState,
}

/// The fault recogniser: the synchronous product of the plant with the
/// fault monitor, restricted to the states reachable from
/// `{(q0, Normal)}`.
///
/// Because the monitor is total and deterministic, a compound transition
/// exists exactly when the underlying plant transition does, and
/// `|Q_R| <= 2 |Q|`.
///
/// Compound ids are canonical: after exploration the reachable states
/// are renumbered in ascending `(plant, monitor)` order, so ids,
/// transition order, and macro-state member order downstream are
/// reproducible run to run.
#[derive(Debug, Clone)]
pub struct Recognizer {
    states: Vec<CompoundState>,
    index: IndexMap<CompoundState, CompoundId>,
    transitions: Vec<(CompoundId, EventId, CompoundId)>,
    outgoing: Vec<Vec<usize>>,
    by_event: IndexMap<(CompoundId, EventId), Vec<CompoundId>>,
    initial: Vec<CompoundId>,
}

impl Recognizer {
    /// Frontier exploration of the product from the initial compounds.
    pub fn build(plant: &Automaton) -> Self {
        let monitor = FaultMonitor::new(plant.alphabet());

        let mut seen: IndexSet<CompoundState> = IndexSet::new();
        let mut frontier: VecDeque<CompoundState> = VecDeque::new();
        for &q0 in plant.initial() {
            let start = CompoundState {
                plant: q0,
                monitor: MonitorState::Normal,
            };
            if seen.insert(start) {
                frontier.push_back(start);
            }
        }

        let mut raw: Vec<(CompoundState, EventId, CompoundState)> = Vec::new();
        while let Some(src) = frontier.pop_front() {
            for t in plant.outgoing(src.plant) {
                let dst = CompoundState {
                    plant: t.dst,
                    monitor: monitor.step(src.monitor, t.event),
                };
                raw.push((src, t.event, dst));
                if seen.insert(dst) {
                    frontier.push_back(dst);
                }
            }
        }

        let mut states: Vec<CompoundState> = seen.into_iter().collect();
        states.sort();
        let index: IndexMap<CompoundState, CompoundId> = states
            .iter()
            .enumerate()
            .map(|(id, &cs)| (cs, id))
            .collect();

        let mut transitions: Vec<(CompoundId, EventId, CompoundId)> = raw
            .into_iter()
            .map(|(src, e, dst)| (index[&src], e, index[&dst]))
            .collect();
        transitions.sort_unstable();
        transitions.dedup();

        let mut outgoing = vec![Vec::new(); states.len()];
        let mut by_event: IndexMap<(CompoundId, EventId), Vec<CompoundId>> = IndexMap::new();
        for (i, &(src, e, dst)) in transitions.iter().enumerate() {
            assert!(
                !(states[src].monitor == MonitorState::Faulty
                    && states[dst].monitor == MonitorState::Normal),
                "recogniser transition leaves a faulty state for a normal one"
            );
            outgoing[src].push(i);
            by_event.entry((src, e)).or_default().push(dst);
        }

        let mut initial: Vec<CompoundId> = plant
            .initial()
            .iter()
            .map(|&q0| {
                index[&CompoundState {
                    plant: q0,
                    monitor: MonitorState::Normal,
                }]
            })
            .collect();
        initial.sort_unstable();
        initial.dedup();

        Self {
            states,
            index,
            transitions,
            outgoing,
            by_event,
            initial,
        }
    }

    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    pub fn state(&self, id: CompoundId) -> CompoundState {
        self.states[id]
    }

    pub fn states(&self) -> &[CompoundState] {
        &self.states
    }

    pub fn id_of(&self, state: CompoundState) -> Option<CompoundId> {
        self.index.get(&state).copied()
    }

    /// All compound transitions, sorted by `(src, event, dst)`.
    pub fn transitions(&self) -> &[(CompoundId, EventId, CompoundId)] {
        &self.transitions
    }

    pub fn outgoing(
        &self,
        id: CompoundId,
    ) -> impl Iterator<Item = &(CompoundId, EventId, CompoundId)> {
        self.outgoing[id].iter().map(move |&i| &self.transitions[i])
    }

    /// Successor compounds of `id` under `event`.
    pub fn successors(&self, id: CompoundId, event: EventId) -> &[CompoundId] {
        self.by_event
            .get(&(id, event))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The initial compounds `(q0, Normal)`, ascending.
    pub fn initial(&self) -> &[CompoundId] {
        &self.initial
    }

    pub fn is_fault_state(&self, id: CompoundId) -> bool {
        self.states[id].monitor == MonitorState::Faulty
    }
}
