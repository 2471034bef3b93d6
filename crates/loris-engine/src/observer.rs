use indexmap::IndexMap;
use std::collections::VecDeque;
use tracing::debug;

use loris_ir::alphabet::{AlphabetTable, EventId};
use loris_ir::recognizer::{CompoundId, Recognizer};

use crate::labeling::{label_of, DiagnosisLabel};

/// A unique identifier for an observer macro-state.
pub type MacroId = usize;

/// One-step image of a set of compound states under an observable
/// event, without unobservable closure. Sorted and deduplicated.
pub fn alpha(rec: &Recognizer, members: &[CompoundId], event: EventId) -> Vec<CompoundId> {
    let mut out = Vec::new();
    for &id in members {
        out.extend_from_slice(rec.successors(id, event));
    }
    out.sort_unstable();
    out.dedup();
    out
}

/// The unobservable reach of a single compound state: everything
/// reachable through unobservable events, the state itself included.
pub fn unobservable_reach(
    rec: &Recognizer,
    alphabet: &AlphabetTable,
    id: CompoundId,
) -> Vec<CompoundId> {
    beta(rec, alphabet, vec![id])
}

/// Unobservable closure of a set of compound states. Sorted and
/// deduplicated; a fixed point of itself.
pub fn beta(rec: &Recognizer, alphabet: &AlphabetTable, seed: Vec<CompoundId>) -> Vec<CompoundId> {
    let mut closed: Vec<bool> = vec![false; rec.num_states()];
    let mut frontier: VecDeque<CompoundId> = VecDeque::new();
    for &id in &seed {
        if !closed[id] {
            closed[id] = true;
            frontier.push_back(id);
        }
    }
    while let Some(id) = frontier.pop_front() {
        for &(_, event, dst) in rec.outgoing(id) {
            if !alphabet.is_observable(event) && !closed[dst] {
                closed[dst] = true;
                frontier.push_back(dst);
            }
        }
    }
    closed
        .iter()
        .enumerate()
        .filter_map(|(id, &in_set)| in_set.then_some(id))
        .collect()
}

/// The deterministic observer of the recogniser: macro-states are
/// β-closed subsets of compound states, transitions are labelled by
/// observable events only.
///
/// Macro-state identity is the sorted member vector; only macro-states
/// reachable from `β(initial)` are materialised. Iteration over members
/// and events is in id order, so observer ids are reproducible.
#[derive(Debug, Clone)]
pub struct Observer {
    index: IndexMap<Vec<CompoundId>, MacroId>,
    labels: Vec<DiagnosisLabel>,
    transitions: Vec<(MacroId, EventId, MacroId)>,
    outgoing: Vec<Vec<usize>>,
}

impl Observer {
    /// Worklist subset construction over the observable alphabet.
    pub fn build(rec: &Recognizer, alphabet: &AlphabetTable) -> Self {
        let mut index: IndexMap<Vec<CompoundId>, MacroId> = IndexMap::new();
        let mut labels = Vec::new();
        let mut transitions = Vec::new();
        let mut worklist: VecDeque<MacroId> = VecDeque::new();

        let y0 = beta(rec, alphabet, rec.initial().to_vec());
        intern(rec, &mut index, &mut labels, &mut worklist, y0);

        while let Some(src) = worklist.pop_front() {
            for event in alphabet.observable_events() {
                let members = index
                    .get_index(src)
                    .map(|(m, _)| m.clone())
                    .expect("worklist entry has no interned members");
                let image = alpha(rec, &members, event);
                if image.is_empty() {
                    continue;
                }
                let successor = beta(rec, alphabet, image);
                let dst = intern(rec, &mut index, &mut labels, &mut worklist, successor);
                transitions.push((src, event, dst));
            }
        }

        let mut outgoing = vec![Vec::new(); index.len()];
        for (i, &(src, _, _)) in transitions.iter().enumerate() {
            outgoing[src].push(i);
        }

        debug!(
            macro_states = index.len(),
            transitions = transitions.len(),
            "observer constructed"
        );
        Self {
            index,
            labels,
            transitions,
            outgoing,
        }
    }

    pub fn num_macro_states(&self) -> usize {
        self.index.len()
    }

    /// Members of a macro-state: a sorted, β-closed list of compound ids.
    pub fn members(&self, id: MacroId) -> &[CompoundId] {
        self.index
            .get_index(id)
            .map(|(m, _)| m.as_slice())
            .expect("macro-state id out of range")
    }

    pub fn label(&self, id: MacroId) -> DiagnosisLabel {
        self.labels[id]
    }

    /// Observer transitions in discovery order.
    pub fn transitions(&self) -> &[(MacroId, EventId, MacroId)] {
        &self.transitions
    }

    pub fn outgoing(&self, id: MacroId) -> impl Iterator<Item = &(MacroId, EventId, MacroId)> {
        self.outgoing[id].iter().map(move |&i| &self.transitions[i])
    }

    /// The deterministic successor of a macro-state under an observable
    /// event, if the event is enabled.
    pub fn successor(&self, id: MacroId, event: EventId) -> Option<MacroId> {
        self.outgoing(id)
            .find(|&&(_, e, _)| e == event)
            .map(|&(_, _, dst)| dst)
    }

    /// Macro-state ids with an uncertain label.
    pub fn uncertain_states(&self) -> impl Iterator<Item = MacroId> + '_ {
        (0..self.num_macro_states()).filter(|&i| self.labels[i].is_uncertain())
    }
}

fn intern(
    rec: &Recognizer,
    index: &mut IndexMap<Vec<CompoundId>, MacroId>,
    labels: &mut Vec<DiagnosisLabel>,
    worklist: &mut VecDeque<MacroId>,
    members: Vec<CompoundId>,
) -> MacroId {
    assert!(!members.is_empty(), "interned an empty macro-state");
    if let Some(&id) = index.get(&members) {
        return id;
    }
    let id = index.len();
    labels.push(label_of(rec, &members));
    let previous = index.insert(members, id);
    assert!(previous.is_none(), "duplicate macro-state id");
    worklist.push_back(id);
    id
}
