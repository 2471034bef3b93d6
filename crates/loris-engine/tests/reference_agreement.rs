//! Agreement of the cycle-based decision procedure with an independent
//! twin-plant reference check on random small plants.
//!
//! The reference pairs a fault-free run with an arbitrary run carrying
//! the same observations and looks for a reachable cycle whose second
//! component has seen a fault and which contains at least one
//! observable step. Such a cycle exists exactly when some fault can
//! stay ambiguous over an unbounded number of observations.

use indexmap::IndexMap;
use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};
use std::collections::VecDeque;

use loris_engine::cycles::ReportMode;
use loris_engine::pipeline::{run_plant, PipelineOptions};
use loris_ir::automaton::Automaton;
use loris_ir::proptest_generators::arb_automaton;
use loris_ir::recognizer::{CompoundId, Recognizer};

type Pair = (CompoundId, CompoundId);

fn pair_node(
    index: &mut IndexMap<Pair, usize>,
    edges: &mut Vec<Vec<(usize, bool)>>,
    worklist: &mut VecDeque<usize>,
    key: Pair,
) -> usize {
    if let Some(&i) = index.get(&key) {
        return i;
    }
    let i = index.len();
    index.insert(key, i);
    edges.push(Vec::new());
    worklist.push_back(i);
    i
}

fn reference_diagnosable(plant: &Automaton) -> bool {
    let alphabet = plant.alphabet();
    let rec = Recognizer::build(plant);

    let mut index: IndexMap<Pair, usize> = IndexMap::new();
    let mut edges: Vec<Vec<(usize, bool)>> = Vec::new();
    let mut worklist: VecDeque<usize> = VecDeque::new();
    for &left in rec.initial() {
        for &right in rec.initial() {
            pair_node(&mut index, &mut edges, &mut worklist, (left, right));
        }
    }

    while let Some(i) = worklist.pop_front() {
        let &(left, right) = index.get_index(i).map(|(k, _)| k).unwrap();
        let mut new_edges: Vec<(usize, bool)> = Vec::new();
        for &(_, event, left2) in rec.outgoing(left) {
            if alphabet.is_observable(event) || rec.is_fault_state(left2) {
                continue;
            }
            let j = pair_node(&mut index, &mut edges, &mut worklist, (left2, right));
            new_edges.push((j, false));
        }
        for &(_, event, right2) in rec.outgoing(right) {
            if alphabet.is_observable(event) {
                continue;
            }
            let j = pair_node(&mut index, &mut edges, &mut worklist, (left, right2));
            new_edges.push((j, false));
        }
        for event in alphabet.observable_events() {
            for &left2 in rec.successors(left, event) {
                if rec.is_fault_state(left2) {
                    continue;
                }
                for &right2 in rec.successors(right, event) {
                    let j = pair_node(&mut index, &mut edges, &mut worklist, (left2, right2));
                    new_edges.push((j, true));
                }
            }
        }
        edges[i] = new_edges;
    }

    // Confused cycle search: an observable edge u -> v between
    // fault-carrying pairs such that u is reachable from v again.
    let confused: Vec<bool> = index
        .keys()
        .map(|&(_, right)| rec.is_fault_state(right))
        .collect();
    for u in 0..index.len() {
        if !confused[u] {
            continue;
        }
        for &(v, observable) in &edges[u] {
            if !observable || !confused[v] {
                continue;
            }
            if reaches(&edges, &confused, v, u) {
                return false;
            }
        }
    }
    true
}

/// BFS within the confused subgraph.
fn reaches(edges: &[Vec<(usize, bool)>], confused: &[bool], from: usize, to: usize) -> bool {
    let mut seen = vec![false; edges.len()];
    let mut queue = VecDeque::from([from]);
    seen[from] = true;
    while let Some(n) = queue.pop_front() {
        if n == to {
            return true;
        }
        for &(next, _) in &edges[n] {
            if confused[next] && !seen[next] {
                seen[next] = true;
                queue.push_back(next);
            }
        }
    }
    false
}

fn cases() -> u32 {
    std::env::var("LORIS_PROPTEST_CASES")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(64)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: cases(),
        failure_persistence: Some(Box::new(FileFailurePersistence::WithSource(
            "proptest-regressions",
        ))),
        ..ProptestConfig::default()
    })]

    #[test]
    fn verdict_agrees_with_the_twin_plant_reference(plant in arb_automaton()) {
        let quick = run_plant(
            &plant,
            "random.fsm",
            &PipelineOptions { report: ReportMode::VerdictOnly },
        );
        prop_assert_eq!(quick.diagnosable, reference_diagnosable(&plant));
    }

    #[test]
    fn full_and_verdict_only_modes_agree(plant in arb_automaton()) {
        let full = run_plant(&plant, "random.fsm", &PipelineOptions::default());
        let quick = run_plant(
            &plant,
            "random.fsm",
            &PipelineOptions { report: ReportMode::VerdictOnly },
        );
        prop_assert_eq!(full.diagnosable, quick.diagnosable);
        prop_assert_eq!(
            full.diagnosable,
            full.cycles.iter().all(|c| !c.indeterminate)
        );
    }
}
