//! Uncertain-cycle analysis: the diagnosability decision procedure.
//!
//! The observer is restricted to its uncertain macro-states, every
//! simple cycle of that subgraph is enumerated, and each cycle is
//! refined by unrolling its event word over the recogniser. A cycle is
//! indeterminate when the refined expansion keeps both a fault-free and
//! a fault-bearing run alive forever; one indeterminate cycle makes the
//! plant non-diagnosable.
//!
//! The verdict itself comes from a cycle search in the product of the
//! uncertain subgraph with the faulty members of its macro-states. A
//! faulty run can survive by alternating between simple cycles that
//! share a macro-state, in which case no single simple cycle is
//! indeterminate on its own; the product cycle covers exactly these
//! closed walks, and the walk is refined and reported like any cycle.

use indexmap::{IndexMap, IndexSet};
use std::collections::{BTreeSet, VecDeque};
use std::ops::ControlFlow;
use tracing::debug;

use loris_ir::alphabet::{AlphabetTable, EventId};
use loris_ir::recognizer::{CompoundId, Recognizer};

use crate::labeling::label_of;
use crate::observer::{alpha, beta, MacroId, Observer};
use crate::result::{CycleReport, RefinementStep};
use crate::visualization::render_members;

/// How much of the cycle analysis to carry out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportMode {
    /// Stop at the first indeterminate cycle.
    VerdictOnly,
    /// Enumerate and refine every uncertain cycle.
    #[default]
    Full,
}

/// Outcome of the cycle analysis.
#[derive(Debug, Clone)]
pub struct CycleAnalysis {
    pub diagnosable: bool,
    /// Whether the uncertain subgraph contains any cycle at all; when
    /// it does not, the verdict line changes.
    pub has_uncertain_cycle: bool,
    /// Number of cycles refined and reported.
    pub examined_cycles: usize,
    pub cycles: Vec<CycleReport>,
}

/// Enumerate and refine the uncertain cycles of the observer and decide
/// diagnosability.
pub fn analyze(
    obs: &Observer,
    rec: &Recognizer,
    alphabet: &AlphabetTable,
    mode: ReportMode,
) -> CycleAnalysis {
    let sub = USubgraph::build(obs);
    let witness = find_confused_cycle(&sub, obs, rec, alphabet);
    let diagnosable = witness.is_none();
    let has_uncertain_cycle = sub.has_vertex_cycle();

    let mut cycles: Vec<CycleReport> = Vec::new();
    match mode {
        ReportMode::VerdictOnly => {
            if let Some((walk, word)) = witness {
                let report = refine_cycle(rec, alphabet, obs, &walk, &word);
                assert!(
                    report.indeterminate,
                    "confused-cycle witness refines as determinate"
                );
                cycles.push(report);
            }
        }
        ReportMode::Full => {
            let _ = sub.for_each_vertex_cycle(&mut |stack| {
                let macro_states: Vec<MacroId> = stack.iter().map(|&v| sub.nodes[v]).collect();
                let k = stack.len();
                let edge_events: Vec<&[EventId]> = (0..k)
                    .map(|i| {
                        let from = stack[i];
                        let to = stack[(i + 1) % k];
                        sub.events
                            .get(&(from, to))
                            .map(Vec::as_slice)
                            .expect("cycle edge has no events")
                    })
                    .collect();
                for_each_event_word(&edge_events, &mut |word| {
                    cycles.push(refine_cycle(rec, alphabet, obs, &macro_states, word));
                    ControlFlow::Continue(())
                })
            });
            // A faulty run alternating between simple cycles leaves all
            // of them determinate; report the composite walk then.
            if let Some((walk, word)) = witness {
                if cycles.iter().all(|c| !c.indeterminate) {
                    let report = refine_cycle(rec, alphabet, obs, &walk, &word);
                    assert!(
                        report.indeterminate,
                        "confused-cycle witness refines as determinate"
                    );
                    cycles.push(report);
                }
            }
        }
    }

    let examined = cycles.len();
    debug!(examined, diagnosable, "cycle analysis finished");
    CycleAnalysis {
        diagnosable,
        has_uncertain_cycle,
        examined_cycles: examined,
        cycles,
    }
}

/// Search the product of the uncertain subgraph with the faulty members
/// of its macro-states for a cycle.
///
/// A product cycle is a closed walk of uncertain macro-states along
/// which one faulty compound state flows back into itself, i.e. a
/// fault-bearing run that stays consistent with the observations
/// forever. The fault-free side needs no search: every normal member of
/// an uncertain macro-state has a normal predecessor along any incoming
/// edge, so arbitrarily long fault-free companions always exist.
///
/// Returns the walk's macro-states and event word.
fn find_confused_cycle(
    sub: &USubgraph,
    obs: &Observer,
    rec: &Recognizer,
    alphabet: &AlphabetTable,
) -> Option<(Vec<MacroId>, Vec<EventId>)> {
    // Product nodes: (local uncertain macro-state, faulty member).
    let mut index: IndexMap<(usize, CompoundId), usize> = IndexMap::new();
    for (u, &macro_id) in sub.nodes.iter().enumerate() {
        for &member in obs.members(macro_id) {
            if rec.is_fault_state(member) {
                index.insert((u, member), index.len());
            }
        }
    }

    let mut edges: Vec<Vec<(usize, EventId)>> = vec![Vec::new(); index.len()];
    for (&(u, member), &i) in &index {
        for (&(from, to), events) in &sub.events {
            if from != u {
                continue;
            }
            for &event in events {
                for target in beta(rec, alphabet, alpha(rec, &[member], event)) {
                    if let Some(&j) = index.get(&(to, target)) {
                        edges[i].push((j, event));
                    }
                }
            }
        }
    }

    // DFS back-edge search; the stack slice from the gray node to the
    // top is the witness cycle.
    let mut color = vec![0u8; index.len()];
    for start in 0..index.len() {
        if color[start] != 0 {
            continue;
        }
        color[start] = 1;
        let mut stack: Vec<(usize, usize)> = vec![(start, 0)];
        let mut entered_by: Vec<EventId> = vec![0];
        loop {
            let Some(&(node, edge_idx)) = stack.last() else {
                break;
            };
            if edge_idx >= edges[node].len() {
                color[node] = 2;
                stack.pop();
                entered_by.pop();
                continue;
            }
            stack.last_mut().expect("dfs stack is non-empty").1 += 1;
            let (next, event) = edges[node][edge_idx];
            match color[next] {
                0 => {
                    color[next] = 1;
                    stack.push((next, 0));
                    entered_by.push(event);
                }
                1 => {
                    let at = stack
                        .iter()
                        .position(|&(n, _)| n == next)
                        .expect("gray node is on the dfs stack");
                    let walk: Vec<MacroId> = stack[at..]
                        .iter()
                        .map(|&(n, _)| {
                            let &(u, _) = index.get_index(n).map(|(k, _)| k).unwrap();
                            sub.nodes[u]
                        })
                        .collect();
                    let mut word: Vec<EventId> = entered_by[at + 1..].to_vec();
                    word.push(event);
                    return Some((walk, word));
                }
                _ => {}
            }
        }
    }
    None
}

/// Unroll a cycle's event word over the recogniser, recording the α/β
/// trace, and decide whether the cycle is indeterminate.
///
/// The trace laps the word until it returns to the entry set at a lap
/// boundary, or until two consecutive laps contribute no β-set that was
/// not already recorded. Subsets of the recogniser are finite, so the
/// sequence is eventually periodic and the loop terminates.
pub fn refine_cycle(
    rec: &Recognizer,
    alphabet: &AlphabetTable,
    obs: &Observer,
    macro_states: &[MacroId],
    word: &[EventId],
) -> CycleReport {
    assert_eq!(
        macro_states.len(),
        word.len(),
        "cycle event count does not match its edge count"
    );
    let entry: Vec<CompoundId> = obs.members(macro_states[0]).to_vec();
    let entry_label = label_of(rec, &entry);

    let mut steps: Vec<RefinementStep> = Vec::new();
    let mut seen: IndexSet<Vec<CompoundId>> = IndexSet::new();
    seen.insert(entry.clone());
    let mut current = entry.clone();
    let mut all_uncertain = entry_label.is_uncertain();
    let mut stale_laps = 0;
    loop {
        let mut lap_added = false;
        for &event in word {
            let image = alpha(rec, &current, event);
            assert!(
                !image.is_empty(),
                "refinement step has an empty observable image"
            );
            let closed = beta(rec, alphabet, image.clone());
            let alpha_label = label_of(rec, &image);
            let beta_label = label_of(rec, &closed);
            all_uncertain &= alpha_label.is_uncertain() && beta_label.is_uncertain();
            steps.push(RefinementStep {
                event: alphabet.symbol(event).to_string(),
                alpha_display: render_members(rec, &image),
                alpha: image,
                alpha_label,
                beta_display: render_members(rec, &closed),
                beta: closed.clone(),
                beta_label,
            });
            if seen.insert(closed.clone()) {
                lap_added = true;
            }
            current = closed;
        }
        if current == entry {
            break;
        }
        if lap_added {
            stale_laps = 0;
        } else {
            stale_laps += 1;
            if stale_laps >= 2 {
                break;
            }
        }
    }

    // A pure-N or pure-F set anywhere in the trace resolves the
    // ambiguity on at least one trajectory. Otherwise the fault-free
    // side survives every lap by construction, and the cycle is
    // indeterminate exactly when a fault-bearing run survives too.
    let indeterminate = all_uncertain && admits_faulty_cycle(rec, alphabet, &entry, word);

    CycleReport {
        macro_states: macro_states.to_vec(),
        events: word
            .iter()
            .map(|&e| alphabet.symbol(e).to_string())
            .collect(),
        entry_display: render_members(rec, &entry),
        entry_label,
        entry,
        steps,
        indeterminate,
    }
}

/// Does the refined expansion of the cycle admit a run that stays
/// faulty forever while producing the cycle's observations?
///
/// Expansion nodes are `(position in word, compound state)` pairs
/// reachable from the entry members; an edge follows one observable
/// event of the word and its unobservable closure. A cycle among faulty
/// nodes is exactly a fault-bearing run that survives every lap.
fn admits_faulty_cycle(
    rec: &Recognizer,
    alphabet: &AlphabetTable,
    entry: &[CompoundId],
    word: &[EventId],
) -> bool {
    let k = word.len();
    let mut index: IndexMap<(usize, CompoundId), usize> = IndexMap::new();
    let mut adjacency: Vec<Vec<usize>> = Vec::new();
    let mut worklist: VecDeque<usize> = VecDeque::new();

    for &r in entry {
        expansion_node(&mut index, &mut adjacency, &mut worklist, (0, r));
    }
    while let Some(i) = worklist.pop_front() {
        let &(pos, r) = index
            .get_index(i)
            .map(|(key, _)| key)
            .expect("expansion worklist entry has no node");
        let image = alpha(rec, &[r], word[pos]);
        if image.is_empty() {
            continue;
        }
        let next = (pos + 1) % k;
        for r2 in beta(rec, alphabet, image) {
            let j = expansion_node(&mut index, &mut adjacency, &mut worklist, (next, r2));
            adjacency[i].push(j);
        }
    }

    let faulty: Vec<bool> = index.keys().map(|&(_, r)| rec.is_fault_state(r)).collect();

    // Cycle detection restricted to faulty nodes: DFS back-edge search.
    let mut color = vec![0u8; index.len()];
    for start in 0..index.len() {
        if !faulty[start] || color[start] != 0 {
            continue;
        }
        color[start] = 1;
        let mut stack: Vec<(usize, usize)> = vec![(start, 0)];
        loop {
            let Some(&(node, edge_idx)) = stack.last() else {
                break;
            };
            if edge_idx >= adjacency[node].len() {
                color[node] = 2;
                stack.pop();
                continue;
            }
            stack.last_mut().expect("dfs stack is non-empty").1 += 1;
            let next = adjacency[node][edge_idx];
            if !faulty[next] {
                continue;
            }
            match color[next] {
                0 => {
                    color[next] = 1;
                    stack.push((next, 0));
                }
                1 => return true,
                _ => {}
            }
        }
    }
    false
}

fn expansion_node(
    index: &mut IndexMap<(usize, CompoundId), usize>,
    adjacency: &mut Vec<Vec<usize>>,
    worklist: &mut VecDeque<usize>,
    key: (usize, CompoundId),
) -> usize {
    if let Some(&i) = index.get(&key) {
        return i;
    }
    let i = index.len();
    index.insert(key, i);
    adjacency.push(Vec::new());
    worklist.push_back(i);
    i
}

/// The observer restricted to uncertain macro-states and to transitions
/// between them.
struct USubgraph {
    /// Global macro-state ids, ascending; positions are local indices.
    nodes: Vec<MacroId>,
    /// Sorted unique local successors per local node.
    adj: Vec<Vec<usize>>,
    /// Sorted event ids per local edge.
    events: IndexMap<(usize, usize), Vec<EventId>>,
}

impl USubgraph {
    fn build(obs: &Observer) -> Self {
        let nodes: Vec<MacroId> = obs.uncertain_states().collect();
        let local: IndexMap<MacroId, usize> =
            nodes.iter().enumerate().map(|(i, &m)| (m, i)).collect();

        let mut adj: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); nodes.len()];
        let mut events: IndexMap<(usize, usize), Vec<EventId>> = IndexMap::new();
        for &(src, event, dst) in obs.transitions() {
            if let (Some(&s), Some(&d)) = (local.get(&src), local.get(&dst)) {
                adj[s].insert(d);
                events.entry((s, d)).or_default().push(event);
            }
        }
        for list in events.values_mut() {
            list.sort_unstable();
            list.dedup();
        }
        Self {
            nodes,
            adj: adj.into_iter().map(|set| set.into_iter().collect()).collect(),
            events,
        }
    }

    /// Is there any cycle at all among the uncertain macro-states?
    fn has_vertex_cycle(&self) -> bool {
        let mut color = vec![0u8; self.nodes.len()];
        for start in 0..self.nodes.len() {
            if color[start] != 0 {
                continue;
            }
            color[start] = 1;
            let mut stack: Vec<(usize, usize)> = vec![(start, 0)];
            loop {
                let Some(&(node, edge_idx)) = stack.last() else {
                    break;
                };
                if edge_idx >= self.adj[node].len() {
                    color[node] = 2;
                    stack.pop();
                    continue;
                }
                stack.last_mut().expect("dfs stack is non-empty").1 += 1;
                match color[self.adj[node][edge_idx]] {
                    0 => {
                        color[self.adj[node][edge_idx]] = 1;
                        stack.push((self.adj[node][edge_idx], 0));
                    }
                    1 => return true,
                    _ => {}
                }
            }
        }
        false
    }

    /// Johnson-style enumeration of every simple directed cycle.
    ///
    /// Each cycle is reported once, rotated to start at its minimum
    /// local vertex; roots and successors are visited in ascending
    /// order, so the enumeration order is deterministic.
    fn for_each_vertex_cycle(
        &self,
        f: &mut dyn FnMut(&[usize]) -> ControlFlow<()>,
    ) -> ControlFlow<()> {
        let n = self.nodes.len();
        for root in 0..n {
            let mut blocked = vec![false; n];
            let mut blist: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); n];
            let mut stack = Vec::new();
            self.circuit(root, root, &mut stack, &mut blocked, &mut blist, f)?;
        }
        ControlFlow::Continue(())
    }

    fn circuit(
        &self,
        v: usize,
        root: usize,
        stack: &mut Vec<usize>,
        blocked: &mut Vec<bool>,
        blist: &mut Vec<BTreeSet<usize>>,
        f: &mut dyn FnMut(&[usize]) -> ControlFlow<()>,
    ) -> ControlFlow<(), bool> {
        stack.push(v);
        blocked[v] = true;
        let mut found = false;
        for &w in &self.adj[v] {
            if w < root {
                continue;
            }
            if w == root {
                f(stack)?;
                found = true;
            } else if !blocked[w] {
                found |= self.circuit(w, root, stack, blocked, blist, f)?;
            }
        }
        if found {
            unblock(v, blocked, blist);
        } else {
            for &w in &self.adj[v] {
                if w >= root {
                    blist[w].insert(v);
                }
            }
        }
        stack.pop();
        ControlFlow::Continue(found)
    }
}

fn unblock(v: usize, blocked: &mut [bool], blist: &mut [BTreeSet<usize>]) {
    blocked[v] = false;
    let pending = std::mem::take(&mut blist[v]);
    for w in pending {
        if blocked[w] {
            unblock(w, blocked, blist);
        }
    }
}

/// Walk the Cartesian product of per-edge event choices in
/// lexicographic order: every choice of parallel edges is a distinct
/// cycle.
fn for_each_event_word(
    edge_events: &[&[EventId]],
    f: &mut dyn FnMut(&[EventId]) -> ControlFlow<()>,
) -> ControlFlow<()> {
    let mut choice = vec![0usize; edge_events.len()];
    loop {
        let word: Vec<EventId> = choice
            .iter()
            .zip(edge_events)
            .map(|(&c, events)| events[c])
            .collect();
        f(&word)?;
        let mut i = edge_events.len();
        loop {
            if i == 0 {
                return ControlFlow::Continue(());
            }
            i -= 1;
            choice[i] += 1;
            if choice[i] < edge_events[i].len() {
                break;
            }
            choice[i] = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labeling::DiagnosisLabel;
    use loris_ir::alphabet::AlphabetTable;
    use loris_ir::automaton::{Automaton, AutomatonBuilder};

    fn strs(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn plant(
        n: usize,
        events: &[&str],
        observable: &[&str],
        faults: &[&str],
        transitions: &[(usize, &str, usize)],
    ) -> Automaton {
        let unobservable: Vec<&str> = events
            .iter()
            .copied()
            .filter(|e| !observable.contains(e))
            .collect();
        let table = AlphabetTable::build(
            strs(events),
            &strs(observable),
            &strs(&unobservable),
            &strs(faults),
        )
        .unwrap();
        let mut b = AutomatonBuilder::new(n, table);
        for &(src, sym, dst) in transitions {
            let event = b.alphabet().resolve(sym).unwrap();
            b.transition(src - 1, event, dst - 1);
        }
        b.initial([0]);
        b.finish().unwrap()
    }

    fn run(plant: &Automaton, mode: ReportMode) -> CycleAnalysis {
        let rec = Recognizer::build(plant);
        let obs = Observer::build(&rec, plant.alphabet());
        analyze(&obs, &rec, plant.alphabet(), mode)
    }

    #[test]
    fn ambiguous_self_loop_is_indeterminate() {
        // 1 -f-> 2 with both copies looping on a: never distinguishable.
        let g = plant(
            2,
            &["a", "f"],
            &["a"],
            &["f"],
            &[(1, "f", 2), (1, "a", 1), (2, "a", 2)],
        );
        let analysis = run(&g, ReportMode::Full);
        assert!(!analysis.diagnosable);
        assert_eq!(analysis.examined_cycles, 1);
        let cycle = &analysis.cycles[0];
        assert!(cycle.indeterminate);
        assert_eq!(cycle.events, vec!["a".to_string()]);
        assert_eq!(cycle.entry_label, DiagnosisLabel::Uncertain);
        assert!(cycle.steps.iter().all(|s| s.alpha_label.is_uncertain()
            && s.beta_label.is_uncertain()));
    }

    #[test]
    fn fault_branch_that_cannot_sustain_the_loop_is_determinate() {
        // After the fault, `a` is enabled once and then only `b`: the
        // uncertain self-loop on `a` is kept alive only by re-faulting,
        // so no single faulty run survives it.
        let g = plant(
            3,
            &["a", "b", "f"],
            &["a", "b"],
            &["f"],
            &[(1, "f", 2), (1, "a", 1), (2, "a", 3), (3, "b", 3)],
        );
        let analysis = run(&g, ReportMode::Full);
        assert!(analysis.diagnosable);
        assert_eq!(analysis.examined_cycles, 1);
        let cycle = &analysis.cycles[0];
        assert!(!cycle.indeterminate);
        // The trace alone stays uncertain; only the run-level expansion
        // resolves it.
        assert!(cycle.entry_label.is_uncertain());
        assert!(cycle.steps.iter().all(|s| s.beta_label.is_uncertain()));
    }

    #[test]
    fn two_state_ambiguous_cycle_is_reported_once() {
        // Twin a/b cycles on the normal and faulty side.
        let g = plant(
            4,
            &["a", "b", "f"],
            &["a", "b"],
            &["f"],
            &[
                (1, "f", 2),
                (1, "a", 3),
                (3, "b", 1),
                (2, "a", 4),
                (4, "b", 2),
            ],
        );
        let analysis = run(&g, ReportMode::Full);
        assert!(!analysis.diagnosable);
        assert_eq!(analysis.examined_cycles, 1);
        let cycle = &analysis.cycles[0];
        assert!(cycle.indeterminate);
        assert_eq!(cycle.macro_states.len(), 2);
        assert_eq!(cycle.events, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn parallel_edges_are_distinct_cycles() {
        let g = plant(
            2,
            &["a", "b", "f"],
            &["a", "b"],
            &["f"],
            &[
                (1, "f", 2),
                (1, "a", 1),
                (1, "b", 1),
                (2, "a", 2),
                (2, "b", 2),
            ],
        );
        let analysis = run(&g, ReportMode::Full);
        assert!(!analysis.diagnosable);
        assert_eq!(analysis.examined_cycles, 2);
        let words: Vec<&[String]> = analysis.cycles.iter().map(|c| c.events.as_slice()).collect();
        assert_eq!(words, vec![&["a".to_string()][..], &["b".to_string()][..]]);
    }

    #[test]
    fn fault_free_plant_has_no_cycles_to_examine() {
        let g = plant(1, &["a", "u"], &["a"], &[], &[(1, "a", 1), (1, "u", 1)]);
        let analysis = run(&g, ReportMode::Full);
        assert!(analysis.diagnosable);
        assert_eq!(analysis.examined_cycles, 0);
        assert!(analysis.cycles.is_empty());
    }

    #[test]
    fn verdict_only_keeps_just_the_witness() {
        let g = plant(
            2,
            &["a", "b", "f"],
            &["a", "b"],
            &["f"],
            &[
                (1, "f", 2),
                (1, "a", 1),
                (1, "b", 1),
                (2, "a", 2),
                (2, "b", 2),
            ],
        );
        let analysis = run(&g, ReportMode::VerdictOnly);
        assert!(!analysis.diagnosable);
        assert_eq!(analysis.examined_cycles, 1);
        assert_eq!(analysis.cycles.len(), 1);
        assert!(analysis.cycles[0].indeterminate);
    }

    #[test]
    fn alternating_fault_branches_across_two_loops_are_caught() {
        // The fault lands nondeterministically in state 2 or 3, and the
        // faulty side survives only by alternating the two observable
        // self-loop words (2 -a-> 3, 3 -c-> 2). Each self-loop on its
        // own is determinate; the composite walk is not.
        let g = plant(
            3,
            &["a", "c", "f"],
            &["a", "c"],
            &["f"],
            &[
                (1, "a", 1),
                (1, "c", 1),
                (1, "f", 2),
                (1, "f", 3),
                (2, "a", 3),
                (3, "c", 2),
            ],
        );
        let analysis = run(&g, ReportMode::Full);
        assert!(!analysis.diagnosable);
        assert_eq!(analysis.cycles.len(), 3);
        assert!(analysis.cycles[..2].iter().all(|c| !c.indeterminate));
        let witness = &analysis.cycles[2];
        assert!(witness.indeterminate);
        assert_eq!(witness.macro_states, vec![0, 0]);
        assert_eq!(witness.events.len(), 2);
    }

    #[test]
    fn johnson_enumerates_all_simple_cycles_in_order() {
        let sub = USubgraph {
            nodes: vec![10, 11, 12],
            adj: vec![vec![0, 1], vec![0, 2], vec![0]],
            events: IndexMap::new(),
        };
        let mut found = Vec::new();
        let _ = sub.for_each_vertex_cycle(&mut |stack| {
            found.push(stack.to_vec());
            ControlFlow::Continue(())
        });
        assert_eq!(found, vec![vec![0], vec![0, 1], vec![0, 1, 2]]);
    }

    #[test]
    fn johnson_short_circuits_on_break() {
        let sub = USubgraph {
            nodes: vec![10, 11],
            adj: vec![vec![0, 1], vec![0]],
            events: IndexMap::new(),
        };
        let mut found = 0;
        let flow = sub.for_each_vertex_cycle(&mut |_| {
            found += 1;
            ControlFlow::Break(())
        });
        assert_eq!(found, 1);
        assert!(flow.is_break());
    }
}
