//! Proptest strategies for generating small well-formed plant automata.

use proptest::prelude::*;

use crate::alphabet::AlphabetTable;
use crate::automaton::{Automaton, AutomatonBuilder};

/// Strategy for a small random plant suitable for property testing.
///
/// Generated plants have:
/// - 1–8 states, state 1 initial
/// - 2–4 events: the last is an unobservable fault `f`, the rest are
///   observable `a`, `b`, `c`
/// - 1–16 transitions over valid states and events
pub fn arb_automaton() -> impl Strategy<Value = Automaton> {
    (1..=8usize, 2..=4usize)
        .prop_flat_map(|(nstates, nevents)| {
            let triples = proptest::collection::vec(
                (0..nstates, 0..nevents, 0..nstates),
                1..=16,
            );
            (Just(nstates), Just(nevents), triples)
        })
        .prop_map(|(nstates, nevents, triples)| {
            let mut symbols: Vec<String> = (0..nevents - 1)
                .map(|i| char::from(b'a' + i as u8).to_string())
                .collect();
            symbols.push("f".to_string());
            let observable = symbols[..nevents - 1].to_vec();
            let unobservable = vec!["f".to_string()];
            let faults = vec!["f".to_string()];
            let alphabet = AlphabetTable::build(symbols, &observable, &unobservable, &faults)
                .expect("generated alphabet is well-formed");

            let mut builder = AutomatonBuilder::new(nstates, alphabet);
            for (src, event, dst) in triples {
                builder.transition(src, event, dst);
            }
            builder.initial([0]);
            builder.finish().expect("generated plant is well-formed")
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn generated_plants_are_well_formed(plant in arb_automaton()) {
            prop_assert!(plant.num_states() >= 1);
            prop_assert!(!plant.initial().is_empty());
            prop_assert_eq!(plant.alphabet().fault_events().count(), 1);
            prop_assert!(plant.alphabet().observable_events().count() >= 1);
            for t in plant.transitions() {
                prop_assert!(t.src < plant.num_states());
                prop_assert!(t.dst < plant.num_states());
            }
        }
    }
}
