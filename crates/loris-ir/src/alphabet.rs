use indexmap::IndexMap;

use crate::automaton::ModelError;

/// A unique identifier for an event of the plant alphabet.
pub type EventId = usize;

/// Observation class of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observability {
    /// The event is visible to the diagnoser.
    Observable,
    /// The event is silent; the diagnoser only sees its consequences.
    Unobservable,
}

/// The interned event alphabet with its observation partition.
///
/// Events carry dense ids `0..len()` in declaration order. The table is
/// immutable after construction; every later stage stores `EventId`s and
/// borrows the table for symbol and classification lookups. Fault
/// membership is orthogonal to the observation class: a fault event is
/// usually unobservable, but an observable fault is accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlphabetTable {
    index: IndexMap<String, EventId>,
    classes: Vec<Observability>,
    faults: Vec<bool>,
}

impl AlphabetTable {
    /// Build the table from the declared symbols and the three
    /// classification lists of the input format.
    ///
    /// Fails if a classification names a symbol outside the alphabet, if
    /// a symbol is listed as both observable and unobservable, or if a
    /// symbol is listed in neither class.
    pub fn build(
        symbols: Vec<String>,
        observable: &[String],
        unobservable: &[String],
        faults: &[String],
    ) -> Result<Self, ModelError> {
        let mut index = IndexMap::with_capacity(symbols.len());
        for symbol in symbols {
            let next = index.len();
            index.entry(symbol).or_insert(next);
        }

        let mut classes: Vec<Option<Observability>> = vec![None; index.len()];
        for symbol in observable {
            let id = resolve_symbol(&index, symbol)?;
            if classes[id].is_some() {
                return Err(ModelError::DuplicateClassification(symbol.clone()));
            }
            classes[id] = Some(Observability::Observable);
        }
        for symbol in unobservable {
            let id = resolve_symbol(&index, symbol)?;
            if classes[id].is_some() {
                return Err(ModelError::DuplicateClassification(symbol.clone()));
            }
            classes[id] = Some(Observability::Unobservable);
        }

        let classes = classes
            .into_iter()
            .enumerate()
            .map(|(id, class)| {
                class.ok_or_else(|| {
                    let symbol = index.get_index(id).map(|(s, _)| s.clone()).unwrap_or_default();
                    ModelError::UnclassifiedEvent(symbol)
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut fault_flags = vec![false; index.len()];
        for symbol in faults {
            let id = resolve_symbol(&index, symbol)?;
            fault_flags[id] = true;
        }

        Ok(Self {
            index,
            classes,
            faults: fault_flags,
        })
    }

    /// Number of events in the alphabet.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Look up an event id by its symbol.
    pub fn resolve(&self, symbol: &str) -> Option<EventId> {
        self.index.get(symbol).copied()
    }

    /// The symbol of an event.
    pub fn symbol(&self, event: EventId) -> &str {
        self.index
            .get_index(event)
            .map(|(s, _)| s.as_str())
            .expect("event id out of alphabet range")
    }

    pub fn is_observable(&self, event: EventId) -> bool {
        self.classes[event] == Observability::Observable
    }

    pub fn is_fault(&self, event: EventId) -> bool {
        self.faults[event]
    }

    /// All event ids in id order.
    pub fn events(&self) -> impl Iterator<Item = EventId> {
        0..self.len()
    }

    pub fn observable_events(&self) -> impl Iterator<Item = EventId> + '_ {
        self.events().filter(|&e| self.is_observable(e))
    }

    pub fn unobservable_events(&self) -> impl Iterator<Item = EventId> + '_ {
        self.events().filter(|&e| !self.is_observable(e))
    }

    pub fn fault_events(&self) -> impl Iterator<Item = EventId> + '_ {
        self.events().filter(|&e| self.is_fault(e))
    }
}

fn resolve_symbol(index: &IndexMap<String, EventId>, symbol: &str) -> Result<EventId, ModelError> {
    index
        .get(symbol)
        .copied()
        .ok_or_else(|| ModelError::UnknownEvent(symbol.to_string()))
}
