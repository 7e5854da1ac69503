//! Per-table summary request state, owned by the consumer (CLI or viewer).
//!
//! Keys are `(slide_number, table_index)`; extraction itself never touches
//! this state.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Lifecycle of one table's summary request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SummaryState {
    /// No summary has been requested for this table.
    NotRequested,

    /// A request is in flight.
    Pending,

    /// The summary arrived.
    Ready(String),

    /// The request failed; holds the rendered error.
    Failed(String),
}

/// Key identifying one table within a deck.
pub type TableKey = (usize, usize);

/// Tracks summary state per table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummaryLedger {
    entries: HashMap<TableKey, SummaryState>,
}

impl SummaryLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// State for a table; `NotRequested` when never touched.
    pub fn state(&self, slide_number: usize, table_index: usize) -> &SummaryState {
        self.entries
            .get(&(slide_number, table_index))
            .unwrap_or(&SummaryState::NotRequested)
    }

    /// Record a state transition for a table.
    pub fn set(&mut self, slide_number: usize, table_index: usize, state: SummaryState) {
        self.entries.insert((slide_number, table_index), state);
    }

    /// All ready summaries, in deck order.
    pub fn ready(&self) -> Vec<(TableKey, &str)> {
        let mut ready: Vec<(TableKey, &str)> = self
            .entries
            .iter()
            .filter_map(|(key, state)| match state {
                SummaryState::Ready(text) => Some((*key, text.as_str())),
                _ => None,
            })
            .collect();
        ready.sort_by_key(|(key, _)| *key);
        ready
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untouched_table_is_not_requested() {
        let ledger = SummaryLedger::new();
        assert_eq!(ledger.state(1, 0), &SummaryState::NotRequested);
    }

    #[test]
    fn test_transitions_are_recorded_per_table() {
        let mut ledger = SummaryLedger::new();
        ledger.set(2, 0, SummaryState::Pending);
        ledger.set(2, 1, SummaryState::Ready("done".into()));
        ledger.set(2, 0, SummaryState::Failed("timeout".into()));

        assert_eq!(ledger.state(2, 0), &SummaryState::Failed("timeout".into()));
        assert_eq!(ledger.state(2, 1), &SummaryState::Ready("done".into()));
        assert_eq!(ledger.state(3, 0), &SummaryState::NotRequested);
    }

    #[test]
    fn test_ready_summaries_in_deck_order() {
        let mut ledger = SummaryLedger::new();
        ledger.set(3, 0, SummaryState::Ready("c".into()));
        ledger.set(1, 1, SummaryState::Ready("b".into()));
        ledger.set(1, 0, SummaryState::Ready("a".into()));
        ledger.set(2, 0, SummaryState::Failed("x".into()));

        let ready = ledger.ready();
        assert_eq!(
            ready,
            vec![((1, 0), "a"), ((1, 1), "b"), ((3, 0), "c")]
        );
    }
}
