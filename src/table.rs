//! This module defines the `TransitionTable`, the immutable data that drives a machine.
//!
//! Rows are indexed by state and hold one optional `Action` per read symbol. The halting
//! state has no row of its own; transitions reach it through `Next::Halt`.

use crate::analyzer::analyze;
use crate::types::{Action, MachineError, StateId, Symbol, SYMBOLS};

/// The transitions of one state, indexed by the symbol under the head.
pub type Row = [Option<Action>; SYMBOLS];

/// A validated transition table. State `0` is the start state.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionTable {
    name: String,
    rows: Vec<Row>,
}

impl TransitionTable {
    /// Builds a table and validates it before it can ever be run.
    ///
    /// # Returns
    ///
    /// * `Ok(TransitionTable)` if every reachable (state, symbol) pair has a well-formed entry.
    /// * `Err(MachineError)` describing the first problem the analyzer found.
    pub fn new(name: impl Into<String>, rows: Vec<Row>) -> Result<Self, MachineError> {
        let table = Self {
            name: name.into(),
            rows,
        };
        analyze(&table)?;
        Ok(table)
    }

    /// Returns the action for `state` reading `read`, if one is defined.
    #[inline]
    pub fn lookup(&self, state: StateId, read: Symbol) -> Option<&Action> {
        self.rows.get(state as usize)?.get(read as usize)?.as_ref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Returns the number of non-halting states.
    pub fn state_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns the number of defined (state, symbol) entries.
    pub fn transition_count(&self) -> usize {
        self.rows.iter().flatten().filter(|a| a.is_some()).count()
    }

    /// Builds a table without running the analyzer. Only for tests that need a broken table.
    #[cfg(test)]
    pub(crate) fn unchecked(name: &str, rows: Vec<Row>) -> Self {
        Self {
            name: name.to_string(),
            rows,
        }
    }
}
