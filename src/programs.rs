//! Built-in reference machines: the 2-, 3- and 4-state busy beaver champions and the
//! Marxen-Buntrock 6-state machine, each with its known outcome.

use crate::table::{Row, TransitionTable};
use crate::types::{Action, Direction, MachineError, Next, Outcome, Symbol};
use serde::Serialize;

use Direction::{Left as L, Right as R};
use Next::{Halt as H, State as S};

const fn act(write: Symbol, direction: Direction, next: Next) -> Option<Action> {
    Some(Action::new(write, direction, next))
}

struct Builtin {
    name: &'static str,
    description: &'static str,
    rows: &'static [Row],
    expected: Outcome,
}

static BUILTINS: [Builtin; 4] = [
    Builtin {
        name: "bb2",
        description: "2-state busy beaver champion",
        rows: &[
            [act(1, R, S(1)), act(1, L, S(1))],
            [act(1, L, S(0)), act(1, R, H)],
        ],
        expected: Outcome {
            steps: 6,
            cells: 4,
            ones: 4,
        },
    },
    Builtin {
        name: "bb3",
        description: "3-state busy beaver, maximum steps",
        rows: &[
            [act(1, R, S(1)), act(1, R, H)],
            [act(1, L, S(1)), act(0, R, S(2))],
            [act(1, L, S(2)), act(1, L, S(0))],
        ],
        expected: Outcome {
            steps: 21,
            cells: 5,
            ones: 5,
        },
    },
    Builtin {
        name: "bb4",
        description: "4-state busy beaver champion",
        rows: &[
            [act(1, R, S(1)), act(1, L, S(1))],
            [act(1, L, S(0)), act(0, L, S(2))],
            [act(1, R, H), act(1, L, S(3))],
            [act(1, R, S(3)), act(0, R, S(0))],
        ],
        expected: Outcome {
            steps: 107,
            cells: 14,
            ones: 13,
        },
    },
    Builtin {
        name: "bb6",
        description: "6-state Marxen-Buntrock machine (2001)",
        rows: &[
            [act(1, L, S(1)), act(1, L, S(0))],
            [act(1, R, S(2)), act(1, R, S(1))],
            [act(0, R, S(5)), act(1, R, S(3))],
            [act(1, L, S(0)), act(0, R, S(4))],
            [act(0, L, S(0)), act(1, R, S(2))],
            [act(1, L, S(4)), act(1, L, H)],
        ],
        expected: Outcome {
            steps: 13_122_572_797,
            cells: 204_918,
            ones: 136_612,
        },
    },
];

/// A built-in machine together with its known result.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub table: TransitionTable,
    pub description: &'static str,
    pub expected: Outcome,
}

lazy_static::lazy_static! {
    pub static ref MACHINES: Vec<CatalogEntry> = load();
}

fn load() -> Vec<CatalogEntry> {
    BUILTINS
        .iter()
        .filter_map(|builtin| {
            match TransitionTable::new(builtin.name, builtin.rows.to_vec()) {
                Ok(table) => Some(CatalogEntry {
                    table,
                    description: builtin.description,
                    expected: builtin.expected,
                }),
                Err(e) => {
                    log::error!("failed to load built-in machine '{}': {}", builtin.name, e);
                    None
                }
            }
        })
        .collect()
}

pub struct MachineCatalog;

impl MachineCatalog {
    /// Get the number of available machines
    pub fn count() -> usize {
        MACHINES.len()
    }

    /// Get a machine by its index
    pub fn get_by_index(index: usize) -> Result<&'static CatalogEntry, MachineError> {
        MACHINES
            .get(index)
            .ok_or_else(|| MachineError::UnknownMachine(format!("#{}", index)))
    }

    /// Get a machine by its name
    pub fn get_by_name(name: &str) -> Result<&'static CatalogEntry, MachineError> {
        MACHINES
            .iter()
            .find(|entry| entry.table.name() == name)
            .ok_or_else(|| MachineError::UnknownMachine(name.to_string()))
    }

    /// List all machine names
    pub fn names() -> Vec<&'static str> {
        MACHINES.iter().map(|entry| entry.table.name()).collect()
    }

    /// Get information about a machine by its index
    pub fn info(index: usize) -> Result<MachineInfo, MachineError> {
        let entry = Self::get_by_index(index)?;

        Ok(MachineInfo {
            index,
            name: entry.table.name().to_string(),
            description: entry.description.to_string(),
            state_count: entry.table.state_count(),
            transition_count: entry.table.transition_count(),
            expected: entry.expected,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MachineInfo {
    pub index: usize,
    pub name: String,
    pub description: String,
    pub state_count: usize,
    pub transition_count: usize,
    pub expected: Outcome,
}
