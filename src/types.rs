//! This module defines the core data structures and types used throughout the busy beaver
//! simulator, including symbols, directions, transition actions, execution results, and error types.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A tape symbol. Only `0` (blank) and `1` are valid.
pub type Symbol = u8;
/// Index of a non-halting state. State `0` is the start state.
pub type StateId = u8;

/// The blank symbol every freshly created cell holds.
pub const BLANK: Symbol = 0;
/// Number of symbols in the tape alphabet.
pub const SYMBOLS: usize = 2;
/// The maximum number of non-halting states a table may have.
pub const MAX_STATES: usize = StateId::MAX as usize;
/// Default progress cadence: one report every 2^26 steps.
pub const DEFAULT_REPORT_INTERVAL: u64 = 1 << 26;

/// Represents the possible directions the head can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one cell toward negative infinity.
    Left,
    /// Move the head one cell toward positive infinity.
    Right,
}

/// Where a transition sends the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Next {
    /// Continue in the given state.
    State(StateId),
    /// Enter the halting state; the simulation ends after this step.
    Halt,
}

/// The right-hand side of a transition: what to write, where to move, and which state follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub write: Symbol,
    pub direction: Direction,
    pub next: Next,
}

impl Action {
    pub const fn new(write: Symbol, direction: Direction, next: Next) -> Self {
        Self {
            write,
            direction,
            next,
        }
    }
}

/// Represents the outcome of a single execution step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The machine performed a step and has not halted.
    Continue,
    /// The machine is in the halting state.
    Halt,
}

/// A snapshot handed to the progress callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub steps: u64,
    pub cells: u64,
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "steps={} length={}", self.steps, self.cells)
    }
}

/// The three scalars produced by a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    /// Total steps executed, including the halting transition.
    pub steps: u64,
    /// Distinct cells created over the run.
    pub cells: u64,
    /// Cells holding `1` when the machine halted.
    pub ones: u64,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "steps={} length={} ones={}",
            self.steps, self.cells, self.ones
        )
    }
}

/// Represents the errors that can occur while building or running a machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MachineError {
    /// The table defines no states at all.
    #[error("Transition table '{0}' defines no states")]
    EmptyTable(String),
    /// The table has more states than a `StateId` can address.
    #[error("Transition table has {0} states, at most {max} are supported", max = MAX_STATES)]
    TooManyStates(usize),
    /// A transition writes something other than 0 or 1.
    #[error("Transition for state {state} reading {read} writes invalid symbol {write}")]
    InvalidSymbol {
        state: StateId,
        read: Symbol,
        write: Symbol,
    },
    /// A transition targets a state the table does not define.
    #[error("Transition for state {state} reading {read} targets undefined state {target}")]
    UndefinedState {
        state: StateId,
        read: Symbol,
        target: StateId,
    },
    /// A reachable (state, symbol) pair has no transition.
    #[error("No rule defined for state {0} and symbol {1}")]
    MissingTransition(StateId, Symbol),
    /// The tape could not grow any further.
    #[error("Tape exhausted after {0} cells")]
    TapeExhausted(u64),
    /// The run configuration is unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    /// The configured step limit was reached before the machine halted.
    #[error("Step limit reached after {steps} steps ({cells} cells) without halting")]
    StepLimitReached { steps: u64, cells: u64 },
    /// No built-in machine has the requested name.
    #[error("Unknown machine '{0}'")]
    UnknownMachine(String),
}
