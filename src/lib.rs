//! This crate provides the core logic for a busy beaver simulator.
//! It includes modules for the lazily grown two-way tape, validated transition tables,
//! the step-execution engine, and a catalog of well-known reference machines.

pub mod analyzer;
pub mod config;
pub mod machine;
pub mod programs;
pub mod table;
pub mod tape;
pub mod types;

/// Re-exports the `analyze` function from the analyzer module.
pub use analyzer::analyze;
/// Re-exports the `RunConfig` struct from the config module.
pub use config::RunConfig;
/// Re-exports the `TuringMachine` struct and the `run` helper from the machine module.
pub use machine::{run, TuringMachine};
/// Re-exports `CatalogEntry`, `MachineCatalog`, `MachineInfo`, and `MACHINES` from the programs module.
pub use programs::{CatalogEntry, MachineCatalog, MachineInfo, MACHINES};
/// Re-exports the `TransitionTable` struct and its `Row` type from the table module.
pub use table::{Row, TransitionTable};
/// Re-exports the `Tape` struct from the tape module.
pub use tape::Tape;
/// Re-exports the core types used to describe machines and their results.
pub use types::{Action, Direction, MachineError, Next, Outcome, Progress, StateId, Step, Symbol};
