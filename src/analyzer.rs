//! This module provides functions for analyzing transition tables to detect malformed
//! configurations before execution. This includes checks for the table's shape, written
//! symbols, target states, and transitions that a run could reach but the table leaves undefined.

use crate::table::TransitionTable;
use crate::types::{Action, MachineError, Next, StateId, Symbol, BLANK, MAX_STATES, SYMBOLS};

/// Analyzes a `TransitionTable` for structural and logical errors.
///
/// The checks run in order and the first failure is returned, so later checks can rely on
/// the guarantees of earlier ones (for example, reachability only follows valid targets).
///
/// # Returns
///
/// * `Ok(())` if the table can be run without ever failing a lookup.
/// * `Err(MachineError)` for the first problem found.
pub fn analyze(table: &TransitionTable) -> Result<(), MachineError> {
    [
        check_structure,
        check_symbols,
        check_next_states,
        check_reachable_transitions,
    ]
    .iter()
    .try_for_each(|check| check(table))?;

    let unreachable = unreachable_states(table);
    if !unreachable.is_empty() {
        log::debug!(
            "table '{}': unreachable states {:?}",
            table.name(),
            unreachable
        );
    }
    if !halts_reachable(table) {
        log::debug!(
            "table '{}': no reachable transition enters the halting state",
            table.name()
        );
    }

    Ok(())
}

/// Computes which (state, symbol) pairs a run could ever look up.
///
/// The start state reads a blank cell first. After any transition into state `s` the head
/// may sit on either symbol, so both `(s, 0)` and `(s, 1)` count as reachable.
pub fn reachable_pairs(table: &TransitionTable) -> Vec<[bool; SYMBOLS]> {
    let mut seen = vec![[false; SYMBOLS]; table.state_count()];
    let mut pending: Vec<(StateId, Symbol)> = vec![(0, BLANK)];

    while let Some((state, read)) = pending.pop() {
        let Some(slot) = seen
            .get_mut(state as usize)
            .and_then(|row| row.get_mut(read as usize))
        else {
            continue;
        };
        if *slot {
            continue;
        }
        *slot = true;

        if let Some(Action {
            next: Next::State(next),
            ..
        }) = table.lookup(state, read)
        {
            pending.extend((0..SYMBOLS as Symbol).map(|symbol| (*next, symbol)));
        }
    }

    seen
}

/// Returns the states no run can ever enter.
pub fn unreachable_states(table: &TransitionTable) -> Vec<StateId> {
    reachable_pairs(table)
        .iter()
        .enumerate()
        .filter(|(_, pairs)| !pairs.iter().any(|&reached| reached))
        .map(|(state, _)| state as StateId)
        .collect()
}

/// Checks whether any reachable transition enters the halting state.
///
/// `false` proves the machine never halts; `true` proves nothing.
pub fn halts_reachable(table: &TransitionTable) -> bool {
    reachable_pairs(table)
        .iter()
        .enumerate()
        .flat_map(|(state, pairs)| {
            pairs
                .iter()
                .enumerate()
                .filter(|(_, &reached)| reached)
                .map(move |(read, _)| (state as StateId, read as Symbol))
        })
        .any(|(state, read)| {
            table
                .lookup(state, read)
                .is_some_and(|action| action.next == Next::Halt)
        })
}

/// Checks that the table has at least one and at most `MAX_STATES` states.
fn check_structure(table: &TransitionTable) -> Result<(), MachineError> {
    if table.state_count() == 0 {
        return Err(MachineError::EmptyTable(table.name().to_string()));
    }

    if table.state_count() > MAX_STATES {
        return Err(MachineError::TooManyStates(table.state_count()));
    }

    Ok(())
}

/// Checks that every transition writes a binary symbol.
fn check_symbols(table: &TransitionTable) -> Result<(), MachineError> {
    entries(table)
        .find(|(_, _, action)| action.write as usize >= SYMBOLS)
        .map_or(Ok(()), |(state, read, action)| {
            Err(MachineError::InvalidSymbol {
                state,
                read,
                write: action.write,
            })
        })
}

/// Checks that every `Next::State` target names a row of the table.
fn check_next_states(table: &TransitionTable) -> Result<(), MachineError> {
    entries(table)
        .find_map(|(state, read, action)| match action.next {
            Next::State(target) if target as usize >= table.state_count() => {
                Some(MachineError::UndefinedState {
                    state,
                    read,
                    target,
                })
            }
            _ => None,
        })
        .map_or(Ok(()), Err)
}

/// Checks that every reachable (state, symbol) pair has an entry.
fn check_reachable_transitions(table: &TransitionTable) -> Result<(), MachineError> {
    for (state, pairs) in reachable_pairs(table).iter().enumerate() {
        for (read, &reached) in pairs.iter().enumerate() {
            let (state, read) = (state as StateId, read as Symbol);
            if reached && table.lookup(state, read).is_none() {
                return Err(MachineError::MissingTransition(state, read));
            }
        }
    }

    Ok(())
}

/// Iterates over every defined entry as `(state, read, action)`.
fn entries(table: &TransitionTable) -> impl Iterator<Item = (StateId, Symbol, &Action)> {
    table.rows().iter().enumerate().flat_map(|(state, row)| {
        row.iter().enumerate().filter_map(move |(read, action)| {
            action
                .as_ref()
                .map(|action| (state as StateId, read as Symbol, action))
        })
    })
}
