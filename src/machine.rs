//! This module defines the `TuringMachine` struct, which executes a binary-alphabet transition
//! table on an unbounded tape. It owns the table, the tape, the current state, and the step
//! counter, and drives the step loop until the halting state is entered.

use crate::config::RunConfig;
use crate::table::TransitionTable;
use crate::tape::Tape;
use crate::types::{MachineError, Next, Outcome, Progress, Step};

/// A single-tape, two-symbol Turing Machine.
///
/// The machine starts in state `0` on one blank cell. Each step reads the head cell, looks up
/// the transition, writes, moves, switches state, and counts the step, in that order.
pub struct TuringMachine {
    table: TransitionTable,
    tape: Tape,
    state: Next,
    step_count: u64,
    preallocate: usize,
}

impl TuringMachine {
    /// Creates a new `TuringMachine` for the given table, positioned on a single blank cell.
    pub fn new(table: TransitionTable) -> Self {
        Self {
            table,
            tape: Tape::new(),
            state: Next::State(0),
            step_count: 0,
            preallocate: 0,
        }
    }

    /// Creates a new `TuringMachine` whose tape reserves `cells` cells up front.
    pub fn with_capacity(table: TransitionTable, cells: usize) -> Result<Self, MachineError> {
        Ok(Self {
            table,
            tape: Tape::with_capacity(cells)?,
            state: Next::State(0),
            step_count: 0,
            preallocate: cells,
        })
    }

    /// Executes a single step.
    ///
    /// # Returns
    ///
    /// * `Ok(Step::Continue)` if the step was applied and the machine is still running.
    /// * `Ok(Step::Halt)` if this step entered the halting state, or the machine had already halted.
    ///   The halting transition's write and move are applied before it returns.
    /// * `Err(MachineError)` if the lookup failed or the tape could not grow.
    #[inline]
    pub fn step(&mut self) -> Result<Step, MachineError> {
        let Next::State(state) = self.state else {
            return Ok(Step::Halt);
        };

        let read = self.tape.current_value();
        let action = *self
            .table
            .lookup(state, read)
            .ok_or(MachineError::MissingTransition(state, read))?;

        self.tape.write(action.write);
        self.tape.move_head(action.direction)?;
        self.state = action.next;
        self.step_count += 1;

        Ok(match action.next {
            Next::State(_) => Step::Continue,
            Next::Halt => Step::Halt,
        })
    }

    /// Runs the machine until it halts.
    ///
    /// `report` is called with a progress snapshot every `config.report_interval` steps. It
    /// only observes the run; skipping it changes nothing about the outcome. The halting step
    /// is never reported, even when it falls on the interval.
    ///
    /// # Returns
    ///
    /// * `Ok(Outcome)` once the halting state is entered.
    /// * `Err(MachineError::StepLimitReached)` if `config.step_limit` steps pass without halting.
    ///   No step beyond the limit is executed; a limit of `0` fails before the first step.
    /// * `Err(MachineError)` for an invalid configuration or a failed step.
    pub fn run<F>(&mut self, config: &RunConfig, mut report: F) -> Result<Outcome, MachineError>
    where
        F: FnMut(&Progress),
    {
        let mask = config.validate()?;
        let limit = config.step_limit.unwrap_or(u64::MAX);

        log::info!(
            "running '{}' ({} states, {} transitions)",
            self.table.name(),
            self.table.state_count(),
            self.table.transition_count()
        );

        loop {
            if self.step_count >= limit && !self.is_halted() {
                log::warn!(
                    "'{}' did not halt within {} steps",
                    self.table.name(),
                    limit
                );
                return Err(MachineError::StepLimitReached {
                    steps: self.step_count,
                    cells: self.tape.len(),
                });
            }

            if self.step()? == Step::Halt {
                break;
            }

            if let Some(mask) = mask {
                if self.step_count & mask == 0 {
                    report(&self.progress());
                }
            }
        }

        let outcome = self.outcome();
        log::info!("'{}' halted: {}", self.table.name(), outcome);
        Ok(outcome)
    }

    /// Returns the current step count and tape length.
    pub fn progress(&self) -> Progress {
        Progress {
            steps: self.step_count,
            cells: self.tape.len(),
        }
    }

    /// Returns the step count, tape length, and the number of 1s currently on the tape.
    ///
    /// Counting the 1s walks the whole tape.
    pub fn outcome(&self) -> Outcome {
        Outcome {
            steps: self.step_count,
            cells: self.tape.len(),
            ones: self.tape.scan_ones_from_leftmost(),
        }
    }

    /// Returns the current state, or `Next::Halt` once the machine has halted.
    pub fn state(&self) -> Next {
        self.state
    }

    pub fn is_halted(&self) -> bool {
        self.state == Next::Halt
    }

    /// Returns the total number of steps executed.
    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    /// Resets the machine to its initial configuration: state `0` on a fresh blank tape.
    pub fn reset(&mut self) -> Result<(), MachineError> {
        self.tape = Tape::with_capacity(self.preallocate)?;
        self.state = Next::State(0);
        self.step_count = 0;
        Ok(())
    }
}

/// Builds a machine for `table` according to `config` and runs it to completion.
pub fn run<F>(table: TransitionTable, config: &RunConfig, report: F) -> Result<Outcome, MachineError>
where
    F: FnMut(&Progress),
{
    TuringMachine::with_capacity(table, config.preallocate)?.run(config, report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Row;
    use crate::types::{Action, Direction, StateId, Symbol};

    fn act(write: Symbol, direction: Direction, next: Next) -> Option<Action> {
        Some(Action::new(write, direction, next))
    }

    fn bb4() -> TransitionTable {
        use Direction::{Left as L, Right as R};
        use Next::{Halt as H, State as S};

        TransitionTable::new(
            "bb4",
            vec![
                [act(1, R, S(1)), act(1, L, S(1))],
                [act(1, L, S(0)), act(0, L, S(2))],
                [act(1, R, H), act(1, L, S(3))],
                [act(1, R, S(3)), act(0, R, S(0))],
            ],
        )
        .unwrap()
    }

    /// `k` states, each writing a 1 and moving left; the last one halts.
    fn left_walker(k: usize) -> TransitionTable {
        let rows: Vec<Row> = (0..k)
            .map(|i| {
                let next = if i + 1 == k {
                    Next::Halt
                } else {
                    Next::State((i + 1) as StateId)
                };
                [act(1, Direction::Left, next), act(1, Direction::Left, next)]
            })
            .collect();
        TransitionTable::new("left walker", rows).unwrap()
    }

    fn runaway() -> TransitionTable {
        TransitionTable::new(
            "runaway",
            vec![[
                act(1, Direction::Right, Next::State(0)),
                act(1, Direction::Right, Next::State(0)),
            ]],
        )
        .unwrap()
    }

    fn quiet() -> RunConfig {
        RunConfig::default().with_report_interval(None)
    }

    #[test]
    fn test_machine_creation() {
        let machine = TuringMachine::new(bb4());

        assert_eq!(machine.state(), Next::State(0));
        assert_eq!(machine.step_count(), 0);
        assert_eq!(machine.tape().len(), 1);
        assert!(!machine.is_halted());
    }

    #[test]
    fn test_single_step() {
        let mut machine = TuringMachine::new(bb4());

        assert_eq!(machine.step(), Ok(Step::Continue));
        assert_eq!(machine.state(), Next::State(1));
        assert_eq!(machine.step_count(), 1);
        assert_eq!(machine.tape().head_offset(), 1);
        assert_eq!(machine.tape().iter().collect::<Vec<_>>(), vec![1, 0]);
    }

    #[test]
    fn test_bb4_run() {
        let mut machine = TuringMachine::new(bb4());
        let outcome = machine.run(&quiet(), |_| {}).unwrap();

        assert_eq!(
            outcome,
            Outcome {
                steps: 107,
                cells: 14,
                ones: 13
            }
        );
        assert_eq!(machine.tape().grown_left(), 10);
        assert_eq!(machine.tape().grown_right(), 3);
        assert!(machine.is_halted());
    }

    #[test]
    fn test_halting_step_is_applied() {
        let table = TransitionTable::new(
            "one step",
            vec![[act(1, Direction::Right, Next::Halt), None]],
        )
        .unwrap();
        let mut machine = TuringMachine::new(table);

        let outcome = machine.run(&quiet(), |_| {}).unwrap();

        // The halting move still creates the neighbour cell.
        assert_eq!(
            outcome,
            Outcome {
                steps: 1,
                cells: 2,
                ones: 1
            }
        );
        assert_eq!(machine.tape().head_offset(), 1);
        assert_eq!(machine.tape().iter().collect::<Vec<_>>(), vec![1, 0]);
    }

    #[test]
    fn test_halting_step_writing_blank() {
        let table = TransitionTable::new(
            "blank halt",
            vec![[act(0, Direction::Left, Next::Halt), None]],
        )
        .unwrap();

        let outcome = run(table, &quiet(), |_| {}).unwrap();
        assert_eq!(outcome.steps, 1);
        assert_eq!(outcome.ones, 0);
    }

    #[test]
    fn test_left_growth() {
        for k in [1, 5, 40] {
            let mut machine = TuringMachine::new(left_walker(k));
            let outcome = machine.run(&quiet(), |_| {}).unwrap();
            let tape = machine.tape();

            assert_eq!(outcome.steps, k as u64);
            assert_eq!(outcome.cells, k as u64 + 1);
            assert_eq!(outcome.ones, k as u64);
            assert_eq!(tape.grown_left(), k as u64);
            assert_eq!(tape.grown_right(), 0);
            assert_eq!(tape.leftmost(), tape.head());
        }
    }

    #[test]
    fn test_step_after_halt_is_noop() {
        let mut machine = TuringMachine::new(left_walker(2));
        machine.run(&quiet(), |_| {}).unwrap();
        let before = machine.outcome();

        assert_eq!(machine.step(), Ok(Step::Halt));
        assert_eq!(machine.outcome(), before);
    }

    #[test]
    fn test_cells_bounded_by_steps() {
        let mut machine = TuringMachine::new(bb4());
        while machine.step().unwrap() == Step::Continue {
            let cells = machine.tape().len();
            assert!(cells >= 1);
            assert!(cells <= machine.step_count() + 1);
        }
    }

    #[test]
    fn test_deterministic() {
        let first = run(bb4(), &quiet(), |_| {}).unwrap();
        let second = run(bb4(), &quiet(), |_| {}).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_outcome_is_idempotent() {
        let mut machine = TuringMachine::new(bb4());
        let outcome = machine.run(&quiet(), |_| {}).unwrap();
        assert_eq!(machine.outcome(), outcome);
        assert_eq!(machine.outcome(), outcome);
    }

    #[test]
    fn test_report_cadence() {
        let config = RunConfig::default().with_report_interval(Some(16));
        let mut reports = Vec::new();

        let outcome = run(bb4(), &config, |progress| reports.push(*progress)).unwrap();

        let steps: Vec<u64> = reports.iter().map(|p| p.steps).collect();
        assert_eq!(steps, vec![16, 32, 48, 64, 80, 96]);
        assert!(reports.iter().all(|p| p.cells <= outcome.cells));
    }

    #[test]
    fn test_reports_do_not_change_outcome() {
        let every_step = RunConfig::default().with_report_interval(Some(1));
        let mut calls = 0;

        let reported = run(bb4(), &every_step, |_| calls += 1).unwrap();
        let silent = run(bb4(), &quiet(), |_| {}).unwrap();

        assert_eq!(reported, silent);
        // The halting step ends the loop before its report.
        assert_eq!(calls, 106);
    }

    #[test]
    fn test_preallocation_does_not_change_outcome() {
        let config = quiet().with_preallocate(200_000);
        let outcome = run(bb4(), &config, |_| {}).unwrap();
        assert_eq!(outcome.cells, 14);
    }

    #[test]
    fn test_step_limit() {
        let config = quiet().with_step_limit(Some(1000));
        let result = run(runaway(), &config, |_| {});

        assert_eq!(
            result,
            Err(MachineError::StepLimitReached {
                steps: 1000,
                cells: 1001
            })
        );
    }

    #[test]
    fn test_zero_step_limit_runs_nothing() {
        let config = quiet().with_step_limit(Some(0));
        assert_eq!(
            run(bb4(), &config, |_| {}),
            Err(MachineError::StepLimitReached { steps: 0, cells: 1 })
        );

        let halts_at_once = TransitionTable::new(
            "one step",
            vec![[act(1, Direction::Right, Next::Halt), None]],
        )
        .unwrap();
        let mut machine = TuringMachine::new(halts_at_once);
        assert!(machine.run(&config, |_| {}).is_err());
        assert_eq!(machine.step_count(), 0);
        assert_eq!(machine.tape().len(), 1);
    }

    #[test]
    fn test_step_limit_never_overshoots() {
        for limit in [1, 2, 50] {
            let config = quiet().with_step_limit(Some(limit));
            let mut machine = TuringMachine::new(runaway());
            assert!(machine.run(&config, |_| {}).is_err());
            assert_eq!(machine.step_count(), limit);
        }
    }

    #[test]
    fn test_halting_step_on_interval_is_not_reported() {
        // bb2 halts on step 6; with an interval of 2 the reports land on 2 and 4 only.
        let table = TransitionTable::new(
            "bb2",
            vec![
                [
                    act(1, Direction::Right, Next::State(1)),
                    act(1, Direction::Left, Next::State(1)),
                ],
                [
                    act(1, Direction::Left, Next::State(0)),
                    act(1, Direction::Right, Next::Halt),
                ],
            ],
        )
        .unwrap();
        let config = RunConfig::default().with_report_interval(Some(2));
        let mut steps = Vec::new();

        let outcome = run(table, &config, |progress| steps.push(progress.steps)).unwrap();

        assert_eq!(outcome.steps, 6);
        assert_eq!(steps, vec![2, 4]);
    }

    #[test]
    fn test_step_limit_equal_to_halting_step() {
        let config = quiet().with_step_limit(Some(107));
        assert_eq!(run(bb4(), &config, |_| {}).map(|o| o.steps), Ok(107));
    }

    #[test]
    fn test_invalid_config() {
        let config = RunConfig::default().with_report_interval(Some(100));
        let result = run(bb4(), &config, |_| {});
        assert!(matches!(result, Err(MachineError::InvalidConfig(_))));
    }

    #[test]
    fn test_missing_transition_surfaces_as_error() {
        let table = TransitionTable::unchecked(
            "broken",
            vec![[act(1, Direction::Right, Next::State(0)), None]],
        );
        let mut machine = TuringMachine::new(table);
        machine.step().unwrap();
        machine.tape.write(1);
        assert_eq!(machine.step(), Err(MachineError::MissingTransition(0, 1)));
    }

    #[test]
    fn test_reset() {
        let mut machine = TuringMachine::with_capacity(bb4(), 1024).unwrap();
        let first = machine.run(&quiet(), |_| {}).unwrap();

        machine.reset().unwrap();
        assert_eq!(machine.state(), Next::State(0));
        assert_eq!(machine.step_count(), 0);
        assert_eq!(machine.tape().len(), 1);

        let second = machine.run(&quiet(), |_| {}).unwrap();
        assert_eq!(first, second);
    }
}
