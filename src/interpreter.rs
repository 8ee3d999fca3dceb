//! The interpreter engine.
//!
//! Features and behaviors:
//! - The tape starts as a single zero cell and grows on every rightward move.
//! - Moving left of cell 0 is fatal and aborts the run.
//! - Cell arithmetic wraps at the cell's width.
//! - `.` appends the active cell to the output buffer, which is returned when
//!   the run completes.
//! - `,` reads one line of input and parses it as an integer for the active cell.
//! - `[` and `]` jump to their partner as decided by the configured
//!   [`Matching`]. The instruction pointer advances by one after every
//!   instruction, jumps included, so a jump lands just past its target.
//! - Unmatched brackets run the instruction pointer past the end of the
//!   program, which ends the run normally.
//!
//! Quick start:
//!
//! ```
//! use bf_live::{EngineConfig, Interpreter, NoopObserver, ScriptedInput};
//!
//! let mut bf: Interpreter<u8> = Interpreter::new("+++ add three then print .", EngineConfig::default());
//! let output = bf.run(&mut ScriptedInput::empty(), &mut NoopObserver).expect("program should run");
//! assert_eq!(output, vec![3]);
//! ```

use std::thread;

use crate::config::EngineConfig;
use crate::input::InputSource;
use crate::loops::{LoopResolver, Matching};
use crate::observer::{Observer, Snapshot};
use crate::program::{Op, Program};
use crate::tape::{Cell, Tape};

/// Faults that abort a run. Each carries the index of the faulting instruction.
#[derive(Debug, thiserror::Error)]
pub enum ExecutionError {
    /// The cursor attempted to move left of cell 0.
    #[error("Pointer moved left of cell 0 at instruction {step}")]
    PointerUnderflow { step: usize },

    /// The input source had no line left for `,`.
    #[error("No input available at instruction {step}")]
    InputUnavailable { step: usize },

    /// Reading from the input source failed.
    #[error("I/O error at instruction {step}: {source}")]
    InputRead {
        step: usize,
        #[source]
        source: std::io::Error,
    },

    /// The input line was not an integer that fits in a cell.
    #[error("Invalid input '{line}' at instruction {step}: expected an integer from 0 to {max}")]
    InvalidInput { step: usize, line: String, max: u128 },
}

impl ExecutionError {
    /// Index of the instruction that faulted.
    pub fn step(&self) -> usize {
        match self {
            ExecutionError::PointerUnderflow { step }
            | ExecutionError::InputUnavailable { step }
            | ExecutionError::InputRead { step, .. }
            | ExecutionError::InvalidInput { step, .. } => *step,
        }
    }
}

/// A single execution of one program.
///
/// The interpreter owns the program, tape, cursor, instruction pointer and
/// output buffer. Nothing is shared between instances, and an instance is
/// meant to be dropped once its run is over.
pub struct Interpreter<C: Cell> {
    program: Program,
    resolver: LoopResolver,
    tape: Tape<C>,
    cursor: usize,
    step: usize,
    output: Vec<u8>,
    config: EngineConfig,
}

impl<C: Cell> Interpreter<C> {
    /// Create an interpreter from raw source; comment characters are dropped.
    pub fn new(source: &str, config: EngineConfig) -> Self {
        Self::with_program(Program::parse(source), config)
    }

    pub fn with_program(program: Program, config: EngineConfig) -> Self {
        let resolver = LoopResolver::new(&program, config.matching);
        Self {
            program,
            resolver,
            tape: Tape::new(),
            cursor: 0,
            step: 0,
            output: Vec::new(),
            config,
        }
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn tape(&self) -> &Tape<C> {
        &self.tape
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Index of the next instruction to execute.
    pub fn step_index(&self) -> usize {
        self.step
    }

    pub fn output(&self) -> &[u8] {
        &self.output
    }

    pub fn matching(&self) -> Matching {
        self.resolver.matching()
    }

    pub fn is_finished(&self) -> bool {
        self.step >= self.program.len()
    }

    /// A read-only view of the current state.
    pub fn snapshot(&self) -> Snapshot<'_, C> {
        Snapshot {
            cells: self.tape.cells(),
            cursor: self.cursor,
            program: &self.program,
            step: self.step,
            output: &self.output,
        }
    }

    /// Execute the instruction at the instruction pointer and advance it.
    ///
    /// Returns the executed operator, or `None` if the program is already
    /// finished. On error the instruction pointer stays on the faulting
    /// instruction.
    pub fn step<I>(&mut self, input: &mut I) -> Result<Option<Op>, ExecutionError>
    where
        I: InputSource + ?Sized,
    {
        let Some(op) = self.program.get(self.step) else {
            return Ok(None);
        };

        match op {
            Op::Right => {
                self.cursor += 1;
                self.tape.ensure(self.cursor);
            }
            Op::Left => {
                if self.cursor == 0 {
                    return Err(ExecutionError::PointerUnderflow { step: self.step });
                }
                self.cursor -= 1;
            }
            Op::Inc => self.tape.increment(self.cursor),
            Op::Dec => self.tape.decrement(self.cursor),
            Op::Output => self.tape.read(self.cursor).emit(&mut self.output),
            Op::Input => {
                let value = self.read_input(input)?;
                self.tape.write(self.cursor, value);
            }
            Op::LoopStart => {
                if self.tape.read(self.cursor).is_zero() {
                    self.step = self.resolver.forward(&self.program, self.step);
                }
            }
            Op::LoopEnd => {
                if !self.tape.read(self.cursor).is_zero() {
                    self.step = self.resolver.backward(&self.program, self.step);
                }
            }
        }

        self.step += 1;
        Ok(Some(op))
    }

    /// Run to completion, handing a snapshot to `observer` after every
    /// instruction and sleeping for the configured delay in between.
    ///
    /// Returns a copy of the output buffer on completion; the buffer itself
    /// stays in place for later snapshots. On a fault nothing is returned.
    pub fn run<I, O>(&mut self, input: &mut I, observer: &mut O) -> Result<Vec<u8>, ExecutionError>
    where
        I: InputSource + ?Sized,
        O: Observer<C> + ?Sized,
    {
        while !self.is_finished() {
            self.step(input)?;
            observer.observe(&self.snapshot());
            if !self.config.delay.is_zero() {
                thread::sleep(self.config.delay);
            }
        }
        Ok(self.output.clone())
    }

    fn read_input<I>(&mut self, input: &mut I) -> Result<C, ExecutionError>
    where
        I: InputSource + ?Sized,
    {
        let step = self.step;
        let line = input
            .read_line()
            .map_err(|source| ExecutionError::InputRead { step, source })?
            .ok_or(ExecutionError::InputUnavailable { step })?;

        line.trim().parse::<C>().map_err(|_| ExecutionError::InvalidInput {
            step,
            line,
            max: cell_max::<C>(),
        })
    }
}

fn cell_max<C: Cell>() -> u128 {
    (1u128 << C::BITS) - 1
}
