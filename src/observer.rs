//! Read-only views of interpreter state for whoever is watching a run.

use crate::program::Program;
use crate::tape::Cell;

/// Interpreter state right after an instruction has executed.
///
/// `step` is the index of the next instruction to run; it may equal or
/// exceed `program.len()` once the run is over.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a, C: Cell> {
    pub cells: &'a [C],
    pub cursor: usize,
    pub program: &'a Program,
    pub step: usize,
    pub output: &'a [u8],
}

impl<C: Cell> Snapshot<'_, C> {
    /// Value of the active cell.
    pub fn current(&self) -> C {
        self.cells[self.cursor]
    }

    pub fn is_finished(&self) -> bool {
        self.step >= self.program.len()
    }
}

/// Receives one snapshot per executed instruction.
pub trait Observer<C: Cell> {
    fn observe(&mut self, snapshot: &Snapshot<'_, C>);
}

impl<C: Cell, F> Observer<C> for F
where
    F: FnMut(&Snapshot<'_, C>),
{
    fn observe(&mut self, snapshot: &Snapshot<'_, C>) {
        self(snapshot)
    }
}

/// Ignores every snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl<C: Cell> Observer<C> for NoopObserver {
    fn observe(&mut self, _snapshot: &Snapshot<'_, C>) {}
}
