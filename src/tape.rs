//! The interpreter's memory: a growable tape of fixed-width unsigned cells.

use std::fmt;
use std::str::FromStr;

/// A fixed-width unsigned tape cell.
///
/// Arithmetic wraps silently at the type's width, so a cell at its maximum
/// value becomes zero when incremented.
pub trait Cell: Copy + Default + PartialEq + fmt::Debug + fmt::Display + FromStr + Send + 'static {
    /// Width of the cell in bits.
    const BITS: u32;

    fn wrapping_inc(self) -> Self;

    fn wrapping_dec(self) -> Self;

    fn is_zero(self) -> bool {
        self == Self::default()
    }

    /// Append this cell's output representation to `out`.
    fn emit(self, out: &mut Vec<u8>);
}

impl Cell for u8 {
    const BITS: u32 = u8::BITS;

    fn wrapping_inc(self) -> Self {
        self.wrapping_add(1)
    }

    fn wrapping_dec(self) -> Self {
        self.wrapping_sub(1)
    }

    fn emit(self, out: &mut Vec<u8>) {
        out.push(self);
    }
}

// Cells wider than a byte are emitted as the UTF-8 encoding of the Unicode
// scalar with that value.
macro_rules! wide_cell {
    ($($ty:ty),*) => {
        $(
            impl Cell for $ty {
                const BITS: u32 = <$ty>::BITS;

                fn wrapping_inc(self) -> Self {
                    self.wrapping_add(1)
                }

                fn wrapping_dec(self) -> Self {
                    self.wrapping_sub(1)
                }

                fn emit(self, out: &mut Vec<u8>) {
                    let ch = u32::try_from(self)
                        .ok()
                        .and_then(char::from_u32)
                        .unwrap_or(char::REPLACEMENT_CHARACTER);
                    let mut buf = [0u8; 4];
                    out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
                }
            }
        )*
    };
}

wide_cell!(u16, u32, u64);

/// An ordered, append-only sequence of cells, all starting at zero.
///
/// The tape always holds at least one cell and never shrinks. It does not
/// own the cursor; every operation takes the cursor explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct Tape<C: Cell> {
    cells: Vec<C>,
}

impl<C: Cell> Tape<C> {
    pub fn new() -> Self {
        Self { cells: vec![C::default()] }
    }

    /// Current value of the cell at `cursor`.
    ///
    /// # Panics
    /// If `cursor` is past the end of the tape. Callers keep the cursor in
    /// range through [`Tape::ensure`].
    pub fn read(&self, cursor: usize) -> C {
        self.cells[cursor]
    }

    pub fn write(&mut self, cursor: usize, value: C) {
        self.cells[cursor] = value;
    }

    pub fn increment(&mut self, cursor: usize) {
        let cell = &mut self.cells[cursor];
        *cell = cell.wrapping_inc();
    }

    pub fn decrement(&mut self, cursor: usize) {
        let cell = &mut self.cells[cursor];
        *cell = cell.wrapping_dec();
    }

    /// Grow the tape with zeroed cells until `cursor` is a valid index.
    pub fn ensure(&mut self, cursor: usize) {
        if cursor >= self.cells.len() {
            self.cells.resize(cursor + 1, C::default());
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`; a tape holds at least one cell.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[C] {
        &self.cells
    }
}

impl<C: Cell> Default for Tape<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn starts_with_a_single_zero_cell() {
        let tape: Tape<u8> = Tape::new();
        assert_eq!(tape.cells(), &[0]);
        assert!(!tape.is_empty());
    }

    #[test]
    fn wrapping_addition() {
        let mut tape: Tape<u8> = Tape::new();
        tape.write(0, u8::MAX);
        tape.increment(0);
        assert_eq!(tape.read(0), 0);
    }

    #[test]
    fn wrapping_subtraction() {
        let mut tape: Tape<u16> = Tape::new();
        tape.decrement(0);
        assert_eq!(tape.read(0), u16::MAX);
    }

    #[test]
    fn wide_cells_wrap_at_their_own_width() {
        let mut tape: Tape<u64> = Tape::new();
        tape.write(0, u64::MAX);
        tape.increment(0);
        assert_eq!(tape.read(0), 0);
        assert_eq!(<u64 as Cell>::BITS, 64);
    }

    #[test]
    fn ensure_grows_with_zeroes_and_never_shrinks() {
        let mut tape: Tape<u32> = Tape::new();
        tape.increment(0);
        tape.ensure(4);
        assert_eq!(tape.cells(), &[1, 0, 0, 0, 0]);
        tape.ensure(2);
        assert_eq!(tape.len(), 5);
    }

    #[test]
    fn byte_cells_emit_raw_bytes() {
        let mut out = Vec::new();
        200u8.emit(&mut out);
        3u8.emit(&mut out);
        assert_eq!(out, vec![200, 3]);
    }

    #[test]
    fn wide_cells_emit_utf8_scalars() {
        let mut out = Vec::new();
        65u16.emit(&mut out);
        0xE9u32.emit(&mut out);
        0xD800u64.emit(&mut out); // surrogate, not a scalar value
        u64::MAX.emit(&mut out);
        assert_eq!(String::from_utf8(out).unwrap(), "Aé\u{FFFD}\u{FFFD}");
    }

    proptest! {
        #[test]
        fn ensure_keeps_cursor_in_range(moves in proptest::collection::vec(0usize..64, 1..16)) {
            let mut tape: Tape<u8> = Tape::new();
            let mut longest = 1;
            for cursor in moves {
                tape.ensure(cursor);
                longest = longest.max(cursor + 1);
                prop_assert!(tape.len() >= cursor + 1);
                prop_assert_eq!(tape.len(), longest);
            }
        }
    }
}
