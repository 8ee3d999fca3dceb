//! Presentation of snapshots: the live in-place view and the step table.

use std::io::{self, Write};

use crossterm::{cursor, queue, terminal};
use nu_ansi_term::{Color, Style};
use unicode_width::UnicodeWidthStr;

use crate::config::Colors;
use crate::observer::{Observer, Snapshot};
use crate::program::Op;
use crate::tape::Cell;
use crate::theme::catppuccin::Mocha;

const COLUMN_WIDTH: usize = 8;

/// How active positions are marked: ANSI colors or plain brackets.
#[derive(Debug, Clone)]
pub struct Highlight {
    colors: Colors,
    ansi: bool,
}

impl Highlight {
    pub fn ansi(colors: Colors) -> Self {
        Self { colors, ansi: true }
    }

    pub fn plain() -> Self {
        Self { colors: Colors::default(), ansi: false }
    }

    fn active(&self, text: &str, color: Color) -> String {
        if self.ansi {
            Style::new().fg(color).bold().paint(text).to_string()
        } else {
            format!("[{text}]")
        }
    }

    fn idle(&self, text: &str, color: Color) -> String {
        if self.ansi {
            color.paint(text).to_string()
        } else {
            text.to_string()
        }
    }
}

/// Two rows, one column per cell: the cell as a character, then its value.
/// The active cell is marked in both rows.
pub fn cell_state<C: Cell>(snapshot: &Snapshot<'_, C>, hl: &Highlight) -> String {
    let values: Vec<String> = snapshot.cells.iter().map(ToString::to_string).collect();
    let width = values
        .iter()
        .map(|v| v.len() + 2)
        .max()
        .unwrap_or(0)
        .max(COLUMN_WIDTH);

    let mut glyphs = String::new();
    let mut numbers = String::new();
    for (i, value) in values.iter().enumerate() {
        let ch = glyph(snapshot.cells[i]);
        let (g, n) = if i == snapshot.cursor {
            (hl.active(&ch, hl.colors.cursor), hl.active(value, hl.colors.cursor))
        } else {
            (hl.idle(&ch, hl.colors.dim), value.clone())
        };
        let marker = if i == snapshot.cursor && !hl.ansi { 2 } else { 0 };
        glyphs.push_str(&g);
        glyphs.push_str(&" ".repeat(width.saturating_sub(ch.width() + marker)));
        numbers.push_str(&n);
        numbers.push_str(&" ".repeat(width.saturating_sub(value.len() + marker)));
    }

    format!("{}\n{}", glyphs.trim_end(), numbers.trim_end())
}

/// The program with the next instruction to run marked.
pub fn program_state<C: Cell>(snapshot: &Snapshot<'_, C>, hl: &Highlight) -> String {
    let mut out = String::new();
    for (i, op) in snapshot.program.ops().iter().enumerate() {
        let text = op.as_char().to_string();
        if i == snapshot.step {
            out.push_str(&hl.active(&text, hl.colors.step));
        } else {
            out.push_str(&hl.idle(&text, Mocha::op(*op)));
        }
    }
    out
}

/// The output produced so far, decoded lossily for display.
pub fn output_state<C: Cell>(snapshot: &Snapshot<'_, C>, hl: &Highlight) -> String {
    let text = String::from_utf8_lossy(snapshot.output);
    hl.idle(&text, hl.colors.output)
}

pub fn frame<C: Cell>(snapshot: &Snapshot<'_, C>, hl: &Highlight) -> String {
    format!(
        "{}\n{}\n{}\n",
        cell_state(snapshot, hl),
        program_state(snapshot, hl),
        output_state(snapshot, hl)
    )
}

fn glyph<C: Cell>(cell: C) -> String {
    let mut bytes = Vec::new();
    cell.emit(&mut bytes);
    let text = String::from_utf8_lossy(&bytes);
    match text.chars().next() {
        Some(ch) if !ch.is_control() => ch.to_string(),
        _ => String::from(" "),
    }
}

/// Redraws the current frame in place after every step.
///
/// Write errors stop further drawing and are reported by [`LiveView::finish`].
pub struct LiveView<W: Write> {
    out: W,
    hl: Highlight,
    lines_drawn: u16,
    error: Option<io::Error>,
}

impl<W: Write> LiveView<W> {
    pub fn new(mut out: W, hl: Highlight) -> Self {
        let error = queue!(out, cursor::Hide).and_then(|_| out.flush()).err();
        Self { out, hl, lines_drawn: 0, error }
    }

    fn draw<C: Cell>(&mut self, snapshot: &Snapshot<'_, C>) -> io::Result<()> {
        let text = frame(snapshot, &self.hl);
        if self.lines_drawn > 0 {
            queue!(self.out, cursor::MoveToPreviousLine(self.lines_drawn))?;
        }
        queue!(self.out, terminal::Clear(terminal::ClearType::FromCursorDown))?;
        self.out.write_all(text.as_bytes())?;
        self.out.flush()?;
        self.lines_drawn = u16::try_from(text.lines().count()).unwrap_or(u16::MAX);
        Ok(())
    }

    /// Restore the terminal cursor and return the first write error, if any.
    pub fn finish(mut self) -> io::Result<()> {
        let restored = queue!(self.out, cursor::Show).and_then(|_| self.out.flush());
        match self.error.take() {
            Some(e) => Err(e),
            None => restored,
        }
    }
}

impl<C: Cell, W: Write> Observer<C> for LiveView<W> {
    fn observe(&mut self, snapshot: &Snapshot<'_, C>) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.draw(snapshot) {
            self.error = Some(e);
        }
    }
}

/// Prints one table row per executed instruction.
pub struct TraceTable<W: Write> {
    out: W,
    row: usize,
    prev_step: usize,
    prev_cursor: usize,
    prev_cell: String,
    error: Option<io::Error>,
}

impl<W: Write> TraceTable<W> {
    pub fn new(mut out: W) -> Self {
        let error = writeln!(out, "STEP | IP  | PTR | CELL | INSTR | ACTION")
            .and_then(|_| {
                writeln!(
                    out,
                    "-----+-----+-----+------+-------+------------------------------------------------"
                )
            })
            .err();
        Self {
            out,
            row: 0,
            prev_step: 0,
            prev_cursor: 0,
            prev_cell: String::from("0"),
            error,
        }
    }

    pub fn finish(mut self) -> io::Result<()> {
        let flushed = self.out.flush();
        match self.error.take() {
            Some(e) => Err(e),
            None => flushed,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<C: Cell, W: Write> Observer<C> for TraceTable<W> {
    fn observe(&mut self, snapshot: &Snapshot<'_, C>) {
        let ip = self.prev_step;
        let ptr = self.prev_cursor;
        let cell_after = snapshot.current().to_string();

        if self.error.is_none() {
            if let Some(op) = snapshot.program.get(ip) {
                let action = describe(op, ip, ptr, &self.prev_cell, &cell_after, snapshot);
                let written = writeln!(
                    self.out,
                    "{:<4} | {:<3} | {:<3} | {:<4} |  {}    | {}",
                    self.row, ip, ptr, self.prev_cell, op, action
                );
                if let Err(e) = written {
                    self.error = Some(e);
                }
            }
        }

        self.row += 1;
        self.prev_step = snapshot.step;
        self.prev_cursor = snapshot.cursor;
        self.prev_cell = cell_after;
    }
}

fn describe<C: Cell>(
    op: Op,
    ip: usize,
    ptr: usize,
    before: &str,
    after: &str,
    snapshot: &Snapshot<'_, C>,
) -> String {
    let jumped = snapshot.step != ip + 1;
    let target = snapshot.step.saturating_sub(1);
    match op {
        Op::Right | Op::Left => format!("Moved pointer head to index {}", snapshot.cursor),
        Op::Inc => format!("Increment cell[{ptr}] from {before} to {after}"),
        Op::Dec => format!("Decrement cell[{ptr}] from {before} to {after}"),
        Op::Output => format!("Output value {after}"),
        Op::Input => format!("Read {after} from input into cell[{ptr}]"),
        Op::LoopStart if !jumped => "Enter loop (cell != 0)".to_string(),
        Op::LoopEnd if !jumped => "Exit loop (cell is 0)".to_string(),
        _ if target >= snapshot.program.len() => {
            "No partner bracket; instruction pointer leaves the program".to_string()
        }
        Op::LoopStart => format!("Cell is 0; jump forward past ']' at IP {target}"),
        _ => format!("Cell != 0; jump back past '[' at IP {target}"),
    }
}
