//! Source normalization.
//!
//! Brainfuck treats every character outside `><+-.,[]` as a comment, so the
//! first thing the interpreter does is throw those characters away. What is
//! left is a [`Program`]: an immutable sequence of [`Op`]s in source order.

use std::fmt;

/// One of the eight Brainfuck operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// `>`
    Right,
    /// `<`
    Left,
    /// `+`
    Inc,
    /// `-`
    Dec,
    /// `.`
    Output,
    /// `,`
    Input,
    /// `[`
    LoopStart,
    /// `]`
    LoopEnd,
}

impl Op {
    /// Map a source character to its operator, or `None` for comment characters.
    pub fn from_char(ch: char) -> Option<Self> {
        Some(match ch {
            '>' => Op::Right,
            '<' => Op::Left,
            '+' => Op::Inc,
            '-' => Op::Dec,
            '.' => Op::Output,
            ',' => Op::Input,
            '[' => Op::LoopStart,
            ']' => Op::LoopEnd,
            _ => return None,
        })
    }

    pub fn as_char(self) -> char {
        match self {
            Op::Right => '>',
            Op::Left => '<',
            Op::Inc => '+',
            Op::Dec => '-',
            Op::Output => '.',
            Op::Input => ',',
            Op::LoopStart => '[',
            Op::LoopEnd => ']',
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A normalized Brainfuck program.
///
/// Every element is a recognized operator; the sequence never changes after
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Program {
    ops: Vec<Op>,
}

impl Program {
    /// Build a program from raw source, silently dropping comment characters.
    pub fn parse(source: &str) -> Self {
        Self {
            ops: source.chars().filter_map(Op::from_char).collect(),
        }
    }

    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    pub fn get(&self, step: usize) -> Option<Op> {
        self.ops.get(step).copied()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for op in &self.ops {
            write!(f, "{op}")?;
        }
        Ok(())
    }
}

/// Keep only Brainfuck instruction characters.
pub fn normalize(source: &str) -> String {
    Program::parse(source).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn strips_comments_and_whitespace() {
        let program = Program::parse("+ + hello\n[ - ] world.");
        assert_eq!(program.to_string(), "++[-].");
        assert_eq!(program.len(), 6);
    }

    #[test]
    fn empty_and_comment_only_sources_yield_empty_program() {
        assert!(Program::parse("").is_empty());
        assert!(Program::parse("this is only a comment").is_empty());
    }

    #[test]
    fn non_ascii_characters_are_dropped() {
        assert_eq!(normalize("→+é<ü"), "+<");
    }

    #[test]
    fn op_char_mapping_is_consistent() {
        for ch in "><+-.,[]".chars() {
            let op = Op::from_char(ch).expect("operator");
            assert_eq!(op.as_char(), ch);
        }
        assert_eq!(Op::from_char('a'), None);
    }

    proptest! {
        #[test]
        fn normalized_output_contains_only_operators(source in ".*") {
            let out = normalize(&source);
            prop_assert!(out.chars().all(|c| "><+-.,[]".contains(c)));
        }

        #[test]
        fn normalization_preserves_operator_order(source in "[a-z><+\\-.,\\[\\] ]{0,64}") {
            let expected: String = source.chars().filter(|c| "><+-.,[]".contains(*c)).collect();
            prop_assert_eq!(normalize(&source), expected);
        }

        #[test]
        fn normalization_is_idempotent(source in ".*") {
            let once = normalize(&source);
            prop_assert_eq!(normalize(&once), once.clone());
            prop_assert_eq!(Program::parse(&once), Program::parse(&source));
        }
    }
}
