//! Loop bracket resolution.
//!
//! Two policies are available. [`Matching::Scan`] is the classic behavior of
//! this interpreter: a linear scan from the current bracket to the first
//! bracket of the opposite kind, with no nesting awareness. Nested loops whose
//! inner brackets sit between the outer pair therefore resolve to the inner
//! partner. [`Matching::Balanced`] pairs brackets by depth instead and is
//! opt-in, since it changes what nested programs compute.
//!
//! Under either policy an unmatched bracket resolves to `program.len()`, which
//! takes the instruction pointer past the end and ends the run normally.

use std::fmt;
use std::str::FromStr;

use crate::program::{Op, Program};

/// How loop brackets find their partner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Matching {
    /// Stop at the first bracket of the opposite kind.
    #[default]
    Scan,
    /// Pair brackets by nesting depth.
    Balanced,
}

impl fmt::Display for Matching {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Matching::Scan => write!(f, "scan"),
            Matching::Balanced => write!(f, "balanced"),
        }
    }
}

impl FromStr for Matching {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scan" => Ok(Matching::Scan),
            "balanced" | "nested" => Ok(Matching::Balanced),
            other => Err(format!("unknown bracket matching '{other}' (expected scan or balanced)")),
        }
    }
}

/// Finds jump targets for `[` and `]`.
#[derive(Debug, Clone)]
pub struct LoopResolver {
    matching: Matching,
    // Only populated for `Matching::Balanced`. jumps[i] holds the partner of
    // the bracket at i; None for non-brackets and unmatched brackets.
    jumps: Vec<Option<usize>>,
}

impl LoopResolver {
    pub fn new(program: &Program, matching: Matching) -> Self {
        let jumps = match matching {
            Matching::Scan => Vec::new(),
            Matching::Balanced => balanced_jumps(program),
        };
        Self { matching, jumps }
    }

    pub fn matching(&self) -> Matching {
        self.matching
    }

    /// Index of the `]` that a `[` at `step` jumps to.
    pub fn forward(&self, program: &Program, step: usize) -> usize {
        match self.matching {
            Matching::Scan => program
                .ops()
                .iter()
                .enumerate()
                .skip(step)
                .find(|&(_, &op)| op == Op::LoopEnd)
                .map_or(program.len(), |(i, _)| i),
            Matching::Balanced => self.lookup(program, step),
        }
    }

    /// Index of the `[` that a `]` at `step` jumps back to.
    pub fn backward(&self, program: &Program, step: usize) -> usize {
        match self.matching {
            Matching::Scan => {
                let end = (step + 1).min(program.len());
                program.ops()[..end]
                    .iter()
                    .rposition(|&op| op == Op::LoopStart)
                    .unwrap_or(program.len())
            }
            Matching::Balanced => self.lookup(program, step),
        }
    }

    fn lookup(&self, program: &Program, step: usize) -> usize {
        self.jumps
            .get(step)
            .copied()
            .flatten()
            .unwrap_or(program.len())
    }
}

fn balanced_jumps(program: &Program) -> Vec<Option<usize>> {
    let mut jumps = vec![None; program.len()];
    let mut stack: Vec<usize> = Vec::new();
    for (i, &op) in program.ops().iter().enumerate() {
        match op {
            Op::LoopStart => stack.push(i),
            Op::LoopEnd => {
                if let Some(open) = stack.pop() {
                    jumps[open] = Some(i);
                    jumps[i] = Some(open);
                }
            }
            _ => {}
        }
    }
    jumps
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn resolver(code: &str, matching: Matching) -> (Program, LoopResolver) {
        let program = Program::parse(code);
        let resolver = LoopResolver::new(&program, matching);
        (program, resolver)
    }

    #[test]
    fn scan_finds_simple_partners() {
        let (p, r) = resolver("+[->+<]>", Matching::Scan);
        assert_eq!(r.forward(&p, 1), 6);
        assert_eq!(r.backward(&p, 6), 1);
    }

    #[test]
    fn scan_ignores_nesting() {
        // outer [ at 0, inner [ at 1, inner ] at 3, outer ] at 5
        let (p, r) = resolver("[[-]>]", Matching::Scan);
        assert_eq!(r.forward(&p, 0), 3);
        assert_eq!(r.backward(&p, 5), 1);
    }

    #[test]
    fn balanced_respects_nesting() {
        let (p, r) = resolver("[[-]>]", Matching::Balanced);
        assert_eq!(r.forward(&p, 0), 5);
        assert_eq!(r.backward(&p, 5), 0);
        assert_eq!(r.forward(&p, 1), 3);
        assert_eq!(r.backward(&p, 3), 1);
    }

    #[test]
    fn scan_backward_includes_first_instruction() {
        let (p, r) = resolver("[-]", Matching::Scan);
        assert_eq!(r.backward(&p, 2), 0);
    }

    #[test]
    fn unmatched_brackets_resolve_past_the_end() {
        let (p, r) = resolver("+[+", Matching::Scan);
        assert_eq!(r.forward(&p, 1), 3);
        let (p, r) = resolver("+]", Matching::Scan);
        assert_eq!(r.backward(&p, 1), 2);
        let (p, r) = resolver("[[]", Matching::Balanced);
        assert_eq!(r.forward(&p, 0), 3);
        let (p, r) = resolver("[]]", Matching::Balanced);
        assert_eq!(r.backward(&p, 2), 3);
    }

    #[test]
    fn matching_parses_from_strings() {
        assert_eq!("scan".parse::<Matching>(), Ok(Matching::Scan));
        assert_eq!(" Balanced ".parse::<Matching>(), Ok(Matching::Balanced));
        assert!("depth".parse::<Matching>().is_err());
    }

    proptest! {
        #[test]
        fn resolution_is_deterministic(code in "[\\[\\]+\\-<>]{1,32}", balanced in any::<bool>()) {
            let matching = if balanced { Matching::Balanced } else { Matching::Scan };
            let (p, r1) = resolver(&code, matching);
            let r2 = LoopResolver::new(&p, matching);
            for step in 0..p.len() {
                prop_assert_eq!(r1.forward(&p, step), r2.forward(&p, step));
                prop_assert_eq!(r1.backward(&p, step), r2.backward(&p, step));
                prop_assert!(r1.forward(&p, step) <= p.len());
            }
        }
    }
}
