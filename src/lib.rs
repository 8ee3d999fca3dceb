//! A Brainfuck interpreter with a growable tape and a step-by-step view of
//! execution.
//!
//! The engine is [`Interpreter`]: it normalizes source into a [`Program`],
//! runs it against a [`Tape`] that starts as a single zero cell and grows to
//! the right on demand, and hands an immutable [`Snapshot`] to an
//! [`Observer`] after every instruction. Rendering those snapshots (the live
//! terminal view, the step table) lives in [`render`] and is entirely
//! optional.
//!
//! ```
//! use bf_live::{EngineConfig, Interpreter, NoopObserver, ScriptedInput};
//!
//! let code = "++++++++++[>+++++++>++++++++++>+++>+<<<<-]>++.>+.+++++++..+++.>++.<<+++++++++++++++.>.+++.------.--------.>+.>.";
//! let mut bf: Interpreter<u8> = Interpreter::new(code, EngineConfig::default());
//! let output = bf.run(&mut ScriptedInput::empty(), &mut NoopObserver).expect("program should run");
//! assert_eq!(output, b"Hello World!\n");
//! ```

pub mod cli_util;
pub mod config;
pub mod input;
pub mod interpreter;
pub mod loops;
pub mod observer;
pub mod program;
pub mod render;
pub mod tape;
pub mod theme;

pub use config::{CellWidth, Colors, EngineConfig, Settings};
pub use input::{InputSource, LineInput, ScriptedInput};
pub use interpreter::{ExecutionError, Interpreter};
pub use loops::{LoopResolver, Matching};
pub use observer::{NoopObserver, Observer, Snapshot};
pub use program::{normalize, Op, Program};
pub use tape::{Cell, Tape};
