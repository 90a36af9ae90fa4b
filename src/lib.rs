//! A small Brainfuck interpreter library.
//!
//! Programs run on a byte tape that starts with a single zero cell and grows
//! to the right on demand. The cell pointer can never move left of cell 0.
//!
//! Features and behaviors:
//! - Cells wrap: `+` on 255 gives 0, `-` on 0 gives 255.
//! - Loop brackets are paired before execution; an unmatched `[` or `]` is
//!   reported without running anything.
//! - Input `,` reads one line per request and accepts exactly one character
//!   with a code point in 0..=255, asking again after anything else.
//! - Output `.` writes the character whose code point is the cell value.
//! - Characters outside `><+-.,[]` are comments.
//! - An optional [`Tracer`] observes each step (the `--debug` trace).
//!
//! Quick start:
//!
//! ```
//! use bf_tape::run_to_string;
//!
//! let out = run_to_string("++++++++[>++++++++<-]>.", "").expect("program should run");
//! assert_eq!(out, "@");
//! ```
//!
//! Driving the process streams directly:
//!
//! ```no_run
//! use bf_tape::{Host, Interpreter};
//!
//! let mut bf = Interpreter::new(",[.,]").expect("brackets match");
//! bf.run(&mut Host::stdio()).expect("program should run");
//! ```

pub mod brackets;
pub mod cli_util;
pub mod commands;
pub mod config;
pub mod error;
pub mod host;
pub mod instruction;
pub mod interpreter;
pub mod tape;
pub mod trace;

pub use brackets::JumpTable;
pub use error::{BrainfuckError, Result, UnmatchedBracketKind};
pub use host::Host;
pub use instruction::Instruction;
pub use interpreter::{run_to_string, Interpreter};
pub use tape::Tape;
pub use trace::{LoopBranch, NoTrace, TextTracer, Tracer};
