//! Debug tracing for the interpreter.
//!
//! The interpreter is generic over a [`Tracer`]. Plain runs use [`NoTrace`],
//! whose hooks are empty and inline away, so the trace costs nothing unless
//! a real sink such as [`TextTracer`] is supplied.

use std::io::{self, Write};

use nu_ansi_term::{Color, Style};

use crate::instruction::Instruction;
use crate::tape::Tape;

/// Which way a loop bracket went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopBranch {
    /// `[` on a zero cell: jump past the loop.
    Skip,
    /// `[` on a non-zero cell: fall into the body.
    Enter,
    /// `]` on a non-zero cell: jump back to the start.
    Restart,
    /// `]` on a zero cell: leave the loop.
    Finish,
}

impl LoopBranch {
    pub fn describe(self) -> &'static str {
        match self {
            LoopBranch::Skip => "skip loop",
            LoopBranch::Enter => "enter loop",
            LoopBranch::Restart => "restart loop",
            LoopBranch::Finish => "finish loop",
        }
    }
}

/// Observer hooks called by the interpreter around each state transition.
/// Hooks only read state; they can never change what the program does.
pub trait Tracer {
    /// Called once before the first instruction.
    fn program(&mut self, _code: &str) -> io::Result<()> {
        Ok(())
    }

    /// Called before each recognised instruction executes.
    fn step(&mut self, _tape: &Tape, _instr: Instruction) -> io::Result<()> {
        Ok(())
    }

    fn branch(&mut self, _branch: LoopBranch) -> io::Result<()> {
        Ok(())
    }

    /// Called when `.` emits a character.
    fn output(&mut self, _ch: char) -> io::Result<()> {
        Ok(())
    }
}

impl<T: Tracer + ?Sized> Tracer for &mut T {
    fn program(&mut self, code: &str) -> io::Result<()> {
        (**self).program(code)
    }

    fn step(&mut self, tape: &Tape, instr: Instruction) -> io::Result<()> {
        (**self).step(tape, instr)
    }

    fn branch(&mut self, branch: LoopBranch) -> io::Result<()> {
        (**self).branch(branch)
    }

    fn output(&mut self, ch: char) -> io::Result<()> {
        (**self).output(ch)
    }
}

/// The tracer used when debug mode is off.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTrace;

impl Tracer for NoTrace {}

/// Line-oriented trace writer:
///
/// ```text
/// program: +[-].
/// tape: |0|
/// char: +
/// tape: |1|
/// char: [
/// enter loop
/// ```
pub struct TextTracer<W: Write> {
    out: W,
    cell_style: Option<Style>,
    branch_style: Option<Style>,
}

impl<W: Write> TextTracer<W> {
    pub fn new(out: W) -> Self {
        Self { out, cell_style: None, branch_style: None }
    }

    /// Highlight the current cell in `color` and dim branch reports.
    pub fn with_color(mut self, color: Color) -> Self {
        self.cell_style = Some(Style::new().fg(color).bold());
        self.branch_style = Some(Style::new().dimmed());
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: std::fmt::Arguments<'_>) -> io::Result<()> {
        self.out.write_fmt(text)?;
        self.out.write_all(b"\n")?;
        self.out.flush()
    }
}

/// `0, |7|, 3` with the current cell wrapped in bars.
pub fn render_tape(tape: &Tape, cell_style: Option<Style>) -> String {
    let pointer = tape.pointer();
    let parts: Vec<String> = tape
        .cells()
        .iter()
        .enumerate()
        .map(|(i, v)| {
            if i != pointer {
                return v.to_string();
            }
            let marked = format!("|{v}|");
            match cell_style {
                Some(style) => style.paint(marked).to_string(),
                None => marked,
            }
        })
        .collect();
    parts.join(", ")
}

impl<W: Write> Tracer for TextTracer<W> {
    fn program(&mut self, code: &str) -> io::Result<()> {
        self.line(format_args!("program: {code}"))
    }

    fn step(&mut self, tape: &Tape, instr: Instruction) -> io::Result<()> {
        let rendered = render_tape(tape, self.cell_style);
        self.line(format_args!("tape: {rendered}"))?;
        self.line(format_args!("char: {}", instr.as_char()))
    }

    fn branch(&mut self, branch: LoopBranch) -> io::Result<()> {
        match self.branch_style {
            Some(style) => {
                let painted = style.paint(branch.describe());
                self.line(format_args!("{painted}"))
            }
            None => self.line(format_args!("{}", branch.describe())),
        }
    }

    fn output(&mut self, ch: char) -> io::Result<()> {
        self.line(format_args!("print: {ch}"))
    }
}
