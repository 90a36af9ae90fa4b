use std::io::{self, BufRead, Write};

use crate::brackets::JumpTable;
use crate::error::{BrainfuckError, Result};
use crate::host::Host;
use crate::instruction::Instruction;
use crate::tape::Tape;
use crate::trace::{LoopBranch, NoTrace, Tracer};

/// A Brainfuck program with its loops already resolved, plus the tape it
/// runs on.
///
/// Construction validates the brackets, so an unbalanced program fails
/// before anything executes. Each run starts from a fresh tape; the tape of
/// the last run stays available through [`Interpreter::tape`].
pub struct Interpreter {
    code: String,
    program: Vec<char>,
    jumps: JumpTable,
    tape: Tape,
}

impl Interpreter {
    /// Resolve the loops of `code`.
    pub fn new(code: impl Into<String>) -> Result<Self> {
        let code = code.into();
        let program: Vec<char> = code.chars().collect();
        let jumps = JumpTable::resolve(&program)?;
        Ok(Self { code, program, jumps, tape: Tape::new() })
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn program(&self) -> &[char] {
        &self.program
    }

    pub fn jumps(&self) -> &JumpTable {
        &self.jumps
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    /// Execute the program until the instruction pointer runs off its end.
    pub fn run<R, W, E>(&mut self, host: &mut Host<R, W, E>) -> Result<()>
    where
        R: BufRead,
        W: Write,
        E: Write,
    {
        self.run_traced(host, &mut NoTrace)
    }

    /// Execute the program, reporting every step to `tracer`.
    pub fn run_traced<R, W, E, T>(&mut self, host: &mut Host<R, W, E>, tracer: &mut T) -> Result<()>
    where
        R: BufRead,
        W: Write,
        E: Write,
        T: Tracer,
    {
        self.tape = Tape::new();
        tracer.program(&self.code).map_err(io_at(0))?;

        let code_len = self.program.len();
        let mut code_ptr = 0;

        while code_ptr < code_len {
            let Some(instr) = Instruction::from_char(self.program[code_ptr]) else {
                code_ptr += 1;
                continue;
            };

            tracer.step(&self.tape, instr).map_err(io_at(code_ptr))?;

            match instr {
                Instruction::Increment => self.tape.increment(),
                Instruction::Decrement => self.tape.decrement(),
                Instruction::MoveRight => self.tape.move_right(),
                Instruction::MoveLeft => {
                    if !self.tape.move_left() {
                        return Err(BrainfuckError::NegativeTapeIndex { position: code_ptr });
                    }
                }
                Instruction::LoopStart => {
                    if self.tape.get() == 0 {
                        tracer.branch(LoopBranch::Skip).map_err(io_at(code_ptr))?;
                        code_ptr = self.jump_target(code_ptr);
                    } else {
                        tracer.branch(LoopBranch::Enter).map_err(io_at(code_ptr))?;
                    }
                }
                Instruction::LoopEnd => {
                    if self.tape.get() != 0 {
                        tracer.branch(LoopBranch::Restart).map_err(io_at(code_ptr))?;
                        code_ptr = self.jump_target(code_ptr);
                    } else {
                        tracer.branch(LoopBranch::Finish).map_err(io_at(code_ptr))?;
                    }
                }
                Instruction::Output => {
                    let value = self.tape.get();
                    tracer.output(char::from(value)).map_err(io_at(code_ptr))?;
                    host.write_cell(value).map_err(io_at(code_ptr))?;
                }
                Instruction::Input => match host.read_cell().map_err(io_at(code_ptr))? {
                    Some(value) => self.tape.set(value),
                    None => return Err(BrainfuckError::UnexpectedEof { position: code_ptr }),
                },
            }

            // A jump lands on the matching bracket; this moves past it.
            code_ptr += 1;
        }

        host.output.flush().map_err(io_at(code_ptr))?;
        Ok(())
    }

    #[inline]
    fn jump_target(&self, code_ptr: usize) -> usize {
        // Every bracket was paired in `new`; an unpaired one cannot be reached.
        self.jumps.target(code_ptr).unwrap_or(code_ptr)
    }
}

fn io_at(position: usize) -> impl FnOnce(io::Error) -> BrainfuckError {
    move |source| BrainfuckError::Io { position, source }
}

/// Run `code` with `input` as its stdin and collect what it prints.
/// Rejected input lines are discarded silently.
pub fn run_to_string(code: &str, input: &str) -> Result<String> {
    let mut interpreter = Interpreter::new(code)?;
    let mut host = Host::new(input.as_bytes(), Vec::new(), io::sink());
    interpreter.run(&mut host)?;
    Ok(String::from_utf8_lossy(&host.output).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UnmatchedBracketKind;
    use crate::trace::TextTracer;

    const HELLO_WORLD: &str = "++++++++++[>+++++++>++++++++++>+++>+<<<<-]>++.>+.+++++++..+++.>++.<<+++++++++++++++.>.+++.------.--------.>+.>.";

    #[test]
    fn prints_code_point_three() {
        assert_eq!(run_to_string("+++.", "").unwrap(), "\u{3}");
    }

    #[test]
    fn nested_multiplication_prints_at_sign() {
        assert_eq!(run_to_string("++++++++[>++++++++<-]>.", "").unwrap(), "@");
    }

    #[test]
    fn hello_world() {
        assert_eq!(run_to_string(HELLO_WORLD, "").unwrap(), "Hello World!\n");
    }

    #[test]
    fn echoes_one_input_character() {
        assert_eq!(run_to_string(",.", "Z\n").unwrap(), "Z");
    }

    #[test]
    fn invalid_input_is_retried_not_reported() {
        let mut interpreter = Interpreter::new(",.").unwrap();
        let mut host = Host::new(&b"too long\n\nq\n"[..], Vec::new(), Vec::new());
        interpreter.run(&mut host).unwrap();
        assert_eq!(host.output, b"q");
        let diag = String::from_utf8(host.diagnostics).unwrap();
        assert_eq!(diag.lines().count(), 2);
    }

    #[test]
    fn closed_input_is_fatal() {
        let err = run_to_string("+,", "").unwrap_err();
        assert!(matches!(err, BrainfuckError::UnexpectedEof { position: 1 }));
    }

    #[test]
    fn unmatched_brackets_fail_before_running() {
        assert!(matches!(
            Interpreter::new("]").err(),
            Some(BrainfuckError::UnmatchedBracket { position: 0, kind: UnmatchedBracketKind::Close })
        ));
        assert!(matches!(
            Interpreter::new(".[").err(),
            Some(BrainfuckError::UnmatchedBracket { position: 1, kind: UnmatchedBracketKind::Open })
        ));
    }

    #[test]
    fn left_of_zero_fails_at_runtime_after_earlier_output() {
        let mut interpreter = Interpreter::new("+.>+<<").unwrap();
        let mut host = Host::new(&b""[..], Vec::new(), io::sink());
        let err = interpreter.run(&mut host).unwrap_err();
        assert!(matches!(err, BrainfuckError::NegativeTapeIndex { position: 5 }));
        assert_eq!(host.output, b"\x01");
        assert_eq!(interpreter.tape().len(), 2);
    }

    #[test]
    fn comments_are_skipped() {
        assert_eq!(run_to_string("add three +++ then print it .", "").unwrap(), "\u{3}");
    }

    #[test]
    fn wrapping_subtraction() {
        let mut interpreter = Interpreter::new("-").unwrap();
        interpreter.run(&mut Host::new(&b""[..], io::sink(), io::sink())).unwrap();
        assert_eq!(interpreter.tape().get(), 255);
    }

    #[test]
    fn wrapping_addition() {
        let code = "+".repeat(256);
        let mut interpreter = Interpreter::new(code).unwrap();
        interpreter.run(&mut Host::new(&b""[..], io::sink(), io::sink())).unwrap();
        assert_eq!(interpreter.tape().get(), 0);
    }

    #[test]
    fn empty_loop_on_zero_cell_is_skipped() {
        let mut interpreter = Interpreter::new("[]+").unwrap();
        interpreter.run(&mut Host::new(&b""[..], io::sink(), io::sink())).unwrap();
        assert_eq!(interpreter.tape().cells(), &[1]);
    }

    #[test]
    fn tape_grows_to_the_right_only_as_needed() {
        let mut interpreter = Interpreter::new(">>><>").unwrap();
        interpreter.run(&mut Host::new(&b""[..], io::sink(), io::sink())).unwrap();
        assert_eq!(interpreter.tape().cells(), &[0, 0, 0, 0]);
        assert_eq!(interpreter.tape().pointer(), 3);
    }

    #[test]
    fn each_run_starts_on_a_fresh_tape() {
        let mut interpreter = Interpreter::new("+").unwrap();
        let mut host = Host::new(&b""[..], io::sink(), io::sink());
        interpreter.run(&mut host).unwrap();
        interpreter.run(&mut host).unwrap();
        assert_eq!(interpreter.tape().get(), 1);
    }

    #[test]
    fn trace_reports_steps_and_branches_without_changing_the_result() {
        let mut interpreter = Interpreter::new("+[-]x.").unwrap();
        let mut host = Host::new(&b""[..], Vec::new(), io::sink());
        let mut tracer = TextTracer::new(Vec::new());
        interpreter.run_traced(&mut host, &mut tracer).unwrap();

        let trace = String::from_utf8(tracer.into_inner()).unwrap();
        let expected = "\
program: +[-]x.
tape: |0|
char: +
tape: |1|
char: [
enter loop
tape: |1|
char: -
tape: |0|
char: ]
finish loop
tape: |0|
char: .
print: \u{0}
";
        assert_eq!(trace, expected);
        assert_eq!(host.output, b"\x00");
        assert_eq!(interpreter.tape().cells(), &[0]);
    }

    #[test]
    fn trace_reports_skip_and_restart() {
        let mut interpreter = Interpreter::new("[+]++[-]").unwrap();
        let mut host = Host::new(&b""[..], io::sink(), io::sink());
        let mut tracer = TextTracer::new(Vec::new());
        interpreter.run_traced(&mut host, &mut tracer).unwrap();

        let trace = String::from_utf8(tracer.into_inner()).unwrap();
        assert_eq!(trace.matches("skip loop").count(), 1);
        assert_eq!(trace.matches("enter loop").count(), 1);
        assert_eq!(trace.matches("restart loop").count(), 1);
        assert_eq!(trace.matches("finish loop").count(), 1);
        // the skipped body never shows up as a step
        assert_eq!(trace.matches("char: +").count(), 2);
    }
}
