use clap::Args;
use std::fs;
use std::io::{self, IsTerminal, Write};

use crate::cli_util::print_error;
use crate::config::{Settings, TraceTarget};
use crate::host::Host;
use crate::trace::TextTracer;
use crate::{Interpreter, Result};

#[derive(Args, Debug)]
#[command(disable_help_flag = true)]
pub struct RunArgs {
    /// Trace every instruction (fallback BF_DEBUG or bf.toml)
    #[arg(short = 'd', long = "debug")]
    pub debug: bool,

    /// Where the debug trace goes (fallback BF_TRACE or bf.toml; default stdout)
    #[arg(long = "trace", value_enum, value_name = "TARGET")]
    pub trace: Option<TraceTarget>,

    /// Never color the debug trace
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Run CODE instead of reading a file
    #[arg(short = 'e', long = "eval", value_name = "CODE", allow_hyphen_values = true, conflicts_with = "path")]
    pub eval: Option<String>,

    /// Brainfuck source file
    #[arg(value_name = "PATH")]
    pub path: Option<String>,

    /// The word `debug` enables debug mode, as in `bf prog.bf debug`; other words are ignored
    #[arg(value_name = "MODE")]
    pub mode: Option<String>,

    /// Show this help
    #[arg(short = 'h', long = "help", action = clap::ArgAction::SetTrue)]
    pub help: bool,
}

pub fn run(program: &str, args: RunArgs) -> i32 {
    if args.help {
        usage_and_exit(program, 0);
    }

    let RunArgs { debug, trace, no_color, eval, path, mode, .. } = args;

    // Only the word `debug` means anything after PATH; other words are ignored.
    let mode_debug = mode.as_deref() == Some("debug");

    let code = match (eval, path) {
        (Some(code), _) => code,
        (None, Some(path)) => match fs::read_to_string(&path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("{program}: failed to read code file as UTF-8: {e}");
                let _ = io::stderr().flush();
                return 1;
            }
        },
        (None, None) => usage_and_exit(program, 2),
    };

    // Resolve settings: flags -> env -> bf.toml -> defaults
    let settings = Settings::load();
    let debug = debug || mode_debug || settings.debug;
    let target = trace.unwrap_or(settings.trace);
    let target_is_tty = match target {
        TraceTarget::Stdout => io::stdout().is_terminal(),
        TraceTarget::Stderr => io::stderr().is_terminal(),
    };
    let color = (!no_color && settings.color && target_is_tty).then_some(settings.cell_color);

    let result = Interpreter::new(code.as_str()).and_then(|mut interpreter| {
        if debug {
            run_debug(&mut interpreter, target, color)
        } else {
            interpreter.run(&mut Host::stdio())
        }
    });

    let _ = io::stdout().flush();
    match result {
        Ok(()) => 0,
        Err(err) => {
            print_error(Some(program), &code, &err);
            1
        }
    }
}

fn run_debug(
    interpreter: &mut Interpreter,
    target: TraceTarget,
    color: Option<nu_ansi_term::Color>,
) -> Result<()> {
    match target {
        TraceTarget::Stdout => {
            // Output is carried by the trace's `print:` lines on the same stream.
            let mut host = Host::new(io::stdin().lock(), io::sink(), io::stderr());
            let mut tracer = styled(TextTracer::new(io::stdout()), color);
            interpreter.run_traced(&mut host, &mut tracer)
        }
        TraceTarget::Stderr => {
            let mut host = Host::stdio();
            let mut tracer = styled(TextTracer::new(io::stderr()), color);
            interpreter.run_traced(&mut host, &mut tracer)
        }
    }
}

fn styled<W: Write>(tracer: TextTracer<W>, color: Option<nu_ansi_term::Color>) -> TextTracer<W> {
    match color {
        Some(c) => tracer.with_color(c),
        None => tracer,
    }
}

fn usage_and_exit(program: &str, code: i32) -> ! {
    eprintln!(
        r#"Usage:
  {0} [OPTIONS] <PATH> [debug]
  {0} [OPTIONS] --eval "<code>"

Options:
  --eval,  -e <CODE>  Run CODE instead of reading PATH
  --debug, -d         Trace every instruction (tape, instruction, loop branches)
  --trace <TARGET>    Send the trace to `stdout` (default) or `stderr`
  --no-color          Never color the trace
  --help,  -h         Show this help

Environment:
  BF_DEBUG, BF_TRACE, NO_COLOR, BF_CONFIG (defaults to $XDG_CONFIG_HOME/bf.toml)

Notes:
- Characters other than ><+-.,[] are comments.
- Each `,` reads one line from stdin holding exactly one character
  (code point 0-255); anything else is rejected and asked for again.
- The tape starts with one cell and grows to the right; moving left of
  cell 0 is an error.
"#,
        program
    );
    let _ = io::stderr().flush();
    std::process::exit(code);
}
