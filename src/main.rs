use bf_tape::commands::run::{self, RunArgs};
use clap::Parser;
use std::env;
use std::io::{self, Write};

#[derive(Parser, Debug)]
#[command(name = "bf", disable_help_flag = true)]
struct Cli {
    #[command(flatten)]
    args: RunArgs,
}

fn main() {
    // We still pull the program name for help rendering consistency
    let program = env::args().next().unwrap_or_else(|| String::from("bf"));

    let cli = Cli::parse();

    // Non-terminating programs are normal; on ctrl+c keep what they printed and exit 130
    if let Err(e) = ctrlc::set_handler(|| {
        let _ = io::stdout().flush();
        let _ = io::stderr().flush();
        std::process::exit(130);
    }) {
        eprintln!("{program}: failed to set ctrl+c handler: {e}");
        let _ = io::stderr().flush();
        std::process::exit(1);
    }

    let code = run::run(&program, cli.args);
    std::process::exit(code);
}
