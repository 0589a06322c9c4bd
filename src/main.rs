mod ast;
mod config;
mod env;
mod error;
mod flow;
mod interp;
mod io;
mod lexer;
mod parser;
mod repl;
mod token;
mod value;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use error::GlamError;
use interp::Interpreter;
use io::StdIo;

/// A tree-walking interpreter for the Glam scripting language.
#[derive(Parser, Debug)]
#[command(name = "glam")]
#[command(version = config::VERSION)]
#[command(about = "A tree-walking interpreter for the Glam scripting language")]
#[command(long_about = "Runs a Glam source file, or starts an interactive REPL when no file is given")]
struct CliArgs {
    /// Script file to execute (optional — if not provided, starts the REPL)
    #[arg(value_name = "FILE")]
    script: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    match args.script {
        Some(path) => match run_script(&path) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("{e}");
                ExitCode::FAILURE
            }
        },
        None => {
            repl::run();
            ExitCode::SUCCESS
        }
    }
}

/// Reads, lexes, parses, and evaluates a whole script file against a
/// fresh interpreter, then exits. Script files are read as UTF-8.
fn run_script(path: &PathBuf) -> Result<(), GlamError> {
    let source = std::fs::read_to_string(path).map_err(|e| {
        GlamError::lex_error(format!("cannot read script file {}: {e}", path.display()), 0)
    })?;

    let tokens = lexer::lex(&source)?;
    let program = parser::parse(tokens)?;

    let mut interpreter = Interpreter::new(StdIo);
    interpreter.run(&program)
}
