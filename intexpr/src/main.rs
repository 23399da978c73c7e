//! Command-line interface (CLI) for intexpr
//!
//! This binary wraps [`intexpr::evaluate`] and the [`Tokenizer`]. Each
//! subcommand takes the expression as an argument, or prompts for one line on
//! standard input when the argument is omitted. Expressions may start with a
//! sign (`intexpr eval "-5 * -3"`).
//!
//! On failure the error is printed to standard error as `Error: <message>`
//! and the process exits with status 1. Set `RUST_LOG=trace` to watch the
//! tokenizer and the grammar rules at work.

use anyhow::Result;
use clap::{Parser as ClapParser, Subcommand};
use intexpr::Tokenizer;
use smartstring::alias::String;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

#[derive(ClapParser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Command
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Checks that an expression is valid
    Check {
        /// Expression; read from stdin if omitted
        #[arg(allow_hyphen_values = true)]
        expr: Option<String>,
    },
    /// Evaluates an expression and prints its value
    Eval {
        /// Expression; read from stdin if omitted
        #[arg(allow_hyphen_values = true)]
        expr: Option<String>,
    },
    /// Prints the token stream of an expression
    Tokens {
        /// Expression; read from stdin if omitted
        #[arg(allow_hyphen_values = true)]
        expr: Option<String>,
    },
}

fn read_expr(
    expr: Option<String>,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<String> {
    if let Some(expr) = expr {
        return Ok(expr);
    }
    write!(out, "Enter an arithmetic expression: ")?;
    out.flush()?;
    let mut line = std::string::String::new();
    input.read_line(&mut line)?;
    Ok(line.trim_end_matches(['\n', '\r']).into())
}

fn run(command: Commands, input: &mut impl BufRead, out: &mut impl Write) -> Result<()> {
    match command {
        Commands::Check { expr } => {
            let line = read_expr(expr, input, out)?;
            intexpr::validate(&line)?;
            writeln!(out, "Parsing successful!")?;
        }
        Commands::Eval { expr } => {
            let line = read_expr(expr, input, out)?;
            let value = intexpr::evaluate(&line)?;
            log::info!("{:?} = {}", line, value);
            writeln!(out, "{value}")?;
        }
        Commands::Tokens { expr } => {
            let line = read_expr(expr, input, out)?;
            for token in Tokenizer::new(&line) {
                let token = token?;
                let text = token.span.slice(&line).unwrap_or_default();
                writeln!(out, "{}\t{}\t{}", token.span, text, token.kind)?;
            }
        }
    }
    Ok(())
}

/// Runs `command` and reports any failure on `err`. Returns the exit status.
fn execute(
    command: Commands,
    input: &mut impl BufRead,
    out: &mut impl Write,
    err: &mut impl Write,
) -> u8 {
    match run(command, input, out) {
        Ok(()) => 0,
        Err(e) => {
            // Nothing else can be reported if stderr itself fails.
            let _ = writeln!(err, "Error: {e}");
            1
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse();

    let status = execute(
        args.command,
        &mut io::stdin().lock(),
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    );
    ExitCode::from(status)
}
