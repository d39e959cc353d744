mod check;
mod compile;
mod table;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

/// Toolchain for regular-language automata: compile regular expressions to
/// minimized DFA tables, convert hand-written transition tables to the same
/// format, and check two tables for behavioral equivalence over a test
/// corpus.
#[derive(Debug, Parser)]
#[command(name = "mindfa", version, about)]
pub struct MindfaArgs {
    /// Suppress progress logging (results and errors are still printed)
    #[arg(long)]
    pub no_log: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compile a pattern + alphabet input file into a minimized DFA table
    Compile(CompileArgs),
    /// Convert a hand-written transition-function file into a DFA table
    Table(TableArgs),
    /// Run two DFA tables against a labeled test corpus
    Check(CheckArgs),
}

#[derive(Debug, Args)]
pub struct CompileArgs {
    /// Input file: line 1 is the pattern, line 2 the alphabet
    pub input: PathBuf,
    /// Output table file
    pub output: PathBuf,
}

#[derive(Debug, Args)]
pub struct TableArgs {
    /// The alphabet as one contiguous string, e.g. "ab01"
    pub alphabet: String,
    /// Input transition-function file
    pub input: PathBuf,
    /// Output table file
    pub output: PathBuf,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Reference table file
    pub reference: PathBuf,
    /// Candidate table file to compare against the reference
    pub user: PathBuf,
    /// Labeled test corpus
    pub tests: PathBuf,
}

fn main() -> ExitCode {
    let args = MindfaArgs::parse();
    match &args.command {
        Command::Compile(cmd) => compile::run(&args, cmd),
        Command::Table(cmd) => table::run(&args, cmd),
        Command::Check(cmd) => check::run(&args, cmd),
    }
}
