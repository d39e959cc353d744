use crate::{CompileArgs, MindfaArgs};
use mindfa::alphabet::Alphabet;
use mindfa::CompileError;
use std::process::ExitCode;
use std::{fs, io};
use thiserror::Error;

#[derive(Debug, Error)]
enum Error {
    #[error("cannot read {0}: {1}")]
    Read(String, io::Error),
    #[error("cannot write {0}: {1}")]
    Write(String, io::Error),
    #[error("input must have 2 lines: pattern then alphabet")]
    MissingLines,
    #[error("{0}")]
    Compile(#[from] CompileError),
}

pub fn run(main_args: &MindfaArgs, args: &CompileArgs) -> ExitCode {
    match run_compile(main_args, args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run_compile(main_args: &MindfaArgs, args: &CompileArgs) -> Result<(), Error> {
    let log = |s: &str| {
        if !main_args.no_log {
            println!("{s}")
        }
    };
    macro_rules! log {
        ($($t:tt)*) => (log(&format!($($t)*)))
    }

    let input = fs::read_to_string(&args.input)
        .map_err(|e| Error::Read(args.input.display().to_string(), e))?;
    let mut lines = input.lines();
    let pattern = lines.next().ok_or(Error::MissingLines)?;
    let alphabet_line = lines.next().ok_or(Error::MissingLines)?;

    let alphabet = Alphabet::parse_line(alphabet_line).map_err(CompileError::from)?;
    let dfa = mindfa::compile(pattern, &alphabet)?;
    log!(
        "Compiled to {} states over {} symbols ({} accepting)",
        dfa.states().len(),
        alphabet.len(),
        dfa.states().iter().filter(|s| s.is_accepting()).count()
    );

    fs::write(&args.output, dfa.to_table())
        .map_err(|e| Error::Write(args.output.display().to_string(), e))?;
    log!("Wrote {}", args.output.display());
    Ok(())
}
