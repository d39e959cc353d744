use crate::{MindfaArgs, TableArgs};
use mindfa::alphabet::{Alphabet, AlphabetError};
use mindfa::table::UserDfaError;
use std::process::ExitCode;
use std::{fs, io};
use thiserror::Error;

#[derive(Debug, Error)]
enum Error {
    #[error("cannot read {0}: {1}")]
    Read(String, io::Error),
    #[error("cannot write {0}: {1}")]
    Write(String, io::Error),
    #[error("bad alphabet: {0}")]
    Alphabet(#[from] AlphabetError),
    #[error("{0}")]
    UserDfa(#[from] UserDfaError),
}

pub fn run(main_args: &MindfaArgs, args: &TableArgs) -> ExitCode {
    match run_table(main_args, args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run_table(main_args: &MindfaArgs, args: &TableArgs) -> Result<(), Error> {
    let log = |s: &str| {
        if !main_args.no_log {
            println!("{s}")
        }
    };
    macro_rules! log {
        ($($t:tt)*) => (log(&format!($($t)*)))
    }

    let alphabet = Alphabet::parse_contiguous(&args.alphabet)?;
    let input = fs::read_to_string(&args.input)
        .map_err(|e| Error::Read(args.input.display().to_string(), e))?;

    let dfa = mindfa::table::parse_user_dfa(&alphabet, &input)?;
    log!(
        "Converted to {} states over {} symbols",
        dfa.states().len(),
        alphabet.len()
    );

    fs::write(&args.output, dfa.to_table())
        .map_err(|e| Error::Write(args.output.display().to_string(), e))?;
    log!("Wrote {}", args.output.display());
    Ok(())
}
