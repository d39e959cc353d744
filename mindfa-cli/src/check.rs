use crate::{CheckArgs, MindfaArgs};
use mindfa::check::{self, CorpusError, Verdict};
use mindfa::dfa::{Dfa, DfaFileError};
use std::fs;
use std::process::ExitCode;
use thiserror::Error;

#[derive(Debug, Error)]
enum Error<'a> {
    #[error("error parsing DFA table: {0:?}")]
    TableParse(nom::error::Error<&'a str>),
    #[error("invalid DFA table: {0}")]
    TableInvalid(DfaFileError),
    #[error("{0}")]
    Corpus(CorpusError),
}

pub fn run(main_args: &MindfaArgs, args: &CheckArgs) -> ExitCode {
    let read = |path: &std::path::Path| match fs::read_to_string(path) {
        Ok(contents) => Some(contents),
        Err(e) => {
            eprintln!("Error: cannot read {}: {e}", path.display());
            None
        }
    };
    let (Some(reference), Some(user), Some(tests)) = (
        read(&args.reference),
        read(&args.user),
        read(&args.tests),
    ) else {
        return ExitCode::FAILURE;
    };

    match run_check(main_args, &reference, &user, &tests) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run_check<'a>(
    main_args: &MindfaArgs,
    reference: &'a str,
    user: &'a str,
    tests: &'a str,
) -> Result<ExitCode, Error<'a>> {
    let log = |s: &str| {
        if !main_args.no_log {
            println!("{s}")
        }
    };
    macro_rules! log {
        ($($t:tt)*) => (log(&format!($($t)*)))
    }

    let reference = load_table(reference)?;
    let user = load_table(user)?;
    let cases = check::parse_corpus(tests).map_err(Error::Corpus)?;
    log!(
        "Running {} tests against {}-state reference and {}-state user DFA",
        cases.len(),
        reference.states().len(),
        user.states().len()
    );

    let report = match check::compare(&reference, &user, &cases) {
        Ok(report) => report,
        Err(CorpusError::AlphabetMismatch) => {
            eprintln!("FAIL: alphabets differ between reference and user DFA");
            eprintln!("ref:  {}", reference.alphabet());
            eprintln!("user: {}", user.alphabet());
            return Ok(ExitCode::from(2));
        }
        Err(e) => return Err(Error::Corpus(e)),
    };

    for warning in &report.warnings {
        eprintln!(
            "WARNING: test label mismatch vs reference at line {} (label={}, ref={})",
            warning.line,
            u8::from(warning.label),
            u8::from(warning.reference)
        );
    }

    match report.verdict {
        Verdict::Agree { total } => {
            println!("PASS: {total} tests matched");
            Ok(ExitCode::SUCCESS)
        }
        Verdict::Diverge {
            line,
            word,
            reference,
            user,
            label,
        } => {
            eprintln!("FAIL at test line {line}");
            eprintln!("  w = {}", if word.is_empty() { "<eps>" } else { &word });
            eprintln!(
                "  ref_accept = {}, user_accept = {}",
                u8::from(reference),
                u8::from(user)
            );
            eprintln!("  label = {}", u8::from(label));
            Ok(ExitCode::from(2))
        }
    }
}

fn load_table(source: &str) -> Result<Dfa, Error<'_>> {
    let parsed = mindfa::parser::dfa_file(source).map_err(Error::TableParse)?;
    parsed.try_into().map_err(Error::TableInvalid)
}
