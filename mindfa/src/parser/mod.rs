//! # mindfa parsers
//! Parsers for the two textual inputs shared across the toolchain: the
//! canonical machine-parsable `.dfa` table and the human-authored
//! transition-function form.
//!
//! ## The canonical `.dfa` format
//! Keyword-framed sections with whitespace-separated tokens:
//!
//! ```text
//! ALPHABET 2 ab
//! STATES 2
//! START 0
//! ACCEPT 1 1
//! TRANS
//! 1 0
//! 0 1
//! END
//! ```
//!
//! Parsing is done in two steps: [dfa_file] produces a raw
//! [ParsedDfaFile] without cross-checking the declared counts, and
//! `TryInto<`[Dfa](crate::dfa::Dfa)`>` validates counts, ranges and the
//! alphabet.
//!
//! ## The transition-function form
//! A line-oriented format:
//!
//! ```text
//! Start: q0
//! Accept: {q0, q2}
//! (q0, a) -> q1
//! (q1, b) -> q2
//! ```
//!
//! Blank lines and `#` comments are skipped, and lines matching none of the
//! three shapes are ignored so the table can sit inside free-form prose.
//! [user_dfa_line] classifies a single line; assembling the lines into a
//! complete automaton is the job of
//! [table::parse_user_dfa](crate::table::parse_user_dfa).

mod table;
mod userdfa;

use nom::{combinator::all_consuming, error::Error, Finish};

/// Raw contents of a canonical `.dfa` file, before any validation of the
/// declared counts and ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDfaFile<'a> {
    pub symbol_count: usize,
    pub symbols: &'a str,
    pub state_count: usize,
    pub start: usize,
    pub accept_count: usize,
    pub accepting: Vec<usize>,
    pub cells: Vec<usize>,
}

/// One classified line of the transition-function form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserLine {
    /// `Start: qN`
    Start(usize),
    /// `Accept: {qA, qB, …}` (braces and commas are optional)
    Accept(Vec<usize>),
    /// `(qX, s) -> qY`
    Transition { from: usize, symbol: char, to: usize },
    /// Blank, comment, or free-form prose
    Ignored,
}

/// Parses a canonical `.dfa` table. The whole input must be consumed. The
/// result is unvalidated; use [TryInto] to turn it into a checked
/// [crate::dfa::Dfa].
pub fn dfa_file(input: &str) -> Result<ParsedDfaFile, Error<&str>> {
    all_consuming(table::dfa_file)(input)
        .finish()
        .map(|(_, file)| file)
}

/// Classifies one line of the transition-function form. A line is only an
/// error when it announces one of the known shapes (`Start:`, `Accept:`,
/// a leading `(`) but fails to parse as it; anything else is [UserLine::Ignored].
pub fn user_dfa_line(line: &str) -> Result<UserLine, Error<&str>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(UserLine::Ignored);
    }
    if trimmed.starts_with("Start:") || trimmed.starts_with("START:") {
        all_consuming(userdfa::start_line)(trimmed)
            .finish()
            .map(|(_, line)| line)
    } else if trimmed.starts_with("Accept:") || trimmed.starts_with("ACCEPT:") {
        all_consuming(userdfa::accept_line)(trimmed)
            .finish()
            .map(|(_, line)| line)
    } else if trimmed.starts_with('(') {
        all_consuming(userdfa::transition_line)(trimmed)
            .finish()
            .map(|(_, line)| line)
    } else {
        Ok(UserLine::Ignored)
    }
}
