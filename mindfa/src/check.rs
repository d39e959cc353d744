//! # Behavioral comparison
//! Decides whether two DFAs behave identically over a labeled test corpus.
//! Each non-blank, non-`#` line of a corpus is `<label> <word>` with label
//! 0 or 1 and the word a whitespace-free token over the alphabet, or the
//! literal `<eps>` for the empty word. Both automata run every word; the
//! first acceptance disagreement is the verdict. The labels are only
//! cross-checked against the reference automaton and a mismatch there is a
//! warning, never a failure.
//!
//! ```
//! use mindfa::alphabet::Alphabet;
//! use mindfa::check::{self, Verdict};
//!
//! let alphabet = Alphabet::parse_line("a b").unwrap();
//! let dfa = mindfa::compile("(a|b)*abb", &alphabet).unwrap();
//! let cases = check::parse_corpus("1 abb\n0 ab\n# comment\n").unwrap();
//! let report = check::compare(&dfa, &dfa, &cases).unwrap();
//! assert_eq!(report.verdict, Verdict::Agree { total: 2 });
//! assert!(report.warnings.is_empty());
//! ```

use crate::dfa::Dfa;
use thiserror::Error;

/// One line of a test corpus. The word is already decoded: `<eps>` becomes
/// the empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    pub line: usize,
    pub label: bool,
    pub word: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CorpusError {
    #[error("tests line {0}: label must be 0 or 1")]
    BadLabel(usize),
    #[error("tests line {0}: missing word (use <eps> for the empty word)")]
    MissingWord(usize),
    #[error("tests line {0}: word contains a symbol outside the alphabet")]
    ForeignSymbol(usize),
    #[error("reference and user alphabets differ")]
    AlphabetMismatch,
}

/// Outcome of running both automata over a corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The automata agreed on every word.
    Agree { total: usize },
    /// The first word the automata disagree on.
    Diverge {
        line: usize,
        word: String,
        reference: bool,
        user: bool,
        label: bool,
    },
}

/// A corpus label that disagrees with the reference automaton.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMismatch {
    pub line: usize,
    pub label: bool,
    pub reference: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub verdict: Verdict,
    /// Label warnings collected up to the verdict, in corpus order.
    pub warnings: Vec<LabelMismatch>,
}

/// Parses a test corpus. Blank lines and lines starting with `#` are
/// skipped; line numbers in the result refer to the original input.
pub fn parse_corpus(input: &str) -> Result<Vec<TestCase>, CorpusError> {
    let mut cases = Vec::new();
    for (number, line) in input.lines().enumerate() {
        let number = number + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let mut parts = trimmed.split_whitespace();
        let label = match parts.next() {
            Some("0") => false,
            Some("1") => true,
            _ => return Err(CorpusError::BadLabel(number)),
        };
        let word = parts.next().ok_or(CorpusError::MissingWord(number))?;
        let word = if word == "<eps>" {
            String::new()
        } else {
            word.to_string()
        };
        cases.push(TestCase {
            line: number,
            label,
            word,
        });
    }
    Ok(cases)
}

/// Runs every case through both automata and reports the first divergence,
/// if any. The alphabets must be byte-identical including order, and a word
/// with a byte outside the alphabet is a hard error.
pub fn compare(reference: &Dfa, user: &Dfa, cases: &[TestCase]) -> Result<Report, CorpusError> {
    if reference.alphabet() != user.alphabet() {
        return Err(CorpusError::AlphabetMismatch);
    }
    let mut warnings = Vec::new();
    let mut total = 0;
    for case in cases {
        let on_reference = reference
            .run(&case.word)
            .ok_or(CorpusError::ForeignSymbol(case.line))?;
        let on_user = user
            .run(&case.word)
            .ok_or(CorpusError::ForeignSymbol(case.line))?;
        total += 1;
        if on_reference != on_user {
            return Ok(Report {
                verdict: Verdict::Diverge {
                    line: case.line,
                    word: case.word.clone(),
                    reference: on_reference,
                    user: on_user,
                    label: case.label,
                },
                warnings,
            });
        }
        if on_reference != case.label {
            warnings.push(LabelMismatch {
                line: case.line,
                label: case.label,
                reference: on_reference,
            });
        }
    }
    Ok(Report {
        verdict: Verdict::Agree { total },
        warnings,
    })
}
