use crate::alphabet::{Alphabet, AlphabetError};
use crate::dfa::{Dfa, DfaState};
use crate::parser::ParsedDfaFile;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DfaFileError {
    #[error("alphabet string has {actual} bytes but {declared} were declared")]
    AlphabetLengthMismatch { declared: usize, actual: usize },
    #[error("bad alphabet: {0}")]
    BadAlphabet(#[from] AlphabetError),
    #[error("state count must be positive")]
    NoStates,
    #[error("start state {0} out of range")]
    StartOutOfRange(usize),
    #[error("accept list has {actual} entries but {declared} were declared")]
    AcceptLengthMismatch { declared: usize, actual: usize },
    #[error("accepting state {0} out of range")]
    AcceptOutOfRange(usize),
    #[error("transition table has {actual} cells, expected {expected}")]
    CellCountMismatch { expected: usize, actual: usize },
    #[error("transition target {0} out of range")]
    TargetOutOfRange(usize),
}

impl TryFrom<ParsedDfaFile<'_>> for Dfa {
    type Error = DfaFileError;

    fn try_from(value: ParsedDfaFile<'_>) -> Result<Self, Self::Error> {
        use DfaFileError::*;
        let ParsedDfaFile {
            symbol_count,
            symbols,
            state_count,
            start,
            accept_count,
            accepting,
            cells,
        } = value;

        if symbols.len() != symbol_count {
            return Err(AlphabetLengthMismatch {
                declared: symbol_count,
                actual: symbols.len(),
            });
        }
        let alphabet = Alphabet::parse_contiguous(symbols)?;

        if state_count == 0 {
            return Err(NoStates);
        }
        if start >= state_count {
            return Err(StartOutOfRange(start));
        }

        if accepting.len() != accept_count {
            return Err(AcceptLengthMismatch {
                declared: accept_count,
                actual: accepting.len(),
            });
        }
        let mut flags = vec![false; state_count];
        for &state in &accepting {
            if state >= state_count {
                return Err(AcceptOutOfRange(state));
            }
            flags[state] = true;
        }

        if cells.len() != state_count * alphabet.len() {
            return Err(CellCountMismatch {
                expected: state_count * alphabet.len(),
                actual: cells.len(),
            });
        }
        for &target in &cells {
            if target >= state_count {
                return Err(TargetOutOfRange(target));
            }
        }

        let states = cells
            .chunks(alphabet.len())
            .zip(flags)
            .map(|(row, accepting)| DfaState {
                accepting,
                transitions: row.to_vec(),
            })
            .collect();
        Ok(Dfa {
            alphabet,
            states,
            start,
        })
    }
}
