//! # Transition-table adapter
//! Converts the human-authored transition-function form into the same
//! canonical [Dfa] the compiler emits, so hand-written automata can be
//! checked against compiled ones. The input names its states `q<number>`
//! and may leave transitions out; the missing ones are completed with a
//! dead state exactly as the compiler does. The author's state numbering
//! is preserved and the result is *not* minimized, so a behavioral check
//! against a compiled table genuinely compares different shapes of the
//! same language.
//!
//! ```
//! use mindfa::alphabet::Alphabet;
//! use mindfa::table;
//!
//! let alphabet = Alphabet::parse_contiguous("ab").unwrap();
//! let input = "\
//! Start: q0
//! Accept: {q1}
//! (q0, a) -> q1
//! ";
//! let dfa = table::parse_user_dfa(&alphabet, input).unwrap();
//! assert_eq!(dfa.states().len(), 3); // q0, q1 and the dead state
//! assert!(dfa.accepts("a"));
//! assert!(!dfa.accepts("ab"));
//! ```

use crate::alphabet::Alphabet;
use crate::dfa::{Dfa, PartialDfa};
use crate::parser::{self, UserLine};
use crate::Limits;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UserDfaError {
    #[error("line {0}: malformed line")]
    Malformed(usize),
    #[error("line {line}: symbol '{symbol}' not in alphabet")]
    ForeignSymbol { line: usize, symbol: char },
    #[error("line {line}: conflicting transition for (q{from}, {symbol})")]
    Nondeterministic {
        line: usize,
        from: usize,
        symbol: char,
    },
    #[error("line {line}: state q{state} exceeds the {limit}-state limit")]
    StateTooLarge {
        line: usize,
        state: usize,
        limit: usize,
    },
    #[error("missing Start line")]
    MissingStart,
    #[error("missing Accept line")]
    MissingAccept,
}

/// Reads the transition-function form against `alphabet` and produces a
/// complete DFA, with the default bound on the state count.
pub fn parse_user_dfa(alphabet: &Alphabet, input: &str) -> Result<Dfa, UserDfaError> {
    parse_user_dfa_bounded(alphabet, input, Limits::default().max_dfa_states)
}

/// Reads the transition-function form against `alphabet`, refusing state
/// indices at or above `max_states`. The state count of the result is the
/// highest mentioned index plus one, plus a dead state if any transition
/// was left unspecified.
pub fn parse_user_dfa_bounded(
    alphabet: &Alphabet,
    input: &str,
    max_states: usize,
) -> Result<Dfa, UserDfaError> {
    let mut start = None;
    let mut accept_seen = false;
    let mut accepting: Vec<usize> = Vec::new();
    let mut transitions: HashMap<(usize, usize), usize> = HashMap::new();
    let mut max_state = None;

    let note_state = |state: usize, line: usize, max_state: &mut Option<usize>| {
        if state >= max_states {
            return Err(UserDfaError::StateTooLarge {
                line,
                state,
                limit: max_states,
            });
        }
        *max_state = Some(max_state.map_or(state, |m: usize| m.max(state)));
        Ok(())
    };

    for (number, line) in input.lines().enumerate() {
        let number = number + 1;
        let parsed =
            parser::user_dfa_line(line).map_err(|_| UserDfaError::Malformed(number))?;
        match parsed {
            UserLine::Ignored => {}
            UserLine::Start(state) => {
                note_state(state, number, &mut max_state)?;
                start = Some(state);
            }
            UserLine::Accept(states) => {
                accept_seen = true;
                for state in states {
                    note_state(state, number, &mut max_state)?;
                    accepting.push(state);
                }
            }
            UserLine::Transition { from, symbol, to } => {
                let column = symbol
                    .is_ascii()
                    .then(|| alphabet.index_of(symbol as u8))
                    .flatten()
                    .ok_or(UserDfaError::ForeignSymbol {
                        line: number,
                        symbol,
                    })?;
                note_state(from, number, &mut max_state)?;
                note_state(to, number, &mut max_state)?;
                match transitions.entry((from, column)) {
                    Entry::Occupied(entry) if *entry.get() != to => {
                        return Err(UserDfaError::Nondeterministic {
                            line: number,
                            from,
                            symbol,
                        });
                    }
                    Entry::Occupied(_) => {}
                    Entry::Vacant(entry) => {
                        entry.insert(to);
                    }
                }
            }
        }
    }

    let start = start.ok_or(UserDfaError::MissingStart)?;
    if !accept_seen {
        return Err(UserDfaError::MissingAccept);
    }

    let state_count = max_state.map_or(0, |max| max + 1);
    let mut flags = vec![false; state_count];
    for state in accepting {
        flags[state] = true;
    }
    let mut rows = vec![vec![None; alphabet.len()]; state_count];
    for ((from, column), to) in transitions {
        rows[from][column] = Some(to);
    }
    Ok(PartialDfa::new(alphabet.clone(), flags, rows, start).complete())
}
