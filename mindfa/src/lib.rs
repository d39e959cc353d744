//!# mindfa
//!
//! `mindfa` is a Rust toolchain for regular-language automata, built around
//! one canonical artifact: a minimized, complete DFA in a strict
//! machine-parsable text format. It compiles regular expressions into that
//! form, converts hand-written transition tables into it, and decides
//! whether two tables behave identically over a labeled test corpus.
//!
//! ## Usage
//!
//! ```rust
//! use mindfa::alphabet::Alphabet;
//!
//! fn main() {
//!     let alphabet = Alphabet::parse_line("a b").unwrap();
//!     let dfa = mindfa::compile("(a|b)*abb", &alphabet).unwrap();
//!     assert!(dfa.accepts("abb"));
//!     assert!(dfa.accepts("aabb"));
//!     assert!(!dfa.accepts("ab"));
//!
//!     // The canonical table is reproducible byte for byte and can be
//!     // parsed back into the very same automaton.
//!     let table = dfa.to_table();
//!     let reparsed: mindfa::dfa::Dfa =
//!         mindfa::parser::dfa_file(&table).unwrap().try_into().unwrap();
//!     assert_eq!(dfa, reparsed);
//! }
//! ```
//!
//! ## Pattern syntax
//!
//! Patterns are written over a user-declared byte alphabet. `|` denotes
//! union and `+` is a *synonym for union*, not Kleene plus, which is worth
//! knowing before porting patterns from other engines. `*` is the postfix
//! Kleene star, `(` `)` group, and concatenation is implicit. The empty
//! string is written `ε` or `<eps>`. Whitespace inside the pattern is
//! ignored; there are no escapes, classes, anchors or counted repetitions.
//!
//! ## Pipeline
//!
//! [compile] runs the classic textbook pipeline, each stage available on
//! its own:
//!
//! * [Pattern::parse](regex::Pattern::parse): lexing, implicit
//!   concatenation, shunting-yard to postfix
//! * [Pattern::to_nfa](regex::Pattern::to_nfa): Thompson construction of
//!   an ε-NFA
//! * [Nfa::to_dfa](nfa::Nfa::to_dfa): subset construction, possibly
//!   leaving unset cells
//! * [PartialDfa::complete](dfa::PartialDfa::complete): dead-state
//!   completion
//! * [Dfa::minimize](dfa::Dfa::minimize): Hopcroft partition refinement
//!
//! The result is deterministic: compiling the same pattern over the same
//! alphabet always produces byte-identical output.
//!
//! ## Operations
//!
//! This library currently supports:
//!
//! * [Compiling](compile) a pattern to the unique minimal complete DFA
//! * [Parsing](parser::dfa_file) and validating canonical `.dfa` tables
//! * [Rendering](dfa::Dfa::to_table) a DFA back to the canonical table
//! * [Converting](table::parse_user_dfa) hand-written transition-function
//!   files into complete DFAs
//! * [Running](dfa::Dfa::run) a word through a DFA
//! * [Checking language equivalence](dfa::Dfa::equivalent_to) of two DFAs
//! * [Comparing](check::compare) two DFAs over a labeled test corpus

pub mod alphabet;
mod bitset;
pub mod check;
pub mod dfa;
pub mod nfa;
pub mod parser;
pub mod regex;
pub mod table;

use crate::alphabet::{Alphabet, AlphabetError};
use crate::dfa::Dfa;
use crate::nfa::{NfaBuildError, SubsetError};
use crate::regex::{Pattern, PatternError};
use thiserror::Error;

#[cfg(test)]
mod tests;

/// Default ceiling on NFA and DFA state counts.
pub const DEFAULT_STATE_LIMIT: usize = 4096;

/// Ceilings for the intermediate automata. Exceeding either is a fatal
/// error, raised eagerly while states are being created.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Limits {
    pub max_nfa_states: usize,
    pub max_dfa_states: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_nfa_states: DEFAULT_STATE_LIMIT,
            max_dfa_states: DEFAULT_STATE_LIMIT,
        }
    }
}

/// Any failure of the compilation pipeline, from alphabet validation to
/// the subset construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompileError {
    #[error("bad alphabet: {0}")]
    Alphabet(#[from] AlphabetError),
    #[error("bad pattern: {0}")]
    Pattern(#[from] PatternError),
    #[error("{0}")]
    Nfa(#[from] NfaBuildError),
    #[error("{0}")]
    Subset(#[from] SubsetError),
}

/// Compiles `pattern` over `alphabet` into the unique minimal complete
/// DFA accepting its language, with the default state limits.
pub fn compile(pattern: &str, alphabet: &Alphabet) -> Result<Dfa, CompileError> {
    compile_with_limits(pattern, alphabet, Limits::default())
}

/// Compiles `pattern` over `alphabet` with explicit state limits.
pub fn compile_with_limits(
    pattern: &str,
    alphabet: &Alphabet,
    limits: Limits,
) -> Result<Dfa, CompileError> {
    let pattern = Pattern::parse(pattern, alphabet)?;
    let nfa = pattern.to_nfa_bounded(limits.max_nfa_states)?;
    let mut dfa = nfa.to_dfa_bounded(limits.max_dfa_states)?.complete();
    dfa.minimize();
    Ok(dfa)
}
