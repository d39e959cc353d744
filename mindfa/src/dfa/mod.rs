//! # Deterministic finite automata
//! The [Dfa] struct is the canonical artifact of the whole toolchain: a
//! *complete* deterministic automaton over a byte [Alphabet], where every
//! state has exactly one transition per symbol. All three front doors end
//! here: the regex pipeline via [Nfa::to_dfa](crate::nfa::Nfa::to_dfa) and
//! [PartialDfa::complete], the table adapter via
//! [table::parse_user_dfa](crate::table::parse_user_dfa), and the canonical
//! file format via [parser::dfa_file](crate::parser::dfa_file) plus
//! [TryInto].
//!
//! ## Completion
//! The subset construction and the table adapter both naturally produce
//! *partial* tables: a cell stays unset when no NFA state (or no authored
//! transition) is reachable on that symbol. [PartialDfa] keeps those cells
//! as `Option<usize>`; [PartialDfa::complete] appends one non-accepting
//! dead state self-looping on every symbol if and only if some cell is
//! unset, and patches every unset cell to it. A [Dfa] is therefore total by
//! construction and evaluation never has to consider a missing transition.
//!
//! ## Minimization
//! [Dfa::minimize] replaces the automaton with its unique minimal
//! equivalent (up to state numbering) using Hopcroft partition refinement.
//! Class identifiers are assigned in the order blocks become distinct, the
//! representative of a class is its smallest pre-minimization state id, and
//! the new start state is the class of the old one, so minimizing the same
//! input always yields byte-identical output.
//!
//! ## The canonical table format
//! [Dfa::to_table] renders the machine-parsable text form shared by every
//! tool in this crate:
//!
//! ```text
//! ALPHABET <k> <symbols>
//! STATES <n>
//! START <s>
//! ACCEPT <m> <a0> <a1> …
//! TRANS
//! <n rows of k state indices>
//! END
//! ```
//!
//! `<symbols>` is the k alphabet bytes with no separators, in declaration
//! order; every `TRANS` row lists its targets in the same column order. The
//! accept list is emitted in ascending state order. A trailing newline
//! follows `END`.
//!
//! ```
//! use mindfa::dfa::Dfa;
//!
//! let table = "\
//! ALPHABET 2 ab
//! STATES 2
//! START 0
//! ACCEPT 1 1
//! TRANS
//! 1 0
//! 0 1
//! END
//! ";
//! let dfa: Dfa = mindfa::parser::dfa_file(table).unwrap().try_into().unwrap();
//! assert!(dfa.accepts("a"));
//! assert!(dfa.accepts("bab"));
//! assert!(!dfa.accepts("aa"));
//! assert_eq!(dfa.to_table(), table);
//! ```

use crate::alphabet::Alphabet;
use std::collections::HashSet;

mod minimize;
pub mod parse;

pub use parse::DfaFileError;

/// A deterministic automaton whose transition table may still have unset
/// cells. Produced by the subset construction and by the table adapter;
/// [PartialDfa::complete] turns it into a total [Dfa].
#[derive(Clone, Debug)]
pub struct PartialDfa {
    alphabet: Alphabet,
    accepting: Vec<bool>,
    rows: Vec<Vec<Option<usize>>>,
    start: usize,
}

impl PartialDfa {
    pub(crate) fn new(
        alphabet: Alphabet,
        accepting: Vec<bool>,
        rows: Vec<Vec<Option<usize>>>,
        start: usize,
    ) -> Self {
        Self {
            alphabet,
            accepting,
            rows,
            start,
        }
    }

    /// Totalizes the table: if any cell is unset, one dead state
    /// (non-accepting, self-looping on every symbol) is appended and every
    /// unset cell is pointed at it. A table without unset cells is returned
    /// unchanged.
    pub fn complete(self) -> Dfa {
        let PartialDfa {
            alphabet,
            accepting,
            rows,
            start,
        } = self;
        let needs_dead = rows.iter().flatten().any(|cell| cell.is_none());
        let dead = rows.len();
        let mut states: Vec<DfaState> = rows
            .into_iter()
            .zip(accepting)
            .map(|(row, accepting)| DfaState {
                accepting,
                transitions: row.into_iter().map(|cell| cell.unwrap_or(dead)).collect(),
            })
            .collect();
        if needs_dead {
            states.push(DfaState {
                accepting: false,
                transitions: vec![dead; alphabet.len()],
            });
        }
        Dfa {
            alphabet,
            states,
            start,
        }
    }
}

/// A state of a complete DFA: an accepting flag and one transition target
/// per alphabet symbol, in column order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DfaState {
    pub(crate) accepting: bool,
    pub(crate) transitions: Vec<usize>,
}

impl DfaState {
    pub fn is_accepting(&self) -> bool {
        self.accepting
    }

    /// Transition targets in the alphabet's column order.
    pub fn transitions(&self) -> &[usize] {
        &self.transitions
    }
}

/// A complete deterministic finite automaton. See the
/// [module-level documentation](crate::dfa) for the construction paths and
/// the canonical text format.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dfa {
    pub(crate) alphabet: Alphabet,
    pub(crate) states: Vec<DfaState>,
    pub(crate) start: usize,
}

impl Dfa {
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn states(&self) -> &[DfaState] {
        &self.states
    }

    /// Index of the start state.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Runs the automaton over `word`, returning whether it ends in an
    /// accepting state, or `None` if the word contains a byte outside the
    /// alphabet.
    pub fn run(&self, word: &str) -> Option<bool> {
        let mut state = self.start;
        for byte in word.bytes() {
            let symbol = self.alphabet.index_of(byte)?;
            state = self.states[state].transitions[symbol];
        }
        Some(self.states[state].accepting)
    }

    /// Like [Dfa::run], treating a word with foreign bytes as rejected.
    pub fn accepts(&self, word: &str) -> bool {
        self.run(word).unwrap_or(false)
    }

    /// Replaces this automaton with its unique minimal equivalent, merging
    /// all non-distinguishable states via Hopcroft partition refinement.
    /// The result is deterministic: class ids follow the order in which
    /// blocks become distinct and each class keeps the transitions of its
    /// smallest member.
    pub fn minimize(&mut self) {
        let minimize::Partition { class_of, classes } = minimize::partition(self);
        let mut representatives = vec![usize::MAX; classes];
        for (state, &class) in class_of.iter().enumerate() {
            if representatives[class] == usize::MAX {
                representatives[class] = state;
            }
        }
        debug_assert!(representatives.iter().all(|&r| r != usize::MAX));
        let states = representatives
            .iter()
            .map(|&representative| DfaState {
                accepting: self.states[representative].accepting,
                transitions: self.states[representative]
                    .transitions
                    .iter()
                    .map(|&target| class_of[target])
                    .collect(),
            })
            .collect();
        self.states = states;
        self.start = class_of[self.start];
    }

    /// Checks whether this automaton accepts the same language as `other`.
    /// The alphabets must be identical including order; the state counts
    /// and numberings need not match. Walks reachable state pairs and fails
    /// on the first acceptance disagreement.
    pub fn equivalent_to(&self, other: &Dfa) -> bool {
        if self.alphabet != other.alphabet {
            return false;
        }
        let mut explored = HashSet::new();
        let mut pairs = vec![(self.start, other.start)];
        explored.insert((self.start, other.start));
        while let Some((ours, theirs)) = pairs.pop() {
            if self.states[ours].accepting != other.states[theirs].accepting {
                return false;
            }
            for symbol in 0..self.alphabet.len() {
                let next = (
                    self.states[ours].transitions[symbol],
                    other.states[theirs].transitions[symbol],
                );
                if explored.insert(next) {
                    pairs.push(next);
                }
            }
        }
        true
    }

    /// Renders the canonical machine-parsable table, ending with a newline
    /// after `END`. The output can be parsed back into this very same
    /// automaton (not just an equivalent one).
    pub fn to_table(&self) -> String {
        let mut out = format!("ALPHABET {} {}\n", self.alphabet.len(), self.alphabet);
        out.push_str(&format!("STATES {}\n", self.states.len()));
        out.push_str(&format!("START {}\n", self.start));
        let accepting: Vec<usize> = (0..self.states.len())
            .filter(|&state| self.states[state].accepting)
            .collect();
        out.push_str(&format!("ACCEPT {}", accepting.len()));
        for state in &accepting {
            out.push_str(&format!(" {state}"));
        }
        out.push_str("\nTRANS\n");
        for state in &self.states {
            let row = state
                .transitions
                .iter()
                .map(|target| target.to_string())
                .collect::<Vec<_>>()
                .join(" ");
            out.push_str(&row);
            out.push('\n');
        }
        out.push_str("END\n");
        out
    }
}
