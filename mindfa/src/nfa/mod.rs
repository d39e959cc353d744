//! # Thompson ε-NFA
//! The [Nfa] here is the intermediate automaton between a parsed
//! [Pattern](crate::regex::Pattern) and the deterministic table: a set of
//! states with labeled edges, a single start state and a single accepting
//! state, as produced by the Thompson construction. Every operator of the
//! pattern grammar maps to a fixed fragment shape (two fresh states for a
//! symbol or ε, an ε-bridge for concatenation, a fork/join pair for union,
//! a loop pair for the star), so the automaton grows linearly with the
//! pattern.
//!
//! The only onward operation is [Nfa::to_dfa], the subset construction:
//! deterministic states are ε-closed sets of NFA states, discovered
//! breadth-first from the closure of the start state and deduplicated by
//! set equality. States are numbered in discovery order, so the resulting
//! numbering depends only on the NFA shape and the alphabet order, which
//! makes the final compiled table reproducible byte for byte.

use crate::alphabet::Alphabet;
use crate::bitset::Bitset;
use crate::dfa::PartialDfa;
use crate::regex::{Pattern, Token};
use crate::DEFAULT_STATE_LIMIT;
use std::collections::{HashMap, VecDeque};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NfaBuildError {
    #[error("malformed postfix: operator is missing an operand")]
    MalformedPostfix,
    #[error("NFA would exceed {0} states")]
    TooManyStates(usize),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubsetError {
    #[error("DFA would exceed {0} states")]
    TooManyStates(usize),
}

/// Label of one NFA edge: a non-consuming ε-move, or an alphabet symbol
/// identified by its column index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Label {
    Epsilon,
    Symbol(usize),
}

#[derive(Clone, Debug)]
struct NfaState {
    edges: Vec<(Label, usize)>,
}

/// A Thompson ε-NFA with a single start state and a single accepting state.
#[derive(Clone, Debug)]
pub struct Nfa {
    alphabet: Alphabet,
    states: Vec<NfaState>,
    start: usize,
    accept: usize,
}

/// One entry/exit pair on the construction stack.
#[derive(Clone, Copy, Debug)]
struct Fragment {
    entry: usize,
    exit: usize,
}

struct Builder {
    states: Vec<NfaState>,
    max_states: usize,
}

impl Builder {
    fn state(&mut self) -> Result<usize, NfaBuildError> {
        if self.states.len() >= self.max_states {
            return Err(NfaBuildError::TooManyStates(self.max_states));
        }
        self.states.push(NfaState { edges: Vec::new() });
        Ok(self.states.len() - 1)
    }

    fn pair(&mut self) -> Result<(usize, usize), NfaBuildError> {
        Ok((self.state()?, self.state()?))
    }

    fn edge(&mut self, from: usize, label: Label, to: usize) {
        self.states[from].edges.push((label, to));
    }
}

impl Nfa {
    /// Evaluates the postfix form of `pattern` against a fragment stack.
    /// The upstream grammar guarantees a well-formed postfix, so
    /// [NfaBuildError::MalformedPostfix] signals a bug rather than bad user
    /// input.
    pub(crate) fn thompson(pattern: &Pattern, max_states: usize) -> Result<Self, NfaBuildError> {
        let mut builder = Builder {
            states: Vec::new(),
            max_states,
        };
        let mut stack: Vec<Fragment> = Vec::new();
        for &token in pattern.postfix() {
            match token {
                Token::Symbol(index) => {
                    let (entry, exit) = builder.pair()?;
                    builder.edge(entry, Label::Symbol(index), exit);
                    stack.push(Fragment { entry, exit });
                }
                Token::Epsilon => {
                    let (entry, exit) = builder.pair()?;
                    builder.edge(entry, Label::Epsilon, exit);
                    stack.push(Fragment { entry, exit });
                }
                Token::Concat => {
                    let second = stack.pop().ok_or(NfaBuildError::MalformedPostfix)?;
                    let first = stack.pop().ok_or(NfaBuildError::MalformedPostfix)?;
                    builder.edge(first.exit, Label::Epsilon, second.entry);
                    stack.push(Fragment {
                        entry: first.entry,
                        exit: second.exit,
                    });
                }
                Token::Union => {
                    let second = stack.pop().ok_or(NfaBuildError::MalformedPostfix)?;
                    let first = stack.pop().ok_or(NfaBuildError::MalformedPostfix)?;
                    let (entry, exit) = builder.pair()?;
                    builder.edge(entry, Label::Epsilon, first.entry);
                    builder.edge(entry, Label::Epsilon, second.entry);
                    builder.edge(first.exit, Label::Epsilon, exit);
                    builder.edge(second.exit, Label::Epsilon, exit);
                    stack.push(Fragment { entry, exit });
                }
                Token::Star => {
                    let inner = stack.pop().ok_or(NfaBuildError::MalformedPostfix)?;
                    let (entry, exit) = builder.pair()?;
                    builder.edge(entry, Label::Epsilon, inner.entry);
                    builder.edge(entry, Label::Epsilon, exit);
                    builder.edge(inner.exit, Label::Epsilon, inner.entry);
                    builder.edge(inner.exit, Label::Epsilon, exit);
                    stack.push(Fragment { entry, exit });
                }
                Token::LParen | Token::RParen => return Err(NfaBuildError::MalformedPostfix),
            }
        }
        let fragment = stack.pop().ok_or(NfaBuildError::MalformedPostfix)?;
        if !stack.is_empty() {
            return Err(NfaBuildError::MalformedPostfix);
        }
        Ok(Nfa {
            alphabet: pattern.alphabet().clone(),
            states: builder.states,
            start: fragment.entry,
            accept: fragment.exit,
        })
    }

    /// Number of states.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Saturates `set` with every state reachable over ε-edges. The
    /// worklist order does not affect the fixpoint.
    fn close(&self, set: &mut Bitset) {
        let mut worklist: Vec<usize> = set.ones().collect();
        while let Some(state) = worklist.pop() {
            for &(label, to) in &self.states[state].edges {
                if label == Label::Epsilon && set.insert(to) {
                    worklist.push(to);
                }
            }
        }
    }

    /// The set of states reachable from `set` over one edge labeled with
    /// the symbol at column `symbol`.
    fn move_on(&self, set: &Bitset, symbol: usize) -> Bitset {
        let mut out = Bitset::new(self.states.len());
        for state in set.ones() {
            for &(label, to) in &self.states[state].edges {
                if label == Label::Symbol(symbol) {
                    out.insert(to);
                }
            }
        }
        out
    }

    /// Subset construction with the default bound on the deterministic
    /// state count. See [Nfa::to_dfa_bounded].
    pub fn to_dfa(&self) -> Result<PartialDfa, SubsetError> {
        self.to_dfa_bounded(DEFAULT_STATE_LIMIT)
    }

    /// Subset construction: builds the deterministic automaton whose states
    /// are the ε-closed sets of NFA states reachable from the closure of
    /// the start state. Closure sets are deduplicated by equality, and
    /// states are numbered in discovery order with the start set at 0.
    /// Symbols with no reachable NFA state get an unset cell; the result is
    /// totalized by [PartialDfa::complete].
    pub fn to_dfa_bounded(&self, max_states: usize) -> Result<PartialDfa, SubsetError> {
        let mut initial = Bitset::new(self.states.len());
        initial.insert(self.start);
        self.close(&mut initial);

        let mut indices = HashMap::new();
        let mut sets = vec![initial.clone()];
        let mut accepting = vec![initial.contains(self.accept)];
        let mut rows: Vec<Vec<Option<usize>>> = Vec::new();
        indices.insert(initial, 0);
        let mut worklist = VecDeque::from([0usize]);

        // The FIFO worklist pops states in index order, so pushing each row
        // as its state is dequeued keeps rows aligned with state indices.
        while let Some(index) = worklist.pop_front() {
            let mut row = Vec::with_capacity(self.alphabet.len());
            for symbol in 0..self.alphabet.len() {
                let moved = self.move_on(&sets[index], symbol);
                if moved.is_empty() {
                    row.push(None);
                    continue;
                }
                let mut closure = moved;
                self.close(&mut closure);
                let target = match indices.get(&closure) {
                    Some(&existing) => existing,
                    None => {
                        if sets.len() >= max_states {
                            return Err(SubsetError::TooManyStates(max_states));
                        }
                        let fresh = sets.len();
                        accepting.push(closure.contains(self.accept));
                        sets.push(closure.clone());
                        indices.insert(closure, fresh);
                        worklist.push_back(fresh);
                        fresh
                    }
                };
                row.push(Some(target));
            }
            rows.push(row);
        }

        Ok(PartialDfa::new(self.alphabet.clone(), accepting, rows, 0))
    }
}
