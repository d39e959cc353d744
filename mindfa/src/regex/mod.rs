//! # Regular expressions
//! Patterns are written over an [Alphabet] with five operators: `|` and `+`
//! both denote union (`+` is *not* Kleene plus in this dialect), `*` is the
//! postfix Kleene star, and `(` `)` group. Concatenation is implicit. The
//! empty string is written `ε` (the two-byte UTF-8 sequence) or `<eps>`;
//! whitespace inside the pattern is ignored. There is no escaping and no
//! character classes; every other byte must be a symbol of the alphabet.
//!
//! Parsing happens in three passes, all exposed through [Pattern::parse]:
//! lexing (ε rewriting, whitespace stripping, byte classification), implicit
//! concatenation insertion, and shunting-yard conversion to postfix. The
//! postfix form is what the Thompson construction consumes.
//!
//! ```
//! use mindfa::alphabet::Alphabet;
//! use mindfa::regex::Pattern;
//!
//! let alphabet = Alphabet::parse_line("a b").unwrap();
//! let pattern = Pattern::parse("a(a|b)*", &alphabet).unwrap();
//! let nfa = pattern.to_nfa().unwrap();
//! let mut dfa = nfa.to_dfa().unwrap().complete();
//! dfa.minimize();
//! assert!(dfa.accepts("aab"));
//! assert!(!dfa.accepts("ba"));
//! ```

use crate::alphabet::Alphabet;
use crate::nfa::{Nfa, NfaBuildError};
use crate::DEFAULT_STATE_LIMIT;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatternError {
    #[error("pattern is empty")]
    Empty,
    #[error("pattern contains explicit '.'")]
    ExplicitDot,
    #[error("pattern contains non-ASCII byte 0x{0:02x}; only ε may be multi-byte")]
    NonAsciiByte(u8),
    #[error("pattern contains '{0}' which is neither an operator nor in the alphabet")]
    UnknownSymbol(char),
    #[error("unbalanced parentheses")]
    UnbalancedParens,
}

/// One token of a preprocessed pattern. `Symbol` carries the column index
/// of the symbol in the alphabet, not the byte itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token {
    Symbol(usize),
    Epsilon,
    Union,
    Star,
    Concat,
    LParen,
    RParen,
}

/// A validated pattern in postfix form, ready for the Thompson
/// construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern {
    alphabet: Alphabet,
    postfix: Vec<Token>,
}

impl Pattern {
    /// Lexes and normalizes `pattern` over `alphabet`, producing its
    /// postfix form.
    pub fn parse(pattern: &str, alphabet: &Alphabet) -> Result<Self, PatternError> {
        let tokens = lex(pattern, alphabet)?;
        check_balanced(&tokens)?;
        let postfix = to_postfix(&insert_concat(&tokens))?;
        Ok(Self {
            alphabet: alphabet.clone(),
            postfix,
        })
    }

    /// Builds the Thompson ε-NFA of this pattern, with the default bound on
    /// the state count.
    pub fn to_nfa(&self) -> Result<Nfa, NfaBuildError> {
        self.to_nfa_bounded(DEFAULT_STATE_LIMIT)
    }

    /// Builds the Thompson ε-NFA of this pattern, refusing to create more
    /// than `max_states` states.
    pub fn to_nfa_bounded(&self, max_states: usize) -> Result<Nfa, NfaBuildError> {
        Nfa::thompson(self, max_states)
    }

    /// The postfix token stream of this pattern.
    pub fn postfix(&self) -> &[Token] {
        &self.postfix
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }
}

/// Rewrites both ε spellings to [Token::Epsilon], strips whitespace and
/// classifies every remaining byte.
fn lex(pattern: &str, alphabet: &Alphabet) -> Result<Vec<Token>, PatternError> {
    let bytes = pattern.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        let byte = bytes[i];
        if byte.is_ascii_whitespace() {
            i += 1;
            continue;
        }
        if bytes[i..].starts_with(b"<eps>") {
            tokens.push(Token::Epsilon);
            i += 5;
            continue;
        }
        // UTF-8 Greek small letter epsilon
        if byte == 0xCE && bytes.get(i + 1) == Some(&0xB5) {
            tokens.push(Token::Epsilon);
            i += 2;
            continue;
        }
        let token = match byte {
            b'|' | b'+' => Token::Union,
            b'*' => Token::Star,
            b'(' => Token::LParen,
            b')' => Token::RParen,
            b'.' => return Err(PatternError::ExplicitDot),
            _ => match alphabet.index_of(byte) {
                Some(index) => Token::Symbol(index),
                None if !byte.is_ascii() => return Err(PatternError::NonAsciiByte(byte)),
                None => return Err(PatternError::UnknownSymbol(byte as char)),
            },
        };
        tokens.push(token);
        i += 1;
    }
    if tokens.is_empty() {
        return Err(PatternError::Empty);
    }
    Ok(tokens)
}

fn check_balanced(tokens: &[Token]) -> Result<(), PatternError> {
    let mut depth = 0i32;
    for token in tokens {
        match token {
            Token::LParen => depth += 1,
            Token::RParen => depth -= 1,
            _ => {}
        }
        if depth < 0 {
            return Err(PatternError::UnbalancedParens);
        }
    }
    if depth != 0 {
        return Err(PatternError::UnbalancedParens);
    }
    Ok(())
}

fn ends_atom(token: Token) -> bool {
    matches!(
        token,
        Token::Symbol(_) | Token::Epsilon | Token::RParen | Token::Star
    )
}

fn starts_atom(token: Token) -> bool {
    matches!(token, Token::Symbol(_) | Token::Epsilon | Token::LParen)
}

/// Makes concatenation explicit: a [Token::Concat] is inserted wherever an
/// atom end directly precedes an atom start.
fn insert_concat(tokens: &[Token]) -> Vec<Token> {
    let mut out = Vec::with_capacity(tokens.len() * 2);
    for (i, &token) in tokens.iter().enumerate() {
        out.push(token);
        if let Some(&next) = tokens.get(i + 1) {
            if ends_atom(token) && starts_atom(next) {
                out.push(Token::Concat);
            }
        }
    }
    out
}

fn precedence(token: Token) -> u8 {
    match token {
        Token::Star => 3,
        Token::Concat => 2,
        Token::Union => 1,
        _ => 0,
    }
}

/// Shunting-yard conversion to postfix. `*` is postfix unary and follows
/// its operand directly, so it goes straight to the output; `|`/`+` and
/// concatenation are left-associative.
fn to_postfix(tokens: &[Token]) -> Result<Vec<Token>, PatternError> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut stack: Vec<Token> = Vec::new();
    for &token in tokens {
        match token {
            Token::Symbol(_) | Token::Epsilon | Token::Star => out.push(token),
            Token::LParen => stack.push(token),
            Token::RParen => loop {
                match stack.pop() {
                    Some(Token::LParen) => break,
                    Some(operator) => out.push(operator),
                    None => return Err(PatternError::UnbalancedParens),
                }
            },
            operator => {
                while let Some(&top) = stack.last() {
                    if matches!(top, Token::LParen) || precedence(top) < precedence(operator) {
                        break;
                    }
                    out.push(top);
                    stack.pop();
                }
                stack.push(operator);
            }
        }
    }
    while let Some(operator) = stack.pop() {
        if matches!(operator, Token::LParen) {
            return Err(PatternError::UnbalancedParens);
        }
        out.push(operator);
    }
    Ok(out)
}
