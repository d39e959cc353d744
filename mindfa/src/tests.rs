use crate::alphabet::{Alphabet, AlphabetError};
use crate::bitset::Bitset;
use crate::check::{self, Verdict};
use crate::dfa::{Dfa, DfaFileError};
use crate::regex::{Pattern, PatternError, Token};
use crate::table::{self, UserDfaError};
use crate::*;
use ::regex::Regex as LibRegex;
use proptest::prelude::*;
use rand::prelude::*;

fn alphabet(line: &str) -> Alphabet {
    Alphabet::parse_line(line).unwrap()
}

#[test]
fn kleene_star_over_one_symbol() {
    let dfa = compile("a*", &alphabet("a")).unwrap();
    assert_eq!(
        dfa.to_table(),
        "ALPHABET 1 a\nSTATES 1\nSTART 0\nACCEPT 1 0\nTRANS\n0\nEND\n"
    );
}

#[test]
fn epsilon_accepts_only_the_empty_word() {
    let dfa = compile("<eps>", &alphabet("a")).unwrap();
    assert_eq!(
        dfa.to_table(),
        "ALPHABET 1 a\nSTATES 2\nSTART 0\nACCEPT 1 0\nTRANS\n1\n1\nEND\n"
    );
    assert!(dfa.accepts(""));
    assert!(!dfa.accepts("a"));
}

#[test]
fn epsilon_spellings_are_interchangeable() {
    let sigma = alphabet("a");
    let ascii = Pattern::parse("<eps>", &sigma).unwrap();
    let utf8 = Pattern::parse("ε", &sigma).unwrap();
    assert_eq!(ascii, utf8);
    assert_eq!(ascii.postfix(), &[Token::Epsilon]);
}

#[test]
fn union_with_epsilon() {
    let dfa = compile("a|<eps>", &alphabet("a")).unwrap();
    // {ε, a}: start (accepting), after-a (accepting), dead
    assert_eq!(dfa.states().len(), 3);
    assert_eq!(dfa.states().iter().filter(|s| s.is_accepting()).count(), 2);
    assert!(dfa.accepts(""));
    assert!(dfa.accepts("a"));
    assert!(!dfa.accepts("aa"));
}

#[test]
fn union_of_two_symbols() {
    let dfa = compile("a|b", &alphabet("a b")).unwrap();
    // after-a and after-b are indistinguishable, so: start, accept, dead
    assert_eq!(dfa.states().len(), 3);
    assert_eq!(dfa.states().iter().filter(|s| s.is_accepting()).count(), 1);
    assert!(dfa.accepts("a"));
    assert!(dfa.accepts("b"));
    assert!(!dfa.accepts(""));
    assert!(!dfa.accepts("ab"));
}

#[test]
fn plus_is_a_union_synonym() {
    let sigma = alphabet("a b");
    let plus = compile("a+b", &sigma).unwrap();
    let pipe = compile("a|b", &sigma).unwrap();
    assert_eq!(plus.to_table(), pipe.to_table());
}

#[test]
fn textbook_ends_with_abb() {
    let dfa = compile("(a|b)*abb", &alphabet("a b")).unwrap();
    assert_eq!(dfa.states().len(), 4);
    assert_eq!(dfa.states().iter().filter(|s| s.is_accepting()).count(), 1);
    for word in ["abb", "aabb", "babb", "abbabb"] {
        assert!(dfa.accepts(word), "should accept {word:?}");
    }
    for word in ["", "ab", "abba", "bba"] {
        assert!(!dfa.accepts(word), "should reject {word:?}");
    }
}

#[test]
fn prefix_then_loop() {
    let dfa = compile("a(b|c)*", &alphabet("a b c")).unwrap();
    // pre-a, post-a (accepting, loops on b and c), dead
    assert_eq!(dfa.states().len(), 3);
    assert_eq!(dfa.states().iter().filter(|s| s.is_accepting()).count(), 1);
    for word in ["a", "ab", "ac", "abcbc"] {
        assert!(dfa.accepts(word), "should accept {word:?}");
    }
    for word in ["", "b", "aa", "aba"] {
        assert!(!dfa.accepts(word), "should reject {word:?}");
    }
}

#[test]
fn universal_language_collapses_to_one_state() {
    let dfa = compile("(a|b)*", &alphabet("a b")).unwrap();
    assert_eq!(
        dfa.to_table(),
        "ALPHABET 2 ab\nSTATES 1\nSTART 0\nACCEPT 1 0\nTRANS\n0 0\nEND\n"
    );
}

#[test]
fn empty_language_collapses_to_one_state() {
    // no accepting states at all: everything merges into one dead class
    let input = "ALPHABET 1 a\nSTATES 2\nSTART 0\nACCEPT 0\nTRANS\n1\n0\nEND\n";
    let mut dfa: Dfa = parser::dfa_file(input).unwrap().try_into().unwrap();
    dfa.minimize();
    assert_eq!(
        dfa.to_table(),
        "ALPHABET 1 a\nSTATES 1\nSTART 0\nACCEPT 0\nTRANS\n0\nEND\n"
    );
}

#[test]
fn postfix_of_the_textbook_pattern() {
    let pattern = Pattern::parse("(a|b)*abb", &alphabet("a b")).unwrap();
    use Token::*;
    assert_eq!(
        pattern.postfix(),
        &[
            Symbol(0),
            Symbol(1),
            Union,
            Star,
            Symbol(0),
            Concat,
            Symbol(1),
            Concat,
            Symbol(1),
            Concat,
        ]
    );
}

#[test]
fn whitespace_in_patterns_is_ignored() {
    let sigma = alphabet("a b");
    let spaced = Pattern::parse(" ( a | b ) * a\tb b ", &sigma).unwrap();
    let dense = Pattern::parse("(a|b)*abb", &sigma).unwrap();
    assert_eq!(spaced, dense);
}

#[test]
fn union_binds_weaker_than_concatenation() {
    let sigma = alphabet("a b c");
    let dfa = compile("ab|c", &sigma).unwrap();
    assert!(dfa.accepts("ab"));
    assert!(dfa.accepts("c"));
    assert!(!dfa.accepts("ac"));
}

#[test]
fn pattern_errors() {
    let sigma = alphabet("a b");
    assert_eq!(
        Pattern::parse("(a", &sigma),
        Err(PatternError::UnbalancedParens)
    );
    assert_eq!(
        Pattern::parse("a)b", &sigma),
        Err(PatternError::UnbalancedParens)
    );
    assert_eq!(
        Pattern::parse("a.b", &sigma),
        Err(PatternError::ExplicitDot)
    );
    assert_eq!(
        Pattern::parse("axb", &sigma),
        Err(PatternError::UnknownSymbol('x'))
    );
    assert_eq!(
        Pattern::parse("aüb", &sigma),
        Err(PatternError::NonAsciiByte(0xC3))
    );
    assert_eq!(Pattern::parse("  \t ", &sigma), Err(PatternError::Empty));
}

#[test]
fn alphabet_separators_and_order() {
    let sigma = alphabet("b, a; 1 0");
    assert_eq!(sigma.symbols(), b"ba10");
    assert_eq!(sigma.index_of(b'a'), Some(1));
    assert_eq!(sigma.index_of(b'x'), None);
    assert_eq!(sigma.to_string(), "ba10");
    assert_eq!(Alphabet::parse_contiguous("ba10").unwrap(), sigma);
}

#[test]
fn alphabet_errors() {
    assert_eq!(Alphabet::parse_line(" , ; "), Err(AlphabetError::Empty));
    assert_eq!(
        Alphabet::parse_line("a b a"),
        Err(AlphabetError::DuplicateSymbol('a'))
    );
    assert_eq!(
        Alphabet::parse_line("a ( b"),
        Err(AlphabetError::ReservedSymbol('('))
    );
    assert_eq!(
        Alphabet::parse_line("a \x01 b"),
        Err(AlphabetError::NonPrintable(0x01))
    );
    assert_eq!(
        Alphabet::parse_line("a é"),
        Err(AlphabetError::NonAscii(0xC3))
    );
}

#[test]
fn state_limits_are_enforced() {
    let sigma = alphabet("a b");
    let tight_nfa = Limits {
        max_nfa_states: 3,
        ..Limits::default()
    };
    assert_eq!(
        compile_with_limits("a*", &sigma, tight_nfa),
        Err(CompileError::Nfa(nfa::NfaBuildError::TooManyStates(3)))
    );
    let tight_dfa = Limits {
        max_dfa_states: 1,
        ..Limits::default()
    };
    assert_eq!(
        compile_with_limits("ab", &sigma, tight_dfa),
        Err(CompileError::Subset(nfa::SubsetError::TooManyStates(1)))
    );
}

#[test]
fn run_rejects_foreign_bytes_as_none() {
    let dfa = compile("a*", &alphabet("a")).unwrap();
    assert_eq!(dfa.run("aa"), Some(true));
    assert_eq!(dfa.run("az"), None);
    assert!(!dfa.accepts("az"));
}

#[test]
fn table_file_rejects_malformed_input() {
    let parse = |input: &str| -> Result<Dfa, DfaFileError> {
        parser::dfa_file(input).unwrap().try_into()
    };
    assert!(parser::dfa_file("ALPHABET 1 a\nSTATES 1\n").is_err());
    assert!(parser::dfa_file("SOMETHING 1 a\n").is_err());
    assert_eq!(
        parse("ALPHABET 2 a\nSTATES 1\nSTART 0\nACCEPT 0\nTRANS\n0\nEND\n"),
        Err(DfaFileError::AlphabetLengthMismatch {
            declared: 2,
            actual: 1
        })
    );
    assert_eq!(
        parse("ALPHABET 1 a\nSTATES 1\nSTART 1\nACCEPT 0\nTRANS\n0\nEND\n"),
        Err(DfaFileError::StartOutOfRange(1))
    );
    assert_eq!(
        parse("ALPHABET 1 a\nSTATES 1\nSTART 0\nACCEPT 1 1\nTRANS\n0\nEND\n"),
        Err(DfaFileError::AcceptOutOfRange(1))
    );
    assert_eq!(
        parse("ALPHABET 1 a\nSTATES 1\nSTART 0\nACCEPT 2 0\nTRANS\n0\nEND\n"),
        Err(DfaFileError::AcceptLengthMismatch {
            declared: 2,
            actual: 1
        })
    );
    assert_eq!(
        parse("ALPHABET 1 a\nSTATES 2\nSTART 0\nACCEPT 0\nTRANS\n1\nEND\n"),
        Err(DfaFileError::CellCountMismatch {
            expected: 2,
            actual: 1
        })
    );
    assert_eq!(
        parse("ALPHABET 1 a\nSTATES 1\nSTART 0\nACCEPT 0\nTRANS\n4\nEND\n"),
        Err(DfaFileError::TargetOutOfRange(4))
    );
}

#[test]
fn user_table_completion_and_prose() {
    let sigma = Alphabet::parse_contiguous("ab").unwrap();
    let input = "\
This automaton accepts words with exactly one a.
Start: q0
Accept: {q1}
# the interesting transitions
(q0, a) -> q1
(q0, b) -> q0
(q1, b) -> q1
";
    let dfa = table::parse_user_dfa(&sigma, input).unwrap();
    assert_eq!(dfa.states().len(), 3); // q0, q1 and the dead state
    assert!(dfa.accepts("bab"));
    assert!(!dfa.accepts("aba"));
    assert!(!dfa.accepts("b"));
}

#[test]
fn user_table_without_missing_transitions_gets_no_dead_state() {
    let sigma = Alphabet::parse_contiguous("ab").unwrap();
    let input = "\
Start: q0
Accept: {q1}
(q0, a) -> q1
(q0, b) -> q0
(q1, a) -> q1
(q1, b) -> q1
";
    let dfa = table::parse_user_dfa(&sigma, input).unwrap();
    assert_eq!(dfa.states().len(), 2);
}

#[test]
fn user_table_errors() {
    let sigma = Alphabet::parse_contiguous("ab").unwrap();
    assert_eq!(
        table::parse_user_dfa(&sigma, "Accept: {q0}\n(q0, a) -> q0\n"),
        Err(UserDfaError::MissingStart)
    );
    assert_eq!(
        table::parse_user_dfa(&sigma, "Start: q0\n(q0, a) -> q0\n"),
        Err(UserDfaError::MissingAccept)
    );
    assert_eq!(
        table::parse_user_dfa(&sigma, "Start: q0\nAccept: {}\n(q0, c) -> q0\n"),
        Err(UserDfaError::ForeignSymbol {
            line: 3,
            symbol: 'c'
        })
    );
    assert_eq!(
        table::parse_user_dfa(
            &sigma,
            "Start: q0\nAccept: {}\n(q0, a) -> q0\n(q0, a) -> q1\n"
        ),
        Err(UserDfaError::Nondeterministic {
            line: 4,
            from: 0,
            symbol: 'a'
        })
    );
    assert_eq!(
        table::parse_user_dfa(&sigma, "Start: q9999\nAccept: {}\n"),
        Err(UserDfaError::StateTooLarge {
            line: 1,
            state: 9999,
            limit: DEFAULT_STATE_LIMIT
        })
    );
    assert_eq!(
        table::parse_user_dfa(&sigma, "Start: banana\nAccept: {}\n"),
        Err(UserDfaError::Malformed(1))
    );
    // duplicate transition with the same target is allowed
    assert!(table::parse_user_dfa(
        &sigma,
        "Start: q0\nAccept: {q0}\n(q0, a) -> q0\n(q0, a) -> q0\n"
    )
    .is_ok());
}

#[test]
fn corpus_parsing() {
    let cases = check::parse_corpus("# header\n\n1 <eps>\n0 ab\n  1 b\n").unwrap();
    assert_eq!(cases.len(), 3);
    assert_eq!(cases[0].line, 3);
    assert!(cases[0].label);
    assert_eq!(cases[0].word, "");
    assert_eq!(cases[1].word, "ab");
    assert_eq!(
        check::parse_corpus("2 ab\n"),
        Err(check::CorpusError::BadLabel(1))
    );
    assert_eq!(
        check::parse_corpus("1\n"),
        Err(check::CorpusError::MissingWord(1))
    );
}

#[test]
fn comparator_passes_against_a_hand_written_equivalent() {
    let sigma = alphabet("a b");
    let compiled = compile("(a|b)*abb", &sigma).unwrap();
    let handmade = table::parse_user_dfa(
        &Alphabet::parse_contiguous("ab").unwrap(),
        "\
Start: q0
Accept: {q3}
(q0, a) -> q1
(q0, b) -> q0
(q1, a) -> q1
(q1, b) -> q2
(q2, a) -> q1
(q2, b) -> q3
(q3, a) -> q1
(q3, b) -> q0
",
    )
    .unwrap();

    let cases = check::parse_corpus("1 <eps>\n1 abb\n0 aab\n1 aabb\n").unwrap();
    let report = check::compare(&compiled, &handmade, &cases).unwrap();
    assert_eq!(report.verdict, Verdict::Agree { total: 4 });
    // the first label disagrees with the reference, which only warns
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].line, 1);
    assert!(compiled.equivalent_to(&handmade));
}

#[test]
fn comparator_reports_the_first_divergence() {
    let sigma = alphabet("a b");
    let narrow = compile("a*", &sigma).unwrap();
    let wide = compile("(a|b)*", &sigma).unwrap();
    let cases = check::parse_corpus("1 a\n1 b\n0 ba\n").unwrap();
    let report = check::compare(&narrow, &wide, &cases).unwrap();
    assert_eq!(
        report.verdict,
        Verdict::Diverge {
            line: 2,
            word: "b".to_string(),
            reference: false,
            user: true,
            label: true,
        }
    );
}

#[test]
fn comparator_rejects_foreign_words_and_alphabets() {
    let narrow = compile("a*", &alphabet("a")).unwrap();
    let cases = check::parse_corpus("1 ab\n").unwrap();
    assert_eq!(
        check::compare(&narrow, &narrow, &cases),
        Err(check::CorpusError::ForeignSymbol(1))
    );

    let other = compile("a*", &alphabet("b a")).unwrap();
    assert_eq!(
        check::compare(&narrow, &other, &[]),
        Err(check::CorpusError::AlphabetMismatch)
    );
}

#[test]
fn bitset_basics() {
    let mut set = Bitset::new(130);
    assert!(set.is_empty());
    assert!(set.insert(0));
    assert!(set.insert(129));
    assert!(!set.insert(129));
    assert!(set.contains(129));
    assert!(!set.contains(64));
    assert_eq!(set.ones().collect::<Vec<_>>(), vec![0, 129]);

    let mut other = Bitset::new(130);
    other.insert(129);
    other.insert(0);
    assert_eq!(set, other);
}

fn pattern_strategy() -> impl Strategy<Value = String> {
    // kept small: long union tails after a star make the subset
    // construction grow exponentially towards the state limit
    "[a-d]".prop_recursive(4, 24, 6, |inner| {
        prop_oneof![
            4 => prop::collection::vec(inner.clone(), 1..5).prop_map(|parts| parts.join("")),
            3 => prop::collection::vec(inner.clone(), 2..4)
                .prop_map(|parts| format!("({})", parts.join("|"))),
            2 => inner.prop_map(|part| format!("({part})*")),
        ]
    })
}

prop_compose! {
    /// Permutation of the four test symbols, shuffled independently of the
    /// proptest seed.
    fn shuffled_alphabet()(_nonce in any::<u8>()) -> String {
        let mut symbols: Vec<char> = ('a'..='d').collect();
        symbols.shuffle(&mut thread_rng());
        symbols.into_iter().collect()
    }
}

proptest! {
    /// The compiled DFA agrees with the `regex` crate on every word, since
    /// the generated patterns avoid the `+`-means-union divergence.
    #[test]
    fn compiled_dfa_matches_library_regex(
        pattern in pattern_strategy(),
        words in prop::collection::vec("[a-d]{0,10}", 50)
    ) {
        let sigma = alphabet("a b c d");
        let dfa = compile(&pattern, &sigma).unwrap();
        let lib = LibRegex::new(&format!("^({pattern})$")).unwrap();
        for word in &words {
            prop_assert_eq!(dfa.accepts(word), lib.is_match(word), "on {:?}", word);
        }
    }

    /// Compilation already minimizes, so minimizing again must be the
    /// identity up to nothing at all: same state count, same language.
    #[test]
    fn minimization_is_a_fixpoint(pattern in pattern_strategy()) {
        let dfa = compile(&pattern, &alphabet("a b c d")).unwrap();
        let mut again = dfa.clone();
        again.minimize();
        prop_assert_eq!(again.states().len(), dfa.states().len());
        prop_assert!(again.equivalent_to(&dfa));
    }

    /// The emitted table parses back to the very same automaton, not just
    /// an equivalent one.
    #[test]
    fn table_reparses_to_the_same_dfa(pattern in pattern_strategy()) {
        let dfa = compile(&pattern, &alphabet("a b c d")).unwrap();
        let reparsed: Dfa = parser::dfa_file(&dfa.to_table()).unwrap().try_into().unwrap();
        prop_assert_eq!(dfa, reparsed);
    }

    /// Identical input produces byte-identical output.
    #[test]
    fn compilation_is_deterministic(pattern in pattern_strategy()) {
        let sigma = alphabet("a b c d");
        let first = compile(&pattern, &sigma).unwrap();
        let second = compile(&pattern, &sigma).unwrap();
        prop_assert_eq!(first.to_table(), second.to_table());
    }

    /// Every emitted DFA is total: one in-range target per state and symbol.
    #[test]
    fn emitted_dfa_is_total(pattern in pattern_strategy()) {
        let sigma = alphabet("a b c d");
        let dfa = compile(&pattern, &sigma).unwrap();
        prop_assert!(dfa.start() < dfa.states().len());
        for state in dfa.states() {
            prop_assert_eq!(state.transitions().len(), sigma.len());
            for &target in state.transitions() {
                prop_assert!(target < dfa.states().len());
            }
        }
    }

    /// The declared symbol order survives into the ALPHABET header and the
    /// column order of the table.
    #[test]
    fn alphabet_order_is_preserved(symbols in shuffled_alphabet()) {
        let sigma = Alphabet::parse_contiguous(&symbols).unwrap();
        let dfa = compile("(a|b|c|d)*ab", &sigma).unwrap();
        prop_assert_eq!(sigma.to_string(), symbols.clone());
        let expected_prefix = format!("ALPHABET 4 {}\n", symbols);
        prop_assert!(dfa.to_table().starts_with(&expected_prefix));
    }

    /// A DFA compared against itself always passes, with no warnings when
    /// the labels come from the automaton itself.
    #[test]
    fn comparator_agrees_with_itself(
        pattern in pattern_strategy(),
        words in prop::collection::vec("[a-d]{0,8}", 20)
    ) {
        let dfa = compile(&pattern, &alphabet("a b c d")).unwrap();
        let corpus = words
            .iter()
            .map(|word| {
                let label = u8::from(dfa.accepts(word));
                let token = if word.is_empty() { "<eps>" } else { word };
                format!("{label} {token}")
            })
            .collect::<Vec<_>>()
            .join("\n");
        let cases = check::parse_corpus(&corpus).unwrap();
        let report = check::compare(&dfa, &dfa, &cases).unwrap();
        prop_assert_eq!(report.verdict, Verdict::Agree { total: words.len() });
        prop_assert!(report.warnings.is_empty());
    }
}
