use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lazy_static::lazy_static;
use mindfa::alphabet::Alphabet;
use mindfa::regex::Pattern;
use regex::Regex as LibRegex;

lazy_static! {
    static ref ALPHABET: Alphabet = Alphabet::parse_line("a b c d").unwrap();
    static ref PATTERNS: [&'static str; 4] = [
        "(a|b)*abb",
        "(a|b|c|d)*(ab|cd)(a|b|c|d)*",
        "a(b|c)*d|(ad)*",
        "((a|b)(c|d))*((a|c)(b|d))*",
    ];
}

pub fn pipeline_compile(c: &mut Criterion) {
    c.bench_function("mindfa compile", |b| {
        b.iter(|| mindfa::compile(black_box(PATTERNS[1]), &ALPHABET).unwrap())
    });

    c.bench_function("library regex compile", |b| {
        b.iter(|| LibRegex::new(black_box(PATTERNS[1])).unwrap())
    });
}

pub fn minimization(c: &mut Criterion) {
    let unminimized = Pattern::parse(PATTERNS[3], &ALPHABET)
        .unwrap()
        .to_nfa()
        .unwrap()
        .to_dfa()
        .unwrap()
        .complete();
    c.bench_function("hopcroft minimize", |b| {
        b.iter(|| {
            let mut dfa = unminimized.clone();
            dfa.minimize();
            dfa
        })
    });
}

pub fn word_check(c: &mut Criterion) {
    let dfa = mindfa::compile(PATTERNS[1], &ALPHABET).unwrap();
    let word = "abcd".repeat(64);
    c.bench_function("dfa run", |b| b.iter(|| dfa.run(black_box(&word))));
}

criterion_group!(benches, pipeline_compile, minimization, word_check);
criterion_main!(benches);
