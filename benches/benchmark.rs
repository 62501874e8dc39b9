use criterion::{black_box, criterion_group, criterion_main, Criterion};
use frontalier::grammar::sets::{calculate_first, calculate_follow};
use frontalier::grammar::table::build_table;
use frontalier::grammar::{examples::TAC_SOURCE_GRAMMAR, parse::parse_grammar_file};
use frontalier::regex::parse::parse as parse_regex;
use frontalier::regex::Regex;
use lazy_static::lazy_static;
use proptest::prelude::*;
use proptest::strategy::ValueTree;
use proptest::test_runner::TestRunner;
use regex::Regex as LibRegex;
use std::collections::BTreeSet;

lazy_static! {
    static ref REGEXES: [&'static str; 3] = ["(a|b)*abb", "[a-zA-Z_][a-zA-Z0-9_]*", "(0|1(01*0)*1)*"];
}

pub fn regex_compile(c: &mut Criterion) {
    c.bench_function("frontalier regex compile", |b| {
        b.iter(|| {
            let input = black_box(REGEXES[2]);
            let tree = parse_regex(input).unwrap();
            let dfa = Regex::new(tree).to_nfa().to_dfa();
            dfa
        })
    });

    c.bench_function("library regex compile", |b| {
        b.iter(|| {
            let input = black_box(REGEXES[2]);
            LibRegex::new(input).unwrap()
        })
    });
}

pub fn regex_minimize(c: &mut Criterion) {
    let tree = parse_regex(REGEXES[0]).unwrap();
    let dfa = Regex::new(tree).to_nfa().to_dfa();
    c.bench_function("dfa minimize", |b| {
        b.iter(|| {
            let mut copy = dfa.clone();
            copy.minimize();
            copy
        })
    });
}

pub fn dfa_equivalence(c: &mut Criterion) {
    let tree1 = parse_regex(REGEXES[0]).unwrap();
    let mut dfa1 = Regex::new(tree1).to_nfa().to_dfa();
    dfa1.minimize();
    let tree2 = parse_regex(REGEXES[0]).unwrap();
    let dfa2 = Regex::new(tree2).to_nfa().to_dfa();

    c.bench_function("dfa equivalence check", |b| {
        b.iter(|| dfa1.equivalent_to(black_box(&dfa2)))
    });
}

pub fn regex_check(c: &mut Criterion) {
    let mut runner = TestRunner::default();
    let string_gen = "[a-z]{1,20}".new_tree(&mut runner).unwrap();

    let tree = parse_regex(REGEXES[1]).unwrap();
    let mut dfa = Regex::new(tree).to_nfa().to_dfa();
    dfa.minimize();
    c.bench_function("frontalier regex check", |b| {
        b.iter(|| dfa.accepts(black_box(string_gen.current().as_bytes())))
    });

    let input_regex = format!("^({})$", REGEXES[1]);
    let lib_regex = LibRegex::new(&input_regex).unwrap();
    c.bench_function("library regex check", |b| {
        b.iter(|| lib_regex.is_match(black_box(&string_gen.current())))
    });
}

pub fn ll1_table_build(c: &mut Criterion) {
    let token_types: BTreeSet<String> = [
        "ID", "EQUAL", "SEMICOLON", "IF", "LPAREN", "RPAREN", "ELSE", "WHILE", "LBRACE", "RBRACE", "PLUS", "MINUS",
        "MULTIPLY", "DIVIDE", "MOD", "EQUAL_EQUAL", "NOT_EQUAL", "GREATER", "LESS", "GREATER_EQUAL", "LESS_EQUAL",
        "NUMBER", "FLOAT_NUMBER",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    c.bench_function("grammar load + first/follow + ll1 table", |b| {
        b.iter(|| {
            let (grammar, _) = parse_grammar_file(black_box(TAC_SOURCE_GRAMMAR), &token_types);
            let first = calculate_first(&grammar);
            let follow = calculate_follow(&grammar, &first);
            build_table(&grammar, &first, &follow)
        })
    });
}

criterion_group!(benches, regex_compile, regex_minimize, dfa_equivalence, regex_check, ll1_table_build);
criterion_main!(benches);
