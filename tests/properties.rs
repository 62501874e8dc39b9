use frontalier::dfa::Dfa;
use frontalier::grammar::sets::{calculate_first, calculate_follow};
use frontalier::grammar::table::build_table;
use frontalier::grammar::{Grammar, Production};
use frontalier::nfa::eval::NfaEvaluator;
use frontalier::regex::parse::parse as parse_regex;
use frontalier::regex::Regex;
use lazy_static::lazy_static;
use proptest::prelude::*;
use rand::prelude::*;
use regex::Regex as LibRegex;

lazy_static! {
    /// `E -> T E' ; E' -> + T E' | ε ; T -> F T' ; T' -> * F T' | ε ; F -> ( E ) | id`
    static ref CLASSIC_GRAMMAR: Grammar = Grammar {
        start: "E".into(),
        terminals: ["+".to_string(), "*".to_string(), "(".to_string(), ")".to_string(), "id".to_string()].into(),
        nonterminals: ["E".to_string(), "E'".to_string(), "T".to_string(), "T'".to_string(), "F".to_string()].into(),
        productions: vec![
            Production { left: "E".into(), alternatives: vec![vec!["T".into(), "E'".into()]] },
            Production { left: "E'".into(), alternatives: vec![vec!["+".into(), "T".into(), "E'".into()], vec![]] },
            Production { left: "T".into(), alternatives: vec![vec!["F".into(), "T'".into()]] },
            Production { left: "T'".into(), alternatives: vec![vec!["*".into(), "F".into(), "T'".into()], vec![]] },
            Production { left: "F".into(), alternatives: vec![vec!["(".into(), "E".into(), ")".into()], vec!["id".into()]] },
        ],
    };

    /// `Stmt -> IF LPAREN ID RPAREN Stmt ElsePart | ASSIGN ; ElsePart -> ELSE Stmt | ε`
    /// (the `if (id) S else S` / `if (id) S` grammar left-factored on ElsePart).
    static ref DANGLING_ELSE_GRAMMAR: Grammar = Grammar {
        start: "Stmt".into(),
        terminals: ["IF".to_string(), "LPAREN".to_string(), "ID".to_string(), "RPAREN".to_string(), "ELSE".to_string(), "ASSIGN".to_string()].into(),
        nonterminals: ["Stmt".to_string(), "ElsePart".to_string()].into(),
        productions: vec![
            Production {
                left: "Stmt".into(),
                alternatives: vec![
                    vec!["IF".into(), "LPAREN".into(), "ID".into(), "RPAREN".into(), "Stmt".into(), "ElsePart".into()],
                    vec!["ASSIGN".into()],
                ],
            },
            Production {
                left: "ElsePart".into(),
                alternatives: vec![vec!["ELSE".into(), "Stmt".into()], vec![]],
            },
        ],
    };
}

fn arb_pattern() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![Just("a".to_string()), Just("b".to_string()), Just("c".to_string())];
    leaf.prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(l, r)| format!("{l}{r}")),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| format!("({l}|{r})")),
            inner.clone().prop_map(|s| format!("({s})*")),
            inner.clone().prop_map(|s| format!("({s})+")),
        ]
    })
}

fn arb_string() -> impl Strategy<Value = String> {
    proptest::collection::vec(prop_oneof![Just(b'a'), Just(b'b'), Just(b'c')], 0..8)
        .prop_map(|bytes| String::from_utf8(bytes).unwrap())
}

proptest! {
    /// Every Thompson-built NFA has exactly one accepting state, with no
    /// transitions leaving it beyond what the combinators added.
    #[test]
    fn thompson_shape_has_one_accept_state(pattern in arb_pattern()) {
        let tree = parse_regex(&pattern).unwrap();
        let nfa = Regex::new(tree).to_nfa();
        let accepting: Vec<_> = nfa.states.iter().filter(|s| s.accepting).collect();
        prop_assert_eq!(accepting.len(), 1);
    }

    /// Subset construction preserves the language the NFA recognizes.
    #[test]
    fn nfa_and_dfa_agree(pattern in arb_pattern(), input in arb_string()) {
        let tree = parse_regex(&pattern).unwrap();
        let nfa = Regex::new(tree).to_nfa();
        let dfa = nfa.to_dfa();

        let mut ev = NfaEvaluator::from(&nfa);
        ev.step_multiple(input.as_bytes());
        let nfa_accepts = ev.is_accepting();
        let dfa_accepts = dfa.accepts(input.as_bytes());
        prop_assert_eq!(nfa_accepts, dfa_accepts);
    }

    /// Minimization never changes the accepted language.
    #[test]
    fn minimize_preserves_language(pattern in arb_pattern(), input in arb_string()) {
        let tree = parse_regex(&pattern).unwrap();
        let nfa = Regex::new(tree).to_nfa();
        let dfa: Dfa = nfa.to_dfa();
        let mut minimized = dfa.clone();
        minimized.minimize();
        prop_assert_eq!(dfa.accepts(input.as_bytes()), minimized.accepts(input.as_bytes()));
    }

    /// Minimizing an already-minimal DFA changes nothing (up to state count).
    #[test]
    fn minimize_is_idempotent(pattern in arb_pattern()) {
        let tree = parse_regex(&pattern).unwrap();
        let nfa = Regex::new(tree).to_nfa();
        let mut dfa = nfa.to_dfa();
        dfa.minimize();
        let once = dfa.states.len();
        dfa.minimize();
        prop_assert_eq!(once, dfa.states.len());
    }

    /// Our regex/NFA/DFA pipeline agrees with the `regex` crate on the
    /// syntax subset both engines share (literal concat, `|`, `*`, `+`).
    #[test]
    fn agrees_with_oracle_regex_crate(pattern in arb_pattern(), input in arb_string()) {
        let tree = parse_regex(&pattern).unwrap();
        let dfa = Regex::new(tree).to_nfa().to_dfa();
        let ours = dfa.accepts(input.as_bytes());

        let anchored = format!("^(?:{pattern})$");
        let oracle = LibRegex::new(&anchored).unwrap();
        let theirs = oracle.is_match(&input);

        prop_assert_eq!(ours, theirs);
    }
}

#[test]
fn first_follow_fixpoint_is_monotone_on_a_second_pass() {
    let first = calculate_first(&CLASSIC_GRAMMAR);
    let first_again = calculate_first(&CLASSIC_GRAMMAR);
    assert_eq!(first, first_again);

    let follow = calculate_follow(&CLASSIC_GRAMMAR, &first);
    let follow_again = calculate_follow(&CLASSIC_GRAMMAR, &first);
    assert_eq!(follow, follow_again);
}

#[test]
fn classic_grammar_first_and_follow_match_spec() {
    let first = calculate_first(&CLASSIC_GRAMMAR);
    assert_eq!(first["E"], ["(".to_string(), "id".to_string()].into());

    let follow = calculate_follow(&CLASSIC_GRAMMAR, &first);
    assert_eq!(follow["E"], [")".to_string(), "$".to_string()].into());
    assert_eq!(follow["E'"], [")".to_string(), "$".to_string()].into());
}

#[test]
fn classic_grammar_table_has_no_conflicts() {
    let first = calculate_first(&CLASSIC_GRAMMAR);
    let follow = calculate_follow(&CLASSIC_GRAMMAR, &first);
    let (_table, diagnostics) = build_table(&CLASSIC_GRAMMAR, &first, &follow);
    assert!(diagnostics.is_empty());
}

#[test]
fn dangling_else_attaches_to_nearest_if() {
    let first = calculate_first(&DANGLING_ELSE_GRAMMAR);
    let follow = calculate_follow(&DANGLING_ELSE_GRAMMAR, &first);
    let (table, diagnostics) = build_table(&DANGLING_ELSE_GRAMMAR, &first, &follow);
    assert!(diagnostics.is_empty(), "resolved by tie-break, not a reportable conflict: {diagnostics:?}");
    let entry = table.get("ElsePart", "ELSE").unwrap();
    assert_eq!(entry.alt_index, 0, "ELSE Stmt should win over epsilon");
}

/// A charset's accepted language doesn't depend on the order its members
/// are written in, so a random shuffle must leave the DFA's language intact.
#[test]
fn charset_order_does_not_affect_accepted_language() {
    let mut members: Vec<char> = vec!['a', 'b', 'c', 'd', 'e'];
    members.shuffle(&mut thread_rng());
    let pattern = format!("[{}]+", members.iter().collect::<String>());

    let tree = parse_regex(&pattern).unwrap();
    let dfa = Regex::new(tree).to_nfa().to_dfa();

    for ch in &members {
        assert!(dfa.accepts(ch.to_string().as_bytes()));
    }
    assert!(!dfa.accepts(b"z"));
}
