//! Parses a grammar file: `%start` directive, `L -> α` productions,
//! `| α` continuation lines, `ε` for the empty alternative, `#` comments.

use crate::error::Diagnostic;
use crate::grammar::{Alternative, Grammar, Production};
use std::collections::BTreeSet;

/// Parses a grammar file against a known terminal set (the lexer's token
/// types). Unlike regex/rule-file parsing, a malformed *line* is a warning
/// (the line is skipped), not a fatal error — only the diagnostics list
/// records it.
pub fn parse_grammar_file(source: &str, lexer_token_types: &BTreeSet<String>) -> (Grammar, Vec<Diagnostic>) {
    let mut diagnostics = Vec::new();
    let mut grammar = Grammar::default();
    let mut all_symbols: BTreeSet<String> = BTreeSet::new();
    let mut current_left: Option<String> = None;
    let mut start: Option<String> = None;

    for (idx, raw_line) in source.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = raw_line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if let Some(rest) = trimmed.strip_prefix("%start") {
            start = rest.split_whitespace().next().map(str::to_string);
            continue;
        }

        if let Some(rest) = trimmed.strip_prefix('|') {
            match &current_left {
                Some(left) => {
                    let alt = parse_alternative(rest, &mut all_symbols);
                    push_alternative(&mut grammar, left, alt);
                }
                None => diagnostics.push(Diagnostic::GrammarMalformed {
                    line_no,
                    line: raw_line.to_string(),
                }),
            }
            continue;
        }

        match trimmed.split_once("->") {
            Some((left, right)) => {
                let left = left.trim().to_string();
                grammar.nonterminals.insert(left.clone());
                all_symbols.insert(left.clone());
                current_left = Some(left.clone());
                let alt = parse_alternative(right, &mut all_symbols);
                push_alternative(&mut grammar, &left, alt);
            }
            None => diagnostics.push(Diagnostic::GrammarMalformed {
                line_no,
                line: raw_line.to_string(),
            }),
        }
    }

    for symbol in &all_symbols {
        if grammar.nonterminals.contains(symbol) {
            continue;
        }
        if !lexer_token_types.contains(symbol) {
            diagnostics.push(Diagnostic::UnknownTerminal { symbol: symbol.clone() });
        }
        grammar.terminals.insert(symbol.clone());
    }

    grammar.start = start.unwrap_or_else(|| {
        grammar
            .productions
            .first()
            .map(|p| p.left.clone())
            .unwrap_or_default()
    });

    for d in &diagnostics {
        d.log();
    }

    (grammar, diagnostics)
}

fn parse_alternative(text: &str, all_symbols: &mut BTreeSet<String>) -> Alternative {
    let symbols: Vec<&str> = text.split_whitespace().collect();
    if symbols == ["ε"] || symbols.is_empty() {
        return Vec::new();
    }
    symbols
        .into_iter()
        .map(|s| {
            all_symbols.insert(s.to_string());
            s.to_string()
        })
        .collect()
}

fn push_alternative(grammar: &mut Grammar, left: &str, alt: Alternative) {
    match grammar.productions.iter_mut().find(|p| p.left == left) {
        Some(p) => p.alternatives.push(alt),
        None => grammar.productions.push(Production {
            left: left.to_string(),
            alternatives: vec![alt],
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_productions_and_continuations() {
        let source = "\
%start E
E -> T E'
E' -> PLUS T E'
   | ε
T -> ID
";
        let (grammar, diagnostics) = parse_grammar_file(source, &terms(&["PLUS", "ID"]));
        assert!(diagnostics.is_empty());
        assert_eq!(grammar.start, "E");
        assert_eq!(grammar.nonterminals, ["E".to_string(), "E'".to_string(), "T".to_string()].into());
        let e_prime = grammar.productions.iter().find(|p| p.left == "E'").unwrap();
        assert_eq!(e_prime.alternatives.len(), 2);
        assert!(e_prime.alternatives[1].is_empty());
    }

    #[test]
    fn defaults_start_to_first_production() {
        let source = "S -> A\nA -> a\n";
        let (grammar, _) = parse_grammar_file(source, &terms(&["a"]));
        assert_eq!(grammar.start, "S");
    }

    #[test]
    fn unknown_terminal_is_a_warning_not_an_error() {
        let source = "S -> UNKNOWN\n";
        let (grammar, diagnostics) = parse_grammar_file(source, &terms(&[]));
        assert!(grammar.terminals.contains("UNKNOWN"));
        assert!(matches!(diagnostics[0], Diagnostic::UnknownTerminal { .. }));
    }

    #[test]
    fn comment_after_leading_whitespace_is_skipped() {
        let source = "   # comment\nS -> a\n";
        let (grammar, diagnostics) = parse_grammar_file(source, &terms(&["a"]));
        assert!(diagnostics.is_empty());
        assert_eq!(grammar.productions.len(), 1);
    }

    #[test]
    fn malformed_line_is_warned_and_skipped() {
        let source = "this is not a production\nS -> a\n";
        let (grammar, diagnostics) = parse_grammar_file(source, &terms(&["a"]));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(grammar.productions.len(), 1);
    }
}
