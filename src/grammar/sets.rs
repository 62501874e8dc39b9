//! FIRST and FOLLOW fixed-point computation.

use crate::grammar::{Grammar, EPSILON, END_OF_INPUT};
use std::collections::{BTreeMap, BTreeSet};

pub type SymbolSet = BTreeSet<String>;
pub type SetMap = BTreeMap<String, SymbolSet>;

/// FIRST of a symbol sequence, given the already-known FIRST sets of every
/// symbol. An empty sequence has FIRST = {ε}.
pub(crate) fn first_of_sequence_pub(sequence: &[String], grammar: &Grammar, first: &SetMap) -> SymbolSet {
    first_of_sequence(sequence, grammar, first)
}

fn first_of_sequence(sequence: &[String], grammar: &Grammar, first: &SetMap) -> SymbolSet {
    let mut result = SymbolSet::new();
    if sequence.is_empty() {
        result.insert(EPSILON.to_string());
        return result;
    }

    for symbol in sequence {
        if grammar.terminals.contains(symbol) {
            result.insert(symbol.clone());
            return result;
        }
        let Some(first_x) = first.get(symbol) else {
            return result;
        };
        result.extend(first_x.iter().filter(|&t| t != EPSILON).cloned());
        if !first_x.contains(EPSILON) {
            return result;
        }
    }
    result.insert(EPSILON.to_string());
    result
}

/// Computes FIRST for every terminal and nonterminal by fixpoint iteration.
pub fn calculate_first(grammar: &Grammar) -> SetMap {
    let mut first: SetMap = SetMap::new();
    for t in &grammar.terminals {
        first.entry(t.clone()).or_default().insert(t.clone());
    }
    for a in &grammar.nonterminals {
        first.entry(a.clone()).or_default();
    }

    let mut changed = true;
    while changed {
        changed = false;
        for production in &grammar.productions {
            for alt in &production.alternatives {
                let first_alpha = first_of_sequence(alt, grammar, &first);
                let entry = first.entry(production.left.clone()).or_default();
                let before = entry.len();
                entry.extend(first_alpha);
                if entry.len() != before {
                    changed = true;
                }
            }
        }
    }
    first
}

/// Computes FOLLOW for every nonterminal by fixpoint iteration, given FIRST.
pub fn calculate_follow(grammar: &Grammar, first: &SetMap) -> SetMap {
    let mut follow: SetMap = SetMap::new();
    if !grammar.start.is_empty() {
        follow.entry(grammar.start.clone()).or_default().insert(END_OF_INPUT.to_string());
    }

    let mut changed = true;
    while changed {
        changed = false;
        for production in &grammar.productions {
            let a = &production.left;
            for alt in &production.alternatives {
                for (i, b) in alt.iter().enumerate() {
                    if !grammar.nonterminals.contains(b) {
                        continue;
                    }
                    let beta = &alt[i + 1..];
                    let first_beta = first_of_sequence(beta, grammar, first);

                    let entry = follow.entry(b.clone()).or_default();
                    let before = entry.len();
                    entry.extend(first_beta.iter().filter(|&t| t != EPSILON).cloned());

                    if first_beta.contains(EPSILON) {
                        let follow_a = follow.get(a).cloned().unwrap_or_default();
                        follow.entry(b.clone()).or_default().extend(follow_a);
                    }

                    if follow.get(b).map_or(0, |s| s.len()) != before {
                        changed = true;
                    }
                }
            }
        }
    }
    follow
}
