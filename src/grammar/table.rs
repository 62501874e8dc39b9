//! LL(1) predictive parse table construction, with a dangling-else-favoring
//! conflict policy: an epsilon alternative never overwrites a non-epsilon one
//! already placed in a cell.

use crate::error::Diagnostic;
use crate::grammar::sets::{first_of_sequence_pub, SetMap};
use crate::grammar::{Grammar, ProductionRule, END_OF_INPUT, EPSILON};
use crate::table::Table as PrettyTable;
use std::collections::BTreeMap;

/// `M[nonterminal][lookahead] = ProductionRule`.
#[derive(Debug, Clone, Default)]
pub struct Table {
    entries: BTreeMap<(String, String), ProductionRule>,
}

impl Table {
    pub fn get(&self, nonterminal: &str, lookahead: &str) -> Option<&ProductionRule> {
        self.entries.get(&(nonterminal.to_string(), lookahead.to_string()))
    }

    pub fn entries(&self) -> impl Iterator<Item = (&(String, String), &ProductionRule)> {
        self.entries.iter()
    }

    /// Renders the table with the shared column-aligned pretty-printer, one
    /// row per nonterminal/lookahead cell.
    pub fn to_table_dump(&self) -> String {
        let mut t = PrettyTable::default();
        t.push_row(vec!["nonterminal", "lookahead", "alt"]);
        let rows: Vec<(String, String, String)> = self
            .entries
            .iter()
            .map(|((nt, la), rule)| (nt.clone(), la.clone(), rule.alt_index.to_string()))
            .collect();
        for (nt, la, alt) in &rows {
            t.push_row(vec![nt.as_str(), la.as_str(), alt.as_str()]);
        }
        t.to_string(" | ")
    }
}

fn try_put(
    table: &mut Table,
    grammar: &Grammar,
    nonterminal: &str,
    lookahead: &str,
    rule: ProductionRule,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let key = (nonterminal.to_string(), lookahead.to_string());
    let Some(existing) = table.entries.get(&key) else {
        table.entries.insert(key, rule);
        return;
    };

    let existing_is_eps = grammar
        .alternative(existing)
        .map(|a| grammar.is_epsilon_alternative(a))
        .unwrap_or(false);
    let new_is_eps = grammar
        .alternative(&rule)
        .map(|a| grammar.is_epsilon_alternative(a))
        .unwrap_or(false);

    match (existing_is_eps, new_is_eps) {
        (true, false) => {
            // Overwrite: favor the non-ε alternative (resolves dangling-else).
            table.entries.insert(key, rule);
        }
        (false, true) => {
            // Keep the existing non-ε rule.
        }
        _ => {
            diagnostics.push(Diagnostic::Ll1Conflict {
                nonterminal: nonterminal.to_string(),
                lookahead: lookahead.to_string(),
                kept_alt: existing.alt_index,
                rejected_alt: rule.alt_index,
            });
        }
    }
}

/// Builds the LL(1) table from the grammar's productions and its FIRST/FOLLOW
/// sets. Conflicts are never fatal: they are collected as diagnostics
/// (and logged), and the table keeps whatever the policy in [`try_put`]
/// decides.
pub fn build_table(grammar: &Grammar, first: &SetMap, follow: &SetMap) -> (Table, Vec<Diagnostic>) {
    let mut table = Table::default();
    let mut diagnostics = Vec::new();

    for production in &grammar.productions {
        for (alt_index, alt) in production.alternatives.iter().enumerate() {
            let rule = ProductionRule::new(production.left.clone(), alt_index);
            let first_alpha = first_of_sequence_pub(alt, grammar, first);

            for terminal in first_alpha.iter().filter(|&t| t != EPSILON) {
                try_put(&mut table, grammar, &production.left, terminal, rule.clone(), &mut diagnostics);
            }

            if first_alpha.contains(EPSILON) {
                if let Some(follow_a) = follow.get(&production.left) {
                    for terminal in follow_a {
                        try_put(&mut table, grammar, &production.left, terminal, rule.clone(), &mut diagnostics);
                    }
                }
            }
        }
    }

    for d in &diagnostics {
        d.log();
    }
    (table, diagnostics)
}

pub const END: &str = END_OF_INPUT;
