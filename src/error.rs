//! Shared diagnostic type for conditions that are reported but do not abort a
//! pipeline stage: `GrammarMalformed`, `UnknownTerminal`, and `Ll1Conflict`
//! are all non-fatal.
//!
//! Fatal conditions are modeled as ordinary `Result::Err` values with a
//! `thiserror`-derived enum scoped to the module that can fail
//! (`regex::parse::RegexParseError`, `lexer::parse::RuleFileError`,
//! `grammar::parse::GrammarLoadError`). This module only covers the warn-and-
//! continue kinds, which are collected into a `Vec<Diagnostic>` returned
//! alongside the successful value and also logged at `log::warn!` as they are
//! discovered.

use std::fmt;

/// A non-fatal condition discovered while building an automaton, loading a
/// grammar, or building an LL(1) table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A grammar-file line looked like it should be a production but had no
    /// `->` and wasn't a continuation line; the line was skipped.
    GrammarMalformed { line_no: usize, line: String },
    /// A symbol appears in a grammar but is not a token type from the lexer
    /// rules; it is still classified as a terminal.
    UnknownTerminal { symbol: String },
    /// Two alternatives competed for the same `(nonterminal, lookahead)`
    /// table cell and the grammar is therefore not LL(1) under the tie-break
    /// policy; the existing entry was kept.
    Ll1Conflict {
        nonterminal: String,
        lookahead: String,
        kept_alt: usize,
        rejected_alt: usize,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::GrammarMalformed { line_no, line } => {
                write!(f, "line {line_no}: not a production or continuation: {line:?}")
            }
            Diagnostic::UnknownTerminal { symbol } => {
                write!(f, "unknown terminal `{symbol}` not defined in lexer rules")
            }
            Diagnostic::Ll1Conflict {
                nonterminal,
                lookahead,
                kept_alt,
                rejected_alt,
            } => write!(
                f,
                "not LL(1): {nonterminal} on lookahead {lookahead} has conflicting alternatives \
                 #{kept_alt} and #{rejected_alt}; kept #{kept_alt}"
            ),
        }
    }
}

impl Diagnostic {
    /// Logs the diagnostic at `warn` severity; called at every site a
    /// diagnostic is discovered, alongside collecting it into the returned
    /// `Vec<Diagnostic>`.
    pub fn log(&self) {
        log::warn!("{self}");
    }
}
