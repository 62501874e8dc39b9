//! The code-emitter seam: the algorithms in [`lexer::codegen`](crate::lexer::codegen)
//! and [`parser_gen::codegen`](crate::parser_gen::codegen) describe emitted
//! source in terms of its *behavior*; the concrete target language is a
//! parameter, expressed here as a trait so a second backend is just another
//! impl, not a rewrite of the generator.

/// Renders generated scanner/parser artifacts as source text in some target
/// language.
pub trait CodeEmitter {
    /// Renders a scanner module implementing longest-match scanning over the
    /// given rule table and the DFA built from each rule's regex.
    fn emit_lexer(&self, rules: &[crate::lexer::LexerRule], dfas: &[crate::dfa::Dfa]) -> String;

    /// Renders a recursive-descent recognizer over an LL(1) table.
    fn emit_recognizer(&self, grammar: &crate::grammar::Grammar, table: &crate::grammar::table::Table) -> String;

    /// Renders a recursive-descent parse-tree builder over an LL(1) table.
    fn emit_tree_builder(&self, grammar: &crate::grammar::Grammar, table: &crate::grammar::table::Table) -> String;
}

/// Renders both scanner and parser as Rust source text.
pub struct RustEmitter;

impl CodeEmitter for RustEmitter {
    fn emit_lexer(&self, rules: &[crate::lexer::LexerRule], dfas: &[crate::dfa::Dfa]) -> String {
        crate::lexer::codegen::render(rules, dfas)
    }

    fn emit_recognizer(&self, grammar: &crate::grammar::Grammar, table: &crate::grammar::table::Table) -> String {
        crate::parser_gen::codegen::render_recognizer(grammar, table)
    }

    fn emit_tree_builder(&self, grammar: &crate::grammar::Grammar, table: &crate::grammar::table::Table) -> String {
        crate::parser_gen::codegen::render_tree_builder(grammar, table)
    }
}
