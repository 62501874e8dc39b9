//! Emits a standalone, self-contained scanner as Rust source text: one
//! per-rule match routine over its minimized DFA's transition table, a
//! `Token` struct and `Lexer` driver implementing the longest-match/
//! rule-order/IGNORE contract, and a dispatch-table dump.
//!
//! This renders that behavior as Rust, the one concrete target this crate
//! ships (see [`crate::codegen`]).

use crate::dfa::Dfa;
use crate::lexer::LexerRule;
use crate::table::Table;

fn fn_name(token_type: &str) -> String {
    format!("match_{}", token_type.to_lowercase())
}

/// Renders one rule's DFA as a `fn(&[u8]) -> usize` returning the longest
/// accepted prefix length, plus a comment-form dump of its transition table
/// (via the shared [`Table`] pretty-printer, same tool the DFA/NFA debug
/// dumps use).
fn render_rule(rule: &LexerRule, dfa: &Dfa) -> String {
    let mut out = String::new();
    out.push_str(&format!("// rule {:?} -> {:?}{}\n", rule.token_type, rule.regex, if rule.ignore { " (IGNORE)" } else { "" }));
    out.push_str(&format!("fn {}(input: &[u8]) -> usize {{\n", fn_name(&rule.token_type)));
    out.push_str(&format!("    let mut state: usize = {};\n", dfa.start));
    out.push_str("    let mut best = 0usize;\n");
    out.push_str(&format!("    let accepting: &[bool] = &{:?};\n", dfa.states.iter().map(|s| s.accepting).collect::<Vec<_>>()));
    out.push_str("    for (i, &b) in input.iter().enumerate() {\n");
    out.push_str("        state = match transition(state, b) {\n");
    out.push_str("            Some(next) => next,\n");
    out.push_str("            None => break,\n");
    out.push_str("        };\n");
    out.push_str("        if accepting[state] { best = i + 1; }\n");
    out.push_str("    }\n");
    out.push_str("    best\n");
    out.push_str("\n");
    out.push_str("    fn transition(state: usize, byte: u8) -> Option<usize> {\n");
    out.push_str("        match (state, byte) {\n");
    for (id, s) in dfa.states.iter().enumerate() {
        let mut targets: Vec<(u8, usize)> = s.transitions.iter().map(|(&b, &t)| (b, t)).collect();
        targets.sort_unstable();
        for (b, t) in targets {
            out.push_str(&format!("            ({id}, {b}) => Some({t}),\n"));
        }
    }
    out.push_str("            _ => None,\n");
    out.push_str("        }\n");
    out.push_str("    }\n");
    out.push_str("}\n");
    out
}

/// Renders the `Token` struct, a `Lexer` holding the scan cursor, and its
/// `next_token` driver: skip whitespace, try every IGNORE rule and recurse
/// on the first hit, otherwise pick the longest non-ignored match breaking
/// ties by rule order, or panic on no match. Mirrors [`crate::lexer::Lexer`].
fn render_driver(rules: &[LexerRule]) -> String {
    let mut out = String::new();
    out.push_str("pub struct Token {\n");
    out.push_str("    pub token_type: String,\n");
    out.push_str("    pub value: String,\n");
    out.push_str("    pub line: usize,\n");
    out.push_str("    pub column: usize,\n");
    out.push_str("}\n\n");

    out.push_str("pub struct Lexer<'a> {\n");
    out.push_str("    input: &'a [u8],\n");
    out.push_str("    pos: usize,\n");
    out.push_str("    line: usize,\n");
    out.push_str("    column: usize,\n");
    out.push_str("}\n\n");

    out.push_str("impl<'a> Lexer<'a> {\n");
    out.push_str("    pub fn new(input: &'a str) -> Self {\n");
    out.push_str("        Lexer { input: input.as_bytes(), pos: 0, line: 1, column: 1 }\n");
    out.push_str("    }\n\n");

    out.push_str("    fn at_end(&self) -> bool {\n        self.pos >= self.input.len()\n    }\n\n");

    out.push_str("    fn advance_cursor(&mut self, len: usize) {\n");
    out.push_str("        for &b in &self.input[self.pos..self.pos + len] {\n");
    out.push_str("            if b == b'\\n' {\n                self.line += 1;\n                self.column = 1;\n            } else {\n                self.column += 1;\n            }\n");
    out.push_str("        }\n        self.pos += len;\n    }\n\n");

    out.push_str("    fn skip_whitespace(&mut self) {\n");
    out.push_str("        while !self.at_end() && matches!(self.input[self.pos], b' ' | b'\\t' | b'\\n' | b'\\r') {\n");
    out.push_str("            self.advance_cursor(1);\n        }\n    }\n\n");

    out.push_str("    pub fn next_token(&mut self) -> Option<Token> {\n");
    out.push_str("        self.skip_whitespace();\n");
    out.push_str("        if self.at_end() {\n            return None;\n        }\n\n");

    for rule in rules.iter().filter(|r| r.ignore) {
        out.push_str(&format!(
            "        let len = {}(&self.input[self.pos..]);\n        if len > 0 {{\n            self.advance_cursor(len);\n            return self.next_token();\n        }}\n",
            fn_name(&rule.token_type)
        ));
    }
    out.push('\n');

    out.push_str("        let mut best: Option<(usize, &'static str)> = None;\n");
    for rule in rules.iter().filter(|r| !r.ignore) {
        out.push_str(&format!(
            "        let len = {}(&self.input[self.pos..]);\n        if len > 0 && best.map_or(true, |(best_len, _)| len > best_len) {{\n            best = Some((len, {:?}));\n        }}\n",
            fn_name(&rule.token_type),
            rule.token_type,
        ));
    }
    out.push('\n');

    out.push_str("        match best {\n");
    out.push_str("            Some((len, token_type)) => {\n");
    out.push_str("                let start = self.pos;\n");
    out.push_str("                let line = self.line;\n");
    out.push_str("                let column = self.column;\n");
    out.push_str("                let value = String::from_utf8_lossy(&self.input[start..start + len]).into_owned();\n");
    out.push_str("                self.advance_cursor(len);\n");
    out.push_str("                Some(Token { token_type: token_type.to_string(), value, line, column })\n");
    out.push_str("            }\n");
    out.push_str("            None => panic!(\"unexpected character {:?} at line {}, column {}\", self.input[self.pos] as char, self.line, self.column),\n");
    out.push_str("        }\n");
    out.push_str("    }\n");
    out.push_str("}\n");
    out
}

/// Renders the per-rule functions, the `Token`/`Lexer` driver, and a
/// dispatch-table dump as one self-contained Rust source string.
pub fn render(rules: &[LexerRule], dfas: &[Dfa]) -> String {
    assert_eq!(rules.len(), dfas.len());
    let mut out = String::from("// Generated scanner. Longest-match, rule-order tie-break, IGNORE rules consumed silently.\n\n");

    for (rule, dfa) in rules.iter().zip(dfas) {
        out.push_str(&render_rule(rule, dfa));
        out.push('\n');
    }

    out.push_str(&render_driver(rules));
    out.push('\n');

    let mut table = Table::default();
    table.push_row(vec!["index", "token_type", "ignore", "fn"]);
    let names: Vec<String> = rules.iter().map(|r| fn_name(&r.token_type)).collect();
    let idx_strs: Vec<String> = (0..rules.len()).map(|i| i.to_string()).collect();
    let ignore_strs: Vec<&str> = rules.iter().map(|r| if r.ignore { "true" } else { "false" }).collect();
    for i in 0..rules.len() {
        table.push_row(vec![idx_strs[i].as_str(), rules[i].token_type.as_str(), ignore_strs[i], names[i].as_str()]);
    }
    out.push_str("// Rule dispatch table:\n");
    for line in table.to_string(" ").lines() {
        out.push_str("// ");
        out.push_str(line);
        out.push('\n');
    }

    out
}
