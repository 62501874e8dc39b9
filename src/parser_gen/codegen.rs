//! Emits a standalone, self-contained recursive-descent parser as Rust
//! source text: `Token`/`RuntimeParseError`/`Cursor` (and, for the
//! tree-builder, `ParseTreeNode`) support types, one function per
//! nonterminal dispatching on lookahead via the same table cells
//! [`crate::parser_gen`]'s runtime driver consults, and a dump of the
//! table itself for reference.
//!
//! Mirrors the shape of [`crate::lexer::codegen`]: support types, then
//! per-item functions, then a comment-form table dump via the shared
//! [`Table`] pretty-printer.

use crate::grammar::table::Table as Ll1Table;
use crate::grammar::{Grammar, END_OF_INPUT};
use crate::table::Table;

fn fn_name(nonterminal: &str) -> String {
    format!("parse_{}", nonterminal.replace('\'', "_"))
}

/// Renders the `Token`, `RuntimeParseError`, and `Cursor` types every
/// generated `parse_<nonterminal>` function depends on, so the emitted
/// module compiles on its own. `build_tree` additionally renders
/// `ParseTreeNode` and `Cursor::expect_leaf`.
fn render_support(build_tree: bool) -> String {
    let mut out = String::new();
    out.push_str("#[derive(Debug, Clone, PartialEq, Eq)]\n");
    out.push_str("pub struct Token {\n");
    out.push_str("    pub token_type: String,\n");
    out.push_str("    pub value: String,\n");
    out.push_str("    pub line: usize,\n");
    out.push_str("    pub column: usize,\n");
    out.push_str("}\n\n");

    out.push_str("#[derive(Debug, Clone, PartialEq, Eq)]\n");
    out.push_str("pub enum RuntimeParseError {\n");
    out.push_str("    UnexpectedToken { nonterminal: String, expected: Vec<String>, found: String },\n");
    out.push_str("}\n\n");

    if build_tree {
        out.push_str("#[derive(Debug, Clone, PartialEq, Eq)]\n");
        out.push_str("pub struct ParseTreeNode {\n");
        out.push_str("    pub kind: String,\n");
        out.push_str("    pub token_text: String,\n");
        out.push_str("    pub children: Vec<ParseTreeNode>,\n");
        out.push_str("}\n\n");

        out.push_str("impl ParseTreeNode {\n");
        out.push_str("    fn leaf(kind: &str, token_text: &str) -> Self {\n");
        out.push_str("        ParseTreeNode { kind: kind.to_string(), token_text: token_text.to_string(), children: Vec::new() }\n");
        out.push_str("    }\n\n");
        out.push_str("    pub fn node(kind: &str, children: Vec<ParseTreeNode>) -> Self {\n");
        out.push_str("        ParseTreeNode { kind: kind.to_string(), token_text: String::new(), children }\n");
        out.push_str("    }\n");
        out.push_str("}\n\n");
    }

    out.push_str("pub struct Cursor<'a> {\n");
    out.push_str("    tokens: &'a [Token],\n");
    out.push_str("    pos: usize,\n");
    out.push_str("}\n\n");

    out.push_str("impl<'a> Cursor<'a> {\n");
    out.push_str("    pub fn new(tokens: &'a [Token]) -> Self {\n");
    out.push_str("        Cursor { tokens, pos: 0 }\n");
    out.push_str("    }\n\n");
    out.push_str(&format!(
        "    fn lookahead_type(&self) -> &str {{\n        self.tokens.get(self.pos).map(|t| t.token_type.as_str()).unwrap_or({:?})\n    }}\n\n",
        END_OF_INPUT
    ));
    out.push_str("    fn advance(&mut self) -> Option<&'a Token> {\n");
    out.push_str("        let tok = self.tokens.get(self.pos);\n");
    out.push_str("        self.pos += 1;\n");
    out.push_str("        tok\n");
    out.push_str("    }\n\n");
    out.push_str("    fn expect(&mut self, symbol: &str) -> Result<(), RuntimeParseError> {\n");
    out.push_str("        let found = self.lookahead_type().to_string();\n");
    out.push_str("        if found != symbol {\n");
    out.push_str(
        "            return Err(RuntimeParseError::UnexpectedToken { nonterminal: symbol.to_string(), expected: vec![symbol.to_string()], found });\n",
    );
    out.push_str("        }\n");
    out.push_str("        self.advance();\n");
    out.push_str("        Ok(())\n");
    out.push_str("    }\n");

    if build_tree {
        out.push_str("\n    fn expect_leaf(&mut self, symbol: &str) -> Result<ParseTreeNode, RuntimeParseError> {\n");
        out.push_str("        let found = self.lookahead_type().to_string();\n");
        out.push_str("        if found != symbol {\n");
        out.push_str(
            "            return Err(RuntimeParseError::UnexpectedToken { nonterminal: symbol.to_string(), expected: vec![symbol.to_string()], found });\n",
        );
        out.push_str("        }\n");
        out.push_str("        let token = self.advance().expect(\"lookahead just confirmed a token is present\");\n");
        out.push_str("        Ok(ParseTreeNode::leaf(symbol, &token.value))\n");
        out.push_str("    }\n");
    }
    out.push_str("}\n");
    out
}

fn render_nonterminal(grammar: &Grammar, table: &Ll1Table, nonterminal: &str, build_tree: bool) -> String {
    let mut out = String::new();
    let ret = if build_tree { "ParseTreeNode" } else { "()" };
    out.push_str(&format!("fn {}(cursor: &mut Cursor) -> Result<{}, RuntimeParseError> {{\n", fn_name(nonterminal), ret));
    out.push_str("    match cursor.lookahead_type() {\n");

    let mut cells: Vec<(&str, &crate::grammar::ProductionRule)> = table
        .entries()
        .filter(|((nt, _), _)| nt == nonterminal)
        .map(|((_, la), rule)| (la.as_str(), rule))
        .collect();
    cells.sort_unstable_by_key(|(la, _)| la.to_string());

    for (lookahead, rule) in &cells {
        let alt = grammar.alternative(rule).expect("table only references existing alternatives");
        out.push_str(&format!("        {:?} => {{\n", lookahead));
        if build_tree {
            out.push_str("            let mut children = Vec::new();\n");
        }
        for symbol in alt {
            if grammar.nonterminals.contains(symbol) {
                if build_tree {
                    out.push_str(&format!("            children.push({}(cursor)?);\n", fn_name(symbol)));
                } else {
                    out.push_str(&format!("            {}(cursor)?;\n", fn_name(symbol)));
                }
            } else if build_tree {
                out.push_str(&format!("            children.push(cursor.expect_leaf({:?})?);\n", symbol));
            } else {
                out.push_str(&format!("            cursor.expect({:?})?;\n", symbol));
            }
        }
        if build_tree {
            out.push_str(&format!("            Ok(ParseTreeNode::node({:?}, children))\n", nonterminal));
        } else {
            out.push_str("            Ok(())\n");
        }
        out.push_str("        }\n");
    }
    out.push_str("        other => Err(RuntimeParseError::UnexpectedToken {\n");
    out.push_str(&format!("            nonterminal: {:?}.to_string(),\n", nonterminal));
    out.push_str(&format!(
        "            expected: vec![{}],\n",
        cells.iter().map(|(la, _)| format!("{:?}.to_string()", la)).collect::<Vec<_>>().join(", ")
    ));
    out.push_str("            found: other.to_string(),\n");
    out.push_str("        }),\n");
    out.push_str("    }\n");
    out.push_str("}\n");
    out
}

fn table_dump(table: &Ll1Table) -> String {
    let mut t = Table::default();
    t.push_row(vec!["nonterminal", "lookahead", "alt"]);
    let rows: Vec<(String, String, String)> = table
        .entries()
        .map(|((nt, la), rule)| (nt.clone(), la.clone(), rule.alt_index.to_string()))
        .collect();
    for (nt, la, alt) in &rows {
        t.push_row(vec![nt.as_str(), la.as_str(), alt.as_str()]);
    }
    let mut out = String::from("// LL(1) table:\n");
    for line in t.to_string(" ").lines() {
        out.push_str("// ");
        out.push_str(line);
        out.push('\n');
    }
    out
}

/// Renders a recognizer: one `fn parse_<nonterminal>` per nonterminal,
/// none of which build any output beyond success/failure.
pub fn render_recognizer(grammar: &Grammar, table: &Ll1Table) -> String {
    let mut out = String::from("// Generated recognizer. Validates against the grammar without building a tree.\n\n");
    out.push_str(&render_support(false));
    out.push('\n');
    for nonterminal in &grammar.nonterminals {
        out.push_str(&render_nonterminal(grammar, table, nonterminal, false));
        out.push('\n');
    }
    out.push_str(&format!("// entry point: {}\n", fn_name(&grammar.start)));
    out.push_str(&format!("// end-of-input marker: {:?}\n", END_OF_INPUT));
    out.push_str(&table_dump(table));
    out
}

/// Renders a tree-builder: same dispatch, but each function returns a
/// [`crate::parser_gen::ParseTreeNode`].
pub fn render_tree_builder(grammar: &Grammar, table: &Ll1Table) -> String {
    let mut out = String::from("// Generated tree-building parser. Each function returns a ParseTreeNode.\n\n");
    out.push_str(&render_support(true));
    out.push('\n');
    for nonterminal in &grammar.nonterminals {
        out.push_str(&render_nonterminal(grammar, table, nonterminal, true));
        out.push('\n');
    }
    out.push_str(&format!("// entry point: {}\n", fn_name(&grammar.start)));
    out.push_str(&table_dump(table));
    out
}
