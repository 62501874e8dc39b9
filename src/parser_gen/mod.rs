//! Recursive-descent driver over an LL(1) table: a recognizer flavor that
//! only validates, and a tree-builder flavor that also constructs a parse
//! tree. Both share the same lookahead/dispatch logic; [`codegen`] renders
//! the same logic as Rust source text.

pub mod codegen;

use crate::grammar::table::Table;
use crate::grammar::{Grammar, END_OF_INPUT};
use crate::lexer::Token;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuntimeParseError {
    #[error("unexpected token for {nonterminal}, expected one of: {expected:?} (got {found:?})")]
    UnexpectedToken {
        nonterminal: String,
        expected: Vec<String>,
        found: String,
    },
}

/// A constructed parse-tree node: nonterminal nodes carry their production's
/// symbols as children in order; terminal leaves carry the lexeme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTreeNode {
    pub kind: String,
    pub token_text: String,
    pub children: Vec<ParseTreeNode>,
}

impl ParseTreeNode {
    fn leaf(kind: &str, token_text: &str) -> Self {
        ParseTreeNode {
            kind: kind.to_string(),
            token_text: token_text.to_string(),
            children: Vec::new(),
        }
    }

    fn node(kind: &str, children: Vec<ParseTreeNode>) -> Self {
        ParseTreeNode {
            kind: kind.to_string(),
            token_text: String::new(),
            children,
        }
    }
}

/// A cursor over a token stream with a virtual `$` end-of-input token, the
/// input both flavors of driver consume.
struct Cursor<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn lookahead_type(&self) -> &str {
        self.tokens.get(self.pos).map(|t| t.token_type.as_str()).unwrap_or(END_OF_INPUT)
    }

    fn advance(&mut self) -> Option<&'a Token> {
        let tok = self.tokens.get(self.pos);
        self.pos += 1;
        tok
    }
}

fn expected_terminals(table: &Table, nonterminal: &str) -> Vec<String> {
    table
        .entries()
        .filter(|((nt, _), _)| nt == nonterminal)
        .map(|((_, la), _)| la.clone())
        .collect()
}

/// The recognizer flavor: validates without building a tree.
pub fn recognize(grammar: &Grammar, table: &Table, tokens: &[Token]) -> Result<(), RuntimeParseError> {
    let mut cursor = Cursor { tokens, pos: 0 };
    recognize_nonterminal(grammar, table, &mut cursor, &grammar.start)?;
    Ok(())
}

fn recognize_nonterminal(grammar: &Grammar, table: &Table, cursor: &mut Cursor, nonterminal: &str) -> Result<(), RuntimeParseError> {
    let lookahead = cursor.lookahead_type().to_string();
    let rule = table.get(nonterminal, &lookahead).ok_or_else(|| RuntimeParseError::UnexpectedToken {
        nonterminal: nonterminal.to_string(),
        expected: expected_terminals(table, nonterminal),
        found: lookahead.clone(),
    })?;
    let alt = grammar.alternative(rule).expect("table only references existing alternatives").clone();

    for symbol in &alt {
        if grammar.nonterminals.contains(symbol) {
            recognize_nonterminal(grammar, table, cursor, symbol)?;
        } else {
            let found = cursor.lookahead_type().to_string();
            if found != *symbol {
                return Err(RuntimeParseError::UnexpectedToken {
                    nonterminal: nonterminal.to_string(),
                    expected: vec![symbol.clone()],
                    found,
                });
            }
            cursor.advance();
        }
    }
    Ok(())
}

/// The tree-builder flavor: same control flow, but each call constructs and
/// returns a [`ParseTreeNode`].
pub fn parse_tree(grammar: &Grammar, table: &Table, tokens: &[Token]) -> Result<ParseTreeNode, RuntimeParseError> {
    let mut cursor = Cursor { tokens, pos: 0 };
    build_nonterminal(grammar, table, &mut cursor, &grammar.start)
}

fn build_nonterminal(grammar: &Grammar, table: &Table, cursor: &mut Cursor, nonterminal: &str) -> Result<ParseTreeNode, RuntimeParseError> {
    let lookahead = cursor.lookahead_type().to_string();
    let rule = table.get(nonterminal, &lookahead).ok_or_else(|| RuntimeParseError::UnexpectedToken {
        nonterminal: nonterminal.to_string(),
        expected: expected_terminals(table, nonterminal),
        found: lookahead.clone(),
    })?;
    let alt = grammar.alternative(rule).expect("table only references existing alternatives").clone();

    if alt.is_empty() {
        return Ok(ParseTreeNode::node(nonterminal, Vec::new()));
    }

    let mut children = Vec::with_capacity(alt.len());
    for symbol in &alt {
        if grammar.nonterminals.contains(symbol) {
            children.push(build_nonterminal(grammar, table, cursor, symbol)?);
        } else {
            let found = cursor.lookahead_type().to_string();
            if found != *symbol {
                return Err(RuntimeParseError::UnexpectedToken {
                    nonterminal: nonterminal.to_string(),
                    expected: vec![symbol.clone()],
                    found,
                });
            }
            let token = cursor.advance().expect("lookahead just confirmed a token is present");
            children.push(ParseTreeNode::leaf(symbol, &token.value));
        }
    }
    Ok(ParseTreeNode::node(nonterminal, children))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::sets::{calculate_first, calculate_follow};
    use crate::grammar::table::build_table;
    use crate::grammar::Production;

    fn classic_grammar() -> Grammar {
        Grammar {
            start: "E".into(),
            terminals: ["+".to_string(), "id".to_string()].into(),
            nonterminals: ["E".to_string(), "E'".to_string(), "T".to_string()].into(),
            productions: vec![
                Production {
                    left: "E".into(),
                    alternatives: vec![vec!["T".into(), "E'".into()]],
                },
                Production {
                    left: "E'".into(),
                    alternatives: vec![vec!["+".into(), "T".into(), "E'".into()], vec![]],
                },
                Production {
                    left: "T".into(),
                    alternatives: vec![vec!["id".into()]],
                },
            ],
        }
    }

    fn token(token_type: &str, value: &str) -> Token {
        Token {
            token_type: token_type.to_string(),
            value: value.to_string(),
            line: 1,
            column: 1,
        }
    }

    #[test]
    fn recognizes_valid_expression() {
        let grammar = classic_grammar();
        let first = calculate_first(&grammar);
        let follow = calculate_follow(&grammar, &first);
        let (table, _) = build_table(&grammar, &first, &follow);
        let tokens = vec![token("id", "x"), token("+", "+"), token("id", "y")];
        assert!(recognize(&grammar, &table, &tokens).is_ok());
    }

    #[test]
    fn rejects_invalid_expression_with_named_nonterminal() {
        let grammar = classic_grammar();
        let first = calculate_first(&grammar);
        let follow = calculate_follow(&grammar, &first);
        let (table, _) = build_table(&grammar, &first, &follow);
        let tokens = vec![token("+", "+")];
        let err = recognize(&grammar, &table, &tokens).unwrap_err();
        match err {
            RuntimeParseError::UnexpectedToken { nonterminal, .. } => assert_eq!(nonterminal, "T"),
        }
    }

    #[test]
    fn builds_parse_tree_with_epsilon_leaf() {
        let grammar = classic_grammar();
        let first = calculate_first(&grammar);
        let follow = calculate_follow(&grammar, &first);
        let (table, _) = build_table(&grammar, &first, &follow);
        let tokens = vec![token("id", "x")];
        let tree = parse_tree(&grammar, &table, &tokens).unwrap();
        assert_eq!(tree.kind, "E");
        assert_eq!(tree.children[1].kind, "E'");
        assert!(tree.children[1].children.is_empty());
    }
}
