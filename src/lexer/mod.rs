//! Lexer rules and the reference scanner driven by them.
//!
//! A [`LexerRule`] pairs a token type name with a regex and an `ignore`
//! flag. [`Lexer`] compiles each rule's regex down to a minimized DFA once
//! and then runs a longest-match/rule-order driver over an input string.

pub mod codegen;
pub mod parse;

use crate::dfa::Dfa;
use crate::regex::parse::parse as parse_regex;
use crate::regex::Regex;
use thiserror::Error;

/// One line of a lexer rule file: `<TOKEN_TYPE> <regex> [IGNORE]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexerRule {
    pub token_type: String,
    pub regex: String,
    pub ignore: bool,
}

/// A scanned token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub token_type: String,
    pub value: String,
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Error)]
pub enum RuntimeLexError {
    #[error("unexpected character {byte:?} at line {line}, column {column}")]
    UnexpectedCharacter { byte: u8, line: usize, column: usize },
}

struct CompiledRule {
    rule: LexerRule,
    dfa: Dfa,
}

/// The reference scanner: holds the input and a `(pos, line, column)`
/// cursor, and compiles every rule's regex to a minimized DFA up front.
pub struct Lexer<'a> {
    input: &'a [u8],
    pos: usize,
    line: usize,
    column: usize,
    rules: Vec<CompiledRule>,
}

impl<'a> Lexer<'a> {
    /// Compiles `rules` (in file order — order resolves longest-match ties)
    /// and prepares to scan `input`.
    pub fn new(input: &'a str, rules: &[LexerRule]) -> Self {
        let compiled = rules
            .iter()
            .map(|rule| {
                let tree = parse_regex(&rule.regex).expect("rule regex must already be validated");
                let mut dfa = Regex::new(tree).to_nfa().to_dfa();
                dfa.minimize();
                CompiledRule { rule: rule.clone(), dfa }
            })
            .collect();
        Lexer {
            input: input.as_bytes(),
            pos: 0,
            line: 1,
            column: 1,
            rules: compiled,
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn advance_cursor(&mut self, len: usize) {
        for &b in &self.input[self.pos..self.pos + len] {
            if b == b'\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.pos += len;
    }

    fn skip_whitespace(&mut self) {
        while !self.at_end() && matches!(self.input[self.pos], b' ' | b'\t' | b'\n' | b'\r') {
            self.advance_cursor(1);
        }
    }

    /// Length of the longest prefix of `self.input[self.pos..]` accepted by
    /// `dfa`, or 0 if no non-empty prefix is accepted.
    fn longest_match(dfa: &Dfa, input: &[u8]) -> usize {
        let mut state = dfa.start;
        let mut best = 0;
        for (i, &b) in input.iter().enumerate() {
            match dfa.states[state].transitions.get(&b) {
                Some(&next) => {
                    state = next;
                    if dfa.states[state].accepting {
                        best = i + 1;
                    }
                }
                None => break,
            }
        }
        best
    }

    /// Implements the next-token contract: skip whitespace, try every rule
    /// at the current position, prefer an IGNORE match outright (and
    /// recurse), otherwise pick the longest non-ignored match breaking ties
    /// by file order, or fail on no match.
    pub fn next_token(&mut self) -> Result<Option<Token>, RuntimeLexError> {
        self.skip_whitespace();
        if self.at_end() {
            return Ok(None);
        }

        for compiled in &self.rules {
            if !compiled.rule.ignore {
                continue;
            }
            let len = Self::longest_match(&compiled.dfa, &self.input[self.pos..]);
            if len > 0 {
                self.advance_cursor(len);
                return self.next_token();
            }
        }

        let mut best: Option<(usize, usize)> = None; // (length, rule index)
        for (idx, compiled) in self.rules.iter().enumerate() {
            if compiled.rule.ignore {
                continue;
            }
            let len = Self::longest_match(&compiled.dfa, &self.input[self.pos..]);
            if len == 0 {
                continue;
            }
            match best {
                Some((best_len, _)) if len <= best_len => {}
                _ => best = Some((len, idx)),
            }
        }

        match best {
            Some((len, idx)) => {
                let start = self.pos;
                let line = self.line;
                let column = self.column;
                let value = String::from_utf8_lossy(&self.input[start..start + len]).into_owned();
                self.advance_cursor(len);
                Ok(Some(Token {
                    token_type: self.rules[idx].rule.token_type.clone(),
                    value,
                    line,
                    column,
                }))
            }
            None => Err(RuntimeLexError::UnexpectedCharacter {
                byte: self.input[self.pos],
                line: self.line,
                column: self.column,
            }),
        }
    }

    /// Scans the entire input into a token list.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, RuntimeLexError> {
        let mut tokens = Vec::new();
        while let Some(tok) = self.next_token()? {
            tokens.push(tok);
        }
        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> Vec<LexerRule> {
        vec![
            LexerRule {
                token_type: "KEYWORD_IF".into(),
                regex: "if".into(),
                ignore: false,
            },
            LexerRule {
                token_type: "ID".into(),
                regex: "[A-Za-z_][A-Za-z0-9_]*".into(),
                ignore: false,
            },
            LexerRule {
                token_type: "NUMBER".into(),
                regex: "[0-9]+".into(),
                ignore: false,
            },
            LexerRule {
                token_type: "WS".into(),
                regex: " +".into(),
                ignore: true,
            },
        ]
    }

    #[test]
    fn longest_match_prefers_id_over_keyword() {
        let mut lexer = Lexer::new("ifx", &rules());
        let tok = lexer.next_token().unwrap().unwrap();
        assert_eq!(tok.token_type, "ID");
        assert_eq!(tok.value, "ifx");
    }

    #[test]
    fn tie_break_prefers_earlier_rule() {
        let mut lexer = Lexer::new("if", &rules());
        let tok = lexer.next_token().unwrap().unwrap();
        assert_eq!(tok.token_type, "KEYWORD_IF");
    }

    #[test]
    fn ignore_rule_advances_without_emitting() {
        let mut lexer = Lexer::new("if  42", &rules());
        let tokens = lexer.tokenize().unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].token_type, "KEYWORD_IF");
        assert_eq!(tokens[1].token_type, "NUMBER");
        assert_eq!(tokens[1].column, 5);
    }

    #[test]
    fn unexpected_character_reports_position() {
        let mut lexer = Lexer::new("42 @", &rules());
        lexer.next_token().unwrap();
        let err = lexer.next_token().unwrap_err();
        match err {
            RuntimeLexError::UnexpectedCharacter { byte, column, .. } => {
                assert_eq!(byte, b'@');
                assert_eq!(column, 4);
            }
        }
    }

    #[test]
    fn line_and_column_track_newlines() {
        let mut lexer = Lexer::new("1\n22", &rules());
        let first = lexer.next_token().unwrap().unwrap();
        assert_eq!((first.line, first.column), (1, 1));
        let second = lexer.next_token().unwrap().unwrap();
        assert_eq!((second.line, second.column), (2, 1));
    }
}
