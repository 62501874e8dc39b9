//! Parses a lexer rule file: one rule per non-blank, non-comment line,
//! `<TOKEN_TYPE> <regex> [IGNORE]`.

use crate::lexer::LexerRule;
use crate::regex::parse::{parse as parse_regex, RegexParseError};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleFileError {
    #[error("line {line_no}: expected '<TOKEN_TYPE> <regex> [IGNORE]', got {line:?}")]
    MalformedLine { line_no: usize, line: String },
    #[error("line {line_no}: invalid regex for rule: {source}")]
    InvalidRegex { line_no: usize, source: RegexParseError },
    #[error("line {line_no}: duplicate token type {token_type:?}")]
    DuplicateTokenType { line_no: usize, token_type: String },
}

/// Parses a whole lexer rule file. Every rule's regex is validated eagerly
/// (a `RegexSyntax` failure here is fatal, per the error-kind table).
pub fn parse_rule_file(source: &str) -> Result<Vec<LexerRule>, RuleFileError> {
    let mut rules = Vec::new();
    let mut seen = std::collections::HashSet::new();

    for (idx, raw_line) in source.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = raw_line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let Some((token_type, rest)) = trimmed.split_once(char::is_whitespace) else {
            return Err(RuleFileError::MalformedLine {
                line_no,
                line: raw_line.to_string(),
            });
        };
        let rest = rest.trim_start();

        let (regex, ignore) = match rest.strip_suffix("IGNORE") {
            Some(before) if before.is_empty() || before.ends_with(char::is_whitespace) => {
                (before.trim_end().to_string(), true)
            }
            _ => (rest.to_string(), false),
        };
        if regex.is_empty() {
            return Err(RuleFileError::MalformedLine {
                line_no,
                line: raw_line.to_string(),
            });
        }

        parse_regex(&regex).map_err(|source| RuleFileError::InvalidRegex { line_no, source })?;

        if !seen.insert(token_type.to_string()) {
            return Err(RuleFileError::DuplicateTokenType {
                line_no,
                token_type: token_type.to_string(),
            });
        }

        rules.push(LexerRule {
            token_type: token_type.to_string(),
            regex,
            ignore,
        });
    }

    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rules_and_skips_comments() {
        let source = "\
# a comment
NUMBER [0-9]+
LINE_COMMENT //.* IGNORE

ID [A-Za-z_][A-Za-z0-9_]*
";
        let rules = parse_rule_file(source).unwrap();
        assert_eq!(rules.len(), 3);
        assert_eq!(rules[0].token_type, "NUMBER");
        assert!(!rules[0].ignore);
        assert_eq!(rules[1].token_type, "LINE_COMMENT");
        assert!(rules[1].ignore);
    }

    #[test]
    fn preserves_internal_whitespace_in_regex() {
        let source = "WHITESPACE [\\ \\t\\n\\r]+ IGNORE\n";
        let rules = parse_rule_file(source).unwrap();
        assert_eq!(rules[0].regex, "[\\ \\t\\n\\r]+");
        assert!(rules[0].ignore);
    }

    #[test]
    fn rejects_duplicate_token_types() {
        let source = "A a\nA b\n";
        assert!(matches!(
            parse_rule_file(source),
            Err(RuleFileError::DuplicateTokenType { .. })
        ));
    }

    #[test]
    fn rejects_bad_regex() {
        let source = "A (a\n";
        assert!(matches!(parse_rule_file(source), Err(RuleFileError::InvalidRegex { .. })));
    }
}
