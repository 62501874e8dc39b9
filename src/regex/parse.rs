//! Parses regex source text into a [`RegexTree`].
//!
//! Grammar, tightest-binding first: `Union := Concat ('|' Concat)*`,
//! `Concat := Repeat*` (zero repeats yields `Epsilon`),
//! `Repeat := Atom ('*'|'+')*`,
//! `Atom := '(' Union ')' | '[' Charset ']' | '.' | '\' Escaped | Byte`.

use crate::regex::RegexTree;
use nom::{
    branch::alt,
    bytes::complete::take,
    character::complete::char as nom_char,
    combinator::{all_consuming, map, opt, verify},
    multi::many0,
    sequence::{delimited, preceded},
    Finish, IResult,
};
use thiserror::Error;

/// Bytes that need `\` to appear literally outside a character class.
const RESERVED: &[u8] = b"()[]|*+.\\";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegexParseError {
    #[error("unmatched '(' in regex")]
    UnmatchedParen,
    #[error("unmatched '[' in regex")]
    UnmatchedBracket,
    #[error("trailing input after regex: {0:?}")]
    TrailingInput(String),
    #[error("dangling escape at end of regex")]
    DanglingEscape,
}

/// Parses a whole regex string.
pub fn parse(input: &str) -> Result<RegexTree, RegexParseError> {
    match all_consuming(union)(input.as_bytes()).finish() {
        Ok((_, tree)) => Ok(tree),
        Err(_) => classify_failure(input),
    }
}

fn classify_failure(input: &str) -> Result<RegexTree, RegexParseError> {
    let bytes = input.as_bytes();
    let opens = bytes.iter().filter(|&&b| b == b'(').count();
    let closes = bytes.iter().filter(|&&b| b == b')').count();
    if opens > closes {
        return Err(RegexParseError::UnmatchedParen);
    }
    let bropen = bytes.iter().filter(|&&b| b == b'[').count();
    let brclose = bytes.iter().filter(|&&b| b == b']').count();
    if bropen > brclose {
        return Err(RegexParseError::UnmatchedBracket);
    }
    if bytes.last() == Some(&b'\\') {
        return Err(RegexParseError::DanglingEscape);
    }
    Err(RegexParseError::TrailingInput(input.to_string()))
}

fn union(input: &[u8]) -> IResult<&[u8], RegexTree> {
    let (input, first) = concat(input)?;
    let (input, rest) = many0(preceded(nom_char('|'), concat))(input)?;
    Ok((input, rest.into_iter().fold(first, |acc, n| RegexTree::Union(Box::new(acc), Box::new(n)))))
}

fn concat(input: &[u8]) -> IResult<&[u8], RegexTree> {
    let (input, parts) = many0(repeat)(input)?;
    let mut iter = parts.into_iter();
    let Some(first) = iter.next() else {
        return Ok((input, RegexTree::Epsilon));
    };
    Ok((input, iter.fold(first, |acc, n| RegexTree::Concat(Box::new(acc), Box::new(n)))))
}

fn repeat(input: &[u8]) -> IResult<&[u8], RegexTree> {
    let (input, atom) = atom(input)?;
    let (input, ops) = many0(alt((nom_char('*'), nom_char('+'))))(input)?;
    let tree = ops.into_iter().fold(atom, |acc, op| match op {
        '*' => RegexTree::Star(Box::new(acc)),
        '+' => RegexTree::Plus(Box::new(acc)),
        _ => unreachable!(),
    });
    Ok((input, tree))
}

fn atom(input: &[u8]) -> IResult<&[u8], RegexTree> {
    alt((paren_union, charset, any_char, escaped_char, normal_char))(input)
}

fn paren_union(input: &[u8]) -> IResult<&[u8], RegexTree> {
    delimited(nom_char('('), union, nom_char(')'))(input)
}

fn any_char(input: &[u8]) -> IResult<&[u8], RegexTree> {
    map(nom_char('.'), |_| RegexTree::Any)(input)
}

fn charset(input: &[u8]) -> IResult<&[u8], RegexTree> {
    let (input, _) = nom_char('[')(input)?;
    let (input, negated) = map(opt(nom_char('^')), |n| n.is_some())(input)?;
    let (input, items) = many0(charset_item)(input)?;
    let (input, _) = nom_char(']')(input)?;
    let members = items.into_iter().flatten().collect();
    Ok((input, RegexTree::Charset { members, negated }))
}

fn charset_item(input: &[u8]) -> IResult<&[u8], Vec<u8>> {
    let (input, lo) = charset_byte(input)?;
    // a range a-b requires the '-' not be immediately followed by ']'
    if let Ok((after_dash, _)) = nom_char::<_, nom::error::Error<&[u8]>>('-')(input) {
        if after_dash.first() != Some(&b']') && !after_dash.is_empty() {
            let (rest, hi) = charset_byte(after_dash)?;
            let (lo, hi) = (lo.min(hi), lo.max(hi));
            return Ok((rest, (lo..=hi).collect()));
        }
    }
    Ok((input, vec![lo]))
}

fn charset_byte(input: &[u8]) -> IResult<&[u8], u8> {
    alt((escape_sequence, single_byte_not(b']')))(input)
}

fn escaped_char(input: &[u8]) -> IResult<&[u8], RegexTree> {
    map(escape_sequence, RegexTree::Char)(input)
}

fn escape_sequence(input: &[u8]) -> IResult<&[u8], u8> {
    let (input, _) = nom_char('\\')(input)?;
    let (input, b) = take(1usize)(input)?;
    let b = b[0];
    let mapped = match b {
        b'n' => b'\n',
        b't' => b'\t',
        b'r' => b'\r',
        other => other,
    };
    Ok((input, mapped))
}

fn normal_char(input: &[u8]) -> IResult<&[u8], RegexTree> {
    map(single_byte_not_reserved, RegexTree::Char)(input)
}

fn single_byte_not_reserved(input: &[u8]) -> IResult<&[u8], u8> {
    map(verify(take(1usize), |b: &[u8]| !RESERVED.contains(&b[0])), |b: &[u8]| b[0])(input)
}

fn single_byte_not(exclude: u8) -> impl Fn(&[u8]) -> IResult<&[u8], u8> {
    move |input: &[u8]| map(verify(take(1usize), |b: &[u8]| b[0] != exclude), |b: &[u8]| b[0])(input)
}
