//! # frontalier
//!
//! `frontalier` is a compiler front-end generator: it builds scanners and
//! predictive parsers from declarative rule files instead of hand-written
//! automata, and translates the resulting parse trees into three-address
//! code.
//!
//! ## Pipeline
//!
//! 1. **Regex → NFA → DFA** ([`regex`], [`nfa`], [`dfa`]): a regex source
//!    string is parsed into a [`regex::RegexTree`], compiled via Thompson
//!    construction into an [`nfa::Nfa`], then converted by subset
//!    construction into a [`dfa::Dfa`] and minimized.
//! 2. **Lexer** ([`lexer`]): a rule file binds token types to regexes; the
//!    [`lexer::Lexer`] runtime drives longest-match scanning over the
//!    resulting per-rule DFAs.
//! 3. **Grammar → FIRST/FOLLOW → LL(1) table** ([`grammar`]): a grammar file
//!    is parsed into a [`grammar::Grammar`], FIRST and FOLLOW sets are
//!    computed by fixed-point iteration, and an LL(1)
//!    [`grammar::table::Table`] is built from them.
//! 4. **Parser** ([`parser_gen`]): a recognizer or tree-building recursive
//!    descent driver walks the table.
//! 5. **IR** ([`ir`]): a tree walker over the parse tree emits three-address
//!    code quadruples via an [`ir::IRBuilder`].
//!
//! Each stage also has a textual emitter ([`codegen`]) that renders the
//! algorithm's behavior as standalone Rust source, for callers who want to
//! ship the generated scanner/parser rather than run it through this crate
//! at runtime.
//!
//! ## Example
//!
//! ```rust
//! use frontalier::regex::parse::parse as parse_regex;
//! use frontalier::regex::Regex;
//!
//! let tree = parse_regex("[a-z]+").unwrap();
//! let regex = Regex { tree };
//! let mut dfa = regex.to_nfa().to_dfa();
//! dfa.minimize();
//! assert!(dfa.accepts(b"hello"));
//! assert!(!dfa.accepts(b""));
//! ```

pub mod codegen;
pub mod dfa;
pub mod error;
pub mod grammar;
pub mod ir;
pub mod lexer;
pub mod nfa;
pub mod parser_gen;
pub mod regex;
mod table;
