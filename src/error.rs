//! Error types surfaced by the regex tokenizer/parser, the NFA engine, the
//! progressive lexer and the grammar model.
//!
//! Each failure mode gets its own plain struct/enum with a hand-written
//! [Display] impl, the way the rest of this crate reports errors — no
//! `thiserror`/`anyhow` dependency is introduced for this.

use std::fmt::{Display, Formatter};

/// Column/line at which a failure was detected, matching [crate::lexer::LexerPosition].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorPosition {
    pub column: usize,
    pub line: usize,
}

impl Display for ErrorPosition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A `\` was the last character of a regex source string, with nothing to escape.
pub struct BackslashAtEndOfInputError;

impl Display for BackslashAtEndOfInputError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "regex source ends with an unescaped backslash")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A `[` was opened but no matching `]` was found before the source ended.
pub struct UnterminatedClassError {
    pub start: usize,
}

impl Display for UnterminatedClassError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unterminated character class starting at offset {}",
            self.start
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A `[...]` or `\d`-style class body was rejected by the host regex primitive.
pub struct InvalidClassError {
    pub source: String,
}

impl Display for InvalidClassError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid character class `{}`", self.source)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A `{n,m}` exponent was malformed: non-digit content, a missing `}`, or `n > m`.
pub struct InvalidExponentError {
    pub source: String,
}

impl Display for InvalidExponentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid exponent range `{}`", self.source)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// The regex tokenizer (§4.A) rejected a source string outright, e.g. a stray
/// `]` or `}` outside of any class/exponent, or an empty source.
pub struct TokenizeError {
    pub message: String,
}

impl Display for TokenizeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// The recursive-descent regex parser (§4.B) rejected a token stream: an
/// unmatched `(`/`)`, a dangling `|`, trailing tokens, or recursion past the
/// depth guard.
pub struct RegexParseError {
    pub message: String,
}

impl Display for RegexParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Sum type wrapping every failure a [crate::regex] compile can produce, so
/// [crate::lexer::LexerBuilder::build] has a single `Result` error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegexError {
    BackslashAtEndOfInput(BackslashAtEndOfInputError),
    UnterminatedClass(UnterminatedClassError),
    InvalidClass(InvalidClassError),
    InvalidExponent(InvalidExponentError),
    Tokenize(TokenizeError),
    Parse(RegexParseError),
}

impl Display for RegexError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RegexError::BackslashAtEndOfInput(e) => e.fmt(f),
            RegexError::UnterminatedClass(e) => e.fmt(f),
            RegexError::InvalidClass(e) => e.fmt(f),
            RegexError::InvalidExponent(e) => e.fmt(f),
            RegexError::Tokenize(e) => e.fmt(f),
            RegexError::Parse(e) => e.fmt(f),
        }
    }
}

macro_rules! impl_from_regex_error {
    ($variant:ident, $ty:ty) => {
        impl From<$ty> for RegexError {
            fn from(e: $ty) -> Self {
                RegexError::$variant(e)
            }
        }
    };
}

impl_from_regex_error!(BackslashAtEndOfInput, BackslashAtEndOfInputError);
impl_from_regex_error!(UnterminatedClass, UnterminatedClassError);
impl_from_regex_error!(InvalidClass, InvalidClassError);
impl_from_regex_error!(InvalidExponent, InvalidExponentError);
impl_from_regex_error!(Tokenize, TokenizeError);
impl_from_regex_error!(Parse, RegexParseError);

#[derive(Debug, Clone, PartialEq, Eq)]
/// A rule's NFA template died entirely and no other rule has ever matched:
/// the progressive lexer cannot make progress at `position`.
pub struct LexerError {
    pub character: char,
    pub position: ErrorPosition,
}

impl Display for LexerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unexpected character '{}' at {}",
            self.character, self.position
        )
    }
}

/// Internal, never-surfaced signal that an [crate::nfa::Nfa] simulation has
/// no live states left after consuming a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DeadState;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Two productions were registered with the same `(lhs, rhs)` pair.
pub struct DuplicateProductionError {
    pub lhs: String,
}

impl Display for DuplicateProductionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "duplicate production registered for `{}`", self.lhs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A production string like `"expr <lhs> PLUS expr <rhs>"` could not be
/// parsed: a malformed `<name>` suffix or a name used twice.
pub struct GrammarParseError {
    pub message: String,
}

impl Display for GrammarParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Sum type wrapping every failure [crate::grammar::GrammarBuilder::build]
/// can produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    DuplicateProduction(DuplicateProductionError),
    Parse(GrammarParseError),
}

impl Display for GrammarError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GrammarError::DuplicateProduction(e) => e.fmt(f),
            GrammarError::Parse(e) => e.fmt(f),
        }
    }
}

impl From<DuplicateProductionError> for GrammarError {
    fn from(e: DuplicateProductionError) -> Self {
        GrammarError::DuplicateProduction(e)
    }
}

impl From<GrammarParseError> for GrammarError {
    fn from(e: GrammarParseError) -> Self {
        GrammarError::Parse(e)
    }
}
