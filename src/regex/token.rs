use crate::char_class::CharClass;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// A bounded or unbounded repetition count, e.g. `*` = `{0,}`, `+` = `{1,}`,
/// `{2,5}` = `{2,5}`.
pub struct ExponentRange {
    pub min: usize,
    pub max: Option<usize>,
}

impl ExponentRange {
    pub const STAR: ExponentRange = ExponentRange { min: 0, max: None };
    pub const PLUS: ExponentRange = ExponentRange { min: 1, max: None };
}

#[derive(Debug, Clone, PartialEq)]
/// A single lexical token of a regex source string, produced by
/// [crate::regex::tokenizer::tokenize] and consumed by
/// [crate::regex::parser::parse].
pub enum RegexToken {
    Class(CharClass),
    Exponent(ExponentRange),
    LParen,
    RParen,
    Union,
}
