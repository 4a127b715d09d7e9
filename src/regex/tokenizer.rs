//! Regex source tokenizer (§4.A): turns a regex source string into a flat
//! [RegexToken] stream. Implemented as a single left-to-right character
//! scanner with a handful of distinguishable modes (plain scanning, bracket
//! class collection, exponent-range digit collection) rather than a
//! dispatch table — the state transitions are few enough that threading
//! them through local variables reads more clearly than naming each one.

use crate::char_class::CharClass;
use crate::error::{
    BackslashAtEndOfInputError, InvalidExponentError, RegexError, TokenizeError,
    UnterminatedClassError,
};
use crate::regex::token::{ExponentRange, RegexToken};

pub fn tokenize(source: &str) -> Result<Vec<RegexToken>, RegexError> {
    if source.is_empty() {
        return Err(TokenizeError {
            message: "regex source is empty".to_string(),
        }
        .into());
    }

    let chars: Vec<char> = source.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '*' => {
                tokens.push(RegexToken::Exponent(ExponentRange::STAR));
                i += 1;
            }
            '+' => {
                tokens.push(RegexToken::Exponent(ExponentRange::PLUS));
                i += 1;
            }
            '.' => {
                tokens.push(RegexToken::Class(CharClass::Any));
                i += 1;
            }
            '(' => {
                tokens.push(RegexToken::LParen);
                i += 1;
            }
            ')' => {
                tokens.push(RegexToken::RParen);
                i += 1;
            }
            '|' => {
                tokens.push(RegexToken::Union);
                i += 1;
            }
            '[' => {
                let start = i;
                let mut raw = String::from("[");
                i += 1;
                let mut closed = false;
                while i < chars.len() {
                    let cc = chars[i];
                    if cc == '\\' && i + 1 < chars.len() {
                        raw.push(cc);
                        raw.push(chars[i + 1]);
                        i += 2;
                        continue;
                    }
                    if cc == ']' {
                        raw.push(cc);
                        i += 1;
                        closed = true;
                        break;
                    }
                    raw.push(cc);
                    i += 1;
                }
                if !closed {
                    return Err(UnterminatedClassError { start }.into());
                }
                tokens.push(RegexToken::Class(CharClass::delegated(&raw)?));
            }
            ']' => {
                return Err(TokenizeError {
                    message: format!("unexpected ']' at character offset {}", i),
                }
                .into());
            }
            '{' => {
                let mut raw = String::from("{");
                i += 1;
                let mut min_digits = String::new();
                while i < chars.len() && chars[i].is_ascii_digit() {
                    min_digits.push(chars[i]);
                    raw.push(chars[i]);
                    i += 1;
                }
                let mut max_digits: Option<String> = None;
                if i < chars.len() && chars[i] == ',' {
                    raw.push(',');
                    i += 1;
                    let mut digits = String::new();
                    while i < chars.len() && chars[i].is_ascii_digit() {
                        digits.push(chars[i]);
                        raw.push(chars[i]);
                        i += 1;
                    }
                    max_digits = Some(digits);
                }
                if min_digits.is_empty() || i >= chars.len() || chars[i] != '}' {
                    return Err(InvalidExponentError { source: raw }.into());
                }
                raw.push('}');
                i += 1;

                let min: usize = min_digits
                    .parse()
                    .map_err(|_| InvalidExponentError { source: raw.clone() })?;
                let max: Option<usize> = match max_digits {
                    None => Some(min),
                    Some(d) if d.is_empty() => None,
                    Some(d) => Some(
                        d.parse()
                            .map_err(|_| InvalidExponentError { source: raw.clone() })?,
                    ),
                };
                if let Some(m) = max {
                    if m < min {
                        return Err(InvalidExponentError { source: raw }.into());
                    }
                }
                tokens.push(RegexToken::Exponent(ExponentRange { min, max }));
            }
            '}' => {
                return Err(TokenizeError {
                    message: format!("unexpected '}}' at character offset {}", i),
                }
                .into());
            }
            '\\' => {
                i += 1;
                if i >= chars.len() {
                    return Err(BackslashAtEndOfInputError.into());
                }
                let escaped = chars[i];
                i += 1;
                let class = match escaped {
                    'n' => CharClass::literal('\n'),
                    't' => CharClass::literal('\t'),
                    'd' | 's' | 'w' | 'D' | 'S' | 'W' => {
                        CharClass::delegated(&format!("\\{}", escaped))?
                    }
                    other => CharClass::literal(other),
                };
                tokens.push(RegexToken::Class(class));
            }
            other => {
                tokens.push(RegexToken::Class(CharClass::literal(other)));
                i += 1;
            }
        }
    }

    Ok(tokens)
}
