//! Regex tokenizer, parser and the small surface glueing them to [crate::nfa].

pub mod parser;
pub mod token;
pub mod tokenizer;

use crate::char_class::CharClass;
use crate::error::{InvalidClassError, RegexError};
use crate::nfa::Nfa;
use crate::regex::token::RegexToken;
use regex::Regex;

/// Compiles a regex source string directly into an [Nfa]. [compile_both]
/// wraps this with the second, `regex`-crate-backed representation
/// [crate::lexer::LexerBuilder::add_rule] needs for each registered rule.
pub fn compile(source: &str) -> Result<Nfa, RegexError> {
    let tokens = tokenizer::tokenize(source)?;
    parser::parse(&tokens)
}

/// Re-renders a parsed token stream into an equivalent `regex`-crate source
/// string, so the exact pattern a rule's [Nfa] was built from can also be
/// matched directly by a host `Regex` (`Lexer::parse_str`'s batch path, built
/// over the `regex` crate the way the teacher's whole-buffer
/// `Tokenizer`/`Pattern` is). Re-rendering the already-tokenized form, rather
/// than handing the raw source straight to `Regex::new`, sidesteps escapes
/// this engine treats as a plain literal character (`\r` is the literal `r`,
/// per spec.md §4.A) but that the `regex` crate gives other meaning to.
pub(crate) fn render_host_source(tokens: &[RegexToken]) -> String {
    let mut out = String::new();
    for tok in tokens {
        match tok {
            RegexToken::LParen => out.push('('),
            RegexToken::RParen => out.push(')'),
            RegexToken::Union => out.push('|'),
            RegexToken::Exponent(range) => match (range.min, range.max) {
                (0, None) => out.push('*'),
                (1, None) => out.push('+'),
                (min, None) => out.push_str(&format!("{{{},}}", min)),
                (min, Some(max)) if min == max => out.push_str(&format!("{{{}}}", min)),
                (min, Some(max)) => out.push_str(&format!("{{{},{}}}", min, max)),
            },
            RegexToken::Class(class) => match class {
                CharClass::Any => out.push('.'),
                CharClass::Literal(c) => {
                    if is_host_metachar(*c) {
                        out.push('\\');
                    }
                    out.push(*c);
                }
                CharClass::Delegated(d) => out.push_str(&d.source),
            },
        }
    }
    out
}

fn is_host_metachar(c: char) -> bool {
    matches!(
        c,
        '.' | '^' | '$' | '*' | '+' | '?' | '(' | ')' | '[' | ']' | '{' | '}' | '|' | '\\'
    )
}

/// Compiles a rule's pattern into both representations [crate::lexer::Lexer]
/// needs: the [Nfa] the progressive `feed` path simulates, and an anchored
/// `regex::Regex` over the re-rendered source for the batch `parse_str` path.
pub(crate) fn compile_both(source: &str) -> Result<(Nfa, Regex), RegexError> {
    let tokens = tokenizer::tokenize(source)?;
    let nfa = parser::parse(&tokens)?;
    let anchored = format!("^(?:{})", render_host_source(&tokens));
    let host_regex = Regex::new(&anchored).map_err(|_| {
        RegexError::from(InvalidClassError {
            source: source.to_string(),
        })
    })?;
    Ok((nfa, host_regex))
}
