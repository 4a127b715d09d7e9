//! Recursive-descent regex parser (§4.B): turns the flat [RegexToken] stream
//! from [crate::regex::tokenizer] into an [Nfa] via [crate::nfa]'s
//! construction primitives.
//!
//! ```text
//! union      := concat ('|' concat)*
//! concat     := repeat+
//! repeat     := atom exponent*
//! atom       := '(' union ')' | CLASS
//! ```

use crate::error::RegexError;
use crate::nfa::Nfa;
use crate::regex::token::RegexToken;

/// Guards against stack overflow on pathologically nested `(((...)))`
/// sources, the way `Suffixes`/`List` validation passes in the library this
/// crate grew out of guard against unbounded recursion with an explicit
/// counter rather than a crate dependency.
const MAX_REGEX_DEPTH: usize = 256;

struct Parser<'t> {
    tokens: &'t [RegexToken],
    pos: usize,
}

impl<'t> Parser<'t> {
    fn peek(&self) -> Option<&RegexToken> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&RegexToken> {
        let tok = self.tokens.get(self.pos);
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn parse_union(&mut self, depth: usize) -> Result<Nfa, RegexError> {
        let mut branches = vec![self.parse_concat(depth)?];
        while matches!(self.peek(), Some(RegexToken::Union)) {
            self.advance();
            branches.push(self.parse_concat(depth)?);
        }
        if branches.len() == 1 {
            Ok(branches.pop().unwrap())
        } else {
            Ok(Nfa::union(branches))
        }
    }

    fn parse_concat(&mut self, depth: usize) -> Result<Nfa, RegexError> {
        let mut parts = Vec::new();
        loop {
            match self.peek() {
                None | Some(RegexToken::Union) | Some(RegexToken::RParen) => break,
                _ => parts.push(self.parse_repeat(depth)?),
            }
        }
        if parts.is_empty() {
            return Err(RegexError::Parse(crate::error::RegexParseError {
                message: "expected a regex term".to_string(),
            }));
        }
        if parts.len() == 1 {
            Ok(parts.pop().unwrap())
        } else {
            Ok(Nfa::concat(parts))
        }
    }

    fn parse_repeat(&mut self, depth: usize) -> Result<Nfa, RegexError> {
        let mut nfa = self.parse_atom(depth)?;
        while let Some(RegexToken::Exponent(range)) = self.peek() {
            let range = *range;
            self.advance();
            nfa = Nfa::exponent(nfa, range.min, range.max);
        }
        Ok(nfa)
    }

    fn parse_atom(&mut self, depth: usize) -> Result<Nfa, RegexError> {
        match self.advance() {
            Some(RegexToken::LParen) => {
                if depth >= MAX_REGEX_DEPTH {
                    return Err(RegexError::Parse(crate::error::RegexParseError {
                        message: "regex nesting exceeds the maximum supported depth".to_string(),
                    }));
                }
                let inner = self.parse_union(depth + 1)?;
                match self.advance() {
                    Some(RegexToken::RParen) => Ok(inner),
                    _ => Err(RegexError::Parse(crate::error::RegexParseError {
                        message: "unmatched '('".to_string(),
                    })),
                }
            }
            Some(RegexToken::Class(class)) => Ok(Nfa::from_class(class.clone())),
            Some(RegexToken::RParen) => Err(RegexError::Parse(crate::error::RegexParseError {
                message: "unmatched ')'".to_string(),
            })),
            Some(RegexToken::Exponent(_)) => {
                Err(RegexError::Parse(crate::error::RegexParseError {
                    message: "exponent with nothing to repeat".to_string(),
                }))
            }
            Some(RegexToken::Union) => Err(RegexError::Parse(crate::error::RegexParseError {
                message: "'|' with nothing preceding it".to_string(),
            })),
            None => Err(RegexError::Parse(crate::error::RegexParseError {
                message: "unexpected end of regex".to_string(),
            })),
        }
    }
}

pub fn parse(tokens: &[RegexToken]) -> Result<Nfa, RegexError> {
    let mut parser = Parser { tokens, pos: 0 };
    let nfa = parser.parse_union(0)?;
    if parser.pos != tokens.len() {
        return Err(RegexError::Parse(crate::error::RegexParseError {
            message: "trailing tokens after a complete regex".to_string(),
        }));
    }
    Ok(nfa)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regex::tokenizer::tokenize;

    fn compile(src: &str) -> Nfa {
        parse(&tokenize(src).unwrap()).unwrap()
    }

    #[test]
    fn literal_concat_matches_exact_string() {
        let mut nfa = compile("if");
        nfa.start();
        assert_eq!(nfa.feed('i'), Ok(false));
        assert_eq!(nfa.feed('f'), Ok(true));
    }

    #[test]
    fn union_matches_either_alternative() {
        let mut nfa = compile("if|else");
        nfa.start();
        assert_eq!(nfa.feed('i'), Ok(false));
        assert_eq!(nfa.feed('f'), Ok(true));
    }

    #[test]
    fn grouped_union_with_trailing_literal() {
        let mut nfa = compile("(a|b)c");
        nfa.start();
        assert_eq!(nfa.feed('b'), Ok(false));
        assert_eq!(nfa.feed('c'), Ok(true));
    }

    #[test]
    fn unmatched_paren_errors() {
        assert!(parse(&tokenize("(a").unwrap()).is_err());
    }

    #[test]
    fn dangling_union_errors() {
        assert!(parse(&tokenize("a|").unwrap()).is_err());
    }
}
