use crate::error::RegexError;
use crate::lexer::{Callback, Lexer, LexerControl, MutableToken, TokenKind, TokenRule};
use std::rc::Rc;

/// Accumulates rules, validates them, and freezes into an immutable [Lexer]
/// via [LexerBuilder::build] — the same builder-then-freeze shape as the
/// library this crate grew out of uses for its `Tokenizer`/`CombinedTokenizer`.
pub struct LexerBuilder<T: TokenKind> {
    rules: Vec<TokenRule<T>>,
    ignore: Rc<dyn Fn(char) -> bool>,
}

impl<T: TokenKind> Default for LexerBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TokenKind> LexerBuilder<T> {
    pub fn new() -> Self {
        LexerBuilder {
            rules: Vec::new(),
            ignore: Rc::new(|c| c == ' ' || c == '\t'),
        }
    }

    /// Registers a rule compiled from `pattern`. The callback is invoked
    /// once the rule's match has been finalized, with `default_type`
    /// already installed on the [MutableToken].
    pub fn add_rule<F>(
        &mut self,
        pattern: &str,
        default_type: T,
        callback: F,
    ) -> Result<&mut Self, RegexError>
    where
        F: Fn(&mut LexerControl<T>, &mut MutableToken<T>) + 'static,
    {
        self.add_rule_with_types(pattern, Some(default_type), vec![default_type], callback)
    }

    /// Registers a rule whose callback is responsible for choosing the
    /// final type out of `declared_types` (the [MutableToken] starts with
    /// `ty = None`, so an omitted assignment suppresses the token).
    pub fn add_rule_with_types<F>(
        &mut self,
        pattern: &str,
        default_type: Option<T>,
        declared_types: Vec<T>,
        callback: F,
    ) -> Result<&mut Self, RegexError>
    where
        F: Fn(&mut LexerControl<T>, &mut MutableToken<T>) + 'static,
    {
        let (nfa, host_pattern) = crate::regex::compile_both(pattern)?;
        self.rules.push(TokenRule {
            nfa_template: nfa,
            host_pattern,
            declared_types,
            default_type,
            callback: Rc::new(callback) as Callback<T>,
        });
        Ok(self)
    }

    /// Characters dropped between tokens (default: space and tab).
    pub fn set_ignore<F: Fn(char) -> bool + 'static>(&mut self, predicate: F) -> &mut Self {
        self.ignore = Rc::new(predicate);
        self
    }

    pub fn build(self) -> Result<Lexer<T>, RegexError> {
        Ok(Lexer::new(Rc::new(self.rules), self.ignore))
    }
}
