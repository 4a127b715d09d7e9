use crate::lexer::TokenKind;

/// The escape hatch a rule callback can install to take over raw character
/// feeding for tokens no regex can describe (e.g. a quoted string with a
/// language-specific escape grammar). Once installed, every subsequent
/// [crate::lexer::Lexer::feed]/[crate::lexer::Lexer::feed_eof] call routes
/// its character straight to [Consumer::feed] instead of the NFA rules,
/// until the consumer returns `Some` and hands control back.
pub trait Consumer<T: TokenKind> {
    /// `ch = None` signals end of input. Returning `Some((ty, value))`
    /// finalizes a token and uninstalls the consumer.
    fn feed(&mut self, ch: Option<char>) -> Option<(T, Vec<char>)>;
}
