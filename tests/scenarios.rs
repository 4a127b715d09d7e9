//! The six concrete input/output scenarios from spec.md §8, written out
//! verbatim, plus the universal properties (longest-match, re-feed
//! invariance, position monotonicity) they're meant to demonstrate.

use lexgram_core::grammar::GrammarBuilder;
use lexgram_core::lexer::{Consumer, LexerBuilder, TokenKind};
use std::collections::HashSet;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Tok {
    Eof,
    Int,
    Id,
    If,
    Num,
    String,
}
impl TokenKind for Tok {
    fn eof() -> Self {
        Tok::Eof
    }
}

/// Scenario 1: `INT = [0-9]+`, `ID = [a-zA-Z_]\w*`, ignore whitespace.
/// `"abc 42"` -> `ID("abc")`, `INT("42")`, sentinel.
#[test]
fn scenario_1_longest_match_with_ignored_whitespace() {
    let mut b = LexerBuilder::new();
    b.add_rule(r"[0-9]+", Tok::Int, |_, _| {}).unwrap();
    b.add_rule(r"[a-zA-Z_]\w*", Tok::Id, |_, _| {}).unwrap();
    let mut lexer = b.build().unwrap();

    let tokens = lexer.parse("abc 42").unwrap();
    assert_eq!(tokens[0].ty, Tok::Id);
    assert_eq!(tokens[0].value, "abc".chars().collect::<Vec<_>>());
    assert_eq!(tokens[1].ty, Tok::Int);
    assert_eq!(tokens[1].value, "42".chars().collect::<Vec<_>>());
    assert_eq!(tokens[2].ty, Tok::Eof);
    assert_eq!(tokens.len(), 3);
}

/// Scenario 2: `ID = [a-z]+`, `IF = "if"` registered *first*. Equal-length
/// matches tie-break to earlier registration; a longer match to `ID` still
/// wins when `IF` can't extend.
#[test]
fn scenario_2_registration_order_breaks_ties() {
    let build = || {
        let mut b = LexerBuilder::new();
        b.add_rule("if", Tok::If, |_, _| {}).unwrap();
        b.add_rule(r"[a-z]+", Tok::Id, |_, _| {}).unwrap();
        b.build().unwrap()
    };

    let mut lexer = build();
    let tokens = lexer.parse("if").unwrap();
    assert_eq!(tokens[0].ty, Tok::If);
    assert_eq!(tokens[0].value, "if".chars().collect::<Vec<_>>());

    let mut lexer = build();
    let tokens = lexer.parse("ifx").unwrap();
    assert_eq!(tokens[0].ty, Tok::Id);
    assert_eq!(tokens[0].value, "ifx".chars().collect::<Vec<_>>());
}

/// Scenario 3: `NUM = [0-9]+(\.[0-9]+)?`. `"1.2"` and `"12"` both match
/// whole; `"1."` dies mid-match and errors at the dot (column 2).
#[test]
fn scenario_3_optional_fractional_part() {
    let build = || {
        let mut b = LexerBuilder::new();
        b.add_rule(r"[0-9]+(\.[0-9]+){0,1}", Tok::Num, |_, _| {}).unwrap();
        b.build().unwrap()
    };

    let mut lexer = build();
    assert_eq!(
        lexer.parse("1.2").unwrap()[0].value,
        "1.2".chars().collect::<Vec<_>>()
    );

    let mut lexer = build();
    assert_eq!(
        lexer.parse("12").unwrap()[0].value,
        "12".chars().collect::<Vec<_>>()
    );

    let mut lexer = build();
    let err = lexer.parse("1.").unwrap_err();
    assert_eq!(err.character, '.');
    assert_eq!(err.position.column, 2);
}

/// A consumer that captures characters until an unescaped `"`, absorbing a
/// backslash-escaped quote as literal (not unescaping it).
struct StringConsumer {
    buf: Vec<char>,
    escaped: bool,
}
impl Consumer<Tok> for StringConsumer {
    fn feed(&mut self, ch: Option<char>) -> Option<(Tok, Vec<char>)> {
        match ch {
            None => Some((Tok::String, std::mem::take(&mut self.buf))),
            Some('"') if !self.escaped => Some((Tok::String, std::mem::take(&mut self.buf))),
            Some(c) => {
                self.buf.push(c);
                self.escaped = c == '\\' && !self.escaped;
                None
            }
        }
    }
}

/// Scenario 4: `STRING = "\""` whose callback installs a consumer that
/// captures characters until an unescaped `"`. Input `"a\"b"` (quote, a,
/// backslash, quote, b, quote) -> `STRING(a\"b)`.
#[test]
fn scenario_4_consumer_captures_escaped_quote() {
    let mut b = LexerBuilder::new();
    b.add_rule("\"", Tok::String, |ctl, _tok| {
        ctl.set_consumer(Box::new(StringConsumer {
            buf: Vec::new(),
            escaped: false,
        }));
    })
    .unwrap();
    let mut lexer = b.build().unwrap();

    let input = "\"a\\\"b\"";
    let tokens = lexer.parse(input).unwrap();
    assert_eq!(tokens[0].ty, Tok::String);
    assert_eq!(tokens[0].value, vec!['a', '\\', '"', 'b']);
    assert_eq!(tokens[1].ty, Tok::Eof);
}

/// A consumer that only ever closes on an unescaped `"`, never on `None`
/// (unlike [StringConsumer], which treats EOF as an implicit closing quote).
struct DanglingConsumer {
    buf: Vec<char>,
}
impl Consumer<Tok> for DanglingConsumer {
    fn feed(&mut self, ch: Option<char>) -> Option<(Tok, Vec<char>)> {
        match ch {
            Some('"') => Some((Tok::String, std::mem::take(&mut self.buf))),
            Some(c) => {
                self.buf.push(c);
                None
            }
            None => None,
        }
    }
}

/// A consumer still installed when EOF arrives, and that never closes on
/// `None`, leaves the stream with no final token at all — not even the
/// end-of-input sentinel: no fabricated value stands in for the string it
/// never finished capturing, and the lexer reports nothing rather than
/// inventing a close.
#[test]
fn eof_with_an_open_consumer_that_never_closes_emits_no_token_for_it() {
    let mut b = LexerBuilder::new();
    b.add_rule("\"", Tok::String, |ctl, _tok| {
        ctl.set_consumer(Box::new(DanglingConsumer { buf: Vec::new() }));
    })
    .unwrap();
    let mut lexer = b.build().unwrap();

    let tokens = lexer.parse("\"unterminated").unwrap();
    assert!(tokens.is_empty());
}

/// Scenario 5: `E -> E + T | T`, `T -> T * F | F`, `F -> ( E ) | id`.
/// `FIRST(E) = FIRST(T) = FIRST(F) = { '(', id }`.
#[test]
fn scenario_5_first_sets_of_classic_expression_grammar() {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Sym {
        E,
        T,
        F,
        Plus,
        Star,
        LParen,
        RParen,
        Id,
    }
    let mut b: GrammarBuilder<Sym, ()> = GrammarBuilder::new();
    let terminals: HashSet<Sym> = [Sym::Plus, Sym::Star, Sym::LParen, Sym::RParen, Sym::Id]
        .into_iter()
        .collect();
    b.set_terminals(terminals);
    b.set_start(Sym::E);
    b.add_production(Sym::E, vec![Sym::E, Sym::Plus, Sym::T], Rc::new(|_| ()));
    b.add_production(Sym::E, vec![Sym::T], Rc::new(|_| ()));
    b.add_production(Sym::T, vec![Sym::T, Sym::Star, Sym::F], Rc::new(|_| ()));
    b.add_production(Sym::T, vec![Sym::F], Rc::new(|_| ()));
    b.add_production(
        Sym::F,
        vec![Sym::LParen, Sym::E, Sym::RParen],
        Rc::new(|_| ()),
    );
    b.add_production(Sym::F, vec![Sym::Id], Rc::new(|_| ()));
    let grammar = b.build().unwrap();

    let expected: HashSet<Sym> = [Sym::LParen, Sym::Id].into_iter().collect();
    assert_eq!(grammar.first(&Sym::E), expected);
    assert_eq!(grammar.first(&Sym::T), expected);
    assert_eq!(grammar.first(&Sym::F), expected);
}

/// Scenario 6: `a{2,3}` accepts exactly `"aa"` and `"aaa"`; rejects `"a"`
/// and `"aaaa"`.
#[test]
fn scenario_6_bounded_exponent_range() {
    use lexgram_core::regex::compile;

    let mut nfa = compile("a{2,3}").unwrap();
    nfa.start();
    assert_eq!(nfa.feed('a'), Ok(false));
    assert_eq!(nfa.feed('a'), Ok(true));

    let mut nfa = compile("a{2,3}").unwrap();
    nfa.start();
    assert_eq!(nfa.feed('a'), Ok(false));
    assert_eq!(nfa.feed('a'), Ok(true));
    assert_eq!(nfa.feed('a'), Ok(true));

    let mut nfa = compile("a{2,3}").unwrap();
    nfa.start();
    assert_eq!(nfa.feed('a'), Ok(false));
    // only one character fed: not final, and not rejected either (still live)

    let mut nfa = compile("a{2,3}").unwrap();
    nfa.start();
    nfa.feed('a').unwrap();
    nfa.feed('a').unwrap();
    nfa.feed('a').unwrap();
    assert!(nfa.feed('a').is_err());
}

/// Re-feed invariance (spec.md §8): one-character-at-a-time feeding produces
/// the same token stream as the whole-string `parse` convenience call.
#[test]
fn refeed_invariance_char_by_char_matches_whole_string_parse() {
    let build = || {
        let mut b = LexerBuilder::new();
        b.add_rule(r"[0-9]+", Tok::Int, |_, _| {}).unwrap();
        b.add_rule(r"[a-zA-Z_]\w*", Tok::Id, |_, _| {}).unwrap();
        b.build().unwrap()
    };

    let mut whole = build();
    let whole_tokens = whole.parse("foo 123 bar_baz 0").unwrap();

    let mut piecewise = build();
    let mut piecewise_tokens = Vec::new();
    for ch in "foo 123 bar_baz 0".chars() {
        piecewise_tokens.extend(piecewise.feed(ch, None).unwrap());
    }
    piecewise_tokens.extend(piecewise.feed_eof().unwrap());

    assert_eq!(whole_tokens, piecewise_tokens);
}

/// Position monotonicity (spec.md §8): every token's start position is at or
/// after the position tokenization had reached before it began.
#[test]
fn position_is_monotonically_non_decreasing_across_tokens() {
    let mut b = LexerBuilder::new();
    b.add_rule(r"[0-9]+", Tok::Int, |_, _| {}).unwrap();
    b.add_rule(r"[a-zA-Z_]\w*", Tok::Id, |_, _| {}).unwrap();
    let mut lexer = b.build().unwrap();

    let mut last = (0usize, 1usize);
    for ch in "a1 b2\nc3".chars() {
        lexer.feed(ch, None).unwrap();
        let pos = lexer.position();
        assert!((pos.line, pos.column) >= last || pos.line > last.0);
        last = (pos.line, pos.column);
    }
}
