//! `lexgram-core` is the embeddable core of a parser toolkit: given
//! declarative token and grammar definitions, it produces a working lexer
//! and the grammar analysis an LR(1)-style table constructor needs. It is
//! meant to be linked into a host program that drives an input stream; it is
//! not a batch compiler or a standalone parser runtime.
//!
//! # Design
//!
//! Three tightly coupled subsystems make up the crate:
//!
//! - [`regex`] and [`nfa`]: a small regular-expression engine compiled to a
//!   non-deterministic finite automaton, fed one character at a time so
//!   tokenization can be driven from an asynchronous input source. No
//!   capture groups, lookaround, or anchors — just the alternation,
//!   concatenation, Kleene star/plus and bounded-exponent operators a lexer
//!   actually needs (see [`regex::parser`] for the accepted grammar).
//! - [`lexer`]: a progressive, longest-match tokenizer that runs every
//!   registered rule's NFA in lock-step over the input, emitting a token
//!   once every live rule has died or reached a dead end. A user-installed
//!   [`lexer::Consumer`] is the escape hatch for tokens — quoted strings,
//!   nested comments — that are awkward to express as a regular expression.
//! - [`grammar`]: productions, operator-precedence declarations and the
//!   classical FIRST-set fixed point an external LR table constructor
//!   queries. This crate only computes the grammar's static properties; it
//!   does not build parse tables or run a parser.
//!
//! What's deliberately left to the host: the LR(1)/LALR table constructor
//! and its runtime, an asynchronous I/O driver, and a declarative
//! registration surface (e.g. attribute macros) on top of the
//! [`lexer::LexerBuilder`] / [`grammar::GrammarBuilder`] pair this crate
//! exposes.
//!
//! # Example
//!
//! Building a lexer and a grammar for a tiny arithmetic language:
//!
//! ```
//! use lexgram_core::grammar::{Associativity, GrammarBuilder};
//! use lexgram_core::lexer::{LexerBuilder, TokenKind};
//! use std::collections::HashSet;
//! use std::rc::Rc;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Tok {
//!     Eof,
//!     Num,
//!     Plus,
//!     Star,
//!     LParen,
//!     RParen,
//! }
//! impl TokenKind for Tok {
//!     fn eof() -> Self {
//!         Tok::Eof
//!     }
//! }
//!
//! // # Lexer
//! let mut lexer_builder = LexerBuilder::new();
//! lexer_builder
//!     .add_rule(r"[0-9]+", Tok::Num, |_, _| {})
//!     .unwrap()
//!     .add_rule(r"\+", Tok::Plus, |_, _| {})
//!     .unwrap()
//!     .add_rule(r"\*", Tok::Star, |_, _| {})
//!     .unwrap()
//!     .add_rule(r"\(", Tok::LParen, |_, _| {})
//!     .unwrap()
//!     .add_rule(r"\)", Tok::RParen, |_, _| {})
//!     .unwrap();
//! let mut lexer = lexer_builder.build().unwrap();
//! let tokens = lexer.parse("12 + 3 * (4)").unwrap();
//! assert_eq!(tokens.last().unwrap().ty, Tok::Eof);
//!
//! // # Grammar
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Sym {
//!     E,
//!     T,
//!     F,
//!     Num,
//!     Plus,
//!     Star,
//!     LParen,
//!     RParen,
//!     Eof,
//! }
//! let mut grammar_builder: GrammarBuilder<Sym, ()> = GrammarBuilder::new();
//! let terminals: HashSet<Sym> =
//!     [Sym::Num, Sym::Plus, Sym::Star, Sym::LParen, Sym::RParen, Sym::Eof]
//!         .into_iter()
//!         .collect();
//! grammar_builder.set_terminals(terminals);
//! grammar_builder.set_start(Sym::E);
//! grammar_builder.add_precedence(Associativity::Left, [Sym::Plus].into_iter().collect());
//! grammar_builder.add_precedence(Associativity::Left, [Sym::Star].into_iter().collect());
//! grammar_builder.add_production(Sym::E, vec![Sym::E, Sym::Plus, Sym::T], Rc::new(|_| ()));
//! grammar_builder.add_production(Sym::E, vec![Sym::T], Rc::new(|_| ()));
//! grammar_builder.add_production(Sym::T, vec![Sym::T, Sym::Star, Sym::F], Rc::new(|_| ()));
//! grammar_builder.add_production(Sym::T, vec![Sym::F], Rc::new(|_| ()));
//! grammar_builder.add_production(
//!     Sym::F,
//!     vec![Sym::LParen, Sym::E, Sym::RParen],
//!     Rc::new(|_| ()),
//! );
//! grammar_builder.add_production(Sym::F, vec![Sym::Num], Rc::new(|_| ()));
//! let grammar = grammar_builder.build().unwrap();
//! assert_eq!(
//!     grammar.first(&Sym::E),
//!     [Sym::LParen, Sym::Num].into_iter().collect()
//! );
//! ```
//!
//! # License
//! Provided under the MIT license. See [LICENSE](https://github.com/creative-forest/lexgram-core/blob/main/LICENSE).

pub mod char_class;
pub mod error;
pub mod grammar;
pub mod lexer;
pub mod nfa;
pub mod regex;
pub mod util;
