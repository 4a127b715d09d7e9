use crate::error::{DuplicateProductionError, GrammarError, GrammarParseError};
use crate::grammar::production::{Production, ProductionCallback};
use crate::grammar::{Associativity, Grammar};
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// Parses a production string like `"expr <lhs> PLUS expr <rhs>"` into its
/// right-hand-side symbol names, each with an optional `<name>` slot label,
/// grounded on the named-slot disambiguation the library this crate grew out
/// of exposes through its `production` decorator's keyword arguments.
///
/// Whitespace-separated identifiers; a bare identifier may be followed
/// immediately (no space) by `<name>` to label that slot. Duplicate slot
/// names are rejected.
pub fn parse_production_string(spec: &str) -> Result<Vec<(String, Option<String>)>, GrammarParseError> {
    let mut symbols = Vec::new();
    let mut seen_names = HashSet::new();
    for word in spec.split_whitespace() {
        let (symbol, name) = match word.find('<') {
            Some(start) => {
                if !word.ends_with('>') {
                    return Err(GrammarParseError {
                        message: format!("malformed slot name in `{}`", word),
                    });
                }
                let symbol = word[..start].to_string();
                let name = word[start + 1..word.len() - 1].to_string();
                if symbol.is_empty() || name.is_empty() {
                    return Err(GrammarParseError {
                        message: format!("malformed slot name in `{}`", word),
                    });
                }
                (symbol, Some(name))
            }
            None => (word.to_string(), None),
        };
        if let Some(name) = &name {
            if !seen_names.insert(name.clone()) {
                return Err(GrammarParseError {
                    message: format!("duplicate slot name `{}`", name),
                });
            }
        }
        symbols.push((symbol, name));
    }
    Ok(symbols)
}

/// Accumulates productions and precedence blocks, then freezes into an
/// immutable [Grammar] via [GrammarBuilder::build], which runs the FIRST
/// fixed point once (mirroring `Grammar.prepare()` in the library this crate
/// was distilled from).
pub struct GrammarBuilder<S, R> {
    productions: Vec<Production<S, R>>,
    precedences: Vec<(Associativity, HashSet<S>)>,
    terminals: HashSet<S>,
    start_symbol: Option<S>,
}

impl<S: Clone + Eq + Hash, R> Default for GrammarBuilder<S, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Clone + Eq + Hash, R> GrammarBuilder<S, R> {
    pub fn new() -> Self {
        GrammarBuilder {
            productions: Vec::new(),
            precedences: Vec::new(),
            terminals: HashSet::new(),
            start_symbol: None,
        }
    }

    /// Declares the full terminal alphabet (typically a lexer's
    /// [crate::lexer::Lexer::token_types]), used to tell terminals apart
    /// from nonterminals when computing FIRST sets.
    pub fn set_terminals(&mut self, terminals: HashSet<S>) -> &mut Self {
        self.terminals = terminals;
        self
    }

    pub fn set_start(&mut self, symbol: S) -> &mut Self {
        self.start_symbol = Some(symbol);
        self
    }

    pub fn add_production(&mut self, lhs: S, rhs: Vec<S>, callback: ProductionCallback<R>) -> &mut Self {
        self.productions.push(Production::new(lhs, rhs, callback));
        self
    }

    pub fn add_production_with_priority(
        &mut self,
        lhs: S,
        rhs: Vec<S>,
        priority: S,
        callback: ProductionCallback<R>,
    ) -> &mut Self {
        self.productions
            .push(Production::new(lhs, rhs, callback).with_priority(priority));
        self
    }

    /// Registers a production from a `"lhs sym1 sym2<name>"`-style string,
    /// resolving each identifier to `S` through `symbol_of`.
    pub fn add_production_str<F>(
        &mut self,
        spec: &str,
        symbol_of: F,
        callback: ProductionCallback<R>,
    ) -> Result<&mut Self, GrammarParseError>
    where
        F: Fn(&str) -> S,
    {
        let mut parsed = parse_production_string(spec)?;
        if parsed.is_empty() {
            return Err(GrammarParseError {
                message: "empty production string".to_string(),
            });
        }
        let (lhs_name, _) = parsed.remove(0);
        let lhs = symbol_of(&lhs_name);
        let mut rhs = Vec::with_capacity(parsed.len());
        let mut production = Production::new(lhs, Vec::new(), callback);
        for (index, (symbol_name, slot_name)) in parsed.into_iter().enumerate() {
            rhs.push(symbol_of(&symbol_name));
            if let Some(name) = slot_name {
                production = production.with_slot_name(index, name);
            }
        }
        production.rhs = rhs;
        self.productions.push(production);
        Ok(self)
    }

    pub fn add_precedence(&mut self, associativity: Associativity, terminals: HashSet<S>) -> &mut Self {
        self.precedences.push((associativity, terminals));
        self
    }

    pub fn build(self) -> Result<Grammar<S, R>, GrammarError>
    where
        S: std::fmt::Debug,
    {
        let mut seen: HashSet<(S, Vec<S>)> = HashSet::new();
        for prod in &self.productions {
            let key = (prod.lhs.clone(), prod.rhs.clone());
            if !seen.insert(key) {
                return Err(GrammarError::DuplicateProduction(DuplicateProductionError {
                    lhs: format!("{:?}", prod.lhs),
                }));
            }
        }

        let start_symbol = match self.start_symbol {
            Some(s) => s,
            None => self
                .productions
                .first()
                .map(|p| p.lhs.clone())
                .ok_or_else(|| {
                    GrammarError::Parse(GrammarParseError {
                        message: "a grammar needs at least one production".to_string(),
                    })
                })?,
        };

        Ok(Grammar::new(
            self.productions,
            self.precedences,
            self.terminals,
            start_symbol,
        ))
    }
}
