//! Grammar model (§4.E): productions, operator-precedence declarations and
//! the memoized FIRST fixed point the external LR table constructor queries.

pub mod builder;
pub mod production;

pub use builder::GrammarBuilder;
pub use production::{Production, ProductionCallback};

use crate::util::Log;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Associativity of one precedence block (spec.md §4.E). Declaration order of
/// blocks is significant: a later block binds tighter than an earlier one.
pub enum Associativity {
    Left,
    Right,
    NonAssoc,
}

/// Holds productions, precedence blocks, the start symbol and the memoized
/// FIRST table computed once at [GrammarBuilder::build] time.
///
/// `S` is the symbol alphabet (terminal and nonterminal token type, typically
/// the same `T` a [crate::lexer::Lexer] emits); `R` is the reduction result
/// type a [Production]'s callback produces.
pub struct Grammar<S, R> {
    productions: Vec<Production<S, R>>,
    precedences: Vec<(Associativity, HashSet<S>)>,
    terminals: HashSet<S>,
    nonterminals: HashSet<S>,
    start_symbol: S,
    first_table: HashMap<S, HashSet<S>>,
    nullable: HashSet<S>,
    sequence_first_cache: RefCell<HashMap<Vec<S>, (HashSet<S>, bool)>>,
    log: Log<&'static str>,
}

impl<S: Clone + Eq + Hash + Debug, R> Grammar<S, R> {
    pub(crate) fn new(
        productions: Vec<Production<S, R>>,
        precedences: Vec<(Associativity, HashSet<S>)>,
        terminals: HashSet<S>,
        start_symbol: S,
    ) -> Self {
        let mut nonterminals: HashSet<S> = HashSet::new();
        for prod in &productions {
            nonterminals.insert(prod.lhs.clone());
        }
        for prod in &productions {
            for sym in &prod.rhs {
                if !terminals.contains(sym) {
                    nonterminals.insert(sym.clone());
                }
            }
        }

        let (first_table, nullable) =
            Self::compute_first_fixed_point(&productions, &terminals, &nonterminals, Log::None);

        Grammar {
            productions,
            precedences,
            terminals,
            nonterminals,
            start_symbol,
            first_table,
            nullable,
            sequence_first_cache: RefCell::new(HashMap::new()),
            log: Log::None,
        }
    }

    pub fn set_log(&mut self, log: Log<&'static str>) {
        self.log = log;
    }

    /// Standard worst-case-quadratic fixed point (spec.md §4.E): iterate
    /// every production until no `FIRST` set or nullability flag grows.
    fn compute_first_fixed_point(
        productions: &[Production<S, R>],
        terminals: &HashSet<S>,
        nonterminals: &HashSet<S>,
        log: Log<&'static str>,
    ) -> (HashMap<S, HashSet<S>>, HashSet<S>) {
        let mut first_table: HashMap<S, HashSet<S>> =
            nonterminals.iter().map(|nt| (nt.clone(), HashSet::new())).collect();
        let mut nullable: HashSet<S> = HashSet::new();

        let mut pass = 0usize;
        loop {
            pass += 1;
            let mut changed = false;
            for prod in productions {
                let lhs = &prod.lhs;
                if prod.rhs.is_empty() {
                    if nullable.insert(lhs.clone()) {
                        changed = true;
                    }
                    continue;
                }
                let mut prefix_nullable = true;
                for x in &prod.rhs {
                    let x_first: HashSet<S> = if terminals.contains(x) {
                        std::iter::once(x.clone()).collect()
                    } else {
                        first_table.get(x).cloned().unwrap_or_default()
                    };
                    let entry = first_table.entry(lhs.clone()).or_default();
                    let before = entry.len();
                    entry.extend(x_first);
                    if entry.len() != before {
                        changed = true;
                    }
                    let x_nullable = !terminals.contains(x) && nullable.contains(x);
                    if !x_nullable {
                        prefix_nullable = false;
                        break;
                    }
                }
                if prefix_nullable && nullable.insert(lhs.clone()) {
                    changed = true;
                }
            }
            #[cfg(debug_assertions)]
            if log.order() >= Log::Verbose(()).order() {
                println!("[{}]: FIRST fixed-point pass {}, changed={}", log, pass, changed);
            }
            let _ = pass;
            if !changed {
                break;
            }
        }
        (first_table, nullable)
    }

    pub fn productions(&self) -> &[Production<S, R>] {
        &self.productions
    }

    pub fn precedences(&self) -> &[(Associativity, HashSet<S>)] {
        &self.precedences
    }

    pub fn terminals(&self) -> &HashSet<S> {
        &self.terminals
    }

    pub fn nonterminals(&self) -> &HashSet<S> {
        &self.nonterminals
    }

    pub fn start_symbol(&self) -> &S {
        &self.start_symbol
    }

    pub fn is_terminal(&self, symbol: &S) -> bool {
        self.terminals.contains(symbol)
    }

    pub fn is_nullable(&self, symbol: &S) -> bool {
        if self.terminals.contains(symbol) {
            false
        } else {
            self.nullable.contains(symbol)
        }
    }

    /// `FIRST(symbol)`: a singleton for a terminal, the memoized fixed-point
    /// result for a nonterminal.
    pub fn first(&self, symbol: &S) -> HashSet<S> {
        if self.terminals.contains(symbol) {
            std::iter::once(symbol.clone()).collect()
        } else {
            self.first_table.get(symbol).cloned().unwrap_or_default()
        }
    }

    /// `FIRST` over a sequence of symbols: the usual generalization — accumulate
    /// `FIRST(X1)`, and keep consuming symbols while every one seen so far is
    /// nullable. Returns `(members, sequence_is_nullable)`. Memoized per
    /// distinct sequence queried, since the same slice of a production's rhs
    /// may be asked about repeatedly by the external LR table constructor.
    pub fn first_of_sequence(&self, symbols: &[S]) -> (HashSet<S>, bool) {
        if let Some(cached) = self.sequence_first_cache.borrow().get(symbols) {
            return cached.clone();
        }
        let mut result = HashSet::new();
        let mut nullable = true;
        for sym in symbols {
            result.extend(self.first(sym));
            if !self.is_nullable(sym) {
                nullable = false;
                break;
            }
        }
        if symbols.is_empty() {
            nullable = true;
        }
        self.sequence_first_cache
            .borrow_mut()
            .insert(symbols.to_vec(), (result.clone(), nullable));
        (result, nullable)
    }

    /// The precedence level of `symbol`, i.e. its index among declared
    /// precedence blocks (higher index binds tighter). `None` if `symbol`
    /// appears in no block.
    pub fn terminal_precedence(&self, symbol: &S) -> Option<usize> {
        self.precedences
            .iter()
            .position(|(_, terminals)| terminals.contains(symbol))
    }

    /// A production's precedence: its declared `priority` symbol if any,
    /// otherwise the precedence of its rightmost terminal, otherwise `None`
    /// (spec.md §4.E).
    pub fn production_precedence(&self, production: &Production<S, R>) -> Option<usize>
    where
        S: std::hash::Hash,
    {
        if let Some(priority) = &production.priority {
            return self.terminal_precedence(priority);
        }
        production
            .rightmost_terminal(&self.terminals)
            .and_then(|t| self.terminal_precedence(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

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
        Eof,
    }

    fn noop_callback() -> ProductionCallback<()> {
        Rc::new(|_| ())
    }

    fn arithmetic_grammar() -> Grammar<Sym, ()> {
        let mut b: GrammarBuilder<Sym, ()> = GrammarBuilder::new();
        let mut terminals = HashSet::new();
        for t in [Sym::Plus, Sym::Star, Sym::LParen, Sym::RParen, Sym::Id, Sym::Eof] {
            terminals.insert(t);
        }
        b.set_terminals(terminals);
        b.set_start(Sym::E);
        b.add_production(Sym::E, vec![Sym::E, Sym::Plus, Sym::T], noop_callback());
        b.add_production(Sym::E, vec![Sym::T], noop_callback());
        b.add_production(Sym::T, vec![Sym::T, Sym::Star, Sym::F], noop_callback());
        b.add_production(Sym::T, vec![Sym::F], noop_callback());
        b.add_production(
            Sym::F,
            vec![Sym::LParen, Sym::E, Sym::RParen],
            noop_callback(),
        );
        b.add_production(Sym::F, vec![Sym::Id], noop_callback());
        b.build().unwrap()
    }

    #[test]
    fn first_sets_match_the_classic_expression_grammar() {
        let g = arithmetic_grammar();
        let expected: HashSet<Sym> = [Sym::LParen, Sym::Id].into_iter().collect();
        assert_eq!(g.first(&Sym::E), expected);
        assert_eq!(g.first(&Sym::T), expected);
        assert_eq!(g.first(&Sym::F), expected);
    }

    #[test]
    fn first_of_terminal_is_itself() {
        let g = arithmetic_grammar();
        assert_eq!(g.first(&Sym::Plus), [Sym::Plus].into_iter().collect());
    }

    #[test]
    fn recomputing_first_is_idempotent() {
        let g = arithmetic_grammar();
        let first_pass = g.first(&Sym::E);
        let second_pass = g.first(&Sym::E);
        assert_eq!(first_pass, second_pass);
    }

    #[test]
    fn nonterminals_are_every_lhs() {
        let g = arithmetic_grammar();
        assert!(g.nonterminals().contains(&Sym::E));
        assert!(g.nonterminals().contains(&Sym::T));
        assert!(g.nonterminals().contains(&Sym::F));
        assert!(!g.nonterminals().contains(&Sym::Plus));
    }

    #[test]
    fn duplicate_production_is_rejected() {
        let mut b: GrammarBuilder<Sym, ()> = GrammarBuilder::new();
        b.add_production(Sym::E, vec![Sym::T], noop_callback());
        b.add_production(Sym::E, vec![Sym::T], noop_callback());
        assert!(b.build().is_err());
    }

    #[test]
    fn empty_rhs_production_makes_its_lhs_nullable() {
        let mut b: GrammarBuilder<Sym, ()> = GrammarBuilder::new();
        let mut terminals = HashSet::new();
        terminals.insert(Sym::Id);
        b.set_terminals(terminals);
        b.add_production(Sym::E, vec![Sym::Id], noop_callback());
        b.add_production(Sym::T, vec![], noop_callback());
        let g = b.build().unwrap();
        assert!(g.is_nullable(&Sym::T));
        assert!(!g.is_nullable(&Sym::E));
    }

    #[test]
    fn precedence_block_index_is_the_level() {
        let mut b: GrammarBuilder<Sym, ()> = GrammarBuilder::new();
        b.add_production(Sym::E, vec![Sym::Id], noop_callback());
        b.add_precedence(Associativity::Left, [Sym::Plus].into_iter().collect());
        b.add_precedence(Associativity::Left, [Sym::Star].into_iter().collect());
        let g = b.build().unwrap();
        assert_eq!(g.terminal_precedence(&Sym::Plus), Some(0));
        assert_eq!(g.terminal_precedence(&Sym::Star), Some(1));
    }

    #[test]
    fn production_precedence_falls_back_to_rightmost_terminal() {
        let mut b: GrammarBuilder<Sym, ()> = GrammarBuilder::new();
        b.add_production(Sym::E, vec![Sym::E, Sym::Plus, Sym::T], noop_callback());
        b.add_precedence(Associativity::Left, [Sym::Plus].into_iter().collect());
        b.add_precedence(Associativity::Left, [Sym::Star].into_iter().collect());
        let g = b.build().unwrap();
        let prod = &g.productions()[0];
        assert_eq!(g.production_precedence(prod), Some(0));
    }
}
