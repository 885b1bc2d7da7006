//! Grammar symbols and the alphabet they are drawn from.
// This file is part of "nff", which is free software: you
// can redistribute it and/or modify it under the terms of the GNU General
// Public License version 3 as published by the Free Software Foundation. See
// <https://www.gnu.org/licenses/> for a copy.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use hashbrown::{HashMap, HashSet};

/// Name of the reserved symbol that marks an empty production body.
pub const EPSILON: &str = "ε";

/// A set of symbols, used for nullable, first, follow and predict sets.
pub type SymbolSet = HashSet<Symbol>;

/// One symbol set per nonterminal.
pub type PerSymbolSets = HashMap<Symbol, SymbolSet>;

/// A terminal or nonterminal name.
///
/// Symbols are cheap to clone and compare by name, so multi-character names
/// like `expr` or `IDENT` work the same as single characters.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(Arc<str>);

impl Symbol {
    pub fn new(name: &str) -> Self {
        Symbol(Arc::from(name))
    }

    /// The empty-string marker. It never belongs to an alphabet.
    pub fn epsilon() -> Self {
        Symbol::new(EPSILON)
    }

    pub fn is_epsilon(&self) -> bool {
        &*self.0 == EPSILON
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Symbol::new(name)
    }
}

impl From<String> for Symbol {
    fn from(name: String) -> Self {
        Symbol(Arc::from(name))
    }
}

impl Borrow<str> for Symbol {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", &*self.0)
    }
}

/// The terminal and nonterminal symbols of a grammar.
///
/// Keeps one hash set per kind for membership checks and one list per kind
/// that remembers declaration order, so that printed output is stable.
#[derive(Debug, Clone, Default)]
pub struct Alphabet {
    terminals: Vec<Symbol>,
    nonterminals: Vec<Symbol>,
    terminal_set: SymbolSet,
    nonterminal_set: SymbolSet,
}

impl Alphabet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an alphabet from two lists of names.
    pub fn from_symbols<T, N>(terminals: T, nonterminals: N) -> Self
    where
        T: IntoIterator,
        T::Item: Into<Symbol>,
        N: IntoIterator,
        N::Item: Into<Symbol>,
    {
        let mut alphabet = Alphabet::new();
        for t in terminals {
            alphabet.add_terminal(t);
        }
        for n in nonterminals {
            alphabet.add_nonterminal(n);
        }
        alphabet
    }

    /// Declares a terminal. Returns false if it was already declared as one.
    pub fn add_terminal(&mut self, symbol: impl Into<Symbol>) -> bool {
        let symbol = symbol.into();
        if self.terminal_set.insert(symbol.clone()) {
            self.terminals.push(symbol);
            true
        } else {
            false
        }
    }

    /// Declares a nonterminal. Returns false if it was already declared as one.
    pub fn add_nonterminal(&mut self, symbol: impl Into<Symbol>) -> bool {
        let symbol = symbol.into();
        if self.nonterminal_set.insert(symbol.clone()) {
            self.nonterminals.push(symbol);
            true
        } else {
            false
        }
    }

    pub fn is_terminal(&self, symbol: &Symbol) -> bool {
        self.terminal_set.contains(symbol)
    }

    pub fn is_nonterminal(&self, symbol: &Symbol) -> bool {
        self.nonterminal_set.contains(symbol)
    }

    /// True if `name` is declared as either kind of symbol.
    pub fn contains(&self, name: &str) -> bool {
        self.terminal_set.contains(name) || self.nonterminal_set.contains(name)
    }

    /// Terminals in declaration order.
    pub fn terminals(&self) -> &[Symbol] {
        &self.terminals
    }

    /// Nonterminals in declaration order.
    pub fn nonterminals(&self) -> &[Symbol] {
        &self.nonterminals
    }

    /// Number of declared symbols of both kinds.
    pub fn len(&self) -> usize {
        self.terminals.len() + self.nonterminals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Sorts `set` by the position of each symbol in `order`.
///
/// Symbols missing from `order` go last, sorted by name.
pub fn in_order<'a>(set: &'a SymbolSet, order: &[Symbol]) -> Vec<&'a Symbol> {
    let mut symbols: Vec<&Symbol> = set.iter().collect();
    symbols.sort_by_key(|s| (order.iter().position(|o| o == *s).unwrap_or(order.len()), *s));
    symbols
}

#[cfg(test)]
mod tests {
    use super::*;

    fn syms(names: &[&str]) -> Vec<Symbol> {
        names.iter().map(|&n| Symbol::new(n)).collect()
    }

    #[test]
    fn symbols_compare_by_name() {
        assert_eq!(Symbol::new("expr"), Symbol::from(String::from("expr")));
        assert_ne!(Symbol::new("expr"), Symbol::new("Expr"));
        assert!(Symbol::epsilon().is_epsilon());
        assert!(!Symbol::new("e").is_epsilon());
    }

    #[test]
    fn sets_can_be_queried_by_str() {
        let mut set = SymbolSet::new();
        set.insert(Symbol::new("id"));
        assert!(set.contains("id"));
        assert!(!set.contains("num"));
    }

    #[test]
    fn alphabet_keeps_declaration_order() {
        let mut alphabet = Alphabet::from_symbols(vec!["+", "i"], vec!["E", "T"]);
        assert!(!alphabet.add_terminal("+"));
        assert!(alphabet.add_terminal("("));
        assert_eq!(alphabet.terminals(), &syms(&["+", "i", "("])[..]);
        assert_eq!(alphabet.nonterminals(), &syms(&["E", "T"])[..]);
        assert!(alphabet.is_terminal(&"i".into()));
        assert!(alphabet.is_nonterminal(&"T".into()));
        assert!(!alphabet.is_terminal(&"T".into()));
        assert!(alphabet.contains("E"));
        assert_eq!(alphabet.len(), 5);
    }

    #[test]
    fn in_order_follows_declarations() {
        let order = syms(&["c", "a", "b"]);
        let set: SymbolSet = syms(&["b", "z", "c"]).into_iter().collect();
        let names: Vec<&str> = in_order(&set, &order).into_iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["c", "b", "z"]);
    }
}
