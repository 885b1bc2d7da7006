//! Runs the nullable, first and follow analyses over one grammar.
// This file is part of "nff", which is free software: you
// can redistribute it and/or modify it under the terms of the GNU General
// Public License version 3 as published by the Free Software Foundation. See
// <https://www.gnu.org/licenses/> for a copy.

use crate::first::calculate_first_set;
use crate::fixpoint::AnalysisError;
use crate::follow::calculate_follow_set;
use crate::grammar::{Grammar, Production};
use crate::nullable::calculate_null_set;
use crate::symbol::{PerSymbolSets, Symbol, SymbolSet};
use crate::table::{predict_set, ParseTable};

/// Nullable, first and follow sets of one grammar.
///
/// Owns its results; analysing another grammar never touches them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    nullable: SymbolSet,
    first: PerSymbolSets,
    follow: PerSymbolSets,
}

impl Analysis {
    /// Analyses a grammar that has already passed [`Grammar::validate`].
    pub fn new(grammar: &Grammar) -> Result<Self, AnalysisError> {
        let nullable = calculate_null_set(grammar)?;
        let first = calculate_first_set(grammar, &nullable)?;
        let follow = calculate_follow_set(grammar, &nullable, &first)?;
        info!(
            "Analysed {} productions: {} of {} nonterminals nullable",
            grammar.productions().len(),
            nullable.len(),
            grammar.alphabet().nonterminals().len()
        );
        Ok(Analysis {
            nullable,
            first,
            follow,
        })
    }

    /// Validates `grammar`, then analyses it.
    pub fn validated(grammar: &Grammar) -> Result<Self, crate::Error> {
        grammar.validate()?;
        Ok(Analysis::new(grammar)?)
    }

    pub fn nullable(&self) -> &SymbolSet {
        &self.nullable
    }

    pub fn is_nullable(&self, symbol: &Symbol) -> bool {
        self.nullable.contains(symbol)
    }

    pub fn first(&self) -> &PerSymbolSets {
        &self.first
    }

    pub fn follow(&self) -> &PerSymbolSets {
        &self.follow
    }

    /// The first set of a nonterminal, or `None` for anything else.
    pub fn first_of(&self, nonterminal: &Symbol) -> Option<&SymbolSet> {
        self.first.get(nonterminal)
    }

    /// The follow set of a nonterminal, or `None` for anything else.
    pub fn follow_of(&self, nonterminal: &Symbol) -> Option<&SymbolSet> {
        self.follow.get(nonterminal)
    }

    pub fn predict_set(&self, grammar: &Grammar, production: &Production) -> SymbolSet {
        predict_set(grammar, self, production)
    }

    pub fn parse_table(&self, grammar: &Grammar) -> ParseTable {
        ParseTable::build(grammar, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::GrammarError;
    use crate::symbol::Alphabet;

    #[test]
    fn validated_rejects_bad_grammars() {
        let grammar = Grammar::new(
            Alphabet::from_symbols(vec!["a"], vec!["S"]),
            vec![Production::new("S", vec!["b"])],
        );
        match Analysis::validated(&grammar) {
            Err(crate::Error::Grammar(GrammarError::UnknownSymbol { production, .. })) => {
                assert_eq!(production, 1)
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn lookups_cover_every_nonterminal() {
        let grammar = Grammar::new(
            Alphabet::from_symbols(vec!["a"], vec!["S", "U"]),
            vec![Production::new("S", vec!["a"])],
        );
        let analysis = Analysis::validated(&grammar).unwrap();
        assert!(analysis.first_of(&"U".into()).unwrap().is_empty());
        assert!(analysis.follow_of(&"U".into()).unwrap().is_empty());
        assert!(analysis.first_of(&"a".into()).is_none());
        assert!(!analysis.is_nullable(&"S".into()));
    }
}
