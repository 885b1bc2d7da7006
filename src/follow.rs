//! FOLLOW sets.
// This file is part of "nff", which is free software: you
// can redistribute it and/or modify it under the terms of the GNU General
// Public License version 3 as published by the Free Software Foundation. See
// <https://www.gnu.org/licenses/> for a copy.

use crate::fixpoint::{empty_sets, solve, union_into, AnalysisError, Stage};
use crate::grammar::Grammar;
use crate::symbol::{PerSymbolSets, SymbolSet};

/// Determines the follow set of each nonterminal.
///
/// Reads the finished nullable and first sets. No end-of-input marker is
/// added for any start symbol.
pub fn calculate_follow_set(
    grammar: &Grammar,
    nullable: &SymbolSet,
    first: &PerSymbolSets,
) -> Result<PerSymbolSets, AnalysisError> {
    let mut follow = empty_sets(grammar);
    solve(grammar, Stage::Follow, || {
        follow_pass(grammar, nullable, first, &mut follow)
    })?;
    Ok(follow)
}

/// One sweep over every production. Returns true if any follow set grew.
///
/// Each body is walked right to left with a trailer holding what may follow
/// the current position. It starts as the head's follow set, collapses to a
/// single terminal when one is passed, and picks up the first set of every
/// nonterminal passed.
pub fn follow_pass(
    grammar: &Grammar,
    nullable: &SymbolSet,
    first: &PerSymbolSets,
    follow: &mut PerSymbolSets,
) -> bool {
    let mut changed = false;
    for production in grammar.productions() {
        let mut trailer = follow
            .get(&production.head)
            .cloned()
            .unwrap_or_default();
        for symbol in production.symbols().iter().rev() {
            if grammar.is_terminal(symbol) {
                trailer.clear();
                trailer.insert(symbol.clone());
                continue;
            }
            let follow_set = follow.entry(symbol.clone()).or_default();
            if union_into(follow_set, &trailer) {
                trace!("{} follow grows to {:?} via `{}`", symbol, follow_set, production);
                changed = true;
            }
            if !nullable.contains(symbol) {
                trailer.clear();
            }
            if let Some(first_set) = first.get(symbol) {
                union_into(&mut trailer, first_set);
            }
        }
    }
    changed
}
