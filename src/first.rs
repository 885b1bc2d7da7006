//! FIRST sets.
// This file is part of "nff", which is free software: you
// can redistribute it and/or modify it under the terms of the GNU General
// Public License version 3 as published by the Free Software Foundation. See
// <https://www.gnu.org/licenses/> for a copy.

use crate::fixpoint::{empty_sets, solve, union_entry, AnalysisError, Stage};
use crate::grammar::Grammar;
use crate::symbol::{PerSymbolSets, SymbolSet};

/// Determines the first set of each nonterminal.
///
/// `nullable` must be the finished result of
/// [`calculate_null_set`](crate::nullable::calculate_null_set).
pub fn calculate_first_set(
    grammar: &Grammar,
    nullable: &SymbolSet,
) -> Result<PerSymbolSets, AnalysisError> {
    let mut first = empty_sets(grammar);
    solve(grammar, Stage::First, || first_pass(grammar, nullable, &mut first))?;
    Ok(first)
}

/// One sweep over every production. Returns true if any first set grew.
pub fn first_pass(grammar: &Grammar, nullable: &SymbolSet, first: &mut PerSymbolSets) -> bool {
    let mut changed = false;
    for production in grammar.productions() {
        let head = &production.head;
        for symbol in production.symbols() {
            if grammar.is_terminal(symbol) {
                // a terminal ends the scan
                if first.entry(head.clone()).or_default().insert(symbol.clone()) {
                    trace!("{} gains {}", head, symbol);
                    changed = true;
                }
                break;
            }
            changed |= union_entry(first, head, symbol);
            if !nullable.contains(symbol) {
                break;
            }
        }
    }
    changed
}
