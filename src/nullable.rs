//! Which nonterminals derive the empty string.
// This file is part of "nff", which is free software: you
// can redistribute it and/or modify it under the terms of the GNU General
// Public License version 3 as published by the Free Software Foundation. See
// <https://www.gnu.org/licenses/> for a copy.

use crate::fixpoint::{solve, AnalysisError, Stage};
use crate::grammar::Grammar;
use crate::symbol::SymbolSet;

/// Determines which nonterminals are nullable.
pub fn calculate_null_set(grammar: &Grammar) -> Result<SymbolSet, AnalysisError> {
    let mut nullable = SymbolSet::new();
    solve(grammar, Stage::Nullable, || null_pass(grammar, &mut nullable))?;
    Ok(nullable)
}

/// One sweep over every production. Returns true if a head became nullable.
///
/// A head is nullable through a production whose body is `ε`, or whose
/// symbols are all nonterminals already known to be nullable. Terminals are
/// never nullable.
pub fn null_pass(grammar: &Grammar, nullable: &mut SymbolSet) -> bool {
    let mut changed = false;
    for production in grammar.productions() {
        if nullable.contains(&production.head) {
            continue;
        }
        let derives_empty = production
            .symbols()
            .iter()
            .all(|symbol| grammar.is_nonterminal(symbol) && nullable.contains(symbol));
        if derives_empty {
            trace!("{} is nullable through `{}`", production.head, production);
            nullable.insert(production.head.clone());
            changed = true;
        }
    }
    changed
}
