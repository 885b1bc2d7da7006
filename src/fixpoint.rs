//! Repeat full passes over a grammar until no set grows.
// This file is part of "nff", which is free software: you
// can redistribute it and/or modify it under the terms of the GNU General
// Public License version 3 as published by the Free Software Foundation. See
// <https://www.gnu.org/licenses/> for a copy.

use std::fmt;

use crate::grammar::Grammar;
use crate::symbol::{PerSymbolSets, Symbol, SymbolSet};

/// The analysis a fixed-point loop belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Nullable,
    First,
    Follow,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Stage::Nullable => "nullable",
            Stage::First => "first",
            Stage::Follow => "follow",
        })
    }
}

/// A fixed-point loop ran past its pass limit.
///
/// Every set only grows and is bounded by the alphabet, so this points at a
/// bug rather than at a bad grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    NonTermination { stage: Stage, passes: usize },
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AnalysisError::NonTermination { stage, passes } => write!(
                f,
                "{} analysis did not converge after {} passes",
                stage, passes
            ),
        }
    }
}

impl std::error::Error for AnalysisError {}

/// Upper bound on the number of passes any analysis of `grammar` needs.
pub fn pass_limit(grammar: &Grammar) -> usize {
    (grammar.productions().len() + 1) * (grammar.alphabet().len() + 1) + 1
}

/// Calls `pass` until it reports no change, and returns how many passes ran.
///
/// `pass` does one full sweep over the productions and returns true if any
/// set grew during it.
pub fn solve<F>(grammar: &Grammar, stage: Stage, mut pass: F) -> Result<usize, AnalysisError>
where
    F: FnMut() -> bool,
{
    let limit = pass_limit(grammar);
    let mut passes = 0;
    let mut changed = true;
    while changed {
        if passes == limit {
            error!("{} analysis exceeded {} passes", stage, limit);
            return Err(AnalysisError::NonTermination { stage, passes });
        }
        changed = pass();
        passes += 1;
        trace!("{} pass {}: changed = {}", stage, passes, changed);
    }
    debug!("{} sets reached a fixed point after {} passes", stage, passes);
    Ok(passes)
}

/// Adds every symbol of `source` to `target`. Returns true if `target` grew.
pub fn union_into<'a, I>(target: &mut SymbolSet, source: I) -> bool
where
    I: IntoIterator<Item = &'a Symbol>,
{
    let before = target.len();
    target.extend(source.into_iter().cloned());
    target.len() != before
}

/// `sets[into] ∪= sets[from]`. Returns true if `sets[into]` grew.
pub fn union_entry(sets: &mut PerSymbolSets, into: &Symbol, from: &Symbol) -> bool {
    if into == from {
        return false;
    }
    let missing: Vec<Symbol> = match (sets.get(into), sets.get(from)) {
        (Some(target), Some(source)) => source.difference(target).cloned().collect(),
        _ => return false,
    };
    if missing.is_empty() {
        return false;
    }
    trace!("{} gains {:?} from {}", into, missing, from);
    sets.entry(into.clone()).or_default().extend(missing);
    true
}

/// One empty set per nonterminal of `grammar`.
pub fn empty_sets(grammar: &Grammar) -> PerSymbolSets {
    grammar
        .alphabet()
        .nonterminals()
        .iter()
        .map(|n| (n.clone(), SymbolSet::new()))
        .collect()
}
