//! Predict sets and the LL(1) parse table.
// This file is part of "nff", which is free software: you
// can redistribute it and/or modify it under the terms of the GNU General
// Public License version 3 as published by the Free Software Foundation. See
// <https://www.gnu.org/licenses/> for a copy.

use std::fmt;

use hashbrown::HashMap;

use crate::analysis::Analysis;
use crate::fixpoint::union_into;
use crate::grammar::{Grammar, Production};
use crate::symbol::{Symbol, SymbolSet};

/// The lookahead terminals that select `production`.
///
/// FIRST of the body, plus FOLLOW of the head when the whole body can derive
/// the empty string.
pub fn predict_set(grammar: &Grammar, analysis: &Analysis, production: &Production) -> SymbolSet {
    let mut predict = SymbolSet::new();
    for symbol in production.symbols() {
        if grammar.is_terminal(symbol) {
            predict.insert(symbol.clone());
            return predict;
        }
        if let Some(first) = analysis.first_of(symbol) {
            union_into(&mut predict, first);
        }
        if !analysis.is_nullable(symbol) {
            return predict;
        }
    }
    if let Some(follow) = analysis.follow_of(&production.head) {
        union_into(&mut predict, follow);
    }
    predict
}

/// A table cell that selects more than one production.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ll1Conflict {
    pub nonterminal: Symbol,
    pub terminal: Symbol,
    /// 1-based production indices, in grammar order.
    pub productions: Vec<usize>,
}

impl fmt::Display for Ll1Conflict {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "conflict at ({}, {}): productions {}",
            self.nonterminal,
            self.terminal,
            join_indices(&self.productions)
        )
    }
}

/// Maps (nonterminal, lookahead terminal) to the productions to apply.
///
/// Cells are appended to, never overwritten, so a cell with more than one
/// production index marks an LL(1) conflict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTable {
    cells: HashMap<(Symbol, Symbol), Vec<usize>>,
    nonterminals: Vec<Symbol>,
    terminals: Vec<Symbol>,
}

impl ParseTable {
    pub fn build(grammar: &Grammar, analysis: &Analysis) -> Self {
        let mut cells: HashMap<(Symbol, Symbol), Vec<usize>> = HashMap::new();
        for (index, production) in grammar.indexed_productions() {
            let predict = predict_set(grammar, analysis, production);
            for terminal in predict {
                let cell = cells
                    .entry((production.head.clone(), terminal))
                    .or_default();
                cell.push(index);
                if cell.len() > 1 {
                    debug!("LL(1) conflict for {}: {:?}", production.head, cell);
                }
            }
        }
        ParseTable {
            cells,
            nonterminals: grammar.alphabet().nonterminals().to_vec(),
            terminals: grammar.alphabet().terminals().to_vec(),
        }
    }

    /// Production indices in the cell, empty if no production applies.
    pub fn get(&self, nonterminal: &Symbol, terminal: &Symbol) -> &[usize] {
        self.cells
            .get(&(nonterminal.clone(), terminal.clone()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Non-empty cells, row by row in declaration order.
    pub fn cells(&self) -> impl Iterator<Item = (&Symbol, &Symbol, &[usize])> + '_ {
        self.nonterminals.iter().flat_map(move |n| {
            self.terminals.iter().filter_map(move |t| {
                let cell = self.get(n, t);
                if cell.is_empty() {
                    None
                } else {
                    Some((n, t, cell))
                }
            })
        })
    }

    /// Every cell holding more than one production.
    pub fn conflicts(&self) -> Vec<Ll1Conflict> {
        self.cells()
            .filter(|(_, _, cell)| cell.len() > 1)
            .map(|(n, t, cell)| Ll1Conflict {
                nonterminal: n.clone(),
                terminal: t.clone(),
                productions: cell.to_vec(),
            })
            .collect()
    }

    /// True if no cell selects more than one production.
    pub fn is_ll1(&self) -> bool {
        self.cells.values().all(|cell| cell.len() <= 1)
    }

    /// Row labels, in declaration order.
    pub fn nonterminals(&self) -> &[Symbol] {
        &self.nonterminals
    }

    /// Column labels, in declaration order.
    pub fn terminals(&self) -> &[Symbol] {
        &self.terminals
    }
}

pub(crate) fn join_indices(indices: &[usize]) -> String {
    indices
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::Alphabet;

    fn dangling_else() -> Grammar {
        // S -> i S T | x ; T -> e S | ε
        Grammar::new(
            Alphabet::from_symbols(vec!["i", "e", "x"], vec!["S", "T"]),
            vec![
                Production::new("S", vec!["i", "S", "T"]),
                Production::new("S", vec!["x"]),
                Production::new("T", vec!["e", "S"]),
                Production::epsilon("T"),
            ],
        )
    }

    #[test]
    fn nullable_body_takes_follow() {
        let grammar = dangling_else();
        let analysis = Analysis::new(&grammar).unwrap();
        let predict = predict_set(&grammar, &analysis, &grammar.productions()[3]);
        assert!(predict.contains("e"));
        assert_eq!(predict.len(), 1);
    }

    #[test]
    fn conflicts_are_accumulated() {
        let grammar = dangling_else();
        let table = Analysis::new(&grammar).unwrap().parse_table(&grammar);
        assert!(!table.is_ll1());
        assert_eq!(table.get(&"T".into(), &"e".into()), &[3, 4]);
        assert_eq!(
            table.conflicts(),
            vec![Ll1Conflict {
                nonterminal: "T".into(),
                terminal: "e".into(),
                productions: vec![3, 4],
            }]
        );
        assert_eq!(
            table.conflicts()[0].to_string(),
            "conflict at (T, e): productions 3,4"
        );
    }

    #[test]
    fn empty_cells_select_nothing() {
        let grammar = dangling_else();
        let table = Analysis::new(&grammar).unwrap().parse_table(&grammar);
        assert!(table.get(&"S".into(), &"e".into()).is_empty());
        assert_eq!(table.get(&"S".into(), &"x".into()), &[2]);
        let cells: Vec<(String, String)> = table
            .cells()
            .map(|(n, t, _)| (n.to_string(), t.to_string()))
            .collect();
        assert_eq!(
            cells,
            vec![
                ("S".to_string(), "i".to_string()),
                ("S".to_string(), "x".to_string()),
                ("T".to_string(), "e".to_string()),
            ]
        );
    }
}
