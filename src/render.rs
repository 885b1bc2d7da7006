//! Text output for grammars, analysis results and parse tables.
// This file is part of "nff", which is free software: you
// can redistribute it and/or modify it under the terms of the GNU General
// Public License version 3 as published by the Free Software Foundation. See
// <https://www.gnu.org/licenses/> for a copy.

use std::io::{self, Write};

use crate::analysis::Analysis;
use crate::grammar::Grammar;
use crate::symbol::{in_order, PerSymbolSets, Symbol, SymbolSet};
use crate::table::{join_indices, ParseTable};

/// Formats a set as `{a, b}` in declaration order.
pub fn format_set(set: &SymbolSet, order: &[Symbol]) -> String {
    let names: Vec<&str> = in_order(set, order).into_iter().map(Symbol::name).collect();
    format!("{{{}}}", names.join(", "))
}

/// Emit the numbered production listing, `index: production`.
pub fn write_productions(out: &mut impl Write, grammar: &Grammar) -> io::Result<()> {
    writeln!(out, "Productions:")?;
    for (index, production) in grammar.indexed_productions() {
        writeln!(out, "{:>4}: {}", index, production)?;
    }
    Ok(())
}

/// Emit the nullable set followed by the first and follow sets.
pub fn write_sets(out: &mut impl Write, grammar: &Grammar, analysis: &Analysis) -> io::Result<()> {
    let nonterminals = grammar.alphabet().nonterminals();
    writeln!(out, "Nullable: {}", format_set(analysis.nullable(), nonterminals))?;
    write_per_symbol(out, "First", grammar, analysis.first())?;
    write_per_symbol(out, "Follow", grammar, analysis.follow())
}

fn write_per_symbol(
    out: &mut impl Write,
    title: &str,
    grammar: &Grammar,
    sets: &PerSymbolSets,
) -> io::Result<()> {
    writeln!(out, "{}:", title)?;
    let empty = SymbolSet::new();
    for nonterminal in grammar.alphabet().nonterminals() {
        let set = sets.get(nonterminal).unwrap_or(&empty);
        writeln!(
            out,
            "    {}: {}",
            nonterminal,
            format_set(set, grammar.alphabet().terminals())
        )?;
    }
    Ok(())
}

/// Emit the predict set of every production.
pub fn write_predict_sets(
    out: &mut impl Write,
    grammar: &Grammar,
    analysis: &Analysis,
) -> io::Result<()> {
    writeln!(out, "Predict:")?;
    for (index, production) in grammar.indexed_productions() {
        let predict = analysis.predict_set(grammar, production);
        writeln!(
            out,
            "{:>4}: {}",
            index,
            format_set(&predict, grammar.alphabet().terminals())
        )?;
    }
    Ok(())
}

/// Emit the parse table as a grid, one row per nonterminal.
pub fn write_table(out: &mut impl Write, table: &ParseTable) -> io::Result<()> {
    let rows: Vec<Vec<String>> = table
        .nonterminals()
        .iter()
        .map(|n| {
            table
                .terminals()
                .iter()
                .map(|t| join_indices(table.get(n, t)))
                .collect()
        })
        .collect();

    let label_width = table
        .nonterminals()
        .iter()
        .map(|n| n.name().chars().count())
        .max()
        .unwrap_or(0);
    let widths: Vec<usize> = table
        .terminals()
        .iter()
        .enumerate()
        .map(|(column, t)| {
            rows.iter()
                .map(|row| row[column].len())
                .chain(Some(t.name().chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    writeln!(out, "Table:")?;
    write!(out, "{:w$}", "", w = label_width)?;
    for (t, w) in table.terminals().iter().zip(&widths) {
        write!(out, " | {:^w$}", t.name(), w = *w)?;
    }
    writeln!(out)?;
    for (n, row) in table.nonterminals().iter().zip(&rows) {
        write!(out, "{:w$}", n.name(), w = label_width)?;
        for (cell, w) in row.iter().zip(&widths) {
            write!(out, " | {:^w$}", cell, w = *w)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Emit the conflicting cells. Returns how many there were.
pub fn write_conflicts(
    out: &mut impl Write,
    grammar: &Grammar,
    table: &ParseTable,
) -> io::Result<usize> {
    let conflicts = table.conflicts();
    if conflicts.is_empty() {
        writeln!(out, "The grammar is LL(1).")?;
        return Ok(0);
    }
    writeln!(out, "The grammar is not LL(1):")?;
    for conflict in &conflicts {
        writeln!(out, "    {}", conflict)?;
        for &index in &conflict.productions {
            if let Some(production) = grammar.production(index) {
                writeln!(out, "        {}: {}", index, production)?;
            }
        }
    }
    Ok(conflicts.len())
}

/// Emit everything: productions, sets, predict sets, table and conflicts.
pub fn write_report(
    out: &mut impl Write,
    grammar: &Grammar,
    analysis: &Analysis,
    table: &ParseTable,
) -> io::Result<usize> {
    write_productions(out, grammar)?;
    writeln!(out)?;
    write_sets(out, grammar, analysis)?;
    writeln!(out)?;
    write_predict_sets(out, grammar, analysis)?;
    writeln!(out)?;
    write_table(out, table)?;
    writeln!(out)?;
    write_conflicts(out, grammar, table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load::Loader;

    fn sample() -> (Grammar, Analysis) {
        let grammar = Loader::new()
            .load_str("a\nb\n", "S\nX\n", "S -> a X\nX -> b | ε\n")
            .unwrap();
        let analysis = Analysis::new(&grammar).unwrap();
        (grammar, analysis)
    }

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn sets_in_declaration_order() {
        let (grammar, analysis) = sample();
        let text = render(|out| write_sets(out, &grammar, &analysis));
        assert_eq!(
            text,
            "Nullable: {X}\nFirst:\n    S: {a}\n    X: {b}\nFollow:\n    S: {}\n    X: {}\n"
        );
    }

    #[test]
    fn production_listing() {
        let (grammar, _) = sample();
        let text = render(|out| write_productions(out, &grammar));
        assert_eq!(text, "Productions:\n   1: S -> a X\n   2: X -> b\n   3: X -> ε\n");
    }

    #[test]
    fn table_grid() {
        let (grammar, analysis) = sample();
        let table = analysis.parse_table(&grammar);
        let text = render(|out| write_table(out, &table));
        assert_eq!(text, "Table:\n  | a | b\nS | 1 |  \nX |   | 2\n");
    }

    #[test]
    fn conflict_report() {
        let grammar = Loader::new()
            .load_str("a\n", "S\n", "S -> a | a S\n")
            .unwrap();
        let table = Analysis::new(&grammar).unwrap().parse_table(&grammar);
        let mut buf = Vec::new();
        let count = write_conflicts(&mut buf, &grammar, &table).unwrap();
        assert_eq!(count, 1);
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "The grammar is not LL(1):\n    conflict at (S, a): productions 1,2\n        1: S -> a\n        2: S -> a S\n"
        );
    }
}
