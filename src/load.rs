//! Reads a grammar from three line-oriented sources.
//!
//! Terminals and nonterminals are listed one per line; blank lines are
//! skipped and every other line declares a symbol, `#` included. Productions
//! are written `HEAD -> BODY`, with body symbols separated by whitespace and
//! alternatives separated by `|`, unless `|` is itself a declared symbol. The
//! empty body is written with the epsilon marker, `ε` unless configured
//! otherwise. In the productions source, blank lines and lines starting with
//! `#` are skipped.
//!
//! A body token that is not a declared symbol, but whose characters all are,
//! is read as a run of single-character symbols, so `E -> TA` means
//! `E -> T A`.
// This file is part of "nff", which is free software: you
// can redistribute it and/or modify it under the terms of the GNU General
// Public License version 3 as published by the Free Software Foundation. See
// <https://www.gnu.org/licenses/> for a copy.

use std::fmt;
use std::fs;
use std::path::Path;

use crate::grammar::{Grammar, Production};
use crate::symbol::{Alphabet, Symbol, EPSILON};
use crate::Error;

/// Represents an error when reading a grammar description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadError {
    /// Name of the source being read.
    pub file: String,
    /// Line where the error happened.
    ///
    /// One-indexed, zero when the source could not be read at all.
    pub line: usize,
    /// Human-readable reason for the error.
    pub reason: String,
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.line == 0 {
            write!(f, "{}: {}", self.file, self.reason)
        } else {
            write!(f, "{}:{}: {}", self.file, self.line, self.reason)
        }
    }
}

impl std::error::Error for LoadError {}

/// Grammar loader settings.
#[derive(Debug, Clone)]
pub struct Loader {
    epsilon: String,
}

impl Default for Loader {
    fn default() -> Self {
        Loader {
            epsilon: EPSILON.to_string(),
        }
    }
}

impl Loader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the token that stands for the empty body.
    pub fn epsilon(mut self, marker: &str) -> Self {
        self.epsilon = marker.to_string();
        self
    }

    /// Reads the three sources from files and validates the result.
    pub fn load_files(
        &self,
        terminals: &Path,
        nonterminals: &Path,
        productions: &Path,
    ) -> Result<Grammar, Error> {
        let read = |path: &Path| {
            fs::read_to_string(path).map_err(|err| LoadError {
                file: path.display().to_string(),
                line: 0,
                reason: err.to_string(),
            })
        };
        let t = read(terminals)?;
        let n = read(nonterminals)?;
        let p = read(productions)?;
        let (t_name, n_name, p_name) = (
            terminals.display().to_string(),
            nonterminals.display().to_string(),
            productions.display().to_string(),
        );
        self.load_named(
            (t_name.as_str(), t.as_str()),
            (n_name.as_str(), n.as_str()),
            (p_name.as_str(), p.as_str()),
        )
    }

    /// Reads the three sources from strings and validates the result.
    pub fn load_str(
        &self,
        terminals: &str,
        nonterminals: &str,
        productions: &str,
    ) -> Result<Grammar, Error> {
        self.load_named(
            ("terminals", terminals),
            ("nonterminals", nonterminals),
            ("productions", productions),
        )
    }

    fn load_named(
        &self,
        terminals: (&str, &str),
        nonterminals: (&str, &str),
        productions: (&str, &str),
    ) -> Result<Grammar, Error> {
        let mut alphabet = Alphabet::new();
        for (line, name) in self.symbol_lines(terminals)? {
            if !alphabet.add_terminal(self.symbol(name)) {
                warn!("{}:{}: terminal `{}` declared twice", terminals.0, line, name);
            }
        }
        for (line, name) in self.symbol_lines(nonterminals)? {
            if !alphabet.add_nonterminal(self.symbol(name)) {
                warn!("{}:{}: nonterminal `{}` declared twice", nonterminals.0, line, name);
            }
        }

        let mut rules = Vec::new();
        let rules_lines = content_lines(productions.1).filter(|(_, text)| !text.starts_with('#'));
        for (line, text) in rules_lines {
            let parsed = self.production_line(&alphabet, text).map_err(|reason| LoadError {
                file: productions.0.to_string(),
                line,
                reason,
            })?;
            rules.extend(parsed);
        }

        let grammar = Grammar::new(alphabet, rules);
        grammar.validate()?;
        debug!(
            "Loaded {} terminals, {} nonterminals, {} productions",
            grammar.alphabet().terminals().len(),
            grammar.alphabet().nonterminals().len(),
            grammar.productions().len()
        );
        Ok(grammar)
    }

    fn symbol(&self, name: &str) -> Symbol {
        if name == self.epsilon {
            Symbol::epsilon()
        } else {
            Symbol::new(name)
        }
    }

    fn symbol_lines<'a>(&self, (file, text): (&str, &'a str)) -> Result<Vec<(usize, &'a str)>, LoadError> {
        content_lines(text)
            .map(|(line, name)| {
                if name.split_whitespace().count() > 1 {
                    Err(LoadError {
                        file: file.to_string(),
                        line,
                        reason: format!("expected one symbol per line, found `{}`", name),
                    })
                } else {
                    Ok((line, name))
                }
            })
            .collect()
    }

    fn production_line(&self, alphabet: &Alphabet, text: &str) -> Result<Vec<Production>, String> {
        let mut sides = text.splitn(2, "->");
        let head = sides.next().unwrap_or_default().trim();
        let body = match sides.next() {
            Some(body) => body,
            None => return Err(format!("missing `->` in `{}`", text)),
        };
        if head.is_empty() {
            return Err("missing left hand side".to_string());
        }
        if head.split_whitespace().count() > 1 {
            return Err(format!("left hand side `{}` is more than one symbol", head));
        }

        let alternatives: Vec<&str> = if alphabet.contains("|") {
            vec![body]
        } else {
            body.split('|').collect()
        };
        let mut productions = Vec::new();
        for alternative in alternatives {
            let mut symbols = Vec::new();
            for token in alternative.split_whitespace() {
                self.push_token(alphabet, token, &mut symbols);
            }
            if symbols.is_empty() {
                return Err(format!(
                    "empty alternative for `{}`, write `{}` for the empty body",
                    head, self.epsilon
                ));
            }
            productions.push(Production::new(Symbol::new(head), symbols));
        }
        Ok(productions)
    }

    fn push_token(&self, alphabet: &Alphabet, token: &str, symbols: &mut Vec<Symbol>) {
        if token == self.epsilon || alphabet.contains(token) {
            symbols.push(self.symbol(token));
            return;
        }
        let mut buf = [0; 4];
        let compact = token.chars().count() > 1
            && token
                .chars()
                .all(|c| alphabet.contains(c.encode_utf8(&mut buf)));
        if compact {
            trace!("splitting `{}` into single-character symbols", token);
            symbols.extend(token.chars().map(|c| Symbol::new(c.encode_utf8(&mut buf))));
        } else {
            // left for validation to report
            symbols.push(Symbol::new(token));
        }
    }
}

/// Reads a grammar from three files with the default settings.
pub fn load_files(
    terminals: impl AsRef<Path>,
    nonterminals: impl AsRef<Path>,
    productions: impl AsRef<Path>,
) -> Result<Grammar, Error> {
    Loader::new().load_files(terminals.as_ref(), nonterminals.as_ref(), productions.as_ref())
}

/// Trimmed non-empty lines with their 1-based line numbers.
fn content_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::GrammarError;

    const TERMINALS: &str = "+\n*\n(\n)\ni\n";
    const NONTERMINALS: &str = "E\nA\nT\nB\nF\n";

    fn bodies(grammar: &Grammar) -> Vec<String> {
        grammar.productions().iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn spaced_and_compact_bodies() {
        let grammar = Loader::new()
            .load_str(TERMINALS, NONTERMINALS, "E -> T A\n\n# comment\nA -> +TA | ε\nF -> ( E )\n")
            .unwrap();
        assert_eq!(
            bodies(&grammar),
            vec!["E -> T A", "A -> + T A", "A -> ε", "F -> ( E )"]
        );
    }

    #[test]
    fn hash_declares_a_terminal() {
        let grammar = Loader::new()
            .load_str("#\na\n", "S\n", "# end marker\nS -> a #\n")
            .unwrap();
        assert!(grammar.is_terminal(&Symbol::new("#")));
        assert_eq!(bodies(&grammar), vec!["S -> a #"]);
    }

    #[test]
    fn declared_bar_is_a_body_symbol() {
        let grammar = Loader::new()
            .load_str("|\na\n", "S\n", "S -> a | a\n")
            .unwrap();
        assert_eq!(bodies(&grammar), vec!["S -> a | a"]);
        assert!(grammar.is_terminal(&Symbol::new("|")));

        let grammar = Loader::new()
            .load_str("a\nb\n", "S\n", "S -> a|b\n")
            .unwrap();
        assert_eq!(bodies(&grammar), vec!["S -> a", "S -> b"]);
    }

    #[test]
    fn custom_epsilon_marker() {
        let grammar = Loader::new()
            .epsilon("0")
            .load_str("a\n", "S\n", "S -> a S\nS -> 0\n")
            .unwrap();
        assert!(grammar.productions()[1].is_epsilon());
    }

    #[test]
    fn multi_character_symbols() {
        let grammar = Loader::new()
            .load_str("id\nplus\n", "expr\nrest\n", "expr -> id rest\nrest -> plus expr | ε")
            .unwrap();
        assert_eq!(grammar.productions().len(), 3);
        assert_eq!(grammar.productions()[0].body, vec![Symbol::new("id"), Symbol::new("rest")]);
    }

    #[test]
    fn syntax_errors_carry_line_numbers() {
        let err = Loader::new()
            .load_str("a\n", "S\n", "S -> a\n\nS a\n")
            .unwrap_err();
        match err {
            Error::Load(err) => {
                assert_eq!(err.line, 3);
                assert_eq!(err.file, "productions");
                assert_eq!(err.to_string(), "productions:3: missing `->` in `S a`");
            }
            other => panic!("unexpected error {:?}", other),
        }

        let err = Loader::new().load_str("a b\n", "S\n", "").unwrap_err();
        assert!(matches!(err, Error::Load(LoadError { line: 1, .. })));

        let err = Loader::new().load_str("a\n", "S\n", "S -> a |\n").unwrap_err();
        assert!(matches!(err, Error::Load(LoadError { line: 1, .. })));
    }

    #[test]
    fn undeclared_symbols_fail_validation() {
        let err = Loader::new().load_str("a\n", "S\n", "S -> a b\n").unwrap_err();
        match err {
            Error::Grammar(GrammarError::UnknownSymbol { production, symbol }) => {
                assert_eq!(production, 1);
                assert_eq!(symbol, Symbol::new("b"));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn declared_marker_is_rejected() {
        let err = Loader::new().load_str("ε\n", "S\n", "S -> ε\n").unwrap_err();
        assert!(matches!(err, Error::Grammar(GrammarError::EpsilonInAlphabet)));
    }

    #[test]
    fn missing_file() {
        let err = load_files("/nonexistent/t", "/nonexistent/n", "/nonexistent/p").unwrap_err();
        match err {
            Error::Load(err) => {
                assert_eq!(err.line, 0);
                assert_eq!(err.file, "/nonexistent/t");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }
}
