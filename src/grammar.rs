//! Productions and the grammar that owns them.
// This file is part of "nff", which is free software: you
// can redistribute it and/or modify it under the terms of the GNU General
// Public License version 3 as published by the Free Software Foundation. See
// <https://www.gnu.org/licenses/> for a copy.

use std::fmt;

use crate::symbol::{Alphabet, Symbol};

/// A rewrite rule `head -> body`.
///
/// A body of exactly `[ε]` is the empty derivation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Production {
    pub head: Symbol,
    pub body: Vec<Symbol>,
}

impl Production {
    pub fn new<B>(head: impl Into<Symbol>, body: B) -> Self
    where
        B: IntoIterator,
        B::Item: Into<Symbol>,
    {
        Production {
            head: head.into(),
            body: body.into_iter().map(Into::into).collect(),
        }
    }

    /// `head -> ε`
    pub fn epsilon(head: impl Into<Symbol>) -> Self {
        Production {
            head: head.into(),
            body: vec![Symbol::epsilon()],
        }
    }

    pub fn is_epsilon(&self) -> bool {
        self.body.len() == 1 && self.body[0].is_epsilon()
    }

    /// The body with the epsilon marker removed, i.e. the string it derives.
    pub fn symbols(&self) -> &[Symbol] {
        if self.is_epsilon() {
            &[]
        } else {
            &self.body
        }
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ->", self.head)?;
        for symbol in &self.body {
            write!(f, " {}", symbol)?;
        }
        Ok(())
    }
}

/// Why a grammar failed validation. Production numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    /// A symbol is declared both as a terminal and as a nonterminal.
    OverlappingAlphabet { symbol: Symbol },
    /// The epsilon marker was declared as a terminal or nonterminal.
    EpsilonInAlphabet,
    /// A production's head is not a declared nonterminal.
    HeadNotNonterminal { production: usize, head: Symbol },
    /// A production has no body symbols at all.
    EmptyBody { production: usize },
    /// A production body uses an undeclared symbol.
    UnknownSymbol { production: usize, symbol: Symbol },
    /// Epsilon appears in a body that has other symbols.
    MisplacedEpsilon { production: usize },
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GrammarError::OverlappingAlphabet { symbol } => write!(
                f,
                "`{}` is declared both as a terminal and a nonterminal",
                symbol
            ),
            GrammarError::EpsilonInAlphabet => {
                write!(f, "the empty marker `{}` cannot be declared as a symbol", crate::EPSILON)
            }
            GrammarError::HeadNotNonterminal { production, head } => write!(
                f,
                "production {}: head `{}` is not a nonterminal",
                production, head
            ),
            GrammarError::EmptyBody { production } => {
                write!(f, "production {}: body is empty", production)
            }
            GrammarError::UnknownSymbol { production, symbol } => write!(
                f,
                "production {}: `{}` is not a declared symbol",
                production, symbol
            ),
            GrammarError::MisplacedEpsilon { production } => write!(
                f,
                "production {}: `{}` must be the only symbol of a body",
                production,
                crate::EPSILON
            ),
        }
    }
}

impl std::error::Error for GrammarError {}

/// An alphabet plus the ordered list of productions over it.
#[derive(Debug, Clone, Default)]
pub struct Grammar {
    alphabet: Alphabet,
    productions: Vec<Production>,
}

impl Grammar {
    /// Assembles a grammar. Call [`Grammar::validate`] before analysing it.
    pub fn new(alphabet: Alphabet, productions: Vec<Production>) -> Self {
        Grammar {
            alphabet,
            productions,
        }
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn productions(&self) -> &[Production] {
        &self.productions
    }

    /// Looks up a production by its 1-based index.
    pub fn production(&self, index: usize) -> Option<&Production> {
        index.checked_sub(1).and_then(|i| self.productions.get(i))
    }

    /// Productions paired with their 1-based index.
    pub fn indexed_productions(&self) -> impl Iterator<Item = (usize, &Production)> {
        self.productions.iter().enumerate().map(|(i, p)| (i + 1, p))
    }

    pub fn is_terminal(&self, symbol: &Symbol) -> bool {
        self.alphabet.is_terminal(symbol)
    }

    pub fn is_nonterminal(&self, symbol: &Symbol) -> bool {
        self.alphabet.is_nonterminal(symbol)
    }

    /// Checks the structural rules every analysis relies on.
    ///
    /// Reports the first problem found, checking the alphabet before the
    /// productions and the productions in order.
    pub fn validate(&self) -> Result<(), GrammarError> {
        for symbol in self.alphabet.terminals().iter().chain(self.alphabet.nonterminals()) {
            if symbol.is_epsilon() {
                return Err(GrammarError::EpsilonInAlphabet);
            }
        }
        for symbol in self.alphabet.terminals() {
            if self.alphabet.is_nonterminal(symbol) {
                return Err(GrammarError::OverlappingAlphabet {
                    symbol: symbol.clone(),
                });
            }
        }

        for (production, p) in self.indexed_productions() {
            if !self.is_nonterminal(&p.head) {
                return Err(GrammarError::HeadNotNonterminal {
                    production,
                    head: p.head.clone(),
                });
            }
            if p.body.is_empty() {
                return Err(GrammarError::EmptyBody { production });
            }
            for symbol in &p.body {
                if symbol.is_epsilon() {
                    if p.body.len() > 1 {
                        return Err(GrammarError::MisplacedEpsilon { production });
                    }
                } else if !self.alphabet.contains(symbol.name()) {
                    return Err(GrammarError::UnknownSymbol {
                        production,
                        symbol: symbol.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}
