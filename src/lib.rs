//! Nullable, first, follow and LL(1) table construction for context-free grammars.
//!
//! You can use this crate as a library for your own tools instead of the
//! command line program. The usual flow is:
//!
//! ```
//! use nff::{Analysis, Loader};
//!
//! let grammar = Loader::new()
//!     .load_str("a\n", "S\n", "S -> a S\nS -> ε\n")
//!     .unwrap();
//! let analysis = Analysis::new(&grammar).unwrap();
//! let table = analysis.parse_table(&grammar);
//! assert!(table.is_ll1());
//! ```
// This file is part of "nff", which is free software: you
// can redistribute it and/or modify it under the terms of the GNU General
// Public License version 3 as published by the Free Software Foundation. See
// <https://www.gnu.org/licenses/> for a copy.

#[macro_use]
extern crate log;

pub mod analysis;
pub mod first;
pub mod fixpoint;
pub mod follow;
pub mod grammar;
pub mod load;
pub mod nullable;
pub mod render;
pub mod symbol;
pub mod table;

use std::fmt;

pub use crate::analysis::Analysis;
pub use crate::fixpoint::{AnalysisError, Stage};
pub use crate::grammar::{Grammar, GrammarError, Production};
pub use crate::load::{load_files, LoadError, Loader};
pub use crate::symbol::{Alphabet, PerSymbolSets, Symbol, SymbolSet, EPSILON};
pub use crate::table::{predict_set, Ll1Conflict, ParseTable};

/// Anything that can go wrong between reading a grammar and finishing its analysis.
#[derive(Debug)]
pub enum Error {
    /// The grammar description could not be read or parsed.
    Load(LoadError),
    /// The grammar was read but breaks one of its structural rules.
    Grammar(GrammarError),
    /// A fixed-point computation did not converge.
    Analysis(AnalysisError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Load(err) => write!(f, "{}", err),
            Error::Grammar(err) => write!(f, "malformed grammar: {}", err),
            Error::Analysis(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Load(err) => Some(err),
            Error::Grammar(err) => Some(err),
            Error::Analysis(err) => Some(err),
        }
    }
}

impl From<LoadError> for Error {
    fn from(err: LoadError) -> Self {
        Error::Load(err)
    }
}

impl From<GrammarError> for Error {
    fn from(err: GrammarError) -> Self {
        Error::Grammar(err)
    }
}

impl From<AnalysisError> for Error {
    fn from(err: AnalysisError) -> Self {
        Error::Analysis(err)
    }
}
