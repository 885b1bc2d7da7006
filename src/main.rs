//! Calculate nullable, first, follow and the LL(1) table from grammar files
// This file is part of "nff", which is free software: you
// can redistribute it and/or modify it under the terms of the GNU General
// Public License version 3 as published by the Free Software Foundation. See
// <https://www.gnu.org/licenses/> for a copy.

#[macro_use]
extern crate log;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use nff::{render, Analysis, Loader, EPSILON};

/// Computes NULLABLE, FIRST and FOLLOW sets and the LL(1) parse table of a grammar.
#[derive(Parser, Debug)]
#[clap(name = "nff-ll1", version, author)]
struct Args {
    /// File listing the terminals, one per line.
    #[clap(short, long)]
    terminals: PathBuf,

    /// File listing the nonterminals, one per line.
    #[clap(short, long)]
    nonterminals: PathBuf,

    /// File listing the productions, one `HEAD -> BODY` per line.
    #[clap(short, long)]
    productions: PathBuf,

    /// Token that denotes the empty body.
    #[clap(short, long, default_value = EPSILON)]
    epsilon: String,

    /// Write the report to this file instead of stdout.
    #[clap(short, long)]
    output: Option<PathBuf>,

    /// Fail if the grammar is not LL(1).
    #[clap(long)]
    strict: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .format_timestamp(None)
        .init();
    let args = Args::parse();

    let grammar = Loader::new()
        .epsilon(&args.epsilon)
        .load_files(&args.terminals, &args.nonterminals, &args.productions)
        .context("failed to load grammar")?;

    let start = Instant::now();
    let analysis = Analysis::new(&grammar)?;
    let table = analysis.parse_table(&grammar);
    info!("Execution time: {:?}", start.elapsed());

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("cannot create {}", path.display()))?,
        )),
        None => Box::new(io::stdout()),
    };
    let conflicts = render::write_report(&mut out, &grammar, &analysis, &table)?;
    out.flush()?;

    if args.strict && conflicts > 0 {
        bail!("grammar is not LL(1): {} conflicting cells", conflicts);
    }
    Ok(())
}
