// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Parse a MiniJava source file and re-render it through the
//! pretty-printer.

use std::fs;

use camino::Utf8PathBuf;
use miette::{IntoDiagnostic, Result, WrapErr};
use minijava_core::parse::parse;
use minijava_core::unparse::unparse;
use tracing::{info, instrument};

/// Pretty-print one MiniJava source file to stdout.
#[instrument(skip_all, fields(path = %path))]
pub fn fmt(path: &str) -> Result<()> {
    let source_path = Utf8PathBuf::from(path);
    info!("Formatting file");

    let source = fs::read_to_string(&source_path)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read '{source_path}'"))?;

    let program = parse(&source).map_err(miette::Report::new)?;
    print!("{}", unparse(&program));
    Ok(())
}
