// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Check a MiniJava source file for errors.
//!
//! Runs the full front end over one file. A fatal condition — lexical
//! error, syntax error, duplicate definition — aborts with a rendered
//! error and a non-zero exit. Recoverable diagnostics (type errors,
//! undefined references, unused variables) are printed and counted,
//! but are part of a successful run: the front end's contract is to
//! surface all of them in one pass.

use std::fs;

use camino::Utf8PathBuf;
use miette::{IntoDiagnostic, Result, WrapErr};
use minijava_core::compile::{CompilerOptions, analyse};
use minijava_core::diagnostics::Severity;
use tracing::{debug, info, instrument};

use crate::diagnostic::CompileDiagnostic;

/// Check one MiniJava source file.
#[instrument(skip_all, fields(path = %path))]
pub fn check(path: &str, options: &CompilerOptions) -> Result<()> {
    let source_path = Utf8PathBuf::from(path);
    info!("Checking file");

    let source = fs::read_to_string(&source_path)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read '{source_path}'"))?;

    let analysis = analyse(&source, options).map_err(miette::Report::new)?;
    debug!(
        classes = analysis.program.classes.len(),
        diagnostics = analysis.elaboration.diagnostics.len(),
        "Analysis complete"
    );

    let mut error_count = 0usize;
    let mut warning_count = 0usize;
    for diagnostic in &analysis.elaboration.diagnostics {
        match diagnostic.severity {
            Severity::Error => error_count += 1,
            Severity::Warning => warning_count += 1,
        }
        let rendered = CompileDiagnostic::from_core_diagnostic(
            diagnostic,
            source_path.as_str(),
            &source,
        );
        eprintln!("{:?}", miette::Report::new(rendered));
    }

    if error_count == 0 && warning_count == 0 {
        println!("{source_path}: ok");
    } else {
        println!("{source_path}: {error_count} error(s), {warning_count} warning(s)");
    }
    Ok(())
}
