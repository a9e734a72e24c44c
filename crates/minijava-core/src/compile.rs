// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! The front-end pipeline driver.
//!
//! Runs lex → parse → elaborate over one compilation unit and returns
//! the annotated program, or the first fatal error. The pipeline is
//! purely sequential and owns all of its state; nothing is shared
//! across compilations.

use miette::Diagnostic;
use thiserror::Error;

use crate::ast::Program;
use crate::elaborate::{ElabError, Elaboration, Elaborator};
use crate::parse::{ParseError, Parser};

/// Observational dump toggles.
///
/// Each switch prints an internal structure as the pipeline produces
/// it — the token stream, the class table after pass 1, the method
/// table per method — and has no effect on results.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompilerOptions {
    /// Echo each token as the parser pulls it.
    pub dump_tokens: bool,
    /// Print the class table once pass 1 completes.
    pub dump_class_table: bool,
    /// Print each method's symbol table as pass 2 enters the method.
    pub dump_method_tables: bool,
}

/// The result of analysing one compilation unit.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// The parsed program.
    pub program: Program,
    /// The elaboration results: class table, annotations, diagnostics.
    pub elaboration: Elaboration,
}

/// A fatal front-end error from any stage.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum CompileError {
    /// A lexical or syntax error.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    /// A duplicate-definition error.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Elaborate(#[from] ElabError),
}

/// Analyses one compilation unit.
///
/// On success the program elaborated without a fatal error; the
/// returned diagnostics may still contain type errors and warnings.
///
/// # Errors
///
/// Returns the first fatal [`CompileError`]; no partial result is
/// produced.
pub fn analyse(source: &str, options: &CompilerOptions) -> Result<Analysis, CompileError> {
    let parser = Parser::with_token_dump(source, options.dump_tokens)?;
    let program = parser.parse()?;
    let elaboration = Elaborator::with_dumps(options.dump_class_table, options.dump_method_tables)
        .run(&program)?;
    Ok(Analysis {
        program,
        elaboration,
    })
}
