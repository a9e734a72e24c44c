// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! MiniJava compiler front end.
//!
//! This crate turns MiniJava source text into a type-checked AST
//! annotated with resolved types, ready for a downstream code
//! generator:
//!
//! - Lexical analysis ([`parse::Lexer`])
//! - Parsing ([`parse::Parser`])
//! - Semantic elaboration ([`elaborate::Elaborator`]): class-table
//!   construction, name resolution, type checking
//! - Pretty-printing ([`unparse::unparse`])
//!
//! The pipeline aborts on the first lexical error, syntax error, or
//! duplicate definition; type errors and unused-variable warnings are
//! collected as diagnostics so one run reports all of them. See
//! [`compile::analyse`] for the assembled pipeline.

pub mod ast;
pub mod compile;
pub mod diagnostics;
pub mod elaborate;
pub mod parse;
pub mod unparse;
pub mod visit;

/// Re-export of commonly used types.
pub mod prelude {
    pub use crate::ast::{Expression, Program, Statement, Type};
    pub use crate::compile::{Analysis, CompilerOptions, analyse};
    pub use crate::diagnostics::{Diagnostic, Severity};
}
