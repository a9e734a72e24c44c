// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Semantic elaboration for MiniJava.
//!
//! Elaboration resolves identifiers and method calls, checks types,
//! and annotates the parsed program for a downstream code generator.
//! It runs in two passes over the AST:
//!
//! 1. **Class-table construction** ([`ClassTable`]): every class with
//!    its fields and method signatures, registered before any body is
//!    visited so forward references resolve.
//! 2. **Resolution and type checking** ([`Elaborator`]): every method
//!    body, with a fresh [`MethodTable`] per method, collecting
//!    recoverable [`crate::diagnostics::Diagnostic`]s and recording
//!    [`Annotations`].
//!
//! Duplicate definitions are fatal ([`ElabError`]); everything else is
//! reported and elaboration continues.

mod annotations;
mod class_table;
mod elaborator;
mod error;
mod method_table;

pub use annotations::{Annotations, CallResolution, IdResolution};
pub use class_table::{ClassBinding, ClassTable, MethodSignature};
pub use elaborator::{Elaboration, Elaborator, elaborate};
pub use error::ElabError;
pub use method_table::MethodTable;
