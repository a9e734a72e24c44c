// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! The per-method symbol table.
//!
//! A fresh table is built for every method from its formals and locals;
//! a name collision between any two of them is fatal. Lookups mark the
//! name as used — after a method body has been elaborated, the names
//! never looked up feed the "declared but never used" warnings, in
//! declaration order.

use std::collections::HashMap;

use ecow::EcoString;

use super::ElabError;
use crate::ast::{Declaration, Type};

/// Identifier-to-type mapping scoped to one method activation.
#[derive(Debug, Clone, Default)]
pub struct MethodTable {
    table: HashMap<EcoString, Type>,
    /// Names never looked up yet, in declaration order.
    unused: Vec<(EcoString, u32)>,
}

impl MethodTable {
    /// Creates an empty method table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the table from a method's formals and locals.
    ///
    /// # Errors
    ///
    /// Fails fatally on a duplicate name.
    pub fn build(formals: &[Declaration], locals: &[Declaration]) -> Result<Self, ElabError> {
        let mut table = Self::new();
        for formal in formals {
            table.define(formal, true)?;
        }
        for local in locals {
            table.define(local, false)?;
        }
        Ok(table)
    }

    /// Defines one formal or local.
    fn define(&mut self, declaration: &Declaration, is_formal: bool) -> Result<(), ElabError> {
        if self.table.contains_key(&declaration.id) {
            return Err(if is_formal {
                ElabError::DuplicateParameter {
                    name: declaration.id.clone(),
                    line: declaration.line,
                }
            } else {
                ElabError::DuplicateVariable {
                    name: declaration.id.clone(),
                    line: declaration.line,
                }
            });
        }
        self.table
            .insert(declaration.id.clone(), declaration.ty.clone());
        self.unused.push((declaration.id.clone(), declaration.line));
        Ok(())
    }

    /// Looks up a name, marking it as used.
    ///
    /// Returns `None` for names not bound in this method.
    pub fn get(&mut self, name: &str) -> Option<Type> {
        self.unused.retain(|(unused, _)| unused != name);
        self.table.get(name).cloned()
    }

    /// The names never looked up, with their declaration lines, in
    /// declaration order.
    #[must_use]
    pub fn unused(&self) -> &[(EcoString, u32)] {
        &self.unused
    }
}

impl std::fmt::Display for MethodTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (name, ty) in &self.table {
            writeln!(f, "    {name}: {ty}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn declaration(ty: Type, id: &str, line: u32) -> Declaration {
        Declaration {
            ty,
            id: id.into(),
            line,
        }
    }

    #[test]
    fn build_and_get() {
        let mut table = MethodTable::build(
            &[declaration(Type::Int, "n", 1)],
            &[declaration(Type::Boolean, "done", 2)],
        )
        .unwrap();

        assert_eq!(table.get("n"), Some(Type::Int));
        assert_eq!(table.get("done"), Some(Type::Boolean));
        assert_eq!(table.get("missing"), None);
    }

    #[test]
    fn duplicate_formal_is_fatal() {
        let err = MethodTable::build(
            &[
                declaration(Type::Int, "n", 1),
                declaration(Type::Int, "n", 1),
            ],
            &[],
        )
        .unwrap_err();
        assert!(matches!(err, ElabError::DuplicateParameter { .. }));
    }

    #[test]
    fn local_colliding_with_formal_is_fatal() {
        let err = MethodTable::build(
            &[declaration(Type::Int, "n", 1)],
            &[declaration(Type::Boolean, "n", 2)],
        )
        .unwrap_err();
        assert!(matches!(err, ElabError::DuplicateVariable { .. }));
    }

    #[test]
    fn lookups_mark_names_used() {
        let mut table = MethodTable::build(
            &[declaration(Type::Int, "n", 1)],
            &[
                declaration(Type::Int, "sum", 2),
                declaration(Type::Int, "i", 3),
            ],
        )
        .unwrap();

        assert_eq!(table.unused().len(), 3);
        let _ = table.get("sum");
        assert_eq!(
            table.unused(),
            &[("n".into(), 1), ("i".into(), 3)]
        );
        // Failed lookups of unbound names change nothing.
        let _ = table.get("other");
        assert_eq!(table.unused().len(), 2);
    }

    #[test]
    fn unused_keeps_declaration_order() {
        let table = MethodTable::build(
            &[declaration(Type::Int, "b", 1)],
            &[declaration(Type::Int, "a", 2)],
        )
        .unwrap();
        let names: Vec<&str> = table.unused().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }
}
