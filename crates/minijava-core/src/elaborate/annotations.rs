// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Elaboration results, recorded beside the tree.
//!
//! The elaborator never mutates the AST. Resolved information for
//! `Id` and `Call` expressions is stored here, keyed by the [`NodeId`]
//! the parser assigned, for the code generator and other downstream
//! consumers to query.

use std::collections::HashMap;

use ecow::EcoString;

use crate::ast::{NodeId, Type};

/// How an `Id` expression resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdResolution {
    /// The resolved type; absent when the name is undefined.
    pub ty: Option<Type>,
    /// Whether resolution fell through to the class-field path rather
    /// than hitting a formal or local.
    pub is_field: bool,
}

/// How a `Call` expression resolved. Recorded only for calls that
/// passed the arity check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallResolution {
    /// The receiver's class.
    pub receiver_class: EcoString,
    /// The elaborated type of each argument, by position; an entry is
    /// absent when the argument did not elaborate to a type.
    pub argument_types: Vec<Option<Type>>,
    /// The invoked method's declared return type.
    pub return_type: Type,
}

/// Side table of per-node elaboration results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotations {
    ids: HashMap<NodeId, IdResolution>,
    calls: HashMap<NodeId, CallResolution>,
}

impl Annotations {
    /// Creates an empty annotation table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records how an `Id` expression resolved.
    pub fn record_id(&mut self, node: NodeId, resolution: IdResolution) {
        self.ids.insert(node, resolution);
    }

    /// Records how a `Call` expression resolved.
    pub fn record_call(&mut self, node: NodeId, resolution: CallResolution) {
        self.calls.insert(node, resolution);
    }

    /// Looks up the resolution of an `Id` expression.
    #[must_use]
    pub fn id(&self, node: NodeId) -> Option<&IdResolution> {
        self.ids.get(&node)
    }

    /// Looks up the resolution of a `Call` expression.
    #[must_use]
    pub fn call(&self, node: NodeId) -> Option<&CallResolution> {
        self.calls.get(&node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_and_look_up() {
        let mut annotations = Annotations::new();
        annotations.record_id(
            NodeId::new(0),
            IdResolution {
                ty: Some(Type::Int),
                is_field: false,
            },
        );
        annotations.record_call(
            NodeId::new(1),
            CallResolution {
                receiver_class: "Fac".into(),
                argument_types: vec![Some(Type::Int)],
                return_type: Type::Int,
            },
        );

        assert_eq!(
            annotations.id(NodeId::new(0)).and_then(|r| r.ty.clone()),
            Some(Type::Int)
        );
        assert_eq!(
            annotations
                .call(NodeId::new(1))
                .map(|r| r.receiver_class.clone()),
            Some("Fac".into())
        );
        assert!(annotations.id(NodeId::new(9)).is_none());
    }
}
