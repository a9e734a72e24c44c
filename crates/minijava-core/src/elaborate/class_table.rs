// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! The whole-program class table.
//!
//! Pass 1 of the elaborator registers every class — the main class
//! included, with an empty binding — together with its fields and
//! method signatures. Pass 2 then resolves member accesses against the
//! table, which is read-only from that point on.
//!
//! Member lookup searches **only the named class**: the `parent` link
//! is stored but never walked, so an inherited field or method does not
//! resolve. This matches the language's reference front end and is
//! deliberately left as-is; see `DESIGN.md`.

use std::collections::HashMap;

use ecow::EcoString;

use super::ElabError;
use crate::ast::{Declaration, Type};

/// A method's declared return type and ordered formal types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSignature {
    /// The declared return type.
    pub return_type: Type,
    /// The formal parameter types, by position.
    pub formals: Vec<Type>,
}

impl std::fmt::Display for MethodSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(")?;
        for (i, formal) in self.formals.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{formal}")?;
        }
        write!(f, ") -> {}", self.return_type)
    }
}

/// The per-class record of parent, fields, and methods.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassBinding {
    /// The superclass name, if any. Stored, never walked during lookup.
    pub parent: Option<EcoString>,
    fields: HashMap<EcoString, Type>,
    methods: HashMap<EcoString, MethodSignature>,
}

impl ClassBinding {
    /// Creates an empty binding with the given parent.
    #[must_use]
    pub fn new(parent: Option<EcoString>) -> Self {
        Self {
            parent,
            fields: HashMap::new(),
            methods: HashMap::new(),
        }
    }

    /// Looks up a field of this class.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Type> {
        self.fields.get(name)
    }

    /// Looks up a method of this class.
    #[must_use]
    pub fn method(&self, name: &str) -> Option<&MethodSignature> {
        self.methods.get(name)
    }
}

impl std::fmt::Display for ClassBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.parent {
            Some(parent) => writeln!(f, "  extends: {parent}")?,
            None => writeln!(f, "  extends: <>")?,
        }
        writeln!(f, "  fields:")?;
        for (name, ty) in &self.fields {
            writeln!(f, "    {name}: {ty}")?;
        }
        writeln!(f, "  methods:")?;
        for (name, signature) in &self.methods {
            writeln!(f, "    {name}: {signature}")?;
        }
        Ok(())
    }
}

/// Mapping from class names to their bindings, built once per
/// compilation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassTable {
    classes: HashMap<EcoString, ClassBinding>,
}

impl ClassTable {
    /// Creates an empty class table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a class with an empty binding.
    ///
    /// # Errors
    ///
    /// Fails fatally when the class name is already registered.
    pub fn add_class(
        &mut self,
        name: &EcoString,
        parent: Option<EcoString>,
        line: u32,
    ) -> Result<(), ElabError> {
        if self.classes.contains_key(name) {
            return Err(ElabError::DuplicateClass {
                name: name.clone(),
                line,
            });
        }
        self.classes.insert(name.clone(), ClassBinding::new(parent));
        Ok(())
    }

    /// Adds a field to an already-registered class.
    ///
    /// # Errors
    ///
    /// Fails fatally when the class already has a field of that name.
    ///
    /// # Panics
    ///
    /// The class must have been registered by [`ClassTable::add_class`];
    /// pass 1 guarantees this.
    pub fn add_field(&mut self, class: &str, declaration: &Declaration) -> Result<(), ElabError> {
        let binding = self
            .classes
            .get_mut(class)
            .expect("class registered before its members");
        if binding.fields.contains_key(&declaration.id) {
            return Err(ElabError::DuplicateField {
                class: class.into(),
                field: declaration.id.clone(),
                line: declaration.line,
            });
        }
        binding
            .fields
            .insert(declaration.id.clone(), declaration.ty.clone());
        Ok(())
    }

    /// Adds a method signature to an already-registered class.
    ///
    /// # Errors
    ///
    /// Fails fatally when the class already has a method of that name.
    ///
    /// # Panics
    ///
    /// The class must have been registered by [`ClassTable::add_class`];
    /// pass 1 guarantees this.
    pub fn add_method(
        &mut self,
        class: &str,
        name: &EcoString,
        signature: MethodSignature,
        line: u32,
    ) -> Result<(), ElabError> {
        let binding = self
            .classes
            .get_mut(class)
            .expect("class registered before its members");
        if binding.methods.contains_key(name) {
            return Err(ElabError::DuplicateMethod {
                class: class.into(),
                method: name.clone(),
                line,
            });
        }
        binding.methods.insert(name.clone(), signature);
        Ok(())
    }

    /// Looks up a class binding.
    #[must_use]
    pub fn binding(&self, class: &str) -> Option<&ClassBinding> {
        self.classes.get(class)
    }

    /// Resolves a field within the named class only.
    #[must_use]
    pub fn field(&self, class: &str, name: &str) -> Option<&Type> {
        self.classes.get(class).and_then(|b| b.field(name))
    }

    /// Resolves a method within the named class only.
    #[must_use]
    pub fn method(&self, class: &str, name: &str) -> Option<&MethodSignature> {
        self.classes.get(class).and_then(|b| b.method(name))
    }
}

impl std::fmt::Display for ClassTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (name, binding) in &self.classes {
            writeln!(f, "class {name}:")?;
            write!(f, "{binding}")?;
        }
        Ok(())
    }
}
