// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Fatal elaboration errors.
//!
//! Name collisions corrupt the symbol tables every later check depends
//! on, so they abort the compilation immediately instead of joining the
//! recoverable diagnostics. Like the parse errors, they are ordinary
//! values propagated up to the driver.

use ecow::EcoString;
use miette::Diagnostic;
use thiserror::Error;

/// A fatal duplicate-definition error.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ElabError {
    /// Two classes share a name.
    #[error("duplicate class `{name}` at line {line}")]
    #[diagnostic(code(minijava::elaborate))]
    DuplicateClass {
        /// The colliding class name.
        name: EcoString,
        /// The line of the second definition.
        line: u32,
    },

    /// Two fields of one class share a name.
    #[error("duplicate field `{field}` in class `{class}` at line {line}")]
    #[diagnostic(code(minijava::elaborate))]
    DuplicateField {
        /// The declaring class.
        class: EcoString,
        /// The colliding field name.
        field: EcoString,
        /// The line of the second definition.
        line: u32,
    },

    /// Two methods of one class share a name.
    #[error("duplicate method `{method}` in class `{class}` at line {line}")]
    #[diagnostic(code(minijava::elaborate))]
    DuplicateMethod {
        /// The declaring class.
        class: EcoString,
        /// The colliding method name.
        method: EcoString,
        /// The line of the second definition.
        line: u32,
    },

    /// Two formals of one method share a name.
    #[error("duplicate parameter `{name}` at line {line}")]
    #[diagnostic(code(minijava::elaborate))]
    DuplicateParameter {
        /// The colliding parameter name.
        name: EcoString,
        /// The line of the second definition.
        line: u32,
    },

    /// A local collides with a formal or another local.
    #[error("duplicate variable `{name}` at line {line}")]
    #[diagnostic(code(minijava::elaborate))]
    DuplicateVariable {
        /// The colliding variable name.
        name: EcoString,
        /// The line of the second definition.
        line: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ElabError::DuplicateField {
            class: "Fac".into(),
            field: "x".into(),
            line: 4,
        };
        assert_eq!(
            err.to_string(),
            "duplicate field `x` in class `Fac` at line 4"
        );

        let err = ElabError::DuplicateParameter {
            name: "n".into(),
            line: 2,
        };
        assert_eq!(err.to_string(), "duplicate parameter `n` at line 2");
    }
}
