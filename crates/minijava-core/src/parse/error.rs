// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Error types for the MiniJava front end's lexing and parsing stages.
//!
//! Both stages fail hard: the first malformed character or grammar
//! violation aborts the whole compilation with no partial result. The
//! errors here are ordinary values, propagated with `?` up to the
//! driver, which is the only place that turns them into a process
//! exit. They integrate with [`miette`] for error reporting.

use ecow::EcoString;
use miette::Diagnostic;
use thiserror::Error;

/// A fatal lexical error.
///
/// Carries the line and column the scanner had reached when the
/// offending character was seen.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{kind} at line {line}, column {column}")]
#[diagnostic(code(minijava::lex))]
pub struct LexError {
    /// The kind of lexical error.
    #[source]
    pub kind: LexErrorKind,
    /// The source line of the error.
    pub line: u32,
    /// The source column of the error.
    pub column: u32,
}

impl LexError {
    /// Creates a new lexical error.
    #[must_use]
    pub fn new(kind: LexErrorKind, line: u32, column: u32) -> Self {
        Self { kind, line, column }
    }

    /// Creates an "unexpected character" error.
    #[must_use]
    pub fn unexpected_char(c: char, line: u32, column: u32) -> Self {
        Self::new(LexErrorKind::UnexpectedCharacter(c), line, column)
    }
}

/// The kind of lexical error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    /// A character outside the MiniJava alphabet was encountered.
    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),

    /// A single `&` not followed by a second `&`.
    #[error("isolated '&', expected '&&'")]
    LoneAmpersand,

    /// A block comment was not terminated before end of file.
    #[error("unterminated block comment")]
    UnterminatedComment,
}

/// A fatal syntax error.
///
/// The parser performs no recovery: the first grammar violation aborts
/// the compilation and no AST is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ParseError {
    /// The lexer hit a fatal error while the parser pulled a token.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Lex(#[from] LexError),

    /// A specific token was required and something else was found.
    #[error("expected {expected} but found {found} at line {line}, column {column}")]
    #[diagnostic(code(minijava::parse))]
    UnexpectedToken {
        /// Description of the required token.
        expected: EcoString,
        /// Description of the token actually found.
        found: EcoString,
        /// The source line of the offending token.
        line: u32,
        /// The source column of the offending token.
        column: u32,
    },

    /// No statement can start with the token found.
    #[error("expected a statement but found {found} at line {line}, column {column}")]
    #[diagnostic(code(minijava::parse))]
    UnexpectedStatement {
        /// Description of the token actually found.
        found: EcoString,
        /// The source line of the offending token.
        line: u32,
        /// The source column of the offending token.
        column: u32,
    },

    /// No type can start with the token found.
    #[error("expected a type but found {found} at line {line}, column {column}")]
    #[diagnostic(code(minijava::parse))]
    UnexpectedType {
        /// Description of the token actually found.
        found: EcoString,
        /// The source line of the offending token.
        line: u32,
        /// The source column of the offending token.
        column: u32,
    },

    /// No expression can start with the token found.
    #[error("expected an expression but found {found} at line {line}, column {column}")]
    #[diagnostic(code(minijava::parse))]
    UnexpectedExpression {
        /// Description of the token actually found.
        found: EcoString,
        /// The source line of the offending token.
        line: u32,
        /// The source column of the offending token.
        column: u32,
    },

    /// An integer literal that does not fit the value range.
    #[error("integer literal `{lexeme}` out of range at line {line}")]
    #[diagnostic(code(minijava::parse))]
    IntegerOutOfRange {
        /// The offending lexeme.
        lexeme: EcoString,
        /// The source line of the literal.
        line: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lex_error_display() {
        let err = LexError::unexpected_char('#', 2, 5);
        assert_eq!(
            err.to_string(),
            "unexpected character '#' at line 2, column 5"
        );

        let err = LexError::new(LexErrorKind::LoneAmpersand, 1, 3);
        assert_eq!(err.to_string(), "isolated '&', expected '&&' at line 1, column 3");

        let err = LexError::new(LexErrorKind::UnterminatedComment, 4, 1);
        assert_eq!(err.to_string(), "unterminated block comment at line 4, column 1");
    }

    #[test]
    fn parse_error_display() {
        let err = ParseError::UnexpectedToken {
            expected: "`;`".into(),
            found: "`}`".into(),
            line: 7,
            column: 12,
        };
        assert_eq!(
            err.to_string(),
            "expected `;` but found `}` at line 7, column 12"
        );

        let err = ParseError::IntegerOutOfRange {
            lexeme: "99999999999".into(),
            line: 3,
        };
        assert_eq!(
            err.to_string(),
            "integer literal `99999999999` out of range at line 3"
        );
    }

    #[test]
    fn lex_error_converts_to_parse_error() {
        let lex = LexError::unexpected_char('~', 1, 1);
        let parse: ParseError = lex.clone().into();
        assert_eq!(parse.to_string(), lex.to_string());
    }
}
