// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Error diagnostics rendering using miette.
//!
//! Converts minijava-core diagnostics into miette-formatted reports
//! with source context. Core diagnostics carry a line number rather
//! than a byte span, so the label is computed to cover the whole
//! offending source line.

use miette::{Diagnostic, SourceSpan};
use minijava_core::diagnostics::{Diagnostic as CoreDiagnostic, Severity};

/// A compilation diagnostic with rich formatting.
#[derive(Debug, Diagnostic, thiserror::Error)]
#[error("{message}")]
#[diagnostic(code(minijava::check))]
pub struct CompileDiagnostic {
    /// Error or warning.
    pub severity: Severity,
    /// Human-readable message.
    pub message: String,
    /// Source code for context.
    #[source_code]
    pub src: miette::NamedSource<String>,
    /// The offending source line.
    #[label("{label}")]
    pub span: SourceSpan,
    /// Label text (interpolated by the miette derive macro).
    pub label: String,
}

impl CompileDiagnostic {
    /// Creates a rendered diagnostic from a core diagnostic.
    pub fn from_core_diagnostic(
        diagnostic: &CoreDiagnostic,
        source_path: &str,
        source: &str,
    ) -> Self {
        let label = match diagnostic.severity {
            Severity::Error => "error here",
            Severity::Warning => "warning here",
        };

        Self {
            severity: diagnostic.severity,
            message: diagnostic.message.to_string(),
            src: miette::NamedSource::new(source_path, source.to_string()),
            span: line_span(source, diagnostic.line),
            label: label.to_string(),
        }
    }
}

/// Byte span covering the given 1-based source line, without its line
/// terminator. Lines past the end of the source yield an empty span at
/// the end of the text.
fn line_span(source: &str, line: u32) -> SourceSpan {
    let target = line.max(1) as usize;
    let mut offset = 0usize;
    for (index, text) in source.split_inclusive('\n').enumerate() {
        if index + 1 == target {
            let trimmed = text.trim_end_matches(['\n', '\r']);
            return (offset, trimmed.len()).into();
        }
        offset += text.len();
    }
    (source.len(), 0).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_core_diagnostic_error() {
        let core = CoreDiagnostic::error("undefined reference to `x`", 2);
        let source = "line one\nx = 1;\nline three";
        let diagnostic = CompileDiagnostic::from_core_diagnostic(&core, "test.mj", source);

        assert_eq!(diagnostic.severity, Severity::Error);
        assert_eq!(diagnostic.message, "undefined reference to `x`");
        assert_eq!(diagnostic.span.offset(), 9);
        assert_eq!(diagnostic.span.len(), 6);
        assert_eq!(diagnostic.label, "error here");
    }

    #[test]
    fn from_core_diagnostic_warning() {
        let core = CoreDiagnostic::warning("variable `y` is never used", 1);
        let diagnostic = CompileDiagnostic::from_core_diagnostic(&core, "test.mj", "int y;");

        assert_eq!(diagnostic.severity, Severity::Warning);
        assert_eq!(diagnostic.label, "warning here");
        assert_eq!(diagnostic.span.offset(), 0);
        assert_eq!(diagnostic.span.len(), 6);
    }

    #[test]
    fn line_span_past_end_is_empty() {
        let span = line_span("one\ntwo", 9);
        assert_eq!(span.offset(), 7);
        assert_eq!(span.len(), 0);
    }

    #[test]
    fn line_span_ignores_carriage_return() {
        let span = line_span("one\r\ntwo", 1);
        assert_eq!(span.offset(), 0);
        assert_eq!(span.len(), 3);
    }
}
