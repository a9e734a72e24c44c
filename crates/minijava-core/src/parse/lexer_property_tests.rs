// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Property-based tests for the MiniJava lexer.
//!
//! These tests use `proptest` to verify lexer invariants over generated
//! inputs:
//!
//! 1. **Lexer never panics** — arbitrary input produces tokens or a
//!    typed error, never a crash
//! 2. **Lexer is deterministic** — same input, same outcome
//! 3. **EOF is sticky** — once EOF is returned, it keeps being returned
//! 4. **Line numbers are monotonic** — tokens are emitted in
//!    non-decreasing line order
//! 5. **Valid fragments lex cleanly** — known-valid inputs produce no
//!    errors

use proptest::prelude::*;

use super::lexer::{Lexer, lex};

// ============================================================================
// Generators
// ============================================================================

/// Known-valid single-token fragments that should lex without errors.
const VALID_SINGLE_TOKENS: &[&str] = &[
    "42",
    "0",
    "x",
    "ComputeFac",
    "_aux",
    "class",
    "extends",
    "while",
    "length",
    "String",
    "System",
    "+",
    "-",
    "*",
    "=",
    "<",
    "!",
    "(",
    ")",
    "{",
    "}",
    "[",
    "]",
    ";",
    ",",
    ".",
    "&&",
];

/// Multi-token valid fragments that should lex cleanly.
const VALID_FRAGMENTS: &[&str] = &[
    "x + 1",
    "num * (this.ComputeFac(num - 1))",
    "new int[10]",
    "new Fac()",
    "a[i] = a[i] + 1;",
    "x < y && !done",
    "System.out.println(sum);",
    "// comment\nx",
    "/* multi\nline */ y",
];

fn valid_single_token() -> impl Strategy<Value = String> {
    prop::sample::select(VALID_SINGLE_TOKENS).prop_map(std::string::ToString::to_string)
}

fn valid_fragment() -> impl Strategy<Value = String> {
    prop::sample::select(VALID_FRAGMENTS).prop_map(std::string::ToString::to_string)
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// Property 1: the lexer never panics on arbitrary input; every
    /// outcome is tokens or a typed error.
    #[test]
    fn lexer_never_panics(input in "\\PC{0,500}") {
        let _ = lex(&input);
    }

    /// Property 2: lexing is deterministic.
    #[test]
    fn lexer_is_deterministic(input in "\\PC{0,200}") {
        prop_assert_eq!(lex(&input), lex(&input));
    }

    /// Property 3: after EOF, the lexer keeps returning EOF.
    #[test]
    fn eof_is_sticky(input in valid_fragment()) {
        let mut lexer = Lexer::new(&input);
        loop {
            let token = lexer.next_token().expect("valid fragment");
            if token.kind().is_eof() {
                break;
            }
        }
        for _ in 0..3 {
            prop_assert!(lexer.next_token().expect("valid fragment").kind().is_eof());
        }
    }

    /// Property 4: emitted tokens have non-decreasing line numbers.
    #[test]
    fn lines_are_monotonic(fragments in prop::collection::vec(valid_fragment(), 1..8)) {
        let input = fragments.join("\n");
        let tokens = lex(&input).expect("valid fragments");
        for pair in tokens.windows(2) {
            prop_assert!(pair[0].line() <= pair[1].line());
        }
    }

    /// Property 5: valid fragments lex without errors.
    #[test]
    fn valid_tokens_lex_cleanly(input in prop::collection::vec(valid_single_token(), 0..20)) {
        let joined = input.join(" ");
        prop_assert!(lex(&joined).is_ok());
    }
}
