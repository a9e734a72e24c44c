// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Lexical analysis for MiniJava source code.
//!
//! This module converts source text into a stream of [`Token`]s. The
//! lexer is hand-written, pulling characters through a one-character
//! lookahead cursor: a maximal run of identifier or digit characters is
//! scanned by peeking at the terminating character instead of
//! consuming it, which stands in for the stream pushback the scanner
//! contract requires.
//!
//! # Position bookkeeping
//!
//! Lines and columns start at 1. Whitespace advances the column by one
//! per space and four per tab; a carriage return resets the column; a
//! newline advances the line and resets the column. Comments (`// …`
//! and `/* … */`) are skipped transparently — the scan routine is
//! re-entered after one is consumed — with newline bookkeeping applied
//! to their content. Each token carries the position the scanner had
//! reached when the token was recognized.
//!
//! # Errors
//!
//! Any character outside the MiniJava alphabet is a fatal [`LexError`];
//! there is no error recovery. Calling [`Lexer::next_token`] after end
//! of input keeps returning the EOF token.

use std::iter::Peekable;
use std::str::Chars;

use ecow::EcoString;

use super::{LexError, LexErrorKind, Token, TokenKind};

/// A lexer that tokenizes MiniJava source code.
///
/// Produces one token per [`Lexer::next_token`] call until the EOF
/// token, which repeats on every further call.
pub struct Lexer<'src> {
    /// Character cursor with one character of lookahead.
    chars: Peekable<Chars<'src>>,
    /// Current line, starting at 1.
    line: u32,
    /// Current column, starting at 1.
    column: u32,
}

impl std::fmt::Debug for Lexer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lexer")
            .field("line", &self.line)
            .field("column", &self.column)
            .finish_non_exhaustive()
    }
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer for the given source text.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            chars: source.chars().peekable(),
            line: 1,
            column: 1,
        }
    }

    /// Lexes the next token.
    ///
    /// # Errors
    ///
    /// Returns a [`LexError`] on a character outside the MiniJava
    /// alphabet, an isolated `&`, or an unterminated block comment.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_blanks();

        let Some(&c) = self.chars.peek() else {
            return Ok(Token::new(TokenKind::Eof, self.line, self.column));
        };

        if c.is_ascii_alphabetic() || c == '_' {
            return Ok(self.lex_identifier_or_keyword());
        }
        if c.is_ascii_digit() {
            return Ok(self.lex_number());
        }

        match c {
            '+' => Ok(self.punctuation(TokenKind::Plus)),
            '-' => Ok(self.punctuation(TokenKind::Minus)),
            '*' => Ok(self.punctuation(TokenKind::Star)),
            '=' => Ok(self.punctuation(TokenKind::Assign)),
            ',' => Ok(self.punctuation(TokenKind::Comma)),
            '.' => Ok(self.punctuation(TokenKind::Dot)),
            '{' => Ok(self.punctuation(TokenKind::LeftBrace)),
            '[' => Ok(self.punctuation(TokenKind::LeftBracket)),
            '(' => Ok(self.punctuation(TokenKind::LeftParen)),
            '<' => Ok(self.punctuation(TokenKind::Less)),
            '!' => Ok(self.punctuation(TokenKind::Not)),
            '}' => Ok(self.punctuation(TokenKind::RightBrace)),
            ']' => Ok(self.punctuation(TokenKind::RightBracket)),
            ')' => Ok(self.punctuation(TokenKind::RightParen)),
            ';' => Ok(self.punctuation(TokenKind::Semicolon)),
            '&' => self.lex_and(),
            '/' => self.lex_comment_or_fail(),
            _ => Err(LexError::unexpected_char(c, self.line, self.column + 1)),
        }
    }

    /// Consumes a single-character token.
    fn punctuation(&mut self, kind: TokenKind) -> Token {
        self.chars.next();
        self.column += 1;
        Token::new(kind, self.line, self.column)
    }

    /// Lexes `&&`. A lone `&` is a fatal error: the language has no
    /// bitwise operators.
    fn lex_and(&mut self) -> Result<Token, LexError> {
        self.chars.next();
        if self.chars.peek() == Some(&'&') {
            self.chars.next();
            self.column += 2;
            Ok(Token::new(TokenKind::AndAnd, self.line, self.column))
        } else {
            self.column += 1;
            Err(LexError::new(
                LexErrorKind::LoneAmpersand,
                self.line,
                self.column,
            ))
        }
    }

    /// Lexes an identifier or keyword: `[A-Za-z_][A-Za-z0-9_]*`.
    fn lex_identifier_or_keyword(&mut self) -> Token {
        let mut lexeme = EcoString::new();
        while let Some(&c) = self.chars.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                lexeme.push(c);
                self.chars.next();
                self.column += 1;
            } else {
                break;
            }
        }
        let kind = match TokenKind::keyword(&lexeme) {
            Some(kind) => kind,
            None => TokenKind::Identifier(lexeme),
        };
        Token::new(kind, self.line, self.column)
    }

    /// Lexes a digit run. The lexeme is kept as text; the parser turns
    /// it into a value so it can report range errors with context.
    fn lex_number(&mut self) -> Token {
        let mut lexeme = EcoString::new();
        while let Some(&c) = self.chars.peek() {
            if c.is_ascii_digit() {
                lexeme.push(c);
                self.chars.next();
                self.column += 1;
            } else {
                break;
            }
        }
        Token::new(TokenKind::Number(lexeme), self.line, self.column)
    }

    /// Consumes a `//` or `/*` comment and re-enters the scan.
    ///
    /// A `/` introducing neither comment form is a fatal error: the
    /// language has no division operator.
    fn lex_comment_or_fail(&mut self) -> Result<Token, LexError> {
        self.chars.next(); // /
        match self.chars.peek() {
            Some('/') => {
                self.chars.next();
                self.skip_line_comment();
                self.next_token()
            }
            Some('*') => {
                self.chars.next();
                self.skip_block_comment()?;
                self.next_token()
            }
            _ => {
                self.column += 1;
                Err(LexError::unexpected_char('/', self.line, self.column))
            }
        }
    }

    /// Skips the remainder of a `// …` comment. The terminating
    /// newline (when present) is consumed and counted.
    fn skip_line_comment(&mut self) {
        for c in self.chars.by_ref() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
                break;
            }
        }
    }

    /// Skips the remainder of a `/* … */` comment, counting embedded
    /// newlines. Reaching end of input first is a fatal error.
    fn skip_block_comment(&mut self) -> Result<(), LexError> {
        loop {
            match self.chars.next() {
                None => {
                    return Err(LexError::new(
                        LexErrorKind::UnterminatedComment,
                        self.line,
                        self.column,
                    ));
                }
                Some('\n') => {
                    self.line += 1;
                    self.column = 1;
                }
                Some('*') if self.chars.peek() == Some(&'/') => {
                    self.chars.next();
                    return Ok(());
                }
                Some(_) => {}
            }
        }
    }

    /// Skips whitespace, applying the column bookkeeping rules.
    fn skip_blanks(&mut self) {
        while let Some(&c) = self.chars.peek() {
            match c {
                ' ' => self.column += 1,
                '\t' => self.column += 4,
                '\r' => self.column = 1,
                '\n' => {
                    self.line += 1;
                    self.column = 1;
                }
                _ => break,
            }
            self.chars.next();
        }
    }
}

/// Convenience function to lex source into a vector of tokens,
/// excluding the EOF token.
///
/// The parser drives a [`Lexer`] directly; this is for tests and the
/// token dump.
///
/// # Errors
///
/// Returns the first fatal [`LexError`], if any.
pub fn lex(source: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token()?;
        if token.kind().is_eof() {
            return Ok(tokens);
        }
        tokens.push(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper to lex and extract just the token kinds.
    fn lex_kinds(source: &str) -> Vec<TokenKind> {
        lex(source)
            .expect("lexing should succeed")
            .into_iter()
            .map(Token::into_kind)
            .collect()
    }

    #[test]
    fn lex_empty() {
        assert!(lex("").unwrap().is_empty());
        assert!(lex("   \t \r\n ").unwrap().is_empty());
        assert!(lex("// just a comment").unwrap().is_empty());
    }

    #[test]
    fn lex_keywords() {
        assert_eq!(
            lex_kinds("class extends public static void main"),
            vec![
                TokenKind::Class,
                TokenKind::Extends,
                TokenKind::Public,
                TokenKind::Static,
                TokenKind::Void,
                TokenKind::Main,
            ]
        );
        assert_eq!(
            lex_kinds("int boolean String System out println length"),
            vec![
                TokenKind::Int,
                TokenKind::Boolean,
                TokenKind::String,
                TokenKind::System,
                TokenKind::Out,
                TokenKind::Println,
                TokenKind::Length,
            ]
        );
    }

    #[test]
    fn lex_identifiers() {
        assert_eq!(
            lex_kinds("foo ComputeFac _aux x1 classy"),
            vec![
                TokenKind::Identifier("foo".into()),
                TokenKind::Identifier("ComputeFac".into()),
                TokenKind::Identifier("_aux".into()),
                TokenKind::Identifier("x1".into()),
                TokenKind::Identifier("classy".into()),
            ]
        );
    }

    #[test]
    fn lex_numbers() {
        assert_eq!(
            lex_kinds("0 42 2147483647"),
            vec![
                TokenKind::Number("0".into()),
                TokenKind::Number("42".into()),
                TokenKind::Number("2147483647".into()),
            ]
        );
    }

    #[test]
    fn lex_punctuation() {
        assert_eq!(
            lex_kinds("+ - * = , . { [ ( < ! } ] ) ; &&"),
            vec![
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Assign,
                TokenKind::Comma,
                TokenKind::Dot,
                TokenKind::LeftBrace,
                TokenKind::LeftBracket,
                TokenKind::LeftParen,
                TokenKind::Less,
                TokenKind::Not,
                TokenKind::RightBrace,
                TokenKind::RightBracket,
                TokenKind::RightParen,
                TokenKind::Semicolon,
                TokenKind::AndAnd,
            ]
        );
    }

    #[test]
    fn lex_without_spaces() {
        assert_eq!(
            lex_kinds("x[i]=y.length;"),
            vec![
                TokenKind::Identifier("x".into()),
                TokenKind::LeftBracket,
                TokenKind::Identifier("i".into()),
                TokenKind::RightBracket,
                TokenKind::Assign,
                TokenKind::Identifier("y".into()),
                TokenKind::Dot,
                TokenKind::Length,
                TokenKind::Semicolon,
            ]
        );
    }

    #[test]
    fn lex_positions() {
        // Each token is stamped with the position reached after its
        // lexeme: `x` ends at column 2, `+` at 4, `1` at 6.
        let tokens = lex("x + 1").unwrap();
        let positions: Vec<(u32, u32)> =
            tokens.iter().map(|t| (t.line(), t.column())).collect();
        assert_eq!(positions, vec![(1, 2), (1, 4), (1, 6)]);
    }

    #[test]
    fn lex_tab_advances_column_by_four() {
        let tokens = lex("\tx").unwrap();
        assert_eq!(tokens[0].column(), 6);
    }

    #[test]
    fn lex_newline_resets_column() {
        let tokens = lex("a\nb").unwrap();
        assert_eq!((tokens[0].line(), tokens[0].column()), (1, 2));
        assert_eq!((tokens[1].line(), tokens[1].column()), (2, 2));
    }

    #[test]
    fn lex_carriage_return_resets_column() {
        let tokens = lex("a\rb").unwrap();
        assert_eq!((tokens[1].line(), tokens[1].column()), (1, 2));
    }

    #[test]
    fn lex_line_comment_then_eof() {
        let mut lexer = Lexer::new("x // trailing");
        assert!(matches!(
            lexer.next_token().unwrap().kind(),
            TokenKind::Identifier(_)
        ));
        assert!(lexer.next_token().unwrap().kind().is_eof());
    }

    #[test]
    fn lex_line_comment_counts_its_newline() {
        let tokens = lex("// first line\nx").unwrap();
        assert_eq!(tokens[0].line(), 2);
    }

    #[test]
    fn lex_block_comment_counts_embedded_newlines() {
        let tokens = lex("/* one\ntwo\nthree */ x").unwrap();
        assert_eq!(tokens[0].line(), 3);
    }

    #[test]
    fn lex_block_comment_between_tokens() {
        assert_eq!(
            lex_kinds("a /* ignored */ b"),
            vec![
                TokenKind::Identifier("a".into()),
                TokenKind::Identifier("b".into()),
            ]
        );
    }

    #[test]
    fn lex_unterminated_block_comment() {
        let mut lexer = Lexer::new("/* never closed");
        let err = lexer.next_token().unwrap_err();
        assert_eq!(err.kind, LexErrorKind::UnterminatedComment);
    }

    #[test]
    fn lex_eof_is_sticky() {
        let mut lexer = Lexer::new("x");
        assert!(!lexer.next_token().unwrap().kind().is_eof());
        assert!(lexer.next_token().unwrap().kind().is_eof());
        assert!(lexer.next_token().unwrap().kind().is_eof());
    }

    #[test]
    fn lex_unexpected_character() {
        let mut lexer = Lexer::new("x # y");
        lexer.next_token().unwrap();
        let err = lexer.next_token().unwrap_err();
        assert_eq!(err.kind, LexErrorKind::UnexpectedCharacter('#'));
        assert_eq!(err.line, 1);
    }

    #[test]
    fn lex_lone_ampersand() {
        let mut lexer = Lexer::new("a & b");
        lexer.next_token().unwrap();
        let err = lexer.next_token().unwrap_err();
        assert_eq!(err.kind, LexErrorKind::LoneAmpersand);
    }

    #[test]
    fn lex_slash_without_comment() {
        let mut lexer = Lexer::new("1 / 2");
        lexer.next_token().unwrap();
        let err = lexer.next_token().unwrap_err();
        assert_eq!(err.kind, LexErrorKind::UnexpectedCharacter('/'));
    }
}
