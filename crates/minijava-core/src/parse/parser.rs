// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Recursive descent parser for MiniJava source code.
//!
//! The parser consumes tokens straight from the [`Lexer`] with a single
//! token of lookahead and builds the whole [`Program`], or fails with
//! the first grammar violation. There is no error recovery and no
//! partial AST: a malformed program produces a fatal [`ParseError`]
//! that the driver turns into a non-zero exit.
//!
//! # Expression grammar
//!
//! Binary operators are parsed by a fixed ladder of productions, each
//! left-folding its operator over the next-tighter production:
//!
//! ```text
//! Exp       := AndExp (&& AndExp)*
//! AndExp    := LtExp (< LtExp)*
//! LtExp     := AddSubExp ((+ | -) AddSubExp)*
//! AddSubExp := TimesExp (* TimesExp)*
//! TimesExp  := !* NotExp
//! NotExp    := AtomExp (.id(ExpList) | [Exp] | .length)*
//! AtomExp   := (Exp) | NUM | true | false | this | id
//!            | new int [Exp] | new id ()
//! ```
//!
//! So `&&` binds loosest, then `<`, then `+`/`-`, then `*`, then `!`,
//! and the postfix forms bind tightest. All binary operators are
//! left-associative. This ladder is part of the language definition and
//! is reproduced exactly, including the production names.
//!
//! # Line stamping
//!
//! Every node is stamped with the parser's lookahead line once the
//! production's body has been consumed, so a node ending a source line
//! carries the line of the token that follows it. The convention comes
//! from the language's reference front end and is relied on by the
//! diagnostics tests.

use ecow::EcoString;

use crate::ast::{
    ClassDecl, Declaration, Expression, MainClass, MethodDecl, NodeId, Program, Statement, Type,
};
use crate::parse::{Lexer, ParseError, Token, TokenKind};

/// Parses one compilation unit.
///
/// Convenience entry point over [`Parser`].
///
/// # Errors
///
/// Returns the fatal [`ParseError`] for the first lexical or grammar
/// violation.
pub fn parse(source: &str) -> Result<Program, ParseError> {
    Parser::new(source)?.parse()
}

/// The parser state: the lexer it drains and one token of lookahead.
pub struct Parser<'src> {
    /// Token source.
    lexer: Lexer<'src>,
    /// The lookahead token.
    current: Token,
    /// Echo each token to stdout as it is pulled.
    dump_tokens: bool,
    /// Next [`NodeId`] to hand out.
    next_node: u32,
}

impl<'src> Parser<'src> {
    /// Creates a parser over the given source, priming the lookahead.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if the very first token is malformed.
    pub fn new(source: &'src str) -> Result<Self, ParseError> {
        Self::with_token_dump(source, false)
    }

    /// Creates a parser that optionally dumps every token it pulls.
    ///
    /// The dump is purely observational; it is the `--dump-tokens`
    /// toggle of the driver.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if the very first token is malformed.
    pub fn with_token_dump(source: &'src str, dump_tokens: bool) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token()?;
        if dump_tokens {
            println!("{current}");
        }
        Ok(Self {
            lexer,
            current,
            dump_tokens,
            next_node: 0,
        })
    }

    /// Parses the whole program.
    ///
    /// # Errors
    ///
    /// Returns the fatal [`ParseError`] for the first violation.
    pub fn parse(mut self) -> Result<Program, ParseError> {
        self.parse_program()
    }

    // ========================================================================
    // Token Management
    // ========================================================================

    /// Replaces the lookahead with the next token.
    fn advance(&mut self) -> Result<(), ParseError> {
        self.current = self.lexer.next_token()?;
        if self.dump_tokens {
            println!("{}", self.current);
        }
        Ok(())
    }

    /// Checks whether the lookahead is exactly the given kind.
    fn check(&self, kind: &TokenKind) -> bool {
        self.current.kind() == kind
    }

    /// Consumes the lookahead if it is the given kind, fails otherwise.
    ///
    /// Only used for fixed (payload-free) kinds; identifiers go through
    /// [`Parser::expect_identifier`].
    fn eat(&mut self, kind: &TokenKind) -> Result<(), ParseError> {
        if self.check(kind) {
            self.advance()
        } else {
            Err(self.unexpected(kind.describe()))
        }
    }

    /// Consumes an identifier token and returns its lexeme.
    fn expect_identifier(&mut self) -> Result<EcoString, ParseError> {
        if let TokenKind::Identifier(name) = self.current.kind() {
            let name = name.clone();
            self.advance()?;
            Ok(name)
        } else {
            Err(self.unexpected("an identifier".into()))
        }
    }

    /// The lookahead line, used to stamp finished nodes.
    fn line(&self) -> u32 {
        self.current.line()
    }

    /// Hands out the next node id.
    fn fresh_node(&mut self) -> NodeId {
        let id = NodeId::new(self.next_node);
        self.next_node += 1;
        id
    }

    // ========================================================================
    // Errors
    // ========================================================================

    fn unexpected(&self, expected: EcoString) -> ParseError {
        ParseError::UnexpectedToken {
            expected,
            found: self.current.kind().describe(),
            line: self.current.line(),
            column: self.current.column(),
        }
    }

    fn unexpected_statement(&self) -> ParseError {
        ParseError::UnexpectedStatement {
            found: self.current.kind().describe(),
            line: self.current.line(),
            column: self.current.column(),
        }
    }

    fn unexpected_type(&self) -> ParseError {
        ParseError::UnexpectedType {
            found: self.current.kind().describe(),
            line: self.current.line(),
            column: self.current.column(),
        }
    }

    fn unexpected_expression(&self) -> ParseError {
        ParseError::UnexpectedExpression {
            found: self.current.kind().describe(),
            line: self.current.line(),
            column: self.current.column(),
        }
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    // ExpList -> Exp (, Exp)*
    //         ->
    fn parse_exp_list(&mut self) -> Result<Vec<Expression>, ParseError> {
        let mut arguments = Vec::new();
        if self.check(&TokenKind::RightParen) {
            return Ok(arguments);
        }
        arguments.push(self.parse_exp()?);
        while self.check(&TokenKind::Comma) {
            self.advance()?;
            arguments.push(self.parse_exp()?);
        }
        Ok(arguments)
    }

    // AtomExp -> (Exp)
    //         -> NUM
    //         -> true
    //         -> false
    //         -> this
    //         -> id
    //         -> new int [Exp]
    //         -> new id ()
    fn parse_atom_exp(&mut self) -> Result<Expression, ParseError> {
        match self.current.kind() {
            TokenKind::LeftParen => {
                self.advance()?;
                let exp = self.parse_exp()?;
                self.eat(&TokenKind::RightParen)?;
                Ok(exp)
            }
            TokenKind::Number(lexeme) => {
                let lexeme = lexeme.clone();
                let value: i32 = lexeme.parse().map_err(|_| ParseError::IntegerOutOfRange {
                    lexeme: lexeme.clone(),
                    line: self.current.line(),
                })?;
                self.advance()?;
                Ok(Expression::Num {
                    value,
                    line: self.line(),
                })
            }
            TokenKind::True => {
                self.advance()?;
                Ok(Expression::True { line: self.line() })
            }
            TokenKind::False => {
                self.advance()?;
                Ok(Expression::False { line: self.line() })
            }
            TokenKind::This => {
                self.advance()?;
                Ok(Expression::This { line: self.line() })
            }
            TokenKind::Identifier(name) => {
                let name = name.clone();
                self.advance()?;
                Ok(Expression::Id {
                    name,
                    node: self.fresh_node(),
                    line: self.line(),
                })
            }
            TokenKind::New => {
                self.advance()?;
                match self.current.kind() {
                    TokenKind::Int => {
                        self.advance()?;
                        self.eat(&TokenKind::LeftBracket)?;
                        let length = self.parse_exp()?;
                        self.eat(&TokenKind::RightBracket)?;
                        Ok(Expression::NewIntArray {
                            length: Box::new(length),
                            line: self.line(),
                        })
                    }
                    TokenKind::Identifier(name) => {
                        let class = name.clone();
                        self.advance()?;
                        self.eat(&TokenKind::LeftParen)?;
                        self.eat(&TokenKind::RightParen)?;
                        Ok(Expression::NewObject {
                            class,
                            line: self.line(),
                        })
                    }
                    _ => Err(self.unexpected_expression()),
                }
            }
            _ => Err(self.unexpected_expression()),
        }
    }

    // NotExp -> AtomExp
    //        -> AtomExp .id(ExpList)
    //        -> AtomExp [Exp]
    //        -> AtomExp .length
    fn parse_not_exp(&mut self) -> Result<Expression, ParseError> {
        let mut exp = self.parse_atom_exp()?;
        while matches!(
            self.current.kind(),
            TokenKind::Dot | TokenKind::LeftBracket
        ) {
            if self.check(&TokenKind::Dot) {
                self.advance()?;
                if self.check(&TokenKind::Length) {
                    self.advance()?;
                    // `.length` ends the postfix chain.
                    return Ok(Expression::Length {
                        array: Box::new(exp),
                        line: self.line(),
                    });
                }
                let method = self.expect_identifier()?;
                self.eat(&TokenKind::LeftParen)?;
                let arguments = self.parse_exp_list()?;
                self.eat(&TokenKind::RightParen)?;
                exp = Expression::Call {
                    node: self.fresh_node(),
                    receiver: Box::new(exp),
                    method,
                    arguments,
                    line: self.line(),
                };
            } else {
                self.advance()?;
                let index = self.parse_exp()?;
                self.eat(&TokenKind::RightBracket)?;
                exp = Expression::ArraySelect {
                    array: Box::new(exp),
                    index: Box::new(index),
                    line: self.line(),
                };
            }
        }
        Ok(exp)
    }

    // TimesExp -> ! TimesExp
    //          -> NotExp
    fn parse_times_exp(&mut self) -> Result<Expression, ParseError> {
        let mut nots = 0;
        while self.check(&TokenKind::Not) {
            self.advance()?;
            nots += 1;
        }
        let mut exp = self.parse_not_exp()?;
        for _ in 0..nots {
            exp = Expression::Not {
                operand: Box::new(exp),
                line: self.line(),
            };
        }
        Ok(exp)
    }

    // AddSubExp -> TimesExp * TimesExp
    //           -> TimesExp
    fn parse_add_sub_exp(&mut self) -> Result<Expression, ParseError> {
        let mut exp = self.parse_times_exp()?;
        while self.check(&TokenKind::Star) {
            self.advance()?;
            let right = self.parse_times_exp()?;
            exp = Expression::Times {
                left: Box::new(exp),
                right: Box::new(right),
                line: self.line(),
            };
        }
        Ok(exp)
    }

    // LtExp -> AddSubExp + AddSubExp
    //       -> AddSubExp - AddSubExp
    //       -> AddSubExp
    fn parse_lt_exp(&mut self) -> Result<Expression, ParseError> {
        let mut exp = self.parse_add_sub_exp()?;
        while matches!(self.current.kind(), TokenKind::Plus | TokenKind::Minus) {
            let is_add = self.check(&TokenKind::Plus);
            self.advance()?;
            let right = self.parse_add_sub_exp()?;
            let line = self.line();
            exp = if is_add {
                Expression::Add {
                    left: Box::new(exp),
                    right: Box::new(right),
                    line,
                }
            } else {
                Expression::Sub {
                    left: Box::new(exp),
                    right: Box::new(right),
                    line,
                }
            };
        }
        Ok(exp)
    }

    // AndExp -> LtExp < LtExp
    //        -> LtExp
    fn parse_and_exp(&mut self) -> Result<Expression, ParseError> {
        let mut exp = self.parse_lt_exp()?;
        while self.check(&TokenKind::Less) {
            self.advance()?;
            let right = self.parse_lt_exp()?;
            exp = Expression::Lt {
                left: Box::new(exp),
                right: Box::new(right),
                line: self.line(),
            };
        }
        Ok(exp)
    }

    // Exp -> AndExp && AndExp
    //     -> AndExp
    fn parse_exp(&mut self) -> Result<Expression, ParseError> {
        let mut exp = self.parse_and_exp()?;
        while self.check(&TokenKind::AndAnd) {
            self.advance()?;
            let right = self.parse_and_exp()?;
            exp = Expression::And {
                left: Box::new(exp),
                right: Box::new(right),
                line: self.line(),
            };
        }
        Ok(exp)
    }

    // ========================================================================
    // Statements
    // ========================================================================

    // Statement -> { Statement* }
    //           -> if (Exp) Statement else Statement
    //           -> while (Exp) Statement
    //           -> System.out.println(Exp);
    //           -> id = Exp;
    //           -> id[Exp] = Exp;
    fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        match self.current.kind() {
            TokenKind::LeftBrace => {
                self.advance()?;
                let statements = self.parse_statements()?;
                self.eat(&TokenKind::RightBrace)?;
                Ok(Statement::Block {
                    statements,
                    line: self.line(),
                })
            }
            TokenKind::If => {
                self.advance()?;
                self.eat(&TokenKind::LeftParen)?;
                let condition = self.parse_exp()?;
                self.eat(&TokenKind::RightParen)?;
                let then_branch = self.parse_statement()?;
                self.eat(&TokenKind::Else)?;
                let else_branch = self.parse_statement()?;
                Ok(Statement::If {
                    condition,
                    then_branch: Box::new(then_branch),
                    else_branch: Box::new(else_branch),
                    line: self.line(),
                })
            }
            TokenKind::While => {
                self.advance()?;
                self.eat(&TokenKind::LeftParen)?;
                let condition = self.parse_exp()?;
                self.eat(&TokenKind::RightParen)?;
                let body = self.parse_statement()?;
                Ok(Statement::While {
                    condition,
                    body: Box::new(body),
                    line: self.line(),
                })
            }
            TokenKind::System => {
                self.advance()?;
                self.eat(&TokenKind::Dot)?;
                self.eat(&TokenKind::Out)?;
                self.eat(&TokenKind::Dot)?;
                self.eat(&TokenKind::Println)?;
                self.eat(&TokenKind::LeftParen)?;
                let expr = self.parse_exp()?;
                self.eat(&TokenKind::RightParen)?;
                self.eat(&TokenKind::Semicolon)?;
                Ok(Statement::Print {
                    expr,
                    line: self.line(),
                })
            }
            TokenKind::Identifier(_) => {
                let id = self.expect_identifier()?;
                match self.current.kind() {
                    TokenKind::Assign => {
                        self.advance()?;
                        let expr = self.parse_exp()?;
                        self.eat(&TokenKind::Semicolon)?;
                        Ok(Statement::Assign {
                            id,
                            expr,
                            line: self.line(),
                        })
                    }
                    TokenKind::LeftBracket => {
                        self.advance()?;
                        let index = self.parse_exp()?;
                        self.eat(&TokenKind::RightBracket)?;
                        self.eat(&TokenKind::Assign)?;
                        let expr = self.parse_exp()?;
                        self.eat(&TokenKind::Semicolon)?;
                        Ok(Statement::AssignArray {
                            id,
                            index,
                            expr,
                            line: self.line(),
                        })
                    }
                    _ => Err(self.unexpected_statement()),
                }
            }
            _ => Err(self.unexpected_statement()),
        }
    }

    // Statements -> Statement Statements
    //            ->
    fn parse_statements(&mut self) -> Result<Vec<Statement>, ParseError> {
        let mut statements = Vec::new();
        while matches!(
            self.current.kind(),
            TokenKind::LeftBrace
                | TokenKind::If
                | TokenKind::While
                | TokenKind::System
                | TokenKind::Identifier(_)
        ) {
            statements.push(self.parse_statement()?);
        }
        Ok(statements)
    }

    // ========================================================================
    // Types and Declarations
    // ========================================================================

    // Type -> int []
    //      -> boolean
    //      -> int
    //      -> id
    fn parse_type(&mut self) -> Result<Type, ParseError> {
        match self.current.kind() {
            TokenKind::Int => {
                self.advance()?;
                if self.check(&TokenKind::LeftBracket) {
                    self.advance()?;
                    self.eat(&TokenKind::RightBracket)?;
                    Ok(Type::IntArray)
                } else {
                    Ok(Type::Int)
                }
            }
            TokenKind::Boolean => {
                self.advance()?;
                Ok(Type::Boolean)
            }
            TokenKind::Identifier(name) => {
                let name = name.clone();
                self.advance()?;
                Ok(Type::Class(name))
            }
            _ => Err(self.unexpected_type()),
        }
    }

    // VarDecl -> Type id ;
    fn parse_var_decl(&mut self) -> Result<Declaration, ParseError> {
        let ty = self.parse_type()?;
        let id = self.expect_identifier()?;
        self.eat(&TokenKind::Semicolon)?;
        Ok(Declaration {
            ty,
            id,
            line: self.line(),
        })
    }

    // VarDecls -> VarDecl VarDecls
    //          ->
    fn parse_var_decls(&mut self) -> Result<Vec<Declaration>, ParseError> {
        let mut declarations = Vec::new();
        while matches!(
            self.current.kind(),
            TokenKind::Int | TokenKind::Boolean | TokenKind::Identifier(_)
        ) {
            declarations.push(self.parse_var_decl()?);
        }
        Ok(declarations)
    }

    // FormalList -> Type id FormalRest*
    //            ->
    // FormalRest -> , Type id
    fn parse_formal_list(&mut self) -> Result<Vec<Declaration>, ParseError> {
        let mut formals = Vec::new();
        if matches!(
            self.current.kind(),
            TokenKind::Int | TokenKind::Boolean | TokenKind::Identifier(_)
        ) {
            let ty = self.parse_type()?;
            let id = self.expect_identifier()?;
            formals.push(Declaration {
                ty,
                id,
                line: self.line(),
            });
            while self.check(&TokenKind::Comma) {
                self.advance()?;
                let ty = self.parse_type()?;
                let id = self.expect_identifier()?;
                formals.push(Declaration {
                    ty,
                    id,
                    line: self.line(),
                });
            }
        }
        Ok(formals)
    }

    // ========================================================================
    // Methods, Classes, Program
    // ========================================================================

    // Method -> public Type id (FormalList)
    //           { VarDecl* Statement* return Exp; }
    fn parse_method(&mut self) -> Result<MethodDecl, ParseError> {
        self.eat(&TokenKind::Public)?;
        let return_type = self.parse_type()?;
        let id = self.expect_identifier()?;
        self.eat(&TokenKind::LeftParen)?;
        let formals = self.parse_formal_list()?;
        self.eat(&TokenKind::RightParen)?;
        self.eat(&TokenKind::LeftBrace)?;

        let mut locals = Vec::new();
        let mut body = Vec::new();

        // A lookahead of `id id` is a class-typed local declaration;
        // `id =` and `id [` start the first statement of the body and
        // end the declaration run.
        while matches!(
            self.current.kind(),
            TokenKind::Int | TokenKind::Boolean | TokenKind::Identifier(_)
        ) {
            if let TokenKind::Identifier(name) = self.current.kind() {
                let id = name.clone();
                self.advance()?;
                match self.current.kind() {
                    TokenKind::Identifier(var) => {
                        let var = var.clone();
                        self.advance()?;
                        self.eat(&TokenKind::Semicolon)?;
                        locals.push(Declaration {
                            ty: Type::Class(id),
                            id: var,
                            line: self.line(),
                        });
                    }
                    TokenKind::Assign => {
                        self.advance()?;
                        let expr = self.parse_exp()?;
                        self.eat(&TokenKind::Semicolon)?;
                        body.push(Statement::Assign {
                            id,
                            expr,
                            line: self.line(),
                        });
                        break;
                    }
                    TokenKind::LeftBracket => {
                        self.advance()?;
                        let index = self.parse_exp()?;
                        self.eat(&TokenKind::RightBracket)?;
                        self.eat(&TokenKind::Assign)?;
                        let expr = self.parse_exp()?;
                        self.eat(&TokenKind::Semicolon)?;
                        body.push(Statement::AssignArray {
                            id,
                            index,
                            expr,
                            line: self.line(),
                        });
                        break;
                    }
                    _ => return Err(self.unexpected_statement()),
                }
            } else {
                locals.push(self.parse_var_decl()?);
            }
        }

        body.extend(self.parse_statements()?);

        self.eat(&TokenKind::Return)?;
        let return_expr = self.parse_exp()?;
        self.eat(&TokenKind::Semicolon)?;
        self.eat(&TokenKind::RightBrace)?;

        Ok(MethodDecl {
            return_type,
            id,
            formals,
            locals,
            body,
            return_expr,
            line: self.line(),
        })
    }

    // MethodDecls -> MethodDecl MethodDecls
    //             ->
    fn parse_method_decls(&mut self) -> Result<Vec<MethodDecl>, ParseError> {
        let mut methods = Vec::new();
        while self.check(&TokenKind::Public) {
            methods.push(self.parse_method()?);
        }
        Ok(methods)
    }

    // ClassDecl -> class id { VarDecl* MethodDecl* }
    //           -> class id extends id { VarDecl* MethodDecl* }
    fn parse_class_decl(&mut self) -> Result<ClassDecl, ParseError> {
        self.eat(&TokenKind::Class)?;
        let id = self.expect_identifier()?;
        let parent = if self.check(&TokenKind::Extends) {
            self.advance()?;
            Some(self.expect_identifier()?)
        } else {
            None
        };
        self.eat(&TokenKind::LeftBrace)?;
        let fields = self.parse_var_decls()?;
        let methods = self.parse_method_decls()?;
        self.eat(&TokenKind::RightBrace)?;
        Ok(ClassDecl {
            id,
            parent,
            fields,
            methods,
            line: self.line(),
        })
    }

    // MainClass -> class id {
    //                public static void main (String [] id) { Statement }
    //              }
    fn parse_main_class(&mut self) -> Result<MainClass, ParseError> {
        self.eat(&TokenKind::Class)?;
        let id = self.expect_identifier()?;
        self.eat(&TokenKind::LeftBrace)?;
        self.eat(&TokenKind::Public)?;
        self.eat(&TokenKind::Static)?;
        self.eat(&TokenKind::Void)?;
        self.eat(&TokenKind::Main)?;
        self.eat(&TokenKind::LeftParen)?;
        self.eat(&TokenKind::String)?;
        self.eat(&TokenKind::LeftBracket)?;
        self.eat(&TokenKind::RightBracket)?;
        let arg_name = self.expect_identifier()?;
        self.eat(&TokenKind::RightParen)?;
        self.eat(&TokenKind::LeftBrace)?;
        let body = self.parse_statement()?;
        self.eat(&TokenKind::RightBrace)?;
        self.eat(&TokenKind::RightBrace)?;
        Ok(MainClass {
            id,
            arg_name,
            body,
            line: self.line(),
        })
    }

    // Program -> MainClass ClassDecl* EOF
    fn parse_program(&mut self) -> Result<Program, ParseError> {
        let main_class = self.parse_main_class()?;
        let mut classes = Vec::new();
        while self.check(&TokenKind::Class) {
            classes.push(self.parse_class_decl()?);
        }
        self.eat(&TokenKind::Eof)?;
        Ok(Program {
            main_class,
            classes,
            line: self.line(),
        })
    }
}
