// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! The two-pass semantic elaborator.
//!
//! Pass 1 walks the program's class, field, and method headers —
//! without entering method bodies — and builds the whole-program
//! [`ClassTable`], so forward references resolve. Pass 2 walks every
//! method body, resolving identifiers and method calls, checking
//! types, and recording resolutions in an [`Annotations`] side table.
//!
//! Duplicate definitions are fatal: they corrupt the tables that every
//! later check depends on. Everything else found in pass 2 — undefined
//! references, call arity and argument-type problems, type mismatches,
//! unused variables — is an independent per-expression fact, so it is
//! collected as a [`Diagnostic`] and elaboration continues; one run
//! surfaces all of them.
//!
//! # Type compatibility
//!
//! [`Elaborator::check_type`] compares only the variant tags of the two
//! types, so two class types with different names are compatible. Call
//! arguments are the one exception: they are compared by the types'
//! rendered text, which does distinguish class names. Both behaviors
//! come from the language's reference front end and are kept exactly;
//! see `DESIGN.md`. An expression with no elaborated type (after an
//! unresolved reference) imposes no constraint, which keeps one
//! undefined name from cascading into noise.

use ecow::EcoString;

use super::{
    Annotations, CallResolution, ClassTable, ElabError, IdResolution, MethodSignature, MethodTable,
};
use crate::ast::{ClassDecl, Expression, MainClass, MethodDecl, Program, Statement, Type};
use crate::diagnostics::Diagnostic;

/// The result of a successful elaboration.
///
/// "Successful" means no fatal error; the diagnostics may still report
/// type errors that make the program unfit for code generation.
#[derive(Debug, Clone)]
pub struct Elaboration {
    /// The whole-program class table built by pass 1.
    pub class_table: ClassTable,
    /// Resolutions for `Id` and `Call` expressions.
    pub annotations: Annotations,
    /// Non-fatal findings, in discovery order.
    pub diagnostics: Vec<Diagnostic>,
}

/// Elaborates a program.
///
/// Convenience entry point over [`Elaborator`] with dumps disabled.
///
/// # Errors
///
/// Returns a fatal [`ElabError`] on a duplicate definition.
pub fn elaborate(program: &Program) -> Result<Elaboration, ElabError> {
    Elaborator::new().run(program)
}

/// The elaborator state.
///
/// Ambient state for pass 2: the enclosing class name (resolves `this`
/// and unqualified field access) and the current method's symbol table.
pub struct Elaborator {
    class_table: ClassTable,
    method_table: MethodTable,
    current_class: EcoString,
    diagnostics: Vec<Diagnostic>,
    annotations: Annotations,
    dump_class_table: bool,
    dump_method_tables: bool,
}

impl Default for Elaborator {
    fn default() -> Self {
        Self::new()
    }
}

impl Elaborator {
    /// Creates an elaborator with dumps disabled.
    #[must_use]
    pub fn new() -> Self {
        Self::with_dumps(false, false)
    }

    /// Creates an elaborator with the observational dump toggles.
    ///
    /// `dump_class_table` prints the class table after pass 1;
    /// `dump_method_tables` prints each method's table as pass 2 enters
    /// the method. Neither affects results.
    #[must_use]
    pub fn with_dumps(dump_class_table: bool, dump_method_tables: bool) -> Self {
        Self {
            class_table: ClassTable::new(),
            method_table: MethodTable::new(),
            current_class: EcoString::new(),
            diagnostics: Vec::new(),
            annotations: Annotations::new(),
            dump_class_table,
            dump_method_tables,
        }
    }

    /// Runs both passes over the program.
    ///
    /// # Errors
    ///
    /// Returns a fatal [`ElabError`] on a duplicate definition.
    pub fn run(mut self, program: &Program) -> Result<Elaboration, ElabError> {
        self.build_class_table(program)?;
        if self.dump_class_table {
            print!("{}", self.class_table);
        }

        self.elab_main_class(&program.main_class);
        for class in &program.classes {
            self.elab_class(class)?;
        }

        Ok(Elaboration {
            class_table: self.class_table,
            annotations: self.annotations,
            diagnostics: self.diagnostics,
        })
    }

    // ========================================================================
    // Pass 1: class table construction
    // ========================================================================

    /// Registers every class with its fields and method signatures.
    ///
    /// The main class is bound with no parent and no members. Method
    /// bodies are not entered.
    fn build_class_table(&mut self, program: &Program) -> Result<(), ElabError> {
        self.class_table.add_class(
            &program.main_class.id,
            None,
            program.main_class.line,
        )?;

        for class in &program.classes {
            self.class_table
                .add_class(&class.id, class.parent.clone(), class.line)?;
            for field in &class.fields {
                self.class_table.add_field(&class.id, field)?;
            }
            for method in &class.methods {
                let signature = MethodSignature {
                    return_type: method.return_type.clone(),
                    formals: method.formals.iter().map(|f| f.ty.clone()).collect(),
                };
                self.class_table
                    .add_method(&class.id, &method.id, signature, method.line)?;
            }
        }
        Ok(())
    }

    // ========================================================================
    // Pass 2: resolution and type checking
    // ========================================================================

    /// Elaborates the main class's single statement.
    ///
    /// `main`'s `String[]` parameter is unusable in the language, so
    /// the method table is simply empty here.
    fn elab_main_class(&mut self, main: &MainClass) {
        self.current_class = main.id.clone();
        self.method_table = MethodTable::new();
        self.elab_statement(&main.body);
    }

    fn elab_class(&mut self, class: &ClassDecl) -> Result<(), ElabError> {
        self.current_class = class.id.clone();
        for method in &class.methods {
            self.elab_method(method)?;
        }
        Ok(())
    }

    fn elab_method(&mut self, method: &MethodDecl) -> Result<(), ElabError> {
        self.method_table = MethodTable::build(&method.formals, &method.locals)?;
        if self.dump_method_tables {
            println!("method {}:", method.id);
            print!("{}", self.method_table);
        }

        for statement in &method.body {
            self.elab_statement(statement);
        }
        self.elab_expression(&method.return_expr);

        let unused = self.method_table.unused().to_vec();
        for (name, line) in unused {
            self.diagnostics.push(Diagnostic::warning(
                format!("variable `{name}` declared at line {line} is never used"),
                line,
            ));
        }
        Ok(())
    }

    fn elab_statement(&mut self, statement: &Statement) {
        match statement {
            Statement::Block { statements, .. } => {
                for statement in statements {
                    self.elab_statement(statement);
                }
            }
            Statement::If {
                condition,
                then_branch,
                else_branch,
                line,
            } => {
                let condition_ty = self.elab_expression(condition);
                self.check_type(&Type::Boolean, condition_ty.as_ref(), *line);
                self.elab_statement(then_branch);
                self.elab_statement(else_branch);
            }
            Statement::While {
                condition,
                body,
                line,
            } => {
                let condition_ty = self.elab_expression(condition);
                self.check_type(&Type::Boolean, condition_ty.as_ref(), *line);
                self.elab_statement(body);
            }
            Statement::Print { expr, line } => {
                let expr_ty = self.elab_expression(expr);
                self.check_type(&Type::Int, expr_ty.as_ref(), *line);
            }
            Statement::Assign { id, expr, line } => {
                let declared = self.resolve_variable(id);
                let expr_ty = self.elab_expression(expr);
                match declared {
                    None => self.undefined_reference(id, *line),
                    Some(declared) => self.check_type(&declared, expr_ty.as_ref(), *line),
                }
            }
            Statement::AssignArray {
                id,
                index,
                expr,
                line,
            } => {
                match self.resolve_variable(id) {
                    None => self.undefined_reference(id, *line),
                    Some(declared) => {
                        self.check_type(&Type::IntArray, Some(&declared), *line);
                    }
                }
                let index_ty = self.elab_expression(index);
                self.check_type(&Type::Int, index_ty.as_ref(), *line);
                let expr_ty = self.elab_expression(expr);
                self.check_type(&Type::Int, expr_ty.as_ref(), *line);
            }
        }
    }

    /// Elaborates an expression and returns its type, or `None` when no
    /// type could be established.
    fn elab_expression(&mut self, expression: &Expression) -> Option<Type> {
        match expression {
            Expression::Num { .. } => Some(Type::Int),
            Expression::True { .. } | Expression::False { .. } => Some(Type::Boolean),
            Expression::This { .. } => Some(Type::Class(self.current_class.clone())),

            Expression::Id { name, node, line } => {
                // Formals and locals win; fields are the fallback.
                let (ty, is_field) = match self.method_table.get(name) {
                    Some(ty) => (Some(ty), false),
                    None => {
                        let ty = self
                            .class_table
                            .field(&self.current_class, name)
                            .cloned();
                        (ty, true)
                    }
                };
                if ty.is_none() {
                    self.undefined_reference(name, *line);
                }
                self.annotations.record_id(
                    *node,
                    IdResolution {
                        ty: ty.clone(),
                        is_field,
                    },
                );
                ty
            }

            // No check that the class is declared.
            Expression::NewObject { class, .. } => Some(Type::Class(class.clone())),

            Expression::NewIntArray { length, line } => {
                let length_ty = self.elab_expression(length);
                self.check_type(&Type::Int, length_ty.as_ref(), *line);
                Some(Type::IntArray)
            }

            Expression::Add { left, right, line }
            | Expression::Sub { left, right, line }
            | Expression::Times { left, right, line } => {
                let left_ty = self.elab_expression(left);
                self.check_type(&Type::Int, left_ty.as_ref(), *line);
                let right_ty = self.elab_expression(right);
                self.check_type(&Type::Int, right_ty.as_ref(), *line);
                Some(Type::Int)
            }

            Expression::And { left, right, line } => {
                let left_ty = self.elab_expression(left);
                self.check_type(&Type::Boolean, left_ty.as_ref(), *line);
                let right_ty = self.elab_expression(right);
                self.check_type(&Type::Boolean, right_ty.as_ref(), *line);
                Some(Type::Boolean)
            }

            Expression::Lt { left, right, line } => {
                // The operands must agree with each other, not with int.
                let left_ty = self.elab_expression(left);
                let right_ty = self.elab_expression(right);
                if let Some(left_ty) = &left_ty {
                    self.check_type(left_ty, right_ty.as_ref(), *line);
                }
                Some(Type::Boolean)
            }

            Expression::Not { operand, line } => {
                let operand_ty = self.elab_expression(operand);
                self.check_type(&Type::Boolean, operand_ty.as_ref(), *line);
                Some(Type::Boolean)
            }

            Expression::ArraySelect { array, index, line } => {
                let array_ty = self.elab_expression(array);
                self.check_type(&Type::IntArray, array_ty.as_ref(), *line);
                let index_ty = self.elab_expression(index);
                self.check_type(&Type::Int, index_ty.as_ref(), *line);
                Some(Type::Int)
            }

            Expression::Length { array, line } => {
                let array_ty = self.elab_expression(array);
                self.check_type(&Type::IntArray, array_ty.as_ref(), *line);
                Some(Type::Int)
            }

            Expression::Call {
                node,
                receiver,
                method,
                arguments,
                line,
            } => self.elab_call(*node, receiver, method, arguments, *line),
        }
    }

    /// Elaborates a method call.
    ///
    /// A receiver with no established type aborts silently — the
    /// missing type was already reported where it arose. Lookup uses
    /// the receiver's class only (no parent walk), and argument types
    /// are compared by their rendered text.
    fn elab_call(
        &mut self,
        node: crate::ast::NodeId,
        receiver: &Expression,
        method: &EcoString,
        arguments: &[Expression],
        line: u32,
    ) -> Option<Type> {
        let receiver_ty = self.elab_expression(receiver)?;
        let Type::Class(class) = receiver_ty else {
            self.diagnostics.push(Diagnostic::error(
                format!("call receiver must have a class type, found `{receiver_ty}`"),
                line,
            ));
            return None;
        };

        let signature = self.class_table.method(&class, method).cloned();
        let argument_types: Vec<Option<Type>> = arguments
            .iter()
            .map(|argument| self.elab_expression(argument))
            .collect();

        let Some(signature) = signature else {
            self.diagnostics.push(Diagnostic::error(
                format!("undefined reference to method `{method}` on class `{class}`"),
                line,
            ));
            return None;
        };

        if signature.formals.len() != argument_types.len() {
            self.diagnostics.push(Diagnostic::error(
                format!(
                    "wrong number of arguments in call to `{class}.{method}`: expected {}, found {}",
                    signature.formals.len(),
                    argument_types.len()
                ),
                line,
            ));
            return None;
        }

        for (formal, actual) in signature.formals.iter().zip(&argument_types) {
            if let Some(actual) = actual {
                if formal.to_string() != actual.to_string() {
                    self.diagnostics.push(Diagnostic::error(
                        format!(
                            "wrong argument type in call to `{class}.{method}`: expected `{formal}`, found `{actual}`"
                        ),
                        line,
                    ));
                }
            }
        }

        self.annotations.record_call(
            node,
            CallResolution {
                receiver_class: class,
                argument_types,
                return_type: signature.return_type.clone(),
            },
        );
        Some(signature.return_type)
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    /// Resolves a name for assignment: the method table first, then the
    /// enclosing class's fields.
    fn resolve_variable(&mut self, name: &str) -> Option<Type> {
        self.method_table
            .get(name)
            .or_else(|| self.class_table.field(&self.current_class, name).cloned())
    }

    /// Checks an elaborated type against an expectation.
    ///
    /// Compares variant tags only, so any two class types match. An
    /// absent actual type imposes no constraint.
    fn check_type(&mut self, expected: &Type, actual: Option<&Type>, line: u32) {
        if let Some(actual) = actual {
            if std::mem::discriminant(expected) != std::mem::discriminant(actual) {
                self.diagnostics.push(Diagnostic::error(
                    format!("type mismatch: expected `{expected}`, found `{actual}`"),
                    line,
                ));
            }
        }
    }

    fn undefined_reference(&mut self, name: &str, line: u32) {
        self.diagnostics
            .push(Diagnostic::error(format!("undefined reference to `{name}`"), line));
    }
}
