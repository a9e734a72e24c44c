// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Pretty-printer: renders an AST back to MiniJava source text.
//!
//! The printer is a read-only [`Visitor`] over the tree. Its output
//! parses back to a structurally equal program: operands that are
//! themselves operator expressions are parenthesized, so the printed
//! text does not depend on the operator ladder for its meaning, and
//! postfix forms (calls, indexing, `.length`) are rendered bare.

use crate::ast::{
    ClassDecl, Declaration, Expression, MainClass, MethodDecl, Program, Statement,
};
use crate::visit::Visitor;

/// Renders a program as source text.
#[must_use]
pub fn unparse(program: &Program) -> String {
    let mut printer = PrettyPrinter::new();
    printer.visit_program(program);
    printer.out
}

/// Indentation step, in spaces.
const INDENT: usize = 4;

/// The printer state: the output buffer and the current indentation.
struct PrettyPrinter {
    out: String,
    indent: usize,
}

impl PrettyPrinter {
    fn new() -> Self {
        Self {
            out: String::new(),
            indent: 0,
        }
    }

    fn write(&mut self, text: &str) {
        self.out.push_str(text);
    }

    fn pad(&mut self) {
        for _ in 0..self.indent {
            self.out.push(' ');
        }
    }

    /// Writes an expression operand, parenthesizing operator
    /// expressions so the output re-parses to the same tree.
    fn write_operand(&mut self, expression: &Expression) {
        let needs_parens = matches!(
            expression,
            Expression::Add { .. }
                | Expression::Sub { .. }
                | Expression::Times { .. }
                | Expression::And { .. }
                | Expression::Lt { .. }
                | Expression::Not { .. }
        );
        if needs_parens {
            self.write("(");
            self.write_expression(expression);
            self.write(")");
        } else {
            self.write_expression(expression);
        }
    }

    fn write_binary(&mut self, left: &Expression, operator: &str, right: &Expression) {
        self.write_operand(left);
        self.write(" ");
        self.write(operator);
        self.write(" ");
        self.write_operand(right);
    }

    fn write_expression(&mut self, expression: &Expression) {
        match expression {
            Expression::Num { value, .. } => self.write(&value.to_string()),
            Expression::True { .. } => self.write("true"),
            Expression::False { .. } => self.write("false"),
            Expression::This { .. } => self.write("this"),
            Expression::Id { name, .. } => self.write(name),
            Expression::NewObject { class, .. } => {
                self.write("new ");
                self.write(class);
                self.write("()");
            }
            Expression::NewIntArray { length, .. } => {
                self.write("new int[");
                self.write_expression(length);
                self.write("]");
            }
            Expression::Add { left, right, .. } => self.write_binary(left, "+", right),
            Expression::Sub { left, right, .. } => self.write_binary(left, "-", right),
            Expression::Times { left, right, .. } => self.write_binary(left, "*", right),
            Expression::And { left, right, .. } => self.write_binary(left, "&&", right),
            Expression::Lt { left, right, .. } => self.write_binary(left, "<", right),
            Expression::Not { operand, .. } => {
                self.write("!");
                self.write_operand(operand);
            }
            Expression::ArraySelect { array, index, .. } => {
                self.write_operand(array);
                self.write("[");
                self.write_expression(index);
                self.write("]");
            }
            Expression::Length { array, .. } => {
                self.write_operand(array);
                self.write(".length");
            }
            Expression::Call {
                receiver,
                method,
                arguments,
                ..
            } => {
                self.write_operand(receiver);
                self.write(".");
                self.write(method);
                self.write("(");
                for (i, argument) in arguments.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    self.write_expression(argument);
                }
                self.write(")");
            }
        }
    }

    /// Writes a sub-statement of `if`/`while` on its own indented line.
    fn write_nested(&mut self, statement: &Statement) {
        self.indent += INDENT;
        self.visit_statement(statement);
        self.indent -= INDENT;
    }

    fn write_declaration(&mut self, declaration: &Declaration) {
        self.pad();
        self.write(&declaration.ty.to_string());
        self.write(" ");
        self.write(&declaration.id);
        self.write(";\n");
    }
}

impl Visitor for PrettyPrinter {
    fn visit_program(&mut self, program: &Program) {
        self.visit_main_class(&program.main_class);
        for class in &program.classes {
            self.write("\n");
            self.visit_class(class);
        }
    }

    fn visit_main_class(&mut self, main: &MainClass) {
        self.write("class ");
        self.write(&main.id);
        self.write(" {\n");
        self.indent += INDENT;
        self.pad();
        self.write("public static void main(String[] ");
        self.write(&main.arg_name);
        self.write(") {\n");
        self.indent += INDENT;
        self.visit_statement(&main.body);
        self.indent -= INDENT;
        self.pad();
        self.write("}\n");
        self.indent -= INDENT;
        self.write("}\n");
    }

    fn visit_class(&mut self, class: &ClassDecl) {
        self.write("class ");
        self.write(&class.id);
        if let Some(parent) = &class.parent {
            self.write(" extends ");
            self.write(parent);
        }
        self.write(" {\n");
        self.indent += INDENT;
        for field in &class.fields {
            self.write_declaration(field);
        }
        for (i, method) in class.methods.iter().enumerate() {
            if i > 0 || !class.fields.is_empty() {
                self.write("\n");
            }
            self.visit_method(method);
        }
        self.indent -= INDENT;
        self.write("}\n");
    }

    fn visit_method(&mut self, method: &MethodDecl) {
        self.pad();
        self.write("public ");
        self.write(&method.return_type.to_string());
        self.write(" ");
        self.write(&method.id);
        self.write("(");
        for (i, formal) in method.formals.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.write(&formal.ty.to_string());
            self.write(" ");
            self.write(&formal.id);
        }
        self.write(") {\n");
        self.indent += INDENT;
        for local in &method.locals {
            self.write_declaration(local);
        }
        for statement in &method.body {
            self.visit_statement(statement);
        }
        self.pad();
        self.write("return ");
        self.write_expression(&method.return_expr);
        self.write(";\n");
        self.indent -= INDENT;
        self.pad();
        self.write("}\n");
    }

    fn visit_statement(&mut self, statement: &Statement) {
        match statement {
            Statement::Block { statements, .. } => {
                self.pad();
                self.write("{\n");
                self.indent += INDENT;
                for statement in statements {
                    self.visit_statement(statement);
                }
                self.indent -= INDENT;
                self.pad();
                self.write("}\n");
            }
            Statement::If {
                condition,
                then_branch,
                else_branch,
                ..
            } => {
                self.pad();
                self.write("if (");
                self.write_expression(condition);
                self.write(")\n");
                self.write_nested(then_branch);
                self.pad();
                self.write("else\n");
                self.write_nested(else_branch);
            }
            Statement::While {
                condition, body, ..
            } => {
                self.pad();
                self.write("while (");
                self.write_expression(condition);
                self.write(")\n");
                self.write_nested(body);
            }
            Statement::Print { expr, .. } => {
                self.pad();
                self.write("System.out.println(");
                self.write_expression(expr);
                self.write(");\n");
            }
            Statement::Assign { id, expr, .. } => {
                self.pad();
                self.write(id);
                self.write(" = ");
                self.write_expression(expr);
                self.write(";\n");
            }
            Statement::AssignArray {
                id, index, expr, ..
            } => {
                self.pad();
                self.write(id);
                self.write("[");
                self.write_expression(index);
                self.write("] = ");
                self.write_expression(expr);
                self.write(";\n");
            }
        }
    }

    fn visit_expression(&mut self, expression: &Expression) {
        self.write_expression(expression);
    }
}
