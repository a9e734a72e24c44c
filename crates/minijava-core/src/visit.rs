// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Read-only visitor contract over the MiniJava AST.
//!
//! Collaborators that consume the tree (the pretty-printer, dump
//! tooling, lint-style passes) implement [`Visitor`]: one method per
//! variant family, each defaulting to the pre-order, left-to-right
//! traversal provided by the `walk_*` functions. Override a method to
//! handle that family and call the matching `walk_*` to continue into
//! the children.
//!
//! All methods take shared references: a visitor never mutates the
//! tree. The elaborator is not a [`Visitor`] — it pattern-matches the
//! tree directly and records its results in a side table.

use crate::ast::{
    ClassDecl, Declaration, Expression, MainClass, MethodDecl, Program, Statement, Type,
};

/// A read-only traversal over the AST.
///
/// Default implementations perform a full pre-order walk.
pub trait Visitor {
    /// Visits the program root.
    fn visit_program(&mut self, program: &Program) {
        walk_program(self, program);
    }

    /// Visits the main class.
    fn visit_main_class(&mut self, main: &MainClass) {
        walk_main_class(self, main);
    }

    /// Visits a class declaration.
    fn visit_class(&mut self, class: &ClassDecl) {
        walk_class(self, class);
    }

    /// Visits a method declaration.
    fn visit_method(&mut self, method: &MethodDecl) {
        walk_method(self, method);
    }

    /// Visits a field, formal, or local declaration.
    fn visit_declaration(&mut self, declaration: &Declaration) {
        walk_declaration(self, declaration);
    }

    /// Visits a type. Types are leaves.
    fn visit_type(&mut self, _ty: &Type) {}

    /// Visits a statement.
    fn visit_statement(&mut self, statement: &Statement) {
        walk_statement(self, statement);
    }

    /// Visits an expression.
    fn visit_expression(&mut self, expression: &Expression) {
        walk_expression(self, expression);
    }
}

/// Walks a program: main class, then each class in order.
pub fn walk_program<V: Visitor + ?Sized>(v: &mut V, program: &Program) {
    v.visit_main_class(&program.main_class);
    for class in &program.classes {
        v.visit_class(class);
    }
}

/// Walks a main class: its single body statement.
pub fn walk_main_class<V: Visitor + ?Sized>(v: &mut V, main: &MainClass) {
    v.visit_statement(&main.body);
}

/// Walks a class: fields in order, then methods in order.
pub fn walk_class<V: Visitor + ?Sized>(v: &mut V, class: &ClassDecl) {
    for field in &class.fields {
        v.visit_declaration(field);
    }
    for method in &class.methods {
        v.visit_method(method);
    }
}

/// Walks a method: return type, formals, locals, body statements, and
/// the return expression.
pub fn walk_method<V: Visitor + ?Sized>(v: &mut V, method: &MethodDecl) {
    v.visit_type(&method.return_type);
    for formal in &method.formals {
        v.visit_declaration(formal);
    }
    for local in &method.locals {
        v.visit_declaration(local);
    }
    for statement in &method.body {
        v.visit_statement(statement);
    }
    v.visit_expression(&method.return_expr);
}

/// Walks a declaration: its type.
pub fn walk_declaration<V: Visitor + ?Sized>(v: &mut V, declaration: &Declaration) {
    v.visit_type(&declaration.ty);
}

/// Walks a statement's children in source order.
pub fn walk_statement<V: Visitor + ?Sized>(v: &mut V, statement: &Statement) {
    match statement {
        Statement::Block { statements, .. } => {
            for s in statements {
                v.visit_statement(s);
            }
        }
        Statement::If {
            condition,
            then_branch,
            else_branch,
            ..
        } => {
            v.visit_expression(condition);
            v.visit_statement(then_branch);
            v.visit_statement(else_branch);
        }
        Statement::While {
            condition, body, ..
        } => {
            v.visit_expression(condition);
            v.visit_statement(body);
        }
        Statement::Print { expr, .. } => v.visit_expression(expr),
        Statement::Assign { expr, .. } => v.visit_expression(expr),
        Statement::AssignArray { index, expr, .. } => {
            v.visit_expression(index);
            v.visit_expression(expr);
        }
    }
}

/// Walks an expression's children in source order.
pub fn walk_expression<V: Visitor + ?Sized>(v: &mut V, expression: &Expression) {
    match expression {
        Expression::Add { left, right, .. }
        | Expression::Sub { left, right, .. }
        | Expression::Times { left, right, .. }
        | Expression::And { left, right, .. }
        | Expression::Lt { left, right, .. } => {
            v.visit_expression(left);
            v.visit_expression(right);
        }
        Expression::Not { operand, .. } => v.visit_expression(operand),
        Expression::NewIntArray { length, .. } => v.visit_expression(length),
        Expression::ArraySelect { array, index, .. } => {
            v.visit_expression(array);
            v.visit_expression(index);
        }
        Expression::Length { array, .. } => v.visit_expression(array),
        Expression::Call {
            receiver,
            arguments,
            ..
        } => {
            v.visit_expression(receiver);
            for argument in arguments {
                v.visit_expression(argument);
            }
        }
        // Leaf nodes — nothing to recurse into.
        Expression::Num { .. }
        | Expression::True { .. }
        | Expression::False { .. }
        | Expression::This { .. }
        | Expression::Id { .. }
        | Expression::NewObject { .. } => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::NodeId;
    use ecow::EcoString;

    /// Collects identifier names in visit order.
    struct IdCollector {
        names: Vec<EcoString>,
    }

    impl Visitor for IdCollector {
        fn visit_expression(&mut self, expression: &Expression) {
            if let Expression::Id { name, .. } = expression {
                self.names.push(name.clone());
            }
            walk_expression(self, expression);
        }
    }

    #[test]
    fn walk_is_preorder_left_to_right() {
        // a + (b * c)
        let expr = Expression::Add {
            left: Box::new(Expression::Id {
                name: "a".into(),
                node: NodeId::new(0),
                line: 1,
            }),
            right: Box::new(Expression::Times {
                left: Box::new(Expression::Id {
                    name: "b".into(),
                    node: NodeId::new(1),
                    line: 1,
                }),
                right: Box::new(Expression::Id {
                    name: "c".into(),
                    node: NodeId::new(2),
                    line: 1,
                }),
                line: 1,
            }),
            line: 1,
        };

        let mut collector = IdCollector { names: Vec::new() };
        collector.visit_expression(&expr);
        assert_eq!(collector.names, vec!["a", "b", "c"]);
    }

    #[test]
    fn walk_statement_reaches_nested_expressions() {
        let stm = Statement::While {
            condition: Expression::Id {
                name: "i".into(),
                node: NodeId::new(0),
                line: 1,
            },
            body: Box::new(Statement::Assign {
                id: "i".into(),
                expr: Expression::Id {
                    name: "n".into(),
                    node: NodeId::new(1),
                    line: 2,
                },
                line: 2,
            }),
            line: 1,
        };

        let mut collector = IdCollector { names: Vec::new() };
        collector.visit_statement(&stm);
        assert_eq!(collector.names, vec!["i", "n"]);
    }
}
