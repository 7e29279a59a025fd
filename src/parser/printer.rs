//! Indented AST dump for parsed programs.
//!
//! The driver prints this tree to standard output after a successful parse.

use std::fmt::Write;

use crate::parser::ast::{Expr, Item, Program, Prototype, Stmt};

/// Renders a program as an indented tree.
pub fn render(program: &Program) -> String {
    let mut out = String::from("Program\n");
    for item in &program.items {
        render_item(&mut out, item, 1);
    }
    out
}

fn render_item(out: &mut String, item: &Item, depth: usize) {
    match item {
        Item::Extern(proto) => {
            push_line(out, depth, &format!("ExternDecl: {}", signature(proto)));
        }
        Item::Function { proto, body } => {
            push_line(out, depth, &format!("FunctionDecl: {}", signature(proto)));
            for stmt in body {
                render_stmt(out, stmt, depth + 1);
            }
        }
        Item::Global { ty, name, .. } => {
            push_line(out, depth, &format!("GlobalVar: {ty} {name}"));
        }
    }
}

fn signature(proto: &Prototype) -> String {
    let params: Vec<String> = proto
        .params
        .iter()
        .map(|param| format!("{} {}", param.ty, param.name))
        .collect();
    format!("{} {}({})", proto.ret_type, proto.name, params.join(", "))
}

fn render_stmt(out: &mut String, stmt: &Stmt, depth: usize) {
    match stmt {
        Stmt::Expr(expr) => {
            push_line(out, depth, "ExprStmt");
            render_expr(out, expr, depth + 1);
        }
        Stmt::LocalVar { ty, name, .. } => {
            push_line(out, depth, &format!("LocalVar: {ty} {name}"));
        }
        Stmt::Block(stmts) => {
            push_line(out, depth, "Block");
            for stmt in stmts {
                render_stmt(out, stmt, depth + 1);
            }
        }
        Stmt::If {
            cond,
            then_body,
            else_body,
            ..
        } => {
            push_line(out, depth, "If");
            render_expr(out, cond, depth + 1);
            push_line(out, depth + 1, "Then");
            for stmt in then_body {
                render_stmt(out, stmt, depth + 2);
            }
            if !else_body.is_empty() {
                push_line(out, depth + 1, "Else");
                for stmt in else_body {
                    render_stmt(out, stmt, depth + 2);
                }
            }
        }
        Stmt::While { cond, body, .. } => {
            push_line(out, depth, "While");
            render_expr(out, cond, depth + 1);
            push_line(out, depth + 1, "Body");
            for stmt in body {
                render_stmt(out, stmt, depth + 2);
            }
        }
        Stmt::Return { value, .. } => {
            push_line(out, depth, "Return");
            if let Some(expr) = value {
                render_expr(out, expr, depth + 1);
            }
        }
    }
}

fn render_expr(out: &mut String, expr: &Expr, depth: usize) {
    match expr {
        Expr::IntLit { value, .. } => push_line(out, depth, &format!("IntLit {value}")),
        Expr::FloatLit { value, .. } => push_line(out, depth, &format!("FloatLit {value}")),
        Expr::BoolLit { value, .. } => push_line(out, depth, &format!("BoolLit {value}")),
        Expr::VarRef { name, .. } => push_line(out, depth, &format!("VarRef `{name}`")),
        Expr::Unary { op, operand, .. } => {
            push_line(out, depth, &format!("Unary `{op}`"));
            render_expr(out, operand, depth + 1);
        }
        Expr::Binary { op, lhs, rhs, .. } => {
            push_line(out, depth, &format!("Binary `{op}`"));
            render_expr(out, lhs, depth + 1);
            render_expr(out, rhs, depth + 1);
        }
        Expr::Call { callee, args, .. } => {
            push_line(out, depth, &format!("Call `{callee}`"));
            for arg in args {
                render_expr(out, arg, depth + 1);
            }
        }
    }
}

fn push_line(out: &mut String, depth: usize, text: &str) {
    for _ in 0..depth {
        out.push_str("  ");
    }
    let _ = writeln!(out, "{text}");
}
