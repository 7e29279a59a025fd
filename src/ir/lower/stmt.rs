//! Statement and control-flow lowering.
//!
//! `if` lowers to `if_then`/`if_else`/`if_end` blocks and `while` to
//! `while_cond`/`while_body`/`while_end`. A branch that ends in a return
//! emits no jump to the join block, and when every path out of an `if`
//! returns, the join block is never created.

use crate::ir::instr::{Terminator, Value};
use crate::ir::lower::diagnostics::{LowerError, SemanticError, SemanticWarning};
use crate::ir::lower::expr::{lower_expr, lower_rvalue, widen_value};
use crate::ir::lower::FuncCx;
use crate::ir::types::Type;
use crate::lexer::Token;
use crate::parser::ast::{Expr, Stmt};

/// Lowers a statement sequence, stopping at the first terminator so nothing
/// is emitted into a sealed block.
pub(crate) fn lower_stmts(cx: &mut FuncCx<'_>, stmts: &[Stmt]) -> Result<(), LowerError> {
    for stmt in stmts {
        if cx.builder.is_terminated(cx.builder.current_block()) {
            break;
        }
        lower_stmt(cx, stmt)?;
    }
    Ok(())
}

fn lower_stmt(cx: &mut FuncCx<'_>, stmt: &Stmt) -> Result<(), LowerError> {
    match stmt {
        Stmt::Expr(expr) => {
            lower_expr(cx, expr)?;
            Ok(())
        }
        Stmt::LocalVar { ty, name, token } => {
            if cx.scopes.declared_in_current(name) {
                return Err(SemanticError::redefinition(token, "local variable", name).into());
            }
            let slot = cx.builder.alloc_slot(name, *ty);
            cx.scopes.declare(name, slot);
            Ok(())
        }
        // A bare nested block shares the enclosing scope.
        Stmt::Block(stmts) => lower_stmts(cx, stmts),
        Stmt::If {
            cond,
            then_body,
            else_body,
            ..
        } => lower_if(cx, cond, then_body, else_body),
        Stmt::While { cond, body, .. } => lower_while(cx, cond, body),
        Stmt::Return { value, token, .. } => lower_return(cx, value.as_ref(), token),
    }
}

/// Evaluates a condition and rejects anything that is not `bool`.
fn lower_condition(cx: &mut FuncCx<'_>, cond: &Expr) -> Result<Value, LowerError> {
    let value = lower_rvalue(cx, cond)?;
    if value.ty() != Type::Bool {
        return Err(SemanticError::non_bool_condition(cond.token(), value.ty()).into());
    }
    Ok(value)
}

fn lower_if(
    cx: &mut FuncCx<'_>,
    cond: &Expr,
    then_body: &[Stmt],
    else_body: &[Stmt],
) -> Result<(), LowerError> {
    let cond_value = lower_condition(cx, cond)?;
    let then_block = cx.builder.new_block("if_then");

    if else_body.is_empty() {
        let end_block = cx.builder.new_block("if_end");
        cx.builder.terminate(Terminator::CondBr {
            cond: cond_value,
            then_dest: then_block,
            else_dest: end_block,
        });

        cx.builder.position_at(then_block);
        cx.scopes.push();
        lower_stmts(cx, then_body)?;
        cx.scopes.pop();
        cx.builder.terminate(Terminator::Br(end_block));

        cx.builder.position_at(end_block);
        return Ok(());
    }

    let else_block = cx.builder.new_block("if_else");
    cx.builder.terminate(Terminator::CondBr {
        cond: cond_value,
        then_dest: then_block,
        else_dest: else_block,
    });

    cx.builder.position_at(then_block);
    cx.scopes.push();
    lower_stmts(cx, then_body)?;
    cx.scopes.pop();
    let then_exit = cx.builder.current_block();
    let then_open = !cx.builder.is_terminated(then_exit);

    cx.builder.position_at(else_block);
    cx.scopes.push();
    lower_stmts(cx, else_body)?;
    cx.scopes.pop();
    let else_exit = cx.builder.current_block();
    let else_open = !cx.builder.is_terminated(else_exit);

    // Both arms returned: there is no join point to create.
    if then_open || else_open {
        let end_block = cx.builder.new_block("if_end");
        if then_open {
            cx.builder.position_at(then_exit);
            cx.builder.terminate(Terminator::Br(end_block));
        }
        if else_open {
            cx.builder.position_at(else_exit);
            cx.builder.terminate(Terminator::Br(end_block));
        }
        cx.builder.position_at(end_block);
    }
    Ok(())
}

fn lower_while(cx: &mut FuncCx<'_>, cond: &Expr, body: &[Stmt]) -> Result<(), LowerError> {
    let cond_block = cx.builder.new_block("while_cond");
    cx.builder.terminate(Terminator::Br(cond_block));

    cx.builder.position_at(cond_block);
    let cond_value = lower_condition(cx, cond)?;
    let body_block = cx.builder.new_block("while_body");
    let end_block = cx.builder.new_block("while_end");
    cx.builder.terminate(Terminator::CondBr {
        cond: cond_value,
        then_dest: body_block,
        else_dest: end_block,
    });

    cx.builder.position_at(body_block);
    cx.scopes.push();
    lower_stmts(cx, body)?;
    cx.scopes.pop();
    cx.builder.terminate(Terminator::Br(cond_block));

    cx.builder.position_at(end_block);
    Ok(())
}

fn lower_return(
    cx: &mut FuncCx<'_>,
    value: Option<&Expr>,
    token: &Token,
) -> Result<(), LowerError> {
    match value {
        None => {
            if cx.ret_type != Type::Void {
                return Err(SemanticError::return_mismatch(
                    token,
                    format!(
                        "non-void function must return a value of type {}",
                        cx.ret_type
                    ),
                )
                .into());
            }
            cx.builder.terminate(Terminator::Ret(None));
            Ok(())
        }
        Some(expr) => {
            if cx.ret_type == Type::Void {
                return Err(SemanticError::return_mismatch(
                    token,
                    "void function cannot return a value",
                )
                .into());
            }
            let value = lower_rvalue(cx, expr)?;
            if !value.ty().widens_to(cx.ret_type) {
                return Err(
                    SemanticError::narrowing(expr.token(), "return", value.ty(), cx.ret_type)
                        .into(),
                );
            }
            if value.ty() != cx.ret_type {
                cx.warnings.push(SemanticWarning::widening_in_return(
                    expr.token(),
                    value.ty(),
                    cx.ret_type,
                ));
            }
            let value = widen_value(cx, value, cx.ret_type);
            cx.builder.terminate(Terminator::Ret(Some(value)));
            Ok(())
        }
    }
}
