//! Typed expression emission.
//!
//! Expressions evaluate to an [`Operand`]: variable references stay places
//! until a consumer loads them, assignment stores through the place, and
//! everything else produces a typed value. Implicit conversions only move
//! up the widening order `bool -> int -> float`.

use crate::ir::instr::{BinOp, CastOp, CmpOp, Place, Terminator, UnOp, Value};
use crate::ir::lower::diagnostics::{LowerError, SemanticError};
use crate::ir::lower::FuncCx;
use crate::ir::types::Type;
use crate::lexer::Token;
use crate::parser::ast::{BinaryOp, Expr, UnaryOp};

/// Result of emitting one expression.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Operand {
    /// A computed or constant value.
    Value(Value),
    /// An addressable location and its stored type.
    Place(Place, Type),
    /// The absent result of a `void` call.
    Void,
}

/// Emits one expression.
pub(crate) fn lower_expr(cx: &mut FuncCx<'_>, expr: &Expr) -> Result<Operand, LowerError> {
    match expr {
        Expr::IntLit { value, .. } => Ok(Operand::Value(Value::ConstInt(*value))),
        Expr::FloatLit { value, .. } => Ok(Operand::Value(Value::ConstFloat(*value))),
        Expr::BoolLit { value, .. } => Ok(Operand::Value(Value::ConstBool(*value))),
        Expr::VarRef { name, token } => lower_var_ref(cx, name, token),
        Expr::Unary { op, operand, token } => lower_unary(cx, *op, operand, token),
        Expr::Binary { op, lhs, rhs, token } => lower_binary(cx, *op, lhs, rhs, token),
        Expr::Call { callee, args, token } => lower_call(cx, callee, args, token),
    }
}

/// Emits an expression and forces the result into a loaded value.
pub(crate) fn lower_rvalue(cx: &mut FuncCx<'_>, expr: &Expr) -> Result<Value, LowerError> {
    let operand = lower_expr(cx, expr)?;
    into_value(cx, operand, expr.token())
}

/// Forces an operand into a value, loading places and rejecting `void`.
pub(crate) fn into_value(
    cx: &mut FuncCx<'_>,
    operand: Operand,
    token: &Token,
) -> Result<Value, LowerError> {
    match operand {
        Operand::Value(value) => Ok(value),
        Operand::Place(place, ty) => Ok(cx.builder.emit_load(ty, place)),
        Operand::Void => Err(SemanticError::void_value_use(token).into()),
    }
}

/// Widens `value` to `target`, emitting a cast when the types differ.
///
/// Callers check `widens_to` first; an impossible pair passes through
/// unchanged.
pub(crate) fn widen_value(cx: &mut FuncCx<'_>, value: Value, target: Type) -> Value {
    match (value.ty(), target) {
        (from, to) if from == to => value,
        (Type::Bool, Type::Int) => cx.builder.emit_cast(CastOp::BoolToInt, value),
        (Type::Bool, Type::Float) => cx.builder.emit_cast(CastOp::BoolToFloat, value),
        (Type::Int, Type::Float) => cx.builder.emit_cast(CastOp::IntToFloat, value),
        _ => value,
    }
}

fn lower_var_ref(cx: &mut FuncCx<'_>, name: &str, token: &Token) -> Result<Operand, LowerError> {
    if let Some(slot) = cx.scopes.lookup(name) {
        let ty = cx.builder.slot_type(slot);
        return Ok(Operand::Place(Place::Slot(slot), ty));
    }
    if let Some(&ty) = cx.globals.get(name) {
        return Ok(Operand::Place(Place::Global(name.to_string()), ty));
    }
    Err(SemanticError::unknown_identifier(token).into())
}

fn lower_unary(
    cx: &mut FuncCx<'_>,
    op: UnaryOp,
    operand: &Expr,
    token: &Token,
) -> Result<Operand, LowerError> {
    let value = lower_rvalue(cx, operand)?;
    match op {
        UnaryOp::Not => {
            if value.ty() != Type::Bool {
                return Err(SemanticError::operand_mismatch(
                    token,
                    format!("`!` requires a bool operand, found {}", value.ty()),
                )
                .into());
            }
            Ok(Operand::Value(cx.builder.emit_unary(UnOp::NotBool, value)))
        }
        UnaryOp::Neg => match value.ty() {
            Type::Float => Ok(Operand::Value(cx.builder.emit_unary(UnOp::NegFloat, value))),
            Type::Int => Ok(Operand::Value(cx.builder.emit_unary(UnOp::NegInt, value))),
            Type::Bool => {
                let widened = widen_value(cx, value, Type::Int);
                Ok(Operand::Value(cx.builder.emit_unary(UnOp::NegInt, widened)))
            }
            Type::Void => Err(SemanticError::operand_mismatch(
                token,
                "`-` requires a numeric operand, found void",
            )
            .into()),
        },
    }
}

fn lower_binary(
    cx: &mut FuncCx<'_>,
    op: BinaryOp,
    lhs: &Expr,
    rhs: &Expr,
    token: &Token,
) -> Result<Operand, LowerError> {
    match op {
        BinaryOp::Assign => lower_assignment(cx, lhs, rhs, token),
        BinaryOp::And | BinaryOp::Or => lower_logical(cx, op, lhs, rhs),
        BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Rem => {
            lower_arithmetic(cx, op, lhs, rhs, token)
        }
        BinaryOp::Eq
        | BinaryOp::Ne
        | BinaryOp::Le
        | BinaryOp::Lt
        | BinaryOp::Ge
        | BinaryOp::Gt => lower_comparison(cx, op, lhs, rhs, token),
    }
}

/// `=`: the left operand must be a variable place; the right operand is
/// loaded, widened to the left's type, and stored. The stored value is the
/// expression result.
fn lower_assignment(
    cx: &mut FuncCx<'_>,
    lhs: &Expr,
    rhs: &Expr,
    token: &Token,
) -> Result<Operand, LowerError> {
    let target = lower_expr(cx, lhs)?;
    let Operand::Place(place, target_ty) = target else {
        return Err(SemanticError::invalid_assignment_target(token).into());
    };

    let value = lower_rvalue(cx, rhs)?;
    if !value.ty().widens_to(target_ty) {
        return Err(SemanticError::narrowing(rhs.token(), "assignment", value.ty(), target_ty).into());
    }
    let value = widen_value(cx, value, target_ty);
    cx.builder.emit_store(value, place);
    Ok(Operand::Value(value))
}

/// `&&`/`||` over `bool` operands.
///
/// A constant left operand folds: `false && _` and `true || _` decide the
/// result without emitting the right side; the opposite constants forward
/// the right operand. Anything else lowers to a runtime short-circuit: the
/// left value parks in a slot and a conditional branch skips the right
/// operand entirely.
fn lower_logical(
    cx: &mut FuncCx<'_>,
    op: BinaryOp,
    lhs: &Expr,
    rhs: &Expr,
) -> Result<Operand, LowerError> {
    let lhs_value = lower_rvalue(cx, lhs)?;
    if lhs_value.ty() != Type::Bool {
        return Err(SemanticError::operand_mismatch(
            lhs.token(),
            format!("`{op}` requires bool operands, found {}", lhs_value.ty()),
        )
        .into());
    }

    if let Value::ConstBool(decided) = lhs_value {
        let decides = match op {
            BinaryOp::And => !decided,
            _ => decided,
        };
        if decides {
            return Ok(Operand::Value(Value::ConstBool(decided)));
        }
        let rhs_value = lower_rvalue(cx, rhs)?;
        if rhs_value.ty() != Type::Bool {
            return Err(SemanticError::operand_mismatch(
                rhs.token(),
                format!("`{op}` requires bool operands, found {}", rhs_value.ty()),
            )
            .into());
        }
        return Ok(Operand::Value(rhs_value));
    }

    let (slot_name, rhs_label, end_label) = match op {
        BinaryOp::And => ("and.tmp", "and_rhs", "and_end"),
        _ => ("or.tmp", "or_rhs", "or_end"),
    };
    let slot = cx.builder.alloc_slot(slot_name, Type::Bool);
    cx.builder.emit_store(lhs_value, Place::Slot(slot));

    let rhs_block = cx.builder.new_block(rhs_label);
    let end_block = cx.builder.new_block(end_label);
    let (then_dest, else_dest) = match op {
        BinaryOp::And => (rhs_block, end_block),
        _ => (end_block, rhs_block),
    };
    cx.builder.terminate(Terminator::CondBr {
        cond: lhs_value,
        then_dest,
        else_dest,
    });

    cx.builder.position_at(rhs_block);
    let rhs_value = lower_rvalue(cx, rhs)?;
    if rhs_value.ty() != Type::Bool {
        return Err(SemanticError::operand_mismatch(
            rhs.token(),
            format!("`{op}` requires bool operands, found {}", rhs_value.ty()),
        )
        .into());
    }
    cx.builder.emit_store(rhs_value, Place::Slot(slot));
    cx.builder.terminate(Terminator::Br(end_block));

    cx.builder.position_at(end_block);
    let result = cx.builder.emit_load(Type::Bool, Place::Slot(slot));
    Ok(Operand::Value(result))
}

/// `+ - * / %` over any scalar pair; operands widen to the common type,
/// with `bool` operands first promoted to `int`.
fn lower_arithmetic(
    cx: &mut FuncCx<'_>,
    op: BinaryOp,
    lhs: &Expr,
    rhs: &Expr,
    token: &Token,
) -> Result<Operand, LowerError> {
    if matches!(op, BinaryOp::Div | BinaryOp::Rem) && is_literal_zero(rhs) {
        return Err(SemanticError::division_by_zero(rhs.token()).into());
    }

    let lhs_value = lower_rvalue(cx, lhs)?;
    let rhs_value = lower_rvalue(cx, rhs)?;
    let common = common_arithmetic_type(lhs_value.ty(), rhs_value.ty()).ok_or_else(|| {
        SemanticError::operand_mismatch(
            token,
            format!(
                "`{op}` cannot combine {} and {}",
                lhs_value.ty(),
                rhs_value.ty()
            ),
        )
    })?;

    let lhs_value = widen_value(cx, lhs_value, common);
    let rhs_value = widen_value(cx, rhs_value, common);
    let opcode = arithmetic_opcode(op, common);
    Ok(Operand::Value(cx.builder.emit_binary(opcode, lhs_value, rhs_value)))
}

/// Comparisons over any scalar pair; the result is `bool`.
///
/// Two `bool` operands compare directly for `==`/`!=` and widen to `int`
/// for the ordered predicates.
fn lower_comparison(
    cx: &mut FuncCx<'_>,
    op: BinaryOp,
    lhs: &Expr,
    rhs: &Expr,
    token: &Token,
) -> Result<Operand, LowerError> {
    let lhs_value = lower_rvalue(cx, lhs)?;
    let rhs_value = lower_rvalue(cx, rhs)?;

    let both_bool = lhs_value.ty() == Type::Bool && rhs_value.ty() == Type::Bool;
    let equality = matches!(op, BinaryOp::Eq | BinaryOp::Ne);

    let operand_ty = if both_bool && equality {
        Type::Bool
    } else if both_bool {
        Type::Int
    } else {
        lhs_value.ty().common_type(rhs_value.ty()).ok_or_else(|| {
            SemanticError::operand_mismatch(
                token,
                format!(
                    "`{op}` cannot compare {} and {}",
                    lhs_value.ty(),
                    rhs_value.ty()
                ),
            )
        })?
    };

    let lhs_value = widen_value(cx, lhs_value, operand_ty);
    let rhs_value = widen_value(cx, rhs_value, operand_ty);
    let predicate = comparison_predicate(op);
    Ok(Operand::Value(cx.builder.emit_cmp(predicate, lhs_value, rhs_value)))
}

/// Calls: known callee, matching arity, arguments widened to parameter
/// types. A `void` callee produces no value.
fn lower_call(
    cx: &mut FuncCx<'_>,
    callee: &str,
    args: &[Expr],
    token: &Token,
) -> Result<Operand, LowerError> {
    let Some(signature) = cx.functions.get(callee) else {
        return Err(SemanticError::unknown_function(token, callee).into());
    };
    let ret_type = signature.ret_type;
    let param_types = signature.params.clone();

    if args.len() != param_types.len() {
        return Err(
            SemanticError::arity_mismatch(token, callee, param_types.len(), args.len()).into(),
        );
    }

    let mut lowered = Vec::with_capacity(args.len());
    for (arg, &param_ty) in args.iter().zip(param_types.iter()) {
        let value = lower_rvalue(cx, arg)?;
        if !value.ty().widens_to(param_ty) {
            return Err(
                SemanticError::narrowing(arg.token(), "call argument", value.ty(), param_ty).into(),
            );
        }
        lowered.push(widen_value(cx, value, param_ty));
    }

    match cx.builder.emit_call(callee, ret_type, lowered) {
        Some(value) => Ok(Operand::Value(value)),
        None => Ok(Operand::Void),
    }
}

/// Returns `true` for the literals `0` and `0.0`.
fn is_literal_zero(expr: &Expr) -> bool {
    match expr {
        Expr::IntLit { value, .. } => *value == 0,
        Expr::FloatLit { value, .. } => *value == 0.0,
        _ => false,
    }
}

/// Common type for arithmetic: the wider scalar, never below `int`.
fn common_arithmetic_type(lhs: Type, rhs: Type) -> Option<Type> {
    let common = lhs.common_type(rhs)?;
    common.common_type(Type::Int)
}

fn arithmetic_opcode(op: BinaryOp, operand_ty: Type) -> BinOp {
    let is_float = operand_ty == Type::Float;
    match op {
        BinaryOp::Add if is_float => BinOp::FAdd,
        BinaryOp::Sub if is_float => BinOp::FSub,
        BinaryOp::Mul if is_float => BinOp::FMul,
        BinaryOp::Div if is_float => BinOp::FDiv,
        BinaryOp::Rem if is_float => BinOp::FRem,
        BinaryOp::Add => BinOp::Add,
        BinaryOp::Sub => BinOp::Sub,
        BinaryOp::Mul => BinOp::Mul,
        BinaryOp::Div => BinOp::Div,
        _ => BinOp::Rem,
    }
}

fn comparison_predicate(op: BinaryOp) -> CmpOp {
    match op {
        BinaryOp::Eq => CmpOp::Eq,
        BinaryOp::Ne => CmpOp::Ne,
        BinaryOp::Le => CmpOp::Le,
        BinaryOp::Lt => CmpOp::Lt,
        BinaryOp::Ge => CmpOp::Ge,
        _ => CmpOp::Gt,
    }
}
