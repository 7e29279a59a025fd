//! Typed IR value and instruction contracts.

use crate::ir::ids::{BlockId, SlotId, TempId};
use crate::ir::types::Type;

/// An operand: a typed constant, an incoming argument, or an instruction
/// result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    /// 32-bit signed integer constant.
    ConstInt(i32),
    /// Single-precision float constant.
    ConstFloat(f32),
    /// Boolean constant.
    ConstBool(bool),
    /// Incoming function argument by position.
    Arg(u32, Type),
    /// Result of a previously emitted instruction.
    Temp(TempId, Type),
}

impl Value {
    /// Returns the operand's type.
    pub fn ty(self) -> Type {
        match self {
            Value::ConstInt(_) => Type::Int,
            Value::ConstFloat(_) => Type::Float,
            Value::ConstBool(_) => Type::Bool,
            Value::Arg(_, ty) | Value::Temp(_, ty) => ty,
        }
    }
}

/// An addressable storage location: a stack slot or a global.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Place {
    /// Per-function stack slot.
    Slot(SlotId),
    /// Module global by name.
    Global(String),
}

/// Binary arithmetic opcodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    /// Integer addition.
    Add,
    /// Integer subtraction.
    Sub,
    /// Integer multiplication.
    Mul,
    /// Signed integer division.
    Div,
    /// Signed integer remainder.
    Rem,
    /// Float addition.
    FAdd,
    /// Float subtraction.
    FSub,
    /// Float multiplication.
    FMul,
    /// Float division.
    FDiv,
    /// Float remainder.
    FRem,
}

/// Comparison predicates; signed for integers, ordered for floats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    /// Equal.
    Eq,
    /// Not equal.
    Ne,
    /// Less than.
    Lt,
    /// Less than or equal.
    Le,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Ge,
}

/// Unary opcodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    /// Integer negation (`0 - x`).
    NegInt,
    /// Float negation.
    NegFloat,
    /// Boolean not (`xor x, true`).
    NotBool,
}

/// Widening cast kinds along `bool -> int -> float`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastOp {
    /// `bool -> int` zero extension.
    BoolToInt,
    /// `int -> float` signed conversion.
    IntToFloat,
    /// `bool -> float` unsigned conversion.
    BoolToFloat,
}

impl CastOp {
    /// Returns the cast's result type.
    pub fn result_type(self) -> Type {
        match self {
            CastOp::BoolToInt => Type::Int,
            CastOp::IntToFloat | CastOp::BoolToFloat => Type::Float,
        }
    }
}

/// One non-terminator instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum Instr {
    /// Load a value out of a slot or global.
    Load {
        /// Result handle.
        dest: TempId,
        /// Loaded value type.
        ty: Type,
        /// Source location.
        src: Place,
    },
    /// Store a value into a slot or global.
    Store {
        /// Stored operand.
        value: Value,
        /// Destination location.
        dest: Place,
    },
    /// Binary arithmetic on same-typed operands.
    Binary {
        /// Result handle.
        dest: TempId,
        /// Opcode.
        op: BinOp,
        /// Left operand.
        lhs: Value,
        /// Right operand.
        rhs: Value,
    },
    /// Comparison producing a `bool`.
    Cmp {
        /// Result handle.
        dest: TempId,
        /// Predicate.
        op: CmpOp,
        /// Left operand.
        lhs: Value,
        /// Right operand.
        rhs: Value,
    },
    /// Unary operation.
    Unary {
        /// Result handle.
        dest: TempId,
        /// Opcode.
        op: UnOp,
        /// Operand.
        operand: Value,
    },
    /// Widening conversion.
    Cast {
        /// Result handle.
        dest: TempId,
        /// Cast kind.
        op: CastOp,
        /// Operand.
        operand: Value,
    },
    /// Function call; `dest` is absent for `void` callees.
    Call {
        /// Result handle, absent for `void` callees.
        dest: Option<TempId>,
        /// Callee name.
        callee: String,
        /// Callee return type.
        ret: Type,
        /// Arguments in call order.
        args: Vec<Value>,
    },
}

/// Block terminator.
#[derive(Debug, Clone, PartialEq)]
pub enum Terminator {
    /// Function return; the operand is absent for `void`.
    Ret(Option<Value>),
    /// Unconditional branch.
    Br(BlockId),
    /// Conditional branch on a `bool` operand.
    CondBr {
        /// Branch condition.
        cond: Value,
        /// Destination when the condition holds.
        then_dest: BlockId,
        /// Destination when the condition does not hold.
        else_dest: BlockId,
    },
}
