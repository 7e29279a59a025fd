//! Scalar type lattice for mini-C values.

use std::fmt;

/// The closed set of mini-C types.
///
/// The three scalar types are totally ordered for widening purposes as
/// `bool < int < float`. `Void` only appears as a function return type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    /// 1-bit boolean.
    Bool,
    /// 32-bit signed integer.
    Int,
    /// 32-bit single-precision float.
    Float,
    /// Absence of a value; function return position only.
    Void,
}

impl Type {
    /// Returns `true` for the three value-bearing types.
    pub fn is_scalar(self) -> bool {
        !matches!(self, Type::Void)
    }

    /// Returns `true` when a value of this type implicitly converts to
    /// `target` (identity or widening along `bool -> int -> float`).
    pub fn widens_to(self, target: Type) -> bool {
        if self == target {
            return true;
        }
        self.is_scalar() && target.is_scalar() && self.rank() < target.rank()
    }

    /// Returns the wider of two scalar types, or `None` when either side is
    /// `void`.
    pub fn common_type(self, other: Type) -> Option<Type> {
        if !self.is_scalar() || !other.is_scalar() {
            return None;
        }
        if self.rank() >= other.rank() {
            Some(self)
        } else {
            Some(other)
        }
    }

    /// Source-level type name, as used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Type::Bool => "bool",
            Type::Int => "int",
            Type::Float => "float",
            Type::Void => "void",
        }
    }

    /// Textual-IR type name.
    pub fn ir_name(self) -> &'static str {
        match self {
            Type::Bool => "i1",
            Type::Int => "i32",
            Type::Float => "float",
            Type::Void => "void",
        }
    }

    fn rank(self) -> u8 {
        match self {
            Type::Bool => 0,
            Type::Int => 1,
            Type::Float => 2,
            Type::Void => 3,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
