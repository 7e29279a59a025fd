//! Semantic error and warning contracts for IR emission.

use std::fmt;

use crate::ir::error::IrError;
use crate::ir::types::Type;
use crate::lexer::Token;

/// Stable semantic error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemanticErrorKind {
    /// An rvalue identifier resolved to neither a local nor a global.
    UnknownIdentifier,
    /// A call names a function the module does not know.
    UnknownFunction,
    /// A name was rebound where rebinding is not allowed.
    Redefinition,
    /// An implicit conversion would move down the widening order.
    NarrowingConversion,
    /// An operand has a type the operator does not accept.
    OperandTypeMismatch,
    /// An `if`/`while` condition is not of `bool` type.
    NonBoolCondition,
    /// Division or remainder by a literal zero.
    DivisionByZero,
    /// A call passes the wrong number of arguments.
    ArityMismatch,
    /// A `return` disagrees with the declared return type.
    ReturnMismatch,
    /// A non-`void` function's body can fall off the end.
    MissingReturn,
    /// A `void` call result was used as a value.
    VoidValueUse,
    /// The left side of `=` is not a variable.
    InvalidAssignmentTarget,
}

/// Fatal semantic error payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemanticError {
    /// Error category.
    pub kind: SemanticErrorKind,
    /// Human-readable error summary.
    pub message: String,
    /// 1-based source line of the offending token.
    pub line: u32,
    /// 1-based source column of the offending token.
    pub column: u32,
}

impl SemanticError {
    /// Creates a semantic error anchored at a token.
    pub fn new(kind: SemanticErrorKind, token: &Token, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            line: token.line,
            column: token.column,
        }
    }

    /// Creates an `UnknownIdentifier` error.
    pub fn unknown_identifier(token: &Token) -> Self {
        Self::new(
            SemanticErrorKind::UnknownIdentifier,
            token,
            format!("unknown identifier `{}`", token.lexeme),
        )
    }

    /// Creates an `UnknownFunction` error.
    pub fn unknown_function(token: &Token, name: &str) -> Self {
        Self::new(
            SemanticErrorKind::UnknownFunction,
            token,
            format!("call to unknown function `{name}`"),
        )
    }

    /// Creates a `Redefinition` error.
    pub fn redefinition(token: &Token, what: &str, name: &str) -> Self {
        Self::new(
            SemanticErrorKind::Redefinition,
            token,
            format!("redefinition of {what} `{name}`"),
        )
    }

    /// Creates a `NarrowingConversion` error.
    pub fn narrowing(token: &Token, context: &str, from: Type, to: Type) -> Self {
        Self::new(
            SemanticErrorKind::NarrowingConversion,
            token,
            format!("cannot narrow {from} to {to} in {context}"),
        )
    }

    /// Creates an `OperandTypeMismatch` error.
    pub fn operand_mismatch(token: &Token, message: impl Into<String>) -> Self {
        Self::new(SemanticErrorKind::OperandTypeMismatch, token, message)
    }

    /// Creates a `NonBoolCondition` error.
    pub fn non_bool_condition(token: &Token, found: Type) -> Self {
        Self::new(
            SemanticErrorKind::NonBoolCondition,
            token,
            format!("condition must be of bool type, found {found}"),
        )
    }

    /// Creates a `DivisionByZero` error.
    pub fn division_by_zero(token: &Token) -> Self {
        Self::new(
            SemanticErrorKind::DivisionByZero,
            token,
            "division or remainder by literal zero",
        )
    }

    /// Creates an `ArityMismatch` error.
    pub fn arity_mismatch(token: &Token, name: &str, expected: usize, found: usize) -> Self {
        Self::new(
            SemanticErrorKind::ArityMismatch,
            token,
            format!("function `{name}` expects {expected} argument(s), found {found}"),
        )
    }

    /// Creates a `ReturnMismatch` error.
    pub fn return_mismatch(token: &Token, message: impl Into<String>) -> Self {
        Self::new(SemanticErrorKind::ReturnMismatch, token, message)
    }

    /// Creates a `MissingReturn` error.
    pub fn missing_return(token: &Token, name: &str) -> Self {
        Self::new(
            SemanticErrorKind::MissingReturn,
            token,
            format!("non-void function `{name}` does not end in a return"),
        )
    }

    /// Creates a `VoidValueUse` error.
    pub fn void_value_use(token: &Token) -> Self {
        Self::new(
            SemanticErrorKind::VoidValueUse,
            token,
            "void value used where a value is required",
        )
    }

    /// Creates an `InvalidAssignmentTarget` error.
    pub fn invalid_assignment_target(token: &Token) -> Self {
        Self::new(
            SemanticErrorKind::InvalidAssignmentTarget,
            token,
            "left operand of `=` must be a variable",
        )
    }
}

impl fmt::Display for SemanticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "semantic error at line {} column {}: {}",
            self.line, self.column, self.message
        )
    }
}

impl std::error::Error for SemanticError {}

/// Non-fatal emission diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemanticWarning {
    /// Human-readable warning text.
    pub message: String,
    /// 1-based source line.
    pub line: u32,
    /// 1-based source column.
    pub column: u32,
}

impl SemanticWarning {
    /// Warns about an implicit widening in a `return` expression.
    pub fn widening_in_return(token: &Token, from: Type, to: Type) -> Self {
        Self {
            message: format!("implicit widening from {from} to {to} in return"),
            line: token.line,
            column: token.column,
        }
    }
}

impl fmt::Display for SemanticWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "warning at line {} column {}: {}",
            self.line, self.column, self.message
        )
    }
}

/// Any failure produced while lowering an item.
#[derive(Debug, Clone, PartialEq)]
pub enum LowerError {
    /// A fatal semantic diagnostic.
    Semantic(SemanticError),
    /// An IR invariant violation surfaced by verification.
    Ir(IrError),
}

impl From<SemanticError> for LowerError {
    fn from(error: SemanticError) -> Self {
        LowerError::Semantic(error)
    }
}

impl From<IrError> for LowerError {
    fn from(error: IrError) -> Self {
        LowerError::Ir(error)
    }
}

impl fmt::Display for LowerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LowerError::Semantic(error) => error.fmt(f),
            LowerError::Ir(error) => error.fmt(f),
        }
    }
}

impl std::error::Error for LowerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LowerError::Semantic(error) => Some(error),
            LowerError::Ir(error) => Some(error),
        }
    }
}
