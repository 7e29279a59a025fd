//! IR error contracts.

use std::fmt;

/// Stable IR error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IrErrorKind {
    /// A block is missing its terminator.
    MissingTerminator,
    /// A branch names a block that does not exist.
    InvalidBranchTarget,
    /// A `ret` operand disagrees with the function signature.
    ReturnTypeMismatch,
    /// An instruction references an unknown stack slot.
    UnknownSlot,
    /// Two module entities share one name.
    DuplicateName,
}

impl fmt::Display for IrErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            IrErrorKind::MissingTerminator => "missing terminator",
            IrErrorKind::InvalidBranchTarget => "invalid branch target",
            IrErrorKind::ReturnTypeMismatch => "return type mismatch",
            IrErrorKind::UnknownSlot => "unknown stack slot",
            IrErrorKind::DuplicateName => "duplicate name",
        };
        f.write_str(text)
    }
}

/// IR error payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IrError {
    /// Error category.
    pub kind: IrErrorKind,
    /// Human-readable error detail.
    pub message: String,
}

impl IrError {
    /// Creates an IR error.
    pub fn new(kind: IrErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Creates a `MissingTerminator` error.
    pub fn missing_terminator(function: &str, block: &str) -> Self {
        Self::new(
            IrErrorKind::MissingTerminator,
            format!("block `{block}` of function `{function}` has no terminator"),
        )
    }

    /// Creates an `InvalidBranchTarget` error.
    pub fn invalid_branch_target(function: &str, block: &str) -> Self {
        Self::new(
            IrErrorKind::InvalidBranchTarget,
            format!("block `{block}` of function `{function}` branches to a missing block"),
        )
    }

    /// Creates a `ReturnTypeMismatch` error.
    pub fn return_type_mismatch(function: &str, expected: &str, found: &str) -> Self {
        Self::new(
            IrErrorKind::ReturnTypeMismatch,
            format!("function `{function}` returns {found} but is declared {expected}"),
        )
    }

    /// Creates an `UnknownSlot` error.
    pub fn unknown_slot(function: &str) -> Self {
        Self::new(
            IrErrorKind::UnknownSlot,
            format!("function `{function}` references an unknown stack slot"),
        )
    }

    /// Creates a `DuplicateName` error.
    pub fn duplicate_name(name: &str) -> Self {
        Self::new(
            IrErrorKind::DuplicateName,
            format!("module defines `{name}` more than once"),
        )
    }
}

impl fmt::Display for IrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ir error: {}", self.message)
    }
}

impl std::error::Error for IrError {}
