//! Parser error and warning contracts.

use std::fmt;

use crate::lexer::Token;

/// Stable syntax error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A concrete token did not match grammar expectations.
    UnexpectedToken,
    /// Input ended before required grammar elements were found.
    UnexpectedEndOfInput,
    /// A captured expression token sequence could not be shaped into a tree.
    MalformedExpression,
}

/// Syntax error payload.
///
/// Error propagation stops the parse at the first failure, so exactly one
/// syntax diagnostic is produced per compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// Error category.
    pub kind: ParseErrorKind,
    /// Human-readable error summary.
    pub message: String,
    /// 1-based source line of the offending token.
    pub line: u32,
    /// 1-based source column of the offending token.
    pub column: u32,
}

impl ParseError {
    /// Creates a syntax error.
    pub fn new(kind: ParseErrorKind, message: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            kind,
            message: message.into(),
            line,
            column,
        }
    }

    /// Creates an `UnexpectedToken` error listing what was expected.
    pub fn unexpected_token<I>(token: &Token, expected: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let expected: Vec<String> = expected.into_iter().map(Into::into).collect();
        let kind = if token.kind == crate::lexer::TokenKind::Eof {
            ParseErrorKind::UnexpectedEndOfInput
        } else {
            ParseErrorKind::UnexpectedToken
        };
        Self::new(
            kind,
            format!(
                "expected {}, found `{}`",
                expected.join(" or "),
                token.describe()
            ),
            token.line,
            token.column,
        )
    }

    /// Creates a `MalformedExpression` error anchored at a token.
    pub fn malformed_expression(token: &Token, detail: impl Into<String>) -> Self {
        Self::new(
            ParseErrorKind::MalformedExpression,
            detail,
            token.line,
            token.column,
        )
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "syntax error at line {} column {}: {}",
            self.line, self.column, self.message
        )
    }
}

impl std::error::Error for ParseError {}

/// Non-fatal resolver diagnostic for clamped literals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    /// Human-readable warning text.
    pub message: String,
    /// 1-based source line of the literal.
    pub line: u32,
    /// 1-based source column of the literal.
    pub column: u32,
}

impl ParseWarning {
    /// Creates a warning value.
    pub fn new(message: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            message: message.into(),
            line,
            column,
        }
    }

    /// Warns about an int literal outside the 32-bit signed range.
    pub fn int_literal_out_of_range(token: &Token) -> Self {
        Self::new(
            format!(
                "integer literal `{}` is out of range, clamped to 0",
                token.lexeme
            ),
            token.line,
            token.column,
        )
    }

    /// Warns about a float literal outside the single-precision range.
    pub fn float_literal_out_of_range(token: &Token) -> Self {
        Self::new(
            format!(
                "float literal `{}` is out of range, clamped to 0",
                token.lexeme
            ),
            token.line,
            token.column,
        )
    }

    /// Warns about a float run that carries no usable digits.
    pub fn float_literal_malformed(token: &Token) -> Self {
        Self::new(
            format!(
                "malformed float literal `{}`, treated as 0",
                token.lexeme
            ),
            token.line,
            token.column,
        )
    }
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "warning at line {} column {}: {}",
            self.line, self.column, self.message
        )
    }
}
