//! AST contracts for the mini-C grammar.
//!
//! Expressions, statements, and top-level items are closed tagged variants;
//! the printer and the IR emitter each pattern-match once per node kind.
//! Every node carries the token that introduced it for diagnostics.

use std::fmt;

use crate::ir::types::Type;
use crate::lexer::Token;

/// Unary operator kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// Arithmetic negation `-`.
    Neg,
    /// Boolean negation `!`.
    Not,
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnaryOp::Neg => f.write_str("-"),
            UnaryOp::Not => f.write_str("!"),
        }
    }
}

/// Binary operator kinds, assignment included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// `=`
    Assign,
    /// `||`
    Or,
    /// `&&`
    And,
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `<=`
    Le,
    /// `<`
    Lt,
    /// `>=`
    Ge,
    /// `>`
    Gt,
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Rem,
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            BinaryOp::Assign => "=",
            BinaryOp::Or => "||",
            BinaryOp::And => "&&",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Le => "<=",
            BinaryOp::Lt => "<",
            BinaryOp::Ge => ">=",
            BinaryOp::Gt => ">",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
        };
        f.write_str(text)
    }
}

/// Expression node family.
///
/// Literal values are produced at resolver time; out-of-range literals have
/// already been clamped to zero (with a warning) by the time a node exists.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Integer literal.
    IntLit {
        /// Parsed literal value.
        value: i32,
        /// Originating literal token.
        token: Token,
    },
    /// Float literal.
    FloatLit {
        /// Parsed literal value.
        value: f32,
        /// Originating literal token.
        token: Token,
    },
    /// Boolean literal.
    BoolLit {
        /// Parsed literal value.
        value: bool,
        /// Originating literal token.
        token: Token,
    },
    /// Reference to a local or global variable.
    VarRef {
        /// Referenced name.
        name: String,
        /// Originating identifier token.
        token: Token,
    },
    /// Unary operator application.
    Unary {
        /// Operator kind.
        op: UnaryOp,
        /// Operand expression.
        operand: Box<Expr>,
        /// Originating operator token.
        token: Token,
    },
    /// Binary operator application, assignment included.
    Binary {
        /// Operator kind.
        op: BinaryOp,
        /// Left operand.
        lhs: Box<Expr>,
        /// Right operand.
        rhs: Box<Expr>,
        /// Originating operator token.
        token: Token,
    },
    /// Function call.
    Call {
        /// Callee name.
        callee: String,
        /// Arguments in source order.
        args: Vec<Expr>,
        /// Originating callee token.
        token: Token,
    },
}

impl Expr {
    /// Returns the token that introduced this node.
    pub fn token(&self) -> &Token {
        match self {
            Expr::IntLit { token, .. }
            | Expr::FloatLit { token, .. }
            | Expr::BoolLit { token, .. }
            | Expr::VarRef { token, .. }
            | Expr::Unary { token, .. }
            | Expr::Binary { token, .. }
            | Expr::Call { token, .. } => token,
        }
    }
}

/// Statement node family.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// Expression evaluated for effect.
    Expr(Expr),
    /// Local scalar declaration without initializer.
    LocalVar {
        /// Declared type.
        ty: Type,
        /// Declared name.
        name: String,
        /// Originating identifier token.
        token: Token,
    },
    /// Bare nested block in statement position.
    Block(Vec<Stmt>),
    /// `if`/`else` with an optional (possibly empty) else sequence.
    If {
        /// Condition; must evaluate to `bool`.
        cond: Expr,
        /// Then-branch statement sequence.
        then_body: Vec<Stmt>,
        /// Else-branch statement sequence; empty when absent.
        else_body: Vec<Stmt>,
        /// Originating `if` token.
        token: Token,
    },
    /// `while` loop.
    While {
        /// Condition; must evaluate to `bool`.
        cond: Expr,
        /// Body statement sequence.
        body: Vec<Stmt>,
        /// Originating `while` token.
        token: Token,
    },
    /// `return`, with the enclosing function's declared return type captured
    /// at parse time.
    Return {
        /// Returned value, absent for a bare `return;`.
        value: Option<Expr>,
        /// Declared return type of the enclosing function.
        ret_type: Type,
        /// Originating `return` token.
        token: Token,
    },
}

/// One formal parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    /// Parameter type.
    pub ty: Type,
    /// Parameter name.
    pub name: String,
    /// Originating identifier token.
    pub token: Token,
}

/// Function signature: name, return type, ordered parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Prototype {
    /// Function name.
    pub name: String,
    /// Declared return type.
    pub ret_type: Type,
    /// Formal parameters in source order.
    pub params: Vec<Param>,
    /// Originating function-name token.
    pub token: Token,
}

/// Top-level item family.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    /// External function declaration.
    Extern(Prototype),
    /// Function definition.
    Function {
        /// Signature.
        proto: Prototype,
        /// Body statement sequence.
        body: Vec<Stmt>,
    },
    /// Global scalar variable, zero-initialized.
    Global {
        /// Declared type.
        ty: Type,
        /// Declared name.
        name: String,
        /// Originating identifier token.
        token: Token,
    },
}

/// Ordered list of top-level items.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    /// Items in source order.
    pub items: Vec<Item>,
}
