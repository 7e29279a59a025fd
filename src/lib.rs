//! `minicc` is a compiler front-end for mini-C, a C-like language with the
//! scalar types `int`, `float`, and `bool`.
//!
//! Source text flows through four stages: a character-stream [`lexer`], a
//! buffered recursive-descent [`parser`] that captures expressions flat and
//! resolves them by precedence, a typed [`ir`] with block-positioned
//! builders, and an AST-walking emitter that checks types, applies implicit
//! widening along `bool -> int -> float`, and lowers block-structured
//! control flow. The [`driver`] ties the stages into the two-pass pipeline
//! used by the binary.

pub mod driver;
pub mod ir;
pub mod lexer;
pub mod parser;
