//! Expression resolution: flat token vectors to expression trees.
//!
//! The parser captures each expression as the exact terminal sequence it
//! consumed; this module rebuilds the tree by repeatedly splitting at the
//! depth-zero operator of lowest precedence. Left-associative operators
//! split at the rightmost occurrence of the chosen precedence, assignment
//! at the earliest, which makes `=` right-associative.

use crate::lexer::{Token, TokenKind};
use crate::parser::ast::{BinaryOp, Expr, UnaryOp};
use crate::parser::error::{ParseError, ParseWarning};

/// Precedence levels, lowest first. Assignment is level 0.
fn binary_op_of(kind: TokenKind) -> Option<(BinaryOp, u8)> {
    match kind {
        TokenKind::Assign => Some((BinaryOp::Assign, 0)),
        TokenKind::OrOr => Some((BinaryOp::Or, 1)),
        TokenKind::AndAnd => Some((BinaryOp::And, 2)),
        TokenKind::Eq => Some((BinaryOp::Eq, 3)),
        TokenKind::Ne => Some((BinaryOp::Ne, 3)),
        TokenKind::Le => Some((BinaryOp::Le, 4)),
        TokenKind::Lt => Some((BinaryOp::Lt, 4)),
        TokenKind::Ge => Some((BinaryOp::Ge, 4)),
        TokenKind::Gt => Some((BinaryOp::Gt, 4)),
        TokenKind::Plus => Some((BinaryOp::Add, 5)),
        TokenKind::Minus => Some((BinaryOp::Sub, 5)),
        TokenKind::Star => Some((BinaryOp::Mul, 6)),
        TokenKind::Slash => Some((BinaryOp::Div, 6)),
        TokenKind::Percent => Some((BinaryOp::Rem, 6)),
        _ => None,
    }
}

/// Resolves one captured expression token sequence into an expression tree.
pub fn resolve(tokens: &[Token], warnings: &mut Vec<ParseWarning>) -> Result<Expr, ParseError> {
    let Some(first) = tokens.first() else {
        return Err(ParseError::malformed_expression(
            &Token::new(TokenKind::Eof, "", 1, 1),
            "empty expression",
        ));
    };

    // Single token: literal or variable reference.
    if tokens.len() == 1 {
        return resolve_single(first, warnings);
    }

    // Leading unary over a unary, parenthesized, call, or single-token
    // remainder.
    if let Some(op) = unary_op_of(first.kind) {
        if is_unary_shape(&tokens[1..]) {
            let operand = resolve(&tokens[1..], warnings)?;
            return Ok(Expr::Unary {
                op,
                operand: Box::new(operand),
                token: first.clone(),
            });
        }
    }

    // Fully parenthesized: strip and recurse.
    if first.kind == TokenKind::LParen
        && matching_close(tokens, 0)? == tokens.len() - 1
    {
        let inner = &tokens[1..tokens.len() - 1];
        if inner.is_empty() {
            return Err(ParseError::malformed_expression(
                first,
                "expected an expression between `(` and `)`",
            ));
        }
        return resolve(inner, warnings);
    }

    // Call spanning the whole vector.
    if first.kind == TokenKind::Ident
        && tokens.len() >= 3
        && tokens[1].kind == TokenKind::LParen
        && matching_close(tokens, 1)? == tokens.len() - 1
    {
        let args = resolve_args(&tokens[2..tokens.len() - 1], first, warnings)?;
        return Ok(Expr::Call {
            callee: first.lexeme.clone(),
            args,
            token: first.clone(),
        });
    }

    // Split at the depth-zero operator of lowest precedence.
    let (index, op) = find_split(tokens)?;
    let split_token = &tokens[index];
    let left = &tokens[..index];
    let right = &tokens[index + 1..];
    if left.is_empty() {
        return Err(ParseError::malformed_expression(
            split_token,
            format!("`{}` is missing a left operand", split_token.lexeme),
        ));
    }
    if right.is_empty() {
        return Err(ParseError::malformed_expression(
            split_token,
            format!("`{}` is missing a right operand", split_token.lexeme),
        ));
    }

    let lhs = resolve(left, warnings)?;
    let rhs = resolve(right, warnings)?;
    Ok(Expr::Binary {
        op,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
        token: split_token.clone(),
    })
}

/// Resolves a single-token expression.
///
/// Out-of-range int literals, and float literals that are malformed or
/// overflow single precision, warn and fall back to zero.
fn resolve_single(token: &Token, warnings: &mut Vec<ParseWarning>) -> Result<Expr, ParseError> {
    match token.kind {
        TokenKind::IntLit => {
            let value = match token.lexeme.parse::<i32>() {
                Ok(value) => value,
                Err(_) => {
                    warnings.push(ParseWarning::int_literal_out_of_range(token));
                    0
                }
            };
            Ok(Expr::IntLit {
                value,
                token: token.clone(),
            })
        }
        TokenKind::FloatLit => {
            let value = match token.lexeme.parse::<f32>() {
                Ok(value) if value.is_finite() => value,
                Ok(_) => {
                    warnings.push(ParseWarning::float_literal_out_of_range(token));
                    0.0
                }
                Err(_) => {
                    warnings.push(ParseWarning::float_literal_malformed(token));
                    0.0
                }
            };
            Ok(Expr::FloatLit {
                value,
                token: token.clone(),
            })
        }
        TokenKind::BoolLit => Ok(Expr::BoolLit {
            value: token.lexeme == "true",
            token: token.clone(),
        }),
        TokenKind::Ident => Ok(Expr::VarRef {
            name: token.lexeme.clone(),
            token: token.clone(),
        }),
        _ => Err(ParseError::malformed_expression(
            token,
            format!("expected an operand, found `{}`", token.describe()),
        )),
    }
}

fn unary_op_of(kind: TokenKind) -> Option<UnaryOp> {
    match kind {
        TokenKind::Minus => Some(UnaryOp::Neg),
        TokenKind::Not => Some(UnaryOp::Not),
        _ => None,
    }
}

/// Returns `true` when the tokens form a unary, parenthesized, call, or
/// single-token expression, the shapes a leading unary operator binds to
/// directly.
fn is_unary_shape(tokens: &[Token]) -> bool {
    match tokens.first() {
        None => false,
        Some(_) if tokens.len() == 1 => true,
        Some(first) => match first.kind {
            TokenKind::Minus | TokenKind::Not => is_unary_shape(&tokens[1..]),
            TokenKind::LParen => {
                matches!(matching_close(tokens, 0), Ok(close) if close == tokens.len() - 1)
            }
            TokenKind::Ident => {
                tokens.len() >= 3
                    && tokens[1].kind == TokenKind::LParen
                    && matches!(matching_close(tokens, 1), Ok(close) if close == tokens.len() - 1)
            }
            _ => false,
        },
    }
}

/// Returns the index of the `)` matching the `(` at `open`.
fn matching_close(tokens: &[Token], open: usize) -> Result<usize, ParseError> {
    let mut depth = 0usize;
    for (i, token) in tokens.iter().enumerate().skip(open) {
        match token.kind {
            TokenKind::LParen => depth += 1,
            TokenKind::RParen => {
                depth -= 1;
                if depth == 0 {
                    return Ok(i);
                }
            }
            _ => {}
        }
    }
    Err(ParseError::malformed_expression(
        &tokens[open],
        "unbalanced parentheses in expression",
    ))
}

/// Splits a call argument vector on depth-zero commas and resolves each
/// segment.
fn resolve_args(
    tokens: &[Token],
    callee: &Token,
    warnings: &mut Vec<ParseWarning>,
) -> Result<Vec<Expr>, ParseError> {
    if tokens.is_empty() {
        return Ok(Vec::new());
    }

    let mut args = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    for (i, token) in tokens.iter().enumerate() {
        match token.kind {
            TokenKind::LParen => depth += 1,
            TokenKind::RParen => depth = depth.saturating_sub(1),
            TokenKind::Comma if depth == 0 => {
                let segment = &tokens[start..i];
                if segment.is_empty() {
                    return Err(ParseError::malformed_expression(
                        token,
                        "expected an argument before `,`",
                    ));
                }
                args.push(resolve(segment, warnings)?);
                start = i + 1;
            }
            _ => {}
        }
    }

    let last = &tokens[start..];
    if last.is_empty() {
        return Err(ParseError::malformed_expression(
            callee,
            "expected an argument after `,`",
        ));
    }
    args.push(resolve(last, warnings)?);
    Ok(args)
}

/// Finds the split point: the depth-zero binary operator of lowest
/// precedence, taking the rightmost occurrence among equals except for `=`,
/// which takes the earliest.
///
/// A `-` counts as binary only when the preceding token can end an operand;
/// `!` is never binary.
fn find_split(tokens: &[Token]) -> Result<(usize, BinaryOp), ParseError> {
    let mut depth = 0usize;
    let mut best: Option<(usize, u8, BinaryOp)> = None;
    let mut prev_ends_operand = false;

    for (i, token) in tokens.iter().enumerate() {
        match token.kind {
            TokenKind::LParen => depth += 1,
            TokenKind::RParen => depth = depth.saturating_sub(1),
            kind if depth == 0 && kind != TokenKind::Not => {
                if let Some((op, prec)) = binary_op_of(kind) {
                    let is_binary = kind != TokenKind::Minus || prev_ends_operand;
                    if is_binary {
                        let replace = match best {
                            None => true,
                            Some((_, best_prec, _)) => {
                                prec < best_prec
                                    || (prec == best_prec && op != BinaryOp::Assign)
                            }
                        };
                        if replace {
                            best = Some((i, prec, op));
                        }
                    }
                }
            }
            _ => {}
        }
        prev_ends_operand = matches!(
            token.kind,
            TokenKind::Ident
                | TokenKind::IntLit
                | TokenKind::FloatLit
                | TokenKind::BoolLit
                | TokenKind::RParen
        );
    }

    match best {
        Some((index, _, op)) => Ok((index, op)),
        None => Err(ParseError::malformed_expression(
            &tokens[0],
            "expected an operator between operands",
        )),
    }
}
