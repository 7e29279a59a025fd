//! Recursive-descent parser for the mini-C grammar.
//!
//! Predictive descent with one token of look-ahead everywhere except the
//! start of a statement-level expression, where a second token distinguishes
//! `IDENT =` from an ordinary rvalue. Expression productions validate the
//! grammar while capturing the consumed terminals flat; the resolver turns
//! each captured sequence into a tree.

use std::mem;

use crate::ir::types::Type;
use crate::lexer::{Token, TokenKind};
use crate::parser::ast::{Expr, Item, Param, Program, Prototype, Stmt};
use crate::parser::error::{ParseError, ParseWarning};
use crate::parser::resolver;
use crate::parser::token_buffer::TokenBuffer;

/// Recursive-descent parser over a buffered token stream.
pub struct Parser<'a> {
    buffer: TokenBuffer<'a>,
    cur: Token,
    /// Declared return type of the function currently being parsed; captured
    /// into each `return` statement.
    current_ret: Type,
    /// Set once a global or function definition has been parsed; externs may
    /// not follow.
    seen_decl: bool,
    warnings: Vec<ParseWarning>,
}

impl<'a> Parser<'a> {
    /// Creates a parser and primes its current token.
    pub fn new(mut buffer: TokenBuffer<'a>) -> Self {
        let cur = buffer.advance();
        Self {
            buffer,
            cur,
            current_ret: Type::Void,
            seen_decl: false,
            warnings: Vec::new(),
        }
    }

    /// Parses one top-level item, or `None` at end of input.
    ///
    /// The driver lowers each item as soon as it is returned, so globals and
    /// prototypes are visible to the bodies that follow them.
    pub fn parse_item(&mut self) -> Result<Option<Item>, ParseError> {
        match self.cur.kind {
            TokenKind::Eof => {
                if self.seen_decl {
                    Ok(None)
                } else {
                    Err(ParseError::unexpected_token(&self.cur, ["a declaration"]))
                }
            }
            TokenKind::KwExtern => {
                if self.seen_decl {
                    return Err(ParseError::unexpected_token(
                        &self.cur,
                        ["a type specifier"],
                    ));
                }
                self.parse_extern().map(Some)
            }
            TokenKind::KwVoid => {
                self.seen_decl = true;
                self.parse_void_function().map(Some)
            }
            TokenKind::KwInt | TokenKind::KwFloat | TokenKind::KwBool => {
                self.seen_decl = true;
                self.parse_decl().map(Some)
            }
            _ => Err(ParseError::unexpected_token(
                &self.cur,
                ["`extern`", "a type specifier"],
            )),
        }
    }

    /// Parses a whole program: an extern list followed by at least one
    /// declaration.
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut program = Program::default();
        while let Some(item) = self.parse_item()? {
            program.items.push(item);
        }
        Ok(program)
    }

    /// Drains warnings collected by the expression resolver so far.
    pub fn take_warnings(&mut self) -> Vec<ParseWarning> {
        mem::take(&mut self.warnings)
    }

    // -----------------------------------------------------------------------
    // Top-level productions
    // -----------------------------------------------------------------------

    /// `extern type_spec IDENT ( params ) ;`
    fn parse_extern(&mut self) -> Result<Item, ParseError> {
        self.expect(TokenKind::KwExtern, "`extern`")?;
        let ret_type = self.parse_type_spec()?;
        let name = self.expect(TokenKind::Ident, "a function name")?;
        self.expect(TokenKind::LParen, "`(`")?;
        let params = self.parse_params()?;
        self.expect(TokenKind::RParen, "`)`")?;
        self.expect(TokenKind::Semicolon, "`;`")?;
        Ok(Item::Extern(Prototype {
            name: name.lexeme.clone(),
            ret_type,
            params,
            token: name,
        }))
    }

    /// `void IDENT ( params ) block`
    fn parse_void_function(&mut self) -> Result<Item, ParseError> {
        self.expect(TokenKind::KwVoid, "`void`")?;
        let name = self.expect(TokenKind::Ident, "a function name")?;
        self.parse_function_rest(Type::Void, name)
    }

    /// `var_type IDENT ( ; | ( params ) block )`
    fn parse_decl(&mut self) -> Result<Item, ParseError> {
        let ty = self.parse_var_type()?;
        let name = self.expect(TokenKind::Ident, "an identifier")?;
        match self.cur.kind {
            TokenKind::Semicolon => {
                self.bump();
                Ok(Item::Global {
                    ty,
                    name: name.lexeme.clone(),
                    token: name,
                })
            }
            TokenKind::LParen => self.parse_function_rest(ty, name),
            _ => Err(ParseError::unexpected_token(&self.cur, ["`;`", "`(`"])),
        }
    }

    /// Parses `( params ) block` after a function name.
    fn parse_function_rest(&mut self, ret_type: Type, name: Token) -> Result<Item, ParseError> {
        self.expect(TokenKind::LParen, "`(`")?;
        let params = self.parse_params()?;
        self.expect(TokenKind::RParen, "`)`")?;

        self.current_ret = ret_type;
        let body = self.parse_block()?;

        Ok(Item::Function {
            proto: Prototype {
                name: name.lexeme.clone(),
                ret_type,
                params,
                token: name,
            },
            body,
        })
    }

    /// `params ::= param_list | "void" | ε` (FOLLOW is `)`)
    fn parse_params(&mut self) -> Result<Vec<Param>, ParseError> {
        match self.cur.kind {
            TokenKind::RParen => Ok(Vec::new()),
            TokenKind::KwVoid => {
                self.bump();
                Ok(Vec::new())
            }
            kind if kind.is_var_type() => {
                let mut params = vec![self.parse_param()?];
                while self.cur.kind == TokenKind::Comma {
                    self.bump();
                    params.push(self.parse_param()?);
                }
                Ok(params)
            }
            _ => Err(ParseError::unexpected_token(
                &self.cur,
                ["a parameter list", "`void`", "`)`"],
            )),
        }
    }

    /// `param ::= var_type IDENT`
    fn parse_param(&mut self) -> Result<Param, ParseError> {
        let ty = self.parse_var_type()?;
        let name = self.expect(TokenKind::Ident, "a parameter name")?;
        Ok(Param {
            ty,
            name: name.lexeme.clone(),
            token: name,
        })
    }

    /// `type_spec ::= "void" | var_type`
    fn parse_type_spec(&mut self) -> Result<Type, ParseError> {
        if self.cur.kind == TokenKind::KwVoid {
            self.bump();
            Ok(Type::Void)
        } else {
            self.parse_var_type()
        }
    }

    /// `var_type ::= "int" | "float" | "bool"`
    fn parse_var_type(&mut self) -> Result<Type, ParseError> {
        let ty = match self.cur.kind {
            TokenKind::KwInt => Type::Int,
            TokenKind::KwFloat => Type::Float,
            TokenKind::KwBool => Type::Bool,
            _ => {
                return Err(ParseError::unexpected_token(
                    &self.cur,
                    ["`int`", "`float`", "`bool`"],
                ));
            }
        };
        self.bump();
        Ok(ty)
    }

    // -----------------------------------------------------------------------
    // Statements
    // -----------------------------------------------------------------------

    /// `block ::= { local_decl* stmt* }`
    fn parse_block(&mut self) -> Result<Vec<Stmt>, ParseError> {
        self.expect(TokenKind::LBrace, "`{`")?;

        let mut stmts = Vec::new();
        while self.cur.kind.is_var_type() {
            stmts.push(self.parse_local_decl()?);
        }
        while self.starts_stmt() {
            if let Some(stmt) = self.parse_stmt()? {
                stmts.push(stmt);
            }
        }

        self.expect(TokenKind::RBrace, "`}`")?;
        Ok(stmts)
    }

    /// `local_decl ::= var_type IDENT ;`
    fn parse_local_decl(&mut self) -> Result<Stmt, ParseError> {
        let ty = self.parse_var_type()?;
        let name = self.expect(TokenKind::Ident, "a variable name")?;
        self.expect(TokenKind::Semicolon, "`;`")?;
        Ok(Stmt::LocalVar {
            ty,
            name: name.lexeme.clone(),
            token: name,
        })
    }

    fn starts_stmt(&self) -> bool {
        self.cur.kind.starts_expr()
            || matches!(
                self.cur.kind,
                TokenKind::Semicolon
                    | TokenKind::LBrace
                    | TokenKind::KwIf
                    | TokenKind::KwWhile
                    | TokenKind::KwReturn
            )
    }

    /// Parses one statement; an empty statement `;` produces `None`.
    fn parse_stmt(&mut self) -> Result<Option<Stmt>, ParseError> {
        match self.cur.kind {
            TokenKind::LBrace => Ok(Some(Stmt::Block(self.parse_block()?))),
            TokenKind::KwIf => self.parse_if().map(Some),
            TokenKind::KwWhile => self.parse_while().map(Some),
            TokenKind::KwReturn => self.parse_return().map(Some),
            TokenKind::Semicolon => {
                self.bump();
                Ok(None)
            }
            _ => {
                let expr = self.parse_expr()?;
                self.expect(TokenKind::Semicolon, "`;`")?;
                Ok(Some(Stmt::Expr(expr)))
            }
        }
    }

    /// `if_stmt ::= "if" ( expr ) block ("else" block)?`
    fn parse_if(&mut self) -> Result<Stmt, ParseError> {
        let token = self.expect(TokenKind::KwIf, "`if`")?;
        self.expect(TokenKind::LParen, "`(`")?;
        let cond = self.parse_expr()?;
        self.expect(TokenKind::RParen, "`)`")?;

        let then_body = self.parse_block()?;
        let else_body = if self.cur.kind == TokenKind::KwElse {
            self.bump();
            self.parse_block()?
        } else {
            Vec::new()
        };

        Ok(Stmt::If {
            cond,
            then_body,
            else_body,
            token,
        })
    }

    /// `while_stmt ::= "while" ( expr ) stmt`
    fn parse_while(&mut self) -> Result<Stmt, ParseError> {
        let token = self.expect(TokenKind::KwWhile, "`while`")?;
        self.expect(TokenKind::LParen, "`(`")?;
        let cond = self.parse_expr()?;
        self.expect(TokenKind::RParen, "`)`")?;

        if !self.starts_stmt() {
            return Err(ParseError::unexpected_token(&self.cur, ["a statement"]));
        }
        let body = match self.parse_stmt()? {
            Some(Stmt::Block(stmts)) => stmts,
            Some(stmt) => vec![stmt],
            None => Vec::new(),
        };

        Ok(Stmt::While { cond, body, token })
    }

    /// `return_stmt ::= "return" expr? ;`
    fn parse_return(&mut self) -> Result<Stmt, ParseError> {
        let token = self.expect(TokenKind::KwReturn, "`return`")?;
        let value = if self.cur.kind == TokenKind::Semicolon {
            None
        } else if self.cur.kind.starts_expr() {
            Some(self.parse_expr()?)
        } else {
            return Err(ParseError::unexpected_token(
                &self.cur,
                ["`;`", "an expression"],
            ));
        };
        self.expect(TokenKind::Semicolon, "`;`")?;
        Ok(Stmt::Return {
            value,
            ret_type: self.current_ret,
            token,
        })
    }

    // -----------------------------------------------------------------------
    // Expressions (flat capture)
    // -----------------------------------------------------------------------

    /// Parses one expression by capturing its terminals flat and resolving
    /// them to a tree.
    fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        let mut flat = Vec::new();
        self.capture_expr(&mut flat)?;
        resolver::resolve(&flat, &mut self.warnings)
    }

    /// `expr ::= IDENT "=" expr | rval`
    ///
    /// The only place two tokens of look-ahead are needed: an identifier is
    /// consumed speculatively and unread when no `=` follows.
    fn capture_expr(&mut self, flat: &mut Vec<Token>) -> Result<(), ParseError> {
        if self.cur.kind == TokenKind::Ident {
            let ident = self.bump();
            if self.cur.kind == TokenKind::Assign {
                flat.push(ident);
                flat.push(self.bump());
                return self.capture_expr(flat);
            }
            let lookahead = mem::replace(&mut self.cur, ident);
            self.buffer.unread(lookahead);
        }
        self.capture_logical_or(flat)
    }

    fn capture_logical_or(&mut self, flat: &mut Vec<Token>) -> Result<(), ParseError> {
        self.capture_logical_and(flat)?;
        while self.cur.kind == TokenKind::OrOr {
            flat.push(self.bump());
            self.capture_logical_and(flat)?;
        }
        Ok(())
    }

    fn capture_logical_and(&mut self, flat: &mut Vec<Token>) -> Result<(), ParseError> {
        self.capture_equality(flat)?;
        while self.cur.kind == TokenKind::AndAnd {
            flat.push(self.bump());
            self.capture_equality(flat)?;
        }
        Ok(())
    }

    fn capture_equality(&mut self, flat: &mut Vec<Token>) -> Result<(), ParseError> {
        self.capture_relational(flat)?;
        while matches!(self.cur.kind, TokenKind::Eq | TokenKind::Ne) {
            flat.push(self.bump());
            self.capture_relational(flat)?;
        }
        Ok(())
    }

    fn capture_relational(&mut self, flat: &mut Vec<Token>) -> Result<(), ParseError> {
        self.capture_additive(flat)?;
        while matches!(
            self.cur.kind,
            TokenKind::Le | TokenKind::Lt | TokenKind::Ge | TokenKind::Gt
        ) {
            flat.push(self.bump());
            self.capture_additive(flat)?;
        }
        Ok(())
    }

    fn capture_additive(&mut self, flat: &mut Vec<Token>) -> Result<(), ParseError> {
        self.capture_multiplicative(flat)?;
        while matches!(self.cur.kind, TokenKind::Plus | TokenKind::Minus) {
            flat.push(self.bump());
            self.capture_multiplicative(flat)?;
        }
        Ok(())
    }

    fn capture_multiplicative(&mut self, flat: &mut Vec<Token>) -> Result<(), ParseError> {
        self.capture_unary(flat)?;
        while matches!(
            self.cur.kind,
            TokenKind::Star | TokenKind::Slash | TokenKind::Percent
        ) {
            flat.push(self.bump());
            self.capture_unary(flat)?;
        }
        Ok(())
    }

    fn capture_unary(&mut self, flat: &mut Vec<Token>) -> Result<(), ParseError> {
        if matches!(self.cur.kind, TokenKind::Minus | TokenKind::Not) {
            flat.push(self.bump());
            return self.capture_unary(flat);
        }
        self.capture_primary(flat)
    }

    /// `primary ::= ( expr ) | IDENT ( "(" args? ")" )? | literal`
    fn capture_primary(&mut self, flat: &mut Vec<Token>) -> Result<(), ParseError> {
        match self.cur.kind {
            TokenKind::LParen => {
                flat.push(self.bump());
                self.capture_expr(flat)?;
                let close = self.expect(TokenKind::RParen, "`)`")?;
                flat.push(close);
                Ok(())
            }
            TokenKind::Ident => {
                flat.push(self.bump());
                if self.cur.kind == TokenKind::LParen {
                    flat.push(self.bump());
                    self.capture_args(flat)?;
                    let close = self.expect(TokenKind::RParen, "`)`")?;
                    flat.push(close);
                }
                Ok(())
            }
            TokenKind::IntLit | TokenKind::FloatLit | TokenKind::BoolLit => {
                flat.push(self.bump());
                Ok(())
            }
            _ => Err(ParseError::unexpected_token(&self.cur, ["an expression"])),
        }
    }

    /// `args ::= expr ("," expr)* | ε`
    fn capture_args(&mut self, flat: &mut Vec<Token>) -> Result<(), ParseError> {
        if self.cur.kind == TokenKind::RParen {
            return Ok(());
        }
        self.capture_expr(flat)?;
        while self.cur.kind == TokenKind::Comma {
            flat.push(self.bump());
            self.capture_expr(flat)?;
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Token plumbing
    // -----------------------------------------------------------------------

    /// Consumes and returns the current token.
    fn bump(&mut self) -> Token {
        let next = self.buffer.advance();
        mem::replace(&mut self.cur, next)
    }

    /// Consumes the current token when it matches, or fails naming what was
    /// expected.
    fn expect(&mut self, kind: TokenKind, label: &str) -> Result<Token, ParseError> {
        if self.cur.kind == kind {
            Ok(self.bump())
        } else {
            Err(ParseError::unexpected_token(&self.cur, [label]))
        }
    }
}
