//! Token contracts for the mini-C lexical alphabet.

/// Token categories produced by the lexer.
///
/// A single [`TokenKind::Invalid`] kind stands in for any character outside
/// the accepted alphabet; the lexer never fails, which lets the driver run a
/// whole-file invalid-token scan before parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Identifier: `[A-Za-z_][A-Za-z0-9_]*`, minus keywords.
    Ident,
    /// Keyword `int`.
    KwInt,
    /// Keyword `float`.
    KwFloat,
    /// Keyword `bool`.
    KwBool,
    /// Keyword `void`.
    KwVoid,
    /// Keyword `extern`.
    KwExtern,
    /// Keyword `if`.
    KwIf,
    /// Keyword `else`.
    KwElse,
    /// Keyword `while`.
    KwWhile,
    /// Keyword `return`.
    KwReturn,
    /// Integer literal: a digit run with no decimal point.
    IntLit,
    /// Float literal: a digit run containing a decimal point.
    FloatLit,
    /// Boolean literal `true` or `false`.
    BoolLit,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `;`
    Semicolon,
    /// `,`
    Comma,
    /// `=`
    Assign,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `%`
    Percent,
    /// `!`
    Not,
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
    /// `&&`
    AndAnd,
    /// `||`
    OrOr,
    /// End of input.
    Eof,
    /// Any character outside the accepted alphabet.
    Invalid,
}

impl TokenKind {
    /// Maps an identifier-shaped lexeme to its keyword or literal kind.
    pub fn keyword_or_identifier(lexeme: &str) -> Self {
        match lexeme {
            "int" => TokenKind::KwInt,
            "float" => TokenKind::KwFloat,
            "bool" => TokenKind::KwBool,
            "void" => TokenKind::KwVoid,
            "extern" => TokenKind::KwExtern,
            "if" => TokenKind::KwIf,
            "else" => TokenKind::KwElse,
            "while" => TokenKind::KwWhile,
            "return" => TokenKind::KwReturn,
            "true" | "false" => TokenKind::BoolLit,
            _ => TokenKind::Ident,
        }
    }

    /// Returns `true` for the variable type keywords `int`, `float`, `bool`.
    pub fn is_var_type(self) -> bool {
        matches!(self, TokenKind::KwInt | TokenKind::KwFloat | TokenKind::KwBool)
    }

    /// Returns `true` for tokens that may begin an expression.
    pub fn starts_expr(self) -> bool {
        matches!(
            self,
            TokenKind::Minus
                | TokenKind::Not
                | TokenKind::LParen
                | TokenKind::Ident
                | TokenKind::IntLit
                | TokenKind::FloatLit
                | TokenKind::BoolLit
        )
    }
}

/// A lexical token with its exact source text and position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Token category.
    pub kind: TokenKind,
    /// Token text preserved as scanned.
    pub lexeme: String,
    /// 1-based source line of the first lexeme character.
    pub line: u32,
    /// 1-based source column of the first lexeme character.
    pub column: u32,
}

impl Token {
    /// Creates a token value.
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            line,
            column,
        }
    }

    /// Returns the lexeme, or a printable placeholder for end of input.
    pub fn describe(&self) -> &str {
        if self.kind == TokenKind::Eof {
            "end of input"
        } else {
            &self.lexeme
        }
    }
}
