//! mini-C lexer.
//!
//! Tokenizes source characters with one character of look-ahead: identifier
//! and keyword words, int and float literal runs, one- and two-character
//! operators, `//` line comments, and an explicit `Invalid` kind for any
//! character outside the alphabet. Token positions point at the first
//! character of the lexeme.

mod cursor;
pub mod diagnostics;
pub mod token;

pub use diagnostics::LexError;
pub use token::{Token, TokenKind};

use crate::lexer::cursor::Cursor;

/// Character-stream tokenizer over borrowed source text.
///
/// `next_token` is total: lexical problems surface as `Invalid` tokens and
/// end of input as `Eof` tokens (repeatedly, if polled again), so callers
/// can scan a whole file without aborting.
pub struct Lexer<'a> {
    input: &'a str,
    cursor: Cursor,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer over the provided source text.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            cursor: Cursor::new(),
        }
    }

    /// Resets the lexer to the start of the source.
    ///
    /// The driver rewinds between its invalid-token pre-scan and the main
    /// parse instead of re-reading the file.
    pub fn rewind(&mut self) {
        self.cursor.rewind();
    }

    /// Scans and returns the next token.
    pub fn next_token(&mut self) -> Token {
        self.skip_trivia();

        let line = self.cursor.line();
        let column = self.cursor.column();

        let Some(ch) = self.cursor.peek_char(self.input) else {
            return Token::new(TokenKind::Eof, "", line, column);
        };

        if ch.is_ascii_alphabetic() || ch == '_' {
            return self.scan_word(line, column);
        }
        if ch.is_ascii_digit() || ch == '.' {
            return self.scan_number(line, column);
        }
        self.scan_operator(ch, line, column)
    }

    /// Skips whitespace and `//` line comments.
    fn skip_trivia(&mut self) {
        loop {
            while matches!(
                self.cursor.peek_char(self.input),
                Some(ch) if ch.is_ascii_whitespace()
            ) {
                self.cursor.advance_char(self.input);
            }

            if self.cursor.peek_char(self.input) == Some('/')
                && self.cursor.peek_next_char(self.input) == Some('/')
            {
                while let Some(ch) = self.cursor.advance_char(self.input) {
                    if ch == '\n' {
                        break;
                    }
                }
                continue;
            }

            break;
        }
    }

    /// Scans an identifier run and classifies keywords and bool literals.
    fn scan_word(&mut self, line: u32, column: u32) -> Token {
        let mut lexeme = String::new();
        while matches!(
            self.cursor.peek_char(self.input),
            Some(ch) if ch.is_ascii_alphanumeric() || ch == '_'
        ) {
            if let Some(ch) = self.cursor.advance_char(self.input) {
                lexeme.push(ch);
            }
        }

        let kind = TokenKind::keyword_or_identifier(&lexeme);
        Token::new(kind, lexeme, line, column)
    }

    /// Scans a numeric literal run.
    ///
    /// A run with a decimal point anywhere (leading included) is a float
    /// literal; otherwise it is an int literal. Values are parsed later by
    /// the expression resolver.
    fn scan_number(&mut self, line: u32, column: u32) -> Token {
        let mut lexeme = String::new();
        let mut is_float = false;

        if self.cursor.peek_char(self.input) == Some('.') {
            is_float = true;
            if let Some(ch) = self.cursor.advance_char(self.input) {
                lexeme.push(ch);
            }
            self.scan_digits(&mut lexeme);
        } else {
            self.scan_digits(&mut lexeme);
            if self.cursor.peek_char(self.input) == Some('.') {
                is_float = true;
                if let Some(ch) = self.cursor.advance_char(self.input) {
                    lexeme.push(ch);
                }
                self.scan_digits(&mut lexeme);
            }
        }

        let kind = if is_float {
            TokenKind::FloatLit
        } else {
            TokenKind::IntLit
        };
        Token::new(kind, lexeme, line, column)
    }

    fn scan_digits(&mut self, lexeme: &mut String) {
        while matches!(
            self.cursor.peek_char(self.input),
            Some(ch) if ch.is_ascii_digit()
        ) {
            if let Some(ch) = self.cursor.advance_char(self.input) {
                lexeme.push(ch);
            }
        }
    }

    /// Scans punctuation and operators, using one character of look-ahead
    /// for the two-character forms.
    fn scan_operator(&mut self, ch: char, line: u32, column: u32) -> Token {
        self.cursor.advance_char(self.input);

        let (kind, lexeme) = match ch {
            '{' => (TokenKind::LBrace, "{"),
            '}' => (TokenKind::RBrace, "}"),
            '(' => (TokenKind::LParen, "("),
            ')' => (TokenKind::RParen, ")"),
            ';' => (TokenKind::Semicolon, ";"),
            ',' => (TokenKind::Comma, ","),
            '+' => (TokenKind::Plus, "+"),
            '-' => (TokenKind::Minus, "-"),
            '*' => (TokenKind::Star, "*"),
            '%' => (TokenKind::Percent, "%"),
            // `//` comments are consumed by `skip_trivia`, so a `/` here is
            // always division.
            '/' => (TokenKind::Slash, "/"),
            '=' => {
                if self.take('=') {
                    (TokenKind::Eq, "==")
                } else {
                    (TokenKind::Assign, "=")
                }
            }
            '!' => {
                if self.take('=') {
                    (TokenKind::Ne, "!=")
                } else {
                    (TokenKind::Not, "!")
                }
            }
            '<' => {
                if self.take('=') {
                    (TokenKind::Le, "<=")
                } else {
                    (TokenKind::Lt, "<")
                }
            }
            '>' => {
                if self.take('=') {
                    (TokenKind::Ge, ">=")
                } else {
                    (TokenKind::Gt, ">")
                }
            }
            '&' => {
                if self.take('&') {
                    (TokenKind::AndAnd, "&&")
                } else {
                    return Token::new(TokenKind::Invalid, "&", line, column);
                }
            }
            '|' => {
                if self.take('|') {
                    (TokenKind::OrOr, "||")
                } else {
                    return Token::new(TokenKind::Invalid, "|", line, column);
                }
            }
            other => {
                return Token::new(TokenKind::Invalid, other.to_string(), line, column);
            }
        };

        Token::new(kind, lexeme, line, column)
    }

    /// Consumes the next character when it matches `expected`.
    fn take(&mut self, expected: char) -> bool {
        if self.cursor.peek_char(self.input) == Some(expected) {
            self.cursor.advance_char(self.input);
            true
        } else {
            false
        }
    }
}
