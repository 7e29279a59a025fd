//! Token buffer look-ahead, unread, and clear semantics.

use minicc::lexer::{Lexer, TokenKind};
use minicc::parser::TokenBuffer;

fn buffer_for(input: &str) -> TokenBuffer<'_> {
    TokenBuffer::new(Lexer::new(input))
}

#[test]
fn advance_yields_tokens_in_source_order() {
    let mut buffer = buffer_for("int x ;");
    assert_eq!(buffer.advance().kind, TokenKind::KwInt);
    assert_eq!(buffer.advance().kind, TokenKind::Ident);
    assert_eq!(buffer.advance().kind, TokenKind::Semicolon);
    assert_eq!(buffer.advance().kind, TokenKind::Eof);
}

#[test]
fn peek_does_not_consume() {
    let mut buffer = buffer_for("a b");
    assert_eq!(buffer.peek().lexeme, "a");
    assert_eq!(buffer.peek().lexeme, "a");
    assert_eq!(buffer.advance().lexeme, "a");
    assert_eq!(buffer.peek().lexeme, "b");
}

#[test]
fn peek_second_sees_two_tokens_ahead() {
    let mut buffer = buffer_for("a = 1");
    assert_eq!(buffer.peek().lexeme, "a");
    assert_eq!(buffer.peek_second().kind, TokenKind::Assign);
    // Look-ahead leaves consumption order intact.
    assert_eq!(buffer.advance().lexeme, "a");
    assert_eq!(buffer.advance().lexeme, "=");
    assert_eq!(buffer.advance().lexeme, "1");
}

#[test]
fn unread_pushes_a_token_back_onto_the_head() {
    let mut buffer = buffer_for("x y");
    let x = buffer.advance();
    assert_eq!(x.lexeme, "x");
    buffer.unread(x);
    assert_eq!(buffer.advance().lexeme, "x");
    assert_eq!(buffer.advance().lexeme, "y");
}

#[test]
fn clear_and_rewind_restart_the_stream() {
    let mut buffer = buffer_for("int x ;");
    assert_eq!(buffer.advance().kind, TokenKind::KwInt);
    assert_eq!(buffer.peek().kind, TokenKind::Ident);

    buffer.clear();
    buffer.rewind();

    assert_eq!(buffer.advance().kind, TokenKind::KwInt);
    assert_eq!(buffer.advance().kind, TokenKind::Ident);
    assert_eq!(buffer.advance().kind, TokenKind::Semicolon);
}

#[test]
fn eof_repeats_at_end_of_input() {
    let mut buffer = buffer_for("");
    assert_eq!(buffer.advance().kind, TokenKind::Eof);
    assert_eq!(buffer.advance().kind, TokenKind::Eof);
    assert_eq!(buffer.peek().kind, TokenKind::Eof);
}
