//! Operator and punctuation scanning, including the one-character
//! look-ahead pairs.

use minicc::lexer::{Lexer, Token, TokenKind};

fn lex_all(input: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token();
        if token.kind == TokenKind::Eof {
            break;
        }
        tokens.push(token);
    }
    tokens
}

fn single_kind(input: &str) -> TokenKind {
    let tokens = lex_all(input);
    assert_eq!(tokens.len(), 1, "expected one token for {input:?}");
    tokens[0].kind
}

#[test]
fn two_character_operators_win_over_their_prefixes() {
    assert_eq!(single_kind("=="), TokenKind::Eq);
    assert_eq!(single_kind("!="), TokenKind::Ne);
    assert_eq!(single_kind("<="), TokenKind::Le);
    assert_eq!(single_kind(">="), TokenKind::Ge);
    assert_eq!(single_kind("&&"), TokenKind::AndAnd);
    assert_eq!(single_kind("||"), TokenKind::OrOr);
}

#[test]
fn single_character_operators() {
    assert_eq!(single_kind("="), TokenKind::Assign);
    assert_eq!(single_kind("!"), TokenKind::Not);
    assert_eq!(single_kind("<"), TokenKind::Lt);
    assert_eq!(single_kind(">"), TokenKind::Gt);
    assert_eq!(single_kind("+"), TokenKind::Plus);
    assert_eq!(single_kind("-"), TokenKind::Minus);
    assert_eq!(single_kind("*"), TokenKind::Star);
    assert_eq!(single_kind("/"), TokenKind::Slash);
    assert_eq!(single_kind("%"), TokenKind::Percent);
}

#[test]
fn punctuation() {
    let kinds: Vec<TokenKind> = lex_all("{}();,")
        .into_iter()
        .map(|token| token.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::LBrace,
            TokenKind::RBrace,
            TokenKind::LParen,
            TokenKind::RParen,
            TokenKind::Semicolon,
            TokenKind::Comma,
        ]
    );
}

#[test]
fn adjacent_equals_split_as_eq_then_assign() {
    let kinds: Vec<TokenKind> = lex_all("===")
        .into_iter()
        .map(|token| token.kind)
        .collect();
    assert_eq!(kinds, vec![TokenKind::Eq, TokenKind::Assign]);
}

#[test]
fn standalone_ampersand_is_invalid() {
    let tokens = lex_all("a & b");
    assert_eq!(tokens[1].kind, TokenKind::Invalid);
    assert_eq!(tokens[1].lexeme, "&");
}

#[test]
fn standalone_pipe_is_invalid() {
    let tokens = lex_all("a | b");
    assert_eq!(tokens[1].kind, TokenKind::Invalid);
    assert_eq!(tokens[1].lexeme, "|");
}

#[test]
fn line_comment_is_discarded_to_end_of_line() {
    let tokens = lex_all("a // b + c\nd");
    let lexemes: Vec<&str> = tokens.iter().map(|token| token.lexeme.as_str()).collect();
    assert_eq!(lexemes, vec!["a", "d"]);
}

#[test]
fn comment_at_end_of_input_terminates() {
    assert!(lex_all("// nothing after").is_empty());
}

#[test]
fn slash_not_followed_by_slash_is_division() {
    let tokens = lex_all("a / b");
    assert_eq!(tokens[1].kind, TokenKind::Slash);
}

#[test]
fn dense_expression_tokenizes_without_spaces() {
    let kinds: Vec<TokenKind> = lex_all("a<=b&&c!=-2")
        .into_iter()
        .map(|token| token.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Ident,
            TokenKind::Le,
            TokenKind::Ident,
            TokenKind::AndAnd,
            TokenKind::Ident,
            TokenKind::Ne,
            TokenKind::Minus,
            TokenKind::IntLit,
        ]
    );
}
