//! Statement parsing: blocks, control flow, declarations, assignment.

use minicc::ir::Type;
use minicc::lexer::Lexer;
use minicc::parser::ast::{BinaryOp, Expr, Item, Stmt};
use minicc::parser::{Parser, TokenBuffer};

/// Parses a function wrapping `body_src` and returns its body statements.
fn parse_body(body_src: &str) -> Vec<Stmt> {
    let src = format!("int wrap() {{ {body_src} return 0; }}");
    let mut parser = Parser::new(TokenBuffer::new(Lexer::new(&src)));
    let program = parser.parse_program().expect("body should parse");
    let Item::Function { body, .. } = program.items.into_iter().next().expect("one item") else {
        panic!("expected a function item");
    };
    body
}

#[test]
fn local_declarations_precede_statements() {
    let body = parse_body("int x; float y; x = 1;");
    assert!(matches!(
        &body[0],
        Stmt::LocalVar { ty: Type::Int, name, .. } if name == "x"
    ));
    assert!(matches!(
        &body[1],
        Stmt::LocalVar { ty: Type::Float, name, .. } if name == "y"
    ));
    assert!(matches!(&body[2], Stmt::Expr(_)));
}

#[test]
fn assignment_statement_is_a_binary_assign_node() {
    let body = parse_body("int x; x = 3;");
    let Stmt::Expr(Expr::Binary { op, lhs, .. }) = &body[1] else {
        panic!("expected an assignment expression");
    };
    assert_eq!(*op, BinaryOp::Assign);
    assert!(matches!(&**lhs, Expr::VarRef { name, .. } if name == "x"));
}

#[test]
fn chained_assignment_is_right_associative() {
    let body = parse_body("int x; int y; x = y = 3;");
    let Stmt::Expr(Expr::Binary { op, rhs, .. }) = &body[2] else {
        panic!("expected an assignment expression");
    };
    assert_eq!(*op, BinaryOp::Assign);
    assert!(matches!(
        &**rhs,
        Expr::Binary { op: BinaryOp::Assign, .. }
    ));
}

#[test]
fn if_without_else_has_an_empty_else_sequence() {
    let body = parse_body("if (true) { return 1; }");
    let Stmt::If {
        then_body,
        else_body,
        ..
    } = &body[0]
    else {
        panic!("expected an if statement");
    };
    assert_eq!(then_body.len(), 1);
    assert!(else_body.is_empty());
}

#[test]
fn if_else_keeps_both_branches() {
    let body = parse_body("if (true) { return 1; } else { return 2; }");
    let Stmt::If {
        then_body,
        else_body,
        ..
    } = &body[0]
    else {
        panic!("expected an if statement");
    };
    assert_eq!(then_body.len(), 1);
    assert_eq!(else_body.len(), 1);
}

#[test]
fn while_with_block_body_flattens_to_a_sequence() {
    let body = parse_body("int i; while (true) { i = i + 1; }");
    let Stmt::While { body: loop_body, .. } = &body[1] else {
        panic!("expected a while statement");
    };
    assert_eq!(loop_body.len(), 1);
}

#[test]
fn while_accepts_a_single_statement_body() {
    let body = parse_body("int i; while (true) i = i + 1;");
    let Stmt::While { body: loop_body, .. } = &body[1] else {
        panic!("expected a while statement");
    };
    assert_eq!(loop_body.len(), 1);
    assert!(matches!(&loop_body[0], Stmt::Expr(_)));
}

#[test]
fn while_accepts_an_empty_statement_body() {
    let body = parse_body("while (false) ;");
    let Stmt::While { body: loop_body, .. } = &body[0] else {
        panic!("expected a while statement");
    };
    assert!(loop_body.is_empty());
}

#[test]
fn bare_nested_block_is_kept_as_a_block_statement() {
    let body = parse_body("{ return 1; }");
    assert!(matches!(&body[0], Stmt::Block(stmts) if stmts.len() == 1));
}

#[test]
fn empty_statements_disappear() {
    let body = parse_body(";;;");
    // Only the trailing `return 0;` of the wrapper remains.
    assert_eq!(body.len(), 1);
    assert!(matches!(&body[0], Stmt::Return { .. }));
}

#[test]
fn nested_blocks_may_declare_locals() {
    let body = parse_body("{ int x; x = 1; }");
    let Stmt::Block(stmts) = &body[0] else {
        panic!("expected a block statement");
    };
    assert!(matches!(&stmts[0], Stmt::LocalVar { .. }));
}

#[test]
fn call_statement_parses_arguments_in_order() {
    let body = parse_body("f(1, 2 + 3, g());");
    let Stmt::Expr(Expr::Call { callee, args, .. }) = &body[0] else {
        panic!("expected a call expression");
    };
    assert_eq!(callee, "f");
    assert_eq!(args.len(), 3);
    assert!(matches!(&args[0], Expr::IntLit { value: 1, .. }));
    assert!(matches!(&args[1], Expr::Binary { .. }));
    assert!(matches!(&args[2], Expr::Call { .. }));
}
