//! Typed expression emission: operators, widening, and their error cases.

use minicc::driver::{compile_source, CompileError};
use minicc::ir::lower::LowerError;
use minicc::ir::SemanticErrorKind;

fn compile_ir(source: &str) -> String {
    compile_source(source)
        .unwrap_or_else(|error| panic!("compilation failed: {error}"))
        .ir_text
}

fn semantic_error(source: &str) -> minicc::ir::SemanticError {
    match compile_source(source).expect_err("compilation should fail") {
        CompileError::Lower(LowerError::Semantic(error)) => error,
        other => panic!("expected a semantic error, got {other:?}"),
    }
}

#[test]
fn integer_arithmetic_uses_integer_opcodes() {
    let ir = compile_ir("int f(int a, int b) { return a * b + a / b - a % b; }");
    assert!(ir.contains("mul i32"));
    assert!(ir.contains("sdiv i32"));
    assert!(ir.contains("srem i32"));
    assert!(ir.contains("add i32"));
    assert!(ir.contains("sub i32"));
}

#[test]
fn float_arithmetic_uses_float_opcodes() {
    let ir = compile_ir("float f(float a, float b) { return a * b - a / b; }");
    assert!(ir.contains("fmul float"));
    assert!(ir.contains("fdiv float"));
    assert!(ir.contains("fsub float"));
}

#[test]
fn mixed_operands_widen_int_to_float() {
    let ir = compile_ir("float f(int a, float b) { return a * b; }");
    assert!(ir.contains("sitofp i32"));
    assert!(ir.contains("fmul float"));
}

#[test]
fn bool_operands_promote_to_int_for_arithmetic() {
    let ir = compile_ir("int f(bool a, bool b) { return a + b; }");
    assert!(ir.contains("zext i1"));
    assert!(ir.contains("add i32"));
}

#[test]
fn float_remainder_uses_frem() {
    let ir = compile_ir("float f(float a) { return a % 2.0; }");
    assert!(ir.contains("frem float"));
}

#[test]
fn comparisons_produce_bool() {
    let ir = compile_ir("bool f(int a, int b) { return a < b; }");
    assert!(ir.contains("icmp slt i32"));
    assert!(ir.contains("ret i1"));
}

#[test]
fn float_comparison_uses_ordered_predicates() {
    let ir = compile_ir("bool f(float a, float b) { return a >= b; }");
    assert!(ir.contains("fcmp oge float"));
}

#[test]
fn bool_equality_compares_directly() {
    let ir = compile_ir("bool f(bool a, bool b) { return a == b; }");
    assert!(ir.contains("icmp eq i1"));
    assert!(!ir.contains("zext"));
}

#[test]
fn bool_ordering_widens_to_int_first() {
    let ir = compile_ir("bool f(bool a, bool b) { return a < b; }");
    assert!(ir.contains("zext i1"));
    assert!(ir.contains("icmp slt i32"));
}

#[test]
fn unary_minus_on_int_subtracts_from_zero() {
    let ir = compile_ir("int f(int a) { return -a; }");
    assert!(ir.contains("sub i32 0,"));
}

#[test]
fn unary_minus_on_float_uses_fneg() {
    let ir = compile_ir("float f(float a) { return -a; }");
    assert!(ir.contains("fneg float"));
}

#[test]
fn unary_minus_on_bool_promotes_to_int() {
    let ir = compile_ir("int f(bool a) { return -a; }");
    assert!(ir.contains("zext i1"));
    assert!(ir.contains("sub i32 0,"));
}

#[test]
fn unary_not_uses_xor() {
    let ir = compile_ir("bool f(bool a) { return !a; }");
    assert!(ir.contains("xor i1"));
}

#[test]
fn not_on_non_bool_is_an_error() {
    let error = semantic_error("bool f(int a) { return !a; }");
    assert_eq!(error.kind, SemanticErrorKind::OperandTypeMismatch);
}

#[test]
fn assignment_stores_and_yields_the_stored_value() {
    let ir = compile_ir("int f() { int x; int y; y = x = 5; return y; }");
    // x = 5 stores the constant; y receives the same value.
    assert!(ir.contains("store i32 5, i32* %x"));
    assert!(ir.contains("store i32 5, i32* %y"));
}

#[test]
fn assignment_widens_the_right_hand_side() {
    let ir = compile_ir("int f() { float x; x = 1; return 0; }");
    assert!(ir.contains("sitofp i32 1 to float"));
    assert!(ir.contains("store float"));
}

#[test]
fn narrowing_assignment_is_an_error() {
    let error = semantic_error("int f() { int x; x = 1.5; return x; }");
    assert_eq!(error.kind, SemanticErrorKind::NarrowingConversion);
    assert!(error.message.contains("float"));
    assert!(error.message.contains("int"));
}

#[test]
fn assignment_target_must_be_an_identifier() {
    // `(x + 1) = 2` never reaches lowering: the grammar only admits `=`
    // after an identifier, so this fails as a syntax error.
    let error = compile_source("int f() { int x; (x + 1) = 2; return x; }")
        .expect_err("compilation should fail");
    assert!(matches!(error, CompileError::Parse(_)));
}

#[test]
fn int_to_bool_assignment_is_an_error() {
    let error = semantic_error("int f() { bool b; b = 1; return 0; }");
    assert_eq!(error.kind, SemanticErrorKind::NarrowingConversion);
}

#[test]
fn division_by_literal_zero_is_an_error() {
    let error = semantic_error("int f(int a) { return a / 0; }");
    assert_eq!(error.kind, SemanticErrorKind::DivisionByZero);
}

#[test]
fn remainder_by_literal_zero_is_an_error() {
    let error = semantic_error("int f(int a) { return a % 0; }");
    assert_eq!(error.kind, SemanticErrorKind::DivisionByZero);
}

#[test]
fn float_division_by_literal_zero_is_an_error() {
    let error = semantic_error("float f(float a) { return a / 0.0; }");
    assert_eq!(error.kind, SemanticErrorKind::DivisionByZero);
}

#[test]
fn division_by_a_zero_valued_variable_is_not_static_error() {
    // Only the literal form is rejected at compile time.
    let ir = compile_ir("int f(int a, int b) { return a / b; }");
    assert!(ir.contains("sdiv i32"));
}

#[test]
fn unknown_identifier_is_reported_with_position() {
    let error = semantic_error("int f() { return missing; }");
    assert_eq!(error.kind, SemanticErrorKind::UnknownIdentifier);
    assert!(error.message.contains("missing"));
    assert_eq!(error.line, 1);
    assert_eq!(error.column, 18);
}

#[test]
fn logical_operator_on_non_bool_is_an_error() {
    let error = semantic_error("bool f(int a, bool b) { return a && b; }");
    assert_eq!(error.kind, SemanticErrorKind::OperandTypeMismatch);
}

#[test]
fn void_call_result_cannot_be_used_as_a_value() {
    let error = semantic_error(
        "extern void emit(int x);\nint f() { int y; y = emit(1); return y; }",
    );
    assert_eq!(error.kind, SemanticErrorKind::VoidValueUse);
}

#[test]
fn literals_are_not_constant_folded() {
    let ir = compile_ir("int f() { return 2 + 3; }");
    assert!(ir.contains("add i32 2, 3"));
}
