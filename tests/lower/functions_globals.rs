//! Prototypes, definitions, globals, calls, and returns.

use minicc::driver::{compile_source, CompileError};
use minicc::ir::lower::LowerError;
use minicc::ir::SemanticErrorKind;

fn compile_ir(source: &str) -> String {
    compile_source(source)
        .unwrap_or_else(|error| panic!("compilation failed: {error}"))
        .ir_text
}

fn compile_warnings(source: &str) -> Vec<String> {
    compile_source(source)
        .unwrap_or_else(|error| panic!("compilation failed: {error}"))
        .warnings
}

fn semantic_error(source: &str) -> minicc::ir::SemanticError {
    match compile_source(source).expect_err("compilation should fail") {
        CompileError::Lower(LowerError::Semantic(error)) => error,
        other => panic!("expected a semantic error, got {other:?}"),
    }
}

#[test]
fn extern_lowers_to_a_declare_line() {
    let ir = compile_ir("extern int getint();\nint main() { return getint(); }");
    assert!(ir.contains("declare i32 @getint()"));
    assert!(ir.contains("call i32 @getint()"));
}

#[test]
fn definition_replaces_an_earlier_declaration() {
    let ir = compile_ir(
        "extern int f(int a);\n\
         int f(int a) { return a; }\n\
         int main() { return f(1); }",
    );
    assert!(ir.contains("define i32 @f(i32 %a)"));
    assert!(!ir.contains("declare i32 @f"));
}

#[test]
fn repeated_identical_declaration_is_accepted() {
    let ir = compile_ir(
        "extern int f(int a);\n\
         extern int f(int a);\n\
         int main() { return f(1); }",
    );
    // Only one declare line survives.
    assert_eq!(ir.matches("declare i32 @f(i32)").count(), 1);
}

#[test]
fn incompatible_redeclaration_is_an_error() {
    let error = semantic_error(
        "extern int f(int a);\n\
         int f(float a) { return 0; }\n\
         int main() { return 0; }",
    );
    assert_eq!(error.kind, SemanticErrorKind::Redefinition);
    assert_eq!(error.line, 2);
}

#[test]
fn second_definition_is_an_error() {
    let error = semantic_error(
        "int f() { return 1; }\n\
         int f() { return 2; }",
    );
    assert_eq!(error.kind, SemanticErrorKind::Redefinition);
}

#[test]
fn parameters_get_entry_slots_and_stores() {
    let ir = compile_ir("int id(int v) { return v; }");
    assert!(ir.contains("%v.addr = alloca i32"));
    assert!(ir.contains("store i32 %v, i32* %v.addr"));
    assert!(ir.contains("load i32, i32* %v.addr"));
}

#[test]
fn duplicate_parameter_names_are_an_error() {
    let error = semantic_error("int f(int a, int a) { return 0; }");
    assert_eq!(error.kind, SemanticErrorKind::Redefinition);
}

#[test]
fn void_function_gets_an_implicit_return() {
    let ir = compile_ir("void noop() { }\nint main() { return 0; }");
    assert!(ir.contains("define void @noop()"));
    assert!(ir.contains("ret void"));
}

#[test]
fn void_function_may_return_early() {
    let ir = compile_ir("void f(bool c) { if (c) { return; } }\nint main() { return 0; }");
    assert_eq!(ir.matches("ret void").count(), 2);
}

#[test]
fn missing_return_in_non_void_function_is_an_error() {
    let error = semantic_error("int f() { int x; }");
    assert_eq!(error.kind, SemanticErrorKind::MissingReturn);
    assert!(error.message.contains("`f`"));
}

#[test]
fn open_path_through_an_if_is_a_missing_return() {
    let error = semantic_error("int g(bool c) { if (c) { return 1; } }");
    assert_eq!(error.kind, SemanticErrorKind::MissingReturn);
}

#[test]
fn bare_return_in_non_void_function_is_an_error() {
    let error = semantic_error("int f() { return; }");
    assert_eq!(error.kind, SemanticErrorKind::ReturnMismatch);
}

#[test]
fn value_return_in_void_function_is_an_error() {
    let error = semantic_error("void f() { return 1; }\nint main() { return 0; }");
    assert_eq!(error.kind, SemanticErrorKind::ReturnMismatch);
}

#[test]
fn return_narrowing_is_an_error() {
    let error = semantic_error("int f(float a) { return a; }");
    assert_eq!(error.kind, SemanticErrorKind::NarrowingConversion);
}

#[test]
fn return_widening_warns_and_converts() {
    let source = "float f(int a, int b) { return a + b; }";
    let warnings = compile_warnings(source);
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("widening"));
    let ir = compile_ir(source);
    assert!(ir.contains("sitofp i32"));
    assert!(ir.contains("ret float"));
}

#[test]
fn call_arity_mismatch_is_an_error() {
    let error = semantic_error(
        "extern int f(int a, int b);\n\
         int main() { return f(1); }",
    );
    assert_eq!(error.kind, SemanticErrorKind::ArityMismatch);
    assert!(error.message.contains("2"));
    assert!(error.message.contains("1"));
}

#[test]
fn call_arguments_widen_implicitly() {
    let ir = compile_ir(
        "extern float sqrtf(float x);\n\
         float main2(int n) { return sqrtf(n); }",
    );
    assert!(ir.contains("sitofp i32"));
    assert!(ir.contains("call float @sqrtf(float"));
}

#[test]
fn call_argument_narrowing_is_an_error() {
    let error = semantic_error(
        "extern int f(int a);\n\
         int main() { return f(1.5); }",
    );
    assert_eq!(error.kind, SemanticErrorKind::NarrowingConversion);
}

#[test]
fn call_to_unknown_function_is_an_error() {
    let error = semantic_error("int main() { return missing(); }");
    assert_eq!(error.kind, SemanticErrorKind::UnknownFunction);
}

#[test]
fn void_call_lowers_without_a_result_name() {
    let ir = compile_ir(
        "extern void emit(int x);\n\
         int main() { emit(3); return 0; }",
    );
    assert!(ir.contains("  call void @emit(i32 3)"));
    assert!(!ir.contains("= call void"));
}

#[test]
fn recursive_calls_see_their_own_signature() {
    let ir = compile_ir("int fact(int n) { if (n <= 1) { return 1; } return n * fact(n - 1); }");
    assert!(ir.contains("call i32 @fact(i32"));
}

#[test]
fn globals_are_zero_initialized_and_addressable() {
    let ir = compile_ir(
        "int counter;\n\
         int bump() { counter = counter + 1; return counter; }",
    );
    assert!(ir.contains("@counter = global i32 0"));
    assert!(ir.contains("load i32, i32* @counter"));
    assert!(ir.contains("store i32"));
    assert!(ir.contains("i32* @counter"));
}

#[test]
fn duplicate_global_is_an_error_even_with_the_same_type() {
    let error = semantic_error("int g;\nint g;\nint main() { return 0; }");
    assert_eq!(error.kind, SemanticErrorKind::Redefinition);
    assert_eq!(error.line, 2);
}

#[test]
fn duplicate_global_with_a_different_type_is_an_error() {
    let error = semantic_error("int g;\nfloat g;\nint main() { return 0; }");
    assert_eq!(error.kind, SemanticErrorKind::Redefinition);
}

#[test]
fn global_may_not_collide_with_a_function_name() {
    let error = semantic_error("int f() { return 0; }\nint f;\nint main() { return 0; }");
    assert_eq!(error.kind, SemanticErrorKind::Redefinition);
}
