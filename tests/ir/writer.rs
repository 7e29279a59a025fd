//! Textual IR rendering.

use minicc::ir::writer::format_float;
use minicc::ir::{
    BinOp, FunctionBuilder, GlobalVar, Module, Place, Terminator, Type, Value, write_module,
};

#[test]
fn globals_render_zero_initialized() {
    let mut module = Module::new("m");
    module.add_global(GlobalVar {
        name: "count".to_string(),
        ty: Type::Int,
    });
    module.add_global(GlobalVar {
        name: "ratio".to_string(),
        ty: Type::Float,
    });
    module.add_global(GlobalVar {
        name: "flag".to_string(),
        ty: Type::Bool,
    });
    let text = write_module(&module);
    assert!(text.contains("@count = global i32 0"));
    assert!(text.contains("@ratio = global float 0.000000e+00"));
    assert!(text.contains("@flag = global i1 false"));
}

#[test]
fn declarations_render_parameter_types_only() {
    let mut module = Module::new("m");
    module.declare_function(
        "print_int",
        Type::Void,
        vec![("value".to_string(), Type::Int)],
    );
    let text = write_module(&module);
    assert!(text.contains("declare void @print_int(i32)"));
}

#[test]
fn definitions_render_blocks_in_creation_order() {
    let mut module = Module::new("m");
    let mut b = FunctionBuilder::new("pick", Type::Int, vec![("c".to_string(), Type::Bool)]);
    let then_block = b.new_block("if_then");
    let else_block = b.new_block("if_else");
    b.terminate(Terminator::CondBr {
        cond: Value::Arg(0, Type::Bool),
        then_dest: then_block,
        else_dest: else_block,
    });
    b.position_at(then_block);
    b.terminate(Terminator::Ret(Some(Value::ConstInt(1))));
    b.position_at(else_block);
    b.terminate(Terminator::Ret(Some(Value::ConstInt(2))));
    module.define_function(b.finish());

    let text = write_module(&module);
    assert!(text.contains("define i32 @pick(i1 %c)"));
    let entry = text.find("entry:").expect("entry label");
    let then_at = text.find("if_then:").expect("then label");
    let else_at = text.find("if_else:").expect("else label");
    assert!(entry < then_at && then_at < else_at);
    assert!(text.contains("br i1 %c, label %if_then, label %if_else"));
    assert!(text.contains("ret i32 1"));
    assert!(text.contains("ret i32 2"));
}

#[test]
fn slots_render_as_entry_allocas() {
    let mut module = Module::new("m");
    let mut b = FunctionBuilder::new("f", Type::Int, vec![]);
    let slot = b.alloc_slot("x", Type::Int);
    b.emit_store(Value::ConstInt(3), Place::Slot(slot));
    let loaded = b.emit_load(Type::Int, Place::Slot(slot));
    b.terminate(Terminator::Ret(Some(loaded)));
    module.define_function(b.finish());

    let text = write_module(&module);
    assert!(text.contains("%x = alloca i32"));
    assert!(text.contains("store i32 3, i32* %x"));
    assert!(text.contains("%t0 = load i32, i32* %x"));
    assert!(text.contains("ret i32 %t0"));
}

#[test]
fn arithmetic_and_float_constants_render() {
    let mut module = Module::new("m");
    let mut b = FunctionBuilder::new("f", Type::Float, vec![]);
    let sum = b.emit_binary(BinOp::FAdd, Value::ConstFloat(1.5), Value::ConstFloat(0.25));
    b.terminate(Terminator::Ret(Some(sum)));
    module.define_function(b.finish());

    let text = write_module(&module);
    assert!(text.contains("%t0 = fadd float 1.500000e+00, 2.500000e-01"));
    assert!(text.contains("ret float %t0"));
}

#[test]
fn module_header_names_the_module() {
    let module = Module::new("mini-c");
    let text = write_module(&module);
    assert!(text.starts_with("; ModuleID = 'mini-c'"));
}

#[test]
fn float_formatting_matches_the_padded_exponent_style() {
    assert_eq!(format_float(0.0), "0.000000e+00");
    assert_eq!(format_float(1.5), "1.500000e+00");
    assert_eq!(format_float(-0.5), "-5.000000e-01");
    assert_eq!(format_float(42.0), "4.200000e+01");
}
