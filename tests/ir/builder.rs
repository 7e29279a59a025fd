//! Function builder behavior: block labels, slot names, temps, positioning.

use minicc::ir::{
    BinOp, CmpOp, FunctionBuilder, Place, Terminator, Type, Value,
};

fn builder() -> FunctionBuilder {
    FunctionBuilder::new("f", Type::Int, vec![("a".to_string(), Type::Int)])
}

#[test]
fn entry_block_exists_and_is_current() {
    let b = builder();
    assert_eq!(b.entry_block(), b.current_block());
}

#[test]
fn block_labels_are_uniquified() {
    let mut b = builder();
    let first = b.new_block("if_then");
    let second = b.new_block("if_then");
    let function = {
        b.position_at(first);
        b.terminate(Terminator::Ret(Some(Value::ConstInt(0))));
        b.position_at(second);
        b.terminate(Terminator::Ret(Some(Value::ConstInt(0))));
        b.position_at(b.entry_block());
        b.terminate(Terminator::Br(first));
        b.finish()
    };
    assert_eq!(function.blocks[1].label, "if_then");
    assert_eq!(function.blocks[2].label, "if_then.1");
}

#[test]
fn slot_names_are_uniquified_for_shadowing() {
    let mut b = builder();
    let first = b.alloc_slot("x", Type::Int);
    let second = b.alloc_slot("x", Type::Int);
    assert_ne!(first, second);
    b.terminate(Terminator::Ret(Some(Value::ConstInt(0))));
    let function = b.finish();
    assert_eq!(function.slots[0].name, "x");
    assert_eq!(function.slots[1].name, "x.1");
}

#[test]
fn slot_names_avoid_parameter_names() {
    let mut b = builder();
    let slot = b.alloc_slot("a", Type::Int);
    b.terminate(Terminator::Ret(Some(Value::ConstInt(0))));
    let function = b.finish();
    assert_eq!(function.slot(slot).expect("slot").name, "a.1");
}

#[test]
fn temp_names_skip_taken_identifiers() {
    let mut b = FunctionBuilder::new("f", Type::Int, vec![("t0".to_string(), Type::Int)]);
    let slot = b.alloc_slot("x", Type::Int);
    let value = b.emit_load(Type::Int, Place::Slot(slot));
    let Value::Temp(id, _) = value else {
        panic!("expected a temp");
    };
    b.terminate(Terminator::Ret(Some(value)));
    let function = b.finish();
    // `t0` is the parameter, so the first temp becomes `t1`.
    assert_eq!(function.temp_names[id.index()], "t1");
}

#[test]
fn emitted_values_carry_their_types() {
    let mut b = builder();
    let slot = b.alloc_slot("x", Type::Float);
    assert_eq!(b.slot_type(slot), Type::Float);

    let loaded = b.emit_load(Type::Float, Place::Slot(slot));
    assert_eq!(loaded.ty(), Type::Float);

    let sum = b.emit_binary(BinOp::FAdd, loaded, Value::ConstFloat(1.0));
    assert_eq!(sum.ty(), Type::Float);

    let flag = b.emit_cmp(CmpOp::Lt, Value::ConstInt(1), Value::ConstInt(2));
    assert_eq!(flag.ty(), Type::Bool);
}

#[test]
fn void_calls_have_no_result() {
    let mut b = builder();
    assert!(b.emit_call("print", Type::Void, vec![]).is_none());
    assert!(b.emit_call("get", Type::Int, vec![]).is_some());
}

#[test]
fn terminate_seals_only_once() {
    let mut b = builder();
    b.terminate(Terminator::Ret(Some(Value::ConstInt(1))));
    // A later terminator in the same block is ignored.
    b.terminate(Terminator::Ret(Some(Value::ConstInt(2))));
    let function = b.finish();
    assert_eq!(
        function.blocks[0].terminator,
        Some(Terminator::Ret(Some(Value::ConstInt(1))))
    );
}

#[test]
fn is_terminated_tracks_the_current_block() {
    let mut b = builder();
    assert!(!b.is_terminated(b.current_block()));
    b.terminate(Terminator::Ret(Some(Value::ConstInt(0))));
    assert!(b.is_terminated(b.current_block()));
}
