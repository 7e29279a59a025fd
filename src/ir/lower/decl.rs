//! Top-level declaration lowering: prototypes, definitions, globals.

use crate::ir::instr::{Place, Terminator, Value};
use crate::ir::lower::diagnostics::{LowerError, SemanticError};
use crate::ir::lower::scope::ScopeStack;
use crate::ir::lower::stmt::lower_stmts;
use crate::ir::lower::{FuncCx, Lowering, Signature};
use crate::ir::module::{FunctionBuilder, GlobalVar};
use crate::ir::types::Type;
use crate::ir::verify;
use crate::lexer::Token;
use crate::parser::ast::{Prototype, Stmt};

/// Registers a zero-initialized global.
///
/// Any redefinition of a global name is an error, matching type or not.
pub(crate) fn lower_global(
    lowering: &mut Lowering,
    ty: Type,
    name: &str,
    token: &Token,
) -> Result<(), LowerError> {
    if lowering.globals.contains_key(name) {
        return Err(SemanticError::redefinition(token, "global variable", name).into());
    }
    if lowering.functions.contains_key(name) {
        return Err(SemanticError::redefinition(token, "name", name).into());
    }

    lowering.module.add_global(GlobalVar {
        name: name.to_string(),
        ty,
    });
    lowering.globals.insert(name.to_string(), ty);
    Ok(())
}

/// Registers an external function declaration.
///
/// A repeated declaration with an identical signature is accepted; an
/// incompatible one is an error.
pub(crate) fn lower_prototype(lowering: &mut Lowering, proto: &Prototype) -> Result<(), LowerError> {
    let signature = Signature {
        ret_type: proto.ret_type,
        params: proto.params.iter().map(|param| param.ty).collect(),
        defined: false,
    };

    if lowering.globals.contains_key(&proto.name) {
        return Err(SemanticError::redefinition(&proto.token, "name", &proto.name).into());
    }

    if let Some(existing) = lowering.functions.get(&proto.name) {
        if existing.ret_type == signature.ret_type && existing.params == signature.params {
            return Ok(());
        }
        return Err(SemanticError::redefinition(&proto.token, "function", &proto.name).into());
    }

    lowering.functions.insert(proto.name.clone(), signature);
    lowering.module.declare_function(
        proto.name.clone(),
        proto.ret_type,
        proto
            .params
            .iter()
            .map(|param| (param.name.clone(), param.ty))
            .collect(),
    );
    Ok(())
}

/// Emits a function definition.
///
/// Parameters get entry slots holding the incoming values; the body lowers
/// in a fresh top scope; a non-`void` body whose final block stays open is
/// a missing-return error, while a `void` one gets an implicit bare return.
/// The emitted function is verified before joining the module.
pub(crate) fn lower_function(
    lowering: &mut Lowering,
    proto: &Prototype,
    body: &[Stmt],
) -> Result<(), LowerError> {
    if lowering.globals.contains_key(&proto.name) {
        return Err(SemanticError::redefinition(&proto.token, "name", &proto.name).into());
    }

    let signature = Signature {
        ret_type: proto.ret_type,
        params: proto.params.iter().map(|param| param.ty).collect(),
        defined: true,
    };
    if let Some(existing) = lowering.functions.get(&proto.name) {
        if existing.defined {
            return Err(SemanticError::redefinition(&proto.token, "function", &proto.name).into());
        }
        if existing.ret_type != signature.ret_type || existing.params != signature.params {
            return Err(SemanticError::redefinition(&proto.token, "function", &proto.name).into());
        }
    }
    lowering.functions.insert(proto.name.clone(), signature);

    let params: Vec<(String, Type)> = proto
        .params
        .iter()
        .map(|param| (param.name.clone(), param.ty))
        .collect();
    let mut builder = FunctionBuilder::new(proto.name.clone(), proto.ret_type, params);

    let mut cx = FuncCx {
        builder: &mut builder,
        scopes: ScopeStack::new(),
        globals: &lowering.globals,
        functions: &lowering.functions,
        warnings: &mut lowering.warnings,
        ret_type: proto.ret_type,
    };

    cx.scopes.push();
    for (index, param) in proto.params.iter().enumerate() {
        if cx.scopes.declared_in_current(&param.name) {
            return Err(SemanticError::redefinition(&param.token, "parameter", &param.name).into());
        }
        let slot = cx
            .builder
            .alloc_slot(&format!("{}.addr", param.name), param.ty);
        cx.builder
            .emit_store(Value::Arg(index as u32, param.ty), Place::Slot(slot));
        cx.scopes.declare(&param.name, slot);
    }

    lower_stmts(&mut cx, body)?;

    if !cx.builder.is_terminated(cx.builder.current_block()) {
        if proto.ret_type == Type::Void {
            cx.builder.terminate(Terminator::Ret(None));
        } else {
            return Err(SemanticError::missing_return(&proto.token, &proto.name).into());
        }
    }
    cx.scopes.pop();

    let function = builder.finish();
    verify::verify_function(&function)?;
    lowering.module.define_function(function);
    Ok(())
}
