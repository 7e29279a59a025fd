//! Structural verification for emitted IR.
//!
//! The emitter verifies every function right after emitting it, before the
//! definition joins the module.

use std::collections::HashSet;

use crate::ir::error::IrError;
use crate::ir::instr::{Instr, Place, Terminator};
use crate::ir::module::{Function, Module};
use crate::ir::types::Type;

/// Verifies one function's structural invariants.
///
/// Declarations verify trivially. For definitions: every block ends in
/// exactly one terminator, branch targets are in range, `ret` operands
/// match the declared return type, and every referenced slot exists.
pub fn verify_function(function: &Function) -> Result<(), IrError> {
    if function.is_declaration() {
        return Ok(());
    }

    for block in &function.blocks {
        for instr in &block.instrs {
            verify_places(function, instr)?;
        }

        let Some(terminator) = &block.terminator else {
            return Err(IrError::missing_terminator(&function.name, &block.label));
        };

        match terminator {
            Terminator::Ret(value) => {
                let found = value.map(|value| value.ty()).unwrap_or(Type::Void);
                if found != function.ret_type {
                    return Err(IrError::return_type_mismatch(
                        &function.name,
                        function.ret_type.name(),
                        found.name(),
                    ));
                }
            }
            Terminator::Br(target) => {
                if function.block(*target).is_none() {
                    return Err(IrError::invalid_branch_target(&function.name, &block.label));
                }
            }
            Terminator::CondBr {
                then_dest,
                else_dest,
                ..
            } => {
                if function.block(*then_dest).is_none() || function.block(*else_dest).is_none() {
                    return Err(IrError::invalid_branch_target(&function.name, &block.label));
                }
            }
        }
    }

    Ok(())
}

/// Verifies a whole module: unique global and function names plus every
/// function's invariants.
pub fn verify_module(module: &Module) -> Result<(), IrError> {
    let mut names = HashSet::new();
    for global in &module.globals {
        if !names.insert(global.name.as_str()) {
            return Err(IrError::duplicate_name(&global.name));
        }
    }
    for function in &module.functions {
        if !names.insert(function.name.as_str()) {
            return Err(IrError::duplicate_name(&function.name));
        }
    }

    for function in &module.functions {
        verify_function(function)?;
    }
    Ok(())
}

fn verify_places(function: &Function, instr: &Instr) -> Result<(), IrError> {
    let place = match instr {
        Instr::Load { src, .. } => Some(src),
        Instr::Store { dest, .. } => Some(dest),
        _ => None,
    };
    if let Some(Place::Slot(id)) = place {
        if function.slot(*id).is_none() {
            return Err(IrError::unknown_slot(&function.name));
        }
    }
    Ok(())
}
