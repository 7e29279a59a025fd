//! Textual IR writer.
//!
//! Renders a module as LLVM-flavored text: `i32`/`float`/`i1`/`void` scalar
//! types, entry-block allocas for stack slots, and `icmp`/`fcmp`/`br`/`ret`
//! spelled the conventional way. The driver writes the result to
//! `output.ll`.

use std::fmt::Write;

use crate::ir::instr::{BinOp, CastOp, CmpOp, Instr, Place, Terminator, UnOp, Value};
use crate::ir::module::{Function, GlobalVar, Module};
use crate::ir::types::Type;

/// Renders a whole module.
pub fn write_module(module: &Module) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "; ModuleID = '{}'", module.name);

    if !module.globals.is_empty() {
        out.push('\n');
        for global in &module.globals {
            out.push_str(&render_global(global));
            out.push('\n');
        }
    }

    for function in &module.functions {
        out.push('\n');
        if function.is_declaration() {
            out.push_str(&render_declaration(function));
        } else {
            out.push_str(&render_definition(function));
        }
    }

    out
}

fn render_global(global: &GlobalVar) -> String {
    let zero = match global.ty {
        Type::Float => format_float(0.0),
        Type::Bool => "false".to_string(),
        _ => "0".to_string(),
    };
    format!("@{} = global {} {}", global.name, global.ty.ir_name(), zero)
}

fn render_declaration(function: &Function) -> String {
    let params: Vec<&str> = function
        .params
        .iter()
        .map(|(_, ty)| ty.ir_name())
        .collect();
    format!(
        "declare {} @{}({})\n",
        function.ret_type.ir_name(),
        function.name,
        params.join(", ")
    )
}

fn render_definition(function: &Function) -> String {
    let params: Vec<String> = function
        .params
        .iter()
        .map(|(name, ty)| format!("{} %{}", ty.ir_name(), name))
        .collect();

    let mut out = format!(
        "define {} @{}({}) {{\n",
        function.ret_type.ir_name(),
        function.name,
        params.join(", ")
    );

    for (i, block) in function.blocks.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "{}:", block.label);

        // Stack slots print as allocas at the top of the entry block.
        if i == 0 {
            for slot in &function.slots {
                let _ = writeln!(out, "  %{} = alloca {}", slot.name, slot.ty.ir_name());
            }
        }

        for instr in &block.instrs {
            let _ = writeln!(out, "  {}", render_instr(function, instr));
        }
        if let Some(terminator) = &block.terminator {
            let _ = writeln!(out, "  {}", render_terminator(function, terminator));
        }
    }

    out.push_str("}\n");
    out
}

fn render_instr(function: &Function, instr: &Instr) -> String {
    match instr {
        Instr::Load { dest, ty, src } => format!(
            "%{} = load {}, {}* {}",
            temp_name(function, *dest),
            ty.ir_name(),
            ty.ir_name(),
            place_text(function, src)
        ),
        Instr::Store { value, dest } => format!(
            "store {} {}, {}* {}",
            value.ty().ir_name(),
            value_text(function, *value),
            value.ty().ir_name(),
            place_text(function, dest)
        ),
        Instr::Binary { dest, op, lhs, rhs } => format!(
            "%{} = {} {} {}, {}",
            temp_name(function, *dest),
            binop_text(*op),
            lhs.ty().ir_name(),
            value_text(function, *lhs),
            value_text(function, *rhs)
        ),
        Instr::Cmp { dest, op, lhs, rhs } => {
            let (instr_name, predicate) = if lhs.ty() == Type::Float {
                ("fcmp", fcmp_predicate(*op))
            } else {
                ("icmp", icmp_predicate(*op))
            };
            format!(
                "%{} = {} {} {} {}, {}",
                temp_name(function, *dest),
                instr_name,
                predicate,
                lhs.ty().ir_name(),
                value_text(function, *lhs),
                value_text(function, *rhs)
            )
        }
        Instr::Unary { dest, op, operand } => match op {
            UnOp::NegInt => format!(
                "%{} = sub i32 0, {}",
                temp_name(function, *dest),
                value_text(function, *operand)
            ),
            UnOp::NegFloat => format!(
                "%{} = fneg float {}",
                temp_name(function, *dest),
                value_text(function, *operand)
            ),
            UnOp::NotBool => format!(
                "%{} = xor i1 {}, true",
                temp_name(function, *dest),
                value_text(function, *operand)
            ),
        },
        Instr::Cast { dest, op, operand } => {
            let (instr_name, to) = match op {
                CastOp::BoolToInt => ("zext", Type::Int),
                CastOp::IntToFloat => ("sitofp", Type::Float),
                CastOp::BoolToFloat => ("uitofp", Type::Float),
            };
            format!(
                "%{} = {} {} {} to {}",
                temp_name(function, *dest),
                instr_name,
                operand.ty().ir_name(),
                value_text(function, *operand),
                to.ir_name()
            )
        }
        Instr::Call {
            dest,
            callee,
            ret,
            args,
        } => {
            let rendered: Vec<String> = args
                .iter()
                .map(|arg| format!("{} {}", arg.ty().ir_name(), value_text(function, *arg)))
                .collect();
            let call = format!("call {} @{}({})", ret.ir_name(), callee, rendered.join(", "));
            match dest {
                Some(dest) => format!("%{} = {}", temp_name(function, *dest), call),
                None => call,
            }
        }
    }
}

fn render_terminator(function: &Function, terminator: &Terminator) -> String {
    match terminator {
        Terminator::Ret(None) => "ret void".to_string(),
        Terminator::Ret(Some(value)) => format!(
            "ret {} {}",
            value.ty().ir_name(),
            value_text(function, *value)
        ),
        Terminator::Br(target) => format!("br label %{}", block_label(function, *target)),
        Terminator::CondBr {
            cond,
            then_dest,
            else_dest,
        } => format!(
            "br i1 {}, label %{}, label %{}",
            value_text(function, *cond),
            block_label(function, *then_dest),
            block_label(function, *else_dest)
        ),
    }
}

fn value_text(function: &Function, value: Value) -> String {
    match value {
        Value::ConstInt(v) => v.to_string(),
        Value::ConstFloat(v) => format_float(v),
        Value::ConstBool(v) => v.to_string(),
        Value::Arg(index, _) => {
            let name = function
                .params
                .get(index as usize)
                .map(|(name, _)| name.as_str())
                .unwrap_or("arg");
            format!("%{name}")
        }
        Value::Temp(id, _) => format!("%{}", temp_name(function, id)),
    }
}

fn place_text(function: &Function, place: &Place) -> String {
    match place {
        Place::Slot(id) => {
            let name = function
                .slot(*id)
                .map(|slot| slot.name.as_str())
                .unwrap_or("slot");
            format!("%{name}")
        }
        Place::Global(name) => format!("@{name}"),
    }
}

fn temp_name(function: &Function, id: crate::ir::ids::TempId) -> &str {
    function
        .temp_names
        .get(id.index())
        .map(String::as_str)
        .unwrap_or("t")
}

fn block_label(function: &Function, id: crate::ir::ids::BlockId) -> &str {
    function
        .block(id)
        .map(|block| block.label.as_str())
        .unwrap_or("block")
}

fn binop_text(op: BinOp) -> &'static str {
    match op {
        BinOp::Add => "add",
        BinOp::Sub => "sub",
        BinOp::Mul => "mul",
        BinOp::Div => "sdiv",
        BinOp::Rem => "srem",
        BinOp::FAdd => "fadd",
        BinOp::FSub => "fsub",
        BinOp::FMul => "fmul",
        BinOp::FDiv => "fdiv",
        BinOp::FRem => "frem",
    }
}

fn icmp_predicate(op: CmpOp) -> &'static str {
    match op {
        CmpOp::Eq => "eq",
        CmpOp::Ne => "ne",
        CmpOp::Lt => "slt",
        CmpOp::Le => "sle",
        CmpOp::Gt => "sgt",
        CmpOp::Ge => "sge",
    }
}

fn fcmp_predicate(op: CmpOp) -> &'static str {
    match op {
        CmpOp::Eq => "oeq",
        CmpOp::Ne => "one",
        CmpOp::Lt => "olt",
        CmpOp::Le => "ole",
        CmpOp::Gt => "ogt",
        CmpOp::Ge => "oge",
    }
}

/// Formats a float constant in LLVM's padded exponent style, e.g.
/// `1.500000e+00`.
pub fn format_float(value: f32) -> String {
    let formatted = format!("{:.6e}", value as f64);
    let Some((mantissa, exponent)) = formatted.split_once('e') else {
        return formatted;
    };
    let exp: i32 = exponent.parse().unwrap_or(0);
    let sign = if exp < 0 { '-' } else { '+' };
    format!("{}e{}{:02}", mantissa, sign, exp.abs())
}
