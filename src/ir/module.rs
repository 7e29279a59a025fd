//! IR module containers and the block-positioned function builder.

use std::collections::HashSet;

use crate::ir::ids::{BlockId, SlotId, TempId};
use crate::ir::instr::{BinOp, CastOp, CmpOp, Instr, Place, Terminator, UnOp, Value};
use crate::ir::types::Type;

/// A zero-initialized module global.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalVar {
    /// Global name.
    pub name: String,
    /// Scalar type.
    pub ty: Type,
}

/// One per-function stack slot, conceptually an entry-block alloca.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackSlot {
    /// Slot handle.
    pub id: SlotId,
    /// Printed name, uniquified across shadowed locals.
    pub name: String,
    /// Stored value type.
    pub ty: Type,
}

/// A basic block: straight-line instructions plus one terminator.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// Block handle.
    pub id: BlockId,
    /// Printed label, uniquified within the function.
    pub label: String,
    /// Instructions in emission order.
    pub instrs: Vec<Instr>,
    /// Terminator; `None` only while the block is still being built.
    pub terminator: Option<Terminator>,
}

/// A function declaration or definition.
///
/// A declaration (an `extern`) has no blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    /// Function name.
    pub name: String,
    /// Declared return type.
    pub ret_type: Type,
    /// Parameter names and types in order.
    pub params: Vec<(String, Type)>,
    /// Stack slots in allocation order.
    pub slots: Vec<StackSlot>,
    /// Basic blocks in creation order; the first is the entry block.
    pub blocks: Vec<Block>,
    /// Printed names of instruction results, indexed by [`TempId`].
    pub temp_names: Vec<String>,
}

impl Function {
    /// Returns `true` when this is a body-less declaration.
    pub fn is_declaration(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Returns a block by handle.
    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.blocks.get(id.index())
    }

    /// Returns a slot by handle.
    pub fn slot(&self, id: SlotId) -> Option<&StackSlot> {
        self.slots.get(id.index())
    }
}

/// A whole IR module: globals, declarations, and definitions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Module {
    /// Module name, recorded in the textual output.
    pub name: String,
    /// Globals in declaration order.
    pub globals: Vec<GlobalVar>,
    /// Functions in declaration order; defining a declared function replaces
    /// it in place.
    pub functions: Vec<Function>,
}

impl Module {
    /// Creates an empty module.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            globals: Vec::new(),
            functions: Vec::new(),
        }
    }

    /// Registers a zero-initialized global.
    pub fn add_global(&mut self, global: GlobalVar) {
        self.globals.push(global);
    }

    /// Registers a body-less function declaration.
    pub fn declare_function(&mut self, name: impl Into<String>, ret_type: Type, params: Vec<(String, Type)>) {
        self.functions.push(Function {
            name: name.into(),
            ret_type,
            params,
            slots: Vec::new(),
            blocks: Vec::new(),
            temp_names: Vec::new(),
        });
    }

    /// Adds a definition, replacing an earlier declaration of the same name.
    pub fn define_function(&mut self, function: Function) {
        if let Some(existing) = self
            .functions
            .iter_mut()
            .find(|existing| existing.name == function.name)
        {
            *existing = function;
        } else {
            self.functions.push(function);
        }
    }

    /// Looks up a function by name.
    pub fn function(&self, name: &str) -> Option<&Function> {
        self.functions.iter().find(|function| function.name == name)
    }

    /// Looks up a global by name.
    pub fn global(&self, name: &str) -> Option<&GlobalVar> {
        self.globals.iter().find(|global| global.name == name)
    }
}

/// Builder for one function body, positioned at a current basic block.
///
/// Labels, slot names, and temp names share one namespace so the textual
/// writer never has to rename anything.
#[derive(Debug)]
pub struct FunctionBuilder {
    name: String,
    ret_type: Type,
    params: Vec<(String, Type)>,
    slots: Vec<StackSlot>,
    blocks: Vec<Block>,
    temp_names: Vec<String>,
    current: BlockId,
    next_temp_hint: u32,
    used_names: HashSet<String>,
}

impl FunctionBuilder {
    /// Creates a builder with an empty entry block and positions at it.
    pub fn new(name: impl Into<String>, ret_type: Type, params: Vec<(String, Type)>) -> Self {
        let mut used_names = HashSet::new();
        used_names.insert("entry".to_string());
        for (param_name, _) in &params {
            used_names.insert(param_name.clone());
        }

        Self {
            name: name.into(),
            ret_type,
            params,
            slots: Vec::new(),
            blocks: vec![Block {
                id: BlockId::new(0),
                label: "entry".to_string(),
                instrs: Vec::new(),
                terminator: None,
            }],
            temp_names: Vec::new(),
            current: BlockId::new(0),
            next_temp_hint: 0,
            used_names,
        }
    }

    /// Returns the declared return type.
    pub fn ret_type(&self) -> Type {
        self.ret_type
    }

    /// Returns the entry block handle.
    pub fn entry_block(&self) -> BlockId {
        BlockId::new(0)
    }

    /// Returns the block currently positioned at.
    pub fn current_block(&self) -> BlockId {
        self.current
    }

    /// Repositions emission onto `block`.
    pub fn position_at(&mut self, block: BlockId) {
        debug_assert!(block.index() < self.blocks.len());
        self.current = block;
    }

    /// Creates a new empty block whose label starts from `hint`.
    pub fn new_block(&mut self, hint: &str) -> BlockId {
        let label = self.unique_name(hint);
        let id = BlockId::new(self.blocks.len() as u32);
        self.blocks.push(Block {
            id,
            label,
            instrs: Vec::new(),
            terminator: None,
        });
        id
    }

    /// Returns `true` when `block` already ends in a terminator.
    pub fn is_terminated(&self, block: BlockId) -> bool {
        self.blocks
            .get(block.index())
            .is_some_and(|block| block.terminator.is_some())
    }

    /// Seals the current block with `terminator` unless it is already sealed.
    pub fn terminate(&mut self, terminator: Terminator) {
        let current = self.current.index();
        if let Some(block) = self.blocks.get_mut(current) {
            if block.terminator.is_none() {
                block.terminator = Some(terminator);
            }
        }
    }

    /// Allocates a typed stack slot in the function entry.
    pub fn alloc_slot(&mut self, name: &str, ty: Type) -> SlotId {
        let printed = self.unique_name(name);
        let id = SlotId::new(self.slots.len() as u32);
        self.slots.push(StackSlot {
            id,
            name: printed,
            ty,
        });
        id
    }

    /// Returns the stored type of a slot.
    pub fn slot_type(&self, id: SlotId) -> Type {
        self.slots
            .get(id.index())
            .map(|slot| slot.ty)
            .unwrap_or(Type::Void)
    }

    /// Emits a load out of `src` and returns the loaded value.
    pub fn emit_load(&mut self, ty: Type, src: Place) -> Value {
        let dest = self.new_temp();
        self.push_instr(Instr::Load { dest, ty, src });
        Value::Temp(dest, ty)
    }

    /// Emits a store of `value` into `dest`.
    pub fn emit_store(&mut self, value: Value, dest: Place) {
        self.push_instr(Instr::Store { value, dest });
    }

    /// Emits a binary arithmetic instruction; operands share a type.
    pub fn emit_binary(&mut self, op: BinOp, lhs: Value, rhs: Value) -> Value {
        let ty = lhs.ty();
        let dest = self.new_temp();
        self.push_instr(Instr::Binary { dest, op, lhs, rhs });
        Value::Temp(dest, ty)
    }

    /// Emits a comparison; the result is always `bool`.
    pub fn emit_cmp(&mut self, op: CmpOp, lhs: Value, rhs: Value) -> Value {
        let dest = self.new_temp();
        self.push_instr(Instr::Cmp { dest, op, lhs, rhs });
        Value::Temp(dest, Type::Bool)
    }

    /// Emits a unary instruction.
    pub fn emit_unary(&mut self, op: UnOp, operand: Value) -> Value {
        let ty = match op {
            UnOp::NegInt => Type::Int,
            UnOp::NegFloat => Type::Float,
            UnOp::NotBool => Type::Bool,
        };
        let dest = self.new_temp();
        self.push_instr(Instr::Unary { dest, op, operand });
        Value::Temp(dest, ty)
    }

    /// Emits a widening cast.
    pub fn emit_cast(&mut self, op: CastOp, operand: Value) -> Value {
        let ty = op.result_type();
        let dest = self.new_temp();
        self.push_instr(Instr::Cast { dest, op, operand });
        Value::Temp(dest, ty)
    }

    /// Emits a call; `void` callees produce no result value.
    pub fn emit_call(&mut self, callee: impl Into<String>, ret: Type, args: Vec<Value>) -> Option<Value> {
        let dest = if ret == Type::Void {
            None
        } else {
            Some(self.new_temp())
        };
        self.push_instr(Instr::Call {
            dest,
            callee: callee.into(),
            ret,
            args,
        });
        dest.map(|dest| Value::Temp(dest, ret))
    }

    /// Finalizes the builder into a [`Function`].
    pub fn finish(self) -> Function {
        Function {
            name: self.name,
            ret_type: self.ret_type,
            params: self.params,
            slots: self.slots,
            blocks: self.blocks,
            temp_names: self.temp_names,
        }
    }

    fn push_instr(&mut self, instr: Instr) {
        let current = self.current.index();
        if let Some(block) = self.blocks.get_mut(current) {
            block.instrs.push(instr);
        }
    }

    fn new_temp(&mut self) -> TempId {
        loop {
            let candidate = format!("t{}", self.next_temp_hint);
            self.next_temp_hint += 1;
            if self.used_names.insert(candidate.clone()) {
                let id = TempId::new(self.temp_names.len() as u32);
                self.temp_names.push(candidate);
                return id;
            }
        }
    }

    /// Returns `base` when free, otherwise `base.1`, `base.2`, and so on.
    fn unique_name(&mut self, base: &str) -> String {
        if self.used_names.insert(base.to_string()) {
            return base.to_string();
        }
        let mut n = 1u32;
        loop {
            let candidate = format!("{base}.{n}");
            if self.used_names.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }
}
