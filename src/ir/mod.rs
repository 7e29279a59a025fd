//! Typed intermediate representation and AST lowering.

pub mod error;
pub mod ids;
pub mod instr;
pub mod lower;
pub mod module;
pub mod types;
pub mod verify;
pub mod writer;

pub use error::{IrError, IrErrorKind};
pub use ids::{BlockId, SlotId, TempId};
pub use instr::{BinOp, CastOp, CmpOp, Instr, Place, Terminator, UnOp, Value};
pub use lower::{LowerError, Lowering, SemanticError, SemanticErrorKind, SemanticWarning};
pub use module::{Block, Function, FunctionBuilder, GlobalVar, Module, StackSlot};
pub use types::Type;
pub use verify::{verify_function, verify_module};
pub use writer::write_module;
