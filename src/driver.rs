//! Two-pass compilation driver.
//!
//! Pass one lexes the whole file looking for invalid tokens; pass two
//! clears the token buffer, rewinds the lexer, and parses one top-level
//! item at a time, lowering each as its AST completes so earlier globals
//! and prototypes are visible to later bodies. On success the AST dump and
//! the textual IR are produced; the first error of any stage aborts with
//! nothing written.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use crate::ir::lower::{LowerError, Lowering};
use crate::ir::module::Module;
use crate::ir::writer;
use crate::lexer::{LexError, Lexer, TokenKind};
use crate::parser::ast::Program;
use crate::parser::{printer, ParseError, Parser, TokenBuffer};

/// Name of the textual IR file, created in the current working directory.
pub const OUTPUT_FILENAME: &str = "output.ll";

/// Module name recorded in the IR output.
const MODULE_NAME: &str = "mini-c";

/// Everything a successful compilation produces.
#[derive(Debug)]
pub struct Compilation {
    /// The parsed program.
    pub program: Program,
    /// The emitted IR module.
    pub module: Module,
    /// Rendered textual IR.
    pub ir_text: String,
    /// Rendered AST dump.
    pub ast_text: String,
    /// Rendered warnings, in the order they arose.
    pub warnings: Vec<String>,
}

/// Any failure across the compilation pipeline.
#[derive(Debug)]
pub enum CompileError {
    /// Source or output file I/O failure.
    Io(io::Error),
    /// Invalid token found by the pre-scan.
    Lex(LexError),
    /// Grammar mismatch.
    Parse(ParseError),
    /// Semantic error or IR invariant violation.
    Lower(LowerError),
}

impl From<io::Error> for CompileError {
    fn from(error: io::Error) -> Self {
        CompileError::Io(error)
    }
}

impl From<LexError> for CompileError {
    fn from(error: LexError) -> Self {
        CompileError::Lex(error)
    }
}

impl From<ParseError> for CompileError {
    fn from(error: ParseError) -> Self {
        CompileError::Parse(error)
    }
}

impl From<LowerError> for CompileError {
    fn from(error: LowerError) -> Self {
        CompileError::Lower(error)
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::Io(error) => write!(f, "i/o error: {error}"),
            CompileError::Lex(error) => error.fmt(f),
            CompileError::Parse(error) => error.fmt(f),
            CompileError::Lower(error) => error.fmt(f),
        }
    }
}

impl std::error::Error for CompileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CompileError::Io(error) => Some(error),
            CompileError::Lex(error) => Some(error),
            CompileError::Parse(error) => Some(error),
            CompileError::Lower(error) => Some(error),
        }
    }
}

/// Compiles a source file.
pub fn compile_file(path: &Path) -> Result<Compilation, CompileError> {
    let source = fs::read_to_string(path)?;
    compile_source(&source)
}

/// Compiles in-memory source text.
pub fn compile_source(source: &str) -> Result<Compilation, CompileError> {
    let mut buffer = TokenBuffer::new(Lexer::new(source));

    // Pass one: stop on the first character outside the alphabet.
    loop {
        let token = buffer.advance();
        match token.kind {
            TokenKind::Invalid => return Err(LexError::invalid_token(&token).into()),
            TokenKind::Eof => break,
            _ => {}
        }
    }

    // Pass two: parse and lower, one top-level item at a time.
    buffer.clear();
    buffer.rewind();
    let mut parser = Parser::new(buffer);
    let mut lowering = Lowering::new(MODULE_NAME);
    let mut program = Program::default();
    let mut warnings = Vec::new();

    while let Some(item) = parser.parse_item()? {
        for warning in parser.take_warnings() {
            warnings.push(warning.to_string());
        }
        lowering.lower_item(&item)?;
        for warning in lowering.take_warnings() {
            warnings.push(warning.to_string());
        }
        program.items.push(item);
    }

    let module = lowering.finish();
    let ir_text = writer::write_module(&module);
    let ast_text = printer::render(&program);

    Ok(Compilation {
        program,
        module,
        ir_text,
        ast_text,
        warnings,
    })
}

/// Writes the textual IR to `path`.
pub fn write_output(compilation: &Compilation, path: &Path) -> Result<(), CompileError> {
    fs::write(path, &compilation.ir_text)?;
    Ok(())
}
