//! Crate root: wires together the compilation pipeline.
//!
//! The stages are small and composable:
//! - `tokenizer` performs lexical analysis and produces a flat token stream.
//! - `parser` splits the tokens into `;`-separated statements.
//! - `stack` simulates the operand stack and rejects ill-formed statements.
//! - `codegen` lowers statements into the instruction list in `ir`.
//! - `asm` renders the instruction list as AT&T or NASM assembly.
//! - `interp` evaluates a program directly, with the same semantics.
//! - `link` assembles a listing together with the bundled runtime.
//! - `error` centralises reporting utilities shared by the other modules.

pub mod asm;
pub mod codegen;
pub mod error;
pub mod interp;
pub mod ir;
pub mod link;
pub mod operand;
pub mod parser;
pub mod stack;
pub mod tokenizer;

pub use asm::{Symbols, Syntax};
pub use error::{CompileError, CompileResult, ErrorKind};
pub use ir::Insn;
pub use operand::VarTable;

/// Output settings for a compilation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
  pub syntax: Syntax,
  pub symbols: Symbols,
}

/// Compile a source string into AT&T assembly with the default symbols.
pub fn generate_assembly(source: &str) -> CompileResult<String> {
  generate_assembly_with(source, &Options::default())
}

/// Compile a source string into assembly. The listing is built in memory and
/// only returned once every statement has compiled.
pub fn generate_assembly_with(source: &str, options: &Options) -> CompileResult<String> {
  let insns = lower(source)?;
  let table = VarTable::new(&options.symbols.table);
  Ok(asm::render(&insns, &table, &options.symbols, options.syntax))
}

/// Run the front-end and code generator, stopping before rendering.
pub fn lower(source: &str) -> CompileResult<Vec<Insn>> {
  let tokens = tokenizer::tokenize(source)?;
  let program = parser::parse(tokens, source)?;
  codegen::lower(&program, source)
}

/// Interpret a source string and return the value the compiled program would print.
pub fn evaluate(source: &str) -> CompileResult<i64> {
  let tokens = tokenizer::tokenize(source)?;
  let program = parser::parse(tokens, source)?;
  let mut table = VarTable::new(Symbols::default().table);
  interp::evaluate(&program, &mut table, source)
}
