//! Target-neutral x86-64 instruction list produced by the code generator.
//!
//! Only the function body is represented here; the prologue, epilogue and
//! data sections are added by the assembly renderer.

use crate::operand::Slot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reg {
  Rax,
  Rdi,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Insn {
  /// Source text of the statement that follows, rendered as a comment.
  Comment(String),
  /// Push an immediate onto the machine stack.
  PushImm(i64),
  Push(Reg),
  Pop(Reg),
  /// Read a variable's current value.
  Load { slot: Slot, dst: Reg },
  /// Write a register into a variable.
  Store { src: Reg, slot: Slot },
  /// `dst += src`
  Add { src: Reg, dst: Reg },
  /// `dst *= src`
  Imul { src: Reg, dst: Reg },
  /// Discard the top machine stack slot.
  Drop,
  /// Hand `%rdi` to the runtime's print routine. Does not return.
  CallPrint,
}
