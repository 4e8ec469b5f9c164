//! Render the lowered instruction list as assembly text.
//!
//! Two dialects are supported: GNU `as` with AT&T operand order (the
//! default, assembled by `cc`) and NASM with Intel operand order. Both target
//! ELF x86-64 and reference the variable table RIP-relative so the output
//! links into position-independent executables.

use crate::ir::{Insn, Reg};
use crate::operand::{Slot, VAR_COUNT, VarTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Syntax {
  #[default]
  Att,
  Intel,
}

/// Symbol names shared with the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbols {
  /// Function the runtime calls to run the program.
  pub entry: String,
  /// Runtime routine taking the final value; prints it and exits.
  pub print: String,
  /// Storage for the variable table.
  pub table: String,
}

impl Default for Symbols {
  fn default() -> Self {
    Self {
      entry: "rpn_evaluate".to_string(),
      print: "rpn_print_and_exit".to_string(),
      table: "rpn_vars".to_string(),
    }
  }
}

/// Produce a complete listing: text section with the entry function, then
/// the zeroed variable table.
pub fn render(insns: &[Insn], table: &VarTable, symbols: &Symbols, syntax: Syntax) -> String {
  let mut asm = String::new();
  match syntax {
    Syntax::Att => render_att(&mut asm, insns, table, symbols),
    Syntax::Intel => render_intel(&mut asm, insns, table, symbols),
  }
  asm
}

fn att_reg(reg: Reg) -> &'static str {
  match reg {
    Reg::Rax => "%rax",
    Reg::Rdi => "%rdi",
  }
}

fn intel_reg(reg: Reg) -> &'static str {
  match reg {
    Reg::Rax => "rax",
    Reg::Rdi => "rdi",
  }
}

fn att_var(table: &VarTable, slot: Slot) -> String {
  match slot.offset() {
    0 => format!("{}(%rip)", table.symbol()),
    off => format!("{}+{off}(%rip)", table.symbol()),
  }
}

fn intel_var(table: &VarTable, slot: Slot) -> String {
  match slot.offset() {
    0 => format!("[rel {}]", table.symbol()),
    off => format!("[rel {} + {off}]", table.symbol()),
  }
}

fn render_att(asm: &mut String, insns: &[Insn], table: &VarTable, symbols: &Symbols) {
  let entry = &symbols.entry;
  asm.push_str("    .text\n");
  asm.push_str(&format!("    .globl {entry}\n"));
  asm.push_str(&format!("{entry}:\n"));
  asm.push_str("    push %rbp\n");
  asm.push_str("    mov %rsp, %rbp\n");

  for insn in insns {
    let line = match insn {
      Insn::Comment(text) => format!("# {text}"),
      Insn::PushImm(value) => format!("push ${value}"),
      Insn::Push(reg) => format!("push {}", att_reg(*reg)),
      Insn::Pop(reg) => format!("pop {}", att_reg(*reg)),
      Insn::Load { slot, dst } => format!("mov {}, {}", att_var(table, *slot), att_reg(*dst)),
      Insn::Store { src, slot } => format!("mov {}, {}", att_reg(*src), att_var(table, *slot)),
      Insn::Add { src, dst } => format!("add {}, {}", att_reg(*src), att_reg(*dst)),
      Insn::Imul { src, dst } => format!("imul {}, {}", att_reg(*src), att_reg(*dst)),
      Insn::Drop => "add $8, %rsp".to_string(),
      Insn::CallPrint => format!("call {}@PLT", symbols.print),
    };
    asm.push_str(&format!("    {line}\n"));
  }

  asm.push_str("    mov %rbp, %rsp\n");
  asm.push_str("    pop %rbp\n");
  asm.push_str("    ret\n");
  asm.push_str("    .bss\n");
  asm.push_str("    .p2align 3\n");
  asm.push_str(&format!("{}:\n", table.symbol()));
  asm.push_str(&format!("    .zero {}\n", table.size()));
  asm.push_str("    .section .note.GNU-stack,\"\",@progbits\n");
}

fn render_intel(asm: &mut String, insns: &[Insn], table: &VarTable, symbols: &Symbols) {
  let entry = &symbols.entry;
  asm.push_str("    default rel\n");
  asm.push_str(&format!("    global {entry}\n"));
  asm.push_str(&format!("    extern {}\n", symbols.print));
  asm.push_str("    section .text\n");
  asm.push_str(&format!("{entry}:\n"));
  asm.push_str("    push rbp\n");
  asm.push_str("    mov rbp, rsp\n");

  for insn in insns {
    let line = match insn {
      Insn::Comment(text) => format!("; {text}"),
      Insn::PushImm(value) => format!("push {value}"),
      Insn::Push(reg) => format!("push {}", intel_reg(*reg)),
      Insn::Pop(reg) => format!("pop {}", intel_reg(*reg)),
      Insn::Load { slot, dst } => format!("mov {}, {}", intel_reg(*dst), intel_var(table, *slot)),
      Insn::Store { src, slot } => format!("mov {}, {}", intel_var(table, *slot), intel_reg(*src)),
      Insn::Add { src, dst } => format!("add {}, {}", intel_reg(*dst), intel_reg(*src)),
      Insn::Imul { src, dst } => format!("imul {}, {}", intel_reg(*dst), intel_reg(*src)),
      Insn::Drop => "add rsp, 8".to_string(),
      Insn::CallPrint => format!("call {} wrt ..plt", symbols.print),
    };
    asm.push_str(&format!("    {line}\n"));
  }

  asm.push_str("    mov rsp, rbp\n");
  asm.push_str("    pop rbp\n");
  asm.push_str("    ret\n");
  asm.push_str("    section .bss\n");
  asm.push_str("    alignb 8\n");
  asm.push_str(&format!("{}:\n", table.symbol()));
  asm.push_str(&format!("    resq {VAR_COUNT}\n"));
  asm.push_str("    section .note.GNU-stack noalloc noexec nowrite progbits\n");
}
