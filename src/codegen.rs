//! Code generation: lower statements into the stack-machine instruction list.
//!
//! Simulation and lowering run in lockstep, one token at a time. Literals and
//! operator results live on the machine stack; variables stay as references
//! until an operator (or the end of the final statement) consumes them, at
//! which point their current value is loaded from the variable table.

use tracing::debug;

use crate::error::CompileResult;
use crate::ir::{Insn, Reg};
use crate::operand::Operand;
use crate::parser::{Program, Stmt};
use crate::stack::SimStack;
use crate::tokenizer::{Operator, TokenKind, describe_token};

/// Lower every statement of `program`. Nothing is returned unless all of
/// them pass simulation.
pub fn lower(program: &Program, source: &str) -> CompileResult<Vec<Insn>> {
  let mut insns = Vec::new();

  for (index, (stmt, is_final)) in program.iter().enumerate() {
    debug!(
      index,
      tokens = stmt.tokens.len(),
      is_final,
      "lowering statement"
    );
    insns.extend(lower_stmt(stmt, is_final, source)?);
  }

  debug!(instructions = insns.len(), "lowered program");
  Ok(insns)
}

fn lower_stmt(stmt: &Stmt, is_final: bool, source: &str) -> CompileResult<Vec<Insn>> {
  let mut stack = SimStack::new(source);
  let text: String = stmt.tokens.iter().map(describe_token).collect();
  let mut insns = vec![Insn::Comment(text)];

  for token in &stmt.tokens {
    match token.kind {
      TokenKind::Literal(d) => {
        stack.push_literal();
        insns.push(Insn::PushImm(i64::from(d)));
      }
      TokenKind::Variable(slot) => stack.push_variable(slot),
      TokenKind::Operator(Operator::Assign) => {
        let ops = stack.assign(token.loc)?;
        fetch(ops.rhs, Reg::Rax, &mut insns);
        insns.push(Insn::Store {
          src: Reg::Rax,
          slot: ops.target,
        });
        insns.push(Insn::Push(Reg::Rax));
      }
      TokenKind::Operator(op) => {
        let ops = stack.binary(op, token.loc)?;
        fetch(ops.rhs, Reg::Rdi, &mut insns);
        fetch(ops.lhs, Reg::Rax, &mut insns);
        insns.push(match op {
          Operator::Mul => Insn::Imul {
            src: Reg::Rdi,
            dst: Reg::Rax,
          },
          _ => Insn::Add {
            src: Reg::Rdi,
            dst: Reg::Rax,
          },
        });
        insns.push(Insn::Push(Reg::Rax));
      }
      // Split off by the parser.
      TokenKind::Separator => {}
    }
  }

  let result = stack.finish(stmt.loc)?;
  if is_final {
    fetch(result, Reg::Rdi, &mut insns);
    insns.push(Insn::CallPrint);
  } else if result == Operand::Value {
    insns.push(Insn::Drop);
  }

  Ok(insns)
}

/// Bring an operand's runtime value into `dst`.
fn fetch(operand: Operand, dst: Reg, insns: &mut Vec<Insn>) {
  match operand {
    Operand::Value => insns.push(Insn::Pop(dst)),
    Operand::Reference(slot) => insns.push(Insn::Load { slot, dst }),
  }
}
