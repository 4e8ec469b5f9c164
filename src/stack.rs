//! Compile-time model of the runtime operand stack.
//!
//! The simulator validates each operator's preconditions before any code is
//! lowered for it, and reports which operands the generated code has to read
//! and write. Each `Value` on the simulated stack stands for exactly one
//! machine stack slot; `Reference`s stand for nothing until consumed.

use crate::error::{
  CompileResult, InvalidAssignmentTargetSnafu, Location, MalformedStatementSnafu,
  StackUnderflowSnafu,
};
use crate::operand::{Operand, Slot};
use crate::tokenizer::Operator;

/// Operands consumed by a binary `+` or `*`, in pop order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinaryOperands {
  pub rhs: Operand,
  pub lhs: Operand,
}

/// Operands consumed by `=`: the value to store and the slot receiving it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssignOperands {
  pub rhs: Operand,
  pub target: Slot,
}

#[derive(Debug)]
pub struct SimStack<'a> {
  entries: Vec<Operand>,
  source: &'a str,
}

impl<'a> SimStack<'a> {
  /// Fresh, empty stack. `source` is kept for diagnostics only.
  pub fn new(source: &'a str) -> Self {
    Self {
      entries: Vec::new(),
      source,
    }
  }

  pub fn depth(&self) -> usize {
    self.entries.len()
  }

  pub fn entries(&self) -> &[Operand] {
    &self.entries
  }

  pub fn push_literal(&mut self) {
    self.entries.push(Operand::Value);
  }

  pub fn push_variable(&mut self, slot: Slot) {
    self.entries.push(Operand::Reference(slot));
  }

  /// Apply `+` or `*`: both operands are dereferenced, a `Value` is pushed.
  pub fn binary(&mut self, op: Operator, loc: usize) -> CompileResult<BinaryOperands> {
    self.require(op, 2, loc)?;
    let rhs = self.pop();
    let lhs = self.pop();
    self.entries.push(Operand::Value);
    Ok(BinaryOperands { rhs, lhs })
  }

  /// Apply `=`: rhs is popped first, then the target, which must be a
  /// variable reference. The stored value is pushed back.
  ///
  /// A lone computed value (`12+=`) is a bad target, not an underflow.
  pub fn assign(&mut self, loc: usize) -> CompileResult<AssignOperands> {
    if self.depth() < 2 && self.entries.first() == Some(&Operand::Value) {
      return self.invalid_target(loc);
    }
    self.require(Operator::Assign, 2, loc)?;
    let rhs = self.pop();
    let Operand::Reference(target) = self.pop() else {
      return self.invalid_target(loc);
    };
    self.entries.push(Operand::Value);
    Ok(AssignOperands { rhs, target })
  }

  /// Close the statement: exactly one operand must remain.
  pub fn finish(mut self, stmt_loc: usize) -> CompileResult<Operand> {
    if self.depth() != 1 {
      return MalformedStatementSnafu {
        depth: self.depth(),
        pos: Location::at(self.source, stmt_loc),
      }
      .fail();
    }
    Ok(self.pop())
  }

  fn require(&self, op: Operator, needed: usize, loc: usize) -> CompileResult<()> {
    if self.depth() < needed {
      return StackUnderflowSnafu {
        op: op.symbol(),
        needed,
        available: self.depth(),
        pos: Location::at(self.source, loc),
      }
      .fail();
    }
    Ok(())
  }

  fn invalid_target<T>(&self, loc: usize) -> CompileResult<T> {
    InvalidAssignmentTargetSnafu {
      pos: Location::at(self.source, loc),
    }
    .fail()
  }

  fn pop(&mut self) -> Operand {
    // Callers check depth first.
    self.entries.pop().unwrap_or(Operand::Value)
  }
}
