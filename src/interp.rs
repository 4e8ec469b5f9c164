//! Direct evaluation of a parsed program.
//!
//! Uses the same simulator as the code generator and mirrors the generated
//! code step for step: `Value` operands come off a stack of integers,
//! `Reference` operands are read from the variable table when consumed.
//! Arithmetic wraps like the machine registers do.

use tracing::debug;

use crate::error::CompileResult;
use crate::operand::{Operand, VarTable};
use crate::parser::{Program, Stmt};
use crate::stack::SimStack;
use crate::tokenizer::{Operator, TokenKind};

/// Evaluate every statement in order and return the final statement's value.
pub fn evaluate(program: &Program, table: &mut VarTable, source: &str) -> CompileResult<i64> {
  let mut result = 0;
  for (index, (stmt, is_final)) in program.iter().enumerate() {
    let value = evaluate_stmt(stmt, table, source)?;
    debug!(index, value, is_final, "evaluated statement");
    result = value;
  }
  Ok(result)
}

fn evaluate_stmt(stmt: &Stmt, table: &mut VarTable, source: &str) -> CompileResult<i64> {
  let mut stack = SimStack::new(source);
  let mut values: Vec<i64> = Vec::new();

  for token in &stmt.tokens {
    match token.kind {
      TokenKind::Literal(d) => {
        stack.push_literal();
        values.push(i64::from(d));
      }
      TokenKind::Variable(slot) => stack.push_variable(slot),
      TokenKind::Operator(Operator::Assign) => {
        let ops = stack.assign(token.loc)?;
        let value = fetch(ops.rhs, &mut values, table);
        table.store(ops.target, value);
        values.push(value);
      }
      TokenKind::Operator(op) => {
        let ops = stack.binary(op, token.loc)?;
        let rhs = fetch(ops.rhs, &mut values, table);
        let lhs = fetch(ops.lhs, &mut values, table);
        values.push(match op {
          Operator::Mul => lhs.wrapping_mul(rhs),
          _ => lhs.wrapping_add(rhs),
        });
      }
      TokenKind::Separator => {}
    }
  }

  let result = stack.finish(stmt.loc)?;
  Ok(fetch(result, &mut values, table))
}

fn fetch(operand: Operand, values: &mut Vec<i64>, table: &VarTable) -> i64 {
  match operand {
    // The simulator has already checked there is a value to pop.
    Operand::Value => values.pop().unwrap_or_default(),
    Operand::Reference(slot) => table.load(slot),
  }
}
