//! Statement sequencing: splits the token stream into `;`-separated
//! statements.
//!
//! There is no grammar beyond this. Operand and operator arity are checked
//! later by the stack simulator, which needs to see tokens in order anyway.

use tracing::debug;

use crate::error::{CompileResult, EmptyStatementSnafu, Location};
use crate::tokenizer::{Token, TokenKind};

/// One statement: a non-empty run of tokens between separators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stmt {
  pub tokens: Vec<Token>,
  /// Byte offset of the first token.
  pub loc: usize,
}

/// Ordered list of statements. Only the last one produces program output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
  pub stmts: Vec<Stmt>,
}

impl Program {
  /// Iterate statements in order, flagging the final one.
  pub fn iter(&self) -> impl Iterator<Item = (&Stmt, bool)> {
    let last = self.stmts.len().saturating_sub(1);
    self
      .stmts
      .iter()
      .enumerate()
      .map(move |(i, stmt)| (stmt, i == last))
  }
}

/// Split tokens into statements. `source` is only used for diagnostics.
pub fn parse(tokens: Vec<Token>, source: &str) -> CompileResult<Program> {
  let mut stmts = Vec::new();
  let mut current = Vec::new();
  // Offset just past the previous separator; where an empty statement is reported.
  let mut start = 0;

  for token in tokens {
    if token.kind == TokenKind::Separator {
      stmts.push(close_stmt(std::mem::take(&mut current), start, source)?);
      start = token.loc + 1;
      continue;
    }
    current.push(token);
  }
  stmts.push(close_stmt(current, start, source)?);

  debug!(statements = stmts.len(), "split program");
  Ok(Program { stmts })
}

fn close_stmt(tokens: Vec<Token>, start: usize, source: &str) -> CompileResult<Stmt> {
  let Some(first) = tokens.first() else {
    return EmptyStatementSnafu {
      pos: Location::at(source, start),
    }
    .fail();
  };
  let loc = first.loc;
  Ok(Stmt { tokens, loc })
}
