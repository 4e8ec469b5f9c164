//! Shared error utilities used across the compilation pipeline.
//!
//! Every diagnostic points at the offending byte with a caret, in the style
//! of chibicc:
//!
//! ```text
//! '12+='
//!      ^ assignment target is not a variable
//! ```

use std::fmt;

use snafu::Snafu;

pub type CompileResult<T> = Result<T, CompileError>;

/// Where in the source an error was detected, pre-rendered for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
  pub offset: usize,
  expr_line: String,
  marker: String,
}

impl Location {
  /// Anchor a location at a byte offset in `source`.
  pub fn at(source: &str, loc: usize) -> Self {
    let expr_line = format!("'{source}'");
    let safe_loc = loc.min(source.len());
    let char_offset = source[..safe_loc].chars().count() + 1; // account for opening quote
    let marker = format!("{}^", " ".repeat(char_offset));
    Self {
      offset: loc,
      expr_line,
      marker,
    }
  }
}

impl fmt::Display for Location {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}\n{}", self.expr_line, self.marker)
  }
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum CompileError {
  #[snafu(display("{pos} unexpected character '{ch}'"))]
  Lex { ch: char, pos: Location },

  #[snafu(display("{pos} empty statement"))]
  EmptyStatement { pos: Location },

  #[snafu(display("{pos} statement leaves {depth} operands on the stack, expected 1"))]
  MalformedStatement { depth: usize, pos: Location },

  #[snafu(display("{pos} assignment target is not a variable"))]
  InvalidAssignmentTarget { pos: Location },

  #[snafu(display("{pos} '{op}' needs {needed} operands but only {available} available"))]
  StackUnderflow {
    op: char,
    needed: usize,
    available: usize,
    pos: Location,
  },
}

/// Discriminant of [`CompileError`] for callers that only care about the category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  Lex,
  EmptyStatement,
  MalformedStatement,
  InvalidAssignmentTarget,
  StackUnderflow,
}

impl CompileError {
  pub fn kind(&self) -> ErrorKind {
    match self {
      Self::Lex { .. } => ErrorKind::Lex,
      Self::EmptyStatement { .. } => ErrorKind::EmptyStatement,
      Self::MalformedStatement { .. } => ErrorKind::MalformedStatement,
      Self::InvalidAssignmentTarget { .. } => ErrorKind::InvalidAssignmentTarget,
      Self::StackUnderflow { .. } => ErrorKind::StackUnderflow,
    }
  }

  pub fn location(&self) -> &Location {
    match self {
      Self::Lex { pos, .. }
      | Self::EmptyStatement { pos }
      | Self::MalformedStatement { pos, .. }
      | Self::InvalidAssignmentTarget { pos }
      | Self::StackUnderflow { pos, .. } => pos,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn caret_sits_under_offending_byte() {
    let err = CompileError::Lex {
      ch: '-',
      pos: Location::at("12-", 2),
    };
    assert_eq!(err.to_string(), "'12-'\n   ^ unexpected character '-'");
    assert_eq!(err.kind(), ErrorKind::Lex);
    assert_eq!(err.location().offset, 2);
  }

  #[test]
  fn location_past_end_is_clamped() {
    let location = Location::at("ab", 10);
    assert_eq!(location.to_string(), "'ab'\n   ^");
    assert_eq!(location.offset, 10);
  }
}
