//! Lexical analysis: turns the raw input string into a vector of tokens.
//!
//! Every token is exactly one character long, so a run of digits is a run of
//! separate literals. Whitespace is skipped and carries no meaning.

use tracing::trace;

use crate::error::{CompileResult, LexSnafu, Location};
use crate::operand::Slot;

/// Operators of the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
  Add,
  Mul,
  Assign,
}

impl Operator {
  pub fn symbol(self) -> char {
    match self {
      Self::Add => '+',
      Self::Mul => '*',
      Self::Assign => '=',
    }
  }
}

/// Kinds of tokens recognised by the front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
  /// Single decimal digit, `0..=9`.
  Literal(u8),
  /// Lowercase variable name, resolved to its storage slot.
  Variable(Slot),
  Operator(Operator),
  Separator,
}

/// A token together with the byte offset it was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
  pub kind: TokenKind,
  pub loc: usize,
}

impl Token {
  pub fn new(kind: TokenKind, loc: usize) -> Self {
    Self { kind, loc }
  }
}

/// Lex the input into a flat vector of tokens.
pub fn tokenize(input: &str) -> CompileResult<Vec<Token>> {
  let mut tokens = Vec::with_capacity(input.len());

  for (i, c) in input.char_indices() {
    let kind = match c {
      c if c.is_ascii_whitespace() => continue,
      '0'..='9' => TokenKind::Literal(c as u8 - b'0'),
      '+' => TokenKind::Operator(Operator::Add),
      '*' => TokenKind::Operator(Operator::Mul),
      '=' => TokenKind::Operator(Operator::Assign),
      ';' => TokenKind::Separator,
      _ => match Slot::of(c) {
        Some(slot) => TokenKind::Variable(slot),
        None => {
          return LexSnafu {
            ch: c,
            pos: Location::at(input, i),
          }
          .fail();
        }
      },
    };
    trace!(loc = i, ?kind, "token");
    tokens.push(Token::new(kind, i));
  }

  Ok(tokens)
}

/// Human-friendly description used in diagnostics and token dumps.
pub fn describe_token(token: &Token) -> String {
  match token.kind {
    TokenKind::Literal(d) => d.to_string(),
    TokenKind::Variable(slot) => slot.name().to_string(),
    TokenKind::Operator(op) => op.symbol().to_string(),
    TokenKind::Separator => ";".to_string(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::ErrorKind;

  fn kinds(input: &str) -> Vec<TokenKind> {
    tokenize(input)
      .expect("input should lex")
      .into_iter()
      .map(|t| t.kind)
      .collect()
  }

  #[test]
  fn digits_are_separate_literals() {
    assert_eq!(
      kinds("123"),
      vec![
        TokenKind::Literal(1),
        TokenKind::Literal(2),
        TokenKind::Literal(3)
      ]
    );
  }

  #[test]
  fn recognises_every_token_class() {
    let a = Slot::of('a').expect("a is a variable");
    assert_eq!(
      kinds("a2=;a1+*"),
      vec![
        TokenKind::Variable(a),
        TokenKind::Literal(2),
        TokenKind::Operator(Operator::Assign),
        TokenKind::Separator,
        TokenKind::Variable(a),
        TokenKind::Literal(1),
        TokenKind::Operator(Operator::Add),
        TokenKind::Operator(Operator::Mul),
      ]
    );
  }

  #[test]
  fn whitespace_is_skipped_but_offsets_are_kept() {
    let tokens = tokenize(" 1\t2 +\n").expect("input should lex");
    let locs: Vec<usize> = tokens.iter().map(|t| t.loc).collect();
    assert_eq!(locs, vec![1, 3, 5]);
  }

  #[test]
  fn rejects_characters_outside_the_alphabet() {
    for input in ["1-", "A", "1/2", "x!", "é"] {
      let err = tokenize(input).expect_err("input should not lex");
      assert_eq!(err.kind(), ErrorKind::Lex, "input {input:?}");
    }
  }

  #[test]
  fn lex_error_reports_byte_position() {
    let err = tokenize("12 -").expect_err("minus is not a token");
    assert_eq!(err.location().offset, 3);
    assert!(err.to_string().ends_with("unexpected character '-'"));
  }

  #[test]
  fn describe_token_round_trips_text() {
    let tokens = tokenize("9z*;").expect("input should lex");
    let text: String = tokens.iter().map(describe_token).collect();
    assert_eq!(text, "9z*;");
  }
}
