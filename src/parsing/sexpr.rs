
//! Tokenizer for a parenthesized prefix notation.
//!
//! `(+ 2 3 4) (neg (* 2 3))` produces two top-level expressions. An
//! opening parenthesis must be followed by an operator name from the
//! [`OperatorTable`], and every scope it opens is closed by the
//! matching `)`. Operand counts are not checked here.

use super::Tokenize;
use super::builder::TokenStreamBuilder;
use super::operator::OperatorTable;
use super::source::SourceOffset;
use super::token::TokenStream;
use super::tokenizer::TokenizerState;

use regex::Regex;
use once_cell::sync::Lazy;
use thiserror::Error;

use std::num::ParseFloatError;

static NUMBER_RE: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?").unwrap());

static OPERATOR_NAME_RE: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"^[^\s()]+").unwrap());

#[derive(Clone, Debug)]
pub struct SexprTokenizer {
  operator_table: OperatorTable,
}

#[derive(Debug, Clone, Error, PartialEq)]
#[non_exhaustive]
pub enum TokenizeError {
  #[error("Expected operator name at {0}")]
  ExpectedOperator(SourceOffset),
  #[error("Unknown operator '{0}' at {1}")]
  UnknownOperator(String, SourceOffset),
  #[error("Unexpected character '{0}' at {1}")]
  UnexpectedChar(char, SourceOffset),
  #[error("Unmatched ')' at {0}")]
  UnmatchedClose(SourceOffset),
  #[error("{0} unclosed '(' at end of input")]
  UnclosedScopes(usize),
  #[error("Failed to parse number")]
  ParseNumberError(#[from] ParseFloatError),
}

impl SexprTokenizer {
  pub fn new(operator_table: OperatorTable) -> Self {
    Self { operator_table }
  }

  pub fn operator_table(&self) -> &OperatorTable {
    &self.operator_table
  }

  pub fn read_stream(&self, state: &mut TokenizerState<'_>) -> Result<TokenStream, TokenizeError> {
    let mut builder = TokenStreamBuilder::new();
    loop {
      state.consume_spaces();
      let pos = state.current_pos();
      if state.is_eof() {
        break;
      }
      if state.read_literal("(").is_some() {
        self.read_operator(state, &mut builder)?;
      } else if state.read_literal(")").is_some() {
        builder.push_end().map_err(|_| TokenizeError::UnmatchedClose(pos))?;
      } else if let Some(text) = state.read_regex(&NUMBER_RE) {
        builder.push_number(text.parse()?);
      } else {
        // is_eof was checked above, so there is a next char.
        let ch = state.peek().unwrap_or_default();
        return Err(TokenizeError::UnexpectedChar(ch, pos));
      }
    }
    match builder.open_scopes() {
      0 => Ok(builder.build()),
      n => Err(TokenizeError::UnclosedScopes(n)),
    }
  }

  fn read_operator(
    &self,
    state: &mut TokenizerState<'_>,
    builder: &mut TokenStreamBuilder,
  ) -> Result<(), TokenizeError> {
    state.consume_spaces();
    let pos = state.current_pos();
    let name = state.read_regex(&OPERATOR_NAME_RE).ok_or(TokenizeError::ExpectedOperator(pos))?;
    let operator = self.operator_table.get(name)
      .ok_or_else(|| TokenizeError::UnknownOperator(name.to_owned(), pos))?;
    builder.push_start(operator.clone());
    Ok(())
  }
}

impl Default for SexprTokenizer {
  fn default() -> Self {
    Self::new(OperatorTable::common_operators())
  }
}

impl Tokenize for SexprTokenizer {
  type Error = TokenizeError;

  fn tokenize(&self, input: &str) -> Result<TokenStream, TokenizeError> {
    let mut state = TokenizerState::new(input);
    self.read_stream(&mut state)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::parsing::token::{Role, Token};

  fn tokenize(input: &str) -> Result<TokenStream, TokenizeError> {
    SexprTokenizer::default().tokenize(input)
  }

  /// Renders tokens without scope ids, for comparing shapes.
  fn shape(stream: &TokenStream) -> Vec<String> {
    stream.iter().map(|token| match token {
      Token::Number(n) => n.to_string(),
      Token::Tag(tag) => match tag.role {
        Role::Start => format!("({}", tag.operator.operator()),
        Role::End => format!("{})", tag.operator.operator()),
      },
    }).collect()
  }

  #[test]
  fn test_chain() {
    let stream = tokenize("(+ 2 3 4)").unwrap();
    assert_eq!(shape(&stream), vec!["(+", "2", "3", "4", "+)"]);
  }

  #[test]
  fn test_nested_and_multiple() {
    let stream = tokenize(" (neg (+ 2 3))\n(* 4 5) 7 ").unwrap();
    assert_eq!(
      shape(&stream),
      vec!["(neg", "(+", "2", "3", "+)", "neg)", "(*", "4", "5", "*)", "7"],
    );
  }

  #[test]
  fn test_numbers() {
    let stream = tokenize("-1.5 .25 3e2 +4").unwrap();
    let numbers = stream.iter().filter_map(Token::as_number).collect::<Vec<_>>();
    assert_eq!(numbers, vec![-1.5, 0.25, 300.0, 4.0]);
  }

  #[test]
  fn test_empty_input() {
    assert!(tokenize("").unwrap().is_empty());
    assert!(tokenize("   ").unwrap().is_empty());
  }

  #[test]
  fn test_unknown_operator() {
    assert_eq!(
      tokenize("(+ 1 (log 2))").unwrap_err(),
      TokenizeError::UnknownOperator(String::from("log"), SourceOffset(6)),
    );
  }

  #[test]
  fn test_missing_operator() {
    assert_eq!(tokenize("( )").unwrap_err(), TokenizeError::ExpectedOperator(SourceOffset(2)));
  }

  #[test]
  fn test_unbalanced() {
    assert_eq!(tokenize("(+ 1 2))").unwrap_err(), TokenizeError::UnmatchedClose(SourceOffset(7)));
    assert_eq!(tokenize("(+ 1 (* 2 3)").unwrap_err(), TokenizeError::UnclosedScopes(1));
  }

  #[test]
  fn test_unexpected_char() {
    assert_eq!(tokenize("(+ 1 x)").unwrap_err(), TokenizeError::UnexpectedChar('x', SourceOffset(5)));
  }
}
