
//! Evaluation of bracket-tagged token streams.
//!
//! A stream holds zero or more flattened expression trees, back to
//! back. Each call to [`Evaluator::evaluate_one`] consumes exactly one
//! of them: a bare number, or a Start tag, its operands, and the End
//! tag of the same scope. A binary scope with more than two terms is a
//! chain and is folded from the left, so `(+ 2 3 4)` is `(2 + 3) + 4`.

mod config;

pub use config::EvalConfig;

use crate::parsing::operator::OperatorFn;
use crate::parsing::token::{OperatorRef, Role, ScopeId, Token, TokenStream};

use log::trace;
use thiserror::Error;

/// Reduces token streams to numbers. An evaluator holds no state
/// beyond its configuration and can be shared freely.
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
  config: EvalConfig,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum EvalError {
  #[error("Expected closing tag for '{operator}' (scope {scope}), but the stream ended")]
  MissingEndTag {
    operator: String,
    scope: ScopeId,
  },
  #[error("Unexpected closing tag for '{operator}' (scope {scope})")]
  UnexpectedEndTag {
    operator: String,
    scope: ScopeId,
  },
  #[error("Unary operator '{operator}' (scope {scope}) takes exactly one operand")]
  UnaryChain {
    operator: String,
    scope: ScopeId,
  },
  #[error("Expression nesting exceeds the limit of {limit}")]
  DepthLimitExceeded {
    limit: usize,
  },
  #[error("Token stream has {actual} tokens, exceeding the limit of {limit}")]
  TooManyTokens {
    limit: usize,
    actual: usize,
  },
}

impl Evaluator {
  pub fn new(config: EvalConfig) -> Self {
    Self { config }
  }

  pub fn config(&self) -> &EvalConfig {
    &self.config
  }

  /// Evaluates every expression in the stream, in order. Either the
  /// whole stream evaluates, or the first failure is returned.
  pub fn evaluate_all(&self, stream: &mut TokenStream) -> Result<Vec<f64>, EvalError> {
    if let Some(limit) = self.config.max_tokens {
      if stream.len() > limit {
        return Err(EvalError::TooManyTokens { limit, actual: stream.len() });
      }
    }
    let mut results = Vec::new();
    while !stream.is_empty() {
      let value = self.evaluate_one(stream)?;
      trace!("expression {} evaluated to {}", results.len(), value);
      results.push(value);
    }
    Ok(results)
  }

  /// Consumes and evaluates the next expression in the stream. An
  /// empty stream evaluates to zero.
  pub fn evaluate_one(&self, stream: &mut TokenStream) -> Result<f64, EvalError> {
    self.eval_term(stream, 0)
  }

  /// Applies a unary function to the single term at the front of the
  /// stream. Does not consume the closing tag of the enclosing scope.
  pub fn evaluate_unary(&self, stream: &mut TokenStream, function: fn(f64) -> f64) -> Result<f64, EvalError> {
    self.eval_unary(stream, function, 1)
  }

  /// Applies a binary function to the first two terms at the front of
  /// the stream. Further terms of the chain and the closing tag are
  /// left in the stream.
  pub fn evaluate_binary(&self, stream: &mut TokenStream, function: fn(f64, f64) -> f64) -> Result<f64, EvalError> {
    self.eval_binary(stream, function, 1)
  }

  /// `depth` is the number of scopes enclosing the term.
  fn eval_term(&self, stream: &mut TokenStream, depth: usize) -> Result<f64, EvalError> {
    let Some(token) = stream.pop_front() else {
      return Ok(0.0);
    };
    let tag = match token {
      Token::Number(n) => return Ok(n),
      Token::Tag(tag) => tag,
    };
    let scope = match tag.role {
      Role::Start => tag.operator,
      Role::End => return Err(EvalError::unexpected_end_tag(&tag.operator)),
    };
    if depth >= self.config.max_depth {
      return Err(EvalError::DepthLimitExceeded { limit: self.config.max_depth });
    }
    let first = match scope.operator().function() {
      OperatorFn::Unary(f) => self.eval_unary(stream, f, depth + 1)?,
      OperatorFn::Binary(f) => self.eval_binary(stream, f, depth + 1)?,
    };
    self.fold_chain(stream, &scope, first, depth + 1)
  }

  /// Folds the remaining terms of `scope` into `acc` until its closing
  /// tag, which is consumed.
  fn fold_chain(
    &self,
    stream: &mut TokenStream,
    scope: &OperatorRef,
    mut acc: f64,
    depth: usize,
  ) -> Result<f64, EvalError> {
    loop {
      let closes_scope = match stream.peek() {
        None => return Err(EvalError::missing_end_tag(scope)),
        Some(Token::Tag(tag)) => tag.closes(scope),
        Some(Token::Number(_)) => false,
      };
      if closes_scope {
        stream.pop_front();
        return Ok(acc);
      }
      // Anything else is one more term of this chain, including the
      // End tag of some other scope, which eval_term rejects.
      let function = scope.operator().as_binary().ok_or_else(|| EvalError::unary_chain(scope))?;
      let term = self.eval_term(stream, depth)?;
      acc = function(acc, term);
    }
  }

  fn eval_unary(&self, stream: &mut TokenStream, function: fn(f64) -> f64, depth: usize) -> Result<f64, EvalError> {
    if stream.is_empty() {
      return Ok(0.0);
    }
    let operand = self.read_operand(stream, depth)?;
    Ok(function(operand))
  }

  fn eval_binary(&self, stream: &mut TokenStream, function: fn(f64, f64) -> f64, depth: usize) -> Result<f64, EvalError> {
    if stream.is_empty() {
      return Ok(0.0);
    }
    let left = self.read_operand(stream, depth)?;
    let right = self.read_operand(stream, depth)?;
    Ok(function(left, right))
  }

  /// A number is taken directly; anything else is evaluated as a
  /// nested subtree.
  fn read_operand(&self, stream: &mut TokenStream, depth: usize) -> Result<f64, EvalError> {
    match stream.peek().and_then(Token::as_number) {
      Some(n) => {
        stream.pop_front();
        Ok(n)
      }
      None => self.eval_term(stream, depth),
    }
  }
}

impl EvalError {
  fn missing_end_tag(scope: &OperatorRef) -> Self {
    EvalError::MissingEndTag {
      operator: scope.operator().name().to_owned(),
      scope: scope.scope(),
    }
  }

  fn unexpected_end_tag(scope: &OperatorRef) -> Self {
    EvalError::UnexpectedEndTag {
      operator: scope.operator().name().to_owned(),
      scope: scope.scope(),
    }
  }

  fn unary_chain(scope: &OperatorRef) -> Self {
    EvalError::UnaryChain {
      operator: scope.operator().name().to_owned(),
      scope: scope.scope(),
    }
  }
}
