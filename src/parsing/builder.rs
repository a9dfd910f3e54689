
use super::operator::Operator;
use super::token::{OperatorRef, ScopeId, Token, TokenStream};

use thiserror::Error;

/// Incrementally assembles a [`TokenStream`], allocating a fresh
/// [`ScopeId`] for every opened scope so that each Start tag and its
/// End tag are equivalent to each other and to nothing else.
#[derive(Debug, Clone, Default)]
pub struct TokenStreamBuilder {
  tokens: Vec<Token>,
  open_scopes: Vec<OperatorRef>,
  next_scope: ScopeId,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum BuilderError {
  #[error("No open scope to close")]
  NoOpenScope,
}

impl TokenStreamBuilder {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn push_number(&mut self, n: f64) {
    self.tokens.push(Token::Number(n));
  }

  /// Opens a new scope for `operator` and returns its reference.
  pub fn push_start(&mut self, operator: Operator) -> OperatorRef {
    let operator = OperatorRef::new(operator, self.next_scope);
    self.next_scope = self.next_scope.next();
    self.tokens.push(Token::start(operator.clone()));
    self.open_scopes.push(operator.clone());
    operator
  }

  /// Closes the innermost open scope.
  pub fn push_end(&mut self) -> Result<OperatorRef, BuilderError> {
    let operator = self.open_scopes.pop().ok_or(BuilderError::NoOpenScope)?;
    self.tokens.push(Token::end(operator.clone()));
    Ok(operator)
  }

  /// Number of scopes opened but not yet closed.
  pub fn open_scopes(&self) -> usize {
    self.open_scopes.len()
  }

  pub fn number(mut self, n: f64) -> Self {
    self.push_number(n);
    self
  }

  pub fn start(mut self, operator: Operator) -> Self {
    self.push_start(operator);
    self
  }

  /// Fluent form of [`push_end`](TokenStreamBuilder::push_end). Use
  /// `push_end` when an unbalanced close must be handled; here it is
  /// a debug assertion failure.
  pub fn end(mut self) -> Self {
    let closed = self.push_end();
    debug_assert!(closed.is_ok(), "end() called with no open scope");
    self
  }

  /// Produces the stream as built so far. Scopes that are still open
  /// are left unterminated.
  pub fn build(self) -> TokenStream {
    self.tokens.into()
  }
}
