
//! Tokens of a flattened, bracket-tagged expression stream.
//!
//! An expression tree is flattened in preorder, with every operator
//! node emitted as a [`Role::Start`] tag before its operands and a
//! [`Role::End`] tag after them. A binary operator's scope may hold
//! more than two terms, in which case the terms are folded from the
//! left under that one operator.

use super::operator::{Arity, Operator};

use itertools::Itertools;

use std::collections::VecDeque;
use std::fmt::{self, Display, Formatter};

/// Identifies one Start/End pair within a stream. Two tags belong to
/// the same scope iff their scope ids are equal.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScopeId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
  Start,
  End,
}

/// One occurrence of an operator in the tree.
#[derive(Debug, Clone)]
pub struct OperatorRef {
  operator: Operator,
  scope: ScopeId,
}

#[derive(Debug, Clone)]
pub struct OperatorTag {
  pub role: Role,
  pub operator: OperatorRef,
}

#[derive(Debug, Clone)]
pub enum Token {
  Number(f64),
  Tag(OperatorTag),
}

/// A consumable FIFO of tokens. Evaluation removes tokens from the
/// front; nothing is ever modified in place.
#[derive(Debug, Clone, Default)]
pub struct TokenStream {
  tokens: VecDeque<Token>,
}

impl ScopeId {
  pub fn next(self) -> ScopeId {
    ScopeId(self.0 + 1)
  }
}

impl OperatorRef {
  pub fn new(operator: Operator, scope: ScopeId) -> Self {
    Self { operator, scope }
  }

  pub fn operator(&self) -> &Operator {
    &self.operator
  }

  pub fn scope(&self) -> ScopeId {
    self.scope
  }

  pub fn arity(&self) -> Arity {
    self.operator.arity()
  }

  /// Whether `self` and `other` denote the same operator node. Two
  /// occurrences of the same symbol in different scopes are not
  /// equivalent.
  pub fn is_equivalent(&self, other: &OperatorRef) -> bool {
    self.scope == other.scope
  }
}

impl OperatorTag {
  pub fn start(operator: OperatorRef) -> Self {
    Self { role: Role::Start, operator }
  }

  pub fn end(operator: OperatorRef) -> Self {
    Self { role: Role::End, operator }
  }

  /// Whether this tag is the closing tag of `scope`.
  pub fn closes(&self, scope: &OperatorRef) -> bool {
    self.role == Role::End && self.operator.is_equivalent(scope)
  }
}

impl Token {
  pub fn start(operator: OperatorRef) -> Self {
    Token::Tag(OperatorTag::start(operator))
  }

  pub fn end(operator: OperatorRef) -> Self {
    Token::Tag(OperatorTag::end(operator))
  }

  pub fn as_number(&self) -> Option<f64> {
    match self {
      Token::Number(n) => Some(*n),
      Token::Tag(_) => None,
    }
  }

  pub fn is_number(&self) -> bool {
    self.as_number().is_some()
  }
}

impl TokenStream {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn len(&self) -> usize {
    self.tokens.len()
  }

  pub fn is_empty(&self) -> bool {
    self.tokens.is_empty()
  }

  pub fn peek(&self) -> Option<&Token> {
    self.tokens.front()
  }

  pub fn pop_front(&mut self) -> Option<Token> {
    self.tokens.pop_front()
  }

  pub fn push_back(&mut self, token: Token) {
    self.tokens.push_back(token)
  }

  pub fn iter(&self) -> impl Iterator<Item = &Token> {
    self.tokens.iter()
  }
}

impl From<f64> for Token {
  fn from(n: f64) -> Self {
    Token::Number(n)
  }
}

impl From<OperatorTag> for Token {
  fn from(tag: OperatorTag) -> Self {
    Token::Tag(tag)
  }
}

impl FromIterator<Token> for TokenStream {
  fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
    Self { tokens: iter.into_iter().collect() }
  }
}

impl From<Vec<Token>> for TokenStream {
  fn from(tokens: Vec<Token>) -> Self {
    Self { tokens: tokens.into() }
  }
}

impl Display for ScopeId {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "#{}", self.0)
  }
}

impl Display for OperatorRef {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{}{}", self.operator, self.scope)
  }
}

impl Display for OperatorTag {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self.role {
      Role::Start => write!(f, "({}", self.operator),
      Role::End => write!(f, "{})", self.operator),
    }
  }
}

impl Display for Token {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      Token::Number(n) => write!(f, "{}", n),
      Token::Tag(tag) => tag.fmt(f),
    }
  }
}

impl Display for TokenStream {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "[{}]", self.tokens.iter().join(" "))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn plus() -> Operator {
    Operator::binary("+", |a, b| a + b)
  }

  #[test]
  fn test_equivalence_is_by_scope() {
    let a = OperatorRef::new(plus(), ScopeId(0));
    let b = OperatorRef::new(plus(), ScopeId(1));
    let a_again = OperatorRef::new(plus(), ScopeId(0));
    assert!(a.is_equivalent(&a_again));
    assert!(!a.is_equivalent(&b));
  }

  #[test]
  fn test_closes() {
    let scope = OperatorRef::new(plus(), ScopeId(3));
    assert!(OperatorTag::end(scope.clone()).closes(&scope));
    assert!(!OperatorTag::start(scope.clone()).closes(&scope));
    let other = OperatorRef::new(plus(), ScopeId(4));
    assert!(!OperatorTag::end(other).closes(&scope));
  }

  #[test]
  fn test_stream_is_fifo() {
    let mut stream = TokenStream::from(vec![Token::from(1.0), Token::from(2.0)]);
    stream.push_back(Token::from(3.0));
    assert_eq!(stream.len(), 3);
    assert_eq!(stream.peek().and_then(Token::as_number), Some(1.0));
    assert_eq!(stream.pop_front().and_then(|t| t.as_number()), Some(1.0));
    assert_eq!(stream.pop_front().and_then(|t| t.as_number()), Some(2.0));
    assert_eq!(stream.pop_front().and_then(|t| t.as_number()), Some(3.0));
    assert!(stream.is_empty());
    assert!(stream.pop_front().is_none());
  }

  #[test]
  fn test_display() {
    let scope = OperatorRef::new(plus(), ScopeId(0));
    let stream = TokenStream::from(vec![
      Token::start(scope.clone()),
      Token::from(2.0),
      Token::from(3.5),
      Token::end(scope),
    ]);
    assert_eq!(stream.to_string(), "[(+#0 2 3.5 +#0)]");
  }
}
