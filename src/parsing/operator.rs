
use std::collections::{hash_map, HashMap};
use std::fmt::{self, Display, Formatter};

/// A table of operators, indexed by their display name.
#[derive(Debug, Clone, Default)]
pub struct OperatorTable {
  mapping: HashMap<String, Operator>,
}

/// An operator symbol together with the function it denotes.
#[derive(Debug, Clone)]
pub struct Operator {
  name: String,
  function: OperatorFn,
}

/// The function an operator applies. The variant determines the
/// operator's [`Arity`].
#[derive(Debug, Clone, Copy)]
pub enum OperatorFn {
  Unary(fn(f64) -> f64),
  Binary(fn(f64, f64) -> f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
  Unary,
  Binary,
}

impl OperatorTable {
  pub fn new() -> OperatorTable {
    OperatorTable::default()
  }

  pub fn with_capacity(capacity: usize) -> OperatorTable {
    OperatorTable {
      mapping: HashMap::with_capacity(capacity),
    }
  }

  pub fn get(&self, name: &str) -> Option<&Operator> {
    self.mapping.get(name)
  }

  /// Inserts the operator, returning the previous operator with the
  /// same name, if any.
  pub fn insert(&mut self, op: Operator) -> Option<Operator> {
    let name = op.name().to_owned();
    self.mapping.insert(name, op)
  }

  /// The arithmetic operators understood by the default tokenizer.
  pub fn common_operators() -> OperatorTable {
    vec![
      Operator::binary("+", |a, b| a + b),
      Operator::binary("-", |a, b| a - b),
      Operator::binary("*", |a, b| a * b),
      Operator::binary("/", |a, b| a / b),
      Operator::binary("%", |a, b| a % b),
      Operator::binary("^", f64::powf),
      Operator::unary("neg", |a| -a),
      Operator::unary("abs", f64::abs),
      Operator::unary("sqrt", f64::sqrt),
    ].into_iter().collect()
  }

  pub fn len(&self) -> usize {
    self.mapping.len()
  }

  pub fn is_empty(&self) -> bool {
    self.mapping.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = &Operator> {
    self.mapping.values()
  }
}

impl Operator {
  pub fn new(name: impl Into<String>, function: OperatorFn) -> Operator {
    Operator {
      name: name.into(),
      function,
    }
  }

  pub fn unary(name: impl Into<String>, function: fn(f64) -> f64) -> Operator {
    Operator::new(name, OperatorFn::Unary(function))
  }

  pub fn binary(name: impl Into<String>, function: fn(f64, f64) -> f64) -> Operator {
    Operator::new(name, OperatorFn::Binary(function))
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn function(&self) -> OperatorFn {
    self.function
  }

  pub fn arity(&self) -> Arity {
    self.function.arity()
  }

  /// The binary function of this operator, or `None` for unary
  /// operators.
  pub fn as_binary(&self) -> Option<fn(f64, f64) -> f64> {
    match self.function {
      OperatorFn::Binary(f) => Some(f),
      OperatorFn::Unary(_) => None,
    }
  }
}

impl OperatorFn {
  pub fn arity(self) -> Arity {
    match self {
      OperatorFn::Unary(_) => Arity::Unary,
      OperatorFn::Binary(_) => Arity::Binary,
    }
  }
}

impl Display for Operator {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.name)
  }
}

impl IntoIterator for OperatorTable {
  type Item = Operator;
  type IntoIter = hash_map::IntoValues<String, Operator>;

  fn into_iter(self) -> Self::IntoIter {
    self.mapping.into_values()
  }
}

impl FromIterator<Operator> for OperatorTable {
  fn from_iter<I>(iter: I) -> Self
  where I : IntoIterator<Item = Operator> {
    let iter = iter.into_iter();
    let (len_bound, _) = iter.size_hint();
    let mut table = OperatorTable::with_capacity(len_bound);
    for op in iter {
      table.insert(op);
    }
    table
  }
}
