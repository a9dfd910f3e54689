
use serde::Deserialize;

/// Limits applied while evaluating a token stream. Both limits guard
/// against malformed or adversarial streams; well-formed input from a
/// tokenizer stays far below the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EvalConfig {
  /// Maximum nesting depth of subtrees.
  pub max_depth: usize,
  /// Maximum number of tokens accepted by `evaluate_all`, if any.
  pub max_tokens: Option<usize>,
}

impl EvalConfig {
  pub const DEFAULT_MAX_DEPTH: usize = 256;

  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_max_depth(mut self, max_depth: usize) -> Self {
    self.max_depth = max_depth;
    self
  }

  pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
    self.max_tokens = Some(max_tokens);
    self
  }

  /// Reads a configuration from JSON. Missing fields take their
  /// default values.
  pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
    serde_json::from_str(json)
  }
}

impl Default for EvalConfig {
  fn default() -> Self {
    Self {
      max_depth: Self::DEFAULT_MAX_DEPTH,
      max_tokens: None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_builder() {
    let config = EvalConfig::new().with_max_depth(8).with_max_tokens(100);
    assert_eq!(config, EvalConfig { max_depth: 8, max_tokens: Some(100) });
  }

  #[test]
  fn test_from_json_defaults() {
    assert_eq!(EvalConfig::from_json("{}").unwrap(), EvalConfig::default());
    assert_eq!(
      EvalConfig::from_json(r#"{"max_tokens": 12}"#).unwrap(),
      EvalConfig { max_depth: EvalConfig::DEFAULT_MAX_DEPTH, max_tokens: Some(12) },
    );
  }

  #[test]
  fn test_from_json_invalid() {
    assert!(EvalConfig::from_json(r#"{"max_depth": "deep"}"#).is_err());
  }
}
