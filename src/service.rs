
//! The outward-facing calculation call: tokenize, evaluate, and wrap
//! the outcome into a [`CalculationResponse`].

use crate::error::Error;
use crate::eval::{EvalConfig, Evaluator};
use crate::parsing::Tokenize;
use crate::parsing::sexpr::SexprTokenizer;

use log::{debug, warn};
use serde::Serialize;

/// Response envelope. Exactly one of `message` (on failure) and
/// `result` (on success) is present.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CalculationResponse {
  pub status: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub message: Option<String>,
  /// One value per top-level expression, in input order.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub result: Option<Vec<f64>>,
}

#[derive(Debug, Clone)]
pub struct Calculator<T> {
  tokenizer: T,
  evaluator: Evaluator,
}

impl CalculationResponse {
  /// Message reported when the input cannot be tokenized at all.
  pub const NOT_SUPPORTED: &'static str = "Not support format";

  pub fn success(result: Vec<f64>) -> Self {
    Self { status: true, message: None, result: Some(result) }
  }

  pub fn failure(message: impl Into<String>) -> Self {
    Self { status: false, message: Some(message.into()), result: None }
  }

  pub fn to_json(&self) -> Result<String, serde_json::Error> {
    serde_json::to_string(self)
  }
}

impl<T: Tokenize> Calculator<T> {
  pub fn new(tokenizer: T, evaluator: Evaluator) -> Self {
    Self { tokenizer, evaluator }
  }

  /// Constructs a calculator whose evaluator limits are read from a
  /// JSON configuration.
  pub fn with_json_config(tokenizer: T, config_json: &str) -> Result<Self, Error> {
    let config = EvalConfig::from_json(config_json)?;
    Ok(Self::new(tokenizer, Evaluator::new(config)))
  }

  pub fn tokenizer(&self) -> &T {
    &self.tokenizer
  }

  pub fn evaluator(&self) -> &Evaluator {
    &self.evaluator
  }

  pub fn try_calculate(&self, input: &str) -> Result<Vec<f64>, Error> {
    let mut stream = self.tokenizer.tokenize(input).map_err(Error::tokenize_error)?;
    debug!("evaluating {} tokens: {}", stream.len(), stream);
    let result = self.evaluator.evaluate_all(&mut stream)?;
    Ok(result)
  }

  /// Evaluates `input`, reporting every outcome as an envelope.
  pub fn calculate(&self, input: &str) -> CalculationResponse {
    match self.try_calculate(input) {
      Ok(result) => {
        debug!("evaluated {} expression(s)", result.len());
        CalculationResponse::success(result)
      }
      Err(Error::TokenizeError(err)) => {
        warn!("could not tokenize {:?}: {}", input, err);
        CalculationResponse::failure(CalculationResponse::NOT_SUPPORTED)
      }
      Err(err) => {
        warn!("evaluation of {:?} failed: {}", input, err);
        CalculationResponse::failure(err.to_string())
      }
    }
  }
}

impl Default for Calculator<SexprTokenizer> {
  fn default() -> Self {
    Self::new(SexprTokenizer::default(), Evaluator::default())
  }
}
