
use crate::eval::EvalError;

use thiserror::Error;

use std::error::{Error as StdError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
  #[error("{0}")]
  TokenizeError(Box<dyn StdError + Send + Sync + 'static>),
  #[error("{0}")]
  EvalError(#[from] EvalError),
  #[error("{0}")]
  ConfigError(#[from] serde_json::Error),
}

impl Error {
  pub fn tokenize_error(err: impl StdError + Send + Sync + 'static) -> Self {
    Self::TokenizeError(Box::new(err))
  }
}
