
//! Token streams and the tokenizers that produce them.

pub mod builder;
pub mod operator;
pub mod sexpr;
pub mod source;
pub mod token;
pub mod tokenizer;

use token::TokenStream;

use std::error::{Error as StdError};

/// A type implementing this trait turns serialized expressions into
/// bracket-tagged token streams. An `Err` means the input could not be
/// understood at all, as opposed to a stream that later fails to
/// evaluate.
pub trait Tokenize {
  type Error: StdError + Send + Sync + 'static;

  fn tokenize(&self, input: &str) -> Result<TokenStream, Self::Error>;
}
