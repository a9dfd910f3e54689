
//! Evaluation of arithmetic expressions that arrive as flattened,
//! bracket-tagged token streams.

pub mod error;
pub mod eval;
pub mod parsing;
pub mod service;

pub use error::Error;
pub use eval::{EvalConfig, EvalError, Evaluator};
pub use service::{CalculationResponse, Calculator};
