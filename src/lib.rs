pub mod arithmetic;
pub mod ast;
pub mod bindings;
pub mod config;
pub mod error;
pub mod stack;

pub use bindings::{Binding, Bindings};
pub use config::EvaluatorConfig;
pub use error::{ExpressionError, Result, EXPRESSION_ERROR};
pub use stack::{Evaluator, Token};

use arithmetic::format_number;
use log::debug;

/// Evaluates `expression` with variables taken from `bindings`, a JSON list of
/// `{"key": ..., "value": ...}` records, and returns the result as decimal text.
pub fn try_evaluate(expression: &str, bindings: &str) -> Result<String> {
    let mut evaluator = Evaluator::with_config(EvaluatorConfig::default().with_cache_size(0));
    let tokens = evaluator.tokenize(expression)?;
    let bindings = Bindings::from_json(bindings)?;
    let value = evaluator.evaluate_tokens(&bindings.resolve(tokens))?;
    Ok(format_number(value))
}

/// Like [`try_evaluate`], but every failure becomes [`EXPRESSION_ERROR`].
pub fn evaluate(expression: &str, bindings: &str) -> String {
    try_evaluate(expression, bindings).unwrap_or_else(|err| {
        debug!("Evaluation of {:?} failed: {}", expression, err);
        EXPRESSION_ERROR.to_string()
    })
}
