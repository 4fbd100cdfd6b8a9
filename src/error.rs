use thiserror::Error;

/// Text returned by [`crate::evaluate`] for every failure.
pub const EXPRESSION_ERROR: &str = "expression error";

pub type Result<T> = std::result::Result<T, ExpressionError>;

#[derive(Debug, Error)]
pub enum ExpressionError {
    #[error("unbalanced parentheses")]
    UnbalancedParens,

    #[error("unexpected character '{character}' at position {position}")]
    UnexpectedCharacter { character: char, position: usize },

    #[error("invalid bindings: {0}")]
    InvalidBindings(#[from] serde_json::Error),

    #[error("malformed token sequence: {0}")]
    MalformedTokenSequence(String),

    #[error("'{0}' is not a number")]
    NonNumericResult(String),

    #[error("division by zero")]
    DivisionByZero,

    #[error("result {0} is not finite")]
    NonFiniteResult(String),

    #[error("expression nests deeper than {limit} levels")]
    NestingTooDeep { limit: usize },
}

impl ExpressionError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        ExpressionError::MalformedTokenSequence(reason.into())
    }
}
