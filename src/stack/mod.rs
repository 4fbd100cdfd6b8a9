//! Token-stream evaluation with an operand stack and an operator stack.

use std::fmt;

use crate::ast::Operator;

mod evaluator;
mod parens;
mod tokenizer;

pub use evaluator::Evaluator;
pub use parens::{check_nesting_depth, nesting_depth, validate_parentheses};
pub use tokenizer::tokenize;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Literal text, e.g. `"18"`, `"-3"` or `"0.5"`. Checked when evaluated.
    Number(String),
    Identifier(String),
    Operator(Operator),
    LeftParen,
    RightParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(text) | Token::Identifier(text) => write!(f, "{}", text),
            Token::Operator(operator) => write!(f, "{}", operator),
            Token::LeftParen => write!(f, "("),
            Token::RightParen => write!(f, ")"),
        }
    }
}
