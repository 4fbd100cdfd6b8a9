use std::fmt;
use std::mem;

use crate::arithmetic;
use crate::bindings::Bindings;
use crate::config::EvaluatorConfig;
use crate::error::{ExpressionError, Result};

mod evaluator;
mod parser;

pub use evaluator::evaluate_tree;
pub use parser::ExpressionParser as Parser;

/// Expression tree. Long operator chains nest deeply on the left, so every walk
/// over it (resolution, evaluation, drop) uses an explicit stack.
#[derive(Debug, PartialEq)]
pub enum ASTNode {
    Number(f64),
    Identifier(String),
    BinaryOperation {
        left: Box<ASTNode>,
        operator: Operator,
        right: Box<ASTNode>,
    },
    Negate(Box<ASTNode>),
    Group(Box<ASTNode>),
}

impl ASTNode {
    /// Replaces every identifier found in `bindings` with its value.
    /// Unknown identifiers are kept and fail later, during evaluation.
    pub fn resolve_identifiers(mut self, bindings: &Bindings) -> ASTNode {
        let mut pending: Vec<&mut ASTNode> = vec![&mut self];
        while let Some(node) = pending.pop() {
            match node {
                ASTNode::BinaryOperation { left, right, .. } => {
                    pending.push(right);
                    pending.push(left);
                }
                ASTNode::Negate(inner) | ASTNode::Group(inner) => pending.push(inner),
                ASTNode::Identifier(ident) => {
                    if let Some(value) = bindings.get(ident) {
                        *node = ASTNode::Number(value);
                    }
                }
                ASTNode::Number(_) => {}
            }
        }
        self
    }

    /// Moves the children out, leaving leaves behind.
    fn take_children(&mut self, into: &mut Vec<ASTNode>) {
        match self {
            ASTNode::BinaryOperation { left, right, .. } => {
                into.push(mem::replace(&mut **left, ASTNode::Number(0.0)));
                into.push(mem::replace(&mut **right, ASTNode::Number(0.0)));
            }
            ASTNode::Negate(inner) | ASTNode::Group(inner) => {
                into.push(mem::replace(&mut **inner, ASTNode::Number(0.0)));
            }
            ASTNode::Number(_) | ASTNode::Identifier(_) => {}
        }
    }
}

impl Drop for ASTNode {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.take_children(&mut pending);
        while let Some(mut node) = pending.pop() {
            node.take_children(&mut pending);
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// Binding strength; higher binds tighter.
    pub fn precedence(&self) -> u8 {
        match self {
            Operator::Add | Operator::Subtract => 1,
            Operator::Multiply | Operator::Divide => 2,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
        }
    }

    pub fn apply(&self, left: f64, right: f64, config: &EvaluatorConfig) -> Result<f64> {
        match self {
            Operator::Add => Ok(arithmetic::add(left, right)),
            Operator::Subtract => Ok(arithmetic::subtract(left, right)),
            Operator::Multiply => Ok(arithmetic::multiply(left, right)),
            Operator::Divide => {
                if config.reject_division_by_zero && right == 0.0 {
                    Err(ExpressionError::DivisionByZero)
                } else {
                    Ok(arithmetic::divide(left, right))
                }
            }
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl TryFrom<&str> for Operator {
    type Error = ExpressionError;

    fn try_from(value: &str) -> Result<Self> {
        match value {
            "+" => Ok(Operator::Add),
            "-" => Ok(Operator::Subtract),
            "*" => Ok(Operator::Multiply),
            "/" => Ok(Operator::Divide),
            _ => Err(ExpressionError::malformed(format!(
                "unknown operator: {}",
                value
            ))),
        }
    }
}
