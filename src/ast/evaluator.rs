use crate::arithmetic::format_number;
use crate::ast::{ASTNode, Operator, Parser};
use crate::bindings::Bindings;
use crate::config::EvaluatorConfig;
use crate::error::{ExpressionError, Result};
use log::debug;

/// Work item for the evaluation loop.
enum Step<'a> {
    Visit(&'a ASTNode),
    Apply(Operator),
    Negate,
}

fn pop_value(values: &mut Vec<f64>) -> Result<f64> {
    values
        .pop()
        .ok_or_else(|| ExpressionError::malformed("value stack underflow"))
}

impl ASTNode {
    /// Evaluates a tree whose identifiers have already been resolved.
    ///
    /// Left operands are evaluated before right ones, so the first failing
    /// subexpression in reading order decides the error.
    pub fn evaluate(&self, config: &EvaluatorConfig) -> Result<f64> {
        let mut steps = vec![Step::Visit(self)];
        let mut values = Vec::new();

        while let Some(step) = steps.pop() {
            match step {
                Step::Visit(node) => match node {
                    ASTNode::Number(n) => values.push(*n),
                    ASTNode::Identifier(ident) => {
                        return Err(ExpressionError::NonNumericResult(ident.clone()))
                    }
                    ASTNode::BinaryOperation {
                        left,
                        operator,
                        right,
                    } => {
                        steps.push(Step::Apply(*operator));
                        steps.push(Step::Visit(right.as_ref()));
                        steps.push(Step::Visit(left.as_ref()));
                    }
                    ASTNode::Negate(inner) => {
                        steps.push(Step::Negate);
                        steps.push(Step::Visit(inner.as_ref()));
                    }
                    ASTNode::Group(inner) => steps.push(Step::Visit(inner.as_ref())),
                },
                Step::Apply(operator) => {
                    let right = pop_value(&mut values)?;
                    let left = pop_value(&mut values)?;
                    values.push(operator.apply(left, right, config)?);
                }
                Step::Negate => {
                    let value = pop_value(&mut values)?;
                    values.push(-value);
                }
            }
        }

        pop_value(&mut values)
    }
}

/// Parses `expression` into a tree, substitutes `bindings` and evaluates it.
pub fn evaluate_tree(
    expression: &str,
    bindings: &Bindings,
    config: &EvaluatorConfig,
) -> Result<f64> {
    let ast = Parser::parse_with_config(expression, config)?;
    let resolved_ast = ast.resolve_identifiers(bindings);
    let result = resolved_ast.evaluate(config)?;

    if config.reject_non_finite && !result.is_finite() {
        return Err(ExpressionError::NonFiniteResult(format_number(result)));
    }
    debug!("Tree result for {}: {}", expression, result);
    Ok(result)
}
