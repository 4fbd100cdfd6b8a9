use crate::arithmetic::parse_operand;
use crate::ast::{ASTNode, Operator};
use crate::config::EvaluatorConfig;
use crate::error::{ExpressionError, Result};
use crate::stack::{check_nesting_depth, tokenize, validate_parentheses};
use log::debug;
use pest::iterators::{Pair, Pairs};
use pest::pratt_parser::{Assoc, Op, PrattParser};
use pest::Parser;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "ast/expression.pest"]
pub struct ExpressionParser;

fn pratt_parser() -> PrattParser<Rule> {
    PrattParser::new()
        .op(Op::infix(Rule::PLUS, Assoc::Left) | Op::infix(Rule::MINUS, Assoc::Left))
        .op(Op::infix(Rule::STAR, Assoc::Left) | Op::infix(Rule::SLASH, Assoc::Left))
        .op(Op::prefix(Rule::NEG))
}

impl ExpressionParser {
    pub fn parse_expression(input: &str) -> Result<ASTNode> {
        Self::parse_with_config(input, &EvaluatorConfig::default())
    }

    /// Parses `input`, rejecting it before the grammar runs when its groups and
    /// negations nest deeper than `config.max_nesting_depth`.
    pub fn parse_with_config(input: &str, config: &EvaluatorConfig) -> Result<ASTNode> {
        debug!("Parsing expression: {}", input);
        validate_parentheses(input)?;
        check_nesting_depth(&tokenize(input)?, config.max_nesting_depth)?;

        let expr = ExpressionParser::parse(Rule::expression, input)
            .map_err(|e| ExpressionError::malformed(e.to_string()))?
            .next()
            .ok_or_else(|| ExpressionError::malformed("empty expression"))?;

        Self::build_expression(expr.into_inner())
    }

    fn build_expression(pairs: Pairs<Rule>) -> Result<ASTNode> {
        let pratt = pratt_parser();
        let node = pratt
            .map_primary(Self::build_primary)
            .map_prefix(|operator_pair, operand| match operator_pair.as_rule() {
                Rule::NEG => Ok(ASTNode::Negate(Box::new(operand?))),
                rule => Err(ExpressionError::malformed(format!(
                    "unexpected prefix operator: {:?}",
                    rule
                ))),
            })
            .map_infix(|left, operator_pair, right| {
                let operator = Operator::try_from(operator_pair.as_str())?;
                Ok(ASTNode::BinaryOperation {
                    left: Box::new(left?),
                    operator,
                    right: Box::new(right?),
                })
            })
            .parse(pairs);
        node
    }

    fn build_primary(pair: Pair<Rule>) -> Result<ASTNode> {
        debug!("Building {:?}: {}", pair.as_rule(), pair.as_str());
        match pair.as_rule() {
            Rule::number => Ok(ASTNode::Number(parse_operand(pair.as_str())?)),
            Rule::identifier => Ok(ASTNode::Identifier(pair.as_str().to_string())),
            Rule::group => {
                let inner = pair
                    .into_inner()
                    .next()
                    .ok_or_else(|| ExpressionError::malformed("empty group"))?;
                let node = Self::build_expression(inner.into_inner())?;
                Ok(ASTNode::Group(Box::new(node)))
            }
            rule => Err(ExpressionError::malformed(format!(
                "unexpected rule in primary expression: {:?}",
                rule
            ))),
        }
    }
}
