use std::num::NonZeroUsize;

use log::debug;
use lru::LruCache;

use crate::arithmetic::{format_number, parse_operand};
use crate::ast::Operator;
use crate::bindings::Bindings;
use crate::config::EvaluatorConfig;
use crate::error::{ExpressionError, Result};
use crate::stack::{check_nesting_depth, tokenize, validate_parentheses, Token};

/// Entry on the operator stack.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Pending {
    Binary(Operator),
    Negate,
    Group,
}

impl Pending {
    fn precedence(&self) -> u8 {
        match self {
            Pending::Group => 0,
            Pending::Binary(operator) => operator.precedence(),
            Pending::Negate => 3,
        }
    }
}

/// Operand and operator stacks for a single evaluation.
struct Reducer<'a> {
    config: &'a EvaluatorConfig,
    operands: Vec<f64>,
    operators: Vec<Pending>,
    expect_operand: bool,
}

impl<'a> Reducer<'a> {
    fn new(config: &'a EvaluatorConfig) -> Self {
        Self {
            config,
            operands: Vec::new(),
            operators: Vec::new(),
            expect_operand: true,
        }
    }

    fn feed(&mut self, token: &Token) -> Result<()> {
        match token {
            Token::Number(text) => {
                self.require_operand_position(token)?;
                self.operands.push(parse_operand(text)?);
                self.expect_operand = false;
            }
            Token::Identifier(name) => {
                self.require_operand_position(token)?;
                return Err(ExpressionError::NonNumericResult(name.clone()));
            }
            Token::LeftParen => {
                self.require_operand_position(token)?;
                self.operators.push(Pending::Group);
            }
            Token::Operator(Operator::Subtract) if self.expect_operand => {
                self.operators.push(Pending::Negate);
            }
            Token::Operator(operator) => {
                if self.expect_operand {
                    return Err(ExpressionError::malformed(format!(
                        "missing operand before '{}'",
                        operator
                    )));
                }
                while let Some(top) = self.operators.last() {
                    if top.precedence() < operator.precedence() {
                        break;
                    }
                    self.reduce()?;
                }
                self.operators.push(Pending::Binary(*operator));
                self.expect_operand = true;
            }
            Token::RightParen => {
                if self.expect_operand {
                    return Err(ExpressionError::malformed("missing operand before ')'"));
                }
                loop {
                    match self.operators.last() {
                        Some(Pending::Group) => {
                            self.operators.pop();
                            break;
                        }
                        Some(_) => self.reduce()?,
                        None => return Err(ExpressionError::UnbalancedParens),
                    }
                }
            }
        }
        Ok(())
    }

    fn require_operand_position(&self, token: &Token) -> Result<()> {
        if self.expect_operand {
            Ok(())
        } else {
            Err(ExpressionError::malformed(format!(
                "missing operator before '{}'",
                token
            )))
        }
    }

    fn pop_operand(&mut self) -> Result<f64> {
        self.operands
            .pop()
            .ok_or_else(|| ExpressionError::malformed("operand stack underflow"))
    }

    fn reduce(&mut self) -> Result<()> {
        let pending = self
            .operators
            .pop()
            .ok_or_else(|| ExpressionError::malformed("operator stack underflow"))?;

        match pending {
            Pending::Binary(operator) => {
                let right = self.pop_operand()?;
                let left = self.pop_operand()?;
                let result = operator.apply(left, right, self.config)?;
                debug!("Reduced {} {} {} = {}", left, operator, right, result);
                self.operands.push(result);
            }
            Pending::Negate => {
                let value = self.pop_operand()?;
                debug!("Negated {}", value);
                self.operands.push(-value);
            }
            Pending::Group => return Err(ExpressionError::UnbalancedParens),
        }
        Ok(())
    }

    fn finish(mut self) -> Result<f64> {
        if self.operands.is_empty() && self.operators.is_empty() {
            return Err(ExpressionError::malformed("empty expression"));
        }
        if self.expect_operand {
            return Err(ExpressionError::malformed("expression ends with an operator"));
        }

        let binary_pending = self
            .operators
            .iter()
            .filter(|pending| matches!(pending, Pending::Binary(_)))
            .count();
        if binary_pending >= self.operands.len() {
            return Err(ExpressionError::malformed(format!(
                "{} operator(s) pending for {} operand(s)",
                binary_pending,
                self.operands.len()
            )));
        }

        while !self.operators.is_empty() {
            self.reduce()?;
        }

        let result = self.pop_operand()?;
        if !self.operands.is_empty() {
            return Err(ExpressionError::malformed(format!(
                "{} operand(s) left after reduction",
                self.operands.len() + 1
            )));
        }
        if self.config.reject_non_finite && !result.is_finite() {
            return Err(ExpressionError::NonFiniteResult(format_number(result)));
        }
        Ok(result)
    }
}

/// Evaluates token streams with an operand stack and an operator stack.
///
/// Validated token streams are kept in an LRU cache keyed by expression text, so
/// repeated expressions skip validation and tokenizing.
pub struct Evaluator {
    config: EvaluatorConfig,
    cache: Option<LruCache<String, Vec<Token>>>,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::with_config(EvaluatorConfig::default())
    }
}

impl Evaluator {
    /// Creates a new `Evaluator` with a given maximum cache size.
    pub fn new(max_cache_size: usize) -> Self {
        Self::with_config(EvaluatorConfig::default().with_cache_size(max_cache_size))
    }

    pub fn with_config(config: EvaluatorConfig) -> Self {
        let cache = NonZeroUsize::new(config.cache_size).map(LruCache::new);
        Self { config, cache }
    }

    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Validates parentheses and tokenizes `expression`, consulting the cache first.
    pub fn tokenize(&mut self, expression: &str) -> Result<Vec<Token>> {
        if let Some(cache) = self.cache.as_mut() {
            if let Some(tokens) = cache.get(expression) {
                debug!("Token cache hit: {}", expression);
                return Ok(tokens.clone());
            }
        }

        validate_parentheses(expression)?;
        let tokens = tokenize(expression)?;

        if let Some(cache) = self.cache.as_mut() {
            cache.put(expression.to_string(), tokens.clone());
        }
        Ok(tokens)
    }

    /// Evaluates a given expression string against a set of bindings.
    pub fn evaluate_expression(&mut self, expression: &str, bindings: &Bindings) -> Result<f64> {
        let tokens = self.tokenize(expression)?;
        let resolved = bindings.resolve(tokens);
        let result = self.evaluate_tokens(&resolved)?;
        debug!("Result for {}: {}", expression, result);
        Ok(result)
    }

    /// Reduces an already resolved token stream to a single value.
    pub fn evaluate_tokens(&self, tokens: &[Token]) -> Result<f64> {
        check_nesting_depth(tokens, self.config.max_nesting_depth)?;
        let mut reducer = Reducer::new(&self.config);
        for token in tokens {
            reducer.feed(token)?;
        }
        reducer.finish()
    }
}
