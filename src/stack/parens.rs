use crate::ast::Operator;
use crate::error::{ExpressionError, Result};
use crate::stack::tokenizer::expects_operand;
use crate::stack::Token;
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Marker {
    Group,
    Negate,
}

fn close_negations(open: &mut Vec<Marker>) {
    while open.last() == Some(&Marker::Negate) {
        open.pop();
    }
}

/// Checks that every `(` in the raw text is closed and every `)` was opened.
pub fn validate_parentheses(expression: &str) -> Result<()> {
    let mut stack: Vec<char> = Vec::new();
    for character in expression.chars() {
        match character {
            '(' => stack.push(character),
            ')' => {
                if stack.last() == Some(&'(') {
                    stack.pop();
                } else {
                    stack.push(character);
                }
            }
            _ => {}
        }
    }

    if stack.is_empty() {
        Ok(())
    } else {
        Err(ExpressionError::UnbalancedParens)
    }
}

/// Deepest nesting of open groups and unapplied prefix minuses in `tokens`.
///
/// A prefix minus stays open until the operand it applies to is complete, so
/// `-(-(1))` nests four levels deep while `(1) - (2)` nests one.
pub fn nesting_depth(tokens: &[Token]) -> usize {
    let mut open = Vec::new();
    let mut deepest = 0;
    let mut previous = None;

    for token in tokens {
        match token {
            Token::LeftParen => open.push(Marker::Group),
            Token::Operator(Operator::Subtract) if expects_operand(previous) => {
                open.push(Marker::Negate)
            }
            Token::Operator(_) => {}
            Token::Number(_) | Token::Identifier(_) => close_negations(&mut open),
            Token::RightParen => {
                close_negations(&mut open);
                if open.last() == Some(&Marker::Group) {
                    open.pop();
                }
                close_negations(&mut open);
            }
        }
        deepest = deepest.max(open.len());
        previous = Some(token);
    }
    deepest
}

/// Fails with [`ExpressionError::NestingTooDeep`] when `tokens` nest deeper than `limit`.
pub fn check_nesting_depth(tokens: &[Token], limit: usize) -> Result<()> {
    let depth = nesting_depth(tokens);
    if depth > limit {
        debug!("Nesting depth {} exceeds limit {}", depth, limit);
        return Err(ExpressionError::NestingTooDeep { limit });
    }
    Ok(())
}
