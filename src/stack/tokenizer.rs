use crate::ast::Operator;
use crate::error::{ExpressionError, Result};
use crate::stack::Token;
use log::debug;

fn is_number_char(character: char) -> bool {
    character.is_ascii_digit() || character == '.'
}

/// An operand, not an operator, is expected after these.
pub(super) fn expects_operand(previous: Option<&Token>) -> bool {
    matches!(
        previous,
        None | Some(Token::Operator(_)) | Some(Token::LeftParen)
    )
}

/// Collects the run of characters starting at `start` that satisfy `condition`.
/// Returns the run and the index just past it.
fn read_run(chars: &[char], start: usize, condition: fn(char) -> bool) -> (String, usize) {
    let end = chars[start..]
        .iter()
        .position(|&c| !condition(c))
        .map_or(chars.len(), |offset| start + offset);
    (chars[start..end].iter().collect(), end)
}

/// Splits expression text into tokens.
///
/// A `-` directly followed by a digit is fused into the number literal when it
/// appears where an operand is expected, so `2*-3` yields `2`, `*`, `-3` while
/// `2-3` yields `2`, `-`, `3`.
pub fn tokenize(expression: &str) -> Result<Vec<Token>> {
    debug!("Tokenizing expression: {}", expression);
    let chars: Vec<char> = expression.chars().collect();
    let mut tokens = Vec::new();
    let mut position = 0;

    while position < chars.len() {
        let character = chars[position];

        if character.is_whitespace() {
            position += 1;
            continue;
        }

        if is_number_char(character) {
            let (text, next) = read_run(&chars, position, is_number_char);
            tokens.push(Token::Number(text));
            position = next;
            continue;
        }

        if character.is_alphabetic() {
            let (text, next) = read_run(&chars, position, char::is_alphabetic);
            tokens.push(Token::Identifier(text));
            position = next;
            continue;
        }

        let token = match character {
            '+' => Token::Operator(Operator::Add),
            '-' => Token::Operator(Operator::Subtract),
            '*' => Token::Operator(Operator::Multiply),
            '/' => Token::Operator(Operator::Divide),
            '(' => Token::LeftParen,
            ')' => Token::RightParen,
            _ => {
                return Err(ExpressionError::UnexpectedCharacter {
                    character,
                    position,
                })
            }
        };
        position += 1;

        let signed_literal = character == '-'
            && expects_operand(tokens.last())
            && chars.get(position).is_some_and(char::is_ascii_digit);
        if signed_literal {
            let (digits, next) = read_run(&chars, position, is_number_char);
            tokens.push(Token::Number(format!("-{}", digits)));
            position = next;
            continue;
        }

        tokens.push(token);
    }

    debug!("Tokens: {:?}", tokens);
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(text: &str) -> Token {
        Token::Number(text.to_string())
    }

    fn ident(text: &str) -> Token {
        Token::Identifier(text.to_string())
    }

    const ADD: Token = Token::Operator(Operator::Add);
    const SUB: Token = Token::Operator(Operator::Subtract);
    const MUL: Token = Token::Operator(Operator::Multiply);
    const DIV: Token = Token::Operator(Operator::Divide);

    #[test]
    fn test_sample_expression() {
        assert_eq!(
            tokenize("1-(2*age)+1").unwrap(),
            vec![
                number("1"),
                SUB,
                Token::LeftParen,
                number("2"),
                MUL,
                ident("age"),
                Token::RightParen,
                ADD,
                number("1"),
            ]
        );
    }

    #[test]
    fn test_whitespace_and_decimals() {
        assert_eq!(
            tokenize("  12.5 /\t0.25  ").unwrap(),
            vec![number("12.5"), DIV, number("0.25")]
        );
        assert!(tokenize("   ").unwrap().is_empty());
    }

    #[test]
    fn test_whitespace_splits_runs() {
        assert_eq!(
            tokenize("12 34 ab cd").unwrap(),
            vec![number("12"), number("34"), ident("ab"), ident("cd")]
        );
    }

    #[test]
    fn test_number_run_keeps_malformed_literal() {
        assert_eq!(tokenize("1.2.3").unwrap(), vec![number("1.2.3")]);
    }

    #[test]
    fn test_leading_minus_fuses_into_literal() {
        assert_eq!(tokenize("-5 + 3").unwrap(), vec![number("-5"), ADD, number("3")]);
        assert_eq!(
            tokenize("2*-3").unwrap(),
            vec![number("2"), MUL, number("-3")]
        );
        assert_eq!(
            tokenize("(-3)").unwrap(),
            vec![Token::LeftParen, number("-3"), Token::RightParen]
        );
    }

    #[test]
    fn test_minus_after_operand_is_binary() {
        assert_eq!(
            tokenize("10/2-3").unwrap(),
            vec![number("10"), DIV, number("2"), SUB, number("3")]
        );
        assert_eq!(
            tokenize("(1)-2").unwrap(),
            vec![
                Token::LeftParen,
                number("1"),
                Token::RightParen,
                SUB,
                number("2")
            ]
        );
    }

    #[test]
    fn test_minus_not_fused_before_space_identifier_or_group() {
        assert_eq!(tokenize("- 3").unwrap(), vec![SUB, number("3")]);
        assert_eq!(tokenize("-age").unwrap(), vec![SUB, ident("age")]);
        assert_eq!(
            tokenize("-(1)").unwrap(),
            vec![SUB, Token::LeftParen, number("1"), Token::RightParen]
        );
        assert_eq!(tokenize("--3").unwrap(), vec![SUB, number("-3")]);
    }

    #[test]
    fn test_trailing_minus() {
        assert_eq!(tokenize("1-").unwrap(), vec![number("1"), SUB]);
    }

    #[test]
    fn test_unicode_identifier() {
        assert_eq!(
            tokenize("größe*2").unwrap(),
            vec![ident("größe"), MUL, number("2")]
        );
    }

    #[test]
    fn test_unexpected_character() {
        assert!(matches!(
            tokenize("1 + 2 % 3"),
            Err(ExpressionError::UnexpectedCharacter {
                character: '%',
                position: 6
            })
        ));
        assert!(matches!(
            tokenize("price_1"),
            Err(ExpressionError::UnexpectedCharacter { character: '_', .. })
        ));
    }
}
