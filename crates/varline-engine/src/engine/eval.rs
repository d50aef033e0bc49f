//! Arithmetic expression evaluation.
//!
//! Expressions contain only numbers, `+ - * /` and parentheses. Evaluation
//! runs in three passes:
//!
//! 1. **Tokenize**: digit/`.` runs become numbers, every other symbol is a token
//! 2. **Shunting-yard**: infix tokens are reordered into postfix order
//! 3. **Stack evaluation**: the postfix sequence is folded into one number
//!
//! `*` and `/` bind tighter than `+` and `-`; all four are left-associative.

use super::error::{EvalError, Result};

/// Input to the evaluator: raw expression text, or a number that has already
/// been resolved and must be taken as a single operand.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Piece<'a> {
    Text(&'a str),
    Number(f64),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    fn from_char(ch: char) -> Option<Operator> {
        match ch {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Sub),
            '*' => Some(Operator::Mul),
            '/' => Some(Operator::Div),
            _ => None,
        }
    }

    fn precedence(self) -> u8 {
        match self {
            Operator::Add | Operator::Sub => 1,
            Operator::Mul | Operator::Div => 2,
        }
    }

    fn apply(self, lhs: f64, rhs: f64) -> Result<f64> {
        match self {
            Operator::Add => Ok(lhs + rhs),
            Operator::Sub => Ok(lhs - rhs),
            Operator::Mul => Ok(lhs * rhs),
            Operator::Div => {
                if rhs == 0.0 {
                    return Err(EvalError::DivisionByZero);
                }
                Ok(lhs / rhs)
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Token {
    Number(f64),
    Operator(Operator),
    LeftParen,
    RightParen,
}

/// Evaluate an arithmetic expression such as `(2 + 3) * 4`.
pub fn evaluate(expression: &str) -> Result<f64> {
    evaluate_pieces(&[Piece::Text(expression)])
}

/// Evaluate an expression assembled from text and pre-resolved numbers.
///
/// Whitespace in text pieces is ignored, so digits on either side of a space
/// form one number. A [`Piece::Number`] is always its own operand.
pub fn evaluate_pieces(pieces: &[Piece<'_>]) -> Result<f64> {
    let tokens = tokenize(pieces)?;
    let postfix = to_postfix(&tokens)?;
    eval_postfix(&postfix)
}

fn is_allowed(ch: char) -> bool {
    ch.is_ascii_digit() || matches!(ch, '.' | '+' | '-' | '*' | '/' | '(' | ')')
}

fn tokenize(pieces: &[Piece<'_>]) -> Result<Vec<Token>> {
    for piece in pieces {
        if let Piece::Text(text) = piece
            && let Some(bad) = text.chars().find(|c| !c.is_whitespace() && !is_allowed(*c))
        {
            return Err(EvalError::InvalidCharacter(bad));
        }
    }

    let mut tokens = Vec::new();
    let mut number = String::new();

    for piece in pieces {
        match piece {
            Piece::Number(value) => {
                flush_number(&mut number, &mut tokens)?;
                tokens.push(Token::Number(*value));
            }
            Piece::Text(text) => {
                for ch in text.chars().filter(|c| !c.is_whitespace()) {
                    if ch.is_ascii_digit() || ch == '.' {
                        number.push(ch);
                        continue;
                    }
                    flush_number(&mut number, &mut tokens)?;
                    let token = match ch {
                        '(' => Token::LeftParen,
                        ')' => Token::RightParen,
                        _ => Operator::from_char(ch)
                            .map(Token::Operator)
                            .ok_or(EvalError::InvalidCharacter(ch))?,
                    };
                    tokens.push(token);
                }
            }
        }
    }
    flush_number(&mut number, &mut tokens)?;

    Ok(tokens)
}

fn flush_number(number: &mut String, tokens: &mut Vec<Token>) -> Result<()> {
    if number.is_empty() {
        return Ok(());
    }
    let value = number
        .parse::<f64>()
        .map_err(|_| EvalError::InvalidNumber(number.clone()))?;
    tokens.push(Token::Number(value));
    number.clear();
    Ok(())
}

/// Reorder infix tokens into postfix order. Parentheses never reach the
/// output.
fn to_postfix(tokens: &[Token]) -> Result<Vec<Token>> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut ops: Vec<Token> = Vec::new();

    for &token in tokens {
        match token {
            Token::Number(_) => output.push(token),
            Token::Operator(op) => {
                // Equal precedence pops too: left-associative.
                while let Some(&Token::Operator(top)) = ops.last() {
                    if top.precedence() < op.precedence() {
                        break;
                    }
                    output.push(Token::Operator(top));
                    ops.pop();
                }
                ops.push(token);
            }
            Token::LeftParen => ops.push(token),
            Token::RightParen => loop {
                match ops.pop() {
                    Some(Token::LeftParen) => break,
                    Some(op) => output.push(op),
                    None => return Err(EvalError::MismatchedParentheses),
                }
            },
        }
    }

    while let Some(token) = ops.pop() {
        match token {
            Token::LeftParen | Token::RightParen => return Err(EvalError::MismatchedParentheses),
            _ => output.push(token),
        }
    }

    Ok(output)
}

fn eval_postfix(postfix: &[Token]) -> Result<f64> {
    let mut stack: Vec<f64> = Vec::with_capacity(postfix.len());

    for token in postfix {
        match token {
            Token::Number(n) => stack.push(*n),
            Token::Operator(op) => {
                let (Some(rhs), Some(lhs)) = (stack.pop(), stack.pop()) else {
                    return Err(EvalError::InvalidExpression);
                };
                stack.push(op.apply(lhs, rhs)?);
            }
            Token::LeftParen | Token::RightParen => return Err(EvalError::InvalidExpression),
        }
    }

    match stack.as_slice() {
        [value] => Ok(*value),
        _ => Err(EvalError::InvalidExpression),
    }
}
