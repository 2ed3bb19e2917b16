//! a module turns a String expression into a symbolic expression
//!# Example
//! ```
//! use RustedDerivPlot::symbolic::parse_expr::parse_expression_func;
//! let parsed = parse_expression_func("2x^2 + 1").unwrap();
//! println!("parsed expression {}", parsed);
//! ```
use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::utils::has_balanced_brackets;
use log::debug;
use std::f64::consts::{E, PI};
use std::fmt;
//                  search recursion diagram
//                "2x^2 + 3*x - 1"                  |
//                |       left  | right             |
//                |_________________________________|
//                |  rightmost binary + or -        |
//                |_________________________________|
//                |  2x^2 + 3*x |  1                |
//                |_____ \|/____|___Ok______________|
//                |  rightmost binary +             |
//                |_________________________________|
//                |  2x^2       |  3*x              |
//                |_____ \|/____|_____\|/___________|
//                |  rightmost * (implicit)  etc... |
//                |  2  |  x^2                      |
//                |_Ok__|_\|/_______________________|
//                |  leftmost ^ : x | 2             |
//                  etc...

/// Error returned when a string cannot be turned into an expression tree
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// nothing but whitespace
    Empty,
    /// character outside the expression grammar
    UnexpectedChar { ch: char, pos: usize },
    /// numeric literal such as "1.2.3"
    InvalidNumber(String),
    UnbalancedBrackets,
    /// an operator or bracket misses its operand
    UnexpectedEnd,
    /// token that cannot stand where it was found
    UnexpectedToken(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParseError::Empty => write!(f, "Empty expression"),
            ParseError::UnexpectedChar { ch, pos } => {
                write!(f, "Unexpected character '{}' at position {}", ch, pos)
            }
            ParseError::InvalidNumber(s) => write!(f, "Invalid number: {}", s),
            ParseError::UnbalancedBrackets => write!(f, "Unbalanced brackets"),
            ParseError::UnexpectedEnd => write!(f, "Unexpected end of expression"),
            ParseError::UnexpectedToken(t) => write!(f, "Unexpected token: {}", t),
        }
    }
}

impl std::error::Error for ParseError {}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Ident(String),
    Op(char),
    LParen,
    RParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{}", n),
            Token::Ident(s) => write!(f, "{}", s),
            Token::Op(c) => write!(f, "{}", c),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
        }
    }
}

const FUNCTION_NAMES: [&str; 8] = ["exp", "ln", "log", "sin", "cos", "tan", "tg", "sqrt"];

fn is_function_name(name: &str) -> bool {
    FUNCTION_NAMES.contains(&name)
}

fn make_function(name: &str, arg: Expr) -> Option<Expr> {
    let boxed = Box::new(arg);
    match name {
        "exp" => Some(Expr::Exp(boxed)),
        "ln" | "log" => Some(Expr::Ln(boxed)),
        "sin" => Some(Expr::sin(boxed)),
        "cos" => Some(Expr::cos(boxed)),
        "tan" | "tg" => Some(Expr::tg(boxed)),
        "sqrt" => Some(Expr::sqrt(boxed)),
        _ => None,
    }
}

fn tokenize(input: &str) -> Result<Vec<Token>, ParseError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() {
            i += 1;
        } else if c.is_ascii_digit() || c == '.' {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            let literal: String = chars[start..i].iter().collect();
            let value = literal
                .parse::<f64>()
                .map_err(|_| ParseError::InvalidNumber(literal.clone()))?;
            tokens.push(Token::Number(value));
        } else if c.is_alphabetic() {
            let start = i;
            while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            tokens.push(Token::Ident(chars[start..i].iter().collect()));
        } else {
            let token = match c {
                '+' | '-' | '*' | '/' | '^' => Token::Op(c),
                '(' => Token::LParen,
                ')' => Token::RParen,
                _ => return Err(ParseError::UnexpectedChar { ch: c, pos: i }),
            };
            tokens.push(token);
            i += 1;
        }
    }
    Ok(insert_implicit_multiplication(tokens))
}

// "2x", "2(x+1)", "(x+1)(x-1)", "x(x+1)" -> explicit '*'
fn insert_implicit_multiplication(tokens: Vec<Token>) -> Vec<Token> {
    let mut out: Vec<Token> = Vec::with_capacity(tokens.len());
    for token in tokens {
        if let Some(prev) = out.last() {
            let prev_ends_operand = match prev {
                Token::Number(_) | Token::RParen => true,
                Token::Ident(name) => !is_function_name(name),
                _ => false,
            };
            let starts_operand = match (&token, prev) {
                (Token::Number(_), Token::Number(_)) => false,
                (Token::Number(_), _) | (Token::Ident(_), _) | (Token::LParen, _) => true,
                _ => false,
            };
            if prev_ends_operand && starts_operand {
                out.push(Token::Op('*'));
            }
        }
        out.push(token);
    }
    out
}

fn ends_operand(token: &Token) -> bool {
    matches!(token, Token::Number(_) | Token::Ident(_) | Token::RParen)
}

// rightmost operator outside brackets: left associativity for + - * /
fn find_rightmost_operator_outside_brackets(tokens: &[Token], operators: &[char]) -> Option<usize> {
    let mut depth = 0;
    let mut last_op_pos = None;
    for (i, token) in tokens.iter().enumerate() {
        match token {
            Token::LParen => depth += 1,
            Token::RParen => depth -= 1,
            Token::Op(c) if depth == 0 && operators.contains(c) => {
                // a sign right after another operator (or at the start) is unary
                let is_binary = i > 0 && ends_operand(&tokens[i - 1]);
                if is_binary {
                    last_op_pos = Some(i);
                }
            }
            _ => {}
        }
    }
    last_op_pos
}

// leftmost '^' outside brackets: right associativity
fn find_leftmost_power_outside_brackets(tokens: &[Token]) -> Option<usize> {
    let mut depth = 0;
    for (i, token) in tokens.iter().enumerate() {
        match token {
            Token::LParen => depth += 1,
            Token::RParen => depth -= 1,
            Token::Op('^') if depth == 0 => return Some(i),
            _ => {}
        }
    }
    None
}

// index of the bracket closing the one at `open`
fn matching_bracket(tokens: &[Token], open: usize) -> Option<usize> {
    let mut depth = 0;
    for (i, token) in tokens.iter().enumerate().skip(open) {
        match token {
            Token::LParen => depth += 1,
            Token::RParen => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

fn parse_tokens(tokens: &[Token]) -> Result<Expr, ParseError> {
    if tokens.is_empty() {
        return Err(ParseError::UnexpectedEnd);
    }
    // addition and subtraction
    if let Some(pos) = find_rightmost_operator_outside_brackets(tokens, &['+', '-']) {
        let left = parse_tokens(&tokens[..pos])?;
        let right = parse_tokens(&tokens[pos + 1..])?;
        return Ok(match tokens[pos] {
            Token::Op('+') => Expr::Add(Box::new(left), Box::new(right)),
            _ => Expr::Sub(Box::new(left), Box::new(right)),
        });
    }
    // multiplication and division
    if let Some(pos) = find_rightmost_operator_outside_brackets(tokens, &['*', '/']) {
        let left = parse_tokens(&tokens[..pos])?;
        let right = parse_tokens(&tokens[pos + 1..])?;
        return Ok(match tokens[pos] {
            Token::Op('*') => Expr::Mul(Box::new(left), Box::new(right)),
            _ => Expr::Div(Box::new(left), Box::new(right)),
        });
    }
    // unary signs
    match &tokens[0] {
        Token::Op('-') => {
            let inner = parse_tokens(&tokens[1..])?;
            return Ok(match inner {
                Expr::Const(value) => Expr::Const(-value),
                other => -other,
            });
        }
        Token::Op('+') => return parse_tokens(&tokens[1..]),
        _ => {}
    }
    // power
    if let Some(pos) = find_leftmost_power_outside_brackets(tokens) {
        let base = parse_tokens(&tokens[..pos])?;
        let exponent = parse_tokens(&tokens[pos + 1..])?;
        return Ok(Expr::Pow(Box::new(base), Box::new(exponent)));
    }
    parse_atom(tokens)
}

fn parse_atom(tokens: &[Token]) -> Result<Expr, ParseError> {
    match tokens {
        [Token::Number(value)] => Ok(Expr::Const(*value)),
        [Token::Ident(name)] => match name.as_str() {
            "pi" => Ok(Expr::Const(PI)),
            "e" => Ok(Expr::Const(E)),
            n if is_function_name(n) => Err(ParseError::UnexpectedToken(name.clone())),
            _ => Ok(Expr::Var(name.clone())),
        },
        [Token::Ident(name), Token::LParen, ..] if is_function_name(name) => {
            let inner = enclosed(tokens, 1)?;
            debug!("found function {} of {} tokens", name, inner.len());
            let arg = parse_tokens(inner)?;
            make_function(name, arg).ok_or_else(|| ParseError::UnexpectedToken(name.clone()))
        }
        [Token::LParen, ..] => parse_tokens(enclosed(tokens, 0)?),
        [first, ..] => Err(ParseError::UnexpectedToken(first.to_string())),
        [] => Err(ParseError::UnexpectedEnd),
    }
}

// content of the bracket opened at `open`, which must close at the last token
fn enclosed(tokens: &[Token], open: usize) -> Result<&[Token], ParseError> {
    let close = matching_bracket(tokens, open).ok_or(ParseError::UnbalancedBrackets)?;
    if close != tokens.len() - 1 {
        return Err(ParseError::UnexpectedToken(tokens[close + 1].to_string()));
    }
    Ok(&tokens[open + 1..close])
}

/// Parses a mathematical expression string into a symbolic expression tree.
///
/// Supported syntax: numbers, variables, `+ - * / ^`, brackets, unary signs,
/// `exp ln log sin cos tan tg sqrt`, the constants `pi` and `e`, and implicit
/// multiplication (`2x`, `2(x+1)`, `(x+1)(x-1)`).
pub fn parse_expression_func(input: &str) -> Result<Expr, ParseError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ParseError::Empty);
    }
    if !has_balanced_brackets(input) {
        return Err(ParseError::UnbalancedBrackets);
    }
    let tokens = tokenize(input)?;
    debug!("input: {} tokens: {:?}", input, tokens);
    parse_tokens(&tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Expr {
        Expr::var("x")
    }

    #[test]
    fn test_parse_constant() {
        let expr = parse_expression_func("42").unwrap();
        assert_eq!(expr, Expr::Const(42.0));
    }

    #[test]
    fn test_parse_variable() {
        let expr = parse_expression_func("x").unwrap();
        assert_eq!(expr, x());
    }

    #[test]
    fn test_parse_addition() {
        let expr = parse_expression_func("x + 2").unwrap();
        assert_eq!(expr, x() + Expr::Const(2.0));
    }

    #[test]
    fn test_multiple_subtraction_is_left_associative() {
        let expr = parse_expression_func("x^2 - x - 1").unwrap();
        let expected = x().pow(Expr::Const(2.0)) - x() - Expr::Const(1.0);
        assert_eq!(expr, expected);
    }

    #[test]
    fn test_division_is_left_associative() {
        let expr = parse_expression_func("x / 2 / 3").unwrap();
        assert_eq!(expr, x() / Expr::Const(2.0) / Expr::Const(3.0));
    }

    #[test]
    fn test_power_is_right_associative() {
        let expr = parse_expression_func("x^2^3").unwrap();
        assert_eq!(expr, x().pow(Expr::Const(2.0).pow(Expr::Const(3.0))));
    }

    #[test]
    fn test_implicit_multiplication() {
        let expr = parse_expression_func("2x^2").unwrap();
        assert_eq!(expr, Expr::Const(2.0) * x().pow(Expr::Const(2.0)));
        let expr = parse_expression_func("2(x+1)").unwrap();
        assert_eq!(expr, Expr::Const(2.0) * (x() + Expr::Const(1.0)));
        let expr = parse_expression_func("(x+1)(x-1)").unwrap();
        assert_eq!(expr, (x() + Expr::Const(1.0)) * (x() - Expr::Const(1.0)));
        let expr = parse_expression_func("x(x+1)").unwrap();
        assert_eq!(expr, x() * (x() + Expr::Const(1.0)));
    }

    #[test]
    fn test_unary_minus() {
        assert_eq!(parse_expression_func("-3").unwrap(), Expr::Const(-3.0));
        // power binds tighter than the sign
        let expr = parse_expression_func("-x^2").unwrap();
        assert_eq!(expr, -(x().pow(Expr::Const(2.0))));
        let expr = parse_expression_func("x^-1").unwrap();
        assert_eq!(expr, x().pow(Expr::Const(-1.0)));
        let expr = parse_expression_func("2 - -x").unwrap();
        assert_eq!(expr, Expr::Const(2.0) - (-x()));
    }

    #[test]
    fn test_parse_functions() {
        assert_eq!(parse_expression_func("exp(x)").unwrap(), x().exp());
        assert_eq!(parse_expression_func("log(x)").unwrap(), x().ln());
        assert_eq!(
            parse_expression_func("sin(cos(x))").unwrap(),
            Expr::sin(Box::new(Expr::cos(Box::new(x()))))
        );
        assert_eq!(
            parse_expression_func("tan(x)").unwrap(),
            Expr::tg(Box::new(x()))
        );
        assert_eq!(
            parse_expression_func("sin(x)^2").unwrap(),
            Expr::sin(Box::new(x())).pow(Expr::Const(2.0))
        );
    }

    #[test]
    fn test_brackets() {
        let expr = parse_expression_func("((x + 1)) * 3").unwrap();
        assert_eq!(expr, (x() + Expr::Const(1.0)) * Expr::Const(3.0));
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse_expression_func("   "), Err(ParseError::Empty));
        assert_eq!(parse_expression_func("(x +"), Err(ParseError::UnbalancedBrackets));
        assert_eq!(parse_expression_func("x +"), Err(ParseError::UnexpectedEnd));
        assert_eq!(
            parse_expression_func("* x"),
            Err(ParseError::UnexpectedToken("*".to_string()))
        );
        assert_eq!(parse_expression_func("()"), Err(ParseError::UnexpectedEnd));
        assert_eq!(
            parse_expression_func("x, 2"),
            Err(ParseError::UnexpectedChar { ch: ',', pos: 1 })
        );
        assert_eq!(
            parse_expression_func("1.2.3"),
            Err(ParseError::InvalidNumber("1.2.3".to_string()))
        );
        assert_eq!(
            parse_expression_func("2 3"),
            Err(ParseError::UnexpectedToken("2".to_string()))
        );
        assert_eq!(
            parse_expression_func("sin"),
            Err(ParseError::UnexpectedToken("sin".to_string()))
        );
    }
}
