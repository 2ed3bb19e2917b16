//! # Symbolic Engine Derivatives Module
//!
//! Analytical differentiation of single-variable expressions and the string entry point
//! of the engine.
//!
//! ## Key Methods
//!
//! - `parse_expression(input)` - String to symbolic expression
//! - `diff(var)` - raw analytical derivative, straight from the calculus rules
//! - `derivative(var)` - derivative after simplification, the form shown to users
//! - `n_th_derivative1D(var, n)` - repeated `derivative`
//!
//! ## Differentiation Rules
//!
//! - Sum/difference: (f ± g)' = f' ± g'
//! - Product rule: (f*g)' = f'*g + f*g', or c*g' when one factor is constant in `var`
//! - Quotient rule: (f/g)' = (f'*g - f*g')/g^2
//! - Power rule: (f^n)' = n*f^(n-1)*f' when n does not depend on `var`
//! - Exponential base: (a^g)' = a^g*ln(a)*g' when a does not depend on `var`
//! - General power: (f^g)' = f^g*(g'*ln(f) + g*f'/f)
//! - Chain rule for `exp`, `ln`, `sin`, `cos`, `tg`, `sqrt`
//!
//! Variables other than `var` are treated as constants.

use crate::symbolic::parse_expr::{ParseError, parse_expression_func};
use crate::symbolic::symbolic_engine::Expr;
use log::debug;
use std::fmt;

/// Error raised while differentiating or simplifying an expression
#[derive(Debug, Clone, PartialEq)]
pub enum MathError {
    /// a denominator is the constant zero
    DivisionByZero,
    /// folding constants produced an infinite or NaN value
    NonFiniteConstant(String),
    /// the differentiation variable is not a valid name
    InvalidVariable(String),
}

impl fmt::Display for MathError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MathError::DivisionByZero => write!(f, "Division by zero"),
            MathError::NonFiniteConstant(op) => {
                write!(f, "Constant {} does not produce a finite number", op)
            }
            MathError::InvalidVariable(name) => write!(f, "Invalid variable name: '{}'", name),
        }
    }
}

impl std::error::Error for MathError {}

impl Expr {
    /// Parses a mathematical expression from string representation.
    ///
    /// # Examples
    /// ```
    /// use RustedDerivPlot::symbolic::symbolic_engine::Expr;
    /// let expr = Expr::parse_expression("x^2 + 2*x + 1").unwrap();
    /// assert_eq!(expr.all_arguments_are_variables(), vec!["x"]);
    /// ```
    pub fn parse_expression(input: &str) -> Result<Expr, ParseError> {
        let expr = parse_expression_func(input)?;
        debug!("found expression: {:?}, human readable: {}", expr, expr);
        Ok(expr)
    }

    /// DIFFERENTIATION

    /// Computes the analytical derivative of the expression with respect to a variable.
    ///
    /// The result is not simplified; use [`Expr::derivative`] for a readable form.
    pub fn diff(&self, var: &str) -> Expr {
        // constant subtrees are never expanded, so their own folding cannot fail later
        if !self.contains_variable(var) {
            return Expr::Const(0.0);
        }
        match self {
            Expr::Var(name) => {
                if name == var {
                    Expr::Const(1.0)
                } else {
                    Expr::Const(0.0)
                }
            }
            Expr::Const(_) => Expr::Const(0.0),
            Expr::Add(lhs, rhs) => Expr::Add(Box::new(lhs.diff(var)), Box::new(rhs.diff(var))),
            Expr::Sub(lhs, rhs) => Expr::Sub(Box::new(lhs.diff(var)), Box::new(rhs.diff(var))),
            Expr::Mul(lhs, rhs) => {
                if !lhs.contains_variable(var) {
                    Expr::Mul(lhs.clone(), Box::new(rhs.diff(var)))
                } else if !rhs.contains_variable(var) {
                    Expr::Mul(Box::new(lhs.diff(var)), rhs.clone())
                } else {
                    Expr::Add(
                        Box::new(Expr::Mul(Box::new(lhs.diff(var)), rhs.clone())),
                        Box::new(Expr::Mul(lhs.clone(), Box::new(rhs.diff(var)))),
                    )
                }
            }
            Expr::Div(lhs, rhs) => {
                if !rhs.contains_variable(var) {
                    Expr::Div(Box::new(lhs.diff(var)), rhs.clone())
                } else {
                    Expr::Div(
                        Box::new(Expr::Sub(
                            Box::new(Expr::Mul(Box::new(lhs.diff(var)), rhs.clone())),
                            Box::new(Expr::Mul(lhs.clone(), Box::new(rhs.diff(var)))),
                        )),
                        Box::new(Expr::Pow(rhs.clone(), Box::new(Expr::Const(2.0)))),
                    )
                }
            }
            Expr::Pow(base, exp) => {
                if !exp.contains_variable(var) {
                    Expr::Mul(
                        Box::new(Expr::Mul(
                            exp.clone(),
                            Box::new(Expr::Pow(
                                base.clone(),
                                Box::new(Expr::Sub(exp.clone(), Box::new(Expr::Const(1.0)))),
                            )),
                        )),
                        Box::new(base.diff(var)),
                    )
                } else if !base.contains_variable(var) {
                    Expr::Mul(
                        Box::new(Expr::Mul(Box::new(self.clone()), Box::new(Expr::Ln(base.clone())))),
                        Box::new(exp.diff(var)),
                    )
                } else {
                    Expr::Mul(
                        Box::new(self.clone()),
                        Box::new(Expr::Add(
                            Box::new(Expr::Mul(Box::new(exp.diff(var)), Box::new(Expr::Ln(base.clone())))),
                            Box::new(Expr::Div(
                                Box::new(Expr::Mul(exp.clone(), Box::new(base.diff(var)))),
                                base.clone(),
                            )),
                        )),
                    )
                }
            }
            Expr::Exp(expr) => {
                Expr::Mul(Box::new(Expr::Exp(expr.clone())), Box::new(expr.diff(var)))
            }
            Expr::Ln(expr) => Expr::Div(Box::new(expr.diff(var)), expr.clone()),
            Expr::sin(expr) => {
                Expr::Mul(Box::new(Expr::cos(expr.clone())), Box::new(expr.diff(var)))
            }
            Expr::cos(expr) => Expr::Mul(
                Box::new(Expr::Mul(
                    Box::new(Expr::Const(-1.0)),
                    Box::new(Expr::sin(expr.clone())),
                )),
                Box::new(expr.diff(var)),
            ),
            Expr::tg(expr) => Expr::Div(
                Box::new(expr.diff(var)),
                Box::new(Expr::Pow(
                    Box::new(Expr::cos(expr.clone())),
                    Box::new(Expr::Const(2.0)),
                )),
            ),
            Expr::sqrt(expr) => Expr::Div(
                Box::new(expr.diff(var)),
                Box::new(Expr::Mul(
                    Box::new(Expr::Const(2.0)),
                    Box::new(Expr::sqrt(expr.clone())),
                )),
            ),
        }
    } // end of diff

    /// Differentiates with respect to `var` and simplifies the result.
    ///
    /// # Examples
    /// ```
    /// use RustedDerivPlot::symbolic::symbolic_engine::Expr;
    /// let f = Expr::parse_expression("x^2").unwrap();
    /// assert_eq!(f.derivative("x").unwrap().to_string(), "2 * x");
    /// ```
    pub fn derivative(&self, var: &str) -> Result<Expr, MathError> {
        let valid_name = var.chars().next().is_some_and(char::is_alphabetic)
            && var.chars().all(|c| c.is_alphanumeric() || c == '_');
        if !valid_name {
            return Err(MathError::InvalidVariable(var.to_string()));
        }
        // the input itself may hide a division by zero that differentiation would drop;
        // a constant that only fails to fold (e.g. a root of a negative number) still has slope 0
        if let Err(MathError::DivisionByZero) = self.simplify() {
            return Err(MathError::DivisionByZero);
        }
        let derivative = self.diff(var).simplify()?;
        debug!("d/d{} of {} = {}", var, self, derivative);
        Ok(derivative)
    }

    /// Computes the nth derivative of a single-variable expression.
    /// `n = 0` returns the simplified expression itself.
    pub fn n_th_derivative1D(&self, var_name: &str, n: usize) -> Result<Expr, MathError> {
        let mut expr = self.simplify()?;
        for _ in 0..n {
            expr = expr.derivative(var_name)?;
        }
        Ok(expr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(input: &str) -> Expr {
        Expr::parse_expression(input).unwrap().derivative("x").unwrap()
    }

    fn x() -> Expr {
        Expr::var("x")
    }

    fn c(value: f64) -> Expr {
        Expr::Const(value)
    }

    #[test]
    fn test_diff_raw_power_rule() {
        let f = x().pow(c(2.0));
        let expected = c(2.0) * x().pow(c(2.0) - c(1.0)) * c(1.0);
        assert_eq!(f.diff("x"), expected);
    }

    #[test]
    fn test_derivative_of_variable_and_constants() {
        assert_eq!(d("x"), c(1.0));
        assert_eq!(d("5"), c(0.0));
        assert_eq!(d("y"), c(0.0));
    }

    #[test]
    fn test_derivative_polynomials() {
        assert_eq!(d("x^2"), c(2.0) * x());
        assert_eq!(d("2x^2"), c(4.0) * x());
        assert_eq!(d("x^3"), c(3.0) * x().pow(c(2.0)));
        assert_eq!(d("x^2 + 3x"), c(2.0) * x() + c(3.0));
        assert_eq!(d("5 - x"), c(-1.0));
    }

    #[test]
    fn test_derivative_quotients() {
        assert_eq!(d("1/x"), c(-1.0) / x().pow(c(2.0)));
        assert_eq!(d("x/2"), c(0.5));
    }

    #[test]
    fn test_derivative_functions() {
        assert_eq!(d("sin(x)"), Expr::cos(x().boxed()));
        assert_eq!(d("cos(x)"), c(-1.0) * Expr::sin(x().boxed()));
        assert_eq!(d("exp(2x)"), c(2.0) * (c(2.0) * x()).exp());
        assert_eq!(d("ln(x)"), c(1.0) / x());
    }

    #[test]
    fn test_derivative_exponential_base() {
        let expected = c(2.0).pow(x()) * c(2.0).ln();
        assert_eq!(d("2^x"), expected);
    }

    #[test]
    fn test_derivative_general_power_matches_numeric() {
        let f = Expr::parse_expression("x^x").unwrap();
        let df = f.derivative("x").unwrap();
        let f_num = f.lambdify1D("x");
        let df_num = df.lambdify1D("x");
        let h = 1e-6;
        let at = 1.5;
        let numeric = (f_num(at + h).unwrap() - f_num(at - h).unwrap()) / (2.0 * h);
        let analytic = df_num(at).unwrap();
        assert!((numeric - analytic).abs() < 1e-5);
    }

    #[test]
    fn test_derivative_division_by_zero() {
        let f = Expr::parse_expression("x/0").unwrap();
        assert_eq!(f.derivative("x"), Err(MathError::DivisionByZero));
        // constant numerator: differentiation alone would never look at the denominator
        let f = Expr::parse_expression("3/(x-x)").unwrap();
        assert_eq!(f.derivative("x"), Err(MathError::DivisionByZero));
    }

    #[test]
    fn test_derivative_of_constant_subtree_is_zero() {
        // (-8)^(1/3) has no real value, but it does not depend on x
        assert_eq!(d("(0-8)^(1/3)"), c(0.0));
        let f = Expr::parse_expression("(0-8)^(1/3)").unwrap();
        assert_eq!(f.diff("x"), c(0.0));
        assert_eq!(d("x + (0-8)^(1/3)"), c(1.0));
        assert_eq!(d("2^3 * x"), c(8.0));
    }

    #[test]
    fn test_derivative_invalid_variable() {
        let f = Expr::parse_expression("x").unwrap();
        assert_eq!(
            f.derivative(""),
            Err(MathError::InvalidVariable("".to_string()))
        );
        assert!(f.derivative("2x").is_err());
    }

    #[test]
    fn test_n_th_derivative() {
        let f = Expr::parse_expression("x^3").unwrap();
        assert_eq!(f.n_th_derivative1D("x", 0).unwrap(), x().pow(c(3.0)));
        assert_eq!(f.n_th_derivative1D("x", 2).unwrap(), c(6.0) * x());
        assert_eq!(f.n_th_derivative1D("x", 4).unwrap(), c(0.0));
    }
}
