//! Numerical evaluation of symbolic expressions.
//!
//! Two ways to get numbers out of an `Expr`:
//! - `eval_expression(bindings)` walks the tree once for a map of variable values,
//! - `lambdify1D(var)` compiles the tree into a closure of one variable, for repeated calls.
//!
//! Both follow the same policy: an operation without a finite real result is an error,
//! never a NaN or an infinity passed on to the caller.

use crate::symbolic::symbolic_engine::Expr;
use std::collections::HashMap;
use std::fmt;

/// Error raised when an expression cannot be evaluated at a point
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    /// a variable without a value in the bindings
    UndefinedVariable(String),
    DivisionByZero,
    /// the operation has no real value there, e.g. ln(-1) or sqrt(-1)
    Domain(String),
    /// the result is too large to be represented
    Overflow(String),
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EvalError::UndefinedVariable(name) => write!(f, "Undefined symbol {}", name),
            EvalError::DivisionByZero => write!(f, "Division by zero"),
            EvalError::Domain(op) => write!(f, "Argument outside the domain of {}", op),
            EvalError::Overflow(op) => write!(f, "Result of {} overflows", op),
        }
    }
}

impl std::error::Error for EvalError {}

fn checked(value: f64, op: &str) -> Result<f64, EvalError> {
    if value.is_nan() {
        Err(EvalError::Domain(op.to_string()))
    } else if value.is_infinite() {
        Err(EvalError::Overflow(op.to_string()))
    } else {
        Ok(value)
    }
}

#[derive(Clone, Copy, Debug)]
enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinaryOp {
    fn of(expr: &Expr) -> Option<(BinaryOp, &Expr, &Expr)> {
        match expr {
            Expr::Add(l, r) => Some((BinaryOp::Add, l, r)),
            Expr::Sub(l, r) => Some((BinaryOp::Sub, l, r)),
            Expr::Mul(l, r) => Some((BinaryOp::Mul, l, r)),
            Expr::Div(l, r) => Some((BinaryOp::Div, l, r)),
            Expr::Pow(l, r) => Some((BinaryOp::Pow, l, r)),
            _ => None,
        }
    }

    fn apply(self, a: f64, b: f64) -> Result<f64, EvalError> {
        match self {
            BinaryOp::Add => checked(a + b, "addition"),
            BinaryOp::Sub => checked(a - b, "subtraction"),
            BinaryOp::Mul => checked(a * b, "multiplication"),
            BinaryOp::Div => {
                if b == 0.0 {
                    return Err(EvalError::DivisionByZero);
                }
                checked(a / b, "division")
            }
            BinaryOp::Pow => {
                if a == 0.0 && b < 0.0 {
                    return Err(EvalError::DivisionByZero);
                }
                checked(a.powf(b), "power")
            }
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum UnaryFn {
    Exp,
    Ln,
    Sin,
    Cos,
    Tan,
    Sqrt,
}

impl UnaryFn {
    fn of(expr: &Expr) -> Option<UnaryFn> {
        match expr {
            Expr::Exp(_) => Some(UnaryFn::Exp),
            Expr::Ln(_) => Some(UnaryFn::Ln),
            Expr::sin(_) => Some(UnaryFn::Sin),
            Expr::cos(_) => Some(UnaryFn::Cos),
            Expr::tg(_) => Some(UnaryFn::Tan),
            Expr::sqrt(_) => Some(UnaryFn::Sqrt),
            _ => None,
        }
    }

    fn apply(self, a: f64) -> Result<f64, EvalError> {
        match self {
            UnaryFn::Exp => checked(a.exp(), "exp"),
            UnaryFn::Ln => {
                if a <= 0.0 {
                    return Err(EvalError::Domain("ln".to_string()));
                }
                checked(a.ln(), "ln")
            }
            UnaryFn::Sin => checked(a.sin(), "sin"),
            UnaryFn::Cos => checked(a.cos(), "cos"),
            UnaryFn::Tan => checked(a.tan(), "tan"),
            UnaryFn::Sqrt => checked(a.sqrt(), "sqrt"),
        }
    }
}

impl Expr {
    /// Evaluates the expression with variable values taken from `bindings`.
    ///
    /// # Errors
    /// `EvalError::UndefinedVariable` for a variable missing from `bindings`, and
    /// `DivisionByZero`, `Domain` or `Overflow` when an operation has no finite real result.
    ///
    /// # Examples
    /// ```
    /// use std::collections::HashMap;
    /// use RustedDerivPlot::symbolic::symbolic_engine::Expr;
    /// let f = Expr::parse_expression("x^2").unwrap();
    /// let bindings = HashMap::from([("x".to_string(), 2.0)]);
    /// assert_eq!(f.eval_expression(&bindings), Ok(4.0));
    /// ```
    pub fn eval_expression(&self, bindings: &HashMap<String, f64>) -> Result<f64, EvalError> {
        match self {
            Expr::Var(name) => bindings
                .get(name)
                .copied()
                .ok_or_else(|| EvalError::UndefinedVariable(name.clone())),
            Expr::Const(val) => Ok(*val),
            other => {
                if let Some((op, lhs, rhs)) = BinaryOp::of(other) {
                    let a = lhs.eval_expression(bindings)?;
                    let b = rhs.eval_expression(bindings)?;
                    return op.apply(a, b);
                }
                match (UnaryFn::of(other), other.function_argument()) {
                    (Some(func), Some(arg)) => func.apply(arg.eval_expression(bindings)?),
                    _ => unreachable!("every Expr variant is a leaf, a binary op or a function"),
                }
            }
        }
    } // end of eval_expression

    /// Converts a single-variable symbolic expression into an executable Rust closure.
    ///
    /// The tree is walked once; the returned closure only does arithmetic.
    /// Any variable other than `var` makes every call fail with `UndefinedVariable`.
    ///
    /// # Examples
    /// ```
    /// use RustedDerivPlot::symbolic::symbolic_engine::Expr;
    /// let f = Expr::parse_expression("2x^2").unwrap().lambdify1D("x");
    /// assert_eq!(f(3.0), Ok(18.0));
    /// ```
    pub fn lambdify1D(&self, var: &str) -> Box<dyn Fn(f64) -> Result<f64, EvalError>> {
        match self {
            Expr::Var(name) => {
                if name == var {
                    Box::new(Ok)
                } else {
                    let name = name.clone();
                    Box::new(move |_| Err(EvalError::UndefinedVariable(name.clone())))
                }
            }
            Expr::Const(val) => {
                let val = *val;
                Box::new(move |_| Ok(val))
            }
            other => {
                if let Some((op, lhs, rhs)) = BinaryOp::of(other) {
                    let lhs_fn = lhs.lambdify1D(var);
                    let rhs_fn = rhs.lambdify1D(var);
                    return Box::new(move |x| op.apply(lhs_fn(x)?, rhs_fn(x)?));
                }
                match (UnaryFn::of(other), other.function_argument()) {
                    (Some(func), Some(arg)) => {
                        let arg_fn = arg.lambdify1D(var);
                        Box::new(move |x| func.apply(arg_fn(x)?))
                    }
                    _ => unreachable!("every Expr variant is a leaf, a binary op or a function"),
                }
            }
        }
    } // end of lambdify1D
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{E, PI};

    fn at(expr: &str, x: f64) -> Result<f64, EvalError> {
        let bindings = HashMap::from([("x".to_string(), x)]);
        Expr::parse_expression(expr).unwrap().eval_expression(&bindings)
    }

    #[test]
    fn test_lambdify1d_single_variable() {
        let func = Expr::var("x").lambdify1D("x");
        assert_eq!(func(5.0), Ok(5.0));
    }

    #[test]
    fn test_lambdify1d_constant() {
        let func = Expr::Const(42.0).lambdify1D("x");
        assert_eq!(func(100.0), Ok(42.0));
    }

    #[test]
    fn test_lambdify1d_polynomial() {
        let x = Expr::var("x");
        let expr = x.clone() * x.clone() + x.clone() * Expr::Const(2.0) + Expr::Const(1.0); // x^2 + 2x + 1
        let func = expr.lambdify1D("x");
        assert_eq!(func(3.0), Ok(16.0));
    }

    #[test]
    fn test_lambdify1d_trigonometric() {
        let func = Expr::sin(Box::new(Expr::var("x"))).lambdify1D("x");
        assert_relative_eq!(func(0.0).unwrap(), 0.0);
        assert_relative_eq!(func(PI / 2.0).unwrap(), 1.0);
    }

    #[test]
    fn test_lambdify1d_exponential() {
        let func = Expr::var("x").exp().lambdify1D("x");
        assert_relative_eq!(func(0.0).unwrap(), 1.0);
        assert_relative_eq!(func(1.0).unwrap(), E);
    }

    #[test]
    fn test_lambdify1d_other_variable() {
        let func = (Expr::var("x") + Expr::var("y")).lambdify1D("x");
        assert_eq!(func(1.0), Err(EvalError::UndefinedVariable("y".to_string())));
    }

    #[test]
    fn test_eval_matches_lambdify() {
        let expr = Expr::parse_expression("3x^3 - 2x + sqrt(x + 11) / exp(x/4)").unwrap();
        let func = expr.lambdify1D("x");
        for x in [-10.0, -2.5, 0.0, 1.0, 7.5] {
            let bindings = HashMap::from([("x".to_string(), x)]);
            assert_eq!(expr.eval_expression(&bindings), func(x));
        }
    }

    #[test]
    fn test_eval_values() {
        assert_eq!(at("x^2", 2.0), Ok(4.0));
        assert_eq!(at("2x^2", -10.0), Ok(200.0));
        assert_relative_eq!(at("ln(x)", E).unwrap(), 1.0);
        assert_eq!(at("x^0.5", 9.0), Ok(3.0));
    }

    #[test]
    fn test_eval_errors() {
        assert_eq!(at("1/x", 0.0), Err(EvalError::DivisionByZero));
        assert_eq!(at("x^-1", 0.0), Err(EvalError::DivisionByZero));
        assert_eq!(at("ln(x)", -1.0), Err(EvalError::Domain("ln".to_string())));
        assert_eq!(at("ln(x)", 0.0), Err(EvalError::Domain("ln".to_string())));
        assert_eq!(at("sqrt(x)", -4.0), Err(EvalError::Domain("sqrt".to_string())));
        assert_eq!(at("x^0.5", -4.0), Err(EvalError::Domain("power".to_string())));
        assert_eq!(at("x^400", 10.0), Err(EvalError::Overflow("power".to_string())));
        assert_eq!(
            Expr::var("y").eval_expression(&HashMap::new()),
            Err(EvalError::UndefinedVariable("y".to_string()))
        );
    }
}
