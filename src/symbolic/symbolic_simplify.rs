//! # Symbolic Expression Simplification Module
//!
//! Tidies expression trees produced by differentiation so that their canonical string reads
//! the way a person would write it: `2 * x` instead of `(2 * x ^ (2 - 1)) * 1`.
//!
//! ## Simplification Strategy
//!
//! 1. **Recursive Descent**: children are simplified first
//! 2. **Constant Folding**: arithmetic on two constants is evaluated
//! 3. **Algebraic Identities**: `x + 0 = x`, `x * 1 = x`, `0 * x = 0`, `x ^ 1 = x`, `x ^ 0 = 1`
//! 4. **Constant Collection**: constant factors move to the left and merge,
//!    `(2 * x) * 3 = 6 * x`
//! 5. **Power Rules**: `x * x = x ^ 2`, `x ^ a * x ^ b = x ^ (a + b)`
//!
//! The rules never reorder non-constant terms, so the same input always gives the same
//! output. A literal division by zero or a constant that folds to a non-finite number is
//! reported as a `MathError` instead of being carried along.

use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::symbolic_engine_derivatives::MathError;

impl Expr {
    //___________________________________SIMPLIFICATION____________________________________

    /// Simplifies the expression using all available rules.
    ///
    /// # Errors
    /// `MathError::DivisionByZero` when a denominator simplifies to the constant zero,
    /// `MathError::NonFiniteConstant` when folding constants overflows or leaves the real domain.
    pub fn simplify(&self) -> Result<Expr, MathError> {
        match self {
            Expr::Var(_) | Expr::Const(_) => Ok(self.clone()),
            Expr::Add(lhs, rhs) => simplify_add(lhs.simplify()?, rhs.simplify()?),
            Expr::Sub(lhs, rhs) => simplify_sub(lhs.simplify()?, rhs.simplify()?),
            Expr::Mul(lhs, rhs) => simplify_mul(lhs.simplify()?, rhs.simplify()?),
            Expr::Div(lhs, rhs) => simplify_div(lhs.simplify()?, rhs.simplify()?),
            Expr::Pow(base, exp) => simplify_pow(base.simplify()?, exp.simplify()?),
            func => match func.function_argument() {
                Some(arg) => Ok(simplify_function(func, arg.simplify()?)),
                None => Ok(func.clone()),
            },
        }
    }
}

fn folded(value: f64, operation: &str) -> Result<Expr, MathError> {
    if value.is_finite() {
        Ok(Expr::Const(value))
    } else {
        Err(MathError::NonFiniteConstant(operation.to_string()))
    }
}

fn simplify_add(lhs: Expr, rhs: Expr) -> Result<Expr, MathError> {
    match (&lhs, &rhs) {
        (Expr::Const(a), Expr::Const(b)) => folded(a + b, "addition"),
        _ if lhs.is_zero() => Ok(rhs),
        _ if rhs.is_zero() => Ok(lhs),
        // a + (-c) = a - c
        (_, Expr::Const(b)) if *b < 0.0 => Ok(Expr::Sub(Box::new(lhs), Box::new(Expr::Const(-b)))),
        _ if lhs == rhs => simplify_mul(Expr::Const(2.0), lhs),
        _ => Ok(Expr::Add(Box::new(lhs), Box::new(rhs))),
    }
}

fn simplify_sub(lhs: Expr, rhs: Expr) -> Result<Expr, MathError> {
    match (&lhs, &rhs) {
        (Expr::Const(a), Expr::Const(b)) => folded(a - b, "subtraction"),
        _ if rhs.is_zero() => Ok(lhs),
        _ if lhs.is_zero() => simplify_mul(Expr::Const(-1.0), rhs),
        _ if lhs == rhs => Ok(Expr::Const(0.0)),
        // a - (-c) = a + c
        (_, Expr::Const(b)) if *b < 0.0 => Ok(Expr::Add(Box::new(lhs), Box::new(Expr::Const(-b)))),
        _ => Ok(Expr::Sub(Box::new(lhs), Box::new(rhs))),
    }
}

fn simplify_mul(lhs: Expr, rhs: Expr) -> Result<Expr, MathError> {
    match (&lhs, &rhs) {
        (Expr::Const(a), Expr::Const(b)) => folded(a * b, "multiplication"),
        _ if lhs.is_zero() || rhs.is_zero() => Ok(Expr::Const(0.0)),
        _ if lhs.is_one() => Ok(rhs),
        _ if rhs.is_one() => Ok(lhs),
        // constants go to the left: x * c = c * x
        (_, Expr::Const(_)) => simplify_mul(rhs, lhs),
        // c1 * (c2 * e) = (c1 * c2) * e
        (Expr::Const(c1), Expr::Mul(inner_lhs, inner_rhs)) => match inner_lhs.as_ref() {
            Expr::Const(c2) => simplify_mul(folded(c1 * c2, "multiplication")?, *inner_rhs.clone()),
            _ => Ok(Expr::Mul(Box::new(lhs), Box::new(rhs))),
        },
        // c1 * (c2 / e) = (c1 * c2) / e
        (Expr::Const(c1), Expr::Div(num, den)) => match num.as_ref() {
            Expr::Const(c2) => simplify_div(folded(c1 * c2, "multiplication")?, *den.clone()),
            _ => Ok(Expr::Mul(Box::new(lhs), Box::new(rhs))),
        },
        // (c * e1) * e2 = c * (e1 * e2)
        (Expr::Mul(inner_lhs, inner_rhs), _) if matches!(inner_lhs.as_ref(), Expr::Const(_)) => {
            let product = simplify_mul(*inner_rhs.clone(), rhs)?;
            simplify_mul(*inner_lhs.clone(), product)
        }
        // e1 * (c * e2) = c * (e1 * e2)
        (_, Expr::Mul(inner_lhs, inner_rhs)) if matches!(inner_lhs.as_ref(), Expr::Const(_)) => {
            let product = simplify_mul(lhs, *inner_rhs.clone())?;
            simplify_mul(*inner_lhs.clone(), product)
        }
        // x ^ a * x ^ b = x ^ (a + b)
        (Expr::Pow(base1, exp1), Expr::Pow(base2, exp2)) if base1 == base2 => {
            let new_exp = simplify_add(*exp1.clone(), *exp2.clone())?;
            simplify_pow(*base1.clone(), new_exp)
        }
        (Expr::Pow(base, exp), other) | (other, Expr::Pow(base, exp)) if base.as_ref() == other => {
            let new_exp = simplify_add(*exp.clone(), Expr::Const(1.0))?;
            simplify_pow(other.clone(), new_exp)
        }
        _ if lhs == rhs => simplify_pow(lhs, Expr::Const(2.0)),
        _ => Ok(Expr::Mul(Box::new(lhs), Box::new(rhs))),
    }
}

fn simplify_div(lhs: Expr, rhs: Expr) -> Result<Expr, MathError> {
    if rhs.is_zero() {
        return Err(MathError::DivisionByZero);
    }
    match (&lhs, &rhs) {
        (Expr::Const(a), Expr::Const(b)) => folded(a / b, "division"),
        _ if lhs.is_zero() => Ok(Expr::Const(0.0)),
        _ if rhs.is_one() => Ok(lhs),
        _ if lhs == rhs => Ok(Expr::Const(1.0)),
        // (c * e) / d = (c / d) * e for a constant d
        (Expr::Mul(inner_lhs, inner_rhs), Expr::Const(d)) => match inner_lhs.as_ref() {
            Expr::Const(c) => simplify_mul(folded(c / d, "division")?, *inner_rhs.clone()),
            _ => Ok(Expr::Div(Box::new(lhs), Box::new(rhs))),
        },
        _ => Ok(Expr::Div(Box::new(lhs), Box::new(rhs))),
    }
}

fn simplify_pow(base: Expr, exp: Expr) -> Result<Expr, MathError> {
    match (&base, &exp) {
        (Expr::Const(a), Expr::Const(b)) => {
            if *a == 0.0 && *b < 0.0 {
                return Err(MathError::DivisionByZero);
            }
            folded(a.powf(*b), "power")
        }
        _ if exp.is_zero() => Ok(Expr::Const(1.0)),
        _ if exp.is_one() => Ok(base),
        _ if base.is_one() => Ok(Expr::Const(1.0)),
        // (e ^ a) ^ b = e ^ (a * b) for constant exponents
        (Expr::Pow(inner_base, inner_exp), Expr::Const(b)) => match inner_exp.as_ref() {
            Expr::Const(a) => simplify_pow(*inner_base.clone(), folded(a * b, "power")?),
            _ => Ok(Expr::Pow(Box::new(base), Box::new(exp))),
        },
        _ => Ok(Expr::Pow(Box::new(base), Box::new(exp))),
    }
}

fn simplify_function(func: &Expr, arg: Expr) -> Expr {
    match (func, &arg) {
        (Expr::Exp(_), Expr::Const(c)) if *c == 0.0 => Expr::Const(1.0),
        (Expr::Ln(_), Expr::Const(c)) if *c == 1.0 => Expr::Const(0.0),
        (Expr::sin(_), Expr::Const(c)) | (Expr::tg(_), Expr::Const(c)) if *c == 0.0 => {
            Expr::Const(0.0)
        }
        (Expr::cos(_), Expr::Const(c)) if *c == 0.0 => Expr::Const(1.0),
        (Expr::Ln(_), Expr::Exp(inner)) => *inner.clone(),
        _ => func.with_function_argument(arg),
    }
}
