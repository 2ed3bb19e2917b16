//! Text output of expressions.
//!
//! ## Canonical form (`to_string()` / `{}`)
//! Infix notation with spaces around binary operators and only the parentheses that
//! precedence requires:
//! - `2 * x`, `3 * x ^ 2 + 1`, `-1 / x ^ 2`, `x ^ (n - 1)`
//!
//! ## LaTeX (`to_tex(options)`)
//! - `2\cdot x`, `\frac{-1}{{x}^{2}}`, `\sin\left(x\right)`
//!
//! `ParenthesisMode::Auto` brackets only where precedence requires it,
//! `ParenthesisMode::All` brackets every compound operand.
//!
//! Both formats print `-1 * e` as `-e` and integral constants without a fractional part.

use crate::symbolic::symbolic_engine::Expr;
use std::fmt;

/// How the LaTeX output places brackets
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ParenthesisMode {
    /// only where operator precedence requires them
    #[default]
    Auto,
    /// around every compound operand
    All,
}

/// Options of [`Expr::to_tex`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TexOptions {
    pub parenthesis: ParenthesisMode,
}

#[derive(Clone, Copy)]
enum FormatMode {
    Standard,
    Latex(ParenthesisMode),
}

// binding strength of the node at its top level
const PREC_SUM: u8 = 1;
const PREC_PRODUCT: u8 = 2;
const PREC_NEGATION: u8 = 3;
const PREC_POWER: u8 = 4;
const PREC_ATOM: u8 = 5;

/// `-1 * e` is shown as `-e`
fn negated(expr: &Expr) -> Option<&Expr> {
    match expr {
        Expr::Mul(lhs, rhs) if lhs.as_const() == Some(-1.0) => Some(rhs),
        _ => None,
    }
}

fn precedence(expr: &Expr, mode: FormatMode) -> u8 {
    if negated(expr).is_some() {
        return PREC_NEGATION;
    }
    match expr {
        Expr::Add(..) | Expr::Sub(..) => PREC_SUM,
        Expr::Mul(..) => PREC_PRODUCT,
        // \frac{}{} is a closed group
        Expr::Div(..) => match mode {
            FormatMode::Standard => PREC_PRODUCT,
            FormatMode::Latex(_) => PREC_ATOM,
        },
        Expr::Const(val) if *val < 0.0 => PREC_NEGATION,
        Expr::Pow(..) => PREC_POWER,
        _ => PREC_ATOM,
    }
}

fn is_compound(expr: &Expr) -> bool {
    match expr {
        Expr::Var(_) => false,
        Expr::Const(val) => *val < 0.0,
        other => other.function_argument().is_none(),
    }
}

fn format_number(f: &mut fmt::Formatter<'_>, val: f64) -> fmt::Result {
    // avoid "-0"
    if val == 0.0 {
        write!(f, "0")
    } else {
        write!(f, "{}", val)
    }
}

/// writes `expr`, bracketed when `auto_parens` says so in Auto mode or when it is compound in All mode
fn format_operand(
    f: &mut fmt::Formatter<'_>,
    expr: &Expr,
    mode: FormatMode,
    auto_parens: bool,
) -> fmt::Result {
    let parens = match mode {
        FormatMode::Latex(ParenthesisMode::All) => is_compound(expr),
        _ => auto_parens,
    };
    if !parens {
        return format_expr(f, expr, mode);
    }
    match mode {
        FormatMode::Standard => {
            write!(f, "(")?;
            format_expr(f, expr, mode)?;
            write!(f, ")")
        }
        FormatMode::Latex(_) => {
            write!(f, r"\left(")?;
            format_expr(f, expr, mode)?;
            write!(f, r"\right)")
        }
    }
}

fn format_binary(
    f: &mut fmt::Formatter<'_>,
    lhs: &Expr,
    rhs: &Expr,
    mode: FormatMode,
    own: u8,
    symbol: &str,
) -> fmt::Result {
    // left-associative: the right operand needs brackets at equal precedence
    // unless the operator is associative (+ and *)
    let rhs_strict = matches!(symbol, "-" | "/");
    format_operand(f, lhs, mode, precedence(lhs, mode) < own)?;
    match mode {
        FormatMode::Standard => write!(f, " {} ", symbol)?,
        FormatMode::Latex(_) => match symbol {
            "*" => write!(f, r"\cdot ")?,
            other => write!(f, "{}", other)?,
        },
    }
    let rhs_prec = precedence(rhs, mode);
    let rhs_parens = if rhs_strict { rhs_prec <= own } else { rhs_prec < own };
    format_operand(f, rhs, mode, rhs_parens)
}

fn format_function(f: &mut fmt::Formatter<'_>, func: &Expr, arg: &Expr, mode: FormatMode) -> fmt::Result {
    let name = func.function_name().unwrap_or_default();
    match mode {
        FormatMode::Standard => {
            write!(f, "{}(", name)?;
            format_expr(f, arg, mode)?;
            write!(f, ")")
        }
        FormatMode::Latex(_) => {
            if let Expr::sqrt(_) = func {
                write!(f, r"\sqrt{{")?;
                format_expr(f, arg, mode)?;
                return write!(f, "}}");
            }
            write!(f, r"\{}\left(", name)?;
            format_expr(f, arg, mode)?;
            write!(f, r"\right)")
        }
    }
}

fn format_expr(f: &mut fmt::Formatter<'_>, expr: &Expr, mode: FormatMode) -> fmt::Result {
    if let Some(inner) = negated(expr) {
        write!(f, "-")?;
        return format_operand(f, inner, mode, precedence(inner, mode) <= PREC_NEGATION);
    }
    match expr {
        Expr::Var(name) => write!(f, "{}", name),
        Expr::Const(val) => format_number(f, *val),
        Expr::Add(lhs, rhs) => format_binary(f, lhs, rhs, mode, PREC_SUM, "+"),
        Expr::Sub(lhs, rhs) => format_binary(f, lhs, rhs, mode, PREC_SUM, "-"),
        Expr::Mul(lhs, rhs) => format_binary(f, lhs, rhs, mode, PREC_PRODUCT, "*"),
        Expr::Div(lhs, rhs) => match mode {
            FormatMode::Standard => format_binary(f, lhs, rhs, mode, PREC_PRODUCT, "/"),
            FormatMode::Latex(_) => {
                write!(f, r"\frac{{")?;
                format_operand(f, lhs, mode, false)?;
                write!(f, "}}{{")?;
                format_operand(f, rhs, mode, false)?;
                write!(f, "}}")
            }
        },
        Expr::Pow(base, exp) => {
            // right-associative: a ^ b ^ c = a ^ (b ^ c)
            let base_parens = precedence(base, mode) <= PREC_POWER;
            match mode {
                FormatMode::Standard => {
                    format_operand(f, base, mode, base_parens)?;
                    write!(f, " ^ ")?;
                    format_operand(f, exp, mode, precedence(exp, mode) < PREC_NEGATION)
                }
                FormatMode::Latex(_) => {
                    write!(f, "{{")?;
                    format_operand(f, base, mode, base_parens)?;
                    write!(f, "}}^{{")?;
                    format_operand(f, exp, mode, false)?;
                    write!(f, "}}")
                }
            }
        }
        func => match func.function_argument() {
            Some(arg) => format_function(f, func, arg, mode),
            None => Ok(()),
        },
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_expr(f, self, FormatMode::Standard)
    }
}

/// Display adapter writing an expression as LaTeX
pub struct TexFormatter<'expr> {
    expr: &'expr Expr,
    options: TexOptions,
}

impl fmt::Display for TexFormatter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_expr(f, self.expr, FormatMode::Latex(self.options.parenthesis))
    }
}

impl Expr {
    /// LaTeX adapter usable in `format!` without building an intermediate string.
    pub fn tex(&self, options: TexOptions) -> TexFormatter<'_> {
        TexFormatter { expr: self, options }
    }

    /// Typeset form of the expression.
    ///
    /// # Examples
    /// ```
    /// use RustedDerivPlot::symbolic::symbolic_engine::Expr;
    /// use RustedDerivPlot::symbolic::symbolic_display::TexOptions;
    /// let f = Expr::parse_expression("x^2 / 2").unwrap();
    /// assert_eq!(f.to_tex(TexOptions::default()), r"\frac{{x}^{2}}{2}");
    /// ```
    pub fn to_tex(&self, options: TexOptions) -> String {
        self.tex(options).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Expr {
        Expr::var("x")
    }

    fn c(value: f64) -> Expr {
        Expr::Const(value)
    }

    fn auto_tex(expr: &Expr) -> String {
        expr.to_tex(TexOptions::default())
    }

    #[test]
    fn test_display_numbers() {
        assert_eq!(c(2.0).to_string(), "2");
        assert_eq!(c(0.5).to_string(), "0.5");
        assert_eq!(c(-3.0).to_string(), "-3");
        assert_eq!(c(-0.0).to_string(), "0");
    }

    #[test]
    fn test_display_minimal_parentheses() {
        assert_eq!((c(2.0) * x()).to_string(), "2 * x");
        assert_eq!((c(3.0) * x().pow(c(2.0)) + c(1.0)).to_string(), "3 * x ^ 2 + 1");
        assert_eq!(((x() + c(1.0)) * (x() - c(1.0))).to_string(), "(x + 1) * (x - 1)");
        assert_eq!((x() - (Expr::var("y") - Expr::var("z"))).to_string(), "x - (y - z)");
        assert_eq!((x() - Expr::var("y") - Expr::var("z")).to_string(), "x - y - z");
        assert_eq!((x() / (c(2.0) * x())).to_string(), "x / (2 * x)");
        assert_eq!(x().pow(Expr::var("n") - c(1.0)).to_string(), "x ^ (n - 1)");
    }

    #[test]
    fn test_display_powers() {
        assert_eq!(x().pow(c(2.0).pow(c(3.0))).to_string(), "x ^ 2 ^ 3");
        assert_eq!(x().pow(c(2.0)).pow(c(3.0)).to_string(), "(x ^ 2) ^ 3");
        assert_eq!(c(-3.0).pow(x()).to_string(), "(-3) ^ x");
        assert_eq!(x().pow(c(-1.0)).to_string(), "x ^ -1");
    }

    #[test]
    fn test_display_negation_and_functions() {
        assert_eq!((c(-1.0) * Expr::sin(x().boxed())).to_string(), "-sin(x)");
        assert_eq!((c(-1.0) * (x() + c(1.0))).to_string(), "-(x + 1)");
        assert_eq!((c(-1.0) / x().pow(c(2.0))).to_string(), "-1 / x ^ 2");
        assert_eq!(Expr::tg(x().boxed()).to_string(), "tan(x)");
        assert_eq!((c(2.0) * (c(2.0) * x()).exp()).to_string(), "2 * exp(2 * x)");
    }

    #[test]
    fn test_display_round_trips_through_parser() {
        for input in ["3x^2 - 2x + 1", "-1/x^2", "x^x * (ln(x) + 1)", "2^x * ln(2)", "-sin(x)", "x - (y - 2)"] {
            let expr = Expr::parse_expression(input).unwrap();
            let reparsed = Expr::parse_expression(&expr.to_string()).unwrap();
            assert_eq!(expr, reparsed, "{} printed as {}", input, expr);
        }
    }

    #[test]
    fn test_tex_auto() {
        assert_eq!(auto_tex(&(c(2.0) * x())), r"2\cdot x");
        assert_eq!(auto_tex(&(c(-1.0) / x().pow(c(2.0)))), r"\frac{-1}{{x}^{2}}");
        assert_eq!(auto_tex(&Expr::sin(x().boxed())), r"\sin\left(x\right)");
        assert_eq!(auto_tex(&Expr::sqrt(x().boxed())), r"\sqrt{x}");
        assert_eq!(auto_tex(&(x() + c(1.0)).pow(c(2.0))), r"{\left(x+1\right)}^{2}");
        assert_eq!(auto_tex(&(c(2.0) * x() + c(3.0))), r"2\cdot x+3");
        assert_eq!(auto_tex(&(c(-1.0) * Expr::cos(x().boxed()))), r"-\cos\left(x\right)");
    }

    #[test]
    fn test_tex_all_parentheses() {
        let options = TexOptions { parenthesis: ParenthesisMode::All };
        let expr = c(2.0) * x() + c(3.0);
        assert_eq!(expr.to_tex(options), r"\left(2\cdot x\right)+3");
        assert_eq!(x().pow(c(2.0)).to_tex(options), r"{x}^{2}");
    }
}
