/// a module turns a String expression into a symbolic expression
///
///# Example
/// ```
/// use RustedDerivPlot::symbolic::parse_expr::parse_expression_func;
/// let parsed = parse_expression_func("2x^2 + sin(x)").unwrap();
/// println!("parsed expression {}", parsed);
///  ```
/// ________________________________________________________________________________________________________________________________
pub mod parse_expr;
///____________________________________________________________________________________________________________________________
/// # Symbolic engine
/// a module
/// 1) turns a String expression into a symbolic expression
/// 2) differentiates it and simplifies the result
/// 3) turns a symbolic expression into a Rust closure
/// 4) turns a symbolic expression into a string or LaTeX for printing and control results
///# Example#
/// ```
/// use RustedDerivPlot::symbolic::symbolic_engine::Expr;
/// use RustedDerivPlot::symbolic::symbolic_display::TexOptions;
/// let input = "x^3 + exp(2x)";
/// let f = Expr::parse_expression(input).unwrap();
/// // differentiate with respect to x
/// let df_dx = f.derivative("x").unwrap();
/// assert_eq!(df_dx.to_string(), "3 * x ^ 2 + 2 * exp(2 * x)");
/// println!("LaTeX: {}", df_dx.to_tex(TexOptions::default()));
/// // convert the derivative to a Rust closure and evaluate it
/// let df = df_dx.lambdify1D("x");
/// assert_eq!(df(0.0), Ok(2.0));
/// ```
/// ________________________________________________________________________________________________________________________________________________
pub mod symbolic_engine;
pub mod symbolic_engine_derivatives;
/// canonical string and LaTeX output
pub mod symbolic_display;
/// numerical evaluation: one-shot with bindings or compiled into closures
pub mod symbolic_lambdify;
pub mod symbolic_simplify;
/// the interface the derivative tool expects from a symbolic engine
pub mod symbolic_traits;
///______________________________________________________________________________________________________________________________________________
/// the collection of utility functions mainly for bracket parsing and grid generation
/// _____________________________________________________________________________________________________________________________________________
pub mod utils;
