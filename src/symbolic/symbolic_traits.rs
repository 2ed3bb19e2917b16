// SYMBOLIC TRAITS //////////////////////////////////////////////////////////////////
// The narrow interface the derivative tool needs from a symbolic math engine.
// The native engine (Expr) implements it below; add other engines here as needed

use crate::symbolic::parse_expr::ParseError;
use crate::symbolic::symbolic_display::TexOptions;
use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::symbolic_engine_derivatives::MathError;
use crate::symbolic::symbolic_lambdify::EvalError;
use std::collections::HashMap;

/// Parse / differentiate / print / evaluate, nothing more.
pub trait SymbolicEngine {
    type Tree: Clone;
    /// text to expression tree
    fn parse(&self, text: &str) -> Result<Self::Tree, ParseError>;
    /// first derivative with respect to `variable`
    fn derivative(&self, tree: &Self::Tree, variable: &str) -> Result<Self::Tree, MathError>;
    /// default string serialization
    fn to_canonical_string(&self, tree: &Self::Tree) -> String;
    /// typeset serialization
    fn to_display_form(&self, tree: &Self::Tree, options: TexOptions) -> String;
    /// numeric value with variables bound by `bindings`
    fn evaluate(&self, tree: &Self::Tree, bindings: &HashMap<String, f64>) -> Result<f64, EvalError>;
}

///////////////// IMPLEMENTATION OF THE TRAIT FOR THE NATIVE ENGINE /////////////////////////
#[derive(Clone, Copy, Debug, Default)]
pub struct NativeEngine;

impl SymbolicEngine for NativeEngine {
    type Tree = Expr;

    fn parse(&self, text: &str) -> Result<Expr, ParseError> {
        Expr::parse_expression(text)
    }
    fn derivative(&self, tree: &Expr, variable: &str) -> Result<Expr, MathError> {
        tree.derivative(variable)
    }
    fn to_canonical_string(&self, tree: &Expr) -> String {
        tree.to_string()
    }
    fn to_display_form(&self, tree: &Expr, options: TexOptions) -> String {
        tree.to_tex(options)
    }
    fn evaluate(&self, tree: &Expr, bindings: &HashMap<String, f64>) -> Result<f64, EvalError> {
        tree.eval_expression(bindings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_engine_round() {
        let engine = NativeEngine;
        let tree = engine.parse("x^2").unwrap();
        let derivative = engine.derivative(&tree, "x").unwrap();
        assert_eq!(engine.to_canonical_string(&derivative), "2 * x");
        assert_eq!(engine.to_display_form(&derivative, TexOptions::default()), r"2\cdot x");
        let bindings = HashMap::from([("x".to_string(), 2.0)]);
        assert_eq!(engine.evaluate(&tree, &bindings), Ok(4.0));
        assert_eq!(engine.evaluate(&derivative, &bindings), Ok(4.0));
    }

    #[test]
    fn test_native_engine_errors() {
        let engine = NativeEngine;
        assert_eq!(engine.parse(""), Err(ParseError::Empty));
        let tree = engine.parse("1/(x-x)").unwrap();
        assert_eq!(engine.derivative(&tree, "x"), Err(MathError::DivisionByZero));
        let tree = engine.parse("y").unwrap();
        assert_eq!(
            engine.evaluate(&tree, &HashMap::new()),
            Err(EvalError::UndefinedVariable("y".to_string()))
        );
    }
}
