//! Derivative of the active expression in its two textual forms.
//!
//! Failures to parse or differentiate never reach the caller: they produce a
//! `DerivativeInfo` with both forms absent.

use crate::derivative_tool::pipeline::Expression;
use crate::symbolic::symbolic_display::TexOptions;
use crate::symbolic::symbolic_traits::{NativeEngine, SymbolicEngine};
use log::{debug, warn};
use regex::Regex;
use std::sync::LazyLock;

/// the single free variable of every expression
pub const VARIABLE: &str = "x";

// unit factor after an operator, not the start of a longer number: "*1", "\cdot 1" but not "*12"
static TRAILING_UNIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\*|\\cdot\s*)1([^0-9.]|$)").expect("trailing unit pattern is a valid regex")
});
// unit factor before an operator, not the end of a longer number: "1*" but not "21*"
static LEADING_UNIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(^|[^0-9.])1(?:\*|\\cdot\s*)").expect("leading unit pattern is a valid regex")
});

/// Canonical and typeset forms of a derivative; both present or both absent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DerivativeInfo {
    pub canonical_form: Option<String>,
    pub display_form: Option<String>,
}

impl DerivativeInfo {
    pub fn absent() -> Self {
        DerivativeInfo::default()
    }

    pub fn is_absent(&self) -> bool {
        self.canonical_form.is_none()
    }
}

/// Removes multiplications by a literal 1 (`*1`, `1*` and their `\cdot` spelling).
/// Other literals such as `11` or `21` are left alone.
pub fn strip_unit_factors(tex: &str) -> String {
    // each pattern consumes its neighbour, so adjacent factors ("*1*1") need another pass
    let mut stripped = tex.to_string();
    loop {
        let without_trailing = TRAILING_UNIT.replace_all(&stripped, "${1}");
        let next = LEADING_UNIT.replace_all(&without_trailing, "${1}").into_owned();
        if next == stripped {
            return stripped;
        }
        stripped = next;
    }
}

/// [`resolve_derivative`] against any engine.
pub fn resolve_derivative_with<E: SymbolicEngine>(engine: &E, expr: &Expression) -> DerivativeInfo {
    let tree = match engine.parse(expr.as_str()) {
        Ok(tree) => tree,
        Err(e) => {
            warn!("cannot parse {:?}: {}", expr.as_str(), e);
            return DerivativeInfo::absent();
        }
    };
    let derivative = match engine.derivative(&tree, VARIABLE) {
        Ok(derivative) => derivative,
        Err(e) => {
            warn!("cannot differentiate {:?}: {}", expr.as_str(), e);
            return DerivativeInfo::absent();
        }
    };
    let canonical = engine.to_canonical_string(&derivative);
    let display = strip_unit_factors(&engine.to_display_form(&derivative, TexOptions::default()));
    debug!("d/d{} {} = {} ({})", VARIABLE, expr.as_str(), canonical, display);
    DerivativeInfo {
        canonical_form: Some(canonical),
        display_form: Some(display),
    }
}

/// Parses `expr`, differentiates it with respect to `x` and serializes the result.
pub fn resolve_derivative(expr: &Expression) -> DerivativeInfo {
    resolve_derivative_with(&NativeEngine, expr)
}
