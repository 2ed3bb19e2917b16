//! Function and derivative values on the fixed plotting grid.
//!
//! Sampling is all-or-nothing: one failed evaluation anywhere on the grid discards
//! the whole series.

use crate::derivative_tool::pipeline::Expression;
use crate::derivative_tool::resolver::VARIABLE;
use crate::symbolic::symbolic_lambdify::EvalError;
use crate::symbolic::symbolic_traits::{NativeEngine, SymbolicEngine};
use crate::symbolic::utils::stepped_range;
use itertools::Itertools;
use log::{debug, warn};
use std::collections::HashMap;

pub const DOMAIN_START: f64 = -10.0;
pub const DOMAIN_END: f64 = 10.0;
pub const DOMAIN_STEP: f64 = 0.5;

/// Grid points with the values of the function and of its derivative at each of them
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSeries {
    pub domain: Vec<f64>,
    pub original_values: Vec<f64>,
    pub derivative_values: Vec<f64>,
}

impl SampleSeries {
    pub fn len(&self) -> usize {
        self.domain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domain.is_empty()
    }

    /// (x, f(x), f'(x)) rows in domain order
    pub fn rows(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.domain
            .iter()
            .zip(self.original_values.iter())
            .zip(self.derivative_values.iter())
            .map(|((&x, &y), &dy)| (x, y, dy))
    }
}

/// [-10, 10] with step 0.5, both ends included: 41 points
pub fn sample_domain() -> Vec<f64> {
    stepped_range(DOMAIN_START, DOMAIN_END, DOMAIN_STEP)
}

/// [`sample`] against any engine.
pub fn sample_with<E: SymbolicEngine>(engine: &E, expr: &Expression) -> Option<SampleSeries> {
    let tree = match engine.parse(expr.as_str()) {
        Ok(tree) => tree,
        Err(e) => {
            warn!("no samples for {:?}: {}", expr.as_str(), e);
            return None;
        }
    };
    let derivative = match engine.derivative(&tree, VARIABLE) {
        Ok(derivative) => derivative,
        Err(e) => {
            warn!("no samples for {:?}: {}", expr.as_str(), e);
            return None;
        }
    };
    let domain = sample_domain();
    let mut bindings: HashMap<String, f64> = HashMap::with_capacity(1);
    let evaluated: Result<Vec<(f64, f64)>, EvalError> = domain
        .iter()
        .map(|&x| {
            bindings.insert(VARIABLE.to_string(), x);
            let y = engine.evaluate(&tree, &bindings)?;
            let dy = engine.evaluate(&derivative, &bindings)?;
            Ok((y, dy))
        })
        .collect();
    let values = match evaluated {
        Ok(values) => values,
        Err(e) => {
            warn!("discarding samples of {:?}: {}", expr.as_str(), e);
            return None;
        }
    };
    let (original_values, derivative_values): (Vec<f64>, Vec<f64>) = values.into_iter().unzip();
    if let Some((min, max)) = original_values.iter().copied().minmax().into_option() {
        debug!("sampled {:?} at {} points, f in [{}, {}]", expr.as_str(), domain.len(), min, max);
    }
    Some(SampleSeries {
        domain,
        original_values,
        derivative_values,
    })
}

/// Evaluates the expression and its derivative at every grid point; `None` if any evaluation fails.
pub fn sample(expr: &Expression) -> Option<SampleSeries> {
    sample_with(&NativeEngine, expr)
}
