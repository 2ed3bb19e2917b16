//! Active expression and everything derived from it.
//!
//! `submit -> validate -> (if ok) new expression -> recompute derivative and samples`.
//! A `ToolState` is never mutated: each accepted submission produces a new one.

use crate::derivative_tool::chart::{ChartData, build_chart_data};
use crate::derivative_tool::form::FormSubmission;
use crate::derivative_tool::resolver::{DerivativeInfo, resolve_derivative};
use crate::derivative_tool::sampler::{SampleSeries, sample};
use crate::derivative_tool::validator::validate;
use log::{info, warn};
use std::fmt;

/// expression shown before the first submission
pub const DEFAULT_EXPRESSION: &str = "x";

/// User formula in the single variable `x`, lower-cased on creation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Expression(String);

impl Expression {
    pub fn new(raw: &str) -> Self {
        Expression(raw.to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Expression {
    fn default() -> Self {
        Expression::new(DEFAULT_EXPRESSION)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The active expression with its derivative, its samples and the last validation message
#[derive(Debug, Clone, PartialEq)]
pub struct ToolState {
    expression: Expression,
    derivative: DerivativeInfo,
    series: Option<SampleSeries>,
    message: String,
}

impl ToolState {
    /// Computes derivative and samples of `expression`.
    pub fn new(expression: Expression) -> Self {
        let derivative = resolve_derivative(&expression);
        let series = sample(&expression);
        info!(
            "active expression {:?}: derivative {}, series {}",
            expression.as_str(),
            derivative.canonical_form.as_deref().unwrap_or("absent"),
            if series.is_some() { "sampled" } else { "absent" }
        );
        ToolState {
            expression,
            derivative,
            series,
            message: String::new(),
        }
    }

    pub fn expression(&self) -> &Expression {
        &self.expression
    }

    pub fn derivative(&self) -> &DerivativeInfo {
        &self.derivative
    }

    pub fn series(&self) -> Option<&SampleSeries> {
        self.series.as_ref()
    }

    /// validation message of the last submission, empty when it was accepted
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Handles a form submission.
    ///
    /// A rejected submission keeps the current expression, derivative and samples
    /// and only sets the message; an accepted one replaces the whole state.
    pub fn on_submit(&self, submission: &FormSubmission) -> ToolState {
        let validation = validate(&submission.expression);
        if !validation.ok {
            warn!("submission {:?} rejected, keeping {:?}", submission.expression, self.expression.as_str());
            return ToolState {
                message: validation.message,
                ..self.clone()
            };
        }
        ToolState::new(Expression::new(&submission.expression))
    }

    /// chart input, absent when there is no derivative or no series
    pub fn chart_data(&self) -> Option<ChartData> {
        build_chart_data(&self.expression, &self.derivative, self.series.as_ref())
    }
}

impl Default for ToolState {
    fn default() -> Self {
        ToolState::new(Expression::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// well-formed expressions over x and the digits 1..9, fully bracketed
    fn valid_expression() -> impl Strategy<Value = String> {
        let leaf = prop_oneof![Just("x".to_string()), (1u32..10).prop_map(|n| n.to_string())];
        leaf.prop_recursive(4, 24, 2, |inner| {
            (inner.clone(), proptest::sample::select(vec!["+", "-", "*", "/", "^"]), inner)
                .prop_map(|(lhs, op, rhs)| format!("({}){}({})", lhs, op, rhs))
        })
    }

    proptest! {
        #[test]
        fn derived_values_are_deterministic(raw in valid_expression()) {
            let expr = Expression::new(&raw);
            let info = resolve_derivative(&expr);
            prop_assert_eq!(&info, &resolve_derivative(&expr));
            prop_assert_eq!(info.canonical_form.is_some(), info.display_form.is_some());
            prop_assert_eq!(sample(&expr), sample(&expr));
            let state = ToolState::default().on_submit(&FormSubmission::new(&raw));
            prop_assert!(state.message().is_empty());
            prop_assert_eq!(state.derivative(), &info);
        }
    }

    #[test]
    fn test_expression_is_lower_cased() {
        assert_eq!(Expression::new("2X^2").as_str(), "2x^2");
        assert_eq!(Expression::new(" X ").to_string(), " x ");
    }

    #[test]
    fn test_default_state() {
        let state = ToolState::default();
        assert_eq!(state.expression().as_str(), "x");
        assert_eq!(state.derivative().canonical_form.as_deref(), Some("1"));
        assert_eq!(state.series().map(SampleSeries::len), Some(41));
        assert!(state.message().is_empty());
    }

    #[test]
    fn test_accepted_submission_replaces_state() {
        let state = ToolState::default();
        let next = state.on_submit(&FormSubmission::new("x^2"));
        assert_eq!(next.expression().as_str(), "x^2");
        assert_eq!(next.derivative().canonical_form.as_deref(), Some("2 * x"));
        assert!(next.series().is_some());
        assert!(next.message().is_empty());
        // the previous state is untouched
        assert_eq!(state.expression().as_str(), "x");
    }

    #[test]
    fn test_rejected_submission_keeps_previous_expression() {
        let state = ToolState::default().on_submit(&FormSubmission::new("2x^2"));
        let next = state.on_submit(&FormSubmission::new("sin(x)"));
        assert!(!next.message().is_empty());
        assert_eq!(next.expression(), state.expression());
        assert_eq!(next.derivative(), state.derivative());
        assert_eq!(next.series(), state.series());
        assert!(next.chart_data().is_some());
    }

    #[test]
    fn test_message_cleared_by_next_accepted_submission() {
        let rejected = ToolState::default().on_submit(&FormSubmission::new(""));
        assert!(!rejected.message().is_empty());
        let accepted = rejected.on_submit(&FormSubmission::new("x + 1"));
        assert!(accepted.message().is_empty());
    }

    #[test]
    fn test_valid_characters_but_malformed_expression() {
        let next = ToolState::default().on_submit(&FormSubmission::new("x + * 2"));
        assert!(next.message().is_empty());
        assert_eq!(next.expression().as_str(), "x + * 2");
        assert!(next.derivative().is_absent());
        assert!(next.series().is_none());
        assert!(next.chart_data().is_none());
    }

    #[test]
    fn test_pole_keeps_derivative_but_drops_chart() {
        let next = ToolState::default().on_submit(&FormSubmission::new("1/x"));
        assert_eq!(next.derivative().canonical_form.as_deref(), Some("-1 / x ^ 2"));
        assert!(next.series().is_none());
        assert!(next.chart_data().is_none());
    }
}
