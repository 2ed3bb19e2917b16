//! Expression-to-chart pipeline of the derivative calculator
///
///# Example
/// ```
/// use RustedDerivPlot::derivative_tool::form::FormSubmission;
/// use RustedDerivPlot::derivative_tool::pipeline::ToolState;
/// // the page starts with f(x) = x
/// let state = ToolState::default();
/// // submit a new function
/// let state = state.on_submit(&FormSubmission::new("2x^2"));
/// assert_eq!(state.derivative().canonical_form.as_deref(), Some("4 * x"));
/// let chart = state.chart_data().unwrap();
/// assert_eq!(chart.labels.len(), 41);
/// // a rejected submission keeps the chart and only sets a message
/// let state = state.on_submit(&FormSubmission::new("sin(x)"));
/// assert!(!state.message().is_empty());
/// assert!(state.chart_data().is_some());
/// ```
pub mod pipeline;
/// allowed-character check of raw input
pub mod validator;
/// derivative in canonical and typeset form
pub mod resolver;
/// values on the fixed grid [-10, 10] step 0.5
pub mod sampler;
/// urlencoded form body
pub mod form;
/// line-chart datasets
pub mod chart;
/// page view and HTML rendering
pub mod presentation;
/// TOML settings
pub mod config;
