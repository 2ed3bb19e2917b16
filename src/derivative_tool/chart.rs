//! Line-chart input: x labels plus one dataset per plotted function.
//!
//! Serializes to the `{ labels, datasets: [{ label, data, fill, borderColor, tension }] }`
//! shape line-chart libraries consume.

use crate::derivative_tool::pipeline::Expression;
use crate::derivative_tool::resolver::DerivativeInfo;
use crate::derivative_tool::sampler::SampleSeries;
use serde::Serialize;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

pub const ORIGINAL_COLOR: &str = "blue";
pub const DERIVATIVE_COLOR: &str = "rgb(75, 192, 192)";
pub const LINE_TENSION: f64 = 0.1;

/// The two plotted functions, in dataset order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum SeriesKind {
    #[strum(to_string = "f(x)")]
    Original,
    #[strum(to_string = "f'(x)")]
    Derivative,
}

impl SeriesKind {
    pub fn default_color(self) -> &'static str {
        match self {
            SeriesKind::Original => ORIGINAL_COLOR,
            SeriesKind::Derivative => DERIVATIVE_COLOR,
        }
    }

    pub fn values(self, series: &SampleSeries) -> &[f64] {
        match self {
            SeriesKind::Original => &series.original_values,
            SeriesKind::Derivative => &series.derivative_values,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    pub fill: bool,
    pub border_color: String,
    pub tension: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<f64>,
    pub datasets: Vec<Dataset>,
}

impl ChartData {
    /// JSON for the page script
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn dataset(&self, kind: SeriesKind) -> Option<&Dataset> {
        self.datasets.get(kind as usize)
    }
}

/// Chart colours per series kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartColors {
    pub original: String,
    pub derivative: String,
}

impl Default for ChartColors {
    fn default() -> Self {
        ChartColors {
            original: SeriesKind::Original.default_color().to_string(),
            derivative: SeriesKind::Derivative.default_color().to_string(),
        }
    }
}

impl ChartColors {
    pub fn color(&self, kind: SeriesKind) -> &str {
        match kind {
            SeriesKind::Original => &self.original,
            SeriesKind::Derivative => &self.derivative,
        }
    }
}

/// [`build_chart_data`] with explicit colours.
pub fn build_chart_data_with_colors(
    expr: &Expression,
    info: &DerivativeInfo,
    series: Option<&SampleSeries>,
    colors: &ChartColors,
) -> Option<ChartData> {
    let series = series?;
    let derivative_label = info.canonical_form.as_deref()?;
    let datasets = SeriesKind::iter()
        .map(|kind| Dataset {
            label: match kind {
                SeriesKind::Original => expr.as_str(),
                SeriesKind::Derivative => derivative_label,
            }
            .to_string(),
            data: kind.values(series).to_vec(),
            fill: false,
            border_color: colors.color(kind).to_string(),
            tension: LINE_TENSION,
        })
        .collect();
    Some(ChartData {
        labels: series.domain.clone(),
        datasets,
    })
}

/// Datasets for the function (labelled with the expression) and its derivative
/// (labelled with the canonical derivative). Absent without samples or without a derivative.
pub fn build_chart_data(
    expr: &Expression,
    info: &DerivativeInfo,
    series: Option<&SampleSeries>,
) -> Option<ChartData> {
    build_chart_data_with_colors(expr, info, series, &ChartColors::default())
}
