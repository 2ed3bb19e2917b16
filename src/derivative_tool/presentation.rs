//! What the page shows for a `ToolState`, and the page itself.
//!
//! The view hands the derivative and chart data over unchanged, with one exception:
//! a derivative whose display form is exactly `0` is not shown.

use crate::derivative_tool::chart::{ChartData, build_chart_data_with_colors};
use crate::derivative_tool::config::ToolConfig;
use crate::derivative_tool::form::EXPRESSION_FIELD;
use crate::derivative_tool::pipeline::ToolState;
use log::debug;
use std::fmt::{self, Write};

const KATEX_CSS: &str = "https://cdn.jsdelivr.net/npm/katex@0.16.11/dist/katex.min.css";
const KATEX_JS: &str = "https://cdn.jsdelivr.net/npm/katex@0.16.11/dist/katex.min.js";
const KATEX_AUTO_RENDER_JS: &str =
    "https://cdn.jsdelivr.net/npm/katex@0.16.11/dist/contrib/auto-render.min.js";
const CHART_JS: &str = "https://cdn.jsdelivr.net/npm/chart.js@4.4.4/dist/chart.umd.min.js";

/// hint printed under the input field
pub const FORMAT_HINT: &str = "Format: 2x^2";

#[derive(Debug)]
pub enum RenderError {
    Json(serde_json::Error),
    Io(std::io::Error),
    /// the plotting backend failed
    Plot(String),
    Fmt(fmt::Error),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RenderError::Json(e) => write!(f, "Cannot serialize chart data: {}", e),
            RenderError::Io(e) => write!(f, "Cannot write output: {}", e),
            RenderError::Plot(msg) => write!(f, "Cannot draw chart: {}", msg),
            RenderError::Fmt(e) => write!(f, "Cannot format page: {}", e),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<serde_json::Error> for RenderError {
    fn from(e: serde_json::Error) -> Self {
        RenderError::Json(e)
    }
}

impl From<std::io::Error> for RenderError {
    fn from(e: std::io::Error) -> Self {
        RenderError::Io(e)
    }
}

impl From<fmt::Error> for RenderError {
    fn from(e: fmt::Error) -> Self {
        RenderError::Fmt(e)
    }
}

/// Wraps a math string so the page's typesetting script picks it up
pub trait Typesetter {
    fn typeset(&self, math: &str) -> String;
}

/// KaTeX inline delimiters `\( ... \)`
#[derive(Debug, Clone, Copy, Default)]
pub struct KatexInline;

impl Typesetter for KatexInline {
    fn typeset(&self, math: &str) -> String {
        format!(r"\({}\)", math)
    }
}

/// Everything the page displays
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub title: String,
    pub message: String,
    /// the active expression, typeset
    pub function_tex: Option<String>,
    /// the derivative, typeset; absent when unknown or exactly zero
    pub derivative_tex: Option<String>,
    pub chart: Option<ChartData>,
}

impl PageView {
    pub fn from_state<T: Typesetter>(state: &ToolState, config: &ToolConfig, typesetter: &T) -> Self {
        let expression = state.expression().as_str();
        let function_tex = (!expression.trim().is_empty()).then(|| typesetter.typeset(expression));
        let derivative_tex = state
            .derivative()
            .display_form
            .as_deref()
            .filter(|display| *display != "0")
            .map(|display| typesetter.typeset(display));
        let chart = build_chart_data_with_colors(
            state.expression(),
            state.derivative(),
            state.series(),
            &config.chart_colors(),
        );
        debug!(
            "page view: derivative shown {}, chart shown {}",
            derivative_tex.is_some(),
            chart.is_some()
        );
        PageView {
            title: config.page_title.clone(),
            message: state.message().to_string(),
            function_tex,
            derivative_tex,
            chart,
        }
    }
}

fn escape_html(text: &str) -> String {
    v_htmlescape::escape(text).to_string()
}

/// Full HTML page: the form, both formulas and the line chart.
pub fn render_html(view: &PageView) -> Result<String, RenderError> {
    let mut html = String::new();
    let title = escape_html(&view.title);
    writeln!(html, "<!DOCTYPE html>")?;
    writeln!(html, "<html lang=\"en\">")?;
    writeln!(html, "<head>")?;
    writeln!(html, "<meta charset=\"utf-8\">")?;
    writeln!(html, "<title>{}</title>", title)?;
    writeln!(html, "<link rel=\"stylesheet\" href=\"{}\">", KATEX_CSS)?;
    writeln!(html, "<script defer src=\"{}\"></script>", KATEX_JS)?;
    writeln!(
        html,
        "<script defer src=\"{}\" onload=\"renderMathInElement(document.body)\"></script>",
        KATEX_AUTO_RENDER_JS
    )?;
    writeln!(html, "<script src=\"{}\"></script>", CHART_JS)?;
    writeln!(html, "</head>")?;
    writeln!(html, "<body>")?;
    writeln!(html, "<main>")?;
    writeln!(html, "<h1>{}</h1>", title)?;
    writeln!(html, "<section>")?;
    writeln!(html, "<form method=\"post\">")?;
    writeln!(html, "<h2><label for=\"{0}\">Function</label></h2>", EXPRESSION_FIELD)?;
    writeln!(
        html,
        "<input type=\"text\" name=\"{0}\" id=\"{0}\"><button>Differentiate</button>",
        EXPRESSION_FIELD
    )?;
    writeln!(html, "<p><em>{}</em></p>", escape_html(FORMAT_HINT))?;
    if !view.message.is_empty() {
        writeln!(html, "<p class=\"error\">{}</p>", escape_html(&view.message))?;
    }
    writeln!(html, "</form>")?;
    writeln!(html, "</section>")?;
    writeln!(html, "<section>")?;
    writeln!(html, "<h2>Results</h2>")?;
    writeln!(html, "<h3>Function</h3>")?;
    if let Some(tex) = &view.function_tex {
        writeln!(html, "<p class=\"function\">{}</p>", escape_html(tex))?;
    }
    writeln!(html, "<h3>Derivative</h3>")?;
    if let Some(tex) = &view.derivative_tex {
        writeln!(html, "<p class=\"derivative\">{}</p>", escape_html(tex))?;
    }
    writeln!(html, "<h2>Plot</h2>")?;
    if let Some(chart) = &view.chart {
        // "</" would close the script element early
        let json = chart.to_json()?.replace("</", "<\\/");
        writeln!(html, "<canvas id=\"chart\"></canvas>")?;
        writeln!(html, "<script>")?;
        writeln!(
            html,
            "new Chart(document.getElementById(\"chart\"), {{ type: \"line\", data: {} }});",
            json
        )?;
        writeln!(html, "</script>")?;
    }
    writeln!(html, "</section>")?;
    writeln!(html, "</main>")?;
    writeln!(html, "</body>")?;
    writeln!(html, "</html>")?;
    Ok(html)
}
