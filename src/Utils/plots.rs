use crate::derivative_tool::chart::ChartData;
use crate::derivative_tool::presentation::RenderError;
use itertools::Itertools;
use log::info;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

static RGB_FUNCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^rgb\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*\)$")
        .expect("rgb() pattern is a valid regex")
});

/// CSS colour as used in the chart datasets: a few names, `rgb(r, g, b)` or `#rrggbb`
pub fn parse_color(css: &str) -> Option<RGBColor> {
    let css = css.trim().to_lowercase();
    let named = match css.as_str() {
        "black" => Some(BLACK),
        "white" => Some(WHITE),
        "red" => Some(RED),
        "green" => Some(GREEN),
        "blue" => Some(BLUE),
        "cyan" => Some(CYAN),
        "magenta" => Some(MAGENTA),
        "yellow" => Some(YELLOW),
        _ => None,
    };
    if named.is_some() {
        return named;
    }
    if let Some(caps) = RGB_FUNCTION.captures(&css) {
        let channel = |i: usize| caps[i].parse::<u8>().ok();
        return Some(RGBColor(channel(1)?, channel(2)?, channel(3)?));
    }
    let hex = css.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(RGBColor(channel(0)?, channel(2)?, channel(4)?))
}

fn plot_error<E: std::error::Error + Send + Sync>(e: DrawingAreaErrorKind<E>) -> RenderError {
    RenderError::Plot(e.to_string())
}

/// Draws every dataset of `chart` as a line over its labels into an SVG document.
pub fn render_chart_svg(chart: &ChartData, size: (u32, u32)) -> Result<String, RenderError> {
    let (x_min, x_max) = match (chart.labels.first(), chart.labels.last()) {
        (Some(first), Some(last)) if first < last => (*first, *last),
        _ => return Err(RenderError::Plot("chart needs at least two x labels".to_string())),
    };
    let (y_min, y_max) = chart
        .datasets
        .iter()
        .flat_map(|dataset| dataset.data.iter().copied())
        .minmax()
        .into_option()
        .ok_or_else(|| RenderError::Plot("chart has no data".to_string()))?;
    let pad = if y_max > y_min { 0.05 * (y_max - y_min) } else { 1.0 };

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
        root.fill(&WHITE).map_err(plot_error)?;
        let mut ctx = ChartBuilder::on(&root)
            .margin(10)
            .x_label_area_size(30)
            .y_label_area_size(50)
            .build_cartesian_2d(x_min..x_max, (y_min - pad)..(y_max + pad))
            .map_err(plot_error)?;
        ctx.configure_mesh().x_desc("x").draw().map_err(plot_error)?;

        for (i, dataset) in chart.datasets.iter().enumerate() {
            let color = parse_color(&dataset.border_color)
                .map(|c| c.mix(1.0))
                .unwrap_or_else(|| Palette99::pick(i).mix(1.0));
            let points: Vec<(f64, f64)> = chart
                .labels
                .iter()
                .copied()
                .zip(dataset.data.iter().copied())
                .collect();
            ctx.draw_series(LineSeries::new(points, color.stroke_width(2)))
                .map_err(plot_error)?
                .label(dataset.label.clone())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
        }

        ctx.configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(plot_error)?;
        root.present().map_err(plot_error)?;
    }
    Ok(svg)
}

/// [`render_chart_svg`] written to `path`.
pub fn save_chart_svg(chart: &ChartData, size: (u32, u32), path: &Path) -> Result<(), RenderError> {
    let svg = render_chart_svg(chart, size)?;
    fs::write(path, svg)?;
    info!("chart saved to {:?}", path);
    Ok(())
}
