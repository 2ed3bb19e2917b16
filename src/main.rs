#![allow(non_snake_case)]
use RustedDerivPlot::Utils::logger::{init_logger, save_series_to_csv};
use RustedDerivPlot::Utils::plots::save_chart_svg;
use RustedDerivPlot::Utils::series_table::series_table;
use RustedDerivPlot::derivative_tool::config::ToolConfig;
use RustedDerivPlot::derivative_tool::form::FormSubmission;
use RustedDerivPlot::derivative_tool::pipeline::ToolState;
use RustedDerivPlot::derivative_tool::presentation::{KatexInline, PageView, render_html};
use log::{error, info, warn};
use std::env;
use std::fs;
use std::path::PathBuf;

// expressions rendered when none are given on the command line
const DEMO_EXPRESSIONS: [&str; 6] = ["x", "2x^2", "x^3 - 4x + 1", "(x+1)/(x^2+1)", "1/x", "5"];

/// usage: RustedDerivPlot [--config settings.toml] [--out dir] [expression ...]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut config_path: Option<PathBuf> = None;
    let mut out_dir = PathBuf::from("derivplot_output");
    let mut expressions: Vec<String> = Vec::new();
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => config_path = args.next().map(PathBuf::from),
            "--out" => {
                if let Some(dir) = args.next() {
                    out_dir = PathBuf::from(dir);
                }
            }
            _ => expressions.push(arg),
        }
    }
    if expressions.is_empty() {
        expressions = DEMO_EXPRESSIONS.iter().map(|s| s.to_string()).collect();
    }

    let config = match &config_path {
        Some(path) => ToolConfig::from_file(path)?,
        None => ToolConfig::default(),
    };
    init_logger(config.level_filter()?, config.log_file.as_deref())?;
    fs::create_dir_all(&out_dir)?;
    info!("writing pages to {:?}", out_dir);

    let mut state = ToolState::default();
    for (i, raw) in expressions.iter().enumerate() {
        state = state.on_submit(&FormSubmission::new(raw));
        if !state.message().is_empty() {
            warn!("{:?}: {}", raw, state.message());
        }
        println!(
            "f(x) = {}    f'(x) = {}",
            state.expression(),
            state.derivative().canonical_form.as_deref().unwrap_or("-")
        );

        let view = PageView::from_state(&state, &config, &KatexInline);
        let page_path = out_dir.join(format!("page_{}.html", i));
        fs::write(&page_path, render_html(&view)?)?;

        if let Some(chart) = &view.chart {
            let svg_path = out_dir.join(format!("chart_{}.svg", i));
            if let Err(e) = save_chart_svg(chart, (config.chart_width, config.chart_height), &svg_path) {
                error!("chart of {:?} not drawn: {}", raw, e);
            }
        }
        if let Some(series) = state.series() {
            let csv_path = out_dir.join(format!("samples_{}.csv", i));
            let derivative_label = state.derivative().canonical_form.as_deref().unwrap_or("");
            save_series_to_csv(series, state.expression().as_str(), derivative_label, &csv_path)?;
            println!("{}", series_table(series));
        }
    }
    Ok(())
}
