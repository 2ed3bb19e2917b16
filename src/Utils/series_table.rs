/*
Pretty printing of sampled values as a table, handy to eyeball a series in the terminal.
*/
use crate::derivative_tool::sampler::SampleSeries;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Debug, PartialEq, Tabled)]
pub struct SampleRow {
    x: f64,
    #[tabled(rename = "f(x)")]
    value: String,
    #[tabled(rename = "f'(x)")]
    derivative: String,
}

fn format_value(value: f64) -> String {
    format!("{:.6}", value)
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

pub fn series_rows(series: &SampleSeries) -> Vec<SampleRow> {
    series
        .rows()
        .map(|(x, y, dy)| SampleRow {
            x,
            value: format_value(y),
            derivative: format_value(dy),
        })
        .collect()
}

/// Table of (x, f(x), f'(x)) with rounded corners
pub fn series_table(series: &SampleSeries) -> String {
    let mut table = Table::new(series_rows(series));
    table.with(Style::modern_rounded());
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derivative_tool::pipeline::Expression;
    use crate::derivative_tool::sampler::sample;

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(100.0), "100");
        assert_eq!(format_value(-0.5), "-0.5");
        assert_eq!(format_value(1.0 / 3.0), "0.333333");
    }

    #[test]
    fn test_series_table() {
        let series = sample(&Expression::new("x^2")).unwrap();
        let rows = series_rows(&series);
        assert_eq!(rows.len(), 41);
        assert_eq!(rows[0].value, "100");
        assert_eq!(rows[0].derivative, "-20");
        let table = series_table(&series);
        assert!(table.contains("f(x)"));
        assert!(table.contains("f'(x)"));
        assert!(table.contains("-20"));
    }
}
