use crate::derivative_tool::sampler::SampleSeries;
use chrono::Local;
use csv::Writer;
use log::info;
use simplelog::*;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

/// timestamped log file name, e.g. log_2024-05-01_12-00-00.txt
pub fn default_log_file_name() -> PathBuf {
    let date_and_time = Local::now().format("%Y-%m-%d_%H-%M-%S");
    PathBuf::from(format!("log_{}.txt", date_and_time))
}

/// Terminal logger, plus a file logger when `log_file` is given.
/// Returns false if a logger was already installed; the existing one stays active.
pub fn init_logger(level: LevelFilter, log_file: Option<&Path>) -> io::Result<bool> {
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    if let Some(path) = log_file {
        loggers.push(WriteLogger::new(level, Config::default(), File::create(path)?));
    }
    Ok(CombinedLogger::init(loggers).is_ok())
}

/// Writes the series as `x,f(x),f'(x)` rows under a header naming the functions.
pub fn save_series_to_csv(
    series: &SampleSeries,
    function_label: &str,
    derivative_label: &str,
    filename: &Path,
) -> Result<(), csv::Error> {
    let file = File::create(filename)?;
    let mut writer = Writer::from_writer(file);
    // Prepare and write headers
    writer.write_record(["x", function_label, derivative_label])?;
    // Write data rows
    for (x, y, dy) in series.rows() {
        writer.write_record([x.to_string(), y.to_string(), dy.to_string()])?;
    }
    writer.flush()?;
    info!("{} samples saved to {:?}", series.len(), filename);
    Ok(())
}
