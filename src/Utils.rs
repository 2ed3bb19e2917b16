//! different utility modules used throughout the project
/// tiny module to set up logging and save sampled values into csv
pub mod logger;
/// tiny module to draw the chart of a function and its derivative into svg
pub mod plots;
/// pretty-printing of sampled values with tabled
pub mod series_table;
