use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RosettaError>;

// Errors from loading samples, checking input ranges and exporting curves.
// The PTF formulas and the curve generator never fail.
#[derive(Error, Debug)]
pub enum RosettaError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse sample library: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("unknown soil sample '{name}'")]
    UnknownSample { name: String },

    #[error("{field} = {value} is out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}
