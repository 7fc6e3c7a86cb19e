//! Crate-level error type and `Result` alias for stable, structured error handling.
//! Converts underlying I/O, JSON, TIFF, and JPEG errors, and provides semantic variants
//! for variable selection, band shape/coordinate validation, and encoder limits.
use thiserror::Error;

use crate::types::Axis;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TIFF error: {0}")]
    Tiff(#[from] tiff::TiffError),

    #[error("JPEG encoding error: {0}")]
    Jpeg(#[from] jpeg_encoder::EncodingError),

    #[error("The number of data variables provided must be 3, got: {count}")]
    InvalidVariableCount { count: usize },

    #[error("Variable '{name}' not found in dataset. Available: {available}")]
    MissingVariable { name: String, available: String },

    #[error("Band shapes differ: {band} is {got:?}, expected {expected:?}")]
    ShapeMismatch {
        band: String,
        expected: (usize, usize),
        got: (usize, usize),
    },

    #[error("Coordinate '{axis}' has {got} ticks but the band spans {expected} along it")]
    CoordinateLength { axis: Axis, expected: usize, got: usize },

    #[error("Band {band} is not aligned with the red band along '{axis}'")]
    MisalignedCoordinates { band: String, axis: Axis },

    #[error("Variable '{name}' has ragged rows: row {row} has {got} values, expected {expected}")]
    RaggedRows {
        name: String,
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("Image of {width}x{height} exceeds the {limit}px limit of the {format} encoder")]
    ImageTooLarge {
        width: usize,
        height: usize,
        limit: usize,
        format: &'static str,
    },

    #[error("Unsupported TIFF sample format in {path}")]
    UnsupportedSampleFormat { path: String },

    #[error("Cannot encode an empty {width}x{height} image")]
    EmptyImage { width: usize, height: usize },

    #[error("Processing error: {0}")]
    Processing(String),
}
