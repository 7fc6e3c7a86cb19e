use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::OutputFormat;

/// Constants of the logistic contrast curve applied to each band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeParams {
    /// Lower bound of the linear rescale
    pub min_val: f64,
    /// Steepness of the sigmoid
    pub steepness: f64,
    /// Midpoint of the sigmoid as a fraction of the linear range
    pub threshold: f64,
}

impl Default for NormalizeParams {
    fn default() -> Self {
        Self {
            min_val: 0.0,
            steepness: 25.0,
            threshold: 0.11,
        }
    }
}

/// Parameters of a single `combine_bands` call
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositeParams {
    /// Factor applied to each band maximum before normalization
    pub gamma: f64,
    pub normalize: NormalizeParams,
    /// Reject green/blue bands whose ticks differ from the red band
    pub strict_alignment: bool,
}

impl Default for CompositeParams {
    fn default() -> Self {
        Self {
            gamma: 0.8,
            normalize: NormalizeParams::default(),
            strict_alignment: false,
        }
    }
}

impl CompositeParams {
    pub fn with_gamma(gamma: f64) -> Self {
        Self {
            gamma,
            ..Self::default()
        }
    }
}

pub fn default_variables() -> Vec<String> {
    vec!["red".to_string(), "green".to_string(), "blue".to_string()]
}

/// Rendering parameters suitable for config files and batch runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderParams {
    pub format: OutputFormat,
    /// Dataset variables mapped to R, G and B, in that order
    pub variables: Vec<String>,
    pub composite: CompositeParams,
    /// Write a world file next to the image
    pub world_file: bool,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            format: OutputFormat::TIFF,
            variables: default_variables(),
            composite: CompositeParams::default(),
            world_file: false,
        }
    }
}

impl RenderParams {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}
