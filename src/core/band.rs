//! Labeled raster containers: a `Band` is a 2-D sample grid with `x`/`y` tick
//! vectors, and a `Dataset` is a set of named bands sharing those ticks.
use std::collections::BTreeMap;

use ndarray::Array2;

use crate::error::{Error, Result};
use crate::types::Axis;

/// A single 2-D band. Rows follow `y`, columns follow `x`; NaN marks missing samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Band {
    data: Array2<f64>,
    x: Vec<f64>,
    y: Vec<f64>,
}

impl Band {
    pub fn new(data: Array2<f64>, x: Vec<f64>, y: Vec<f64>) -> Result<Self> {
        let (rows, cols) = data.dim();
        if x.len() != cols {
            return Err(Error::CoordinateLength {
                axis: Axis::X,
                expected: cols,
                got: x.len(),
            });
        }
        if y.len() != rows {
            return Err(Error::CoordinateLength {
                axis: Axis::Y,
                expected: rows,
                got: y.len(),
            });
        }
        Ok(Self { data, x, y })
    }

    /// Band with pixel-index ticks (0, 1, 2, ...) on both axes
    pub fn from_pixels(data: Array2<f64>) -> Self {
        let (rows, cols) = data.dim();
        Self {
            data,
            x: (0..cols).map(|c| c as f64).collect(),
            y: (0..rows).map(|r| r as f64).collect(),
        }
    }

    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// (rows, cols)
    pub fn dim(&self) -> (usize, usize) {
        self.data.dim()
    }

    pub fn coords(&self, axis: Axis) -> &[f64] {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
        }
    }
}

/// Named bands over a shared `x`/`y` grid, plus free-form string attributes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    x: Vec<f64>,
    y: Vec<f64>,
    variables: BTreeMap<String, Array2<f64>>,
    pub attrs: BTreeMap<String, String>,
}

impl Dataset {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Self {
        Self {
            x,
            y,
            variables: BTreeMap::new(),
            attrs: BTreeMap::new(),
        }
    }

    /// Insert or replace a variable; its shape must be `(len(y), len(x))`.
    pub fn insert(&mut self, name: impl Into<String>, data: Array2<f64>) -> Result<()> {
        let (rows, cols) = data.dim();
        if cols != self.x.len() {
            return Err(Error::CoordinateLength {
                axis: Axis::X,
                expected: cols,
                got: self.x.len(),
            });
        }
        if rows != self.y.len() {
            return Err(Error::CoordinateLength {
                axis: Axis::Y,
                expected: rows,
                got: self.y.len(),
            });
        }
        self.variables.insert(name.into(), data);
        Ok(())
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn variable_names(&self) -> impl Iterator<Item = &str> {
        self.variables.keys().map(String::as_str)
    }

    pub fn variable(&self, name: &str) -> Option<&Array2<f64>> {
        self.variables.get(name)
    }

    /// Look up a variable as a labeled band
    pub fn band(&self, name: &str) -> Result<Band> {
        let data = self
            .variables
            .get(name)
            .ok_or_else(|| Error::MissingVariable {
                name: name.to_string(),
                available: self.variable_names().collect::<Vec<_>>().join(","),
            })?;
        Ok(Band {
            data: data.clone(),
            x: self.x.clone(),
            y: self.y.clone(),
        })
    }
}
