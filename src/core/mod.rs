//! Core building blocks: labeled bands, normalization and compositing
//! parameters, and the processing primitives consumed by the high-level
//! `api` module.
pub mod band;
pub mod params;
pub mod processing;
