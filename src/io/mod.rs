//! I/O layer: dataset readers (JSON datasets, single-band TIFFs) and `writers`
//! for TIFF/JPEG outputs, world files and metadata embedding/sidecars.
pub mod dataset;
pub use dataset::{parse_json_dataset, read_json_dataset, read_tiff_band, read_tiff_bands, write_json_dataset};

pub mod writers;
