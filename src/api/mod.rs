//! High-level, ergonomic library API: select three variables from a dataset and
//! composite them, render datasets to files or in-memory images, and batch
//! helpers for directories. Prefer these entrypoints over the low-level
//! processing modules when integrating truecolor.
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::core::band::Dataset;
use crate::core::params::{CompositeParams, RenderParams};
use crate::core::processing::composite::{CompositeImage, combine_bands};
use crate::core::processing::save::save_composite_image;
use crate::error::{Error, Result};
use crate::io::dataset::{read_json_dataset, read_tiff_bands};

/// Variables used when the caller does not name any
pub const DEFAULT_VARIABLES: [&str; 3] = ["red", "green", "blue"];

/// Composite three named dataset variables as R, G and B.
///
/// Fails before any lookup or computation unless exactly three names are given.
pub fn plot_single<S: AsRef<str>>(
    dataset: &Dataset,
    variables: &[S],
    params: &CompositeParams,
) -> Result<CompositeImage> {
    if variables.len() != 3 {
        return Err(Error::InvalidVariableCount {
            count: variables.len(),
        });
    }

    let r = dataset.band(variables[0].as_ref())?;
    let g = dataset.band(variables[1].as_ref())?;
    let b = dataset.band(variables[2].as_ref())?;
    debug!(
        "plot_single: R={} G={} B={}",
        variables[0].as_ref(),
        variables[1].as_ref(),
        variables[2].as_ref()
    );

    combine_bands(&r, &g, &b, params)
}

/// Composite a dataset in memory (no disk I/O)
pub fn render_to_buffer(dataset: &Dataset, params: &RenderParams) -> Result<CompositeImage> {
    plot_single(dataset, &params.variables, &params.composite)
}

/// Composite a dataset and write it to `output` in `params.format`
pub fn render_dataset_to_path(dataset: &Dataset, output: &Path, params: &RenderParams) -> Result<()> {
    let image = render_to_buffer(dataset, params)?;
    info!(
        "Rendered {}x{} composite ({} transparent pixels)",
        image.width(),
        image.height(),
        image.transparent_count()
    );
    save_composite_image(
        &image,
        output,
        params.format,
        &params.composite,
        &params.variables,
        params.world_file,
    )
}

/// Load a JSON dataset from disk
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    read_json_dataset(path)
}

/// Load three single-band TIFFs as the `red`/`green`/`blue` variables of one dataset
pub fn load_tiff_bands(red: &Path, green: &Path, blue: &Path) -> Result<Dataset> {
    read_tiff_bands(red, green, blue)
}

/// Read a JSON dataset and render it to an output path
pub fn process_file_to_path(input: &Path, output: &Path, params: &RenderParams) -> Result<()> {
    let dataset = load_dataset(input)?;
    render_dataset_to_path(&dataset, output, params)
}

/// Batch processing report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub processed: usize,
    pub skipped: usize,
    pub errors: usize,
}

fn is_json_dataset(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}

/// One `read_dir` pass: sorted dataset files plus the count of other entries
fn scan_directory(input_dir: &Path) -> Result<(Vec<PathBuf>, usize)> {
    let mut files = Vec::new();
    let mut skipped = 0;
    for entry in std::fs::read_dir(input_dir)? {
        let path = entry?.path();
        if is_json_dataset(&path) {
            files.push(path);
        } else {
            debug!("Skipping non-dataset entry: {:?}", path);
            skipped += 1;
        }
    }
    files.sort();
    Ok((files, skipped))
}

/// Return the `*.json` dataset files directly inside `input_dir`, sorted by name
pub fn iterate_datasets(input_dir: &Path) -> Result<std::vec::IntoIter<PathBuf>> {
    let (files, _) = scan_directory(input_dir)?;
    Ok(files.into_iter())
}

/// Render every JSON dataset in `input_dir` into `output_dir` using `params`.
/// Other directory entries are counted as skipped. If `continue_on_error` is true,
/// errors are counted in the report and processing continues; otherwise, the first error is returned.
pub fn process_directory_to_path(
    input_dir: &Path,
    output_dir: &Path,
    params: &RenderParams,
    continue_on_error: bool,
) -> Result<BatchReport> {
    std::fs::create_dir_all(output_dir)?;
    let (datasets, skipped) = scan_directory(input_dir)?;
    let mut report = BatchReport {
        skipped,
        ..BatchReport::default()
    };

    for path in datasets {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "composite".to_string());
        let output_path = output_dir.join(format!("{}.{}", stem, params.format.extension()));

        info!("Processing: {:?} -> {:?}", path, output_path);
        match process_file_to_path(&path, &output_path, params) {
            Ok(()) => report.processed += 1,
            Err(e) => {
                warn!("Error processing {:?}: {}", path, e);
                report.errors += 1;
                if !continue_on_error {
                    return Err(e);
                }
            }
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn dataset() -> Dataset {
        let mut ds = Dataset::new(vec![0.0, 1.0], vec![0.0, 1.0]);
        ds.insert("red", array![[0.0, 10.0], [20.0, 30.0]]).unwrap();
        ds.insert("green", array![[0.0, 5.0], [10.0, 15.0]]).unwrap();
        ds.insert("blue", array![[0.0, 2.0], [4.0, f64::NAN]]).unwrap();
        ds
    }

    #[test]
    fn variable_count_must_be_three() {
        let ds = dataset();
        let p = CompositeParams::default();
        assert!(matches!(
            plot_single(&ds, &["red", "green"], &p),
            Err(Error::InvalidVariableCount { count: 2 })
        ));
        assert!(matches!(
            plot_single(&ds, &["red", "green", "blue", "red"], &p),
            Err(Error::InvalidVariableCount { count: 4 })
        ));
    }

    #[test]
    fn count_checked_before_lookup() {
        // Unknown names would fail lookup, but the count check comes first
        let ds = dataset();
        assert!(matches!(
            plot_single(&ds, &["nope", "nada"], &CompositeParams::default()),
            Err(Error::InvalidVariableCount { count: 2 })
        ));
    }

    #[test]
    fn default_variables_render() {
        let ds = dataset();
        let img = plot_single(&ds, &DEFAULT_VARIABLES, &CompositeParams::default()).unwrap();
        assert_eq!(img.a, array![[255u8, 255], [255, 0]]);

        let via_params = render_to_buffer(&ds, &RenderParams::default()).unwrap();
        assert_eq!(img, via_params);
    }

    #[test]
    fn variable_order_maps_to_channels() {
        let ds = dataset();
        let img = plot_single(&ds, &["blue", "green", "red"], &CompositeParams::default()).unwrap();
        // red is now in the blue slot, so no pixel is transparent
        assert_eq!(img.transparent_count(), 0);
        assert_eq!(img.r[[1, 1]], 0);
    }

    #[test]
    fn unknown_variable() {
        let ds = dataset();
        assert!(matches!(
            plot_single(&ds, &["red", "green", "nir"], &CompositeParams::default()),
            Err(Error::MissingVariable { .. })
        ));
    }

    #[test]
    fn scan_sorts_datasets_and_counts_the_rest() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.json"), "{}").unwrap();
        std::fs::write(dir.path().join("a.JSON"), "{}").unwrap();
        std::fs::write(dir.path().join("readme.md"), "").unwrap();
        std::fs::create_dir(dir.path().join("nested.json")).unwrap();

        let (files, skipped) = scan_directory(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.JSON", "b.json"]);
        assert_eq!(skipped, 2);
        assert_eq!(iterate_datasets(dir.path()).unwrap().count(), 2);
    }
}
