//! Dataset readers and writers.
//!
//! JSON datasets hold shared `x`/`y` ticks and one row-major grid per variable,
//! with `null` marking a missing sample. Single-band TIFFs are read with
//! pixel-index ticks; a `GDAL_NODATA` tag, when present, is mapped to NaN.
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use tiff::ColorType;
use tiff::decoder::{Decoder, DecodingResult};
use tiff::tags::Tag;
use tracing::{debug, info, warn};

use crate::core::band::Dataset;
use crate::error::{Error, Result};

const GDAL_NODATA: u16 = 42113;

#[derive(Debug, Serialize, Deserialize)]
struct DatasetFile {
    x: Vec<f64>,
    y: Vec<f64>,
    variables: BTreeMap<String, Vec<Vec<Option<f64>>>>,
    #[serde(default)]
    attrs: BTreeMap<String, String>,
}

fn grid_to_array(name: &str, rows: Vec<Vec<Option<f64>>>, cols: usize) -> Result<Array2<f64>> {
    let nrows = rows.len();
    let mut flat = Vec::with_capacity(nrows * cols);
    for (i, row) in rows.into_iter().enumerate() {
        if row.len() != cols {
            return Err(Error::RaggedRows {
                name: name.to_string(),
                row: i,
                expected: cols,
                got: row.len(),
            });
        }
        flat.extend(row.into_iter().map(|v| v.unwrap_or(f64::NAN)));
    }
    Array2::from_shape_vec((nrows, cols), flat).map_err(|e| Error::Processing(e.to_string()))
}

/// Parse a JSON dataset document
pub fn parse_json_dataset(text: &str) -> Result<Dataset> {
    let file: DatasetFile = serde_json::from_str(text)?;
    let cols = file.x.len();
    let mut dataset = Dataset::new(file.x, file.y);
    for (name, grid) in file.variables {
        let data = grid_to_array(&name, grid, cols)?;
        dataset.insert(name, data)?;
    }
    dataset.attrs = file.attrs;
    Ok(dataset)
}

pub fn read_json_dataset(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path)?;
    let dataset = parse_json_dataset(&text)?;
    info!(
        "Loaded dataset {:?}: {}x{}, variables [{}]",
        path,
        dataset.x().len(),
        dataset.y().len(),
        dataset.variable_names().collect::<Vec<_>>().join(", ")
    );
    Ok(dataset)
}

/// Serialize a dataset back to JSON; NaN samples are written as `null`
pub fn write_json_dataset(dataset: &Dataset, path: &Path) -> Result<()> {
    let variables: BTreeMap<String, Vec<Vec<Option<f64>>>> = dataset
        .variable_names()
        .filter_map(|name| dataset.variable(name).map(|data| (name, data)))
        .map(|(name, data)| {
            let grid = data
                .rows()
                .into_iter()
                .map(|row| {
                    row.iter()
                        .map(|&v| if v.is_nan() { None } else { Some(v) })
                        .collect::<Vec<_>>()
                })
                .collect::<Vec<_>>();
            (name.to_string(), grid)
        })
        .collect();
    let file = DatasetFile {
        x: dataset.x().to_vec(),
        y: dataset.y().to_vec(),
        variables,
        attrs: dataset.attrs.clone(),
    };
    std::fs::write(path, serde_json::to_string(&file)?)?;
    Ok(())
}

fn samples_to_f64(result: DecodingResult, path: &Path) -> Result<Vec<f64>> {
    Ok(match result {
        DecodingResult::U8(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::U16(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::U32(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::I8(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::I16(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::I32(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::F32(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::F64(v) => v,
        _ => {
            return Err(Error::UnsupportedSampleFormat {
                path: path.display().to_string(),
            });
        }
    })
}

/// Read a single-channel TIFF into a `(rows, cols)` array of f64 samples
pub fn read_tiff_band(path: &Path) -> Result<Array2<f64>> {
    let file = File::open(path)?;
    let mut decoder = Decoder::new(BufReader::new(file))?;
    let (width, height) = decoder.dimensions()?;

    if !matches!(decoder.colortype()?, ColorType::Gray(_)) {
        return Err(Error::UnsupportedSampleFormat {
            path: path.display().to_string(),
        });
    }

    let nodata = match decoder.find_tag(Tag::from_u16_exhaustive(GDAL_NODATA))? {
        Some(value) => {
            let text = value.into_string()?;
            match text.trim().trim_end_matches('\0').parse::<f64>() {
                Ok(v) => Some(v),
                Err(_) => {
                    warn!("Ignoring unparsable GDAL_NODATA value {:?} in {:?}", text, path);
                    None
                }
            }
        }
        None => None,
    };

    let mut samples = samples_to_f64(decoder.read_image()?, path)?;
    if let Some(nd) = nodata {
        for v in samples.iter_mut().filter(|v| **v == nd) {
            *v = f64::NAN;
        }
    }
    debug!("read_tiff_band: {:?} {}x{} nodata={:?}", path, width, height, nodata);

    Array2::from_shape_vec((height as usize, width as usize), samples)
        .map_err(|e| Error::Processing(e.to_string()))
}

/// Build a dataset named `red`/`green`/`blue` from three single-band TIFFs.
/// The ticks are pixel indices; all three files must share dimensions.
pub fn read_tiff_bands(red: &Path, green: &Path, blue: &Path) -> Result<Dataset> {
    let r = read_tiff_band(red)?;
    let (rows, cols) = r.dim();
    let mut dataset = Dataset::new(
        (0..cols).map(|c| c as f64).collect(),
        (0..rows).map(|r| r as f64).collect(),
    );
    dataset.insert("red", r)?;
    dataset.insert("green", read_tiff_band(green)?)?;
    dataset.insert("blue", read_tiff_band(blue)?)?;
    dataset
        .attrs
        .insert("source".to_string(), red.display().to_string());
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use tiff::encoder::{TiffEncoder, colortype};

    fn write_f32_tiff(path: &Path, cols: u32, rows: u32, data: &[f32], nodata: Option<&str>) {
        let file = File::create(path).unwrap();
        let mut encoder = TiffEncoder::new(std::io::BufWriter::new(file)).unwrap();
        let mut image = encoder
            .new_image::<colortype::Gray32Float>(cols, rows)
            .unwrap();
        if let Some(nd) = nodata {
            image
                .encoder()
                .write_tag(Tag::from_u16_exhaustive(GDAL_NODATA), nd)
                .unwrap();
        }
        image.write_data(data).unwrap();
    }

    #[test]
    fn json_nulls_become_nan() {
        let ds = parse_json_dataset(
            r#"{"x": [0, 1], "y": [10, 20],
                "variables": {"blue": [[0, 2], [4, null]]},
                "attrs": {"scene": "demo"}}"#,
        )
        .unwrap();
        let blue = ds.variable("blue").unwrap();
        assert_eq!(blue[[1, 0]], 4.0);
        assert!(blue[[1, 1]].is_nan());
        assert_eq!(ds.y(), &[10.0, 20.0]);
        assert_eq!(ds.attrs["scene"], "demo");
    }

    #[test]
    fn ragged_rows_rejected() {
        let err = parse_json_dataset(
            r#"{"x": [0, 1], "y": [0, 1], "variables": {"red": [[1, 2], [3]]}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::RaggedRows { row: 1, expected: 2, got: 1, .. }));
    }

    #[test]
    fn row_count_must_match_y() {
        let err =
            parse_json_dataset(r#"{"x": [0], "y": [0, 1], "variables": {"red": [[1]]}}"#)
                .unwrap_err();
        assert!(matches!(err, Error::CoordinateLength { .. }));
    }

    #[test]
    fn json_round_trip_keeps_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ds.json");
        let mut ds = Dataset::new(vec![0.0, 1.0], vec![0.0]);
        ds.insert("red", array![[1.5, f64::NAN]]).unwrap();
        write_json_dataset(&ds, &path).unwrap();

        let back = read_json_dataset(&path).unwrap();
        let red = back.variable("red").unwrap();
        assert_eq!(red[[0, 0]], 1.5);
        assert!(red[[0, 1]].is_nan());
    }

    #[test]
    fn tiff_band_with_nodata() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("band.tif");
        write_f32_tiff(&path, 3, 2, &[0.0, 1.0, 2.0, 3.0, -9999.0, 5.0], Some("-9999"));

        let band = read_tiff_band(&path).unwrap();
        assert_eq!(band.dim(), (2, 3));
        assert_eq!(band[[0, 2]], 2.0);
        assert!(band[[1, 1]].is_nan());
        assert_eq!(band[[1, 2]], 5.0);
    }

    #[test]
    fn tiff_bands_share_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let r = dir.path().join("r.tif");
        let g = dir.path().join("g.tif");
        let b = dir.path().join("b.tif");
        write_f32_tiff(&r, 2, 1, &[1.0, 2.0], None);
        write_f32_tiff(&g, 2, 1, &[3.0, 4.0], None);
        write_f32_tiff(&b, 1, 2, &[5.0, 6.0], None);

        assert!(read_tiff_bands(&r, &g, &b).is_err());

        let ds = read_tiff_bands(&r, &g, &g).unwrap();
        assert_eq!(ds.x(), &[0.0, 1.0]);
        assert_eq!(ds.variable("blue").unwrap()[[0, 1]], 4.0);
    }
}
