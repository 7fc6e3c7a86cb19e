use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Derive a GDAL-style geotransform (corner origin) from pixel-center ticks.
/// Returns None when an axis has fewer than two ticks, since no pixel size can be inferred.
pub fn geotransform_from_coords(x: &[f64], y: &[f64]) -> Option<[f64; 6]> {
    if x.len() < 2 || y.len() < 2 {
        return None;
    }
    let dx = (x[x.len() - 1] - x[0]) / (x.len() - 1) as f64;
    let dy = (y[y.len() - 1] - y[0]) / (y.len() - 1) as f64;
    Some([x[0] - 0.5 * dx, dx, 0.0, y[0] - 0.5 * dy, 0.0, dy])
}

/// World file path for a raster image, e.g. `.tiff` -> `.tfw`, `.jpg` -> `.jgw`
pub fn world_file_path(output_image: &Path) -> PathBuf {
    let ext = output_image
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let world_ext = match ext.as_str() {
        "jpg" | "jpeg" => "jgw".to_string(),
        "png" => "pgw".to_string(),
        "tif" | "tiff" => "tfw".to_string(),
        // Fallback: first letter + "w"
        other if !other.is_empty() => format!("{}w", other.chars().next().unwrap_or('w')),
        _ => "wld".to_string(),
    };

    output_image.with_extension(world_ext)
}

/// Write a world file next to the raster image using the provided geotransform.
/// The world file stores the transform in pixel-center convention.
pub fn write_world_file(output_image: &Path, geotransform: [f64; 6]) -> Result<PathBuf> {
    let world_path = world_file_path(output_image);

    // A: pixel size in X, D: rotation about Y, B: rotation about X, E: pixel size Y
    // C, F: center of upper-left pixel
    let a = geotransform[1];
    let d = geotransform[4];
    let b = geotransform[2];
    let e = geotransform[5];
    let c = geotransform[0] + 0.5 * a + 0.5 * b;
    let f = geotransform[3] + 0.5 * d + 0.5 * e;

    let mut file = File::create(&world_path)?;
    for v in [a, d, b, e, c, f] {
        writeln!(file, "{:.12}", v)?;
    }

    Ok(world_path)
}
