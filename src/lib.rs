#![doc = r#"
truecolor - sigmoid-normalized RGBA compositing of three raster bands.

This crate turns three single-band rasters (red, green, blue or any false-color
triple) into an 8-bit RGBA image. Each band is rescaled against a fraction
(`gamma`, default 0.8) of its own maximum and passed through a logistic contrast
curve (steepness 25, midpoint at 11% of the range) before byte quantization.
Pixels where the blue band is missing (NaN) become transparent. The output keeps
the input `x` ticks and reverses the `y` ticks for display orientation.

It powers the `truecolor` CLI and can be embedded in your own Rust applications.

Add dependency
--------------
```toml
[dependencies]
truecolor = "0.1"
```

Composite bands in memory
-------------------------
```rust
use ndarray::array;
use truecolor::{Band, CompositeParams, combine_bands};

fn main() -> truecolor::Result<()> {
    let ticks = vec![0.0, 1.0];
    let r = Band::new(array![[0.0, 10.0], [20.0, 30.0]], ticks.clone(), ticks.clone())?;
    let g = Band::new(array![[0.0, 5.0], [10.0, 15.0]], ticks.clone(), ticks.clone())?;
    let b = Band::new(array![[0.0, 2.0], [4.0, f64::NAN]], ticks.clone(), ticks.clone())?;

    let image = combine_bands(&r, &g, &b, &CompositeParams::default())?;
    assert_eq!(image.a[[1, 1]], 0);
    assert_eq!(image.y, vec![1.0, 0.0]);
    Ok(())
}
```

Select variables from a dataset
-------------------------------
```rust
use ndarray::array;
use truecolor::{CompositeParams, Dataset, plot_single};

fn main() -> truecolor::Result<()> {
    let mut ds = Dataset::new(vec![0.0, 1.0], vec![0.0]);
    ds.insert("nir", array![[0.2, 0.4]])?;
    ds.insert("red", array![[0.1, 0.3]])?;
    ds.insert("green", array![[0.1, 0.2]])?;

    // False color: NIR shown as red
    let image = plot_single(&ds, &["nir", "red", "green"], &CompositeParams::with_gamma(0.9))?;
    assert_eq!(image.width(), 2);

    // Anything but three names is rejected up front
    assert!(plot_single(&ds, &["nir", "red"], &CompositeParams::default()).is_err());
    Ok(())
}
```

Render to a file
----------------
```rust,no_run
use std::path::Path;
use truecolor::{OutputFormat, RenderParams, process_file_to_path};

fn main() -> truecolor::Result<()> {
    let params = RenderParams {
        format: OutputFormat::TIFF,
        world_file: true,
        ..RenderParams::default()
    };
    process_file_to_path(Path::new("/data/scene.json"), Path::new("/out/scene.tiff"), &params)
}
```

Error handling
--------------
All public functions return `truecolor::Result<T>`; match on `truecolor::Error` to
handle specific cases, e.g. `Error::InvalidVariableCount` or `Error::ShapeMismatch`.

Useful modules
--------------
- [`api`] - high-level entry points (`plot_single`, rendering, batch helpers).
- [`core`] - bands, parameters, normalization and compositing primitives.
- [`io`] - dataset readers and TIFF/JPEG/world-file/metadata writers.
- [`types`] - shared enums (`OutputFormat`, `Channel`, `Axis`).
- [`error`] - crate-level `Error` and `Result`.
"#]

// Core modules (public)
pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// Curated public API surface
// Types
pub use crate::core::band::{Band, Dataset};
pub use crate::core::params::{CompositeParams, NormalizeParams, RenderParams};
pub use crate::core::processing::composite::{CompositeImage, combine_bands};
pub use crate::core::processing::normalize::{nan_max, normalize, normalize_value, quantize_u8};
pub use crate::error::{Error, Result};
pub use crate::types::{Axis, Channel, OutputFormat};

// High-level API re-exports
pub use api::{
    BatchReport, DEFAULT_VARIABLES, iterate_datasets, load_dataset, load_tiff_bands,
    plot_single, process_directory_to_path, process_file_to_path, render_dataset_to_path,
    render_to_buffer,
};
