use std::path::Path;

use tracing::{info, warn};

use crate::core::params::CompositeParams;
use crate::core::processing::composite::CompositeImage;
use crate::error::Result;
use crate::io::writers::jpeg::write_rgba_jpeg;
use crate::io::writers::metadata::{create_metadata_sidecar, metadata_json};
use crate::io::writers::tiff::write_tiff_rgba_u8;
use crate::io::writers::worldfile::{geotransform_from_coords, write_world_file};
use crate::types::OutputFormat;

/// Encode a composite to disk.
///
/// TIFF keeps all four channels and embeds the metadata document as its
/// ImageDescription. JPEG drops alpha and gets a `.json` sidecar instead.
pub fn save_composite_image(
    image: &CompositeImage,
    output: &Path,
    format: OutputFormat,
    params: &CompositeParams,
    variables: &[String],
    world_file: bool,
) -> Result<()> {
    let geotransform = geotransform_from_coords(&image.x, &image.y);
    let rgba = image.to_rgba_interleaved();
    let (cols, rows) = (image.width(), image.height());

    match format {
        OutputFormat::TIFF => {
            let description = metadata_json(image, params, variables, geotransform)?;
            write_tiff_rgba_u8(output, cols, rows, &rgba, Some(description.as_str()))?;
            info!("save_composite_image: RGBA TIFF saved with metadata");
        }
        OutputFormat::JPEG => {
            write_rgba_jpeg(output, cols, rows, &rgba)?;
            create_metadata_sidecar(output, image, params, variables, geotransform)?;
            info!("save_composite_image: JPEG saved with metadata sidecar");
        }
    }

    if world_file {
        match geotransform {
            Some(gt) => {
                let path = write_world_file(output, gt)?;
                info!("World file written: {:?}", path);
            }
            None => warn!(
                "Skipping world file for {:?}: need at least two ticks per axis",
                output
            ),
        }
    }

    Ok(())
}
