use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use tiff::encoder::{TiffEncoder, colortype};
use tiff::tags::Tag;

use crate::error::{Error, Result};

/// Write interleaved RGBA8 pixels as a TIFF, optionally tagging an ImageDescription.
pub fn write_tiff_rgba_u8(
    output: &Path,
    cols: usize,
    rows: usize,
    rgba_data: &[u8],
    description: Option<&str>,
) -> Result<()> {
    if cols == 0 || rows == 0 {
        return Err(Error::EmptyImage {
            width: cols,
            height: rows,
        });
    }
    if rgba_data.len() != cols * rows * 4 {
        return Err(Error::Processing(format!(
            "RGBA buffer holds {} bytes, expected {} for {}x{}",
            rgba_data.len(),
            cols * rows * 4,
            cols,
            rows
        )));
    }
    let file = File::create(output)?;
    let mut encoder = TiffEncoder::new(BufWriter::new(file))?;
    let mut image = encoder.new_image::<colortype::RGBA8>(cols as u32, rows as u32)?;
    if let Some(desc) = description {
        image.encoder().write_tag(Tag::ImageDescription, desc)?;
    }
    image.write_data(rgba_data)?;
    Ok(())
}
