use jpeg_encoder::{ColorType, Encoder};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::error::{Error, Result};

/// Write interleaved RGBA pixels as an RGB JPEG; the encoder ignores alpha.
pub fn write_rgba_jpeg(output: &Path, cols: usize, rows: usize, rgba_data: &[u8]) -> Result<()> {
    if cols == 0 || rows == 0 {
        return Err(Error::EmptyImage {
            width: cols,
            height: rows,
        });
    }
    let limit = u16::MAX as usize;
    if cols > limit || rows > limit {
        return Err(Error::ImageTooLarge {
            width: cols,
            height: rows,
            limit,
            format: "JPEG",
        });
    }
    let file = File::create(output)?;
    let mut writer = BufWriter::new(file);
    let encoder = Encoder::new(&mut writer, 100);
    encoder.encode(rgba_data, cols as u16, rows as u16, ColorType::Rgba)?;
    Ok(())
}
