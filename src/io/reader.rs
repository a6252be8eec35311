use std::path::Path;

use crate::error::{Error, Result};
use crate::types::BgrImage;

/// Decode a raster file (BMP, GIF, JPEG, PNG) into the interleaved BGR
/// image model. Decode failures surface as `Error::Image` unchanged.
pub fn read_bgr_image(path: &Path) -> Result<BgrImage> {
    let decoded = image::open(path)?;
    let rgb = decoded.to_rgb8();
    let (width, height) = rgb.dimensions();
    if width == 0 || height == 0 {
        return Err(Error::Processing(format!(
            "image {path:?} has zero dimension"
        )));
    }

    let raw = rgb.into_raw();
    let mut data = Vec::with_capacity(raw.len());
    for px in raw.chunks_exact(3) {
        data.push(px[2]);
        data.push(px[1]);
        data.push(px[0]);
    }

    Ok(BgrImage::new(width as usize, height as usize, data))
}
