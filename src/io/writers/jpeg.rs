use jpeg_encoder::{ColorType, Encoder};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::error::Result;

/// Catalogue outputs trade a little fidelity for size.
const JPEG_QUALITY: u8 = 90;

/// Encode interleaved BGR samples as a JPEG file. The encoder wants RGB,
/// so channels are swapped on the way out.
pub fn write_bgr_jpeg(output: &Path, cols: usize, rows: usize, bgr_data: &[u8]) -> Result<()> {
    let mut rgb_data = Vec::with_capacity(bgr_data.len());
    for px in bgr_data.chunks_exact(3) {
        rgb_data.push(px[2]);
        rgb_data.push(px[1]);
        rgb_data.push(px[0]);
    }

    let file = File::create(output)?;
    let mut writer = BufWriter::new(file);
    let encoder = Encoder::new(&mut writer, JPEG_QUALITY);
    encoder.encode(&rgb_data, cols as u16, rows as u16, ColorType::Rgb)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_a_decodable_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.jpg");
        let data = vec![128u8; 32 * 16 * 3];
        write_bgr_jpeg(&path, 32, 16, &data).unwrap();

        let decoded = image::open(&path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (32, 16));
    }
}
