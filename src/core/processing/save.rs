use std::path::Path;
use tracing::info;

use crate::error::Result;
use crate::io::writers::jpeg::write_bgr_jpeg;
use crate::io::writers::metadata::{CropMetadata, create_jpeg_metadata_sidecar};
use crate::types::BgrImage;

/// Write a cropped image as JPEG, with an optional JSON sidecar describing
/// the detection that produced it.
pub fn save_cropped_image(
    image: &BgrImage,
    output: &Path,
    metadata: Option<&CropMetadata>,
) -> Result<()> {
    write_bgr_jpeg(output, image.width, image.height, &image.data)?;
    info!("save_cropped_image: JPEG saved to {:?}", output);

    if let Some(meta) = metadata {
        let sidecar = create_jpeg_metadata_sidecar(output, meta)?;
        info!("save_cropped_image: sidecar saved to {:?}", sidecar);
    }

    Ok(())
}
