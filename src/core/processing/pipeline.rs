use tracing::{debug, info};

use crate::core::params::CropParams;
use crate::core::processing::geometry::{BBox, fit_crop, scale_to_full};
use crate::core::processing::pinned::pinned_bbox;
use crate::core::processing::regime::is_pinned;
use crate::core::processing::resize::{downsample_for_detection, resize_to_output};
use crate::core::processing::sheet::sheet_bbox;
use crate::error::{Error, Result};
use crate::types::{BgrImage, Regime};

/// Result of one crop operation.
#[derive(Debug, Clone)]
pub struct CropOutcome {
    /// The final square output image
    pub image: BgrImage,
    /// Which detection regime ran
    pub regime: Regime,
    /// Detection box rescaled to full resolution, before geometry
    pub detected: BBox,
    /// Final padded, squared, clamped crop rectangle
    pub crop_box: BBox,
}

/// Locate the specimen in a full-resolution image and produce the padded
/// square crop. Pure in-memory transform; decoding and encoding belong to
/// the caller.
pub fn crop(image: &BgrImage, params: &CropParams) -> Result<CropOutcome> {
    params.validate()?;

    let (working, scale) = downsample_for_detection(image).map_err(Error::external)?;

    let regime = if is_pinned(&working) {
        Regime::Pinned
    } else {
        Regime::Sheet
    };
    debug!("classified regime: {}", regime);

    let working_box = match regime {
        Regime::Pinned => pinned_bbox(&working)?,
        Regime::Sheet => sheet_bbox(&working, params.radius)?,
    };

    let detected = scale_to_full(working_box, scale);
    let crop_box = fit_crop(detected, image.width, image.height, params.padding);
    info!(
        "detected {} box {} -> crop {}",
        regime, detected, crop_box
    );

    let extracted = extract(image, crop_box)?;
    let output = resize_to_output(&extracted).map_err(Error::external)?;

    Ok(CropOutcome {
        image: output,
        regime,
        detected,
        crop_box,
    })
}

/// Copy a rectangle out of the image, row by row.
fn extract(img: &BgrImage, bbox: BBox) -> Result<BgrImage> {
    if bbox.width() == 0 || bbox.height() == 0 {
        return Err(Error::Processing(format!(
            "empty crop region {bbox}"
        )));
    }
    debug_assert!(bbox.bottom <= img.height && bbox.right <= img.width);

    let mut data = Vec::with_capacity(bbox.width() * bbox.height() * 3);
    for y in bbox.top..bbox.bottom {
        let start = (y * img.width + bbox.left) * 3;
        let end = (y * img.width + bbox.right) * 3;
        data.extend_from_slice(&img.data[start..end]);
    }
    Ok(BgrImage::new(bbox.width(), bbox.height(), data))
}
