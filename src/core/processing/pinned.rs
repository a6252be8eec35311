use crate::core::processing::geometry::BBox;
use crate::core::processing::ops::{bgr_to_gray, laplacian, threshold_binary};
use crate::error::{Error, Result};
use crate::types::BgrImage;

/// Binarization cut applied to the inverted edge response.
const INVERT_THRESHOLD: f64 = 127.0;
/// Mask keeps pixels whose binarized value fell below this, i.e. the pixels
/// with a strong positive Laplacian response.
const MASK_THRESHOLD: f64 = 200.0;

/// Tight bounding box of a specimen photographed against a dark background.
///
/// Edge contrast does the work here: the Laplacian response is inverted and
/// binarized, and the box encloses every pixel the binarization zeroed out.
/// A fully uniform image has no such pixel and fails with `EmptyDetection`.
pub fn pinned_bbox(img: &BgrImage) -> Result<BBox> {
    let gray = bgr_to_gray(img);
    let contrast = laplacian(&gray);
    let inverted = contrast.mapv(|v| 255.0 - v);
    let binary = threshold_binary(&inverted, INVERT_THRESHOLD, 255.0);

    let mut top = usize::MAX;
    let mut left = usize::MAX;
    let mut bottom = 0usize;
    let mut right = 0usize;
    let mut hit = false;

    for ((y, x), &v) in binary.indexed_iter() {
        if v < MASK_THRESHOLD {
            hit = true;
            top = top.min(y);
            left = left.min(x);
            bottom = bottom.max(y);
            right = right.max(x);
        }
    }

    if !hit {
        return Err(Error::EmptyDetection);
    }

    Ok(BBox {
        top,
        left,
        bottom: bottom + 1,
        right: right + 1,
    })
}
