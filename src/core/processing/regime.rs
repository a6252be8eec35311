use crate::core::processing::ops::{bgr_to_gray, mean_intensity};
use crate::types::BgrImage;

/// Midpoint of the 8-bit range; images darker than this on average are
/// treated as pinned-against-dark-background shots.
const PINNED_MEAN_THRESHOLD: f64 = 127.0;

/// Classify the photographic regime from overall brightness.
pub fn is_pinned(img: &BgrImage) -> bool {
    mean_intensity(&bgr_to_gray(img)) < PINNED_MEAN_THRESHOLD
}
