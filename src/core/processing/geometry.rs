use serde::{Deserialize, Serialize};

/// Axis-aligned bounding rectangle, half-open on both axes:
/// `[top, bottom) x [left, right)` in image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BBox {
    pub top: usize,
    pub left: usize,
    pub bottom: usize,
    pub right: usize,
}

impl BBox {
    pub fn width(&self) -> usize {
        self.right - self.left
    }

    pub fn height(&self) -> usize {
        self.bottom - self.top
    }
}

impl std::fmt::Display for BBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.top, self.left, self.bottom, self.right
        )
    }
}

/// Map a box computed on the scaled working image back to full resolution.
/// Each coordinate divides by the scale factor and truncates.
pub fn scale_to_full(bbox: BBox, scale: f64) -> BBox {
    BBox {
        top: (bbox.top as f64 / scale) as usize,
        left: (bbox.left as f64 / scale) as usize,
        bottom: (bbox.bottom as f64 / scale) as usize,
        right: (bbox.right as f64 / scale) as usize,
    }
}

/// Turn a detection box into the final crop rectangle for an image of
/// `width` x `height`: square-ify, pad proportionally, clamp in bounds.
///
/// The square-ify step is one-sided: only the lesser dimension's start
/// coordinate shifts (clamped at 0) and its end is re-derived from the
/// start, so the box grows upward/leftward rather than symmetrically.
/// Intermediate values are real-valued; everything truncates once at the
/// end.
pub fn fit_crop(bbox: BBox, width: usize, height: usize, padding: f64) -> BBox {
    let w = width as f64;
    let h = height as f64;

    let mut top = bbox.top as f64;
    let mut left = bbox.left as f64;
    let mut bottom = bbox.bottom as f64;
    let mut right = bbox.right as f64;

    let mut box_width = right - left;
    let mut box_height = bottom - top;

    if box_width > box_height {
        let pad = (box_width - box_height) / 2.0;
        top = (top - pad).max(0.0);
        bottom = top + box_width;
        box_height = box_width;
    } else {
        let pad = (box_height - box_width) / 2.0;
        left = (left - pad).max(0.0);
        right = left + box_height;
        box_width = box_height;
    }

    // Proportional pad, recomputed per axis at the image boundary. The
    // height recomputation sees the width-adjusted value, and a negative
    // result legitimately shrinks a box taller than the image.
    let mut pad = (box_width * padding).trunc();
    if box_width + pad * 2.0 > w {
        pad = (w - box_width) / 2.0;
    }
    if box_height + pad * 2.0 > h {
        pad = (h - box_height) / 2.0;
    }

    top -= pad;
    left -= pad;
    bottom += pad;
    right += pad;

    let box_width = right - left;
    let box_height = bottom - top;

    // Clamp by translation, preserving the box dimensions.
    if top < 0.0 {
        top = 0.0;
        bottom = box_height;
    }
    if left < 0.0 {
        left = 0.0;
        right = box_width;
    }
    if bottom > h {
        bottom = h;
        top = bottom - box_height;
    }
    if right > w {
        right = w;
        left = right - box_width;
    }

    BBox {
        top: top.max(0.0) as usize,
        left: left.max(0.0) as usize,
        bottom: bottom.max(0.0) as usize,
        right: right.max(0.0) as usize,
    }
}
