use ndarray::Array2;
use tracing::debug;

use crate::core::processing::geometry::BBox;
use crate::core::processing::ops::reflect_101;
use crate::error::{Error, Result};
use crate::types::BgrImage;

const WHITE: [u8; 3] = [255, 255, 255];

/// 3x3 smoothing weights over a divisor of 128. The weights sum to 256, so
/// the filter carries a gain of 2 and saturates at 255: anything at half
/// intensity or brighter collapses into the pure-white background. That
/// saturation is load-bearing, not an accident of the kernel.
const SMOOTH_KERNEL: [[u32; 3]; 3] = [[16, 32, 16], [32, 64, 32], [16, 32, 16]];
const SMOOTH_DIVISOR: u32 = 128;

/// Distance the initial work-list offsets jump from the seed pixel.
const SEED_OFFSET: i64 = 10;

/// Bounding box of a specimen resting on a light mounting sheet.
///
/// The image is smoothed to suppress sheet texture, a seed pixel is found
/// by scanning square rings outward from the center, and a flood fill with
/// dilation radius `radius` grows the region from there, bridging gaps of
/// background narrower than the radius.
pub fn sheet_bbox(img: &BgrImage, radius: u32) -> Result<BBox> {
    let smoothed = smooth(img);
    let (seed_x, seed_y) = find_object_near_center(&smoothed)?;
    debug!("sheet seed at ({}, {})", seed_x, seed_y);
    flood_fill(&smoothed, seed_x, seed_y, radius as i64)
}

/// Weighted 3x3 average per channel, reflect-101 borders, rounded and
/// saturated to 255.
fn smooth(img: &BgrImage) -> BgrImage {
    let mut out = BgrImage::filled(img.width, img.height, [0, 0, 0]);
    for y in 0..img.height {
        for x in 0..img.width {
            let mut acc = [0u32; 3];
            for (ky, row) in SMOOTH_KERNEL.iter().enumerate() {
                let sy = reflect_101(y as isize + ky as isize - 1, img.height);
                for (kx, &w) in row.iter().enumerate() {
                    let sx = reflect_101(x as isize + kx as isize - 1, img.width);
                    let px = img.pixel(sx, sy);
                    for c in 0..3 {
                        acc[c] += w * px[c] as u32;
                    }
                }
            }
            let mut px = [0u8; 3];
            for c in 0..3 {
                px[c] = ((acc[c] + SMOOTH_DIVISOR / 2) / SMOOTH_DIVISOR).min(255) as u8;
            }
            out.set_pixel(x, y, px);
        }
    }
    out
}

/// Scan concentric square rings outward from the image center and return
/// the first non-white pixel. Exhausting the search radius means no
/// specimen is anywhere near the center.
fn find_object_near_center(img: &BgrImage) -> Result<(usize, usize)> {
    let hx = img.width / 2;
    let hy = img.height / 2;
    let search_radius = img.width.min(img.height) / 3;

    for ring in 1..search_radius {
        for x in hx - ring..hx + ring {
            for y in [hy - ring, hy + ring] {
                if img.pixel(x, y) != WHITE {
                    return Ok((x, y));
                }
            }
        }
    }

    Err(Error::NoObjectFound { search_radius })
}

/// Region growth with dilation: every visited pixel enqueues all non-white
/// pixels inside its radius window, connected or not, so the region jumps
/// thin background seams. The visited grid bounds the fill by image area.
fn flood_fill(img: &BgrImage, seed_x: usize, seed_y: usize, radius: i64) -> Result<BBox> {
    let width = img.width as i64;
    let height = img.height as i64;
    let mut visited = Array2::<bool>::from_elem((img.height, img.width), false);

    let mut top = height;
    let mut left = width;
    let mut bottom = 0i64;
    let mut right = 0i64;

    let sx = seed_x as i64;
    let sy = seed_y as i64;
    let mut queue: Vec<(i64, i64)> = vec![
        (sx, sy),
        (sx, sy - SEED_OFFSET),
        (sx, sy + SEED_OFFSET),
        (sx - SEED_OFFSET, sy),
        (sx + SEED_OFFSET, sy),
    ];

    while let Some((x, y)) = queue.pop() {
        if x < 0 || y < 0 || x >= width || y >= height {
            continue;
        }
        let (ux, uy) = (x as usize, y as usize);
        if visited[[uy, ux]] || img.pixel(ux, uy) == WHITE {
            continue;
        }

        visited[[uy, ux]] = true;
        top = top.min(y);
        bottom = bottom.max(y);
        left = left.min(x);
        right = right.max(x);

        for cx in (x - radius).max(1)..(x + radius).min(width - 1) {
            for cy in (y - radius).max(1)..(y + radius).min(height - 1) {
                let (ucx, ucy) = (cx as usize, cy as usize);
                if !visited[[ucy, ucx]] && img.pixel(ucx, ucy) != WHITE {
                    queue.push((cx, cy));
                }
            }
        }
    }

    if top > bottom || left > right {
        return Err(Error::DegenerateRegion);
    }

    Ok(BBox {
        top: top as usize,
        left: left as usize,
        bottom: bottom as usize,
        right: right as usize,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BgrImage;

    fn white_with_gray_square(
        size: usize,
        top: usize,
        left: usize,
        side: usize,
        gray: u8,
    ) -> BgrImage {
        let mut img = BgrImage::filled(size, size, [255, 255, 255]);
        for y in top..top + side {
            for x in left..left + side {
                img.set_pixel(x, y, [gray, gray, gray]);
            }
        }
        img
    }

    #[test]
    fn smoothing_saturates_bright_grays_to_white() {
        // Gain 2: a uniform 200 field lands at 400 and clips to white.
        let img = BgrImage::filled(8, 8, [200, 200, 200]);
        let smoothed = smooth(&img);
        assert!(smoothed.data.iter().all(|&v| v == 255));

        // A uniform 100 field doubles to 200 and survives.
        let img = BgrImage::filled(8, 8, [100, 100, 100]);
        let smoothed = smooth(&img);
        assert!(smoothed.data.iter().all(|&v| v == 200));
    }

    #[test]
    fn all_white_reports_no_object() {
        let img = BgrImage::filled(60, 60, [255, 255, 255]);
        let err = sheet_bbox(&img, 3).unwrap_err();
        assert!(matches!(err, Error::NoObjectFound { search_radius: 20 }));
    }

    #[test]
    fn bright_uniform_sheet_reports_no_object() {
        // Uniform 200 saturates to white under the smoothing gain, so the
        // seed search finds nothing even though the raw image is not white.
        let img = BgrImage::filled(60, 60, [200, 200, 200]);
        assert!(matches!(
            sheet_bbox(&img, 3),
            Err(Error::NoObjectFound { .. })
        ));
    }

    #[test]
    fn gray_square_is_bounded_tightly() {
        // 30x30 square at rows 30..60, cols 40..70. Smoothing whitens the
        // one-pixel boundary ring (it blends toward the white sheet and
        // saturates), so the detectable region is the square shrunk by one.
        let img = white_with_gray_square(100, 30, 40, 30, 100);
        let bbox = sheet_bbox(&img, 3).unwrap();
        assert_eq!(bbox, BBox { top: 31, left: 41, bottom: 58, right: 68 });
    }

    #[test]
    fn fully_non_white_image_covers_extent_minus_border() {
        // Every pixel is detectable; the enqueue window is clamped to leave
        // a one-pixel frame, so the box stops just inside the image edge.
        let img = BgrImage::filled(50, 50, [100, 100, 100]);
        let bbox = sheet_bbox(&img, 3).unwrap();
        assert_eq!(bbox, BBox { top: 1, left: 1, bottom: 48, right: 48 });
    }

    #[test]
    fn dilation_bridges_narrow_gaps() {
        // Two dark blocks separated by a single-pixel white seam at col 50.
        // Gray 50 keeps the block edges below the smoothing saturation, so
        // the seam stays exactly one pixel wide after the blur. Radius 3
        // jumps it and the box spans both blocks.
        let mut img = BgrImage::filled(100, 100, [255, 255, 255]);
        for y in 40..60 {
            for x in 30..50 {
                img.set_pixel(x, y, [50, 50, 50]);
            }
            for x in 51..71 {
                img.set_pixel(x, y, [50, 50, 50]);
            }
        }
        let wide = sheet_bbox(&img, 3).unwrap();
        assert_eq!(wide, BBox { top: 40, left: 30, bottom: 59, right: 70 });

        // Radius 1's enqueue window reaches only one pixel left and up, so
        // the fill never crosses the seam (nor moves right or down at all).
        let narrow = sheet_bbox(&img, 1).unwrap();
        assert_eq!(narrow.right, 49);
    }
}
