use ndarray::Array2;

use crate::types::BgrImage;

/// BT.601 luma from interleaved BGR samples, rounded to nearest.
pub fn bgr_to_gray(img: &BgrImage) -> Array2<u8> {
    let mut gray = Array2::<u8>::zeros((img.height, img.width));
    for y in 0..img.height {
        for x in 0..img.width {
            let [b, g, r] = img.pixel(x, y);
            let luma = 0.114 * b as f64 + 0.587 * g as f64 + 0.299 * r as f64;
            gray[[y, x]] = luma.round().min(255.0) as u8;
        }
    }
    gray
}

/// Mean intensity over the whole plane.
pub fn mean_intensity(gray: &Array2<u8>) -> f64 {
    let sum: u64 = gray.iter().map(|&v| v as u64).sum();
    sum as f64 / gray.len() as f64
}

/// Mirror an out-of-range index back into `[0, n)` without repeating the
/// border sample (reflect-101).
#[inline]
pub fn reflect_101(i: isize, n: usize) -> usize {
    if n == 1 {
        return 0;
    }
    if i < 0 {
        (-i) as usize
    } else if i as usize >= n {
        2 * n - 2 - i as usize
    } else {
        i as usize
    }
}

/// Discrete Laplacian (4-neighbor second derivative) with reflect-101
/// borders. The response keeps its sign; callers invert and binarize.
pub fn laplacian(gray: &Array2<u8>) -> Array2<f64> {
    let (rows, cols) = gray.dim();
    let mut out = Array2::<f64>::zeros((rows, cols));
    for y in 0..rows {
        let up = reflect_101(y as isize - 1, rows);
        let down = reflect_101(y as isize + 1, rows);
        for x in 0..cols {
            let left = reflect_101(x as isize - 1, cols);
            let right = reflect_101(x as isize + 1, cols);
            let center = gray[[y, x]] as f64;
            out[[y, x]] = gray[[up, x]] as f64
                + gray[[down, x]] as f64
                + gray[[y, left]] as f64
                + gray[[y, right]] as f64
                - 4.0 * center;
        }
    }
    out
}

/// Binary threshold: values strictly above `thresh` become `max`, the rest 0.
pub fn threshold_binary(src: &Array2<f64>, thresh: f64, max: f64) -> Array2<f64> {
    src.mapv(|v| if v > thresh { max } else { 0.0 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BgrImage;

    #[test]
    fn gray_of_equal_channels_is_identity() {
        let img = BgrImage::filled(4, 3, [127, 127, 127]);
        let gray = bgr_to_gray(&img);
        assert!(gray.iter().all(|&v| v == 127));
    }

    #[test]
    fn mean_intensity_of_mixed_plane() {
        let mut img = BgrImage::filled(2, 1, [0, 0, 0]);
        img.set_pixel(1, 0, [254, 254, 254]);
        let gray = bgr_to_gray(&img);
        assert!((mean_intensity(&gray) - 127.0).abs() < 1e-9);
    }

    #[test]
    fn laplacian_of_uniform_plane_is_zero() {
        let img = BgrImage::filled(5, 5, [80, 80, 80]);
        let lap = laplacian(&bgr_to_gray(&img));
        assert!(lap.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn laplacian_responds_at_step_edge() {
        // Single white pixel on black: the center goes strongly negative,
        // its 4-neighbors pick up the positive response.
        let mut img = BgrImage::filled(5, 5, [0, 0, 0]);
        img.set_pixel(2, 2, [255, 255, 255]);
        let lap = laplacian(&bgr_to_gray(&img));
        assert_eq!(lap[[2, 2]], -4.0 * 255.0);
        assert_eq!(lap[[1, 2]], 255.0);
        assert_eq!(lap[[2, 3]], 255.0);
        assert_eq!(lap[[0, 0]], 0.0);
    }

    #[test]
    fn reflect_101_mirrors_without_border_repeat() {
        assert_eq!(reflect_101(-1, 5), 1);
        assert_eq!(reflect_101(5, 5), 3);
        assert_eq!(reflect_101(2, 5), 2);
        assert_eq!(reflect_101(-1, 1), 0);
    }
}
