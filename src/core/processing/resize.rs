use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer, images::Image};
use tracing::debug;

use crate::types::BgrImage;

/// Long side of the downsampled working image used for detection.
pub const WORKING_LONG_SIDE: f64 = 500.0;
/// Side of the final square output crop.
pub const OUTPUT_SIZE: usize = 600;

/// Scale factor mapping full-resolution coordinates to working-image
/// coordinates (`working = full * scale`). Applied unconditionally, so
/// sources smaller than the working size are scaled up.
pub fn working_scale(width: usize, height: usize) -> f64 {
    WORKING_LONG_SIDE / width.max(height) as f64
}

/// Dimensions after applying a scale factor, rounded to nearest and never
/// collapsing to zero.
pub fn scaled_dimensions(width: usize, height: usize, scale: f64) -> (usize, usize) {
    let new_width = ((width as f64 * scale).round() as usize).max(1);
    let new_height = ((height as f64 * scale).round() as usize).max(1);
    (new_width, new_height)
}

fn resize_bgr(
    img: &BgrImage,
    target_width: usize,
    target_height: usize,
    filter: FilterType,
) -> Result<BgrImage, Box<dyn std::error::Error>> {
    let resize_options = ResizeOptions::new().resize_alg(ResizeAlg::Convolution(filter));
    let mut resizer = Resizer::new();

    let src_image = Image::from_vec_u8(
        img.width as u32,
        img.height as u32,
        img.data.clone(),
        PixelType::U8x3,
    )?;
    let mut dst_image = Image::new(target_width as u32, target_height as u32, PixelType::U8x3);
    resizer.resize(&src_image, &mut dst_image, &resize_options)?;

    Ok(BgrImage::new(
        target_width,
        target_height,
        dst_image.into_vec(),
    ))
}

/// Downsample the source to the detection working size (bilinear) and
/// return it with the scale factor that produced it.
pub fn downsample_for_detection(
    img: &BgrImage,
) -> Result<(BgrImage, f64), Box<dyn std::error::Error>> {
    let scale = working_scale(img.width, img.height);
    let (new_width, new_height) = scaled_dimensions(img.width, img.height, scale);
    debug!(
        "Working image: {}x{} -> {}x{} (scale {:.4})",
        img.width, img.height, new_width, new_height, scale
    );
    let working = resize_bgr(img, new_width, new_height, FilterType::Bilinear)?;
    Ok((working, scale))
}

/// Resample an extracted crop to the fixed square output size.
pub fn resize_to_output(img: &BgrImage) -> Result<BgrImage, Box<dyn std::error::Error>> {
    resize_bgr(img, OUTPUT_SIZE, OUTPUT_SIZE, FilterType::Lanczos3)
}
