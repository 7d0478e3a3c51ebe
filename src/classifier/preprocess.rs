use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};
use ndarray::Array4;
use std::path::Path;

use super::error::ClassifierError;

/// Decodes the image at `path` and prepares it for inference.
///
/// See [`preprocess_bytes`] for the preprocessing steps.
pub fn preprocess_file(
    path: impl AsRef<Path>,
    target_size: (u32, u32),
) -> Result<Array4<f32>, ClassifierError> {
    let image = image::open(path.as_ref())
        .map_err(|e| ClassifierError::ImageError(format!("Failed to decode image: {}", e)))?;
    tensor_from_image(image, target_size)
}

/// Decodes an in-memory image and prepares it for inference.
///
/// The image is fitted to exactly `target_size` (aspect-preserving resize
/// with Lanczos3 resampling, then a center crop), converted to RGB, and
/// normalized from `[0, 255]` to `[-1, 1]` via `value / 127.5 - 1`. The
/// result has shape `(1, height, width, 3)` with a leading batch dimension.
///
/// Preprocessing is deterministic: identical bytes and target size always
/// produce a bit-identical tensor.
pub fn preprocess_bytes(
    bytes: &[u8],
    target_size: (u32, u32),
) -> Result<Array4<f32>, ClassifierError> {
    let image = image::load_from_memory(bytes)
        .map_err(|e| ClassifierError::ImageError(format!("Failed to decode image: {}", e)))?;
    tensor_from_image(image, target_size)
}

fn tensor_from_image(
    image: DynamicImage,
    (target_width, target_height): (u32, u32),
) -> Result<Array4<f32>, ClassifierError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 || target_width == 0 || target_height == 0 {
        return Err(ClassifierError::ImageError(format!(
            "Cannot fit a {}x{} image to {}x{}",
            width, height, target_width, target_height
        )));
    }

    let fitted = fit(image, target_width, target_height);
    let rgb = fitted.to_rgb8();

    let mut tensor = Array4::zeros((1, target_height as usize, target_width as usize, 3));
    for (x, y, pixel) in rgb.enumerate_pixels() {
        for channel in 0..3 {
            tensor[[0, y as usize, x as usize, channel]] =
                f32::from(pixel[channel]) / 127.5 - 1.0;
        }
    }
    Ok(tensor)
}

/// Scales the image so it covers the target rectangle, then crops the excess
/// around the center, so the aspect ratio is preserved without distortion.
fn fit(image: DynamicImage, target_width: u32, target_height: u32) -> DynamicImage {
    let (width, height) = image.dimensions();
    let scale = f64::max(
        f64::from(target_width) / f64::from(width),
        f64::from(target_height) / f64::from(height),
    );
    let scaled_width = ((f64::from(width) * scale).round() as u32).max(target_width);
    let scaled_height = ((f64::from(height) * scale).round() as u32).max(target_height);

    let resized = image.resize_exact(scaled_width, scaled_height, FilterType::Lanczos3);
    let left = (scaled_width - target_width) / 2;
    let top = (scaled_height - target_height) / 2;
    resized.crop_imm(left, top, target_width, target_height)
}
