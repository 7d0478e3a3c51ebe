use image::{Rgb, RgbImage};
use moodlens::{preprocess_bytes, preprocess_file, ClassifierError};
use std::fs;
use std::io::Cursor;

fn png_bytes(width: u32, height: u32, color: Rgb<u8>) -> Vec<u8> {
    let image = RgbImage::from_pixel(width, height, color);
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .expect("Failed to encode fixture image");
    bytes
}

#[test]
fn test_output_shape_matches_target_size() -> Result<(), ClassifierError> {
    for (width, height) in [(64, 48), (224, 224), (1000, 200), (17, 900)] {
        let bytes = png_bytes(width, height, Rgb([10, 20, 30]));
        let tensor = preprocess_bytes(&bytes, (224, 224))?;
        assert_eq!(tensor.shape(), &[1, 224, 224, 3]);
    }
    Ok(())
}

#[test]
fn test_values_stay_in_unit_range() -> Result<(), ClassifierError> {
    let image = RgbImage::from_fn(160, 90, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x * y) % 256) as u8])
    });
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();

    let tensor = preprocess_bytes(&bytes, (64, 64))?;
    for &value in tensor.iter() {
        assert!((-1.0..=1.0).contains(&value), "value {value} out of range");
    }
    Ok(())
}

#[test]
fn test_normalization_of_known_colors() -> Result<(), ClassifierError> {
    // White maps to 1.0, black to -1.0; a solid color survives resampling.
    let white = preprocess_bytes(&png_bytes(50, 50, Rgb([255, 255, 255])), (32, 32))?;
    for &value in white.iter() {
        assert!((value - 1.0).abs() < 0.02);
    }

    let red = preprocess_bytes(&png_bytes(50, 50, Rgb([255, 0, 0])), (32, 32))?;
    assert!((red[[0, 16, 16, 0]] - 1.0).abs() < 0.02);
    assert!((red[[0, 16, 16, 1]] + 1.0).abs() < 0.02);
    assert!((red[[0, 16, 16, 2]] + 1.0).abs() < 0.02);
    Ok(())
}

#[test]
fn test_corrupt_bytes_are_rejected() {
    let result = preprocess_bytes(b"definitely not an image", (224, 224));
    assert!(matches!(result, Err(ClassifierError::ImageError(_))));
}

#[test]
fn test_preprocessing_is_deterministic() -> Result<(), ClassifierError> {
    let image = RgbImage::from_fn(123, 77, |x, y| {
        Rgb([(x * 2 % 256) as u8, (y * 3 % 256) as u8, ((x + y) % 256) as u8])
    });
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();

    let first = preprocess_bytes(&bytes, (224, 224))?;
    let second = preprocess_bytes(&bytes, (224, 224))?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_preprocess_file_roundtrip() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::temp_dir().join(format!("moodlens-preprocess-{}.png", std::process::id()));
    fs::write(&path, png_bytes(300, 200, Rgb([0, 255, 0])))?;

    let tensor = preprocess_file(&path, (128, 128))?;
    assert_eq!(tensor.shape(), &[1, 128, 128, 3]);

    fs::remove_file(path).ok();
    Ok(())
}

#[test]
fn test_preprocess_file_missing_path() {
    let result = preprocess_file("/nonexistent/image.jpg", (224, 224));
    assert!(matches!(result, Err(ClassifierError::ImageError(_))));
}
