//! Image preprocessing for MRI classification

use anyhow::Result;
use image::DynamicImage;
use ndarray::Array4;

/// Input resolution expected by the classifier.
pub const CLASSIFIER_INPUT_SIZE: (u32, u32) = (256, 256);

/// Preprocess an MRI scan for the classifier.
/// Resizes to exactly 256x256 (no aspect preservation) and converts to a
/// grayscale NCHW tensor with intensities in [0, 1].
pub fn preprocess_for_classification(image: &DynamicImage) -> Array4<f32> {
    let (target_w, target_h) = CLASSIFIER_INPUT_SIZE;

    let resized = image.resize_exact(target_w, target_h, image::imageops::FilterType::Lanczos3);

    image_to_grayscale_nchw(&resized)
}

/// Convert image to a single-channel NCHW tensor scaled to [0, 1]
fn image_to_grayscale_nchw(image: &DynamicImage) -> Array4<f32> {
    let gray = image.to_luma8();
    let (width, height) = gray.dimensions();

    let mut tensor = Array4::<f32>::zeros((1, 1, height as usize, width as usize));

    for y in 0..height {
        for x in 0..width {
            let pixel = gray.get_pixel(x, y);
            tensor[[0, 0, y as usize, x as usize]] = pixel[0] as f32 / 255.0;
        }
    }

    tensor
}

/// Decode image from bytes with EXIF orientation handling
/// This ensures scans are correctly oriented regardless of how they were exported
pub fn decode_image(data: &[u8]) -> Result<DynamicImage> {
    let image = image::load_from_memory(data)?;

    // Try to read EXIF orientation and apply rotation
    let oriented_image = apply_exif_orientation(data, image);

    Ok(oriented_image)
}

/// Apply EXIF orientation to correct image rotation
/// Scanner exports and phone captures often store images with EXIF orientation
/// tags instead of rotating pixels
fn apply_exif_orientation(data: &[u8], image: DynamicImage) -> DynamicImage {
    use std::io::Cursor;

    let orientation = match exif::Reader::new().read_from_container(&mut Cursor::new(data)) {
        Ok(exif_data) => exif_data
            .get_field(exif::Tag::Orientation, exif::In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .unwrap_or(1) as u8,
        Err(_) => 1, // No EXIF or error reading, assume normal orientation
    };

    // See: https://exiftool.org/TagNames/EXIF.html (Orientation)
    match orientation {
        1 => image, // Normal, no transformation needed
        2 => image.fliph(),
        3 => image.rotate180(),
        4 => image.flipv(),
        5 => image.rotate90().fliph(),
        6 => image.rotate90(),
        7 => image.rotate270().fliph(),
        8 => image.rotate270(),
        _ => image, // Unknown orientation, return as-is
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Luma};

    fn constant_image(width: u32, height: u32, value: u8) -> DynamicImage {
        DynamicImage::ImageLuma8(ImageBuffer::from_pixel(width, height, Luma([value])))
    }

    #[test]
    fn test_tensor_shape() {
        let tensor = preprocess_for_classification(&constant_image(100, 80, 0));
        assert_eq!(tensor.shape(), &[1, 1, 256, 256]);
    }

    #[test]
    fn test_intensities_scaled_to_unit_range() {
        let tensor = preprocess_for_classification(&constant_image(300, 300, 255));
        assert!(tensor.iter().all(|&v| (0.0..=1.0).contains(&v)));
        assert!((tensor[[0, 0, 128, 128]] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_mid_gray_maps_to_mid_intensity() {
        let tensor = preprocess_for_classification(&constant_image(256, 256, 128));
        assert!((tensor[[0, 0, 0, 0]] - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_decode_round_trips_png() {
        let image = constant_image(32, 32, 40);
        let mut buffer = std::io::Cursor::new(Vec::new());
        image.write_to(&mut buffer, image::ImageFormat::Png).unwrap();

        let decoded = decode_image(&buffer.into_inner()).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (32, 32));
    }

    #[test]
    fn test_decode_rejects_non_image_bytes() {
        assert!(decode_image(b"not an image").is_err());
    }
}
