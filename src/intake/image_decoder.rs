use std::io::Cursor;

use image::{DynamicImage, ImageReader, Limits};

use crate::{config::Configuration, error::AppError};

/// Decodes raw image bytes, guessing the format from the leading magic bytes.
#[derive(Debug, Clone, Copy)]
pub struct ImageDecoder {
    max_width: u32,
    max_height: u32,
    max_alloc: u64,
}

impl ImageDecoder {
    pub fn new(max_width: u32, max_height: u32) -> Self {
        Self {
            max_width,
            max_height,
            max_alloc: Configuration::default().max_image_alloc_bytes,
        }
    }

    pub fn with_max_alloc(mut self, max_alloc: u64) -> Self {
        self.max_alloc = max_alloc;
        self
    }

    pub fn from_configuration(configuration: &Configuration) -> Self {
        Self::new(configuration.max_image_width, configuration.max_image_height)
            .with_max_alloc(configuration.max_image_alloc_bytes)
    }

    pub fn decode(&self, bytes: &[u8]) -> Result<DynamicImage, AppError> {
        let mut reader = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| AppError::InvalidImage(e.to_string()))?;

        if reader.format().is_none() {
            return Err(AppError::InvalidImage(
                "unrecognized image format".to_string(),
            ));
        }

        let mut limits = Limits::default();
        limits.max_image_width = Some(self.max_width);
        limits.max_image_height = Some(self.max_height);
        limits.max_alloc = Some(self.max_alloc);
        reader.limits(limits);

        let image = reader
            .decode()
            .map_err(|e| AppError::InvalidImage(e.to_string()))?;

        if image.width() == 0 || image.height() == 0 {
            return Err(AppError::InvalidImage(format!(
                "image has zero area ({}x{})",
                image.width(),
                image.height()
            )));
        }

        Ok(image)
    }
}

impl Default for ImageDecoder {
    fn default() -> Self {
        Self::from_configuration(&Configuration::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, ImageFormat, Rgb};

    fn png_bytes(width: u32, height: u32, pixel: Rgb<u8>) -> Vec<u8> {
        let image =
            DynamicImage::ImageRgb8(ImageBuffer::<Rgb<u8>, Vec<u8>>::from_pixel(width, height, pixel));
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .expect("png encoding should succeed");
        bytes
    }

    #[test]
    fn decodes_png_bytes() {
        let image = ImageDecoder::default()
            .decode(&png_bytes(3, 2, Rgb([10, 20, 30])))
            .unwrap();
        assert_eq!((image.width(), image.height()), (3, 2));
        assert_eq!(image.to_rgb8().get_pixel(0, 0), &Rgb([10, 20, 30]));
    }

    #[test]
    fn garbage_bytes_are_invalid() {
        let result = ImageDecoder::default().decode(b"definitely not an image");
        assert!(matches!(result, Err(AppError::InvalidImage(_))));
    }

    #[test]
    fn empty_bytes_are_invalid() {
        let result = ImageDecoder::default().decode(&[]);
        assert!(matches!(result, Err(AppError::InvalidImage(_))));
    }

    #[test]
    fn truncated_png_is_invalid() {
        let bytes = png_bytes(8, 8, Rgb([0, 0, 0]));
        let result = ImageDecoder::default().decode(&bytes[..bytes.len() / 2]);
        assert!(matches!(result, Err(AppError::InvalidImage(_))));
    }

    #[test]
    fn oversized_images_are_rejected() {
        let decoder = ImageDecoder::new(4, 4);
        let result = decoder.decode(&png_bytes(5, 1, Rgb([255, 255, 255])));
        assert!(matches!(result, Err(AppError::InvalidImage(_))));
        assert!(decoder.decode(&png_bytes(4, 4, Rgb([255, 255, 255]))).is_ok());
    }

    #[test]
    fn allocation_limit_is_enforced() {
        // 16x16 RGB needs 768 bytes of pixel buffer
        let bytes = png_bytes(16, 16, Rgb([0, 0, 0]));
        let tight = ImageDecoder::new(8192, 8192).with_max_alloc(512);
        assert!(matches!(tight.decode(&bytes), Err(AppError::InvalidImage(_))));

        let roomy = ImageDecoder::new(8192, 8192).with_max_alloc(1024 * 1024);
        assert!(roomy.decode(&bytes).is_ok());
    }
}
