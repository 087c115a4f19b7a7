use image::DynamicImage;
use tracing::debug;

use crate::{
    analysis::{emotion::EmotionScores, luminance::average_image_luminance},
    error::AppError,
};

/// Brightness heuristic: brighter images read as happier, darker as sadder.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmotionScorer;

impl EmotionScorer {
    pub fn new() -> Self {
        Self
    }

    pub fn score(&self, image: &DynamicImage) -> Result<EmotionScores, AppError> {
        let brightness = self.average_brightness(image)?;
        debug!(
            width = image.width(),
            height = image.height(),
            brightness,
            "Scored image"
        );
        Ok(EmotionScores::from_brightness(brightness))
    }

    /// Mean BT.601 luma of the image. Alpha is ignored.
    pub fn average_brightness(&self, image: &DynamicImage) -> Result<f64, AppError> {
        average_image_luminance(image).ok_or_else(|| {
            AppError::InvalidImage(format!(
                "image has zero area ({}x{})",
                image.width(),
                image.height()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Emotion;
    use image::{ImageBuffer, Luma, Rgb, Rgba};

    fn solid(width: u32, height: u32, pixel: Rgb<u8>) -> DynamicImage {
        DynamicImage::ImageRgb8(ImageBuffer::<Rgb<u8>, Vec<u8>>::from_pixel(width, height, pixel))
    }

    #[test]
    fn black_image_is_sad() {
        let scores = EmotionScorer::new().score(&solid(4, 4, Rgb([0, 0, 0]))).unwrap();
        assert_eq!(scores.get(Emotion::Happy), 0.0);
        assert_eq!(scores.get(Emotion::Sad), 1.0);
    }

    #[test]
    fn white_image_is_happy() {
        let scores = EmotionScorer::new()
            .score(&solid(4, 4, Rgb([255, 255, 255])))
            .unwrap();
        assert_eq!(scores.get(Emotion::Happy), 1.0);
        assert_eq!(scores.get(Emotion::Sad), 0.0);
    }

    #[test]
    fn mid_gray_two_by_two_is_balanced() {
        let scores = EmotionScorer::new()
            .score(&solid(2, 2, Rgb([128, 128, 128])))
            .unwrap();
        assert_eq!(scores.get(Emotion::Happy), 0.5);
        assert_eq!(scores.get(Emotion::Sad), 0.5);
        assert_eq!(scores.get(Emotion::Neutral), 0.5);
    }

    #[test]
    fn zero_area_is_invalid() {
        let result = EmotionScorer::new().score(&DynamicImage::new_rgb8(0, 0));
        assert!(matches!(result, Err(AppError::InvalidImage(_))));
    }

    #[test]
    fn grayscale_and_alpha_inputs_are_supported() {
        let gray = DynamicImage::ImageLuma8(ImageBuffer::from_pixel(3, 3, Luma([255u8])));
        assert_eq!(EmotionScorer::new().average_brightness(&gray).unwrap(), 255.0);

        let transparent_white =
            DynamicImage::ImageRgba8(ImageBuffer::from_pixel(3, 3, Rgba([255u8, 255, 255, 0])));
        let scores = EmotionScorer::new().score(&transparent_white).unwrap();
        assert_eq!(scores.get(Emotion::Happy), 1.0);
    }

    #[test]
    fn one_white_pixel_in_eight_rounds_half_to_even() {
        let mut image = ImageBuffer::<Rgb<u8>, Vec<u8>>::from_pixel(8, 1, Rgb([0, 0, 0]));
        image.put_pixel(3, 0, Rgb([255, 255, 255]));
        let scores = EmotionScorer::new()
            .score(&DynamicImage::ImageRgb8(image))
            .unwrap();
        assert_eq!(scores.get(Emotion::Happy), 0.12);
        assert_eq!(scores.get(Emotion::Sad), 0.88);
    }

    #[test]
    fn every_score_stays_in_unit_range() {
        let scorer = EmotionScorer::new();
        for v in (0..=255u8).step_by(17) {
            let scores = scorer.score(&solid(2, 3, Rgb([v, v / 2, 255 - v]))).unwrap();
            for emotion in Emotion::ALL {
                let value = scores.get(emotion);
                assert!((0.0..=1.0).contains(&value), "{emotion} out of range: {value}");
            }
        }
    }
}
