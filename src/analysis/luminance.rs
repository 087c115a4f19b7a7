use image::{DynamicImage, RgbImage};

/// ITU-R BT.601 luma in 16-bit fixed point. The weights sum to 65536, so
/// pure white maps to exactly 255 and gray pixels keep their value.
pub fn rgb_to_luma(r: u8, g: u8, b: u8) -> u8 {
    let weighted = 19595 * r as u32 + 38470 * g as u32 + 7471 * b as u32 + 0x8000;
    (weighted >> 16) as u8
}

/// Mean luma over every pixel, or `None` for an image with no pixels.
pub fn average_luminance(image: &RgbImage) -> Option<f64> {
    mean_luma(
        image.pixels().map(|px| rgb_to_luma(px[0], px[1], px[2])),
        image.width(),
        image.height(),
    )
}

/// Mean luma of a decoded image. 8-bit buffers are read in place; any other
/// layout (16-bit, float) is first scaled down to 8-bit RGB.
pub fn average_image_luminance(image: &DynamicImage) -> Option<f64> {
    let (width, height) = (image.width(), image.height());
    match image {
        DynamicImage::ImageRgb8(rgb) => average_luminance(rgb),
        DynamicImage::ImageRgba8(rgba) => mean_luma(
            rgba.pixels().map(|px| rgb_to_luma(px[0], px[1], px[2])),
            width,
            height,
        ),
        DynamicImage::ImageLuma8(gray) => mean_luma(gray.pixels().map(|px| px[0]), width, height),
        DynamicImage::ImageLumaA8(gray) => {
            mean_luma(gray.pixels().map(|px| px[0]), width, height)
        }
        other => average_luminance(&other.to_rgb8()),
    }
}

fn mean_luma(values: impl Iterator<Item = u8>, width: u32, height: u32) -> Option<f64> {
    let pixel_count = width as u64 * height as u64;
    if pixel_count == 0 {
        return None;
    }

    let total: u64 = values.map(u64::from).sum();
    Some(total as f64 / pixel_count as f64)
}
