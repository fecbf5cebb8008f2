use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImageView, ImageBuffer, Pixel, Rgba, RgbaImage, RgbImage};

use crate::config::BACKGROUND_RGB;

/// Widen any decoded pixel format to RGBA8 so every later step can rely on
/// a 4-channel representation. Indexed-palette sources decode as RGB/RGBA,
/// grayscale as L8/LA8; an image already in RGBA8 passes through without a
/// copy.
pub fn normalize_rgba(img: DynamicImage) -> RgbaImage {
    match img {
        DynamicImage::ImageRgba8(buf) => buf,
        img @ (DynamicImage::ImageLuma8(_) | DynamicImage::ImageLumaA8(_)) => img.into_rgba8(),
        img @ DynamicImage::ImageRgb8(_) => img.into_rgba8(),
        img => img.into_rgba8(),
    }
}

/// Matte `img` onto the theme background color, using its alpha channel as
/// the blend mask. Fully transparent pixels become the background, fully
/// opaque pixels keep the source color, partial alpha blends linearly.
pub fn flatten_onto_background(img: &RgbaImage) -> RgbImage {
    let [r, g, b] = BACKGROUND_RGB;
    let mut canvas = RgbaImage::from_pixel(img.width(), img.height(), Rgba([r, g, b, 255]));
    imageops::overlay(&mut canvas, img, 0, 0);
    DynamicImage::ImageRgba8(canvas).into_rgb8()
}

/// Resize to an exact square with Lanczos resampling. Non-square sources
/// distort to square rather than getting cropped or letterboxed.
pub fn resize_square<I>(
    img: &I,
    size: u32,
) -> ImageBuffer<I::Pixel, Vec<<I::Pixel as Pixel>::Subpixel>>
where
    I: GenericImageView,
    I::Pixel: 'static,
    <I::Pixel as Pixel>::Subpixel: 'static,
{
    imageops::resize(img, size, size, FilterType::Lanczos3)
}
