//! Alpha-mask compositing and recentering.

use image::{imageops, GrayImage, Rgba, RgbaImage};

use crate::Color;

/// Rectangle of opaque pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Bounds {
    pub(crate) x: u32,
    pub(crate) y: u32,
    pub(crate) width: u32,
    pub(crate) height: u32,
}

/// Creates a transparent canvas. Transparent pixels carry the fill color so that
/// resampling does not darken antialiased edges.
pub(crate) fn transparent_canvas(size: u32, color: Color) -> RgbaImage {
    RgbaImage::from_pixel(size, size, color.with_alpha(0).to_rgba())
}

/// Applies a solid `color` through `mask`: the alpha of each pixel is the mask coverage
/// multiplied by the color alpha.
#[allow(clippy::cast_possible_truncation)] // the product is divided back into `u8` range
pub(crate) fn colorize(mask: &GrayImage, color: Color) -> RgbaImage {
    let Rgba([red, green, blue, alpha]) = color.to_rgba();
    RgbaImage::from_fn(mask.width(), mask.height(), |x, y| {
        let coverage = u16::from(mask.get_pixel(x, y)[0]);
        let pixel_alpha = (coverage * u16::from(alpha) + 127) / 255;
        Rgba([red, green, blue, pixel_alpha as u8])
    })
}

/// Finds the smallest rectangle containing every pixel with non-zero alpha.
pub(crate) fn opaque_bounds(image: &RgbaImage) -> Option<Bounds> {
    let mut min = (u32::MAX, u32::MAX);
    let mut max = (0, 0);
    for (x, y, pixel) in image.enumerate_pixels() {
        if pixel[3] > 0 {
            min = (min.0.min(x), min.1.min(y));
            max = (max.0.max(x), max.1.max(y));
        }
    }

    (min.0 <= max.0 && min.1 <= max.1).then(|| Bounds {
        x: min.0,
        y: min.1,
        width: max.0 - min.0 + 1,
        height: max.1 - min.1 + 1,
    })
}

/// Crops `image` to `bounds` and pastes the crop centered into a fresh transparent canvas
/// of the same (square) size.
pub(crate) fn recenter(image: &RgbaImage, bounds: Bounds, color: Color) -> RgbaImage {
    let size = image.width();
    let cropped =
        imageops::crop_imm(image, bounds.x, bounds.y, bounds.width, bounds.height).to_image();
    let border_x = (size - bounds.width) / 2;
    let border_y = (size - bounds.height) / 2;

    let mut canvas = transparent_canvas(size, color);
    imageops::replace(
        &mut canvas,
        &cropped,
        i64::from(border_x),
        i64::from(border_y),
    );
    canvas
}
