use image::GrayImage;

use crate::{GlyphExtent, GlyphFont, GlyphSource};


pub(crate) const FIXTURE_FONT: &[u8] = include_bytes!("../../tests/fixtures/DejaVuSansMono.ttf");
pub(crate) const FIXTURE_CSS: &str = include_str!("../../tests/fixtures/demo-icons.css");

pub(crate) fn fixture_font() -> GlyphFont {
    GlyphFont::from_vec(FIXTURE_FONT.to_vec()).unwrap()
}

/// Glyph source drawing solid rectangles with fixed aspect ratios, which makes
/// glyph extents exactly predictable.
#[derive(Debug)]
pub(crate) struct BoxGlyphs;

impl BoxGlyphs {
    /// Glyph that does not fit into any canvas regardless of the point size.
    pub(crate) const UNFITTABLE: char = 'x';

    fn ratios(codepoint: char) -> Option<(f64, f64)> {
        Some(match codepoint {
            'w' => (1.6, 0.5),
            't' => (0.5, 1.6),
            'c' => (2.5, 0.5),
            's' => (0.5, 0.5),
            _ => return None,
        })
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn scaled(point_size: u32, ratio: f64) -> u32 {
        (f64::from(point_size) * ratio).round() as u32
    }
}

impl GlyphSource for BoxGlyphs {
    fn measure(&self, codepoint: char, point_size: u32) -> GlyphExtent {
        if codepoint == Self::UNFITTABLE {
            return GlyphExtent {
                width: 1_000,
                height: 10,
            };
        }
        Self::ratios(codepoint).map_or_else(GlyphExtent::default, |(width, height)| GlyphExtent {
            width: Self::scaled(point_size, width),
            height: Self::scaled(point_size, height),
        })
    }

    fn draw(&self, codepoint: char, point_size: u32, origin: (i64, i64), mask: &mut GrayImage) {
        let extent = self.measure(codepoint, point_size);
        for y in 0..extent.height {
            for x in 0..extent.width {
                let x = u32::try_from(origin.0 + i64::from(x));
                let y = u32::try_from(origin.1 + i64::from(y));
                if let (Ok(x), Ok(y)) = (x, y) {
                    if x < mask.width() && y < mask.height() {
                        mask.put_pixel(x, y, image::Luma([u8::MAX]));
                    }
                }
            }
        }
    }
}
