//! Font access used by the rasterizer.

use std::{fmt, fs, path::Path};

use ab_glyph::{Font as _, FontVec, OutlinedGlyph, PxScale};
use image::{GrayImage, Luma};

use crate::{Error, ErrorKind};

/// Ink extent of a glyph in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GlyphExtent {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl GlyphExtent {
    /// Returns the larger of the two dimensions.
    pub fn max_side(self) -> u32 {
        self.width.max(self.height)
    }

    /// Checks whether the extent contains no pixels.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Source of glyphs for [`GlyphRasterizer`](crate::GlyphRasterizer).
///
/// The point size is the em size in pixels.
pub trait GlyphSource {
    /// Measures the ink bounding box of the glyph for `codepoint`. Missing and blank
    /// glyphs have an empty extent.
    fn measure(&self, codepoint: char, point_size: u32) -> GlyphExtent;

    /// Draws the glyph for `codepoint` into `mask` so that the top-left corner of its ink
    /// bounding box lands at `origin`. Coverage is written at full intensity (255 for
    /// completely covered pixels); parts outside the mask are clipped.
    fn draw(&self, codepoint: char, point_size: u32, origin: (i64, i64), mask: &mut GrayImage);
}

/// Font loaded from a TrueType / OpenType file.
pub struct GlyphFont {
    inner: FontVec,
}

impl fmt::Debug for GlyphFont {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("GlyphFont")
            .field("glyph_count", &self.inner.glyph_count())
            .field("units_per_em", &self.inner.units_per_em())
            .finish_non_exhaustive()
    }
}

impl GlyphFont {
    /// Units per em assumed for fonts that do not specify them.
    const DEFAULT_UNITS_PER_EM: f32 = 1_000.0;

    /// Loads a font from the specified file.
    ///
    /// # Errors
    ///
    /// Returns [`SourceUnreadable`](ErrorKind::SourceUnreadable) if the file cannot be read,
    /// and [`FontUnreadable`](ErrorKind::FontUnreadable) if it is not a valid font.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|err| Error::unreadable(err).at_path(path))?;
        Self::from_vec(bytes).map_err(|err| err.at_path(path))
    }

    /// Parses a font from owned bytes.
    ///
    /// # Errors
    ///
    /// Returns [`FontUnreadable`](ErrorKind::FontUnreadable) if the data is not a valid font.
    pub fn from_vec(bytes: Vec<u8>) -> Result<Self, Error> {
        let inner = FontVec::try_from_vec(bytes).map_err(ErrorKind::FontUnreadable)?;
        Ok(Self { inner })
    }

    /// Checks whether the font maps `codepoint` to a glyph other than `.notdef`.
    pub fn has_glyph(&self, codepoint: char) -> bool {
        self.inner.glyph_id(codepoint).0 != 0
    }

    #[allow(clippy::cast_precision_loss)] // point sizes are small
    fn scale(&self, point_size: u32) -> PxScale {
        let units_per_em = self
            .inner
            .units_per_em()
            .unwrap_or(Self::DEFAULT_UNITS_PER_EM);
        // `PxScale` is the height of the ascent-descent span rather than the em size.
        PxScale::from(point_size as f32 * self.inner.height_unscaled() / units_per_em)
    }

    fn outline(&self, codepoint: char, point_size: u32) -> Option<OutlinedGlyph> {
        let glyph_id = self.inner.glyph_id(codepoint);
        if glyph_id.0 == 0 {
            return None;
        }
        let glyph = glyph_id.with_scale(self.scale(point_size));
        self.inner.outline_glyph(glyph)
    }
}

impl GlyphSource for GlyphFont {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // bounds are rounded
    fn measure(&self, codepoint: char, point_size: u32) -> GlyphExtent {
        let Some(outline) = self.outline(codepoint, point_size) else {
            return GlyphExtent::default();
        };
        let bounds = outline.px_bounds();
        GlyphExtent {
            width: bounds.width().max(0.0) as u32,
            height: bounds.height().max(0.0) as u32,
        }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // coverage is in 0..=1
    fn draw(&self, codepoint: char, point_size: u32, origin: (i64, i64), mask: &mut GrayImage) {
        let Some(outline) = self.outline(codepoint, point_size) else {
            return;
        };
        let (width, height) = mask.dimensions();
        outline.draw(|x, y, coverage| {
            let (Ok(x), Ok(y)) = (
                u32::try_from(origin.0 + i64::from(x)),
                u32::try_from(origin.1 + i64::from(y)),
            ) else {
                return;
            };
            if x < width && y < height {
                let value = (coverage.clamp(0.0, 1.0) * 255.0).round() as u8;
                let Luma([current]) = mask.get_pixel_mut(x, y);
                *current = (*current).max(value);
            }
        });
    }
}
