//! Choosing the point size a glyph is rendered at.

use crate::font::{GlyphExtent, GlyphSource};

/// Smallest point size the auto-scale search may reach.
const MIN_POINT_SIZE: u32 = 1;
/// Applied to the shrink factor every second iteration of the auto-scale search.
const DAMPING: f64 = 0.99;

/// Point size chosen for a glyph together with the glyph extent at this size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fit {
    /// Point size (em size in pixels).
    pub point_size: u32,
    /// Ink extent of the glyph at [`Self::point_size`].
    pub extent: GlyphExtent,
    /// Number of shrinking steps taken by the search (0 for fixed factors).
    pub iterations: u32,
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // sizes are positive and small
fn round_point_size(size: f64) -> u32 {
    (size.round() as u32).max(MIN_POINT_SIZE)
}

pub(super) fn fixed(
    font: &impl GlyphSource,
    codepoint: char,
    working_size: u32,
    factor: f64,
) -> Fit {
    let point_size = round_point_size(f64::from(working_size) * factor);
    Fit {
        point_size,
        extent: font.measure(codepoint, point_size),
        iterations: 0,
    }
}

/// Searches for a point size at which the glyph fits into a `working_size` square.
///
/// Each step rescales proportionally to the overshoot; the shrink factor decays every
/// other step so that rounding cannot make the search oscillate forever. If the glyph
/// does not fit even at the minimum point size, the search stops there.
pub(super) fn auto(font: &impl GlyphSource, codepoint: char, working_size: u32) -> Fit {
    let mut point_size = working_size;
    let mut extent = font.measure(codepoint, point_size);
    let mut iterations = 0_u32;
    let mut shrink_factor = 1.0_f64;

    while extent.max_side() > working_size && point_size > MIN_POINT_SIZE {
        let working_size_f = f64::from(working_size);
        let overshoot = working_size_f / f64::from(extent.max_side());
        point_size = round_point_size(working_size_f * overshoot * shrink_factor);
        extent = font.measure(codepoint, point_size);
        log::debug!(
            "U+{:04X}: trying point size {point_size}, extent {}x{}",
            u32::from(codepoint),
            extent.width,
            extent.height
        );

        iterations += 1;
        if iterations % 2 == 0 {
            shrink_factor *= DAMPING;
        }
    }

    Fit {
        point_size,
        extent,
        iterations,
    }
}
