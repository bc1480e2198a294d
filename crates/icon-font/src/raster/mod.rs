//! Rasterizing glyphs into tightly bounded, centered RGBA images.

use std::{fmt, num::ParseFloatError, str::FromStr};

use image::{
    imageops::{self, FilterType},
    GrayImage, RgbaImage,
};

pub use self::fit::Fit;
use crate::{
    font::{GlyphFont, GlyphSource},
    Color, Error, ErrorKind, IconIndex,
};

pub(crate) mod composite;
mod fit;

/// Smaller icons are rendered at this size and downsampled afterwards, so that
/// antialiasing is not lost at the cropping step.
pub const MIN_WORKING_SIZE: u32 = 150;

/// Size of the canvas an icon with the specified target size is rendered on.
pub fn working_size(target_size: u32) -> u32 {
    target_size.max(MIN_WORKING_SIZE)
}

/// How the font size is chosen relative to the canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum ScalePolicy {
    /// Largest font size at which the glyph fits into the canvas.
    #[default]
    Auto,
    /// Font size is the canvas size multiplied by this factor from `(0, 1]`.
    /// Wide glyphs may be clipped.
    Fixed(f64),
}

impl fmt::Display for ScalePolicy {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => formatter.write_str("auto"),
            Self::Fixed(factor) => fmt::Display::fmt(factor, formatter),
        }
    }
}

impl FromStr for ScalePolicy {
    type Err = ParseScaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("auto") {
            return Ok(Self::Auto);
        }
        let factor: f64 = s.trim().parse().map_err(ParseScaleError::NotANumber)?;
        if is_valid_factor(factor) {
            Ok(Self::Fixed(factor))
        } else {
            Err(ParseScaleError::OutOfRange(factor))
        }
    }
}

fn is_valid_factor(factor: f64) -> bool {
    factor > 0.0 && factor <= 1.0
}

/// Errors that can occur when parsing a [`ScalePolicy`].
#[derive(Debug)]
#[non_exhaustive]
pub enum ParseScaleError {
    /// Value is neither `auto` nor a number.
    NotANumber(ParseFloatError),
    /// Factor is outside `(0, 1]`.
    OutOfRange(f64),
}

impl fmt::Display for ParseScaleError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotANumber(err) => {
                write!(formatter, "expected `auto` or a number: {err}")
            }
            Self::OutOfRange(factor) => {
                write!(formatter, "scale factor {factor} is outside (0, 1]")
            }
        }
    }
}

impl std::error::Error for ParseScaleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotANumber(err) => Some(err),
            Self::OutOfRange(_) => None,
        }
    }
}

/// Size, color and scaling of a rendered icon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Width and height of the output image in pixels.
    pub size: u32,
    /// Fill color.
    pub color: Color,
    /// Font size selection.
    pub scale: ScalePolicy,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            size: 16,
            color: Color::BLACK,
            scale: ScalePolicy::Auto,
        }
    }
}

/// Request to render a single codepoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderRequest {
    /// Codepoint of the glyph.
    pub codepoint: char,
    /// Rendering options.
    pub options: RenderOptions,
}

/// Renders glyphs of an icon font into square RGBA images.
///
/// Each render allocates its own canvases, so a single rasterizer can be shared
/// among threads if the glyph source allows it.
///
/// # Examples
///
/// ```no_run
/// # use icon_font::{Color, GlyphFont, GlyphRasterizer, IconIndex, RenderOptions};
/// let index = IconIndex::open("font-awesome.css", true)?;
/// let rasterizer = GlyphRasterizer::new(GlyphFont::open("fontawesome-webfont.ttf")?);
/// let options = RenderOptions {
///     size: 64,
///     color: Color::rgb(0x12, 0x31, 0x23),
///     ..RenderOptions::default()
/// };
/// let image = rasterizer.render_icon(&index, "rocket", options)?;
/// assert_eq!(image.dimensions(), (64, 64));
/// # Ok::<_, icon_font::Error>(())
/// ```
#[derive(Debug)]
pub struct GlyphRasterizer<F = GlyphFont> {
    font: F,
}

impl<F: GlyphSource> GlyphRasterizer<F> {
    /// Creates a rasterizer drawing glyphs from the provided source.
    pub fn new(font: F) -> Self {
        Self { font }
    }

    /// Returns the glyph source.
    pub fn font(&self) -> &F {
        &self.font
    }

    /// Chooses the point size for `codepoint` on a `working_size` canvas.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidScale`](ErrorKind::InvalidScale) if a fixed factor is outside `(0, 1]`.
    pub fn fit(
        &self,
        codepoint: char,
        working_size: u32,
        scale: ScalePolicy,
    ) -> Result<Fit, Error> {
        let fit = match scale {
            ScalePolicy::Auto => fit::auto(&self.font, codepoint, working_size),
            ScalePolicy::Fixed(factor) if is_valid_factor(factor) => {
                fit::fixed(&self.font, codepoint, working_size, factor)
            }
            ScalePolicy::Fixed(factor) => return Err(ErrorKind::InvalidScale(factor).into()),
        };
        log::debug!(
            "U+{:04X} at {working_size}px ({scale}): point size {}, extent {}x{}",
            u32::from(codepoint),
            fit.point_size,
            fit.extent.width,
            fit.extent.height
        );
        Ok(fit)
    }

    /// Renders a codepoint.
    ///
    /// The glyph is drawn on a canvas of at least [`MIN_WORKING_SIZE`] pixels, cropped to
    /// its opaque pixels, recentered and finally resized to the requested size.
    ///
    /// # Errors
    ///
    /// - [`InvalidSize`](ErrorKind::InvalidSize) / [`InvalidScale`](ErrorKind::InvalidScale)
    ///   for invalid options.
    /// - [`EmptyGlyph`](ErrorKind::EmptyGlyph) if the glyph has no visible pixels.
    pub fn render(&self, request: &RenderRequest) -> Result<RgbaImage, Error> {
        let RenderRequest { codepoint, options } = *request;
        if options.size == 0 {
            return Err(ErrorKind::InvalidSize.into());
        }
        let working_size = working_size(options.size);
        let fit = self.fit(codepoint, working_size, options.scale)?;

        let mut mask = GrayImage::new(working_size, working_size);
        let origin = (
            centered_offset(working_size, fit.extent.width),
            centered_offset(working_size, fit.extent.height),
        );
        self.font.draw(codepoint, fit.point_size, origin, &mut mask);

        let icon = composite::colorize(&mask, options.color);
        let bounds = composite::opaque_bounds(&icon).ok_or(ErrorKind::EmptyGlyph { codepoint })?;
        let mut canvas = composite::recenter(&icon, bounds, options.color);

        if working_size != options.size {
            canvas = imageops::resize(&canvas, options.size, options.size, FilterType::Lanczos3);
        }
        Ok(canvas)
    }

    /// Resolves `name` in the `index` (see [`IconIndex::resolve()`]) and renders the icon.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownIcon`](ErrorKind::UnknownIcon) if the name cannot be resolved;
    /// otherwise, the same errors as [`Self::render()`]. Errors mention `name`.
    pub fn render_icon(
        &self,
        index: &IconIndex,
        name: &str,
        options: RenderOptions,
    ) -> Result<RgbaImage, Error> {
        let entry = index.resolve(name).ok_or_else(|| Error::unknown_icon(name))?;
        let request = RenderRequest {
            codepoint: entry.codepoint,
            options,
        };
        self.render(&request).map_err(|err| err.for_icon(name))
    }
}

/// Offset centering a span of `len` pixels on a `canvas` span (floored; negative if
/// the span does not fit).
fn centered_offset(canvas: u32, len: u32) -> i64 {
    (i64::from(canvas) - i64::from(len)).div_euclid(2)
}
