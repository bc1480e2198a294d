//! Rasterizing glyphs of web icon fonts (Font Awesome, Octicons, etc.).
//!
//! Icon fonts ship as a font file and a stylesheet binding CSS classes to glyphs,
//! e.g. `.fa-rocket:before { content: "\f135"; }`. This crate provides:
//!
//! - [`IconIndex`], which parses such a stylesheet into a name → codepoint map and
//!   figures out the common name prefix (`fa-`), so that icons can be requested with
//!   or without it.
//! - [`GlyphRasterizer`], which renders a glyph into a square RGBA image of the
//!   requested size and color, automatically scaling the glyph so that it fits the image.
//!
//! Encoding images (e.g., as PNG) is left to the caller; rendered images are
//! [`image::RgbaImage`]s.
//!
//! # Examples
//!
//! ```no_run
//! use icon_font::{GlyphFont, GlyphRasterizer, IconIndex, RenderOptions, ScalePolicy};
//!
//! let index = IconIndex::open("octicons.css", true)?;
//! for name in index.names() {
//!     println!("{name}");
//! }
//!
//! let rasterizer = GlyphRasterizer::new(GlyphFont::open("octicons.ttf")?);
//! let options = RenderOptions {
//!     size: 32,
//!     color: "#0366d6".parse().unwrap(),
//!     scale: ScalePolicy::Auto,
//! };
//! let image = rasterizer.render_icon(&index, "octicon-alert", options)?;
//! image.save("alert.png").unwrap();
//! # Ok::<_, icon_font::Error>(())
//! ```

#![doc(html_root_url = "https://docs.rs/icon-font/0.1.0")]

mod color;
mod errors;
mod font;
mod raster;
mod stylesheet;
#[cfg(test)]
mod tests;

pub use crate::{
    color::{Color, ParseColorError},
    errors::{Error, ErrorKind},
    font::{GlyphExtent, GlyphFont, GlyphSource},
    raster::{
        working_size, Fit, GlyphRasterizer, ParseScaleError, RenderOptions, RenderRequest,
        ScalePolicy, MIN_WORKING_SIZE,
    },
    stylesheet::{IconEntry, IconIndex, SkippedRule},
};

#[cfg(doctest)]
doc_comment::doctest!("../README.md");
