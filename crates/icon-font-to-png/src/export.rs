//! Choosing output files and writing rendered icons.

use std::path::Path;

use anyhow::Context as _;
use image::{ImageFormat, RgbaImage};

/// Removes a `.png` extension (in any case) from a user-supplied file name.
fn strip_png_extension(filename: &str) -> &str {
    let len = filename.len();
    match filename.get(len.saturating_sub(4)..) {
        Some(ext) if len >= 4 && ext.eq_ignore_ascii_case(".png") => &filename[..len - 4],
        _ => filename,
    }
}

/// Returns output file names for `icons`. With several icons, `filename` is a prefix;
/// with a single icon, it replaces the icon name.
pub(crate) fn output_file_names(icons: &[&str], filename: Option<&str>) -> Vec<String> {
    let filename = filename.map_or("", strip_png_extension);
    if let [icon] = icons {
        let stem = if filename.is_empty() { *icon } else { filename };
        vec![format!("{stem}.png")]
    } else {
        icons
            .iter()
            .map(|icon| format!("{filename}{icon}.png"))
            .collect()
    }
}

/// Writes `image` as a PNG file.
pub(crate) fn save_png(image: &RgbaImage, path: &Path) -> anyhow::Result<()> {
    image
        .save_with_format(path, ImageFormat::Png)
        .with_context(|| format!("cannot write `{}`", path.display()))
}
