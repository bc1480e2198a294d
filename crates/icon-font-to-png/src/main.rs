//! Command-line tool exporting icon font glyphs as PNG images.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::Parser;
use icon_font::{
    Color, ErrorKind, GlyphFont, GlyphRasterizer, IconIndex, RenderOptions, RenderRequest,
    ScalePolicy,
};

use crate::download::{parse_font_source, Downloader, FontSource};

mod download;
mod export;

/// Icon name selecting every icon in the stylesheet.
const ALL_ICONS: &str = "ALL";
const DEFAULT_OUTPUT_DIR: &str = "exported";
/// Largest accepted icon size; canvases are allocated eagerly.
const MAX_SIZE: u32 = 8_192;

/// Exports icon font glyphs as PNG images.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Names of the icons to export (or `ALL` for all icons).
    #[arg(value_name = "ICON")]
    icons: Vec<String>,

    /// Path to the stylesheet mapping icon names to glyphs.
    #[arg(long, value_name = "CSS-FILE")]
    css: Option<PathBuf>,

    /// Path to the TrueType / OpenType font file.
    #[arg(long, value_name = "TTF-FILE")]
    ttf: Option<PathBuf>,

    /// List all available icon names and exit.
    #[arg(long)]
    list: bool,

    /// Download the icon font stylesheet and font file and exit.
    #[arg(long, value_name = "FONT", value_parser = parse_font_source)]
    download: Option<&'static FontSource>,

    /// Print the latest upstream version of the icon font and exit.
    #[arg(long, value_name = "FONT", value_parser = parse_font_source)]
    latest_version: Option<&'static FontSource>,

    /// Icon size in pixels (at most 8192).
    #[arg(
        long,
        default_value_t = 16,
        value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_SIZE))
    )]
    size: u32,

    /// Scaling factor between 0 and 1, or `auto` for automatic scaling.
    /// Fixed factors may lead to icons being cropped.
    #[arg(long, default_value_t = ScalePolicy::Auto)]
    scale: ScalePolicy,

    /// Color name or hex value.
    #[arg(long, default_value = "black")]
    color: Color,

    /// Name of the output file (`.png` extension is optional);
    /// used as a prefix if multiple icons are exported.
    #[arg(long)]
    filename: Option<String>,

    /// Do not remove the common icon prefix (e.g., `fa-arrow-right` instead of `arrow-right`).
    #[arg(long, alias = "keep_prefix")]
    keep_prefix: bool,

    /// Output directory. Defaults to `exported` for icons and to the current directory
    /// for downloads.
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,
}

impl Cli {
    fn run(self) -> anyhow::Result<()> {
        if let Some(source) = self.latest_version {
            let version = Downloader::new()?.latest_version(source)?;
            println!("{version}");
            return Ok(());
        }
        if let Some(source) = self.download {
            let dir = self.output_dir.as_deref().unwrap_or(Path::new("."));
            Downloader::new()?.download_font(source, dir)?;
            println!("Icon font '{source}' successfully downloaded");
            return Ok(());
        }

        let (Some(css), Some(ttf)) = (&self.css, &self.ttf) else {
            anyhow::bail!("You have to provide CSS and TTF files");
        };
        let index = IconIndex::open(css, !self.keep_prefix)?;
        log::info!(
            "loaded {} icons from {} (common prefix {:?})",
            index.len(),
            css.display(),
            index.common_prefix()
        );
        let font = GlyphFont::open(ttf)?;

        if self.list {
            for name in index.names() {
                println!("{name}");
            }
            return Ok(());
        }
        self.export(&index, font)
    }

    fn export(&self, index: &IconIndex, font: GlyphFont) -> anyhow::Result<()> {
        let export_all = self.icons == [ALL_ICONS];
        let icons = self.select_icons(index)?;
        let names: Vec<_> = icons.iter().map(|(name, _)| *name).collect();
        let file_names = export::output_file_names(&names, self.filename.as_deref());

        let output_dir = self
            .output_dir
            .as_deref()
            .unwrap_or(Path::new(DEFAULT_OUTPUT_DIR));
        fs::create_dir_all(output_dir)
            .with_context(|| format!("cannot create directory `{}`", output_dir.display()))?;

        let rasterizer = GlyphRasterizer::new(font);
        let options = RenderOptions {
            size: self.size,
            color: self.color,
            scale: self.scale,
        };
        for (&(name, codepoint), file_name) in icons.iter().zip(&file_names) {
            let request = RenderRequest { codepoint, options };
            let image = match rasterizer.render(&request) {
                Ok(image) => image,
                Err(err) if export_all && matches!(err.kind(), ErrorKind::EmptyGlyph { .. }) => {
                    log::warn!("skipping icon '{name}': {err}");
                    continue;
                }
                Err(err) => {
                    let err = anyhow::Error::new(err);
                    return Err(err.context(format!("cannot export icon '{name}'")));
                }
            };

            let size = self.size;
            println!("Exporting icon '{name}' as '{file_name}' ({size}x{size} pixels)");
            export::save_png(&image, &output_dir.join(file_name))?;
        }
        println!("All done");
        Ok(())
    }

    /// Resolves all requested icons before anything is rendered.
    fn select_icons<'a>(&self, index: &'a IconIndex) -> anyhow::Result<Vec<(&'a str, char)>> {
        if self.icons.is_empty() {
            anyhow::bail!("You have to pass at least one icon name");
        }
        if self.icons == [ALL_ICONS] {
            return Ok(index.iter().map(|icon| (icon.name, icon.codepoint)).collect());
        }
        self.icons
            .iter()
            .map(|name| -> anyhow::Result<_> {
                let icon = index
                    .resolve(name)
                    .with_context(|| format!("Unknown icon name '{name}'"))?;
                Ok((icon.name, icon.codepoint))
            })
            .collect()
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    Cli::parse().run()
}
