//! Downloading icon fonts from their upstream locations.

use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use reqwest::blocking::Client;
use serde::Deserialize;

/// Icon font that can be downloaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FontSource {
    /// Key used on the command line.
    pub(crate) key: &'static str,
    /// Human-readable name.
    pub(crate) name: &'static str,
    pub(crate) css_url: &'static str,
    pub(crate) ttf_url: &'static str,
    /// GitHub API endpoint listing repository tags, newest first.
    pub(crate) tags_url: &'static str,
}

impl fmt::Display for FontSource {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.key)
    }
}

pub(crate) const FONT_SOURCES: &[FontSource] = &[
    FontSource {
        key: "font-awesome",
        name: "Font Awesome",
        css_url: "https://cdn.rawgit.com/FortAwesome/Font-Awesome/v4.7.0/css/font-awesome.css",
        ttf_url:
            "https://cdn.rawgit.com/FortAwesome/Font-Awesome/v4.7.0/fonts/fontawesome-webfont.ttf",
        tags_url: "https://api.github.com/repos/FortAwesome/Font-Awesome/tags",
    },
    FontSource {
        key: "octicons",
        name: "Octicons",
        css_url: "https://cdnjs.cloudflare.com/ajax/libs/octicons/4.4.0/font/octicons.css",
        ttf_url: "https://cdnjs.cloudflare.com/ajax/libs/octicons/4.4.0/font/octicons.ttf",
        tags_url: "https://api.github.com/repos/github/octicons/tags",
    },
];

/// Parses a [`FontSource`] key for `clap`.
pub(crate) fn parse_font_source(key: &str) -> Result<&'static FontSource, String> {
    FONT_SOURCES
        .iter()
        .find(|source| source.key == key)
        .ok_or_else(|| {
            let keys: Vec<_> = FONT_SOURCES.iter().map(|source| source.key).collect();
            format!("unsupported icon font `{key}`; expected one of: {}", keys.join(", "))
        })
}

/// Returns the last path segment of a URL, which is used as the local file name.
pub(crate) fn file_name(url: &str) -> Option<&str> {
    let path = url.split(['?', '#']).next()?;
    path.rsplit('/').next().filter(|name| !name.is_empty())
}

#[derive(Debug, Deserialize)]
struct Tag {
    name: String,
}

/// HTTP client for upstream font locations.
#[derive(Debug)]
pub(crate) struct Downloader {
    client: Client,
}

impl Downloader {
    pub(crate) fn new() -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("cannot initialize HTTP client")?;
        Ok(Self { client })
    }

    /// Downloads `url` into `dir`, naming the file after the last URL segment.
    pub(crate) fn download(&self, url: &str, dir: &Path) -> anyhow::Result<PathBuf> {
        let name = file_name(url).with_context(|| format!("URL `{url}` has no file name"))?;
        let path = dir.join(name);
        log::info!("downloading {url} to {}", path.display());

        let bytes = self
            .client
            .get(url)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .and_then(reqwest::blocking::Response::bytes)
            .with_context(|| format!("cannot download `{url}`"))?;
        fs::write(&path, &bytes).with_context(|| format!("cannot write `{}`", path.display()))?;
        log::debug!("downloaded {} bytes from {url}", bytes.len());
        Ok(path)
    }

    /// Downloads the stylesheet and the font file of `source` into `dir`.
    pub(crate) fn download_font(
        &self,
        source: &FontSource,
        dir: &Path,
    ) -> anyhow::Result<(PathBuf, PathBuf)> {
        fs::create_dir_all(dir)
            .with_context(|| format!("cannot create directory `{}`", dir.display()))?;
        let css_path = self.download(source.css_url, dir)?;
        let ttf_path = self.download(source.ttf_url, dir)?;
        Ok((css_path, ttf_path))
    }

    /// Gets the name of the latest upstream tag of `source`.
    pub(crate) fn latest_version(&self, source: &FontSource) -> anyhow::Result<String> {
        let body = self
            .client
            .get(source.tags_url)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .and_then(reqwest::blocking::Response::bytes)
            .with_context(|| format!("cannot fetch tags of {}", source.name))?;
        let tags: Vec<Tag> = serde_json::from_slice(&body)
            .with_context(|| format!("unexpected tags response for {}", source.name))?;
        let latest = tags
            .into_iter()
            .next()
            .with_context(|| format!("{} has no tags", source.name))?;
        Ok(latest.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_sources_are_consistent() {
        for source in FONT_SOURCES {
            assert_eq!(parse_font_source(source.key).unwrap(), source);
            for url in [source.css_url, source.ttf_url, source.tags_url] {
                assert!(url.starts_with("https://"), "{url}");
            }
            assert!(file_name(source.css_url).unwrap().ends_with(".css"));
            assert!(file_name(source.ttf_url).unwrap().ends_with(".ttf"));
            assert!(source.tags_url.ends_with("/tags"));
        }
    }

    #[test]
    fn unsupported_font_source() {
        let err = parse_font_source("material").unwrap_err();
        assert!(err.contains("font-awesome, octicons"), "{err}");
    }

    #[test]
    fn file_names_from_urls() {
        assert_eq!(
            file_name("https://example.com/fonts/icons.ttf?v=4.7.0#iefix"),
            Some("icons.ttf")
        );
        assert_eq!(file_name("https://example.com/icons.css"), Some("icons.css"));
        assert_eq!(file_name("https://example.com/fonts/"), None);
    }

    #[test]
    fn parsing_tags() {
        let json = r#"[{"name": "v4.7.0", "commit": {"sha": "a"}}, {"name": "v4.6.3"}]"#;
        let tags: Vec<Tag> = serde_json::from_str(json).unwrap();
        let names: Vec<_> = tags.into_iter().map(|tag| tag.name).collect();
        assert_eq!(names, ["v4.7.0", "v4.6.3"]);
    }
}
