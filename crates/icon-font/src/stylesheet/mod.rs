//! Icon index built from an icon font stylesheet.

use std::{borrow::Cow, collections::BTreeMap, fs, io::Read, path::Path};

use self::rules::{declarations, strip_comments, Rules};
use crate::Error;

mod rules;

/// Icon name together with the codepoint of its glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconEntry<'a> {
    /// Icon name as exposed by the index (i.e., possibly with the common prefix stripped).
    pub name: &'a str,
    /// Codepoint of the icon glyph.
    pub codepoint: char,
}

/// Mapping from icon names to codepoints, parsed from rules like
/// `.fa-rocket:before { content: "\f135"; }`.
///
/// The index is immutable once built. Names are enumerated in sorted order.
///
/// # Examples
///
/// ```
/// # use icon_font::IconIndex;
/// let css = r#"
///     .foo-bar:before { content: '\f001'; }
///     .foo-xyzzy:before { content: '\f002'; }
/// "#;
/// let index = IconIndex::parse(css, true);
/// assert_eq!(index.common_prefix(), "foo-");
/// assert_eq!(index.get("bar"), Some('\u{f001}'));
/// // Prefixed names are normalized on lookup.
/// assert_eq!(index.resolve("foo-xyzzy").unwrap().name, "xyzzy");
/// ```
#[derive(Debug, Clone, Default)]
pub struct IconIndex {
    icons: BTreeMap<String, char>,
    common_prefix: String,
    prefix_stripped: bool,
    skipped: Vec<SkippedRule>,
}

/// Icon whose rule was skipped because its `content` value is malformed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRule {
    /// Raw (unstripped) icon name.
    pub name: String,
    /// Raw `content` value.
    pub value: String,
}

impl SkippedRule {
    /// Converts this record into a [`MalformedContent`](crate::ErrorKind::MalformedContent) error.
    pub fn to_error(&self) -> Error {
        Error::malformed_content(&self.name, &self.value)
    }
}

impl IconIndex {
    /// Reads a stylesheet from the specified path and builds an index from it.
    ///
    /// # Errors
    ///
    /// Returns [`SourceUnreadable`](crate::ErrorKind::SourceUnreadable) if the file cannot be read.
    pub fn open(path: impl AsRef<Path>, strip_prefix: bool) -> Result<Self, Error> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|err| Error::unreadable(err).at_path(path))?;
        Ok(Self::parse(&String::from_utf8_lossy(&bytes), strip_prefix))
    }

    /// Reads a stylesheet from the provided reader and builds an index from it.
    ///
    /// # Errors
    ///
    /// Returns [`SourceUnreadable`](crate::ErrorKind::SourceUnreadable) if reading fails.
    pub fn from_reader(mut reader: impl Read, strip_prefix: bool) -> Result<Self, Error> {
        let mut bytes = vec![];
        reader.read_to_end(&mut bytes).map_err(Error::unreadable)?;
        Ok(Self::parse(&String::from_utf8_lossy(&bytes), strip_prefix))
    }

    /// Builds an index from stylesheet text. Rules with malformed `content` are skipped
    /// and can be inspected via [`Self::skipped()`].
    pub fn parse(stylesheet: &str, strip_prefix: bool) -> Self {
        let stylesheet = strip_comments(stylesheet);
        let mut icons = BTreeMap::new();
        let mut names = Vec::new();
        let mut skipped = Vec::new();

        for rule in Rules::new(&stylesheet) {
            let rule_names: Vec<_> = rule.selector.split(',').filter_map(icon_class).collect();
            if rule_names.is_empty() {
                continue;
            }
            log::trace!("icon rule `{}`", rule.selector);
            names.extend_from_slice(&rule_names);

            let content = declarations(rule.body)
                .filter(|(name, _)| name == "content")
                .last();
            let Some((_, value)) = content else {
                continue;
            };
            match parse_codepoint(value) {
                Ok(Some(codepoint)) => {
                    for name in rule_names {
                        icons.insert(name.to_owned(), codepoint);
                    }
                }
                Ok(None) => { /* not an icon, e.g. `content: ""` */ }
                Err(()) => {
                    for name in rule_names {
                        log::warn!("skipping icon `{name}`: malformed `content` value {value:?}");
                        skipped.push(SkippedRule {
                            name: name.to_owned(),
                            value: value.to_owned(),
                        });
                    }
                }
            }
        }

        let common_prefix = usable_prefix(&names).to_owned();
        if strip_prefix && !common_prefix.is_empty() {
            icons = icons
                .into_iter()
                .map(|(name, codepoint)| (name[common_prefix.len()..].to_owned(), codepoint))
                .collect();
        }

        Self {
            icons,
            common_prefix,
            prefix_stripped: strip_prefix,
            skipped,
        }
    }

    /// Returns the prefix shared by all raw icon names (e.g., `fa-`). May be empty.
    pub fn common_prefix(&self) -> &str {
        &self.common_prefix
    }

    /// Checks whether the index was built with the common prefix stripped from names.
    pub fn is_prefix_stripped(&self) -> bool {
        self.prefix_stripped
    }

    /// Returns the number of icons.
    pub fn len(&self) -> usize {
        self.icons.len()
    }

    /// Checks whether the index contains no icons.
    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }

    /// Looks up an icon by its exact name.
    pub fn get(&self, name: &str) -> Option<char> {
        self.icons.get(name).copied()
    }

    /// Iterates over icon names in sorted order.
    pub fn names(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.icons.keys().map(String::as_str)
    }

    /// Iterates over icons in sorted name order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = IconEntry<'_>> + '_ {
        self.icons
            .iter()
            .map(|(name, &codepoint)| IconEntry { name, codepoint })
    }

    /// Resolves a user-supplied icon name, adding or removing the common prefix
    /// depending on how the index was built. Falls back to the name as given.
    pub fn resolve(&self, name: &str) -> Option<IconEntry<'_>> {
        let prefix = self.common_prefix.as_str();
        let normalized: Option<Cow<'_, str>> = if self.prefix_stripped {
            name.strip_prefix(prefix).map(Into::into)
        } else if name.starts_with(prefix) {
            None
        } else {
            Some(format!("{prefix}{name}").into())
        };

        normalized
            .and_then(|normalized| self.entry(&normalized))
            .or_else(|| self.entry(name))
    }

    fn entry(&self, name: &str) -> Option<IconEntry<'_>> {
        let (name, &codepoint) = self.icons.get_key_value(name)?;
        Some(IconEntry { name, codepoint })
    }

    /// Returns icons skipped because of a malformed `content` value.
    pub fn skipped(&self) -> &[SkippedRule] {
        &self.skipped
    }
}

/// Extracts the class name from a `.name:before` / `.name::before` selector.
fn icon_class(selector: &str) -> Option<&str> {
    let selector = selector.trim().strip_prefix('.')?;
    let name = selector
        .strip_suffix("::before")
        .or_else(|| selector.strip_suffix(":before"))?;
    let is_class_name = name
        .chars()
        .all(|ch| ch.is_alphanumeric() || matches!(ch, '-' | '_'));
    (!name.is_empty() && is_class_name).then_some(name)
}

/// Parses a `content` value like `"\f135"`. Returns `Ok(None)` for values that do not
/// designate a glyph (empty strings, bare backslashes and keywords like `none`).
fn parse_codepoint(value: &str) -> Result<Option<char>, ()> {
    let value = value.trim();
    if matches!(value, "none" | "normal" | "inherit" | "initial" | "unset") {
        return Ok(None);
    }
    let value = unquote(value);
    let Some(hex) = value.strip_prefix('\\') else {
        let mut chars = value.chars();
        return match (chars.next(), chars.next()) {
            (None, _) => Ok(None),
            (Some(ch), None) => Ok(Some(ch)),
            (Some(_), Some(_)) => Err(()),
        };
    };

    // CSS escapes may be terminated by a single whitespace char.
    let hex = hex.trim_end();
    let mut chars = hex.chars();
    match (chars.next(), chars.next()) {
        (None, _) => return Ok(None),
        // Escaped non-hex char stands for itself, e.g. `'\''`.
        (Some(ch), None) if !ch.is_ascii_hexdigit() => return Ok(Some(ch)),
        _ => { /* hex escape */ }
    }
    if hex.len() > 6 || !hex.bytes().all(|byte| byte.is_ascii_hexdigit()) {
        return Err(());
    }
    let codepoint = u32::from_str_radix(hex, 16).map_err(drop)?;
    char::from_u32(codepoint).map(Some).ok_or(())
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|value| value.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

/// Longest common prefix of two strings, respecting char boundaries.
fn common_prefix<'a>(lhs: &'a str, rhs: &str) -> &'a str {
    let len = lhs
        .char_indices()
        .zip(rhs.chars())
        .find(|((_, lhs_ch), rhs_ch)| lhs_ch != rhs_ch)
        .map_or_else(|| lhs.len().min(rhs.len()), |((pos, _), _)| pos);
    &lhs[..len]
}

/// Computes the common prefix of `names` that can be stripped without emptying any name.
/// If the longest common prefix is a whole name (e.g., there is a single icon), it is cut
/// back to its last `-` or `_` separator.
fn usable_prefix<'a>(names: &[&'a str]) -> &'a str {
    let Some((&first, rest)) = names.split_first() else {
        return "";
    };
    let prefix = rest
        .iter()
        .fold(first, |prefix, name| common_prefix(prefix, name));

    if names.iter().any(|name| name.len() == prefix.len()) {
        let last_char_len = prefix.chars().next_back().map_or(0, char::len_utf8);
        let without_last = &prefix[..prefix.len() - last_char_len];
        match without_last.rfind(['-', '_']) {
            Some(pos) => &prefix[..=pos],
            None => "",
        }
    } else {
        prefix
    }
}
