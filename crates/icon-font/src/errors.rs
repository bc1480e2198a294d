use std::{
    error, fmt, io,
    path::{Path, PathBuf},
};

/// Kind of an [`Error`].
#[derive(Debug)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Stylesheet or font file cannot be opened or read.
    SourceUnreadable(io::Error),
    /// Font data cannot be parsed.
    FontUnreadable(ab_glyph::InvalidFont),
    /// The `content` value of an icon rule is not a codepoint reference.
    MalformedContent {
        /// Raw declaration value.
        value: String,
    },
    /// Requested icon is not present in the index.
    UnknownIcon,
    /// Glyph renders to a fully transparent canvas.
    EmptyGlyph {
        /// Rendered codepoint.
        codepoint: char,
    },
    /// Target size is zero.
    InvalidSize,
    /// Fixed scale factor is outside `(0, 1]`.
    InvalidScale(f64),
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceUnreadable(err) => write!(formatter, "cannot read source: {err}"),
            Self::FontUnreadable(err) => write!(formatter, "cannot parse font: {err}"),
            Self::MalformedContent { value } => {
                write!(
                    formatter,
                    "`content` value {value:?} is not a codepoint reference"
                )
            }
            Self::UnknownIcon => formatter.write_str("unknown icon name"),
            Self::EmptyGlyph { codepoint } => {
                write!(
                    formatter,
                    "glyph for U+{:04X} renders to an empty image",
                    u32::from(*codepoint)
                )
            }
            Self::InvalidSize => formatter.write_str("target size must be positive"),
            Self::InvalidScale(factor) => {
                write!(formatter, "scale factor {factor} is outside (0, 1]")
            }
        }
    }
}

/// Errors produced when building an [`IconIndex`](crate::IconIndex), loading a
/// [`GlyphFont`](crate::GlyphFont) or rendering icons.
#[derive(Debug)]
pub struct Error {
    pub(crate) kind: ErrorKind,
    pub(crate) path: Option<PathBuf>,
    pub(crate) icon: Option<String>,
}

impl fmt::Display for Error {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(path) = &self.path {
            write!(formatter, "[{}] ", path.display())?;
        }
        if let Some(icon) = &self.icon {
            write!(formatter, "icon `{icon}`: ")?;
        }
        fmt::Display::fmt(&self.kind, formatter)
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match &self.kind {
            ErrorKind::SourceUnreadable(err) => Some(err),
            ErrorKind::FontUnreadable(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self {
            kind,
            path: None,
            icon: None,
        }
    }
}

impl Error {
    pub(crate) fn unreadable(err: io::Error) -> Self {
        ErrorKind::SourceUnreadable(err).into()
    }

    pub(crate) fn unknown_icon(name: &str) -> Self {
        Error::from(ErrorKind::UnknownIcon).for_icon(name)
    }

    pub(crate) fn malformed_content(name: &str, value: &str) -> Self {
        Error::from(ErrorKind::MalformedContent {
            value: value.to_owned(),
        })
        .for_icon(name)
    }

    pub(crate) fn at_path(mut self, path: &Path) -> Self {
        self.path = Some(path.to_owned());
        self
    }

    pub(crate) fn for_icon(mut self, name: &str) -> Self {
        self.icon = Some(name.to_owned());
        self
    }

    /// Gets the error kind.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Gets the file this error relates to.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Gets the name of the icon this error relates to.
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }
}
