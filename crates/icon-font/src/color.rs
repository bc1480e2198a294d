//! Fill colors for rendered icons.

use std::{fmt, num::ParseIntError, str::FromStr};

use image::Rgba;

/// RGBA fill color.
///
/// Can be parsed from a CSS color name (`black`, `rebeccapurple`), a hex triplet
/// (`#123`, `#123123`), a hex color with alpha (`#1234`, `#12312380`), or an
/// `rgb(..)` / `rgba(..)` function with integer channels.
///
/// # Examples
///
/// ```
/// # use icon_font::Color;
/// let color: Color = "cyan".parse()?;
/// assert_eq!(color, Color::rgb(0, 255, 255));
/// let color: Color = "#12312380".parse()?;
/// assert_eq!(color.alpha(), 0x80);
/// # Ok::<_, icon_font::ParseColorError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(Rgba<u8>);

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// Creates an opaque color.
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self(Rgba([red, green, blue, u8::MAX]))
    }

    /// Creates a color with the specified alpha channel.
    pub const fn rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self(Rgba([red, green, blue, alpha]))
    }

    /// Looks up a CSS named color (case-insensitive).
    pub fn named(name: &str) -> Option<Self> {
        let name = name.to_ascii_lowercase();
        let idx = NAMED_COLORS
            .binary_search_by_key(&name.as_str(), |&(name, _)| name)
            .ok()?;
        let [red, green, blue] = NAMED_COLORS[idx].1;
        Some(Self::rgb(red, green, blue))
    }

    /// Returns the alpha channel.
    pub fn alpha(self) -> u8 {
        self.0[3]
    }

    /// Returns this color as an `image` pixel.
    pub fn to_rgba(self) -> Rgba<u8> {
        self.0
    }

    /// Returns this color with alpha replaced by `alpha`.
    #[must_use]
    pub fn with_alpha(self, alpha: u8) -> Self {
        let Rgba([red, green, blue, _]) = self.0;
        Self::rgba(red, green, blue, alpha)
    }

    fn from_hex(hex: &str) -> Result<Self, ParseColorError> {
        if !hex.bytes().all(|byte| byte.is_ascii_hexdigit()) {
            return Err(ParseColorError::InvalidHex);
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16);
        let short_channel = |pos: usize| channel(pos..pos + 1).map(|val| val * 17);

        Ok(match hex.len() {
            3 => Self::rgb(short_channel(0)?, short_channel(1)?, short_channel(2)?),
            4 => Self::rgba(
                short_channel(0)?,
                short_channel(1)?,
                short_channel(2)?,
                short_channel(3)?,
            ),
            6 => Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?),
            8 => Self::rgba(channel(0..2)?, channel(2..4)?, channel(4..6)?, channel(6..8)?),
            _ => return Err(ParseColorError::InvalidHex),
        })
    }

    fn from_function(args: &str, with_alpha: bool) -> Result<Self, ParseColorError> {
        let channels = args
            .split(',')
            .map(|channel| channel.trim().parse::<u8>())
            .collect::<Result<Vec<_>, _>>()?;
        match (channels.as_slice(), with_alpha) {
            (&[red, green, blue], false) => Ok(Self::rgb(red, green, blue)),
            (&[red, green, blue, alpha], true) => Ok(Self::rgba(red, green, blue, alpha)),
            _ => Err(ParseColorError::ChannelCount(channels.len())),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Rgba([red, green, blue, alpha]) = self.0;
        write!(formatter, "#{red:02x}{green:02x}{blue:02x}")?;
        if alpha != u8::MAX {
            write!(formatter, "{alpha:02x}")?;
        }
        Ok(())
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return Self::from_hex(hex);
        }
        let lowercase = s.to_ascii_lowercase();
        if let Some(args) = function_args(&lowercase, "rgba") {
            return Self::from_function(args, true);
        }
        if let Some(args) = function_args(&lowercase, "rgb") {
            return Self::from_function(args, false);
        }
        Self::named(s).ok_or(ParseColorError::UnknownName)
    }
}

fn function_args<'a>(s: &'a str, name: &str) -> Option<&'a str> {
    s.strip_prefix(name)?
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')
}

/// Errors that can occur when parsing a [`Color`].
#[derive(Debug)]
#[non_exhaustive]
pub enum ParseColorError {
    /// Name is not a known CSS color.
    UnknownName,
    /// Hex color has an unsupported length or non-hex digits.
    InvalidHex,
    /// `rgb(..)` / `rgba(..)` has an unexpected number of channels.
    ChannelCount(usize),
    /// Channel value is not an integer in `0..=255`.
    Channel(ParseIntError),
}

impl From<ParseIntError> for ParseColorError {
    fn from(err: ParseIntError) -> Self {
        Self::Channel(err)
    }
}

impl fmt::Display for ParseColorError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownName => formatter.write_str("unknown color name"),
            Self::InvalidHex => formatter.write_str(
                "hex color must have 3, 4, 6 or 8 hex digits after `#`",
            ),
            Self::ChannelCount(count) => {
                write!(formatter, "unexpected number of color channels ({count})")
            }
            Self::Channel(err) => write!(formatter, "invalid color channel: {err}"),
        }
    }
}

impl std::error::Error for ParseColorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Channel(err) => Some(err),
            _ => None,
        }
    }
}

/// CSS named colors, sorted by name.
pub(crate) const NAMED_COLORS: &[(&str, [u8; 3])] = &[
    ("aliceblue", [240, 248, 255]),
    ("antiquewhite", [250, 235, 215]),
    ("aqua", [0, 255, 255]),
    ("aquamarine", [127, 255, 212]),
    ("azure", [240, 255, 255]),
    ("beige", [245, 245, 220]),
    ("bisque", [255, 228, 196]),
    ("black", [0, 0, 0]),
    ("blanchedalmond", [255, 235, 205]),
    ("blue", [0, 0, 255]),
    ("blueviolet", [138, 43, 226]),
    ("brown", [165, 42, 42]),
    ("burlywood", [222, 184, 135]),
    ("cadetblue", [95, 158, 160]),
    ("chartreuse", [127, 255, 0]),
    ("chocolate", [210, 105, 30]),
    ("coral", [255, 127, 80]),
    ("cornflowerblue", [100, 149, 237]),
    ("cornsilk", [255, 248, 220]),
    ("crimson", [220, 20, 60]),
    ("cyan", [0, 255, 255]),
    ("darkblue", [0, 0, 139]),
    ("darkcyan", [0, 139, 139]),
    ("darkgoldenrod", [184, 134, 11]),
    ("darkgray", [169, 169, 169]),
    ("darkgreen", [0, 100, 0]),
    ("darkgrey", [169, 169, 169]),
    ("darkkhaki", [189, 183, 107]),
    ("darkmagenta", [139, 0, 139]),
    ("darkolivegreen", [85, 107, 47]),
    ("darkorange", [255, 140, 0]),
    ("darkorchid", [153, 50, 204]),
    ("darkred", [139, 0, 0]),
    ("darksalmon", [233, 150, 122]),
    ("darkseagreen", [143, 188, 143]),
    ("darkslateblue", [72, 61, 139]),
    ("darkslategray", [47, 79, 79]),
    ("darkslategrey", [47, 79, 79]),
    ("darkturquoise", [0, 206, 209]),
    ("darkviolet", [148, 0, 211]),
    ("deeppink", [255, 20, 147]),
    ("deepskyblue", [0, 191, 255]),
    ("dimgray", [105, 105, 105]),
    ("dimgrey", [105, 105, 105]),
    ("dodgerblue", [30, 144, 255]),
    ("firebrick", [178, 34, 34]),
    ("floralwhite", [255, 250, 240]),
    ("forestgreen", [34, 139, 34]),
    ("fuchsia", [255, 0, 255]),
    ("gainsboro", [220, 220, 220]),
    ("ghostwhite", [248, 248, 255]),
    ("gold", [255, 215, 0]),
    ("goldenrod", [218, 165, 32]),
    ("gray", [128, 128, 128]),
    ("green", [0, 128, 0]),
    ("greenyellow", [173, 255, 47]),
    ("grey", [128, 128, 128]),
    ("honeydew", [240, 255, 240]),
    ("hotpink", [255, 105, 180]),
    ("indianred", [205, 92, 92]),
    ("indigo", [75, 0, 130]),
    ("ivory", [255, 255, 240]),
    ("khaki", [240, 230, 140]),
    ("lavender", [230, 230, 250]),
    ("lavenderblush", [255, 240, 245]),
    ("lawngreen", [124, 252, 0]),
    ("lemonchiffon", [255, 250, 205]),
    ("lightblue", [173, 216, 230]),
    ("lightcoral", [240, 128, 128]),
    ("lightcyan", [224, 255, 255]),
    ("lightgoldenrodyellow", [250, 250, 210]),
    ("lightgray", [211, 211, 211]),
    ("lightgreen", [144, 238, 144]),
    ("lightgrey", [211, 211, 211]),
    ("lightpink", [255, 182, 193]),
    ("lightsalmon", [255, 160, 122]),
    ("lightseagreen", [32, 178, 170]),
    ("lightskyblue", [135, 206, 250]),
    ("lightslategray", [119, 136, 153]),
    ("lightslategrey", [119, 136, 153]),
    ("lightsteelblue", [176, 196, 222]),
    ("lightyellow", [255, 255, 224]),
    ("lime", [0, 255, 0]),
    ("limegreen", [50, 205, 50]),
    ("linen", [250, 240, 230]),
    ("magenta", [255, 0, 255]),
    ("maroon", [128, 0, 0]),
    ("mediumaquamarine", [102, 205, 170]),
    ("mediumblue", [0, 0, 205]),
    ("mediumorchid", [186, 85, 211]),
    ("mediumpurple", [147, 112, 219]),
    ("mediumseagreen", [60, 179, 113]),
    ("mediumslateblue", [123, 104, 238]),
    ("mediumspringgreen", [0, 250, 154]),
    ("mediumturquoise", [72, 209, 204]),
    ("mediumvioletred", [199, 21, 133]),
    ("midnightblue", [25, 25, 112]),
    ("mintcream", [245, 255, 250]),
    ("mistyrose", [255, 228, 225]),
    ("moccasin", [255, 228, 181]),
    ("navajowhite", [255, 222, 173]),
    ("navy", [0, 0, 128]),
    ("oldlace", [253, 245, 230]),
    ("olive", [128, 128, 0]),
    ("olivedrab", [107, 142, 35]),
    ("orange", [255, 165, 0]),
    ("orangered", [255, 69, 0]),
    ("orchid", [218, 112, 214]),
    ("palegoldenrod", [238, 232, 170]),
    ("palegreen", [152, 251, 152]),
    ("paleturquoise", [175, 238, 238]),
    ("palevioletred", [219, 112, 147]),
    ("papayawhip", [255, 239, 213]),
    ("peachpuff", [255, 218, 185]),
    ("peru", [205, 133, 63]),
    ("pink", [255, 192, 203]),
    ("plum", [221, 160, 221]),
    ("powderblue", [176, 224, 230]),
    ("purple", [128, 0, 128]),
    ("rebeccapurple", [102, 51, 153]),
    ("red", [255, 0, 0]),
    ("rosybrown", [188, 143, 143]),
    ("royalblue", [65, 105, 225]),
    ("saddlebrown", [139, 69, 19]),
    ("salmon", [250, 128, 114]),
    ("sandybrown", [244, 164, 96]),
    ("seagreen", [46, 139, 87]),
    ("seashell", [255, 245, 238]),
    ("sienna", [160, 82, 45]),
    ("silver", [192, 192, 192]),
    ("skyblue", [135, 206, 235]),
    ("slateblue", [106, 90, 205]),
    ("slategray", [112, 128, 144]),
    ("slategrey", [112, 128, 144]),
    ("snow", [255, 250, 250]),
    ("springgreen", [0, 255, 127]),
    ("steelblue", [70, 130, 180]),
    ("tan", [210, 180, 140]),
    ("teal", [0, 128, 128]),
    ("thistle", [216, 191, 216]),
    ("tomato", [255, 99, 71]),
    ("turquoise", [64, 224, 208]),
    ("violet", [238, 130, 238]),
    ("wheat", [245, 222, 179]),
    ("white", [255, 255, 255]),
    ("whitesmoke", [245, 245, 245]),
    ("yellow", [255, 255, 0]),
    ("yellowgreen", [154, 205, 50]),
];
