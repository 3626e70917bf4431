/// Tile and size-bar colours.
///
/// Colours are stored as plain RGB triples so the engine stays free of UI
/// types; the GUI converts them at paint time.
use crate::error::{Error, Result};
use crate::model::TreeNode;
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// An opaque sRGB colour, written as `#rrggbb` in settings files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Scale every channel by `factor` (clamped to `0..=1`). Used for the
    /// darker tile borders.
    pub fn darken(self, factor: f32) -> Self {
        let f = factor.clamp(0.0, 1.0);
        let scale = |c: u8| (c as f32 * f).round() as u8;
        Self::new(scale(self.r), scale(self.g), scale(self.b))
    }
}

impl FromStr for Rgb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidColor(s.to_string());
        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for Rgb {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Directory tiles.
pub const DEFAULT_DIR_COLOR: Rgb = Rgb::new(0x4a, 0x90, 0xe2);
/// Files without a matching rule.
pub const DEFAULT_FILE_COLOR: Rgb = Rgb::new(0x95, 0xa5, 0xa6);
/// Selection outline.
pub const HIGHLIGHT_COLOR: Rgb = Rgb::new(0xff, 0x00, 0x00);

/// One `extension → colour` rule as stored in the settings file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorRule {
    pub extension: String,
    pub color: Rgb,
    /// Display name shown in the legend, e.g. "JavaScript".
    #[serde(default)]
    pub name: String,
}

impl ColorRule {
    pub fn new(extension: &str, color: Rgb, name: &str) -> Self {
        Self {
            extension: extension.to_string(),
            color,
            name: name.to_string(),
        }
    }
}

/// Built-in rules used when no settings file exists.
pub fn default_rules() -> Vec<ColorRule> {
    [
        ("js", 0xf7df1e, "JavaScript"),
        ("ts", 0x3178c6, "TypeScript"),
        ("rs", 0xdea584, "Rust"),
        ("java", 0xb07219, "Java"),
        ("py", 0x3572a5, "Python"),
        ("html", 0xe34c26, "HTML"),
        ("css", 0x563d7c, "CSS"),
        ("json", 0x292929, "JSON"),
        ("md", 0x083fa1, "Markdown"),
        ("pdf", 0xb30b00, "PDF"),
        ("jpg", 0x2ecc71, "JPEG image"),
        ("png", 0x27ae60, "PNG image"),
        ("mp4", 0x8e44ad, "Video"),
        ("mp3", 0x9b59b6, "Audio"),
        ("zip", 0xe67e22, "Archive"),
        ("exe", 0xc0392b, "Executable"),
    ]
    .into_iter()
    .map(|(ext, hex, name)| {
        let [_, r, g, b] = u32::to_be_bytes(hex);
        ColorRule::new(ext, Rgb::new(r, g, b), name)
    })
    .collect()
}

/// Extension lookup with lower-cased keys.
#[derive(Debug, Clone)]
pub struct ColorMap {
    by_extension: HashMap<CompactString, Rgb>,
    dir_color: Rgb,
    file_color: Rgb,
}

impl Default for ColorMap {
    fn default() -> Self {
        Self::from_rules(&default_rules())
    }
}

impl ColorMap {
    /// Later rules override earlier ones for the same extension. A leading
    /// dot on the extension is ignored.
    pub fn from_rules(rules: &[ColorRule]) -> Self {
        let by_extension = rules
            .iter()
            .map(|rule| (normalise_extension(&rule.extension), rule.color))
            .filter(|(ext, _)| !ext.is_empty())
            .collect();
        Self {
            by_extension,
            dir_color: DEFAULT_DIR_COLOR,
            file_color: DEFAULT_FILE_COLOR,
        }
    }

    /// Fill colour for a tile.
    pub fn color_for(&self, node: &TreeNode) -> Rgb {
        if node.is_dir {
            return self.dir_color;
        }
        node.extension
            .as_deref()
            .and_then(|ext| self.color_for_extension(ext))
            .unwrap_or(self.file_color)
    }

    pub fn color_for_extension(&self, extension: &str) -> Option<Rgb> {
        self.by_extension
            .get(normalise_extension(extension).as_str())
            .copied()
    }

    pub fn len(&self) -> usize {
        self.by_extension.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_extension.is_empty()
    }
}

fn normalise_extension(ext: &str) -> CompactString {
    CompactString::from(ext.trim().trim_start_matches('.').to_lowercase())
}

/// Size-bar colour for a percentage of the parent: green for small shares
/// through yellow and orange to red for 90 % and above.
pub fn size_band_color(percent: f32) -> Rgb {
    if percent < 25.0 {
        Rgb::new(0x28, 0xa7, 0x45)
    } else if percent < 50.0 {
        Rgb::new(0x7b, 0xc0, 0x43)
    } else if percent < 75.0 {
        Rgb::new(0xff, 0xc1, 0x07)
    } else if percent < 90.0 {
        Rgb::new(0xfd, 0x7e, 0x14)
    } else {
        Rgb::new(0xdc, 0x35, 0x45)
    }
}
