/// Viewer configuration: minimum tile size and colour rules.
///
/// Stored as JSON. A missing file yields the defaults; a malformed one is an
/// error so the caller can report it instead of silently overwriting it.
use crate::color::{default_rules, ColorMap, ColorRule};
use crate::error::{Error, Result};
use crate::layout::DEFAULT_MIN_PIXEL_SIZE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerSettings {
    #[serde(default = "default_min_pixel_size")]
    pub min_pixel_size: u32,
    #[serde(default = "default_rules")]
    pub color_mappings: Vec<ColorRule>,
}

fn default_min_pixel_size() -> u32 {
    DEFAULT_MIN_PIXEL_SIZE
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            min_pixel_size: DEFAULT_MIN_PIXEL_SIZE,
            color_mappings: default_rules(),
        }
    }
}

impl ViewerSettings {
    /// `<config dir>/treelens/settings.json`, or `None` on platforms without
    /// a config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("treelens").join("settings.json"))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let settings: Self = serde_json::from_str(&content).map_err(|e| Error::json(path, e))?;
        settings.validate()?;
        info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }

        let content = serde_json::to_string_pretty(self).map_err(|e| Error::json(path, e))?;
        std::fs::write(path, content).map_err(|e| Error::io(path, e))?;
        info!("Saved settings to {}", path.display());
        Ok(())
    }

    /// Colours are already checked during deserialisation; only the pixel
    /// threshold is left.
    pub fn validate(&self) -> Result<()> {
        if self.min_pixel_size == 0 {
            return Err(Error::InvalidMinPixelSize(self.min_pixel_size));
        }
        Ok(())
    }

    pub fn color_map(&self) -> ColorMap {
        ColorMap::from_rules(&self.color_mappings)
    }
}
