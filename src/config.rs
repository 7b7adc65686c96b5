//! Gallery configuration with TOML preset support.
//!
//! Every field has a documented default and all of them use
//! `#[serde(default)]`, so a preset file overriding only `bend` parses
//! fine. The config is immutable for a gallery instance's lifetime.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::GalleriaError;

/// One gallery entry: an optional image file and a label.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct MediaEntry {
    /// Path to the image file; `None` leaves the placeholder plane.
    pub image: Option<PathBuf>,
    /// Label rasterized under the plane.
    pub label: String,
}

/// Which font the label rasterizer uses, and at what size.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FontSpec {
    /// Path to a TTF/OTF file. `None` probes a few well-known system
    /// font locations.
    pub path: Option<PathBuf>,
    /// Rasterization size in pixels.
    pub size_px: f32,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            path: None,
            size_px: 30.0,
        }
    }
}

/// Well-known bold sans-serif locations, probed in order when no font
/// path is configured.
const FALLBACK_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Bold.ttf",
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
];

impl FontSpec {
    /// Read the configured font file, or the first fallback that exists.
    /// `None` means labels are skipped, a tolerated resource failure
    /// like a missing image.
    pub(crate) fn resolve_bytes(&self) -> Option<Vec<u8>> {
        if let Some(ref path) = self.path {
            return match std::fs::read(path) {
                Ok(bytes) => Some(bytes),
                Err(e) => {
                    log::warn!(
                        "could not read font {}: {e}",
                        path.display()
                    );
                    None
                }
            };
        }
        FALLBACK_FONTS
            .iter()
            .find_map(|candidate| std::fs::read(Path::new(candidate)).ok())
    }
}

/// Everything a gallery instance is built from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GalleryConfig {
    /// Ordered media list; duplicated internally to seed the loop.
    pub items: Vec<MediaEntry>,
    /// Signed curvature. 0 lays the row out flat; positive sags
    /// downward.
    pub bend: f32,
    /// Label fill color, RGBA in [0, 1].
    pub text_color: [f32; 4],
    /// Corner radius as a fraction of plane size (0–0.5).
    pub border_radius: f32,
    /// Label font.
    pub font: FontSpec,
    /// Scroll distance per input unit; higher scrolls further.
    pub scroll_speed: f32,
    /// Per-frame easing fraction in (0, 1); higher is snappier.
    pub scroll_ease: f32,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            bend: 3.0,
            text_color: [1.0, 1.0, 1.0, 1.0],
            border_radius: 0.05,
            font: FontSpec::default(),
            scroll_speed: 2.0,
            scroll_ease: 0.05,
        }
    }
}

impl GalleryConfig {
    /// Load a config from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`GalleriaError::Io`] when the file cannot be read and
    /// [`GalleriaError::ConfigParse`] when it does not parse.
    pub fn load(path: &Path) -> Result<Self, GalleriaError> {
        let content = std::fs::read_to_string(path).map_err(GalleriaError::Io)?;
        toml::from_str(&content)
            .map_err(|e| GalleriaError::ConfigParse(e.to_string()))
    }

    /// Save the config to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`GalleriaError::ConfigParse`] on serialization failure
    /// and [`GalleriaError::Io`] when the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), GalleriaError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| GalleriaError::ConfigParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(GalleriaError::Io)?;
        }
        std::fs::write(path, content).map_err(GalleriaError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let config = GalleryConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: GalleryConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn items_round_trip_through_toml() {
        let config = GalleryConfig {
            items: vec![
                MediaEntry {
                    image: Some(PathBuf::from("a.png")),
                    label: "First".to_owned(),
                },
                MediaEntry {
                    image: None,
                    label: "Second".to_owned(),
                },
            ],
            ..Default::default()
        };
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: GalleryConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
bend = -2.0

[[items]]
label = 'Solo'
";
        let config: GalleryConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.bend, -2.0);
        assert_eq!(config.items.len(), 1);
        assert_eq!(config.items[0].label, "Solo");
        assert_eq!(config.items[0].image, None);
        // Everything else should be default.
        assert_eq!(config.scroll_ease, 0.05);
        assert_eq!(config.border_radius, 0.05);
        assert_eq!(config.font.size_px, 30.0);
    }
}
