//! Configuration module for the skin builder

use serde::Deserialize;
use config::{Config, ConfigError, Environment, File};
use std::path::PathBuf;

/// Main application settings
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub assets: AssetSettings,
    pub selection: SelectionSettings,
    pub export: ExportSettings,
    pub swatch: SwatchSettings,
}

/// Location of palettes, patterns and outfits
#[derive(Debug, Clone, Deserialize)]
pub struct AssetSettings {
    pub path: PathBuf,
}

/// Which assets make up the skin
#[derive(Debug, Clone, Deserialize)]
pub struct SelectionSettings {
    pub pattern: String,
    /// Skin color entry; first palette entry when unset
    pub color: Option<String>,
    /// Mask color entry; first palette entry when unset
    pub mask_color: Option<String>,
    pub top: Option<String>,
    pub bottom: Option<String>,
}

/// Output location
#[derive(Debug, Clone, Deserialize)]
pub struct ExportSettings {
    pub dir: PathBuf,
    /// Also write a swatch PNG per palette entry
    #[serde(default)]
    pub swatches: bool,
}

/// Swatch image size
#[derive(Debug, Clone, Deserialize)]
pub struct SwatchSettings {
    pub width: u32,
    pub height: u32,
}

impl Settings {
    /// Load configuration from files and environment variables
    ///
    /// Configuration priority (highest to lowest):
    /// 1. Environment variables (prefixed with SKIN_)
    /// 2. config/local.toml (gitignored)
    /// 3. config/default.toml
    pub fn load() -> Result<Self, ConfigError> {
        let config_dir = std::env::var("CONFIG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config"));

        let defaults = Settings::default();

        let builder = Config::builder()
            .set_default("assets.path", defaults.assets.path.to_string_lossy().to_string())?
            .set_default("selection.pattern", defaults.selection.pattern)?
            .set_default("export.dir", defaults.export.dir.to_string_lossy().to_string())?
            .set_default("export.swatches", defaults.export.swatches)?
            .set_default("swatch.width", defaults.swatch.width as i64)?
            .set_default("swatch.height", defaults.swatch.height as i64)?
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            // Add local overrides (gitignored)
            .add_source(File::from(config_dir.join("local.toml")).required(false))
            // Add environment variables (SKIN__EXPORT__DIR, etc.)
            .add_source(
                Environment::with_prefix("SKIN")
                    .separator("__")
                    .try_parsing(true)
            );

        builder.build()?.try_deserialize()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            assets: AssetSettings {
                path: PathBuf::from("assets/skins"),
            },
            selection: SelectionSettings {
                pattern: "Default".to_string(),
                color: None,
                mask_color: None,
                top: None,
                bottom: None,
            },
            export: ExportSettings {
                dir: PathBuf::from("render_output"),
                swatches: false,
            },
            swatch: SwatchSettings {
                width: 450,
                height: 200,
            },
        }
    }
}
