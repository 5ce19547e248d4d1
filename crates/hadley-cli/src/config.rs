//! `hadley.toml` configuration.
//!
//! ```toml
//! [themes]
//! dirs = ["themes"]          # relative to the config file
//! include_builtin = true
//! default = "nostromo"
//!
//! [switcher]
//! storage_key = "hadley-theme"
//! default_color_mode = "dark"
//!
//! [preset]
//! properties = ["bg", "text", "border", "ring", "outline"]
//! variants = ["hover", "focus-visible"]
//! safelist = ["animate-pulse"]
//!
//! [output]
//! css_dir = "public/themes"
//! ```
//!
//! Every section and key is optional.

use std::fs;
use std::path::{Path, PathBuf};

use hadley::presets::DEFAULT_THEME;
use hadley::store::{LoadDirError, StoreError};
use hadley::switcher::DEFAULT_STORAGE_KEY;
use hadley::{ColorMode, PresetConfig, SwitcherConfig, ThemeStore};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "hadley.toml";

/// Resolved runtime configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub themes: ThemesConfig,
    pub switcher: SwitcherSection,
    pub preset: PresetConfig,
    pub output: OutputConfig,
}

/// `[themes]`: where theme definitions come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemesConfig {
    /// Directories of JSON/TOML theme files, loaded in order.
    pub dirs: Vec<PathBuf>,
    /// Whether the shipped themes come first.
    pub include_builtin: bool,
    /// Theme selected when nothing is persisted.
    pub default: String,
}

impl Default for ThemesConfig {
    fn default() -> Self {
        Self {
            dirs: Vec::new(),
            include_builtin: true,
            default: DEFAULT_THEME.to_string(),
        }
    }
}

/// `[switcher]`: persisted key and default color mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SwitcherSection {
    pub storage_key: String,
    pub default_color_mode: ColorMode,
}

impl Default for SwitcherSection {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            default_color_mode: ColorMode::Dark,
        }
    }
}

/// `[output]`: artifact locations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub css_dir: Option<PathBuf>,
}

/// Error loading configuration or the themes it names.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error(transparent)]
    Themes(#[from] LoadDirError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl Config {
    /// Load the explicit config, else `./hadley.toml` when present, else
    /// defaults.
    ///
    /// # Errors
    /// Returns `ConfigError` if a config file cannot be read or parsed.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        Self::discover(explicit, Path::new("."))
    }

    fn discover(explicit: Option<&Path>, cwd: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        let candidate = cwd.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            Self::from_file(&candidate)
        } else {
            debug!("No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Load a config file. Relative paths inside it resolve against the
    /// file's directory.
    ///
    /// # Errors
    /// Returns `ConfigError` if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if let Some(base) = path.parent() {
            config.resolve_relative(base);
        }
        debug!(config.path = %path.display(), "Config loaded");
        Ok(config)
    }

    fn resolve_relative(&mut self, base: &Path) {
        for dir in &mut self.themes.dirs {
            if dir.is_relative() {
                *dir = base.join(&*dir);
            }
        }
        if let Some(dir) = self.output.css_dir.as_mut().filter(|d| d.is_relative()) {
            *dir = base.join(&*dir);
        }
    }

    /// Build the theme store: shipped themes (unless disabled) followed by
    /// each configured directory.
    ///
    /// # Errors
    /// Returns `ConfigError` if a directory fails to load or a theme name is
    /// declared twice.
    pub fn theme_store(&self) -> Result<ThemeStore, ConfigError> {
        let mut store = if self.themes.include_builtin {
            ThemeStore::builtin()
        } else {
            ThemeStore::new()
        };
        for dir in &self.themes.dirs {
            store.extend(ThemeStore::load_dir(dir)?)?;
        }
        Ok(store)
    }

    /// Switcher settings from `[themes]` and `[switcher]`.
    pub fn switcher_config(&self) -> SwitcherConfig {
        SwitcherConfig {
            storage_key: self.switcher.storage_key.clone(),
            default_theme: self.themes.default.clone(),
            default_color_mode: self.switcher.default_color_mode,
        }
    }
}
