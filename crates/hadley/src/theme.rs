//! Theme definitions: a named binding of every registry token to a value.
//!
//! A [`Theme`] is authored once and never mutated at runtime. Its base token
//! values are the dark rendering; `light` holds the overrides applied when
//! the document root carries `data-color-scheme="light"`.
//!
//! Themes can be built in code or loaded from JSON/TOML files:
//!
//! ```rust
//! use hadley::theme::Theme;
//!
//! let theme = Theme::new("mother")
//!     .with_label("MOTHER")
//!     .with_token("color-background", "150 20% 4%")
//!     .with_token("color-primary", "130 80% 55%");
//!
//! assert_eq!(theme.selector(), r#"[data-theme="mother"]"#);
//! assert_eq!(theme.token("color-primary"), Some("130 80% 55%"));
//! ```

use std::collections::BTreeMap;
use std::fmt;
#[cfg(not(target_arch = "wasm32"))]
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::HslColor;
use crate::registry::{Shade, scale_token_name};

/// DOM attribute carrying the active theme name.
pub const THEME_ATTRIBUTE: &str = "data-theme";

/// DOM attribute carrying the active color mode.
pub const COLOR_SCHEME_ATTRIBUTE: &str = "data-color-scheme";

/// Scoping selector for a theme name: `[data-theme="<name>"]`.
pub fn selector_for(name: &str) -> String {
    format!("[{THEME_ATTRIBUTE}=\"{name}\"]")
}

/// Whether `name` can be used as a theme identifier and selector value.
///
/// Names are non-empty and made of lowercase ASCII letters, digits and `-`,
/// starting with a letter or digit.
pub fn is_valid_theme_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('-')
        && name
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

/// A complete, named binding of tokens to values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    /// Identifier and `data-theme` value.
    name: String,

    /// Display label.
    #[serde(default)]
    label: String,

    /// Free-text description.
    #[serde(default)]
    description: String,

    /// Scoping selector; must embed the theme's own name.
    #[serde(default)]
    selector: String,

    /// Token values (dark rendering).
    #[serde(default)]
    tokens: BTreeMap<String, String>,

    /// Overrides for the light color mode.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    light: BTreeMap<String, String>,

    /// Documentation metadata.
    #[serde(default, skip_serializing_if = "ThemeMeta::is_empty")]
    meta: ThemeMeta,
}

/// A named color used to illustrate a theme in documentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Swatch {
    pub name: String,
    pub value: HslColor,
}

/// Dominant colors of a theme, for documentation pages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThemeMeta {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub swatches: Vec<Swatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl ThemeMeta {
    fn is_empty(&self) -> bool {
        self.swatches.is_empty() && self.source.is_none()
    }
}

/// Display metadata returned by the theme store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThemeInfo {
    pub name: String,
    pub label: String,
    pub description: String,
    pub selector: String,
    pub swatches: Vec<SwatchInfo>,
}

/// A swatch with its hex rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwatchInfo {
    pub name: String,
    pub value: String,
    pub hex: String,
}

/// Generates the shade scale of a color role from a hue and saturation.
///
/// Lightness falls linearly with the shade step: `50` is near white and
/// `950` near black, so shades stay ordered for any scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadeRamp {
    hue: f32,
    saturation: f32,
}

impl ShadeRamp {
    const TOP: f32 = 97.0;
    const SLOPE: f32 = 0.09;

    /// Create a ramp. Hue wraps into `[0, 360)`, saturation is clamped.
    pub fn new(hue: f32, saturation: f32) -> Self {
        Self {
            hue: hue.rem_euclid(360.0),
            saturation: saturation.clamp(0.0, 100.0),
        }
    }

    /// Color at `shade`.
    pub fn color(&self, shade: Shade) -> HslColor {
        let lightness = (Self::TOP - f32::from(shade) * Self::SLOPE).clamp(2.0, 98.0);
        HslColor::clamped(self.hue, self.saturation, (lightness * 10.0).round() / 10.0)
    }

    /// `(token name, value)` pairs for every shade of `role`.
    pub fn tokens<'a>(
        &'a self,
        role: &'a str,
        shades: &'a [Shade],
    ) -> impl Iterator<Item = (String, String)> + 'a {
        shades
            .iter()
            .map(move |&shade| (scale_token_name(role, shade), self.color(shade).to_string()))
    }
}

impl Theme {
    /// Create an empty theme whose selector is derived from `name`.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            selector: selector_for(&name),
            label: name.clone(),
            name,
            description: String::new(),
            tokens: BTreeMap::new(),
            light: BTreeMap::new(),
            meta: ThemeMeta::default(),
        }
    }

    /// Theme identifier.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Free-text description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Scoping selector as authored.
    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// Documentation metadata.
    pub fn meta(&self) -> &ThemeMeta {
        &self.meta
    }

    /// Base (dark) token values.
    pub fn tokens(&self) -> &BTreeMap<String, String> {
        &self.tokens
    }

    /// Light color-mode overrides.
    pub fn light_overrides(&self) -> &BTreeMap<String, String> {
        &self.light
    }

    /// Base value of a token.
    pub fn token(&self, name: &str) -> Option<&str> {
        self.tokens.get(name).map(String::as_str)
    }

    /// Value of a token in the light color mode, falling back to the base value.
    pub fn light_token(&self, name: &str) -> Option<&str> {
        self.light
            .get(name)
            .map(String::as_str)
            .or_else(|| self.token(name))
    }

    /// Parsed color value of a token, if present and canonical.
    pub fn color(&self, name: &str) -> Option<HslColor> {
        self.token(name).and_then(|v| v.parse().ok())
    }

    /// Contrast ratio between two color tokens, if both are canonical colors.
    pub fn contrast_ratio(&self, fg: &str, bg: &str) -> Option<f64> {
        Some(self.color(fg)?.contrast_ratio(&self.color(bg)?))
    }

    /// Display metadata.
    pub fn info(&self) -> ThemeInfo {
        ThemeInfo {
            name: self.name.clone(),
            label: self.label.clone(),
            description: self.description.clone(),
            selector: self.selector.clone(),
            swatches: self
                .meta
                .swatches
                .iter()
                .map(|s| SwatchInfo {
                    name: s.name.clone(),
                    value: s.value.to_string(),
                    hex: s.value.to_hex(),
                })
                .collect(),
        }
    }

    /// Sets the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Overrides the scoping selector.
    pub fn with_selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = selector.into();
        self
    }

    /// Sets one base token value.
    pub fn with_token(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.tokens.insert(name.into(), value.into());
        self
    }

    /// Sets several base token values.
    pub fn with_tokens<I, K, V>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.tokens
            .extend(tokens.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Removes a base token value.
    pub fn without_token(mut self, name: &str) -> Self {
        self.tokens.remove(name);
        self
    }

    /// Sets the full shade scale of `role` from a ramp.
    pub fn with_scale(mut self, role: &str, ramp: ShadeRamp, shades: &[Shade]) -> Self {
        self.tokens.extend(ramp.tokens(role, shades));
        self
    }

    /// Sets a light color-mode override.
    pub fn with_light(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.light.insert(name.into(), value.into());
        self
    }

    /// Adds a documentation swatch.
    pub fn with_swatch(mut self, name: impl Into<String>, value: HslColor) -> Self {
        self.meta.swatches.push(Swatch {
            name: name.into(),
            value,
        });
        self
    }

    /// Replaces documentation metadata.
    pub fn with_meta(mut self, meta: ThemeMeta) -> Self {
        self.meta = meta;
        self
    }

    /// Load a theme from JSON.
    ///
    /// # Errors
    /// Returns `ThemeLoadError` if parsing fails or the name is invalid.
    pub fn from_json(json: &str) -> Result<Self, ThemeLoadError> {
        let theme: Theme = serde_json::from_str(json)?;
        theme.check_name()
    }

    /// Load a theme from TOML.
    ///
    /// # Errors
    /// Returns `ThemeLoadError` if parsing fails or the name is invalid.
    pub fn from_toml(toml: &str) -> Result<Self, ThemeLoadError> {
        let theme: Theme = toml::from_str(toml)?;
        theme.check_name()
    }

    /// Load a theme from YAML.
    ///
    /// # Errors
    /// Returns `ThemeLoadError` if parsing fails or the name is invalid.
    #[cfg(feature = "yaml")]
    pub fn from_yaml(yaml: &str) -> Result<Self, ThemeLoadError> {
        let theme: Theme = serde_yaml::from_str(yaml)?;
        theme.check_name()
    }

    /// Load a theme from a file, choosing the format by extension.
    ///
    /// # Errors
    /// Returns `ThemeLoadError` if reading or parsing fails.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ThemeLoadError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        match ThemeFormat::from_path(path)? {
            ThemeFormat::Json => Self::from_json(&content),
            ThemeFormat::Toml => Self::from_toml(&content),
            #[cfg(feature = "yaml")]
            ThemeFormat::Yaml => Self::from_yaml(&content),
        }
    }

    /// Serialize to pretty JSON.
    ///
    /// # Errors
    /// Returns `ThemeSaveError` if serialization fails.
    pub fn to_json(&self) -> Result<String, ThemeSaveError> {
        serde_json::to_string_pretty(self).map_err(ThemeSaveError::Json)
    }

    /// Serialize to TOML.
    ///
    /// # Errors
    /// Returns `ThemeSaveError` if serialization fails.
    pub fn to_toml(&self) -> Result<String, ThemeSaveError> {
        toml::to_string_pretty(self).map_err(ThemeSaveError::Toml)
    }

    /// Write the theme to a file, choosing the format by extension.
    ///
    /// # Errors
    /// Returns `ThemeSaveError` if serialization or writing fails.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<(), ThemeSaveError> {
        let path = path.as_ref();
        let content = match ThemeFormat::from_path(path) {
            Ok(ThemeFormat::Json) => self.to_json()?,
            Ok(ThemeFormat::Toml) => self.to_toml()?,
            #[cfg(feature = "yaml")]
            Ok(ThemeFormat::Yaml) => serde_yaml::to_string(self).map_err(ThemeSaveError::Yaml)?,
            Err(ThemeLoadError::UnsupportedFormat(ext)) => {
                return Err(ThemeSaveError::UnsupportedFormat(ext));
            }
            Err(other) => return Err(ThemeSaveError::UnsupportedFormat(other.to_string())),
        };
        fs::write(path, content).map_err(ThemeSaveError::Io)
    }

    fn check_name(self) -> Result<Self, ThemeLoadError> {
        if is_valid_theme_name(&self.name) {
            Ok(self)
        } else {
            Err(ThemeLoadError::InvalidName(self.name))
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label, self.name)
    }
}

/// Supported theme file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeFormat {
    Json,
    Toml,
    #[cfg(feature = "yaml")]
    Yaml,
}

impl ThemeFormat {
    /// Format for a path's extension.
    ///
    /// # Errors
    /// Returns `ThemeLoadError::UnsupportedFormat` for unknown extensions.
    pub fn from_path(path: &Path) -> Result<Self, ThemeLoadError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            #[cfg(feature = "yaml")]
            Some("yaml" | "yml") => Ok(Self::Yaml),
            Some(ext) => Err(ThemeLoadError::UnsupportedFormat(ext.into())),
            None => Err(ThemeLoadError::UnsupportedFormat("unknown".into())),
        }
    }
}

/// Error loading a theme.
#[derive(Error, Debug)]
pub enum ThemeLoadError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
    #[cfg(feature = "yaml")]
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
    #[error("Invalid theme name '{0}' (use lowercase letters, digits and '-')")]
    InvalidName(String),
}

/// Error saving a theme.
#[derive(Error, Debug)]
pub enum ThemeSaveError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),
    #[cfg(feature = "yaml")]
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}
