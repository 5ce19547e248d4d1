//! Ordered, immutable collection of theme definitions.
//!
//! The store answers lookups by name and keeps themes in authoring order.
//! [`builtin_themes`] returns the process-wide store of shipped themes; it is
//! built lazily on first access and never mutated afterwards.

#[cfg(not(target_arch = "wasm32"))]
use std::fs;
#[cfg(not(target_arch = "wasm32"))]
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use thiserror::Error;
use tracing::{debug, error, trace};

use crate::presets;
#[cfg(not(target_arch = "wasm32"))]
use crate::theme::{ThemeFormat, ThemeLoadError};
use crate::theme::{Theme, ThemeInfo, is_valid_theme_name};

/// Lookup of an unknown theme name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown theme '{name}'")]
pub struct ThemeNotFound {
    pub name: String,
}

/// Error inserting a theme into a store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("theme '{0}' is already defined")]
    Duplicate(String),
    #[error("invalid theme name '{0}' (use lowercase letters, digits and '-')")]
    InvalidName(String),
}

/// Error loading a directory of theme files.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Error, Debug)]
pub enum LoadDirError {
    #[error("failed to read theme directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to load theme file {path}: {source}")]
    Theme {
        path: PathBuf,
        source: ThemeLoadError,
    },
    #[error("{path}: {source}")]
    Store { path: PathBuf, source: StoreError },
}

/// Themes in authoring order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThemeStore {
    themes: Vec<Theme>,
}

impl ThemeStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding the shipped themes: nostromo, mother, lv-426, sulaco.
    pub fn builtin() -> Self {
        let mut store = Self::new();
        for theme in presets::all() {
            if let Err(err) = store.insert(theme) {
                error!(error = %err, "Shipped theme not registered");
                debug_assert!(false, "shipped theme rejected: {err}");
            }
        }
        store
    }

    /// Append a theme.
    ///
    /// # Errors
    /// Returns `StoreError` if the name is invalid or already present.
    pub fn insert(&mut self, theme: Theme) -> Result<(), StoreError> {
        if !is_valid_theme_name(theme.name()) {
            return Err(StoreError::InvalidName(theme.name().to_string()));
        }
        if self.contains(theme.name()) {
            return Err(StoreError::Duplicate(theme.name().to_string()));
        }
        debug!(theme.name = %theme.name(), "Theme registered");
        self.themes.push(theme);
        Ok(())
    }

    /// Append every theme from another store, rejecting duplicates.
    ///
    /// # Errors
    /// Returns the first `StoreError`; themes before it are kept.
    pub fn extend(&mut self, other: ThemeStore) -> Result<(), StoreError> {
        other.themes.into_iter().try_for_each(|t| self.insert(t))
    }

    /// Look up a theme by name.
    ///
    /// # Errors
    /// Returns `ThemeNotFound` for unknown names.
    pub fn get_theme(&self, name: &str) -> Result<&Theme, ThemeNotFound> {
        trace!(theme.name = %name, "Theme lookup");
        self.themes
            .iter()
            .find(|t| t.name() == name)
            .ok_or_else(|| ThemeNotFound {
                name: name.to_string(),
            })
    }

    /// Themes in authoring order.
    pub fn list_themes(&self) -> &[Theme] {
        &self.themes
    }

    /// Display metadata for a theme.
    ///
    /// # Errors
    /// Returns `ThemeNotFound` for unknown names.
    pub fn theme_info(&self, name: &str) -> Result<ThemeInfo, ThemeNotFound> {
        self.get_theme(name).map(Theme::info)
    }

    /// Whether a theme with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.themes.iter().any(|t| t.name() == name)
    }

    /// Theme names in authoring order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.themes.iter().map(Theme::name)
    }

    /// Number of themes.
    pub fn len(&self) -> usize {
        self.themes.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }

    /// Load every theme file in `dir`, ordered by file name.
    ///
    /// Files with unsupported extensions are skipped.
    ///
    /// # Errors
    /// Returns `LoadDirError` if the directory cannot be read, a file fails to
    /// parse, or two files declare the same theme name.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, LoadDirError> {
        let dir = dir.as_ref();
        let read_err = |source| LoadDirError::ReadDir {
            path: dir.to_path_buf(),
            source,
        };

        let mut paths: Vec<PathBuf> = fs::read_dir(dir)
            .map_err(read_err)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<Result<_, _>>()
            .map_err(read_err)?;
        paths.retain(|p| p.is_file() && ThemeFormat::from_path(p).is_ok());
        paths.sort();

        let mut store = Self::new();
        for path in paths {
            let theme = Theme::from_file(&path).map_err(|source| LoadDirError::Theme {
                path: path.clone(),
                source,
            })?;
            store
                .insert(theme)
                .map_err(|source| LoadDirError::Store { path, source })?;
        }
        debug!(theme.dir = %dir.display(), theme.count = store.len(), "Theme directory loaded");
        Ok(store)
    }
}

impl<'a> IntoIterator for &'a ThemeStore {
    type Item = &'a Theme;
    type IntoIter = std::slice::Iter<'a, Theme>;

    fn into_iter(self) -> Self::IntoIter {
        self.themes.iter()
    }
}

static BUILTIN_THEMES: LazyLock<ThemeStore> = LazyLock::new(ThemeStore::builtin);

/// Returns the process-wide store of shipped themes.
pub fn builtin_themes() -> &'static ThemeStore {
    &BUILTIN_THEMES
}
