//! Runtime theme switching.
//!
//! [`ThemeSwitcher`] owns the active theme name and color mode for one
//! document. It starts [`SwitcherState::Uninitialized`]; [`initialize`]
//! reads persisted values once the document is ready, writes both root
//! attributes and moves to [`SwitcherState::Initialized`]. After that,
//! [`select_theme`] and [`toggle_color_mode`] update the root attribute and
//! persist the new value as one logical step.
//!
//! Storage and DOM access go through the [`ThemeStorage`] and
//! [`DocumentRoot`] traits so the same state machine drives the browser
//! bindings, the CLI's file-backed store and tests.
//!
//! The root attribute is the source of truth for the session. When the
//! attribute write fails, nothing changes: the in-memory state keeps the
//! previous value and nothing is persisted. A failed storage write after a
//! successful attribute write keeps the new state. Either failure is logged
//! and returned in the [`UpdateReport`], never raised.
//!
//! ```rust
//! use hadley::store::builtin_themes;
//! use hadley::switcher::{
//!     ColorMode, DocumentRoot, MemoryDocument, MemoryStorage, SwitcherConfig, ThemeSwitcher,
//! };
//!
//! let mut switcher = ThemeSwitcher::new(
//!     builtin_themes(),
//!     MemoryStorage::new(),
//!     MemoryDocument::new(),
//!     SwitcherConfig::default(),
//! )
//! .unwrap();
//! switcher.initialize();
//!
//! switcher.select_theme("sulaco").unwrap();
//! switcher.toggle_color_mode().unwrap();
//!
//! let active = switcher.active().unwrap();
//! assert_eq!(active.theme_name(), "sulaco");
//! assert_eq!(active.color_mode(), ColorMode::Light);
//! assert_eq!(
//!     switcher.document().attribute("data-color-scheme").as_deref(),
//!     Some("light")
//! );
//! ```
//!
//! [`initialize`]: ThemeSwitcher::initialize
//! [`select_theme`]: ThemeSwitcher::select_theme
//! [`toggle_color_mode`]: ThemeSwitcher::toggle_color_mode

use std::collections::BTreeMap;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, trace, warn};

use crate::presets::DEFAULT_THEME;
use crate::store::{ThemeNotFound, ThemeStore};
use crate::theme::{COLOR_SCHEME_ATTRIBUTE, THEME_ATTRIBUTE};

/// Default persisted key for the color mode.
pub const DEFAULT_STORAGE_KEY: &str = "hadley-theme";

/// Light or dark rendering of a theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    Light,
    #[default]
    Dark,
}

impl ColorMode {
    /// The persisted and attribute value.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// The other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A color mode string other than `light` or `dark`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid color mode '{0}' (expected 'light' or 'dark')")]
pub struct ParseColorModeError(pub String);

impl FromStr for ColorMode {
    type Err = ParseColorModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(ParseColorModeError(other.to_string())),
        }
    }
}

/// Failure reported by a storage or document backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct BackendError(String);

impl BackendError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

/// Persistent string key/value storage.
pub trait ThemeStorage {
    /// Read a value. `Ok(None)` means the key is absent.
    ///
    /// # Errors
    /// Returns `BackendError` if the storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, BackendError>;

    /// Write a value.
    ///
    /// # Errors
    /// Returns `BackendError` if the value cannot be stored.
    fn set(&mut self, key: &str, value: &str) -> Result<(), BackendError>;
}

/// The document root element carrying theme attributes.
pub trait DocumentRoot {
    /// Whether the document can be read and written yet.
    fn is_ready(&self) -> bool;

    /// Set an attribute on the root.
    ///
    /// # Errors
    /// Returns `BackendError` if the attribute cannot be written.
    fn set_attribute(&mut self, name: &str, value: &str) -> Result<(), BackendError>;

    /// Current value of a root attribute.
    fn attribute(&self, name: &str) -> Option<String>;
}

/// In-memory storage with failure injection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStorage {
    values: BTreeMap<String, String>,
    fail_reads: bool,
    fail_writes: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: preset a value.
    #[must_use]
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Make every read fail.
    pub fn set_fail_reads(&mut self, fail: bool) {
        self.fail_reads = fail;
    }

    /// Make every write fail.
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Stored value for `key`.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// All stored values.
    pub fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }
}

impl ThemeStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, BackendError> {
        if self.fail_reads {
            return Err(BackendError::new("storage read failed"));
        }
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), BackendError> {
        if self.fail_writes {
            return Err(BackendError::new("storage write failed"));
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// In-memory document root with readiness and failure injection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryDocument {
    ready: bool,
    fail_writes: bool,
    attributes: BTreeMap<String, String>,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    /// A ready document with no attributes.
    pub fn new() -> Self {
        Self {
            ready: true,
            fail_writes: false,
            attributes: BTreeMap::new(),
        }
    }

    /// A document that is not interactive yet.
    pub fn not_ready() -> Self {
        Self {
            ready: false,
            ..Self::new()
        }
    }

    pub fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }

    /// Make every attribute write fail.
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// All root attributes.
    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }
}

impl DocumentRoot for MemoryDocument {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn set_attribute(&mut self, name: &str, value: &str) -> Result<(), BackendError> {
        if self.fail_writes {
            return Err(BackendError::new(format!("cannot set attribute {name}")));
        }
        self.attributes.insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.get(name).cloned()
    }
}

/// Switcher settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwitcherConfig {
    /// Key holding the persisted color mode.
    pub storage_key: String,
    /// Theme used when nothing valid is persisted.
    pub default_theme: String,
    /// Color mode used when nothing valid is persisted.
    pub default_color_mode: ColorMode,
}

impl Default for SwitcherConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            default_theme: DEFAULT_THEME.to_string(),
            default_color_mode: ColorMode::Dark,
        }
    }
}

impl SwitcherConfig {
    /// Key holding the persisted theme name, `<storage_key>-name`.
    pub fn theme_name_key(&self) -> String {
        format!("{}-name", self.storage_key)
    }
}

/// The selected theme and color mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveTheme {
    theme_name: String,
    color_mode: ColorMode,
}

impl ActiveTheme {
    pub fn theme_name(&self) -> &str {
        &self.theme_name
    }

    pub fn color_mode(&self) -> ColorMode {
        self.color_mode
    }
}

/// Lifecycle of a [`ThemeSwitcher`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SwitcherState {
    /// The document was not ready yet; nothing has been read or written.
    #[default]
    Uninitialized,
    Initialized(ActiveTheme),
}

impl SwitcherState {
    pub fn is_initialized(&self) -> bool {
        matches!(self, Self::Initialized(_))
    }

    pub fn active(&self) -> Option<&ActiveTheme> {
        match self {
            Self::Initialized(active) => Some(active),
            Self::Uninitialized => None,
        }
    }
}

/// Error from a switcher operation. The state is left unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SwitchError {
    #[error(transparent)]
    NotFound(#[from] ThemeNotFound),
    #[error("theme switcher is not initialized")]
    NotInitialized,
}

/// Outcome of the attribute write and the storage write of one update.
///
/// Both `None` means the update fully applied. A `dom_error` means the
/// update was not applied at all and storage was left untouched. A
/// `storage_error` alone means the update applied for this session but will
/// not survive a reload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateReport {
    pub dom_error: Option<BackendError>,
    pub storage_error: Option<BackendError>,
}

impl UpdateReport {
    /// Whether both writes succeeded.
    pub fn is_complete(&self) -> bool {
        self.dom_error.is_none() && self.storage_error.is_none()
    }

    /// Whether either write failed.
    pub fn is_partial(&self) -> bool {
        !self.is_complete()
    }

    /// Whether the in-memory state and the root attribute took the new value.
    pub fn is_applied(&self) -> bool {
        self.dom_error.is_none()
    }
}

/// Identifier for a registered change listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn Fn(&ActiveTheme)>;

/// Owned theme switching state for one document.
pub struct ThemeSwitcher<'s, S, D> {
    store: &'s ThemeStore,
    storage: S,
    document: D,
    config: SwitcherConfig,
    state: SwitcherState,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener_id: u64,
}

impl<S: fmt::Debug, D: fmt::Debug> fmt::Debug for ThemeSwitcher<'_, S, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeSwitcher")
            .field("themes", &self.store.len())
            .field("storage", &self.storage)
            .field("document", &self.document)
            .field("config", &self.config)
            .field("state", &self.state)
            .field("listeners", &format!("{} listeners", self.listeners.len()))
            .finish()
    }
}

impl<'s, S: ThemeStorage, D: DocumentRoot> ThemeSwitcher<'s, S, D> {
    /// Create an uninitialized switcher.
    ///
    /// # Errors
    /// Returns `SwitchError::NotFound` if the configured default theme is not
    /// in `store`.
    pub fn new(
        store: &'s ThemeStore,
        storage: S,
        document: D,
        config: SwitcherConfig,
    ) -> Result<Self, SwitchError> {
        store.get_theme(&config.default_theme)?;
        Ok(Self {
            store,
            storage,
            document,
            config,
            state: SwitcherState::Uninitialized,
            listeners: Vec::new(),
            next_listener_id: 1,
        })
    }

    /// Read persisted values and apply them to the document.
    ///
    /// Stays uninitialized while the document is not ready. Absent,
    /// corrupted or unreadable values fall back to the configured defaults.
    /// Calling this again once initialized does nothing.
    pub fn initialize(&mut self) -> &SwitcherState {
        if self.state.is_initialized() {
            return &self.state;
        }
        if !self.document.is_ready() {
            debug!("Document not ready, theme switcher stays uninitialized");
            return &self.state;
        }

        let active = ActiveTheme {
            theme_name: self.read_theme_name(),
            color_mode: self.read_color_mode(),
        };

        for (name, value) in [
            (THEME_ATTRIBUTE, active.theme_name.as_str()),
            (COLOR_SCHEME_ATTRIBUTE, active.color_mode.as_str()),
        ] {
            if let Err(err) = self.document.set_attribute(name, value) {
                warn!(attribute = name, error = %err, "Failed to apply theme attribute");
            }
        }

        info!(
            theme.name = %active.theme_name,
            theme.color_mode = %active.color_mode,
            "Theme switcher initialized"
        );
        self.state = SwitcherState::Initialized(active);
        self.notify_listeners();
        &self.state
    }

    fn read_theme_name(&self) -> String {
        let key = self.config.theme_name_key();
        let fallback = || self.config.default_theme.clone();
        match self.storage.get(&key) {
            Ok(Some(name)) if self.store.contains(&name) => {
                trace!(storage.key = %key, theme.name = %name, "Persisted theme read");
                name
            }
            Ok(Some(name)) => {
                warn!(storage.key = %key, value = %name, "Persisted theme is unknown, using default");
                fallback()
            }
            Ok(None) => {
                debug!(storage.key = %key, "No persisted theme, using default");
                fallback()
            }
            Err(err) => {
                warn!(storage.key = %key, error = %err, "Theme storage unreadable, using default");
                fallback()
            }
        }
    }

    fn read_color_mode(&self) -> ColorMode {
        let key = &self.config.storage_key;
        let fallback = self.config.default_color_mode;
        match self.storage.get(key) {
            Ok(Some(value)) => value.parse().unwrap_or_else(|_| {
                warn!(storage.key = %key, value = %value, "Persisted color mode is corrupted, using default");
                fallback
            }),
            Ok(None) => {
                debug!(storage.key = %key, "No persisted color mode, using default");
                fallback
            }
            Err(err) => {
                warn!(storage.key = %key, error = %err, "Color mode storage unreadable, using default");
                fallback
            }
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> &SwitcherState {
        &self.state
    }

    pub fn is_initialized(&self) -> bool {
        self.state.is_initialized()
    }

    /// The active theme.
    ///
    /// # Errors
    /// Returns `SwitchError::NotInitialized` before initialization.
    pub fn active(&self) -> Result<&ActiveTheme, SwitchError> {
        self.state.active().ok_or(SwitchError::NotInitialized)
    }

    fn active_mut(&mut self) -> Result<&mut ActiveTheme, SwitchError> {
        match &mut self.state {
            SwitcherState::Initialized(active) => Ok(active),
            SwitcherState::Uninitialized => Err(SwitchError::NotInitialized),
        }
    }

    /// Flip the color mode.
    ///
    /// # Errors
    /// Returns `SwitchError::NotInitialized` before initialization.
    pub fn toggle_color_mode(&mut self) -> Result<UpdateReport, SwitchError> {
        let mode = self.active()?.color_mode.toggled();
        self.set_color_mode(mode)
    }

    /// Set the color mode, write `data-color-scheme` and persist it.
    ///
    /// # Errors
    /// Returns `SwitchError::NotInitialized` before initialization.
    pub fn set_color_mode(&mut self, mode: ColorMode) -> Result<UpdateReport, SwitchError> {
        let from = self.active()?.color_mode;
        let key = self.config.storage_key.clone();
        let report = self.apply(COLOR_SCHEME_ATTRIBUTE, &key, mode.as_str());
        if report.is_applied() {
            self.active_mut()?.color_mode = mode;
            info!(theme.color_mode.from = %from, theme.color_mode.to = %mode, "Color mode switched");
            self.notify_listeners();
        }
        Ok(report)
    }

    /// Select a theme by name, write `data-theme` and persist it.
    ///
    /// # Errors
    /// Returns `SwitchError::NotFound` for unknown themes and
    /// `SwitchError::NotInitialized` before initialization.
    pub fn select_theme(&mut self, name: &str) -> Result<UpdateReport, SwitchError> {
        self.active()?;
        if let Err(err) = self.store.get_theme(name) {
            warn!(theme.name = %name, "Rejected unknown theme");
            return Err(err.into());
        }
        let key = self.config.theme_name_key();
        let report = self.apply(THEME_ATTRIBUTE, &key, name);
        if report.is_applied() {
            let from = std::mem::replace(&mut self.active_mut()?.theme_name, name.to_string());
            info!(theme.from = %from, theme.to = %name, "Theme switched");
            self.notify_listeners();
        }
        Ok(report)
    }

    /// Write the attribute, then persist only if the attribute took.
    fn apply(&mut self, attribute: &str, key: &str, value: &str) -> UpdateReport {
        if let Err(err) = self.document.set_attribute(attribute, value) {
            warn!(attribute, value, error = %err, "Theme attribute not applied");
            return UpdateReport {
                dom_error: Some(err),
                storage_error: None,
            };
        }
        let report = UpdateReport {
            dom_error: None,
            storage_error: self.storage.set(key, value).err(),
        };
        if let Some(err) = &report.storage_error {
            warn!(storage.key = key, value, error = %err, "Theme selection not persisted");
        }
        report
    }

    /// Register a listener called after every applied change.
    ///
    /// A panicking listener is logged and skipped on native targets. On
    /// `wasm32` panics abort, so listeners there must not panic.
    pub fn on_change<F>(&mut self, callback: F) -> ListenerId
    where
        F: Fn(&ActiveTheme) + 'static,
    {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.push((id, Box::new(callback)));
        debug!(theme.listener_id = id.0, "Theme listener registered");
        id
    }

    /// Remove a listener by id.
    pub fn remove_listener(&mut self, id: ListenerId) {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        if self.listeners.len() != before {
            debug!(theme.listener_id = id.0, "Theme listener removed");
        }
    }

    fn notify_listeners(&self) {
        let Some(active) = self.state.active() else {
            return;
        };
        for (id, listener) in &self.listeners {
            if catch_unwind(AssertUnwindSafe(|| listener(active))).is_err() {
                warn!(
                    theme.listener_id = id.0,
                    theme.name = %active.theme_name,
                    "Theme listener panicked"
                );
            }
        }
    }

    /// Store the switcher selects from.
    pub fn store(&self) -> &'s ThemeStore {
        self.store
    }

    pub fn config(&self) -> &SwitcherConfig {
        &self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    /// Consume the switcher, returning its storage and document.
    pub fn into_parts(self) -> (S, D) {
        (self.storage, self.document)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::store::builtin_themes;

    type TestSwitcher = ThemeSwitcher<'static, MemoryStorage, MemoryDocument>;

    fn switcher_with(storage: MemoryStorage) -> TestSwitcher {
        ThemeSwitcher::new(
            builtin_themes(),
            storage,
            MemoryDocument::new(),
            SwitcherConfig::default(),
        )
        .unwrap()
    }

    fn ready() -> TestSwitcher {
        let mut switcher = switcher_with(MemoryStorage::new());
        switcher.initialize();
        switcher
    }

    #[test]
    fn test_color_mode_parse_and_toggle() {
        assert_eq!("light".parse::<ColorMode>(), Ok(ColorMode::Light));
        assert_eq!("dark".parse::<ColorMode>(), Ok(ColorMode::Dark));
        assert!("Dark".parse::<ColorMode>().is_err());
        assert_eq!(ColorMode::Dark.toggled(), ColorMode::Light);
        assert_eq!(ColorMode::default(), ColorMode::Dark);
    }

    #[test]
    fn test_defaults_without_persisted_values() {
        let switcher = ready();
        let active = switcher.active().unwrap();
        assert_eq!(active.theme_name(), "nostromo");
        assert_eq!(active.color_mode(), ColorMode::Dark);
        let doc = switcher.document();
        assert_eq!(doc.attribute("data-theme").as_deref(), Some("nostromo"));
        assert_eq!(doc.attribute("data-color-scheme").as_deref(), Some("dark"));
    }

    #[test]
    fn test_initialize_waits_for_document() {
        let mut switcher = ThemeSwitcher::new(
            builtin_themes(),
            MemoryStorage::new(),
            MemoryDocument::not_ready(),
            SwitcherConfig::default(),
        )
        .unwrap();
        assert_eq!(switcher.initialize(), &SwitcherState::Uninitialized);
        assert!(switcher.document().attributes().is_empty());
        assert_eq!(switcher.toggle_color_mode(), Err(SwitchError::NotInitialized));
        assert_eq!(switcher.select_theme("mother"), Err(SwitchError::NotInitialized));

        switcher.document_mut().set_ready(true);
        assert!(switcher.initialize().is_initialized());
    }

    #[test]
    fn test_initialize_reads_persisted_values() {
        let storage = MemoryStorage::new()
            .with_value("hadley-theme", "light")
            .with_value("hadley-theme-name", "lv-426");
        let mut switcher = switcher_with(storage);
        switcher.initialize();
        let active = switcher.active().unwrap();
        assert_eq!(active.theme_name(), "lv-426");
        assert_eq!(active.color_mode(), ColorMode::Light);
    }

    #[test]
    fn test_corrupted_values_fall_back() {
        let storage = MemoryStorage::new()
            .with_value("hadley-theme", "sepia")
            .with_value("hadley-theme-name", "no-such-theme");
        let mut switcher = switcher_with(storage);
        switcher.initialize();
        let active = switcher.active().unwrap();
        assert_eq!(active.theme_name(), "nostromo");
        assert_eq!(active.color_mode(), ColorMode::Dark);
    }

    #[test]
    fn test_unreadable_storage_falls_back() {
        let mut storage = MemoryStorage::new().with_value("hadley-theme", "light");
        storage.set_fail_reads(true);
        let mut switcher = switcher_with(storage);
        switcher.initialize();
        assert_eq!(switcher.active().unwrap().color_mode(), ColorMode::Dark);
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let mut switcher = ready();
        switcher.select_theme("mother").unwrap();
        switcher.initialize();
        assert_eq!(switcher.active().unwrap().theme_name(), "mother");
    }

    #[test]
    fn test_toggle_writes_attribute_and_storage() {
        let mut switcher = ready();
        let report = switcher.toggle_color_mode().unwrap();
        assert!(report.is_complete());
        assert_eq!(
            switcher.document().attribute("data-color-scheme").as_deref(),
            Some("light")
        );
        assert_eq!(switcher.storage().value("hadley-theme"), Some("light"));

        switcher.toggle_color_mode().unwrap();
        assert_eq!(switcher.active().unwrap().color_mode(), ColorMode::Dark);
        assert_eq!(switcher.storage().value("hadley-theme"), Some("dark"));
    }

    #[test]
    fn test_select_theme_persists_name() {
        let mut switcher = ready();
        switcher.select_theme("sulaco").unwrap();
        assert_eq!(switcher.document().attribute("data-theme").as_deref(), Some("sulaco"));
        assert_eq!(switcher.storage().value("hadley-theme-name"), Some("sulaco"));
    }

    #[test]
    fn test_unknown_theme_leaves_state_unchanged() {
        let mut switcher = ready();
        let before = switcher.storage().clone();
        let err = switcher.select_theme("unknown-theme").unwrap_err();
        assert_eq!(
            err,
            SwitchError::NotFound(ThemeNotFound {
                name: "unknown-theme".into()
            })
        );
        assert_eq!(switcher.active().unwrap().theme_name(), "nostromo");
        assert_eq!(
            switcher.document().attribute("data-theme").as_deref(),
            Some("nostromo")
        );
        assert_eq!(switcher.storage(), &before);
    }

    #[test]
    fn test_storage_failure_is_reported_not_raised() {
        let mut switcher = ready();
        switcher.storage_mut().set_fail_writes(true);
        let report = switcher.select_theme("mother").unwrap();
        assert!(report.is_partial());
        assert!(report.dom_error.is_none());
        assert!(report.storage_error.is_some());
        assert_eq!(switcher.active().unwrap().theme_name(), "mother");
        assert_eq!(switcher.document().attribute("data-theme").as_deref(), Some("mother"));
    }

    #[test]
    fn test_dom_failure_is_reported_not_raised() {
        let mut switcher = ready();
        switcher.document_mut().set_fail_writes(true);
        let report = switcher.toggle_color_mode().unwrap();
        assert!(report.dom_error.is_some());
        assert!(!report.is_applied());
        assert!(report.storage_error.is_none());
        assert_eq!(switcher.active().unwrap().color_mode(), ColorMode::Dark);
        assert_eq!(
            switcher.document().attribute("data-color-scheme").as_deref(),
            Some("dark")
        );
        assert_eq!(switcher.storage().value("hadley-theme"), None);
    }

    #[test]
    fn test_dom_failure_on_select_keeps_previous_theme() {
        let mut switcher = ready();
        switcher.document_mut().set_fail_writes(true);
        let report = switcher.select_theme("mother").unwrap();
        assert!(report.dom_error.is_some());
        assert_eq!(switcher.active().unwrap().theme_name(), "nostromo");
        assert_eq!(switcher.document().attribute("data-theme").as_deref(), Some("nostromo"));
        assert_eq!(switcher.storage().value("hadley-theme-name"), None);
    }

    #[test]
    fn test_toggle_after_dom_failure_flips_visible_mode() {
        let mut switcher = ready();
        switcher.document_mut().set_fail_writes(true);
        switcher.toggle_color_mode().unwrap();
        switcher.document_mut().set_fail_writes(false);

        let report = switcher.toggle_color_mode().unwrap();
        assert!(report.is_complete());
        assert_eq!(switcher.active().unwrap().color_mode(), ColorMode::Light);
        assert_eq!(
            switcher.document().attribute("data-color-scheme").as_deref(),
            Some("light")
        );
        assert_eq!(switcher.storage().value("hadley-theme"), Some("light"));
    }

    #[test]
    fn test_unknown_default_theme_rejected() {
        let config = SwitcherConfig {
            default_theme: "missing".into(),
            ..SwitcherConfig::default()
        };
        let result = ThemeSwitcher::new(
            builtin_themes(),
            MemoryStorage::new(),
            MemoryDocument::new(),
            config,
        );
        assert!(matches!(result, Err(SwitchError::NotFound(_))));
    }

    #[test]
    fn test_custom_storage_key() {
        let config = SwitcherConfig {
            storage_key: "app-theme".into(),
            ..SwitcherConfig::default()
        };
        assert_eq!(config.theme_name_key(), "app-theme-name");
        let mut switcher = ThemeSwitcher::new(
            builtin_themes(),
            MemoryStorage::new(),
            MemoryDocument::new(),
            config,
        )
        .unwrap();
        switcher.initialize();
        switcher.set_color_mode(ColorMode::Light).unwrap();
        assert_eq!(switcher.storage().value("app-theme"), Some("light"));
    }

    #[test]
    fn test_listeners_notified_and_removed() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut switcher = switcher_with(MemoryStorage::new());
        let sink = Rc::clone(&seen);
        let id = switcher.on_change(move |active| {
            sink.borrow_mut()
                .push((active.theme_name().to_string(), active.color_mode()));
        });

        switcher.initialize();
        switcher.select_theme("mother").unwrap();
        switcher.remove_listener(id);
        switcher.toggle_color_mode().unwrap();

        assert_eq!(
            *seen.borrow(),
            [
                ("nostromo".to_string(), ColorMode::Dark),
                ("mother".to_string(), ColorMode::Dark),
            ]
        );
    }

    #[test]
    #[cfg(not(target_arch = "wasm32"))]
    fn test_panicking_listener_is_isolated() {
        let calls = Rc::new(RefCell::new(0));
        let mut switcher = ready();
        switcher.on_change(|_| panic!("listener failure"));
        let counter = Rc::clone(&calls);
        switcher.on_change(move |_| *counter.borrow_mut() += 1);

        switcher.toggle_color_mode().unwrap();
        assert_eq!(*calls.borrow(), 1);
        assert_eq!(switcher.active().unwrap().color_mode(), ColorMode::Light);
    }

    #[test]
    fn test_into_parts_returns_backends() {
        let mut switcher = ready();
        switcher.select_theme("mother").unwrap();
        let (storage, document) = switcher.into_parts();
        assert_eq!(storage.value("hadley-theme-name"), Some("mother"));
        assert_eq!(document.attribute("data-theme").as_deref(), Some("mother"));
    }
}
