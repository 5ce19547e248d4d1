//! # hadley-wasm
//!
//! Browser bindings for the Hadley runtime theme switcher.
//!
//! The switcher persists the selection in `window.localStorage` and writes
//! `data-theme` / `data-color-scheme` on `document.documentElement`, which
//! the theme stylesheets are scoped by.
//!
//! ## Quick Start (JavaScript)
//!
//! ```javascript
//! import init, { JsThemeSwitcher, themeNames } from 'hadley-wasm';
//!
//! await init();
//!
//! const switcher = new JsThemeSwitcher();   // key "hadley-theme", theme "nostromo"
//! switcher.initialize();                    // false until the document exists
//!
//! switcher.selectTheme("sulaco");           // throws for unknown themes
//! const mode = switcher.toggleColorMode();  // "light"
//! console.log(themeNames());                // ["nostromo", "mother", "lv-426", "sulaco"]
//! ```

#![forbid(unsafe_code)]

use hadley::store::builtin_themes;
use hadley::switcher::{
    BackendError, ColorMode, DocumentRoot, SwitcherConfig, ThemeStorage, ThemeSwitcher,
};
use wasm_bindgen::prelude::*;

/// Initialize the module.
///
/// Sets up the panic hook for readable errors in the browser console.
#[cfg(feature = "console_error_panic_hook")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn js_error(value: &JsValue) -> BackendError {
    BackendError::new(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}

/// `window.localStorage`.
///
/// Storage can be missing (privacy modes, sandboxed frames); reads then
/// behave as absent values and writes fail.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    storage: Option<web_sys::Storage>,
}

impl LocalStorage {
    pub fn new() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            web_sys::console::warn_1(&"hadley: localStorage unavailable, theme choice will not persist".into());
        }
        Self { storage }
    }
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl ThemeStorage for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, BackendError> {
        match &self.storage {
            Some(storage) => storage.get_item(key).map_err(|e| js_error(&e)),
            None => Ok(None),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), BackendError> {
        match &self.storage {
            Some(storage) => storage.set_item(key, value).map_err(|e| js_error(&e)),
            None => Err(BackendError::new("localStorage unavailable")),
        }
    }
}

/// `document.documentElement`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentElement;

fn root_element() -> Option<web_sys::Element> {
    web_sys::window()?.document()?.document_element()
}

impl DocumentRoot for DocumentElement {
    fn is_ready(&self) -> bool {
        root_element().is_some()
    }

    fn set_attribute(&mut self, name: &str, value: &str) -> Result<(), BackendError> {
        let root = root_element().ok_or_else(|| BackendError::new("no document element"))?;
        root.set_attribute(name, value).map_err(|e| js_error(&e))
    }

    fn attribute(&self, name: &str) -> Option<String> {
        root_element()?.get_attribute(name)
    }
}

/// Theme switcher over the shipped themes.
#[wasm_bindgen]
#[derive(Debug)]
pub struct JsThemeSwitcher {
    inner: ThemeSwitcher<'static, LocalStorage, DocumentElement>,
}

#[wasm_bindgen]
impl JsThemeSwitcher {
    /// Create a switcher. Both arguments are optional.
    ///
    /// Throws if `defaultTheme` is not a shipped theme.
    #[wasm_bindgen(constructor)]
    pub fn new(
        storage_key: Option<String>,
        default_theme: Option<String>,
    ) -> Result<JsThemeSwitcher, JsError> {
        let mut config = SwitcherConfig::default();
        if let Some(key) = storage_key {
            config.storage_key = key;
        }
        if let Some(theme) = default_theme {
            config.default_theme = theme;
        }
        let inner = ThemeSwitcher::new(builtin_themes(), LocalStorage::new(), DocumentElement, config)?;
        Ok(Self { inner })
    }

    /// Read the persisted selection and apply it. Returns whether the
    /// switcher is initialized; call again once the document exists.
    pub fn initialize(&mut self) -> bool {
        self.inner.initialize().is_initialized()
    }

    #[wasm_bindgen(js_name = "isInitialized")]
    pub fn is_initialized(&self) -> bool {
        self.inner.is_initialized()
    }

    /// Select a theme. Throws for unknown names or before initialization.
    #[wasm_bindgen(js_name = "selectTheme")]
    pub fn select_theme(&mut self, name: &str) -> Result<(), JsError> {
        self.inner.select_theme(name)?;
        Ok(())
    }

    /// Flip the color mode and return the new one.
    #[wasm_bindgen(js_name = "toggleColorMode")]
    pub fn toggle_color_mode(&mut self) -> Result<String, JsError> {
        self.inner.toggle_color_mode()?;
        Ok(self.inner.active()?.color_mode().to_string())
    }

    /// Set the color mode to `"light"` or `"dark"`.
    #[wasm_bindgen(js_name = "setColorMode")]
    pub fn set_color_mode(&mut self, mode: &str) -> Result<(), JsError> {
        let mode: ColorMode = mode.parse()?;
        self.inner.set_color_mode(mode)?;
        Ok(())
    }

    /// Active theme name, or `undefined` before initialization.
    #[wasm_bindgen(js_name = "themeName")]
    pub fn theme_name(&self) -> Option<String> {
        self.inner.active().ok().map(|a| a.theme_name().to_string())
    }

    /// Active color mode, or `undefined` before initialization.
    #[wasm_bindgen(js_name = "colorMode")]
    pub fn color_mode(&self) -> Option<String> {
        self.inner.active().ok().map(|a| a.color_mode().to_string())
    }
}

/// Names of the shipped themes, in authoring order.
#[wasm_bindgen(js_name = "themeNames")]
pub fn theme_names() -> js_sys::Array {
    builtin_themes().names().map(JsValue::from_str).collect()
}

/// Module version information.
#[must_use]
#[wasm_bindgen(js_name = "version")]
pub fn version() -> String {
    hadley::VERSION.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
