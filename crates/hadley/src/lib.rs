#![forbid(unsafe_code)]
// Allow these clippy lints for API ergonomics and token data tables
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::uninlined_format_args)]

//! # Hadley
//!
//! Design-token themes for web front ends.
//!
//! Every Hadley theme fills the same contract of semantic tokens (colors,
//! radii, shadows, fonts) expressed as CSS custom properties. Themes are
//! selected at runtime by a single attribute on the document root, so all of
//! them can be shipped in one stylesheet.
//!
//! - **Registry**: the required token set, color roles and shade scale
//! - **Themes**: strongly typed definitions, loadable from JSON or TOML
//! - **Validation**: missing tokens, bad color encodings, missing selectors
//! - **Stylesheets**: one `[data-theme="<name>"]` block per theme
//! - **Presets**: utility-class safelists and pattern rules derived from the
//!   registry, so runtime-built class names survive purging
//! - **Switcher**: an owned state machine persisting the active theme and
//!   color mode
//!
//! ## Quick Start
//!
//! ```rust
//! use hadley::prelude::*;
//!
//! let registry = TokenRegistry::standard();
//! let store = builtin_themes();
//!
//! // Every shipped theme fulfils the contract.
//! assert!(validate_store(store, &registry).is_valid());
//!
//! // Render the nostromo stylesheet.
//! let theme = store.get_theme("nostromo").unwrap();
//! let css = render_theme(theme, &registry);
//! assert!(css.contains("--color-primary:"));
//!
//! // Declare dynamic utility classes to the CSS compiler.
//! let preset = PresetGenerator::new(&registry).generate();
//! assert!(preset.covers("hover:bg-brand-600"));
//! ```
//!
//! ## Theme Files
//!
//! ```rust
//! use hadley::Theme;
//!
//! let theme = Theme::from_toml(r#"
//!     name = "ripley"
//!     label = "Ripley"
//!     selector = '[data-theme="ripley"]'
//!
//!     [tokens]
//!     color-background = "30 10% 6%"
//! "#).unwrap();
//! assert_eq!(theme.label(), "Ripley");
//! assert_eq!(theme.token("color-background"), Some("30 10% 6%"));
//! ```

pub mod color;
pub mod css;
pub mod preset;
pub mod presets;
pub mod registry;
pub mod store;
pub mod switcher;
pub mod theme;
pub mod validate;

pub use color::{ColorParseError, HslColor, is_canonical_hsl};
pub use css::{ThemeStylesheet, render_theme, stylesheets};
pub use preset::{
    ClassGenerationRule, PatternRule, Preset, PresetConfig, PresetError, PresetGenerator,
};
pub use registry::{Shade, Token, TokenCategory, TokenRegistry};
pub use store::{StoreError, ThemeNotFound, ThemeStore, builtin_themes};
pub use switcher::{
    ActiveTheme, ColorMode, DocumentRoot, SwitchError, SwitcherConfig, SwitcherState,
    ThemeStorage, ThemeSwitcher, UpdateReport,
};
pub use theme::{Theme, ThemeInfo, ThemeLoadError, ThemeMeta, ThemeSaveError};
pub use validate::{
    ErrorKind, ValidationError, ValidationReport, ValidationResult, validate, validate_store,
};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::color::HslColor;
    pub use crate::css::{render_theme, stylesheets};
    pub use crate::preset::{ClassGenerationRule, Preset, PresetConfig, PresetGenerator};
    pub use crate::registry::{Token, TokenCategory, TokenRegistry};
    pub use crate::store::{ThemeNotFound, ThemeStore, builtin_themes};
    pub use crate::switcher::{
        ColorMode, DocumentRoot, MemoryDocument, MemoryStorage, SwitchError, SwitcherConfig,
        SwitcherState, ThemeStorage, ThemeSwitcher,
    };
    pub use crate::theme::Theme;
    pub use crate::validate::{ValidationResult, validate, validate_store};
}

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
