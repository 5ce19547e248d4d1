//! Theme stylesheets.
//!
//! Each theme is realized as one stylesheet, `<name>.css`, declaring its
//! tokens as CSS custom properties under the theme selector:
//!
//! ```css
//! [data-theme="nostromo"] {
//!   --color-background: 30 8% 7%;
//!   ...
//! }
//! [data-theme="nostromo"][data-color-scheme="light"] {
//!   --color-background: 40 30% 96%;
//!   ...
//! }
//! ```
//!
//! Because every rule is scoped by an attribute selector, all theme
//! stylesheets can be loaded at once; switching is a single attribute write.

use std::fmt::Write as _;
#[cfg(not(target_arch = "wasm32"))]
use std::fs;
#[cfg(not(target_arch = "wasm32"))]
use std::io;
#[cfg(not(target_arch = "wasm32"))]
use std::path::{Path, PathBuf};

use serde::Serialize;
#[cfg(not(target_arch = "wasm32"))]
use tracing::info;

use crate::registry::TokenRegistry;
use crate::store::ThemeStore;
use crate::theme::{COLOR_SCHEME_ATTRIBUTE, Theme};

/// A rendered theme stylesheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeStylesheet {
    /// Theme name.
    pub theme: String,
    /// File name, `<name>.css`.
    pub file_name: String,
    /// Stylesheet text.
    pub css: String,
}

/// Stylesheet file name for a theme.
pub fn stylesheet_file_name(theme: &str) -> String {
    format!("{theme}.css")
}

/// Render one theme's stylesheet.
///
/// Registry tokens come first, in registry order, followed by any extra
/// theme tokens in name order. Light overrides go in a second block.
///
/// The theme is rendered as is. Run [`validate`](crate::validate::validate)
/// first: a theme without a selector renders an unscoped block.
pub fn render_theme(theme: &Theme, registry: &TokenRegistry) -> String {
    let mut css = String::new();
    let _ = writeln!(css, "/* {} */", theme.label());
    write_block(&mut css, theme.selector(), ordered(theme.tokens(), registry));

    if !theme.light_overrides().is_empty() {
        let selector = format!("{}[{COLOR_SCHEME_ATTRIBUTE}=\"light\"]", theme.selector());
        write_block(&mut css, &selector, ordered(theme.light_overrides(), registry));
    }
    css
}

fn ordered<'a>(
    values: &'a std::collections::BTreeMap<String, String>,
    registry: &'a TokenRegistry,
) -> Vec<(&'a str, &'a str)> {
    let mut out: Vec<(&str, &str)> = registry
        .required_tokens()
        .iter()
        .filter_map(|t| values.get_key_value(t.name()))
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    out.extend(
        values
            .iter()
            .filter(|(k, _)| !registry.contains(k))
            .map(|(k, v)| (k.as_str(), v.as_str())),
    );
    out
}

fn write_block(css: &mut String, selector: &str, declarations: Vec<(&str, &str)>) {
    let _ = writeln!(css, "{selector} {{");
    for (name, value) in declarations {
        let _ = writeln!(css, "  --{name}: {value};");
    }
    css.push_str("}\n");
}

/// Render one stylesheet per theme in the store, in store order.
pub fn stylesheets(store: &ThemeStore, registry: &TokenRegistry) -> Vec<ThemeStylesheet> {
    store
        .list_themes()
        .iter()
        .map(|theme| ThemeStylesheet {
            theme: theme.name().to_string(),
            file_name: stylesheet_file_name(theme.name()),
            css: render_theme(theme, registry),
        })
        .collect()
}

/// All theme stylesheets concatenated.
pub fn combined(store: &ThemeStore, registry: &TokenRegistry) -> String {
    stylesheets(store, registry)
        .into_iter()
        .map(|s| s.css)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Write one stylesheet per theme into `dir`, creating it if needed.
///
/// Returns the written paths in store order.
///
/// # Errors
/// Returns any I/O error from creating the directory or writing a file.
#[cfg(not(target_arch = "wasm32"))]
pub fn write_stylesheets(
    dir: impl AsRef<Path>,
    store: &ThemeStore,
    registry: &TokenRegistry,
) -> io::Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    let mut written = Vec::with_capacity(store.len());
    for sheet in stylesheets(store, registry) {
        let path = dir.join(&sheet.file_name);
        fs::write(&path, &sheet.css)?;
        info!(theme.name = %sheet.theme, path = %path.display(), "Stylesheet written");
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Token;
    use crate::store::builtin_themes;

    #[test]
    fn test_render_simple_theme() {
        let registry = TokenRegistry::from_tokens(vec![
            Token::color("color-background"),
            Token::color("color-primary"),
        ]);
        let theme = Theme::new("sulaco")
            .with_label("Sulaco")
            .with_token("color-primary", "215 80% 58%")
            .with_token("color-background", "220 30% 8%")
            .with_token("color-extra", "0 0% 0%");

        assert_eq!(
            render_theme(&theme, &registry),
            "/* Sulaco */\n\
             [data-theme=\"sulaco\"] {\n  \
             --color-background: 220 30% 8%;\n  \
             --color-primary: 215 80% 58%;\n  \
             --color-extra: 0 0% 0%;\n\
             }\n"
        );
    }

    #[test]
    fn test_light_block_is_scoped_by_color_scheme() {
        let registry = TokenRegistry::from_tokens(vec![Token::color("color-background")]);
        let theme = Theme::new("x")
            .with_token("color-background", "0 0% 5%")
            .with_light("color-background", "0 0% 95%");
        let css = render_theme(&theme, &registry);
        assert!(css.contains(
            "[data-theme=\"x\"][data-color-scheme=\"light\"] {\n  --color-background: 0 0% 95%;\n}\n"
        ));
    }

    #[test]
    fn test_builtin_stylesheets_expose_core_variables() {
        let registry = TokenRegistry::standard();
        let sheets = stylesheets(builtin_themes(), &registry);
        assert_eq!(sheets.len(), builtin_themes().len());
        for sheet in &sheets {
            assert_eq!(sheet.file_name, format!("{}.css", sheet.theme));
            assert!(sheet.css.contains(&format!("[data-theme=\"{}\"] {{", sheet.theme)));
            for var in [
                "--color-background:",
                "--color-foreground:",
                "--color-primary:",
                "--color-muted:",
            ] {
                assert!(sheet.css.contains(var), "{} lacks {var}", sheet.theme);
            }
        }
    }

    #[test]
    fn test_write_stylesheets_one_file_per_theme() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("themes");
        let written =
            write_stylesheets(&out, builtin_themes(), &TokenRegistry::standard()).unwrap();
        assert_eq!(written.len(), 4);
        for name in builtin_themes().names() {
            let path = out.join(stylesheet_file_name(name));
            assert!(path.is_file(), "{} missing", path.display());
        }
    }

    #[test]
    fn test_combined_contains_every_theme() {
        let css = combined(builtin_themes(), &TokenRegistry::standard());
        for name in ["nostromo", "mother", "lv-426", "sulaco"] {
            assert!(css.contains(&format!("[data-theme=\"{name}\"]")));
        }
    }
}
