//! Conformance checks of themes against the token registry.
//!
//! Validation collects every defect instead of stopping at the first one, so
//! a single run reports all drift between a theme and the contract:
//!
//! ```rust
//! use hadley::registry::{Token, TokenRegistry};
//! use hadley::theme::Theme;
//! use hadley::validate::{ErrorKind, validate};
//!
//! let registry = TokenRegistry::from_tokens(vec![
//!     Token::color("background"),
//!     Token::color("muted"),
//! ]);
//! let theme = Theme::new("mother").with_token("background", "150 20% 3%");
//!
//! let result = validate(&theme, &registry);
//! let errors = result.errors();
//! assert_eq!(errors.len(), 1);
//! assert_eq!(errors[0].kind, ErrorKind::MissingToken);
//! assert_eq!(errors[0].token, "muted");
//! ```

use std::fmt;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::color::is_canonical_hsl;
use crate::registry::TokenRegistry;
use crate::store::ThemeStore;
use crate::theme::{Theme, selector_for};

/// Token name reported for selector defects.
pub const SELECTOR_TOKEN: &str = "selector";

/// WCAG AA minimum contrast for body text.
pub const MIN_TEXT_CONTRAST: f64 = 4.5;

/// Kind of authoring defect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    MissingToken,
    MissingSelector,
    BadColorEncoding,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::MissingToken => "missing token",
            Self::MissingSelector => "missing selector",
            Self::BadColorEncoding => "bad color encoding",
        })
    }
}

/// One defect in one theme.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("theme '{theme}': {kind} '{token}'{}", .value.as_ref().map(|v| format!(" (found '{v}')")).unwrap_or_default())]
pub struct ValidationError {
    /// Offending theme name.
    pub theme: String,
    /// Missing or malformed token name, or [`SELECTOR_TOKEN`].
    pub token: String,
    pub kind: ErrorKind,
    /// The offending value, when one was present.
    pub value: Option<String>,
}

impl ValidationError {
    fn new(theme: &Theme, token: &str, kind: ErrorKind, value: Option<&str>) -> Self {
        Self {
            theme: theme.name().to_string(),
            token: token.to_string(),
            kind,
            value: value.map(str::to_string),
        }
    }
}

/// Outcome of validating one theme.
///
/// `Invalid` always holds at least one error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Invalid(Vec<ValidationError>),
}

impl ValidationResult {
    fn from_errors(errors: Vec<ValidationError>) -> Self {
        if errors.is_empty() {
            Self::Valid
        } else {
            Self::Invalid(errors)
        }
    }

    /// Whether the theme conforms.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Errors in detection order; empty when valid.
    pub fn errors(&self) -> &[ValidationError] {
        match self {
            Self::Valid => &[],
            Self::Invalid(errors) => errors,
        }
    }

    /// Converts into a `Result`.
    ///
    /// # Errors
    /// Returns the collected errors when invalid.
    pub fn into_result(self) -> Result<(), ValidationFailure> {
        match self {
            Self::Valid => Ok(()),
            Self::Invalid(errors) => Err(ValidationFailure { errors }),
        }
    }
}

/// Check one theme against the registry.
///
/// Reports, in order: for each required token, `MissingToken` when absent or
/// blank and `BadColorEncoding` when a color value is not `"H S% L%"`; then
/// `BadColorEncoding` for malformed light overrides of color tokens; then
/// `MissingSelector` when the selector does not scope the theme's own name.
pub fn validate(theme: &Theme, registry: &TokenRegistry) -> ValidationResult {
    let mut errors = Vec::new();

    for token in registry.required_tokens() {
        match theme.token(token.name()) {
            None => errors.push(ValidationError::new(
                theme,
                token.name(),
                ErrorKind::MissingToken,
                None,
            )),
            Some(value) if value.trim().is_empty() => errors.push(ValidationError::new(
                theme,
                token.name(),
                ErrorKind::MissingToken,
                Some(value),
            )),
            Some(value) if token.is_color() && !is_canonical_hsl(value) => {
                errors.push(ValidationError::new(
                    theme,
                    token.name(),
                    ErrorKind::BadColorEncoding,
                    Some(value),
                ));
            }
            Some(_) => {}
        }
    }

    for (name, value) in theme.light_overrides() {
        match registry.get(name) {
            Some(token) if token.is_color() && !is_canonical_hsl(value) => {
                errors.push(ValidationError::new(
                    theme,
                    name,
                    ErrorKind::BadColorEncoding,
                    Some(value),
                ));
            }
            Some(_) => {}
            None => debug!(
                theme.name = %theme.name(),
                theme.token = %name,
                "Light override for token outside the registry"
            ),
        }
    }

    let expected = selector_for(theme.name());
    if theme.selector() != expected {
        let found = (!theme.selector().is_empty()).then_some(theme.selector());
        errors.push(ValidationError::new(
            theme,
            SELECTOR_TOKEN,
            ErrorKind::MissingSelector,
            found,
        ));
    }

    check_contrast(theme);

    ValidationResult::from_errors(errors)
}

/// Contrast is a diagnostic, never a validation error.
fn check_contrast(theme: &Theme) {
    if let Some(ratio) = theme.contrast_ratio("color-foreground", "color-background") {
        if ratio < MIN_TEXT_CONTRAST {
            warn!(
                theme.name = %theme.name(),
                theme.contrast = ratio,
                "Foreground/background contrast below WCAG AA"
            );
        }
    }
}

/// Per-theme validation results for a whole store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    results: Vec<(String, ValidationResult)>,
}

impl ValidationReport {
    /// Results in store order.
    pub fn results(&self) -> impl Iterator<Item = (&str, &ValidationResult)> {
        self.results.iter().map(|(name, r)| (name.as_str(), r))
    }

    /// Whether every theme conforms.
    pub fn is_valid(&self) -> bool {
        self.results.iter().all(|(_, r)| r.is_valid())
    }

    /// Every error across all themes, in store order.
    pub fn errors(&self) -> impl Iterator<Item = &ValidationError> {
        self.results.iter().flat_map(|(_, r)| r.errors())
    }

    /// Number of themes checked.
    pub fn theme_count(&self) -> usize {
        self.results.len()
    }

    /// Fail unless every theme conforms.
    ///
    /// # Errors
    /// Returns a `ValidationFailure` listing every error.
    pub fn ensure_valid(&self) -> Result<(), ValidationFailure> {
        let errors: Vec<ValidationError> = self.errors().cloned().collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationFailure { errors })
        }
    }
}

/// Validate every theme in a store.
pub fn validate_store(store: &ThemeStore, registry: &TokenRegistry) -> ValidationReport {
    let results = store
        .list_themes()
        .iter()
        .map(|theme| (theme.name().to_string(), validate(theme, registry)))
        .collect();
    ValidationReport { results }
}

/// One or more themes failed validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    pub errors: Vec<ValidationError>,
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} theme validation error(s)", self.errors.len())?;
        for error in &self.errors {
            write!(f, "\n  - {error}")?;
        }
        Ok(())
    }
}
