//! The token contract every theme must fulfil.
//!
//! A [`TokenRegistry`] lists the semantic tokens (colors, radii, shadows,
//! fonts) and the color roles whose full shade scale each theme must define.
//! It is constant data: build it once and share it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Semantic category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenCategory {
    Color,
    Radius,
    Shadow,
    Typography,
}

impl fmt::Display for TokenCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Color => "color",
            Self::Radius => "radius",
            Self::Shadow => "shadow",
            Self::Typography => "typography",
        })
    }
}

/// A named semantic slot. Every token in a registry is required.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    name: String,
    category: TokenCategory,
}

impl Token {
    /// Create a token.
    pub fn new(name: impl Into<String>, category: TokenCategory) -> Self {
        Self {
            name: name.into(),
            category,
        }
    }

    /// Shorthand for a color token.
    pub fn color(name: impl Into<String>) -> Self {
        Self::new(name, TokenCategory::Color)
    }

    /// Token name, e.g. `color-primary`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Semantic category.
    pub fn category(&self) -> TokenCategory {
        self.category
    }

    /// Whether values must use the canonical color encoding.
    pub fn is_color(&self) -> bool {
        self.category == TokenCategory::Color
    }

    /// CSS custom property name, e.g. `--color-primary`.
    pub fn css_var(&self) -> String {
        format!("--{}", self.name)
    }
}

/// Step in a color role's shade scale (`50`, `100`, ..., `950`).
pub type Shade = u16;

/// The default shade scale.
pub const STANDARD_SHADES: [Shade; 11] = [50, 100, 200, 300, 400, 500, 600, 700, 800, 900, 950];

/// Color roles that carry a full shade scale.
pub const STANDARD_ROLES: [&str; 5] = ["brand", "neutral", "success", "warning", "error"];

const SEMANTIC_COLORS: [&str; 19] = [
    "color-background",
    "color-foreground",
    "color-card",
    "color-card-foreground",
    "color-popover",
    "color-popover-foreground",
    "color-primary",
    "color-primary-foreground",
    "color-secondary",
    "color-secondary-foreground",
    "color-muted",
    "color-muted-foreground",
    "color-accent",
    "color-accent-foreground",
    "color-destructive",
    "color-destructive-foreground",
    "color-border",
    "color-input",
    "color-ring",
];

const RADII: [&str; 3] = ["radius-sm", "radius-md", "radius-lg"];
const SHADOWS: [&str; 3] = ["shadow-sm", "shadow-md", "shadow-lg"];
const FONTS: [&str; 2] = ["font-sans", "font-mono"];

/// Name of the scale token for `role` at `shade`.
pub fn scale_token_name(role: &str, shade: Shade) -> String {
    format!("color-{role}-{shade}")
}

/// Canonical list of required tokens, color roles and shade scale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRegistry {
    semantic: Vec<Token>,
    roles: Vec<String>,
    shades: Vec<Shade>,
    required: Vec<Token>,
}

impl TokenRegistry {
    /// Create a registry from semantic tokens plus the role/shade axes.
    ///
    /// Scale tokens (`color-<role>-<shade>`) are derived and appended after
    /// the semantic tokens. Duplicate names keep their first occurrence.
    pub fn new<R, S>(tokens: Vec<Token>, roles: R, shades: S) -> Self
    where
        R: IntoIterator,
        R::Item: Into<String>,
        S: IntoIterator<Item = Shade>,
    {
        let roles: Vec<String> = roles.into_iter().map(Into::into).collect();
        let shades: Vec<Shade> = shades.into_iter().collect();

        let mut required: Vec<Token> = Vec::with_capacity(tokens.len() + roles.len() * shades.len());
        let mut push = |token: Token| {
            if !required.iter().any(|t| t.name == token.name) {
                required.push(token);
            }
        };
        for token in &tokens {
            push(token.clone());
        }
        for role in &roles {
            for shade in &shades {
                push(Token::color(scale_token_name(role, *shade)));
            }
        }

        Self {
            semantic: tokens,
            roles,
            shades,
            required,
        }
    }

    /// A registry with only semantic tokens and no shade scales.
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        Self::new(tokens, Vec::<String>::new(), Vec::new())
    }

    /// The Hadley token contract.
    pub fn standard() -> Self {
        let mut tokens: Vec<Token> = SEMANTIC_COLORS.iter().map(|n| Token::color(*n)).collect();
        tokens.extend(RADII.iter().map(|n| Token::new(*n, TokenCategory::Radius)));
        tokens.extend(SHADOWS.iter().map(|n| Token::new(*n, TokenCategory::Shadow)));
        tokens.extend(FONTS.iter().map(|n| Token::new(*n, TokenCategory::Typography)));
        Self::new(tokens, STANDARD_ROLES, STANDARD_SHADES)
    }

    /// Returns a copy with different role/shade axes, keeping semantic tokens.
    pub fn with_axes<R, S>(&self, roles: R, shades: S) -> Self
    where
        R: IntoIterator,
        R::Item: Into<String>,
        S: IntoIterator<Item = Shade>,
    {
        Self::new(self.semantic.clone(), roles, shades)
    }

    /// Semantic tokens, in declaration order.
    pub fn tokens(&self) -> &[Token] {
        &self.semantic
    }

    /// Semantic tokens of one category.
    pub fn tokens_in(&self, category: TokenCategory) -> impl Iterator<Item = &Token> {
        self.semantic.iter().filter(move |t| t.category == category)
    }

    /// Every required token: semantic tokens then the role × shade scale.
    pub fn required_tokens(&self) -> &[Token] {
        &self.required
    }

    /// Color roles with a shade scale.
    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    /// Shade steps, in declaration order.
    pub fn shades(&self) -> &[Shade] {
        &self.shades
    }

    /// Look up a required token by name.
    pub fn get(&self, name: &str) -> Option<&Token> {
        self.required.iter().find(|t| t.name == name)
    }

    /// Whether `name` is a required token.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Category of a required token.
    pub fn category_of(&self, name: &str) -> Option<TokenCategory> {
        self.get(name).map(Token::category)
    }
}

impl Default for TokenRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_counts() {
        let registry = TokenRegistry::standard();
        assert_eq!(registry.tokens().len(), 19 + 3 + 3 + 2);
        assert_eq!(registry.roles().len(), 5);
        assert_eq!(registry.shades(), &STANDARD_SHADES);
        assert_eq!(registry.required_tokens().len(), 27 + 5 * 11);
    }

    #[test]
    fn test_standard_contains_core_tokens() {
        let registry = TokenRegistry::standard();
        for name in [
            "color-background",
            "color-foreground",
            "color-primary",
            "color-muted",
            "radius-md",
            "shadow-lg",
            "color-brand-50",
            "color-error-950",
        ] {
            assert!(registry.contains(name), "missing {name}");
        }
        assert!(!registry.contains("color-brand-75"));
    }

    #[test]
    fn test_category_lookup() {
        let registry = TokenRegistry::standard();
        assert_eq!(registry.category_of("radius-sm"), Some(TokenCategory::Radius));
        assert_eq!(registry.category_of("font-mono"), Some(TokenCategory::Typography));
        assert_eq!(registry.category_of("color-neutral-500"), Some(TokenCategory::Color));
        assert_eq!(registry.category_of("nope"), None);
        assert_eq!(registry.tokens_in(TokenCategory::Shadow).count(), 3);
    }

    #[test]
    fn test_scale_tokens_follow_semantic_tokens() {
        let registry = TokenRegistry::new(
            vec![Token::color("background")],
            ["brand"],
            [100, 200],
        );
        let names: Vec<&str> = registry.required_tokens().iter().map(Token::name).collect();
        assert_eq!(names, ["background", "color-brand-100", "color-brand-200"]);
    }

    #[test]
    fn test_duplicates_keep_first() {
        let registry = TokenRegistry::from_tokens(vec![
            Token::color("a"),
            Token::new("a", TokenCategory::Radius),
        ]);
        assert_eq!(registry.required_tokens().len(), 1);
        assert_eq!(registry.category_of("a"), Some(TokenCategory::Color));
    }

    #[test]
    fn test_css_var() {
        assert_eq!(Token::color("color-ring").css_var(), "--color-ring");
    }
}
