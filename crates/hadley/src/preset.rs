//! Utility-class preset generation.
//!
//! Utility-CSS compilers keep only the classes they find by scanning source
//! text. Components that build class names at runtime (`bg-${role}-${shade}`)
//! would lose those classes, so the preset declares them up front:
//!
//! * a literal **safelist** of semantic classes (`bg-background`,
//!   `text-muted-foreground`, `rounded-md`, ...);
//! * one **pattern rule** per color role, spanning every property prefix,
//!   shade step and state variant declared for it.
//!
//! Rules are derived from the registry's axes, so every role × shade ×
//! property × variant combination is covered by construction.
//!
//! ```rust
//! use hadley::preset::PresetGenerator;
//! use hadley::registry::TokenRegistry;
//!
//! let registry = TokenRegistry::standard();
//! let preset = PresetGenerator::new(&registry).generate();
//!
//! assert!(preset.covers("bg-background"));
//! assert!(preset.covers("hover:bg-brand-500"));
//! assert!(preset.covers("data-[state=checked]:border-error-950"));
//! assert!(!preset.covers("bg-brand-75"));
//! ```

use std::collections::HashSet;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use thiserror::Error;
use tracing::debug;

use crate::registry::{Shade, TokenCategory, TokenRegistry, scale_token_name};

/// Property prefixes expanded by pattern rules.
pub const DEFAULT_PROPERTIES: [&str; 5] = ["bg", "text", "border", "ring", "outline"];

/// State variants expanded by pattern rules.
pub const DEFAULT_VARIANTS: [&str; 6] = [
    "hover",
    "focus-visible",
    "active",
    "disabled",
    "data-[state=checked]",
    "data-[state=open]",
];

/// Property prefixes used for literal semantic color classes.
const SEMANTIC_PROPERTIES: [&str; 3] = ["bg", "text", "border"];

/// Axes and extra literals for preset generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresetConfig {
    /// CSS property prefixes (`bg`, `text`, ...).
    pub properties: Vec<String>,
    /// State variants (`hover`, `data-[state=checked]`, ...).
    pub variants: Vec<String>,
    /// Extra literal classes appended to the safelist.
    pub safelist: Vec<String>,
}

impl Default for PresetConfig {
    fn default() -> Self {
        Self {
            properties: DEFAULT_PROPERTIES.iter().map(ToString::to_string).collect(),
            variants: DEFAULT_VARIANTS.iter().map(ToString::to_string).collect(),
            safelist: Vec::new(),
        }
    }
}

/// A pattern over `{variant:}{property}-{role}-{shade}` with its axis values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternRule {
    /// Anchored regular expression.
    pub pattern: String,
    pub properties: Vec<String>,
    pub roles: Vec<String>,
    pub shades: Vec<Shade>,
    pub variants: Vec<String>,
}

impl PatternRule {
    /// Build a rule whose pattern matches exactly the product of the axes,
    /// optionally prefixed by one variant.
    pub fn from_axes(
        properties: Vec<String>,
        roles: Vec<String>,
        shades: Vec<Shade>,
        variants: Vec<String>,
    ) -> Self {
        let shade_text: Vec<String> = shades.iter().map(ToString::to_string).collect();
        let body = format!(
            "({})-({})-({})",
            alternation(&properties),
            alternation(&roles),
            alternation(&shade_text)
        );
        let pattern = if variants.is_empty() {
            format!("^{body}$")
        } else {
            format!("^(?:({}):)?{body}$", alternation(&variants))
        };
        Self {
            pattern,
            properties,
            roles,
            shades,
            variants,
        }
    }

    /// Compile the pattern.
    ///
    /// # Errors
    /// Returns `PresetError::Pattern` if the pattern is not a valid regex.
    pub fn regex(&self) -> Result<Regex, PresetError> {
        Regex::new(&self.pattern).map_err(|source| PresetError::Pattern {
            pattern: self.pattern.clone(),
            source,
        })
    }

    /// Whether `class` matches. An invalid pattern matches nothing.
    pub fn matches(&self, class: &str) -> bool {
        self.regex().is_ok_and(|re| re.is_match(class))
    }

    /// Every class in the axis product: unprefixed first, then per variant.
    pub fn expand(&self) -> Vec<String> {
        let mut classes = Vec::with_capacity(self.class_count());
        let prefixes = std::iter::once(String::new())
            .chain(self.variants.iter().map(|v| format!("{v}:")));
        for prefix in prefixes {
            for property in &self.properties {
                for role in &self.roles {
                    for shade in &self.shades {
                        classes.push(format!("{prefix}{property}-{role}-{shade}"));
                    }
                }
            }
        }
        classes
    }

    /// Number of classes produced by [`expand`](Self::expand).
    pub fn class_count(&self) -> usize {
        (1 + self.variants.len()) * self.properties.len() * self.roles.len() * self.shades.len()
    }
}

fn alternation<S: AsRef<str>>(values: &[S]) -> String {
    values
        .iter()
        .map(|v| regex::escape(v.as_ref()))
        .collect::<Vec<_>>()
        .join("|")
}

/// A single instruction to the utility-CSS compiler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassGenerationRule {
    Literal(String),
    Pattern(PatternRule),
}

impl ClassGenerationRule {
    /// Whether this rule keeps `class`.
    pub fn matches(&self, class: &str) -> bool {
        match self {
            Self::Literal(literal) => literal == class,
            Self::Pattern(rule) => rule.matches(class),
        }
    }

    /// Classes this rule keeps.
    pub fn expand(&self) -> Vec<String> {
        match self {
            Self::Literal(literal) => vec![literal.clone()],
            Self::Pattern(rule) => rule.expand(),
        }
    }
}

/// Generated preset: safelist, pattern rules and theme extension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    /// Literal classes, deduplicated in first-seen order.
    pub safelist: Vec<String>,
    /// One rule per color role.
    pub patterns: Vec<PatternRule>,
    /// Semantic names mapped to CSS variable references.
    pub theme: Value,
}

impl Preset {
    /// All rules: literals first, then patterns.
    pub fn rules(&self) -> Vec<ClassGenerationRule> {
        self.safelist
            .iter()
            .cloned()
            .map(ClassGenerationRule::Literal)
            .chain(self.patterns.iter().cloned().map(ClassGenerationRule::Pattern))
            .collect()
    }

    /// Literals plus every pattern expansion, deduplicated in order.
    pub fn expanded_safelist(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.safelist
            .iter()
            .cloned()
            .chain(self.patterns.iter().flat_map(PatternRule::expand))
            .filter(|class| seen.insert(class.clone()))
            .collect()
    }

    /// Compile the preset for repeated coverage queries.
    ///
    /// # Errors
    /// Returns `PresetError::Pattern` if a pattern fails to compile.
    pub fn matcher(&self) -> Result<ClassMatcher, PresetError> {
        Ok(ClassMatcher {
            literals: self.safelist.iter().cloned().collect(),
            patterns: self
                .patterns
                .iter()
                .map(PatternRule::regex)
                .collect::<Result<_, _>>()?,
        })
    }

    /// Whether some rule keeps `class`.
    pub fn covers(&self, class: &str) -> bool {
        self.safelist.iter().any(|c| c == class) || self.patterns.iter().any(|r| r.matches(class))
    }

    /// Classes from `classes` that no rule keeps.
    ///
    /// # Errors
    /// Returns `PresetError::Pattern` if a pattern fails to compile.
    pub fn uncovered<'a, I>(&self, classes: I) -> Result<Vec<&'a str>, PresetError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        Ok(self.matcher()?.uncovered(classes))
    }

    /// Pretty JSON for the utility-CSS build step.
    ///
    /// # Errors
    /// Returns a serialization error.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Compiled form of a [`Preset`].
#[derive(Debug, Clone)]
pub struct ClassMatcher {
    literals: HashSet<String>,
    patterns: Vec<Regex>,
}

impl ClassMatcher {
    /// Whether some rule keeps `class`.
    pub fn covers(&self, class: &str) -> bool {
        self.literals.contains(class) || self.patterns.iter().any(|re| re.is_match(class))
    }

    /// Classes that no rule keeps, in input order.
    pub fn uncovered<'a, I>(&self, classes: I) -> Vec<&'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        classes.into_iter().filter(|c| !self.covers(c)).collect()
    }
}

/// Derives a [`Preset`] from a token registry.
#[derive(Debug, Clone)]
pub struct PresetGenerator<'a> {
    registry: &'a TokenRegistry,
    config: PresetConfig,
}

impl<'a> PresetGenerator<'a> {
    /// Generator with the default axes.
    pub fn new(registry: &'a TokenRegistry) -> Self {
        Self::with_config(registry, PresetConfig::default())
    }

    /// Generator with explicit axes.
    pub fn with_config(registry: &'a TokenRegistry, config: PresetConfig) -> Self {
        Self { registry, config }
    }

    /// Configuration in use.
    pub fn config(&self) -> &PresetConfig {
        &self.config
    }

    /// Semantic literal classes plus configured extras, deduplicated.
    pub fn literal_classes(&self) -> Vec<String> {
        let mut classes = Vec::new();
        for token in self.registry.tokens() {
            let name = token.name();
            match token.category() {
                TokenCategory::Color => {
                    let key = semantic_key(name, "color-");
                    classes.extend(SEMANTIC_PROPERTIES.iter().map(|p| format!("{p}-{key}")));
                }
                TokenCategory::Radius => {
                    classes.push(format!("rounded-{}", semantic_key(name, "radius-")));
                }
                TokenCategory::Shadow => {
                    classes.push(format!("shadow-{}", semantic_key(name, "shadow-")));
                }
                TokenCategory::Typography => {
                    classes.push(format!("font-{}", semantic_key(name, "font-")));
                }
            }
        }
        classes.extend(self.config.safelist.iter().cloned());

        let mut seen = HashSet::new();
        classes.retain(|c| seen.insert(c.clone()));
        classes
    }

    /// One pattern rule per color role. Empty axes produce no rules.
    pub fn pattern_rules(&self) -> Vec<PatternRule> {
        if self.config.properties.is_empty() || self.registry.shades().is_empty() {
            return Vec::new();
        }
        self.registry
            .roles()
            .iter()
            .map(|role| {
                PatternRule::from_axes(
                    self.config.properties.clone(),
                    vec![role.clone()],
                    self.registry.shades().to_vec(),
                    self.config.variants.clone(),
                )
            })
            .collect()
    }

    /// All rules: literals first, then patterns.
    pub fn rules(&self) -> Vec<ClassGenerationRule> {
        self.literal_classes()
            .into_iter()
            .map(ClassGenerationRule::Literal)
            .chain(self.pattern_rules().into_iter().map(ClassGenerationRule::Pattern))
            .collect()
    }

    /// Theme extension mapping semantic names to CSS variable references.
    ///
    /// Colors use `hsl(var(--token) / <alpha-value>)` so the compiler can
    /// apply opacity modifiers to the bare `"H S% L%"` triplets.
    pub fn theme_extension(&self) -> Value {
        let mut colors = Map::new();
        let mut radius = Map::new();
        let mut shadow = Map::new();
        let mut font = Map::new();

        for token in self.registry.tokens() {
            let name = token.name();
            match token.category() {
                TokenCategory::Color => {
                    colors.insert(semantic_key(name, "color-").to_string(), hsl_var(name));
                }
                TokenCategory::Radius => {
                    radius.insert(semantic_key(name, "radius-").to_string(), css_var(name));
                }
                TokenCategory::Shadow => {
                    shadow.insert(semantic_key(name, "shadow-").to_string(), css_var(name));
                }
                TokenCategory::Typography => {
                    font.insert(semantic_key(name, "font-").to_string(), css_var(name));
                }
            }
        }

        for role in self.registry.roles() {
            let scale: Map<String, Value> = self
                .registry
                .shades()
                .iter()
                .map(|&shade| (shade.to_string(), hsl_var(&scale_token_name(role, shade))))
                .collect();
            colors.insert(role.clone(), Value::Object(scale));
        }

        json!({
            "colors": colors,
            "borderRadius": radius,
            "boxShadow": shadow,
            "fontFamily": font,
        })
    }

    /// Build the preset.
    pub fn generate(&self) -> Preset {
        let preset = Preset {
            safelist: self.literal_classes(),
            patterns: self.pattern_rules(),
            theme: self.theme_extension(),
        };
        debug!(
            preset.literals = preset.safelist.len(),
            preset.patterns = preset.patterns.len(),
            "Preset generated"
        );
        preset
    }
}

fn semantic_key<'n>(name: &'n str, prefix: &str) -> &'n str {
    name.strip_prefix(prefix).unwrap_or(name)
}

fn hsl_var(token: &str) -> Value {
    Value::String(format!("hsl(var(--{token}) / <alpha-value>)"))
}

fn css_var(token: &str) -> Value {
    Value::String(format!("var(--{token})"))
}

/// Error compiling a preset.
#[derive(Error, Debug)]
pub enum PresetError {
    #[error("invalid pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
