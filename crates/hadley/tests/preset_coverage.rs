//! Coverage of dynamically built utility classes by the generated preset.

use hadley::preset::{DEFAULT_PROPERTIES, DEFAULT_VARIANTS, PresetGenerator};
use hadley::registry::{STANDARD_ROLES, STANDARD_SHADES};
use hadley::{PresetConfig, TokenRegistry};
use proptest::prelude::*;

fn class(variant: Option<&str>, property: &str, role: &str, shade: u16) -> String {
    match variant {
        Some(v) => format!("{v}:{property}-{role}-{shade}"),
        None => format!("{property}-{role}-{shade}"),
    }
}

#[test]
fn expanded_safelist_is_fully_covered() {
    let registry = TokenRegistry::standard();
    let preset = PresetGenerator::new(&registry).generate();
    let expanded = preset.expanded_safelist();
    let uncovered = preset.uncovered(expanded.iter().map(String::as_str)).unwrap();
    assert!(uncovered.is_empty(), "{uncovered:?}");
    assert_eq!(
        expanded.len(),
        preset.safelist.len() + 5 * 11 * DEFAULT_PROPERTIES.len() * (1 + DEFAULT_VARIANTS.len())
    );
}

#[test]
fn preset_json_parses_back() {
    let registry = TokenRegistry::standard();
    let preset = PresetGenerator::new(&registry).generate();
    let parsed: hadley::Preset = serde_json::from_str(&preset.to_json().unwrap()).unwrap();
    assert_eq!(parsed, preset);
}

proptest! {
    #[test]
    fn every_axis_combination_is_covered(
        variant in prop::option::of(prop::sample::select(DEFAULT_VARIANTS.to_vec())),
        property in prop::sample::select(DEFAULT_PROPERTIES.to_vec()),
        role in prop::sample::select(STANDARD_ROLES.to_vec()),
        shade in prop::sample::select(STANDARD_SHADES.to_vec()),
    ) {
        let registry = TokenRegistry::standard();
        let preset = PresetGenerator::new(&registry).generate();
        prop_assert!(preset.covers(&class(variant, property, role, shade)));
    }

    #[test]
    fn shades_outside_scale_are_not_covered(
        property in prop::sample::select(DEFAULT_PROPERTIES.to_vec()),
        role in prop::sample::select(STANDARD_ROLES.to_vec()),
        shade in 0u16..1000,
    ) {
        prop_assume!(!STANDARD_SHADES.contains(&shade));
        let registry = TokenRegistry::standard();
        let preset = PresetGenerator::new(&registry).generate();
        prop_assert!(!preset.covers(&class(None, property, role, shade)));
    }

    #[test]
    fn custom_axes_are_covered(
        roles in prop::collection::btree_set("[a-z]{3,8}", 1..4),
        shades in prop::collection::btree_set(1u16..1000, 1..5),
        properties in prop::collection::btree_set("(bg|fill|stroke|caret)", 1..3),
    ) {
        let registry = TokenRegistry::new(vec![], roles.clone(), shades.clone());
        let config = PresetConfig {
            properties: properties.iter().cloned().collect(),
            variants: vec!["hover".into()],
            safelist: vec![],
        };
        let preset = PresetGenerator::with_config(&registry, config).generate();
        let matcher = preset.matcher().unwrap();
        for role in &roles {
            for shade in &shades {
                for property in &properties {
                    prop_assert!(matcher.covers(&class(None, property, role, *shade)));
                    prop_assert!(matcher.covers(&class(Some("hover"), property, role, *shade)));
                }
            }
        }
    }
}
