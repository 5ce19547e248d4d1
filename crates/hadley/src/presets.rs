//! Shipped theme definitions.
//!
//! | Theme      | Background | Primary | Character                              |
//! |------------|------------|---------|----------------------------------------|
//! | `nostromo` | graphite   | amber   | worn freighter console, CRT amber      |
//! | `mother`   | black      | green   | mainframe phosphor terminal            |
//! | `lv-426`   | storm gray | teal    | colony atmosphere, cold instrument glow|
//! | `sulaco`   | navy       | steel   | military transport, clean and bright   |
//!
//! Base values are the dark rendering; each theme also carries light-mode
//! overrides for surfaces and text.

use crate::color::HslColor;
use crate::registry::STANDARD_SHADES;
use crate::theme::{ShadeRamp, Theme};

/// Name of the theme used when nothing else is selected.
pub const DEFAULT_THEME: &str = "nostromo";

const FONT_SANS: &str = "\"Inter\", ui-sans-serif, system-ui, sans-serif";
const FONT_MONO: &str = "\"JetBrains Mono\", ui-monospace, SFMono-Regular, monospace";

/// All shipped themes, in authoring order.
pub fn all() -> Vec<Theme> {
    vec![nostromo(), mother(), lv_426(), sulaco()]
}

/// Ramps for the five standard roles: brand, neutral, success, warning, error.
fn with_scales(theme: Theme, ramps: [(&str, ShadeRamp); 5]) -> Theme {
    ramps
        .into_iter()
        .fold(theme, |theme, (role, ramp)| {
            theme.with_scale(role, ramp, &STANDARD_SHADES)
        })
}

fn radii(sm: &'static str, md: &'static str, lg: &'static str) -> [(&'static str, &'static str); 3] {
    [("radius-sm", sm), ("radius-md", md), ("radius-lg", lg)]
}

fn shadows(tint: &str) -> [(&'static str, String); 3] {
    [
        ("shadow-sm", format!("0 1px 2px 0 hsl({tint} / 0.35)")),
        (
            "shadow-md",
            format!("0 4px 6px -1px hsl({tint} / 0.4), 0 2px 4px -2px hsl({tint} / 0.4)"),
        ),
        (
            "shadow-lg",
            format!("0 10px 15px -3px hsl({tint} / 0.45), 0 4px 6px -4px hsl({tint} / 0.45)"),
        ),
    ]
}

fn fonts() -> [(&'static str, &'static str); 2] {
    [("font-sans", FONT_SANS), ("font-mono", FONT_MONO)]
}

/// Commercial towing vessel: amber readouts on a graphite console.
pub fn nostromo() -> Theme {
    let theme = Theme::new("nostromo")
        .with_label("Nostromo")
        .with_description(
            "Commercial towing vessel. Amber CRT readouts on a worn graphite console.",
        )
        .with_tokens([
            ("color-background", "30 8% 7%"),
            ("color-foreground", "38 30% 88%"),
            ("color-card", "30 8% 10%"),
            ("color-card-foreground", "38 30% 88%"),
            ("color-popover", "30 8% 9%"),
            ("color-popover-foreground", "38 30% 88%"),
            ("color-primary", "36 95% 55%"),
            ("color-primary-foreground", "30 30% 8%"),
            ("color-secondary", "30 6% 18%"),
            ("color-secondary-foreground", "38 25% 85%"),
            ("color-muted", "30 6% 15%"),
            ("color-muted-foreground", "35 12% 62%"),
            ("color-accent", "24 85% 50%"),
            ("color-accent-foreground", "30 30% 8%"),
            ("color-destructive", "0 75% 52%"),
            ("color-destructive-foreground", "0 0% 98%"),
            ("color-border", "30 6% 20%"),
            ("color-input", "30 6% 22%"),
            ("color-ring", "36 95% 55%"),
        ])
        .with_tokens(radii("0.125rem", "0.25rem", "0.375rem"))
        .with_tokens(shadows("30 40% 2%"))
        .with_tokens(fonts())
        .with_light("color-background", "40 30% 96%")
        .with_light("color-foreground", "30 15% 12%")
        .with_light("color-card", "40 30% 98%")
        .with_light("color-card-foreground", "30 15% 12%")
        .with_light("color-popover", "40 30% 98%")
        .with_light("color-popover-foreground", "30 15% 12%")
        .with_light("color-secondary", "38 20% 88%")
        .with_light("color-secondary-foreground", "30 15% 15%")
        .with_light("color-muted", "38 20% 90%")
        .with_light("color-muted-foreground", "30 10% 40%")
        .with_light("color-border", "38 15% 80%")
        .with_light("color-input", "38 15% 78%")
        .with_light("color-primary", "32 95% 42%")
        .with_swatch("console", HslColor::clamped(30.0, 8.0, 7.0))
        .with_swatch("amber", HslColor::clamped(36.0, 95.0, 55.0))
        .with_swatch("warning light", HslColor::clamped(24.0, 85.0, 50.0));

    with_scales(
        theme,
        [
            ("brand", ShadeRamp::new(36.0, 92.0)),
            ("neutral", ShadeRamp::new(30.0, 7.0)),
            ("success", ShadeRamp::new(95.0, 45.0)),
            ("warning", ShadeRamp::new(45.0, 95.0)),
            ("error", ShadeRamp::new(4.0, 78.0)),
        ],
    )
}

/// Ship mainframe: green phosphor on black glass.
pub fn mother() -> Theme {
    let theme = Theme::new("mother")
        .with_label("MU/TH/UR 6000")
        .with_description(
            "The ship's mainframe interface. Green phosphor text on black glass, hard edges.",
        )
        .with_tokens([
            ("color-background", "150 20% 3%"),
            ("color-foreground", "130 70% 72%"),
            ("color-card", "150 18% 6%"),
            ("color-card-foreground", "130 70% 72%"),
            ("color-popover", "150 18% 5%"),
            ("color-popover-foreground", "130 70% 72%"),
            ("color-primary", "130 80% 50%"),
            ("color-primary-foreground", "150 30% 4%"),
            ("color-secondary", "150 15% 12%"),
            ("color-secondary-foreground", "130 60% 70%"),
            ("color-muted", "150 12% 10%"),
            ("color-muted-foreground", "130 25% 50%"),
            ("color-accent", "160 70% 40%"),
            ("color-accent-foreground", "150 30% 4%"),
            ("color-destructive", "355 80% 55%"),
            ("color-destructive-foreground", "0 0% 98%"),
            ("color-border", "140 25% 16%"),
            ("color-input", "140 25% 18%"),
            ("color-ring", "130 80% 50%"),
        ])
        .with_tokens(radii("0rem", "0rem", "0.125rem"))
        .with_tokens(shadows("130 80% 20%"))
        .with_tokens(fonts())
        .with_token("font-sans", FONT_MONO)
        .with_light("color-background", "120 20% 95%")
        .with_light("color-foreground", "150 40% 10%")
        .with_light("color-card", "120 20% 97%")
        .with_light("color-card-foreground", "150 40% 10%")
        .with_light("color-popover", "120 20% 97%")
        .with_light("color-popover-foreground", "150 40% 10%")
        .with_light("color-secondary", "120 15% 88%")
        .with_light("color-secondary-foreground", "150 40% 12%")
        .with_light("color-muted", "120 15% 90%")
        .with_light("color-muted-foreground", "140 15% 35%")
        .with_light("color-border", "130 15% 78%")
        .with_light("color-input", "130 15% 75%")
        .with_light("color-primary", "135 75% 30%")
        .with_swatch("glass", HslColor::clamped(150.0, 20.0, 3.0))
        .with_swatch("phosphor", HslColor::clamped(130.0, 80.0, 50.0));

    with_scales(
        theme,
        [
            ("brand", ShadeRamp::new(130.0, 75.0)),
            ("neutral", ShadeRamp::new(150.0, 10.0)),
            ("success", ShadeRamp::new(145.0, 65.0)),
            ("warning", ShadeRamp::new(55.0, 90.0)),
            ("error", ShadeRamp::new(355.0, 80.0)),
        ],
    )
}

/// Storm-swept colony moon: teal instruments under a gray sky.
pub fn lv_426() -> Theme {
    let theme = Theme::new("lv-426")
        .with_label("LV-426")
        .with_description(
            "Acheron colony. Cold teal instrument glow under a storm-gray atmosphere.",
        )
        .with_tokens([
            ("color-background", "200 15% 9%"),
            ("color-foreground", "190 20% 86%"),
            ("color-card", "200 14% 12%"),
            ("color-card-foreground", "190 20% 86%"),
            ("color-popover", "200 14% 11%"),
            ("color-popover-foreground", "190 20% 86%"),
            ("color-primary", "180 65% 45%"),
            ("color-primary-foreground", "200 30% 8%"),
            ("color-secondary", "200 10% 20%"),
            ("color-secondary-foreground", "190 18% 84%"),
            ("color-muted", "200 10% 17%"),
            ("color-muted-foreground", "195 10% 60%"),
            ("color-accent", "165 55% 42%"),
            ("color-accent-foreground", "200 30% 8%"),
            ("color-destructive", "8 75% 52%"),
            ("color-destructive-foreground", "0 0% 98%"),
            ("color-border", "200 10% 22%"),
            ("color-input", "200 10% 24%"),
            ("color-ring", "180 65% 45%"),
        ])
        .with_tokens(radii("0.25rem", "0.375rem", "0.625rem"))
        .with_tokens(shadows("200 30% 3%"))
        .with_tokens(fonts())
        .with_light("color-background", "195 20% 95%")
        .with_light("color-foreground", "200 25% 12%")
        .with_light("color-card", "195 20% 98%")
        .with_light("color-card-foreground", "200 25% 12%")
        .with_light("color-popover", "195 20% 98%")
        .with_light("color-popover-foreground", "200 25% 12%")
        .with_light("color-secondary", "195 15% 88%")
        .with_light("color-secondary-foreground", "200 25% 15%")
        .with_light("color-muted", "195 15% 90%")
        .with_light("color-muted-foreground", "200 10% 38%")
        .with_light("color-border", "195 12% 80%")
        .with_light("color-input", "195 12% 77%")
        .with_light("color-primary", "182 70% 30%")
        .with_swatch("atmosphere", HslColor::clamped(200.0, 15.0, 9.0))
        .with_swatch("instrument teal", HslColor::clamped(180.0, 65.0, 45.0))
        .with_swatch("derelict", HslColor::clamped(165.0, 55.0, 42.0));

    with_scales(
        theme,
        [
            ("brand", ShadeRamp::new(180.0, 60.0)),
            ("neutral", ShadeRamp::new(200.0, 9.0)),
            ("success", ShadeRamp::new(150.0, 55.0)),
            ("warning", ShadeRamp::new(40.0, 90.0)),
            ("error", ShadeRamp::new(8.0, 75.0)),
        ],
    )
}

/// Military transport: steel blue on deep navy.
pub fn sulaco() -> Theme {
    let theme = Theme::new("sulaco")
        .with_label("Sulaco")
        .with_description(
            "Conestoga-class troop transport. Steel blue accents on deep navy bulkheads.",
        )
        .with_tokens([
            ("color-background", "220 30% 8%"),
            ("color-foreground", "215 25% 90%"),
            ("color-card", "220 28% 11%"),
            ("color-card-foreground", "215 25% 90%"),
            ("color-popover", "220 28% 10%"),
            ("color-popover-foreground", "215 25% 90%"),
            ("color-primary", "215 80% 58%"),
            ("color-primary-foreground", "220 40% 8%"),
            ("color-secondary", "220 18% 20%"),
            ("color-secondary-foreground", "215 22% 88%"),
            ("color-muted", "220 18% 16%"),
            ("color-muted-foreground", "215 15% 62%"),
            ("color-accent", "200 85% 55%"),
            ("color-accent-foreground", "220 40% 8%"),
            ("color-destructive", "0 80% 56%"),
            ("color-destructive-foreground", "0 0% 98%"),
            ("color-border", "220 18% 22%"),
            ("color-input", "220 18% 24%"),
            ("color-ring", "215 80% 58%"),
        ])
        .with_tokens(radii("0.25rem", "0.5rem", "0.75rem"))
        .with_tokens(shadows("220 50% 3%"))
        .with_tokens(fonts())
        .with_light("color-background", "215 30% 97%")
        .with_light("color-foreground", "220 35% 12%")
        .with_light("color-card", "0 0% 100%")
        .with_light("color-card-foreground", "220 35% 12%")
        .with_light("color-popover", "0 0% 100%")
        .with_light("color-popover-foreground", "220 35% 12%")
        .with_light("color-secondary", "215 25% 90%")
        .with_light("color-secondary-foreground", "220 35% 15%")
        .with_light("color-muted", "215 25% 92%")
        .with_light("color-muted-foreground", "220 12% 40%")
        .with_light("color-border", "215 20% 82%")
        .with_light("color-input", "215 20% 79%")
        .with_light("color-primary", "218 80% 45%")
        .with_swatch("bulkhead", HslColor::clamped(220.0, 30.0, 8.0))
        .with_swatch("steel", HslColor::clamped(215.0, 80.0, 58.0))
        .with_swatch("dropship", HslColor::clamped(200.0, 85.0, 55.0));

    with_scales(
        theme,
        [
            ("brand", ShadeRamp::new(215.0, 78.0)),
            ("neutral", ShadeRamp::new(220.0, 14.0)),
            ("success", ShadeRamp::new(150.0, 60.0)),
            ("warning", ShadeRamp::new(42.0, 92.0)),
            ("error", ShadeRamp::new(0.0, 80.0)),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::TokenRegistry;

    #[test]
    fn test_default_theme_is_shipped() {
        assert!(all().iter().any(|t| t.name() == DEFAULT_THEME));
    }

    #[test]
    fn test_every_preset_binds_every_required_token() {
        let registry = TokenRegistry::standard();
        for theme in all() {
            for token in registry.required_tokens() {
                assert!(
                    theme.token(token.name()).is_some(),
                    "{} is missing {}",
                    theme.name(),
                    token.name()
                );
            }
        }
    }

    #[test]
    fn test_mother_uses_monospace_everywhere() {
        assert_eq!(mother().token("font-sans"), Some(FONT_MONO));
    }

    #[test]
    fn test_light_overrides_are_lighter() {
        for theme in all() {
            let dark = theme.color("color-background").unwrap();
            let light: HslColor = theme
                .light_token("color-background")
                .unwrap()
                .parse()
                .unwrap();
            assert!(light.lightness() > dark.lightness(), "{}", theme.name());
        }
    }

    #[test]
    fn test_foreground_contrast_meets_aa() {
        for theme in all() {
            let ratio = theme
                .contrast_ratio("color-foreground", "color-background")
                .unwrap();
            assert!(ratio >= 4.5, "{} contrast {ratio}", theme.name());
        }
    }
}
