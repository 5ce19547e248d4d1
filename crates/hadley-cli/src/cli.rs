//! Command-line interface for `hadley`.
//!
//! # Examples
//!
//! ```bash
//! # Check every theme against the token contract
//! hadley validate
//!
//! # Write one stylesheet per theme
//! hadley css --out-dir public/themes
//!
//! # Emit the utility-class preset for the CSS build
//! hadley preset > hadley-preset.json
//!
//! # Select a theme and flip the color mode in a state file
//! hadley switch --theme sulaco --toggle --state-file .hadley-state.json
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use hadley::ColorMode;

/// Hadley design-token themes.
///
/// Validates theme definitions, renders their stylesheets, generates the
/// utility-class preset and drives the runtime theme switcher.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "hadley",
    author,
    version,
    about = "Hadley design-token themes",
    long_about = "Validate theme definitions against the token contract, render \
                  theme stylesheets, generate utility-class presets and drive the \
                  runtime theme switcher."
)]
pub struct Cli {
    /// Path to a hadley.toml config file
    ///
    /// Defaults to ./hadley.toml when present
    #[arg(long, short = 'c', env = "HADLEY_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    ///
    /// `RUST_LOG` takes precedence when set
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Disable colored output
    ///
    /// Respects `NO_COLOR` environment variable
    #[arg(long, env = "NO_COLOR", global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Validate themes against the token contract
    Validate(ValidateArgs),

    /// List available themes
    Themes(ThemesArgs),

    /// Print or write theme stylesheets
    Css(CssArgs),

    /// Print the utility-class preset as JSON
    Preset(PresetArgs),

    /// Check that utility classes are kept by the preset
    CheckClasses(CheckClassesArgs),

    /// Run the theme switcher against a state file
    Switch(SwitchArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct ValidateArgs {
    /// Validate only this theme
    #[arg(long, short = 't')]
    pub theme: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct ThemesArgs {
    /// Print theme metadata as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CssArgs {
    /// Write `<name>.css` files into this directory instead of stdout
    ///
    /// Defaults to `[output].css_dir` from the config when set
    #[arg(long, short = 'o')]
    pub out_dir: Option<PathBuf>,

    /// Render only this theme
    #[arg(long, short = 't')]
    pub theme: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct PresetArgs {
    /// Replace the safelist with every class the patterns expand to
    #[arg(long)]
    pub expand: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CheckClassesArgs {
    /// Class names to check, e.g. `hover:bg-brand-500`
    #[arg(required = true)]
    pub classes: Vec<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct SwitchArgs {
    /// Select this theme
    #[arg(long, short = 't')]
    pub theme: Option<String>,

    /// Set the color mode (light or dark)
    #[arg(long, conflicts_with = "toggle")]
    pub mode: Option<ColorMode>,

    /// Flip the color mode
    #[arg(long)]
    pub toggle: bool,

    /// JSON file used as persisted storage
    #[arg(long, env = "HADLEY_STATE_FILE", default_value = ".hadley-state.json")]
    pub state_file: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_switch() {
        let cli = Cli::try_parse_from([
            "hadley", "-vv", "switch", "--theme", "mother", "--mode", "light", "--state-file",
            "s.json",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let Command::Switch(args) = cli.command else {
            panic!("expected switch");
        };
        assert_eq!(args.theme.as_deref(), Some("mother"));
        assert_eq!(args.mode, Some(ColorMode::Light));
        assert_eq!(args.state_file, PathBuf::from("s.json"));
    }

    #[test]
    fn test_mode_conflicts_with_toggle() {
        let result =
            Cli::try_parse_from(["hadley", "switch", "--mode", "dark", "--toggle"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_check_classes_requires_a_class() {
        assert!(Cli::try_parse_from(["hadley", "check-classes"]).is_err());
    }
}
