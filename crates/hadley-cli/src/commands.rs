//! Subcommand implementations.
//!
//! Each command writes its result to stdout and returns the process exit
//! code; diagnostics go through `tracing` to stderr.

use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;
use hadley::css::{combined, render_theme, write_stylesheets};
use hadley::switcher::MemoryDocument;
use hadley::theme::{COLOR_SCHEME_ATTRIBUTE, THEME_ATTRIBUTE};
use hadley::{
    DocumentRoot, PresetGenerator, ThemeInfo, ThemeStore, ThemeSwitcher, TokenRegistry,
    validate, validate_store,
};
use tracing::info;

use crate::cli::{
    CheckClassesArgs, Command, CssArgs, PresetArgs, SwitchArgs, ThemesArgs, ValidateArgs,
};
use crate::config::Config;
use crate::storage::FileStorage;

/// Run a subcommand.
///
/// # Errors
/// Returns an error for unusable input: bad theme files, unknown theme
/// names, unwritable output.
pub fn run(command: &Command, config: &Config) -> Result<ExitCode> {
    match command {
        Command::Validate(args) => run_validate(args, config),
        Command::Themes(args) => run_themes(args, config),
        Command::Css(args) => run_css(args, config),
        Command::Preset(args) => run_preset(args, config),
        Command::CheckClasses(args) => run_check_classes(args, config),
        Command::Switch(args) => run_switch(args, config),
    }
}

fn load_store(config: &Config) -> Result<ThemeStore> {
    config.theme_store().context("failed to load themes")
}

/// Store holding only `name`, or the whole store when `name` is `None`.
fn select(store: ThemeStore, name: Option<&str>) -> Result<ThemeStore> {
    let Some(name) = name else {
        return Ok(store);
    };
    let theme = store.get_theme(name)?.clone();
    let mut selected = ThemeStore::new();
    selected.insert(theme)?;
    Ok(selected)
}

fn run_validate(args: &ValidateArgs, config: &Config) -> Result<ExitCode> {
    let registry = TokenRegistry::standard();
    let store = select(load_store(config)?, args.theme.as_deref())?;

    let mut invalid = 0usize;
    for theme in &store {
        let result = validate(theme, &registry);
        if result.is_valid() {
            println!("{} {}", "✓".green(), theme.name());
        } else {
            invalid += 1;
            println!("{} {}", "✗".red(), theme.name().bold());
            for error in result.errors() {
                println!("    - {error}");
            }
        }
    }

    if invalid == 0 {
        println!("{}", format!("{} theme(s) valid", store.len()).green());
        Ok(ExitCode::SUCCESS)
    } else {
        println!(
            "{}",
            format!("{invalid} of {} theme(s) invalid", store.len()).red()
        );
        Ok(ExitCode::FAILURE)
    }
}

fn run_themes(args: &ThemesArgs, config: &Config) -> Result<ExitCode> {
    let store = load_store(config)?;
    if args.json {
        let infos: Vec<ThemeInfo> = store.list_themes().iter().map(|t| t.info()).collect();
        println!("{}", serde_json::to_string_pretty(&infos)?);
        return Ok(ExitCode::SUCCESS);
    }

    let width = store.names().map(str::len).max().unwrap_or(0);
    for theme in &store {
        let marker = if theme.name() == config.themes.default {
            "*"
        } else {
            " "
        };
        println!(
            "{marker} {:<width$}  {}  {}",
            theme.name().bold(),
            theme.label(),
            theme.description().dimmed()
        );
    }
    Ok(ExitCode::SUCCESS)
}

fn run_css(args: &CssArgs, config: &Config) -> Result<ExitCode> {
    let registry = TokenRegistry::standard();
    let store = select(load_store(config)?, args.theme.as_deref())?;

    let report = validate_store(&store, &registry);
    if !report.is_valid() {
        for error in report.errors() {
            eprintln!("{} {error}", "✗".red());
        }
        eprintln!(
            "{} no stylesheets written, run `hadley validate` for details",
            "error:".red()
        );
        return Ok(ExitCode::FAILURE);
    }

    match args.out_dir.as_ref().or(config.output.css_dir.as_ref()) {
        Some(dir) => {
            let written = write_stylesheets(dir, &store, &registry)
                .with_context(|| format!("failed to write stylesheets to {}", dir.display()))?;
            for path in written {
                println!("{} {}", "wrote".green(), path.display());
            }
        }
        None => match store.list_themes() {
            [theme] => print!("{}", render_theme(theme, &registry)),
            _ => print!("{}", combined(&store, &registry)),
        },
    }
    Ok(ExitCode::SUCCESS)
}

fn run_preset(args: &PresetArgs, config: &Config) -> Result<ExitCode> {
    let registry = TokenRegistry::standard();
    let mut preset = PresetGenerator::with_config(&registry, config.preset.clone()).generate();
    if args.expand {
        preset.safelist = preset.expanded_safelist();
    }
    println!("{}", preset.to_json()?);
    Ok(ExitCode::SUCCESS)
}

fn run_check_classes(args: &CheckClassesArgs, config: &Config) -> Result<ExitCode> {
    let registry = TokenRegistry::standard();
    let preset = PresetGenerator::with_config(&registry, config.preset.clone()).generate();
    let matcher = preset.matcher()?;
    let uncovered = matcher.uncovered(args.classes.iter().map(String::as_str));

    if uncovered.is_empty() {
        println!(
            "{}",
            format!("all {} class(es) covered", args.classes.len()).green()
        );
        return Ok(ExitCode::SUCCESS);
    }
    for class in &uncovered {
        println!("{} {class} is not covered by the preset", "✗".red());
    }
    Ok(ExitCode::FAILURE)
}

fn run_switch(args: &SwitchArgs, config: &Config) -> Result<ExitCode> {
    let store = load_store(config)?;
    let storage = FileStorage::open(&args.state_file);
    let mut switcher =
        ThemeSwitcher::new(&store, storage, MemoryDocument::new(), config.switcher_config())?;
    switcher.initialize();

    let mut reports = Vec::new();
    if let Some(name) = &args.theme {
        reports.push(switcher.select_theme(name)?);
    }
    if let Some(mode) = args.mode {
        reports.push(switcher.set_color_mode(mode)?);
    }
    if args.toggle {
        reports.push(switcher.toggle_color_mode()?);
    }

    for report in &reports {
        if let Some(err) = &report.storage_error {
            eprintln!("{} selection not persisted: {err}", "warning:".yellow());
        }
    }

    let document = switcher.document();
    for attribute in [THEME_ATTRIBUTE, COLOR_SCHEME_ATTRIBUTE] {
        let value = document.attribute(attribute).unwrap_or_default();
        println!("{attribute}=\"{value}\"");
    }
    info!(
        state.path = %switcher.storage().path().display(),
        updates = reports.len(),
        "Switch complete"
    );
    Ok(ExitCode::SUCCESS)
}
