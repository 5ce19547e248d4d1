//! Behavioral properties of the runtime theme switcher.

use hadley::switcher::{
    ColorMode, DocumentRoot, MemoryDocument, MemoryStorage, SwitchError, SwitcherConfig,
    ThemeSwitcher,
};
use hadley::{ThemeStore, builtin_themes};
use proptest::prelude::*;

type Switcher = ThemeSwitcher<'static, MemoryStorage, MemoryDocument>;

fn cold_start(storage: MemoryStorage) -> Switcher {
    let mut switcher = ThemeSwitcher::new(
        builtin_themes(),
        storage,
        MemoryDocument::new(),
        SwitcherConfig::default(),
    )
    .unwrap();
    switcher.initialize();
    switcher
}

fn theme_name() -> impl Strategy<Value = String> {
    let names: Vec<String> = builtin_themes().names().map(String::from).collect();
    prop::sample::select(names)
}

#[derive(Debug, Clone)]
enum Op {
    Select(String),
    Toggle,
    Mode(ColorMode),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        theme_name().prop_map(Op::Select),
        Just(Op::Toggle),
        prop_oneof![Just(ColorMode::Light), Just(ColorMode::Dark)].prop_map(Op::Mode),
    ]
}

fn apply(switcher: &mut Switcher, op: &Op) {
    match op {
        Op::Select(name) => {
            switcher.select_theme(name).unwrap();
        }
        Op::Toggle => {
            switcher.toggle_color_mode().unwrap();
        }
        Op::Mode(mode) => {
            switcher.set_color_mode(*mode).unwrap();
        }
    }
}

#[test]
fn dark_is_default_without_persisted_value() {
    let switcher = cold_start(MemoryStorage::new());
    assert_eq!(switcher.active().unwrap().color_mode(), ColorMode::Dark);
}

#[test]
fn unknown_theme_keeps_nostromo() {
    let mut switcher = cold_start(MemoryStorage::new());
    assert_eq!(switcher.active().unwrap().theme_name(), "nostromo");
    assert!(matches!(
        switcher.select_theme("unknown-theme"),
        Err(SwitchError::NotFound(_))
    ));
    assert_eq!(switcher.active().unwrap().theme_name(), "nostromo");
}

#[test]
fn custom_store_with_single_theme() {
    let mut store = ThemeStore::new();
    store.insert(hadley::presets::mother()).unwrap();
    let store: &'static ThemeStore = Box::leak(Box::new(store));
    let config = SwitcherConfig {
        default_theme: "mother".into(),
        ..SwitcherConfig::default()
    };
    let mut switcher =
        ThemeSwitcher::new(store, MemoryStorage::new(), MemoryDocument::new(), config).unwrap();
    switcher.initialize();
    assert_eq!(switcher.active().unwrap().theme_name(), "mother");
    assert!(switcher.select_theme("nostromo").is_err());
}

proptest! {
    #[test]
    fn select_theme_is_idempotent(name in theme_name()) {
        let mut once = cold_start(MemoryStorage::new());
        once.select_theme(&name).unwrap();

        let mut twice = cold_start(MemoryStorage::new());
        twice.select_theme(&name).unwrap();
        twice.select_theme(&name).unwrap();

        prop_assert_eq!(once.active().unwrap(), twice.active().unwrap());
        prop_assert_eq!(once.document(), twice.document());
        prop_assert_eq!(once.storage(), twice.storage());
    }

    #[test]
    fn selection_survives_cold_start(name in theme_name(), ops in prop::collection::vec(op(), 0..8)) {
        let mut switcher = cold_start(MemoryStorage::new());
        for op in &ops {
            apply(&mut switcher, op);
        }
        switcher.select_theme(&name).unwrap();
        let mode = switcher.active().unwrap().color_mode();

        let (storage, _) = switcher.into_parts();
        let restarted = cold_start(storage);
        prop_assert_eq!(restarted.active().unwrap().theme_name(), name.as_str());
        prop_assert_eq!(restarted.active().unwrap().color_mode(), mode);
    }

    #[test]
    fn toggle_flips_mode_and_attribute(ops in prop::collection::vec(op(), 0..8)) {
        let mut switcher = cold_start(MemoryStorage::new());
        for op in &ops {
            apply(&mut switcher, op);
        }
        let before = switcher.active().unwrap().color_mode();
        switcher.toggle_color_mode().unwrap();
        let after = switcher.active().unwrap().color_mode();

        prop_assert_eq!(after, before.toggled());
        let attribute = switcher.document().attribute("data-color-scheme");
        prop_assert_eq!(attribute.as_deref(), Some(after.as_str()));
    }

    #[test]
    fn corrupted_persisted_mode_falls_back(value in "[A-Za-z0-9 ]{0,12}") {
        prop_assume!(value != "light" && value != "dark");
        let switcher = cold_start(MemoryStorage::new().with_value("hadley-theme", value));
        prop_assert_eq!(switcher.active().unwrap().color_mode(), ColorMode::Dark);
    }

    #[test]
    fn partial_persistence_is_reported(name in theme_name()) {
        let mut switcher = cold_start(MemoryStorage::new());
        switcher.storage_mut().set_fail_writes(true);
        let report = switcher.select_theme(&name).unwrap();
        prop_assert!(report.is_partial());
        let attribute = switcher.document().attribute("data-theme");
        prop_assert_eq!(attribute.as_deref(), Some(name.as_str()));
    }

    #[test]
    fn failed_attribute_write_changes_nothing(
        ops in prop::collection::vec(op(), 0..8),
        failing in prop::collection::vec(op(), 1..6),
    ) {
        let mut switcher = cold_start(MemoryStorage::new());
        for op in &ops {
            apply(&mut switcher, op);
        }
        let active = switcher.active().unwrap().clone();
        let attributes = switcher.document().attributes().clone();
        let persisted = switcher.storage().clone();

        switcher.document_mut().set_fail_writes(true);
        for op in &failing {
            apply(&mut switcher, op);
        }

        prop_assert_eq!(switcher.active().unwrap(), &active);
        prop_assert_eq!(switcher.document().attributes(), &attributes);
        prop_assert_eq!(switcher.storage(), &persisted);
        let attribute = switcher.document().attribute("data-color-scheme");
        prop_assert_eq!(attribute.as_deref(), Some(active.color_mode().as_str()));
    }
}
