use std::cell::Cell;

use pretty_assertions::assert_eq;
use vitrine_core::{
    HeadlessPage, KeyValueStore, MemoryStore, NodeId, Page, Result, SettingsStore, VitrineError,
};
use vitrine_theme::{ColorScheme, ThemeConfig, ThemeController};

struct Fixture {
    page: HeadlessPage,
    label: NodeId,
    icon: NodeId,
}

fn page_with_toggle() -> Fixture {
    let page = HeadlessPage::new();
    let button = page.element(page.body_node(), "button");
    page.set_attribute(&button, "id", "toggle-theme");
    let icon = page.element(button, "i");
    page.add_class(&icon, "fa-solid");
    let label = page.element(button, "span");
    page.add_class(&label, "btn-label");
    Fixture { page, label, icon }
}

#[test]
fn toggle_from_default_goes_dark() {
    let Fixture { page, label, icon } = page_with_toggle();
    let settings = SettingsStore::new(MemoryStore::new());
    let mut theme = ThemeController::from_settings(&settings, ThemeConfig::default());

    theme.apply_initial(&page);
    assert_eq!(page.text(&label), "Tryb nocny");
    assert!(page.has_class(&icon, "fa-moon"));
    assert_eq!(settings.backend().raw("theme"), None);

    assert_eq!(theme.toggle(&page, &settings), ColorScheme::Dark);

    let body = page.body().unwrap();
    assert!(page.has_class(&body, "dark-mode"));
    assert_eq!(settings.backend().raw("theme").as_deref(), Some("true"));
    assert_eq!(page.text(&label), "Tryb dzienny");
    assert!(page.has_class(&icon, "fa-sun"));
    assert!(!page.has_class(&icon, "fa-moon"));
    assert!(page.has_class(&icon, "fa-solid"));
}

#[test]
fn persisted_dark_is_applied_on_start() {
    let Fixture { page, label, icon } = page_with_toggle();
    let settings = SettingsStore::new(MemoryStore::with_entries([("theme", "true")]));
    let theme = ThemeController::from_settings(&settings, ThemeConfig::default());

    theme.apply_initial(&page);

    assert!(page.has_class(&page.body().unwrap(), "dark-mode"));
    assert_eq!(page.text(&label), "Tryb dzienny");
    assert_eq!(page.class_name(icon), "fa-solid fa-sun");
}

#[test]
fn persisted_value_tracks_toggle_parity() {
    for initial in [false, true] {
        for n in 0..6usize {
            let page = HeadlessPage::new();
            let store = MemoryStore::with_entries([("theme", initial.to_string())]);
            let settings = SettingsStore::new(store);
            let mut theme = ThemeController::from_settings(&settings, ThemeConfig::default());
            theme.apply_initial(&page);

            for _ in 0..n {
                theme.toggle(&page, &settings);
            }

            let expected = initial ^ (n % 2 == 1);
            if n > 0 {
                assert_eq!(settings.get("theme", !expected), expected, "initial={initial} n={n}");
            }
            assert_eq!(theme.is_dark(), expected);
            assert_eq!(page.has_class(&page.body().unwrap(), "dark-mode"), expected);
        }
    }
}

#[test]
fn corrupt_setting_falls_back_to_light() {
    let settings = SettingsStore::new(MemoryStore::with_entries([("theme", "\"sometimes\"")]));
    let theme = ThemeController::from_settings(&settings, ThemeConfig::default());
    assert_eq!(theme.scheme(), ColorScheme::Light);
}

#[test]
fn missing_toggle_is_a_no_op() {
    let page = HeadlessPage::new();
    let settings = SettingsStore::new(MemoryStore::new());
    let mut theme = ThemeController::from_settings(&settings, ThemeConfig::default());

    theme.apply_initial(&page);
    theme.toggle(&page, &settings);

    assert!(page.has_class(&page.body().unwrap(), "dark-mode"));
    assert!(settings.get("theme", false));
}

#[test]
fn toggle_without_icon_still_updates_label() {
    let page = HeadlessPage::new();
    let button = page.element(page.body_node(), "button");
    page.set_attribute(&button, "id", "toggle-theme");
    let label = page.element(button, "span");
    page.add_class(&label, "btn-label");

    let settings = SettingsStore::new(MemoryStore::new());
    let mut theme = ThemeController::from_settings(&settings, ThemeConfig::default());
    theme.toggle(&page, &settings);

    assert_eq!(page.text(&label), "Tryb dzienny");
}

#[test]
fn config_deserializes_with_defaults() {
    let config: ThemeConfig =
        serde_json::from_str(r#"{ "to_dark_label": "Dark mode", "to_light_label": "Light mode" }"#)
            .unwrap();
    assert_eq!(config.to_dark_label, "Dark mode");
    assert_eq!(config.toggle_id, "toggle-theme");
    assert_eq!(config.dark_class, "dark-mode");
}

/// Storage that reads nothing and rejects every write
#[derive(Default)]
struct RejectingStore {
    attempts: Cell<usize>,
}

impl KeyValueStore for RejectingStore {
    fn get_item(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    fn set_item(&self, key: &str, _value: &str) -> Result<()> {
        self.attempts.set(self.attempts.get() + 1);
        Err(VitrineError::StorageWrite {
            key: key.to_string(),
            reason: "quota exceeded".to_string(),
        })
    }
}

#[test]
fn rejected_writes_leave_the_session_state_in_charge() {
    let Fixture { page, label, icon } = page_with_toggle();
    let settings = SettingsStore::new(RejectingStore::default());
    let mut theme = ThemeController::from_settings(&settings, ThemeConfig::default());
    theme.apply_initial(&page);
    let body = page.body().unwrap();

    for n in 1..=5usize {
        let dark = n % 2 == 1;
        let expected = ColorScheme::from_dark_flag(dark);

        assert_eq!(theme.toggle(&page, &settings), expected);
        assert_eq!(theme.is_dark(), dark);
        assert_eq!(page.has_class(&body, "dark-mode"), dark);
        assert_eq!(page.text(&label), if dark { "Tryb dzienny" } else { "Tryb nocny" });
        assert_eq!(page.has_class(&icon, "fa-sun"), dark);
    }

    assert_eq!(settings.backend().attempts.get(), 5);
    assert!(!settings.get("theme", false));
}
