//! Theme controller
//!
//! Owns the in-memory dark-mode mirror. Every toggle writes through to the
//! settings store; the store is never re-read after construction.

use tracing::debug;
use vitrine_core::{KeyValueStore, Page, SettingsStore};

use crate::config::ThemeConfig;
use crate::scheme::ColorScheme;

pub struct ThemeController {
    scheme: ColorScheme,
    config: ThemeConfig,
}

impl ThemeController {
    pub fn new(scheme: ColorScheme, config: ThemeConfig) -> Self {
        Self { scheme, config }
    }

    /// Seed the scheme from the persisted flag (default light).
    pub fn from_settings<S: KeyValueStore>(
        settings: &SettingsStore<S>,
        config: ThemeConfig,
    ) -> Self {
        let is_dark = settings.get(&config.storage_key, false);
        Self::new(ColorScheme::from_dark_flag(is_dark), config)
    }

    pub fn scheme(&self) -> ColorScheme {
        self.scheme
    }

    pub fn is_dark(&self) -> bool {
        self.scheme.is_dark()
    }

    pub fn config(&self) -> &ThemeConfig {
        &self.config
    }

    /// Label text for the current scheme: names the mode a click switches to.
    pub fn label(&self) -> &str {
        if self.is_dark() {
            &self.config.to_light_label
        } else {
            &self.config.to_dark_label
        }
    }

    /// Icon class for the current scheme: sun while dark, moon while light.
    pub fn icon_class(&self) -> &str {
        if self.is_dark() {
            &self.config.sun_icon
        } else {
            &self.config.moon_icon
        }
    }

    /// Page-ready pass: mark the body dark if needed, then refresh the label.
    pub fn apply_initial<P: Page>(&self, page: &P) {
        if self.is_dark() {
            if let Some(body) = page.body() {
                page.add_class(&body, &self.config.dark_class);
            }
        }
        self.refresh_label(page);
    }

    /// Flip the scheme, reflect it on the page, and persist it.
    pub fn toggle<P: Page, S: KeyValueStore>(
        &mut self,
        page: &P,
        settings: &SettingsStore<S>,
    ) -> ColorScheme {
        self.scheme = self.scheme.toggled();
        debug!(scheme = ?self.scheme, "theme toggled");

        if let Some(body) = page.body() {
            page.toggle_class(&body, &self.config.dark_class, self.is_dark());
        }
        settings.set(&self.config.storage_key, &self.is_dark());
        self.refresh_label(page);

        self.scheme
    }

    /// Sync the toggle's label and icon with the scheme.
    ///
    /// A missing toggle, label or icon skips that part.
    pub fn refresh_label<P: Page>(&self, page: &P) {
        let Some(toggle) = page.element_by_id(&self.config.toggle_id) else {
            return;
        };

        if let Some(label) = page.query_in(&toggle, &self.config.label_selector) {
            page.set_text(&label, self.label());
        }

        if let Some(icon) = page.query_in(&toggle, &self.config.icon_selector) {
            page.remove_class(&icon, &self.config.sun_icon);
            page.remove_class(&icon, &self.config.moon_icon);
            page.add_class(&icon, self.icon_class());
        }
    }
}
