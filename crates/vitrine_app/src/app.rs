//! Page application
//!
//! Owns the page handle, the settings store and one of each controller.
//! Settings are read once, here; after that each handler only writes.

use tracing::info;
use vitrine_core::{KeyValueStore, Page, SettingsStore};
use vitrine_i18n::{Lang, LanguageController};
use vitrine_reveal::{RevealController, RevealOutcome};
use vitrine_theme::{ColorScheme, ThemeController};

use crate::anchor::AnchorNavigator;
use crate::config::PageConfig;
use crate::contact::{ContactForm, FormTransport, SubmitOutcome};

/// State after the page-ready pass
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StartReport {
    pub scheme: ColorScheme,
    pub lang: Lang,
    pub reveal: RevealOutcome,
}

pub struct PageApp<P: Page, S: KeyValueStore> {
    page: P,
    settings: SettingsStore<S>,
    theme: ThemeController,
    language: LanguageController,
    reveal: RevealController<P>,
    anchors: AnchorNavigator,
    contact: ContactForm,
}

impl<P: Page, S: KeyValueStore> PageApp<P, S> {
    /// Build the controllers, seeding theme and language from `store`.
    pub fn new(page: P, store: S, config: PageConfig) -> Self {
        let settings = SettingsStore::new(store);
        let theme = ThemeController::from_settings(&settings, config.theme);
        let language = LanguageController::from_settings(&settings, config.language);

        Self {
            page,
            settings,
            theme,
            language,
            reveal: RevealController::new(config.reveal),
            anchors: AnchorNavigator::new(config.anchors),
            contact: ContactForm::new(config.contact),
        }
    }

    /// Page-ready pass: theme, then language, then reveal.
    pub fn start(&mut self) -> StartReport {
        self.theme.apply_initial(&self.page);
        self.language
            .apply_language(&self.page, self.language.current());
        let reveal = self.reveal.setup(&self.page);

        let report = StartReport {
            scheme: self.theme.scheme(),
            lang: self.language.current(),
            reveal,
        };
        info!(?report, "page behaviors started");
        report
    }

    pub fn on_theme_click(&mut self) -> ColorScheme {
        self.theme.toggle(&self.page, &self.settings)
    }

    pub fn on_language_click(&mut self) -> Lang {
        self.language.toggle(&self.page, &self.settings)
    }

    /// Returns `true` when the click was handled and the browser's default
    /// navigation should be suppressed.
    pub fn on_anchor_click(&self, href: &str) -> bool {
        self.anchors.navigate(&self.page, href).is_some()
    }

    /// Submit `form` in the active language.
    pub async fn submit_contact<T: FormTransport>(
        &self,
        transport: &T,
        form: &P::Node,
    ) -> SubmitOutcome {
        self.contact
            .submit(&self.page, transport, form, self.language.current())
            .await
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn settings(&self) -> &SettingsStore<S> {
        &self.settings
    }

    pub fn theme(&self) -> &ThemeController {
        &self.theme
    }

    pub fn language(&self) -> &LanguageController {
        &self.language
    }

    pub fn reveal(&self) -> &RevealController<P> {
        &self.reveal
    }

    pub fn contact(&self) -> &ContactForm {
        &self.contact
    }
}
