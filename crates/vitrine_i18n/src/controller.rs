//! Language controller
//!
//! Owns the active language. The language cell is shared with deferred
//! flag checks so each check reads the language current when it fires.

use std::cell::Cell;
use std::rc::Rc;

use tracing::debug;
use vitrine_core::{KeyValueStore, Page, SettingsStore};

use crate::config::{LanguageConfig, LanguageProfile};
use crate::flag::{request_cdn_flag, settle_flag};
use crate::lang::Lang;

pub struct LanguageController {
    current: Rc<Cell<Lang>>,
    config: Rc<LanguageConfig>,
}

impl LanguageController {
    pub fn new(lang: Lang, config: LanguageConfig) -> Self {
        Self {
            current: Rc::new(Cell::new(lang)),
            config: Rc::new(config),
        }
    }

    /// Seed the language from the persisted tag.
    ///
    /// Missing, corrupt or unknown tags mean primary.
    pub fn from_settings<S: KeyValueStore>(
        settings: &SettingsStore<S>,
        config: LanguageConfig,
    ) -> Self {
        let tag: String = settings.get(&config.storage_key, config.primary.tag.clone());
        let lang = config.lang_for_tag(&tag).unwrap_or_else(|| {
            debug!(tag = %tag, "unknown stored language, using primary");
            Lang::Primary
        });
        Self::new(lang, config)
    }

    pub fn current(&self) -> Lang {
        self.current.get()
    }

    pub fn profile(&self) -> &LanguageProfile {
        self.config.profile(self.current())
    }

    /// The language a click switches to.
    pub fn target(&self) -> &LanguageProfile {
        self.config.profile(self.current().other())
    }

    pub fn config(&self) -> &LanguageConfig {
        &self.config
    }

    /// Render the page in `lang` and make it the active language.
    ///
    /// Applying the same language twice renders the same result.
    pub fn apply_language<P: Page>(&self, page: &P, lang: Lang) {
        self.current.set(lang);
        let profile = self.config.profile(lang);
        debug!(lang = %profile.tag, "applying language");

        if let Some(root) = page.document_element() {
            page.set_attribute(&root, "lang", &profile.tag);
        }

        self.render_text(page, lang);

        let Some(toggle) = page.element_by_id(&self.config.toggle_id) else {
            return;
        };
        if let Some(label) = page.query_in(&toggle, &self.config.label_selector) {
            page.set_text(&label, &self.config.profile(lang.other()).name);
        }

        if let Some(icon) = page.query_in(&toggle, &self.config.icon_selector) {
            let pictured = self.config.profile(self.config.flag_subject.pictured(lang));
            request_cdn_flag(page, &icon, &self.config, pictured);

            let deferred = page.clone();
            let current = self.current.clone();
            let config = self.config.clone();
            page.request_frame(Box::new(move || {
                let pictured = config.profile(config.flag_subject.pictured(current.get()));
                let resolution = settle_flag(&deferred, &icon, &config, pictured);
                debug!(flag = %pictured.tag, ?resolution, "language flag settled");
            }));
        }
    }

    /// Switch to the other language, persist it, and re-render.
    pub fn toggle<P: Page, S: KeyValueStore>(
        &mut self,
        page: &P,
        settings: &SettingsStore<S>,
    ) -> Lang {
        let next = self.current().other();
        settings.set(&self.config.storage_key, &self.config.profile(next).tag);
        self.apply_language(page, next);
        next
    }

    /// Set the text of every translatable element. Returns how many.
    fn render_text<P: Page>(&self, page: &P, lang: Lang) -> usize {
        let primary_attr = self.config.primary.text_attribute();
        let lang_attr = self.config.profile(lang).text_attribute();

        let nodes = page.query_all(&format!("[{primary_attr}]"));
        for node in &nodes {
            let primary = page.attribute(node, &primary_attr).unwrap_or_default();
            let text = match lang {
                Lang::Primary => primary,
                Lang::Secondary => page.attribute(node, &lang_attr).unwrap_or(primary),
            };
            page.set_text(node, &text);
        }
        nodes.len()
    }
}
