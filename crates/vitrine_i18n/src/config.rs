use serde::{Deserialize, Serialize};

use crate::lang::Lang;
use crate::locale::primary_subtag;

/// How one language is named and pictured.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageProfile {
    /// Tag stored in settings and set on `<html lang>`; also names the
    /// `data-<tag>` text attribute
    pub tag: String,
    /// Name shown on the toggle when this is the target language
    pub name: String,
    /// Icon-font class drawing this language's flag
    pub flag_class: String,
    /// Plain-text flag used when the icon font did not render
    pub emoji: String,
}

impl LanguageProfile {
    /// Attribute carrying this language's text, e.g. `data-pl`.
    pub fn text_attribute(&self) -> String {
        format!("data-{}", self.tag)
    }
}

/// Which language the toggle's flag pictures
///
/// `Target` matches the label, so after switching to English the toggle
/// reads "Polski" and shows the Polish flag. Pages that expect the flag of
/// the language being shown (the UK flag after switching to English) set
/// `flag_subject = "active"`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagSubject {
    /// The language a click switches to, like the label
    #[default]
    Target,
    /// The language currently shown
    Active,
}

impl FlagSubject {
    /// The language to picture while `active` is shown.
    pub fn pictured(self, active: Lang) -> Lang {
        match self {
            Self::Target => active.other(),
            Self::Active => active,
        }
    }
}

/// The two languages and the toggle that switches between them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageConfig {
    /// Settings key holding the active tag
    pub storage_key: String,
    pub toggle_id: String,
    pub label_selector: String,
    pub icon_selector: String,
    /// Class every state of the icon keeps
    pub icon_class: String,
    /// Class enabling the CDN icon font
    pub cdn_class: String,
    pub flag_subject: FlagSubject,
    pub primary: LanguageProfile,
    pub secondary: LanguageProfile,
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            storage_key: "lang".to_string(),
            toggle_id: "toggle-lang".to_string(),
            label_selector: ".btn-label".to_string(),
            icon_selector: ".lang-icon".to_string(),
            icon_class: "lang-icon".to_string(),
            cdn_class: "twa".to_string(),
            flag_subject: FlagSubject::Target,
            primary: LanguageProfile {
                tag: "pl".to_string(),
                name: "Polski".to_string(),
                flag_class: "twa-flag-poland".to_string(),
                emoji: "\u{1F1F5}\u{1F1F1}".to_string(),
            },
            secondary: LanguageProfile {
                tag: "en".to_string(),
                name: "English".to_string(),
                flag_class: "twa-flag-united-kingdom".to_string(),
                emoji: "\u{1F1EC}\u{1F1E7}".to_string(),
            },
        }
    }
}

impl LanguageConfig {
    pub fn profile(&self, lang: Lang) -> &LanguageProfile {
        match lang {
            Lang::Primary => &self.primary,
            Lang::Secondary => &self.secondary,
        }
    }

    /// Which configured language a stored or reported tag names.
    ///
    /// Matching ignores case and region: `EN-gb` names `en`.
    pub fn lang_for_tag(&self, tag: &str) -> Option<Lang> {
        let wanted = primary_subtag(tag);
        if wanted.is_empty() {
            return None;
        }
        [Lang::Primary, Lang::Secondary]
            .into_iter()
            .find(|lang| primary_subtag(&self.profile(*lang).tag) == wanted)
    }
}
