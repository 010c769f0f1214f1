//! Page configuration
//!
//! Every section has defaults matching the site's markup, so an empty
//! document is a valid configuration:
//!
//! ```toml
//! log_level = "debug"
//!
//! [theme]
//! to_dark_label = "Dark mode"
//! to_light_label = "Light mode"
//!
//! [reveal]
//! threshold = 0.2
//! ```

use serde::{Deserialize, Serialize};
use vitrine_core::{Result, VitrineError};
use vitrine_i18n::LanguageConfig;
use vitrine_reveal::RevealConfig;
use vitrine_theme::ThemeConfig;

use crate::anchor::AnchorConfig;
use crate::contact::ContactConfig;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Minimum level of log events (`error`, `warn`, `info`, `debug`, `trace`)
    pub log_level: String,
    pub theme: ThemeConfig,
    pub language: LanguageConfig,
    pub reveal: RevealConfig,
    pub anchors: AnchorConfig,
    pub contact: ContactConfig,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            theme: ThemeConfig::default(),
            language: LanguageConfig::default(),
            reveal: RevealConfig::default(),
            anchors: AnchorConfig::default(),
            contact: ContactConfig::default(),
        }
    }
}

impl PageConfig {
    /// Parse a TOML document, filling anything it omits with defaults.
    pub fn from_toml_str(src: &str) -> Result<Self> {
        toml::from_str(src).map_err(|e| VitrineError::Config(e.to_string()))
    }
}
