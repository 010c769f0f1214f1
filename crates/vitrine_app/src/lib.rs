//! Vitrine Page Application
//!
//! Wires the page behaviors of a static site together:
//!
//! - theme toggle ([`vitrine_theme`])
//! - language toggle ([`vitrine_i18n`])
//! - reveal animations ([`vitrine_reveal`])
//! - smooth anchor scrolling below a fixed header
//! - contact-form submission with user feedback
//!
//! The application is host-agnostic: give it any [`vitrine_core::Page`] and
//! [`vitrine_core::KeyValueStore`].
//!
//! # Example
//!
//! ```rust
//! use vitrine_app::prelude::*;
//!
//! let page = HeadlessPage::new();
//! let mut app = PageApp::new(page, MemoryStore::new(), PageConfig::default());
//!
//! let report = app.start();
//! assert_eq!(report.lang, Lang::Primary);
//! assert_eq!(app.on_theme_click(), ColorScheme::Dark);
//! ```

mod anchor;
mod app;
mod config;
mod contact;

#[cfg(test)]
mod tests;

pub use anchor::{fragment_id, scroll_offset, AnchorConfig, AnchorNavigator};
pub use app::{PageApp, StartReport};
pub use config::PageConfig;
pub use contact::{
    ContactConfig, ContactForm, FormSubmission, FormTransport, LocalizedText, SubmitOutcome,
};

/// Prelude module - import everything commonly needed
pub mod prelude {
    pub use crate::app::{PageApp, StartReport};
    pub use crate::config::PageConfig;
    pub use crate::contact::{FormSubmission, FormTransport, SubmitOutcome};

    pub use vitrine_core::{
        HeadlessPage, KeyValueStore, MemoryStore, Page, Result, SettingsStore, VitrineError,
    };
    pub use vitrine_i18n::Lang;
    pub use vitrine_reveal::{RevealOutcome, RevealState};
    pub use vitrine_theme::ColorScheme;
}
