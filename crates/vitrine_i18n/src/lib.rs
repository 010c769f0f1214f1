//! Vitrine internationalization (i18n)
//!
//! Two-language pages authored with `data-<tag>` attributes:
//!
//! ```html
//! <h1 data-pl="Witaj" data-en="Welcome">Witaj</h1>
//! ```
//!
//! - Text swap with fallback to the primary language when a translation is
//!   missing (nothing is ever blanked)
//! - A toggle whose label names the language it switches *to*; the flag
//!   pictures the same language unless [`FlagSubject::Active`] is configured
//! - Flag drawn by a CDN icon font, with an emoji fallback checked one
//!   frame later

mod config;
mod controller;
mod flag;
mod lang;
mod locale;

pub use config::{FlagSubject, LanguageConfig, LanguageProfile};
pub use controller::LanguageController;
pub use flag::{cdn_class_name, request_cdn_flag, settle_flag, FlagResolution};
pub use lang::Lang;
pub use locale::{normalize_locale, primary_subtag};
