//! Vitrine Theme
//!
//! Persisted light/dark toggling for a static page.
//!
//! The toggle describes the action it offers: while the page is dark it reads
//! "switch to light" and shows a sun, while light it reads "switch to dark"
//! and shows a moon.
//!
//! ```rust
//! use vitrine_core::{HeadlessPage, MemoryStore, Page, SettingsStore};
//! use vitrine_theme::{ThemeConfig, ThemeController};
//!
//! let page = HeadlessPage::new();
//! let settings = SettingsStore::new(MemoryStore::new());
//! let mut theme = ThemeController::from_settings(&settings, ThemeConfig::default());
//!
//! theme.apply_initial(&page);
//! theme.toggle(&page, &settings);
//!
//! let body = page.body().unwrap();
//! assert!(page.has_class(&body, "dark-mode"));
//! assert!(settings.get("theme", false));
//! ```

pub mod config;
pub mod controller;
pub mod scheme;

pub use config::ThemeConfig;
pub use controller::ThemeController;
pub use scheme::ColorScheme;
