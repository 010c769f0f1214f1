//! Vitrine Core
//!
//! Foundations shared by the page-behavior crates:
//!
//! - **Settings**: failure-absorbing JSON settings over a key-value medium
//! - **Page**: the DOM as an external collaborator, behind a trait
//! - **Headless host**: an in-memory [`Page`] with manually pumped frames and
//!   intersection events, for tests
//!
//! # Example
//!
//! ```rust
//! use vitrine_core::{MemoryStore, SettingsStore};
//!
//! let settings = SettingsStore::new(MemoryStore::new());
//! assert!(!settings.get("theme", false));
//!
//! settings.set("theme", &true);
//! assert!(settings.get("theme", false));
//! ```

pub mod error;
pub mod headless;
pub mod page;
pub mod settings;

pub use error::{Result, VitrineError};
pub use headless::{HeadlessPage, HeadlessWatcher, NodeId};
pub use page::{
    has_background, FrameTask, IntersectionCallback, IntersectionEntry, Page, ViewportWatcher,
};
pub use settings::{KeyValueStore, MemoryStore, SettingsStore};
