//! Vitrine reveal animations
//!
//! Elements marked for reveal start `Pending` and become `Visible` (gaining
//! a CSS class that runs the animation) exactly once. The transition is
//! monotonic: no later event can hide an element again.

pub mod config;
pub mod controller;
pub mod state;

pub use config::RevealConfig;
pub use controller::{RevealController, RevealOutcome};
pub use state::{RevealSet, RevealState};
