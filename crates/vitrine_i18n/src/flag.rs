//! Flag icon on the language toggle
//!
//! The icon first asks the CDN icon font for the flag. One frame later, if
//! the font did not paint a background, the icon is swapped for an emoji.

use vitrine_core::{has_background, Page};

use crate::config::{LanguageConfig, LanguageProfile};

/// How the flag ended up being drawn
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlagResolution {
    /// The icon font rendered it
    Cdn,
    /// Replaced by the emoji flag
    Emoji,
}

/// Full class name asking the icon font for `target`'s flag.
pub fn cdn_class_name(config: &LanguageConfig, target: &LanguageProfile) -> String {
    format!("{} {} {}", config.cdn_class, config.icon_class, target.flag_class)
}

/// First phase: clear any emoji and request the icon-font flag.
pub fn request_cdn_flag<P: Page>(
    page: &P,
    icon: &P::Node,
    config: &LanguageConfig,
    target: &LanguageProfile,
) {
    page.set_text(icon, "");
    page.set_class_name(icon, &cdn_class_name(config, target));
}

/// Second phase: keep the icon-font flag if it painted, else show the emoji.
pub fn settle_flag<P: Page>(
    page: &P,
    icon: &P::Node,
    config: &LanguageConfig,
    target: &LanguageProfile,
) -> FlagResolution {
    if has_background(page.background_image(icon).as_deref()) {
        return FlagResolution::Cdn;
    }
    page.set_class_name(icon, &config.icon_class);
    page.set_text(icon, &target.emoji);
    FlagResolution::Emoji
}
