//! In-page anchor navigation
//!
//! Scrolls smoothly to `#fragment` targets, stopping short of the fixed
//! header so the target is not hidden under it.

use serde::{Deserialize, Serialize};
use tracing::debug;
use vitrine_core::Page;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnchorConfig {
    /// Selector of the fixed header
    pub header_selector: String,
    /// Extra gap left between the header and the target, in pixels
    pub margin: f64,
}

impl Default for AnchorConfig {
    fn default() -> Self {
        Self {
            header_selector: "header".to_string(),
            margin: 8.0,
        }
    }
}

/// Element id named by an in-page href: `#about` -> `about`.
///
/// A bare `#` and hrefs to other documents yield `None`.
pub fn fragment_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Page scroll position that puts a target just below the header.
pub fn scroll_offset(
    target_viewport_top: f64,
    scroll_y: f64,
    header_height: f64,
    margin: f64,
) -> f64 {
    (target_viewport_top + scroll_y - header_height - margin).max(0.0)
}

#[derive(Clone, Debug)]
pub struct AnchorNavigator {
    config: AnchorConfig,
}

impl AnchorNavigator {
    pub fn new(config: AnchorConfig) -> Self {
        Self { config }
    }

    /// Scroll to the target of `href`.
    ///
    /// Returns the scroll position, or `None` when the click should be left
    /// to the browser (not an in-page link, missing target or header).
    pub fn navigate<P: Page>(&self, page: &P, href: &str) -> Option<f64> {
        let id = fragment_id(href)?;
        let target = page.element_by_id(id)?;
        let Some(header) = page.query(&self.config.header_selector) else {
            debug!(
                selector = %self.config.header_selector,
                "no header, leaving anchor to the browser"
            );
            return None;
        };

        let top = scroll_offset(
            page.viewport_top(&target),
            page.scroll_y(),
            page.rendered_height(&header),
            self.config.margin,
        );
        page.smooth_scroll_to(top);
        debug!(id, top, "scrolled to anchor");
        Some(top)
    }
}
