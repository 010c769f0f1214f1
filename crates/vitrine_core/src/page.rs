//! Page collaborator
//!
//! The DOM is an external collaborator. Controllers talk to it only through
//! [`Page`], so the same logic runs in the browser (`vitrine_web`) and in
//! tests ([`crate::HeadlessPage`]).
//!
//! Every lookup returns an `Option`; callers decide what absence means,
//! which is almost always "do nothing".

use std::fmt;

/// One viewport-intersection observation delivered by a watcher.
#[derive(Clone, Debug, PartialEq)]
pub struct IntersectionEntry<N> {
    pub target: N,
    pub is_intersecting: bool,
    /// Visible fraction of the target, `0.0..=1.0`
    pub ratio: f64,
}

/// Handle to an installed viewport watcher.
pub trait ViewportWatcher<N> {
    /// Start tracking `node`.
    fn observe(&self, node: &N);

    /// Stop tracking `node`. Unknown nodes are ignored.
    fn unobserve(&self, node: &N);

    /// Stop tracking everything.
    fn disconnect(&self);
}

/// Callback invoked with each batch of intersection entries.
///
/// The second argument is the delivering watcher, so the callback can
/// unobserve targets it is done with.
pub type IntersectionCallback<N> = Box<dyn FnMut(&[IntersectionEntry<N>], &dyn ViewportWatcher<N>)>;

/// A one-shot task to run on the next rendering frame.
pub type FrameTask = Box<dyn FnOnce()>;

/// The subset of document behavior the controllers need.
///
/// Implementations are cheap handles (`Clone`) onto a shared document, so
/// deferred callbacks can carry their own copy.
pub trait Page: Clone + 'static {
    /// Element handle
    type Node: Clone + PartialEq + fmt::Debug + 'static;

    /// Viewport watcher handle returned by [`Page::watch_viewport`]
    type Watcher: ViewportWatcher<Self::Node>;

    // ========== Lookup ==========

    /// The root (`<html>`) element.
    fn document_element(&self) -> Option<Self::Node>;

    /// The `<body>` element.
    fn body(&self) -> Option<Self::Node>;

    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    /// First element in document order matching `selector`.
    fn query(&self, selector: &str) -> Option<Self::Node> {
        self.query_all(selector).into_iter().next()
    }

    /// All elements in document order matching `selector`.
    fn query_all(&self, selector: &str) -> Vec<Self::Node>;

    /// First descendant of `node` matching `selector`.
    fn query_in(&self, node: &Self::Node, selector: &str) -> Option<Self::Node>;

    // ========== Attributes & content ==========

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str);

    fn text(&self, node: &Self::Node) -> String;

    fn set_text(&self, node: &Self::Node, text: &str);

    // ========== Classes ==========

    fn has_class(&self, node: &Self::Node, class: &str) -> bool;

    fn add_class(&self, node: &Self::Node, class: &str);

    fn remove_class(&self, node: &Self::Node, class: &str);

    /// Add `class` when `on`, remove it otherwise.
    fn toggle_class(&self, node: &Self::Node, class: &str, on: bool) {
        if on {
            self.add_class(node, class);
        } else {
            self.remove_class(node, class);
        }
    }

    /// Replace the whole class list with a space-separated string.
    fn set_class_name(&self, node: &Self::Node, class_name: &str);

    // ========== Rendering ==========

    /// Computed `background-image` of `node`, if the host can tell.
    fn background_image(&self, node: &Self::Node) -> Option<String>;

    /// Whether the user asked for reduced motion.
    fn prefers_reduced_motion(&self) -> bool;

    /// Run `task` once on the next rendering frame. Not cancellable.
    fn request_frame(&self, task: FrameTask);

    /// Install a viewport watcher firing at `threshold` visible area.
    ///
    /// Returns `None` when the host has no intersection support.
    fn watch_viewport(
        &self,
        threshold: f64,
        on_entries: IntersectionCallback<Self::Node>,
    ) -> Option<Self::Watcher>;

    // ========== Scrolling ==========

    /// Distance from the viewport top to the top edge of `node`.
    fn viewport_top(&self, node: &Self::Node) -> f64;

    /// Rendered height of `node`.
    fn rendered_height(&self, node: &Self::Node) -> f64;

    /// Current vertical scroll position of the page.
    fn scroll_y(&self) -> f64;

    /// Smoothly scroll the page to vertical position `top`.
    fn smooth_scroll_to(&self, top: f64);

    // ========== Forms & notifications ==========

    /// Name/value pairs of the form's fields, in document order.
    fn form_fields(&self, form: &Self::Node) -> Vec<(String, String)>;

    /// Restore the form's fields to their initial values.
    fn reset_form(&self, form: &Self::Node);

    /// Show a blocking, human-readable notification.
    fn notify(&self, message: &str);
}

/// Whether a computed `background-image` value means "something rendered".
pub fn has_background(value: Option<&str>) -> bool {
    match value.map(str::trim) {
        None | Some("") | Some("none") => false,
        Some(_) => true,
    }
}
