//! Reveal controller
//!
//! Marks each reveal element visible the first time enough of it enters the
//! viewport, then stops watching that element. With reduced motion, every
//! element is marked visible at setup and nothing is watched.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, warn};
use vitrine_core::{IntersectionCallback, IntersectionEntry, Page, ViewportWatcher};

use crate::config::RevealConfig;
use crate::state::{RevealSet, RevealState};

/// What [`RevealController::setup`] did
///
/// Counts cover pending elements only; elements revealed by an earlier
/// setup are left alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    /// The page has no reveal elements
    NoElements,
    /// Reduced motion: this many elements shown at once
    Immediate(usize),
    /// Watching this many elements
    Watching(usize),
    /// The host cannot watch the viewport; this many elements stay pending
    Unsupported(usize),
}

pub struct RevealController<P: Page> {
    config: RevealConfig,
    elements: Rc<RefCell<RevealSet<P::Node>>>,
    watcher: Option<P::Watcher>,
}

impl<P: Page> RevealController<P> {
    pub fn new(config: RevealConfig) -> Self {
        Self {
            config,
            elements: Rc::new(RefCell::new(RevealSet::default())),
            watcher: None,
        }
    }

    pub fn config(&self) -> &RevealConfig {
        &self.config
    }

    /// Collect reveal elements and start revealing them.
    ///
    /// Reduced motion is read here, once. Running setup again rescans the
    /// page: elements already visible stay visible and are not watched.
    pub fn setup(&mut self, page: &P) -> RevealOutcome {
        if let Some(old) = self.watcher.take() {
            old.disconnect();
        }

        let nodes = page.query_all(&self.config.selector);
        if nodes.is_empty() {
            *self.elements.borrow_mut() = RevealSet::default();
            debug!(selector = %self.config.selector, "no reveal elements");
            return RevealOutcome::NoElements;
        }

        let refreshed = self.elements.borrow().refreshed(nodes);
        let pending: Vec<P::Node> = refreshed.nodes_in(RevealState::Pending).cloned().collect();
        *self.elements.borrow_mut() = refreshed;
        let count = pending.len();

        if page.prefers_reduced_motion() {
            let mut elements = self.elements.borrow_mut();
            for node in &pending {
                if elements.mark_visible(node) {
                    page.add_class(node, &self.config.visible_class);
                }
            }
            debug!(count, "reduced motion, revealed everything");
            return RevealOutcome::Immediate(count);
        }

        let Some(watcher) = page.watch_viewport(self.config.threshold, self.on_entries(page))
        else {
            warn!(count, "viewport watching unsupported, reveal elements stay pending");
            return RevealOutcome::Unsupported(count);
        };
        for node in &pending {
            watcher.observe(node);
        }
        self.watcher = Some(watcher);

        debug!(count, threshold = self.config.threshold, "watching reveal elements");
        RevealOutcome::Watching(count)
    }

    fn on_entries(&self, page: &P) -> IntersectionCallback<P::Node> {
        let page = page.clone();
        let elements = self.elements.clone();
        let visible_class = self.config.visible_class.clone();

        Box::new(
            move |entries: &[IntersectionEntry<P::Node>], watcher: &dyn ViewportWatcher<P::Node>| {
                for entry in entries.iter().filter(|e| e.is_intersecting) {
                    if elements.borrow_mut().mark_visible(&entry.target) {
                        page.add_class(&entry.target, &visible_class);
                    }
                    watcher.unobserve(&entry.target);
                }
            },
        )
    }

    pub fn state_of(&self, node: &P::Node) -> Option<RevealState> {
        self.elements.borrow().state_of(node)
    }

    pub fn pending_count(&self) -> usize {
        self.elements.borrow().pending_count()
    }

    pub fn visible_count(&self) -> usize {
        self.elements.borrow().visible_count()
    }

    pub fn is_watching(&self) -> bool {
        self.watcher.is_some()
    }
}
