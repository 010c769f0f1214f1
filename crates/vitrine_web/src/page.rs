//! `web-sys` implementation of [`Page`]
//!
//! DOM failures surface as `JsValue` exceptions; they are logged and
//! treated like an absent element, matching the "do nothing" rule the
//! controllers follow.

use js_sys::{Array, Function};
use tracing::{debug, warn};
use vitrine_core::{FrameTask, IntersectionCallback, IntersectionEntry, Page, ViewportWatcher};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, FormData, HtmlElement, HtmlFormElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, ScrollBehavior, ScrollToOptions, Window,
};

use crate::js_error;

const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

type ObserverClosure = Closure<dyn FnMut(Array, IntersectionObserver)>;

/// Handle onto the live browser document
#[derive(Clone, Debug)]
pub struct WebPage {
    window: Window,
    document: Document,
}

impl WebPage {
    /// Bind to the global window. `None` outside a browser main thread.
    pub fn from_window() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self { window, document })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

/// Installed `IntersectionObserver` plus the closure it calls
///
/// Dropping the watcher disconnects the observer before releasing the
/// closure, so the browser never calls into freed memory.
pub struct WebWatcher {
    observer: IntersectionObserver,
    _callback: ObserverClosure,
}

impl ViewportWatcher<Element> for WebWatcher {
    fn observe(&self, node: &Element) {
        self.observer.observe(node);
    }

    fn unobserve(&self, node: &Element) {
        self.observer.unobserve(node);
    }

    fn disconnect(&self) {
        self.observer.disconnect();
    }
}

impl Drop for WebWatcher {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Borrowed observer handed to the intersection callback
struct ObserverRef(IntersectionObserver);

impl ViewportWatcher<Element> for ObserverRef {
    fn observe(&self, node: &Element) {
        self.0.observe(node);
    }

    fn unobserve(&self, node: &Element) {
        self.0.unobserve(node);
    }

    fn disconnect(&self) {
        self.0.disconnect();
    }
}

fn to_entries(entries: &Array) -> Vec<IntersectionEntry<Element>> {
    entries
        .iter()
        .filter_map(|value| value.dyn_into::<IntersectionObserverEntry>().ok())
        .map(|entry| IntersectionEntry {
            target: entry.target(),
            is_intersecting: entry.is_intersecting(),
            ratio: entry.intersection_ratio(),
        })
        .collect()
}

impl Page for WebPage {
    type Node = Element;
    type Watcher = WebWatcher;

    fn document_element(&self) -> Option<Element> {
        self.document.document_element()
    }

    fn body(&self) -> Option<Element> {
        self.document.body().map(Element::from)
    }

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn query(&self, selector: &str) -> Option<Element> {
        self.document
            .query_selector(selector)
            .unwrap_or_else(|err| {
                warn!(selector, error = %js_error(err), "invalid selector");
                None
            })
    }

    fn query_all(&self, selector: &str) -> Vec<Element> {
        let list = match self.document.query_selector_all(selector) {
            Ok(list) => list,
            Err(err) => {
                warn!(selector, error = %js_error(err), "invalid selector");
                return Vec::new();
            }
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn query_in(&self, node: &Element, selector: &str) -> Option<Element> {
        node.query_selector(selector).unwrap_or_else(|err| {
            warn!(selector, error = %js_error(err), "invalid selector");
            None
        })
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&self, node: &Element, name: &str, value: &str) {
        if let Err(err) = node.set_attribute(name, value) {
            warn!(name, error = %js_error(err), "set_attribute failed");
        }
    }

    fn text(&self, node: &Element) -> String {
        node.text_content().unwrap_or_default()
    }

    fn set_text(&self, node: &Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn add_class(&self, node: &Element, class: &str) {
        if let Err(err) = node.class_list().add_1(class) {
            warn!(class, error = %js_error(err), "add class failed");
        }
    }

    fn remove_class(&self, node: &Element, class: &str) {
        if let Err(err) = node.class_list().remove_1(class) {
            warn!(class, error = %js_error(err), "remove class failed");
        }
    }

    fn set_class_name(&self, node: &Element, class_name: &str) {
        node.set_class_name(class_name);
    }

    fn background_image(&self, node: &Element) -> Option<String> {
        let style = self.window.get_computed_style(node).ok().flatten()?;
        style.get_property_value("background-image").ok()
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.window
            .match_media(REDUCED_MOTION_QUERY)
            .ok()
            .flatten()
            .is_some_and(|query| query.matches())
    }

    fn request_frame(&self, task: FrameTask) {
        let callback = Closure::once_into_js(move || task());
        if let Err(err) = self
            .window
            .request_animation_frame(callback.unchecked_ref::<Function>())
        {
            warn!(error = %js_error(err), "requestAnimationFrame failed");
        }
    }

    fn watch_viewport(
        &self,
        threshold: f64,
        mut on_entries: IntersectionCallback<Element>,
    ) -> Option<WebWatcher> {
        let callback: ObserverClosure = Closure::new(
            move |entries: Array, observer: IntersectionObserver| {
                let entries = to_entries(&entries);
                on_entries(&entries, &ObserverRef(observer));
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(threshold));

        match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
            Ok(observer) => {
                debug!(threshold, "intersection observer installed");
                Some(WebWatcher {
                    observer,
                    _callback: callback,
                })
            }
            Err(err) => {
                warn!(error = %js_error(err), "IntersectionObserver unavailable");
                None
            }
        }
    }

    fn viewport_top(&self, node: &Element) -> f64 {
        node.get_bounding_client_rect().top()
    }

    fn rendered_height(&self, node: &Element) -> f64 {
        match node.dyn_ref::<HtmlElement>() {
            Some(html) => f64::from(html.offset_height()),
            None => node.get_bounding_client_rect().height(),
        }
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn smooth_scroll_to(&self, top: f64) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn form_fields(&self, form: &Element) -> Vec<(String, String)> {
        let Some(form) = form.dyn_ref::<HtmlFormElement>() else {
            return Vec::new();
        };
        let data = match FormData::new_with_form(form) {
            Ok(data) => data,
            Err(err) => {
                warn!(error = %js_error(err), "could not read form data");
                return Vec::new();
            }
        };
        let Ok(Some(iter)) = js_sys::try_iter(&data) else {
            return Vec::new();
        };

        // File inputs yield non-string values; they are not sent.
        iter.filter_map(|item| item.ok())
            .filter_map(|item| {
                let pair = Array::from(&item);
                Some((pair.get(0).as_string()?, pair.get(1).as_string()?))
            })
            .collect()
    }

    fn reset_form(&self, form: &Element) {
        if let Some(form) = form.dyn_ref::<HtmlFormElement>() {
            form.reset();
        }
    }

    fn notify(&self, message: &str) {
        if let Err(err) = self.window.alert_with_message(message) {
            warn!(error = %js_error(err), "alert failed");
        }
    }
}
