//! Vitrine Browser Host
//!
//! Runs [`vitrine_app::PageApp`] against the live document:
//!
//! - [`WebPage`] implements [`vitrine_core::Page`] over `web-sys`
//! - [`WebStorage`] persists settings in `localStorage`
//! - [`FetchTransport`] submits the contact form with `fetch`
//! - [`logging`] routes `tracing` events to the browser console
//!
//! Configuration is read from an inline TOML block, if present:
//!
//! ```html
//! <script type="application/toml" id="vitrine-config">
//! log_level = "debug"
//! </script>
//! ```

pub mod logging;
mod page;
mod storage;
mod transport;

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, info, warn};
use vitrine_app::{PageApp, PageConfig};
use vitrine_core::Page;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, EventTarget};

pub use page::{WebPage, WebWatcher};
pub use storage::WebStorage;
pub use transport::{resolve_action, sends_body, FetchTransport};

/// Id of the inline configuration block
pub const CONFIG_ELEMENT_ID: &str = "vitrine-config";

/// Selector matching in-page anchor links
const ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";

type SharedApp = Rc<RefCell<PageApp<WebPage, WebStorage>>>;

/// Readable text for a JavaScript exception.
pub(crate) fn js_error(err: JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

/// Module entry point, run when the wasm module is instantiated.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let page = WebPage::from_window().ok_or_else(|| JsValue::from_str("no document"))?;

    let (config, config_error) = read_config(&page);
    logging::init_logging(&config.log_level);
    if let Some(err) = config_error {
        warn!(error = %err, "invalid page configuration, using defaults");
    }

    let app: SharedApp = Rc::new(RefCell::new(PageApp::new(
        page.clone(),
        WebStorage::from_window(),
        config,
    )));

    if page.document().ready_state() == "loading" {
        let ready = Closure::once_into_js(move || on_ready(&app));
        page.document()
            .add_event_listener_with_callback("DOMContentLoaded", ready.unchecked_ref())?;
    } else {
        on_ready(&app);
    }
    Ok(())
}

/// Parse the inline configuration; absence means defaults.
fn read_config(page: &WebPage) -> (PageConfig, Option<vitrine_core::VitrineError>) {
    let Some(block) = page.element_by_id(CONFIG_ELEMENT_ID) else {
        return (PageConfig::default(), None);
    };
    match PageConfig::from_toml_str(&page.text(&block)) {
        Ok(config) => (config, None),
        Err(err) => (PageConfig::default(), Some(err)),
    }
}

fn on_ready(app: &SharedApp) {
    let report = app.borrow_mut().start();
    debug!(?report, "page ready");

    if let Err(err) = install_handlers(app) {
        warn!(error = %js_error(err), "could not install event handlers");
    }
}

fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    // Handlers live as long as the page.
    closure.forget();
    Ok(())
}

fn install_handlers(app: &SharedApp) -> Result<(), JsValue> {
    let (page, theme_id, lang_id, form) = {
        let app = app.borrow();
        (
            app.page().clone(),
            app.theme().config().toggle_id.clone(),
            app.language().config().toggle_id.clone(),
            app.contact().find_form(app.page()),
        )
    };

    if let Some(button) = page.element_by_id(&theme_id) {
        let app = app.clone();
        listen(&button, "click", move |_| {
            let scheme = app.borrow_mut().on_theme_click();
            debug!(?scheme, "theme toggled");
        })?;
    }

    if let Some(button) = page.element_by_id(&lang_id) {
        let app = app.clone();
        listen(&button, "click", move |_| {
            let lang = app.borrow_mut().on_language_click();
            debug!(?lang, "language toggled");
        })?;
    }

    {
        let app = app.clone();
        listen(page.document(), "click", move |event| {
            let Some(link) = anchor_link(&event) else {
                return;
            };
            let href = link.get_attribute("href").unwrap_or_default();
            if app.borrow().on_anchor_click(&href) {
                event.prevent_default();
            }
        })?;
    }

    if let Some(form) = form {
        let app = app.clone();
        let target = form.clone();
        listen(&target, "submit", move |event| {
            event.prevent_default();
            submit_contact(&app, form.clone());
        })?;
    }

    info!("event handlers installed");
    Ok(())
}

/// The in-page link a click landed on, if any.
fn anchor_link(event: &Event) -> Option<Element> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    target.closest(ANCHOR_SELECTOR).ok().flatten()
}

/// Submit in the background without holding the app across the request.
fn submit_contact(app: &SharedApp, form: Element) {
    let (page, contact, lang) = {
        let app = app.borrow();
        (
            app.page().clone(),
            app.contact().clone(),
            app.language().current(),
        )
    };

    wasm_bindgen_futures::spawn_local(async move {
        let outcome = contact
            .submit(&page, &FetchTransport::new(), &form, lang)
            .await;
        debug!(?outcome, "contact form submitted");
    });
}
