//! `fetch`-based [`FormTransport`]

use tracing::debug;
use vitrine_app::{FormSubmission, FormTransport};
use vitrine_core::{Result, VitrineError};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, Request, RequestInit, Response, Url};

use crate::js_error;

/// Whether `method` carries the fields in the request body.
///
/// `GET` and `HEAD` requests put them in the query string instead.
pub fn sends_body(method: &str) -> bool {
    !matches!(method, "GET" | "HEAD")
}

/// The URL to send to: the form's action, or the current document.
pub fn resolve_action<'a>(action: &'a str, document_url: &'a str) -> &'a str {
    match action.trim() {
        "" => document_url,
        action => action,
    }
}

/// Sends forms with `fetch`, asking for a JSON response
#[derive(Clone, Copy, Debug, Default)]
pub struct FetchTransport;

impl FetchTransport {
    pub fn new() -> Self {
        Self
    }

    fn request(&self, submission: &FormSubmission) -> Result<Request> {
        let window = web_sys::window()
            .ok_or_else(|| VitrineError::Network("no window".to_string()))?;
        let here = window.location().href().map_err(network)?;
        let target = resolve_action(&submission.action, &here);
        let url = Url::new_with_base(target, &here).map_err(network)?;

        let init = RequestInit::new();
        init.set_method(&submission.method);

        if sends_body(&submission.method) {
            let body = FormData::new().map_err(network)?;
            for (name, value) in &submission.fields {
                body.append_with_str(name, value).map_err(network)?;
            }
            init.set_body(&body);
        } else {
            let params = url.search_params();
            for (name, value) in &submission.fields {
                params.append(name, value);
            }
        }

        let request = Request::new_with_str_and_init(&url.href(), &init).map_err(network)?;
        request
            .headers()
            .set("Accept", "application/json")
            .map_err(network)?;
        Ok(request)
    }
}

fn network(err: wasm_bindgen::JsValue) -> VitrineError {
    VitrineError::Network(js_error(err))
}

impl FormTransport for FetchTransport {
    async fn send(&self, submission: &FormSubmission) -> Result<u16> {
        let request = self.request(submission)?;
        let window = web_sys::window()
            .ok_or_else(|| VitrineError::Network("no window".to_string()))?;

        let response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(network)?;
        let response: Response = response.dyn_into().map_err(network)?;

        debug!(status = response.status(), url = %response.url(), "form response");
        Ok(response.status())
    }
}
