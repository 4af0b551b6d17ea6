//! `Transport` backed by `window.fetch`.

use async_trait::async_trait;
use medicine_core::{ApiError, HttpRequest, HttpResponse, Transport};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response, Window};

/// Executes core requests with the browser's fetch API.
///
/// `fetch` only rejects when no response arrives, so 4xx/5xx come back as
/// data and the core's status policy applies unchanged.
pub struct FetchTransport {
    window: Window,
}

impl FetchTransport {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let init = RequestInit::new();
        init.set_method(request.method.as_str());
        if let Some(body) = &request.body {
            init.set_body(&JsValue::from_str(body));
        }

        let js_request = Request::new_with_str_and_init(&request.path, &init).map_err(transport_error)?;
        for (name, value) in &request.headers {
            js_request.headers().set(name, value).map_err(transport_error)?;
        }

        let response: Response = JsFuture::from(self.window.fetch_with_request(&js_request))
            .await
            .map_err(transport_error)?
            .dyn_into()
            .map_err(transport_error)?;
        let status = response.status();
        let body = JsFuture::from(response.text().map_err(transport_error)?)
            .await
            .map_err(transport_error)?;

        Ok(HttpResponse::new(status, body.as_string().unwrap_or_default()))
    }
}

fn transport_error(value: JsValue) -> ApiError {
    ApiError::Transport(describe(&value))
}

/// Best-effort message for a thrown JS value.
pub(crate) fn describe(value: &JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
