//! Browser host for `medicine-core`.
//!
//! # Overview
//! Resolves the page's element handles once, wraps them in DOM surfaces and
//! hands them to a `Page` together with a fetch-backed transport. The core
//! never looks anything up in the document itself.
//!
//! # Design
//! - `start` runs when the wasm module is instantiated. Panels load on
//!   `DOMContentLoaded`, or right away if the document has already parsed.
//! - The submit listener calls into the controller synchronously so
//!   `preventDefault` happens during dispatch; the network part is spawned
//!   with `spawn_local`.
//! - Listener closures live for the lifetime of the page and are leaked with
//!   `Closure::forget`.

pub mod dom;
pub mod fetch;

use std::rc::Rc;

use medicine_core::{ClientConfig, Page, PageSurfaces, SubmissionController};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, Event, HtmlFormElement};

use dom::{DomAggregate, DomForm, DomList, DomStatus, DomSubmitEvent};
use fetch::FetchTransport;

pub const LIST_ID: &str = "medicines-container";
pub const AVERAGE_ID: &str = "avg-price";
pub const AVERAGE_META_ID: &str = "avg-meta";
pub const FORM_ID: &str = "add-medicine-form";
pub const STATUS_ID: &str = "add-message";

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))?;

    let config = config_from_attributes(|name| {
        document
            .body()
            .and_then(|body| body.get_attribute(name))
    });
    tracing::debug!(base_url = %config.base_url, "mounting medicines page");

    let form: HtmlFormElement = element(&document, FORM_ID)?
        .dyn_into()
        .map_err(|_| JsValue::from_str(&format!("#{FORM_ID} is not a form")))?;

    let surfaces = PageSurfaces {
        list: Rc::new(DomList::new(document.clone(), element(&document, LIST_ID)?)),
        average: Rc::new(DomAggregate::new(
            element(&document, AVERAGE_ID)?,
            element(&document, AVERAGE_META_ID)?,
        )),
        form: Rc::new(DomForm::new(form.clone())),
        status: Rc::new(DomStatus::new(element(&document, STATUS_ID)?)),
    };
    let page = Rc::new(Page::new(
        &config,
        Rc::new(FetchTransport::new(window)),
        surfaces,
    ));

    register_submit(&form, Rc::clone(page.controller()))?;

    if document.ready_state() == "loading" {
        let ready = Closure::<dyn FnMut()>::new(move || load_panels(Rc::clone(&page)));
        document.add_event_listener_with_callback("DOMContentLoaded", ready.as_ref().unchecked_ref())?;
        ready.forget();
    } else {
        load_panels(page);
    }
    Ok(())
}

fn load_panels(page: Rc<Page>) {
    spawn_local(async move {
        page.on_ready().await;
    });
}

fn register_submit(form: &HtmlFormElement, controller: Rc<SubmissionController>) -> Result<(), JsValue> {
    let on_submit = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        let pending = controller.on_submit(&DomSubmitEvent(&event));
        spawn_local(async move {
            pending.await;
        });
    });
    form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
    on_submit.forget();
    Ok(())
}

fn element(document: &Document, id: &str) -> Result<Element, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing element #{id}")))
}

/// Build the client config from `<body>` data attributes:
/// `data-api-base`, `data-currency` and `data-guard-submit`.
pub fn config_from_attributes(attribute: impl Fn(&str) -> Option<String>) -> ClientConfig {
    let mut config = ClientConfig::default();
    if let Some(base_url) = attribute("data-api-base").filter(|v| !v.trim().is_empty()) {
        config.base_url = base_url;
    }
    if let Some(symbol) = attribute("data-currency") {
        config.currency_symbol = symbol;
    }
    if let Some(guard) = attribute("data-guard-submit") {
        // A bare boolean attribute reads as an empty string.
        config.guard_resubmission = guard.is_empty() || guard == "true";
    }
    config
}
