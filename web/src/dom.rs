//! DOM-backed render surfaces.
//!
//! Cards are assembled from elements and text nodes; server-provided strings
//! are never parsed as HTML.

use medicine_core::{
    AggregateSurface, FormData, FormSurface, ListSurface, MedicineCard, RenderError,
    StatusSurface, SubmitEvent,
};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, Event, HtmlButtonElement, HtmlFormElement, HtmlInputElement,
    HtmlSelectElement, HtmlTextAreaElement,
};

use crate::fetch::describe;

/// Controls that submit the form: explicit submit inputs and buttons, plus
/// buttons without a `type`, which submit by default.
pub const SUBMIT_CONTROLS: &str = "button:not([type]), [type=submit]";

pub struct DomList {
    document: Document,
    container: Element,
}

impl DomList {
    pub fn new(document: Document, container: Element) -> Self {
        Self {
            document,
            container,
        }
    }

    fn build_card(&self, card: &MedicineCard) -> Result<Element, JsValue> {
        let root = self.document.create_element("div")?;
        root.set_class_name("medicine-card");

        let title = self.document.create_element("h3")?;
        title.set_text_content(Some(&card.name));

        let price = self.document.create_element("p")?;
        let label = self.document.create_element("strong")?;
        label.set_text_content(Some("Price:"));
        price.append_child(&label)?;
        price.append_child(&self.document.create_text_node(&format!(" {}", card.price)))?;

        root.append_child(&title)?;
        root.append_child(&price)?;
        Ok(root)
    }
}

impl ListSurface for DomList {
    fn clear(&self) {
        self.container.set_inner_html("");
    }

    fn show_text(&self, text: &str) {
        self.container.set_text_content(Some(text));
    }

    fn append_card(&self, card: &MedicineCard) -> Result<(), RenderError> {
        let node = self.build_card(card).map_err(render_error)?;
        self.container.append_child(&node).map_err(render_error)?;
        Ok(())
    }
}

fn render_error(value: JsValue) -> RenderError {
    RenderError(describe(&value))
}

pub struct DomAggregate {
    value: Element,
    annotation: Element,
}

impl DomAggregate {
    pub fn new(value: Element, annotation: Element) -> Self {
        Self { value, annotation }
    }
}

impl AggregateSurface for DomAggregate {
    fn set_value(&self, text: &str) {
        self.value.set_text_content(Some(text));
    }

    fn set_annotation(&self, text: &str) {
        self.annotation.set_text_content(Some(text));
    }
}

pub struct DomStatus {
    element: Element,
}

impl DomStatus {
    pub fn new(element: Element) -> Self {
        Self { element }
    }
}

impl StatusSurface for DomStatus {
    fn set_status(&self, text: &str) {
        self.element.set_text_content(Some(text));
    }
}

pub struct DomForm {
    form: HtmlFormElement,
}

impl DomForm {
    pub fn new(form: HtmlFormElement) -> Self {
        Self { form }
    }
}

impl FormSurface for DomForm {
    /// Successful controls only, the same set `new FormData(form)` would hold.
    fn values(&self) -> FormData {
        let mut data = FormData::new();
        let elements = self.form.elements();
        for index in 0..elements.length() {
            let Some(element) = elements.item(index) else {
                continue;
            };
            if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
                if input.name().is_empty() || input.disabled() {
                    continue;
                }
                match input.type_().as_str() {
                    "submit" | "button" | "reset" | "image" | "file" => continue,
                    "checkbox" | "radio" if !input.checked() => continue,
                    _ => data.push(input.name(), input.value()),
                }
            } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
                if !select.name().is_empty() && !select.disabled() {
                    data.push(select.name(), select.value());
                }
            } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
                if !area.name().is_empty() && !area.disabled() {
                    data.push(area.name(), area.value());
                }
            }
        }
        data
    }

    fn reset(&self) {
        self.form.reset();
    }

    fn set_submit_enabled(&self, enabled: bool) {
        let Ok(controls) = self.form.query_selector_all(SUBMIT_CONTROLS) else {
            return;
        };
        for index in 0..controls.length() {
            let Some(control) = controls.item(index) else {
                continue;
            };
            if let Some(button) = control.dyn_ref::<HtmlButtonElement>() {
                button.set_disabled(!enabled);
            } else if let Some(input) = control.dyn_ref::<HtmlInputElement>() {
                input.set_disabled(!enabled);
            }
        }
    }
}

pub struct DomSubmitEvent<'a>(pub &'a Event);

impl SubmitEvent for DomSubmitEvent<'_> {
    fn prevent_default(&self) {
        self.0.prevent_default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_selector_covers_untyped_buttons() {
        let selectors: Vec<&str> = SUBMIT_CONTROLS.split(',').map(str::trim).collect();
        assert!(selectors.contains(&"button:not([type])"));
        assert!(selectors.contains(&"[type=submit]"));
    }
}
