//! In-memory render surfaces.
//!
//! Headless hosts and tests render into these instead of a DOM. They record
//! exactly what a page would display and nothing more.

use std::cell::{Cell, RefCell};

use crate::error::RenderError;
use crate::surface::{
    AggregateSurface, FormSurface, ListSurface, MedicineCard, StatusSurface, SubmitEvent,
};
use crate::types::FormData;

/// List container holding either a text line or a run of cards.
#[derive(Debug, Default)]
pub struct MemoryList {
    text: RefCell<Option<String>>,
    cards: RefCell<Vec<MedicineCard>>,
    reject_name: Option<String>,
}

impl MemoryList {
    pub fn new() -> Self {
        Self::default()
    }

    /// A list that refuses to append any card with this name.
    pub fn failing_on(name: impl Into<String>) -> Self {
        Self {
            reject_name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn text(&self) -> Option<String> {
        self.text.borrow().clone()
    }

    pub fn cards(&self) -> Vec<MedicineCard> {
        self.cards.borrow().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.text.borrow().is_none() && self.cards.borrow().is_empty()
    }
}

impl ListSurface for MemoryList {
    fn clear(&self) {
        self.text.replace(None);
        self.cards.borrow_mut().clear();
    }

    fn show_text(&self, text: &str) {
        self.cards.borrow_mut().clear();
        self.text.replace(Some(text.to_string()));
    }

    fn append_card(&self, card: &MedicineCard) -> Result<(), RenderError> {
        if self.reject_name.as_deref() == Some(card.name.as_str()) {
            return Err(RenderError(format!("cannot attach card for {}", card.name)));
        }
        self.cards.borrow_mut().push(card.clone());
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryAggregate {
    value: RefCell<String>,
    annotation: RefCell<String>,
}

impl MemoryAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> String {
        self.value.borrow().clone()
    }

    pub fn annotation(&self) -> String {
        self.annotation.borrow().clone()
    }

    /// Value and annotation as they read side by side.
    pub fn display(&self) -> String {
        format!("{}{}", self.value.borrow(), self.annotation.borrow())
    }
}

impl AggregateSurface for MemoryAggregate {
    fn set_value(&self, text: &str) {
        self.value.replace(text.to_string());
    }

    fn set_annotation(&self, text: &str) {
        self.annotation.replace(text.to_string());
    }
}

/// Status line that also keeps every text it was set to.
#[derive(Debug, Default)]
pub struct MemoryStatus {
    history: RefCell<Vec<String>>,
}

impl MemoryStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<String> {
        self.history.borrow().last().cloned()
    }

    pub fn history(&self) -> Vec<String> {
        self.history.borrow().clone()
    }
}

impl StatusSurface for MemoryStatus {
    fn set_status(&self, text: &str) {
        self.history.borrow_mut().push(text.to_string());
    }
}

#[derive(Debug)]
pub struct MemoryForm {
    fields: RefCell<Vec<(String, String)>>,
    submit_enabled: Cell<bool>,
}

impl MemoryForm {
    /// A form with these field names, all empty.
    pub fn with_fields(names: &[&str]) -> Self {
        Self {
            fields: RefCell::new(
                names
                    .iter()
                    .map(|name| (name.to_string(), String::new()))
                    .collect(),
            ),
            submit_enabled: Cell::new(true),
        }
    }

    /// Set a field, adding it if the form does not have it yet.
    pub fn fill(&self, name: &str, value: &str) {
        let mut fields = self.fields.borrow_mut();
        match fields.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value.to_string(),
            None => fields.push((name.to_string(), value.to_string())),
        }
    }

    pub fn value(&self, name: &str) -> Option<String> {
        self.fields
            .borrow()
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.clone())
    }

    pub fn is_blank(&self) -> bool {
        self.fields.borrow().iter().all(|(_, v)| v.is_empty())
    }

    pub fn submit_enabled(&self) -> bool {
        self.submit_enabled.get()
    }
}

impl FormSurface for MemoryForm {
    fn values(&self) -> FormData {
        let mut data = FormData::new();
        for (name, value) in self.fields.borrow().iter() {
            data.push(name.as_str(), value.as_str());
        }
        data
    }

    fn reset(&self) {
        for (_, value) in self.fields.borrow_mut().iter_mut() {
            value.clear();
        }
    }

    fn set_submit_enabled(&self, enabled: bool) {
        self.submit_enabled.set(enabled);
    }
}

#[derive(Debug, Default)]
pub struct MemoryEvent {
    prevented: Cell<bool>,
}

impl MemoryEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_prevented(&self) -> bool {
        self.prevented.get()
    }
}

impl SubmitEvent for MemoryEvent {
    fn prevent_default(&self) {
        self.prevented.set(true);
    }
}
