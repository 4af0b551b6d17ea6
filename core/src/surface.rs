//! Render targets the core writes into.
//!
//! Each panel owns exactly one surface and nothing else writes to it. All
//! methods take `&self`: surfaces wrap handles with interior mutability (DOM
//! nodes in the browser, `RefCell`s in `memory`), and several async tasks
//! hold them at once on the same thread.

use std::fmt;

use crate::error::RenderError;
use crate::types::FormData;

/// One rendered list entry, already formatted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MedicineCard {
    pub name: String,
    pub price: String,
}

impl fmt::Display for MedicineCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.name, self.price)
    }
}

/// The medicines list container.
pub trait ListSurface {
    /// Remove all content.
    fn clear(&self);

    /// Replace all content with a single line of text.
    fn show_text(&self, text: &str);

    fn append_card(&self, card: &MedicineCard) -> Result<(), RenderError>;
}

/// The average price display: a value and a trailing annotation.
pub trait AggregateSurface {
    fn set_value(&self, text: &str);
    fn set_annotation(&self, text: &str);
}

/// The add-medicine status line.
pub trait StatusSurface {
    fn set_status(&self, text: &str);
}

/// The add-medicine form.
pub trait FormSurface {
    /// Current field values, in document order.
    fn values(&self) -> FormData;

    /// Clear every field.
    fn reset(&self);

    fn set_submit_enabled(&self, enabled: bool);
}

/// The event that triggered a submission.
pub trait SubmitEvent {
    /// Stop the browser from navigating (full page reload).
    fn prevent_default(&self);
}
