//! Medicine list and average price renderers.
//!
//! # Design
//! Renderers are pure functions of their input plus the surface they are
//! handed; they hold only display settings. Every render starts by replacing
//! what the surface showed before, so the surface never mixes two responses.
//!
//! List rendering isolates records: a record that cannot become a card, or a
//! card the surface refuses, is logged with its index and skipped.

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::warn;

use crate::surface::{AggregateSurface, ListSurface, MedicineCard};
use crate::types::{Medicine, MedicineList};

pub const EMPTY_LIST: &str = "No medicines found.";
pub const UNKNOWN_NAME: &str = "Unknown name";
pub const NOT_AVAILABLE: &str = "N/A";
pub const NO_VALID_PRICES: &str = " (no valid prices found)";
pub const AGGREGATE_ERROR: &str = "Error";
pub const AGGREGATE_LOADING: &str = "Loading...";

/// `£12.50`-style price with exactly two decimals.
///
/// Rounds the exact binary value half away from zero, so `0.125` shows as
/// `0.13` while `2.675` (stored just below the tie) shows as `2.67`.
pub fn format_price(price: f64, currency_symbol: &str) -> String {
    match Decimal::from_f64_retain(price) {
        Some(exact) => {
            let rounded = exact.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            format!("{currency_symbol}{rounded:.2}")
        }
        // Outside Decimal's range, or not finite.
        None => format!("{currency_symbol}{price:.2}"),
    }
}

impl MedicineCard {
    pub fn from_medicine(medicine: &Medicine, currency_symbol: &str) -> Self {
        Self {
            name: medicine
                .name
                .clone()
                .unwrap_or_else(|| UNKNOWN_NAME.to_string()),
            price: medicine
                .price
                .map(|price| format_price(price, currency_symbol))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        }
    }
}

/// Counts from one list render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderSummary {
    pub rendered: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone)]
pub struct MedicineRenderer {
    currency_symbol: String,
}

impl MedicineRenderer {
    pub fn new(currency_symbol: impl Into<String>) -> Self {
        Self {
            currency_symbol: currency_symbol.into(),
        }
    }

    /// Replace the surface content with one card per record.
    ///
    /// An absent or empty list shows the empty-state literal instead.
    pub fn render(&self, surface: &dyn ListSurface, list: Option<&MedicineList>) -> RenderSummary {
        surface.clear();

        let Some(list) = list.filter(|list| !list.is_empty()) else {
            surface.show_text(EMPTY_LIST);
            return RenderSummary::default();
        };

        let mut summary = RenderSummary::default();
        for (index, raw) in list.records().iter().enumerate() {
            let appended = Medicine::from_record(raw)
                .map(|medicine| MedicineCard::from_medicine(&medicine, &self.currency_symbol))
                .map_err(|e| e.to_string())
                .and_then(|card| surface.append_card(&card).map_err(|e| e.to_string()));
            match appended {
                Ok(()) => summary.rendered += 1,
                Err(error) => {
                    warn!(index, raw = %raw, %error, "skipping medicine record");
                    summary.skipped += 1;
                }
            }
        }
        summary
    }
}

impl Default for MedicineRenderer {
    fn default() -> Self {
        Self::new("£")
    }
}

#[derive(Debug, Clone)]
pub struct AggregateRenderer {
    currency_symbol: String,
}

impl AggregateRenderer {
    pub fn new(currency_symbol: impl Into<String>) -> Self {
        Self {
            currency_symbol: currency_symbol.into(),
        }
    }

    pub fn render(&self, surface: &dyn AggregateSurface, average: Option<f64>, count: u64) {
        match average {
            None => {
                surface.set_value(NOT_AVAILABLE);
                surface.set_annotation(NO_VALID_PRICES);
            }
            Some(average) => {
                surface.set_value(&format_price(average, &self.currency_symbol));
                surface.set_annotation(&format!(" (based on {count} medicines)"));
            }
        }
    }

    /// The fetch failed. Distinct from the no-valid-prices state.
    pub fn render_error(&self, surface: &dyn AggregateSurface) {
        surface.set_value(AGGREGATE_ERROR);
        surface.set_annotation("");
    }

    pub fn render_loading(&self, surface: &dyn AggregateSurface) {
        surface.set_value(AGGREGATE_LOADING);
    }
}

impl Default for AggregateRenderer {
    fn default() -> Self {
        Self::new("£")
    }
}
