//! Client core for the medicines inventory service.
//!
//! # Overview
//! Keeps three independent panels (medicine list, average price, add form)
//! in step with the remote API. Requests are built and responses parsed
//! without touching the network; a host-supplied `Transport` does the I/O
//! and host-supplied surfaces do the drawing.
//!
//! # Design
//! - `MedicineClient` is stateless. It holds only `base_url` and splits every
//!   operation into `build_*` and `parse_*`.
//! - Loaders absorb their own failures and render a panel-local error
//!   literal, so a failing panel never blanks a sibling.
//! - List records are normalized one at a time; a malformed record is logged
//!   and skipped.
//! - Everything runs on one thread. Shared handles are `Rc`, mutable state is
//!   `Cell`, and futures only suspend inside `Transport::execute`.

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod http;
pub mod loader;
pub mod memory;
pub mod page;
pub mod render;
pub mod surface;
pub mod types;

#[cfg(test)]
mod test_support;

pub use client::MedicineClient;
pub use config::ClientConfig;
pub use controller::{SubmissionController, SubmissionOutcome, SubmissionState};
pub use error::{ApiError, RenderError, ShapeError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use loader::{AggregateLoader, ListLoader, LoadOutcome};
pub use page::{Page, PageSurfaces};
pub use render::{AggregateRenderer, MedicineRenderer, RenderSummary};
pub use surface::{
    AggregateSurface, FormSurface, ListSurface, MedicineCard, StatusSurface, SubmitEvent,
};
pub use types::{
    AggregateStats, FormData, Medicine, MedicineList, MedicineRemoval, MedicineUpdate, NewMedicine,
    SubmissionResult,
};
