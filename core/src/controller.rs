//! Add-medicine form lifecycle.
//!
//! # Design
//! `on_submit` runs its synchronous part (prevent default, status line,
//! capturing field values) before returning the future, so the browser sees
//! `preventDefault` inside the event dispatch. The returned future owns an
//! `Rc` of the controller and is `'static`, ready for `spawn_local`.
//!
//! Submissions are not serialized. Two overlapping submits both go out and
//! the one whose response resolves last writes the final status. Setting
//! `guard_resubmission` closes that window by disabling the submit control
//! until nothing is in flight.

use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;

use tracing::{debug, error};

use crate::client::MedicineClient;
use crate::error::ApiError;
use crate::http::Transport;
use crate::loader::{AggregateLoader, ListLoader};
use crate::surface::{FormSurface, StatusSurface, SubmitEvent};
use crate::types::{FormData, SubmissionResult};

pub const SUBMITTING: &str = "Submitting...";
pub const SUBMIT_ERROR: &str = "Error adding medicine.";

/// Phase of the form: `Idle → Submitting → {Succeeded, Failed} → Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// How one submit ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// The server accepted the form; carries the status text shown.
    Succeeded(String),
    Failed,
    /// Dropped because another submission was in flight and the guard is on.
    Skipped,
}

pub struct SubmissionController {
    client: MedicineClient,
    transport: Rc<dyn Transport>,
    form: Rc<dyn FormSurface>,
    status: Rc<dyn StatusSurface>,
    list: ListLoader,
    aggregate: AggregateLoader,
    guard_resubmission: bool,
    state: Cell<SubmissionState>,
    in_flight: Cell<usize>,
}

impl SubmissionController {
    pub fn new(
        client: MedicineClient,
        transport: Rc<dyn Transport>,
        form: Rc<dyn FormSurface>,
        status: Rc<dyn StatusSurface>,
        list: ListLoader,
        aggregate: AggregateLoader,
        guard_resubmission: bool,
    ) -> Self {
        Self {
            client,
            transport,
            form,
            status,
            list,
            aggregate,
            guard_resubmission,
            state: Cell::new(SubmissionState::Idle),
            in_flight: Cell::new(0),
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.state.get()
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.get()
    }

    /// Handle a submit event.
    ///
    /// On success the form is reset and both panels are reloaded before the
    /// future completes. On failure the form keeps its values.
    pub fn on_submit(
        self: &Rc<Self>,
        event: &dyn SubmitEvent,
    ) -> impl Future<Output = SubmissionOutcome> + 'static {
        event.prevent_default();
        let admitted = self.begin();
        let this = Rc::clone(self);
        async move {
            match admitted {
                Some(form) => this.submit(form).await,
                None => SubmissionOutcome::Skipped,
            }
        }
    }

    fn begin(&self) -> Option<FormData> {
        if self.guard_resubmission && self.in_flight.get() > 0 {
            debug!("submission already in flight, skipping");
            return None;
        }
        self.in_flight.set(self.in_flight.get() + 1);
        self.state.set(SubmissionState::Submitting);
        self.status.set_status(SUBMITTING);
        if self.guard_resubmission {
            self.form.set_submit_enabled(false);
        }
        Some(self.form.values())
    }

    async fn submit(&self, form: FormData) -> SubmissionOutcome {
        let result = self.send(&form).await;

        self.in_flight.set(self.in_flight.get().saturating_sub(1));
        if self.guard_resubmission && self.in_flight.get() == 0 {
            self.form.set_submit_enabled(true);
        }

        let outcome = match result {
            Ok(result) => {
                let text = result.display_text().to_string();
                self.status.set_status(&text);
                self.form.reset();
                self.settle(SubmissionState::Succeeded);
                self.list.load().await;
                self.aggregate.load().await;
                SubmissionOutcome::Succeeded(text)
            }
            Err(e) => {
                error!(error = %e, "failed to add medicine");
                self.status.set_status(SUBMIT_ERROR);
                self.settle(SubmissionState::Failed);
                SubmissionOutcome::Failed
            }
        };

        if self.in_flight.get() == 0 {
            self.state.set(SubmissionState::Idle);
        }
        outcome
    }

    /// Record how one submission ended. Another one still in flight keeps
    /// the form in `Submitting`.
    fn settle(&self, settled: SubmissionState) {
        if self.in_flight.get() == 0 {
            self.state.set(settled);
        } else {
            self.state.set(SubmissionState::Submitting);
        }
    }

    async fn send(&self, form: &FormData) -> Result<SubmissionResult, ApiError> {
        let request = self.client.build_create_medicine(form)?;
        debug!(path = %request.path, "submitting medicine");
        let response = self.transport.execute(request).await?;
        self.client.parse_create_medicine(response)
    }
}
