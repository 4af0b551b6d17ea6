//! Page wiring: one transport, three panels.

use std::rc::Rc;

use crate::client::MedicineClient;
use crate::config::ClientConfig;
use crate::controller::SubmissionController;
use crate::http::Transport;
use crate::loader::{AggregateLoader, ListLoader, LoadOutcome};
use crate::render::{AggregateRenderer, MedicineRenderer};
use crate::surface::{AggregateSurface, FormSurface, ListSurface, StatusSurface};

/// Handles to the regions a page renders into.
#[derive(Clone)]
pub struct PageSurfaces {
    pub list: Rc<dyn ListSurface>,
    pub average: Rc<dyn AggregateSurface>,
    pub form: Rc<dyn FormSurface>,
    pub status: Rc<dyn StatusSurface>,
}

pub struct Page {
    list: ListLoader,
    aggregate: AggregateLoader,
    controller: Rc<SubmissionController>,
}

impl Page {
    pub fn new(config: &ClientConfig, transport: Rc<dyn Transport>, surfaces: PageSurfaces) -> Self {
        let client = MedicineClient::new(&config.base_url);
        let list = ListLoader::new(
            client.clone(),
            Rc::clone(&transport),
            MedicineRenderer::new(config.currency_symbol.as_str()),
            surfaces.list,
        );
        let aggregate = AggregateLoader::new(
            client.clone(),
            Rc::clone(&transport),
            AggregateRenderer::new(config.currency_symbol.as_str()),
            surfaces.average,
        );
        let controller = Rc::new(SubmissionController::new(
            client,
            transport,
            surfaces.form,
            surfaces.status,
            list.clone(),
            aggregate.clone(),
            config.guard_resubmission,
        ));
        Self {
            list,
            aggregate,
            controller,
        }
    }

    /// Load both panels concurrently. Either may finish first.
    pub async fn on_ready(&self) -> (LoadOutcome, LoadOutcome) {
        futures::join!(self.list.load(), self.aggregate.load())
    }

    pub fn controller(&self) -> &Rc<SubmissionController> {
        &self.controller
    }
}
