//! Panel loaders: fetch, then render into the panel's surface.
//!
//! A loader owns one panel. Whatever happens to its request, the panel ends
//! in exactly one of three states: rendered content, the empty-state literal,
//! or the panel's error literal. Failures are logged and absorbed here; they
//! never reach the caller as an `Err`, so one panel cannot take down another.

use std::rc::Rc;

use tracing::{debug, error};

use crate::client::MedicineClient;
use crate::error::ApiError;
use crate::http::Transport;
use crate::render::{AggregateRenderer, MedicineRenderer, RenderSummary};
use crate::surface::{AggregateSurface, ListSurface};
use crate::types::{AggregateStats, MedicineList};

pub const LOADING_MEDICINES: &str = "Loading medicines...";
pub const LIST_LOAD_ERROR: &str = "Error loading medicines.";

/// Final state of a panel after one load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Rendered(RenderSummary),
    Empty,
    Failed,
}

#[derive(Clone)]
pub struct ListLoader {
    client: MedicineClient,
    transport: Rc<dyn Transport>,
    renderer: MedicineRenderer,
    surface: Rc<dyn ListSurface>,
}

impl ListLoader {
    pub fn new(
        client: MedicineClient,
        transport: Rc<dyn Transport>,
        renderer: MedicineRenderer,
        surface: Rc<dyn ListSurface>,
    ) -> Self {
        Self {
            client,
            transport,
            renderer,
            surface,
        }
    }

    pub async fn load(&self) -> LoadOutcome {
        self.surface.show_text(LOADING_MEDICINES);

        match self.fetch().await {
            Ok(list) if list.is_empty() => {
                self.renderer.render(&*self.surface, Some(&list));
                LoadOutcome::Empty
            }
            Ok(list) => LoadOutcome::Rendered(self.renderer.render(&*self.surface, Some(&list))),
            Err(e) => {
                error!(error = %e, "failed to load medicines");
                self.surface.show_text(LIST_LOAD_ERROR);
                LoadOutcome::Failed
            }
        }
    }

    async fn fetch(&self) -> Result<MedicineList, ApiError> {
        let request = self.client.build_list_medicines();
        debug!(path = %request.path, "fetching medicines");
        let response = self.transport.execute(request).await?;
        self.client.parse_list_medicines(response)
    }
}

#[derive(Clone)]
pub struct AggregateLoader {
    client: MedicineClient,
    transport: Rc<dyn Transport>,
    renderer: AggregateRenderer,
    surface: Rc<dyn AggregateSurface>,
}

impl AggregateLoader {
    pub fn new(
        client: MedicineClient,
        transport: Rc<dyn Transport>,
        renderer: AggregateRenderer,
        surface: Rc<dyn AggregateSurface>,
    ) -> Self {
        Self {
            client,
            transport,
            renderer,
            surface,
        }
    }

    pub async fn load(&self) -> LoadOutcome {
        self.renderer.render_loading(&*self.surface);

        match self.fetch().await {
            Ok(stats) => {
                self.renderer.render(&*self.surface, stats.average, stats.count);
                if stats.average.is_some() {
                    LoadOutcome::Rendered(RenderSummary {
                        rendered: 1,
                        skipped: 0,
                    })
                } else {
                    LoadOutcome::Empty
                }
            }
            Err(e) => {
                error!(error = %e, "failed to load average price");
                self.renderer.render_error(&*self.surface);
                LoadOutcome::Failed
            }
        }
    }

    async fn fetch(&self) -> Result<AggregateStats, ApiError> {
        let request = self.client.build_average_price();
        debug!(path = %request.path, "fetching average price");
        let response = self.transport.execute(request).await?;
        self.client.parse_average_price(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpMethod;
    use crate::memory::{MemoryAggregate, MemoryList};
    use crate::test_support::{ScriptedTransport, BASE_URL};
    use futures::executor::block_on;

    fn list_loader(transport: &Rc<ScriptedTransport>, surface: &Rc<MemoryList>) -> ListLoader {
        ListLoader::new(
            MedicineClient::new(BASE_URL),
            transport.clone(),
            MedicineRenderer::default(),
            surface.clone(),
        )
    }

    fn aggregate_loader(
        transport: &Rc<ScriptedTransport>,
        surface: &Rc<MemoryAggregate>,
    ) -> AggregateLoader {
        AggregateLoader::new(
            MedicineClient::new(BASE_URL),
            transport.clone(),
            AggregateRenderer::default(),
            surface.clone(),
        )
    }

    #[test]
    fn list_load_renders_enveloped_response() {
        let transport = Rc::new(ScriptedTransport::new());
        transport.respond(
            HttpMethod::Get,
            "/medicines",
            200,
            r#"{"medicines":[{"name":"Aspirin","price":5},{"name":"Ibuprofen"}]}"#,
        );
        let surface = Rc::new(MemoryList::new());

        let outcome = block_on(list_loader(&transport, &surface).load());

        assert_eq!(outcome, LoadOutcome::Rendered(RenderSummary { rendered: 2, skipped: 0 }));
        let cards: Vec<String> = surface.cards().iter().map(ToString::to_string).collect();
        assert_eq!(cards, vec!["Aspirin / £5.00", "Ibuprofen / N/A"]);
    }

    #[test]
    fn list_load_failure_leaves_only_error_literal() {
        let transport = Rc::new(ScriptedTransport::new());
        transport.respond(HttpMethod::Get, "/medicines", 503, "unavailable");
        let surface = Rc::new(MemoryList::new());

        let outcome = block_on(list_loader(&transport, &surface).load());

        assert_eq!(outcome, LoadOutcome::Failed);
        assert_eq!(surface.text().as_deref(), Some(LIST_LOAD_ERROR));
        assert!(surface.cards().is_empty());
    }

    #[test]
    fn list_load_transport_failure_is_load_error() {
        let transport = Rc::new(ScriptedTransport::new());
        transport.fail(HttpMethod::Get, "/medicines", "connection refused");
        let surface = Rc::new(MemoryList::new());

        assert_eq!(block_on(list_loader(&transport, &surface).load()), LoadOutcome::Failed);
        assert_eq!(surface.text().as_deref(), Some(LIST_LOAD_ERROR));
    }

    #[test]
    fn list_load_empty_is_not_an_error() {
        let transport = Rc::new(ScriptedTransport::new());
        transport.respond(HttpMethod::Get, "/medicines", 200, "[]");
        let surface = Rc::new(MemoryList::new());

        assert_eq!(block_on(list_loader(&transport, &surface).load()), LoadOutcome::Empty);
        assert_eq!(surface.text().as_deref(), Some("No medicines found."));
    }

    #[test]
    fn aggregate_load_renders_null_average() {
        let transport = Rc::new(ScriptedTransport::new());
        transport.respond(
            HttpMethod::Get,
            "/average-price",
            200,
            r#"{"average_price":null,"count":0}"#,
        );
        let surface = Rc::new(MemoryAggregate::new());

        let outcome = block_on(aggregate_loader(&transport, &surface).load());

        assert_eq!(outcome, LoadOutcome::Empty);
        assert_eq!(surface.display(), "N/A (no valid prices found)");
    }

    #[test]
    fn aggregate_load_renders_average() {
        let transport = Rc::new(ScriptedTransport::new());
        transport.respond(
            HttpMethod::Get,
            "/average-price",
            200,
            r#"{"average_price":12.5,"count":3}"#,
        );
        let surface = Rc::new(MemoryAggregate::new());

        block_on(aggregate_loader(&transport, &surface).load());

        assert_eq!(surface.display(), "£12.50 (based on 3 medicines)");
    }

    #[test]
    fn aggregate_load_failure_shows_error_without_annotation() {
        let transport = Rc::new(ScriptedTransport::new());
        transport.respond(HttpMethod::Get, "/average-price", 500, "boom");
        let surface = Rc::new(MemoryAggregate::new());

        assert_eq!(block_on(aggregate_loader(&transport, &surface).load()), LoadOutcome::Failed);
        assert_eq!(surface.value(), "Error");
        assert_eq!(surface.annotation(), "");
    }
}
