use crate::backend_client::{BackendClient, SubmissionStore};
use crate::configuration::{Settings, get_configuration};
use crate::coordinator::{FormKind, Outcome, SubmissionCoordinator};
use crate::events::{EventRegistry, SubmitEvent};
use crate::ui::Page;
use anyhow::Context;
use std::sync::Arc;

/// The page with a coordinator wired to each of its marked forms.
pub struct Application {
    page: Page,
    backend: BackendClient,
    events: EventRegistry,
}

impl Application {
    /// Configures the backend client from `configuration` and wires the page.
    ///
    /// A configuration problem is logged and the client left unconfigured, so
    /// submissions report a generic error instead of the page failing to load.
    pub fn build(configuration: Settings, page: Page) -> Self {
        let backend = BackendClient::new();
        if let Err(e) = backend.configure(&configuration.backend) {
            tracing::error!(
                error.cause_chain = ?e,
                error.message = %e,
                "Backend is not configured; form submissions will fail"
            );
        }
        let store: Arc<dyn SubmissionStore> = Arc::new(backend.clone());
        let events = wire_forms(&page, store, &configuration);
        Self {
            page,
            backend,
            events,
        }
    }

    /// Reads the layered configuration from `./configuration` and builds.
    pub fn from_environment(page: Page) -> Result<Self, anyhow::Error> {
        let configuration = get_configuration().context("Failed to read configuration")?;
        Ok(Self::build(configuration, page))
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn backend(&self) -> &BackendClient {
        &self.backend
    }

    pub fn events(&self) -> &EventRegistry {
        &self.events
    }

    /// What the page adapter calls when a form raises `submit`.
    pub async fn submit(&self, form_id: &str) -> Option<Outcome> {
        let mut event = SubmitEvent::new(form_id);
        self.events.dispatch(&mut event).await
    }

    pub fn dispose(self) {
        self.backend.dispose();
    }
}

/// Registers one coordinator per form whose marker names a known form kind.
pub fn wire_forms(
    page: &Page,
    store: Arc<dyn SubmissionStore>,
    configuration: &Settings,
) -> EventRegistry {
    let events = EventRegistry::new();
    for (form, marker) in page.marked_forms() {
        let Some(kind) = FormKind::from_marker(marker) else {
            tracing::warn!(form_id = %form.id(), marker, "Skipping form with an unknown marker");
            continue;
        };
        let coordinator = SubmissionCoordinator::new(
            kind,
            form.clone(),
            Arc::clone(&store),
            configuration.notifications.clone(),
        );
        events.subscribe(form.id(), Arc::new(coordinator));
        tracing::debug!(form_id = %form.id(), form_kind = %kind, "Form wired");
    }
    events
}
