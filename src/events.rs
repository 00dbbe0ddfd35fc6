//! Submit-event delivery between the page adapter and the form coordinators.
use crate::coordinator::Outcome;
use crate::ui::lock;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// A `submit` event raised by a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitEvent {
    form_id: String,
    default_prevented: bool,
}

impl SubmitEvent {
    pub fn new(form_id: impl Into<String>) -> Self {
        Self {
            form_id: form_id.into(),
            default_prevented: false,
        }
    }

    pub fn form_id(&self) -> &str {
        &self.form_id
    }

    /// Stops the browser from navigating away with the form's data.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

#[async_trait::async_trait]
pub trait SubmitListener: Send + Sync {
    async fn on_submit(&self, event: &mut SubmitEvent) -> Outcome;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Default)]
struct Listeners {
    next_id: u64,
    by_form: HashMap<String, Vec<(SubscriptionId, Arc<dyn SubmitListener>)>>,
}

/// Routes submit events to the listeners registered for the target form.
#[derive(Clone, Default)]
pub struct EventRegistry {
    listeners: Arc<Mutex<Listeners>>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(
        &self,
        form_id: impl Into<String>,
        listener: Arc<dyn SubmitListener>,
    ) -> SubscriptionId {
        let mut listeners = lock(&self.listeners);
        let id = SubscriptionId(listeners.next_id);
        listeners.next_id += 1;
        listeners
            .by_form
            .entry(form_id.into())
            .or_default()
            .push((id, listener));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = lock(&self.listeners);
        let mut removed = false;
        for entries in listeners.by_form.values_mut() {
            let before = entries.len();
            entries.retain(|(entry_id, _)| *entry_id != id);
            removed |= entries.len() != before;
        }
        listeners.by_form.retain(|_, entries| !entries.is_empty());
        removed
    }

    pub fn listener_count(&self, form_id: &str) -> usize {
        lock(&self.listeners)
            .by_form
            .get(form_id)
            .map_or(0, Vec::len)
    }

    /// Delivers `event` to every listener of its form, in subscription order,
    /// and returns the last outcome. `None` when nobody listens.
    pub async fn dispatch(&self, event: &mut SubmitEvent) -> Option<Outcome> {
        let targets: Vec<Arc<dyn SubmitListener>> = lock(&self.listeners)
            .by_form
            .get(event.form_id())
            .map(|entries| entries.iter().map(|(_, l)| Arc::clone(l)).collect())
            .unwrap_or_default();

        let mut outcome = None;
        for listener in targets {
            outcome = Some(listener.on_submit(event).await);
        }
        outcome
    }
}

impl std::fmt::Debug for EventRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let listeners = lock(&self.listeners);
        f.debug_struct("EventRegistry")
            .field("forms", &listeners.by_form.keys().collect::<Vec<_>>())
            .finish()
    }
}
