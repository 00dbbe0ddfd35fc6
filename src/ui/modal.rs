use crate::ui::lock;
use std::sync::{Arc, Mutex};

#[derive(Clone, Debug)]
pub struct Modal {
    id: String,
    open: Arc<Mutex<bool>>,
}

impl Modal {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            open: Arc::new(Mutex::new(false)),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn open(&self) {
        *lock(&self.open) = true;
        tracing::debug!(modal_id = %self.id, "Modal opened");
    }

    pub fn close(&self) {
        *lock(&self.open) = false;
        tracing::debug!(modal_id = %self.id, "Modal closed");
    }

    pub fn is_open(&self) -> bool {
        *lock(&self.open)
    }

    /// Value the adapter mirrors into the `aria-hidden` attribute.
    pub fn aria_hidden(&self) -> &'static str {
        if self.is_open() { "false" } else { "true" }
    }
}
