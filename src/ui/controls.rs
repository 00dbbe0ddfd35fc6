use crate::ui::lock;
use std::sync::{Arc, Mutex};

#[derive(Debug)]
struct ButtonState {
    label: String,
    disabled: bool,
}

#[derive(Clone, Debug)]
pub struct SubmitButton {
    state: Arc<Mutex<ButtonState>>,
}

impl SubmitButton {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            state: Arc::new(Mutex::new(ButtonState {
                label: label.into(),
                disabled: false,
            })),
        }
    }

    pub fn label(&self) -> String {
        lock(&self.state).label.clone()
    }

    pub fn is_disabled(&self) -> bool {
        lock(&self.state).disabled
    }

    /// Disables the button and swaps in `busy_label` until the returned guard
    /// is dropped. Returns `None` if the button is already disabled.
    pub fn acquire_busy(&self, busy_label: &str) -> Option<BusyGuard> {
        let mut state = lock(&self.state);
        if state.disabled {
            return None;
        }
        let original_label = std::mem::replace(&mut state.label, busy_label.to_string());
        state.disabled = true;
        Some(BusyGuard {
            button: self.clone(),
            original_label,
        })
    }
}

/// Holds a [`SubmitButton`] in its busy state.
#[must_use = "the button is restored as soon as the guard is dropped"]
#[derive(Debug)]
pub struct BusyGuard {
    button: SubmitButton,
    original_label: String,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        let mut state = lock(&self.button.state);
        state.label = std::mem::take(&mut self.original_label);
        state.disabled = false;
    }
}

#[derive(Debug, Default)]
struct IndicatorState {
    visible: bool,
    generation: u64,
}

/// The "message sent" marker revealed next to the contact form.
#[derive(Clone, Debug, Default)]
pub struct SentIndicator {
    state: Arc<Mutex<IndicatorState>>,
}

impl SentIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reveals the indicator and returns the generation of this reveal.
    pub fn show(&self) -> u64 {
        let mut state = lock(&self.state);
        state.generation += 1;
        state.visible = true;
        state.generation
    }

    /// Hides the indicator unless it was shown again after `generation`.
    pub fn hide_if_current(&self, generation: u64) -> bool {
        let mut state = lock(&self.state);
        if state.generation != generation {
            return false;
        }
        state.visible = false;
        true
    }

    pub fn is_visible(&self) -> bool {
        lock(&self.state).visible
    }
}
