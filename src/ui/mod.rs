//! Headless model of the page elements the form coordinators drive.
//!
//! A thin adapter mirrors these into the real document; everything here is
//! plain shared state so coordinators can be exercised without a browser.

mod controls;
mod form;
mod modal;
mod page;

pub use controls::{BusyGuard, SentIndicator, SubmitButton};
pub use form::{FieldElement, FormElement, FormElementBuilder};
pub use modal::Modal;
pub use page::{FORM_MARKER_ATTRIBUTE, Page};

use std::sync::{Mutex, MutexGuard, PoisonError};

/// UI state stays usable even if a holder panicked mid-update.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
