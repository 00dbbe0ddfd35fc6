use crate::ui::{FormElement, Modal};

/// Attribute whose value tells a contact form from a newsletter form.
pub const FORM_MARKER_ATTRIBUTE: &str = "data-form";

#[derive(Clone, Debug, Default)]
pub struct Page {
    forms: Vec<FormElement>,
    modal: Option<Modal>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_form(mut self, form: FormElement) -> Self {
        self.forms.push(form);
        self
    }

    pub fn with_modal(mut self, modal: Modal) -> Self {
        self.modal = Some(modal);
        self
    }

    pub fn modal(&self) -> Option<&Modal> {
        self.modal.as_ref()
    }

    pub fn form(&self, id: &str) -> Option<&FormElement> {
        self.forms.iter().find(|f| f.id() == id)
    }

    /// Forms carrying the marker attribute, paired with its value.
    pub fn marked_forms(&self) -> impl Iterator<Item = (&FormElement, &str)> {
        self.forms
            .iter()
            .filter_map(|f| f.attribute(FORM_MARKER_ATTRIBUTE).map(|marker| (f, marker)))
    }
}
