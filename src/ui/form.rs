use crate::domain::validation::{INVALID_EMAIL_MESSAGE, REQUIRED_FIELD_MESSAGE};
use crate::domain::{
    EMAIL_FIELD, FormSnapshot, ValidationErrors, is_required_field_filled, is_valid_email,
};
use crate::notifications::BannerContainer;
use crate::ui::{Modal, SentIndicator, SubmitButton, lock};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// An `<input>` or `<textarea>` inside a form.
#[derive(Clone, Debug, Default)]
pub struct FieldElement {
    name: Option<String>,
    id: Option<String>,
    input_type: String,
    required: bool,
    value: String,
    error: Option<&'static str>,
}

impl FieldElement {
    pub fn new() -> Self {
        Self {
            input_type: "text".to_string(),
            ..Self::default()
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn input_type(mut self, input_type: impl Into<String>) -> Self {
        self.input_type = input_type.into();
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    fn is_email(&self) -> bool {
        self.input_type.eq_ignore_ascii_case("email")
    }

    /// The key validation errors for this field are reported under.
    fn key(&self, index: usize) -> String {
        self.name
            .clone()
            .or_else(|| self.id.clone())
            .unwrap_or_else(|| format!("field-{}", index))
    }
}

#[derive(Debug)]
struct FormInner {
    id: String,
    attributes: HashMap<String, String>,
    fields: Mutex<Vec<FieldElement>>,
    submit_button: SubmitButton,
    banner_container: BannerContainer,
    sent_indicator: Option<SentIndicator>,
    modal: Option<Modal>,
}

/// A `<form>` together with the affordances that report on its submissions.
#[derive(Clone, Debug)]
pub struct FormElement {
    inner: Arc<FormInner>,
}

pub struct FormElementBuilder {
    id: String,
    attributes: HashMap<String, String>,
    fields: Vec<FieldElement>,
    submit_label: String,
    sent_indicator: Option<SentIndicator>,
    modal: Option<Modal>,
}

impl FormElementBuilder {
    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn field(mut self, field: FieldElement) -> Self {
        self.fields.push(field);
        self
    }

    pub fn submit_label(mut self, label: impl Into<String>) -> Self {
        self.submit_label = label.into();
        self
    }

    pub fn sent_indicator(mut self, indicator: SentIndicator) -> Self {
        self.sent_indicator = Some(indicator);
        self
    }

    /// Marks the form as displayed inside `modal`.
    pub fn within_modal(mut self, modal: Modal) -> Self {
        self.modal = Some(modal);
        self
    }

    pub fn build(self) -> FormElement {
        FormElement {
            inner: Arc::new(FormInner {
                id: self.id,
                attributes: self.attributes,
                fields: Mutex::new(self.fields),
                submit_button: SubmitButton::new(self.submit_label),
                banner_container: BannerContainer::default(),
                sent_indicator: self.sent_indicator,
                modal: self.modal,
            }),
        }
    }
}

impl FormElement {
    pub fn builder(id: impl Into<String>) -> FormElementBuilder {
        FormElementBuilder {
            id: id.into(),
            attributes: HashMap::new(),
            fields: Vec::new(),
            submit_label: "Submit".to_string(),
            sent_indicator: None,
            modal: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.inner.id
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.inner.attributes.get(name).map(String::as_str)
    }

    pub fn submit_button(&self) -> &SubmitButton {
        &self.inner.submit_button
    }

    pub fn banner_container(&self) -> &BannerContainer {
        &self.inner.banner_container
    }

    pub fn sent_indicator(&self) -> Option<&SentIndicator> {
        self.inner.sent_indicator.as_ref()
    }

    pub fn modal(&self) -> Option<&Modal> {
        self.inner.modal.as_ref()
    }

    /// Simulates the user typing into the field resolved by `key`.
    pub fn set_value(&self, key: &str, value: impl Into<String>) -> bool {
        let mut fields = lock(&self.inner.fields);
        match resolve(&fields, key) {
            Some(index) => {
                fields[index].value = value.into();
                true
            }
            None => false,
        }
    }

    pub fn value(&self, key: &str) -> Option<String> {
        let fields = lock(&self.inner.fields);
        resolve(&fields, key).map(|index| fields[index].value.clone())
    }

    pub fn field_error(&self, key: &str) -> Option<&'static str> {
        let fields = lock(&self.inner.fields);
        resolve(&fields, key).and_then(|index| fields[index].error)
    }

    /// Reads the current value of every requested key in one pass.
    /// Keys without a matching field are left out of the snapshot.
    pub fn snapshot(&self, keys: &[&str]) -> FormSnapshot {
        let fields = lock(&self.inner.fields);
        let mut snapshot = FormSnapshot::default();
        for key in keys {
            if let Some(index) = resolve(&fields, key) {
                snapshot.insert(*key, fields[index].value.clone());
            }
        }
        snapshot
    }

    /// Checks the markup-level rules: every required field must be filled and
    /// every non-blank email input must look like an address.
    pub fn validate_inputs(&self) -> ValidationErrors {
        let fields = lock(&self.inner.fields);
        let mut errors = ValidationErrors::default();
        for (index, field) in fields.iter().enumerate() {
            let filled = is_required_field_filled(&field.value);
            if field.required && !filled {
                errors.push(field.key(index), REQUIRED_FIELD_MESSAGE);
            } else if field.is_email() && filled && !is_valid_email(&field.value) {
                errors.push(field.key(index), INVALID_EMAIL_MESSAGE);
            }
        }
        errors
    }

    /// Replaces the inline errors shown next to the fields with `errors`.
    pub fn apply_field_errors(&self, errors: &ValidationErrors) {
        let mut fields = lock(&self.inner.fields);
        for field in fields.iter_mut() {
            field.error = None;
        }
        for error in errors.iter() {
            if let Some(index) = resolve(&fields, &error.field) {
                fields[index].error = Some(error.message);
            }
        }
    }

    /// Clears every value and inline error, like `HTMLFormElement.reset()`
    /// on a form rendered without default values.
    pub fn reset(&self) {
        let mut fields = lock(&self.inner.fields);
        for field in fields.iter_mut() {
            field.value.clear();
            field.error = None;
        }
    }
}

/// `name` attribute first, then element id. The `email` key also accepts the
/// first `type="email"` input.
fn resolve(fields: &[FieldElement], key: &str) -> Option<usize> {
    fields
        .iter()
        .position(|f| f.name.as_deref() == Some(key))
        .or_else(|| fields.iter().position(|f| f.id.as_deref() == Some(key)))
        .or_else(|| {
            (key == EMAIL_FIELD)
                .then(|| fields.iter().position(FieldElement::is_email))
                .flatten()
        })
        .or_else(|| {
            key.strip_prefix("field-")
                .and_then(|i| i.parse::<usize>().ok())
                .filter(|i| *i < fields.len())
        })
}
