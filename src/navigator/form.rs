use crate::navigator::counter::{CharCounter, CounterReading};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    TextArea,
    Url,
    Hidden,
    Checkbox,
}

#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub kind: FieldKind,
    pub value: String,
    pub checked: bool,
    pub disabled: bool,
    pub max_chars: Option<usize>,
}

impl Field {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            value: String::new(),
            checked: false,
            disabled: false,
            max_chars: None,
        }
    }

    pub fn hidden(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Hidden).with_value(value)
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = Some(max_chars);
        self
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn counter(&self) -> Option<CounterReading> {
        self.max_chars
            .map(|max| CharCounter::new(max).read(&self.value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    Default,
    Waiting,
}

/// The submit control. `Waiting` shows `wait_text` and blocks resubmission;
/// going back to `Default` restores whatever label was showing before.
#[derive(Debug, Clone)]
pub struct SubmitButton {
    state: ButtonState,
    label: String,
    text: String,
    wait_text: String,
}

impl SubmitButton {
    pub fn new(text: impl Into<String>, wait_text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            state: ButtonState::Default,
            label: text.clone(),
            text,
            wait_text: wait_text.into(),
        }
    }

    pub fn state(&self) -> ButtonState {
        self.state
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_enabled(&self) -> bool {
        self.state == ButtonState::Default
    }

    pub fn set_state(&mut self, state: ButtonState) {
        if self.state == state {
            return;
        }
        match state {
            ButtonState::Waiting => {
                self.text = std::mem::replace(&mut self.label, self.wait_text.clone());
            }
            ButtonState::Default => {
                self.label = self.text.clone();
            }
        }
        self.state = state;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorAnchor {
    /// A registered error target.
    Target(String),
    /// Directly after the named field.
    Field(String),
    /// Next to the submit control.
    FormWide,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorList {
    pub anchor: ErrorAnchor,
    pub messages: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct EnableBinding {
    checkbox: String,
    target: String,
}

#[derive(Debug, Clone)]
pub struct Form {
    pub action: String,
    fields: Vec<Field>,
    button: SubmitButton,
    errors: Vec<ErrorList>,
    bindings: Vec<EnableBinding>,
}

impl Form {
    pub fn new(action: impl Into<String>, button: SubmitButton) -> Self {
        Self {
            action: action.into(),
            fields: Vec::new(),
            button,
            errors: Vec::new(),
            bindings: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Keeps `target` disabled while `checkbox` is unchecked.
    pub fn with_enable_binding(mut self, checkbox: &str, target: &str) -> Self {
        self.bindings.push(EnableBinding {
            checkbox: checkbox.to_string(),
            target: target.to_string(),
        });
        self.apply_bindings();
        self
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    pub fn set_value(&mut self, name: &str, value: impl Into<String>) -> bool {
        match self.fields.iter_mut().find(|field| field.name == name) {
            Some(field) => {
                field.value = value.into();
                true
            }
            None => false,
        }
    }

    pub fn set_checked(&mut self, name: &str, checked: bool) -> bool {
        let found = match self.fields.iter_mut().find(|field| field.name == name) {
            Some(field) => {
                field.checked = checked;
                true
            }
            None => false,
        };
        self.apply_bindings();
        found
    }

    fn apply_bindings(&mut self) {
        let states: Vec<(String, bool)> = self
            .bindings
            .iter()
            .map(|binding| {
                let checked = self
                    .field(&binding.checkbox)
                    .map(|field| field.checked)
                    .unwrap_or(false);
                (binding.target.clone(), !checked)
            })
            .collect();
        for (target, disabled) in states {
            if let Some(field) = self.fields.iter_mut().find(|field| field.name == target) {
                field.disabled = disabled;
            }
        }
    }

    pub fn button(&self) -> &SubmitButton {
        &self.button
    }

    pub fn button_mut(&mut self) -> &mut SubmitButton {
        &mut self.button
    }

    /// Form-encoded pairs in field order. Disabled fields and unchecked
    /// checkboxes are not sent.
    pub fn serialize(&self) -> Vec<(String, String)> {
        self.fields
            .iter()
            .filter(|field| !field.disabled)
            .filter_map(|field| match field.kind {
                FieldKind::Checkbox if !field.checked => None,
                FieldKind::Checkbox => Some((field.name.clone(), "on".to_string())),
                _ => Some((field.name.clone(), field.value.clone())),
            })
            .collect()
    }

    pub fn clear_inputs(&mut self) {
        for field in self.fields.iter_mut() {
            match field.kind {
                FieldKind::Hidden => {}
                FieldKind::Checkbox => field.checked = false,
                _ => field.value.clear(),
            }
        }
        self.apply_bindings();
    }

    pub fn errors(&self) -> &[ErrorList] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }

    pub fn attach_errors(&mut self, anchor: ErrorAnchor, messages: Vec<String>) {
        self.errors.push(ErrorList { anchor, messages });
    }
}

pub const FORM_WIDE_KEY: &str = "__all__";

/// Field name (or `__all__`) to its messages, in display order.
pub type ErrorMap = BTreeMap<String, Vec<String>>;

/// Field name to error-target anchor, handed to the navigator up front.
#[derive(Debug, Clone, Default)]
pub struct ErrorTargets {
    targets: HashMap<String, String>,
}

impl ErrorTargets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: impl Into<String>, target: impl Into<String>) -> Self {
        self.targets.insert(field.into(), target.into());
        self
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.targets.get(field).map(String::as_str)
    }

    /// Where the error list for `key` goes on `form`.
    pub fn anchor_for(&self, form: &Form, key: &str) -> ErrorAnchor {
        if let Some(target) = self.get(key) {
            return ErrorAnchor::Target(target.to_string());
        }
        if key != FORM_WIDE_KEY && form.has_field(key) {
            return ErrorAnchor::Field(key.to_string());
        }
        ErrorAnchor::FormWide
    }
}
