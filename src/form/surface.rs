//! The UI a form renders to.
use std::collections::BTreeMap;

use strum_macros::AsRefStr;

use super::FormSpec;

/// Style of the message surface.
/// The serialized name is the CSS class a web front end would apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
pub enum MessageStyle {
    #[strum(serialize = "success-message")]
    Success,
    #[strum(serialize = "error-message")]
    Error,
}

/// Input fields, a message display and a submit control.
pub trait FormSurface {
    /// Current raw value of `field`, empty if the field does not exist.
    fn field_value(&self, field: &str) -> String;
    fn clear_field(&mut self, field: &str);

    fn set_message(&mut self, text: &str, style: MessageStyle);

    fn submit_enabled(&self) -> bool;
    fn set_submit_enabled(&mut self, enabled: bool);
    fn submit_label(&self) -> String;
    fn set_submit_label(&mut self, label: &str);
}

/// Every mutation the controller made, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    FieldCleared(String),
    Message { text: String, style: MessageStyle },
    SubmitEnabled(bool),
    SubmitLabel(String),
}

/// In-memory `FormSurface`.
/// Keeps a journal of the mutations so the order of UI changes can be inspected.
#[derive(Debug, Clone)]
pub struct MemorySurface {
    fields: BTreeMap<String, String>,
    message: Option<(String, MessageStyle)>,
    submit_enabled: bool,
    submit_label: String,
    journal: Vec<SurfaceEvent>,
}

impl MemorySurface {
    /// Empty fields for everything `spec` declares, an enabled submit control with the idle label.
    pub fn for_form(spec: &FormSpec) -> Self {
        MemorySurface {
            fields: spec
                .fields
                .iter()
                .map(|field| (field.name.to_string(), String::new()))
                .collect(),
            message: None,
            submit_enabled: true,
            submit_label: spec.idle_label.clone(),
            journal: Vec::new(),
        }
    }

    pub fn with_value(mut self, field: &str, value: &str) -> Self {
        self.set_value(field, value);
        self
    }

    /// User input, not journaled.
    pub fn set_value(&mut self, field: &str, value: &str) {
        self.fields.insert(field.to_string(), value.to_string());
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_ref().map(|(text, _)| text.as_str())
    }

    pub fn message_style(&self) -> Option<MessageStyle> {
        self.message.as_ref().map(|(_, style)| *style)
    }

    pub fn journal(&self) -> &[SurfaceEvent] {
        &self.journal
    }

    pub fn take_journal(&mut self) -> Vec<SurfaceEvent> {
        std::mem::take(&mut self.journal)
    }
}

impl FormSurface for MemorySurface {
    fn field_value(&self, field: &str) -> String {
        self.fields.get(field).cloned().unwrap_or_default()
    }

    fn clear_field(&mut self, field: &str) {
        if let Some(value) = self.fields.get_mut(field) {
            value.clear();
        }
        self.journal.push(SurfaceEvent::FieldCleared(field.to_string()));
    }

    fn set_message(&mut self, text: &str, style: MessageStyle) {
        self.message = Some((text.to_string(), style));
        self.journal.push(SurfaceEvent::Message {
            text: text.to_string(),
            style,
        });
    }

    fn submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        self.submit_enabled = enabled;
        self.journal.push(SurfaceEvent::SubmitEnabled(enabled));
    }

    fn submit_label(&self) -> String {
        self.submit_label.clone()
    }

    fn set_submit_label(&mut self, label: &str) {
        self.submit_label = label.to_string();
        self.journal.push(SurfaceEvent::SubmitLabel(label.to_string()));
    }
}
