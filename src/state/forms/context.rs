//! Per-field binding
//!
//! A [`Binding`] is a mutable view of one named slot in a
//! [`FormState`](super::FormState): the current value plus a way to write a
//! replacement back. Field bodies and key handling go through bindings and
//! never touch the value map directly, which keeps field code independent
//! of where the state actually lives.

use super::field::FieldValue;
use super::form_state::FormState;

pub struct Binding<'a> {
    name: &'a str,
    state: &'a mut FormState,
}

impl<'a> Binding<'a> {
    pub fn new(name: &'a str, state: &'a mut FormState) -> Self {
        Self { name, state }
    }

    pub fn name(&self) -> &str {
        self.name
    }

    pub fn value(&self) -> Option<&FieldValue> {
        self.state.value(self.name)
    }

    pub fn value_mut(&mut self) -> Option<&mut FieldValue> {
        self.state.value_mut(self.name)
    }

    /// Replace the bound value outright
    pub fn set(&mut self, value: FieldValue) {
        self.state.set_value(self.name, value);
    }

    pub fn push_char(&mut self, c: char) {
        if let Some(value) = self.state.value_mut(self.name) {
            value.push_char(c);
        }
    }

    pub fn pop_char(&mut self) {
        if let Some(value) = self.state.value_mut(self.name) {
            value.pop_char();
        }
    }

    /// Error recorded for this field by the last validation pass
    pub fn error(&self) -> Option<&str> {
        self.state.error(self.name)
    }
}
