//! Map-backed entity for types known only at runtime.

use std::collections::BTreeMap;

use crate::entity::Entity;
use crate::error::TypeError;
use crate::value::FieldValue;

/// An entity whose slots are declared at construction time.
///
/// Every declared slot starts out [`FieldValue::Null`]. There are no
/// mutators, so hydration always writes slots directly.
#[derive(Clone, Debug, PartialEq)]
pub struct DynamicEntity {
    type_name: String,
    slots: BTreeMap<String, FieldValue>,
}

impl DynamicEntity {
    pub fn new<I, S>(type_name: impl Into<String>, slots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            type_name: type_name.into(),
            slots: slots
                .into_iter()
                .map(|name| (name.into(), FieldValue::Null))
                .collect(),
        }
    }

    /// Borrow a slot value.
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.slots.get(field)
    }

    /// Declared slot names in lexical order.
    pub fn slot_names(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(String::as_str)
    }

    pub fn slots(&self) -> &BTreeMap<String, FieldValue> {
        &self.slots
    }
}

impl Entity for DynamicEntity {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn write_slot(&mut self, field: &str, value: FieldValue) -> Result<(), TypeError> {
        match self.slots.get_mut(field) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(TypeError::MissingMember(field.to_string())),
        }
    }

    fn read_slot(&self, field: &str) -> Option<FieldValue> {
        self.slots.get(field).cloned()
    }
}
