//! Serialized property values (default property blocks, object instances)

use super::declarations::Property;
use super::package::ObjectRef;
use serde::{Deserialize, Serialize};

/// Concrete value of one property slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Byte(u8),
    Int(i32),
    Bool(bool),
    Float(f32),
    Name(String),
    Str(String),
    Object(ObjectRef),
    Array(Vec<Value>),
    Struct(Vec<DefaultProperty>),
}

/// A property together with the values stored for each of its slots
///
/// `slots[i]` is `None` when slot `i` is unset; missing trailing slots are
/// treated the same way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultProperty {
    pub template: Property,
    pub slots: Vec<Option<Value>>,
}

impl DefaultProperty {
    pub fn new(template: Property, value: Value) -> Self {
        Self {
            template,
            slots: vec![Some(value)],
        }
    }

    pub fn with_slots(template: Property, slots: Vec<Option<Value>>) -> Self {
        Self { template, slots }
    }

    pub fn name(&self) -> &str {
        &self.template.name
    }

    pub fn slot(&self, index: usize) -> Option<&Value> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Declared slot count (at least one)
    pub fn slot_count(&self) -> usize {
        self.template.array_dim.max(1) as usize
    }
}
