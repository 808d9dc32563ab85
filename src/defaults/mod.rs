//! Default property values
//!
//! Renders `name=value` assignment lines for a default property block and
//! the inline literal form used inside structs and arrays. Object values
//! whose property asks for it are exported as a nested block first (see
//! [`t3d`]).

pub mod compact;
pub mod t3d;

use crate::decompiler::DecompileContext;
use crate::error::Error as DecompilerError;
use crate::format::format_float;
use crate::model::{DefaultProperty, Entry, ObjectRef, Property, PropertyFlags, PropertyKind, Value};
use crate::DecompilerResult;

pub use compact::{read_compact_index, CompactIndex};

/// Formats property values for one decompile call
pub struct PropertyFormatter<'a> {
    ctx: &'a DecompileContext<'a>,
}

impl<'a> PropertyFormatter<'a> {
    pub fn new(ctx: &'a DecompileContext<'a>) -> Self {
        Self { ctx }
    }

    /// Assignment lines of a property block, joined with line breaks at
    /// `indent`; inline exports precede the line that references them
    pub fn properties(
        &self,
        properties: &[DefaultProperty],
        indent: usize,
    ) -> DecompilerResult<String> {
        let mut lines = Vec::new();
        for property in properties {
            self.property_lines(property, indent, &mut lines)?;
        }
        Ok(lines.join(&self.ctx.new_line(indent)))
    }

    fn property_lines(
        &self,
        property: &DefaultProperty,
        indent: usize,
        lines: &mut Vec<String>,
    ) -> DecompilerResult<()> {
        let template = &property.template;
        for index in 0..property.slot_count() {
            let name = slot_label(template, index);
            match (property.slot(index), &template.kind) {
                (Some(Value::Array(elements)), PropertyKind::Array { inner }) => {
                    for (position, element) in elements.iter().enumerate() {
                        self.export_if_needed(inner, element, indent, lines)?;
                        lines.push(format!(
                            "{}({})={}",
                            template.name,
                            position,
                            self.inline_value(inner, element)?
                        ));
                    }
                }
                (Some(value), _) => {
                    self.export_if_needed(template, value, indent, lines)?;
                    lines.push(format!("{}={}", name, self.inline_value(template, value)?));
                }
                (None, _) => {
                    if let Some(text) = unset_slot(template)? {
                        lines.push(format!("{}={}", name, text));
                    }
                }
            }
        }
        Ok(())
    }

    /// True when an object value must be exported inline before its
    /// assignment: it lives in this package and its property is flagged
    /// for export or edit-inline notification
    pub fn needs_export(&self, template: &Property, reference: ObjectRef) -> DecompilerResult<bool> {
        let exported = matches!(self.ctx.package().entry(reference)?, Some(Entry::Export(_)));
        Ok(exported
            && (template.flags.contains(PropertyFlags::EXPORT_OBJECT)
                || template.flags.contains(PropertyFlags::EDIT_INLINE_NOTIFY)))
    }

    fn export_if_needed(
        &self,
        template: &Property,
        value: &Value,
        indent: usize,
        lines: &mut Vec<String>,
    ) -> DecompilerResult<()> {
        if let Value::Object(reference) = value {
            if self.needs_export(template, *reference)? {
                lines.push(self.export_object(*reference, indent)?);
            }
        }
        Ok(())
    }

    /// `field=value` pairs of one struct member, comma-joined; `None`
    /// when every slot is unset
    pub fn inline_property(&self, property: &DefaultProperty) -> DecompilerResult<Option<String>> {
        let template = &property.template;
        let mut parts = Vec::new();
        for index in 0..property.slot_count() {
            let text = match property.slot(index) {
                Some(value) => Some(self.inline_value(template, value)?),
                None => unset_slot(template)?,
            };
            if let Some(text) = text {
                parts.push(format!("{}={}", slot_label(template, index), text));
            }
        }
        Ok(if parts.is_empty() {
            None
        } else {
            Some(parts.join(","))
        })
    }

    /// `(a=1,b="x")`
    pub fn inline_struct(&self, fields: &[DefaultProperty]) -> DecompilerResult<String> {
        let mut parts = Vec::new();
        for field in fields {
            if let Some(text) = self.inline_property(field)? {
                parts.push(text);
            }
        }
        Ok(format!("({})", parts.join(",")))
    }

    /// Literal for one value of `template`'s kind
    pub fn inline_value(&self, template: &Property, value: &Value) -> DecompilerResult<String> {
        Ok(match (&template.kind, value) {
            (PropertyKind::Byte { enum_type: Some(enum_name) }, Value::Byte(ordinal)) => {
                self.enum_literal(enum_name, *ordinal)?
            }
            (PropertyKind::Byte { enum_type: None }, Value::Byte(byte)) => byte.to_string(),
            (PropertyKind::Int, Value::Int(int)) => int.to_string(),
            (PropertyKind::Bool, Value::Bool(flag)) => flag.to_string(),
            (PropertyKind::Float, Value::Float(float)) => format_float(*float),
            (PropertyKind::Name, Value::Name(text)) | (PropertyKind::Str, Value::Str(text)) => {
                format!("\"{}\"", text)
            }
            (PropertyKind::Object { .. } | PropertyKind::Class { .. }, Value::Object(reference)) => {
                self.ctx.link_to(*reference)?
            }
            (PropertyKind::Array { inner }, Value::Array(elements)) => {
                let rendered = elements
                    .iter()
                    .map(|element| self.inline_value(inner, element))
                    .collect::<DecompilerResult<Vec<_>>>()?;
                format!("({})", rendered.join(","))
            }
            (PropertyKind::Struct { .. }, Value::Struct(fields)) => self.inline_struct(fields)?,
            (kind, value) => {
                return Err(DecompilerError::structure(format!(
                    "{} property {} cannot hold {:?}",
                    kind.label(),
                    template.name,
                    value
                )))
            }
        })
    }

    fn enum_literal(&self, enum_name: &str, ordinal: u8) -> DecompilerResult<String> {
        let definition = self.ctx.package().find_enum(enum_name)?;
        definition
            .values
            .get(usize::from(ordinal))
            .cloned()
            .ok_or_else(|| DecompilerError::EnumOrdinal {
                enum_name: definition.name.clone(),
                ordinal,
                count: definition.values.len(),
            })
    }
}

/// `Name` or `Name(i)` for multi-slot properties
fn slot_label(template: &Property, index: usize) -> String {
    if template.array_dim > 1 {
        format!("{}({})", template.name, index)
    } else {
        template.name.clone()
    }
}

/// Unset struct slots are omitted, unset references are `None`; any other
/// kind must carry a value
fn unset_slot(template: &Property) -> DecompilerResult<Option<String>> {
    match template.kind {
        PropertyKind::Struct { .. } => Ok(None),
        PropertyKind::Object { .. } | PropertyKind::Class { .. } => Ok(Some("None".to_string())),
        ref kind => Err(DecompilerError::structure(format!(
            "{} property {} has an unset slot",
            kind.label(),
            template.name
        ))),
    }
}
