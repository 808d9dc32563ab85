//! Declaration emitter
//!
//! Renders classes, structs, states, enums, consts and properties to
//! source text. Children of a container are written in a fixed order
//! (consts, enums, structs, properties, functions, states) whatever order
//! the package stored them in. Function declarations live in [`function`].

pub mod function;
pub mod modifiers;
pub mod types;

use crate::decompiler::DecompileContext;
use crate::defaults::PropertyFormatter;
use crate::model::{ClassDef, ConstDef, EnumDef, Field, Property, PropertyKind, StateDef, StructDef};
use crate::DecompilerResult;

/// Kind of declaration that owns a field list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    Class,
    Struct,
    State,
}

/// A field list together with its owner
#[derive(Debug, Clone, Copy)]
pub struct Container<'c> {
    pub kind: ContainerKind,
    pub name: &'c str,
    pub children: &'c [Field],
}

impl<'c> Container<'c> {
    /// Enum declared directly in a plain struct
    fn nested_enum(&self, name: &str) -> Option<&'c EnumDef> {
        if self.kind != ContainerKind::Struct {
            return None;
        }
        self.children.iter().find_map(|field| match field {
            Field::Enum(e) if e.name.eq_ignore_ascii_case(name) => Some(e),
            _ => None,
        })
    }

    /// First property of a plain struct typed directly with `enum_name`;
    /// it carries the enum body inline. Enums reached only through arrays
    /// have no owner and are declared on their own.
    fn inline_owner(&self, enum_name: &str) -> Option<&'c Property> {
        if self.kind != ContainerKind::Struct {
            return None;
        }
        self.children.iter().find_map(|field| match field {
            Field::Property(property)
                if types::enum_type(property).is_some_and(|e| e.eq_ignore_ascii_case(enum_name)) =>
            {
                Some(property)
            }
            _ => None,
        })
    }
}

/// Writes declarations for one decompile call
pub struct SourceEmitter<'a> {
    ctx: &'a DecompileContext<'a>,
}

impl<'a> SourceEmitter<'a> {
    pub fn new(ctx: &'a DecompileContext<'a>) -> Self {
        Self { ctx }
    }

    /// Full class text: header, fields, default properties
    pub fn class(&self, class: &ClassDef, indent: usize) -> DecompilerResult<String> {
        let mut out = format!("class {}", class.name);
        if let Some(super_name) = &class.super_name {
            out.push_str(" extends ");
            out.push_str(super_name);
        }
        out.push(';');

        if !class.children.is_empty() {
            out.push_str(&self.ctx.new_line(0));
            let container = Container {
                kind: ContainerKind::Class,
                name: &class.name,
                children: &class.children,
            };
            self.write_fields(&mut out, container, indent)?;
        }

        if !class.defaults.is_empty() {
            out.push_str(&self.ctx.new_line(0));
            out.push_str(&self.ctx.new_line(indent));
            out.push_str("defaultproperties{");
            out.push_str(&self.ctx.new_line(indent + 1));
            out.push_str(&PropertyFormatter::new(self.ctx).properties(&class.defaults, indent + 1)?);
            out.push_str(&self.ctx.new_line(indent));
            out.push('}');
        }

        Ok(out)
    }

    /// Each child on its own line at `indent`, in canonical order
    pub fn write_fields(
        &self,
        out: &mut String,
        container: Container<'_>,
        indent: usize,
    ) -> DecompilerResult<()> {
        let mut children: Vec<&Field> = container.children.iter().collect();
        children.sort_by_key(|field| field.order());

        for field in children {
            let text = match field {
                Field::Const(constant) => self.constant(constant) + ";",
                Field::Enum(definition) if container.inline_owner(&definition.name).is_some() => continue,
                Field::Enum(definition) => self.enumeration(definition, indent) + ";",
                Field::Struct(definition) => self.structure(definition, indent)? + ";",
                Field::Property(Property {
                    kind: PropertyKind::Delegate { .. },
                    ..
                }) => continue,
                Field::Property(property) => self.property(property, container, indent) + ";",
                Field::Function(function) => self.function(function, indent)?,
                Field::State(state) => self.state(state, indent)?,
            };
            out.push_str(&self.ctx.new_line(indent));
            out.push_str(&text);
        }
        Ok(())
    }

    pub fn constant(&self, constant: &ConstDef) -> String {
        format!("const {} = {}", constant.name, constant.value)
    }

    pub fn enumeration(&self, definition: &EnumDef, indent: usize) -> String {
        let separator = format!(",{}", self.ctx.new_line(indent + 1));
        format!(
            "enum {}{}{{{}{}{}}}",
            definition.name,
            self.ctx.new_line(indent),
            self.ctx.new_line(indent + 1),
            definition.values.join(&separator),
            self.ctx.new_line(indent)
        )
    }

    pub fn structure(&self, definition: &StructDef, indent: usize) -> DecompilerResult<String> {
        let mut out = format!("struct {}", definition.name);
        if let Some(super_name) = &definition.super_name {
            out.push_str(" extends ");
            out.push_str(super_name);
        }
        out.push_str(&self.ctx.new_line(indent));
        out.push('{');
        let container = Container {
            kind: ContainerKind::Struct,
            name: &definition.name,
            children: &definition.children,
        };
        self.write_fields(&mut out, container, indent + 1)?;
        out.push_str(&self.ctx.new_line(indent));
        out.push('}');
        Ok(out)
    }

    pub fn state(&self, state: &StateDef, indent: usize) -> DecompilerResult<String> {
        log::debug!("Emitting state {}", state.name);
        let mut out = format!("state {}", state.name);
        if let Some(super_name) = &state.super_name {
            out.push_str(" extends ");
            out.push_str(super_name);
        }
        out.push_str(&self.ctx.new_line(indent));
        out.push('{');
        let container = Container {
            kind: ContainerKind::State,
            name: &state.name,
            children: &state.children,
        };
        self.write_fields(&mut out, container, indent + 1)?;
        out.push_str(&self.ctx.new_line(indent));
        out.push('}');
        Ok(out)
    }

    /// `var(Category) modifiers Type Name[Dim]`
    pub fn property(&self, property: &Property, container: Container<'_>, indent: usize) -> String {
        let mut out = String::from("var");
        if let Some(category) = modifiers::category(property, container.name) {
            out.push_str(&category);
        }
        out.push(' ');
        for word in modifiers::modifiers(property) {
            out.push_str(word);
            out.push(' ');
        }
        let inline_enum = types::enum_type(property)
            .filter(|name| {
                container
                    .inline_owner(name)
                    .is_some_and(|owner| owner.name == property.name)
            })
            .and_then(|name| container.nested_enum(name));
        match inline_enum {
            Some(definition) => out.push_str(&self.enumeration(definition, indent)),
            None => out.push_str(&types::type_name(property)),
        }
        out.push(' ');
        out.push_str(&property.name);
        if property.array_dim > 1 {
            out.push_str(&format!("[{}]", property.array_dim));
        }
        out
    }
}
