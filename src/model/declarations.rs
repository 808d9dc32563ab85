//! Declaration entities of a compiled class

use super::flags::{FunctionFlags, ObjectFlags, PropertyFlags};
use super::token::Instruction;
use super::value::DefaultProperty;
use serde::{Deserialize, Serialize};

/// Compiled class: declarations plus its default property block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassDef {
    pub name: String,
    #[serde(default)]
    pub super_name: Option<String>,
    #[serde(default)]
    pub children: Vec<Field>,
    #[serde(default)]
    pub defaults: Vec<DefaultProperty>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructDef {
    pub name: String,
    #[serde(default)]
    pub super_name: Option<String>,
    #[serde(default)]
    pub children: Vec<Field>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateDef {
    pub name: String,
    #[serde(default)]
    pub super_name: Option<String>,
    #[serde(default)]
    pub children: Vec<Field>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnumDef {
    pub name: String,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConstDef {
    pub name: String,
    /// Literal exactly as stored in the package
    pub value: String,
}

/// A function or operator with its parameters, locals and bytecode
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionDef {
    pub name: String,
    #[serde(default)]
    pub flags: FunctionFlags,
    #[serde(default)]
    pub native_index: u16,
    #[serde(default)]
    pub operator_precedence: u8,
    /// Parameters, return value and locals in declaration order; the
    /// `PARM`/`RETURN_PARM` flags tell them apart
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub bytecode: Vec<Instruction>,
}

impl FunctionDef {
    pub fn return_property(&self) -> Option<&Property> {
        self.properties
            .iter()
            .find(|p| p.flags.contains(PropertyFlags::RETURN_PARM))
    }

    pub fn parameters(&self) -> impl Iterator<Item = &Property> {
        self.properties.iter().filter(|p| {
            p.flags.contains(PropertyFlags::PARM) && !p.flags.contains(PropertyFlags::RETURN_PARM)
        })
    }

    pub fn locals(&self) -> impl Iterator<Item = &Property> {
        self.properties
            .iter()
            .filter(|p| !p.flags.contains(PropertyFlags::PARM))
    }

    /// True when the compiled body is nothing but `return;` (or absent)
    pub fn has_empty_body(&self) -> bool {
        match self.bytecode.as_slice() {
            [] => true,
            [only] => only.token.is_empty_return(),
            _ => false,
        }
    }
}

/// Typed member variable, parameter or local
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    pub kind: PropertyKind,
    #[serde(default)]
    pub flags: PropertyFlags,
    #[serde(default)]
    pub object_flags: ObjectFlags,
    #[serde(default = "single_slot")]
    pub array_dim: u32,
    #[serde(default)]
    pub category: Option<String>,
}

fn single_slot() -> u32 {
    1
}

impl Property {
    pub fn new(name: impl Into<String>, kind: PropertyKind) -> Self {
        Self {
            name: name.into(),
            kind,
            flags: PropertyFlags::empty(),
            object_flags: ObjectFlags::empty(),
            array_dim: 1,
            category: None,
        }
    }

    pub fn with_flags(mut self, flags: PropertyFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_array_dim(mut self, array_dim: u32) -> Self {
        self.array_dim = array_dim;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// Closed set of property kinds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyKind {
    Byte {
        #[serde(default)]
        enum_type: Option<String>,
    },
    Int,
    Bool,
    Float,
    Name,
    Str,
    Object {
        class: String,
    },
    Class {
        meta_class: String,
    },
    Array {
        inner: Box<Property>,
    },
    Struct {
        struct_name: String,
    },
    Delegate {
        function: String,
    },
}

impl PropertyKind {
    pub fn label(&self) -> &'static str {
        match self {
            PropertyKind::Byte { .. } => "byte",
            PropertyKind::Int => "int",
            PropertyKind::Bool => "bool",
            PropertyKind::Float => "float",
            PropertyKind::Name => "name",
            PropertyKind::Str => "string",
            PropertyKind::Object { .. } => "object",
            PropertyKind::Class { .. } => "class",
            PropertyKind::Array { .. } => "array",
            PropertyKind::Struct { .. } => "struct",
            PropertyKind::Delegate { .. } => "delegate",
        }
    }
}

/// Child of a class, struct or state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Field {
    Const(ConstDef),
    Enum(EnumDef),
    Struct(StructDef),
    Property(Property),
    Function(FunctionDef),
    State(StateDef),
}

impl Field {
    /// Canonical emission rank inside a container
    pub fn order(&self) -> u8 {
        match self {
            Field::Const(_) => 0,
            Field::Enum(_) => 1,
            Field::Struct(_) => 2,
            Field::Property(_) => 3,
            Field::Function(_) => 4,
            Field::State(_) => 5,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Field::Const(c) => &c.name,
            Field::Enum(e) => &e.name,
            Field::Struct(s) => &s.name,
            Field::Property(p) => &p.name,
            Field::Function(f) => &f.name,
            Field::State(s) => &s.name,
        }
    }
}
