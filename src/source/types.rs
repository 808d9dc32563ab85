//! Type names of properties

use crate::model::{short_name, Property, PropertyKind};

/// Source spelling of a property's type
pub fn type_name(property: &Property) -> String {
    match &property.kind {
        PropertyKind::Byte {
            enum_type: Some(enum_name),
        } => short_name(enum_name).to_string(),
        PropertyKind::Byte { enum_type: None } => "byte".to_string(),
        PropertyKind::Int => "int".to_string(),
        PropertyKind::Bool => "bool".to_string(),
        PropertyKind::Float => "float".to_string(),
        PropertyKind::Name => "name".to_string(),
        PropertyKind::Str => "string".to_string(),
        PropertyKind::Object { class } => short_name(class).to_string(),
        PropertyKind::Class { meta_class } => format!("class<{}>", short_name(meta_class)),
        PropertyKind::Array { inner } => format!("array<{}>", type_name(inner)),
        PropertyKind::Struct { struct_name } => short_name(struct_name).to_string(),
        PropertyKind::Delegate { function } => format!("delegate<{}>", short_name(function)),
    }
}

/// Enum a byte property is typed with, if any
pub fn enum_type(property: &Property) -> Option<&str> {
    match &property.kind {
        PropertyKind::Byte {
            enum_type: Some(enum_name),
        } => Some(short_name(enum_name)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_names() {
        let rotator = Property::new(
            "R",
            PropertyKind::Struct {
                struct_name: "Core.Object.Rotator".into(),
            },
        );
        assert_eq!(type_name(&rotator), "Rotator");

        let pawns = Property::new(
            "Pawns",
            PropertyKind::Array {
                inner: Box::new(Property::new(
                    "Pawns",
                    PropertyKind::Object {
                        class: "Engine.Pawn".into(),
                    },
                )),
            },
        );
        assert_eq!(type_name(&pawns), "array<Pawn>");

        let meta = Property::new(
            "Kind",
            PropertyKind::Class {
                meta_class: "Engine.Weapon".into(),
            },
        );
        assert_eq!(type_name(&meta), "class<Weapon>");
    }

    #[test]
    fn test_array_of_enum_uses_enum_name() {
        let modes = Property::new(
            "Modes",
            PropertyKind::Array {
                inner: Box::new(Property::new(
                    "Modes",
                    PropertyKind::Byte {
                        enum_type: Some("EMode".into()),
                    },
                )),
            },
        );
        assert_eq!(type_name(&modes), "array<EMode>");
    }
}
