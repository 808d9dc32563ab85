mod common;

use common::*;
use uscript_dec_rs::decompiler::{DecompileOptions, Decompiler};
use uscript_dec_rs::model::*;
use uscript_dec_rs::DecompilerError;

fn render(package: &Package, properties: &[DefaultProperty], options: DecompileOptions) -> String {
    Decompiler::with_options(options)
        .default_properties(package, properties, 1)
        .unwrap()
}

fn weapon_array(flags: PropertyFlags, element: ObjectRef) -> DefaultProperty {
    DefaultProperty::new(
        Property::new(
            "Items",
            PropertyKind::Array {
                inner: Box::new(object_property("Items", "Weapon", flags)),
            },
        ),
        Value::Array(vec![Value::Object(element)]),
    )
}

#[test]
fn test_float_is_six_decimals() {
    let package = game_package();
    let speed = DefaultProperty::new(Property::new("Speed", PropertyKind::Float), Value::Float(3.14159265));
    assert_eq!(render(&package, &[speed], lf_options()), "Speed=3.141593");
}

#[test]
fn test_float_ties_round_half_up() {
    let package = game_package();
    let scale = DefaultProperty::new(Property::new("Scale", PropertyKind::Float), Value::Float(0.0078125));
    assert_eq!(render(&package, &[scale], lf_options()), "Scale=0.007813");
}

fn enum_property(name: &str, enum_type: &str, ordinal: u8) -> DefaultProperty {
    DefaultProperty::new(
        Property::new(
            name,
            PropertyKind::Byte {
                enum_type: Some(enum_type.into()),
            },
        ),
        Value::Byte(ordinal),
    )
}

fn class_declaring(class: &str, enum_name: &str, values: &[&str]) -> ExportEntry {
    export(
        class,
        ObjectRef::NONE,
        Some(ObjectData::Class(ClassDef {
            name: class.into(),
            children: vec![Field::Enum(EnumDef {
                name: enum_name.into(),
                values: values.iter().map(|v| v.to_string()).collect(),
            })],
            ..Default::default()
        })),
    )
}

#[test]
fn test_qualified_enum_picks_its_own_class() {
    let mut package = game_package();
    package
        .exports
        .push(class_declaring("Alpha", "EMode", &["ALPHA_0", "ALPHA_1"]));
    package
        .exports
        .push(class_declaring("Beta", "EMode", &["BETA_0", "BETA_1"]));

    let text = render(
        &package,
        &[
            enum_property("Mode", "MyGame.Beta.EMode", 1),
            enum_property("Fallback", "MyGame.Alpha.EMode", 0),
        ],
        lf_options(),
    );
    assert_eq!(text, "Mode=BETA_1\n\tFallback=ALPHA_0");
}

#[test]
fn test_enum_from_another_package() {
    let mut package = game_package();
    package.enums.insert(
        "Engine.Actor.EPhysics".into(),
        EnumDef {
            name: "EPhysics".into(),
            values: vec!["PHYS_None".into(), "PHYS_Walking".into(), "PHYS_Falling".into()],
        },
    );
    let text = render(
        &package,
        &[enum_property("Physics", "Engine.Actor.EPhysics", 2)],
        lf_options(),
    );
    assert_eq!(text, "Physics=PHYS_Falling");

    let result = Decompiler::new().default_properties(
        &package,
        &[enum_property("DrawType", "Engine.Actor.EDrawType", 0)],
        1,
    );
    assert!(matches!(result, Err(DecompilerError::Lookup { .. })));
}

#[test]
fn test_enum_ordinal_and_bounds() {
    let package = game_package();
    let mode = |ordinal| {
        DefaultProperty::new(
            Property::new(
                "Mode",
                PropertyKind::Byte {
                    enum_type: Some("EMode".into()),
                },
            ),
            Value::Byte(ordinal),
        )
    };

    assert_eq!(render(&package, &[mode(1)], lf_options()), "Mode=MODE_B");

    let result = Decompiler::with_options(lf_options()).default_properties(&package, &[mode(3)], 1);
    match result {
        Err(DecompilerError::EnumOrdinal {
            enum_name,
            ordinal,
            count,
        }) => {
            assert_eq!(enum_name, "EMode");
            assert_eq!(ordinal, 3);
            assert_eq!(count, 3);
        }
        other => panic!("expected enum ordinal error, got {:?}", other),
    }
}

#[test]
fn test_missing_enum_is_lookup_error() {
    let package = game_package();
    let property = DefaultProperty::new(
        Property::new(
            "Team",
            PropertyKind::Byte {
                enum_type: Some("ETeam".into()),
            },
        ),
        Value::Byte(0),
    );
    let result = Decompiler::new().default_properties(&package, &[property], 1);
    assert!(matches!(result, Err(DecompilerError::Lookup { .. })));
}

#[test]
fn test_exported_array_element_is_inlined_before_its_line() {
    let package = game_package();
    let text = render(
        &package,
        &[weapon_array(PropertyFlags::EXPORT_OBJECT, WEAPON_OBJECT)],
        lf_options(),
    );
    assert_eq!(
        text,
        "Begin Actor Class=Weapon Name=Weapon0\n\t\tAmmo=7\n\tEnd Actor\n\tItems(0)=Weapon'MyGame.Weapon0'"
    );
    assert_eq!(text.matches("Begin Actor").count(), 1);
}

#[test]
fn test_edit_inline_notify_also_exports() {
    let package = game_package();
    let text = render(
        &package,
        &[weapon_array(PropertyFlags::EDIT_INLINE_NOTIFY, WEAPON_OBJECT)],
        lf_options(),
    );
    assert!(text.starts_with("Begin Actor Class=Weapon Name=Weapon0"));
}

#[test]
fn test_plain_reference_is_not_exported() {
    let package = game_package();
    let text = render(
        &package,
        &[weapon_array(PropertyFlags::empty(), WEAPON_OBJECT)],
        lf_options(),
    );
    assert_eq!(text, "Items(0)=Weapon'MyGame.Weapon0'");
}

#[test]
fn test_imports_are_never_exported() {
    let package = game_package();
    let property = DefaultProperty::new(
        object_property("Base", "Actor", PropertyFlags::EXPORT_OBJECT),
        Value::Object(ACTOR_IMPORT),
    );
    assert_eq!(render(&package, &[property], lf_options()), "Base=Class'Engine.Actor'");
}

#[test]
fn test_map_mode_qualifies_in_package_paths() {
    let package = game_package();
    let options = DecompileOptions {
        map_mode: true,
        ..lf_options()
    };
    let text = render(
        &package,
        &[weapon_array(PropertyFlags::empty(), WEAPON_OBJECT)],
        options,
    );
    assert_eq!(text, "Items(0)=Weapon'myLevel.Weapon0'");
}

#[test]
fn test_map_mode_reaches_nested_exports() {
    let mut package = game_package();
    package.exports.push(export(
        "Holder0",
        WEAPON_CLASS,
        Some(ObjectData::Object(ObjectInstance {
            properties: vec![DefaultProperty::new(
                object_property("Target", "Weapon", PropertyFlags::empty()),
                Value::Object(WEAPON_OBJECT),
            )],
            unread_bytes: Vec::new(),
        })),
    ));
    let holder = ObjectRef::export(package.exports.len() - 1);
    let options = DecompileOptions {
        map_mode: true,
        ..lf_options()
    };

    let text = render(
        &package,
        &[DefaultProperty::new(
            object_property("Holder", "Weapon", PropertyFlags::EXPORT_OBJECT),
            Value::Object(holder),
        )],
        options,
    );
    assert_eq!(
        text,
        "Begin Actor Class=Weapon Name=Holder0\n\t\tTarget=Weapon'myLevel.Weapon0'\n\tEnd Actor\n\tHolder=Weapon'myLevel.Holder0'"
    );
}

#[test]
fn test_brush_export() {
    let package = game_package();
    let property = DefaultProperty::new(
        object_property("Brush", "Model", PropertyFlags::EXPORT_OBJECT),
        Value::Object(BRUSH_OBJECT),
    );
    let text = Decompiler::with_options(lf_options())
        .default_properties(&package, &[property], 0)
        .unwrap();
    let expected = [
        "Begin Brush Name=Model0",
        "\tBegin PolyList",
        "\t\tBegin Polygon Texture=Textures.Rock Flags=8 Link=0",
        "\t\t\tOrigin   +00000.000000,+00000.000000,+00000.000000",
        "\t\t\tNormal   +00000.000000,+00000.000000,+00001.000000",
        "\t\t\tTextureU +00001.000000,+00000.000000,+00000.000000",
        "\t\t\tTextureV +00000.000000,-00001.000000,+00000.000000",
        "\t\t\tVertex   +00001.000000,+00002.000000,+00003.000000",
        "\t\tEnd Polygon",
        "\tEnd PolyList",
        "End Brush",
        "Brush=Model'MyGame.Model0'",
    ]
    .join("\n");
    assert_eq!(text, expected);
}

#[test]
fn test_brush_without_polys_reference_is_malformed() {
    let mut package = game_package();
    if let Some(ObjectData::Object(model)) = &mut package.exports[3].object {
        model.unread_bytes = vec![0x00, 0x7F];
    }
    let property = DefaultProperty::new(
        object_property("Brush", "Model", PropertyFlags::EXPORT_OBJECT),
        Value::Object(BRUSH_OBJECT),
    );
    let result = Decompiler::new().default_properties(&package, &[property], 0);
    assert!(matches!(result, Err(DecompilerError::MalformedBrush { .. })));
}

#[test]
fn test_nested_struct_with_array_field() {
    let package = game_package();
    let property = DefaultProperty::new(
        Property::new(
            "Spawn",
            PropertyKind::Struct {
                struct_name: "SpawnInfo".into(),
            },
        ),
        Value::Struct(vec![
            DefaultProperty::new(Property::new("Tag", PropertyKind::Name), Value::Name("Start".into())),
            DefaultProperty::new(
                Property::new(
                    "Counts",
                    PropertyKind::Array {
                        inner: Box::new(Property::new("Counts", PropertyKind::Int)),
                    },
                ),
                Value::Array(vec![Value::Int(1), Value::Int(2)]),
            ),
            DefaultProperty::new(Property::new("bActive", PropertyKind::Bool), Value::Bool(true)),
        ]),
    );
    assert_eq!(
        render(&package, &[property], lf_options()),
        "Spawn=(Tag=\"Start\",Counts=(1,2),bActive=true)"
    );
}
