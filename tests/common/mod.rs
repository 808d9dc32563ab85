//! Shared package model builders for integration tests
#![allow(dead_code)]

use uscript_dec_rs::decompiler::DecompileOptions;
use uscript_dec_rs::format::LineEnding;
use uscript_dec_rs::model::*;

pub const WEAPON_CLASS: ObjectRef = ObjectRef(1);
pub const WEAPON_OBJECT: ObjectRef = ObjectRef(2);
pub const POLYS_OBJECT: ObjectRef = ObjectRef(3);
pub const BRUSH_OBJECT: ObjectRef = ObjectRef(4);
pub const ACTOR_IMPORT: ObjectRef = ObjectRef(-2);
pub const ROCK_TEXTURE: ObjectRef = ObjectRef(-6);

pub fn lf_options() -> DecompileOptions {
    DecompileOptions {
        map_mode: false,
        line_ending: LineEnding::Lf,
    }
}

pub fn import(name: &str, class_package: &str, class_name: &str, outer: ObjectRef) -> ImportEntry {
    ImportEntry {
        name: name.into(),
        class_package: class_package.into(),
        class_name: class_name.into(),
        outer,
    }
}

pub fn export(name: &str, class: ObjectRef, object: Option<ObjectData>) -> ExportEntry {
    ExportEntry {
        name: name.into(),
        class,
        super_class: ObjectRef::NONE,
        outer: ObjectRef::NONE,
        flags: ObjectFlags::empty(),
        object,
    }
}

pub fn local(name: &str) -> Box<Token> {
    Box::new(Token::LocalVariable(name.into()))
}

pub fn instance(name: &str) -> Box<Token> {
    Box::new(Token::InstanceVariable(name.into()))
}

pub fn call(name: &str, params: Vec<Token>) -> Token {
    Token::FunctionCall {
        name: name.into(),
        params,
    }
}

pub fn empty_return() -> Token {
    Token::Return(Box::new(Token::Nothing))
}

pub fn code(entries: Vec<(u32, Token)>) -> Vec<Instruction> {
    entries
        .into_iter()
        .map(|(offset, token)| Instruction::new(offset, token))
        .collect()
}

pub fn object_property(name: &str, class: &str, flags: PropertyFlags) -> Property {
    Property::new(
        name,
        PropertyKind::Object {
            class: class.into(),
        },
    )
    .with_flags(flags)
}

/// `Weapon` class with a const, an enum, a property, a function and a state
pub fn weapon_class() -> ClassDef {
    let fire = FunctionDef {
        name: "Fire".into(),
        bytecode: code(vec![
            (
                0,
                Token::Let {
                    lhs: instance("Ammo"),
                    rhs: Box::new(Token::BinaryOperator {
                        op: "-".into(),
                        lhs: instance("Ammo"),
                        rhs: Box::new(Token::IntConst(1)),
                    }),
                },
            ),
            (10, empty_return()),
        ]),
        ..Default::default()
    };
    let firing = StateDef {
        name: "Firing".into(),
        super_name: None,
        children: vec![Field::Function(FunctionDef {
            name: "BeginState".into(),
            bytecode: code(vec![(0, empty_return())]),
            ..Default::default()
        })],
    };

    ClassDef {
        name: "Weapon".into(),
        super_name: Some("Actor".into()),
        children: vec![
            Field::State(firing),
            Field::Function(fire),
            Field::Property(
                Property::new("Ammo", PropertyKind::Int)
                    .with_flags(PropertyFlags::EDIT)
                    .with_category("Weapon"),
            ),
            Field::Property(Property::new(
                "OnFire",
                PropertyKind::Delegate {
                    function: "OnFire".into(),
                },
            )),
            Field::Enum(EnumDef {
                name: "EMode".into(),
                values: vec!["MODE_A".into(), "MODE_B".into(), "MODE_C".into()],
            }),
            Field::Const(ConstDef {
                name: "MaxAmmo".into(),
                value: "10".into(),
            }),
        ],
        defaults: vec![DefaultProperty::new(
            Property::new("Ammo", PropertyKind::Int),
            Value::Int(5),
        )],
    }
}

/// Package `MyGame`: the `Weapon` class, a `Weapon0` actor instance, a
/// polygon list and a brush model whose trailing data points at it
pub fn game_package() -> Package {
    let mut package = Package::new("MyGame");
    package.imports = vec![
        import("Engine", "Core", "Package", ObjectRef::NONE),
        import("Actor", "Core", "Class", ObjectRef::import(0)),
        import("Polys", "Core", "Class", ObjectRef::import(0)),
        import("Model", "Core", "Class", ObjectRef::import(0)),
        import("Textures", "Core", "Package", ObjectRef::NONE),
        import("Rock", "Engine", "Texture", ObjectRef::import(4)),
    ];

    let polygon = Polygon {
        vertices: vec![Vector::new(1.0, 2.0, 3.0)],
        origin: Vector::new(0.0, 0.0, 0.0),
        normal: Vector::new(0.0, 0.0, 1.0),
        texture_u: Vector::new(1.0, 0.0, 0.0),
        texture_v: Vector::new(0.0, -1.0, 0.0),
        item_name: "None".into(),
        texture: ROCK_TEXTURE,
        flags: 8,
        link: 0,
    };

    package.exports = vec![
        export("Weapon", ObjectRef::NONE, Some(ObjectData::Class(weapon_class()))),
        export(
            "Weapon0",
            WEAPON_CLASS,
            Some(ObjectData::Object(ObjectInstance {
                properties: vec![DefaultProperty::new(
                    Property::new("Ammo", PropertyKind::Int),
                    Value::Int(7),
                )],
                unread_bytes: Vec::new(),
            })),
        ),
        export(
            "Polys0",
            ObjectRef::import(2),
            Some(ObjectData::Polys(Polys {
                polygons: vec![polygon],
            })),
        ),
        export(
            "Model0",
            ObjectRef::import(3),
            Some(ObjectData::Object(ObjectInstance {
                properties: Vec::new(),
                unread_bytes: vec![0x00, POLYS_OBJECT.0 as u8, 0x00],
            })),
        ),
    ];
    package
        .class_hierarchy
        .insert("MyGame.Weapon".into(), "Engine.Actor".into());
    package
}
