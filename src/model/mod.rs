//! Object model consumed by the decompiler
//!
//! These types are the boundary to the package reader: they are produced
//! fully loaded (or deserialized from JSON) before a decompile call and are
//! never mutated by it.

pub mod declarations;
pub mod flags;
pub mod package;
pub mod token;
pub mod value;

pub use declarations::*;
pub use flags::{FunctionFlags, ObjectFlags, PropertyFlags};
pub use package::{
    short_name, Entry, ExportEntry, ImportEntry, ObjectData, ObjectInstance, ObjectRef, Package,
    Polygon, Polys, Vector,
};
pub use token::{Instruction, Token, CASE_DEFAULT};
pub use value::{DefaultProperty, Value};
