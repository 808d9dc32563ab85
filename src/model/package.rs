//! Package directory: imports, exports and the objects they carry

use super::declarations::{ClassDef, EnumDef, Field};
use super::flags::ObjectFlags;
use super::value::DefaultProperty;
use crate::error::{Error as DecompilerError, Result as DecompilerResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Signed reference into the package directory
///
/// `0` is None, positive values address export `n - 1`, negative values
/// address import `-n - 1`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectRef(pub i32);

impl ObjectRef {
    pub const NONE: ObjectRef = ObjectRef(0);

    pub fn export(index: usize) -> Self {
        Self(index as i32 + 1)
    }

    pub fn import(index: usize) -> Self {
        Self(-(index as i32) - 1)
    }

    pub fn is_none(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Object referenced from another package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportEntry {
    pub name: String,
    pub class_package: String,
    pub class_name: String,
    #[serde(default)]
    pub outer: ObjectRef,
}

/// Object defined in this package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportEntry {
    pub name: String,
    #[serde(default)]
    pub class: ObjectRef,
    #[serde(default)]
    pub super_class: ObjectRef,
    #[serde(default)]
    pub outer: ObjectRef,
    #[serde(default)]
    pub flags: ObjectFlags,
    /// Loaded payload, when the provider instantiated the object
    #[serde(default)]
    pub object: Option<ObjectData>,
}

/// Loaded payload of an export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ObjectData {
    Class(ClassDef),
    Object(ObjectInstance),
    Polys(Polys),
}

/// Generic object: its serialized properties and whatever bytes the
/// provider did not interpret
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectInstance {
    #[serde(default)]
    pub properties: Vec<DefaultProperty>,
    #[serde(default)]
    pub unread_bytes: Vec<u8>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Polygon list of a brush model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polys {
    pub polygons: Vec<Polygon>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub vertices: Vec<Vector>,
    pub origin: Vector,
    pub normal: Vector,
    pub texture_u: Vector,
    pub texture_v: Vector,
    #[serde(default = "none_name")]
    pub item_name: String,
    #[serde(default)]
    pub texture: ObjectRef,
    #[serde(default)]
    pub flags: u32,
    #[serde(default)]
    pub link: i32,
}

fn none_name() -> String {
    "None".to_string()
}

/// Resolved directory entry
#[derive(Debug, Clone, Copy)]
pub enum Entry<'a> {
    Import(&'a ImportEntry),
    Export(&'a ExportEntry),
}

impl<'a> Entry<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            Entry::Import(import) => &import.name,
            Entry::Export(export) => &export.name,
        }
    }

    fn outer(&self) -> ObjectRef {
        match self {
            Entry::Import(import) => import.outer,
            Entry::Export(export) => export.outer,
        }
    }
}

/// One loaded package: the read-only input of every decompile call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
    #[serde(default)]
    pub imports: Vec<ImportEntry>,
    #[serde(default)]
    pub exports: Vec<ExportEntry>,
    /// Full class name -> full super class name, for classes whose
    /// ancestry is not loaded (e.g. `Engine.Pawn` -> `Engine.Actor`)
    #[serde(default)]
    pub class_hierarchy: BTreeMap<String, String>,
    /// Enums declared in other packages, keyed by full path
    /// (`Engine.Actor.EPhysics`)
    #[serde(default)]
    pub enums: BTreeMap<String, EnumDef>,
}

impl Package {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Load a package model from its JSON form
    pub fn from_json(json: &str) -> DecompilerResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Resolve a reference; `Ok(None)` for the None reference
    pub fn entry(&self, reference: ObjectRef) -> DecompilerResult<Option<Entry<'_>>> {
        let unresolved = || DecompilerError::UnresolvedReference {
            reference: reference.0,
        };
        match reference.0 {
            0 => Ok(None),
            n if n > 0 => self
                .exports
                .get(n as usize - 1)
                .map(|e| Some(Entry::Export(e)))
                .ok_or_else(unresolved),
            n => self
                .imports
                .get((-(n as i64) - 1) as usize)
                .map(|e| Some(Entry::Import(e)))
                .ok_or_else(unresolved),
        }
    }

    /// Resolve a reference that must be an export
    pub fn export(&self, reference: ObjectRef) -> DecompilerResult<&ExportEntry> {
        match self.entry(reference)? {
            Some(Entry::Export(export)) => Ok(export),
            _ => Err(DecompilerError::UnresolvedReference {
                reference: reference.0,
            }),
        }
    }

    /// Names along the outer chain, outermost first
    fn path(&self, reference: ObjectRef) -> DecompilerResult<Vec<&str>> {
        let limit = self.imports.len() + self.exports.len();
        let mut names = Vec::new();
        let mut current = reference;
        while let Some(entry) = self.entry(current)? {
            if names.len() > limit {
                return Err(DecompilerError::internal(format!(
                    "cyclic outer chain at reference {}",
                    reference
                )));
            }
            names.push(entry.name());
            current = entry.outer();
        }
        names.reverse();
        Ok(names)
    }

    /// Path of an object inside its package (`Group.Name`)
    pub fn inner_name(&self, reference: ObjectRef) -> DecompilerResult<String> {
        Ok(self.path(reference)?.join("."))
    }

    /// Fully qualified name: imports carry their own package in the outer
    /// chain, exports are prefixed with this package's name
    pub fn full_name(&self, reference: ObjectRef) -> DecompilerResult<String> {
        match self.entry(reference)? {
            None => Ok("None".to_string()),
            Some(Entry::Import(_)) => self.inner_name(reference),
            Some(Entry::Export(_)) => Ok(format!("{}.{}", self.name, self.inner_name(reference)?)),
        }
    }

    /// Short class name of a referenced object
    pub fn class_name(&self, entry: Entry<'_>) -> DecompilerResult<String> {
        match entry {
            Entry::Import(import) => Ok(import.class_name.clone()),
            Entry::Export(export) => Ok(self
                .entry(export.class)?
                .map(|class| class.name().to_string())
                .unwrap_or_else(|| "Class".to_string())),
        }
    }

    /// Fully qualified class name of an export (`Engine.Polys`)
    pub fn class_full_name(&self, export: &ExportEntry) -> DecompilerResult<String> {
        if export.class.is_none() {
            return Ok("Core.Class".to_string());
        }
        self.full_name(export.class)
    }

    /// Walks the hierarchy map from `class` looking for `base`
    pub fn is_subclass(&self, base: &str, class: &str) -> bool {
        let mut current = class;
        for _ in 0..=self.class_hierarchy.len() {
            if current.eq_ignore_ascii_case(base) {
                return true;
            }
            match self.class_hierarchy.get(current) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
        false
    }

    /// Classes exported by this package, in directory order
    pub fn classes(&self) -> impl Iterator<Item = &ClassDef> {
        self.exports.iter().filter_map(|export| match &export.object {
            Some(ObjectData::Class(class)) => Some(class),
            _ => None,
        })
    }

    pub fn find_class(&self, name: &str) -> DecompilerResult<&ClassDef> {
        self.classes()
            .find(|class| class.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| DecompilerError::lookup("Class", name))
    }

    /// Resolve an enum by full path (`MyGame.Weapon.EMode`), by a path
    /// relative to its package (`Weapon.EMode`) or by bare name. Enums
    /// declared in this package's classes win over the imported table.
    pub fn find_enum(&self, name: &str) -> DecompilerResult<&EnumDef> {
        let mut declared = Vec::new();
        for class in self.classes() {
            let prefix = format!("{}.{}", self.name, class.name);
            collect_enums(&prefix, &class.children, &mut declared);
        }
        declared
            .into_iter()
            .find(|(path, _)| path_matches(path, name))
            .map(|(_, definition)| definition)
            .or_else(|| {
                self.enums
                    .iter()
                    .find(|(path, _)| path_matches(path, name))
                    .map(|(_, definition)| definition)
            })
            .ok_or_else(|| DecompilerError::lookup("Enum", name))
    }
}

/// Enums of a declaration tree with their dotted paths, depth-first
fn collect_enums<'a>(prefix: &str, children: &'a [Field], out: &mut Vec<(String, &'a EnumDef)>) {
    for field in children {
        match field {
            Field::Enum(e) => out.push((format!("{}.{}", prefix, e.name), e)),
            Field::Struct(s) => collect_enums(&format!("{}.{}", prefix, s.name), &s.children, out),
            Field::State(s) => collect_enums(&format!("{}.{}", prefix, s.name), &s.children, out),
            _ => {}
        }
    }
}

/// `name` equals `path` or is a trailing run of its segments
fn path_matches(path: &str, name: &str) -> bool {
    if path.len() < name.len() {
        return false;
    }
    let start = path.len() - name.len();
    path.is_char_boundary(start)
        && path[start..].eq_ignore_ascii_case(name)
        && (start == 0 || path.as_bytes()[start - 1] == b'.')
}

/// Last segment of a dotted path
pub fn short_name(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}
