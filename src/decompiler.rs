//! Main decompiler module
//!
//! This module orchestrates the decompilation of one loaded class into
//! UnrealScript source text.

use crate::defaults::PropertyFormatter;
use crate::format::{new_line, LineEnding};
use crate::model::{ClassDef, DefaultProperty, Entry, FunctionDef, ObjectRef, Package};
use crate::source::SourceEmitter;
use crate::DecompilerResult;
use serde::{Deserialize, Serialize};

/// Qualifier of in-package object paths in map/level mode
pub const LEVEL_QUALIFIER: &str = "myLevel";

/// Options controlling the generated text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecompileOptions {
    /// Qualify in-package object paths with the level container
    pub map_mode: bool,
    pub line_ending: LineEnding,
}

impl DecompileOptions {
    pub fn from_cli(map: bool, lf: bool) -> Self {
        Self {
            map_mode: map,
            line_ending: if lf { LineEnding::Lf } else { LineEnding::Crlf },
        }
    }
}

/// Everything one decompile call reads: the package and the options
#[derive(Debug, Clone, Copy)]
pub struct DecompileContext<'a> {
    package: &'a Package,
    options: &'a DecompileOptions,
}

impl<'a> DecompileContext<'a> {
    pub fn new(package: &'a Package, options: &'a DecompileOptions) -> Self {
        Self { package, options }
    }

    pub fn package(&self) -> &'a Package {
        self.package
    }

    pub fn options(&self) -> &'a DecompileOptions {
        self.options
    }

    pub fn new_line(&self, indent: usize) -> String {
        new_line(self.options.line_ending, indent)
    }

    /// Object literal: `Class'Package.Name'`, `None` for the null reference
    pub fn link_to(&self, reference: ObjectRef) -> DecompilerResult<String> {
        let entry = match self.package.entry(reference)? {
            Some(entry) => entry,
            None => return Ok("None".to_string()),
        };
        let class = self.package.class_name(entry)?;
        let path = match entry {
            Entry::Import(_) => self.package.full_name(reference)?,
            Entry::Export(_) if self.options.map_mode => {
                format!("{}.{}", LEVEL_QUALIFIER, self.package.inner_name(reference)?)
            }
            Entry::Export(_) => self.package.full_name(reference)?,
        };
        Ok(format!("{}'{}'", class, path))
    }
}

/// Main decompiler struct
#[derive(Debug, Clone, Default)]
pub struct Decompiler {
    options: DecompileOptions,
}

impl Decompiler {
    /// Create a new decompiler with default options
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: DecompileOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DecompileOptions {
        &self.options
    }

    /// Decompile one class to source text
    pub fn decompile_class(&self, package: &Package, class: &ClassDef) -> DecompilerResult<String> {
        log::debug!("Decompiling class {}.{}", package.name, class.name);
        let ctx = DecompileContext::new(package, &self.options);
        SourceEmitter::new(&ctx).class(class, 0)
    }

    /// Decompile the class exported under `name`
    pub fn decompile_class_named(&self, package: &Package, name: &str) -> DecompilerResult<String> {
        let class = package.find_class(name)?;
        self.decompile_class(package, class)
    }

    /// Decompile every class of the package, in directory order
    pub fn decompile_package(&self, package: &Package) -> DecompilerResult<Vec<(String, String)>> {
        package
            .classes()
            .map(|class| Ok((class.name.clone(), self.decompile_class(package, class)?)))
            .collect()
    }

    /// Decompile a single function declaration with its body
    pub fn decompile_function(
        &self,
        package: &Package,
        function: &FunctionDef,
    ) -> DecompilerResult<String> {
        let ctx = DecompileContext::new(package, &self.options);
        SourceEmitter::new(&ctx).function(function, 0)
    }

    /// Render a default property block body (without the enclosing braces)
    pub fn default_properties(
        &self,
        package: &Package,
        properties: &[DefaultProperty],
        indent: usize,
    ) -> DecompilerResult<String> {
        let ctx = DecompileContext::new(package, &self.options);
        PropertyFormatter::new(&ctx).properties(properties, indent)
    }
}
