use super::utils::read_model;
use crate::error::Error as DecompilerError;
use crate::model::{Entry, ObjectRef, Package};
use crate::DecompilerResult;
use serde::Serialize;
use std::path::Path;

/// Directory entry as shown by `inspect`
#[derive(Debug, Serialize)]
pub struct EntrySummary {
    pub reference: i32,
    pub full_name: String,
    pub class: String,
}

/// JSON summary of a package model
#[derive(Debug, Serialize)]
pub struct PackageSummary {
    pub name: String,
    pub imports: Vec<EntrySummary>,
    pub exports: Vec<EntrySummary>,
    pub classes: Vec<String>,
}

impl PackageSummary {
    pub fn build(package: &Package) -> DecompilerResult<Self> {
        let imports = (0..package.imports.len())
            .map(|index| summarize(package, ObjectRef::import(index)))
            .collect::<DecompilerResult<Vec<_>>>()?;
        let exports = (0..package.exports.len())
            .map(|index| summarize(package, ObjectRef::export(index)))
            .collect::<DecompilerResult<Vec<_>>>()?;
        Ok(Self {
            name: package.name.clone(),
            imports,
            exports,
            classes: package.classes().map(|class| class.name.clone()).collect(),
        })
    }
}

fn summarize(package: &Package, reference: ObjectRef) -> DecompilerResult<EntrySummary> {
    let entry: Entry<'_> = package
        .entry(reference)?
        .ok_or(DecompilerError::UnresolvedReference {
            reference: reference.0,
        })?;
    Ok(EntrySummary {
        reference: reference.0,
        full_name: package.full_name(reference)?,
        class: package.class_name(entry)?,
    })
}

/// Run the inspect subcommand
pub fn inspect(input_path: &Path) -> DecompilerResult<()> {
    let package = read_model(input_path)?;
    let summary = PackageSummary::build(&package)?;
    let json = serde_json::to_string_pretty(&summary).map_err(|e| DecompilerError::Internal {
        message: format!("Failed to serialize package summary: {}", e),
    })?;
    println!("{}", json);
    Ok(())
}
