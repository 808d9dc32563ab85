//! Command-line interface module
//!
//! This module contains the implementations for the CLI subcommands.

pub mod decompile;
pub mod disasm;
pub mod inspect;

/// Common CLI utilities
pub mod utils {
    use crate::error::{Error as DecompilerError, Result as DecompilerResult};
    use crate::model::Package;
    use std::path::{Path, PathBuf};

    /// Load the JSON package model at `path`
    pub fn read_model(path: &Path) -> DecompilerResult<Package> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            DecompilerError::Io(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let package = Package::from_json(&json)?;
        log::info!(
            "Loaded package {} ({} imports, {} exports)",
            package.name,
            package.imports.len(),
            package.exports.len()
        );
        Ok(package)
    }

    /// Write output to file or stdout
    pub fn write_output(content: &str, output_path: Option<&PathBuf>) -> DecompilerResult<()> {
        match output_path {
            Some(path) => std::fs::write(path, content).map_err(DecompilerError::from),
            None => {
                println!("{}", content);
                Ok(())
            }
        }
    }
}
