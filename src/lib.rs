//! uscript-dec-rs: decompiler for compiled UnrealScript classes
//!
//! This library takes the loaded object model of a compiled script package
//! (declarations, default properties and per-function bytecode) and
//! reconstructs readable UnrealScript source, including structured control
//! flow and inline-exported sub-objects.

pub mod bytecode;
pub mod cli;
pub mod decompiler;
pub mod defaults;
pub mod error;
pub mod format;
pub mod model;
pub mod source;

pub use decompiler::{DecompileContext, DecompileOptions, Decompiler};
pub use error::{Error as DecompilerError, Result as DecompilerResult};

// Re-export commonly used types
pub use bytecode::{BytecodeEntry, Code};
pub use model::{ClassDef, FunctionDef, Package};
