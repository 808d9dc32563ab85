use miette::Diagnostic;
use thiserror::Error;

/// Result type for decompiler operations
pub type Result<T> = std::result::Result<T, Error>;

/// Custom error types for the UnrealScript decompiler
#[derive(Error, Debug, Diagnostic, Clone)]
pub enum Error {
    #[error("I/O error: {0}")]
    #[diagnostic(code(uscript_dec::io_error))]
    Io(String),

    #[error("Invalid object model: {message}")]
    #[diagnostic(
        code(uscript_dec::model_error),
        help("the input must be the JSON form of a package model")
    )]
    Model { message: String },

    #[error("{kind} '{name}' not found")]
    #[diagnostic(code(uscript_dec::lookup_error))]
    Lookup { kind: String, name: String },

    #[error("Object reference {reference} does not resolve to an import or export")]
    #[diagnostic(code(uscript_dec::unresolved_reference))]
    UnresolvedReference { reference: i32 },

    #[error("Ordinal {ordinal} is out of range for enum {enum_name} ({count} literals)")]
    #[diagnostic(code(uscript_dec::enum_ordinal))]
    EnumOrdinal {
        enum_name: String,
        ordinal: u8,
        count: usize,
    },

    #[error("Malformed value: {message}")]
    #[diagnostic(code(uscript_dec::structure_error))]
    Structure { message: String },

    #[error("Polygon list not found in brush {object}")]
    #[diagnostic(
        code(uscript_dec::malformed_brush),
        help("no position of the trailing data holds a reference to an Engine.Polys export")
    )]
    MalformedBrush { object: String },

    #[error("Internal error: {message}")]
    #[diagnostic(code(uscript_dec::internal_error))]
    Internal { message: String },
}

impl Error {
    /// Create a lookup error
    pub fn lookup(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Error::Lookup {
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Create a structural error
    pub fn structure(message: impl Into<String>) -> Self {
        Error::Structure {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Error::Internal {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Model {
            message: err.to_string(),
        }
    }
}
