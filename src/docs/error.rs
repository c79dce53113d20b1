use thiserror::Error;

/// Type that cannot be given a semantic type name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported data type {kind} ({type_name})")]
pub struct UnsupportedTypeError {
    /// Shape kind, e.g. `chan` or `section`.
    pub kind: String,
    /// Fully qualified Rust type name.
    pub type_name: &'static str,
}

/// Errors that abort an extraction run.
///
/// Every variant carries the qualified path of the offending entry: the
/// documented names of the enclosing blocks joined by dots, followed by the
/// field name.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The documented value is not a configuration section.
    #[error("'{path}' is a {kind} ({type_name}) while a section is expected")]
    Shape {
        /// Qualified path of the value; empty for the root.
        path: String,
        /// Fully qualified Rust type name.
        type_name: &'static str,
        /// Shape kind that was found.
        kind: &'static str,
    },

    /// A section contains itself.
    #[error("section {type_name} at '{path}' contains itself")]
    Recursive {
        /// Qualified path of the recurring field.
        path: String,
        /// Fully qualified Rust type name of the section.
        type_name: &'static str,
    },

    /// A field type has no semantic type name.
    #[error("config={section} field '{path}': {source}")]
    Type {
        /// Qualified path of the field.
        path: String,
        /// Fully qualified Rust type name of the section declaring the field.
        section: &'static str,
        /// Classification failure.
        #[source]
        source: UnsupportedTypeError,
    },

    /// Two sibling entries resolve to the same documented name.
    #[error("config={section} declares '{path}' more than once")]
    DuplicateEntry {
        /// Qualified path of the duplicated entry.
        path: String,
        /// Fully qualified Rust type name of the section adding the duplicate.
        section: &'static str,
    },
}
