//! Rich diagnostic error types for the vocabulary engine.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]` derives,
//! providing error codes and help text. Resolver and configuration errors live
//! next to their subsystems ([`crate::resolve::ResolveError`],
//! [`crate::config::ConfigError`]) and are folded into [`VocabError`] here.

use miette::Diagnostic;
use thiserror::Error;

use crate::config::ConfigError;
use crate::resolve::ResolveError;

/// Top-level error type for the vocabulary engine.
///
/// Each variant wraps a subsystem-specific error, preserving the full diagnostic
/// chain (error codes, help text) through to the user.
#[derive(Debug, Error, Diagnostic)]
pub enum VocabError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Deserialize(#[from] DeserializeError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Catalogue(#[from] CatalogueError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Property(#[from] PropertyError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}

/// Convenience alias for results that may fail with any engine error.
pub type VocabResult<T> = std::result::Result<T, VocabError>;

// ---------------------------------------------------------------------------
// Deserialization errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum DeserializeError {
    #[error("vocabulary type \"{type_name}\" is not registered in this catalogue")]
    #[diagnostic(
        code(vocab::deserialize::unknown_type),
        help(
            "Deserialization was requested for a type name the catalogue does not know. \
             Register the type's vocabulary with `CatalogueBuilder::register_vocabulary`, \
             or check the spelling of the type name."
        )
    )]
    UnknownType { type_name: String },

    #[error("\"id\" of a {type_name} must be a string, found {found}")]
    #[diagnostic(
        code(vocab::deserialize::invalid_id),
        help("JSON-LD node identifiers are IRIs and must be encoded as JSON strings.")
    )]
    InvalidId { type_name: String, found: String },

    #[error("document nesting exceeds the maximum depth of {max_depth}")]
    #[diagnostic(
        code(vocab::deserialize::depth_exceeded),
        help(
            "Embedded objects are decoded recursively. Flatten the document by \
             referencing deeply nested values through their IRIs instead."
        )
    )]
    DepthExceeded { max_depth: usize },

    #[error("deserializer for {expected} produced a {found}")]
    #[diagnostic(
        code(vocab::deserialize::wrong_variant),
        help(
            "A custom deserialization function returned a value of a different type \
             than the one it was registered for. This is a bug in the registration."
        )
    )]
    WrongVariant { expected: String, found: String },
}

/// Result type for deserialization.
pub type DeserializeResult<T> = std::result::Result<T, DeserializeError>;

// ---------------------------------------------------------------------------
// Catalogue errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum CatalogueError {
    #[error("vocabulary type \"{name}\" is already registered")]
    #[diagnostic(
        code(vocab::catalogue::duplicate_type),
        help(
            "Type names are unique within a catalogue. Remove the second registration \
             or register only one of the overlapping vocabularies."
        )
    )]
    DuplicateType { name: String },
}

/// Result type for catalogue construction.
pub type CatalogueResult<T> = std::result::Result<T, CatalogueError>;

// ---------------------------------------------------------------------------
// Property errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum PropertyError {
    #[error("{type_name} has no property \"{term}\"")]
    #[diagnostic(
        code(vocab::property::unknown),
        help(
            "Only properties defined by the type's schema can be set through the typed \
             surface. Store extension members with `Properties::set_unknown`."
        )
    )]
    UnknownProperty { type_name: String, term: String },

    #[error("property \"{term}\" is functional and holds at most one value")]
    #[diagnostic(
        code(vocab::property::functional),
        help("Use `set` to replace the value of a functional property.")
    )]
    FunctionalProperty { term: String },

    #[error("property \"{term}\" expects {range} values, got {found}")]
    #[diagnostic(
        code(vocab::property::range_mismatch),
        help(
            "Slots are never coerced between shapes. Convert the value to the \
             property's range first, or store it as a raw slot."
        )
    )]
    RangeMismatch {
        term: String,
        range: String,
        found: String,
    },

    #[error("index {index} is out of bounds for \"{term}\" with {len} value(s)")]
    #[diagnostic(
        code(vocab::property::out_of_bounds),
        help("Check the property length with `Properties::len` before indexing.")
    )]
    IndexOutOfBounds {
        term: String,
        index: usize,
        len: usize,
    },

    #[error("cannot add an empty slot to \"{term}\"")]
    #[diagnostic(
        code(vocab::property::empty_slot),
        help("Use `clear` or `remove` to drop values instead of inserting empty slots.")
    )]
    EmptySlot { term: String },
}

/// Result type for property mutation.
pub type PropertyResult<T> = std::result::Result<T, PropertyError>;
