//! Handler dispatch for vocabulary values.
//!
//! # Architecture
//!
//! - [`JsonResolver`]: raw JSON-LD document → first recognised declared type
//!   → the handler registered for exactly that type
//! - [`TypeResolver`]: decoded value → handler for its exact type
//! - [`InterfaceResolver`]: decoded value → first handler whose capability
//!   the value satisfies
//! - [`TypePredicatedResolver`] / [`InterfacePredicatedResolver`]: a predicate
//!   gates whether a delegate [`Resolver`] runs at all
//!
//! Every resolver holds an `Arc<Catalogue>`; registration is generic over the
//! handled type or capability and is checked against that catalogue.
//! Handler errors are returned unchanged. Handlers may use their own error
//! type `E` as long as it can carry a [`ResolveError`].

mod interface;
mod json;
mod predicate;
mod typed;

use miette::Diagnostic;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::alias::AliasMap;
use crate::error::DeserializeError;
use crate::property::codec;
use crate::vocab::TypedValue;

pub use interface::InterfaceResolver;
pub use json::JsonResolver;
pub use predicate::{InterfacePredicatedResolver, TypePredicatedResolver};
pub use typed::TypeResolver;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors produced while resolving a value to a handler.
#[derive(Debug, Error, Diagnostic)]
pub enum ResolveError {
    #[error("document has no \"type\"")]
    #[diagnostic(
        code(vocab::resolve::missing_type),
        help(
            "A document must be a JSON object whose \"type\" member is a string \
             or a list of strings."
        )
    )]
    MissingType,

    #[error("document \"type\" is {found}, not a string or list of strings")]
    #[diagnostic(
        code(vocab::resolve::invalid_type),
        help("Declare the type as \"type\": \"Note\" or \"type\": [\"Note\", \"Article\"].")
    )]
    InvalidType { found: String },

    #[error("document has no \"@context\"")]
    #[diagnostic(
        code(vocab::resolve::missing_context),
        help(
            "Without a context the vocabulary of the declared types is unknown. \
             Add \"@context\": \"https://www.w3.org/ns/activitystreams\"."
        )
    )]
    MissingContext,

    #[error("none of the declared types {declared:?} is recognised")]
    #[diagnostic(
        code(vocab::resolve::unhandled_type),
        help(
            "Check the \"@context\" aliases against the type prefixes, or register \
             the vocabulary that defines these types."
        )
    )]
    UnhandledType { declared: Vec<String> },

    #[error("no handler registered for {type_name}")]
    #[diagnostic(
        code(vocab::resolve::no_callback_match),
        help(
            "The first recognised type decides the dispatch; later declared types \
             are not tried. Register a handler for '{type_name}'."
        )
    )]
    NoCallbackMatch { type_name: String },

    #[error("predicate expects {expected}, got {actual}")]
    #[diagnostic(
        code(vocab::resolve::predicate_unmatched),
        help("The predicate was not evaluated because the value's type does not fit it.")
    )]
    PredicateUnmatched { expected: String, actual: String },

    #[error("{type_name} value could not be viewed as its handler's type")]
    #[diagnostic(
        code(vocab::resolve::cannot_type_assert_type),
        help("This is a bug: the value's tag and its capability projections disagree.")
    )]
    CannotTypeAssertType { type_name: String },

    #[error("{type_name} value could not be viewed as its predicate's type")]
    #[diagnostic(
        code(vocab::resolve::cannot_type_assert_predicate),
        help("This is a bug: the value's tag and its capability projections disagree.")
    )]
    CannotTypeAssertPredicate { type_name: String },

    #[error("handler signature {signature} matches no type in the catalogue")]
    #[diagnostic(
        code(vocab::resolve::unrecognized_signature),
        help(
            "The handler could never be called. Register the vocabulary defining \
             '{signature}' in the catalogue passed to the resolver."
        )
    )]
    UnrecognizedSignature { signature: String },

    #[error("predicate signature {signature} matches no type in the catalogue")]
    #[diagnostic(
        code(vocab::resolve::unrecognized_predicate_signature),
        help(
            "The predicate could never pass. Register the vocabulary defining \
             '{signature}' in the catalogue."
        )
    )]
    UnrecognizedPredicateSignature { signature: String },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Deserialize(#[from] DeserializeError),
}

/// Result type for resolution.
pub type ResolveResult<T> = std::result::Result<T, ResolveError>;

// ---------------------------------------------------------------------------
// Resolver trait
// ---------------------------------------------------------------------------

/// A dispatcher of decoded values to handlers.
///
/// `C` is the caller's dispatch context, handed mutably to the handler
/// that runs.
pub trait Resolver<C, E = ResolveError>: Send + Sync {
    fn resolve(&self, ctx: &mut C, value: &TypedValue) -> Result<(), E>;
}

impl<C, E, R: Resolver<C, E> + ?Sized> Resolver<C, E> for Box<R> {
    fn resolve(&self, ctx: &mut C, value: &TypedValue) -> Result<(), E> {
        (**self).resolve(ctx, value)
    }
}

impl<C, E, R: Resolver<C, E> + ?Sized> Resolver<C, E> for std::sync::Arc<R> {
    fn resolve(&self, ctx: &mut C, value: &TypedValue) -> Result<(), E> {
        (**self).resolve(ctx, value)
    }
}

impl<C, E, R: Resolver<C, E> + ?Sized> Resolver<C, E> for &R {
    fn resolve(&self, ctx: &mut C, value: &TypedValue) -> Result<(), E> {
        (**self).resolve(ctx, value)
    }
}

// ---------------------------------------------------------------------------
// Document header
// ---------------------------------------------------------------------------

/// The parts of a document needed before any type is decoded.
pub(crate) struct DocumentHeader<'a> {
    pub map: &'a Map<String, Value>,
    pub candidates: Vec<String>,
    pub aliases: AliasMap,
}

/// Check `type` then `@context`, and build the document's alias map.
pub(crate) fn read_header(doc: &Value) -> ResolveResult<DocumentHeader<'_>> {
    let Value::Object(map) = doc else {
        return Err(ResolveError::MissingType);
    };
    let declared = map.get("type").ok_or(ResolveError::MissingType)?;
    let candidates = codec::declared_types(map).ok_or_else(|| ResolveError::InvalidType {
        found: codec::json_kind(declared).to_string(),
    })?;
    let context = map.get("@context").ok_or(ResolveError::MissingContext)?;
    Ok(DocumentHeader {
        map,
        candidates,
        aliases: AliasMap::from_context(context),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn type_is_checked_before_context() {
        assert!(matches!(read_header(&json!({})), Err(ResolveError::MissingType)));
        assert!(matches!(
            read_header(&json!({"type": "Note"})),
            Err(ResolveError::MissingContext)
        ));
        assert!(matches!(
            read_header(&json!({"@context": "x", "type": 3})),
            Err(ResolveError::InvalidType { ref found }) if found == "a number"
        ));
        assert!(matches!(
            read_header(&json!({"type": {"name": "Note"}})),
            Err(ResolveError::InvalidType { .. })
        ));
        assert!(matches!(read_header(&json!([1, 2])), Err(ResolveError::MissingType)));
    }

    #[test]
    fn header_collects_candidates_and_aliases() {
        let doc = json!({
            "@context": {"as": "https://www.w3.org/ns/activitystreams"},
            "type": ["as:Note", 1, "Thing"],
        });
        let header = read_header(&doc).unwrap();
        assert_eq!(header.candidates, ["as:Note", "Thing"]);
        assert_eq!(header.aliases.alias("http://www.w3.org/ns/activitystreams"), Some("as"));
    }

    #[test]
    fn deserialize_errors_keep_their_code() {
        let err: ResolveError = DeserializeError::DepthExceeded { max_depth: 32 }.into();
        let code = err.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("vocab::deserialize::depth_exceeded"));
    }
}
