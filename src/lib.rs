// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

//! # activity-vocab
//!
//! Typed ActivityStreams 2.0 vocabulary for JSON-LD documents: decoding,
//! type resolution, handler dispatch and type-hierarchy queries.
//!
//! ## Architecture
//!
//! - **Alias maps** (`alias`): fold a document's `@context` into term → alias
//! - **Vocabulary** (`vocab`): the closed set of known types, their capability
//!   traits and the `extends` hierarchy
//! - **Properties** (`property`): schema, literal parsing, the
//!   `Resolution`/`Presence` model and the JSON codec
//! - **Catalogue** (`catalogue`): the registry of recognised types and their
//!   deserialisers, passed explicitly to every resolver
//! - **Resolvers** (`resolve`): document, type, interface and predicated
//!   dispatch to user handlers
//!
//! ## Library usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use activity_vocab::catalogue::Catalogue;
//! use activity_vocab::resolve::{JsonResolver, ResolveError};
//! use activity_vocab::vocab::{Create, ObjectLike};
//!
//! let catalogue = Arc::new(Catalogue::standard());
//! let mut resolver: JsonResolver<Vec<String>> = JsonResolver::new(catalogue);
//! resolver
//!     .on::<Create, _>(|seen, create| {
//!         seen.push(create.name().unwrap_or_default().to_string());
//!         Ok(())
//!     })
//!     .unwrap();
//!
//! let doc = serde_json::json!({
//!     "@context": "https://www.w3.org/ns/activitystreams",
//!     "type": "Create",
//!     "name": "hello",
//! });
//! let mut seen = Vec::new();
//! resolver.resolve(&mut seen, &doc).unwrap();
//! # let _: Result<(), ResolveError> = Ok(());
//! ```

pub mod alias;
pub mod catalogue;
pub mod config;
pub mod error;
pub mod property;
pub mod resolve;
pub mod vocab;
