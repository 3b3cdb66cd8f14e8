//! Document resolver: raw JSON-LD in, one handler call out.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::trace;

use super::{ResolveError, ResolveResult, read_header};
use crate::catalogue::Catalogue;
use crate::property::codec::Decoder;
use crate::vocab::{TypedValue, VocabType, VocabularyKind};

type DocumentHandler<C, E> = Box<dyn Fn(&mut C, TypedValue) -> Result<(), E> + Send + Sync>;

struct Registration<C, E> {
    accepts: VocabType,
    handler: DocumentHandler<C, E>,
}

/// Resolves JSON-LD documents to handlers by declared type.
///
/// Declared types are tried in document order. Unrecognised types are
/// skipped. The first recognised type is decoded and handed to the first
/// handler registered for exactly that type; if there is none the result is
/// [`ResolveError::NoCallbackMatch`], even when a later declared type has a
/// handler.
pub struct JsonResolver<C, E = ResolveError> {
    catalogue: Arc<Catalogue>,
    handlers: Vec<Registration<C, E>>,
}

impl<C, E> fmt::Debug for JsonResolver<C, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let accepts: Vec<&str> = self.handlers.iter().map(|h| h.accepts.name()).collect();
        f.debug_struct("JsonResolver")
            .field("handlers", &accepts)
            .field("catalogue", &self.catalogue)
            .finish()
    }
}

impl<C, E: From<ResolveError>> JsonResolver<C, E> {
    pub fn new(catalogue: Arc<Catalogue>) -> Self {
        Self {
            catalogue,
            handlers: Vec::new(),
        }
    }

    /// Register a handler for values of exactly type `T`.
    ///
    /// Fails with [`ResolveError::UnrecognizedSignature`] when `T` is not in
    /// the catalogue. Handlers registered earlier win.
    pub fn on<T, F>(&mut self, handler: F) -> ResolveResult<&mut Self>
    where
        T: VocabularyKind,
        F: Fn(&mut C, T) -> Result<(), E> + Send + Sync + 'static,
    {
        if !self.catalogue.contains_type(T::TYPE) {
            return Err(ResolveError::UnrecognizedSignature {
                signature: T::TYPE.name().to_string(),
            });
        }
        let handler: DocumentHandler<C, E> =
            Box::new(move |ctx: &mut C, value: TypedValue| match T::from_value(value) {
                Ok(value) => handler(ctx, value),
                Err(other) => Err(ResolveError::CannotTypeAssertType {
                    type_name: other.type_name().to_string(),
                }
                .into()),
            });
        self.handlers.push(Registration {
            accepts: T::TYPE,
            handler,
        });
        Ok(self)
    }

    /// Types with a registered handler, in registration order.
    pub fn accepted_types(&self) -> impl Iterator<Item = VocabType> + '_ {
        self.handlers.iter().map(|h| h.accepts)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn catalogue(&self) -> &Arc<Catalogue> {
        &self.catalogue
    }

    /// Decode `doc` and run the handler for its first recognised type.
    pub fn resolve(&self, ctx: &mut C, doc: &Value) -> Result<(), E> {
        let header = read_header(doc)?;

        for candidate in &header.candidates {
            let Some(entry) = self.catalogue.recognize(candidate, &header.aliases) else {
                trace!(candidate = candidate.as_str(), "skipping unrecognised type");
                continue;
            };

            let decoder = Decoder::new(&self.catalogue, &header.aliases);
            let value = entry
                .deserialize(header.map, &decoder)
                .map_err(ResolveError::from)?;
            let tag = value.vocab_type();

            return match self.handlers.iter().find(|h| h.accepts == tag) {
                Some(registration) => {
                    trace!(type_name = tag.name(), "dispatching document");
                    (registration.handler)(ctx, value)
                }
                None => Err(ResolveError::NoCallbackMatch {
                    type_name: tag.name().to_string(),
                }
                .into()),
            };
        }

        Err(ResolveError::UnhandledType {
            declared: header.candidates.clone(),
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::{Create, Note, ObjectLike};
    use serde_json::json;

    const AS: &str = "https://www.w3.org/ns/activitystreams";

    fn resolver() -> JsonResolver<Vec<&'static str>> {
        let mut resolver = JsonResolver::new(Arc::new(Catalogue::standard()));
        resolver
            .on::<Create, _>(|seen: &mut Vec<&'static str>, _| {
                seen.push("create");
                Ok(())
            })
            .unwrap()
            .on::<Note, _>(|seen: &mut Vec<&'static str>, note: Note| {
                assert_eq!(note.content().resolved(), Some("hi"));
                seen.push("note");
                Ok(())
            })
            .unwrap();
        resolver
    }

    #[test]
    fn dispatches_to_the_exact_type() {
        let mut seen = Vec::new();
        resolver()
            .resolve(&mut seen, &json!({"@context": AS, "type": "Note", "content": "hi"}))
            .unwrap();
        assert_eq!(seen, ["note"]);
    }

    #[test]
    fn recognised_type_without_handler_is_terminal() {
        let mut seen = Vec::new();
        let err = resolver()
            .resolve(&mut seen, &json!({"@context": AS, "type": ["Article", "Note"]}))
            .unwrap_err();
        assert!(matches!(err, ResolveError::NoCallbackMatch { ref type_name } if type_name == "Article"));
        assert!(seen.is_empty());
    }

    #[test]
    fn registration_requires_catalogue_membership() {
        let catalogue = Arc::new(Catalogue::with_vocabularies(&[]));
        let mut resolver: JsonResolver<()> = JsonResolver::new(catalogue);
        let err = resolver.on::<Create, _>(|_, _| Ok(())).unwrap_err();
        assert!(matches!(err, ResolveError::UnrecognizedSignature { .. }));
        assert!(resolver.is_empty());
    }

    #[test]
    fn debug_lists_handlers() {
        let rendered = format!("{:?}", resolver());
        assert!(rendered.contains("[\"Create\", \"Note\"]"));
    }
}
