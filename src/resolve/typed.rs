//! Type resolver: dispatch on the exact type of a decoded value.

use std::fmt;
use std::sync::Arc;

use tracing::trace;

use super::{ResolveError, ResolveResult, Resolver};
use crate::catalogue::Catalogue;
use crate::vocab::{TypedValue, VocabType, VocabularyKind};

type TypedHandler<C, E> = Box<dyn Fn(&mut C, &TypedValue) -> Result<(), E> + Send + Sync>;

struct Registration<C, E> {
    accepts: VocabType,
    handler: TypedHandler<C, E>,
}

/// Dispatches a [`TypedValue`] to the first handler registered for its
/// exact type. Supertypes do not match: a `Create` handler never sees an
/// `Activity`, and an `Activity` handler never sees a `Create`.
pub struct TypeResolver<C, E = ResolveError> {
    catalogue: Arc<Catalogue>,
    handlers: Vec<Registration<C, E>>,
}

impl<C, E> fmt::Debug for TypeResolver<C, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let accepts: Vec<&str> = self.handlers.iter().map(|h| h.accepts.name()).collect();
        f.debug_struct("TypeResolver")
            .field("handlers", &accepts)
            .finish()
    }
}

impl<C, E: From<ResolveError>> TypeResolver<C, E> {
    pub fn new(catalogue: Arc<Catalogue>) -> Self {
        Self {
            catalogue,
            handlers: Vec::new(),
        }
    }

    /// Register a handler for values of exactly type `T`.
    pub fn on<T, F>(&mut self, handler: F) -> ResolveResult<&mut Self>
    where
        T: VocabularyKind,
        F: Fn(&mut C, &T) -> Result<(), E> + Send + Sync + 'static,
    {
        if !self.catalogue.contains_type(T::TYPE) {
            return Err(ResolveError::UnrecognizedSignature {
                signature: T::TYPE.name().to_string(),
            });
        }
        let handler: TypedHandler<C, E> =
            Box::new(move |ctx: &mut C, value: &TypedValue| match T::from_ref(value) {
                Some(typed) => handler(ctx, typed),
                None => Err(ResolveError::CannotTypeAssertType {
                    type_name: value.type_name().to_string(),
                }
                .into()),
            });
        self.handlers.push(Registration {
            accepts: T::TYPE,
            handler,
        });
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<C, E: From<ResolveError>> Resolver<C, E> for TypeResolver<C, E> {
    fn resolve(&self, ctx: &mut C, value: &TypedValue) -> Result<(), E> {
        let tag = value.vocab_type();
        match self.handlers.iter().find(|h| h.accepts == tag) {
            Some(registration) => {
                trace!(type_name = tag.name(), "type resolver dispatching");
                (registration.handler)(ctx, value)
            }
            None => Err(ResolveError::NoCallbackMatch {
                type_name: tag.name().to_string(),
            }
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::{Activity, Create, Like};

    fn resolver() -> TypeResolver<Vec<VocabType>> {
        let mut resolver = TypeResolver::new(Arc::new(Catalogue::standard()));
        resolver
            .on::<Activity, _>(|seen: &mut Vec<VocabType>, _: &Activity| {
                seen.push(VocabType::Activity);
                Ok(())
            })
            .unwrap()
            .on::<Create, _>(|seen: &mut Vec<VocabType>, _: &Create| {
                seen.push(VocabType::Create);
                Ok(())
            })
            .unwrap();
        resolver
    }

    #[test]
    fn exact_type_only() {
        let resolver = resolver();
        let mut seen = Vec::new();
        resolver.resolve(&mut seen, &Create::new().into()).unwrap();
        resolver.resolve(&mut seen, &Activity::new().into()).unwrap();
        assert_eq!(seen, [VocabType::Create, VocabType::Activity]);

        let err = resolver.resolve(&mut seen, &Like::new().into()).unwrap_err();
        assert!(matches!(err, ResolveError::NoCallbackMatch { ref type_name } if type_name == "Like"));
    }

    #[test]
    fn handler_errors_propagate() {
        let mut resolver: TypeResolver<()> = TypeResolver::new(Arc::new(Catalogue::standard()));
        resolver
            .on::<Like, _>(|_, _: &Like| Err(ResolveError::MissingContext))
            .unwrap();
        let err = resolver.resolve(&mut (), &Like::new().into()).unwrap_err();
        assert!(matches!(err, ResolveError::MissingContext));
    }
}
