//! Interface resolver: dispatch on the capabilities a value carries.

use std::fmt;
use std::sync::Arc;

use tracing::trace;

use super::{ResolveError, ResolveResult, Resolver};
use crate::catalogue::Catalogue;
use crate::vocab::{Capability, TypedValue, VocabType};

type InterfaceHandler<C, E> = Box<dyn Fn(&mut C, &TypedValue) -> Result<(), E> + Send + Sync>;

struct Registration<C, E> {
    capability: &'static str,
    satisfied_by: fn(VocabType) -> bool,
    handler: InterfaceHandler<C, E>,
}

/// Dispatches a [`TypedValue`] to the first registered handler whose
/// capability it satisfies.
///
/// Capabilities overlap (a `Create` is both `Object` and `Activity`), so
/// registration order decides: register narrow capabilities before broad
/// ones.
pub struct InterfaceResolver<C, E = ResolveError> {
    catalogue: Arc<Catalogue>,
    handlers: Vec<Registration<C, E>>,
}

impl<C, E> fmt::Debug for InterfaceResolver<C, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let capabilities: Vec<&str> = self.handlers.iter().map(|h| h.capability).collect();
        f.debug_struct("InterfaceResolver")
            .field("handlers", &capabilities)
            .finish()
    }
}

impl<C, E: From<ResolveError>> InterfaceResolver<C, E> {
    pub fn new(catalogue: Arc<Catalogue>) -> Self {
        Self {
            catalogue,
            handlers: Vec::new(),
        }
    }

    /// Register a handler for every value carrying capability `K`.
    ///
    /// Fails with [`ResolveError::UnrecognizedSignature`] when no catalogue
    /// type satisfies `K`.
    pub fn on<K, F>(&mut self, handler: F) -> ResolveResult<&mut Self>
    where
        K: Capability,
        F: Fn(&mut C, &K::View) -> Result<(), E> + Send + Sync + 'static,
    {
        if !self.catalogue.types().any(|e| K::satisfied_by(e.tag())) {
            return Err(ResolveError::UnrecognizedSignature {
                signature: K::NAME.to_string(),
            });
        }
        let handler: InterfaceHandler<C, E> =
            Box::new(move |ctx: &mut C, value: &TypedValue| match K::view(value) {
                Some(view) => handler(ctx, view),
                None => Err(ResolveError::CannotTypeAssertType {
                    type_name: value.type_name().to_string(),
                }
                .into()),
            });
        self.handlers.push(Registration {
            capability: K::NAME,
            satisfied_by: K::satisfied_by,
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

impl<C, E: From<ResolveError>> Resolver<C, E> for InterfaceResolver<C, E> {
    fn resolve(&self, ctx: &mut C, value: &TypedValue) -> Result<(), E> {
        let tag = value.vocab_type();
        match self.handlers.iter().find(|h| (h.satisfied_by)(tag)) {
            Some(registration) => {
                trace!(
                    type_name = tag.name(),
                    capability = registration.capability,
                    "interface resolver dispatching"
                );
                (registration.handler)(ctx, value)
            }
            None => Err(ResolveError::NoCallbackMatch {
                type_name: tag.name().to_string(),
            }
            .into()),
        }
    }
}
