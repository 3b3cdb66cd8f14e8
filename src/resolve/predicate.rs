//! Predicated resolvers: a predicate gates a delegate resolver.
//!
//! `apply` checks the value against the predicate's signature before the
//! predicate runs. A value of the wrong type or capability yields
//! [`ResolveError::PredicateUnmatched`] and the predicate is never called.
//! Otherwise the predicate decides: `Ok(false)` skips the delegate,
//! `Ok(true)` means the delegate ran and succeeded.

use std::fmt;

use tracing::trace;

use super::{ResolveError, ResolveResult, Resolver};
use crate::catalogue::Catalogue;
use crate::vocab::{Capability, TypedValue, VocabType, VocabularyKind};

type Predicate<C, E> = Box<dyn Fn(&mut C, &TypedValue) -> Result<bool, E> + Send + Sync>;

// ---------------------------------------------------------------------------
// By exact type
// ---------------------------------------------------------------------------

/// Runs `delegate` only for values of one exact type that pass a predicate.
pub struct TypePredicatedResolver<C, E, R> {
    accepts: VocabType,
    predicate: Predicate<C, E>,
    delegate: R,
}

impl<C, E, R: fmt::Debug> fmt::Debug for TypePredicatedResolver<C, E, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypePredicatedResolver")
            .field("accepts", &self.accepts.name())
            .field("delegate", &self.delegate)
            .finish()
    }
}

impl<C, E, R> TypePredicatedResolver<C, E, R>
where
    E: From<ResolveError>,
    R: Resolver<C, E>,
{
    /// Gate `delegate` on `predicate` over values of type `T`.
    ///
    /// Fails with [`ResolveError::UnrecognizedPredicateSignature`] when `T`
    /// is not in `catalogue`.
    pub fn new<T, F>(catalogue: &Catalogue, delegate: R, predicate: F) -> ResolveResult<Self>
    where
        T: VocabularyKind,
        F: Fn(&mut C, &T) -> Result<bool, E> + Send + Sync + 'static,
    {
        if !catalogue.contains_type(T::TYPE) {
            return Err(ResolveError::UnrecognizedPredicateSignature {
                signature: T::TYPE.name().to_string(),
            });
        }
        let predicate: Predicate<C, E> =
            Box::new(move |ctx: &mut C, value: &TypedValue| match T::from_ref(value) {
                Some(typed) => predicate(ctx, typed),
                None => Err(ResolveError::CannotTypeAssertPredicate {
                    type_name: value.type_name().to_string(),
                }
                .into()),
            });
        Ok(Self {
            accepts: T::TYPE,
            predicate,
            delegate,
        })
    }

    /// Evaluate the predicate and, if it passes, the delegate.
    pub fn apply(&self, ctx: &mut C, value: &TypedValue) -> Result<bool, E> {
        let tag = value.vocab_type();
        if tag != self.accepts {
            return Err(ResolveError::PredicateUnmatched {
                expected: self.accepts.name().to_string(),
                actual: tag.name().to_string(),
            }
            .into());
        }
        gate(&self.predicate, &self.delegate, ctx, value)
    }

    pub fn delegate(&self) -> &R {
        &self.delegate
    }
}

impl<C, E, R> Resolver<C, E> for TypePredicatedResolver<C, E, R>
where
    E: From<ResolveError>,
    R: Resolver<C, E>,
{
    fn resolve(&self, ctx: &mut C, value: &TypedValue) -> Result<(), E> {
        self.apply(ctx, value).map(|_| ())
    }
}

// ---------------------------------------------------------------------------
// By capability
// ---------------------------------------------------------------------------

/// Runs `delegate` only for values carrying one capability that pass a
/// predicate.
pub struct InterfacePredicatedResolver<C, E, R> {
    capability: &'static str,
    satisfied_by: fn(VocabType) -> bool,
    predicate: Predicate<C, E>,
    delegate: R,
}

impl<C, E, R: fmt::Debug> fmt::Debug for InterfacePredicatedResolver<C, E, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterfacePredicatedResolver")
            .field("capability", &self.capability)
            .field("delegate", &self.delegate)
            .finish()
    }
}

impl<C, E, R> InterfacePredicatedResolver<C, E, R>
where
    E: From<ResolveError>,
    R: Resolver<C, E>,
{
    /// Gate `delegate` on `predicate` over values carrying capability `K`.
    pub fn new<K, F>(catalogue: &Catalogue, delegate: R, predicate: F) -> ResolveResult<Self>
    where
        K: Capability,
        F: Fn(&mut C, &K::View) -> Result<bool, E> + Send + Sync + 'static,
    {
        if !catalogue.types().any(|e| K::satisfied_by(e.tag())) {
            return Err(ResolveError::UnrecognizedPredicateSignature {
                signature: K::NAME.to_string(),
            });
        }
        let predicate: Predicate<C, E> =
            Box::new(move |ctx: &mut C, value: &TypedValue| match K::view(value) {
                Some(view) => predicate(ctx, view),
                None => Err(ResolveError::CannotTypeAssertPredicate {
                    type_name: value.type_name().to_string(),
                }
                .into()),
            });
        Ok(Self {
            capability: K::NAME,
            satisfied_by: K::satisfied_by,
            predicate,
            delegate,
        })
    }

    /// Evaluate the predicate and, if it passes, the delegate.
    pub fn apply(&self, ctx: &mut C, value: &TypedValue) -> Result<bool, E> {
        let tag = value.vocab_type();
        if !(self.satisfied_by)(tag) {
            return Err(ResolveError::PredicateUnmatched {
                expected: self.capability.to_string(),
                actual: tag.name().to_string(),
            }
            .into());
        }
        gate(&self.predicate, &self.delegate, ctx, value)
    }

    pub fn delegate(&self) -> &R {
        &self.delegate
    }
}

impl<C, E, R> Resolver<C, E> for InterfacePredicatedResolver<C, E, R>
where
    E: From<ResolveError>,
    R: Resolver<C, E>,
{
    fn resolve(&self, ctx: &mut C, value: &TypedValue) -> Result<(), E> {
        self.apply(ctx, value).map(|_| ())
    }
}

fn gate<C, E, R: Resolver<C, E>>(
    predicate: &Predicate<C, E>,
    delegate: &R,
    ctx: &mut C,
    value: &TypedValue,
) -> Result<bool, E> {
    if !predicate(ctx, value)? {
        trace!(type_name = value.type_name(), "predicate rejected value");
        return Ok(false);
    }
    delegate.resolve(ctx, value)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::TypeResolver;
    use crate::vocab::capability::Actor;
    use crate::vocab::{Create, Note, ObjectLike, Person};
    use std::sync::Arc;

    #[derive(Default)]
    struct Counts {
        predicate: usize,
        delegate: usize,
    }

    fn delegate(catalogue: &Arc<Catalogue>) -> TypeResolver<Counts> {
        let mut resolver = TypeResolver::new(Arc::clone(catalogue));
        resolver
            .on::<Create, _>(|counts: &mut Counts, _: &Create| {
                counts.delegate += 1;
                Ok(())
            })
            .unwrap();
        resolver
    }

    #[test]
    fn signature_is_checked_before_the_predicate() {
        let catalogue = Arc::new(Catalogue::standard());
        let gated = TypePredicatedResolver::new::<Create, _>(
            &catalogue,
            delegate(&catalogue),
            |counts: &mut Counts, _: &Create| {
                counts.predicate += 1;
                Ok(true)
            },
        )
        .unwrap();

        let mut counts = Counts::default();
        let err = gated.apply(&mut counts, &Note::new().into()).unwrap_err();
        assert!(matches!(err, ResolveError::PredicateUnmatched { .. }));
        assert_eq!(counts.predicate, 0);
        assert_eq!(counts.delegate, 0);

        assert!(gated.apply(&mut counts, &Create::new().into()).unwrap());
        assert_eq!((counts.predicate, counts.delegate), (1, 1));
    }

    #[test]
    fn false_predicate_skips_the_delegate() {
        let catalogue = Arc::new(Catalogue::standard());
        let gated = TypePredicatedResolver::new::<Create, _>(
            &catalogue,
            delegate(&catalogue),
            |_: &mut Counts, create: &Create| Ok(create.name().is_resolved()),
        )
        .unwrap();

        let mut counts = Counts::default();
        assert!(!gated.apply(&mut counts, &Create::new().into()).unwrap());
        assert_eq!(counts.delegate, 0);
    }

    #[test]
    fn capability_gate() {
        let catalogue = Arc::new(Catalogue::standard());
        let mut inner: TypeResolver<Counts> = TypeResolver::new(Arc::clone(&catalogue));
        inner
            .on::<Person, _>(|counts: &mut Counts, _: &Person| {
                counts.delegate += 1;
                Ok(())
            })
            .unwrap();
        let gated = InterfacePredicatedResolver::new::<Actor, _>(
            &catalogue,
            inner,
            |counts: &mut Counts, actor| {
                counts.predicate += 1;
                Ok(actor.preferred_username().is_unresolved())
            },
        )
        .unwrap();

        let mut counts = Counts::default();
        assert!(gated.apply(&mut counts, &Person::new().into()).unwrap());
        let err = gated.apply(&mut counts, &Note::new().into()).unwrap_err();
        assert!(matches!(err, ResolveError::PredicateUnmatched { ref expected, .. } if expected == "ActorLike"));
        assert_eq!((counts.predicate, counts.delegate), (1, 1));
    }

    #[test]
    fn predicate_registration_is_validated() {
        let toot_only = Catalogue::with_vocabularies(&[crate::vocab::Vocabulary::Toot]);
        let full = Arc::new(Catalogue::standard());
        let err = TypePredicatedResolver::new::<Create, _>(&toot_only, delegate(&full), |_, _| Ok(true))
            .unwrap_err();
        assert!(matches!(err, ResolveError::UnrecognizedPredicateSignature { .. }));
    }
}
