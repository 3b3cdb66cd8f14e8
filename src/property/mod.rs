//! Property values and the resolution model.
//!
//! A property holds zero or more [`PropertySlot`]s. Exactly one shape is
//! active per slot, and reads never coerce between shapes: asking a nested
//! object for a string reports [`Resolution::RawResolutionNeeded`] rather
//! than guessing.
//!
//! | Slot shape                               | `get`                 | `presence`           |
//! |------------------------------------------|-----------------------|----------------------|
//! | empty                                    | `Unresolved`          | `NoPresence`         |
//! | literal of the requested kind            | `Resolved(v)`         | `ConvenientPresence` |
//! | literal of another kind                  | `RawResolutionNeeded` | `ConvenientPresence` |
//! | object, link, IRI, language map, raw     | `RawResolutionNeeded` | `RawPresence`        |

pub mod codec;
pub mod literal;
pub mod schema;
mod store;

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, FixedOffset, TimeDelta};
use serde_json::Value;

pub use literal::Literal;
pub use schema::{PropertyDef, Range};
pub use store::Properties;

use crate::vocab::TypedValue;

// ---------------------------------------------------------------------------
// IRI references
// ---------------------------------------------------------------------------

/// A bare IRI reference to a node not embedded in the document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Iri(String);

impl Iri {
    pub fn new(iri: impl Into<String>) -> Self {
        Self(iri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Iri {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Iri {
    fn from(s: String) -> Self {
        Self(s)
    }
}

// ---------------------------------------------------------------------------
// Resolution model
// ---------------------------------------------------------------------------

/// Outcome of reading a property through the convenience surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution<T> {
    /// The slot held a literal of the requested kind.
    Resolved(T),
    /// The slot holds a value, but not one the convenience surface can hand
    /// out; inspect the [`PropertySlot`] directly.
    RawResolutionNeeded,
    /// The slot is empty.
    Unresolved,
}

impl<T> Resolution<T> {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    pub fn needs_raw(&self) -> bool {
        matches!(self, Self::RawResolutionNeeded)
    }

    pub fn is_unresolved(&self) -> bool {
        matches!(self, Self::Unresolved)
    }

    /// The resolved value, discarding the distinction between the other two
    /// outcomes.
    pub fn resolved(self) -> Option<T> {
        match self {
            Self::Resolved(v) => Some(v),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Resolution<U> {
        match self {
            Self::Resolved(v) => Resolution::Resolved(f(v)),
            Self::RawResolutionNeeded => Resolution::RawResolutionNeeded,
            Self::Unresolved => Resolution::Unresolved,
        }
    }

    pub fn unwrap_or(self, default: T) -> T {
        self.resolved().unwrap_or(default)
    }

    pub fn unwrap_or_default(self) -> T
    where
        T: Default,
    {
        self.resolved().unwrap_or_default()
    }
}

/// What kind of value, if any, a slot holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Presence {
    NoPresence,
    /// A literal; some convenience getter resolves it.
    ConvenientPresence,
    /// A nested value, reference, language map or raw JSON.
    RawPresence,
}

// ---------------------------------------------------------------------------
// Slots
// ---------------------------------------------------------------------------

/// One value of a property.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PropertySlot {
    #[default]
    Empty,
    Literal(Literal),
    /// An embedded non-link value.
    Object(Box<TypedValue>),
    /// An embedded link value.
    Link(Box<TypedValue>),
    /// A reference by IRI.
    Iri(Iri),
    /// Natural-language values keyed by BCP 47 tag (`nameMap` and friends).
    LanguageMap(BTreeMap<String, String>),
    /// JSON the schema does not describe, kept verbatim.
    Raw(Value),
}

impl PropertySlot {
    /// Wrap an embedded value in the slot matching its family.
    pub fn embed(value: TypedValue) -> Self {
        if value.is_link() {
            Self::Link(Box::new(value))
        } else {
            Self::Object(Box::new(value))
        }
    }

    pub fn presence(&self) -> Presence {
        match self {
            Self::Empty => Presence::NoPresence,
            Self::Literal(_) => Presence::ConvenientPresence,
            Self::Object(_) | Self::Link(_) | Self::Iri(_) | Self::LanguageMap(_) | Self::Raw(_) => {
                Presence::RawPresence
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    fn resolve<'a, T>(&'a self, pick: impl FnOnce(&'a Literal) -> Option<T>) -> Resolution<T> {
        match self {
            Self::Empty => Resolution::Unresolved,
            Self::Literal(lit) => match pick(lit) {
                Some(v) => Resolution::Resolved(v),
                None => Resolution::RawResolutionNeeded,
            },
            _ => Resolution::RawResolutionNeeded,
        }
    }

    pub fn get_str(&self) -> Resolution<&str> {
        self.resolve(|lit| match lit {
            Literal::String(s) => Some(s.as_str()),
            _ => None,
        })
    }

    pub fn get_uri(&self) -> Resolution<&str> {
        self.resolve(|lit| match lit {
            Literal::Uri(s) => Some(s.as_str()),
            _ => None,
        })
    }

    pub fn get_datetime(&self) -> Resolution<DateTime<FixedOffset>> {
        self.resolve(|lit| match lit {
            Literal::DateTime(dt) => Some(*dt),
            _ => None,
        })
    }

    pub fn get_duration(&self) -> Resolution<TimeDelta> {
        self.resolve(|lit| match lit {
            Literal::Duration(d) => Some(*d),
            _ => None,
        })
    }

    pub fn get_uint(&self) -> Resolution<u64> {
        self.resolve(|lit| match lit {
            Literal::Integer(n) => Some(*n),
            _ => None,
        })
    }

    pub fn get_float(&self) -> Resolution<f64> {
        self.resolve(|lit| match lit {
            Literal::Float(x) => Some(*x),
            _ => None,
        })
    }

    pub fn get_bool(&self) -> Resolution<bool> {
        self.resolve(|lit| match lit {
            Literal::Boolean(b) => Some(*b),
            _ => None,
        })
    }

    pub fn get_language_tag(&self) -> Resolution<&str> {
        self.resolve(|lit| match lit {
            Literal::LanguageTag(t) => Some(t.as_str()),
            _ => None,
        })
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Self::Literal(lit) => Some(lit),
            _ => None,
        }
    }

    pub fn as_iri(&self) -> Option<&Iri> {
        match self {
            Self::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&TypedValue> {
        match self {
            Self::Object(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_link(&self) -> Option<&TypedValue> {
        match self {
            Self::Link(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_language_map(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            Self::LanguageMap(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_raw(&self) -> Option<&Value> {
        match self {
            Self::Raw(v) => Some(v),
            _ => None,
        }
    }

    /// The IRI this slot points at: the reference itself, or the `id` of an
    /// embedded value.
    pub fn reference(&self) -> Option<&Iri> {
        match self {
            Self::Iri(iri) => Some(iri),
            Self::Object(v) | Self::Link(v) => v.id(),
            _ => None,
        }
    }

    /// Short label of the active shape, for diagnostics.
    pub fn shape_name(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Literal(lit) => lit.kind_name(),
            Self::Object(_) => "object",
            Self::Link(_) => "link",
            Self::Iri(_) => "IRI",
            Self::LanguageMap(_) => "language map",
            Self::Raw(_) => "raw JSON",
        }
    }
}

impl From<Literal> for PropertySlot {
    fn from(lit: Literal) -> Self {
        Self::Literal(lit)
    }
}

impl From<Iri> for PropertySlot {
    fn from(iri: Iri) -> Self {
        Self::Iri(iri)
    }
}

impl From<TypedValue> for PropertySlot {
    fn from(value: TypedValue) -> Self {
        Self::embed(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::{Mention, Note};
    use serde_json::json;

    fn published() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2024-05-01T10:00:00+02:00").unwrap()
    }

    fn every_shape() -> Vec<PropertySlot> {
        vec![
            PropertySlot::Empty,
            Literal::String("s".into()).into(),
            Literal::Uri("https://example.com".into()).into(),
            Literal::DateTime(published()).into(),
            Literal::Duration(TimeDelta::minutes(90)).into(),
            Literal::Integer(3).into(),
            Literal::Float(0.5).into(),
            Literal::Boolean(true).into(),
            Literal::LanguageTag("en".into()).into(),
            PropertySlot::embed(TypedValue::from(Note::new())),
            PropertySlot::embed(TypedValue::from(Mention::new())),
            Iri::new("https://example.com/x").into(),
            PropertySlot::LanguageMap(BTreeMap::from([("en".into(), "hi".into())])),
            PropertySlot::Raw(json!({"custom": 1})),
        ]
    }

    #[test]
    fn resolution_is_consistent_with_presence() {
        for slot in every_shape() {
            let outcomes = [
                slot.get_str().map(|_| ()),
                slot.get_uri().map(|_| ()),
                slot.get_datetime().map(|_| ()),
                slot.get_duration().map(|_| ()),
                slot.get_uint().map(|_| ()),
                slot.get_float().map(|_| ()),
                slot.get_bool().map(|_| ()),
                slot.get_language_tag().map(|_| ()),
            ];
            match slot.presence() {
                Presence::NoPresence => {
                    assert!(outcomes.iter().all(Resolution::is_unresolved));
                }
                Presence::ConvenientPresence => {
                    assert_eq!(outcomes.iter().filter(|o| o.is_resolved()).count(), 1);
                    assert!(!outcomes.iter().any(Resolution::is_unresolved));
                }
                Presence::RawPresence => {
                    assert!(outcomes.iter().all(Resolution::needs_raw), "{}", slot.shape_name());
                }
            }
        }
    }

    #[test]
    fn temporal_literals_resolve() {
        let when = PropertySlot::from(Literal::DateTime(published()));
        assert_eq!(when.get_datetime(), Resolution::Resolved(published()));
        assert!(when.get_duration().needs_raw());
        assert_eq!(when.presence(), Presence::ConvenientPresence);

        let span = PropertySlot::from(Literal::Duration(TimeDelta::minutes(90)));
        assert_eq!(span.get_duration(), Resolution::Resolved(TimeDelta::minutes(90)));
        assert!(span.get_datetime().needs_raw());
        assert_eq!(span.presence(), Presence::ConvenientPresence);
    }

    #[test]
    fn embed_picks_the_slot_family() {
        assert!(matches!(
            PropertySlot::embed(TypedValue::from(Mention::new())),
            PropertySlot::Link(_)
        ));
        assert!(matches!(
            PropertySlot::embed(TypedValue::from(Note::new())),
            PropertySlot::Object(_)
        ));
    }

    #[test]
    fn reference_reads_embedded_ids() {
        let note = TypedValue::from(Note::new().with_id("https://example.com/n/1"));
        let slot = PropertySlot::embed(note);
        assert_eq!(slot.reference().map(Iri::as_str), Some("https://example.com/n/1"));
        assert_eq!(PropertySlot::Raw(json!("x")).reference(), None);
    }

    #[test]
    fn resolution_helpers() {
        assert_eq!(Resolution::Resolved(2).map(|n| n * 2), Resolution::Resolved(4));
        assert_eq!(Resolution::<u64>::RawResolutionNeeded.unwrap_or(7), 7);
        assert_eq!(Resolution::<&str>::Unresolved.unwrap_or_default(), "");
    }
}
