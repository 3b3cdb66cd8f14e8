//! Per-value property storage with validated mutation.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, TimeDelta};
use serde_json::{Map, Value};

use super::schema::{self, PropertyDef, Range};
use super::{Iri, Presence, PropertySlot, Resolution};
use crate::error::{PropertyError, PropertyResult};
use crate::vocab::VocabType;

static EMPTY: PropertySlot = PropertySlot::Empty;

/// Properties of one vocabulary value.
///
/// Slots are kept per canonical (unprefixed) term in insertion order.
/// Mutations through the typed surface are checked against the type's
/// schema: unknown terms, range mismatches and a second value for a
/// functional property are rejected and leave the store unchanged.
/// Members outside the schema live in [`unknown`](Self::unknown) and are
/// written back verbatim on serialisation.
#[derive(Debug, Clone, PartialEq)]
pub struct Properties {
    vocab_type: VocabType,
    id: Option<Iri>,
    types: Vec<String>,
    values: BTreeMap<&'static str, Vec<PropertySlot>>,
    unknown: Map<String, Value>,
}

impl Properties {
    pub fn new(vocab_type: VocabType) -> Self {
        Self {
            vocab_type,
            id: None,
            types: Vec::new(),
            values: BTreeMap::new(),
            unknown: Map::new(),
        }
    }

    pub fn vocab_type(&self) -> VocabType {
        self.vocab_type
    }

    /// Schema entry for `term`, if the type defines it.
    pub fn definition(&self, term: &str) -> Option<&'static PropertyDef> {
        schema::lookup(self.vocab_type, term)
    }

    pub fn id(&self) -> Option<&Iri> {
        self.id.as_ref()
    }

    pub fn set_id(&mut self, id: Option<Iri>) {
        self.id = id;
    }

    /// The `type` strings of the source document, as written.
    pub fn declared_types(&self) -> &[String] {
        &self.types
    }

    pub(crate) fn set_declared_types(&mut self, types: Vec<String>) {
        self.types = types;
    }

    // -- reads -------------------------------------------------------------

    /// All values of `term`, in order.
    pub fn values(&self, term: &str) -> &[PropertySlot] {
        self.values.get(term).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The first value of `term`, or an empty slot.
    pub fn slot(&self, term: &str) -> &PropertySlot {
        self.values(term).first().unwrap_or(&EMPTY)
    }

    /// Number of values of `term`.
    pub fn len(&self, term: &str) -> usize {
        self.values(term).len()
    }

    /// Presence of the first value of `term`.
    pub fn has(&self, term: &str) -> Presence {
        self.slot(term).presence()
    }

    /// Whether no id, property or unknown member is set.
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.values.is_empty() && self.unknown.is_empty()
    }

    pub fn get_str(&self, term: &str) -> Resolution<&str> {
        self.slot(term).get_str()
    }

    pub fn get_uri(&self, term: &str) -> Resolution<&str> {
        self.slot(term).get_uri()
    }

    pub fn get_datetime(&self, term: &str) -> Resolution<DateTime<FixedOffset>> {
        self.slot(term).get_datetime()
    }

    pub fn get_duration(&self, term: &str) -> Resolution<TimeDelta> {
        self.slot(term).get_duration()
    }

    pub fn get_uint(&self, term: &str) -> Resolution<u64> {
        self.slot(term).get_uint()
    }

    pub fn get_float(&self, term: &str) -> Resolution<f64> {
        self.slot(term).get_float()
    }

    pub fn get_bool(&self, term: &str) -> Resolution<bool> {
        self.slot(term).get_bool()
    }

    pub fn get_language_tag(&self, term: &str) -> Resolution<&str> {
        self.slot(term).get_language_tag()
    }

    /// Set properties in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static PropertyDef, &[PropertySlot])> + '_ {
        schema::definitions(self.vocab_type).filter_map(|def| {
            self.values
                .get(def.term)
                .filter(|slots| !slots.is_empty())
                .map(|slots| (def, slots.as_slice()))
        })
    }

    // -- writes ------------------------------------------------------------

    /// Replace every value of `term` with `slot`. An empty slot clears.
    pub fn set(&mut self, term: &str, slot: PropertySlot) -> PropertyResult<()> {
        let def = self.require(term)?;
        if slot.is_empty() {
            self.values.remove(def.term);
            return Ok(());
        }
        check_range(def, &slot)?;
        self.values.insert(def.term, vec![slot]);
        Ok(())
    }

    /// Add `slot` after the existing values of `term`.
    pub fn append(&mut self, term: &str, slot: PropertySlot) -> PropertyResult<()> {
        let len = self.len(term);
        self.insert(term, len, slot)
    }

    /// Add `slot` before the existing values of `term`.
    pub fn prepend(&mut self, term: &str, slot: PropertySlot) -> PropertyResult<()> {
        self.insert(term, 0, slot)
    }

    /// Insert `slot` at `index`, shifting later values back.
    pub fn insert(&mut self, term: &str, index: usize, slot: PropertySlot) -> PropertyResult<()> {
        let def = self.require(term)?;
        if slot.is_empty() {
            return Err(PropertyError::EmptySlot {
                term: def.term.to_string(),
            });
        }
        check_range(def, &slot)?;

        let len = self.len(def.term);
        if def.functional && len > 0 {
            return Err(PropertyError::FunctionalProperty {
                term: def.term.to_string(),
            });
        }
        if index > len {
            return Err(PropertyError::IndexOutOfBounds {
                term: def.term.to_string(),
                index,
                len,
            });
        }
        self.values.entry(def.term).or_default().insert(index, slot);
        Ok(())
    }

    /// Remove and return the value at `index`.
    pub fn remove(&mut self, term: &str, index: usize) -> PropertyResult<PropertySlot> {
        let def = self.require(term)?;
        let len = self.len(def.term);
        let Some(slots) = self.values.get_mut(def.term).filter(|_| index < len) else {
            return Err(PropertyError::IndexOutOfBounds {
                term: def.term.to_string(),
                index,
                len,
            });
        };
        let removed = slots.remove(index);
        if slots.is_empty() {
            self.values.remove(def.term);
        }
        Ok(removed)
    }

    /// Drop every value of `term`.
    pub fn clear(&mut self, term: &str) -> PropertyResult<()> {
        let def = self.require(term)?;
        self.values.remove(def.term);
        Ok(())
    }

    // -- extension members -------------------------------------------------

    /// JSON members outside the type's schema.
    pub fn unknown(&self) -> &Map<String, Value> {
        &self.unknown
    }

    pub fn set_unknown(&mut self, key: impl Into<String>, value: Value) {
        self.unknown.insert(key.into(), value);
    }

    pub fn remove_unknown(&mut self, key: &str) -> Option<Value> {
        self.unknown.remove(key)
    }

    /// Push a decoded slot without range or cardinality checks.
    pub(crate) fn push_decoded(&mut self, term: &'static str, slot: PropertySlot) {
        self.values.entry(term).or_default().push(slot);
    }

    fn require(&self, term: &str) -> PropertyResult<&'static PropertyDef> {
        self.definition(term)
            .ok_or_else(|| PropertyError::UnknownProperty {
                type_name: self.vocab_type.name().to_string(),
                term: term.to_string(),
            })
    }
}

fn check_range(def: &PropertyDef, slot: &PropertySlot) -> PropertyResult<()> {
    let ok = match slot {
        PropertySlot::Empty => false,
        PropertySlot::Raw(_) => true,
        PropertySlot::Literal(lit) => lit.matches(def.range),
        PropertySlot::Object(v) => def.range == Range::Entity && !v.is_link(),
        PropertySlot::Link(v) => def.range == Range::Entity && v.is_link(),
        PropertySlot::Iri(_) => def.range == Range::Entity,
        PropertySlot::LanguageMap(_) => def.language_map,
    };
    if ok {
        Ok(())
    } else {
        Err(PropertyError::RangeMismatch {
            term: def.term.to_string(),
            range: def.range.name().to_string(),
            found: slot.shape_name().to_string(),
        })
    }
}
