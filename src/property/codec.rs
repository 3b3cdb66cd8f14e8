//! JSON-LD ↔ [`Properties`] conversion.
//!
//! Decoding is schema-driven: each property of the target type is looked up
//! under its alias-prefixed key and decoded according to its range.
//! Whatever the schema does not describe is kept in the unknown-member map
//! so that serialisation can write it back.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use serde_json::{Map, Value};
use tracing::trace;

use super::schema::{self, PropertyDef, Range};
use super::{Iri, Literal, Properties, PropertySlot};
use crate::alias::AliasMap;
use crate::catalogue::Catalogue;
use crate::error::{DeserializeError, DeserializeResult};
use crate::vocab::{TypedValue, VocabType, Vocabulary};

/// Maximum nesting of embedded values decoded in one document.
pub const MAX_DEPTH: usize = 32;

/// Members every node may carry that never map to a schema property.
const RESERVED: [&str; 3] = ["@context", "type", "id"];

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Decoding state for one document: the catalogue to recognise embedded
/// types against, the document's aliases and the current nesting depth.
#[derive(Debug, Clone, Copy)]
pub struct Decoder<'a> {
    catalogue: &'a Catalogue,
    aliases: &'a AliasMap,
    depth: usize,
}

impl<'a> Decoder<'a> {
    pub fn new(catalogue: &'a Catalogue, aliases: &'a AliasMap) -> Self {
        Self {
            catalogue,
            aliases,
            depth: 0,
        }
    }

    pub fn catalogue(&self) -> &'a Catalogue {
        self.catalogue
    }

    pub fn aliases(&self) -> &'a AliasMap {
        self.aliases
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    fn nested(&self) -> DeserializeResult<Decoder<'a>> {
        if self.depth >= MAX_DEPTH {
            return Err(DeserializeError::DepthExceeded {
                max_depth: MAX_DEPTH,
            });
        }
        Ok(Self {
            depth: self.depth + 1,
            ..*self
        })
    }

    /// Decode the members of `doc` as properties of a `tag`.
    pub fn decode(&self, tag: VocabType, doc: &Map<String, Value>) -> DeserializeResult<Properties> {
        let mut props = Properties::new(tag);
        props.set_declared_types(declared_types(doc).unwrap_or_default());

        match doc.get("id") {
            None => {}
            Some(Value::String(id)) => props.set_id(Some(Iri::new(id.as_str()))),
            Some(other) => {
                return Err(DeserializeError::InvalidId {
                    type_name: tag.name().to_string(),
                    found: json_kind(other).to_string(),
                });
            }
        }

        let mut consumed: HashSet<&str> = RESERVED.into_iter().collect();
        for def in schema::definitions(tag) {
            let key = format!("{}{}", self.aliases.prefix(def.vocabulary), def.term);
            if let Some((k, value)) = doc.get_key_value(&key) {
                consumed.insert(k.as_str());
                self.decode_member(def, value, &mut props)?;
            }
            if def.language_map {
                if let Some((k, value)) = doc.get_key_value(&format!("{key}Map")) {
                    consumed.insert(k.as_str());
                    props.push_decoded(def.term, decode_language_map(value));
                }
            }
        }

        for (key, value) in doc {
            if !consumed.contains(key.as_str()) {
                props.set_unknown(key.clone(), value.clone());
            }
        }
        Ok(props)
    }

    fn decode_member(
        &self,
        def: &'static PropertyDef,
        value: &Value,
        props: &mut Properties,
    ) -> DeserializeResult<()> {
        match value {
            Value::Array(_) if def.functional => {
                trace!(term = def.term, "array given for functional property, keeping raw");
                props.push_decoded(def.term, PropertySlot::Raw(value.clone()));
            }
            Value::Array(items) => {
                for item in items {
                    props.push_decoded(def.term, self.decode_slot(def, item)?);
                }
            }
            single => props.push_decoded(def.term, self.decode_slot(def, single)?),
        }
        Ok(())
    }

    fn decode_slot(&self, def: &PropertyDef, value: &Value) -> DeserializeResult<PropertySlot> {
        match (def.range, value) {
            (Range::Entity, Value::String(iri)) => Ok(PropertySlot::Iri(Iri::new(iri.as_str()))),
            (Range::Entity, Value::Object(map)) => self.decode_embedded(map),
            (Range::Entity, other) => Ok(PropertySlot::Raw(other.clone())),
            (range, value) => Ok(Literal::from_json(range, value)
                .map_or_else(|| PropertySlot::Raw(value.clone()), PropertySlot::Literal)),
        }
    }

    /// Decode an embedded node as its first recognised declared type.
    fn decode_embedded(&self, map: &Map<String, Value>) -> DeserializeResult<PropertySlot> {
        let candidates = declared_types(map).unwrap_or_default();
        for candidate in &candidates {
            if let Some(entry) = self.catalogue.recognize(candidate, self.aliases) {
                let value = entry.deserialize(map, &self.nested()?)?;
                return Ok(PropertySlot::embed(value));
            }
        }
        Ok(PropertySlot::Raw(Value::Object(map.clone())))
    }
}

/// Default deserialisation function registered for every catalogue type.
pub fn deserialize_value(
    tag: VocabType,
    doc: &Map<String, Value>,
    decoder: &Decoder<'_>,
) -> DeserializeResult<TypedValue> {
    decoder.decode(tag, doc).map(TypedValue::from_properties)
}

/// The `type` member as a list of names. Non-string list entries are
/// skipped; `None` when the member is absent or neither string nor list.
pub fn declared_types(doc: &Map<String, Value>) -> Option<Vec<String>> {
    match doc.get("type")? {
        Value::String(name) => Some(vec![name.clone()]),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
        ),
        _ => None,
    }
}

fn decode_language_map(value: &Value) -> PropertySlot {
    let Value::Object(entries) = value else {
        return PropertySlot::Raw(value.clone());
    };
    let mut map = BTreeMap::new();
    for (tag, text) in entries {
        match text {
            Value::String(text) => {
                map.insert(tag.clone(), text.clone());
            }
            _ => return PropertySlot::Raw(value.clone()),
        }
    }
    PropertySlot::LanguageMap(map)
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// Serialise `value` as a JSON-LD node without `@context`.
///
/// Only the value's own type is written. A property with one value is
/// written as that value, otherwise as an array; language maps go to
/// `<term>Map`. Unknown members are written back unless a schema
/// property already claimed the key.
pub fn encode(value: &TypedValue, aliases: &AliasMap) -> Value {
    let props = value.properties();
    let mut out = Map::new();
    out.insert(
        "type".to_string(),
        Value::String(format!("{}{}", aliases.prefix(value.vocabulary()), value.type_name())),
    );
    if let Some(id) = props.id() {
        out.insert("id".to_string(), Value::String(id.as_str().to_string()));
    }

    for (def, slots) in props.iter() {
        let key = format!("{}{}", aliases.prefix(def.vocabulary), def.term);
        let mut plain = Vec::new();
        let mut languages = Map::new();
        for slot in slots {
            match slot {
                PropertySlot::Empty => {}
                PropertySlot::LanguageMap(map) => {
                    for (tag, text) in map {
                        languages.insert(tag.clone(), Value::String(text.clone()));
                    }
                }
                other => plain.push(encode_slot(other, aliases)),
            }
        }
        if !languages.is_empty() {
            out.insert(format!("{key}Map"), Value::Object(languages));
        }
        match plain.len() {
            0 => {}
            1 => {
                out.insert(key, plain.swap_remove(0));
            }
            _ => {
                out.insert(key, Value::Array(plain));
            }
        }
    }

    for (key, member) in props.unknown() {
        out.entry(key.clone()).or_insert_with(|| member.clone());
    }
    Value::Object(out)
}

fn encode_slot(slot: &PropertySlot, aliases: &AliasMap) -> Value {
    match slot {
        PropertySlot::Empty => Value::Null,
        PropertySlot::Literal(lit) => lit.to_json(),
        PropertySlot::Object(v) | PropertySlot::Link(v) => encode(v, aliases),
        PropertySlot::Iri(iri) => Value::String(iri.as_str().to_string()),
        PropertySlot::LanguageMap(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect(),
        ),
        PropertySlot::Raw(raw) => raw.clone(),
    }
}

/// The `@context` naming every vocabulary `value` draws on.
///
/// ActivityStreams is the unaliased default; other vocabularies get their
/// default alias.
pub fn default_context(value: &TypedValue) -> Value {
    let mut used = BTreeSet::new();
    collect_vocabularies(value, &mut used);
    used.remove(&Vocabulary::ActivityStreams);

    let base = Value::String(Vocabulary::ActivityStreams.uri().to_string());
    if used.is_empty() {
        return base;
    }
    let aliases: Map<String, Value> = used
        .into_iter()
        .map(|v| (v.default_alias().to_string(), Value::String(v.uri().to_string())))
        .collect();
    Value::Array(vec![base, Value::Object(aliases)])
}

fn collect_vocabularies(value: &TypedValue, used: &mut BTreeSet<Vocabulary>) {
    used.insert(value.vocabulary());
    for (def, slots) in value.properties().iter() {
        used.insert(def.vocabulary);
        for slot in slots {
            if let PropertySlot::Object(inner) | PropertySlot::Link(inner) = slot {
                collect_vocabularies(inner, used);
            }
        }
    }
}
