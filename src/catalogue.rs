//! Type catalogue: the registry of recognised vocabulary types.
//!
//! A [`Catalogue`] maps each registered type name to a [`VocabularyType`]
//! entry holding its deserialisation function and hierarchy predicates.
//! It is assembled once through a [`CatalogueBuilder`] and is immutable
//! afterwards; resolvers share it through an `Arc`.

use std::collections::HashMap;
use std::fmt;

use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::alias::AliasMap;
use crate::error::{CatalogueError, CatalogueResult, DeserializeError, DeserializeResult};
use crate::property::codec::{self, Decoder};
use crate::resolve::{ResolveError, ResolveResult, read_header};
use crate::vocab::{TypedValue, VocabType, Vocabulary};

/// Signature of a per-type deserialisation function.
pub type DeserializeFn =
    fn(VocabType, &Map<String, Value>, &Decoder<'_>) -> DeserializeResult<TypedValue>;

// ---------------------------------------------------------------------------
// Entries
// ---------------------------------------------------------------------------

/// A registered vocabulary type.
#[derive(Clone, Copy)]
pub struct VocabularyType {
    tag: VocabType,
    deserialize: DeserializeFn,
}

impl fmt::Debug for VocabularyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VocabularyType({})", self.tag.name())
    }
}

impl VocabularyType {
    /// Entry using the schema-driven decoder.
    pub fn new(tag: VocabType) -> Self {
        Self::with_deserializer(tag, codec::deserialize_value)
    }

    /// Entry with a custom deserialisation function. The function must
    /// produce a value of type `tag`.
    pub fn with_deserializer(tag: VocabType, deserialize: DeserializeFn) -> Self {
        Self { tag, deserialize }
    }

    pub fn tag(&self) -> VocabType {
        self.tag
    }

    pub fn name(&self) -> &'static str {
        self.tag.name()
    }

    pub fn vocabulary(&self) -> Vocabulary {
        self.tag.vocabulary()
    }

    /// Whether this type strictly specialises `ancestor`.
    pub fn extends(&self, ancestor: &str) -> bool {
        self.tag.extends(ancestor)
    }

    /// Whether `descendant` strictly specialises this type.
    pub fn is_extended_by(&self, descendant: &str) -> bool {
        self.tag.is_extended_by(descendant)
    }

    /// Deserialise `doc` as this type.
    pub fn deserialize(
        &self,
        doc: &Map<String, Value>,
        decoder: &Decoder<'_>,
    ) -> DeserializeResult<TypedValue> {
        let value = (self.deserialize)(self.tag, doc, decoder)?;
        if value.vocab_type() != self.tag {
            return Err(DeserializeError::WrongVariant {
                expected: self.name().to_string(),
                found: value.type_name().to_string(),
            });
        }
        Ok(value)
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Collects entries before freezing them into a [`Catalogue`].
#[derive(Debug, Default)]
pub struct CatalogueBuilder {
    entries: Vec<VocabularyType>,
}

impl CatalogueBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one type. Fails if its name is already registered.
    pub fn register(&mut self, entry: VocabularyType) -> CatalogueResult<&mut Self> {
        if self.entries.iter().any(|e| e.tag == entry.tag) {
            return Err(CatalogueError::DuplicateType {
                name: entry.name().to_string(),
            });
        }
        self.entries.push(entry);
        Ok(self)
    }

    /// Register every type of `vocabulary` with the default decoder.
    pub fn register_vocabulary(&mut self, vocabulary: Vocabulary) -> CatalogueResult<&mut Self> {
        for tag in vocabulary.types() {
            self.register(VocabularyType::new(tag))?;
        }
        Ok(self)
    }

    pub fn build(self) -> Catalogue {
        let by_name = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.name(), i))
            .collect();
        let mut vocabularies: Vec<Vocabulary> =
            self.entries.iter().map(VocabularyType::vocabulary).collect();
        vocabularies.sort();
        vocabularies.dedup();

        debug!(
            types = self.entries.len(),
            vocabularies = ?vocabularies,
            "built vocabulary catalogue"
        );
        Catalogue {
            entries: self.entries,
            by_name,
            vocabularies,
        }
    }
}

// ---------------------------------------------------------------------------
// Catalogue
// ---------------------------------------------------------------------------

/// Immutable registry of vocabulary types.
#[derive(Clone)]
pub struct Catalogue {
    entries: Vec<VocabularyType>,
    by_name: HashMap<&'static str, usize>,
    vocabularies: Vec<Vocabulary>,
}

impl fmt::Debug for Catalogue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Catalogue")
            .field("types", &self.entries.len())
            .field("vocabularies", &self.vocabularies)
            .finish()
    }
}

impl Default for Catalogue {
    fn default() -> Self {
        Self::standard()
    }
}

impl Catalogue {
    pub fn builder() -> CatalogueBuilder {
        CatalogueBuilder::new()
    }

    /// Every supported vocabulary: ActivityStreams and `toot`.
    pub fn standard() -> Self {
        Self::with_vocabularies(&Vocabulary::ALL)
    }

    /// A catalogue of the given vocabularies. Repeated entries are ignored.
    pub fn with_vocabularies(vocabularies: &[Vocabulary]) -> Self {
        let mut builder = CatalogueBuilder::new();
        for tag in VocabType::ALL.iter().copied() {
            if vocabularies.contains(&tag.vocabulary()) {
                builder.entries.push(VocabularyType::new(tag));
            }
        }
        builder.build()
    }

    /// Look up an entry by exact, unprefixed type name.
    pub fn get(&self, name: &str) -> Option<&VocabularyType> {
        self.by_name.get(name).map(|&i| &self.entries[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn contains_type(&self, tag: VocabType) -> bool {
        self.contains(tag.name())
    }

    /// Entries in registration order.
    pub fn types(&self) -> impl Iterator<Item = &VocabularyType> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Vocabularies with at least one registered type.
    pub fn vocabularies(&self) -> &[Vocabulary] {
        &self.vocabularies
    }

    /// Map a declared `type` string to its entry, honouring `aliases`.
    ///
    /// `candidate` matches when it is a vocabulary's prefix followed by the
    /// name of a registered type of that vocabulary.
    pub fn recognize(&self, candidate: &str, aliases: &AliasMap) -> Option<&VocabularyType> {
        self.vocabularies.iter().find_map(|&vocabulary| {
            let prefix = aliases.prefix(vocabulary);
            let name = candidate.strip_prefix(prefix.as_str())?;
            self.get(name).filter(|e| e.vocabulary() == vocabulary)
        })
    }

    /// Deserialise `doc` as the registered type `type_name`.
    pub fn deserialize(
        &self,
        type_name: &str,
        doc: &Map<String, Value>,
        aliases: &AliasMap,
    ) -> DeserializeResult<TypedValue> {
        let entry = self
            .get(type_name)
            .ok_or_else(|| DeserializeError::UnknownType {
                type_name: type_name.to_string(),
            })?;
        entry.deserialize(doc, &Decoder::new(self, aliases))
    }

    /// Decode a whole document as its first recognised declared type,
    /// without dispatching to any handler.
    pub fn decode_document(&self, doc: &Value) -> ResolveResult<TypedValue> {
        let header = read_header(doc)?;
        for candidate in &header.candidates {
            match self.recognize(candidate, &header.aliases) {
                Some(entry) => {
                    let decoder = Decoder::new(self, &header.aliases);
                    return Ok(entry.deserialize(header.map, &decoder)?);
                }
                None => trace!(candidate = candidate.as_str(), "unrecognised type"),
            }
        }
        Err(ResolveError::UnhandledType {
            declared: header.candidates,
        })
    }

    /// Whether registered `type_name` strictly specialises registered
    /// `ancestor`. Names outside this catalogue answer `false`.
    pub fn extends(&self, type_name: &str, ancestor: &str) -> bool {
        self.contains(ancestor) && self.get(type_name).is_some_and(|e| e.extends(ancestor))
    }

    /// Whether registered `descendant` strictly specialises registered
    /// `type_name`. Names outside this catalogue answer `false`.
    pub fn is_extended_by(&self, type_name: &str, descendant: &str) -> bool {
        self.contains(descendant)
            && self
                .get(type_name)
                .is_some_and(|e| e.is_extended_by(descendant))
    }
}
