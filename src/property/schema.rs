//! Property definitions.
//!
//! Properties are grouped by the type that introduces them; a type's schema
//! is the list of groups in [`VocabType::property_groups`], so a subtype
//! repeats the groups of its ancestors. Groups are disjoint by term within
//! any one type.
//!
//! [`VocabType::property_groups`]: crate::vocab::VocabType::property_groups

use std::fmt;

use crate::vocab::{VocabType, Vocabulary};

/// The value space of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Range {
    /// Embedded objects, links or IRI references.
    Entity,
    Text,
    Uri,
    DateTime,
    Duration,
    NonNegativeInteger,
    Float,
    Boolean,
    LanguageTag,
}

impl Range {
    pub fn name(self) -> &'static str {
        match self {
            Self::Entity => "entity",
            Self::Text => "string",
            Self::Uri => "URI",
            Self::DateTime => "dateTime",
            Self::Duration => "duration",
            Self::NonNegativeInteger => "nonNegativeInteger",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::LanguageTag => "language tag",
        }
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Schema entry for one property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyDef {
    /// Unprefixed JSON-LD term, e.g. `"attributedTo"`.
    pub term: &'static str,
    pub vocabulary: Vocabulary,
    pub range: Range,
    /// Holds at most one value.
    pub functional: bool,
    /// Also accepts a `<term>Map` language map.
    pub language_map: bool,
}

impl PropertyDef {
    const fn new(term: &'static str, range: Range, functional: bool) -> Self {
        Self {
            term,
            vocabulary: Vocabulary::ActivityStreams,
            range,
            functional,
            language_map: false,
        }
    }

    const fn with_map(mut self) -> Self {
        self.language_map = true;
        self
    }

    const fn in_toot(mut self) -> Self {
        self.vocabulary = Vocabulary::Toot;
        self
    }
}

/// Every property of `tag`, in schema order.
pub fn definitions(tag: VocabType) -> impl Iterator<Item = &'static PropertyDef> {
    tag.property_groups().iter().flat_map(|group| group.iter())
}

/// The definition of `term` on `tag`.
pub fn lookup(tag: VocabType, term: &str) -> Option<&'static PropertyDef> {
    definitions(tag).find(|def| def.term == term)
}

const fn entity(term: &'static str) -> PropertyDef {
    PropertyDef::new(term, Range::Entity, false)
}

const fn functional(term: &'static str, range: Range) -> PropertyDef {
    PropertyDef::new(term, range, true)
}

const fn many(term: &'static str, range: Range) -> PropertyDef {
    PropertyDef::new(term, range, false)
}

pub const OBJECT: &[PropertyDef] = &[
    entity("attachment"),
    entity("attributedTo"),
    entity("audience"),
    entity("bcc"),
    entity("bto"),
    entity("cc"),
    many("content", Range::Text).with_map(),
    entity("context"),
    functional("duration", Range::Duration),
    functional("endTime", Range::DateTime),
    entity("generator"),
    entity("icon"),
    entity("image"),
    entity("inReplyTo"),
    entity("location"),
    functional("mediaType", Range::Text),
    many("name", Range::Text).with_map(),
    entity("preview"),
    functional("published", Range::DateTime),
    functional("replies", Range::Entity),
    functional("startTime", Range::DateTime),
    many("summary", Range::Text).with_map(),
    entity("tag"),
    entity("to"),
    functional("updated", Range::DateTime),
    entity("url"),
    functional("source", Range::Entity),
    functional("likes", Range::Entity),
    functional("shares", Range::Entity),
    functional("sensitive", Range::Boolean),
];

pub const LINK: &[PropertyDef] = &[
    functional("href", Range::Uri),
    many("rel", Range::Text),
    functional("mediaType", Range::Text),
    many("name", Range::Text).with_map(),
    functional("hreflang", Range::LanguageTag),
    functional("height", Range::NonNegativeInteger),
    functional("width", Range::NonNegativeInteger),
    entity("preview"),
    entity("attributedTo"),
];

pub const ACTIVITY: &[PropertyDef] = &[
    entity("actor"),
    entity("target"),
    entity("result"),
    entity("origin"),
    entity("instrument"),
];

pub const TRANSITIVE: &[PropertyDef] = &[entity("object")];

pub const QUESTION: &[PropertyDef] = &[
    entity("oneOf"),
    entity("anyOf"),
    functional("closed", Range::DateTime),
];

pub const COLLECTION: &[PropertyDef] = &[
    functional("totalItems", Range::NonNegativeInteger),
    functional("current", Range::Entity),
    functional("first", Range::Entity),
    functional("last", Range::Entity),
    entity("items"),
];

pub const ORDERED_COLLECTION: &[PropertyDef] = &[
    functional("totalItems", Range::NonNegativeInteger),
    functional("current", Range::Entity),
    functional("first", Range::Entity),
    functional("last", Range::Entity),
    entity("orderedItems"),
];

pub const PAGE: &[PropertyDef] = &[
    functional("partOf", Range::Entity),
    functional("next", Range::Entity),
    functional("prev", Range::Entity),
];

pub const ORDERED_PAGE: &[PropertyDef] = &[functional("startIndex", Range::NonNegativeInteger)];

pub const ACTOR: &[PropertyDef] = &[
    functional("inbox", Range::Entity),
    functional("outbox", Range::Entity),
    functional("following", Range::Entity),
    functional("followers", Range::Entity),
    functional("liked", Range::Entity),
    functional("preferredUsername", Range::Text).with_map(),
    functional("endpoints", Range::Entity),
    entity("streams"),
];

pub const PLACE: &[PropertyDef] = &[
    functional("accuracy", Range::Float),
    functional("altitude", Range::Float),
    functional("latitude", Range::Float),
    functional("longitude", Range::Float),
    functional("radius", Range::Float),
    functional("units", Range::Text),
];

pub const PROFILE: &[PropertyDef] = &[functional("describes", Range::Entity)];

pub const RELATIONSHIP: &[PropertyDef] = &[
    functional("subject", Range::Entity),
    entity("object"),
    entity("relationship"),
];

pub const TOMBSTONE: &[PropertyDef] = &[
    many("formerType", Range::Text),
    functional("deleted", Range::DateTime),
];

pub const IDENTITY_PROOF: &[PropertyDef] = &[
    functional("signatureAlgorithm", Range::Text).in_toot(),
    functional("signatureValue", Range::Text).in_toot(),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn terms_are_unique_within_each_type() {
        for &tag in VocabType::ALL {
            let mut seen = HashSet::new();
            for def in tag.property_groups().iter().flat_map(|g| g.iter()) {
                assert!(seen.insert(def.term), "{} repeats {}", tag.name(), def.term);
            }
        }
    }

    #[test]
    fn language_maps_are_text_only() {
        for &tag in VocabType::ALL {
            for def in tag.property_groups().iter().flat_map(|g| g.iter()) {
                assert!(!def.language_map || def.range == Range::Text, "{}", def.term);
            }
        }
    }

    #[test]
    fn toot_terms_are_tagged() {
        assert!(IDENTITY_PROOF.iter().all(|d| d.vocabulary == Vocabulary::Toot));
        assert!(OBJECT.iter().all(|d| d.vocabulary == Vocabulary::ActivityStreams));
    }
}
