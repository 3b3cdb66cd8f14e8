//! The vocabulary model: namespaces, concrete types and capability traits.
//!
//! Every known type is a variant of the closed [`VocabType`] tag and a struct
//! of the same name. Decoded values travel as the [`TypedValue`] union, and
//! the capability traits ([`ObjectLike`], [`ActivityLike`], ...) expose the
//! convenience accessors shared by whole families of types.

pub mod capability;
pub mod hierarchy;
mod types;

use std::fmt;

pub use capability::{
    ActivityLike, ActorLike, Capability, CollectionLike, IntransitiveActivityLike, LinkLike,
    ObjectLike, OrderedCollectionLike, VocabularyValue,
};
pub use types::*;

/// A JSON-LD namespace contributing types to the catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Vocabulary {
    /// ActivityStreams 2.0 core and extended types.
    ActivityStreams,
    /// Mastodon's `toot` extension namespace.
    Toot,
}

impl Vocabulary {
    /// Every supported vocabulary, in registration order.
    pub const ALL: [Vocabulary; 2] = [Vocabulary::ActivityStreams, Vocabulary::Toot];

    /// The namespace URI as it appears in `@context`.
    pub fn uri(self) -> &'static str {
        match self {
            Self::ActivityStreams => "https://www.w3.org/ns/activitystreams",
            Self::Toot => "http://joinmastodon.org/ns",
        }
    }

    /// Short name used in configuration files and CLI flags.
    pub fn name(self) -> &'static str {
        match self {
            Self::ActivityStreams => "activitystreams",
            Self::Toot => "toot",
        }
    }

    /// The alias used when serialising a value without an explicit context.
    pub fn default_alias(self) -> &'static str {
        match self {
            Self::ActivityStreams => "",
            Self::Toot => "toot",
        }
    }

    /// Parse a configuration name (case-insensitive; `as` is accepted too).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "activitystreams" | "as" => Some(Self::ActivityStreams),
            "toot" | "mastodon" => Some(Self::Toot),
            _ => None,
        }
    }

    /// The types this vocabulary defines.
    pub fn types(self) -> impl Iterator<Item = VocabType> {
        VocabType::ALL
            .iter()
            .copied()
            .filter(move |t| t.vocabulary() == self)
    }
}

impl fmt::Display for Vocabulary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
