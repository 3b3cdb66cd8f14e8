//! Alias maps: which short name a document uses for each vocabulary.
//!
//! A JSON-LD `@context` may be a string, a list, or an object mapping
//! alias → term. [`AliasMap::from_context`] folds any of these shapes into a
//! map from term to alias. Building never fails: shapes that carry no alias
//! information are skipped, so a malformed context yields an empty or
//! partial map. Of the JSON-LD keywords only `@vocab` is read, as a term
//! with no alias; the others are skipped.

use std::collections::HashMap;

use serde_json::Value;

use crate::vocab::Vocabulary;

/// Mapping from canonical vocabulary term to the alias a document uses for it.
///
/// `http://` and `https://` forms of a URI term are stored as separate keys
/// with the same alias, so vocabulary lookups are scheme-insensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasMap {
    terms: HashMap<String, String>,
}

impl AliasMap {
    /// Create an empty alias map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the alias map for a `@context` value.
    pub fn from_context(context: &Value) -> Self {
        let mut map = Self::new();
        map.absorb(context);
        map
    }

    fn absorb(&mut self, context: &Value) {
        match context {
            Value::String(term) => self.record(term, ""),
            Value::Array(items) => {
                // Later entries win on collision.
                for item in items {
                    self.absorb(item);
                }
            }
            Value::Object(entries) => {
                for (alias, term) in entries {
                    let Value::String(term) = term else { continue };
                    match alias.as_str() {
                        // The default vocabulary: its terms are unprefixed.
                        "@vocab" => self.record(term, ""),
                        keyword if keyword.starts_with('@') => {}
                        _ => self.record(term, alias),
                    }
                }
            }
            _ => {}
        }
    }

    /// Record `term → alias`, including the other URI scheme of `term`.
    pub fn record(&mut self, term: &str, alias: &str) {
        if let Some(rest) = term.strip_prefix("http://") {
            self.terms.insert(format!("https://{rest}"), alias.to_string());
        } else if let Some(rest) = term.strip_prefix("https://") {
            self.terms.insert(format!("http://{rest}"), alias.to_string());
        }
        self.terms.insert(term.to_string(), alias.to_string());
    }

    /// The alias recorded for `term`, if any. An empty string means the term
    /// is in scope without an alias.
    pub fn alias(&self, term: &str) -> Option<&str> {
        self.terms.get(term).map(String::as_str)
    }

    /// Whether `term` appears in the map.
    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains_key(term)
    }

    /// The prefix to put in front of a vocabulary's type and property names.
    ///
    /// Returns `"alias:"` when the vocabulary URI has a non-empty alias and
    /// `""` otherwise, including when the vocabulary is absent.
    pub fn prefix(&self, vocabulary: Vocabulary) -> String {
        match self.alias(vocabulary.uri()) {
            Some(alias) if !alias.is_empty() => format!("{alias}:"),
            _ => String::new(),
        }
    }

    /// Merge `other` into this map; entries of `other` win on collision.
    pub fn merge(&mut self, other: AliasMap) {
        self.terms.extend(other.terms);
    }

    /// Iterate over `(term, alias)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.terms.iter().map(|(t, a)| (t.as_str(), a.as_str()))
    }

    /// Number of recorded terms (scheme variants count separately).
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether no terms were recorded.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const AS_HTTPS: &str = "https://www.w3.org/ns/activitystreams";
    const AS_HTTP: &str = "http://www.w3.org/ns/activitystreams";

    #[test]
    fn string_context_records_both_schemes() {
        for context in [AS_HTTPS, AS_HTTP] {
            let map = AliasMap::from_context(&json!(context));
            assert_eq!(map.alias(AS_HTTPS), Some(""));
            assert_eq!(map.alias(AS_HTTP), Some(""));
            assert_eq!(map.len(), 2);
        }
    }

    #[test]
    fn non_uri_string_is_recorded_once() {
        let map = AliasMap::from_context(&json!("urn:example:vocab"));
        assert_eq!(map.alias("urn:example:vocab"), Some(""));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn object_context_declares_aliases() {
        let map = AliasMap::from_context(&json!({
            "as": AS_HTTPS,
            "toot": "http://joinmastodon.org/ns",
        }));
        assert_eq!(map.alias(AS_HTTPS), Some("as"));
        assert_eq!(map.alias(AS_HTTP), Some("as"));
        assert_eq!(map.alias("https://joinmastodon.org/ns"), Some("toot"));
        assert_eq!(map.prefix(Vocabulary::ActivityStreams), "as:");
        assert_eq!(map.prefix(Vocabulary::Toot), "toot:");
    }

    #[test]
    fn non_string_object_values_are_ignored() {
        let map = AliasMap::from_context(&json!({
            "as": AS_HTTPS,
            "sensitive": {"@id": "as:sensitive", "@type": "xsd:boolean"},
            "count": 3,
        }));
        assert_eq!(map.len(), 2);
        assert!(!map.contains("as:sensitive"));
    }

    #[test]
    fn list_merges_with_later_entries_winning() {
        let map = AliasMap::from_context(&json!([
            {"as": AS_HTTPS},
            AS_HTTPS,
        ]));
        assert_eq!(map.alias(AS_HTTPS), Some(""));
        assert_eq!(map.prefix(Vocabulary::ActivityStreams), "");

        let map = AliasMap::from_context(&json!([AS_HTTPS, {"as": AS_HTTP}]));
        assert_eq!(map.alias(AS_HTTPS), Some("as"));
    }

    #[test]
    fn nested_lists_are_resolved_recursively() {
        let map = AliasMap::from_context(&json!([[AS_HTTPS], [{"toot": "http://joinmastodon.org/ns"}]]));
        assert_eq!(map.alias(AS_HTTP), Some(""));
        assert_eq!(map.alias("http://joinmastodon.org/ns"), Some("toot"));
    }

    #[test]
    fn malformed_context_degrades_to_empty() {
        for context in [json!(null), json!(42), json!(true), json!([1, null, false])] {
            assert!(AliasMap::from_context(&context).is_empty());
        }
    }

    #[test]
    fn absent_vocabulary_has_empty_prefix() {
        let map = AliasMap::from_context(&json!({"foo": "https://example.com/ns"}));
        assert_eq!(map.prefix(Vocabulary::ActivityStreams), "");
    }

    #[test]
    fn keywords_are_not_aliases() {
        let map = AliasMap::from_context(&json!({
            "@vocab": AS_HTTPS,
            "@language": "en",
            "@base": "https://example.com/",
            "toot": "http://joinmastodon.org/ns",
        }));
        assert_eq!(map.alias(AS_HTTP), Some(""));
        assert_eq!(map.prefix(Vocabulary::ActivityStreams), "");
        assert_eq!(map.prefix(Vocabulary::Toot), "toot:");
        assert!(!map.contains("en"));
        assert!(!map.contains("https://example.com/"));
    }
}
