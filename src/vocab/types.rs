//! Concrete vocabulary types and the [`TypedValue`] union.
//!
//! Everything per-type is generated from the single table at the bottom of
//! this file by [`vocabulary_types!`]: the [`VocabType`] tag, one struct per
//! type, its capability impls, and the `TypedValue` variant wrapping it.

use chrono::{DateTime, FixedOffset};
use serde_json::Value;

use super::capability::{
    ActivityLike, ActorLike, Capability, CollectionLike, IntransitiveActivityLike, LinkLike,
    ObjectLike, OrderedCollectionLike, VocabularyValue,
};
use super::Vocabulary;
use crate::alias::AliasMap;
use crate::property::schema::{self, PropertyDef};
use crate::property::{Iri, Properties, PropertySlot, Resolution, codec};

/// A statically known vocabulary type that can be pulled out of a
/// [`TypedValue`] by value or by reference.
pub trait VocabularyKind: VocabularyValue + Clone + Sized + 'static {
    /// The tag of this type.
    const TYPE: VocabType;

    fn from_value(value: TypedValue) -> Result<Self, TypedValue>;

    fn from_ref(value: &TypedValue) -> Option<&Self>;

    fn into_value(self) -> TypedValue;
}

macro_rules! project_capability {
    (ObjectLike) => {
        fn as_object(&self) -> Option<&(dyn ObjectLike + 'static)> {
            Some(self)
        }
    };
    (LinkLike) => {
        fn as_link(&self) -> Option<&(dyn LinkLike + 'static)> {
            Some(self)
        }
    };
    (ActivityLike) => {
        fn as_activity(&self) -> Option<&(dyn ActivityLike + 'static)> {
            Some(self)
        }
    };
    (IntransitiveActivityLike) => {
        fn as_intransitive_activity(&self) -> Option<&(dyn IntransitiveActivityLike + 'static)> {
            Some(self)
        }
    };
    (CollectionLike) => {
        fn as_collection(&self) -> Option<&(dyn CollectionLike + 'static)> {
            Some(self)
        }
    };
    (OrderedCollectionLike) => {
        fn as_ordered_collection(&self) -> Option<&(dyn OrderedCollectionLike + 'static)> {
            Some(self)
        }
    };
    (ActorLike) => {
        fn as_actor(&self) -> Option<&(dyn ActorLike + 'static)> {
            Some(self)
        }
    };
}

macro_rules! vocabulary_types {
    ($(
        $(#[$attr:meta])*
        $ty:ident in $vocab:ident {
            parents: [$($parent:ident),* $(,)?],
            properties: [$($group:ident),* $(,)?],
            capabilities: [$($cap:ident),* $(,)?] $(,)?
        }
    )*) => {
        /// Tag of every known vocabulary type.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum VocabType {
            $(
                $(#[$attr])*
                $ty,
            )*
        }

        impl VocabType {
            /// Every type, in declaration order.
            pub const ALL: &'static [VocabType] = &[$(VocabType::$ty),*];

            /// The unprefixed type name.
            pub fn name(self) -> &'static str {
                match self {
                    $(Self::$ty => stringify!($ty),)*
                }
            }

            /// The namespace defining this type.
            pub fn vocabulary(self) -> Vocabulary {
                match self {
                    $(Self::$ty => Vocabulary::$vocab,)*
                }
            }

            /// Direct supertypes.
            pub fn parents(self) -> &'static [VocabType] {
                match self {
                    $(Self::$ty => &[$(VocabType::$parent),*],)*
                }
            }

            /// Property groups making up this type's schema, inherited groups
            /// included.
            pub fn property_groups(self) -> &'static [&'static [PropertyDef]] {
                match self {
                    $(Self::$ty => &[$(schema::$group),*],)*
                }
            }

            /// Names of the capability traits this type implements.
            pub fn capabilities(self) -> &'static [&'static str] {
                match self {
                    $(Self::$ty => &[$(stringify!($cap)),*],)*
                }
            }

            /// Look a type up by its exact unprefixed name.
            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $(stringify!($ty) => Some(Self::$ty),)*
                    _ => None,
                }
            }
        }

        /// A decoded vocabulary value of any known type.
        #[derive(Debug, Clone, PartialEq)]
        pub enum TypedValue {
            $($ty($ty),)*
        }

        impl TypedValue {
            /// An empty value of type `tag`.
            pub fn new(tag: VocabType) -> Self {
                Self::from_properties(Properties::new(tag))
            }

            pub(crate) fn from_properties(properties: Properties) -> Self {
                match properties.vocab_type() {
                    $(VocabType::$ty => Self::$ty($ty { properties }),)*
                }
            }

            /// The wrapped value as a trait object.
            pub fn as_value(&self) -> &(dyn VocabularyValue + 'static) {
                match self {
                    $(Self::$ty(v) => v,)*
                }
            }

            pub fn as_value_mut(&mut self) -> &mut (dyn VocabularyValue + 'static) {
                match self {
                    $(Self::$ty(v) => v,)*
                }
            }
        }

        $(
            $(#[$attr])*
            #[derive(Debug, Clone, PartialEq)]
            pub struct $ty {
                properties: Properties,
            }

            impl $ty {
                /// An empty value with no id and no properties.
                pub fn new() -> Self {
                    Self {
                        properties: Properties::new(VocabType::$ty),
                    }
                }

                /// Set the node identifier.
                pub fn with_id(mut self, id: impl Into<String>) -> Self {
                    self.properties.set_id(Some(Iri::new(id)));
                    self
                }
            }

            impl Default for $ty {
                fn default() -> Self {
                    Self::new()
                }
            }

            impl VocabularyValue for $ty {
                fn vocab_type(&self) -> VocabType {
                    VocabType::$ty
                }

                fn properties(&self) -> &Properties {
                    &self.properties
                }

                fn properties_mut(&mut self) -> &mut Properties {
                    &mut self.properties
                }

                $(project_capability!($cap);)*
            }

            $(impl $cap for $ty {})*

            impl VocabularyKind for $ty {
                const TYPE: VocabType = VocabType::$ty;

                fn from_value(value: TypedValue) -> Result<Self, TypedValue> {
                    match value {
                        TypedValue::$ty(v) => Ok(v),
                        other => Err(other),
                    }
                }

                fn from_ref(value: &TypedValue) -> Option<&Self> {
                    match value {
                        TypedValue::$ty(v) => Some(v),
                        _ => None,
                    }
                }

                fn into_value(self) -> TypedValue {
                    TypedValue::$ty(self)
                }
            }

            impl Capability for $ty {
                const NAME: &'static str = stringify!($ty);
                type View = $ty;

                fn view(value: &TypedValue) -> Option<&$ty> {
                    <$ty as VocabularyKind>::from_ref(value)
                }

                fn satisfied_by(tag: VocabType) -> bool {
                    tag == VocabType::$ty
                }
            }

            impl From<$ty> for TypedValue {
                fn from(value: $ty) -> Self {
                    TypedValue::$ty(value)
                }
            }
        )*
    };
}

// ---------------------------------------------------------------------------
// TypedValue surface
// ---------------------------------------------------------------------------

impl TypedValue {
    pub fn vocab_type(&self) -> VocabType {
        self.as_value().vocab_type()
    }

    pub fn type_name(&self) -> &'static str {
        self.vocab_type().name()
    }

    pub fn vocabulary(&self) -> Vocabulary {
        self.vocab_type().vocabulary()
    }

    pub fn properties(&self) -> &Properties {
        self.as_value().properties()
    }

    pub fn properties_mut(&mut self) -> &mut Properties {
        self.as_value_mut().properties_mut()
    }

    pub fn id(&self) -> Option<&Iri> {
        self.properties().id()
    }

    pub fn as_object(&self) -> Option<&(dyn ObjectLike + 'static)> {
        self.as_value().as_object()
    }

    pub fn as_link(&self) -> Option<&(dyn LinkLike + 'static)> {
        self.as_value().as_link()
    }

    pub fn as_activity(&self) -> Option<&(dyn ActivityLike + 'static)> {
        self.as_value().as_activity()
    }

    pub fn as_intransitive_activity(&self) -> Option<&(dyn IntransitiveActivityLike + 'static)> {
        self.as_value().as_intransitive_activity()
    }

    pub fn as_collection(&self) -> Option<&(dyn CollectionLike + 'static)> {
        self.as_value().as_collection()
    }

    pub fn as_ordered_collection(&self) -> Option<&(dyn OrderedCollectionLike + 'static)> {
        self.as_value().as_ordered_collection()
    }

    pub fn as_actor(&self) -> Option<&(dyn ActorLike + 'static)> {
        self.as_value().as_actor()
    }

    /// Whether this is a link-family value (`Link`, `Mention`, `Hashtag`).
    pub fn is_link(&self) -> bool {
        self.as_link().is_some()
    }

    /// Whether this value's type strictly specialises `ancestor`.
    pub fn extends(&self, ancestor: &str) -> bool {
        self.vocab_type().extends(ancestor)
    }

    /// Whether `descendant` strictly specialises this value's type.
    pub fn is_extended_by(&self, descendant: &str) -> bool {
        self.vocab_type().is_extended_by(descendant)
    }

    /// Take the concrete value out, or get `self` back on a type mismatch.
    pub fn downcast<T: VocabularyKind>(self) -> Result<T, TypedValue> {
        T::from_value(self)
    }

    pub fn downcast_ref<T: VocabularyKind>(&self) -> Option<&T> {
        T::from_ref(self)
    }

    /// Project onto a capability key.
    pub fn view<K: Capability>(&self) -> Option<&K::View> {
        K::view(self)
    }

    pub fn satisfies<K: Capability>(&self) -> bool {
        K::satisfied_by(self.vocab_type())
    }

    /// Serialise to a JSON-LD document with a generated `@context`.
    ///
    /// The context names ActivityStreams as the default vocabulary and adds
    /// a `toot` alias when this value or anything embedded in it is a
    /// Mastodon extension type.
    pub fn to_json(&self) -> Value {
        let context = codec::default_context(self);
        let aliases = AliasMap::from_context(&context);
        let mut doc = serde_json::Map::new();
        doc.insert("@context".to_string(), context);
        if let Value::Object(body) = codec::encode(self, &aliases) {
            doc.extend(body);
        }
        Value::Object(doc)
    }

    /// Serialise without a `@context`, prefixing names per `aliases`.
    pub fn to_json_with(&self, aliases: &AliasMap) -> Value {
        codec::encode(self, aliases)
    }
}

// ---------------------------------------------------------------------------
// Type-specific accessors
// ---------------------------------------------------------------------------

impl Question {
    /// Exclusive answer options.
    pub fn one_of(&self) -> &[PropertySlot] {
        self.properties.values("oneOf")
    }

    /// Inclusive answer options.
    pub fn any_of(&self) -> &[PropertySlot] {
        self.properties.values("anyOf")
    }

    /// When the question closed.
    pub fn closed(&self) -> Resolution<DateTime<FixedOffset>> {
        self.properties.get_datetime("closed")
    }
}

impl Place {
    pub fn latitude(&self) -> Resolution<f64> {
        self.properties.get_float("latitude")
    }

    pub fn longitude(&self) -> Resolution<f64> {
        self.properties.get_float("longitude")
    }

    pub fn altitude(&self) -> Resolution<f64> {
        self.properties.get_float("altitude")
    }

    /// Positional accuracy in percent.
    pub fn accuracy(&self) -> Resolution<f64> {
        self.properties.get_float("accuracy")
    }

    pub fn radius(&self) -> Resolution<f64> {
        self.properties.get_float("radius")
    }

    /// Unit of `altitude` and `radius`, e.g. `"m"` or `"km"`.
    pub fn units(&self) -> Resolution<&str> {
        self.properties.get_str("units")
    }
}

impl Tombstone {
    pub fn former_type(&self) -> &[PropertySlot] {
        self.properties.values("formerType")
    }

    pub fn deleted(&self) -> Resolution<DateTime<FixedOffset>> {
        self.properties.get_datetime("deleted")
    }
}

impl Relationship {
    pub fn subject(&self) -> &PropertySlot {
        self.properties.slot("subject")
    }

    pub fn object(&self) -> &[PropertySlot] {
        self.properties.values("object")
    }

    pub fn relationship(&self) -> &[PropertySlot] {
        self.properties.values("relationship")
    }
}

impl Profile {
    /// The object this profile describes.
    pub fn describes(&self) -> &PropertySlot {
        self.properties.slot("describes")
    }
}

impl CollectionPage {
    pub fn part_of(&self) -> &PropertySlot {
        self.properties.slot("partOf")
    }

    pub fn next(&self) -> &PropertySlot {
        self.properties.slot("next")
    }

    pub fn prev(&self) -> &PropertySlot {
        self.properties.slot("prev")
    }
}

impl OrderedCollectionPage {
    pub fn part_of(&self) -> &PropertySlot {
        self.properties.slot("partOf")
    }

    pub fn next(&self) -> &PropertySlot {
        self.properties.slot("next")
    }

    pub fn prev(&self) -> &PropertySlot {
        self.properties.slot("prev")
    }

    /// Position of the first item of this page in the whole collection.
    pub fn start_index(&self) -> Resolution<u64> {
        self.properties.get_uint("startIndex")
    }
}

impl IdentityProof {
    pub fn signature_algorithm(&self) -> Resolution<&str> {
        self.properties.get_str("signatureAlgorithm")
    }

    pub fn signature_value(&self) -> Resolution<&str> {
        self.properties.get_str("signatureValue")
    }
}

// ---------------------------------------------------------------------------
// The type table
// ---------------------------------------------------------------------------

vocabulary_types! {
    /// Root of every non-link type.
    Object in ActivityStreams {
        parents: [],
        properties: [OBJECT],
        capabilities: [ObjectLike],
    }
    /// A qualified reference to another resource.
    Link in ActivityStreams {
        parents: [],
        properties: [LINK],
        capabilities: [LinkLike],
    }
    /// An action performed by an actor on an object.
    Activity in ActivityStreams {
        parents: [Object],
        properties: [OBJECT, ACTIVITY, TRANSITIVE],
        capabilities: [ObjectLike, ActivityLike],
    }
    /// An activity with no `object`.
    IntransitiveActivity in ActivityStreams {
        parents: [Activity],
        properties: [OBJECT, ACTIVITY],
        capabilities: [ObjectLike, IntransitiveActivityLike],
    }
    Collection in ActivityStreams {
        parents: [Object],
        properties: [OBJECT, COLLECTION],
        capabilities: [ObjectLike, CollectionLike],
    }
    OrderedCollection in ActivityStreams {
        parents: [Collection],
        properties: [OBJECT, ORDERED_COLLECTION],
        capabilities: [ObjectLike, OrderedCollectionLike],
    }
    CollectionPage in ActivityStreams {
        parents: [Collection],
        properties: [OBJECT, COLLECTION, PAGE],
        capabilities: [ObjectLike, CollectionLike],
    }
    OrderedCollectionPage in ActivityStreams {
        parents: [OrderedCollection, CollectionPage],
        properties: [OBJECT, ORDERED_COLLECTION, PAGE, ORDERED_PAGE],
        capabilities: [ObjectLike, OrderedCollectionLike],
    }

    Accept in ActivityStreams {
        parents: [Activity],
        properties: [OBJECT, ACTIVITY, TRANSITIVE],
        capabilities: [ObjectLike, ActivityLike],
    }
    Add in ActivityStreams {
        parents: [Activity],
        properties: [OBJECT, ACTIVITY, TRANSITIVE],
        capabilities: [ObjectLike, ActivityLike],
    }
    Announce in ActivityStreams {
        parents: [Activity],
        properties: [OBJECT, ACTIVITY, TRANSITIVE],
        capabilities: [ObjectLike, ActivityLike],
    }
    Block in ActivityStreams {
        parents: [Ignore],
        properties: [OBJECT, ACTIVITY, TRANSITIVE],
        capabilities: [ObjectLike, ActivityLike],
    }
    /// The actor has created the object.
    Create in ActivityStreams {
        parents: [Activity],
        properties: [OBJECT, ACTIVITY, TRANSITIVE],
        capabilities: [ObjectLike, ActivityLike],
    }
    Delete in ActivityStreams {
        parents: [Activity],
        properties: [OBJECT, ACTIVITY, TRANSITIVE],
        capabilities: [ObjectLike, ActivityLike],
    }
    Dislike in ActivityStreams {
        parents: [Activity],
        properties: [OBJECT, ACTIVITY, TRANSITIVE],
        capabilities: [ObjectLike, ActivityLike],
    }
    Flag in ActivityStreams {
        parents: [Activity],
        properties: [OBJECT, ACTIVITY, TRANSITIVE],
        capabilities: [ObjectLike, ActivityLike],
    }
    Follow in ActivityStreams {
        parents: [Activity],
        properties: [OBJECT, ACTIVITY, TRANSITIVE],
        capabilities: [ObjectLike, ActivityLike],
    }
    Ignore in ActivityStreams {
        parents: [Activity],
        properties: [OBJECT, ACTIVITY, TRANSITIVE],
        capabilities: [ObjectLike, ActivityLike],
    }
    Invite in ActivityStreams {
        parents: [Offer],
        properties: [OBJECT, ACTIVITY, TRANSITIVE],
        capabilities: [ObjectLike, ActivityLike],
    }
    Join in ActivityStreams {
        parents: [Activity],
        properties: [OBJECT, ACTIVITY, TRANSITIVE],
        capabilities: [ObjectLike, ActivityLike],
    }
    Leave in ActivityStreams {
        parents: [Activity],
        properties: [OBJECT, ACTIVITY, TRANSITIVE],
        capabilities: [ObjectLike, ActivityLike],
    }
    Like in ActivityStreams {
        parents: [Activity],
        properties: [OBJECT, ACTIVITY, TRANSITIVE],
        capabilities: [ObjectLike, ActivityLike],
    }
    Listen in ActivityStreams {
        parents: [Activity],
        properties: [OBJECT, ACTIVITY, TRANSITIVE],
        capabilities: [ObjectLike, ActivityLike],
    }
    Move in ActivityStreams {
        parents: [Activity],
        properties: [OBJECT, ACTIVITY, TRANSITIVE],
        capabilities: [ObjectLike, ActivityLike],
    }
    Offer in ActivityStreams {
        parents: [Activity],
        properties: [OBJECT, ACTIVITY, TRANSITIVE],
        capabilities: [ObjectLike, ActivityLike],
    }
    Read in ActivityStreams {
        parents: [Activity],
        properties: [OBJECT, ACTIVITY, TRANSITIVE],
        capabilities: [ObjectLike, ActivityLike],
    }
    Reject in ActivityStreams {
        parents: [Activity],
        properties: [OBJECT, ACTIVITY, TRANSITIVE],
        capabilities: [ObjectLike, ActivityLike],
    }
    Remove in ActivityStreams {
        parents: [Activity],
        properties: [OBJECT, ACTIVITY, TRANSITIVE],
        capabilities: [ObjectLike, ActivityLike],
    }
    TentativeAccept in ActivityStreams {
        parents: [Accept],
        properties: [OBJECT, ACTIVITY, TRANSITIVE],
        capabilities: [ObjectLike, ActivityLike],
    }
    TentativeReject in ActivityStreams {
        parents: [Reject],
        properties: [OBJECT, ACTIVITY, TRANSITIVE],
        capabilities: [ObjectLike, ActivityLike],
    }
    Undo in ActivityStreams {
        parents: [Activity],
        properties: [OBJECT, ACTIVITY, TRANSITIVE],
        capabilities: [ObjectLike, ActivityLike],
    }
    Update in ActivityStreams {
        parents: [Activity],
        properties: [OBJECT, ACTIVITY, TRANSITIVE],
        capabilities: [ObjectLike, ActivityLike],
    }
    View in ActivityStreams {
        parents: [Activity],
        properties: [OBJECT, ACTIVITY, TRANSITIVE],
        capabilities: [ObjectLike, ActivityLike],
    }

    Arrive in ActivityStreams {
        parents: [IntransitiveActivity],
        properties: [OBJECT, ACTIVITY],
        capabilities: [ObjectLike, IntransitiveActivityLike],
    }
    Travel in ActivityStreams {
        parents: [IntransitiveActivity],
        properties: [OBJECT, ACTIVITY],
        capabilities: [ObjectLike, IntransitiveActivityLike],
    }
    /// A poll; answers live in `oneOf` or `anyOf`.
    Question in ActivityStreams {
        parents: [IntransitiveActivity],
        properties: [OBJECT, ACTIVITY, QUESTION],
        capabilities: [ObjectLike, IntransitiveActivityLike],
    }

    Application in ActivityStreams {
        parents: [Object],
        properties: [OBJECT, ACTOR],
        capabilities: [ObjectLike, ActorLike],
    }
    Group in ActivityStreams {
        parents: [Object],
        properties: [OBJECT, ACTOR],
        capabilities: [ObjectLike, ActorLike],
    }
    Organization in ActivityStreams {
        parents: [Object],
        properties: [OBJECT, ACTOR],
        capabilities: [ObjectLike, ActorLike],
    }
    Person in ActivityStreams {
        parents: [Object],
        properties: [OBJECT, ACTOR],
        capabilities: [ObjectLike, ActorLike],
    }
    Service in ActivityStreams {
        parents: [Object],
        properties: [OBJECT, ACTOR],
        capabilities: [ObjectLike, ActorLike],
    }

    Article in ActivityStreams {
        parents: [Object],
        properties: [OBJECT],
        capabilities: [ObjectLike],
    }
    Document in ActivityStreams {
        parents: [Object],
        properties: [OBJECT],
        capabilities: [ObjectLike],
    }
    Audio in ActivityStreams {
        parents: [Document],
        properties: [OBJECT],
        capabilities: [ObjectLike],
    }
    Image in ActivityStreams {
        parents: [Document],
        properties: [OBJECT],
        capabilities: [ObjectLike],
    }
    Page in ActivityStreams {
        parents: [Document],
        properties: [OBJECT],
        capabilities: [ObjectLike],
    }
    Video in ActivityStreams {
        parents: [Document],
        properties: [OBJECT],
        capabilities: [ObjectLike],
    }
    Event in ActivityStreams {
        parents: [Object],
        properties: [OBJECT],
        capabilities: [ObjectLike],
    }
    /// A short written work.
    Note in ActivityStreams {
        parents: [Object],
        properties: [OBJECT],
        capabilities: [ObjectLike],
    }
    /// A logical or physical location.
    Place in ActivityStreams {
        parents: [Object],
        properties: [OBJECT, PLACE],
        capabilities: [ObjectLike],
    }
    Profile in ActivityStreams {
        parents: [Object],
        properties: [OBJECT, PROFILE],
        capabilities: [ObjectLike],
    }
    Relationship in ActivityStreams {
        parents: [Object],
        properties: [OBJECT, RELATIONSHIP],
        capabilities: [ObjectLike],
    }
    /// Placeholder for a deleted object.
    Tombstone in ActivityStreams {
        parents: [Object],
        properties: [OBJECT, TOMBSTONE],
        capabilities: [ObjectLike],
    }
    Mention in ActivityStreams {
        parents: [Link],
        properties: [LINK],
        capabilities: [LinkLike],
    }

    /// A custom emoji.
    Emoji in Toot {
        parents: [Object],
        properties: [OBJECT],
        capabilities: [ObjectLike],
    }
    IdentityProof in Toot {
        parents: [Object],
        properties: [OBJECT, IDENTITY_PROOF],
        capabilities: [ObjectLike],
    }
    Hashtag in Toot {
        parents: [Link],
        properties: [LINK],
        capabilities: [LinkLike],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::Literal;

    #[test]
    fn names_round_trip_through_tags() {
        for &tag in VocabType::ALL {
            assert_eq!(VocabType::from_name(tag.name()), Some(tag));
        }
        assert_eq!(VocabType::from_name("create"), None);
        assert_eq!(VocabType::from_name("as:Create"), None);
    }

    #[test]
    fn every_type_has_a_schema_and_a_capability() {
        for &tag in VocabType::ALL {
            assert!(!tag.property_groups().is_empty(), "{}", tag.name());
            assert!(!tag.capabilities().is_empty(), "{}", tag.name());
        }
    }

    #[test]
    fn downcast_returns_the_value_on_mismatch() {
        let value = TypedValue::from(Note::new().with_id("https://example.com/n/1"));
        let value = value.downcast::<Create>().unwrap_err();
        let note = value.downcast::<Note>().unwrap();
        assert_eq!(note.id().map(Iri::as_str), Some("https://example.com/n/1"));
    }

    #[test]
    fn place_accessors() {
        let mut place = Place::new();
        place
            .properties_mut()
            .set("latitude", PropertySlot::from(Literal::Float(52.5)))
            .unwrap();
        place
            .properties_mut()
            .set("units", PropertySlot::from(Literal::String("m".into())))
            .unwrap();
        assert_eq!(place.latitude(), Resolution::Resolved(52.5));
        assert_eq!(place.units(), Resolution::Resolved("m"));
        assert_eq!(place.radius(), Resolution::Unresolved);
    }

    #[test]
    fn to_json_adds_toot_alias_only_when_needed() {
        let note = TypedValue::from(Note::new());
        assert_eq!(
            note.to_json()["@context"],
            Value::String(Vocabulary::ActivityStreams.uri().to_string())
        );

        let tag = TypedValue::from(Hashtag::new());
        let doc = tag.to_json();
        assert_eq!(doc["@context"][1]["toot"], Vocabulary::Toot.uri());
        assert_eq!(doc["type"], "toot:Hashtag");
    }
}
