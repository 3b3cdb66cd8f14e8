//! Capability traits and markers.
//!
//! A capability is a family of types sharing a convenience surface:
//! everything rooted at `Object` is [`ObjectLike`], every actor is
//! [`ActorLike`], and so on. Each trait's accessors are provided methods over
//! the value's [`Properties`], so implementing one is a single empty `impl`.
//!
//! [`VocabularyValue`] projects a value onto each capability it carries
//! (`as_object`, `as_activity`, ...). The [`Capability`] trait ties a
//! compile-time name (a concrete type, or one of the marker enums in this
//! module) to that projection, which is what interface dispatch keys on.

use std::fmt;

use chrono::{DateTime, FixedOffset, TimeDelta};

use super::{TypedValue, VocabType, Vocabulary};
use crate::property::{Iri, Properties, PropertySlot, Resolution};

// ---------------------------------------------------------------------------
// Base value trait
// ---------------------------------------------------------------------------

/// Behaviour shared by every vocabulary value.
pub trait VocabularyValue: fmt::Debug + Send + Sync {
    /// The concrete type tag.
    fn vocab_type(&self) -> VocabType;

    /// The underlying property store.
    fn properties(&self) -> &Properties;

    /// Mutable access to the underlying property store.
    fn properties_mut(&mut self) -> &mut Properties;

    /// The unprefixed type name, e.g. `"Create"`.
    fn type_name(&self) -> &'static str {
        self.vocab_type().name()
    }

    fn vocabulary(&self) -> Vocabulary {
        self.vocab_type().vocabulary()
    }

    /// The node identifier, if the document carried one.
    fn id(&self) -> Option<&Iri> {
        self.properties().id()
    }

    /// Whether this value's type strictly specialises `ancestor`.
    fn extends(&self, ancestor: &str) -> bool {
        self.vocab_type().extends(ancestor)
    }

    /// Whether `descendant` strictly specialises this value's type.
    fn is_extended_by(&self, descendant: &str) -> bool {
        self.vocab_type().is_extended_by(descendant)
    }

    fn as_object(&self) -> Option<&(dyn ObjectLike + 'static)> {
        None
    }

    fn as_link(&self) -> Option<&(dyn LinkLike + 'static)> {
        None
    }

    fn as_activity(&self) -> Option<&(dyn ActivityLike + 'static)> {
        None
    }

    fn as_intransitive_activity(&self) -> Option<&(dyn IntransitiveActivityLike + 'static)> {
        None
    }

    fn as_collection(&self) -> Option<&(dyn CollectionLike + 'static)> {
        None
    }

    fn as_ordered_collection(&self) -> Option<&(dyn OrderedCollectionLike + 'static)> {
        None
    }

    fn as_actor(&self) -> Option<&(dyn ActorLike + 'static)> {
        None
    }
}

// ---------------------------------------------------------------------------
// Capability traits
// ---------------------------------------------------------------------------

/// Convenience surface of every type rooted at `Object`.
pub trait ObjectLike: VocabularyValue {
    fn name(&self) -> Resolution<&str> {
        self.properties().get_str("name")
    }

    fn summary(&self) -> Resolution<&str> {
        self.properties().get_str("summary")
    }

    fn content(&self) -> Resolution<&str> {
        self.properties().get_str("content")
    }

    fn media_type(&self) -> Resolution<&str> {
        self.properties().get_str("mediaType")
    }

    fn published(&self) -> Resolution<DateTime<FixedOffset>> {
        self.properties().get_datetime("published")
    }

    fn updated(&self) -> Resolution<DateTime<FixedOffset>> {
        self.properties().get_datetime("updated")
    }

    fn duration(&self) -> Resolution<TimeDelta> {
        self.properties().get_duration("duration")
    }

    /// Mastodon's content warning flag.
    fn sensitive(&self) -> Resolution<bool> {
        self.properties().get_bool("sensitive")
    }

    fn attributed_to(&self) -> &[PropertySlot] {
        self.properties().values("attributedTo")
    }

    fn to(&self) -> &[PropertySlot] {
        self.properties().values("to")
    }

    fn cc(&self) -> &[PropertySlot] {
        self.properties().values("cc")
    }

    fn audience(&self) -> &[PropertySlot] {
        self.properties().values("audience")
    }

    fn in_reply_to(&self) -> &[PropertySlot] {
        self.properties().values("inReplyTo")
    }

    fn tag(&self) -> &[PropertySlot] {
        self.properties().values("tag")
    }

    fn attachment(&self) -> &[PropertySlot] {
        self.properties().values("attachment")
    }

    fn url(&self) -> &[PropertySlot] {
        self.properties().values("url")
    }

    fn replies(&self) -> &PropertySlot {
        self.properties().slot("replies")
    }
}

/// Convenience surface of `Link` and its subtypes.
pub trait LinkLike: VocabularyValue {
    fn href(&self) -> Resolution<&str> {
        self.properties().get_uri("href")
    }

    fn rel(&self) -> &[PropertySlot] {
        self.properties().values("rel")
    }

    fn media_type(&self) -> Resolution<&str> {
        self.properties().get_str("mediaType")
    }

    fn name(&self) -> Resolution<&str> {
        self.properties().get_str("name")
    }

    fn hreflang(&self) -> Resolution<&str> {
        self.properties().get_language_tag("hreflang")
    }

    fn height(&self) -> Resolution<u64> {
        self.properties().get_uint("height")
    }

    fn width(&self) -> Resolution<u64> {
        self.properties().get_uint("width")
    }

    fn preview(&self) -> &[PropertySlot] {
        self.properties().values("preview")
    }
}

/// Activities that act on an `object`.
pub trait ActivityLike: ObjectLike {
    fn actor(&self) -> &[PropertySlot] {
        self.properties().values("actor")
    }

    fn object(&self) -> &[PropertySlot] {
        self.properties().values("object")
    }

    fn target(&self) -> &[PropertySlot] {
        self.properties().values("target")
    }

    fn result(&self) -> &[PropertySlot] {
        self.properties().values("result")
    }

    fn origin(&self) -> &[PropertySlot] {
        self.properties().values("origin")
    }

    fn instrument(&self) -> &[PropertySlot] {
        self.properties().values("instrument")
    }
}

/// Activities without an `object`.
pub trait IntransitiveActivityLike: ObjectLike {
    fn actor(&self) -> &[PropertySlot] {
        self.properties().values("actor")
    }

    fn target(&self) -> &[PropertySlot] {
        self.properties().values("target")
    }

    fn result(&self) -> &[PropertySlot] {
        self.properties().values("result")
    }

    fn origin(&self) -> &[PropertySlot] {
        self.properties().values("origin")
    }

    fn instrument(&self) -> &[PropertySlot] {
        self.properties().values("instrument")
    }
}

/// Unordered collections and their pages.
pub trait CollectionLike: ObjectLike {
    fn total_items(&self) -> Resolution<u64> {
        self.properties().get_uint("totalItems")
    }

    fn items(&self) -> &[PropertySlot] {
        self.properties().values("items")
    }

    fn current(&self) -> &PropertySlot {
        self.properties().slot("current")
    }

    fn first(&self) -> &PropertySlot {
        self.properties().slot("first")
    }

    fn last(&self) -> &PropertySlot {
        self.properties().slot("last")
    }
}

/// Ordered collections and their pages.
pub trait OrderedCollectionLike: ObjectLike {
    fn total_items(&self) -> Resolution<u64> {
        self.properties().get_uint("totalItems")
    }

    fn ordered_items(&self) -> &[PropertySlot] {
        self.properties().values("orderedItems")
    }

    fn current(&self) -> &PropertySlot {
        self.properties().slot("current")
    }

    fn first(&self) -> &PropertySlot {
        self.properties().slot("first")
    }

    fn last(&self) -> &PropertySlot {
        self.properties().slot("last")
    }
}

/// ActivityPub actors.
pub trait ActorLike: ObjectLike {
    fn inbox(&self) -> &PropertySlot {
        self.properties().slot("inbox")
    }

    fn outbox(&self) -> &PropertySlot {
        self.properties().slot("outbox")
    }

    fn following(&self) -> &PropertySlot {
        self.properties().slot("following")
    }

    fn followers(&self) -> &PropertySlot {
        self.properties().slot("followers")
    }

    fn liked(&self) -> &PropertySlot {
        self.properties().slot("liked")
    }

    fn preferred_username(&self) -> Resolution<&str> {
        self.properties().get_str("preferredUsername")
    }

    fn endpoints(&self) -> &PropertySlot {
        self.properties().slot("endpoints")
    }

    fn streams(&self) -> &[PropertySlot] {
        self.properties().values("streams")
    }
}

// ---------------------------------------------------------------------------
// Capability keys
// ---------------------------------------------------------------------------

/// A compile-time dispatch key: a concrete type or a capability marker.
///
/// `view` and `satisfied_by` agree: a value has a view exactly when its
/// type tag satisfies the capability.
pub trait Capability: 'static {
    /// Name used in diagnostics.
    const NAME: &'static str;

    /// What a handler keyed on this capability receives.
    type View: ?Sized + 'static;

    /// Project `value` onto this capability.
    fn view(value: &TypedValue) -> Option<&Self::View>;

    /// Whether values of type `tag` carry this capability.
    fn satisfied_by(tag: VocabType) -> bool;
}

macro_rules! capability_marker {
    ($(#[$attr:meta])* $marker:ident => $cap:ident via $project:ident) => {
        $(#[$attr])*
        #[derive(Debug)]
        pub enum $marker {}

        impl Capability for $marker {
            const NAME: &'static str = stringify!($cap);
            type View = dyn $cap;

            fn view(value: &TypedValue) -> Option<&Self::View> {
                value.as_value().$project()
            }

            fn satisfied_by(tag: VocabType) -> bool {
                tag.capabilities().contains(&stringify!($cap))
            }
        }
    };
}

capability_marker!(
    /// Every type rooted at `Object`.
    Object => ObjectLike via as_object
);
capability_marker!(
    /// `Link`, `Mention` and `Hashtag`.
    Link => LinkLike via as_link
);
capability_marker!(
    /// Transitive activities.
    Activity => ActivityLike via as_activity
);
capability_marker!(
    /// `IntransitiveActivity`, `Arrive`, `Travel` and `Question`.
    IntransitiveActivity => IntransitiveActivityLike via as_intransitive_activity
);
capability_marker!(
    /// Unordered collections and collection pages.
    Collection => CollectionLike via as_collection
);
capability_marker!(
    /// Ordered collections and ordered collection pages.
    OrderedCollection => OrderedCollectionLike via as_ordered_collection
);
capability_marker!(
    /// ActivityPub actors.
    Actor => ActorLike via as_actor
);

/// Matches every vocabulary value.
#[derive(Debug)]
pub enum Any {}

impl Capability for Any {
    const NAME: &'static str = "VocabularyValue";
    type View = dyn VocabularyValue;

    fn view(value: &TypedValue) -> Option<&Self::View> {
        Some(value.as_value())
    }

    fn satisfied_by(_tag: VocabType) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::{Create, Hashtag, Note, OrderedCollectionPage, Person, Question};

    fn agree<K: Capability>() {
        for &tag in VocabType::ALL {
            let value = TypedValue::new(tag);
            assert_eq!(
                K::view(&value).is_some(),
                K::satisfied_by(tag),
                "{} disagrees on {}",
                K::NAME,
                tag.name()
            );
        }
    }

    #[test]
    fn views_agree_with_tags() {
        agree::<Any>();
        agree::<Object>();
        agree::<Link>();
        agree::<Activity>();
        agree::<IntransitiveActivity>();
        agree::<Collection>();
        agree::<OrderedCollection>();
        agree::<Actor>();
        agree::<Create>();
        agree::<Hashtag>();
    }

    #[test]
    fn capability_families() {
        assert!(Activity::satisfied_by(VocabType::Create));
        assert!(!Activity::satisfied_by(VocabType::Question));
        assert!(IntransitiveActivity::satisfied_by(VocabType::Question));
        assert!(Actor::satisfied_by(VocabType::Person));
        assert!(Link::satisfied_by(VocabType::Hashtag));
        assert!(!Object::satisfied_by(VocabType::Mention));
        assert!(OrderedCollection::satisfied_by(VocabType::OrderedCollectionPage));
        assert!(!Collection::satisfied_by(VocabType::OrderedCollection));
    }

    #[test]
    fn object_accessors_read_properties() {
        let mut note = Note::new();
        note.properties_mut()
            .set("name", PropertySlot::from(crate::property::Literal::String("hi".into())))
            .unwrap();
        let value = TypedValue::from(note);
        let object = value.as_object().unwrap();
        assert_eq!(object.name(), Resolution::Resolved("hi"));
        assert_eq!(object.summary(), Resolution::Unresolved);
        assert!(object.to().is_empty());
    }

    #[test]
    fn concrete_types_project_to_their_families() {
        let person = TypedValue::from(Person::new());
        assert!(person.as_actor().is_some());
        assert!(person.as_activity().is_none());

        let question = TypedValue::from(Question::new());
        assert!(question.as_intransitive_activity().is_some());
        assert!(question.as_object().is_some());

        let page = TypedValue::from(OrderedCollectionPage::new());
        assert!(page.as_ordered_collection().is_some());
        assert!(page.as_collection().is_none());

        let create = TypedValue::from(Create::new());
        assert!(create.as_activity().is_some());
        assert!(create.as_link().is_none());
    }
}
