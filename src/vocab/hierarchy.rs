//! Type hierarchy queries over [`VocabType`].
//!
//! The hierarchy is a DAG (`OrderedCollectionPage` has two parents), walked
//! breadth-first from the static parent table. `extends` and
//! `is_extended_by` are strict: a type neither extends nor is extended by
//! itself. Names that are not known types answer `false`.

use std::collections::{HashSet, VecDeque};

use super::VocabType;

impl VocabType {
    /// All strict ancestors, nearest first, without duplicates.
    pub fn ancestors(self) -> Vec<VocabType> {
        let mut seen = HashSet::new();
        let mut order = Vec::new();
        let mut queue: VecDeque<VocabType> = self.parents().iter().copied().collect();

        while let Some(tag) = queue.pop_front() {
            if seen.insert(tag) {
                order.push(tag);
                queue.extend(tag.parents().iter().copied());
            }
        }
        order
    }

    /// All strict descendants, in declaration order.
    pub fn descendants(self) -> Vec<VocabType> {
        VocabType::ALL
            .iter()
            .copied()
            .filter(|t| t.specializes(self))
            .collect()
    }

    /// Whether `self` strictly specialises `ancestor`.
    pub fn specializes(self, ancestor: VocabType) -> bool {
        self != ancestor && self.ancestors().contains(&ancestor)
    }

    /// Name-based form of [`specializes`](Self::specializes).
    pub fn extends(self, ancestor: &str) -> bool {
        VocabType::from_name(ancestor).is_some_and(|a| self.specializes(a))
    }

    /// Whether the type named `descendant` strictly specialises `self`.
    pub fn is_extended_by(self, descendant: &str) -> bool {
        VocabType::from_name(descendant).is_some_and(|d| d.specializes(self))
    }

    /// The root of this type's family: `Object` or `Link`.
    pub fn root(self) -> VocabType {
        self.ancestors().last().copied().unwrap_or(self)
    }

    /// Whether no value can be both a `self` and an `other`.
    ///
    /// The Link family is disjoint with the Object family; types within one
    /// family are not disjoint. Unknown names answer `false`.
    pub fn is_disjoint_with(self, other: &str) -> bool {
        VocabType::from_name(other).is_some_and(|o| o.root() != self.root())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_extends_activity_and_object() {
        assert!(VocabType::Create.extends("Activity"));
        assert!(VocabType::Create.extends("Object"));
        assert!(!VocabType::Create.extends("Create"));
        assert!(!VocabType::Create.extends("Link"));
        assert!(VocabType::Activity.is_extended_by("Create"));
        assert!(!VocabType::Activity.is_extended_by("Note"));
    }

    #[test]
    fn unknown_names_answer_false() {
        assert!(!VocabType::Create.extends("Frobnicate"));
        assert!(!VocabType::Object.is_extended_by("Frobnicate"));
        assert!(!VocabType::Object.is_disjoint_with("Frobnicate"));
    }

    #[test]
    fn extends_and_is_extended_by_are_inverse() {
        for &a in VocabType::ALL {
            for &b in VocabType::ALL {
                assert_eq!(
                    a.extends(b.name()),
                    b.is_extended_by(a.name()),
                    "{} / {}",
                    a.name(),
                    b.name()
                );
            }
        }
    }

    #[test]
    fn ancestors_walk_multiple_parents_once() {
        let ancestors = VocabType::OrderedCollectionPage.ancestors();
        assert_eq!(
            ancestors,
            vec![
                VocabType::OrderedCollection,
                VocabType::CollectionPage,
                VocabType::Collection,
                VocabType::Object,
            ]
        );
        assert_eq!(VocabType::TentativeAccept.ancestors()[0], VocabType::Accept);
        assert!(VocabType::Object.ancestors().is_empty());
    }

    #[test]
    fn descendants_of_document() {
        assert_eq!(
            VocabType::Document.descendants(),
            vec![VocabType::Audio, VocabType::Image, VocabType::Page, VocabType::Video]
        );
    }

    #[test]
    fn roots_and_disjointness() {
        assert_eq!(VocabType::Hashtag.root(), VocabType::Link);
        assert_eq!(VocabType::Invite.root(), VocabType::Object);
        assert_eq!(VocabType::Object.root(), VocabType::Object);
        assert!(VocabType::Mention.is_disjoint_with("Note"));
        assert!(VocabType::Note.is_disjoint_with("Link"));
        assert!(!VocabType::Note.is_disjoint_with("Create"));
    }
}
