//! Session-local "liked" markers.
//!
//! A [`LikedSet`] never touches a record's stored counter; it only adds a
//! visual +1 for members.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::RecordId;
use crate::query::Listable;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikedSet(BTreeSet<RecordId>);

impl LikedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.0.contains(&id)
    }

    /// Flips membership of `id` in place. Returns `true` if `id` is now liked.
    pub fn toggle(&mut self, id: RecordId) -> bool {
        if self.0.remove(&id) {
            false
        } else {
            self.0.insert(id);
            true
        }
    }

    /// Like-count to display for `record`: the stored counter, plus one if liked.
    pub fn displayed_likes<R: Listable>(&self, record: &R) -> u32 {
        record.likes().saturating_add(u32::from(self.contains(record.id())))
    }
}

/// Returns `liked` with membership of `id` flipped.
pub fn toggle_like(liked: &LikedSet, id: RecordId) -> LikedSet {
    let mut next = liked.clone();
    next.toggle(id);
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GalleryCategory, GalleryItem};
    use chrono::NaiveDate;

    #[test]
    fn toggle_like_is_its_own_inverse() {
        let start: LikedSet = [RecordId(2), RecordId(5)].into_iter().fold(LikedSet::new(), |s, id| toggle_like(&s, id));
        for id in [RecordId(1), RecordId(2), RecordId(9)] {
            assert_eq!(toggle_like(&toggle_like(&start, id), id), start);
        }
    }

    #[test]
    fn toggle_reports_new_membership() {
        let mut liked = LikedSet::new();
        assert!(liked.toggle(RecordId(3)));
        assert!(liked.contains(RecordId(3)));
        assert!(!liked.toggle(RecordId(3)));
        assert_eq!(liked, LikedSet::new());
    }

    #[test]
    fn displayed_likes_adds_one_for_members_only() {
        let item = GalleryItem {
            id: RecordId(7),
            category: GalleryCategory::Acne,
            treatment: "Accutane Therapy".into(),
            patient: "Male, 24".into(),
            description: String::new(),
            tags: vec![],
            likes: 198,
            views: 1100,
            taken_on: NaiveDate::from_ymd_opt(2024, 1, 30).unwrap(),
        };
        let mut liked = LikedSet::new();
        assert_eq!(liked.displayed_likes(&item), 198);
        liked.toggle(RecordId(7));
        assert_eq!(liked.displayed_likes(&item), 199);
        assert_eq!(item.likes, 198);

        let viral = GalleryItem { likes: u32::MAX, ..item };
        assert_eq!(liked.displayed_likes(&viral), u32::MAX);
    }
}
