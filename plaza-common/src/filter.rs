//! Client-side filters over fully fetched collections.
//!
//! Filters never touch the collection they are applied to; they yield a derived, order-preserving
//! view that is recomputed from the full collection each time it is needed.

use crate::model::{photo::Photo, user::User};

pub trait Filter<T> {
    fn matches(&self, item: &T) -> bool;

    fn apply<'a>(&self, items: &'a [T]) -> Vec<&'a T> {
        items.iter().filter(|item| self.matches(item)).collect()
    }
}

/// Case-insensitive substring match on a user's display name.
#[derive(Clone, Eq, PartialEq, Debug, Default, Hash)]
pub struct NameFilter {
    query: String,
    needle: String,
}

impl NameFilter {
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        let query = query.into();
        let needle = query.to_lowercase();
        Self { query, needle }
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }
}

impl Filter<User> for NameFilter {
    fn matches(&self, item: &User) -> bool {
        item.name.to_lowercase().contains(&self.needle)
    }
}

/// Substring match on the decimal photo id and album id. Both criteria must hold; an empty
/// criterion matches every photo.
#[derive(Clone, Eq, PartialEq, Debug, Default, Hash)]
pub struct PhotoFilter {
    pub photo_id: String,
    pub album_id: String,
}

impl Filter<Photo> for PhotoFilter {
    fn matches(&self, item: &Photo) -> bool {
        let photo_id_matches =
            self.photo_id.is_empty() || item.id.to_string().contains(&self.photo_id);
        let album_id_matches =
            self.album_id.is_empty() || item.album_id.to_string().contains(&self.album_id);

        photo_id_matches && album_id_matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Id;
    use rstest::rstest;

    fn user(id: u64, name: &str) -> User {
        User {
            id: Id::new(id),
            name: name.to_owned(),
            ..User::default()
        }
    }

    fn photo(id: u64, album_id: u64) -> Photo {
        Photo {
            id: Id::new(id),
            album_id: Id::new(album_id),
            ..Photo::default()
        }
    }

    fn names<'a>(users: &[&'a User]) -> Vec<&'a str> {
        users.iter().map(|user| user.name.as_str()).collect()
    }

    #[test]
    fn name_filter_is_case_insensitive_and_keeps_order() {
        let users = [user(1, "Anna"), user(2, "Bob"), user(3, "Annie")];

        let filtered = NameFilter::new("ann").apply(&users);

        assert_eq!(names(&filtered), ["Anna", "Annie"]);
    }

    #[test]
    fn name_filter_is_idempotent() {
        let users = [user(1, "Anna"), user(2, "Bob"), user(3, "Annie")];
        let filter = NameFilter::new("AN");

        let once: Vec<User> = filter.apply(&users).into_iter().cloned().collect();
        let twice = filter.apply(&once);

        assert_eq!(names(&twice), names(&filter.apply(&users)));
        assert_eq!(users.len(), 3);
    }

    #[test]
    fn empty_name_filter_matches_everything() {
        let users = [user(1, "Anna"), user(2, "Bob")];
        assert_eq!(NameFilter::default().apply(&users).len(), 2);
    }

    #[test]
    fn photo_filter_is_idempotent() {
        let photos = [photo(1, 1), photo(12, 1), photo(51, 2), photo(100, 2)];
        let filter = PhotoFilter {
            photo_id: "1".to_owned(),
            album_id: "2".to_owned(),
        };

        let once: Vec<Photo> = filter.apply(&photos).into_iter().cloned().collect();
        let twice: Vec<u64> = filter.apply(&once).iter().map(|p| p.id.get()).collect();

        assert_eq!(twice, [51, 100]);
        assert_eq!(photos.len(), 4);
    }

    #[rstest]
    #[case::no_criteria("", "", &[1, 12, 51, 100])]
    #[case::photo_id("1", "", &[1, 12, 51, 100])]
    #[case::photo_id_narrow("12", "", &[12])]
    #[case::album_id("", "2", &[51, 100])]
    #[case::both("5", "2", &[51])]
    #[case::nothing("7", "", &[])]
    fn photo_filter_composes_with_and(
        #[case] photo_id: &str,
        #[case] album_id: &str,
        #[case] expected: &[u64],
    ) {
        let photos = [photo(1, 1), photo(12, 1), photo(51, 2), photo(100, 2)];
        let filter = PhotoFilter {
            photo_id: photo_id.to_owned(),
            album_id: album_id.to_owned(),
        };

        let ids: Vec<u64> = filter.apply(&photos).iter().map(|p| p.id.get()).collect();

        assert_eq!(ids, expected);
    }
}
