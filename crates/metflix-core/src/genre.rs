//! Genre lists

use serde::{Deserialize, Serialize};

/// A catalog genre
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Genre {
    pub id: u32,
    pub name: String,
}

impl Genre {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Genres of one media kind, in catalog order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreCatalog {
    genres: Vec<Genre>,
}

impl GenreCatalog {
    pub fn new(genres: Vec<Genre>) -> Self {
        Self { genres }
    }

    pub fn name_of(&self, id: u32) -> Option<&str> {
        self.genres
            .iter()
            .find(|genre| genre.id == id)
            .map(|genre| genre.name.as_str())
    }

    /// Names for the given ids, in the order given; unknown ids are skipped
    pub fn names_for(&self, ids: &[u32]) -> Vec<&str> {
        ids.iter().filter_map(|id| self.name_of(*id)).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Genre> {
        self.genres.iter()
    }

    pub fn len(&self) -> usize {
        self.genres.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genres.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> GenreCatalog {
        GenreCatalog::new(vec![
            Genre::new(28, "Action"),
            Genre::new(35, "Comedy"),
            Genre::new(18, "Drama"),
        ])
    }

    #[test]
    fn test_name_of() {
        let catalog = catalog();
        assert_eq!(catalog.name_of(35), Some("Comedy"));
        assert_eq!(catalog.name_of(99), None);
    }

    #[test]
    fn test_names_for_keeps_order_and_skips_unknown() {
        let catalog = catalog();
        assert_eq!(catalog.names_for(&[18, 99, 28]), vec!["Drama", "Action"]);
        assert!(catalog.names_for(&[]).is_empty());
    }
}
